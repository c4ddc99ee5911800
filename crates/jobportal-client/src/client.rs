//! JobPortal API HTTP client.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use jobportal_models::ApiEnvelope;
use jobportal_session::SessionStore;

use crate::error::{ClientError, ClientResult};

/// Configuration for the API client.
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL every path is resolved against
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl ApiClientConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("JOBPORTAL_API_URL")
                .unwrap_or_else(|_| "http://localhost:5000/api".to_string()),
            timeout: Duration::from_secs(
                std::env::var("JOBPORTAL_API_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
            ),
        }
    }
}

/// Single chokepoint for all outbound calls.
///
/// Attaches the bearer token from the injected [`SessionStore`] when one
/// is present, serializes JSON bodies and deserializes every response into
/// an [`ApiEnvelope`] regardless of HTTP status. The client itself never
/// writes to the session store; persistence is the feature services'
/// responsibility.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    config: ApiClientConfig,
    session: Arc<SessionStore>,
}

impl ApiClient {
    /// Create a new API client.
    pub fn new(config: ApiClientConfig, session: Arc<SessionStore>) -> ClientResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ClientError::Transport)?;

        Ok(Self {
            http,
            config,
            session,
        })
    }

    /// Create from environment variables.
    pub fn from_env(session: Arc<SessionStore>) -> ClientResult<Self> {
        Self::new(ApiClientConfig::from_env(), session)
    }

    /// The session store this client reads its bearer token from.
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<ApiEnvelope<T>> {
        self.execute(self.http.get(self.url(path))).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> ClientResult<ApiEnvelope<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(self.http.post(self.url(path)).json(body)).await
    }

    /// POST with no body, for bare action endpoints like bookmarking.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<ApiEnvelope<T>> {
        self.execute(self.http.post(self.url(path))).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> ClientResult<ApiEnvelope<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(self.http.put(self.url(path)).json(body)).await
    }

    pub async fn patch<B, T>(&self, path: &str, body: &B) -> ClientResult<ApiEnvelope<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(self.http.patch(self.url(path)).json(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<ApiEnvelope<T>> {
        self.execute(self.http.delete(self.url(path))).await
    }

    /// Upload a file via multipart.
    ///
    /// The file travels in a dedicated `file` part with its filename
    /// preserved; `fields` become separate text parts alongside it.
    pub async fn upload_file<T: DeserializeOwned>(
        &self,
        path: &str,
        file: &Path,
        fields: &[(&str, String)],
    ) -> ClientResult<ApiEnvelope<T>> {
        let bytes = tokio::fs::read(file).await.map_err(|source| ClientError::File {
            path: file.display().to_string(),
            source,
        })?;

        let filename = file
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();

        let mut form = Form::new().part("file", Part::bytes(bytes).file_name(filename));
        for (key, value) in fields {
            form = form.text(key.to_string(), value.clone());
        }

        self.execute(self.http.post(self.url(path)).multipart(form))
            .await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Send a request and coerce the response into an envelope.
    ///
    /// The bearer token is attached iff the session store holds one. A
    /// non-2xx status with a parsable envelope body passes through with
    /// `success` reflecting the body; only a missing response or an
    /// unparsable body becomes a [`ClientError`].
    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> ClientResult<ApiEnvelope<T>> {
        let request = match self.session.current_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await.map_err(ClientError::Transport)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(ClientError::Transport)?;

        match serde_json::from_slice::<ApiEnvelope<T>>(&bytes) {
            Ok(envelope) => {
                if !envelope.success {
                    debug!(
                        status = status.as_u16(),
                        reason = envelope.failure_reason().unwrap_or(""),
                        "Backend rejected request"
                    );
                }
                Ok(envelope)
            }
            Err(source) => {
                warn!(status = status.as_u16(), "Undecodable response body");
                Err(ClientError::Decode {
                    status: status.as_u16(),
                    source,
                })
            }
        }
    }
}
