//! Auth feature service.
//!
//! One method per backend auth operation. Only the identity-affecting
//! operations (login, register, profile refresh/update) write to the
//! session store, and only on a `success: true` envelope; everything else
//! is a straight passthrough.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tracing::warn;

use jobportal_models::{
    ApiEnvelope, AuthData, LoginForm, MessageData, ProfilePictureData, ProfileUpdate,
    RegisterForm, UserProfile,
};
use jobportal_session::SessionStore;

use crate::client::ApiClient;
use crate::error::ClientResult;

#[derive(Serialize)]
struct ForgotPasswordRequest<'a> {
    email: &'a str,
}

#[derive(Serialize)]
struct ResetPasswordRequest<'a> {
    token: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChangePasswordRequest<'a> {
    current_password: &'a str,
    new_password: &'a str,
}

#[derive(Serialize)]
struct VerifyEmailRequest<'a> {
    token: &'a str,
}

/// Authentication and profile operations.
#[derive(Clone)]
pub struct AuthService {
    client: ApiClient,
    session: Arc<SessionStore>,
}

impl AuthService {
    pub fn new(client: ApiClient, session: Arc<SessionStore>) -> Self {
        Self { client, session }
    }

    /// `POST /auth/login`. Persists the returned token and user on success.
    pub async fn login(&self, credentials: &LoginForm) -> ClientResult<ApiEnvelope<AuthData>> {
        let envelope = self.client.post("/auth/login", credentials).await?;
        self.persist_identity(&envelope);
        Ok(envelope)
    }

    /// `POST /auth/register`. Persists the returned token and user on success.
    pub async fn register(&self, form: &RegisterForm) -> ClientResult<ApiEnvelope<AuthData>> {
        let envelope = self.client.post("/auth/register", form).await?;
        self.persist_identity(&envelope);
        Ok(envelope)
    }

    /// Drop the local session. No network call is made.
    pub fn logout(&self) {
        self.session.clear();
    }

    /// The cached user profile, if a session is persisted.
    pub fn current_user(&self) -> Option<UserProfile> {
        self.session.current_user()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// `GET /auth/profile`. Re-persists the refreshed user on success.
    pub async fn refresh_profile(&self) -> ClientResult<ApiEnvelope<UserProfile>> {
        let envelope = self.client.get("/auth/profile").await?;
        self.persist_user(&envelope);
        Ok(envelope)
    }

    /// `PUT /auth/profile`. Re-persists the updated user on success.
    pub async fn update_profile(
        &self,
        update: &ProfileUpdate,
    ) -> ClientResult<ApiEnvelope<UserProfile>> {
        let envelope = self.client.put("/auth/profile", update).await?;
        self.persist_user(&envelope);
        Ok(envelope)
    }

    pub async fn forgot_password(&self, email: &str) -> ClientResult<ApiEnvelope<MessageData>> {
        self.client
            .post("/auth/forgot-password", &ForgotPasswordRequest { email })
            .await
    }

    pub async fn reset_password(
        &self,
        token: &str,
        new_password: &str,
    ) -> ClientResult<ApiEnvelope<MessageData>> {
        self.client
            .post(
                "/auth/reset-password",
                &ResetPasswordRequest {
                    token,
                    password: new_password,
                },
            )
            .await
    }

    pub async fn change_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> ClientResult<ApiEnvelope<MessageData>> {
        self.client
            .post(
                "/auth/change-password",
                &ChangePasswordRequest {
                    current_password,
                    new_password,
                },
            )
            .await
    }

    /// `POST /auth/profile/picture` (multipart).
    pub async fn upload_profile_picture(
        &self,
        file: &Path,
    ) -> ClientResult<ApiEnvelope<ProfilePictureData>> {
        self.client
            .upload_file("/auth/profile/picture", file, &[])
            .await
    }

    pub async fn verify_email(&self, token: &str) -> ClientResult<ApiEnvelope<MessageData>> {
        self.client
            .post("/auth/verify-email", &VerifyEmailRequest { token })
            .await
    }

    pub async fn resend_verification_email(&self) -> ClientResult<ApiEnvelope<MessageData>> {
        self.client.post_empty("/auth/resend-verification").await
    }

    /// Persist token + user from a login/register envelope.
    ///
    /// A store write failure is downgraded to "treat as logged out": the
    /// caller still receives the successful envelope, and the next
    /// `is_authenticated()` reads false.
    fn persist_identity(&self, envelope: &ApiEnvelope<AuthData>) {
        if !envelope.success {
            return;
        }
        if let Some(data) = &envelope.data {
            if let Err(e) = self.session.save(&data.token, &data.user) {
                warn!("Failed to persist session after auth: {}", e);
            }
        }
    }

    /// Re-persist a refreshed user under the existing token.
    fn persist_user(&self, envelope: &ApiEnvelope<UserProfile>) {
        if !envelope.success {
            return;
        }
        if let (Some(user), Some(token)) = (&envelope.data, self.session.current_token()) {
            if let Err(e) = self.session.save(&token, user) {
                warn!("Failed to persist refreshed profile: {}", e);
            }
        }
    }
}
