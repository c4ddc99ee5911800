//! API client integration tests against a mock backend.

use std::sync::Arc;
use std::time::Duration;

use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use jobportal_client::{ApiClient, ApiClientConfig, AuthService, ClientError, JobService};
use jobportal_models::{
    ApiEnvelope, Job, JobSearchFilters, JobType, LoginForm, MessageData, PaginatedResponse,
    SortOptions, UserProfile, UserRole,
};
use jobportal_session::SessionStore;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .try_init();
}

fn user_json() -> serde_json::Value {
    serde_json::json!({
        "id": "u1",
        "email": "jane@example.com",
        "firstName": "Jane",
        "lastName": "Doe",
        "userType": "job_seeker",
        "createdAt": "2024-01-01T00:00:00Z",
        "updatedAt": "2024-01-01T00:00:00Z"
    })
}

fn client_for(server: &MockServer) -> (ApiClient, Arc<SessionStore>, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create session dir");
    let session = Arc::new(SessionStore::new(dir.path()).expect("Failed to open session store"));
    let client = ApiClient::new(
        ApiClientConfig {
            base_url: server.uri(),
            timeout: Duration::from_secs(5),
        },
        Arc::clone(&session),
    )
    .expect("Failed to build client");
    (client, session, dir)
}

#[tokio::test]
async fn request_without_stored_token_has_no_authorization_header() {
    init_tracing();
    let server = MockServer::start().await;
    let (client, _session, _dir) = client_for(&server);

    Mock::given(method("GET"))
        .and(path("/jobs/featured"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": []
        })))
        .mount(&server)
        .await;

    let envelope: ApiEnvelope<Vec<Job>> = client.get("/jobs/featured?limit=6").await.unwrap();
    assert!(envelope.success);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn request_with_stored_token_carries_exactly_that_token() {
    init_tracing();
    let server = MockServer::start().await;
    let (client, session, _dir) = client_for(&server);

    let user: UserProfile = serde_json::from_value(user_json()).unwrap();
    session.save("abc", &user).unwrap();

    Mock::given(method("GET"))
        .and(path("/auth/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": user_json()
        })))
        .mount(&server)
        .await;

    let _: ApiEnvelope<UserProfile> = client.get("/auth/profile").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let auth = requests[0].headers.get("authorization").unwrap();
    assert_eq!(auth.to_str().unwrap(), "Bearer abc");
}

#[tokio::test]
async fn login_persists_session_and_logout_clears_it() {
    init_tracing();
    let server = MockServer::start().await;
    let (client, session, _dir) = client_for(&server);

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(serde_json::json!({
            "email": "jane@example.com",
            "password": "hunter2"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": { "user": user_json(), "token": "abc" }
        })))
        .mount(&server)
        .await;

    let auth = AuthService::new(client, Arc::clone(&session));
    let envelope = auth
        .login(&LoginForm {
            email: "jane@example.com".to_string(),
            password: "hunter2".to_string(),
        })
        .await
        .unwrap();

    assert!(envelope.success);
    assert!(auth.is_authenticated());
    assert_eq!(session.current_token().as_deref(), Some("abc"));
    assert_eq!(auth.current_user().unwrap().id, "u1");

    auth.logout();
    assert!(!auth.is_authenticated());
    assert!(session.current_token().is_none());
    assert!(session.current_user().is_none());
}

#[tokio::test]
async fn rejected_login_does_not_touch_the_session() {
    init_tracing();
    let server = MockServer::start().await;
    let (client, session, _dir) = client_for(&server);

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "success": false,
            "error": "Invalid credentials"
        })))
        .mount(&server)
        .await;

    let auth = AuthService::new(client, Arc::clone(&session));
    let envelope = auth
        .login(&LoginForm {
            email: "jane@example.com".to_string(),
            password: "wrong".to_string(),
        })
        .await
        .unwrap();

    // A well-formed rejection is a normal outcome, not a client error.
    assert!(!envelope.success);
    assert_eq!(envelope.failure_reason(), Some("Invalid credentials"));
    assert!(!auth.is_authenticated());
}

#[tokio::test]
async fn non_2xx_envelope_passes_through() {
    init_tracing();
    let server = MockServer::start().await;
    let (client, _session, _dir) = client_for(&server);

    Mock::given(method("GET"))
        .and(path("/jobs/j1"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "success": false,
            "message": "Something broke"
        })))
        .mount(&server)
        .await;

    let envelope: ApiEnvelope<Job> = client.get("/jobs/j1").await.unwrap();
    assert!(!envelope.success);
    assert_eq!(envelope.failure_reason(), Some("Something broke"));
}

#[tokio::test]
async fn transport_failure_is_distinct_from_envelope_failure() {
    init_tracing();
    // Use an unpooled server: pooled servers from `MockServer::start()` keep
    // listening after drop, so the connection would not be refused.
    let server = MockServer::builder().start().await;
    let (client, _session, _dir) = client_for(&server);
    // Shut the server down so the connection is refused.
    drop(server);

    let result: Result<ApiEnvelope<Job>, _> = client.get("/jobs/j1").await;
    assert!(matches!(result, Err(ClientError::Transport(_))));
}

#[tokio::test]
async fn undecodable_body_is_a_decode_error() {
    init_tracing();
    let server = MockServer::start().await;
    let (client, _session, _dir) = client_for(&server);

    Mock::given(method("GET"))
        .and(path("/jobs/j1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let result: Result<ApiEnvelope<Job>, _> = client.get("/jobs/j1").await;
    match result {
        Err(ClientError::Decode { status, .. }) => assert_eq!(status, 200),
        other => panic!("Expected decode error, got {other:?}"),
    }
}

#[tokio::test]
async fn list_jobs_encodes_filters_sort_and_pagination() {
    init_tracing();
    let server = MockServer::start().await;
    let (client, _session, _dir) = client_for(&server);

    Mock::given(method("GET"))
        .and(path("/jobs"))
        .and(query_param("location", "Remote"))
        .and(query_param("sortBy", "createdAt"))
        .and(query_param("sortOrder", "desc"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": {
                "data": [],
                "pagination": { "page": 2, "limit": 10, "total": 0, "totalPages": 0 }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let jobs = JobService::new(client);
    let filters = JobSearchFilters {
        location: Some("Remote".to_string()),
        job_type: vec![JobType::FullTime, JobType::Remote],
        ..Default::default()
    };
    let envelope: ApiEnvelope<PaginatedResponse<Job>> = jobs
        .list_jobs(&filters, &SortOptions::default(), 2, 10)
        .await
        .unwrap();
    assert!(envelope.success);

    // Array filters repeat the key.
    let requests = server.received_requests().await.unwrap();
    let query = requests[0].url.query().unwrap();
    assert!(query.contains("jobType=full_time"));
    assert!(query.contains("jobType=remote"));
}

#[tokio::test]
async fn upload_sends_file_as_dedicated_multipart_part() {
    init_tracing();
    let server = MockServer::start().await;
    let (client, session, _dir) = client_for(&server);

    let user: UserProfile = serde_json::from_value(user_json()).unwrap();
    session.save("abc", &user).unwrap();

    Mock::given(method("POST"))
        .and(path("/auth/profile/picture"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": { "profilePicture": "https://cdn.example.com/u1.png" }
        })))
        .mount(&server)
        .await;

    let upload_dir = tempfile::tempdir().unwrap();
    let file_path = upload_dir.path().join("avatar.png");
    std::fs::write(&file_path, b"png-bytes").unwrap();

    let auth = AuthService::new(client, session);
    let envelope = auth.upload_profile_picture(&file_path).await.unwrap();
    assert!(envelope.success);
    assert_eq!(
        envelope.data.unwrap().profile_picture,
        "https://cdn.example.com/u1.png"
    );

    let requests = server.received_requests().await.unwrap();
    let content_type = requests[0].headers.get("content-type").unwrap().to_str().unwrap();
    assert!(content_type.starts_with("multipart/form-data"));
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("name=\"file\""));
    assert!(body.contains("filename=\"avatar.png\""));
    assert!(body.contains("png-bytes"));
}

#[tokio::test]
async fn failed_resume_upload_short_circuits_apply() {
    init_tracing();
    let server = MockServer::start().await;
    let (client, _session, _dir) = client_for(&server);

    Mock::given(method("POST"))
        .and(path("/uploads/resume"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "success": false,
            "error": "File too large"
        })))
        .mount(&server)
        .await;

    // The apply endpoint must never be hit.
    Mock::given(method("POST"))
        .and(path("/jobs/j1/apply"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let upload_dir = tempfile::tempdir().unwrap();
    let resume = upload_dir.path().join("resume.pdf");
    std::fs::write(&resume, b"pdf-bytes").unwrap();

    let jobs = JobService::new(client);
    let envelope = jobs
        .apply("j1", Some("Dear team"), Some(&resume))
        .await
        .unwrap();

    assert!(!envelope.success);
    assert_eq!(envelope.failure_reason(), Some("File too large"));
}

#[tokio::test]
async fn refresh_profile_repersists_user_under_existing_token() {
    init_tracing();
    let server = MockServer::start().await;
    let (client, session, _dir) = client_for(&server);

    let user: UserProfile = serde_json::from_value(user_json()).unwrap();
    session.save("abc", &user).unwrap();

    let mut refreshed = user_json();
    refreshed["firstName"] = serde_json::json!("Janet");

    Mock::given(method("GET"))
        .and(path("/auth/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": refreshed
        })))
        .mount(&server)
        .await;

    let auth = AuthService::new(client, Arc::clone(&session));
    let envelope = auth.refresh_profile().await.unwrap();
    assert!(envelope.success);

    assert_eq!(session.current_user().unwrap().first_name, "Janet");
    assert_eq!(session.current_token().as_deref(), Some("abc"));
}

#[tokio::test]
async fn bookmark_posts_empty_body() {
    init_tracing();
    let server = MockServer::start().await;
    let (client, _session, _dir) = client_for(&server);

    Mock::given(method("POST"))
        .and(path("/jobs/j1/bookmark"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "data": { "message": "Bookmarked" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let jobs = JobService::new(client);
    let envelope: ApiEnvelope<MessageData> = jobs.bookmark("j1").await.unwrap();
    assert!(envelope.success);

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].body.is_empty());
}

#[tokio::test]
async fn register_rejection_reports_role_error() {
    init_tracing();
    let server = MockServer::start().await;
    let (client, session, _dir) = client_for(&server);

    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
            "success": false,
            "error": "Admin registration is not allowed"
        })))
        .mount(&server)
        .await;

    let auth = AuthService::new(client, Arc::clone(&session));
    let envelope = auth
        .register(&jobportal_models::RegisterForm {
            email: "root@example.com".to_string(),
            password: "hunter2".to_string(),
            confirm_password: "hunter2".to_string(),
            first_name: "Root".to_string(),
            last_name: "User".to_string(),
            role: UserRole::Admin,
        })
        .await
        .unwrap();

    assert!(!envelope.success);
    assert!(!session.is_authenticated());
}

/// Smoke test against a real backend, for manual runs.
#[tokio::test]
#[ignore = "requires a running backend"]
async fn live_backend_featured_jobs() {
    dotenvy::dotenv().ok();
    init_tracing();

    let session = Arc::new(SessionStore::open_default().expect("Failed to open session store"));
    let client = ApiClient::from_env(session).expect("Failed to build client");
    let jobs = JobService::new(client);

    let envelope = jobs.featured_jobs(6).await.expect("Request failed");
    println!("featured: success={} count={}", envelope.success,
        envelope.data.as_ref().map_or(0, |jobs| jobs.len()));
}
