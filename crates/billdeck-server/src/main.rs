use anyhow::Context;
use axum::{extract::FromRef, middleware, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod adapters;
mod application;
mod auth;
mod config;
mod models;
mod routes;

use adapters::{FsMailbox, HttpStatsSource};
use application::{MailboxService, StatsPoller};
use auth::SessionAuth;
use config::ServerConfig;

/// Type aliases for application services with concrete adapter implementations
pub type AppStatsPoller = StatsPoller<HttpStatsSource>;
pub type AppMailboxService = MailboxService<FsMailbox>;

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub poller: Arc<AppStatsPoller>,
    pub mailbox: Arc<AppMailboxService>,
    pub auth: Arc<SessionAuth>,
}

impl FromRef<AppState> for Arc<SessionAuth> {
    fn from_ref(state: &AppState) -> Arc<SessionAuth> {
        state.auth.clone()
    }
}

#[derive(Serialize)]
struct HealthCheck {
    status: String,
    message: String,
    version: String,
}

async fn health_check() -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "ok".to_string(),
        message: "Billdeck API is running - watching Bill think".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

fn build_router(state: AppState) -> Router {
    // Protected routes (require a session token)
    let protected_routes = Router::new()
        .merge(routes::auth::protected_router())
        .merge(routes::stats::router())
        .merge(routes::dashboard::router())
        .merge(routes::git::router())
        .merge(routes::mailbox::router())
        .layer(middleware::from_fn_with_state(
            state.auth.clone(),
            auth::auth_middleware,
        ));

    // OpenAPI documentation
    let openapi = routes::swagger::ApiDoc::openapi();

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .route("/health", get(health_check))
        .merge(routes::auth::router())
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("🤖 Billdeck API initializing...");

    let config = ServerConfig::from_env().context("Invalid server configuration")?;

    let auth = Arc::new(SessionAuth::new(
        config.password.clone(),
        config.session_secret.clone(),
        config.session_ttl,
    ));
    if auth.enabled() {
        tracing::info!("🔐 Password authentication enabled");
        if config.session_secret.is_none() {
            tracing::warn!("⚠️  No BILLDECK_SESSION_SECRET set - sessions end on restart");
        }
    } else {
        tracing::warn!("⚠️  No BILLDECK_PASSWORD set - authentication disabled");
    }

    // Stats poller
    let source = Arc::new(HttpStatsSource::new(
        &config.upstream_url,
        config.fetch_timeout,
    )?);
    tracing::info!(
        "📡 Polling {} every {}s (timeout {}s)",
        source.url(),
        config.poll_interval.as_secs(),
        config.fetch_timeout.as_secs()
    );
    let poller = Arc::new(StatsPoller::new(
        source,
        config.poll_interval,
        &config.birthday,
    ));
    let _poll_handle = Arc::clone(&poller).start();

    // Mailbox
    let store = Arc::new(FsMailbox::new(&config.data_dir));
    tracing::info!(
        "📬 Mailbox inbox: {}, outbox: {}",
        store.inbox_dir().display(),
        store.outbox_dir().display()
    );
    let mailbox = Arc::new(MailboxService::new(store));

    let state = AppState {
        poller,
        mailbox,
        auth,
    };

    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr))?;

    tracing::info!("📚 Swagger UI: /swagger-ui");
    tracing::info!("✅ Billdeck API ready on {}", config.listen_addr);

    axum::serve(listener, router)
        .await
        .context("Server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::Value;
    use std::time::Duration;
    use tower::ServiceExt;

    fn app(data_dir: &std::path::Path, password: Option<&str>) -> Router {
        // Nothing listens on the discard port; the poller is never started
        let source =
            Arc::new(HttpStatsSource::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap());
        build_router(AppState {
            poller: Arc::new(StatsPoller::new(source, Duration::from_secs(5), "January 2, 2026")),
            mailbox: Arc::new(MailboxService::new(Arc::new(FsMailbox::new(data_dir)))),
            auth: Arc::new(SessionAuth::new(
                password.map(str::to_string),
                Some("test-secret".to_string()),
                Duration::from_secs(3600),
            )),
        })
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn get(uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(Body::empty()).unwrap()
    }

    fn login(password: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/auth")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(format!(r#"{{"password":"{}"}}"#, password)))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_is_public() {
        let dir = tempfile::tempdir().unwrap();
        let response = app(dir.path(), Some("hunter2"))
            .oneshot(get("/health", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_login_flow_guards_stats() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(dir.path(), Some("hunter2"));

        let response = app.clone().oneshot(get("/api/stats", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app.clone().oneshot(login("wrong")).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app.clone().oneshot(login("hunter2")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        let token = body["token"].as_str().unwrap().to_string();

        let response = app
            .clone()
            .oneshot(get("/api/stats", Some(&token)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["live"], false);
        assert_eq!(body["snapshot"]["status"], "offline");
        assert_eq!(body["snapshot"]["error"], "Could not connect to VPS");

        let response = app
            .oneshot(get("/api/auth/session", Some(&token)))
            .await
            .unwrap();
        assert_eq!(json_body(response).await["authenticated"], true);
    }

    #[tokio::test]
    async fn test_open_server_without_password() {
        let dir = tempfile::tempdir().unwrap();
        let response = app(dir.path(), None)
            .oneshot(get("/api/dashboard", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["view"]["header"]["status"], "offline");
    }

    #[tokio::test]
    async fn test_inbox_upload_and_outbox_download() {
        let dir = tempfile::tempdir().unwrap();
        let app = app(dir.path(), None);

        let body = "--XBOUNDARY\r\n\
            Content-Disposition: form-data; name=\"file\"; filename=\"note.txt\"\r\n\
            Content-Type: text/plain\r\n\r\n\
            hello bill\r\n\
            --XBOUNDARY--\r\n";
        let request = Request::builder()
            .method("POST")
            .uri("/api/inbox")
            .header(header::CONTENT_TYPE, "multipart/form-data; boundary=XBOUNDARY")
            .body(Body::from(body))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let uploaded = json_body(response).await;
        assert_eq!(uploaded["size"], 10);
        assert_eq!(uploaded["originalName"], "note.txt");

        let request = Request::builder()
            .method("POST")
            .uri("/api/outbox")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                r#"{"fileName":"plan.md","content":"IyBQbGFu","description":"Plan"}"#,
            ))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(get("/api/outbox/download/plan.md", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/markdown");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"plan.md\""
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"# Plan");

        let response = app
            .oneshot(get("/api/outbox/download/missing.txt", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_inbox_rejects_oversized_upload() {
        let dir = tempfile::tempdir().unwrap();

        let mut body = b"--XBOUNDARY\r\n\
            Content-Disposition: form-data; name=\"file\"; filename=\"big.bin\"\r\n\
            Content-Type: application/octet-stream\r\n\r\n"
            .to_vec();
        body.extend(std::iter::repeat(b'a').take(billdeck::MAX_UPLOAD_BYTES + 1));
        body.extend_from_slice(b"\r\n--XBOUNDARY--\r\n");

        let request = Request::builder()
            .method("POST")
            .uri("/api/inbox")
            .header(header::CONTENT_TYPE, "multipart/form-data; boundary=XBOUNDARY")
            .body(Body::from(body))
            .unwrap();
        let response = app(dir.path(), None).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert!(!dir.path().join("inbox").exists());
    }

    #[tokio::test]
    async fn test_inbox_without_file_field() {
        let dir = tempfile::tempdir().unwrap();
        let body = "--XBOUNDARY\r\n\
            Content-Disposition: form-data; name=\"note\"\r\n\r\n\
            hi\r\n\
            --XBOUNDARY--\r\n";
        let request = Request::builder()
            .method("POST")
            .uri("/api/inbox")
            .header(header::CONTENT_TYPE, "multipart/form-data; boundary=XBOUNDARY")
            .body(Body::from(body))
            .unwrap();
        let response = app(dir.path(), None).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
