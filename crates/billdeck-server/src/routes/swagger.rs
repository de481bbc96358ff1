//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::OpenApi;

use crate::models::{
    AddOutboxRequest,
    AddOutboxResponse,
    // Auth models
    AuthRequest,
    AuthResponse,
    // Git models
    ChangelogResponse,
    ContributionsResponse,
    // Dashboard models
    DashboardResponse,
    OutboxListResponse,
    RefreshResponse,
    SessionResponse,
    // Stats models
    StatsResponse,
    // Mailbox models
    UploadForm,
    UploadResponse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth endpoints
        super::auth::login,
        super::auth::get_session,
        // Stats endpoints
        super::stats::get_stats,
        super::stats::refresh_stats,
        // Dashboard endpoints
        super::dashboard::get_dashboard,
        // Git endpoints
        super::git::get_changelog,
        super::git::get_contributions,
        // Mailbox endpoints
        super::mailbox::upload_inbox,
        super::mailbox::list_outbox,
        super::mailbox::add_outbox,
        super::mailbox::download_outbox,
    ),
    info(
        title = "Billdeck API",
        version = "0.1.0",
        description = "Live dashboard for the Bill agent: polled stats, live sessions, brain activity and a file mailbox.",
        license(name = "MIT"),
    ),
    servers(
        (url = "/", description = "Current server"),
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Auth", description = "Auth - Password login and session tokens"),
        (name = "Stats", description = "Stats - Polled agent snapshot"),
        (name = "Dashboard", description = "Dashboard - Derived widgets"),
        (name = "Git", description = "Git - Changelog and contributions"),
        (name = "Mailbox", description = "Mailbox - Inbox uploads and outbox downloads"),
    ),
    components(
        schemas(
            // Auth
            AuthRequest,
            AuthResponse,
            SessionResponse,
            // Stats
            StatsResponse,
            RefreshResponse,
            // Dashboard
            DashboardResponse,
            // Git
            ChangelogResponse,
            ContributionsResponse,
            // Mailbox
            UploadForm,
            UploadResponse,
            OutboxListResponse,
            AddOutboxRequest,
            AddOutboxResponse,
        )
    ),
)]
pub struct ApiDoc;
