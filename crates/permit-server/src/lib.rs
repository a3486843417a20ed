//! Permit Server: HTTP surface of the work permit system.
//!
//! Serves the data-service forwarder, the upload and notification
//! endpoints and the JSON routes behind each screen.

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

use std::time::Duration;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::Method;
use axum::http::header::CONTENT_TYPE;
use axum::routing::{get, post};
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::state::SharedState;

/// Multipart bodies carry several capped images plus form overhead.
const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

pub fn app(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    let uploads = ServeDir::new(&state.config.upload_dir);
    let upload_prefix = format!("/{}", state.config.public_upload_url.trim_matches('/'));

    let router = Router::new()
        .route("/health", get(routes::health_check))
        // Forwarder and direct endpoints
        .route("/api/proxy", post(routes::proxy::forward))
        .route("/api/audit", post(routes::audit::create).get(routes::audit::list))
        .route("/api/upload", post(routes::upload::upload))
        .route("/api/line/notify", post(routes::notify::notify_admin))
        .route("/api/line/notify-user", post(routes::notify::notify_user))
        .route("/api/user/update-name", post(routes::users::update_name))
        .route("/api/diagnostics", get(routes::diagnostics::diagnostics))
        // Users
        .route("/api/users/line/{line_user_id}", get(routes::users::by_line_id))
        .route("/api/users/register", post(routes::users::register))
        .route("/api/users/{user_id}/permits", get(routes::users::permits))
        // Permits
        .route("/api/reference", get(routes::permits::reference))
        .route("/api/permits", post(routes::permits::submit))
        .route("/api/admin/permits", get(routes::permits::admin_list))
        .route(
            "/api/admin/permits/{permit_id}/status",
            post(routes::permits::decide),
        )
        .route(
            "/api/permits/{permit_id}/documents",
            get(routes::permits::documents),
        )
        .route(
            "/api/permits/{permit_id}/audit",
            get(routes::permits::latest_audit).post(routes::permits::record_audit),
        );
    // Uploads are only served locally when they live under a path.
    let router = if upload_prefix.len() > 1 && !upload_prefix.contains("://") {
        router.nest_service(&upload_prefix, uploads)
    } else {
        router
    };

    router
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Resolves on Ctrl-C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
