//! Router assembly and the serve loop.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::VerdantConfig;
use crate::routes::{admin, contact, health, resources, sections, seed, site, uploads};
use crate::state::AppState;
use crate::Result;

/// Every route the server answers, wired to `state`.
///
/// Uploaded files are served from the blob store root under its public
/// prefix. Bodies larger than `max_body_bytes` are rejected before any
/// handler runs.
pub fn build_router(state: AppState, max_body_bytes: usize) -> Router {
    let api = Router::new()
        .route("/api/sections", get(sections::list))
        .route("/api/sections/{id}", get(sections::get).put(sections::put))
        .route(
            "/api/upload",
            post(uploads::upload)
                .get(uploads::list)
                .delete(uploads::delete),
        )
        .route("/api/seed", post(seed::seed))
        .route("/api/contact", post(contact::api_submit))
        .route(
            "/api/{resource}",
            get(resources::get).put(resources::put).post(resources::post),
        )
        .route(
            "/api/{resource}/{slug}",
            axum::routing::put(resources::put_entity).delete(resources::delete_entity),
        );

    let admin = Router::new()
        .route("/admin", get(admin::dashboard))
        .route("/admin/seed", post(admin::seed))
        .route(
            "/admin/sections/{id}",
            get(admin::edit_section).post(admin::submit_section),
        )
        .route("/admin/resources/{name}", get(admin::edit_resource))
        .route("/admin/resources/{name}/{slice}", post(admin::submit_slice))
        .route("/admin/uploads", get(admin::uploads).post(admin::upload))
        .route("/admin/uploads/delete", post(admin::delete_upload));

    let site = Router::new()
        .route("/", get(site::home))
        .route("/about", get(site::about))
        .route("/sectors", get(site::sectors))
        .route("/sectors/{slug}", get(site::sector))
        .route("/projects", get(site::projects))
        .route("/projects/{slug}", get(site::project))
        .route("/careers", get(site::careers))
        .route("/contact", get(site::contact).post(contact::form_submit))
        .route("/eco-matrix", get(site::eco_matrix))
        .route("/healthz", get(health::healthz));

    let mut router = Router::new().merge(api).merge(admin).merge(site);

    let prefix = state.blobs.public_prefix().trim_end_matches('/').to_string();
    if prefix.starts_with('/') && prefix.len() > 1 {
        router = router.nest_service(&prefix, ServeDir::new(state.blobs.root()));
    }

    router
        .fallback(site::not_found)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the configured address and serve until Ctrl-C.
pub async fn serve(config: &VerdantConfig) -> Result<()> {
    let state = AppState::from_config(config);
    let app = build_router(state, config.server.max_body_bytes);

    let address = config.bind_address();
    let listener = TcpListener::bind(&address).await.map_err(|e| {
        tracing::error!(%address, "Failed to bind: {e}");
        verdant_core::Error::from(e)
    })?;
    tracing::info!(%address, "Verdant listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(verdant_core::Error::from)?;
    tracing::info!("Verdant stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}
