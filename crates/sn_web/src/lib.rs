use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use sn_core::Result;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod error;
pub mod handlers;
pub mod owner;
pub mod state;

pub use error::ApiError;
pub use owner::{OwnerId, OWNER_HEADER};
pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/api/blog/summary", post(handlers::blog_summary))
        .route("/api/blog/notes", post(handlers::blog_notes))
        .route("/api/blog/process", post(handlers::process_blog))
        .route("/api/notes", get(handlers::list_notes).post(handlers::save_note))
        .route(
            "/api/notes/:id",
            get(handlers::get_note).delete(handlers::delete_note),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(Arc::new(state))
}

/// Binds `addr` and serves the API until the process stops.
pub async fn serve(addr: SocketAddr, state: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("🚀 Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, create_app(state)).await?;
    Ok(())
}

pub mod prelude {
    pub use crate::{create_app, serve, AppState};
    pub use sn_core::{Error, Result};
}
