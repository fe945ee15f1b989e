//! FILENAME: app/src/lib.rs
//! Vinscope web shell.
//!
//! A thin HTTP adapter over the shared filter engine: two endpoints mirror
//! the core's two capabilities (option resolution and filtered export),
//! plus the initial manufacturer list for first render. All filter logic
//! lives in `engine`; the shell only translates requests and renders
//! structured success-or-error JSON.

pub mod handlers;

use axum::routing::{get, post};
use axum::Router;
use std::path::PathBuf;
use std::sync::Arc;

/// Shared request context. The database connection itself is opened per
/// request and released on every exit path, so the state holds only paths.
pub struct AppState {
    pub db_path: PathBuf,
    pub export_dir: PathBuf,
}

pub fn create_app_state(db_path: PathBuf, export_dir: PathBuf) -> Arc<AppState> {
    Arc::new(AppState {
        db_path,
        export_dir,
    })
}

/// The single-tenant router: no auth, no rate limiting.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/fetch_options", post(handlers::fetch_options))
        .route("/export", post(handlers::export))
        .with_state(state)
}
