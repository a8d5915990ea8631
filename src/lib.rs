//! Markdown-aware directory browser.
//!
//! Serves a document root over HTTP: directories become listings, markdown
//! files are rendered to HTML, images get a viewer page and other files are
//! shown as text. Extension-less requests fall back to `.markdown`, `.mkdn`
//! and `.md` files.

use std::{path::Path, sync::Arc};

use axum::{
    http::{header, HeaderValue},
    Router,
};
use tower_http::{services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer};

pub mod breadcrumb;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod format;
pub mod handler;
pub mod listing;
pub mod markdown;
pub mod resolve;
pub mod views;

use config::BrowseConfig;
use handler::{browse_handler, AppState};

/// Builds the router: static assets under `/static`, the browser for
/// everything else.
pub fn app(config: BrowseConfig, static_dir: &Path) -> Router {
    let shared_state = Arc::new(AppState { config });

    Router::new()
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(browse_handler)
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(shared_state)
}
