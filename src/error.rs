use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::html;
use tracing::error;

/// Ways a browse request can fail to produce a page.
#[derive(Debug, thiserror::Error)]
pub enum BrowseError {
    /// The request path is not usable (null byte, bad percent-encoding).
    #[error("malformed request path")]
    MalformedPath,

    /// The request path normalizes to somewhere outside the document root.
    #[error("request path escapes the document root")]
    PathEscape,

    /// Nothing here can serve the request: every suffix was tried, or the
    /// method is not one the browser handles.
    #[error("not found")]
    NotFound,

    /// Any other filesystem failure. Fatal for the request, never retried.
    #[error("filesystem error: {0}")]
    Io(#[from] std::io::Error),
}

impl BrowseError {
    pub fn status(&self) -> StatusCode {
        match self {
            BrowseError::MalformedPath => StatusCode::BAD_REQUEST,
            BrowseError::PathEscape => StatusCode::FORBIDDEN,
            BrowseError::NotFound => StatusCode::NOT_FOUND,
            BrowseError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message. I/O details stay in the log.
    fn public_message(&self) -> &'static str {
        match self {
            BrowseError::MalformedPath => "Bad request.",
            BrowseError::PathEscape => "Access denied.",
            BrowseError::NotFound => "Not found.",
            BrowseError::Io(_) => "Could not read the requested path.",
        }
    }
}

impl IntoResponse for BrowseError {
    fn into_response(self) -> Response {
        if let BrowseError::Io(e) = &self {
            error!("Request failed with I/O error: {}", e);
        }
        error_response(self.status(), self.public_message())
    }
}

/// Helper to generate consistent Maud-based error responses.
pub fn error_response(status_code: StatusCode, message: &str) -> Response {
    let markup = html! {
        div class="error" {
            h2 { (status_code.as_u16()) " " (status_code.canonical_reason().unwrap_or("Error")) }
            p { (message) }
        }
    };
    (status_code, markup).into_response()
}
