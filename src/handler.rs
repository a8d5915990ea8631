use std::{collections::HashMap, sync::Arc};

use axum::{
    body::Body,
    extract::{Query, Request, State},
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
};
use tokio_util::io::ReaderStream;

use crate::{
    config::BrowseConfig,
    dispatch::{browse, BrowseRequest, Outcome},
    error::BrowseError,
    resolve::ResolvedEntry,
    views,
};

// --- State ---
pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: BrowseConfig,
}

/// Fallback handler serving everything under the document root.
pub async fn browse_handler(State(state): State<SharedState>, request: Request) -> Response {
    // Other methods belong to whatever comes after the browser.
    if request.method() != Method::GET && request.method() != Method::HEAD {
        return BrowseError::NotFound.into_response();
    }

    let browse_request = match browse_request(&request) {
        Ok(r) => r,
        Err(e) => return e.into_response(),
    };

    match browse(&state.config, &browse_request).await {
        Ok(Outcome::Render(view)) => views::render(&view).into_response(),
        Ok(Outcome::Raw(entry)) => raw_file_response(&entry).await,
        Err(e) => e.into_response(),
    }
}

/// Pulls the decoded path, `raw` flag and Accept header out of the request.
fn browse_request(request: &Request) -> Result<BrowseRequest, BrowseError> {
    let uri = request.uri();
    let path = urlencoding::decode(uri.path())
        .map_err(|_| BrowseError::MalformedPath)?
        .into_owned();

    let raw_flag = Query::<HashMap<String, String>>::try_from_uri(uri)
        .map(|Query(query)| query.contains_key("raw"))
        .unwrap_or(false);

    let accept = request
        .headers()
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    Ok(BrowseRequest {
        path,
        original_path: uri.path().to_string(),
        raw_flag,
        accept,
    })
}

/// Streams the file body with a guessed Content-Type.
async fn raw_file_response(entry: &ResolvedEntry) -> Response {
    let file = match tokio::fs::File::open(&entry.path).await {
        Ok(file) => file,
        Err(e) => return BrowseError::Io(e).into_response(),
    };

    let mime_type = mime_guess::from_path(&entry.path)
        .first_or_octet_stream()
        .to_string();

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_str(&mime_type)
            .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream")),
    );
    headers.insert(
        header::CONTENT_LENGTH,
        HeaderValue::from(entry.metadata.len()),
    );

    let body = Body::from_stream(ReaderStream::new(file));
    (StatusCode::OK, headers, body).into_response()
}
