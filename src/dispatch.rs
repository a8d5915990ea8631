//! Chooses how an existing path is presented.

use std::path::Path;

use tokio::fs;
use tracing::debug;

use crate::{
    breadcrumb::trail,
    config::{BrowseConfig, IMAGE_EXTENSIONS, MARKDOWN_EXTENSIONS},
    error::BrowseError,
    listing::build_listing,
    markdown,
    resolve::{probe, ResolvedEntry},
    views::{DirectoryPage, FilePage, ImagePage, LargeFilePage, MarkdownPage, View},
};

/// Rendering strategy for a resolved path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Directory,
    MarkdownFile,
    ImageFile,
    TextFile,
    LargeFile,
}

/// Pure classification over what a stat tells us. Extension matching is
/// case-sensitive.
pub fn classify(is_dir: bool, extension: Option<&str>, size: u64, large_file_threshold: u64) -> ContentKind {
    if is_dir {
        return ContentKind::Directory;
    }
    match extension {
        Some(ext) if MARKDOWN_EXTENSIONS.contains(&ext) => ContentKind::MarkdownFile,
        Some(ext) if IMAGE_EXTENSIONS.contains(&ext) => ContentKind::ImageFile,
        _ if size < large_file_threshold => ContentKind::TextFile,
        _ => ContentKind::LargeFile,
    }
}

/// A file is sent as-is when the query carries `raw` or the client accepts
/// exactly `*/*`. Applies to every file type.
pub fn wants_raw(raw_flag: bool, accept: Option<&str>) -> bool {
    raw_flag || accept == Some("*/*")
}

/// The parts of an HTTP request the browser looks at.
#[derive(Debug, Clone)]
pub struct BrowseRequest {
    /// Percent-decoded request path.
    pub path: String,
    /// Request path exactly as received.
    pub original_path: String,
    /// Whether the query string has a `raw` key.
    pub raw_flag: bool,
    pub accept: Option<String>,
}

/// What the handler should send back.
#[derive(Debug)]
pub enum Outcome {
    Render(View),
    /// Send the file bytes untouched.
    Raw(ResolvedEntry),
}

/// Resolves the request (with suffix probing) and dispatches the result.
pub async fn browse(config: &BrowseConfig, request: &BrowseRequest) -> Result<Outcome, BrowseError> {
    let entry = probe(&config.root, &request.path).await?;
    dispatch(config, request, entry).await
}

/// Builds the outcome for a path known to exist.
pub async fn dispatch(
    config: &BrowseConfig,
    request: &BrowseRequest,
    entry: ResolvedEntry,
) -> Result<Outcome, BrowseError> {
    let is_dir = entry.metadata.is_dir();
    if !is_dir && wants_raw(request.raw_flag, request.accept.as_deref()) {
        debug!("Serving raw bytes of {}", entry.path.display());
        return Ok(Outcome::Raw(entry));
    }

    let size = entry.metadata.len();
    let kind = classify(is_dir, extension(&entry.path), size, config.large_file_threshold);
    debug!("Dispatching {} as {:?}", entry.path.display(), kind);

    let view = match kind {
        ContentKind::Directory => View::Directory(DirectoryPage {
            files: build_listing(&entry.path, &entry.request_dir, config.hidden_marker).await?,
            paths: trail(&entry.request_dir),
        }),
        ContentKind::MarkdownFile => {
            let source = read_text(&entry.path).await?;
            let (html, title) = markdown::render(source).await?;
            View::Markdown(MarkdownPage {
                html,
                title,
                paths: trail(&request.path),
            })
        }
        ContentKind::ImageFile => View::Image(ImagePage {
            path: request.original_path.clone(),
            paths: trail(&request.path),
        }),
        ContentKind::TextFile => View::File(FilePage {
            body: read_text(&entry.path).await?,
            title: String::new(),
            paths: trail(&entry.request_dir),
        }),
        ContentKind::LargeFile => View::LargeFile(LargeFilePage {
            size,
            title: entry.request_dir.clone(),
            paths: trail(&entry.request_dir),
        }),
    };

    Ok(Outcome::Render(view))
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

/// Whole file as text; invalid UTF-8 is replaced rather than rejected.
async fn read_text(path: &Path) -> Result<String, BrowseError> {
    let bytes = fs::read(path).await?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
