//! Markdown to HTML conversion and title extraction.
//!
//! Uses comrak with the GitHub-flavored extensions. Raw HTML in the source is
//! not passed through.

use comrak::{markdown_to_html, Options};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::BrowseError;

/// Title used when the document has no plain top-level heading.
pub const NO_TITLE: &str = "no title";

static H1: Lazy<Regex> = Lazy::new(|| Regex::new(r"<h1>([^<>]+)</h1>").expect("valid regex"));

fn options() -> Options<'static> {
    let mut options = Options::default();
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;
    options.render.r#unsafe = false;
    options
}

/// Converts markdown source to an HTML fragment.
pub fn to_html(source: &str) -> String {
    markdown_to_html(source, &options())
}

/// Text of the first `<h1>` without nested markup, or [`NO_TITLE`].
pub fn extract_title(html: &str) -> String {
    H1.captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| unescape(m.as_str()))
        .unwrap_or_else(|| NO_TITLE.to_string())
}

fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Converts on the blocking pool; comrak is CPU-bound. Returns `(html, title)`.
pub async fn render(source: String) -> Result<(String, String), BrowseError> {
    on_blocking_pool(move || {
        let html = to_html(&source);
        let title = extract_title(&html);
        (html, title)
    })
    .await
}

/// A panicked or cancelled task fails the request.
async fn on_blocking_pool<F, T>(work: F) -> Result<T, BrowseError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| BrowseError::Io(std::io::Error::other(e)))
}
