//! Request path to filesystem path resolution, jailed under the document root.
//!
//! [`candidate_path`] is pure: it never touches the filesystem, so a path that
//! escapes the root or carries a null byte is rejected before any stat.
//! [`probe`] walks [`MARKDOWN_SUFFIXES`] so `/notes/intro` can be served by
//! `notes/intro.md` while an exact match always wins.

use std::{
    ffi::OsString,
    fs::Metadata,
    io::ErrorKind,
    path::{Component, Path, PathBuf},
};

use tokio::fs;
use tracing::{debug, warn};

use crate::{config::MARKDOWN_SUFFIXES, error::BrowseError};

/// An existing path under the root, with the stat taken when it was found.
#[derive(Debug)]
pub struct ResolvedEntry {
    pub path: PathBuf,
    /// Decoded request path with the winning suffix appended.
    pub request_dir: String,
    pub metadata: Metadata,
    /// Index into [`MARKDOWN_SUFFIXES`] of the suffix that matched.
    pub probe_index: usize,
}

/// Joins `root`, the decoded request path and `suffix`, normalizes `.` and
/// `..` lexically and checks the result is still `root` or below it.
pub fn candidate_path(root: &Path, request_path: &str, suffix: &str) -> Result<PathBuf, BrowseError> {
    let mut joined = OsString::from(root.as_os_str());
    joined.push("/");
    joined.push(request_path);
    joined.push(suffix);

    let candidate = normalize(Path::new(&joined));

    if candidate.as_os_str().as_encoded_bytes().contains(&0) {
        warn!("Rejected request path containing a null byte");
        return Err(BrowseError::MalformedPath);
    }

    // Component-wise, so `/srv/docs2` is not accepted for root `/srv/docs`.
    if !candidate.starts_with(root) {
        warn!(
            "Rejected request path '{}' resolving outside root {}",
            request_path,
            root.display()
        );
        return Err(BrowseError::PathEscape);
    }

    Ok(candidate)
}

/// Lexical normalization. `..` at the filesystem root stays at the root.
fn normalize(path: &Path) -> PathBuf {
    let mut clean = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => clean.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                clean.pop();
            }
            Component::Normal(part) => clean.push(part),
        }
    }
    clean
}

/// Finds the first suffix variant of `request_path` that exists.
///
/// At most one stat per suffix. A missing path moves on to the next suffix;
/// any other I/O error ends the request. When all suffixes are exhausted the
/// result is [`BrowseError::NotFound`].
pub async fn probe(root: &Path, request_path: &str) -> Result<ResolvedEntry, BrowseError> {
    for probe_index in 0..MARKDOWN_SUFFIXES.len() {
        let path = candidate_path(root, request_path, MARKDOWN_SUFFIXES[probe_index])?;
        debug!("Probe {} for '{}': {}", probe_index, request_path, path.display());

        match fs::metadata(&path).await {
            Ok(metadata) => {
                return Ok(ResolvedEntry {
                    path,
                    request_dir: format!("{}{}", request_path, MARKDOWN_SUFFIXES[probe_index]),
                    metadata,
                    probe_index,
                })
            }
            Err(e) if is_missing(&e) => continue,
            Err(e) => return Err(e.into()),
        }
    }
    debug!("No suffix variant of '{}' exists", request_path);
    Err(BrowseError::NotFound)
}

/// A path component that is a file rather than a directory counts as missing.
fn is_missing(e: &std::io::Error) -> bool {
    matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn root() -> PathBuf {
        PathBuf::from("/srv/docs")
    }

    #[test]
    fn test_candidate_joins_and_normalizes() {
        let path = candidate_path(&root(), "/notes/./a/../intro", ".md").unwrap();
        assert_eq!(path, PathBuf::from("/srv/docs/notes/intro.md"));
    }

    #[test]
    fn test_candidate_root_itself_is_allowed() {
        assert_eq!(candidate_path(&root(), "/", "").unwrap(), root());
        assert_eq!(candidate_path(&root(), "/notes/..", "").unwrap(), root());
    }

    #[test]
    fn test_candidate_rejects_traversal() {
        assert!(matches!(
            candidate_path(&root(), "/../etc/passwd", ""),
            Err(BrowseError::PathEscape)
        ));
        assert!(matches!(
            candidate_path(&root(), "/notes/../../../..", ""),
            Err(BrowseError::PathEscape)
        ));
    }

    #[test]
    fn test_candidate_rejects_sibling_directory() {
        assert!(matches!(
            candidate_path(&root(), "/../docs2/secret", ""),
            Err(BrowseError::PathEscape)
        ));
    }

    #[test]
    fn test_candidate_rejects_null_byte() {
        assert!(matches!(
            candidate_path(&root(), "/notes/intro\0.md", ""),
            Err(BrowseError::MalformedPath)
        ));
    }

    #[test]
    fn test_null_byte_checked_before_escape() {
        assert!(matches!(
            candidate_path(&root(), "/../\0", ""),
            Err(BrowseError::MalformedPath)
        ));
    }

    #[tokio::test]
    async fn test_probe_falls_back_to_md_suffix() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("notes")).unwrap();
        std::fs::write(dir.path().join("notes/intro.md"), "# Intro").unwrap();

        let entry = probe(dir.path(), "/notes/intro").await.unwrap();
        assert_eq!(entry.path, dir.path().join("notes/intro.md"));
        assert_eq!(entry.probe_index, 3);
        assert_eq!(entry.request_dir, "/notes/intro.md");
    }

    #[tokio::test]
    async fn test_probe_prefers_markdown_suffix_order() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("intro.markdown"), "a").unwrap();
        std::fs::write(dir.path().join("intro.md"), "b").unwrap();

        let entry = probe(dir.path(), "/intro").await.unwrap();
        assert_eq!(entry.probe_index, 1);
        assert_eq!(entry.path, dir.path().join("intro.markdown"));
    }

    #[tokio::test]
    async fn test_probe_exact_directory_wins() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("notes/intro")).unwrap();
        std::fs::write(dir.path().join("notes/intro.md"), "# Intro").unwrap();

        let entry = probe(dir.path(), "/notes/intro").await.unwrap();
        assert_eq!(entry.probe_index, 0);
        assert!(entry.metadata.is_dir());
    }

    #[tokio::test]
    async fn test_probe_exhausted_is_not_found() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            probe(dir.path(), "/missing").await,
            Err(BrowseError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_probe_through_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("plain.txt"), "x").unwrap();
        assert!(matches!(
            probe(dir.path(), "/plain.txt/child").await,
            Err(BrowseError::NotFound)
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_probe_symlink_loop_is_fatal() {
        let dir = TempDir::new().unwrap();
        std::os::unix::fs::symlink("loop", dir.path().join("loop")).unwrap();
        // A loop that ends the request; later suffixes are not tried.
        std::fs::write(dir.path().join("loop.md"), "# not reached").unwrap();

        assert!(matches!(
            probe(dir.path(), "/loop").await,
            Err(BrowseError::Io(_))
        ));
    }
}
