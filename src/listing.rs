use std::{path::Path, time::SystemTime};

use serde::Serialize;
use tokio::fs;
use tracing::warn;

/// One visible child of a listed directory.
#[derive(Serialize, Debug, Clone)]
pub struct ListingEntry {
    /// Request-relative path used for the link.
    pub path: String,
    pub name: String,
    pub is_dir: bool,
    pub size: u64,
    pub modified: Option<SystemTime>,
}

/// Joins a request directory and a child name with exactly one slash.
fn join_request_path(request_dir: &str, name: &str) -> String {
    if request_dir.ends_with('/') {
        format!("{}{}", request_dir, name)
    } else {
        format!("{}/{}", request_dir, name)
    }
}

/// Reads `dir` and returns its visible children, directories before files.
///
/// Within each group the filesystem enumeration order is kept; there is no
/// further sort. Names starting with `hidden_marker` are dropped. A failing
/// stat on any child fails the whole listing.
pub async fn build_listing(
    dir: &Path,
    request_dir: &str,
    hidden_marker: char,
) -> std::io::Result<Vec<ListingEntry>> {
    let mut entries = fs::read_dir(dir).await?;

    let mut dir_items = Vec::new();
    let mut file_items = Vec::new();

    while let Some(entry) = entries.next_entry().await? {
        let name = match entry.file_name().into_string() {
            Ok(n) => n,
            Err(_) => {
                warn!("Skipping entry with non-UTF8 filename in {}", dir.display());
                continue;
            }
        };

        if name.starts_with(hidden_marker) {
            continue;
        }

        // Follows symlinks, so a link to a directory lists as a directory.
        let metadata = fs::metadata(dir.join(&name)).await?;
        let item = ListingEntry {
            path: join_request_path(request_dir, &name),
            name,
            is_dir: metadata.is_dir(),
            size: metadata.len(),
            modified: metadata.modified().ok(),
        };

        if item.is_dir {
            dir_items.push(item);
        } else {
            file_items.push(item);
        }
    }

    dir_items.extend(file_items);
    Ok(dir_items)
}
