use serde::Serialize;

/// One step of the navigation trail from the root to the current path.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Breadcrumb {
    /// Cumulative path up to and including this segment, without a leading slash.
    pub path: String,
    pub label: String,
    /// False only for the final (current) segment, which is not a link.
    pub has_next: bool,
}

/// Splits a request path into cumulative breadcrumb segments.
/// Empty segments (leading, trailing or doubled slashes) are skipped.
pub fn trail(dir: &str) -> Vec<Breadcrumb> {
    let parts: Vec<&str> = dir.split('/').filter(|part| !part.is_empty()).collect();
    let mut current = String::new();

    parts
        .iter()
        .enumerate()
        .map(|(index, part)| {
            if !current.is_empty() {
                current.push('/');
            }
            current.push_str(part);
            Breadcrumb {
                path: current.clone(),
                label: part.to_string(),
                has_next: index + 1 != parts.len(),
            }
        })
        .collect()
}
