//! Relative path resolution.
//!
//! Pure string transformation: a leading `/` makes the requested path
//! absolute, anything else is joined with the directory of the current path.
//! Empty and `.` segments are dropped and `..` pops one segment, never past
//! the root.

/// Resolve `requested` against `current`.
///
/// An empty request resolves to `/`.
///
/// ```
/// use buzz_router::path::resolve;
///
/// assert_eq!(resolve("/a/b/", "../c"), "/a/c");
/// assert_eq!(resolve("/a/b", "./c"), "/a/c");
/// assert_eq!(resolve("/a/b", "/x/y"), "/x/y");
/// ```
#[must_use]
pub fn resolve(current: &str, requested: &str) -> String {
    if requested.is_empty() {
        return "/".to_string();
    }

    let mut segments: Vec<&str> = if requested.starts_with('/') {
        Vec::new()
    } else {
        directory_segments(current)
    };

    for segment in requested.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    // A trailing slash, `.` or `..` names a directory.
    let directory = matches!(requested.rsplit('/').next(), Some("" | "." | ".."));

    let mut resolved = format!("/{}", segments.join("/"));
    if directory && !segments.is_empty() {
        resolved.push('/');
    }
    resolved
}

/// Non-empty segments of the directory containing `current`.
fn directory_segments(current: &str) -> Vec<&str> {
    let mut segments: Vec<&str> = current.split('/').collect();
    // Drops the file segment, or the empty segment behind a trailing slash.
    segments.pop();
    segments.retain(|segment| !segment.is_empty());
    segments
}
