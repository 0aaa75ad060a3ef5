//! Slash-delimited node path helpers.

/// The path of the root node.
pub const ROOT_PATH: &str = "/";

/// Returns true if `path` starts with a slash.
pub fn is_absolute(path: &str) -> bool {
    path.starts_with('/')
}

/// Returns the parent of `path`, or `None` for the root and for single-segment
/// relative paths.
///
/// Trailing slashes are ignored.
///
/// ```
/// use crsearch_repository::path::parent_path;
///
/// assert_eq!(parent_path("/sites/demo").as_deref(), Some("/sites"));
/// assert_eq!(parent_path("/sites").as_deref(), Some("/"));
/// assert_eq!(parent_path("/"), None);
/// assert_eq!(parent_path("sites/demo/").as_deref(), Some("sites"));
/// assert_eq!(parent_path("sites"), None);
/// ```
pub fn parent_path(path: &str) -> Option<String> {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return None;
    }

    match trimmed.rfind('/') {
        Some(0) => Some(ROOT_PATH.to_string()),
        Some(index) => Some(trimmed[..index].to_string()),
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_path_absolute() {
        assert_eq!(parent_path("/a/b/c").as_deref(), Some("/a/b"));
        assert_eq!(parent_path("/a").as_deref(), Some("/"));
        assert_eq!(parent_path("/"), None);
        assert_eq!(parent_path(""), None);
    }

    #[test]
    fn test_parent_path_relative() {
        assert_eq!(parent_path("a/b").as_deref(), Some("a"));
        assert_eq!(parent_path("a"), None);
    }

    #[test]
    fn test_is_absolute() {
        assert!(is_absolute("/a"));
        assert!(!is_absolute("a/b"));
        assert!(!is_absolute(""));
    }
}
