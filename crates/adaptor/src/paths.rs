//! Path prefix expansion.

use crsearch_repository::path::{ROOT_PATH, is_absolute};

/// Builds every prefix of `path` at slash boundaries.
///
/// Works for absolute and relative paths; absolute input yields absolute
/// prefixes. Leading slashes are stripped before splitting, so `//a` behaves
/// like `/a`. Inner double slashes produce an empty segment and therefore a
/// repeated prefix.
///
/// ```
/// use crsearch_adaptor::paths::build_all_path_prefixes;
///
/// assert_eq!(build_all_path_prefixes("foo/bar/baz"), vec!["foo", "foo/bar", "foo/bar/baz"]);
/// assert_eq!(build_all_path_prefixes("/foo/bar"), vec!["/foo", "/foo/bar"]);
/// assert_eq!(build_all_path_prefixes("/"), vec!["/"]);
/// assert!(build_all_path_prefixes("").is_empty());
/// ```
pub fn build_all_path_prefixes(path: &str) -> Vec<String> {
    if path.is_empty() {
        return Vec::new();
    }
    if path == ROOT_PATH {
        return vec![ROOT_PATH.to_string()];
    }

    let mut current = if is_absolute(path) {
        String::from(ROOT_PATH)
    } else {
        String::new()
    };

    path.trim_start_matches('/')
        .split('/')
        .map(|segment| {
            current.push_str(segment);
            current.push('/');
            current.trim_end_matches('/').to_string()
        })
        .collect()
}
