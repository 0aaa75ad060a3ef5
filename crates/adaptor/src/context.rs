//! Method access control for helpers exposed to the expression runtime.
//!
//! The expression runtime asks every helper whether a method may be called
//! from a template before it dispatches. The search helpers only read
//! content, so the default policy allows everything.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// A helper that can be called from a sandboxed expression context.
pub trait ProtectedContextAware {
    /// Returns true if `method_name` may be called from the expression runtime.
    fn allows_call_of_method(&self, method_name: &str) -> bool;
}

/// Which helper methods the expression runtime may call.
///
/// # Examples
///
/// ```
/// use crsearch_adaptor::context::MethodCallPolicy;
///
/// assert!(MethodCallPolicy::AllowAll.permits("anything"));
///
/// let restricted = MethodCallPolicy::allow_only(["query", "buildAllPathPrefixes"]);
/// assert!(restricted.permits("query"));
/// assert!(!restricted.permits("getFulltext"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodCallPolicy {
    /// Every method is callable.
    #[default]
    AllowAll,
    /// Only the listed methods are callable.
    AllowList(HashSet<String>),
}

impl MethodCallPolicy {
    /// Builds an allow list.
    pub fn allow_only<I, S>(methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MethodCallPolicy::AllowList(methods.into_iter().map(Into::into).collect())
    }

    /// Tests a method name against the policy.
    pub fn permits(&self, method_name: &str) -> bool {
        match self {
            MethodCallPolicy::AllowAll => true,
            MethodCallPolicy::AllowList(methods) => methods.contains(method_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allow_all_permits_any_name() {
        let policy = MethodCallPolicy::default();
        assert!(policy.permits(""));
        assert!(policy.permits("query"));
        assert!(policy.permits("notAMethod"));
    }

    #[test]
    fn test_allow_list_is_exact() {
        let policy = MethodCallPolicy::allow_only(["query"]);
        assert!(policy.permits("query"));
        assert!(!policy.permits("Query"));
        assert!(!policy.permits(""));
    }

    #[test]
    fn test_policy_serde() {
        let policy: MethodCallPolicy = serde_json::from_str("\"allow_all\"").unwrap();
        assert_eq!(policy, MethodCallPolicy::AllowAll);

        let policy: MethodCallPolicy =
            serde_json::from_str(r#"{"allow_list": ["query"]}"#).unwrap();
        assert!(policy.permits("query"));
    }
}
