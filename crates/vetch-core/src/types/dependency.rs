//! Behaviour shared by packages and requirements.

use super::package::Package;
use crate::collection::RequirementCollection;
use crate::environment::Environment;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Keys excluded when computing a dependency's own requirements
pub type IgnoreList = Arc<BTreeSet<String>>;

/// Build an ignore list from any collection of keys
pub fn ignore_list<I, S>(keys: I) -> IgnoreList
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Arc::new(
        keys.into_iter()
            .map(|key| crate::utils::canonical_key(key.as_ref()))
            .collect(),
    )
}

/// A node of the dependency graph, installed or required
pub trait Dependency {
    /// Canonical lowercase key
    fn key(&self) -> &str;

    /// Display name
    fn name(&self) -> &str;

    /// Version specifier (`==1.2.3`, `>=1.0,<2.0`, `Any`)
    fn specified_version(&self) -> String;

    /// Direct requirements, freshly computed on every call
    fn requirements(&self, env: &dyn Environment) -> RequirementCollection;

    /// Installed package backing this dependency
    fn package(&self, env: &dyn Environment) -> Option<Package>;
}
