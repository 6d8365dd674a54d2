//! Pure analyses over package and requirement collections.
//!
//! Every operation takes the collections it compares plus the environment
//! used to expand requirements, and returns structured findings. Deciding
//! whether a finding is a failure is left to the caller.

mod conflicts;
mod locks;
mod missing;
mod tree;

pub use conflicts::{conflicting_dependencies, required_by, Conflict};
pub use locks::{
    lock_version_mismatch, locked_requirements, required_version_mismatch, unnecessary_locks,
    unnecessary_packages,
};
pub use missing::{
    missing_requirements, unlocked_requirements, unset_locks, unset_requirements,
    MissingRequirement,
};
pub use tree::{dependency_tree, package_dependency_tree, PackageTree, TreeNode};

use std::collections::HashSet;
use tracing::debug;
use vetch_core::{Environment, IgnoreList, Package, PackageCollection, RequirementCollection};

/// Every installed package whose key is not in the ignore list
pub fn installed_packages(env: &dyn Environment, ignore_list: &IgnoreList) -> PackageCollection {
    let packages = PackageCollection::from_environment(env, ignore_list);
    debug!(
        "Loaded {} installed packages ({} ignored keys)",
        packages.len(),
        ignore_list.len()
    );
    packages
}

/// Installed packages, restricted to the transitive closure of
/// `requirements` when any are given
pub fn dependency_list(
    packages: &PackageCollection,
    requirements: &RequirementCollection,
    env: &dyn Environment,
) -> PackageCollection {
    if requirements.is_empty() {
        return packages.clone();
    }

    let flattened = requirements.flatten(env);
    let wanted: HashSet<&str> = flattened.keys().into_iter().collect();
    packages.filter(|package| wanted.contains(package.key.as_str()))
}

/// Distinct dependency cycles among the installed packages
pub fn cyclic_dependencies(packages: &PackageCollection, env: &dyn Environment) -> Vec<Vec<Package>> {
    packages.cyclic_dependencies(env)
}
