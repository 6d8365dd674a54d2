use super::conflicts::required_by;
use std::collections::HashSet;
use vetch_core::{
    Environment, Package, PackageCollection, Requirement, RequirementCollection, VersionData,
};

/// A requirement with no installed package
#[derive(Debug, Clone)]
pub struct MissingRequirement {
    pub requirement: Requirement,
    /// Installed packages that also declare the requirement
    pub required_by: Vec<(Package, String)>,
}

/// Requirements, expanded transitively, whose key is not installed
pub fn missing_requirements(
    packages: &PackageCollection,
    requirements: &RequirementCollection,
    env: &dyn Environment,
) -> Vec<MissingRequirement> {
    requirements
        .flatten(env)
        .into_iter()
        .filter(|requirement| !packages.contains(&requirement.key))
        .map(|requirement| MissingRequirement {
            required_by: required_by(&requirement.key, packages),
            requirement,
        })
        .collect()
}

/// Top-level installed packages that no requirement file declares
pub fn unset_requirements(
    packages: &PackageCollection,
    requirements: &RequirementCollection,
) -> PackageCollection {
    packages
        .independent_packages()
        .filter(|package| !requirements.contains(&package.key))
}

/// Requirements that do not constrain the version at all
pub fn unlocked_requirements(requirements: &RequirementCollection) -> RequirementCollection {
    requirements
        .iter()
        .filter(|requirement| requirement.version.is_any())
        .cloned()
        .collect::<RequirementCollection>()
        .sorted()
}

/// Transitive requirements with no entry in the lock set
pub fn unset_locks(
    requirements: &RequirementCollection,
    locked: &RequirementCollection,
    env: &dyn Environment,
) -> RequirementCollection {
    let locked_keys: HashSet<&str> = locked.keys().into_iter().collect();

    requirements
        .flatten(env)
        .into_iter()
        .filter(|requirement| !locked_keys.contains(requirement.key.as_str()))
        .collect::<RequirementCollection>()
        .sorted()
}
