use std::collections::HashSet;
use vetch_core::{
    ConflictPolicy, Environment, InstalledVersion, Package, PackageCollection, Requirement,
};

/// A requirement the installed environment does not satisfy
#[derive(Debug, Clone)]
pub struct Conflict {
    /// First conflicting requirement edge found for the key
    pub requirement: Requirement,
    /// Version actually installed
    pub installed: InstalledVersion,
    /// Every package requiring the key, with the specifier it asks for
    pub required_by: Vec<(Package, String)>,
}

/// Packages whose direct requirements include `key`, paired with the
/// specifier each one declares
pub fn required_by(key: &str, packages: &PackageCollection) -> Vec<(Package, String)> {
    packages
        .iter()
        .flat_map(|package| {
            package
                .requirements()
                .into_iter()
                .filter(|requirement| requirement.key == key)
                .map(|requirement| (package.clone(), requirement.specified_version()))
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Requirements declared by installed packages that the installed
/// versions fail to satisfy. Each key is reported once.
pub fn conflicting_dependencies(
    packages: &PackageCollection,
    env: &dyn Environment,
    policy: &ConflictPolicy,
) -> Vec<Conflict> {
    let mut reported = HashSet::new();

    packages
        .requirements()
        .into_iter()
        .filter(|requirement| requirement.conflicting(env, policy))
        .filter(|requirement| reported.insert(requirement.key.clone()))
        .map(|requirement| {
            let installed = requirement
                .package(env)
                .map(|package| package.version)
                .unwrap_or_default();
            let required_by = required_by(&requirement.key, packages);
            Conflict {
                requirement,
                installed,
                required_by,
            }
        })
        .collect()
}
