use super::missing::unset_locks;
use std::collections::HashSet;
use vetch_core::{
    ConflictPolicy, Environment, IgnoreList, Package, PackageCollection, Requirement,
    RequirementCollection,
};

/// Requirements pinning installed packages to their current versions.
///
/// With no requirements every installed package is locked. Otherwise a
/// package is locked when a requirement names it directly or when it is
/// required by anything in the flattened requirement set.
pub fn locked_requirements(
    packages: &PackageCollection,
    requirements: &RequirementCollection,
    env: &dyn Environment,
) -> RequirementCollection {
    if requirements.is_empty() {
        return packages.iter().map(Requirement::from_package).collect();
    }

    let required: HashSet<String> = requirements
        .flatten(env)
        .iter()
        .flat_map(|requirement| requirement.requirements(env))
        .map(|requirement| requirement.key)
        .collect();

    packages
        .iter()
        .filter(|package| requirements.contains(&package.key) || required.contains(&package.key))
        .map(Requirement::from_package)
        .collect()
}

/// Installed packages whose pinned specifier differs from their lock
pub fn lock_version_mismatch(
    packages: &PackageCollection,
    locked: &RequirementCollection,
) -> Vec<(Package, String)> {
    packages
        .iter()
        .flat_map(|package| {
            let installed = package.specified_version();
            locked
                .iter()
                .filter(move |lock| lock.key == package.key)
                .map(|lock| lock.specified_version())
                .filter(move |locked_version| *locked_version != installed)
                .map(move |locked_version| (package.clone(), locked_version))
        })
        .collect()
}

/// Requirements that have a lock entry and are not satisfied by the
/// installed environment.
///
/// The requirement is checked against the installed version, not against
/// the lock entry; the lock specifier is returned alongside for display.
pub fn required_version_mismatch(
    requirements: &RequirementCollection,
    locked: &RequirementCollection,
    env: &dyn Environment,
    policy: &ConflictPolicy,
) -> Vec<(Requirement, String)> {
    requirements
        .iter()
        .flat_map(|requirement| {
            locked
                .iter()
                .filter(move |lock| lock.key == requirement.key)
                .filter(move |_| requirement.conflicting(env, policy))
                .map(move |lock| (requirement.clone(), lock.specified_version()))
        })
        .collect()
}

/// Installed packages neither locked nor needed by the requirements
pub fn unnecessary_packages(
    packages: &PackageCollection,
    requirements: &RequirementCollection,
    locked: &RequirementCollection,
    env: &dyn Environment,
) -> PackageCollection {
    let unset = unset_locks(requirements, locked, env);
    packages.filter(|package| !locked.contains(&package.key) && !unset.contains(&package.key))
}

/// Lock entries the requirements no longer need
pub fn unnecessary_locks(
    requirements: &RequirementCollection,
    locked: &RequirementCollection,
    ignore_list: &IgnoreList,
    env: &dyn Environment,
) -> RequirementCollection {
    let needed: HashSet<String> = requirements
        .flatten(env)
        .into_iter()
        .map(|requirement| requirement.key)
        .collect();

    locked
        .iter()
        .filter(|lock| !needed.contains(&lock.key) && !ignore_list.contains(&lock.key))
        .cloned()
        .collect::<RequirementCollection>()
        .sorted()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{self, keys};
    use vetch_core::{ignore_list, Distribution, StaticEnvironment};

    #[test]
    fn test_lock_everything_without_requirements() {
        let env = fixtures::environment();
        let packages = fixtures::packages(&env);

        let locked = locked_requirements(&packages, &RequirementCollection::default(), &env);
        let pins: Vec<String> = locked.iter().map(ToString::to_string).collect();
        assert_eq!(
            pins,
            vec!["app==1.0.0", "cli==3.0.0", "orphan==0.1.0", "util==1.0.0", "web==1.5.0"]
        );
    }

    #[test]
    fn test_lock_follows_requirements() {
        let env = fixtures::environment();
        let packages = fixtures::packages(&env);

        let locked = locked_requirements(&packages, &fixtures::requirements(&["web"]), &env);
        assert_eq!(keys(&locked), vec!["util", "web"]);
        assert_eq!(locked.get("util").unwrap().specified_version(), "==1.0.0");
    }

    #[test]
    fn test_lock_version_mismatch() {
        let env = fixtures::environment();
        let packages = fixtures::packages(&env);
        let locked = fixtures::requirements(&["util==1.0.0", "web==1.4.0", "gone==0.1"]);

        let mismatches = lock_version_mismatch(&packages, &locked);
        assert_eq!(mismatches.len(), 1);
        assert_eq!(mismatches[0].0.key, "web");
        assert_eq!(mismatches[0].1, "==1.4.0");
    }

    #[test]
    fn test_required_version_mismatch_checks_installed_version() {
        let env: StaticEnvironment = [Distribution::new("lib", "1.0.0")].into_iter().collect();
        let policy = ConflictPolicy::default();

        // The lock agrees with the requirement but the installed version does not
        let requirements = fixtures::requirements(&["lib>=2.0"]);
        let locked = fixtures::requirements(&["lib==2.0.0"]);
        let mismatches = required_version_mismatch(&requirements, &locked, &env, &policy);
        assert_eq!(mismatches.len(), 1);
        assert_eq!(mismatches[0].0.key, "lib");
        assert_eq!(mismatches[0].1, "==2.0.0");

        // The lock disagrees with the requirement but the installed version satisfies it
        let requirements = fixtures::requirements(&["lib<2.0"]);
        let mismatches = required_version_mismatch(&requirements, &locked, &env, &policy);
        assert!(mismatches.is_empty());
    }

    #[test]
    fn test_unnecessary_packages() {
        let env = fixtures::environment();
        let packages = fixtures::packages(&env);
        let requirements = fixtures::requirements(&["web"]);
        let locked = fixtures::requirements(&["web==1.5.0"]);

        let unnecessary = unnecessary_packages(&packages, &requirements, &locked, &env);
        assert_eq!(unnecessary.keys(), vec!["app", "cli", "orphan"]);
    }

    #[test]
    fn test_unnecessary_locks() {
        let env = fixtures::environment();
        let requirements = fixtures::requirements(&["web"]);
        let locked = fixtures::requirements(&["web==1.5.0", "orphan==0.1.0", "pip==23.2", "util==1.0.0"]);

        let unnecessary = unnecessary_locks(&requirements, &locked, &ignore_list(["pip"]), &env);
        assert_eq!(keys(&unnecessary), vec!["orphan"]);
    }
}
