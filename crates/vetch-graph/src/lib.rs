//! Dependency graph operations for vetch
//!
//! This crate provides the analyses run over an installed environment and
//! the requirement and lock files that describe it: conflict and cycle
//! detection, missing and unpinned requirements, dependency trees, lock
//! derivation and drift detection, and export to a renderable graph.

pub mod export;
pub mod ops;

// Re-export main types
pub use export::{
    create_dependency_graph, render_graph, DependencyGraph, GraphOptions, GraphRenderer,
    GraphvizRenderer,
};
pub use ops::{
    conflicting_dependencies, cyclic_dependencies, dependency_list, dependency_tree,
    installed_packages, lock_version_mismatch, locked_requirements, missing_requirements,
    package_dependency_tree, required_by, required_version_mismatch, unlocked_requirements,
    unnecessary_locks, unnecessary_packages, unset_locks, unset_requirements, Conflict,
    MissingRequirement, PackageTree, TreeNode,
};

#[cfg(test)]
pub(crate) mod fixtures {
    use vetch_core::{ignore_list, Distribution, PackageCollection, Requirement, RequirementCollection, StaticEnvironment};

    /// Environment used across the operation tests:
    ///
    /// ```text
    /// app 1.0.0 -> web>=2.0, cli
    /// web 1.5.0 -> util==1.0.0, missing-dep
    /// cli 3.0.0 -> util>=1.0.0, missing-dep>=0.1
    /// util 1.0.0
    /// orphan 0.1.0
    /// pip 23.2 -> app
    /// ```
    pub fn environment() -> StaticEnvironment {
        [
            Distribution::new("app", "1.0.0")
                .requiring("web>=2.0")
                .unwrap()
                .requiring("cli")
                .unwrap(),
            Distribution::new("web", "1.5.0")
                .requiring("util==1.0.0")
                .unwrap()
                .requiring("missing-dep")
                .unwrap(),
            Distribution::new("cli", "3.0.0")
                .requiring("util>=1.0.0")
                .unwrap()
                .requiring("missing-dep>=0.1")
                .unwrap(),
            Distribution::new("util", "1.0.0"),
            Distribution::new("orphan", "0.1.0"),
            Distribution::new("pip", "23.2").requiring("app").unwrap(),
        ]
        .into_iter()
        .collect()
    }

    pub fn packages(env: &StaticEnvironment) -> PackageCollection {
        PackageCollection::from_environment(env, &ignore_list(["pip"]))
    }

    pub fn requirements(lines: &[&str]) -> RequirementCollection {
        lines
            .iter()
            .map(|line| Requirement::from_requirement_string(line).unwrap())
            .collect()
    }

    pub fn keys<'a, I, T>(items: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a T>,
        T: vetch_core::Dependency + 'a,
    {
        items.into_iter().map(|item| item.key().to_string()).collect()
    }
}
