//! Installed package collections.

use super::cycles::CycleSearch;
use super::requirements::RequirementCollection;
use crate::environment::Environment;
use crate::error::{VetchError, VetchResult};
use crate::types::{IgnoreList, Package};
use std::collections::HashSet;

/// Installed packages sorted by key, one package per key
#[derive(Debug, Clone, Default)]
pub struct PackageCollection {
    packages: Vec<Package>,
}

impl PackageCollection {
    /// Build a collection sorted by key, keeping the lowest version of a
    /// duplicated key
    pub fn new(packages: Vec<Package>) -> Self {
        let mut packages = packages;
        packages.sort();
        packages.dedup_by(|later, earlier| later.key == earlier.key);
        Self { packages }
    }

    /// Every installed distribution whose key is not ignored
    pub fn from_environment(env: &dyn Environment, ignore_list: &IgnoreList) -> Self {
        env.distributions()
            .into_iter()
            .filter(|distribution| !ignore_list.contains(&distribution.key))
            .map(|distribution| Package::from_distribution(distribution, ignore_list.clone()))
            .collect()
    }

    /// Package with the given key
    pub fn get(&self, key: &str) -> VetchResult<&Package> {
        self.packages
            .binary_search_by(|package| package.key.as_str().cmp(key))
            .map(|index| &self.packages[index])
            .map_err(|_| VetchError::PackageNotFound {
                key: key.to_string(),
            })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_ok()
    }

    pub fn keys(&self) -> Vec<&str> {
        self.packages.iter().map(|package| package.key.as_str()).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Package> {
        self.packages.iter()
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Union of every member's direct requirements
    pub fn requirements(&self) -> RequirementCollection {
        self.packages
            .iter()
            .flat_map(|package| package.requirements())
            .collect()
    }

    /// Packages that no member of this collection requires
    pub fn independent_packages(&self) -> Self {
        let required = self.required_keys();
        self.filter(|package| !required.contains(package.key.as_str()))
    }

    /// Packages that some member of this collection requires
    pub fn dependent_packages(&self) -> Self {
        let required = self.required_keys();
        self.filter(|package| required.contains(package.key.as_str()))
    }

    /// Distinct dependency cycles reachable from any member
    pub fn cyclic_dependencies(&self, env: &dyn Environment) -> Vec<Vec<Package>> {
        let mut search = CycleSearch::new(env);
        for package in &self.packages {
            search.run(package);
        }
        search.into_cycles()
    }

    /// Members matching a predicate, order preserved
    pub fn filter<F>(&self, predicate: F) -> Self
    where
        F: Fn(&Package) -> bool,
    {
        Self {
            packages: self
                .packages
                .iter()
                .filter(|package| predicate(package))
                .cloned()
                .collect(),
        }
    }

    fn required_keys(&self) -> HashSet<String> {
        self.packages
            .iter()
            .flat_map(|package| package.requirements())
            .map(|requirement| requirement.key)
            .collect()
    }
}

impl FromIterator<Package> for PackageCollection {
    fn from_iter<I: IntoIterator<Item = Package>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for PackageCollection {
    type Item = Package;
    type IntoIter = std::vec::IntoIter<Package>;

    fn into_iter(self) -> Self::IntoIter {
        self.packages.into_iter()
    }
}

impl<'a> IntoIterator for &'a PackageCollection {
    type Item = &'a Package;
    type IntoIter = std::slice::Iter<'a, Package>;

    fn into_iter(self) -> Self::IntoIter {
        self.packages.iter()
    }
}
