//! Installed packages.

use super::dependency::{Dependency, IgnoreList};
use super::distribution::Distribution;
use super::requirement::Requirement;
use super::version::{InstalledVersion, VersionData};
use crate::collection::RequirementCollection;
use crate::environment::Environment;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// An installed distribution with a concrete version
#[derive(Debug, Clone)]
pub struct Package {
    pub key: String,
    pub name: String,
    pub version: InstalledVersion,
    source: Arc<Distribution>,
    ignore_list: IgnoreList,
}

impl Package {
    /// Wrap an installed distribution
    pub fn from_distribution(source: Arc<Distribution>, ignore_list: IgnoreList) -> Self {
        Self {
            key: source.key.clone(),
            name: source.name.clone(),
            version: source.version.clone(),
            source,
            ignore_list,
        }
    }

    /// Installed version identifier, `None` when undetermined
    pub fn version_id(&self) -> Option<&str> {
        self.version.id()
    }

    /// Canonical specifier pinning this package (`==1.2.3`)
    pub fn specified_version(&self) -> String {
        self.version.specifier()
    }

    /// Distribution this package was read from
    pub fn source(&self) -> &Arc<Distribution> {
        &self.source
    }

    pub fn ignore_list(&self) -> &IgnoreList {
        &self.ignore_list
    }

    /// Declared requirements minus ignored keys, sorted by key
    pub fn requirements(&self) -> RequirementCollection {
        let mut requirements: Vec<Requirement> = self
            .source
            .requires
            .iter()
            .filter(|spec| !self.ignore_list.contains(&spec.key))
            .map(|spec| Requirement::from_spec(spec, self.ignore_list.clone()))
            .collect();
        requirements.sort();

        RequirementCollection::new(requirements)
    }
}

impl Dependency for Package {
    fn key(&self) -> &str {
        &self.key
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn specified_version(&self) -> String {
        Package::specified_version(self)
    }

    fn requirements(&self, _env: &dyn Environment) -> RequirementCollection {
        Package::requirements(self)
    }

    fn package(&self, _env: &dyn Environment) -> Option<Package> {
        Some(self.clone())
    }
}

impl PartialEq for Package {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.version == other.version
    }
}

impl Eq for Package {}

/// Ordered by key, then by version identifier
impl Ord for Package {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key
            .cmp(&other.key)
            .then_with(|| self.version.id().cmp(&other.version.id()))
    }
}

impl PartialOrd for Package {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for Package {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.key, self.version)
    }
}
