//! Installed distribution source.
//!
//! The analysis never inspects the interpreter itself. It asks an
//! `Environment` for the installed distributions and for a single
//! distribution by key.

use crate::types::Distribution;
use indexmap::IndexMap;
use std::sync::Arc;
use tracing::debug;

/// A set of installed distributions
pub trait Environment {
    /// Every installed distribution, in discovery order
    fn distributions(&self) -> Vec<Arc<Distribution>>;

    /// Look up an installed distribution by canonical key
    fn distribution(&self, key: &str) -> Option<Arc<Distribution>>;
}

/// In-memory environment keyed by canonical name
#[derive(Debug, Clone, Default)]
pub struct StaticEnvironment {
    distributions: IndexMap<String, Arc<Distribution>>,
}

impl StaticEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a distribution. The first distribution seen for a key wins and
    /// later duplicates are reported as `false`.
    pub fn insert(&mut self, distribution: Distribution) -> bool {
        if self.distributions.contains_key(&distribution.key) {
            debug!(
                "Skipping duplicate distribution {} {}",
                distribution.name, distribution.version
            );
            return false;
        }

        self.distributions
            .insert(distribution.key.clone(), Arc::new(distribution));
        true
    }

    pub fn len(&self) -> usize {
        self.distributions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distributions.is_empty()
    }
}

impl FromIterator<Distribution> for StaticEnvironment {
    fn from_iter<I: IntoIterator<Item = Distribution>>(iter: I) -> Self {
        let mut environment = Self::new();
        for distribution in iter {
            environment.insert(distribution);
        }
        environment
    }
}

impl Environment for StaticEnvironment {
    fn distributions(&self) -> Vec<Arc<Distribution>> {
        self.distributions.values().cloned().collect()
    }

    fn distribution(&self, key: &str) -> Option<Arc<Distribution>> {
        self.distributions.get(key).cloned()
    }
}
