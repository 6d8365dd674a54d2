//! Ordered requirement collections and transitive flattening.

use crate::environment::Environment;
use crate::error::{VetchError, VetchResult};
use crate::types::{IgnoreList, Requirement, VersionData};
use std::collections::{HashSet, VecDeque};

/// Ordered collection of requirements.
///
/// Exact duplicates (same key and same specifier) are dropped on insert.
/// Different constraints on the same key are kept so that diamond edges
/// survive; key-level deduplication happens in [`flatten`](Self::flatten).
#[derive(Debug, Clone, Default)]
pub struct RequirementCollection {
    requirements: Vec<Requirement>,
}

impl RequirementCollection {
    /// Build a collection, keeping insertion order
    pub fn new(requirements: Vec<Requirement>) -> Self {
        let mut collection = Self::default();
        collection.extend(requirements);
        collection
    }

    /// Append a requirement unless the same edge is already present
    pub fn push(&mut self, requirement: Requirement) -> bool {
        let duplicate = self.requirements.iter().any(|existing| {
            existing.key == requirement.key && existing.version.id() == requirement.version.id()
        });
        if duplicate {
            return false;
        }

        self.requirements.push(requirement);
        true
    }

    /// First requirement with the given key
    pub fn get(&self, key: &str) -> VetchResult<&Requirement> {
        self.requirements
            .iter()
            .find(|requirement| requirement.key == key)
            .ok_or_else(|| VetchError::PackageNotFound {
                key: key.to_string(),
            })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.requirements.iter().any(|requirement| requirement.key == key)
    }

    /// Distinct keys in order of first appearance
    pub fn keys(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.requirements
            .iter()
            .map(|requirement| requirement.key.as_str())
            .filter(|key| seen.insert(*key))
            .collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Requirement> {
        self.requirements.iter()
    }

    pub fn len(&self) -> usize {
        self.requirements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }

    /// Apply an ignore list to every member
    pub fn with_ignore_list(self, ignore_list: &IgnoreList) -> Self {
        Self {
            requirements: self
                .requirements
                .into_iter()
                .map(|requirement| requirement.with_ignore_list(ignore_list.clone()))
                .collect(),
        }
    }

    /// Copy of this collection sorted by key, then by constraint
    pub fn sorted(&self) -> Self {
        let mut requirements = self.requirements.clone();
        requirements.sort();
        Self { requirements }
    }

    /// Expand every requirement into its transitive requirements.
    ///
    /// Breadth-first: every top-level entry is taken before any transitive
    /// one, so top-level entries keep their own constraint. A key already
    /// in the result is never expanded again, which also ends cycles.
    pub fn flatten(&self, env: &dyn Environment) -> Self {
        let mut queue: VecDeque<Requirement> = self.requirements.iter().cloned().collect();
        let mut seen: HashSet<String> = HashSet::new();
        let mut flattened = Vec::new();

        while let Some(requirement) = queue.pop_front() {
            if !seen.insert(requirement.key.clone()) {
                continue;
            }

            queue.extend(
                requirement
                    .requirements(env)
                    .into_iter()
                    .filter(|child| !seen.contains(&child.key)),
            );
            flattened.push(requirement);
        }

        Self {
            requirements: flattened,
        }
    }
}

impl Extend<Requirement> for RequirementCollection {
    fn extend<I: IntoIterator<Item = Requirement>>(&mut self, iter: I) {
        for requirement in iter {
            self.push(requirement);
        }
    }
}

impl FromIterator<Requirement> for RequirementCollection {
    fn from_iter<I: IntoIterator<Item = Requirement>>(iter: I) -> Self {
        let mut collection = Self::default();
        collection.extend(iter);
        collection
    }
}

impl IntoIterator for RequirementCollection {
    type Item = Requirement;
    type IntoIter = std::vec::IntoIter<Requirement>;

    fn into_iter(self) -> Self::IntoIter {
        self.requirements.into_iter()
    }
}

impl<'a> IntoIterator for &'a RequirementCollection {
    type Item = &'a Requirement;
    type IntoIter = std::slice::Iter<'a, Requirement>;

    fn into_iter(self) -> Self::IntoIter {
        self.requirements.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::StaticEnvironment;
    use crate::types::{Distribution, RequiredVersion};

    fn requirement(input: &str) -> Requirement {
        Requirement::from_requirement_string(input).unwrap()
    }

    fn environment() -> StaticEnvironment {
        [
            Distribution::new("a", "1.0").requiring("b>=1.0").unwrap(),
            Distribution::new("b", "1.0")
                .requiring("c")
                .unwrap()
                .requiring("a")
                .unwrap(),
            Distribution::new("c", "1.0").requiring("d==2.0").unwrap(),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_exact_duplicates_dropped() {
        let collection = RequirementCollection::new(vec![
            requirement("six==1.16.0"),
            requirement("six==1.16.0"),
            requirement("six>=1.0"),
        ]);

        assert_eq!(collection.len(), 2);
        assert_eq!(collection.keys(), vec!["six"]);
        assert_eq!(collection.get("six").unwrap().specified_version(), "==1.16.0");
    }

    #[test]
    fn test_get_missing_key() {
        let collection = RequirementCollection::new(vec![requirement("six")]);
        assert!(matches!(
            collection.get("attrs"),
            Err(VetchError::PackageNotFound { .. })
        ));
        assert!(!collection.contains("attrs"));
    }

    #[test]
    fn test_flatten_follows_installed_graph() {
        let env = environment();
        let flattened = RequirementCollection::new(vec![requirement("a")]).flatten(&env);

        // d is not installed but is still a requirement of c
        assert_eq!(flattened.keys(), vec!["a", "b", "c", "d"]);
        assert_eq!(flattened.get("d").unwrap().specified_version(), "==2.0");
    }

    #[test]
    fn test_flatten_top_level_constraint_wins() {
        let env = environment();
        let top_level = RequirementCollection::new(vec![
            requirement("a"),
            Requirement::new("c", RequiredVersion::from_string("<1.0").unwrap()),
        ]);

        let flattened = top_level.flatten(&env);
        assert_eq!(flattened.get("c").unwrap().specified_version(), "<1.0");
        assert_eq!(flattened.len(), 4);
    }

    #[test]
    fn test_flatten_not_installed() {
        let env = StaticEnvironment::new();
        let flattened = RequirementCollection::new(vec![requirement("missing-dep")]).flatten(&env);
        assert_eq!(flattened.keys(), vec!["missing-dep"]);
    }

    #[test]
    fn test_ignore_list_limits_expansion() {
        let env = environment();
        let flattened = RequirementCollection::new(vec![requirement("a")])
            .with_ignore_list(&crate::types::ignore_list(["c"]))
            .flatten(&env);
        assert_eq!(flattened.keys(), vec!["a", "b"]);
    }

    #[test]
    fn test_sorted() {
        let collection = RequirementCollection::new(vec![requirement("zope"), requirement("attrs")]);
        assert_eq!(collection.sorted().keys(), vec!["attrs", "zope"]);
    }

    #[test]
    fn test_sorted_orders_same_key_by_constraint() {
        let collection = RequirementCollection::new(vec![
            requirement("six>=1.0"),
            requirement("attrs"),
            requirement("six<2"),
        ]);
        let sorted = collection.sorted();
        let specifiers: Vec<String> = sorted.iter().map(|r| r.specified_version()).collect();

        assert_eq!(sorted.keys(), vec!["attrs", "six", "six"]);
        assert_eq!(specifiers, vec!["Any", "<2", ">=1.0"]);
        assert!(requirement("six<2") < requirement("six>=1.0"));
    }
}
