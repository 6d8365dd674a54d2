//! Depth-first cycle search over the installed dependency graph.

use crate::environment::Environment;
use crate::types::{IgnoreList, Package, Requirement};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// Longest path followed before a branch is abandoned
pub const MAX_TRAVERSAL_DEPTH: usize = 256;

/// Children of an installed package, computed once per search
struct Node {
    package: Package,
    requirements: Vec<Requirement>,
}

/// One cycle search over an environment.
///
/// Requirement lists are memoised by key for the lifetime of the search.
/// Found cycles accumulate in `cycles`; the recursion only reports
/// whether a cycle closed at the visited node.
pub(crate) struct CycleSearch<'a> {
    env: &'a dyn Environment,
    ignore_list: IgnoreList,
    nodes: HashMap<String, Option<Node>>,
    cycles: Vec<Vec<Package>>,
    signatures: HashSet<Vec<String>>,
}

impl<'a> CycleSearch<'a> {
    pub(crate) fn new(env: &'a dyn Environment) -> Self {
        Self {
            env,
            ignore_list: IgnoreList::default(),
            nodes: HashMap::new(),
            cycles: Vec::new(),
            signatures: HashSet::new(),
        }
    }

    /// Search every cycle reachable from a starting package
    pub(crate) fn run(&mut self, start: &Package) {
        self.ignore_list = start.ignore_list().clone();
        self.nodes.entry(start.key.clone()).or_insert_with(|| {
            Some(Node {
                package: start.clone(),
                requirements: start.requirements().into_iter().collect(),
            })
        });

        let mut path = Vec::new();
        self.visit(&start.key, &mut path);
    }

    pub(crate) fn into_cycles(self) -> Vec<Vec<Package>> {
        self.cycles
    }

    /// Visit `key` with `path` as the current branch.
    ///
    /// Returns the cycle when `key` is already on the branch.
    fn visit(&mut self, key: &str, path: &mut Vec<Package>) -> Option<Vec<Package>> {
        let (package, children) = match self.node(key) {
            Some(node) if !node.requirements.is_empty() => (
                node.package.clone(),
                node.requirements
                    .iter()
                    .map(|requirement| requirement.key.clone())
                    .collect::<Vec<_>>(),
            ),
            _ => return None,
        };

        if let Some(start) = path.iter().position(|visited| visited.key == key) {
            return Some(path[start..].to_vec());
        }

        if path.len() >= MAX_TRAVERSAL_DEPTH {
            warn!(
                "Dependency path deeper than {} packages, not following {}",
                MAX_TRAVERSAL_DEPTH, key
            );
            return None;
        }

        path.push(package);
        for child in children {
            if let Some(cycle) = self.visit(&child, path) {
                self.record(cycle);
            }
        }
        path.pop();

        None
    }

    fn node(&mut self, key: &str) -> Option<&Node> {
        if !self.nodes.contains_key(key) {
            let node = self.env.distribution(key).map(|source| {
                let package = Package::from_distribution(source, self.ignore_list.clone());
                let requirements = package.requirements().into_iter().collect();
                Node {
                    package,
                    requirements,
                }
            });
            self.nodes.insert(key.to_string(), node);
        }

        self.nodes.get(key).and_then(Option::as_ref)
    }

    fn record(&mut self, cycle: Vec<Package>) {
        let mut signature: Vec<String> = cycle.iter().map(|package| package.key.clone()).collect();
        signature.sort();

        if self.signatures.insert(signature) {
            debug!(
                "Found dependency cycle {}",
                cycle
                    .iter()
                    .map(|package| package.key.as_str())
                    .collect::<Vec<_>>()
                    .join(" -> ")
            );
            self.cycles.push(cycle);
        }
    }
}
