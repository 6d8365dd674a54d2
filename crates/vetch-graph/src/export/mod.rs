//! Dependency graph export
//!
//! Translates installed packages into a node/edge graph that a Graphviz
//! engine can render. The graph keeps one node per package key and one
//! edge per declared requirement, labelled with the constraint.

mod dot;
mod render;

pub use render::{render_graph, GraphRenderer, GraphvizRenderer};

use camino::Utf8PathBuf;
use indexmap::IndexMap;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use vetch_core::{PackageCollection, VersionData, ANY_VERSION};

/// Graph name and default output filename
pub const DEFAULT_GRAPH_NAME: &str = "vetch-graph";

/// Naming, output and styling options handed to the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphOptions {
    pub name: String,
    /// Output path without extension, defaults to `name`
    pub filename: Option<String>,
    /// Output format passed to the engine (`pdf`, `png`, `svg`, ...)
    pub format: String,
    /// Layout engine (`dot`, `neato`, `circo`, ...)
    pub engine: String,
    /// Merge parallel edges
    pub strict: bool,
    pub graph_attributes: IndexMap<String, String>,
    pub node_attributes: IndexMap<String, String>,
    pub edge_attributes: IndexMap<String, String>,
    /// Label for an unknown installed version or an unconstrained edge
    pub any_version: String,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            name: DEFAULT_GRAPH_NAME.to_string(),
            filename: None,
            format: "pdf".to_string(),
            engine: "dot".to_string(),
            strict: true,
            graph_attributes: IndexMap::new(),
            node_attributes: IndexMap::from([("shape".to_string(), "box3d".to_string())]),
            edge_attributes: IndexMap::from([("fontsize".to_string(), "10".to_string())]),
            any_version: ANY_VERSION.to_string(),
        }
    }
}

impl GraphOptions {
    /// Output filename without extension
    pub fn filename(&self) -> &str {
        self.filename.as_deref().unwrap_or(&self.name)
    }

    /// Path of the rendered file, `{filename}.{format}`
    pub fn output_path(&self) -> Utf8PathBuf {
        Utf8PathBuf::from(format!("{}.{}", self.filename(), self.format))
    }
}

/// A package node; `version` is `None` for required but uninstalled keys
#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    pub key: String,
    pub version: Option<String>,
}

/// A requirement edge labelled with its specifier
#[derive(Debug, Clone, PartialEq)]
pub struct GraphEdge {
    pub label: String,
}

/// Renderable dependency graph
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    options: GraphOptions,
    graph: DiGraph<GraphNode, GraphEdge>,
    node_map: HashMap<String, NodeIndex>,
}

impl DependencyGraph {
    /// Create an empty graph
    pub fn new(options: GraphOptions) -> Self {
        Self {
            options,
            graph: DiGraph::new(),
            node_map: HashMap::new(),
        }
    }

    pub fn options(&self) -> &GraphOptions {
        &self.options
    }

    /// Add a node, or set the version of a node created by an edge
    pub fn add_node(&mut self, key: &str, version: Option<String>) -> NodeIndex {
        if let Some(&index) = self.node_map.get(key) {
            if version.is_some() {
                self.graph[index].version = version;
            }
            return index;
        }

        let index = self.graph.add_node(GraphNode {
            key: key.to_string(),
            version,
        });
        self.node_map.insert(key.to_string(), index);
        index
    }

    /// Add an edge, creating unlabelled nodes for unknown keys
    pub fn add_edge(&mut self, from: &str, to: &str, label: String) {
        let from = self.add_node(from, None);
        let to = self.add_node(to, None);
        self.graph.add_edge(from, to, GraphEdge { label });
    }

    pub fn node(&self, key: &str) -> Option<&GraphNode> {
        self.node_map.get(key).map(|&index| &self.graph[index])
    }

    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.graph.node_weights()
    }

    /// Edges as `(from, to, label)` in insertion order
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, &str)> {
        self.graph.edge_references().map(|edge| {
            (
                self.graph[edge.source()].key.as_str(),
                self.graph[edge.target()].key.as_str(),
                edge.weight().label.as_str(),
            )
        })
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

/// Build the graph of installed packages and their requirements
pub fn create_dependency_graph(packages: &PackageCollection, options: GraphOptions) -> DependencyGraph {
    let any_version = options.any_version.clone();
    let mut graph = DependencyGraph::new(options);

    for package in packages {
        let version = package.version.id().unwrap_or(&any_version).to_string();
        graph.add_node(&package.key, Some(version));

        for requirement in package.requirements() {
            let label = if requirement.version.is_any() {
                any_version.clone()
            } else {
                requirement.specified_version()
            };
            graph.add_edge(&package.key, &requirement.key, label);
        }
    }

    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_default_options() {
        let options = GraphOptions::default();
        assert_eq!(options.filename(), "vetch-graph");
        assert_eq!(options.output_path(), Utf8PathBuf::from("vetch-graph.pdf"));
        assert_eq!(options.node_attributes.get("shape").map(String::as_str), Some("box3d"));

        let named = GraphOptions {
            filename: Some("out/deps".to_string()),
            format: "png".to_string(),
            ..GraphOptions::default()
        };
        assert_eq!(named.output_path(), Utf8PathBuf::from("out/deps.png"));
    }

    #[test]
    fn test_create_dependency_graph() {
        let env = fixtures::environment();
        let packages = fixtures::packages(&env);
        let graph = create_dependency_graph(&packages, GraphOptions::default());

        // Five installed packages plus the uninstalled missing-dep
        assert_eq!(graph.node_count(), 6);
        assert_eq!(graph.edge_count(), 6);
        assert_eq!(graph.node("util").unwrap().version.as_deref(), Some("1.0.0"));
        assert_eq!(graph.node("missing-dep").unwrap().version, None);

        let edges: Vec<(&str, &str, &str)> = graph.edges().collect();
        assert!(edges.contains(&("app", "web", ">=2.0")));
        assert!(edges.contains(&("cli", "missing-dep", ">=0.1")));
    }

    #[test]
    fn test_any_version_label() {
        let env = fixtures::environment();
        let packages = fixtures::packages(&env);
        let options = GraphOptions {
            any_version: "*".to_string(),
            ..GraphOptions::default()
        };
        let graph = create_dependency_graph(&packages, options);

        let edges: Vec<(&str, &str, &str)> = graph.edges().collect();
        assert!(edges.contains(&("app", "cli", "*")));
        assert!(edges.contains(&("web", "missing-dep", "*")));
        assert!(edges.contains(&("app", "web", ">=2.0")));
    }

    #[test]
    fn test_edge_before_node_keeps_version() {
        let mut graph = DependencyGraph::new(GraphOptions::default());
        graph.add_edge("a", "b", "==1.0".to_string());
        graph.add_node("b", Some("1.0".to_string()));

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.node("b").unwrap().version.as_deref(), Some("1.0"));
    }
}
