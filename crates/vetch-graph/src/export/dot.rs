//! DOT source generation.

use super::DependencyGraph;
use indexmap::IndexMap;
use std::fmt;

impl fmt::Display for DependencyGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let options = self.options();
        let kind = if options.strict { "strict digraph" } else { "digraph" };

        writeln!(f, "{} {} {{", kind, quote(&options.name))?;
        write_attributes(f, "graph", &options.graph_attributes)?;
        write_attributes(f, "node", &options.node_attributes)?;
        write_attributes(f, "edge", &options.edge_attributes)?;

        for node in self.nodes() {
            match &node.version {
                Some(version) => writeln!(
                    f,
                    "\t{} [label=<<table border=\"0\"><tr><td><b>{}</b></td></tr><tr><td>{}</td></tr></table>>]",
                    quote(&node.key),
                    escape_html(&node.key),
                    escape_html(version)
                )?,
                None => writeln!(f, "\t{}", quote(&node.key))?,
            }
        }

        for (from, to, label) in self.edges() {
            writeln!(f, "\t{} -> {} [label={}]", quote(from), quote(to), quote(label))?;
        }

        writeln!(f, "}}")
    }
}

fn write_attributes(
    f: &mut fmt::Formatter<'_>,
    statement: &str,
    attributes: &IndexMap<String, String>,
) -> fmt::Result {
    if attributes.is_empty() {
        return Ok(());
    }

    let list = attributes
        .iter()
        .map(|(key, value)| format!("{}={}", quote(key), quote(value)))
        .collect::<Vec<_>>()
        .join(" ");
    writeln!(f, "\t{} [{}]", statement, list)
}

fn quote(id: &str) -> String {
    format!("\"{}\"", id.replace('\\', "\\\\").replace('"', "\\\""))
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::GraphOptions;

    #[test]
    fn test_dot_source() {
        let mut graph = DependencyGraph::new(GraphOptions::default());
        graph.add_node("flask", Some("2.0.0".to_string()));
        graph.add_edge("flask", "werkzeug", ">=2.0".to_string());

        let expected = "strict digraph \"vetch-graph\" {\n\
            \tnode [\"shape\"=\"box3d\"]\n\
            \tedge [\"fontsize\"=\"10\"]\n\
            \t\"flask\" [label=<<table border=\"0\"><tr><td><b>flask</b></td></tr><tr><td>2.0.0</td></tr></table>>]\n\
            \t\"werkzeug\"\n\
            \t\"flask\" -> \"werkzeug\" [label=\">=2.0\"]\n\
            }\n";
        assert_eq!(graph.to_string(), expected);
    }

    #[test]
    fn test_non_strict_with_graph_attributes() {
        let mut options = GraphOptions {
            strict: false,
            ..GraphOptions::default()
        };
        options.graph_attributes.insert("rankdir".to_string(), "LR".to_string());

        let source = DependencyGraph::new(options).to_string();
        assert!(source.starts_with("digraph \"vetch-graph\" {\n\tgraph [\"rankdir\"=\"LR\"]\n"));
    }

    #[test]
    fn test_escaping() {
        assert_eq!(quote("say \"hi\""), "\"say \\\"hi\\\"\"");
        assert_eq!(escape_html("<b>&"), "&lt;b&gt;&amp;");
    }
}
