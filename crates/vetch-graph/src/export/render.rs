//! Rendering graphs to files through an external engine.

use super::DependencyGraph;
use camino::Utf8PathBuf;
use std::io::Write;
use std::process::{Command, Stdio};
use tracing::{debug, info};
use vetch_core::{VetchError, VetchResult};

/// Turns a dependency graph into a file on disk
pub trait GraphRenderer {
    /// Render the graph and return the path of the written file
    fn render(&self, graph: &DependencyGraph) -> VetchResult<Utf8PathBuf>;
}

/// Renders by piping DOT source into the Graphviz `dot` binary
#[derive(Debug, Clone)]
pub struct GraphvizRenderer {
    program: String,
}

impl GraphvizRenderer {
    pub fn new() -> Self {
        Self {
            program: "dot".to_string(),
        }
    }

    /// Use a different Graphviz executable
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for GraphvizRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphRenderer for GraphvizRenderer {
    fn render(&self, graph: &DependencyGraph) -> VetchResult<Utf8PathBuf> {
        let options = graph.options();
        let output = options.output_path();

        if let Some(parent) = output.parent().filter(|parent| !parent.as_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                VetchError::graph_render(format!("cannot create directory {}", parent), e)
            })?;
        }

        debug!(
            "Rendering {} with {} -K{} -T{}",
            output, self.program, options.engine, options.format
        );

        let mut child = Command::new(&self.program)
            .arg(format!("-K{}", options.engine))
            .arg(format!("-T{}", options.format))
            .arg("-o")
            .arg(output.as_std_path())
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| VetchError::graph_render(format!("cannot run '{}'", self.program), e))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(graph.to_string().as_bytes())
                .map_err(|e| VetchError::graph_render("cannot send graph to renderer", e))?;
        }

        let result = child
            .wait_with_output()
            .map_err(|e| VetchError::graph_render(format!("'{}' did not finish", self.program), e))?;

        if !result.status.success() {
            return Err(VetchError::GraphRender {
                message: String::from_utf8_lossy(&result.stderr).trim().to_string(),
                source: None,
            });
        }

        Ok(output)
    }
}

/// Render a graph and optionally open the result with the system viewer
pub fn render_graph(
    graph: &DependencyGraph,
    renderer: &dyn GraphRenderer,
    view: bool,
) -> VetchResult<Utf8PathBuf> {
    let path = renderer.render(graph)?;
    info!("Graph written to {}", path);

    if view {
        open::that(path.as_std_path())
            .map_err(|e| VetchError::graph_render(format!("cannot open {}", path), e))?;
    }

    Ok(path)
}
