//! `vetch graph`

use super::CommandContext;
use crate::output::messages;
use vetch_core::{VetchError, VetchResult};
use vetch_graph::{create_dependency_graph, render_graph, GraphOptions, GraphvizRenderer};

/// Print the DOT source of the dependency graph, or render it to a file
pub fn execute(render: bool, view: bool, ctx: &CommandContext) -> VetchResult<bool> {
    let packages = ctx.packages()?;
    let graph = create_dependency_graph(&packages, graph_options(ctx));

    if !render {
        ctx.output.print(&graph.to_string());
        return Ok(true);
    }

    match render_graph(&graph, &GraphvizRenderer::new(), view) {
        Ok(path) => {
            ctx.output.success(&messages::graph_exported(path.as_str()));
            Ok(true)
        }
        Err(err @ VetchError::GraphRender { .. }) => {
            ctx.output.error(&err.to_string());
            Ok(false)
        }
        Err(err) => Err(err),
    }
}

pub(crate) fn graph_options(ctx: &CommandContext) -> GraphOptions {
    let graph = &ctx.settings.graph;
    GraphOptions {
        name: graph.name.clone(),
        filename: graph.filename.clone(),
        format: graph.format.clone(),
        engine: graph.engine.clone(),
        strict: graph.strict,
        graph_attributes: graph.attributes.clone(),
        node_attributes: graph.node_attributes.clone(),
        edge_attributes: graph.edge_attributes.clone(),
        any_version: ctx.settings.any_version.clone(),
    }
}
