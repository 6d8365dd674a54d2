//! `vetch cyclic`

use super::CommandContext;
use crate::output::messages;
use vetch_core::{Package, PackageCollection, VetchResult};
use vetch_graph::cyclic_dependencies;

pub fn execute(ctx: &CommandContext) -> VetchResult<bool> {
    let packages = ctx.packages()?;
    run(&packages, ctx)
}

/// Report dependency cycles, each printed closed: `a -> b -> a`
pub fn run(packages: &PackageCollection, ctx: &CommandContext) -> VetchResult<bool> {
    let cycles = cyclic_dependencies(packages, ctx.environment()?);

    if cycles.is_empty() {
        ctx.output.success(messages::CYCLIC_OK);
        return Ok(true);
    }

    ctx.output.error(messages::CYCLIC_FOUND);
    for cycle in &cycles {
        ctx.output.print(&cycle_path(cycle));
    }
    Ok(false)
}

pub(crate) fn cycle_path(cycle: &[Package]) -> String {
    cycle
        .iter()
        .chain(cycle.first())
        .map(|package| package.key.as_str())
        .collect::<Vec<_>>()
        .join(" -> ")
}
