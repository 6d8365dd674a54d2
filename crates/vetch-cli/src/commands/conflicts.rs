//! `vetch conflicts`

use super::CommandContext;
use crate::output::{messages, Table};
use vetch_core::{PackageCollection, VersionData, VetchResult};
use vetch_graph::conflicting_dependencies;

pub fn execute(ctx: &CommandContext) -> VetchResult<bool> {
    let packages = ctx.packages()?;
    run(&packages, ctx)
}

/// Report installed versions that fail a requirement of another package
pub fn run(packages: &PackageCollection, ctx: &CommandContext) -> VetchResult<bool> {
    let conflicts = conflicting_dependencies(packages, ctx.environment()?, &ctx.conflict_policy()?);

    let mut table = Table::new([
        messages::PACKAGE,
        messages::INSTALLED,
        messages::REQUIRED,
        messages::REQUIRED_BY,
    ]);
    for conflict in &conflicts {
        let installed = ctx.version_text(conflict.installed.id());
        for (requirer, specifier) in &conflict.required_by {
            table.row([
                conflict.requirement.key.as_str(),
                installed.as_str(),
                ctx.specifier_text(specifier).as_str(),
                requirer.key.as_str(),
            ]);
        }
    }

    if table.is_empty() {
        ctx.output.success(messages::CONFLICTS_OK);
        return Ok(true);
    }

    ctx.output.error(messages::CONFLICTS_FOUND);
    ctx.output.table(&table);
    Ok(false)
}
