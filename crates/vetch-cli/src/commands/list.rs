//! `vetch list`

use super::CommandContext;
use crate::output::{messages, Table};
use camino::Utf8PathBuf;
use vetch_core::VetchResult;
use vetch_graph::dependency_list;

/// List installed packages, limited to what the requirement files need
/// when any are read
pub fn execute(requirements: &[Utf8PathBuf], ctx: &CommandContext) -> VetchResult<bool> {
    let files = ctx.files(requirements, &ctx.settings.requirements_files);
    if !ctx.check_files(&files) {
        return Ok(false);
    }

    let requirements = ctx.read_requirements(&files)?;
    let packages = dependency_list(&ctx.packages()?, &requirements, ctx.environment()?);

    let mut table = Table::new([messages::PACKAGE, messages::INSTALLED]);
    for package in &packages {
        table.row([package.key.clone(), ctx.version_text(package.version_id())]);
    }

    if table.is_empty() {
        ctx.output.info(messages::PACKAGES_NOT_FOUND);
    } else {
        ctx.output.table(&table);
    }
    Ok(true)
}
