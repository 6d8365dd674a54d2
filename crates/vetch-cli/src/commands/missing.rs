//! `vetch missing`

use super::CommandContext;
use crate::output::{messages, Table};
use camino::Utf8PathBuf;
use vetch_core::{PackageCollection, VetchResult};
use vetch_graph::missing_requirements;

pub fn execute(requirements: &[Utf8PathBuf], ctx: &CommandContext) -> VetchResult<bool> {
    let files = ctx.files(requirements, &ctx.settings.requirements_files);
    if !ctx.check_files(&files) {
        return Ok(false);
    }
    let packages = ctx.packages()?;
    run(&packages, &files, ctx)
}

/// Report required packages that are not installed
pub fn run(
    packages: &PackageCollection,
    files: &[Utf8PathBuf],
    ctx: &CommandContext,
) -> VetchResult<bool> {
    let requirements = ctx.read_requirements(files)?;
    let missing = missing_requirements(packages, &requirements, ctx.environment()?);

    let mut table = Table::new([messages::PACKAGE, messages::REQUIRED, messages::REQUIRED_BY]);
    for entry in &missing {
        let key = entry.requirement.key.as_str();
        if entry.required_by.is_empty() {
            table.row([
                key.to_string(),
                ctx.specifier_text(&entry.requirement.specified_version()),
                messages::REQUIREMENTS.to_string(),
            ]);
        }
        for (requirer, specifier) in &entry.required_by {
            table.row([key, &ctx.specifier_text(specifier), requirer.key.as_str()]);
        }
    }

    if table.is_empty() {
        ctx.output.success(messages::MISSING_OK);
        return Ok(true);
    }

    ctx.output.error(messages::MISSING_FOUND);
    ctx.output.table(&table);
    Ok(false)
}
