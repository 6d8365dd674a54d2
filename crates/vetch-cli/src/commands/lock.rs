//! `vetch lock`

use super::CommandContext;
use crate::output::messages;
use camino::{Utf8Path, Utf8PathBuf};
use vetch_config::{format_for, save_lock_file};
use vetch_core::{VersionData, VetchResult};
use vetch_graph::locked_requirements;

/// Print or save requirements pinned to the installed versions
pub fn execute(
    requirements: &[Utf8PathBuf],
    save: bool,
    file: Option<&Utf8Path>,
    ctx: &CommandContext,
) -> VetchResult<bool> {
    let files = ctx.files(requirements, &ctx.settings.requirements_files);
    if !ctx.check_files(&files) {
        return Ok(false);
    }

    let requirements = ctx.read_requirements(&files)?;
    let packages = ctx.packages()?;
    let locked = locked_requirements(&packages, &requirements, ctx.environment()?);

    if save {
        let path = file.unwrap_or(ctx.settings.lock_file_path.as_path());
        let path = if path.is_relative() {
            ctx.cwd.join(path)
        } else {
            path.to_path_buf()
        };

        let format = format_for(&ctx.settings.format)?;
        save_lock_file(format.as_ref(), &locked, &path)?;
        ctx.output.success(&messages::lock_exported(path.as_str()));
        return Ok(true);
    }

    for requirement in &locked {
        let key = ctx.output.package(&requirement.key);
        match requirement.version.id() {
            Some(specifier) => ctx.output.print(&format!("{}{}", key, specifier)),
            None => ctx.output.print(&key),
        }
    }
    Ok(true)
}
