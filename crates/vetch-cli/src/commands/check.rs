//! `vetch check`

use super::{conflicts, cyclic, missing, validate, CommandContext};
use camino::Utf8PathBuf;
use tracing::debug;
use vetch_config::Check;
use vetch_core::VetchResult;

/// Run every configured check over one package snapshot. Fails when any
/// check fails, after all of them have run.
pub fn execute(
    requirements: &[Utf8PathBuf],
    locks: &[Utf8PathBuf],
    strict: bool,
    ctx: &CommandContext,
) -> VetchResult<bool> {
    let packages = ctx.packages()?;
    let mut passed = true;

    for check in &ctx.settings.checks {
        debug!("Running check {}", check);
        let ok = match check {
            Check::Validate => validate::run(&packages, requirements, locks, strict, ctx)?,
            Check::Conflicts => conflicts::run(&packages, ctx)?,
            Check::Cyclic => cyclic::run(&packages, ctx)?,
            Check::Missing => {
                let files = ctx.files(requirements, &ctx.settings.requirements_files);
                ctx.check_files(&files) && missing::run(&packages, &files, ctx)?
            }
        };
        passed &= ok;
    }

    Ok(passed)
}
