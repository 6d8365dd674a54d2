//! `vetch config`

use super::CommandContext;
use vetch_core::VetchResult;

/// Print the effective configuration as JSON
pub fn execute(ctx: &CommandContext) -> VetchResult<bool> {
    ctx.output.print(&ctx.settings.to_json()?);
    Ok(true)
}
