use super::RequirementFormat;
use crate::ConfigResult;
use camino::Utf8Path;
use tracing::debug;
use vetch_core::error::VetchError;
use vetch_core::{IgnoreList, Requirement, RequirementCollection, RequirementSpec};

/// pip `requirements.txt` syntax
#[derive(Debug, Clone, Copy, Default)]
pub struct PipFormat;

impl RequirementFormat for PipFormat {
    fn name(&self) -> &'static str {
        "pip"
    }

    fn parse(&self, content: &str, origin: &Utf8Path) -> ConfigResult<RequirementCollection> {
        let mut requirements = RequirementCollection::default();

        for (index, raw) in content.lines().enumerate() {
            let line = strip_comment(raw).trim();

            if line.is_empty() {
                continue;
            }

            // -r/-c includes and --index-url style options
            if line.starts_with('-') {
                debug!("{}:{}: skipping option line '{}'", origin, index + 1, line);
                continue;
            }

            let spec = RequirementSpec::parse(line).map_err(|e| VetchError::RequirementsParse {
                path: origin.to_string(),
                line: index + 1,
                message: e.to_string(),
            })?;
            requirements.push(Requirement::from_spec(&spec, IgnoreList::default()));
        }

        Ok(requirements)
    }

    fn render_lock(&self, requirements: &RequirementCollection) -> String {
        requirements
            .sorted()
            .iter()
            .map(|requirement| format!("{}\n", requirement))
            .collect()
    }
}

/// Drop a trailing comment. A `#` only starts one at the beginning of the
/// line or after whitespace, so URL fragments survive.
fn strip_comment(line: &str) -> &str {
    let mut previous = None;
    for (index, c) in line.char_indices() {
        if c == '#' && previous.map_or(true, char::is_whitespace) {
            return &line[..index];
        }
        previous = Some(c);
    }
    line
}
