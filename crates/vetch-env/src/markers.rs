//! PEP 508 environment markers of the target interpreter

use pep508_rs::{MarkerEnvironment, MarkerEnvironmentBuilder};
use serde::Deserialize;
use std::process::Command;
use tracing::debug;
use vetch_core::{VetchError, VetchResult};

const MARKER_SCRIPT: &str = r#"
import json, os, platform, sys
def full(info):
    version = "{0.major}.{0.minor}.{0.micro}".format(info)
    if info.releaselevel != "final":
        version += info.releaselevel[0] + str(info.serial)
    return version
print(json.dumps({
    "implementation_name": sys.implementation.name,
    "implementation_version": full(sys.implementation.version),
    "os_name": os.name,
    "platform_machine": platform.machine(),
    "platform_python_implementation": platform.python_implementation(),
    "platform_release": platform.release(),
    "platform_system": platform.system(),
    "platform_version": platform.version(),
    "python_full_version": platform.python_version(),
    "python_version": ".".join(platform.python_version_tuple()[:2]),
    "sys_platform": sys.platform,
}))
"#;

/// Marker values as reported by an interpreter
#[derive(Debug, Clone, Deserialize)]
pub struct InterpreterMarkers {
    pub implementation_name: String,
    pub implementation_version: String,
    pub os_name: String,
    pub platform_machine: String,
    pub platform_python_implementation: String,
    pub platform_release: String,
    pub platform_system: String,
    pub platform_version: String,
    pub python_full_version: String,
    pub python_version: String,
    pub sys_platform: String,
}

impl InterpreterMarkers {
    /// Ask `interpreter` for its marker values
    pub fn query(interpreter: &str) -> VetchResult<Self> {
        let output = Command::new(interpreter)
            .arg("-c")
            .arg(MARKER_SCRIPT)
            .output()
            .map_err(|e| VetchError::io(format!("Failed to run '{}'", interpreter), e))?;

        if !output.status.success() {
            return Err(marker_error(
                interpreter,
                String::from_utf8_lossy(&output.stderr).trim(),
            ));
        }

        let markers = Self::from_json(&output.stdout, interpreter)?;
        debug!(
            "{} reports Python {} on {}",
            interpreter, markers.python_full_version, markers.sys_platform
        );
        Ok(markers)
    }

    fn from_json(json: &[u8], origin: &str) -> VetchResult<Self> {
        serde_json::from_slice(json).map_err(|e| marker_error(origin, e))
    }

    /// Marker environment usable for evaluating requirement markers
    pub fn to_environment(&self) -> VetchResult<MarkerEnvironment> {
        MarkerEnvironment::try_from(MarkerEnvironmentBuilder {
            implementation_name: &self.implementation_name,
            implementation_version: &self.implementation_version,
            os_name: &self.os_name,
            platform_machine: &self.platform_machine,
            platform_python_implementation: &self.platform_python_implementation,
            platform_release: &self.platform_release,
            platform_system: &self.platform_system,
            platform_version: &self.platform_version,
            python_full_version: &self.python_full_version,
            python_version: &self.python_version,
            sys_platform: &self.sys_platform,
        })
        .map_err(|e| marker_error("interpreter markers", e))
    }
}

fn marker_error(origin: &str, reason: impl std::fmt::Display) -> VetchError {
    VetchError::Metadata {
        path: origin.to_string(),
        message: format!("cannot read environment markers: {}", reason),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vetch_core::RequirementSpec;

    const LINUX: &str = r##"{
        "implementation_name": "cpython",
        "implementation_version": "3.11.4",
        "os_name": "posix",
        "platform_machine": "x86_64",
        "platform_python_implementation": "CPython",
        "platform_release": "6.1.0",
        "platform_system": "Linux",
        "platform_version": "#1 SMP",
        "python_full_version": "3.11.4",
        "python_version": "3.11",
        "sys_platform": "linux"
    }"##;

    #[test]
    fn test_interpreter_output_into_environment() {
        let markers = InterpreterMarkers::from_json(LINUX.as_bytes(), "python3").unwrap();
        assert_eq!(markers.sys_platform, "linux");

        let env = markers.to_environment().unwrap();
        let windows_only = RequirementSpec::parse("pywin32>=300; sys_platform == 'win32'").unwrap();
        let modern = RequirementSpec::parse("tomli; python_version < '3.12'").unwrap();

        assert!(!windows_only.applies_to(Some(&env)));
        assert!(modern.applies_to(Some(&env)));
    }

    #[test]
    fn test_malformed_output_is_metadata_error() {
        let err = InterpreterMarkers::from_json(b"not json", "python3").unwrap_err();
        assert!(matches!(err, VetchError::Metadata { .. }));
    }

    #[test]
    fn test_invalid_version_is_rejected() {
        let mut markers = InterpreterMarkers::from_json(LINUX.as_bytes(), "python3").unwrap();
        markers.python_full_version = "three".to_string();
        assert!(markers.to_environment().is_err());
    }

    #[test]
    fn test_missing_interpreter_is_io_error() {
        let err = InterpreterMarkers::query("vetch-no-such-python").unwrap_err();
        assert!(matches!(err, VetchError::Io { .. }));
    }
}
