//! Locating `site-packages` directories

use crate::markers::InterpreterMarkers;
use camino::{Utf8Path, Utf8PathBuf};
use pep508_rs::MarkerEnvironment;
use std::process::Command;
use tracing::debug;
use vetch_core::{VetchError, VetchResult};

const PURELIB_SCRIPT: &str =
    "import sysconfig; p = sysconfig.get_paths(); print(p['purelib']); print(p['platlib'])";

/// Where to look for installed distributions, highest priority first
#[derive(Debug, Clone)]
pub struct SiteDiscovery {
    /// Directories given explicitly
    pub explicit: Vec<Utf8PathBuf>,
    /// Active virtual environment root
    pub virtual_env: Option<Utf8PathBuf>,
    /// Interpreter asked as a last resort
    pub interpreter: String,
}

impl SiteDiscovery {
    /// Discovery from the process environment
    pub fn from_env(explicit: Vec<Utf8PathBuf>) -> Self {
        let virtual_env = std::env::var("VIRTUAL_ENV")
            .ok()
            .filter(|value| !value.is_empty())
            .map(Utf8PathBuf::from);

        Self {
            explicit,
            virtual_env,
            interpreter: "python3".to_string(),
        }
    }

    /// Resolve the site-packages directories to scan
    pub fn discover(&self) -> VetchResult<Vec<Utf8PathBuf>> {
        if !self.explicit.is_empty() {
            for path in &self.explicit {
                if !path.is_dir() {
                    return Err(VetchError::FileNotFound {
                        path: path.to_string(),
                    });
                }
            }
            debug!("Using site-packages given on the command line");
            return Ok(self.explicit.clone());
        }

        if let Some(venv) = &self.virtual_env {
            let found = virtual_env_site_packages(venv);
            if !found.is_empty() {
                debug!("Using site-packages of virtual environment {}", venv);
                return Ok(found);
            }
            debug!("No site-packages found under {}", venv);
        }

        let found = self.interpreter_site_packages()?;
        if found.is_empty() {
            return Err(VetchError::ConfigValidation {
                field: "site-packages".to_string(),
                reason: format!("'{}' reported no site-packages directory", self.interpreter),
            });
        }

        debug!("Using site-packages reported by {}", self.interpreter);
        Ok(found)
    }

    /// Interpreter of the active virtual environment, else `interpreter`
    pub fn target_interpreter(&self) -> String {
        self.virtual_env
            .as_deref()
            .and_then(virtual_env_interpreter)
            .map(|path| path.to_string())
            .unwrap_or_else(|| self.interpreter.clone())
    }

    /// Environment markers reported by the target interpreter
    pub fn marker_environment(&self) -> VetchResult<MarkerEnvironment> {
        InterpreterMarkers::query(&self.target_interpreter())?.to_environment()
    }

    fn interpreter_site_packages(&self) -> VetchResult<Vec<Utf8PathBuf>> {
        let output = Command::new(&self.interpreter)
            .arg("-c")
            .arg(PURELIB_SCRIPT)
            .output()
            .map_err(|e| VetchError::io(format!("Failed to run '{}'", self.interpreter), e))?;

        if !output.status.success() {
            return Err(VetchError::ConfigValidation {
                field: "site-packages".to_string(),
                reason: format!(
                    "'{}' failed: {}",
                    self.interpreter,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }

        let mut paths: Vec<Utf8PathBuf> = Vec::new();
        for line in String::from_utf8_lossy(&output.stdout).lines().map(str::trim) {
            let path = Utf8PathBuf::from(line);
            if !line.is_empty() && path.is_dir() && !paths.contains(&path) {
                paths.push(path);
            }
        }
        Ok(paths)
    }
}

/// `bin/python` (POSIX) or `Scripts/python.exe` (Windows)
fn virtual_env_interpreter(venv: &Utf8Path) -> Option<Utf8PathBuf> {
    [venv.join("bin").join("python"), venv.join("Scripts").join("python.exe")]
        .into_iter()
        .find(|path| path.is_file())
}

/// `lib/python*/site-packages` (POSIX) or `Lib/site-packages` (Windows)
fn virtual_env_site_packages(venv: &Utf8Path) -> Vec<Utf8PathBuf> {
    let pattern = venv.join("lib").join("python*").join("site-packages");
    let mut found: Vec<Utf8PathBuf> = glob::glob(pattern.as_str())
        .into_iter()
        .flatten()
        .filter_map(Result::ok)
        .filter_map(|path| Utf8PathBuf::try_from(path).ok())
        .filter(|path| path.is_dir())
        .collect();
    found.sort();

    let windows = venv.join("Lib").join("site-packages");
    if found.is_empty() && windows.is_dir() {
        found.push(windows);
    }

    found
}
