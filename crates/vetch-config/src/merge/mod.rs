//! Configuration layering, fallback logic, and environment overrides

use crate::settings::{Check, Settings};
use crate::ConfigResult;
use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexMap;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;
use vetch_core::error::VetchError;

/// Project configuration file name
pub const PROJECT_FILE: &str = "vetch.toml";

/// Python project file that may carry a `[tool.vetch]` table
pub const PYPROJECT_FILE: &str = "pyproject.toml";

/// Prefix of environment variables read as overrides
pub const ENV_PREFIX: &str = "VETCH_";

/// One configuration file as written, every field optional
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialSettings {
    pub format: Option<String>,
    pub any_version: Option<String>,
    pub checks: Option<Vec<Check>>,
    pub ignore_list: Option<Vec<String>>,
    pub allow_named_versions: Option<bool>,
    pub named_version_patterns: Option<Vec<String>>,
    pub requirements_files: Option<Vec<Utf8PathBuf>>,
    pub lock_files: Option<Vec<Utf8PathBuf>>,
    pub lock_file_path: Option<Utf8PathBuf>,
    pub graph: Option<PartialGraphSettings>,
}

/// `[graph]` table of a configuration file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialGraphSettings {
    pub name: Option<String>,
    pub filename: Option<String>,
    pub format: Option<String>,
    pub engine: Option<String>,
    pub strict: Option<bool>,
    pub attributes: IndexMap<String, String>,
    pub node_attributes: IndexMap<String, String>,
    pub edge_attributes: IndexMap<String, String>,
}

/// Values given as command line flags, the highest priority layer
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    /// Drop the ignore list and the default requirement and lock files
    pub all: bool,
    /// Replaces the configured ignore list
    pub ignore_list: Option<Vec<String>>,
    pub graph_name: Option<String>,
    pub graph_filename: Option<String>,
    pub graph_format: Option<String>,
    pub graph_engine: Option<String>,
    pub graph_strict: Option<bool>,
    pub graph_attributes: IndexMap<String, String>,
    pub node_attributes: IndexMap<String, String>,
    pub edge_attributes: IndexMap<String, String>,
}

/// Main configuration loading interface
pub struct ConfigLoader {
    /// Current working directory
    cwd: Utf8PathBuf,
}

/// Configuration layering and merging
pub struct ConfigLayering {
    /// Global configuration
    global_config: Option<PartialSettings>,
    /// Project configuration and the directory holding it
    project_config: Option<(PartialSettings, Utf8PathBuf)>,
    /// Environment overrides
    env_overrides: HashMap<String, String>,
    /// CLI flag overrides
    cli_overrides: CliOverrides,
    /// Where each applied layer came from
    sources: Vec<ConfigSource>,
}

/// Configuration source tracking
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// Built-in defaults
    Defaults,
    /// Global config file
    Global(Utf8PathBuf),
    /// Project vetch.toml file
    ProjectToml(Utf8PathBuf),
    /// `[tool.vetch]` table of a pyproject.toml file
    Pyproject(Utf8PathBuf),
    /// Environment variable
    Environment(String),
    /// CLI flag
    CommandLine,
}

impl ConfigSource {
    /// Path of the file behind this source, if any
    pub fn path(&self) -> Option<&Utf8Path> {
        match self {
            ConfigSource::Global(path)
            | ConfigSource::ProjectToml(path)
            | ConfigSource::Pyproject(path) => Some(path),
            _ => None,
        }
    }
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new(cwd: Utf8PathBuf) -> Self {
        Self { cwd }
    }

    /// Find the project configuration (walks up directory tree).
    ///
    /// In each directory `vetch.toml` is preferred over a `pyproject.toml`
    /// that carries a `[tool.vetch]` table.
    pub fn resolve_config_path(&self) -> ConfigResult<Option<ConfigSource>> {
        let mut current = Some(self.cwd.as_path());

        while let Some(dir) = current {
            let vetch_toml = dir.join(PROJECT_FILE);
            if vetch_toml.is_file() {
                return Ok(Some(ConfigSource::ProjectToml(vetch_toml)));
            }

            let pyproject = dir.join(PYPROJECT_FILE);
            if pyproject.is_file() && pyproject_table(&pyproject)?.is_some() {
                return Ok(Some(ConfigSource::Pyproject(pyproject)));
            }

            current = dir.parent();
        }

        Ok(None)
    }

    /// Load project configuration, if a project file exists
    pub fn load_project_config(&self) -> ConfigResult<Option<(PartialSettings, ConfigSource)>> {
        let Some(source) = self.resolve_config_path()? else {
            debug!("No project configuration found above {}", self.cwd);
            return Ok(None);
        };

        let config = match &source {
            ConfigSource::ProjectToml(path) => load_from_file(path)?,
            ConfigSource::Pyproject(path) => match pyproject_table(path)? {
                Some(table) => from_table(table, path)?,
                None => PartialSettings::default(),
            },
            _ => PartialSettings::default(),
        };

        debug!("Loaded project configuration from {:?}", source);
        Ok(Some((config, source)))
    }

    /// Path of the global configuration file
    pub fn global_config_path() -> Option<Utf8PathBuf> {
        let config_dir = dirs::config_dir()?;
        Utf8PathBuf::try_from(config_dir)
            .ok()
            .map(|dir| dir.join("vetch").join("config.toml"))
    }

    /// Load global configuration
    pub fn load_global_config(&self) -> ConfigResult<Option<(PartialSettings, ConfigSource)>> {
        match Self::global_config_path() {
            Some(path) if path.is_file() => {
                let config = load_from_file(&path)?;
                Ok(Some((config, ConfigSource::Global(path))))
            }
            _ => Ok(None),
        }
    }

    /// Load every layer and merge them into effective settings
    pub fn load(&self, cli_overrides: CliOverrides) -> ConfigResult<(Settings, Vec<ConfigSource>)> {
        let mut layering = ConfigLayering::new().with_cli_overrides(cli_overrides);

        if let Some((global, source)) = self.load_global_config()? {
            layering = layering.with_global(global, source);
        }
        if let Some((project, source)) = self.load_project_config()? {
            layering = layering.with_project(project, source);
        }

        layering
            .with_env_overrides(ConfigLayering::collect_env_overrides())
            .merge()
    }
}

impl ConfigLayering {
    /// Create a new configuration layering system
    pub fn new() -> Self {
        Self {
            global_config: None,
            project_config: None,
            env_overrides: HashMap::new(),
            cli_overrides: CliOverrides::default(),
            sources: vec![ConfigSource::Defaults],
        }
    }

    pub fn with_global(mut self, config: PartialSettings, source: ConfigSource) -> Self {
        self.global_config = Some(config);
        self.sources.push(source);
        self
    }

    /// Project layer; relative paths in it resolve against the file's directory
    pub fn with_project(mut self, config: PartialSettings, source: ConfigSource) -> Self {
        let base = source
            .path()
            .and_then(Utf8Path::parent)
            .map(Utf8Path::to_path_buf)
            .unwrap_or_default();
        self.project_config = Some((config, base));
        self.sources.push(source);
        self
    }

    pub fn with_env_overrides(mut self, overrides: HashMap<String, String>) -> Self {
        let mut keys: Vec<&String> = overrides.keys().collect();
        keys.sort();
        self.sources
            .extend(keys.into_iter().map(|key| ConfigSource::Environment(key.clone())));
        self.env_overrides = overrides;
        self
    }

    pub fn with_cli_overrides(mut self, overrides: CliOverrides) -> Self {
        self.cli_overrides = overrides;
        self
    }

    /// Merge every layer over the defaults, lowest priority first
    pub fn merge(self) -> ConfigResult<(Settings, Vec<ConfigSource>)> {
        let mut sources = self.sources;
        let mut settings = Settings::default();

        if let Some(global) = self.global_config {
            apply_partial(&mut settings, global, None);
        }
        if let Some((project, base)) = self.project_config {
            apply_partial(&mut settings, project, Some(&base));
        }

        Self::apply_env_overrides(&mut settings, &self.env_overrides)?;

        if Self::apply_cli_overrides(&mut settings, self.cli_overrides) {
            sources.push(ConfigSource::CommandLine);
        }

        settings.validate()?;
        Ok((settings, sources))
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(
        settings: &mut Settings,
        overrides: &HashMap<String, String>,
    ) -> ConfigResult<()> {
        for (key, value) in overrides {
            match key.as_str() {
                "VETCH_FORMAT" => settings.format = value.clone(),
                "VETCH_ANY_VERSION" => settings.any_version = value.clone(),
                "VETCH_CHECKS" => {
                    settings.checks = split_list(value)
                        .iter()
                        .map(|check| check.parse())
                        .collect::<ConfigResult<_>>()?;
                }
                "VETCH_IGNORE_LIST" => settings.ignore_list = split_list(value),
                "VETCH_ALLOW_NAMED_VERSIONS" => {
                    settings.allow_named_versions = parse_bool(key, value)?;
                }
                "VETCH_NAMED_VERSION_PATTERNS" => {
                    settings.named_version_patterns = split_list(value);
                }
                "VETCH_REQUIREMENTS_FILES" => {
                    settings.requirements_files =
                        split_list(value).into_iter().map(Utf8PathBuf::from).collect();
                }
                "VETCH_LOCK_FILES" => {
                    settings.lock_files =
                        split_list(value).into_iter().map(Utf8PathBuf::from).collect();
                }
                "VETCH_LOCK_FILE_PATH" => settings.lock_file_path = Utf8PathBuf::from(value),
                "VETCH_GRAPH_NAME" => settings.graph.name = value.clone(),
                "VETCH_GRAPH_FILENAME" => settings.graph.filename = Some(value.clone()),
                "VETCH_GRAPH_FORMAT" => settings.graph.format = value.clone(),
                "VETCH_GRAPH_ENGINE" => settings.graph.engine = value.clone(),
                "VETCH_GRAPH_STRICT" => settings.graph.strict = parse_bool(key, value)?,
                _ => {
                    debug!("Ignoring unknown environment override {}", key);
                }
            }
        }

        Ok(())
    }

    /// Apply CLI flag overrides, returning whether any flag changed a value
    fn apply_cli_overrides(settings: &mut Settings, overrides: CliOverrides) -> bool {
        let mut applied = false;

        if overrides.all {
            settings.ignore_list.clear();
            settings.requirements_files.clear();
            settings.lock_files.clear();
            applied = true;
        } else if let Some(ignore_list) = overrides.ignore_list {
            settings.ignore_list = ignore_list;
            applied = true;
        }

        let graph = &mut settings.graph;
        for (target, value) in [
            (&mut graph.name, overrides.graph_name),
            (&mut graph.format, overrides.graph_format),
            (&mut graph.engine, overrides.graph_engine),
        ] {
            if let Some(value) = value {
                *target = value;
                applied = true;
            }
        }
        if let Some(filename) = overrides.graph_filename {
            graph.filename = Some(filename);
            applied = true;
        }
        if let Some(strict) = overrides.graph_strict {
            graph.strict = strict;
            applied = true;
        }

        applied |= !overrides.graph_attributes.is_empty()
            || !overrides.node_attributes.is_empty()
            || !overrides.edge_attributes.is_empty();
        graph.attributes.extend(overrides.graph_attributes);
        graph.node_attributes.extend(overrides.node_attributes);
        graph.edge_attributes.extend(overrides.edge_attributes);

        applied
    }

    /// Collect environment variable overrides
    pub fn collect_env_overrides() -> HashMap<String, String> {
        std::env::vars()
            .filter(|(key, _)| key.starts_with(ENV_PREFIX))
            .collect()
    }
}

impl Default for ConfigLayering {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a vetch.toml style file
pub fn load_from_file(path: &Utf8Path) -> ConfigResult<PartialSettings> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| VetchError::io(format!("Failed to read {}", path), e))?;
    parse_str(&content, path)
}

/// Parse configuration from TOML text
pub fn parse_str(content: &str, origin: &Utf8Path) -> ConfigResult<PartialSettings> {
    toml::from_str(content).map_err(|e| VetchError::ConfigParse {
        message: format!("{}: {}", origin, e),
    })
}

fn from_table(table: toml::Value, origin: &Utf8Path) -> ConfigResult<PartialSettings> {
    table.try_into().map_err(|e| VetchError::ConfigParse {
        message: format!("{} [tool.vetch]: {}", origin, e),
    })
}

/// `[tool.vetch]` table of a pyproject.toml file
fn pyproject_table(path: &Utf8Path) -> ConfigResult<Option<toml::Value>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| VetchError::io(format!("Failed to read {}", path), e))?;
    let document: toml::Table = content.parse().map_err(|e| VetchError::ConfigParse {
        message: format!("{}: {}", path, e),
    })?;

    Ok(document
        .get("tool")
        .and_then(|tool| tool.get("vetch"))
        .cloned())
}

fn apply_partial(settings: &mut Settings, partial: PartialSettings, base: Option<&Utf8Path>) {
    let resolve = |path: Utf8PathBuf| match base {
        Some(base) if path.is_relative() => base.join(path),
        _ => path,
    };

    if let Some(format) = partial.format {
        settings.format = format;
    }
    if let Some(any_version) = partial.any_version {
        settings.any_version = any_version;
    }
    if let Some(checks) = partial.checks {
        settings.checks = checks;
    }
    if let Some(ignore_list) = partial.ignore_list {
        settings.ignore_list = ignore_list;
    }
    if let Some(allow) = partial.allow_named_versions {
        settings.allow_named_versions = allow;
    }
    if let Some(patterns) = partial.named_version_patterns {
        settings.named_version_patterns = patterns;
    }
    if let Some(files) = partial.requirements_files {
        settings.requirements_files = files.into_iter().map(resolve).collect();
    }
    if let Some(files) = partial.lock_files {
        settings.lock_files = files.into_iter().map(resolve).collect();
    }
    if let Some(path) = partial.lock_file_path {
        settings.lock_file_path = resolve(path);
    }

    if let Some(graph) = partial.graph {
        let target = &mut settings.graph;
        if let Some(name) = graph.name {
            target.name = name;
        }
        if graph.filename.is_some() {
            target.filename = graph.filename;
        }
        if let Some(format) = graph.format {
            target.format = format;
        }
        if let Some(engine) = graph.engine {
            target.engine = engine;
        }
        if let Some(strict) = graph.strict {
            target.strict = strict;
        }
        target.attributes.extend(graph.attributes);
        target.node_attributes.extend(graph.node_attributes);
        target.edge_attributes.extend(graph.edge_attributes);
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

fn parse_bool(field: &str, value: &str) -> ConfigResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(VetchError::ConfigValidation {
            field: field.to_string(),
            reason: format!("Invalid boolean '{}'", value),
        }),
    }
}
