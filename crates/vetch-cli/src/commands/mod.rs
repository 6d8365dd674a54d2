//! Command implementations and dispatch logic.
//!
//! This module contains all command handlers and the central dispatch system.
//! Each command takes a `CommandContext` and reports whether its checks
//! passed; errors are reserved for failures to run at all.

use camino::{Utf8Path, Utf8PathBuf};
use std::cell::OnceCell;
use tracing::info;
use vetch_config::{format_for, load_requirements_files, missing_files, Settings};
use vetch_core::{
    ConflictPolicy, PackageCollection, RequirementCollection, StaticEnvironment, VetchResult,
};
use vetch_graph::installed_packages;

pub mod check;
pub mod config;
pub mod conflicts;
pub mod cyclic;
pub mod graph;
pub mod list;
pub mod lock;
pub mod missing;
pub mod tree;
pub mod validate;

#[cfg(test)]
mod tests;

use crate::output::{messages, OutputHandler};
use crate::Commands;

/// Shared context for all commands
pub struct CommandContext {
    pub cwd: Utf8PathBuf,
    pub output: OutputHandler,
    pub settings: Settings,
    /// `--all` was given
    pub all: bool,
    site_packages: Vec<Utf8PathBuf>,
    environment: OnceCell<StaticEnvironment>,
}

impl CommandContext {
    /// Create a new command context
    pub fn new(
        cwd: Utf8PathBuf,
        settings: Settings,
        site_packages: Vec<Utf8PathBuf>,
        all: bool,
    ) -> Self {
        Self {
            cwd,
            output: OutputHandler::new(),
            settings,
            all,
            site_packages,
            environment: OnceCell::new(),
        }
    }

    /// Installed environment, read on first use
    pub fn environment(&self) -> VetchResult<&StaticEnvironment> {
        if let Some(environment) = self.environment.get() {
            return Ok(environment);
        }
        let environment = vetch_env::load_environment(&self.site_packages)?;
        Ok(self.environment.get_or_init(|| environment))
    }

    /// Installed packages outside the ignore list
    pub fn packages(&self) -> VetchResult<PackageCollection> {
        Ok(installed_packages(self.environment()?, &self.settings.ignore_list()))
    }

    pub fn conflict_policy(&self) -> VetchResult<ConflictPolicy> {
        self.settings.conflict_policy()
    }

    /// Files named on the command line, else the configured ones; none
    /// at all with `--all`
    pub fn files(&self, explicit: &[Utf8PathBuf], configured: &[Utf8PathBuf]) -> Vec<Utf8PathBuf> {
        if self.all {
            return Vec::new();
        }
        let chosen = if explicit.is_empty() { configured } else { explicit };
        chosen.iter().map(|path| self.resolve(path)).collect()
    }

    fn resolve(&self, path: &Utf8Path) -> Utf8PathBuf {
        if path.is_relative() {
            self.cwd.join(path)
        } else {
            path.to_path_buf()
        }
    }

    /// Report every missing file; `false` when any is missing
    pub fn check_files(&self, files: &[Utf8PathBuf]) -> bool {
        let missing = missing_files(files);
        for path in &missing {
            self.output.error(&messages::file_not_found(path.as_str()));
        }
        missing.is_empty()
    }

    /// Read requirement files with the configured format and ignore list
    pub fn read_requirements(&self, files: &[Utf8PathBuf]) -> VetchResult<RequirementCollection> {
        let format = format_for(&self.settings.format)?;
        load_requirements_files(format.as_ref(), files, &self.settings.ignore_list())
    }

    /// Version text, the configured placeholder when unknown
    pub fn version_text(&self, id: Option<&str>) -> String {
        self.settings.display_version(id).to_string()
    }

    /// Constraint text, the configured placeholder when unconstrained
    pub fn specifier_text(&self, specifier: &str) -> String {
        self.settings.display_specifier(specifier).to_string()
    }
}

/// Dispatch a command to its handler
pub fn dispatch_command(command: Commands, ctx: &CommandContext) -> VetchResult<bool> {
    match command {
        Commands::Config => {
            info!("Printing configuration");
            config::execute(ctx)
        }
        Commands::Conflicts => {
            info!("Checking for conflicts");
            conflicts::execute(ctx)
        }
        Commands::Cyclic => {
            info!("Checking for cyclic dependencies");
            cyclic::execute(ctx)
        }
        Commands::List { files } => {
            info!("Listing packages (requirements: {:?})", files.requirements);
            list::execute(&files.requirements, ctx)
        }
        Commands::Tree { package, files } => {
            info!("Showing dependency tree (package: {:?})", package);
            tree::execute(package.as_deref(), &files.requirements, ctx)
        }
        Commands::Missing { files } => {
            info!("Checking for missing requirements");
            missing::execute(&files.requirements, ctx)
        }
        Commands::Check { files, lock, strict } => {
            info!("Running checks {:?} (strict: {})", ctx.settings.checks, strict);
            check::execute(&files.requirements, &lock, strict, ctx)
        }
        Commands::Lock { files, save, file } => {
            info!("Locking requirements (save: {})", save);
            lock::execute(&files.requirements, save, file.as_deref(), ctx)
        }
        Commands::Validate { files, lock, strict } => {
            info!("Validating requirement and lock files (strict: {})", strict);
            validate::execute(&files.requirements, &lock, strict, ctx)
        }
        Commands::Graph(args) => {
            info!("Building dependency graph (render: {})", args.render);
            graph::execute(args.render, args.view, ctx)
        }
    }
}
