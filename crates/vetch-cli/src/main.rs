//! # vetch-cli
//!
//! Dependency analysis for installed Python environments.
//!
//! This is the main entry point for the vetch CLI tool. It handles command parsing,
//! sets up logging and error handling, and dispatches to the appropriate command handlers.

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use indexmap::IndexMap;
use std::process::ExitCode;
use tracing::{debug, error};
use vetch_config::{CliOverrides, ConfigLoader};
use vetch_core::VetchError;

mod commands;
mod output;

use commands::CommandContext;
use output::errors::ErrorFormatter;

/// Python dependency management utility
#[derive(Parser)]
#[command(name = "vetch", version, about = "Python dependency management utility")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Show all packages: no ignore list and no default requirement files
    #[arg(short, long, global = true)]
    pub all: bool,

    /// Ignore a dependency (repeatable, replaces the configured ignore list)
    #[arg(short, long = "ignore", value_name = "PACKAGE", global = true)]
    pub ignore: Vec<String>,

    /// site-packages directory to read (repeatable)
    #[arg(long = "site-packages", value_name = "DIR", global = true)]
    pub site_packages: Vec<Utf8PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Requirement file flag shared by several commands
#[derive(Args, Debug, Clone, Default)]
pub struct RequirementsArgs {
    /// Requirement file(s)
    #[arg(short, long = "requirements", value_name = "FILE")]
    pub requirements: Vec<Utf8PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print configuration
    Config,
    /// Check for conflicts in required dependencies
    Conflicts,
    /// Check for cyclic dependencies
    Cyclic,
    /// List all dependencies
    List {
        #[command(flatten)]
        files: RequirementsArgs,
    },
    /// Show dependency tree
    Tree {
        /// Show dependency tree for specified package
        #[arg(short, long)]
        package: Option<String>,
        #[command(flatten)]
        files: RequirementsArgs,
    },
    /// Show missing dependencies
    Missing {
        #[command(flatten)]
        files: RequirementsArgs,
    },
    /// Run a complete list of checks
    Check {
        #[command(flatten)]
        files: RequirementsArgs,
        /// Lock file(s)
        #[arg(short, long = "lock", value_name = "FILE")]
        lock: Vec<Utf8PathBuf>,
        /// Packages not required cause an error
        #[arg(short, long)]
        strict: bool,
    },
    /// Display or generate lock file from environment and/or requirements file(s)
    Lock {
        #[command(flatten)]
        files: RequirementsArgs,
        /// Generate lock file
        #[arg(short, long)]
        save: bool,
        /// Specify path for lock file
        #[arg(short, long, value_name = "FILE")]
        file: Option<Utf8PathBuf>,
    },
    /// Validate requirements and lock files
    Validate {
        #[command(flatten)]
        files: RequirementsArgs,
        /// Lock file(s)
        #[arg(short, long = "lock", value_name = "FILE")]
        lock: Vec<Utf8PathBuf>,
        /// Packages not required cause an error
        #[arg(short, long)]
        strict: bool,
    },
    /// Export a dependency graph using graphviz
    Graph(GraphArgs),
}

/// Options of the `graph` command
#[derive(Args, Debug, Clone, Default)]
pub struct GraphArgs {
    /// Rendering should merge multi-edges
    #[arg(short, long)]
    pub strict: bool,
    /// Render graph
    #[arg(short, long)]
    pub render: bool,
    /// Display graph after rendering
    #[arg(long)]
    pub view: bool,
    /// Graph name
    #[arg(long)]
    pub name: Option<String>,
    /// Export filename
    #[arg(long)]
    pub filename: Option<String>,
    /// Export format
    #[arg(long)]
    pub format: Option<String>,
    /// Rendering engine
    #[arg(long)]
    pub engine: Option<String>,
    /// Graph attribute (repeatable)
    #[arg(long = "graph-attr", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub graph_attr: Vec<(String, String)>,
    /// Node attribute (repeatable)
    #[arg(long = "node-attr", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub node_attr: Vec<(String, String)>,
    /// Edge attribute (repeatable)
    #[arg(long = "edge-attr", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub edge_attr: Vec<(String, String)>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose);
    setup_panic_handler();

    debug!("Starting vetch v{}", env!("CARGO_PKG_VERSION"));

    match run_cli(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            let formatter = ErrorFormatter::new();
            match err.downcast_ref::<VetchError>() {
                Some(vetch_error) => eprintln!("{}", formatter.format_error(vetch_error)),
                None => eprintln!("{}", formatter.format_simple(&format!("{:#}", err))),
            }
            ExitCode::from(1)
        }
    }
}

fn run_cli(cli: Cli) -> anyhow::Result<bool> {
    let cwd = std::env::current_dir()
        .map_err(|e| VetchError::io("Failed to get current directory", e))?;
    let cwd = Utf8PathBuf::try_from(cwd)?;

    let overrides = cli_overrides(&cli);
    let (settings, sources) = ConfigLoader::new(cwd.clone()).load(overrides)?;
    debug!("Configuration sources: {:?}", sources);

    let ctx = CommandContext::new(cwd, settings, cli.site_packages, cli.all);
    Ok(commands::dispatch_command(cli.command, &ctx)?)
}

/// Flags that take part in configuration layering
fn cli_overrides(cli: &Cli) -> CliOverrides {
    let mut overrides = CliOverrides {
        all: cli.all,
        ignore_list: (!cli.ignore.is_empty()).then(|| cli.ignore.clone()),
        ..CliOverrides::default()
    };

    if let Commands::Graph(graph) = &cli.command {
        overrides.graph_name = graph.name.clone();
        overrides.graph_filename = graph.filename.clone();
        overrides.graph_format = graph.format.clone();
        overrides.graph_engine = graph.engine.clone();
        overrides.graph_strict = graph.strict.then_some(true);
        overrides.graph_attributes = attributes(&graph.graph_attr);
        overrides.node_attributes = attributes(&graph.node_attr);
        overrides.edge_attributes = attributes(&graph.edge_attr);
    }

    overrides
}

fn attributes(pairs: &[(String, String)]) -> IndexMap<String, String> {
    pairs.iter().cloned().collect()
}

fn parse_key_value(input: &str) -> Result<(String, String), String> {
    match input.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{}'", input)),
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "vetch={level},vetch_core={level},vetch_graph={level},vetch_config={level},vetch_env={level}"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        error!("vetch encountered an unexpected error: {}", panic_info);
        eprintln!("vetch crashed! This is a bug.");
        eprintln!("Please report this at: https://github.com/vetch-dev/vetch/issues");
        eprintln!("Error: {}", panic_info);
    }));
}
