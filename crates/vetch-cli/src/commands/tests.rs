//! Unit tests for CLI commands.

use super::*;
use crate::output::OutputHandler;
use tempfile::TempDir;
use vetch_core::{Distribution, VetchError};

/// Create a temporary directory for testing
fn create_temp_dir() -> (TempDir, Utf8PathBuf) {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let path = Utf8PathBuf::try_from(dir.path().to_path_buf()).expect("temp dir is UTF-8");
    (dir, path)
}

/// ```text
/// app 1.0.0   -> web>=2.0, cli
/// web 1.5.0   -> util==1.0.0, missing-dep
/// cli 3.0.0   -> util>=1.0.0
/// util 1.0.0
/// loop-a 1.0  -> loop-b
/// loop-b 1.0  -> loop-a
/// pip 23.2
/// ```
fn environment() -> StaticEnvironment {
    [
        Distribution::new("app", "1.0.0")
            .requiring("web>=2.0")
            .unwrap()
            .requiring("cli")
            .unwrap(),
        Distribution::new("web", "1.5.0")
            .requiring("util==1.0.0")
            .unwrap()
            .requiring("missing-dep")
            .unwrap(),
        Distribution::new("cli", "3.0.0").requiring("util>=1.0.0").unwrap(),
        Distribution::new("util", "1.0.0"),
        Distribution::new("loop-a", "1.0").requiring("loop-b").unwrap(),
        Distribution::new("loop-b", "1.0").requiring("loop-a").unwrap(),
        Distribution::new("pip", "23.2"),
    ]
    .into_iter()
    .collect()
}

/// Create a test command context in a temporary directory
fn create_test_context(cwd: &Utf8Path, env: StaticEnvironment) -> CommandContext {
    CommandContext {
        cwd: cwd.to_path_buf(),
        output: OutputHandler::capture(),
        settings: Settings::default(),
        all: false,
        site_packages: Vec::new(),
        environment: OnceCell::from(env),
    }
}

/// Cells of every table row whose first cell is `key`
fn table_rows(output: &str, key: &str) -> Vec<Vec<String>> {
    output
        .lines()
        .map(|line| line.split('|').map(|cell| cell.trim().to_string()).collect::<Vec<_>>())
        .filter(|cells| cells.len() > 1 && cells[0] == key)
        .collect()
}

fn write(dir: &Utf8Path, name: &str, content: &str) -> Utf8PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_config_prints_json() {
    let (_dir, cwd) = create_temp_dir();
    let ctx = create_test_context(&cwd, environment());

    assert!(config::execute(&ctx).unwrap());
    let output = ctx.output.captured();
    assert!(output.contains("\"format\": \"pip\""));
    assert!(output.contains("\"ignore_list\""));
}

#[test]
fn test_conflicts_reported() {
    let (_dir, cwd) = create_temp_dir();
    let ctx = create_test_context(&cwd, environment());

    assert!(!conflicts::execute(&ctx).unwrap());
    let output = ctx.output.captured();
    assert!(output.contains("Conflicting packages found"));
    assert_eq!(table_rows(&output, "web"), vec![vec!["web", "1.5.0", ">=2.0", "app"]]);
}

#[test]
fn test_no_conflicts() {
    let (_dir, cwd) = create_temp_dir();
    let env: StaticEnvironment = [
        Distribution::new("six", "1.16.0"),
        Distribution::new("attrs", "23.1.0").requiring("six>=1.0").unwrap(),
    ]
    .into_iter()
    .collect();
    let ctx = create_test_context(&cwd, env);

    assert!(conflicts::execute(&ctx).unwrap());
    assert!(ctx.output.captured().contains("No conflicts found"));
}

#[test]
fn test_cyclic_prints_closed_paths() {
    let (_dir, cwd) = create_temp_dir();
    let ctx = create_test_context(&cwd, environment());

    assert!(!cyclic::execute(&ctx).unwrap());
    let output = ctx.output.captured();
    assert!(output.contains("Cyclic dependencies found"));
    assert!(output.contains("loop-a -> loop-b -> loop-a"));
}

#[test]
fn test_list_filters_by_requirements() {
    let (_dir, cwd) = create_temp_dir();
    let requirements = write(&cwd, "requirements.txt", "cli\n");
    let ctx = create_test_context(&cwd, environment());

    assert!(list::execute(&[requirements], &ctx).unwrap());
    let output = ctx.output.captured();
    assert!(output.contains("cli"));
    assert!(output.contains("util"));
    assert!(!output.contains("web"));
    assert!(!output.contains("pip"));
}

#[test]
fn test_missing_default_file_aborts() {
    let (_dir, cwd) = create_temp_dir();
    let ctx = create_test_context(&cwd, environment());

    assert!(!list::execute(&[], &ctx).unwrap());
    assert!(ctx.output.captured().contains("requirements.txt\" not found"));
}

#[test]
fn test_all_skips_default_files() {
    let (_dir, cwd) = create_temp_dir();
    let mut ctx = create_test_context(&cwd, environment());
    ctx.all = true;
    ctx.settings.ignore_list.clear();

    assert!(list::execute(&[], &ctx).unwrap());
    assert!(ctx.output.captured().contains("pip"));
}

#[test]
fn test_tree_for_single_package() {
    let (_dir, cwd) = create_temp_dir();
    let requirements = write(&cwd, "requirements.txt", "");
    let ctx = create_test_context(&cwd, environment());

    assert!(tree::execute(Some("CLI"), &[requirements], &ctx).unwrap());
    let output = ctx.output.captured();
    assert_eq!(
        output,
        "cli [Installed: 3.0.0]\n  util [Installed: 1.0.0 | Required: >=1.0.0]"
    );
}

#[test]
fn test_tree_marks_cycles() {
    let (_dir, cwd) = create_temp_dir();
    let requirements = write(&cwd, "requirements.txt", "");
    let ctx = create_test_context(&cwd, environment());

    assert!(tree::execute(Some("loop-a"), &[requirements], &ctx).unwrap());
    let output = ctx.output.captured();
    assert!(output.contains("    loop-a [Installed: 1.0 | Required: Any] (cyclic)"));
}

#[test]
fn test_tree_unknown_package() {
    let (_dir, cwd) = create_temp_dir();
    let requirements = write(&cwd, "requirements.txt", "");
    let ctx = create_test_context(&cwd, environment());

    let err = tree::execute(Some("nope"), &[requirements], &ctx).unwrap_err();
    assert!(matches!(err, VetchError::PackageNotFound { .. }));
}

#[test]
fn test_missing_requirements() {
    let (_dir, cwd) = create_temp_dir();
    let requirements = write(&cwd, "requirements.txt", "app\nnot-installed>=1.0\n");
    let ctx = create_test_context(&cwd, environment());

    assert!(!missing::execute(&[requirements], &ctx).unwrap());
    let output = ctx.output.captured();
    assert!(output.contains("Missing dependencies found"));
    assert_eq!(
        table_rows(&output, "not-installed"),
        vec![vec!["not-installed", ">=1.0", "Requirements"]]
    );
    assert_eq!(
        table_rows(&output, "missing-dep"),
        vec![vec!["missing-dep", "Any", "web"]]
    );
}

#[test]
fn test_any_version_text_is_configurable() {
    let (_dir, cwd) = create_temp_dir();
    let requirements = write(&cwd, "requirements.txt", "app\nnot-installed\n");
    let mut ctx = create_test_context(&cwd, environment());
    ctx.settings.any_version = "*".to_string();

    assert!(!missing::execute(&[requirements.clone()], &ctx).unwrap());
    let output = ctx.output.captured();
    assert_eq!(
        table_rows(&output, "not-installed"),
        vec![vec!["not-installed", "*", "Requirements"]]
    );
    assert_eq!(table_rows(&output, "missing-dep"), vec![vec!["missing-dep", "*", "web"]]);

    assert!(tree::execute(Some("app"), &[requirements], &ctx).unwrap());
    let output = ctx.output.captured();
    assert!(output.contains("  cli [Installed: 3.0.0 | Required: *]"));
    assert!(!output.contains("Required: Any"));

    assert!(graph::execute(false, false, &ctx).unwrap());
    assert!(ctx.output.captured().contains("\"app\" -> \"cli\" [label=\"*\"]"));
}

#[test]
fn test_lock_print_and_save() {
    let (_dir, cwd) = create_temp_dir();
    let requirements = write(&cwd, "requirements.txt", "cli\n");
    let ctx = create_test_context(&cwd, environment());

    assert!(lock::execute(&[requirements.clone()], false, None, &ctx).unwrap());
    assert_eq!(ctx.output.captured(), "cli==3.0.0\nutil==1.0.0");

    let target = Utf8Path::new("locks/prod.lock");
    assert!(lock::execute(&[requirements], true, Some(target), &ctx).unwrap());
    let written = std::fs::read_to_string(cwd.join(target)).unwrap();
    assert_eq!(written, "cli==3.0.0\nutil==1.0.0\n");
    assert!(ctx.output.captured().contains("Lock file exported to"));
}

#[test]
fn test_validate_reports_drift() {
    let (_dir, cwd) = create_temp_dir();
    let requirements = write(&cwd, "requirements.txt", "cli\nweb>=2.0\n");
    let lock = write(&cwd, "requirements.lock", "cli==2.0.0\nweb==2.0\n");
    let ctx = create_test_context(&cwd, environment());

    assert!(!validate::execute(&[requirements], &[lock], false, &ctx).unwrap());
    let output = ctx.output.captured();
    assert!(output.contains("Unlocked requirements found"));
    assert!(output.contains("Unset locks found"));
    assert!(output.contains("Package version mismatch found"));
    assert!(output.contains("Requirement version mismatch found"));
    assert!(!output.contains("Non-required"));
}

#[test]
fn test_validate_passes_for_consistent_files() {
    let (_dir, cwd) = create_temp_dir();
    let requirements = write(&cwd, "requirements.txt", "cli==3.0.0\n");
    let lock = write(&cwd, "requirements.lock", "cli==3.0.0\nutil==1.0.0\n");
    let ctx = create_test_context(&cwd, environment());

    assert!(validate::execute(&[requirements], &[lock], false, &ctx).unwrap());
    assert!(ctx.output.captured().contains("All requirement versions matching"));
}

#[test]
fn test_validate_strict_reports_unneeded() {
    let (_dir, cwd) = create_temp_dir();
    let requirements = write(&cwd, "requirements.txt", "cli==3.0.0\n");
    let lock = write(&cwd, "requirements.lock", "cli==3.0.0\nutil==1.0.0\nold==0.1\n");
    let ctx = create_test_context(&cwd, environment());

    assert!(!validate::execute(&[requirements], &[lock], true, &ctx).unwrap());
    let output = ctx.output.captured();
    assert!(output.contains("Non-required packages found"));
    assert!(output.contains("Non-required locks found"));
    assert!(output.contains("old"));
}

#[test]
fn test_validate_parse_error_is_fatal() {
    let (_dir, cwd) = create_temp_dir();
    let requirements = write(&cwd, "requirements.txt", "cli\n>>broken\n");
    let lock = write(&cwd, "requirements.lock", "");
    let ctx = create_test_context(&cwd, environment());

    let err = validate::execute(&[requirements], &[lock], false, &ctx).unwrap_err();
    assert!(matches!(err, VetchError::RequirementsParse { line: 2, .. }));
}

#[test]
fn test_check_runs_configured_checks() {
    let (_dir, cwd) = create_temp_dir();
    let mut ctx = create_test_context(&cwd, environment());
    ctx.settings.checks = vec![vetch_config::Check::Conflicts, vetch_config::Check::Cyclic];

    assert!(!check::execute(&[], &[], false, &ctx).unwrap());
    let output = ctx.output.captured();
    assert!(output.contains("Conflicting packages found"));
    assert!(output.contains("Cyclic dependencies found"));
    assert!(!output.contains("Missing"));
}

#[test]
fn test_check_passes_clean_environment() {
    let (_dir, cwd) = create_temp_dir();
    write(&cwd, "requirements.txt", "six==1.16.0\n");
    write(&cwd, "requirements.lock", "six==1.16.0\n");
    let env: StaticEnvironment = [Distribution::new("six", "1.16.0")].into_iter().collect();
    let ctx = create_test_context(&cwd, env);

    assert!(check::execute(&[], &[], false, &ctx).unwrap());
}

#[test]
fn test_graph_prints_dot_source() {
    let (_dir, cwd) = create_temp_dir();
    let mut ctx = create_test_context(&cwd, environment());
    ctx.settings.graph.name = "deps".to_string();

    assert!(graph::execute(false, false, &ctx).unwrap());
    let output = ctx.output.captured();
    assert!(output.starts_with("strict digraph \"deps\" {"));
    assert!(output.contains("\"app\" -> \"web\" [label=\">=2.0\"]"));
    assert!(!output.contains("\"pip\""));
}

#[test]
fn test_graph_options_follow_settings() {
    let (_dir, cwd) = create_temp_dir();
    let mut ctx = create_test_context(&cwd, environment());
    ctx.settings.graph.engine = "neato".to_string();
    ctx.settings.graph.strict = false;

    let options = graph::graph_options(&ctx);
    assert_eq!(options.engine, "neato");
    assert!(!options.strict);
    assert_eq!(options.node_attributes.get("shape").map(String::as_str), Some("box3d"));
}
