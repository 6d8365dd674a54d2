//! `vetch validate`

use super::CommandContext;
use crate::output::{messages, Table};
use camino::Utf8PathBuf;
use vetch_core::{Environment, PackageCollection, RequirementCollection, VetchResult};
use vetch_graph::{
    lock_version_mismatch, required_version_mismatch, unlocked_requirements, unnecessary_locks,
    unnecessary_packages, unset_locks,
};

pub fn execute(
    requirements: &[Utf8PathBuf],
    locks: &[Utf8PathBuf],
    strict: bool,
    ctx: &CommandContext,
) -> VetchResult<bool> {
    let packages = ctx.packages()?;
    run(&packages, requirements, locks, strict, ctx)
}

/// Compare requirement files, lock files and the installed environment.
///
/// Non-required packages and locks are only reported with `strict`.
pub fn run(
    packages: &PackageCollection,
    requirements: &[Utf8PathBuf],
    locks: &[Utf8PathBuf],
    strict: bool,
    ctx: &CommandContext,
) -> VetchResult<bool> {
    let requirement_files = ctx.files(requirements, &ctx.settings.requirements_files);
    let lock_files = ctx.files(locks, &ctx.settings.lock_files);
    let files_ok = ctx.check_files(&requirement_files);
    if !(ctx.check_files(&lock_files) && files_ok) {
        return Ok(false);
    }

    let requirements = ctx.read_requirements(&requirement_files)?;
    let locked = ctx.read_requirements(&lock_files)?;
    let env = ctx.environment()?;

    let mut checks = vec![
        check_unlocked_requirements(&requirements, env, ctx),
        check_unset_locks(&requirements, &locked, env, ctx),
        check_package_version_mismatch(packages, &locked, ctx),
        check_requirement_version_mismatch(&requirements, &locked, env, ctx)?,
    ];

    if strict {
        checks.push(check_unnecessary_packages(packages, &requirements, &locked, env, ctx));
        checks.push(check_unnecessary_locks(&requirements, &locked, env, ctx));
    }

    Ok(checks.into_iter().all(|passed| passed))
}

fn report(ctx: &CommandContext, table: &Table, found: &str, ok: &str, warning: bool) -> bool {
    if table.is_empty() {
        ctx.output.success(ok);
        return true;
    }

    if warning {
        ctx.output.warn(found);
    } else {
        ctx.output.error(found);
    }
    ctx.output.table(table);
    false
}

fn check_unlocked_requirements(
    requirements: &RequirementCollection,
    env: &dyn Environment,
    ctx: &CommandContext,
) -> bool {
    let mut table = Table::new([messages::PACKAGE, messages::INSTALLED]);
    for requirement in &unlocked_requirements(requirements) {
        let installed = requirement.version_id(env);
        table.row([requirement.key.clone(), ctx.version_text(installed.as_deref())]);
    }

    report(
        ctx,
        &table,
        messages::UNLOCKED_REQUIREMENTS_FOUND,
        messages::UNLOCKED_REQUIREMENTS_OK,
        false,
    )
}

fn check_unset_locks(
    requirements: &RequirementCollection,
    locked: &RequirementCollection,
    env: &dyn Environment,
    ctx: &CommandContext,
) -> bool {
    let mut table = Table::new([messages::PACKAGE, messages::INSTALLED]);
    for requirement in &unset_locks(requirements, locked, env) {
        let installed = requirement.version_id(env);
        table.row([requirement.key.clone(), ctx.version_text(installed.as_deref())]);
    }

    report(ctx, &table, messages::UNSET_LOCKS_FOUND, messages::UNSET_LOCKS_OK, false)
}

fn check_package_version_mismatch(
    packages: &PackageCollection,
    locked: &RequirementCollection,
    ctx: &CommandContext,
) -> bool {
    let mut table = Table::new([messages::PACKAGE, messages::INSTALLED, messages::REQUIRED]);
    for (package, locked_version) in lock_version_mismatch(packages, locked) {
        table.row([
            package.key.clone(),
            ctx.version_text(package.version_id()),
            ctx.specifier_text(&locked_version),
        ]);
    }

    report(
        ctx,
        &table,
        messages::PACKAGE_VERSION_MISMATCH_FOUND,
        messages::PACKAGE_VERSION_MISMATCH_OK,
        false,
    )
}

fn check_requirement_version_mismatch(
    requirements: &RequirementCollection,
    locked: &RequirementCollection,
    env: &dyn Environment,
    ctx: &CommandContext,
) -> VetchResult<bool> {
    let policy = ctx.conflict_policy()?;

    let mut table = Table::new([messages::PACKAGE, messages::REQUIRED, messages::LOCKED]);
    for (requirement, locked_version) in required_version_mismatch(requirements, locked, env, &policy)
    {
        table.row([
            requirement.key.clone(),
            ctx.specifier_text(&requirement.specified_version()),
            ctx.specifier_text(&locked_version),
        ]);
    }

    Ok(report(
        ctx,
        &table,
        messages::REQUIREMENT_VERSION_MISMATCH_FOUND,
        messages::REQUIREMENT_VERSION_MISMATCH_OK,
        false,
    ))
}

fn check_unnecessary_packages(
    packages: &PackageCollection,
    requirements: &RequirementCollection,
    locked: &RequirementCollection,
    env: &dyn Environment,
    ctx: &CommandContext,
) -> bool {
    let mut table = Table::new([messages::PACKAGE, messages::INSTALLED]);
    for package in &unnecessary_packages(packages, requirements, locked, env) {
        table.row([package.key.clone(), ctx.version_text(package.version_id())]);
    }

    report(
        ctx,
        &table,
        messages::PACKAGE_NOT_REQUIRED_FOUND,
        messages::PACKAGE_NOT_REQUIRED_OK,
        true,
    )
}

fn check_unnecessary_locks(
    requirements: &RequirementCollection,
    locked: &RequirementCollection,
    env: &dyn Environment,
    ctx: &CommandContext,
) -> bool {
    let ignore_list = ctx.settings.ignore_list();

    let mut table = Table::new([messages::PACKAGE, messages::LOCKED]);
    for lock in &unnecessary_locks(requirements, locked, &ignore_list, env) {
        table.row([lock.key.clone(), ctx.specifier_text(&lock.specified_version())]);
    }

    report(
        ctx,
        &table,
        messages::LOCK_NOT_REQUIRED_FOUND,
        messages::LOCK_NOT_REQUIRED_OK,
        true,
    )
}
