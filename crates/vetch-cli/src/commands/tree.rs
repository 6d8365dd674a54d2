//! `vetch tree`

use super::CommandContext;
use crate::output::messages;
use camino::Utf8PathBuf;
use vetch_core::utils::canonical_key;
use vetch_core::{Environment, Package, VetchResult};
use vetch_graph::{dependency_tree, package_dependency_tree, PackageTree, TreeNode};

const INDENT: usize = 2;

/// Print the dependency tree of one package, or of every top-level package
pub fn execute(
    package: Option<&str>,
    requirements: &[Utf8PathBuf],
    ctx: &CommandContext,
) -> VetchResult<bool> {
    let files = ctx.files(requirements, &ctx.settings.requirements_files);
    if !ctx.check_files(&files) {
        return Ok(false);
    }

    let requirements = ctx.read_requirements(&files)?;
    let packages = ctx.packages()?;
    let env = ctx.environment()?;

    let trees = match package {
        Some(key) => {
            let package = packages.get(&canonical_key(key))?.clone();
            let children = package_dependency_tree(&package, env);
            vec![PackageTree { package, children }]
        }
        None => {
            let filter = (!requirements.is_empty()).then_some(&requirements);
            dependency_tree(&packages, filter, env)
        }
    };

    if trees.is_empty() {
        ctx.output.info(messages::PACKAGES_NOT_FOUND);
    }

    for tree in &trees {
        ctx.output.print(&package_line(&tree.package, ctx));
        print_nodes(&tree.children, INDENT, env, ctx);
    }
    Ok(true)
}

fn package_line(package: &Package, ctx: &CommandContext) -> String {
    format!(
        "{} [{}: {}]",
        ctx.output.package(&package.key),
        messages::INSTALLED,
        ctx.version_text(package.version_id())
    )
}

fn print_nodes(nodes: &[TreeNode], indent: usize, env: &dyn Environment, ctx: &CommandContext) {
    for node in nodes {
        let requirement = &node.requirement;
        let installed = requirement.version_id(env);
        let cyclic = if node.cyclic { " (cyclic)" } else { "" };

        ctx.output.print(&format!(
            "{}{} [{}: {} | {}: {}]{}",
            " ".repeat(indent),
            ctx.output.package(&requirement.key),
            messages::INSTALLED,
            ctx.version_text(installed.as_deref()),
            messages::REQUIRED,
            ctx.specifier_text(&requirement.specified_version()),
            cyclic
        ));
        print_nodes(&node.children, indent + INDENT, env, ctx);
    }
}
