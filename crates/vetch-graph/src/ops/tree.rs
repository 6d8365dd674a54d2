use std::collections::HashMap;
use tracing::warn;
use vetch_core::collection::MAX_TRAVERSAL_DEPTH;
use vetch_core::{
    Dependency, Environment, Package, PackageCollection, Requirement, RequirementCollection,
};

/// One requirement in a dependency tree
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub requirement: Requirement,
    pub children: Vec<TreeNode>,
    /// The key already appears higher up this branch and was not expanded
    pub cyclic: bool,
}

/// Dependency tree rooted at a top-level installed package
#[derive(Debug, Clone)]
pub struct PackageTree {
    pub package: Package,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Number of nodes in this subtree, including this one
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(TreeNode::size).sum::<usize>()
    }
}

struct TreeBuilder<'a> {
    env: &'a dyn Environment,
    children: HashMap<String, RequirementCollection>,
}

impl<'a> TreeBuilder<'a> {
    fn new(env: &'a dyn Environment) -> Self {
        Self {
            env,
            children: HashMap::new(),
        }
    }

    fn requirements_of(&mut self, requirement: &Requirement) -> RequirementCollection {
        self.children
            .entry(requirement.key.clone())
            .or_insert_with(|| requirement.requirements(self.env).sorted())
            .clone()
    }

    fn build(&mut self, requirements: RequirementCollection, branch: &mut Vec<String>) -> Vec<TreeNode> {
        requirements
            .into_iter()
            .map(|requirement| {
                if branch.contains(&requirement.key) {
                    return TreeNode {
                        requirement,
                        children: Vec::new(),
                        cyclic: true,
                    };
                }

                if branch.len() >= MAX_TRAVERSAL_DEPTH {
                    warn!(
                        "Dependency tree deeper than {} levels, not expanding {}",
                        MAX_TRAVERSAL_DEPTH, requirement.key
                    );
                    return TreeNode {
                        requirement,
                        children: Vec::new(),
                        cyclic: false,
                    };
                }

                let grandchildren = self.requirements_of(&requirement);
                branch.push(requirement.key.clone());
                let children = self.build(grandchildren, branch);
                branch.pop();

                TreeNode {
                    requirement,
                    children,
                    cyclic: false,
                }
            })
            .collect()
    }
}

/// Requirement tree below a single package or requirement, each level
/// sorted by key
pub fn package_dependency_tree(dependency: &dyn Dependency, env: &dyn Environment) -> Vec<TreeNode> {
    let mut builder = TreeBuilder::new(env);
    let mut branch = vec![dependency.key().to_string()];
    builder.build(dependency.requirements(env).sorted(), &mut branch)
}

/// One tree per top-level installed package.
///
/// With `requirements`, only top-level packages named there get a tree.
pub fn dependency_tree(
    packages: &PackageCollection,
    requirements: Option<&RequirementCollection>,
    env: &dyn Environment,
) -> Vec<PackageTree> {
    let mut builder = TreeBuilder::new(env);

    packages
        .independent_packages()
        .into_iter()
        .filter(|package| requirements.map_or(true, |requirements| requirements.contains(&package.key)))
        .map(|package| {
            let mut branch = vec![package.key.clone()];
            let children = builder.build(package.requirements().sorted(), &mut branch);
            PackageTree { package, children }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use vetch_core::{ignore_list, Distribution, StaticEnvironment};

    fn render(nodes: &[TreeNode], depth: usize, out: &mut Vec<String>) {
        for node in nodes {
            let marker = if node.cyclic { " (cyclic)" } else { "" };
            out.push(format!(
                "{}{} {}{}",
                "  ".repeat(depth),
                node.requirement.key,
                node.requirement.specified_version(),
                marker
            ));
            render(&node.children, depth + 1, out);
        }
    }

    #[test]
    fn test_package_dependency_tree() {
        let env = fixtures::environment();
        let packages = fixtures::packages(&env);
        let app = packages.get("app").unwrap();

        let mut lines = Vec::new();
        render(&package_dependency_tree(app, &env), 0, &mut lines);
        assert_eq!(
            lines,
            vec![
                "cli Any",
                "  missing-dep >=0.1",
                "  util >=1.0.0",
                "web >=2.0",
                "  missing-dep Any",
                "  util ==1.0.0",
            ]
        );
    }

    #[test]
    fn test_dependency_tree_roots() {
        let env = fixtures::environment();
        let packages = fixtures::packages(&env);

        let roots: Vec<String> = dependency_tree(&packages, None, &env)
            .iter()
            .map(|tree| tree.package.key.clone())
            .collect();
        assert_eq!(roots, vec!["app", "orphan"]);

        let requirements = fixtures::requirements(&["orphan", "web"]);
        let filtered = dependency_tree(&packages, Some(&requirements), &env);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].package.key, "orphan");
        assert!(filtered[0].children.is_empty());
    }

    #[test]
    fn test_tree_stops_at_cycles() {
        let env: StaticEnvironment = [
            Distribution::new("a", "1.0").requiring("b").unwrap(),
            Distribution::new("b", "1.0").requiring("a").unwrap(),
        ]
        .into_iter()
        .collect();
        let packages = PackageCollection::from_environment(&env, &ignore_list(["pip"]));
        let a = packages.get("a").unwrap();

        let tree = package_dependency_tree(a, &env);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].requirement.key, "b");
        assert_eq!(tree[0].children.len(), 1);
        assert!(tree[0].children[0].cyclic);
        assert_eq!(tree[0].size(), 2);
    }
}
