use globset::{Glob, GlobSet, GlobSetBuilder};
use petgraph::algo::kosaraju_scc;
use petgraph::prelude::*;
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};

use crate::configs::package::load_package_manifest;
use crate::configs::workspace::load_member_patterns;
use crate::types::{MonoflowError, MonoflowResult};

/// A discovered workspace member.
#[derive(Debug, Clone)]
pub struct Package {
    pub name: String,
    /// Absolute directory the package's tasks execute in.
    pub directory: PathBuf,
    /// Workspace-internal dependency names, resolved against the
    /// discovered set. External registry dependencies never appear here.
    pub dependencies: Vec<String>,
    /// Task names the package's manifest declares as runnable.
    pub scripts: BTreeSet<String>,
}

impl Package {
    /// Does this package declare a runnable script for `task`?
    ///
    /// Resolved once at discovery time; a missing, empty, or absent scripts
    /// section all answer "no".
    pub fn has_script(&self, task: &str) -> bool {
        self.scripts.contains(task)
    }
}

/// The discovered workspace plus its dependency graph
#[derive(Debug)]
pub struct Workspace {
    pub root: PathBuf,
    /// Packages in discovery order.
    pub packages: Vec<Package>,
    pub dep_graph: Option<petgraph::Graph<String, ()>>,
    pub dependency_cycles: Vec<Vec<String>>,
}

const EXCLUDED_DIRS: &[&str] = &[".git", "node_modules", "target"];

impl Workspace {
    /// Discover the workspace rooted at `root`: expand the manifest's
    /// membership patterns, load each member's package manifest, resolve
    /// intra-workspace dependencies, and build the dependency graph.
    pub fn discover(root: &Path) -> MonoflowResult<Self> {
        let patterns = load_member_patterns(root)?;
        let mut packages = load_packages(root, &patterns)?;
        resolve_workspace_dependencies(&mut packages);

        let mut workspace = Workspace {
            root: root.to_path_buf(),
            packages,
            dep_graph: None,
            dependency_cycles: Vec::new(),
        };
        build_dependency_graph(&mut workspace);
        Ok(workspace)
    }

    /// Every package, ordered so dependencies precede their dependents.
    pub fn topological_order(&self) -> Vec<&Package> {
        topological_order(&self.packages)
    }
}

fn build_glob_set(patterns: &[String]) -> MonoflowResult<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| {
            MonoflowError::Workspace(format!("invalid workspace pattern '{}': {}", pattern, e))
        })?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| MonoflowError::Workspace(format!("invalid workspace patterns: {}", e)))
}

/// Expand membership patterns into candidate directories (directories
/// only), breadth-first from the root. The matches are sorted so discovery
/// order is deterministic regardless of filesystem iteration order.
fn expand_member_dirs(root: &Path, patterns: &[String]) -> MonoflowResult<Vec<PathBuf>> {
    let glob_set = build_glob_set(patterns)?;
    let mut matched = Vec::new();

    let mut queue = VecDeque::new();
    queue.push_back(root.to_path_buf());
    while let Some(current_dir) = queue.pop_front() {
        let Ok(entries) = std::fs::read_dir(&current_dir) else {
            continue;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            let dir_name = entry.file_name();
            if EXCLUDED_DIRS.iter().any(|skip| dir_name == *skip) {
                continue;
            }
            if glob_set.is_match(path.strip_prefix(root).unwrap_or(&path)) {
                matched.push(path.clone());
            }
            queue.push_back(path);
        }
    }

    matched.sort();
    Ok(matched)
}

/// Turn every matched directory that carries a package manifest into a
/// `Package`. Directories without a manifest are not members and are
/// skipped silently; a malformed manifest aborts discovery.
fn load_packages(root: &Path, patterns: &[String]) -> MonoflowResult<Vec<Package>> {
    let mut packages = Vec::new();
    for dir in expand_member_dirs(root, patterns)? {
        let Some(manifest) = load_package_manifest(&dir)? else {
            continue;
        };
        packages.push(Package {
            name: manifest.name,
            directory: dir,
            dependencies: manifest.dependencies.into_keys().collect(),
            scripts: manifest.scripts.into_keys().collect(),
        });
    }
    Ok(packages)
}

/// Restrict each package's declared dependencies to names present in the
/// workspace. Anything else is an external dependency: it cannot be
/// ordered, and dropping it is expected rather than reportable.
fn resolve_workspace_dependencies(packages: &mut [Package]) {
    let names: HashSet<String> = packages.iter().map(|p| p.name.clone()).collect();
    for package in packages.iter_mut() {
        package.dependencies.retain(|dep| names.contains(dep));
    }
}

/// Build the dependency graph and record any dependency cycles.
fn build_dependency_graph(workspace: &mut Workspace) {
    let mut graph = DiGraph::<String, ()>::new();
    let mut node_indices = HashMap::new();

    for package in &workspace.packages {
        let node_index = graph.add_node(package.name.clone());
        node_indices.insert(package.name.clone(), node_index);
    }

    for package in &workspace.packages {
        let from_node = node_indices[&package.name];
        for dep in &package.dependencies {
            if let Some(&to_node) = node_indices.get(dep) {
                // Edge: package -> dependency (dependency comes first)
                graph.add_edge(from_node, to_node, ());
            }
        }
    }

    // Detect cycles using strongly connected components. Cycles are
    // recorded, not fatal: ordering among cycle members stays best-effort.
    let mut cycles: Vec<Vec<String>> = kosaraju_scc(&graph)
        .into_iter()
        .filter_map(|component| {
            if component.len() > 1 {
                let mut cycle = component
                    .iter()
                    .map(|node| graph[*node].clone())
                    .collect::<Vec<_>>();
                cycle.sort();
                Some(cycle)
            } else {
                let node = component[0];
                if graph.contains_edge(node, node) {
                    Some(vec![graph[node].clone()])
                } else {
                    None
                }
            }
        })
        .collect();
    cycles.sort();

    workspace.dependency_cycles = cycles;
    workspace.dep_graph = Some(graph);
}

/// Order packages so every resolved dependency appears strictly before its
/// dependents.
///
/// Depth-first over the list in discovery order, visiting each package's
/// unvisited dependencies first. The visited set makes revisits no-ops, so
/// the walk terminates and emits every package exactly once even when
/// manifests declare a cycle. Unrelated packages keep first-encountered
/// order.
pub fn topological_order(packages: &[Package]) -> Vec<&Package> {
    fn visit<'a>(
        package: &'a Package,
        by_name: &HashMap<&str, &'a Package>,
        seen: &mut HashSet<&'a str>,
        order: &mut Vec<&'a Package>,
    ) {
        if !seen.insert(package.name.as_str()) {
            return;
        }
        for dep in &package.dependencies {
            // Resolved names should always be present; a missing entry is
            // skipped rather than treated as an error.
            if let Some(dep_package) = by_name.get(dep.as_str()) {
                visit(dep_package, by_name, seen, order);
            }
        }
        order.push(package);
    }

    let by_name: HashMap<&str, &Package> =
        packages.iter().map(|p| (p.name.as_str(), p)).collect();

    let mut seen = HashSet::new();
    let mut order = Vec::with_capacity(packages.len());
    for package in packages {
        visit(package, &by_name, &mut seen, &mut order);
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    fn package(name: &str, deps: &[&str]) -> Package {
        Package {
            name: name.to_string(),
            directory: PathBuf::from(format!("/ws/packages/{name}")),
            dependencies: deps.iter().map(|d| d.to_string()).collect(),
            scripts: BTreeSet::new(),
        }
    }

    fn write_manifest(dir: &Path, json: &str) {
        std::fs::create_dir_all(dir).unwrap();
        std::fs::write(dir.join("package.json"), json).unwrap();
    }

    fn write_workspace_manifest(root: &Path, patterns: &[&str]) {
        let mut contents = String::from("packages:\n");
        for pattern in patterns {
            contents.push_str(&format!("  - '{pattern}'\n"));
        }
        std::fs::write(root.join("pnpm-workspace.yaml"), contents).unwrap();
    }

    #[test]
    fn discovers_only_directories_with_a_manifest() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        write_workspace_manifest(root, &["packages/*"]);

        write_manifest(&root.join("packages/a"), r#"{ "name": "a" }"#);
        write_manifest(&root.join("packages/b"), r#"{ "name": "b" }"#);
        std::fs::create_dir_all(root.join("packages/empty")).unwrap();

        let workspace = Workspace::discover(root).unwrap();
        let names: Vec<_> = workspace.packages.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn external_dependencies_are_dropped() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        write_workspace_manifest(root, &["packages/*"]);

        write_manifest(&root.join("packages/a"), r#"{ "name": "a" }"#);
        write_manifest(
            &root.join("packages/b"),
            r#"{ "name": "b", "dependencies": { "a": "workspace:*", "react": "^18.0.0" } }"#,
        );

        let workspace = Workspace::discover(root).unwrap();
        let b = workspace.packages.iter().find(|p| p.name == "b").unwrap();
        assert_eq!(b.dependencies, vec!["a".to_string()]);
    }

    #[test]
    fn malformed_manifest_aborts_discovery() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        write_workspace_manifest(root, &["packages/*"]);

        write_manifest(&root.join("packages/a"), r#"{ "name": "a" }"#);
        write_manifest(&root.join("packages/broken"), "{ not json");

        let err = Workspace::discover(root).unwrap_err();
        assert!(matches!(err, MonoflowError::ManifestParse { .. }));
    }

    #[test]
    fn unmatched_directories_are_not_members() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        write_workspace_manifest(root, &["packages/*"]);

        write_manifest(&root.join("packages/a"), r#"{ "name": "a" }"#);
        write_manifest(&root.join("tools/scripts"), r#"{ "name": "scripts" }"#);

        let workspace = Workspace::discover(root).unwrap();
        let names: Vec<_> = workspace.packages.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["a"]);
    }

    #[test]
    fn scripts_become_capability_queries() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        write_workspace_manifest(root, &["packages/*"]);
        write_manifest(
            &root.join("packages/a"),
            r#"{ "name": "a", "scripts": { "build": "tsc" } }"#,
        );

        let workspace = Workspace::discover(root).unwrap();
        assert!(workspace.packages[0].has_script("build"));
        assert!(!workspace.packages[0].has_script("dev"));
    }

    #[test]
    fn topological_order_puts_dependencies_first() {
        let packages = vec![
            package("app", &["ui", "utils"]),
            package("ui", &["utils"]),
            package("utils", &[]),
        ];

        let order: Vec<_> = topological_order(&packages)
            .iter()
            .map(|p| p.name.as_str())
            .collect();

        let position = |name: &str| order.iter().position(|n| *n == name).unwrap();
        assert_eq!(order.len(), 3);
        assert!(position("utils") < position("ui"));
        assert!(position("ui") < position("app"));
    }

    #[test]
    fn topological_order_is_stable_for_unrelated_packages() {
        let packages = vec![package("x", &[]), package("y", &[]), package("z", &[])];
        let order: Vec<_> = topological_order(&packages)
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(order, vec!["x", "y", "z"]);
    }

    #[test]
    fn topological_order_terminates_on_cycles() {
        let packages = vec![package("a", &["b"]), package("b", &["a"]), package("c", &[])];
        let order = topological_order(&packages);

        // Every package exactly once, cycle or not.
        assert_eq!(order.len(), 3);
        let mut names: Vec<_> = order.iter().map(|p| p.name.as_str()).collect();
        names.sort_unstable();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn unresolvable_dependency_names_are_skipped() {
        // Not produced by discovery, but the sorter must not fail on them.
        let packages = vec![package("a", &["ghost"]), package("b", &["a"])];
        let order: Vec<_> = topological_order(&packages)
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(order, vec!["a", "b"]);
    }

    #[test]
    fn cycles_are_recorded_on_the_workspace() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        write_workspace_manifest(root, &["packages/*"]);

        write_manifest(
            &root.join("packages/a"),
            r#"{ "name": "a", "dependencies": { "b": "workspace:*" } }"#,
        );
        write_manifest(
            &root.join("packages/b"),
            r#"{ "name": "b", "dependencies": { "a": "workspace:*" } }"#,
        );

        let workspace = Workspace::discover(root).unwrap();
        assert_eq!(
            workspace.dependency_cycles,
            vec![vec!["a".to_string(), "b".to_string()]]
        );
        // The order still contains both packages exactly once.
        assert_eq!(workspace.topological_order().len(), 2);
    }
}
