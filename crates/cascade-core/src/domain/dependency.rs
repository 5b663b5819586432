//! Dependency graph between recipe modules.
//!
//! Edges point from a module to the modules it wants (waits for).
//! BTree collections keep the reported cycle deterministic.

use std::collections::{BTreeMap, BTreeSet};

/// Dependency graph keyed by module name.
#[derive(Debug, Default)]
pub struct DependencyGraph {
    /// Forward edges: module -> modules it depends on
    edges: BTreeMap<String, BTreeSet<String>>,

    /// Every node, including ones without edges.
    nodes: BTreeSet<String>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Color {
    Gray,
    Black,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_module(&mut self, module: impl Into<String>) {
        self.nodes.insert(module.into());
    }

    /// Add a dependency: `module` waits for `depends_on`.
    ///
    /// Both endpoints become nodes of the graph.
    pub fn add_dependency(&mut self, module: &str, depends_on: &str) {
        self.nodes.insert(module.to_string());
        self.nodes.insert(depends_on.to_string());
        self.edges
            .entry(module.to_string())
            .or_default()
            .insert(depends_on.to_string());
    }

    /// Detect a cycle in the graph.
    ///
    /// Returns the first cycle found as a closed path (`[a, b, a]`), or `None`
    /// for a DAG. Three-color DFS: a gray node reached again is a back edge.
    pub fn detect_cycle(&self) -> Option<Vec<String>> {
        let mut colors: BTreeMap<&str, Color> = BTreeMap::new();
        let mut path: Vec<&str> = Vec::new();

        for start in &self.nodes {
            if colors.contains_key(start.as_str()) {
                continue;
            }
            if let Some(cycle) = self.dfs_cycle(start, &mut colors, &mut path) {
                return Some(cycle);
            }
        }
        None
    }

    fn dfs_cycle<'a>(
        &'a self,
        node: &'a str,
        colors: &mut BTreeMap<&'a str, Color>,
        path: &mut Vec<&'a str>,
    ) -> Option<Vec<String>> {
        colors.insert(node, Color::Gray);
        path.push(node);

        if let Some(deps) = self.edges.get(node) {
            for dep in deps {
                match colors.get(dep.as_str()) {
                    Some(Color::Gray) => {
                        let from = path.iter().position(|n| *n == dep.as_str()).unwrap_or(0);
                        let mut cycle: Vec<String> =
                            path[from..].iter().map(|n| n.to_string()).collect();
                        cycle.push(dep.clone());
                        return Some(cycle);
                    }
                    Some(Color::Black) => {}
                    None => {
                        if let Some(cycle) = self.dfs_cycle(dep, colors, path) {
                            return Some(cycle);
                        }
                    }
                }
            }
        }

        colors.insert(node, Color::Black);
        path.pop();
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_graph_is_empty() {
        let graph = DependencyGraph::new();
        assert!(graph.detect_cycle().is_none());
    }

    #[test]
    fn isolated_modules_are_not_a_cycle() {
        let mut graph = DependencyGraph::new();
        graph.add_module("a");
        graph.add_module("b");
        graph.add_dependency("c", "a");
        assert!(graph.detect_cycle().is_none());
    }

    #[test]
    fn detect_simple_cycle() {
        let mut graph = DependencyGraph::new();
        graph.add_dependency("a", "b");
        graph.add_dependency("b", "a");

        let cycle = graph.detect_cycle().unwrap();
        assert_eq!(cycle, vec!["a", "b", "a"]);
    }

    #[test]
    fn detect_self_dependency() {
        let mut graph = DependencyGraph::new();
        graph.add_dependency("a", "a");
        assert_eq!(graph.detect_cycle().unwrap(), vec!["a", "a"]);
    }

    #[test]
    fn detect_longer_cycle() {
        let mut graph = DependencyGraph::new();
        // B -> C -> D -> B, plus A outside the loop
        graph.add_dependency("b", "a");
        graph.add_dependency("c", "b");
        graph.add_dependency("d", "c");
        graph.add_dependency("b", "d");

        let cycle = graph.detect_cycle().unwrap();
        assert_eq!(cycle.first(), cycle.last());
        assert_eq!(cycle.len(), 4);
        assert!(!cycle.contains(&"a".to_string()));
    }

    #[test]
    fn diamond_is_not_a_cycle() {
        let mut graph = DependencyGraph::new();
        graph.add_dependency("b", "a");
        graph.add_dependency("c", "b");
        graph.add_dependency("c", "a");
        assert!(graph.detect_cycle().is_none());
    }

    #[test]
    fn complex_dag_with_cross_edges() {
        let mut graph = DependencyGraph::new();
        //     A
        //    / \
        //   B   C
        //   |\ /|
        //   | X |
        //   |/ \|
        //   D   E
        graph.add_dependency("b", "a");
        graph.add_dependency("c", "a");
        graph.add_dependency("d", "b");
        graph.add_dependency("e", "b");
        graph.add_dependency("d", "c");
        graph.add_dependency("e", "c");
        assert!(graph.detect_cycle().is_none());
    }
}
