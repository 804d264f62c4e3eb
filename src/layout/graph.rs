use std::collections::{HashMap, VecDeque};

use crate::model::Goal;

/// Directed dependency graph derived from the goals of one project.
///
/// Edges run from a dependency to its dependent. Edges referencing goals
/// that are not part of the node set are dropped at construction.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    /// All goal IDs, in input order.
    pub nodes: Vec<String>,
    /// (dependency, dependent) pairs; both endpoints are known nodes.
    pub edges: Vec<(String, String)>,
    /// A total ordering of all nodes: Kahn's-algorithm result when the
    /// graph is acyclic, the original input order otherwise.
    pub topological_order: Vec<String>,
    pub has_cycle: bool,
}

impl DependencyGraph {
    /// Position of each node in `topological_order`.
    pub fn order_index(&self) -> HashMap<&str, usize> {
        self.topological_order
            .iter()
            .enumerate()
            .map(|(i, id)| (id.as_str(), i))
            .collect()
    }
}

/// Build the dependency graph for a set of goals and topologically sort it.
///
/// Cycles and dangling references are data conditions, not errors: a cycle
/// sets `has_cycle` and leaves the ordering at input order, a dangling
/// reference simply contributes no edge.
pub fn analyze_dependencies(goals: &[Goal]) -> DependencyGraph {
    let nodes: Vec<String> = goals.iter().map(|g| g.id.clone()).collect();
    let index: HashMap<&str, usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, id)| (id.as_str(), i))
        .collect();

    let mut edges: Vec<(usize, usize)> = Vec::new();
    for (to, goal) in goals.iter().enumerate() {
        for dep in &goal.dependencies {
            match index.get(dep.as_str()) {
                Some(&from) => edges.push((from, to)),
                None => {
                    tracing::debug!(goal = %goal.id, dependency = %dep,
                        "dropping dependency edge to unknown goal");
                }
            }
        }
    }

    let mut in_degree = vec![0usize; nodes.len()];
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
    for &(from, to) in &edges {
        children[from].push(to);
        in_degree[to] += 1;
    }

    // Kahn's algorithm; the queue is seeded in input order, which makes
    // tie-breaking among equal-in-degree nodes deterministic.
    let mut queue: VecDeque<usize> = (0..nodes.len()).filter(|&i| in_degree[i] == 0).collect();
    let mut sorted: Vec<usize> = Vec::with_capacity(nodes.len());
    while let Some(node) = queue.pop_front() {
        sorted.push(node);
        for &child in &children[node] {
            in_degree[child] -= 1;
            if in_degree[child] == 0 {
                queue.push_back(child);
            }
        }
    }

    let has_cycle = sorted.len() < nodes.len();
    let topological_order = if has_cycle {
        nodes.clone()
    } else {
        sorted.into_iter().map(|i| nodes[i].clone()).collect()
    };

    DependencyGraph {
        edges: edges
            .into_iter()
            .map(|(from, to)| (nodes[from].clone(), nodes[to].clone()))
            .collect(),
        nodes,
        topological_order,
        has_cycle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Goal;

    fn goal(id: &str, deps: &[&str]) -> Goal {
        let mut g = Goal::new(id, id, 10.0);
        g.dependencies = deps.iter().map(|d| d.to_string()).collect();
        g
    }

    #[test]
    fn topological_order_respects_every_edge() {
        let goals = vec![
            goal("d", &["b", "c"]),
            goal("b", &["a"]),
            goal("c", &["a"]),
            goal("a", &[]),
        ];
        let graph = analyze_dependencies(&goals);
        assert!(!graph.has_cycle);
        assert_eq!(graph.topological_order.len(), 4);
        let idx = graph.order_index();
        for (from, to) in &graph.edges {
            assert!(
                idx[from.as_str()] < idx[to.as_str()],
                "edge {from}->{to} points backwards"
            );
        }
    }

    #[test]
    fn tie_breaking_follows_input_order() {
        let goals = vec![goal("x", &[]), goal("y", &[]), goal("z", &[])];
        let graph = analyze_dependencies(&goals);
        assert_eq!(graph.topological_order, vec!["x", "y", "z"]);
    }

    #[test]
    fn cycle_falls_back_to_input_order() {
        let goals = vec![goal("a", &["b"]), goal("b", &["a"]), goal("c", &[])];
        let graph = analyze_dependencies(&goals);
        assert!(graph.has_cycle);
        assert_eq!(graph.topological_order, vec!["a", "b", "c"]);
    }

    #[test]
    fn self_dependency_terminates_as_cycle() {
        let goals = vec![goal("a", &["a"])];
        let graph = analyze_dependencies(&goals);
        assert!(graph.has_cycle);
        assert_eq!(graph.topological_order, vec!["a"]);
    }

    #[test]
    fn dangling_references_are_dropped_silently() {
        let goals = vec![goal("a", &[]), goal("b", &["a", "ghost"])];
        let graph = analyze_dependencies(&goals);
        assert!(!graph.has_cycle);
        assert_eq!(graph.edges, vec![("a".to_string(), "b".to_string())]);
    }

    #[test]
    fn empty_input_yields_empty_graph() {
        let graph = analyze_dependencies(&[]);
        assert!(graph.nodes.is_empty());
        assert!(graph.topological_order.is_empty());
        assert!(!graph.has_cycle);
    }
}
