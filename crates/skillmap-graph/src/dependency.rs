//! Dependency graph construction and the in-degree driven traversal shared by
//! the sequencer, the rank assigner and the flow reordering service.

use crate::tie_break::{NodeKey, TieBreak, priorities};
use skillmap_core::NodeId;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

/// Input nodes indexed by position, with an id lookup.
///
/// Duplicate ids keep their own slot, but arcs always bind to the first one.
#[derive(Debug)]
pub struct NodeTable<'a> {
    keys: Vec<NodeKey<'a>>,
    index: HashMap<&'a NodeId, usize>,
}

impl<'a> NodeTable<'a> {
    pub fn new(nodes: impl IntoIterator<Item = (&'a NodeId, &'a str)>) -> Self {
        let mut keys = Vec::new();
        let mut index = HashMap::new();
        for (position, (id, name)) in nodes.into_iter().enumerate() {
            index.entry(id).or_insert(position);
            keys.push(NodeKey {
                id,
                name,
                index: position,
            });
        }
        Self { keys, index }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn keys(&self) -> &[NodeKey<'a>] {
        &self.keys
    }

    pub fn id(&self, idx: usize) -> &'a NodeId {
        self.keys[idx].id
    }

    pub fn position(&self, id: &NodeId) -> Option<usize> {
        self.index.get(id).copied()
    }
}

/// Arcs `u -> v` meaning "u must precede v", over node-table positions.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    successors: Vec<Vec<usize>>,
    in_degree: Vec<usize>,
    arcs: HashSet<(usize, usize)>,
}

impl DependencyGraph {
    pub fn new(node_count: usize) -> Self {
        Self {
            successors: vec![Vec::new(); node_count],
            in_degree: vec![0; node_count],
            arcs: HashSet::new(),
        }
    }

    /// Build from oriented `(before, after)` id pairs. Pairs naming an unknown
    /// node are dropped, as are self-loops and repeats of an existing arc.
    pub fn build<'n>(
        table: &NodeTable<'_>,
        arcs: impl IntoIterator<Item = (&'n NodeId, &'n NodeId)>,
    ) -> Self {
        let mut graph = Self::new(table.len());
        let mut duplicates = 0usize;

        for (before, after) in arcs {
            let (Some(u), Some(v)) = (table.position(before), table.position(after)) else {
                tracing::warn!(
                    "Dropping dependency {} -> {} because an endpoint is not in the node set",
                    before,
                    after
                );
                continue;
            };

            if u == v {
                tracing::debug!("Skipping self-loop on {}", before);
                continue;
            }

            if !graph.add_arc(u, v) {
                duplicates += 1;
            }
        }

        if duplicates > 0 {
            tracing::debug!("Collapsed {} parallel dependency arcs", duplicates);
        }

        graph
    }

    /// Returns false when the arc is a self-loop, out of range, or already present.
    pub fn add_arc(&mut self, from: usize, to: usize) -> bool {
        if from == to || from >= self.successors.len() || to >= self.successors.len() {
            return false;
        }
        if !self.arcs.insert((from, to)) {
            return false;
        }
        self.successors[from].push(to);
        self.in_degree[to] += 1;
        true
    }

    pub fn node_count(&self) -> usize {
        self.successors.len()
    }

    pub fn arc_count(&self) -> usize {
        self.arcs.len()
    }

    pub fn successors(&self, idx: usize) -> &[usize] {
        &self.successors[idx]
    }

    pub fn in_degree(&self, idx: usize) -> usize {
        self.in_degree[idx]
    }

    pub fn contains_arc(&self, from: usize, to: usize) -> bool {
        self.arcs.contains(&(from, to))
    }

    /// Kahn's algorithm. Among ready nodes the one with the lowest `priority`
    /// goes first; nodes trapped behind a cycle are appended afterwards in
    /// priority order.
    pub fn walk(&self, priority: &[usize]) -> TopoWalk {
        let n = self.node_count();
        debug_assert_eq!(priority.len(), n);

        let mut in_degree = self.in_degree.clone();
        let mut ranks = vec![0u32; n];
        let mut placed = vec![false; n];
        let mut order = Vec::with_capacity(n);

        let mut ready: BinaryHeap<Reverse<(usize, usize)>> = in_degree
            .iter()
            .enumerate()
            .filter(|(_, degree)| **degree == 0)
            .map(|(idx, _)| Reverse((priority[idx], idx)))
            .collect();

        let budget = n + self.arc_count();
        let mut steps = 0usize;

        while let Some(Reverse((_, node))) = ready.pop() {
            steps += 1;
            if steps > budget {
                tracing::warn!(
                    "Topological walk exceeded its step budget of {}; stopping early",
                    budget
                );
                break;
            }

            placed[node] = true;
            order.push(node);

            for &next in &self.successors[node] {
                steps += 1;
                // Relax on every arc so the rank tracks the longest path.
                ranks[next] = ranks[next].max(ranks[node] + 1);
                in_degree[next] -= 1;
                if in_degree[next] == 0 {
                    ready.push(Reverse((priority[next], next)));
                }
            }
        }

        let resolved = order.len();
        let mut trapped: Vec<usize> = (0..n).filter(|&idx| !placed[idx]).collect();
        if !trapped.is_empty() {
            tracing::debug!(
                "{} nodes sit in or behind a cycle and are appended in tie-break order",
                trapped.len()
            );
            for &idx in &trapped {
                ranks[idx] = 0;
            }
            trapped.sort_by_key(|&idx| priority[idx]);
            order.extend(trapped);
        }

        TopoWalk {
            order,
            resolved,
            ranks,
        }
    }

    /// Convenience for callers holding a tie-break rule rather than priorities.
    pub fn walk_with(&self, table: &NodeTable<'_>, rule: &dyn TieBreak) -> TopoWalk {
        self.walk(&priorities(table.keys(), rule))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopoWalk {
    /// Every node exactly once; the first `resolved` entries respect all arcs.
    pub order: Vec<usize>,
    pub resolved: usize,
    /// Longest distance from any root, by position. Roots and every unresolved
    /// node sit at 0.
    pub ranks: Vec<u32>,
}

impl TopoWalk {
    pub fn unresolved(&self) -> &[usize] {
        &self.order[self.resolved..]
    }

    pub fn is_complete(&self) -> bool {
        self.resolved == self.order.len()
    }
}
