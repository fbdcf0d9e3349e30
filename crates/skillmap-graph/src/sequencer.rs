use crate::dependency::{DependencyGraph, NodeTable, TopoWalk};
use crate::graph::{GraphAdapter, GraphModel};
use crate::semantics::RelationshipSemantics;
use crate::tie_break::{NumericId, TieBreak, priorities};
use skillmap_core::{NodeId, SkillEdge, SkillNode};

/// Turns a skill graph into a total order suitable for a linear study flow.
pub struct Sequencer<'a> {
    pub semantics: &'a RelationshipSemantics,
    pub tie_break: &'a dyn TieBreak,
}

/// Full outcome of one sequencing pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    pub order: Vec<NodeId>,
    /// Longest path from a root, aligned with `order`
    pub ranks: Vec<u32>,
    /// How many leading entries of `order` satisfy every dependency
    pub resolved: usize,
}

impl Sequence {
    /// Nodes that sat in or behind a cycle.
    pub fn unresolved(&self) -> &[NodeId] {
        &self.order[self.resolved..]
    }
}

impl<'a> Sequencer<'a> {
    pub fn new(semantics: &'a RelationshipSemantics, tie_break: &'a dyn TieBreak) -> Self {
        Self {
            semantics,
            tie_break,
        }
    }

    pub fn sequence<G: GraphAdapter>(&self, graph: &G) -> Vec<NodeId> {
        self.run(graph).order
    }

    pub fn run<G: GraphAdapter>(&self, graph: &G) -> Sequence {
        let table = NodeTable::new(graph.nodes().map(|node| (node.id, node.name)));
        let edges: Vec<_> = graph.edges().collect();
        let dependencies =
            DependencyGraph::build(&table, edges.iter().filter_map(|e| self.semantics.orient(e)));

        let walk = dependencies.walk(&priorities(table.keys(), self.tie_break));
        Self::collect(&table, walk)
    }

    fn collect(table: &NodeTable<'_>, walk: TopoWalk) -> Sequence {
        let order = walk.order.iter().map(|&idx| table.id(idx).clone()).collect();
        let ranks = walk.order.iter().map(|&idx| walk.ranks[idx]).collect();
        Sequence {
            order,
            ranks,
            resolved: walk.resolved,
        }
    }
}

/// Sequence plain node and edge lists with the built-in semantics and the
/// numeric-id tie-break.
pub fn sequence(nodes: &[SkillNode], edges: &[SkillEdge]) -> Vec<NodeId> {
    let model = GraphModel::from_parts(nodes, edges);
    let semantics = RelationshipSemantics::new();
    Sequencer::new(&semantics, &NumericId).sequence(&model)
}
