use crate::dependency::{DependencyGraph, NodeTable, TopoWalk};
use crate::graph::{DerivedAttribute, GraphAdapter, GraphModel, Vec2};
use crate::semantics::RelationshipSemantics;
use crate::tie_break::{TieBreak, priorities, tie_break_for};
use serde::{Deserialize, Serialize};
use skillmap_core::{LayoutConfig, LayoutDirection, NodeId, SkillEdge, SkillNode};
use std::collections::{BTreeMap, HashMap};

pub trait Layouter {
    fn execute<G: GraphAdapter>(&self, graph: &G) -> LayoutResult;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutKind {
    /// Tiers by rank
    Hierarchical,
    /// One node per slot along a single axis
    Linear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub fn of(&self, v: Vec2) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutResult {
    pub kind: LayoutKind,
    pub direction: LayoutDirection,
    /// Topological order, cycle fallback included
    pub order: Vec<NodeId>,
    pub ranks: HashMap<NodeId, u32>,
    pub positions: HashMap<NodeId, Vec2>,
    /// Node ids per tier, in placement order. A linear layout has a single tier.
    pub layers: Vec<Vec<NodeId>>,
    /// Nodes the traversal could not resolve because of a cycle
    pub unresolved: Vec<NodeId>,
}

impl LayoutResult {
    /// Axis along which two endpoints have to agree for an edge to be drawn straight.
    pub fn alignment_axis(&self) -> Axis {
        match (self.kind, self.direction) {
            (LayoutKind::Linear, _) => Axis::X,
            (LayoutKind::Hierarchical, LayoutDirection::Vertical) => Axis::X,
            (LayoutKind::Hierarchical, LayoutDirection::Horizontal) => Axis::Y,
        }
    }

    /// Per-node level used to measure edge span: the rank for a hierarchical
    /// layout, the sequence position for a linear one.
    pub fn levels(&self) -> HashMap<&NodeId, u32> {
        match self.kind {
            LayoutKind::Hierarchical => self.ranks.iter().map(|(id, &rank)| (id, rank)).collect(),
            LayoutKind::Linear => self
                .order
                .iter()
                .enumerate()
                .map(|(i, id)| (id, i as u32))
                .collect(),
        }
    }
}

/// Shared setup of both layouters: node table, dependency graph and walk.
struct Prepared<'g> {
    table: NodeTable<'g>,
    priority: Vec<usize>,
    walk: TopoWalk,
}

fn prepare<'g, G: GraphAdapter>(
    graph: &'g G,
    semantics: &RelationshipSemantics,
    tie_break: &dyn TieBreak,
) -> Prepared<'g> {
    let table = NodeTable::new(graph.nodes().map(|node| (node.id, node.name)));
    let edges: Vec<_> = graph.edges().collect();
    let dependencies =
        DependencyGraph::build(&table, edges.iter().filter_map(|e| semantics.orient(e)));
    let priority = priorities(table.keys(), tie_break);
    let walk = dependencies.walk(&priority);

    Prepared {
        table,
        priority,
        walk,
    }
}

impl Prepared<'_> {
    fn order(&self) -> Vec<NodeId> {
        self.walk
            .order
            .iter()
            .map(|&idx| self.table.id(idx).clone())
            .collect()
    }

    fn unresolved(&self) -> Vec<NodeId> {
        self.walk
            .unresolved()
            .iter()
            .map(|&idx| self.table.id(idx).clone())
            .collect()
    }

    fn ranks(&self) -> HashMap<NodeId, u32> {
        (0..self.table.len())
            .map(|idx| (self.table.id(idx).clone(), self.walk.ranks[idx]))
            .collect()
    }
}

/// Rank-based tiered layout.
///
/// Each node's rank is its longest distance from a root of the dependency
/// graph. Ranks map to tiers, and tiers are centred on the cross axis.
pub struct HierarchicalLayouter {
    pub config: LayoutConfig,
    pub semantics: RelationshipSemantics,
    pub tie_break: Box<dyn TieBreak>,
}

impl HierarchicalLayouter {
    pub fn new(config: LayoutConfig) -> Self {
        let tie_break = tie_break_for(config.tie_break);
        Self {
            config,
            semantics: RelationshipSemantics::new(),
            tie_break,
        }
    }

    pub fn with_semantics(mut self, semantics: RelationshipSemantics) -> Self {
        self.semantics = semantics;
        self
    }

    pub fn with_tie_break(mut self, tie_break: Box<dyn TieBreak>) -> Self {
        self.tie_break = tie_break;
        self
    }

    fn build_layers(prepared: &Prepared<'_>) -> BTreeMap<u32, Vec<usize>> {
        let mut layers: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
        for idx in 0..prepared.table.len() {
            layers
                .entry(prepared.walk.ranks[idx])
                .or_default()
                .push(idx);
        }

        for nodes in layers.values_mut() {
            nodes.sort_by_key(|&idx| prepared.priority[idx]);
        }

        layers
    }

    fn place(&self, rank: u32, index: usize, layer_size: usize) -> Vec2 {
        // Offset from the tier centre, in slots.
        let offset = index as f32 - layer_size as f32 / 2.0;
        match self.config.direction {
            LayoutDirection::Vertical => Vec2::new(
                offset * self.config.horizontal_spacing,
                rank as f32 * self.config.vertical_spacing,
            ),
            LayoutDirection::Horizontal => Vec2::new(
                rank as f32 * self.config.horizontal_spacing,
                offset * self.config.vertical_spacing,
            ),
        }
    }
}

impl Default for HierarchicalLayouter {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

impl Layouter for HierarchicalLayouter {
    fn execute<G: GraphAdapter>(&self, graph: &G) -> LayoutResult {
        let prepared = prepare(graph, &self.semantics, self.tie_break.as_ref());
        let layer_map = Self::build_layers(&prepared);

        let mut positions = HashMap::with_capacity(prepared.table.len());
        let mut layers = Vec::with_capacity(layer_map.len());
        for (&rank, members) in &layer_map {
            let mut layer = Vec::with_capacity(members.len());
            for (i, &idx) in members.iter().enumerate() {
                let id = prepared.table.id(idx);
                positions.insert(id.clone(), self.place(rank, i, members.len()));
                layer.push(id.clone());
            }
            layers.push(layer);
        }

        LayoutResult {
            kind: LayoutKind::Hierarchical,
            direction: self.config.direction,
            order: prepared.order(),
            ranks: prepared.ranks(),
            positions,
            layers,
            unresolved: prepared.unresolved(),
        }
    }
}

/// Places the topological sequence on a single horizontal line.
pub struct LinearLayouter {
    pub config: LayoutConfig,
    pub semantics: RelationshipSemantics,
    pub tie_break: Box<dyn TieBreak>,
}

impl LinearLayouter {
    pub fn new(config: LayoutConfig) -> Self {
        let tie_break = tie_break_for(config.tie_break);
        Self {
            config,
            semantics: RelationshipSemantics::new(),
            tie_break,
        }
    }

    pub fn with_semantics(mut self, semantics: RelationshipSemantics) -> Self {
        self.semantics = semantics;
        self
    }

    pub fn with_tie_break(mut self, tie_break: Box<dyn TieBreak>) -> Self {
        self.tie_break = tie_break;
        self
    }
}

impl Default for LinearLayouter {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

impl Layouter for LinearLayouter {
    fn execute<G: GraphAdapter>(&self, graph: &G) -> LayoutResult {
        let prepared = prepare(graph, &self.semantics, self.tie_break.as_ref());
        let order = prepared.order();

        let positions = order
            .iter()
            .enumerate()
            .map(|(i, id)| {
                (
                    id.clone(),
                    Vec2::new(i as f32 * self.config.horizontal_spacing, 0.0),
                )
            })
            .collect();

        LayoutResult {
            kind: LayoutKind::Linear,
            direction: LayoutDirection::Horizontal,
            layers: vec![order.clone()],
            order,
            ranks: prepared.ranks(),
            positions,
            unresolved: prepared.unresolved(),
        }
    }
}

/// Rank and lay out plain node and edge lists with the built-in semantics.
pub fn assign_ranks_and_layout(
    nodes: &[SkillNode],
    edges: &[SkillEdge],
    config: &LayoutConfig,
) -> LayoutResult {
    let model = GraphModel::from_parts(nodes, edges);
    HierarchicalLayouter::new(config.clone()).execute(&model)
}

/// Write rank, coordinates and order index back onto the graph.
/// Returns how many nodes were updated.
pub fn apply_layout<G: GraphAdapter>(graph: &mut G, result: &LayoutResult) -> usize {
    let mut updated = 0;
    for (index, id) in result.order.iter().enumerate() {
        let mut known = graph.set_attribute(id, DerivedAttribute::OrderIndex(index));
        if let Some(&rank) = result.ranks.get(id) {
            known &= graph.set_attribute(id, DerivedAttribute::Rank(rank));
        }
        if let Some(&position) = result.positions.get(id) {
            known &= graph.set_attribute(id, DerivedAttribute::Position(position));
        }
        if known {
            updated += 1;
        } else {
            tracing::debug!("Layout names node {} which the graph no longer has", id);
        }
    }
    updated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantics::{OrderingDirection, classify};
    use crate::tie_break::Insertion;
    use proptest::prelude::*;
    use skillmap_core::RelationshipKind;

    fn nodes(ids: &[&str]) -> Vec<SkillNode> {
        ids.iter().map(|id| SkillNode::new(*id, *id)).collect()
    }

    fn prereq(id: &str, source: &str, target: &str) -> SkillEdge {
        SkillEdge::new(id, source, target, RelationshipKind::PREREQUISITE)
    }

    fn id(raw: &str) -> NodeId {
        NodeId::from(raw)
    }

    #[test]
    fn test_rank_is_longest_path() {
        // 1 -> 2 -> 3 plus shortcut 1 -> 3
        let result = assign_ranks_and_layout(
            &nodes(&["1", "2", "3"]),
            &[
                prereq("a", "1", "3"),
                prereq("b", "1", "2"),
                prereq("c", "2", "3"),
            ],
            &LayoutConfig::default(),
        );
        assert_eq!(result.ranks[&id("1")], 0);
        assert_eq!(result.ranks[&id("2")], 1);
        assert_eq!(result.ranks[&id("3")], 2);
    }

    #[test]
    fn test_coordinates_follow_rank_and_slot() {
        let config = LayoutConfig::default();
        let result = assign_ranks_and_layout(
            &nodes(&["1", "2", "3"]),
            &[prereq("a", "1", "2"), prereq("b", "1", "3")],
            &config,
        );

        let h = config.horizontal_spacing;
        let v = config.vertical_spacing;
        // Rank 0 holds one node, rank 1 holds two.
        assert_eq!(result.positions[&id("1")], Vec2::new(-0.5 * h, 0.0));
        assert_eq!(result.positions[&id("2")], Vec2::new(-1.0 * h, v));
        assert_eq!(result.positions[&id("3")], Vec2::new(0.0, v));
        assert_eq!(result.layers, vec![vec![id("1")], vec![id("2"), id("3")]]);
    }

    #[test]
    fn test_horizontal_direction_swaps_axes() {
        let config = LayoutConfig {
            direction: LayoutDirection::Horizontal,
            ..Default::default()
        };
        let result = assign_ranks_and_layout(
            &nodes(&["1", "2"]),
            &[prereq("a", "1", "2")],
            &config,
        );
        let a = result.positions[&id("1")];
        let b = result.positions[&id("2")];
        assert_eq!(b.x - a.x, config.horizontal_spacing);
        assert_eq!(a.y, b.y);
        assert_eq!(result.alignment_axis(), Axis::Y);
    }

    #[test]
    fn test_cycle_members_default_to_rank_zero() {
        let result = assign_ranks_and_layout(
            &nodes(&["1", "2", "3"]),
            &[prereq("a", "1", "2"), prereq("b", "2", "1")],
            &LayoutConfig::default(),
        );
        assert_eq!(result.ranks[&id("1")], 0);
        assert_eq!(result.ranks[&id("2")], 0);
        assert_eq!(result.unresolved, vec![id("1"), id("2")]);
        assert_eq!(result.layers.len(), 1);
        assert_eq!(result.positions.len(), 3);
    }

    #[test]
    fn test_cycle_fed_by_resolved_node_stays_on_rank_zero() {
        let result = assign_ranks_and_layout(
            &nodes(&["1", "2", "3"]),
            &[
                prereq("a", "3", "1"),
                prereq("b", "1", "2"),
                prereq("c", "2", "1"),
            ],
            &LayoutConfig::default(),
        );
        assert_eq!(result.unresolved, vec![id("1"), id("2")]);
        assert_eq!(result.ranks[&id("1")], 0);
        assert_eq!(result.ranks[&id("2")], 0);
        assert_eq!(result.ranks[&id("3")], 0);
    }

    #[test]
    fn test_empty_graph() {
        let result = assign_ranks_and_layout(&[], &[], &LayoutConfig::default());
        assert!(result.order.is_empty());
        assert!(result.positions.is_empty());
        assert!(result.layers.is_empty());
    }

    #[test]
    fn test_linear_layout_spaces_sequence() {
        let model = GraphModel::from_parts(
            &nodes(&["3", "2", "1"]),
            &[prereq("a", "3", "1")],
        );
        let config = LayoutConfig::default();
        let result = LinearLayouter::new(config.clone()).execute(&model);

        assert_eq!(result.order, vec![id("2"), id("3"), id("1")]);
        assert_eq!(result.positions[&id("2")], Vec2::new(0.0, 0.0));
        assert_eq!(
            result.positions[&id("1")],
            Vec2::new(2.0 * config.horizontal_spacing, 0.0)
        );
        assert_eq!(result.levels()[&id("1")], 2);
        assert_eq!(result.alignment_axis(), Axis::X);
    }

    #[test]
    fn test_custom_tie_break_reorders_within_rank() {
        let model = GraphModel::from_parts(&nodes(&["2", "1"]), &[]);
        let result = HierarchicalLayouter::default()
            .with_tie_break(Box::new(Insertion))
            .execute(&model);
        assert_eq!(result.layers, vec![vec![id("2"), id("1")]]);
    }

    #[test]
    fn test_apply_layout_writes_back() {
        let mut model = GraphModel::from_parts(
            &nodes(&["1", "2"]),
            &[SkillEdge::new("a", "2", "1", RelationshipKind::PART_OF)],
        );
        let result = HierarchicalLayouter::default().execute(&model);
        assert_eq!(apply_layout(&mut model, &result), 2);

        let derived = model.get_node(&id("2")).unwrap().derived;
        assert_eq!(derived.rank, Some(1));
        assert_eq!(derived.order_index, Some(1));
        assert_eq!(derived.position, Some(result.positions[&id("2")]));
    }

    fn graph_strategy() -> impl Strategy<Value = (Vec<SkillNode>, Vec<SkillEdge>)> {
        (1usize..10).prop_flat_map(|n| {
            let kinds = proptest::sample::select(RelationshipKind::ALL.to_vec());
            proptest::collection::vec((0..n, 0..n, kinds), 0..(n * 2)).prop_map(move |raw| {
                let nodes: Vec<SkillNode> =
                    (0..n).map(|i| SkillNode::new(i.to_string(), "")).collect();
                let edges: Vec<SkillEdge> = raw
                    .into_iter()
                    .enumerate()
                    .map(|(i, (s, t, kind))| {
                        SkillEdge::new(format!("e{i}"), s.to_string(), t.to_string(), kind)
                    })
                    .collect();
                (nodes, edges)
            })
        })
    }

    proptest! {
        /// A resolved target sits at least one rank below each of its parents.
        #[test]
        fn prop_rank_monotonicity((nodes, edges) in graph_strategy()) {
            let result = assign_ranks_and_layout(&nodes, &edges, &LayoutConfig::default());
            let unresolved: std::collections::HashSet<_> = result.unresolved.iter().collect();

            for edge in &edges {
                if edge.source == edge.target {
                    continue;
                }
                let (u, v) = match classify(edge.kind).direction {
                    OrderingDirection::Forward => (&edge.source, &edge.target),
                    OrderingDirection::Reverse => (&edge.target, &edge.source),
                    OrderingDirection::Ignored => continue,
                };
                if unresolved.contains(v) {
                    continue;
                }
                prop_assert!(result.ranks[v] > result.ranks[u]);
            }
        }

        /// Every node gets exactly one position and one tier slot.
        #[test]
        fn prop_layout_covers_all_nodes((nodes, edges) in graph_strategy()) {
            let result = assign_ranks_and_layout(&nodes, &edges, &LayoutConfig::default());
            prop_assert_eq!(result.positions.len(), nodes.len());
            let slotted: usize = result.layers.iter().map(Vec::len).sum();
            prop_assert_eq!(slotted, nodes.len());
        }
    }
}
