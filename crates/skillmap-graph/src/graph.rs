use crate::curvature::EdgeRender;
use serde::{Deserialize, Serialize};
use skillmap_core::{EdgeId, NodeAttributes, NodeId, RelationshipKind, SkillEdge, SkillNode};
use std::collections::HashMap;
use std::fmt;
use std::ops::{Index, IndexMut};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeIndex(pub usize);

impl fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeIndex(pub usize);

impl fmt::Display for EdgeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeDirection {
    Outgoing,
    Incoming,
    Both,
}

/// Borrowed view of a node as the algorithms see it.
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    pub id: &'a NodeId,
    pub name: &'a str,
}

/// Borrowed view of an edge as the algorithms see it.
#[derive(Debug, Clone, Copy)]
pub struct EdgeRef<'a> {
    pub id: &'a EdgeId,
    pub source: &'a NodeId,
    pub target: &'a NodeId,
    pub kind: RelationshipKind,
}

/// A value computed by the layout engine and written back onto a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DerivedAttribute {
    Rank(u32),
    Position(Vec2),
    OrderIndex(usize),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DerivedAttributes {
    pub rank: Option<u32>,
    pub position: Option<Vec2>,
    pub order_index: Option<usize>,
}

impl DerivedAttributes {
    fn set(&mut self, attr: DerivedAttribute) {
        match attr {
            DerivedAttribute::Rank(rank) => self.rank = Some(rank),
            DerivedAttribute::Position(position) => self.position = Some(position),
            DerivedAttribute::OrderIndex(index) => self.order_index = Some(index),
        }
    }
}

/// Minimal read/write surface the ordering and layout code depends on.
///
/// Node and edge iteration must be stable between calls: the tie-break rules
/// and the edge relaxation order are derived from it.
pub trait GraphAdapter {
    fn nodes(&self) -> impl Iterator<Item = NodeRef<'_>>;

    fn edges(&self) -> impl Iterator<Item = EdgeRef<'_>>;

    fn edges_of(&self, id: &NodeId, direction: EdgeDirection) -> Vec<EdgeRef<'_>> {
        self.edges()
            .filter(|edge| match direction {
                EdgeDirection::Outgoing => edge.source == id,
                EdgeDirection::Incoming => edge.target == id,
                EdgeDirection::Both => edge.source == id || edge.target == id,
            })
            .collect()
    }

    /// Distinct nodes joined to `id` by an edge in either direction.
    fn neighbors(&self, id: &NodeId) -> Vec<&NodeId> {
        let mut neighbors: Vec<&NodeId> = Vec::new();
        for edge in self.edges_of(id, EdgeDirection::Both) {
            let other = if edge.source == id {
                edge.target
            } else {
                edge.source
            };
            if other != id && !neighbors.contains(&other) {
                neighbors.push(other);
            }
        }
        neighbors
    }

    /// Returns false when the node is unknown.
    fn set_attribute(&mut self, id: &NodeId, attr: DerivedAttribute) -> bool;

    /// Returns false when the edge is unknown.
    fn set_edge_render(&mut self, id: &EdgeId, render: EdgeRender) -> bool;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutNode {
    pub id: NodeId,
    pub name: String,
    pub attributes: NodeAttributes,
    pub derived: DerivedAttributes,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutEdge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    pub kind: RelationshipKind,
    pub source_idx: NodeIndex,
    pub target_idx: NodeIndex,
    pub render: Option<EdgeRender>,
}

#[derive(Debug, Default)]
pub struct Graph {
    nodes: Vec<LayoutNode>,
    edges: Vec<LayoutEdge>,
}

impl Graph {
    pub fn add_node(&mut self, node: LayoutNode) -> NodeIndex {
        let idx = NodeIndex(self.nodes.len());
        self.nodes.push(node);
        idx
    }

    pub fn add_edge(
        &mut self,
        source_idx: NodeIndex,
        target_idx: NodeIndex,
        mut edge: LayoutEdge,
    ) -> EdgeIndex {
        let idx = EdgeIndex(self.edges.len());
        edge.source_idx = source_idx;
        edge.target_idx = target_idx;
        self.edges.push(edge);
        idx
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> {
        (0..self.nodes.len()).map(NodeIndex)
    }

    pub fn edge_indices(&self) -> impl Iterator<Item = EdgeIndex> {
        (0..self.edges.len()).map(EdgeIndex)
    }
}

impl Index<NodeIndex> for Graph {
    type Output = LayoutNode;
    fn index(&self, index: NodeIndex) -> &Self::Output {
        &self.nodes[index.0]
    }
}

impl IndexMut<NodeIndex> for Graph {
    fn index_mut(&mut self, index: NodeIndex) -> &mut Self::Output {
        &mut self.nodes[index.0]
    }
}

impl Index<EdgeIndex> for Graph {
    type Output = LayoutEdge;
    fn index(&self, index: EdgeIndex) -> &Self::Output {
        &self.edges[index.0]
    }
}

impl IndexMut<EdgeIndex> for Graph {
    fn index_mut(&mut self, index: EdgeIndex) -> &mut Self::Output {
        &mut self.edges[index.0]
    }
}

/// Id under which an edge is stored, given the ids already taken.
///
/// An empty id becomes `e{n}`, counting up from `ordinal`. A repeated id gets a
/// `#k` suffix. Either way the first free candidate wins, so no edge is lost
/// to an id collision.
pub fn unique_edge_id(
    requested: &EdgeId,
    ordinal: usize,
    taken: impl Fn(&EdgeId) -> bool,
) -> EdgeId {
    if !requested.as_str().is_empty() && !taken(requested) {
        return requested.clone();
    }

    let (prefix, mut n) = if requested.as_str().is_empty() {
        ("e".to_string(), ordinal)
    } else {
        (format!("{}#", requested), 1)
    };
    loop {
        let candidate = EdgeId(format!("{}{}", prefix, n));
        if !taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

/// In-memory skill graph: an index arena plus id lookup tables.
#[derive(Debug, Default)]
pub struct GraphModel {
    pub graph: Graph,
    pub node_map: HashMap<NodeId, NodeIndex>,
    pub edge_map: HashMap<EdgeId, EdgeIndex>,
}

impl GraphModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(nodes: &[SkillNode], edges: &[SkillEdge]) -> Self {
        let mut model = Self::new();
        for node in nodes {
            model.add_node(node.clone());
        }
        for edge in edges {
            model.add_edge(edge.clone());
        }
        model
    }

    /// Duplicate ids are ignored; the first node wins.
    pub fn add_node(&mut self, node: SkillNode) {
        if self.node_map.contains_key(&node.id) {
            tracing::debug!("Ignoring duplicate node {}", node.id);
            return;
        }

        let id = node.id.clone();
        let idx = self.graph.add_node(LayoutNode {
            id: node.id,
            name: node.name,
            attributes: node.attributes,
            derived: DerivedAttributes::default(),
        });
        self.node_map.insert(id, idx);
    }

    /// Edges whose endpoints are not in the model are dropped.
    pub fn add_edge(&mut self, edge: SkillEdge) {
        let (Some(&src), Some(&target)) = (
            self.node_map.get(&edge.source),
            self.node_map.get(&edge.target),
        ) else {
            if !self.node_map.contains_key(&edge.source) {
                tracing::warn!(
                    "Dropping edge {:?} because source node {} is missing from graph model",
                    edge.id,
                    edge.source
                );
            }
            if !self.node_map.contains_key(&edge.target) {
                tracing::warn!(
                    "Dropping edge {:?} because target node {} is missing from graph model",
                    edge.id,
                    edge.target
                );
            }
            return;
        };

        let id = unique_edge_id(&edge.id, self.graph.edge_count(), |id| {
            self.edge_map.contains_key(id)
        });
        if id != edge.id && !edge.id.as_str().is_empty() {
            tracing::debug!("Edge id {} is already in use; storing the edge as {}", edge.id, id);
        }

        let idx = self.graph.add_edge(
            src,
            target,
            LayoutEdge {
                id: id.clone(),
                source: edge.source,
                target: edge.target,
                kind: edge.kind,
                source_idx: src,
                target_idx: target,
                render: None,
            },
        );
        self.edge_map.insert(id, idx);
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn get_node(&self, id: &NodeId) -> Option<&LayoutNode> {
        self.node_map.get(id).map(|&idx| &self.graph[idx])
    }

    pub fn get_edge(&self, id: &EdgeId) -> Option<&LayoutEdge> {
        self.edge_map.get(id).map(|&idx| &self.graph[idx])
    }

    /// Drop every rank, coordinate, order index and edge render computed so far.
    pub fn clear_derived(&mut self) {
        let nodes: Vec<_> = self.graph.node_indices().collect();
        for idx in nodes {
            self.graph[idx].derived = DerivedAttributes::default();
        }
        let edges: Vec<_> = self.graph.edge_indices().collect();
        for idx in edges {
            self.graph[idx].render = None;
        }
    }

    /// Nodes in insertion order, with their derived attributes.
    pub fn layout_nodes(&self) -> &[LayoutNode] {
        &self.graph.nodes
    }

    pub fn layout_edges(&self) -> &[LayoutEdge] {
        &self.graph.edges
    }
}

impl GraphAdapter for GraphModel {
    fn nodes(&self) -> impl Iterator<Item = NodeRef<'_>> {
        self.graph.nodes.iter().map(|node| NodeRef {
            id: &node.id,
            name: &node.name,
        })
    }

    fn edges(&self) -> impl Iterator<Item = EdgeRef<'_>> {
        self.graph.edges.iter().map(|edge| EdgeRef {
            id: &edge.id,
            source: &edge.source,
            target: &edge.target,
            kind: edge.kind,
        })
    }

    fn set_attribute(&mut self, id: &NodeId, attr: DerivedAttribute) -> bool {
        match self.node_map.get(id) {
            Some(&idx) => {
                self.graph[idx].derived.set(attr);
                true
            }
            None => false,
        }
    }

    fn set_edge_render(&mut self, id: &EdgeId, render: EdgeRender) -> bool {
        match self.edge_map.get(id) {
            Some(&idx) => {
                self.graph[idx].render = Some(render);
                true
            }
            None => false,
        }
    }
}
