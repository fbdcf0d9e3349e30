pub mod curvature;
pub mod dependency;
pub mod document;
pub mod flow;
pub mod graph;
pub mod layout;
pub mod semantics;
pub mod sequencer;
pub mod style;
pub mod tie_break;

pub use curvature::{
    CurvatureAssigner, EdgeRender, RenderType, apply_curvature, assign_curvature,
};
pub use dependency::{DependencyGraph, NodeTable, TopoWalk};
pub use document::{
    DocumentError, FlowDocument, GraphDocument, load_flow_document, load_graph_document,
    load_layout_config,
};
pub use flow::{is_flow_ordered, reorder_by_flow};
pub use graph::{
    DerivedAttribute, DerivedAttributes, EdgeDirection, EdgeIndex, EdgeRef, GraphAdapter,
    GraphModel, LayoutEdge, LayoutNode, NodeIndex, NodeRef, Vec2,
};
pub use layout::{
    Axis, HierarchicalLayouter, LayoutKind, LayoutResult, Layouter, LinearLayouter,
    apply_layout, assign_ranks_and_layout,
};
pub use semantics::{Classification, OrderingDirection, RelationshipSemantics, classify};
pub use sequencer::{Sequence, Sequencer, sequence};
pub use style::{
    Color, EdgeStyle, VisualWeight, get_edge_color, get_edge_style, get_relationship_label,
};
pub use tie_break::{
    ByName, Insertion, Lexicographic, NodeKey, NumericId, TieBreak, priorities, tie_break_for,
};
