//! Reordering of user-authored study flows.
//!
//! Every flow edge is an explicit "source before target" constraint. Nodes
//! without constraints keep their relative input order, so running the
//! reorder on its own output changes nothing.

use crate::dependency::{DependencyGraph, NodeTable};
use crate::tie_break::{Insertion, priorities};
use skillmap_core::{FlowEdge, FlowItem};

/// Reorder `nodes` so every edge points forward.
///
/// Edges naming unknown nodes are ignored. Nodes caught in a cycle go to the
/// end, in their input order.
pub fn reorder_by_flow<T: FlowItem + Clone>(nodes: &[T], edges: &[FlowEdge]) -> Vec<T> {
    if edges.is_empty() {
        return nodes.to_vec();
    }

    let table = NodeTable::new(nodes.iter().map(|node| (node.flow_id(), "")));
    let dependencies =
        DependencyGraph::build(&table, edges.iter().map(|edge| (&edge.source, &edge.target)));
    if dependencies.arc_count() == 0 {
        return nodes.to_vec();
    }

    let walk = dependencies.walk(&priorities(table.keys(), &Insertion));
    if !walk.is_complete() {
        tracing::warn!(
            "Study flow has a cycle; {} nodes keep their original relative order at the end",
            walk.unresolved().len()
        );
    }

    walk.order.iter().map(|&idx| nodes[idx].clone()).collect()
}

/// Whether every resolvable edge already points forward in `nodes`.
pub fn is_flow_ordered<T: FlowItem>(nodes: &[T], edges: &[FlowEdge]) -> bool {
    let table = NodeTable::new(nodes.iter().map(|node| (node.flow_id(), "")));
    edges.iter().all(|edge| {
        match (table.position(&edge.source), table.position(&edge.target)) {
            (Some(s), Some(t)) => s <= t,
            _ => true,
        }
    })
}
