//! Post-layout edge curvature.
//!
//! Edges that span several tiers arc further out than edges between
//! neighbouring tiers, so long-range links stay clear of the labels of the
//! nodes they pass.

use crate::graph::{GraphAdapter, unique_edge_id};
use crate::layout::{LayoutKind, LayoutResult};
use serde::{Deserialize, Serialize};
use skillmap_core::{EdgeId, LayoutConfig, NodeId, SkillEdge};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderType {
    Straight,
    Curved,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeRender {
    pub render_type: RenderType,
    pub curvature: f32,
}

impl EdgeRender {
    pub const STRAIGHT: EdgeRender = EdgeRender {
        render_type: RenderType::Straight,
        curvature: 0.0,
    };

    pub fn curved(curvature: f32) -> Self {
        Self {
            render_type: RenderType::Curved,
            curvature,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvatureAssigner {
    pub base: f32,
    /// Added per level of distance between the endpoints
    pub step: f32,
    pub epsilon: f32,
}

impl CurvatureAssigner {
    /// Picks the rank step for hierarchical layouts and the position step for
    /// linear ones.
    pub fn for_layout(config: &LayoutConfig, kind: LayoutKind) -> Self {
        let step = match kind {
            LayoutKind::Hierarchical => config.curvature_step,
            LayoutKind::Linear => config.linear_curvature_step,
        };
        Self {
            base: config.base_curvature,
            step,
            epsilon: config.straight_epsilon,
        }
    }

    pub fn render(&self, aligned: bool, span: u32) -> EdgeRender {
        if aligned {
            EdgeRender::STRAIGHT
        } else {
            EdgeRender::curved(self.base + self.step * span as f32)
        }
    }

    /// Edges with an endpoint missing from the layout are left out of the result.
    pub fn assign<'e>(
        &self,
        edges: impl IntoIterator<Item = (&'e EdgeId, &'e NodeId, &'e NodeId)>,
        layout: &LayoutResult,
    ) -> HashMap<EdgeId, EdgeRender> {
        let axis = layout.alignment_axis();
        let levels = layout.levels();
        let mut renders = HashMap::new();

        for (id, source, target) in edges {
            let (Some(&from), Some(&to)) =
                (layout.positions.get(source), layout.positions.get(target))
            else {
                tracing::debug!("No layout position for an endpoint of edge {}", id);
                continue;
            };

            let aligned = (axis.of(from) - axis.of(to)).abs() < self.epsilon;
            let span = match (levels.get(source), levels.get(target)) {
                (Some(&a), Some(&b)) => a.abs_diff(b),
                _ => 0,
            };
            renders.insert(id.clone(), self.render(aligned, span));
        }

        renders
    }

    pub fn assign_for_graph<G: GraphAdapter>(
        &self,
        graph: &G,
        layout: &LayoutResult,
    ) -> HashMap<EdgeId, EdgeRender> {
        self.assign(
            graph.edges().map(|edge| (edge.id, edge.source, edge.target)),
            layout,
        )
    }
}

/// Curvature for plain edge lists against a finished layout.
///
/// Edges are keyed the way `GraphModel` stores them: missing or repeated ids
/// are replaced through `unique_edge_id`, in input order, so the result can be
/// handed to `apply_curvature` on a model built from the same lists.
pub fn assign_curvature(
    edges: &[SkillEdge],
    layout: &LayoutResult,
    config: &LayoutConfig,
) -> HashMap<EdgeId, EdgeRender> {
    let mut taken = HashSet::new();
    let mut keyed = Vec::with_capacity(edges.len());
    for edge in edges {
        if !layout.positions.contains_key(&edge.source)
            || !layout.positions.contains_key(&edge.target)
        {
            tracing::debug!("No layout position for an endpoint of edge {}", edge.id);
            continue;
        }
        let id = unique_edge_id(&edge.id, taken.len(), |id| taken.contains(id));
        taken.insert(id.clone());
        keyed.push((id, &edge.source, &edge.target));
    }

    CurvatureAssigner::for_layout(config, layout.kind).assign(
        keyed.iter().map(|(id, source, target)| (id, *source, *target)),
        layout,
    )
}

/// Store edge renders on the graph. Returns how many edges were updated.
pub fn apply_curvature<G: GraphAdapter>(
    graph: &mut G,
    renders: &HashMap<EdgeId, EdgeRender>,
) -> usize {
    renders
        .iter()
        .filter(|(id, render)| graph.set_edge_render(id, **render))
        .count()
}
