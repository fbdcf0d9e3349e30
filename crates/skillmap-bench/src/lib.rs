use skillmap_core::{FlowEdge, NodeId, RelationshipKind, SkillEdge, SkillNode};

/// A layered skill graph: `width` nodes per tier, each node depending on up to
/// three nodes of the tier above, plus a few non-ordering cross links.
pub fn generate_skill_graph(tiers: usize, width: usize) -> (Vec<SkillNode>, Vec<SkillEdge>) {
    let mut nodes = Vec::with_capacity(tiers * width);
    let mut edges = Vec::new();

    for tier in 0..tiers {
        for slot in 0..width {
            let idx = tier * width + slot;
            nodes.push(SkillNode::new(idx.to_string(), format!("Skill_{}", idx)));
            if tier == 0 {
                continue;
            }

            for parent in [slot, (slot + 1) % width, (slot + 7) % width] {
                let parent_idx = (tier - 1) * width + parent;
                let kind = if parent_idx % 2 == 0 {
                    RelationshipKind::PREREQUISITE
                } else {
                    RelationshipKind::PART_OF
                };
                let (source, target) = match kind {
                    RelationshipKind::PART_OF => (idx, parent_idx),
                    _ => (parent_idx, idx),
                };
                edges.push(SkillEdge::new(
                    format!("e{}", edges.len()),
                    source.to_string(),
                    target.to_string(),
                    kind,
                ));
            }

            if slot % 5 == 0 && idx >= 3 {
                edges.push(SkillEdge::new(
                    format!("e{}", edges.len()),
                    idx.to_string(),
                    (idx - 3).to_string(),
                    RelationshipKind::SIMILAR_TO,
                ));
            }
        }
    }

    (nodes, edges)
}

/// A study flow of `len` nodes listed back to front, chained by forward edges.
pub fn generate_flow(len: usize) -> (Vec<NodeId>, Vec<FlowEdge>) {
    let nodes = (0..len)
        .rev()
        .map(|i| NodeId::new(format!("n{}", i)))
        .collect();
    let edges = (1..len)
        .map(|i| FlowEdge::new(format!("n{}", i - 1), format!("n{}", i)))
        .collect();
    (nodes, edges)
}
