//! Relationship semantics.
//!
//! Maps each relationship label to the ordering rule it implies between its
//! endpoints and to the visual weight it is drawn with.

use crate::graph::EdgeRef;
use crate::style::VisualWeight;
use serde::{Deserialize, Serialize};
use skillmap_core::{NodeId, RelationshipKind};
use std::collections::HashMap;

/// Which endpoint of a raw edge has to come first in a study sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderingDirection {
    /// source precedes target
    Forward,
    /// target precedes source
    Reverse,
    /// no ordering constraint
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub direction: OrderingDirection,
    pub weight: VisualWeight,
}

impl Classification {
    pub const IGNORED: Classification = Classification {
        direction: OrderingDirection::Ignored,
        weight: VisualWeight::Light,
    };

    pub fn is_ordering(&self) -> bool {
        self.direction != OrderingDirection::Ignored
    }
}

/// The built-in rule for a relationship label.
pub fn classify(kind: RelationshipKind) -> Classification {
    use OrderingDirection::*;
    use RelationshipKind::*;

    let (direction, weight) = match kind {
        PREREQUISITE => (Forward, VisualWeight::Strong),
        SUPERSEDED_BY => (Forward, VisualWeight::Medium),

        PART_OF | SPECIALIZES => (Reverse, VisualWeight::Strong),
        BROADENS | DERIVES_FROM => (Reverse, VisualWeight::Medium),
        REQUIRES_POLICY | ANTIPATTERN_OF => (Reverse, VisualWeight::Medium),

        EQUIVALENT_TO | ALIAS_OF | ALTERNATIVE_TO | CONFLICTS_WITH => {
            (Ignored, VisualWeight::Medium)
        }
        COMPLEMENTS | CO_OCCURS_WITH | SIMILAR_TO => (Ignored, VisualWeight::Light),

        UNKNOWN => return Classification::IGNORED,
    };

    Classification { direction, weight }
}

/// Lookup table from relationship label to classification.
///
/// Starts from the built-in rules; individual labels can be overridden, which
/// is how callers plug in a different domain vocabulary.
#[derive(Debug, Clone, Default)]
pub struct RelationshipSemantics {
    overrides: HashMap<RelationshipKind, Classification>,
}

impl RelationshipSemantics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_override(mut self, kind: RelationshipKind, classification: Classification) -> Self {
        self.overrides.insert(kind, classification);
        self
    }

    pub fn classify(&self, kind: RelationshipKind) -> Classification {
        self.overrides
            .get(&kind)
            .copied()
            .unwrap_or_else(|| classify(kind))
    }

    /// Dependency arc `(before, after)` for an edge, or `None` when the edge
    /// carries no ordering constraint.
    pub fn orient<'a>(&self, edge: &EdgeRef<'a>) -> Option<(&'a NodeId, &'a NodeId)> {
        match self.classify(edge.kind).direction {
            OrderingDirection::Forward => Some((edge.source, edge.target)),
            OrderingDirection::Reverse => Some((edge.target, edge.source)),
            OrderingDirection::Ignored => None,
        }
    }
}
