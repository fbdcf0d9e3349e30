//! Edge Style System
//!
//! Visual weight classes for relationship labels and the colors and stroke
//! settings the rendering layer draws them with.

use crate::semantics::classify;
use serde::{Deserialize, Serialize};
use skillmap_core::RelationshipKind;

/// RGB color representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn lighten(&self, factor: f32) -> Self {
        Self {
            r: ((self.r as f32) + (255.0 - self.r as f32) * factor) as u8,
            g: ((self.g as f32) + (255.0 - self.g as f32) * factor) as u8,
            b: ((self.b as f32) + (255.0 - self.b as f32) * factor) as u8,
            a: self.a,
        }
    }
}

/// How prominently a relationship is drawn. Ordered lightest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VisualWeight {
    Light,
    Medium,
    Strong,
}

impl VisualWeight {
    pub fn width(&self) -> f32 {
        match self {
            VisualWeight::Light => 1.0,
            VisualWeight::Medium => 1.5,
            VisualWeight::Strong => 2.5,
        }
    }
}

/// Edge color and style
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeStyle {
    pub color: Color,
    pub width: f32,
    pub dashed: bool,
    pub arrow_head: bool,
}

// ============================================================================
// Color Constants
// ============================================================================

pub const COLOR_EDGE_PREREQUISITE: Color = Color::rgb(200, 160, 80);
pub const COLOR_EDGE_HIERARCHY: Color = Color::rgb(80, 130, 180);
pub const COLOR_EDGE_LINEAGE: Color = Color::rgb(130, 100, 160);
pub const COLOR_EDGE_POLICY: Color = Color::rgb(80, 140, 100);
pub const COLOR_EDGE_ANTIPATTERN: Color = Color::rgb(200, 80, 80);
pub const COLOR_EDGE_EQUIVALENCE: Color = Color::rgb(80, 150, 150);
pub const COLOR_EDGE_ASSOCIATION: Color = Color::rgb(140, 140, 140);
pub const COLOR_EDGE_UNKNOWN: Color = Color::rgb(120, 120, 120);

pub const COLOR_FOCUS_BORDER: Color = Color::rgb(255, 200, 100);

// ============================================================================
// Style Functions
// ============================================================================

pub fn get_edge_style(kind: RelationshipKind, is_active: bool, is_focused: bool) -> EdgeStyle {
    let base_color = get_edge_color(kind);
    let base_width = classify(kind).weight.width();

    let (color, width) = if is_active {
        (COLOR_FOCUS_BORDER, base_width * 2.0)
    } else if is_focused {
        (base_color.lighten(0.3), base_width * 1.5)
    } else {
        (base_color, base_width)
    };

    EdgeStyle {
        color,
        width,
        dashed: is_dashed_edge(kind),
        arrow_head: has_arrow_head(kind),
    }
}

/// Get the base color for a relationship kind
pub fn get_edge_color(kind: RelationshipKind) -> Color {
    match kind {
        RelationshipKind::PREREQUISITE => COLOR_EDGE_PREREQUISITE,
        RelationshipKind::PART_OF
        | RelationshipKind::SPECIALIZES
        | RelationshipKind::BROADENS => COLOR_EDGE_HIERARCHY,
        RelationshipKind::DERIVES_FROM | RelationshipKind::SUPERSEDED_BY => COLOR_EDGE_LINEAGE,
        RelationshipKind::REQUIRES_POLICY => COLOR_EDGE_POLICY,
        RelationshipKind::ANTIPATTERN_OF | RelationshipKind::CONFLICTS_WITH => {
            COLOR_EDGE_ANTIPATTERN
        }
        RelationshipKind::EQUIVALENT_TO
        | RelationshipKind::ALIAS_OF
        | RelationshipKind::ALTERNATIVE_TO => COLOR_EDGE_EQUIVALENCE,
        RelationshipKind::COMPLEMENTS
        | RelationshipKind::CO_OCCURS_WITH
        | RelationshipKind::SIMILAR_TO => COLOR_EDGE_ASSOCIATION,
        RelationshipKind::UNKNOWN => COLOR_EDGE_UNKNOWN,
    }
}

/// Non-ordering relationships are drawn dashed
fn is_dashed_edge(kind: RelationshipKind) -> bool {
    !classify(kind).is_ordering()
}

fn has_arrow_head(kind: RelationshipKind) -> bool {
    !matches!(
        kind,
        RelationshipKind::EQUIVALENT_TO
            | RelationshipKind::ALIAS_OF
            | RelationshipKind::CO_OCCURS_WITH
            | RelationshipKind::SIMILAR_TO
    )
}

pub fn get_relationship_label(kind: RelationshipKind) -> &'static str {
    match kind {
        RelationshipKind::PREREQUISITE => "prerequisite",
        RelationshipKind::SUPERSEDED_BY => "superseded by",
        RelationshipKind::PART_OF => "part of",
        RelationshipKind::SPECIALIZES => "specializes",
        RelationshipKind::BROADENS => "broadens",
        RelationshipKind::DERIVES_FROM => "derives from",
        RelationshipKind::REQUIRES_POLICY => "requires policy",
        RelationshipKind::ANTIPATTERN_OF => "antipattern of",
        RelationshipKind::EQUIVALENT_TO => "equivalent to",
        RelationshipKind::ALIAS_OF => "alias of",
        RelationshipKind::ALTERNATIVE_TO => "alternative to",
        RelationshipKind::CONFLICTS_WITH => "conflicts with",
        RelationshipKind::COMPLEMENTS => "complements",
        RelationshipKind::CO_OCCURS_WITH => "co-occurs with",
        RelationshipKind::SIMILAR_TO => "similar to",
        RelationshipKind::UNKNOWN => "related",
    }
}
