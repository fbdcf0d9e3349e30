use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub mod config;
pub mod relationship;

pub use config::{ConfigError, LayoutConfig, TieBreakKind};
pub use relationship::RelationshipKind;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(pub String);

impl EdgeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EdgeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Error type for string to enum conversion failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnumConversionError {
    #[error("Invalid relationship label: {0}")]
    InvalidRelationship(String),
    #[error("Invalid layout direction: {0}")]
    InvalidLayoutDirection(String),
    #[error("Invalid tie-break rule: {0}")]
    InvalidTieBreak(String),
}

/// Schema for the attribute bag carried by a skill node.
///
/// The layout engine never inspects these; they travel with the node so the
/// rendering layer gets them back untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeAttributes {
    pub level: Option<String>,
    pub category: Option<String>,
    pub source: Option<String>,
    pub x: Option<f32>,
    pub y: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillNode {
    pub id: NodeId,
    /// Display label
    #[serde(default, alias = "label")]
    pub name: String,
    #[serde(flatten)]
    pub attributes: NodeAttributes,
}

impl SkillNode {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: NodeId::new(id),
            name: name.into(),
            attributes: NodeAttributes::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillEdge {
    /// May be empty in authored documents; the graph model fills it in
    #[serde(default)]
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    #[serde(rename = "type", alias = "kind")]
    pub kind: RelationshipKind,
}

impl SkillEdge {
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
        kind: RelationshipKind,
    ) -> Self {
        Self {
            id: EdgeId::new(id),
            source: NodeId::new(source),
            target: NodeId::new(target),
            kind,
        }
    }
}

// ============================================================================
// Study Flow Types
// ============================================================================

/// A node placed into a user-authored study flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseNode {
    pub id: NodeId,
    #[serde(default, alias = "label")]
    pub name: String,
    #[serde(flatten)]
    pub attributes: NodeAttributes,
    /// Authored lesson content, opaque to the ordering logic
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl CourseNode {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: NodeId::new(id),
            name: name.into(),
            attributes: NodeAttributes::default(),
            content: None,
        }
    }
}

/// A user-drawn connection in the flow editor. The source always precedes the target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowEdge {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EdgeId>,
    pub source: NodeId,
    pub target: NodeId,
}

impl FlowEdge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: None,
            source: NodeId::new(source),
            target: NodeId::new(target),
        }
    }
}

/// Anything that can be placed into a study flow.
pub trait FlowItem {
    fn flow_id(&self) -> &NodeId;
}

impl FlowItem for CourseNode {
    fn flow_id(&self) -> &NodeId {
        &self.id
    }
}

impl FlowItem for SkillNode {
    fn flow_id(&self) -> &NodeId {
        &self.id
    }
}

impl FlowItem for NodeId {
    fn flow_id(&self) -> &NodeId {
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LayoutDirection {
    Horizontal,
    /// Ranks grow downwards
    #[default]
    Vertical,
}

impl std::str::FromStr for LayoutDirection {
    type Err = EnumConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "horizontal" | "lr" | "left-right" => Ok(LayoutDirection::Horizontal),
            "vertical" | "tb" | "top-bottom" => Ok(LayoutDirection::Vertical),
            _ => Err(EnumConversionError::InvalidLayoutDirection(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_edge_reads_type_field() {
        let json = r#"{"id":"e1","source":"0","target":"1","type":"PREREQUISITE"}"#;
        let edge: SkillEdge = serde_json::from_str(json).unwrap();
        assert_eq!(edge.kind, RelationshipKind::PREREQUISITE);
        assert_eq!(edge.source, NodeId::from("0"));
    }

    #[test]
    fn test_skill_node_flattens_attributes() {
        let json = r#"{"id":"7","label":"Ownership","level":"beginner","category":"rust"}"#;
        let node: SkillNode = serde_json::from_str(json).unwrap();
        assert_eq!(node.name, "Ownership");
        assert_eq!(node.attributes.level.as_deref(), Some("beginner"));
        assert_eq!(node.attributes.category.as_deref(), Some("rust"));
        assert!(node.attributes.x.is_none());
    }

    #[test]
    fn test_node_id_serializes_as_plain_string() {
        let json = serde_json::to_string(&NodeId::from("abc")).unwrap();
        assert_eq!(json, r#""abc""#);
    }

    #[test]
    fn test_layout_direction_parse() {
        assert_eq!(
            "Horizontal".parse::<LayoutDirection>(),
            Ok(LayoutDirection::Horizontal)
        );
        assert_eq!("tb".parse::<LayoutDirection>(), Ok(LayoutDirection::Vertical));
        assert!("diagonal".parse::<LayoutDirection>().is_err());
    }

    #[test]
    fn test_flow_edge_without_id() {
        let edge: FlowEdge = serde_json::from_str(r#"{"source":"a","target":"b"}"#).unwrap();
        assert_eq!(edge, FlowEdge::new("a", "b"));
    }
}
