//! JSON documents consumed by the command-line driver.

use crate::graph::GraphModel;
use serde::{Deserialize, Serialize};
use skillmap_core::{ConfigError, CourseNode, FlowEdge, LayoutConfig, SkillEdge, SkillNode};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid document JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid layout config: {0}")]
    Config(#[from] ConfigError),
}

/// A skill graph as stored on disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    #[serde(default)]
    pub nodes: Vec<SkillNode>,
    #[serde(default, alias = "links")]
    pub edges: Vec<SkillEdge>,
}

impl GraphDocument {
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn into_model(self) -> GraphModel {
        let mut model = GraphModel::new();
        for node in self.nodes {
            model.add_node(node);
        }
        for edge in self.edges {
            model.add_edge(edge);
        }
        model
    }
}

/// An ordered study flow: the selected nodes plus the connections drawn between them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowDocument {
    #[serde(default)]
    pub nodes: Vec<CourseNode>,
    #[serde(default)]
    pub edges: Vec<FlowEdge>,
}

impl FlowDocument {
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(json)?)
    }
}

fn read(path: &Path) -> Result<String, DocumentError> {
    fs::read_to_string(path).map_err(|source| DocumentError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_graph_document(path: impl AsRef<Path>) -> Result<GraphDocument, DocumentError> {
    let path = path.as_ref();
    let document = GraphDocument::from_json(&read(path)?)?;
    tracing::debug!(
        "Loaded {} nodes and {} edges from {:?}",
        document.nodes.len(),
        document.edges.len(),
        path
    );
    Ok(document)
}

pub fn load_flow_document(path: impl AsRef<Path>) -> Result<FlowDocument, DocumentError> {
    FlowDocument::from_json(&read(path.as_ref())?)
}

/// Missing fields take their defaults; the result is validated before it is returned.
pub fn load_layout_config(path: impl AsRef<Path>) -> Result<LayoutConfig, DocumentError> {
    let config: LayoutConfig = serde_json::from_str(&read(path.as_ref())?)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphAdapter;
    use skillmap_core::{NodeId, RelationshipKind};

    #[test]
    fn test_graph_document_from_json() {
        let json = r#"{
            "nodes": [
                {"id": "0", "label": "Ownership"},
                {"id": "1", "name": "Borrowing", "level": "intermediate"}
            ],
            "edges": [
                {"id": "e0", "source": "0", "target": "1", "type": "PREREQUISITE"},
                {"source": "1", "target": "0", "type": "made-up"}
            ]
        }"#;

        let document = GraphDocument::from_json(json).unwrap();
        assert_eq!(document.nodes[0].name, "Ownership");
        assert_eq!(document.edges[1].kind, RelationshipKind::UNKNOWN);

        let model = document.into_model();
        assert_eq!(model.node_count(), 2);
        assert_eq!(model.edges().count(), 2);
        assert!(model.get_node(&NodeId::from("1")).is_some());
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let document = GraphDocument::from_json("{}").unwrap();
        assert!(document.nodes.is_empty());
        assert!(document.edges.is_empty());

        let flow = FlowDocument::from_json(r#"{"nodes": [{"id": "a"}]}"#).unwrap();
        assert_eq!(flow.nodes.len(), 1);
        assert!(flow.edges.is_empty());
    }

    #[test]
    fn test_bad_json_is_reported() {
        let err = GraphDocument::from_json("{\"nodes\": 3}").unwrap_err();
        assert!(matches!(err, DocumentError::Json(_)));
    }

    #[test]
    fn test_missing_file_is_reported_with_path() {
        let err = load_graph_document("/definitely/not/here.json").unwrap_err();
        match err {
            DocumentError::Io { path, .. } => {
                assert_eq!(path, PathBuf::from("/definitely/not/here.json"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
