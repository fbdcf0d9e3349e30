use crate::EnumConversionError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Relationship label carried by an edge of the skill graph.
///
/// The set is closed. Labels outside of it parse leniently to `UNKNOWN`, which
/// the semantics table treats as a non-ordering edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
#[allow(non_camel_case_types)]
pub enum RelationshipKind {
    // Ordering, source first
    PREREQUISITE,
    SUPERSEDED_BY,

    // Ordering, target first
    PART_OF,
    SPECIALIZES,
    BROADENS,
    DERIVES_FROM,
    REQUIRES_POLICY,
    ANTIPATTERN_OF,

    // Non-ordering
    EQUIVALENT_TO,
    ALIAS_OF,
    ALTERNATIVE_TO,
    CONFLICTS_WITH,
    COMPLEMENTS,
    CO_OCCURS_WITH,
    SIMILAR_TO,

    UNKNOWN,
}

impl RelationshipKind {
    pub const ALL: [RelationshipKind; 16] = [
        RelationshipKind::PREREQUISITE,
        RelationshipKind::SUPERSEDED_BY,
        RelationshipKind::PART_OF,
        RelationshipKind::SPECIALIZES,
        RelationshipKind::BROADENS,
        RelationshipKind::DERIVES_FROM,
        RelationshipKind::REQUIRES_POLICY,
        RelationshipKind::ANTIPATTERN_OF,
        RelationshipKind::EQUIVALENT_TO,
        RelationshipKind::ALIAS_OF,
        RelationshipKind::ALTERNATIVE_TO,
        RelationshipKind::CONFLICTS_WITH,
        RelationshipKind::COMPLEMENTS,
        RelationshipKind::CO_OCCURS_WITH,
        RelationshipKind::SIMILAR_TO,
        RelationshipKind::UNKNOWN,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipKind::PREREQUISITE => "PREREQUISITE",
            RelationshipKind::SUPERSEDED_BY => "SUPERSEDED_BY",
            RelationshipKind::PART_OF => "PART_OF",
            RelationshipKind::SPECIALIZES => "SPECIALIZES",
            RelationshipKind::BROADENS => "BROADENS",
            RelationshipKind::DERIVES_FROM => "DERIVES_FROM",
            RelationshipKind::REQUIRES_POLICY => "REQUIRES_POLICY",
            RelationshipKind::ANTIPATTERN_OF => "ANTIPATTERN_OF",
            RelationshipKind::EQUIVALENT_TO => "EQUIVALENT_TO",
            RelationshipKind::ALIAS_OF => "ALIAS_OF",
            RelationshipKind::ALTERNATIVE_TO => "ALTERNATIVE_TO",
            RelationshipKind::CONFLICTS_WITH => "CONFLICTS_WITH",
            RelationshipKind::COMPLEMENTS => "COMPLEMENTS",
            RelationshipKind::CO_OCCURS_WITH => "CO_OCCURS_WITH",
            RelationshipKind::SIMILAR_TO => "SIMILAR_TO",
            RelationshipKind::UNKNOWN => "UNKNOWN",
        }
    }

    /// Lenient parse. Case, spaces and dashes are normalized; anything
    /// unrecognized becomes `UNKNOWN`.
    pub fn from_label(label: &str) -> Self {
        Self::parse_normalized(label).unwrap_or(RelationshipKind::UNKNOWN)
    }

    fn parse_normalized(label: &str) -> Option<Self> {
        let normalized: String = label
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                c => c.to_ascii_uppercase(),
            })
            .collect();

        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == normalized)
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strict parse for callers that want typos rejected instead of ignored.
impl std::str::FromStr for RelationshipKind {
    type Err = EnumConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_normalized(s)
            .ok_or_else(|| EnumConversionError::InvalidRelationship(s.to_string()))
    }
}

impl From<String> for RelationshipKind {
    fn from(value: String) -> Self {
        Self::from_label(&value)
    }
}

impl From<RelationshipKind> for String {
    fn from(value: RelationshipKind) -> Self {
        value.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_label_normalizes_case_and_separators() {
        assert_eq!(
            RelationshipKind::from_label("part-of"),
            RelationshipKind::PART_OF
        );
        assert_eq!(
            RelationshipKind::from_label(" co occurs with "),
            RelationshipKind::CO_OCCURS_WITH
        );
        assert_eq!(
            RelationshipKind::from_label("Prerequisite"),
            RelationshipKind::PREREQUISITE
        );
    }

    #[test]
    fn test_unknown_label_is_lenient_but_strict_parse_fails() {
        assert_eq!(
            RelationshipKind::from_label("TEACHES"),
            RelationshipKind::UNKNOWN
        );
        assert_eq!(
            "TEACHES".parse::<RelationshipKind>(),
            Err(EnumConversionError::InvalidRelationship("TEACHES".to_string()))
        );
    }

    #[test]
    fn test_every_label_parses_back() {
        for kind in RelationshipKind::ALL {
            assert_eq!(kind.as_str().parse::<RelationshipKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_serde_uses_label_strings() {
        let json = serde_json::to_string(&RelationshipKind::DERIVES_FROM).unwrap();
        assert_eq!(json, r#""DERIVES_FROM""#);

        let kind: RelationshipKind = serde_json::from_str(r#""made_up""#).unwrap();
        assert_eq!(kind, RelationshipKind::UNKNOWN);
    }
}
