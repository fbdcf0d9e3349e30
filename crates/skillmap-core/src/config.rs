use crate::{EnumConversionError, LayoutDirection};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rule used to choose between nodes that are equally eligible for the next slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TieBreakKind {
    /// Numeric value of the first digit run in the id, then the id itself
    #[default]
    NumericId,
    Lexicographic,
    /// Display name, then id
    Name,
    /// Position in the input collection
    Insertion,
}

impl std::str::FromStr for TieBreakKind {
    type Err = EnumConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "numericid" | "numeric" => Ok(TieBreakKind::NumericId),
            "lexicographic" | "id" => Ok(TieBreakKind::Lexicographic),
            "name" => Ok(TieBreakKind::Name),
            "insertion" | "input" => Ok(TieBreakKind::Insertion),
            _ => Err(EnumConversionError::InvalidTieBreak(s.to_string())),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be a positive finite number, got {value}")]
    InvalidSpacing { field: &'static str, value: f32 },
    #[error("{field} must be a non-negative finite number, got {value}")]
    InvalidCurvature { field: &'static str, value: f32 },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LayoutConfig {
    /// Distance between consecutive ranks
    pub vertical_spacing: f32,
    /// Distance between neighbours inside a rank, and between linear positions
    pub horizontal_spacing: f32,
    pub direction: LayoutDirection,
    pub base_curvature: f32,
    /// Added per rank of distance between edge endpoints
    pub curvature_step: f32,
    /// Added per sequence position of distance in the linear layout
    pub linear_curvature_step: f32,
    /// Endpoints closer than this on the alignment axis get a straight edge
    pub straight_epsilon: f32,
    pub tie_break: TieBreakKind,
}

impl LayoutConfig {
    pub const DEFAULT_VERTICAL_SPACING: f32 = 120.0;
    pub const DEFAULT_HORIZONTAL_SPACING: f32 = 200.0;
    pub const DEFAULT_BASE_CURVATURE: f32 = 0.2;
    pub const DEFAULT_CURVATURE_STEP: f32 = 0.1;
    pub const DEFAULT_STRAIGHT_EPSILON: f32 = 1.0;

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("vertical_spacing", self.vertical_spacing),
            ("horizontal_spacing", self.horizontal_spacing),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidSpacing { field, value });
            }
        }

        for (field, value) in [
            ("base_curvature", self.base_curvature),
            ("curvature_step", self.curvature_step),
            ("linear_curvature_step", self.linear_curvature_step),
            ("straight_epsilon", self.straight_epsilon),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidCurvature { field, value });
            }
        }

        Ok(())
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            vertical_spacing: Self::DEFAULT_VERTICAL_SPACING,
            horizontal_spacing: Self::DEFAULT_HORIZONTAL_SPACING,
            direction: LayoutDirection::default(),
            base_curvature: Self::DEFAULT_BASE_CURVATURE,
            curvature_step: Self::DEFAULT_CURVATURE_STEP,
            linear_curvature_step: Self::DEFAULT_CURVATURE_STEP,
            straight_epsilon: Self::DEFAULT_STRAIGHT_EPSILON,
            tie_break: TieBreakKind::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: LayoutConfig =
            serde_json::from_str(r#"{"vertical_spacing": 80.0, "tie_break": "Name"}"#).unwrap();
        assert_eq!(config.vertical_spacing, 80.0);
        assert_eq!(
            config.horizontal_spacing,
            LayoutConfig::DEFAULT_HORIZONTAL_SPACING
        );
        assert_eq!(config.tie_break, TieBreakKind::Name);
        assert_eq!(config.direction, LayoutDirection::Vertical);
    }

    #[test]
    fn test_validate_rejects_bad_spacing() {
        let config = LayoutConfig {
            horizontal_spacing: 0.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidSpacing {
                field: "horizontal_spacing",
                value: 0.0
            })
        );

        let config = LayoutConfig {
            curvature_step: f32::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
        assert!(LayoutConfig::default().validate().is_ok());
    }

    #[test]
    fn test_tie_break_parse() {
        assert_eq!(
            "numeric-id".parse::<TieBreakKind>(),
            Ok(TieBreakKind::NumericId)
        );
        assert_eq!("INSERTION".parse::<TieBreakKind>(), Ok(TieBreakKind::Insertion));
        assert!("random".parse::<TieBreakKind>().is_err());
    }
}
