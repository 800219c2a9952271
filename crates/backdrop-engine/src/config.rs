//! Host-supplied renderer configuration
//!
//! Every field is optional on the wire; missing fields take the defaults
//! below. Colours are linear 0..1 channels.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default lattice spacing in device pixels
pub const DEFAULT_GRID_SPACING: f32 = 30.0;

/// Light blue
pub const DEFAULT_NODE_COLOR: [f32; 3] = [0.55, 0.75, 1.0];

/// Bright cyan
pub const DEFAULT_GLOW_COLOR: [f32; 3] = [0.0, 0.95, 1.0];

/// Dark navy, opaque
pub const DEFAULT_BACKGROUND_COLOR: [f32; 4] = [0.02, 0.04, 0.12, 1.0];

/// Renderer configuration
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RendererConfig {
    pub grid_spacing: f32,
    pub node_color: [f32; 3],
    pub glow_color: [f32; 3],
    pub background_color: [f32; 4],
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            grid_spacing: DEFAULT_GRID_SPACING,
            node_color: DEFAULT_NODE_COLOR,
            glow_color: DEFAULT_GLOW_COLOR,
            background_color: DEFAULT_BACKGROUND_COLOR,
        }
    }
}

impl RendererConfig {
    /// Parse and validate a JSON configuration object
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: RendererConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check spacing and colour ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.grid_spacing.is_finite() || self.grid_spacing <= 0.0 {
            return Err(ConfigError::InvalidSpacing(self.grid_spacing));
        }
        check_channels("nodeColor", &self.node_color)?;
        check_channels("glowColor", &self.glow_color)?;
        check_channels("backgroundColor", &self.background_color)?;
        Ok(())
    }
}

fn check_channels(field: &'static str, channels: &[f32]) -> Result<(), ConfigError> {
    match channels
        .iter()
        .enumerate()
        .find(|(_, v)| !(0.0..=1.0).contains(*v))
    {
        Some((index, &value)) => Err(ConfigError::ColorOutOfRange { field, index, value }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = RendererConfig::default();
        assert_eq!(config.grid_spacing, 30.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial_fills_defaults() {
        let config = RendererConfig::from_json(r#"{"gridSpacing": 45}"#).unwrap();
        assert_eq!(config.grid_spacing, 45.0);
        assert_eq!(config.node_color, DEFAULT_NODE_COLOR);
        assert_eq!(config.background_color, DEFAULT_BACKGROUND_COLOR);
    }

    #[test]
    fn test_from_json_empty_object() {
        let config = RendererConfig::from_json("{}").unwrap();
        assert_eq!(config, RendererConfig::default());
    }

    #[test]
    fn test_from_json_colors() {
        let config = RendererConfig::from_json(
            r#"{"nodeColor": [1, 0, 0], "backgroundColor": [0, 0, 0, 0.5]}"#,
        )
        .unwrap();
        assert_eq!(config.node_color, [1.0, 0.0, 0.0]);
        assert_eq!(config.background_color, [0.0, 0.0, 0.0, 0.5]);
    }

    #[test]
    fn test_rejects_non_positive_spacing() {
        assert_eq!(
            RendererConfig::from_json(r#"{"gridSpacing": 0}"#),
            Err(ConfigError::InvalidSpacing(0.0))
        );
        assert!(RendererConfig::from_json(r#"{"gridSpacing": -5}"#).is_err());
    }

    #[test]
    fn test_rejects_out_of_range_channel() {
        let err = RendererConfig::from_json(r#"{"glowColor": [0, 2, 0]}"#).unwrap_err();
        assert_eq!(
            err,
            ConfigError::ColorOutOfRange {
                field: "glowColor",
                index: 1,
                value: 2.0
            }
        );
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            RendererConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_string(&RendererConfig::default()).unwrap();
        assert!(json.contains("\"gridSpacing\""));
        assert!(json.contains("\"backgroundColor\""));
    }
}
