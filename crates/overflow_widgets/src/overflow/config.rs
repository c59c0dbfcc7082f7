//! Overflow container configuration
//!
//! Every field has a default, so partial documents deserialize:
//!
//! ```rust
//! use overflow_widgets::OverflowConfig;
//!
//! let config = OverflowConfig::from_toml_str("scroll_speed = 16.0").unwrap();
//! assert_eq!(config.scroll_speed, 16.0);
//! assert_eq!(config.scroll_distance, 10.0);
//! assert!(config.horizontal_scroll_indicators);
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

/// Default interval between auto-scroll steps, in milliseconds
pub const DEFAULT_SCROLL_SPEED: f32 = 10.0;
/// Default pixels moved per auto-scroll step
pub const DEFAULT_SCROLL_DISTANCE: f32 = 10.0;
/// Default tolerance subtracted from the scroll limits, in pixels
pub const DEFAULT_SCROLL_END_PADDING: f32 = 10.0;

/// Problems found by [`OverflowConfig::validate`].
///
/// Warnings are reported, never enforced: the offending value is used as
/// supplied.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigWarning {
    #[error("scroll_speed should be a positive number, got {0}")]
    NegativeScrollSpeed(f32),
    #[error("scroll_distance should be a positive number, got {0}")]
    NegativeScrollDistance(f32),
    #[error("scroll_end_padding should be a positive number, got {0}")]
    NegativeScrollEndPadding(f32),
}

/// Errors reading or writing a configuration document
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid overflow config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize overflow config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Overflow container configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverflowConfig {
    /// Interval between auto-scroll steps (ms)
    pub scroll_speed: f32,
    /// Pixels moved per auto-scroll step
    pub scroll_distance: f32,
    /// Tolerance subtracted from the scroll limits (px)
    pub scroll_end_padding: f32,
    /// Render the indicator overlay at all
    pub show_scroll_indicators: bool,
    /// Show left/right indicators
    pub horizontal_scroll_indicators: bool,
    /// Show up/down indicators
    pub vertical_scroll_indicators: bool,
    /// Auto-scroll while an indicator is hovered
    pub scroll_on_hover: bool,
    pub hide_horizontal_scrollbar: bool,
    pub hide_vertical_scrollbar: bool,
    /// Extra classes on the outer element
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// Extra classes on the inner (scrolling) element
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_class_name: Option<String>,
    /// Extra classes on left/right indicators
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizontal_indicator_class_name: Option<String>,
    /// Extra classes on up/down indicators
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical_indicator_class_name: Option<String>,
}

impl Default for OverflowConfig {
    fn default() -> Self {
        Self {
            scroll_speed: DEFAULT_SCROLL_SPEED,
            scroll_distance: DEFAULT_SCROLL_DISTANCE,
            scroll_end_padding: DEFAULT_SCROLL_END_PADDING,
            show_scroll_indicators: true,
            horizontal_scroll_indicators: true,
            vertical_scroll_indicators: false,
            scroll_on_hover: true,
            hide_horizontal_scrollbar: false,
            hide_vertical_scrollbar: false,
            class_name: None,
            container_class_name: None,
            horizontal_indicator_class_name: None,
            vertical_indicator_class_name: None,
        }
    }
}

impl OverflowConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document; missing keys take their defaults
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Serialize as a TOML document
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    /// Check the numeric options
    pub fn validate(&self) -> SmallVec<[ConfigWarning; 3]> {
        let mut warnings = SmallVec::new();
        if is_negative(self.scroll_speed) {
            warnings.push(ConfigWarning::NegativeScrollSpeed(self.scroll_speed));
        }
        if is_negative(self.scroll_distance) {
            warnings.push(ConfigWarning::NegativeScrollDistance(self.scroll_distance));
        }
        if is_negative(self.scroll_end_padding) {
            warnings.push(ConfigWarning::NegativeScrollEndPadding(
                self.scroll_end_padding,
            ));
        }
        warnings
    }

    /// Validate and log every warning. Returns how many were logged.
    pub fn log_warnings(&self) -> usize {
        let warnings = self.validate();
        for warning in &warnings {
            tracing::warn!("OverflowContainer: {}", warning);
        }
        warnings.len()
    }

    /// True if any numeric option differs from `other`
    pub fn numeric_changed(&self, other: &OverflowConfig) -> bool {
        self.scroll_speed != other.scroll_speed
            || self.scroll_distance != other.scroll_distance
            || self.scroll_end_padding != other.scroll_end_padding
    }
}

fn is_negative(value: f32) -> bool {
    value < 0.0 || value.is_nan()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = OverflowConfig::default();
        assert_eq!(config.scroll_speed, 10.0);
        assert_eq!(config.scroll_distance, 10.0);
        assert_eq!(config.scroll_end_padding, 10.0);
        assert!(config.show_scroll_indicators);
        assert!(config.horizontal_scroll_indicators);
        assert!(!config.vertical_scroll_indicators);
        assert!(config.scroll_on_hover);
        assert!(!config.hide_horizontal_scrollbar);
        assert!(!config.hide_vertical_scrollbar);
        assert!(config.class_name.is_none());
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_negative_values_warn_but_are_kept() {
        let config = OverflowConfig {
            scroll_speed: -5.0,
            scroll_end_padding: -1.0,
            ..Default::default()
        };

        let warnings = config.validate();
        assert_eq!(
            warnings.as_slice(),
            [
                ConfigWarning::NegativeScrollSpeed(-5.0),
                ConfigWarning::NegativeScrollEndPadding(-1.0),
            ]
        );
        assert_eq!(config.scroll_speed, -5.0);
        assert_eq!(config.log_warnings(), 2);
    }

    #[test]
    fn test_zero_is_not_a_warning() {
        let config = OverflowConfig {
            scroll_speed: 0.0,
            scroll_distance: 0.0,
            scroll_end_padding: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_warning_messages() {
        assert_eq!(
            ConfigWarning::NegativeScrollDistance(-2.0).to_string(),
            "scroll_distance should be a positive number, got -2"
        );
    }

    #[test]
    fn test_numeric_changed_ignores_flags() {
        let base = OverflowConfig::default();
        let flags_only = OverflowConfig {
            vertical_scroll_indicators: true,
            class_name: Some("x".into()),
            ..Default::default()
        };
        assert!(!base.numeric_changed(&flags_only));

        let faster = OverflowConfig {
            scroll_speed: 5.0,
            ..Default::default()
        };
        assert!(base.numeric_changed(&faster));
    }

    #[test]
    fn test_toml_round_trip_keeps_overrides() {
        let source = r#"
            scroll_distance = 25.0
            vertical_scroll_indicators = true
            class_name = "gallery"
        "#;
        let config = OverflowConfig::from_toml_str(source).unwrap();
        assert_eq!(config.scroll_distance, 25.0);
        assert!(config.vertical_scroll_indicators);
        assert_eq!(config.class_name.as_deref(), Some("gallery"));

        let written = config.to_toml_string().unwrap();
        assert!(!written.contains("container_class_name"));
        assert_eq!(OverflowConfig::from_toml_str(&written).unwrap(), config);
    }

    #[test]
    fn test_invalid_toml() {
        let err = OverflowConfig::from_toml_str("scroll_speed = \"fast\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_json_partial_document() {
        let config: OverflowConfig =
            serde_json::from_str(r#"{ "scroll_on_hover": false }"#).unwrap();
        assert!(!config.scroll_on_hover);
        assert_eq!(config.scroll_speed, 10.0);
    }
}
