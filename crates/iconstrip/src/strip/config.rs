//! Strip configuration.
//!
//! Every field has a default, so a config file only needs the values it
//! changes:
//!
//! ```toml
//! padding = 8.0
//! icon_diameter = 44.0
//! background = "#F2F2F7FF"
//!
//! [long_press]
//! minimum_duration_ms = 300
//! ```

use std::path::Path;
use std::time::Duration;

use iconstrip_render::{Color, Point, Shadow};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::gesture::{duration_ms, LongPressConfig};

/// Default spacing between icons and around the row.
pub const DEFAULT_PADDING: f32 = 6.0;
/// Default icon diameter.
pub const DEFAULT_ICON_DIAMETER: f32 = 40.0;
/// Default distance a hovered icon is raised by.
pub const DEFAULT_LIFT_OFFSET: f32 = 50.0;
/// Default duration of the appear, lift and dismiss animations.
pub const DEFAULT_ANIMATION_DURATION_MS: u64 = 500;

/// Parse a `#RRGGBB` or `#RRGGBBAA` color.
pub fn parse_color(value: &str) -> Result<Color, ConfigError> {
    Color::from_hex(value).ok_or_else(|| ConfigError::InvalidColor(value.to_string()))
}

mod hex_color {
    use iconstrip_render::Color;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(color: &Color, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&color.to_hex())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color, D::Error> {
        let value = String::deserialize(deserializer)?;
        super::parse_color(&value).map_err(serde::de::Error::custom)
    }
}

/// Drop shadow behind the strip background.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadowConfig {
    /// Shadow color.
    #[serde(with = "hex_color")]
    pub color: Color,
    /// Blur radius.
    pub radius: f32,
    /// Overall opacity.
    pub opacity: f32,
    /// Offset as `[x, y]`.
    pub offset: [f32; 2],
}

impl Default for ShadowConfig {
    fn default() -> Self {
        Shadow::default().into()
    }
}

impl From<Shadow> for ShadowConfig {
    fn from(shadow: Shadow) -> Self {
        Self {
            color: shadow.color,
            radius: shadow.radius,
            opacity: shadow.opacity,
            offset: [shadow.offset.x, shadow.offset.y],
        }
    }
}

impl From<ShadowConfig> for Shadow {
    fn from(config: ShadowConfig) -> Self {
        Self {
            color: config.color,
            radius: config.radius,
            opacity: config.opacity,
            offset: Point::from(config.offset),
        }
    }
}

/// Appearance and behavior of an icon strip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconStripConfig {
    /// Spacing between icons and around the row.
    pub padding: f32,
    /// Width and height of each icon.
    pub icon_diameter: f32,
    /// Strip background tint.
    #[serde(with = "hex_color")]
    pub background: Color,
    /// Distance a hovered icon is raised by.
    pub lift_offset: f32,
    /// Duration of the appear, lift and dismiss animations.
    #[serde(rename = "animation_duration_ms", with = "duration_ms")]
    pub animation_duration: Duration,
    /// Drop shadow behind the background.
    pub shadow: ShadowConfig,
    /// Long-press recognition installed on the container.
    pub long_press: LongPressConfig,
}

impl Default for IconStripConfig {
    fn default() -> Self {
        Self {
            padding: DEFAULT_PADDING,
            icon_diameter: DEFAULT_ICON_DIAMETER,
            background: Color::WHITE,
            lift_offset: DEFAULT_LIFT_OFFSET,
            animation_duration: Duration::from_millis(DEFAULT_ANIMATION_DURATION_MS),
            shadow: ShadowConfig::default(),
            long_press: LongPressConfig::default(),
        }
    }
}

impl IconStripConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(target: iconstrip_core::logging::targets::STRIP, path = %path.display(), "loaded strip config");
        Ok(config)
    }

    /// Serialize to a TOML document.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every field for a usable value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_non_negative("padding", self.padding)?;
        check_non_negative("icon_diameter", self.icon_diameter)?;
        check_non_negative("lift_offset", self.lift_offset)?;
        check_non_negative("shadow.radius", self.shadow.radius)?;
        check_non_negative("long_press.allowable_movement", self.long_press.allowable_movement)?;
        if !(0.0..=1.0).contains(&self.shadow.opacity) {
            return Err(ConfigError::invalid_value(
                "shadow.opacity",
                format!("{} is outside 0.0..=1.0", self.shadow.opacity),
            ));
        }
        if self.shadow.offset.iter().any(|v| !v.is_finite()) {
            return Err(ConfigError::invalid_value("shadow.offset", "must be finite"));
        }
        Ok(())
    }

    /// The configured shadow as a render value.
    pub fn shadow(&self) -> Shadow {
        self.shadow.into()
    }
}

fn check_non_negative(field: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid_value(
            field,
            format!("{value} must be a finite, non-negative number"),
        ))
    }
}
