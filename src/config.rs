//! Effect configuration: which variant runs, where its assets live and how the
//! progress animation behaves.
//!
//! Each variant has a built-in preset. A page can replace the preset entirely
//! with a JSON `EffectConfig` in the container's `data-effect-config` attribute.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EffectError;
use crate::hover::{HoverPoint, Percent, DEFAULT_HIT_RADIUS_PX};
use crate::tween::{Ease, DEFAULT_DURATION_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// Two images, pointer enter/leave.
    #[default]
    Classic,
    /// Same interaction as `Classic` with a second image set.
    Gallery,
    /// Pointer move with proximity hit-testing against hover points.
    MultiPoint,
}

impl Variant {
    pub fn uses_proximity(self) -> bool {
        matches!(self, Variant::MultiPoint)
    }
}

impl FromStr for Variant {
    type Err = EffectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "classic" => Ok(Variant::Classic),
            "gallery" => Ok(Variant::Gallery),
            "multi-point" => Ok(Variant::MultiPoint),
            other => Err(EffectError::Config(format!("unknown variant `{other}`"))),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Variant::Classic => "classic",
            Variant::Gallery => "gallery",
            Variant::MultiPoint => "multi-point",
        })
    }
}

/// Relative URLs of everything the asset loader fetches at start-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetPaths {
    pub texture1: String,
    pub texture2: String,
    pub displacement: String,
    #[serde(default = "default_vertex_shader")]
    pub vertex_shader: String,
    #[serde(default = "default_fragment_shader")]
    pub fragment_shader: String,
}

fn default_vertex_shader() -> String {
    "vertexShader.glsl".to_owned()
}

fn default_fragment_shader() -> String {
    "fragmentShader.glsl".to_owned()
}

impl AssetPaths {
    fn with_images(texture1: &str, texture2: &str) -> Self {
        Self {
            texture1: texture1.to_owned(),
            texture2: texture2.to_owned(),
            displacement: "displacement.png".to_owned(),
            vertex_shader: default_vertex_shader(),
            fragment_shader: default_fragment_shader(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectConfig {
    #[serde(default)]
    pub variant: Variant,
    pub assets: AssetPaths,
    #[serde(default)]
    pub hover_points: Vec<HoverPoint>,
    #[serde(default = "default_duration")]
    pub duration_ms: f64,
    #[serde(default)]
    pub ease: Ease,
    #[serde(default = "default_hit_radius")]
    pub hit_radius_px: f64,
}

fn default_duration() -> f64 {
    DEFAULT_DURATION_MS
}

fn default_hit_radius() -> f64 {
    DEFAULT_HIT_RADIUS_PX
}

impl EffectConfig {
    pub fn preset(variant: Variant) -> Self {
        let (assets, hover_points) = match variant {
            Variant::Classic => (
                AssetPaths::with_images("image1.png", "image2.png"),
                Vec::new(),
            ),
            Variant::Gallery => (
                AssetPaths::with_images("image3.png", "image4.png"),
                Vec::new(),
            ),
            Variant::MultiPoint => (
                AssetPaths::with_images("image1.png", "image2.png"),
                vec![
                    hover_point("studio", 25.0, 30.0, "hover1.png"),
                    hover_point("gallery", 60.0, 45.0, "hover2.png"),
                    hover_point("archive", 40.0, 75.0, "hover3.png"),
                ],
            ),
        };
        Self {
            variant,
            assets,
            hover_points,
            duration_ms: DEFAULT_DURATION_MS,
            ease: Ease::default(),
            hit_radius_px: DEFAULT_HIT_RADIUS_PX,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, EffectError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Picks the config for a container from its `data-variant` and
    /// `data-effect-config` attribute values.
    pub fn from_attributes(
        variant: Option<&str>,
        json: Option<&str>,
    ) -> Result<Self, EffectError> {
        if let Some(json) = json.filter(|j| !j.trim().is_empty()) {
            return Self::from_json(json);
        }
        let variant = match variant {
            Some(name) => name.parse()?,
            None => Variant::default(),
        };
        Ok(Self::preset(variant))
    }

    pub fn validate(&self) -> Result<(), EffectError> {
        if !self.duration_ms.is_finite() || self.duration_ms < 0.0 {
            return Err(EffectError::Config(format!(
                "durationMs must be a non-negative number, got {}",
                self.duration_ms
            )));
        }
        if !self.hit_radius_px.is_finite() || self.hit_radius_px < 0.0 {
            return Err(EffectError::Config(format!(
                "hitRadiusPx must be a non-negative number, got {}",
                self.hit_radius_px
            )));
        }
        if self.variant.uses_proximity() && self.hover_points.is_empty() {
            return Err(EffectError::Config(
                "multi-point variant needs at least one hover point".into(),
            ));
        }
        Ok(())
    }
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self::preset(Variant::default())
    }
}

fn hover_point(name: &str, x: f64, y: f64, image: &str) -> HoverPoint {
    HoverPoint {
        name: name.to_owned(),
        x: Percent::new(x),
        y: Percent::new(y),
        image: image.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_validate() {
        for variant in [Variant::Classic, Variant::Gallery, Variant::MultiPoint] {
            EffectConfig::preset(variant).validate().unwrap();
        }
    }

    #[test]
    fn classic_preset_uses_first_image_pair() {
        let config = EffectConfig::default();
        assert_eq!(config.variant, Variant::Classic);
        assert_eq!(config.assets.texture1, "image1.png");
        assert_eq!(config.assets.texture2, "image2.png");
        assert_eq!(config.assets.displacement, "displacement.png");
        assert_eq!(config.assets.vertex_shader, "vertexShader.glsl");
        assert_eq!(config.assets.fragment_shader, "fragmentShader.glsl");
        assert_eq!(config.duration_ms, 1000.0);
        assert_eq!(config.ease, Ease::Power2Out);
        assert!(config.hover_points.is_empty());
    }

    #[test]
    fn multi_point_preset_has_three_points() {
        let config = EffectConfig::preset(Variant::MultiPoint);
        assert_eq!(config.hover_points.len(), 3);
        assert_eq!(config.hit_radius_px, 20.0);
    }

    #[test]
    fn variant_attribute_selects_preset() {
        let config = EffectConfig::from_attributes(Some("gallery"), None);
        assert_eq!(config.unwrap(), EffectConfig::preset(Variant::Gallery));
        let config = EffectConfig::from_attributes(None, None).unwrap();
        assert_eq!(config.variant, Variant::Classic);
        let unknown = EffectConfig::from_attributes(Some("spinning"), None);
        assert!(unknown.is_err());
    }

    #[test]
    fn json_attribute_overrides_preset() {
        let json = r#"{
            "variant": "multi-point",
            "assets": { "texture1": "a.jpg", "texture2": "b.jpg", "displacement": "noise.jpg" },
            "hoverPoints": [ { "name": "logo", "x": "10%", "y": "90%", "image": "logo.jpg" } ],
            "ease": "power2.inOut",
            "durationMs": 600
        }"#;
        let config = EffectConfig::from_attributes(Some("classic"), Some(json));
        let config = config.unwrap();
        assert_eq!(config.variant, Variant::MultiPoint);
        assert_eq!(config.assets.vertex_shader, "vertexShader.glsl");
        assert_eq!(config.hover_points[0].y.fraction(), 0.9);
        assert_eq!(config.duration_ms, 600.0);
        assert_eq!(config.ease, Ease::Power2InOut);
        assert_eq!(config.hit_radius_px, 20.0);
    }

    #[test]
    fn rejects_bad_json_configs() {
        let no_points = r#"{ "variant": "multi-point",
            "assets": { "texture1": "a", "texture2": "b", "displacement": "c" } }"#;
        assert!(matches!(
            EffectConfig::from_json(no_points),
            Err(EffectError::Config(_))
        ));

        let bad_percent = r#"{ "variant": "multi-point",
            "assets": { "texture1": "a", "texture2": "b", "displacement": "c" },
            "hoverPoints": [ { "name": "x", "x": "10", "y": "5%", "image": "i" } ] }"#;
        assert!(matches!(
            EffectConfig::from_json(bad_percent),
            Err(EffectError::ConfigJson(_))
        ));

        let negative = r#"{ "assets": { "texture1": "a", "texture2": "b", "displacement": "c" },
            "durationMs": -1 }"#;
        assert!(EffectConfig::from_json(negative).is_err());
    }
}
