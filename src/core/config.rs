//! Configuration for the split-view coordinator
//!
//! Settings are grouped per concern and can be picked from a profile or
//! loaded from JSON. Every field has a documented default, so a partial file
//! only needs to name what it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    core::{
        constants::{
            DEFAULT_ATTRIBUTION, DEFAULT_CENTER, DEFAULT_TILE_URL, DEFAULT_ZOOM, MAX_ZOOM,
            MIN_ZOOM,
        },
        geo::Point,
    },
    overlay::style::OverlayStyle,
    Result, TwinMapError,
};

/// How overlay visibility reaches live map instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayStrategy {
    /// The overlay layer is attached at creation only while the overlay is
    /// on. Every state change rebuilds all instances.
    #[default]
    Attach,
    /// The overlay layer is always attached, created hidden, and overlay
    /// toggles flip its visibility on live instances without a rebuild.
    ToggleVisibility,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Initial centre in map-space metres
    pub center: Point,
    pub zoom: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER.into(),
            zoom: DEFAULT_ZOOM,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileSourceConfig {
    /// XYZ template with `{z}`, `{x}` and `{y}` placeholders
    pub url_template: String,
    pub attribution: String,
}

impl Default for TileSourceConfig {
    fn default() -> Self {
        Self {
            url_template: DEFAULT_TILE_URL.to_string(),
            attribution: DEFAULT_ATTRIBUTION.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordinatorConfig {
    pub view: ViewConfig,
    pub base_tiles: TileSourceConfig,
    pub overlay: OverlayStyle,
    pub overlay_strategy: OverlayStrategy,
}

impl CoordinatorConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.view.center.is_finite() {
            return Err(TwinMapError::Config(
                "view centre must be finite".to_string(),
            ));
        }
        if !(MIN_ZOOM..=MAX_ZOOM).contains(&self.view.zoom) {
            return Err(TwinMapError::Config(format!(
                "zoom {} outside {}..={}",
                self.view.zoom, MIN_ZOOM, MAX_ZOOM
            )));
        }
        let template = &self.base_tiles.url_template;
        if !["{z}", "{x}", "{y}"].iter().all(|p| template.contains(p)) {
            return Err(TwinMapError::Config(format!(
                "tile template '{}' must contain {{z}}, {{x}} and {{y}}",
                template
            )));
        }
        self.overlay.validate()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn with_overlay_strategy(mut self, strategy: OverlayStrategy) -> Self {
        self.overlay_strategy = strategy;
        self
    }

    pub fn with_overlay_style(mut self, style: OverlayStyle) -> Self {
        self.overlay = style;
        self
    }

    pub fn with_view(mut self, center: Point, zoom: f64) -> Self {
        self.view = ViewConfig { center, zoom };
        self
    }
}

/// Named starting points for a configuration.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CoordinatorProfile {
    /// Full rebuild on every toggle
    #[default]
    Standard,
    /// Overlay toggles only flip layer visibility
    LiveVisibility,
    Custom(CoordinatorConfig),
}

impl CoordinatorProfile {
    pub fn resolve(&self) -> CoordinatorConfig {
        match self {
            Self::Standard => CoordinatorConfig::default(),
            Self::LiveVisibility => CoordinatorConfig::default()
                .with_overlay_strategy(OverlayStrategy::ToggleVisibility),
            Self::Custom(config) => config.clone(),
        }
    }
}
