use serde::{Deserialize, Serialize};

use crate::{
    core::constants::{SPOTLIGHT_FILL, SPOTLIGHT_RADIUS, SPOTLIGHT_STROKE, SPOTLIGHT_STROKE_WIDTH},
    Result, TwinMapError,
};

/// Colour with 8-bit channels and unit alpha, matching CSS `rgba()`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }

    /// Alpha as an 8-bit channel.
    pub fn alpha_u8(&self) -> u8 {
        (self.a.clamp(0.0, 1.0) * 255.0).round() as u8
    }

    #[cfg(feature = "egui")]
    pub fn to_color32(&self) -> egui::Color32 {
        egui::Color32::from_rgba_unmultiplied(self.r, self.g, self.b, self.alpha_u8())
    }
}

impl From<(u8, u8, u8, f32)> for Rgba {
    fn from((r, g, b, a): (u8, u8, u8, f32)) -> Self {
        Self::new(r, g, b, a)
    }
}

/// Appearance of the spotlight circle drawn at the overlay feature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayStyle {
    /// Radius in screen pixels
    pub radius: f32,
    pub fill: Rgba,
    pub stroke: Rgba,
    pub stroke_width: f32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            radius: SPOTLIGHT_RADIUS,
            fill: SPOTLIGHT_FILL.into(),
            stroke: SPOTLIGHT_STROKE.into(),
            stroke_width: SPOTLIGHT_STROKE_WIDTH,
        }
    }
}

impl OverlayStyle {
    pub fn validate(&self) -> Result<()> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(TwinMapError::Config(format!(
                "overlay radius must be positive, got {}",
                self.radius
            )));
        }
        if !(self.stroke_width.is_finite() && self.stroke_width >= 0.0) {
            return Err(TwinMapError::Config(format!(
                "overlay stroke width must be non-negative, got {}",
                self.stroke_width
            )));
        }
        for (name, colour) in [("fill", self.fill), ("stroke", self.stroke)] {
            if !(0.0..=1.0).contains(&colour.a) {
                return Err(TwinMapError::Config(format!(
                    "overlay {} alpha must be within 0..=1, got {}",
                    name, colour.a
                )));
            }
        }
        Ok(())
    }
}
