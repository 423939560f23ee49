//! Shape styling: colors, stroke, fill.

use serde::{Deserialize, Serialize};

/// RGBA color. Stored as 4 × f32 [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StrokeCap {
    #[default]
    Flat,
    Square,
    Round,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: Color,
    pub thickness: f64,
    pub cap: StrokeCap,
}

impl Default for Stroke {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            thickness: 2.0,
            cap: StrokeCap::Flat,
        }
    }
}

/// Style of a shape. `None` fields fall through to the referenced shared style.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub stroke: Option<Stroke>,
    pub fill: Option<Color>,
    pub opacity: Option<f32>,
}

impl Style {
    /// Overlay every field `other` sets on top of `self`.
    pub fn merge(&mut self, other: &Style) {
        if other.stroke.is_some() {
            self.stroke = other.stroke;
        }
        if other.fill.is_some() {
            self.fill = other.fill;
        }
        if other.opacity.is_some() {
            self.opacity = other.opacity;
        }
    }
}
