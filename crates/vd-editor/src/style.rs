//! Style provider: where new shapes get their style and default flags.

use serde::{Deserialize, Serialize};
use vd_core::{Style, StyleId};

/// Default flags applied to newly drawn paths and their segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeDefaults {
    pub is_stroked: bool,
    pub is_filled: bool,
    pub is_closed: bool,
    pub is_smooth_join: bool,
}

impl Default for ShapeDefaults {
    fn default() -> Self {
        Self {
            is_stroked: true,
            is_filled: false,
            is_closed: false,
            is_smooth_join: true,
        }
    }
}

/// Supplies the currently selected style and the default shape flags.
pub trait StyleProvider {
    /// The selected style and the name it is shared under.
    fn current_style(&self) -> (StyleId, Style);

    fn defaults(&self) -> ShapeDefaults;
}

/// A fixed style and fixed defaults.
#[derive(Debug, Clone)]
pub struct DefaultStyleProvider {
    pub name: StyleId,
    pub style: Style,
    pub defaults: ShapeDefaults,
}

impl DefaultStyleProvider {
    pub fn new(style: Style, defaults: ShapeDefaults) -> Self {
        Self {
            name: StyleId::intern("default"),
            style,
            defaults,
        }
    }
}

impl Default for DefaultStyleProvider {
    fn default() -> Self {
        Self::new(
            Style {
                stroke: Some(vd_core::Stroke::default()),
                fill: None,
                opacity: None,
            },
            ShapeDefaults::default(),
        )
    }
}

impl StyleProvider for DefaultStyleProvider {
    fn current_style(&self) -> (StyleId, Style) {
        (self.name, self.style.clone())
    }

    fn defaults(&self) -> ShapeDefaults {
        self.defaults
    }
}
