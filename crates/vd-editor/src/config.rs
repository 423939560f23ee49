//! Editor settings.

use crate::error::EditorError;
use crate::style::ShapeDefaults;
use serde::{Deserialize, Serialize};
use vd_core::FillRule;

/// Configuration for path drawing.
///
/// Missing fields in JSON fall back to `Default`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Round input coordinates to the grid. Default: **false**.
    pub snap_to_grid: bool,
    /// Horizontal grid increment. Values `<= 0` disable snapping on that axis.
    pub snap_x: f64,
    /// Vertical grid increment. Values `<= 0` disable snapping on that axis.
    pub snap_y: f64,

    /// Bind new points to existing points under the cursor. Default: **true**.
    pub try_to_connect: bool,
    /// Pick distance for connection points and hover, in canvas units.
    pub hit_threshold: f64,
    /// Split an existing line when a fixed point lands on it and no
    /// connection point was found. Default: **false**.
    pub split_lines: bool,

    /// Copy the selected style into each new shape instead of referencing it.
    pub clone_style: bool,
    pub fill_rule: FillRule,
    pub defaults: ShapeDefaults,

    /// Maximum undo depth. `0` disables history.
    pub history_depth: usize,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            snap_to_grid: false,
            snap_x: 15.0,
            snap_y: 15.0,
            try_to_connect: true,
            hit_threshold: 7.0,
            split_lines: false,
            clone_style: false,
            fill_rule: FillRule::EvenOdd,
            defaults: ShapeDefaults::default(),
            history_depth: 100,
        }
    }
}

impl EditorSettings {
    /// Parse settings from JSON.
    ///
    /// # Errors
    /// Returns [`EditorError::Settings`] if the JSON is malformed or a field
    /// has the wrong type.
    pub fn from_json(json: &str) -> Result<Self, EditorError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn partial_json_uses_defaults() {
        let settings = EditorSettings::from_json(r#"{ "snap_to_grid": true, "snap_x": 10 }"#).unwrap();
        assert!(settings.snap_to_grid);
        assert_eq!(settings.snap_x, 10.0);
        assert_eq!(settings.snap_y, 15.0);
        assert!(settings.try_to_connect);
        assert_eq!(settings.history_depth, 100);
    }

    #[test]
    fn nested_defaults_and_enums() {
        let settings = EditorSettings::from_json(
            r#"{ "fill_rule": "NonZero", "defaults": { "is_closed": true } }"#,
        )
        .unwrap();
        assert_eq!(settings.fill_rule, FillRule::NonZero);
        assert!(settings.defaults.is_closed);
        assert!(settings.defaults.is_stroked);
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = EditorSettings::from_json(r#"{ "snap_x": "wide" }"#).unwrap_err();
        assert!(matches!(err, EditorError::Settings(_)));
    }
}
