//! Input abstraction layer.
//!
//! Normalizes mouse, touch, and pen events into a unified `InputEvent`
//! enum consumed by tools. Coordinates are canvas coordinates.

/// Which pointer button went down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Left mouse button, touch, pen tip.
    Primary,
    /// Right mouse button, pen barrel button. Finishes the current path.
    Secondary,
}

/// Keyboard modifier state at the time of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };
}

/// A normalized input event from any pointing device or the keyboard.
#[derive(Debug, Clone)]
pub enum InputEvent {
    /// Pointer pressed.
    PointerDown {
        x: f64,
        y: f64,
        button: PointerButton,
        modifiers: Modifiers,
    },

    /// Pointer moved.
    PointerMove { x: f64, y: f64, modifiers: Modifiers },

    /// Pointer released.
    PointerUp { x: f64, y: f64, modifiers: Modifiers },

    /// Key pressed. `key` is the `KeyboardEvent.key` value.
    Key { key: String, modifiers: Modifiers },
}

impl InputEvent {
    pub fn primary_down(x: f64, y: f64) -> Self {
        Self::PointerDown {
            x,
            y,
            button: PointerButton::Primary,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn secondary_down(x: f64, y: f64) -> Self {
        Self::PointerDown {
            x,
            y,
            button: PointerButton::Secondary,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn pointer_move(x: f64, y: f64) -> Self {
        Self::PointerMove {
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn key(key: &str) -> Self {
        Self::Key {
            key: key.to_string(),
            modifiers: Modifiers::NONE,
        }
    }

    /// Extract position if this is a pointer event.
    pub fn position(&self) -> Option<(f64, f64)> {
        match self {
            Self::PointerDown { x, y, .. }
            | Self::PointerMove { x, y, .. }
            | Self::PointerUp { x, y, .. } => Some((*x, *y)),
            Self::Key { .. } => None,
        }
    }
}
