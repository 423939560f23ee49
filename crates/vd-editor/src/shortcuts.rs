//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `ShortcutAction`s for the path
//! tool.

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    // ── Builder switching ──
    BuilderLine,
    BuilderArc,
    BuilderQuadratic,
    BuilderCubic,
    /// Toggle between current and previous builder.
    ToggleLastBuilder,

    // ── Path ──
    /// Drop the in-progress segment and commit the path.
    Finish,

    // ── Edit ──
    Undo,
    Redo,

    // ── View ──
    ToggleGridSnap,
}

/// Resolves key events into shortcut actions.
///
/// On macOS `meta` is ⌘, on other platforms `ctrl` serves the same role.
pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key event to an action.
    ///
    /// `key` is the `KeyboardEvent.key` value (e.g. `"z"`, `"Escape"`).
    /// Returns `None` if the key combo has no binding.
    pub fn resolve(
        key: &str,
        ctrl: bool,
        shift: bool,
        _alt: bool,
        meta: bool,
    ) -> Option<ShortcutAction> {
        let cmd = ctrl || meta;

        if cmd && shift {
            return match key {
                "z" | "Z" => Some(ShortcutAction::Redo),
                _ => None,
            };
        }

        if cmd {
            return match key {
                "z" | "Z" => Some(ShortcutAction::Undo),
                "y" | "Y" => Some(ShortcutAction::Redo),
                _ => None,
            };
        }

        if shift {
            return None;
        }

        match key {
            "l" | "L" => Some(ShortcutAction::BuilderLine),
            "a" | "A" => Some(ShortcutAction::BuilderArc),
            "q" | "Q" => Some(ShortcutAction::BuilderQuadratic),
            "c" | "C" => Some(ShortcutAction::BuilderCubic),
            "Tab" => Some(ShortcutAction::ToggleLastBuilder),
            "Escape" | "Enter" => Some(ShortcutAction::Finish),
            "g" | "G" => Some(ShortcutAction::ToggleGridSnap),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_builder_shortcuts() {
        assert_eq!(
            ShortcutMap::resolve("l", false, false, false, false),
            Some(ShortcutAction::BuilderLine)
        );
        assert_eq!(
            ShortcutMap::resolve("A", false, false, false, false),
            Some(ShortcutAction::BuilderArc)
        );
        assert_eq!(
            ShortcutMap::resolve("q", false, false, false, false),
            Some(ShortcutAction::BuilderQuadratic)
        );
        assert_eq!(
            ShortcutMap::resolve("c", false, false, false, false),
            Some(ShortcutAction::BuilderCubic)
        );
        assert_eq!(
            ShortcutMap::resolve("Tab", false, false, false, false),
            Some(ShortcutAction::ToggleLastBuilder)
        );
    }

    #[test]
    fn resolve_finish() {
        assert_eq!(
            ShortcutMap::resolve("Escape", false, false, false, false),
            Some(ShortcutAction::Finish)
        );
        assert_eq!(
            ShortcutMap::resolve("Enter", false, false, false, false),
            Some(ShortcutAction::Finish)
        );
    }

    #[test]
    fn resolve_undo_redo() {
        assert_eq!(
            ShortcutMap::resolve("z", true, false, false, false),
            Some(ShortcutAction::Undo)
        );
        assert_eq!(
            ShortcutMap::resolve("z", false, false, false, true),
            Some(ShortcutAction::Undo)
        );
        assert_eq!(
            ShortcutMap::resolve("z", true, true, false, false),
            Some(ShortcutAction::Redo)
        );
        assert_eq!(
            ShortcutMap::resolve("y", true, false, false, false),
            Some(ShortcutAction::Redo)
        );
    }

    #[test]
    fn modifiers_block_single_keys() {
        assert_eq!(ShortcutMap::resolve("c", true, false, false, false), None);
        assert_eq!(ShortcutMap::resolve("l", false, true, false, false), None);
        assert_eq!(ShortcutMap::resolve("x", false, false, false, false), None);
    }
}
