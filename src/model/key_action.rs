//! Domain-level keyboard actions independent of key bindings.

/// Domain-level actions that can be mapped to configurable key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to KeyAction is handled by KeyBindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    // Selection
    /// Select the next row. Default: j/↓
    SelectNext,
    /// Select the previous row. Default: k/↑
    SelectPrev,
    /// Move the selection down by one page. Default: Ctrl+d/Page Down
    PageDown,
    /// Move the selection up by one page. Default: Ctrl+u/Page Up
    PageUp,
    /// Select the first row. Default: g/Home
    SelectFirst,
    /// Select the last row. Default: G/End
    SelectLast,

    // Expansion
    /// Toggle the selected row's panel. Default: Enter/Space
    ToggleExpand,
    /// Collapse whatever is currently open. Default: c/Esc
    CollapseOpen,
    /// Switch between single-open and multi-open mode. Default: m
    ToggleSingleOpen,
    /// Switch scroll-into-view after expanding on or off. Default: a
    ToggleAdjustToFit,

    // Panel actions
    /// Press an action button inside the selected row's panel. Default: 1-2
    PanelAction(u16),

    // Application
    /// Exit the application. Default: q/Ctrl+c
    Quit,
}

impl KeyAction {
    /// Whether the action changes the selected row.
    pub fn is_selection(&self) -> bool {
        matches!(
            self,
            Self::SelectNext
                | Self::SelectPrev
                | Self::PageDown
                | Self::PageUp
                | Self::SelectFirst
                | Self::SelectLast
        )
    }
}
