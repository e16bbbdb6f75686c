//! Collaborator contract between the expansion core and the list widget.
//!
//! The core never owns row views. It talks to the renderer through opaque
//! handles and asks the list to scroll; everything else (view construction,
//! recycling, drawing) stays on the host side.

use crate::model::{PanelBounds, PanelHandle, Position, ToggleHandle, ViewportBounds};

/// What a panel should currently look like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PanelVisual {
    /// Whether the panel takes part in layout at all.
    pub visible: bool,
    /// Height the panel currently occupies (0 when hidden).
    pub height: u16,
}

impl PanelVisual {
    /// Hidden panel.
    pub const HIDDEN: Self = Self {
        visible: false,
        height: 0,
    };

    /// Fully shown panel of `height`.
    pub fn shown(height: u16) -> Self {
        Self {
            visible: true,
            height,
        }
    }
}

/// Row-rendering boundary.
///
/// Handles are plain values and cannot be null; `None` from a lookup means
/// "that position has no row view right now" (it is scrolled out of the
/// virtualized window), which is not an error.
pub trait RowRenderer {
    /// Toggle handle of the row view currently displaying `pos`.
    fn toggle_handle(&self, pos: Position) -> Option<ToggleHandle>;

    /// Panel handle of the row view currently displaying `pos`.
    fn expandable_panel(&self, pos: Position) -> Option<PanelHandle>;

    /// Position the row view owning `toggle` currently displays.
    ///
    /// Queried at activation time so that a recycled view always resolves to
    /// the row it shows now.
    fn bound_position(&self, toggle: ToggleHandle) -> Option<Position>;

    /// Measure the natural height of `panel` showing `pos`'s content.
    fn measure_panel(&mut self, panel: PanelHandle, pos: Position) -> u16;

    /// Apply a visual state to `panel`.
    fn apply_panel(&mut self, panel: PanelHandle, visual: PanelVisual);

    /// Reflect the expanded state on the toggle (e.g. a selected chevron).
    fn set_toggle_selected(&mut self, toggle: ToggleHandle, selected: bool);

    /// Bounds of `panel` relative to the top of the viewport, if laid out.
    fn panel_bounds(&self, panel: PanelHandle) -> Option<PanelBounds>;
}

/// List-scrolling boundary.
pub trait ListScroller {
    /// Current visible extent of the list.
    fn viewport_bounds(&self) -> ViewportBounds;

    /// Scroll the list content by `delta` (positive moves content up),
    /// smoothly over `duration_ms`.
    fn scroll_by(&mut self, delta: i32, duration_ms: u32);
}
