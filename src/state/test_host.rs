//! In-memory row renderer and list scroller for unit tests.

use crate::model::{PanelBounds, PanelHandle, Position, ToggleHandle, ViewportBounds};
use crate::state::host::{ListScroller, PanelVisual, RowRenderer};
use std::collections::HashMap;

/// Natural panel height used when a test does not set one.
pub(crate) const DEFAULT_PANEL_HEIGHT: u16 = 4;

/// Records everything the core asks of the host.
#[derive(Debug, Default)]
pub(crate) struct FakeHost {
    pub bound: HashMap<ToggleHandle, Position>,
    pub panel_of: HashMap<ToggleHandle, PanelHandle>,
    pub natural_heights: HashMap<Position, u16>,
    pub visuals: HashMap<PanelHandle, PanelVisual>,
    pub selected: HashMap<ToggleHandle, bool>,
    pub bounds: HashMap<PanelHandle, PanelBounds>,
    pub viewport_height: u16,
    pub scrolls: Vec<(i32, u32)>,
    pub measurements: usize,
}

impl FakeHost {
    pub fn new() -> Self {
        Self {
            viewport_height: 20,
            ..Self::default()
        }
    }

    /// Make row view `view` display `pos`; toggle and panel ids equal `view`.
    pub fn show(&mut self, view: u32, pos: Position) -> (ToggleHandle, PanelHandle) {
        let toggle = ToggleHandle::new(view);
        let panel = PanelHandle::new(view);
        self.bound.insert(toggle, pos);
        self.panel_of.insert(toggle, panel);
        (toggle, panel)
    }

    pub fn visual(&self, panel: PanelHandle) -> PanelVisual {
        self.visuals.get(&panel).copied().unwrap_or_default()
    }

    pub fn is_selected(&self, toggle: ToggleHandle) -> bool {
        self.selected.get(&toggle).copied().unwrap_or(false)
    }
}

impl RowRenderer for FakeHost {
    fn toggle_handle(&self, pos: Position) -> Option<ToggleHandle> {
        self.bound
            .iter()
            .find(|(_, &bound)| bound == pos)
            .map(|(&toggle, _)| toggle)
    }

    fn expandable_panel(&self, pos: Position) -> Option<PanelHandle> {
        self.toggle_handle(pos)
            .and_then(|toggle| self.panel_of.get(&toggle).copied())
    }

    fn bound_position(&self, toggle: ToggleHandle) -> Option<Position> {
        self.bound.get(&toggle).copied()
    }

    fn measure_panel(&mut self, _panel: PanelHandle, pos: Position) -> u16 {
        self.measurements += 1;
        self.natural_heights
            .get(&pos)
            .copied()
            .unwrap_or(DEFAULT_PANEL_HEIGHT)
    }

    fn apply_panel(&mut self, panel: PanelHandle, visual: PanelVisual) {
        self.visuals.insert(panel, visual);
    }

    fn set_toggle_selected(&mut self, toggle: ToggleHandle, selected: bool) {
        self.selected.insert(toggle, selected);
    }

    fn panel_bounds(&self, panel: PanelHandle) -> Option<PanelBounds> {
        self.bounds.get(&panel).copied()
    }
}

impl ListScroller for FakeHost {
    fn viewport_bounds(&self) -> ViewportBounds {
        ViewportBounds::new(self.viewport_height)
    }

    fn scroll_by(&mut self, delta: i32, duration_ms: u32) {
        self.scrolls.push((delta, duration_ms));
    }
}
