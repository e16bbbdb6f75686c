//! Recycled row views.
//!
//! The pool owns a small set of views, each with a stable toggle and panel
//! handle. Every layout pass keeps views whose row is still visible and hands
//! the rest to newly visible rows, the way a virtualized list reuses its
//! children.

use crate::model::{PanelHandle, Position, ToggleHandle};
use crate::state::PanelVisual;

/// One reusable row view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    /// Handle of the row's header.
    pub toggle: ToggleHandle,
    /// Handle of the row's detail panel.
    pub panel: PanelHandle,
    /// Row currently shown, if any.
    pub position: Option<Position>,
    /// What the panel currently looks like.
    pub visual: PanelVisual,
    /// Whether the header is drawn in its expanded state.
    pub selected: bool,
}

impl RowView {
    fn new(id: u32) -> Self {
        Self {
            toggle: ToggleHandle::new(id),
            panel: PanelHandle::new(id),
            position: None,
            visual: PanelVisual::HIDDEN,
            selected: false,
        }
    }
}

/// A view handed to a row by [`RowPool::assign`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment {
    /// Row being shown.
    pub position: Position,
    /// Its header handle.
    pub toggle: ToggleHandle,
    /// Its panel handle.
    pub panel: PanelHandle,
}

/// Pool of row views shared by every row of the list.
#[derive(Debug, Clone, Default)]
pub struct RowPool {
    views: Vec<RowView>,
}

impl RowPool {
    /// Pool with `size` unbound views.
    pub fn new(size: usize) -> Self {
        let mut pool = Self::default();
        pool.ensure(size);
        pool
    }

    /// Number of views, bound or not.
    pub fn len(&self) -> usize {
        self.views.len()
    }

    /// Whether the pool has no views.
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// All views.
    pub fn views(&self) -> &[RowView] {
        &self.views
    }

    fn ensure(&mut self, size: usize) {
        while self.views.len() < size {
            let id = u32::try_from(self.views.len()).unwrap_or(u32::MAX);
            self.views.push(RowView::new(id));
        }
    }

    /// Show `rows`, reusing views of rows that stay visible.
    ///
    /// Views whose row scrolled away are rebound to new rows; the pool only
    /// grows when more rows are visible than it has views.
    pub fn assign(&mut self, rows: &[Position]) -> Vec<Assignment> {
        self.ensure(rows.len());

        let mut free: Vec<usize> = Vec::new();
        for (idx, view) in self.views.iter_mut().enumerate() {
            match view.position {
                Some(pos) if rows.contains(&pos) => {}
                _ => {
                    view.position = None;
                    free.push(idx);
                }
            }
        }
        free.reverse();

        rows.iter()
            .filter_map(|&pos| {
                let idx = match self.index_of(pos) {
                    Some(idx) => idx,
                    None => {
                        let idx = free.pop()?;
                        self.views[idx].position = Some(pos);
                        idx
                    }
                };
                let view = &self.views[idx];
                Some(Assignment {
                    position: pos,
                    toggle: view.toggle,
                    panel: view.panel,
                })
            })
            .collect()
    }

    fn index_of(&self, pos: Position) -> Option<usize> {
        self.views.iter().position(|view| view.position == Some(pos))
    }

    /// View showing `pos`.
    pub fn view_for(&self, pos: Position) -> Option<&RowView> {
        self.index_of(pos).map(|idx| &self.views[idx])
    }

    /// View owning `toggle`.
    pub fn by_toggle(&self, toggle: ToggleHandle) -> Option<&RowView> {
        self.views.iter().find(|view| view.toggle == toggle)
    }

    /// Mutable view owning `toggle`.
    pub fn by_toggle_mut(&mut self, toggle: ToggleHandle) -> Option<&mut RowView> {
        self.views.iter_mut().find(|view| view.toggle == toggle)
    }

    /// View owning `panel`.
    pub fn by_panel(&self, panel: PanelHandle) -> Option<&RowView> {
        self.views.iter().find(|view| view.panel == panel)
    }

    /// Mutable view owning `panel`.
    pub fn by_panel_mut(&mut self, panel: PanelHandle) -> Option<&mut RowView> {
        self.views.iter_mut().find(|view| view.panel == panel)
    }
}
