//! Virtualized demo list: the host side of the expansion core.
//!
//! Rows are generated from their position. Only rows inside the viewport own
//! a view from the [`RowPool`]; the [`HeightIndex`] keeps the line height of
//! every row, rendered or not, so scroll offsets stay exact.

use crate::model::{PanelBounds, PanelHandle, Position, ToggleHandle, ViewportBounds};
use crate::state::{Easing, ListScroller, PanelVisual, RowRenderer, Tween};
use crate::view::constants::{PANEL_INDENT, ROW_HEADER_HEIGHT};
use crate::view::height_index::HeightIndex;
use crate::view::row_pool::{Assignment, RowPool};
use tracing::debug;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Labels of the action buttons shown at the bottom of every panel.
pub const ACTION_LABELS: [(u16, &str); 2] = [(1, "Open"), (2, "Share")];

const PHRASES: [&str; 6] = [
    "Rows are tracked by position, never by the view that draws them.",
    "Scrolling hands this view to another row; its state follows the row.",
    "Only one panel stays open while single-open mode is on.",
    "Toggling during an animation is replayed once the animation ends.",
    "Expanded panels near the bottom edge scroll themselves into view.",
    "日本語のテキストも幅を正しく計算して折り返します。",
];

/// Header text of `pos`.
pub fn row_title(pos: Position) -> String {
    format!("Item {}", pos.get())
}

/// Detail text of `pos`; its length varies with the position.
pub fn row_detail(pos: Position) -> String {
    let count = pos.get() % 4 + 1;
    (0..count)
        .map(|i| PHRASES[(pos.get() + i) % PHRASES.len()])
        .collect::<Vec<_>>()
        .join(" ")
}

/// Action button row of every panel.
pub fn action_line() -> String {
    ACTION_LABELS
        .iter()
        .map(|(id, label)| format!("[{id}] {label}"))
        .collect::<Vec<_>>()
        .join("  ")
}

/// Greedy word wrap by display width.
///
/// Words wider than `width` are broken at character boundaries.
pub fn wrap_text(text: &str, width: u16) -> Vec<String> {
    let width = usize::from(width.max(1));
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_width = 0;

    for word in text.split_whitespace() {
        let word_width = word.width();
        let needed = if line.is_empty() { word_width } else { line_width + 1 + word_width };

        if needed <= width {
            if !line.is_empty() {
                line.push(' ');
                line_width += 1;
            }
            line.push_str(word);
            line_width += word_width;
            continue;
        }

        if !line.is_empty() {
            lines.push(std::mem::take(&mut line));
            line_width = 0;
        }

        if word_width <= width {
            line.push_str(word);
            line_width = word_width;
            continue;
        }

        for ch in word.chars() {
            let ch_width = ch.width().unwrap_or(0);
            if line_width + ch_width > width && !line.is_empty() {
                lines.push(std::mem::take(&mut line));
                line_width = 0;
            }
            line.push(ch);
            line_width += ch_width;
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Smoothly animated scroll position, in lines.
#[derive(Debug, Clone, Default)]
struct ScrollState {
    offset: usize,
    tween: Option<Tween>,
}

/// A virtualized list of generated rows.
#[derive(Debug, Clone)]
pub struct DemoList {
    width: u16,
    viewport_height: u16,
    pool: RowPool,
    heights: HeightIndex,
    scroll: ScrollState,
    easing: Easing,
    now_ms: u64,
}

impl DemoList {
    /// List of `rows` collapsed rows in a `width` × `viewport_height` area.
    pub fn new(rows: usize, width: u16, viewport_height: u16, easing: Easing) -> Self {
        Self {
            width: width.max(1),
            viewport_height,
            pool: RowPool::new(usize::from(viewport_height)),
            heights: HeightIndex::uniform(rows, ROW_HEADER_HEIGHT),
            scroll: ScrollState::default(),
            easing,
            now_ms: 0,
        }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.heights.len()
    }

    /// Wrapping width in columns.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Viewport height in lines.
    pub fn viewport_height(&self) -> u16 {
        self.viewport_height
    }

    /// The recycled row views.
    pub fn pool(&self) -> &RowPool {
        &self.pool
    }

    /// Resize the viewport.
    pub fn set_size(&mut self, width: u16, viewport_height: u16) {
        self.width = width.max(1);
        self.viewport_height = viewport_height;
        self.scroll_to(self.scroll.offset);
    }

    /// Current first visible line.
    pub fn scroll_offset(&self) -> usize {
        self.scroll.offset
    }

    /// Whether a smooth scroll is running.
    pub fn is_scrolling(&self) -> bool {
        self.scroll.tween.is_some()
    }

    /// Line offset of the header of `pos`.
    pub fn row_top(&self, pos: Position) -> usize {
        self.heights.offset_of(pos)
    }

    /// Lines `pos` currently occupies.
    pub fn row_height(&self, pos: Position) -> u16 {
        self.heights.height(pos)
    }

    fn max_offset(&self) -> usize {
        self.heights
            .total()
            .saturating_sub(usize::from(self.viewport_height))
    }

    /// Jump to `offset`, cancelling any smooth scroll.
    pub fn scroll_to(&mut self, offset: usize) {
        self.scroll.tween = None;
        self.scroll.offset = offset.min(self.max_offset());
    }

    /// Scroll just enough for the header of `pos` to be visible.
    pub fn ensure_visible(&mut self, pos: Position) {
        let top = self.row_top(pos);
        let bottom = top + usize::from(ROW_HEADER_HEIGHT);
        let height = usize::from(self.viewport_height);
        if top < self.scroll.offset {
            self.scroll_to(top);
        } else if bottom > self.scroll.offset + height {
            self.scroll_to(bottom.saturating_sub(height));
        }
    }

    /// Advance the smooth scroll to `now_ms`.
    pub fn tick(&mut self, now_ms: u64) {
        self.now_ms = now_ms;
        let Some(tween) = self.scroll.tween else {
            return;
        };
        let sampled = usize::try_from(tween.sample(now_ms)).unwrap_or(usize::MAX);
        self.scroll.offset = sampled.min(self.max_offset());
        if tween.is_done(now_ms) {
            self.scroll.tween = None;
        }
    }

    /// Rows intersecting the viewport, top to bottom.
    pub fn visible_rows(&self) -> Vec<Position> {
        let Some(first) = self.heights.row_at(self.scroll.offset) else {
            return Vec::new();
        };
        let bottom = self.scroll.offset + usize::from(self.viewport_height);
        (first.get()..self.rows())
            .map(Position::new)
            .take_while(|&pos| self.row_top(pos) < bottom)
            .collect()
    }

    /// Hand views to the visible rows; each assignment must be bound.
    pub fn layout(&mut self) -> Vec<Assignment> {
        let rows = self.visible_rows();
        self.pool.assign(&rows)
    }

    /// Whether `pos` currently owns a view.
    pub fn is_rendered(&self, pos: Position) -> bool {
        self.pool.view_for(pos).is_some()
    }

    /// Wrapped panel lines of `pos` at the current width, action row last.
    pub fn panel_lines(&self, pos: Position) -> Vec<String> {
        let content_width = self.width.saturating_sub(PANEL_INDENT).max(1);
        let mut lines = wrap_text(&row_detail(pos), content_width);
        lines.push(action_line());
        lines
    }

    /// Record the panel height of a row that has no view.
    ///
    /// Keeps offsets right when a row changes state while scrolled away.
    pub fn sync_offscreen_row(&mut self, pos: Position, panel_height: u16) {
        if !self.is_rendered(pos) {
            self.heights
                .set(pos, ROW_HEADER_HEIGHT.saturating_add(panel_height));
        }
    }
}

impl RowRenderer for DemoList {
    fn toggle_handle(&self, pos: Position) -> Option<ToggleHandle> {
        self.pool.view_for(pos).map(|view| view.toggle)
    }

    fn expandable_panel(&self, pos: Position) -> Option<PanelHandle> {
        self.pool.view_for(pos).map(|view| view.panel)
    }

    fn bound_position(&self, toggle: ToggleHandle) -> Option<Position> {
        self.pool.by_toggle(toggle).and_then(|view| view.position)
    }

    fn measure_panel(&mut self, panel: PanelHandle, pos: Position) -> u16 {
        let height = u16::try_from(self.panel_lines(pos).len()).unwrap_or(u16::MAX);
        debug!(panel = panel.id(), position = %pos, height, "Measured panel");
        height
    }

    fn apply_panel(&mut self, panel: PanelHandle, visual: PanelVisual) {
        let Some(view) = self.pool.by_panel_mut(panel) else {
            return;
        };
        view.visual = visual;
        if let Some(pos) = view.position {
            let panel_height = if visual.visible { visual.height } else { 0 };
            self.heights
                .set(pos, ROW_HEADER_HEIGHT.saturating_add(panel_height));
        }
    }

    fn set_toggle_selected(&mut self, toggle: ToggleHandle, selected: bool) {
        if let Some(view) = self.pool.by_toggle_mut(toggle) {
            view.selected = selected;
        }
    }

    fn panel_bounds(&self, panel: PanelHandle) -> Option<PanelBounds> {
        let view = self.pool.by_panel(panel)?;
        let pos = view.position?;
        if !view.visual.visible {
            return None;
        }
        let top = self.row_top(pos) + usize::from(ROW_HEADER_HEIGHT);
        let top = i64::try_from(top).ok()? - i64::try_from(self.scroll.offset).ok()?;
        Some(PanelBounds::new(i32::try_from(top).ok()?, view.visual.height))
    }
}

impl ListScroller for DemoList {
    fn viewport_bounds(&self) -> ViewportBounds {
        ViewportBounds::new(self.viewport_height)
    }

    fn scroll_by(&mut self, delta: i32, duration_ms: u32) {
        let current = self.scroll.offset;
        let target = if delta >= 0 {
            current.saturating_add(delta.unsigned_abs() as usize)
        } else {
            current.saturating_sub(delta.unsigned_abs() as usize)
        }
        .min(self.max_offset());

        debug!(from = current, to = target, duration_ms, "Scrolling list");
        if duration_ms == 0 || target == current {
            self.scroll_to(target);
            return;
        }
        self.scroll.tween = Some(Tween::new(
            current as u64,
            target as u64,
            self.now_ms,
            u64::from(duration_ms),
            self.easing,
        ));
    }
}

#[cfg(test)]
#[path = "list_tests.rs"]
mod tests;
