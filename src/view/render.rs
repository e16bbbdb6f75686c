//! Drawing the list and its status bar.

use crate::model::Position;
use crate::view::constants::{PANEL_INDENT, STATUS_BAR_HEIGHT};
use crate::view::list::{row_title, DemoList};
use crate::view::styles::ListStyles;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// Mode flags and last event shown in the status bar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusInfo {
    /// Single-open mode is active.
    pub single_open: bool,
    /// Scroll-into-view is active.
    pub adjust_to_fit: bool,
    /// Last thing that happened.
    pub message: String,
}

impl StatusInfo {
    fn text(&self) -> String {
        let mode = if self.single_open { "single-open" } else { "multi-open" };
        let adjust = if self.adjust_to_fit { "on" } else { "off" };
        format!(" {mode} | adjust {adjust} | {}", self.message)
    }
}

/// Split the frame into list and status bar areas.
pub fn split_area(area: Rect) -> (Rect, Rect) {
    let [list, status] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(STATUS_BAR_HEIGHT),
    ])
    .areas(area);
    (list, status)
}

fn row_lines(
    list: &DemoList,
    pos: Position,
    cursor: Position,
    styles: &ListStyles,
) -> Vec<Line<'static>> {
    let view = list.pool().view_for(pos);
    let open = view.is_some_and(|v| v.selected);

    let chevron = if open { "▾" } else { "▸" };
    let mut header_style = if open { styles.open_header } else { styles.header };
    if pos == cursor {
        header_style = header_style.patch(styles.cursor);
    }
    let mut lines = vec![Line::from(Span::styled(
        format!("{chevron} {}", row_title(pos)),
        header_style,
    ))];

    let Some(view) = view.filter(|v| v.visual.visible) else {
        return lines;
    };
    let body = list.panel_lines(pos);
    let action_row = body.len().saturating_sub(1);
    let indent = " ".repeat(usize::from(PANEL_INDENT));
    for (idx, text) in body
        .into_iter()
        .take(usize::from(view.visual.height))
        .enumerate()
    {
        let style = if idx == action_row { styles.action } else { styles.panel };
        lines.push(Line::from(Span::styled(format!("{indent}{text}"), style)));
    }
    lines
}

/// Lines of the list as they appear in the viewport.
pub fn visible_lines(
    list: &DemoList,
    cursor: Position,
    styles: &ListStyles,
) -> Vec<Line<'static>> {
    let rows = list.visible_rows();
    let Some(&first) = rows.first() else {
        return Vec::new();
    };
    let skip = list.scroll_offset().saturating_sub(list.row_top(first));

    rows.into_iter()
        .flat_map(|pos| row_lines(list, pos, cursor, styles))
        .skip(skip)
        .take(usize::from(list.viewport_height()))
        .collect()
}

/// Draw the whole frame.
pub fn render(
    frame: &mut Frame,
    list: &DemoList,
    cursor: Position,
    styles: &ListStyles,
    status: &StatusInfo,
) {
    let (list_area, status_area) = split_area(frame.area());

    frame.render_widget(
        Paragraph::new(visible_lines(list, cursor, styles)),
        list_area,
    );
    frame.render_widget(
        Paragraph::new(status.text()).style(styles.status),
        status_area,
    );
}
