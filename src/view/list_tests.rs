//! Tests for the demo list host.

use super::*;

fn list(rows: usize) -> DemoList {
    DemoList::new(rows, 40, 10, Easing::Linear)
}

// ===== Wrapping =====

#[test]
fn wrap_text_breaks_on_word_boundaries() {
    assert_eq!(
        wrap_text("one two three four", 9),
        vec!["one two", "three", "four"]
    );
}

#[test]
fn wrap_text_splits_words_wider_than_the_line() {
    assert_eq!(wrap_text("abcdefgh", 3), vec!["abc", "def", "gh"]);
}

#[test]
fn wrap_text_measures_wide_characters() {
    // Each ideograph is two columns wide.
    assert_eq!(wrap_text("日本語", 4), vec!["日本", "語"]);
}

#[test]
fn wrap_text_of_blank_input_is_empty() {
    assert!(wrap_text("   ", 10).is_empty());
}

#[test]
fn panel_lines_end_with_actions() {
    let list = list(3);

    let lines = list.panel_lines(Position::new(0));

    assert_eq!(lines.last().map(String::as_str), Some("[1] Open  [2] Share"));
    assert!(lines.len() >= 2);
}

// ===== Layout =====

#[test]
fn collapsed_rows_fill_the_viewport_one_line_each() {
    let mut list = list(30);

    let assigned = list.layout();

    assert_eq!(assigned.len(), 10);
    assert_eq!(assigned[0].position, Position::new(0));
    assert_eq!(assigned[9].position, Position::new(9));
}

#[test]
fn applied_panel_height_pushes_later_rows_down() {
    let mut list = list(30);
    let assigned = list.layout();

    list.apply_panel(assigned[1].panel, PanelVisual::shown(4));

    assert_eq!(list.row_height(Position::new(1)), 5);
    assert_eq!(list.row_top(Position::new(2)), 6);
    assert_eq!(list.visible_rows().len(), 6);
}

#[test]
fn recycled_view_resolves_to_its_new_row() {
    let mut list = list(30);
    let first = list.layout()[0];

    list.scroll_to(15);
    list.layout();

    assert_eq!(list.bound_position(first.toggle), Some(Position::new(15)));
    assert!(!list.is_rendered(Position::new(0)));
    assert_eq!(list.toggle_handle(Position::new(0)), None);
}

#[test]
fn offscreen_rows_keep_their_height() {
    let mut list = list(30);
    list.layout();

    list.sync_offscreen_row(Position::new(20), 3);
    list.sync_offscreen_row(Position::new(2), 3);

    assert_eq!(list.row_height(Position::new(20)), 4);
    // Rendered rows are driven by their panel only.
    assert_eq!(list.row_height(Position::new(2)), 1);
}

// ===== Scrolling =====

#[test]
fn panel_bounds_are_relative_to_the_viewport() {
    let mut list = list(30);
    let assigned = list.layout();
    list.apply_panel(assigned[8].panel, PanelVisual::shown(4));

    let bounds = list.panel_bounds(assigned[8].panel).unwrap();

    assert_eq!(bounds, PanelBounds { top: 9, bottom: 13 });
}

#[test]
fn hidden_panel_has_no_bounds() {
    let mut list = list(30);
    let assigned = list.layout();

    assert_eq!(list.panel_bounds(assigned[0].panel), None);
}

#[test]
fn scroll_by_animates_toward_target() {
    let mut list = list(30);
    list.tick(1_000);

    list.scroll_by(6, 100);
    assert!(list.is_scrolling());

    list.tick(1_050);
    assert_eq!(list.scroll_offset(), 3);

    list.tick(1_100);
    assert_eq!(list.scroll_offset(), 6);
    assert!(!list.is_scrolling());
}

#[test]
fn scroll_is_clamped_to_content() {
    let mut list = list(12);

    list.scroll_by(50, 0);
    assert_eq!(list.scroll_offset(), 2);

    list.scroll_by(-50, 0);
    assert_eq!(list.scroll_offset(), 0);
}

#[test]
fn ensure_visible_scrolls_header_into_view() {
    let mut list = list(30);

    list.ensure_visible(Position::new(14));
    assert_eq!(list.scroll_offset(), 5);

    list.ensure_visible(Position::new(2));
    assert_eq!(list.scroll_offset(), 2);
}
