//! Acceptance tests for expanding and collapsing rows
//!
//! Test scenarios:
//! 1. Enter opens the row under the cursor and the panel slides open
//! 2. Opening another row in single-open mode closes the first one
//! 3. Multi-open mode keeps several rows open until collapsed together
//! 4. Toggling during an animation is replayed once it ends

use crate::model::Position;
use crate::test_harness::AcceptanceTestHarness;
use crossterm::event::KeyCode;

// ===== Expand =====

#[test]
fn initial_list_is_collapsed() {
    // GIVEN: A fresh list
    let mut harness = AcceptanceTestHarness::new(20, 40, 6).expect("Should create harness");

    // WHEN: It is drawn
    let output = harness.render_to_string();

    // THEN: Every row shows only its header
    insta::assert_snapshot!("initial_list_collapsed", output);
}

#[test]
fn enter_slides_panel_open() {
    // GIVEN: A list with the cursor on the first row
    let mut harness = AcceptanceTestHarness::new(20, 40, 8).expect("Should create harness");
    harness.render_to_string();

    // WHEN: User presses Enter and half the animation passes
    harness.send_key(KeyCode::Enter);
    harness.advance(165);

    // THEN: The panel is partly open
    let height = harness.app().list().row_height(Position::new(0));
    assert!(
        height > 1 && height < 4,
        "Panel should be mid-animation, row height was {height}"
    );

    // WHEN: The animation finishes
    harness.settle();

    // THEN: The whole panel is shown
    let output = harness.render_to_string();
    insta::assert_snapshot!("first_row_expanded", output);
}

#[test]
fn enter_twice_after_settling_collapses_again() {
    // GIVEN: An expanded first row
    let mut harness = AcceptanceTestHarness::new(20, 40, 8).expect("Should create harness");
    harness.send_key(KeyCode::Enter);
    harness.settle();

    // WHEN: User presses Enter again
    harness.send_key(KeyCode::Enter);
    harness.settle();

    // THEN: The row is closed and occupies a single line
    assert!(!harness.controller().is_any_expanded());
    assert_eq!(harness.app().list().row_height(Position::new(0)), 1);
    let output = harness.render_to_string();
    assert!(output.contains("▸ Item 0"));
    assert!(output.contains("Collapsed #0"));
}

// ===== Single-open =====

#[test]
fn opening_another_row_closes_the_first() {
    // GIVEN: The first row is open
    let mut harness = AcceptanceTestHarness::new(20, 40, 8).expect("Should create harness");
    harness.send_key(KeyCode::Enter);
    harness.settle();

    // WHEN: User moves to row 4 and opens it
    harness.send_keys(&[
        KeyCode::Char('j'),
        KeyCode::Char('j'),
        KeyCode::Char('j'),
        KeyCode::Char('j'),
        KeyCode::Enter,
    ]);
    harness.settle();

    // THEN: Only row 4 is open
    assert!(!harness.controller().is_expanded(Position::new(0)));
    assert!(harness.controller().is_expanded(Position::new(4)));
    assert_eq!(harness.controller().last_open(), Some(Position::new(4)));
    let output = harness.render_to_string();
    insta::assert_snapshot!("fourth_row_replaces_first", output);
}

#[test]
fn collapse_key_closes_the_open_row() {
    // GIVEN: Row 2 is open
    let mut harness = AcceptanceTestHarness::new(20, 40, 12).expect("Should create harness");
    harness.send_keys(&[KeyCode::Char('j'), KeyCode::Char('j'), KeyCode::Enter]);
    harness.settle();

    // WHEN: User presses Esc
    harness.send_key(KeyCode::Esc);
    harness.settle();

    // THEN: Nothing is open
    assert!(!harness.controller().is_any_expanded());
    assert_eq!(harness.controller().last_open(), None);
}

// ===== Multi-open =====

#[test]
fn multi_open_keeps_rows_open_until_collapse_all() {
    // GIVEN: Multi-open mode
    let mut harness = AcceptanceTestHarness::new(20, 40, 16).expect("Should create harness");
    harness.send_key(KeyCode::Char('m'));

    // WHEN: User opens rows 0 and 1
    harness.send_keys(&[KeyCode::Enter, KeyCode::Char('j'), KeyCode::Enter]);
    harness.settle();

    // THEN: Both stay open
    assert!(harness.controller().is_expanded(Position::new(0)));
    assert!(harness.controller().is_expanded(Position::new(1)));
    assert!(harness.render_to_string().contains(" multi-open |"));

    // WHEN: User collapses everything
    harness.send_key(KeyCode::Char('c'));
    harness.settle();

    // THEN: Both are closed
    assert!(!harness.controller().is_any_expanded());
}

#[test]
fn switching_back_to_single_open_keeps_one_row() {
    // GIVEN: Rows 0 and 1 open in multi-open mode
    let mut harness = AcceptanceTestHarness::new(20, 40, 16).expect("Should create harness");
    harness.send_keys(&[
        KeyCode::Char('m'),
        KeyCode::Enter,
        KeyCode::Char('j'),
        KeyCode::Enter,
    ]);
    harness.settle();

    // WHEN: User switches back to single-open mode
    harness.send_key(KeyCode::Char('m'));
    harness.settle();

    // THEN: Only the highest open row survives
    assert!(harness.controller().single_open_mode());
    assert_eq!(harness.controller().last_open(), Some(Position::new(1)));
    assert!(!harness.controller().is_expanded(Position::new(0)));
    let output = harness.render_to_string();
    assert!(output.contains("▸ Item 0"));
    assert!(output.contains("▾ Item 1"));
}

// ===== Deferral =====

#[test]
fn toggle_during_animation_is_replayed() {
    // GIVEN: Row 0 is expanding
    let mut harness = AcceptanceTestHarness::new(20, 40, 8).expect("Should create harness");
    harness.send_key(KeyCode::Enter);
    harness.advance(100);

    // WHEN: User presses Enter twice more mid-animation
    harness.send_key(KeyCode::Enter);
    harness.send_key(KeyCode::Enter);

    // THEN: Only one toggle is queued; it collapses the row afterwards
    assert!(harness.app().status().contains("queued"));
    harness.settle();
    assert!(!harness.controller().is_expanded(Position::new(0)));
    assert_eq!(harness.app().list().row_height(Position::new(0)), 1);
}
