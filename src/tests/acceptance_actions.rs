//! Acceptance tests for action buttons inside expanded panels

use crate::test_harness::AcceptanceTestHarness;
use crossterm::event::KeyCode;

#[test]
fn actions_on_collapsed_row_are_ignored() {
    // GIVEN: Nothing is open
    let mut harness = AcceptanceTestHarness::new(10, 40, 8).expect("Should create harness");

    // WHEN: User presses an action key
    harness.send_key(KeyCode::Char('1'));

    // THEN: The status explains why nothing happened
    assert_eq!(harness.app().status(), "Expand #0 to use its actions");
}

#[test]
fn actions_on_expanded_row_reach_the_listener() {
    // GIVEN: Row 1 is open, in a terminal wide enough for the full status
    let mut harness = AcceptanceTestHarness::new(10, 60, 10).expect("Should create harness");
    harness.send_keys(&[KeyCode::Char('j'), KeyCode::Enter]);
    harness.settle();

    // WHEN: User presses both action keys
    harness.send_key(KeyCode::Char('1'));
    assert_eq!(harness.app().status(), "Open pressed on #1");
    harness.send_key(KeyCode::Char('2'));

    // THEN: The last press is reported in the status bar
    let output = harness.render_to_string();
    assert!(output.contains("Share pressed on #1"), "{output}");
}

#[test]
fn actions_stop_after_collapsing() {
    // GIVEN: Row 0 was opened and closed again
    let mut harness = AcceptanceTestHarness::new(10, 40, 8).expect("Should create harness");
    harness.send_key(KeyCode::Enter);
    harness.settle();
    harness.send_key(KeyCode::Enter);
    harness.settle();

    // WHEN: User presses an action key
    harness.send_key(KeyCode::Char('2'));

    // THEN: No action fires
    assert_eq!(harness.app().status(), "Expand #0 to use its actions");
}
