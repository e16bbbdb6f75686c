//! Snapshot tests for the demo list
//!
//! Uses insta + ratatui TestBackend to verify rendering output doesn't regress.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use slidex::model::Position;
use slidex::state::{Easing, ExpansionController};
use slidex::view::{ColorConfig, ListStyles, TuiApp};

// ===== Test Helpers =====

/// Convert a ratatui buffer to a string representation for snapshot testing.
///
/// Captures the visual output character by character, preserving layout.
/// Empty trailing lines are removed to keep snapshots clean.
fn buffer_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    let area = buffer.area();
    let mut lines = Vec::new();

    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            let cell = &buffer[(x, y)];
            line.push_str(cell.symbol());
        }
        let trimmed = line.trim_end();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }

    lines.join("\n")
}

fn app(rows: usize, width: u16, height: u16) -> TuiApp<TestBackend> {
    let terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    TuiApp::new(
        terminal,
        ExpansionController::default(),
        rows,
        Easing::Linear,
        ListStyles::with_color_config(ColorConfig::fixed(false)),
    )
    .unwrap()
}

fn press(app: &mut TuiApp<TestBackend>, codes: &[KeyCode]) {
    for &code in codes {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }
}

fn render(app: &mut TuiApp<TestBackend>) -> String {
    app.draw().unwrap();
    buffer_to_string(app.terminal().backend().buffer())
}

// ===== Snapshots =====

#[test]
fn snapshot_two_rows_open_in_multi_open_mode() {
    let mut app = app(20, 40, 12);

    press(
        &mut app,
        &[KeyCode::Char('m'), KeyCode::Enter, KeyCode::Char('j'), KeyCode::Enter],
    );
    app.advance(1_000);

    insta::assert_snapshot!("multi_open_rows", render(&mut app));
}

// ===== Rendering details =====

#[test]
fn half_open_panel_shows_leading_lines_only() {
    let mut app = app(20, 40, 12);
    press(&mut app, &[KeyCode::Char('j'), KeyCode::Char('j'), KeyCode::Enter]);

    // Row 2's panel is six lines tall; halfway through three are shown.
    let full = app.list().panel_lines(Position::new(2)).len();
    app.advance(165);
    let output = render(&mut app);

    let shown = output.lines().filter(|line| line.starts_with("    ")).count();
    assert!(shown > 0 && shown < full, "{shown} of {full} lines:\n{output}");
    assert!(output.contains("▾ Item 2"));
}

#[test]
fn cursor_row_is_reverse_video() {
    let mut app = app(5, 30, 6);
    press(&mut app, &[KeyCode::Char('j')]);

    app.draw().unwrap();
    let buffer = app.terminal().backend().buffer();

    assert!(buffer[(0, 1)]
        .modifier
        .contains(ratatui::style::Modifier::REVERSED));
    assert!(!buffer[(0, 0)]
        .modifier
        .contains(ratatui::style::Modifier::REVERSED));
}
