//! Acceptance Test Harness for TUI testing
//!
//! Provides a high-level API for acceptance testing user stories by wrapping
//! TuiApp<TestBackend> with convenient methods for simulating user interactions.

use crate::state::{Easing, ExpansionController};
use crate::view::styles::{ColorConfig, ListStyles};
use crate::view::{TuiApp, TuiError};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::Terminal;

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

/// Test harness for acceptance testing
///
/// Wraps TuiApp<TestBackend> and a simulated clock. Keys are handled at the
/// current simulated time; [`advance`](Self::advance) moves the clock.
pub struct AcceptanceTestHarness {
    app: TuiApp<TestBackend>,
    now_ms: u64,
    running: bool,
}

impl AcceptanceTestHarness {
    /// Harness over `rows` rows with a fresh default controller.
    pub fn new(rows: usize, width: u16, height: u16) -> Result<Self, TuiError> {
        Self::with_controller(ExpansionController::default(), rows, width, height)
    }

    /// Harness over `rows` rows driven by `controller`.
    ///
    /// Uses linear easing and no colors so renders are deterministic.
    pub fn with_controller(
        controller: ExpansionController,
        rows: usize,
        width: u16,
        height: u16,
    ) -> Result<Self, TuiError> {
        let terminal = Terminal::new(TestBackend::new(width, height))?;
        let app = TuiApp::new(
            terminal,
            controller,
            rows,
            Easing::Linear,
            ListStyles::with_color_config(ColorConfig::fixed(false)),
        )?;

        Ok(Self {
            app,
            now_ms: 0,
            running: true,
        })
    }

    /// Send a single key event
    ///
    /// # Returns
    /// * `true` - If app quit as a result of this key
    /// * `false` - If app is still running
    pub fn send_key(&mut self, key: KeyCode) -> bool {
        self.send_key_with_mods(key, KeyModifiers::NONE)
    }

    /// Send key with modifiers (e.g., Ctrl+C)
    pub fn send_key_with_mods(&mut self, key: KeyCode, mods: KeyModifiers) -> bool {
        if !self.running {
            return true; // Already quit
        }

        let quit = self.app.handle_key(KeyEvent::new(key, mods));
        if quit {
            self.running = false;
        }
        quit
    }

    /// Send a sequence of keys
    ///
    /// Continues sending keys until the sequence is exhausted or app quits.
    pub fn send_keys(&mut self, keys: &[KeyCode]) {
        for key in keys {
            if self.send_key(*key) {
                break; // Quit encountered
            }
        }
    }

    /// Move the simulated clock forward by `ms` and tick the app.
    pub fn advance(&mut self, ms: u64) {
        self.now_ms += ms;
        self.app.advance(self.now_ms);
    }

    /// Advance far enough for every running animation to finish.
    pub fn settle(&mut self) {
        let step = u64::from(self.app.controller().animation_duration()) + 1;
        self.advance(step);
        // A replayed activation or a follow-up scroll may start another run.
        while self.app.is_animating() {
            self.advance(step);
        }
    }

    /// The expansion controller, for assertions.
    pub fn controller(&self) -> &ExpansionController {
        self.app.controller()
    }

    /// The app under test.
    pub fn app(&self) -> &TuiApp<TestBackend> {
        &self.app
    }

    /// Hand back the controller, e.g. to save and restore it.
    pub fn into_controller(self) -> ExpansionController {
        self.app.into_controller()
    }

    /// Check if app is still running (didn't crash/quit)
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Render the current frame to a string
    ///
    /// # Panics
    /// Panics if rendering fails (should never happen with TestBackend)
    pub fn render_to_string(&mut self) -> String {
        self.app
            .draw()
            .expect("Rendering should succeed in test harness");

        let buffer = self.app.terminal().backend().buffer();
        buffer_to_string(buffer)
    }
}
