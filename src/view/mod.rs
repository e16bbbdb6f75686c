//! TUI rendering and terminal management (impure shell)

pub mod constants;
pub mod height_index;
pub mod list;
pub mod render;
pub mod row_pool;
pub mod styles;

pub use height_index::HeightIndex;
pub use list::DemoList;
pub use render::StatusInfo;
pub use row_pool::{Assignment, RowPool, RowView};
pub use styles::{ColorConfig, ListStyles};

use crate::config::keybindings::KeyBindings;
use crate::model::{ActionId, KeyAction, Position};
use crate::state::{Activation, Easing, ExpandEvent, ExpansionController, RowRenderer};
use constants::{FRAME_INTERVAL_MS, IDLE_POLL_MS, STATUS_BAR_HEIGHT};
use crossterm::{
    event::{self, Event, KeyEvent, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    controller: ExpansionController,
    list: DemoList,
    key_bindings: KeyBindings,
    styles: ListStyles,
    cursor: Position,
    status: String,
    events: Receiver<ExpandEvent>,
    actions: Receiver<(Position, ActionId)>,
    now_ms: u64,
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Create an app drawing `rows` rows to `terminal`.
    ///
    /// Installs the app's own listeners on `controller`. Rows restored as
    /// expanded get their height up front so scroll offsets are exact before
    /// they are first drawn.
    pub fn new(
        terminal: Terminal<B>,
        mut controller: ExpansionController,
        rows: usize,
        easing: Easing,
        styles: ListStyles,
    ) -> Result<Self, TuiError> {
        let size = terminal.size()?;
        let width = if size.width > 0 { size.width } else { 80 };
        let mut list = DemoList::new(
            rows,
            width,
            size.height.saturating_sub(STATUS_BAR_HEIGHT),
            easing,
        );

        let (event_tx, events) = mpsc::channel::<ExpandEvent>();
        controller.set_expand_collapse_listener(Box::new(event_tx));
        let (action_tx, actions) = mpsc::channel::<(Position, ActionId)>();
        controller.set_action_listener(
            Box::new(action_tx),
            list::ACTION_LABELS.iter().map(|&(id, _)| ActionId::new(id)),
        );

        let expanded: Vec<Position> = controller.store().expanded_positions().collect();
        for &pos in &expanded {
            let height = match controller.store().cached_height(pos) {
                Some(height) => height,
                None => u16::try_from(list.panel_lines(pos).len()).unwrap_or(u16::MAX),
            };
            list.sync_offscreen_row(pos, height);
        }

        let cursor = controller
            .last_open()
            .filter(|pos| pos.get() < rows)
            .unwrap_or_default();
        list.ensure_visible(cursor);

        info!(rows, restored = expanded.len(), "Starting list");

        Ok(Self {
            terminal,
            controller,
            list,
            key_bindings: KeyBindings::default(),
            styles,
            cursor,
            status: String::from("Ready"),
            events,
            actions,
            now_ms: 0,
        })
    }

    /// The expansion controller.
    pub fn controller(&self) -> &ExpansionController {
        &self.controller
    }

    /// Give back the controller, e.g. to save its state.
    pub fn into_controller(self) -> ExpansionController {
        self.controller
    }

    /// The list host.
    pub fn list(&self) -> &DemoList {
        &self.list
    }

    /// Row under the cursor.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Current status bar message.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// The terminal being drawn to.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Whether a panel animation or smooth scroll is running.
    pub fn is_animating(&self) -> bool {
        self.controller.is_animating() || self.list.is_scrolling()
    }

    /// Bind every visible row to its (possibly recycled) view.
    fn relayout(&mut self) {
        for assignment in self.list.layout() {
            self.controller.bind(
                assignment.position,
                assignment.toggle,
                assignment.panel,
                &mut self.list,
            );
        }
    }

    /// Advance animations and scrolling to `now_ms`.
    pub fn advance(&mut self, now_ms: u64) {
        self.now_ms = now_ms;
        self.list.tick(now_ms);
        self.controller.tick(now_ms, &mut self.list);
        self.drain_events();
    }

    fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            let pos = event.position();
            match event {
                ExpandEvent::Expanded(_) => {
                    let height = self.controller.store().cached_height(pos).unwrap_or(0);
                    self.list.sync_offscreen_row(pos, height);
                    self.status = format!("Expanded {pos}");
                }
                ExpandEvent::Collapsed(_) => {
                    self.list.sync_offscreen_row(pos, 0);
                    self.status = format!("Collapsed {pos}");
                }
            }
        }
        while let Ok((pos, action)) = self.actions.try_recv() {
            let label = list::ACTION_LABELS
                .iter()
                .find(|&&(id, _)| id == action.get())
                .map_or("Action", |&(_, label)| label);
            self.status = format!("{label} pressed on {pos}");
        }
    }

    fn move_cursor(&mut self, action: KeyAction) {
        let last = self.list.rows().saturating_sub(1);
        let page = usize::from(self.list.viewport_height().max(1));
        let current = self.cursor.get();
        let next = match action {
            KeyAction::SelectNext => current.saturating_add(1),
            KeyAction::SelectPrev => current.saturating_sub(1),
            KeyAction::PageDown => current.saturating_add(page),
            KeyAction::PageUp => current.saturating_sub(page),
            KeyAction::SelectFirst => 0,
            KeyAction::SelectLast => last,
            _ => current,
        };
        self.cursor = Position::new(next.min(last));
        self.list.ensure_visible(self.cursor);
    }

    /// Handle a single keyboard event.
    ///
    /// Returns true if the app should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let Some(action) = self.key_bindings.get(key) else {
            return false;
        };
        debug!(?action, "Key action");

        match action {
            KeyAction::Quit => return true,
            action if action.is_selection() => self.move_cursor(action),
            KeyAction::ToggleExpand => {
                self.list.ensure_visible(self.cursor);
                self.relayout();
                let outcome =
                    self.controller
                        .activate_position(self.cursor, self.now_ms, &mut self.list);
                if outcome == Activation::Deferred {
                    self.status = format!("{} busy; toggle queued", self.cursor);
                }
            }
            KeyAction::CollapseOpen => {
                if !self
                    .controller
                    .collapse_currently_open(self.now_ms, &mut self.list)
                {
                    self.status = String::from("Nothing open");
                }
            }
            KeyAction::ToggleSingleOpen => {
                let single_open = !self.controller.single_open_mode();
                self.controller.set_single_open_mode(single_open);
                self.relayout();
                self.status = if single_open {
                    String::from("Single-open mode")
                } else {
                    String::from("Multi-open mode")
                };
            }
            KeyAction::ToggleAdjustToFit => {
                let adjust = !self.controller.adjust_to_fit();
                self.controller.set_adjust_to_fit(adjust);
                self.status = format!("Adjust to fit {}", if adjust { "on" } else { "off" });
            }
            KeyAction::PanelAction(id) => {
                self.relayout();
                let pressed = self
                    .list
                    .toggle_handle(self.cursor)
                    .is_some_and(|toggle| {
                        self.controller
                            .perform_action(toggle, ActionId::new(id), &self.list)
                    });
                if !pressed {
                    self.status = format!("Expand {} to use its actions", self.cursor);
                }
            }
            _ => {}
        }

        self.drain_events();
        false
    }

    /// Terminal resized.
    ///
    /// A width change reflows panel text, so cached panel heights are
    /// dropped and expanded rows are measured again.
    pub fn handle_resize(&mut self, width: u16, height: u16) {
        debug!(width, height, "Resize");
        let width = if width > 0 { width } else { 80 };
        let reflowed = width.max(1) != self.list.width();
        self.list
            .set_size(width, height.saturating_sub(STATUS_BAR_HEIGHT));
        if !reflowed {
            return;
        }

        self.controller.invalidate_heights();
        let expanded: Vec<Position> = self.controller.store().expanded_positions().collect();
        for pos in expanded {
            let height = u16::try_from(self.list.panel_lines(pos).len()).unwrap_or(u16::MAX);
            self.list.sync_offscreen_row(pos, height);
        }
        self.relayout();
    }

    /// Render the current frame.
    pub fn draw(&mut self) -> Result<(), TuiError> {
        self.relayout();
        let status = StatusInfo {
            single_open: self.controller.single_open_mode(),
            adjust_to_fit: self.controller.adjust_to_fit(),
            message: self.status.clone(),
        };
        self.terminal.draw(|frame| {
            render::render(frame, &self.list, self.cursor, &self.styles, &status);
        })?;
        Ok(())
    }
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Set up the terminal in raw mode with alternate screen.
    pub fn start(
        controller: ExpansionController,
        rows: usize,
        easing: Easing,
        styles: ListStyles,
    ) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Self::new(terminal, controller, rows, easing, styles)
    }

    /// Run the main event loop until the user quits.
    ///
    /// Polls at frame rate while something animates and sleeps in longer
    /// intervals otherwise.
    pub fn run(&mut self) -> Result<(), TuiError> {
        let started = Instant::now();
        let now_ms = || u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        self.draw()?;
        loop {
            let timeout = if self.is_animating() {
                FRAME_INTERVAL_MS
            } else {
                IDLE_POLL_MS
            };

            if event::poll(Duration::from_millis(timeout))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.now_ms = now_ms();
                        if self.handle_key(key) {
                            return Ok(());
                        }
                    }
                    Event::Resize(width, height) => self.handle_resize(width, height),
                    _ => {}
                }
            }

            self.advance(now_ms());
            self.draw()?;
        }
    }
}

/// Run the list until the user quits and hand back the controller.
///
/// The terminal is restored even when the loop fails.
pub fn run(
    controller: ExpansionController,
    rows: usize,
    easing: Easing,
    styles: ListStyles,
) -> Result<ExpansionController, TuiError> {
    let mut app = match TuiApp::start(controller, rows, easing, styles) {
        Ok(app) => app,
        Err(e) => {
            let _ = restore_terminal();
            return Err(e);
        }
    };
    let result = app.run();
    restore_terminal()?;
    result.map(|()| app.into_controller())
}

/// Restore terminal to normal state
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
