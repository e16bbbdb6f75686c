//! Outward-facing callbacks.

use crate::model::{ActionId, Position, TransitionType};
use serde::Deserialize;
use std::sync::mpsc::Sender;

/// Receives one call per dispatched transition.
pub trait ExpandCollapseListener {
    /// A row's panel is expanding.
    fn on_expand(&mut self, pos: Position);

    /// A row's panel is collapsing.
    fn on_collapse(&mut self, pos: Position);
}

/// Receives panel animation lifecycle events.
///
/// Only fired for panels that are actually animated; a state-only collapse
/// of a row that is scrolled out of view produces no animation events.
pub trait AnimationListener {
    /// An expand animation started.
    fn on_start_expand(&mut self, _pos: Position) {}

    /// An expand animation finished.
    fn on_end_expand(&mut self, _pos: Position) {}

    /// A collapse animation started.
    fn on_start_collapse(&mut self, _pos: Position) {}

    /// A collapse animation finished.
    fn on_end_collapse(&mut self, _pos: Position) {}
}

/// Receives presses of action buttons inside expanded panels.
pub trait ActionListener {
    /// `action` was pressed in the panel of `pos`.
    fn on_action(&mut self, pos: Position, action: ActionId);
}

/// When the [`ExpandCollapseListener`] is told about a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ListenerTiming {
    /// As soon as the transition is initiated.
    #[default]
    Dispatch,
    /// When the panel animation completes (immediately if nothing animates).
    Completion,
}

impl ListenerTiming {
    /// Parse a config/CLI name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "dispatch" => Some(Self::Dispatch),
            "completion" => Some(Self::Completion),
            _ => None,
        }
    }
}

/// A transition reported to an [`ExpandCollapseListener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpandEvent {
    /// `on_expand` was called.
    Expanded(Position),
    /// `on_collapse` was called.
    Collapsed(Position),
}

impl ExpandEvent {
    /// Event for a transition of `kind` at `pos`.
    pub fn new(kind: TransitionType, pos: Position) -> Self {
        match kind {
            TransitionType::Expand => Self::Expanded(pos),
            TransitionType::Collapse => Self::Collapsed(pos),
        }
    }

    /// Position the event is about.
    pub fn position(&self) -> Position {
        match self {
            Self::Expanded(pos) | Self::Collapsed(pos) => *pos,
        }
    }
}

/// Forward transitions over a channel.
///
/// A dropped receiver is ignored; listener failures must never break the UI.
impl ExpandCollapseListener for Sender<ExpandEvent> {
    fn on_expand(&mut self, pos: Position) {
        let _ = self.send(ExpandEvent::Expanded(pos));
    }

    fn on_collapse(&mut self, pos: Position) {
        let _ = self.send(ExpandEvent::Collapsed(pos));
    }
}

impl ActionListener for Sender<(Position, ActionId)> {
    fn on_action(&mut self, pos: Position, action: ActionId) {
        let _ = self.send((pos, action));
    }
}
