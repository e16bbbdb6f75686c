//! Action buttons inside expanded panels.

use crate::model::{ActionId, Position};
use crate::state::listener::ActionListener;
use std::collections::BTreeSet;
use tracing::debug;

/// Routes action-button presses to a listener.
///
/// Only ids registered together with the listener are dispatched; presses of
/// other buttons are ignored.
#[derive(Default)]
pub struct ActionDispatcher {
    listener: Option<Box<dyn ActionListener>>,
    ids: BTreeSet<ActionId>,
}

impl std::fmt::Debug for ActionDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionDispatcher")
            .field("has_listener", &self.listener.is_some())
            .field("ids", &self.ids)
            .finish()
    }
}

impl ActionDispatcher {
    /// Register `listener` for the given action ids, replacing any previous
    /// registration.
    pub fn set_listener(
        &mut self,
        listener: Box<dyn ActionListener>,
        ids: impl IntoIterator<Item = ActionId>,
    ) {
        self.listener = Some(listener);
        self.ids = ids.into_iter().collect();
    }

    /// Remove the listener and its ids.
    pub fn clear(&mut self) {
        self.listener = None;
        self.ids.clear();
    }

    /// Whether `action` is routed to a listener.
    pub fn handles(&self, action: ActionId) -> bool {
        self.listener.is_some() && self.ids.contains(&action)
    }

    /// Registered action ids, ascending.
    pub fn action_ids(&self) -> impl Iterator<Item = ActionId> + '_ {
        self.ids.iter().copied()
    }

    /// Deliver a press of `action` in the panel of `pos`.
    ///
    /// Returns whether the press reached a listener.
    pub fn dispatch(&mut self, pos: Position, action: ActionId) -> bool {
        if !self.ids.contains(&action) {
            debug!(action = action.get(), "Ignoring unregistered panel action");
            return false;
        }
        match self.listener.as_mut() {
            Some(listener) => {
                listener.on_action(pos, action);
                true
            }
            None => false,
        }
    }
}
