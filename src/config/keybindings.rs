//! Keyboard bindings for the demo list.

use crate::model::key_action::KeyAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Maps keyboard events to list actions.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&key).copied()
    }

    /// Bind `key` to `action`, replacing any previous binding of that key.
    pub fn bind(&mut self, key: KeyEvent, action: KeyAction) {
        self.bindings.insert(key, action);
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        use KeyAction::*;

        let none = KeyModifiers::NONE;
        let table = [
            // Selection
            (KeyCode::Char('j'), none, SelectNext),
            (KeyCode::Down, none, SelectNext),
            (KeyCode::Char('k'), none, SelectPrev),
            (KeyCode::Up, none, SelectPrev),
            (KeyCode::Char('d'), KeyModifiers::CONTROL, PageDown),
            (KeyCode::PageDown, none, PageDown),
            (KeyCode::Char('u'), KeyModifiers::CONTROL, PageUp),
            (KeyCode::PageUp, none, PageUp),
            (KeyCode::Char('g'), none, SelectFirst),
            (KeyCode::Home, none, SelectFirst),
            (KeyCode::Char('G'), KeyModifiers::SHIFT, SelectLast),
            (KeyCode::End, none, SelectLast),
            // Expansion
            (KeyCode::Enter, none, ToggleExpand),
            (KeyCode::Char(' '), none, ToggleExpand),
            (KeyCode::Char('c'), none, CollapseOpen),
            (KeyCode::Esc, none, CollapseOpen),
            (KeyCode::Char('m'), none, ToggleSingleOpen),
            (KeyCode::Char('a'), none, ToggleAdjustToFit),
            // Panel action buttons
            (KeyCode::Char('1'), none, PanelAction(1)),
            (KeyCode::Char('2'), none, PanelAction(2)),
            // Application
            (KeyCode::Char('q'), none, Quit),
            (KeyCode::Char('c'), KeyModifiers::CONTROL, Quit),
        ];

        let bindings = table
            .into_iter()
            .map(|(code, modifiers, action)| (KeyEvent::new(code, modifiers), action))
            .collect();

        Self { bindings }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn enter_and_space_toggle_the_selected_row() {
        let bindings = KeyBindings::default();

        assert_eq!(bindings.get(key(KeyCode::Enter)), Some(KeyAction::ToggleExpand));
        assert_eq!(
            bindings.get(key(KeyCode::Char(' '))),
            Some(KeyAction::ToggleExpand)
        );
    }

    #[test]
    fn digits_press_panel_action_buttons() {
        let bindings = KeyBindings::default();

        assert_eq!(
            bindings.get(key(KeyCode::Char('2'))),
            Some(KeyAction::PanelAction(2))
        );
        assert_eq!(bindings.get(key(KeyCode::Char('3'))), None);
    }

    #[test]
    fn ctrl_c_quits_but_plain_c_collapses() {
        let bindings = KeyBindings::default();

        assert_eq!(
            bindings.get(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(KeyAction::Quit)
        );
        assert_eq!(
            bindings.get(key(KeyCode::Char('c'))),
            Some(KeyAction::CollapseOpen)
        );
    }

    #[test]
    fn bind_overrides_default() {
        let mut bindings = KeyBindings::default();

        bindings.bind(key(KeyCode::Char('x')), KeyAction::Quit);
        bindings.bind(key(KeyCode::Char('q')), KeyAction::CollapseOpen);

        assert_eq!(bindings.get(key(KeyCode::Char('x'))), Some(KeyAction::Quit));
        assert_eq!(
            bindings.get(key(KeyCode::Char('q'))),
            Some(KeyAction::CollapseOpen)
        );
    }
}
