//! Key event handlers

use crate::input_key::InputKey;
use crate::message::Message;
use crate::state::AppState;

/// Map a key press to the message it triggers, if any.
pub fn handle_key(state: &AppState, key: InputKey) -> Option<Message> {
    // Quit works with or without a mounted panel.
    match key {
        InputKey::Char('q') | InputKey::Esc | InputKey::CharCtrl('c') => {
            return Some(Message::Quit)
        }
        _ => {}
    }

    state.panel.as_ref()?;

    match key {
        InputKey::Up | InputKey::Char('k') => Some(Message::SelectorUp),
        InputKey::Down | InputKey::Char('j') => Some(Message::SelectorDown),
        InputKey::Home | InputKey::Char('g') => Some(Message::SelectorFirst),
        InputKey::End | InputKey::Char('G') => Some(Message::SelectorLast),
        InputKey::Enter => Some(Message::ChooseProvider),
        InputKey::Char('r') => Some(Message::RefreshProviders),
        InputKey::Char('o') => Some(Message::OpenProviderFolder),
        _ => None,
    }
}
