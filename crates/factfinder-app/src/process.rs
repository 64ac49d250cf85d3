//! Message processing
//!
//! Runs the TEA update loop for one message and dispatches resulting actions.

use tokio::sync::mpsc;

use crate::actions::handle_action;
use crate::handler;
use crate::message::Message;
use crate::services::ProviderRegistry;
use crate::state::AppState;

/// Process a message through the TEA update function
pub fn process_message<R>(
    state: &mut AppState,
    message: Message,
    msg_tx: &mpsc::Sender<Message>,
    registry: &R,
) where
    R: ProviderRegistry + Clone + Sync + 'static,
{
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = handler::update(state, m);

        if let Some(action) = result.action {
            handle_action(action, msg_tx.clone(), registry.clone());
        }

        // Continue with follow-up message
        msg = result.message;
    }
}
