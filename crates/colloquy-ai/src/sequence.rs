//! Outbound message sequence construction.

use crate::session::Turn;
use crate::OutboundMessage;

/// Build the ordered request for one send.
///
/// The result is always: the system prompt, then each prior turn as a
/// user/assistant pair in history order, then the new input. Its length is
/// `2 * history.len() + 2`. Empty strings are passed through as-is.
pub fn build_messages(
    system_prompt: &str,
    history: &[Turn],
    new_input: &str,
) -> Vec<OutboundMessage> {
    let mut msgs = Vec::with_capacity(2 * history.len() + 2);
    msgs.push(OutboundMessage::System(system_prompt.to_string()));
    for turn in history {
        msgs.push(OutboundMessage::User(turn.user().to_string()));
        msgs.push(OutboundMessage::Assistant(turn.assistant().to_string()));
    }
    msgs.push(OutboundMessage::User(new_input.to_string()));
    msgs
}
