use std::time::Duration;

mod bot_callback;
mod bot_messages;
mod callback;
mod commands;
mod conversation;
mod flow;
mod keyboards;
mod payload;
mod texts;
mod transport;


// callback payloads: lang_{code}, lang_custom, cancel
const LANG_PREFIX: &str = "lang_";
const CUSTOM_LANG_TOKEN: &str = "custom";
const CANCEL_PAYLOAD: &str = "cancel";

/// How long to wait for each user reply during translation
pub const WAIT_WINDOW: Duration = Duration::from_secs(60);

pub use bot_callback::callback_handler;
pub use bot_messages::{command_handler, message_handler};
pub use commands::Command;
pub use conversation::{Conversation, Conversations, FlowState, Incoming, Listener, WaitResult};
pub use flow::{FlowOutcome, Selection, TranslationFlow};
pub use transport::Transport;
