use std::sync::Arc;

use teloxide::{prelude::*, types::MessageId};

use common::types::UserId;
use translator::Translator;

use crate::{
    conversation::{Conversations, Incoming},
    keyboards::{Keyboards, MENU_LANGUAGES},
    texts,
    transport::Transport,
    Command,
};

pub async fn command_handler(
    bot: Bot,
    msg: Message,
    cmd: Command,
    translator: Arc<dyn Translator>,
    conversations: Conversations,
) -> ResponseResult<()> {
    handle_command(
        &bot,
        translator.as_ref(),
        &conversations,
        (msg.chat.id, msg.id),
        msg.chat.first_name(),
        cmd,
    )
    .await
}

/// Reply to command sent as message `msg`
pub(crate) async fn handle_command<T: Transport>(
    transport: &T,
    translator: &dyn Translator,
    conversations: &Conversations,
    (chat_id, msg_id): (ChatId, MessageId),
    first_name: Option<&str>,
    cmd: Command,
) -> ResponseResult<()> {
    let user_id: UserId = chat_id.into();

    // any command interrupts translation that waits for user input
    if conversations.cancel(user_id) {
        log::info!("User {user_id} interrupted pending translation with /{cmd:?}");
    }

    match cmd {
        Command::Start => {
            transport
                .reply_text(chat_id, msg_id, texts::welcome(first_name))
                .await?;
            log::info!("User {user_id} started the bot");
        }
        Command::Languages => {
            transport
                .reply_text(chat_id, msg_id, texts::languages_list(translator.languages()))
                .await?;
            log::info!("User {user_id} requested language list");
        }
        Command::Translate => {
            transport
                .reply_menu(
                    chat_id,
                    msg_id,
                    texts::CHOOSE_LANGUAGE.to_string(),
                    Keyboards::languages_menu(MENU_LANGUAGES).into(),
                )
                .await?;
            log::info!("User {user_id} started translation process");
        }
    };

    Ok(())
}

/// Plain text messages are only meaningful for a translation waiting for them
pub async fn message_handler(msg: Message, conversations: Conversations) -> ResponseResult<()> {
    let user_id: UserId = msg.chat.id.into();
    let Some(text) = msg.text() else {
        log::debug!("ignoring non-text message from user {user_id}");
        return Ok(());
    };

    let incoming = Incoming {
        text: text.to_string(),
        message_id: msg.id,
    };
    if conversations.deliver(user_id, incoming) {
        log::debug!("passed message from user {user_id} to translation");
    } else {
        log::debug!("ignoring message from user {user_id}: nothing waits for it");
    }
    Ok(())
}
