use std::sync::Arc;

use teloxide::{
    prelude::*,
    types::{CallbackQuery, MessageId},
};
use tokio_util::task::TaskTracker;

use common::{types::UserId, LogError};
use translator::Translator;

use crate::{
    callback::Callback,
    conversation::Conversations,
    flow::{Selection, TranslationFlow},
    payload::PayloadData,
    texts,
    transport::{allow_not_modified, Transport},
};

/// Button press on inline keyboard
#[derive(Debug, Clone)]
pub(crate) struct Press {
    pub(crate) query_id: String,
    pub(crate) user_id: UserId,
    pub(crate) data: Option<String>,
    /// Chat and id of message with keyboard
    pub(crate) menu: Option<(ChatId, MessageId)>,
}

pub async fn callback_handler(
    bot: Bot,
    q: CallbackQuery,
    translator: Arc<dyn Translator>,
    conversations: Conversations,
    tracker: TaskTracker,
) -> ResponseResult<()> {
    let press = Press {
        query_id: q.id,
        user_id: q.from.id.into(),
        data: q.data,
        menu: q.message.as_ref().map(|m| (m.chat().id, m.id())),
    };
    handle_callback(bot, translator, &conversations, &tracker, press).await
}

pub(crate) async fn handle_callback<T>(
    transport: T,
    translator: Arc<dyn Translator>,
    conversations: &Conversations,
    tracker: &TaskTracker,
    press: Press,
) -> ResponseResult<()>
where
    T: Transport + 'static,
{
    let user_id = press.user_id;
    transport.answer_callback(press.query_id.clone()).await?;

    let Some(data) = press.data.as_deref() else {
        log::debug!("ignoring empty callback {} from user {user_id}", press.query_id);
        return Ok(());
    };
    let callback = match Callback::try_from_payload(data) {
        Ok(c) => c,
        Err(e) => {
            log::debug!("ignoring callback {data:?} from user {user_id}: {e}");
            return Ok(());
        }
    };
    let Some((chat_id, menu_id)) = press.menu else {
        log::error!("got callback {callback:?} from user {user_id} without message");
        return Ok(());
    };

    let selection = match callback {
        Callback::Cancel => {
            if !conversations.cancel(user_id) {
                log::debug!("user {user_id} canceled with no pending translation");
            }
            // menu may be too old to edit, cancel is done anyway
            allow_not_modified(
                transport
                    .edit_text(chat_id, menu_id, texts::CANCELED.to_string())
                    .await,
            )
            .log_error_msg("failed to edit canceled menu");
            log::info!("User {user_id} canceled translation");
            return Ok(());
        }
        Callback::Language(code) => Selection::Language(code),
        Callback::CustomLanguage => {
            log::info!("User {user_id} chose to enter custom language");
            Selection::Custom
        }
    };

    // flow waits for next messages of this user, which dispatcher delivers
    // only after this handler returns
    let conversation = conversations.start(user_id);
    let flow = TranslationFlow::new(transport, translator);
    tracker.spawn(async move {
        match flow.run(conversation, chat_id, menu_id, selection).await {
            Ok(outcome) => log::debug!("translation for user {user_id} finished: {outcome:?}"),
            Err(e) => log::error!("translation for user {user_id} failed: {e}"),
        }
    });

    Ok(())
}
