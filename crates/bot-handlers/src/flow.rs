use std::{sync::Arc, time::Duration};

use teloxide::{prelude::*, types::MessageId};

use translator::Translator;

use crate::{
    conversation::{Conversation, FlowState, Incoming, Listener, WaitResult},
    texts,
    transport::{allow_not_modified, Transport},
    WAIT_WINDOW,
};

/// How user picked target language in menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Language(String),
    Custom,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowOutcome {
    Translated {
        text: String,
        language: String,
        translated: String,
    },
    InvalidCode(String),
    TimedOut(FlowState),
    Canceled,
    /// Another selection of the same user took over
    Replaced,
    Failed,
}

/// Walks user from language selection to translated reply
pub struct TranslationFlow<T> {
    transport: T,
    translator: Arc<dyn Translator>,
    wait_window: Duration,
}

impl<T: Transport> TranslationFlow<T> {
    pub fn new(transport: T, translator: Arc<dyn Translator>) -> Self {
        Self {
            transport,
            translator,
            wait_window: WAIT_WINDOW,
        }
    }
    pub fn with_wait_window(mut self, wait_window: Duration) -> Self {
        self.wait_window = wait_window;
        self
    }

    /// Run flow after user pressed language button on `menu` message
    pub async fn run(
        &self,
        conversation: Conversation,
        chat_id: ChatId,
        menu: MessageId,
        selection: Selection,
    ) -> ResponseResult<FlowOutcome> {
        let user_id = conversation.user();
        let languages = self.translator.languages();

        let (code, language, listener, prompt) = match selection {
            Selection::Language(code) => {
                let Some(name) = languages.name(&code) else {
                    log::warn!("User {user_id} pressed button with unknown language: {code}");
                    allow_not_modified(
                        self.transport
                            .edit_text(chat_id, menu, texts::INVALID_LANGUAGE_CODE.to_string())
                            .await,
                    )?;
                    return Ok(FlowOutcome::InvalidCode(code));
                };
                // listen before prompt is shown, so that quick answer is not lost
                let listener = conversation.listen(FlowState::AwaitingText);
                // repeated press of the same button shows the same text
                allow_not_modified(
                    self.transport
                        .edit_text(chat_id, menu, texts::selected_language(name))
                        .await,
                )?;
                log::info!("User {user_id} selected language {code}");
                (code, name, listener, menu)
            }
            Selection::Custom => {
                let state = FlowState::AwaitingLanguageCode;
                let listener = conversation.listen(state);
                let prompt = self
                    .transport
                    .send_text(chat_id, texts::ENTER_LANGUAGE_CODE.to_string())
                    .await?;
                let incoming = match self.wait(&conversation, listener, chat_id, prompt, state).await? {
                    Ok(incoming) => incoming,
                    Err(outcome) => return Ok(outcome),
                };

                let code = incoming.text.trim().to_lowercase();
                let Some(name) = languages.name(&code) else {
                    self.transport
                        .reply_text(
                            chat_id,
                            incoming.message_id,
                            texts::INVALID_LANGUAGE_CODE.to_string(),
                        )
                        .await?;
                    log::warn!("User {user_id} entered invalid language code: {code}");
                    return Ok(FlowOutcome::InvalidCode(code));
                };
                let listener = conversation.listen(FlowState::AwaitingText);
                let prompt = self
                    .transport
                    .reply_text(chat_id, incoming.message_id, texts::selected_language(name))
                    .await?;
                log::info!("User {user_id} entered language {code}");
                (code, name, listener, prompt)
            }
        };

        let incoming = match self
            .wait(&conversation, listener, chat_id, prompt, FlowState::AwaitingText)
            .await?
        {
            Ok(incoming) => incoming,
            Err(outcome) => return Ok(outcome),
        };
        let text = incoming.text.trim().to_string();

        conversation.set_state(FlowState::Translating);
        match self.translator.translate(&text, &code).await {
            Ok(translated) => {
                self.transport
                    .reply_text(
                        chat_id,
                        incoming.message_id,
                        texts::translation(&text, language, &translated),
                    )
                    .await?;
                log::info!("User {user_id} translated text to {code}: {translated}");
                Ok(FlowOutcome::Translated {
                    text,
                    language: language.to_string(),
                    translated,
                })
            }
            Err(e) => {
                self.transport
                    .reply_text(
                        chat_id,
                        incoming.message_id,
                        texts::TRANSLATION_FAILED.to_string(),
                    )
                    .await?;
                log::error!("Translation error for user {user_id}: {e}");
                Ok(FlowOutcome::Failed)
            }
        }
    }

    /// Wait for user message, on timeout or cancel `prompt` is edited to tell
    /// user what happened and flow outcome is returned instead
    ///
    /// Replaced flow leaves `prompt` alone, it may belong to the newer flow
    async fn wait(
        &self,
        conversation: &Conversation,
        listener: Listener<'_>,
        chat_id: ChatId,
        prompt: MessageId,
        state: FlowState,
    ) -> ResponseResult<Result<Incoming, FlowOutcome>> {
        let user_id = conversation.user();
        match listener.wait(self.wait_window).await {
            WaitResult::Matched(incoming) => Ok(Ok(incoming)),
            WaitResult::TimedOut => {
                allow_not_modified(
                    self.transport
                        .edit_text(chat_id, prompt, texts::TIMED_OUT.to_string())
                        .await,
                )?;
                log::warn!("User {user_id} timed out in state {state:?}");
                Ok(Err(FlowOutcome::TimedOut(state)))
            }
            WaitResult::Canceled => {
                allow_not_modified(
                    self.transport
                        .edit_text(chat_id, prompt, texts::CANCELED.to_string())
                        .await,
                )?;
                log::info!("User {user_id} canceled translation in state {state:?}");
                Ok(Err(FlowOutcome::Canceled))
            }
            WaitResult::Replaced => {
                log::debug!("translation of user {user_id} replaced in state {state:?}");
                Ok(Err(FlowOutcome::Replaced))
            }
        }
    }
}
