use async_trait::async_trait;
use teloxide::{
    prelude::*,
    types::{InlineKeyboardMarkup, MessageId, ReplyParameters},
    ApiError, RequestError,
};

/// Outgoing side of chat, used by handlers and translation flow
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send_text(&self, chat_id: ChatId, text: String) -> ResponseResult<MessageId>;
    async fn reply_text(
        &self,
        chat_id: ChatId,
        reply_to: MessageId,
        text: String,
    ) -> ResponseResult<MessageId>;
    async fn reply_menu(
        &self,
        chat_id: ChatId,
        reply_to: MessageId,
        text: String,
        keyboard: InlineKeyboardMarkup,
    ) -> ResponseResult<MessageId>;
    async fn edit_text(&self, chat_id: ChatId, id: MessageId, text: String) -> ResponseResult<()>;
    async fn answer_callback(&self, query_id: String) -> ResponseResult<()>;
}

#[async_trait]
impl Transport for Bot {
    async fn send_text(&self, chat_id: ChatId, text: String) -> ResponseResult<MessageId> {
        Ok(self.send_message(chat_id, text).await?.id)
    }

    async fn reply_text(
        &self,
        chat_id: ChatId,
        reply_to: MessageId,
        text: String,
    ) -> ResponseResult<MessageId> {
        let msg = self
            .send_message(chat_id, text)
            .reply_parameters(ReplyParameters::new(reply_to))
            .await?;
        Ok(msg.id)
    }

    async fn reply_menu(
        &self,
        chat_id: ChatId,
        reply_to: MessageId,
        text: String,
        keyboard: InlineKeyboardMarkup,
    ) -> ResponseResult<MessageId> {
        let msg = self
            .send_message(chat_id, text)
            .reply_markup(keyboard)
            .reply_parameters(ReplyParameters::new(reply_to))
            .await?;
        Ok(msg.id)
    }

    async fn edit_text(&self, chat_id: ChatId, id: MessageId, text: String) -> ResponseResult<()> {
        self.edit_message_text(chat_id, id, text).await?;
        Ok(())
    }

    async fn answer_callback(&self, query_id: String) -> ResponseResult<()> {
        self.answer_callback_query(query_id).await?;
        Ok(())
    }
}

/// Telegram refuses edit that leaves message as it is, treat it as done
pub(crate) fn allow_not_modified(res: ResponseResult<()>) -> ResponseResult<()> {
    match res {
        Err(RequestError::Api(ApiError::MessageNotModified)) => Ok(()),
        res => res,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allow_not_modified() {
        assert!(allow_not_modified(Ok(())).is_ok());
        assert!(allow_not_modified(Err(RequestError::Api(ApiError::MessageNotModified))).is_ok());
        assert!(matches!(
            allow_not_modified(Err(RequestError::Api(ApiError::MessageToEditNotFound))),
            Err(RequestError::Api(ApiError::MessageToEditNotFound))
        ));
    }
}
