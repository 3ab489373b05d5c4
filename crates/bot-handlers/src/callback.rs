use crate::{payload::PayloadData, CANCEL_PAYLOAD, CUSTOM_LANG_TOKEN, LANG_PREFIX};

/// Button pressed in language menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Callback {
    /// Language from menu: `lang_<code>`
    Language(String),
    /// User will type language code: `lang_custom`
    CustomLanguage,
    /// `cancel`
    Cancel,
}

impl Callback {
    pub(crate) fn language<S: Into<String>>(code: S) -> Self {
        Self::Language(code.into())
    }
}

impl PayloadData for Callback {
    type Error = CallbackParseError;

    fn to_payload(&self) -> String {
        match self {
            Self::Language(code) => format!("{LANG_PREFIX}{code}"),
            Self::CustomLanguage => format!("{LANG_PREFIX}{CUSTOM_LANG_TOKEN}"),
            Self::Cancel => CANCEL_PAYLOAD.to_string(),
        }
    }

    fn try_from_payload(payload: &str) -> Result<Self, Self::Error> {
        if let Some(code) = payload.strip_prefix(LANG_PREFIX) {
            return match code {
                "" => Err(CallbackParseError::EmptyLanguage),
                CUSTOM_LANG_TOKEN => Ok(Self::CustomLanguage),
                code => Ok(Self::language(code)),
            };
        }
        if payload.starts_with(CANCEL_PAYLOAD) {
            return Ok(Self::Cancel);
        }
        Err(CallbackParseError::UnknownCallbackType)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub(crate) enum CallbackParseError {
    #[error("language code is empty")]
    EmptyLanguage,
    #[error("unknown callback type")]
    UnknownCallbackType,
}
