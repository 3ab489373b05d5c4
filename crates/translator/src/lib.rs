//! Machine translation backends
use async_trait::async_trait;

pub use google::GoogleTranslator;
pub use languages::Languages;

mod google;
mod languages;

/// Service that translates text into a target language
#[async_trait]
pub trait Translator: Send + Sync {
    /// Languages accepted as translation target
    fn languages(&self) -> &Languages;

    /// Translate `text` into language with `target` code
    async fn translate(&self, text: &str, target: &str) -> Result<String, TranslateError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("failed to send request: {0}")]
    Request(#[from] reqwest::Error),
    #[error("failed to parse response: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unexpected response layout")]
    UnexpectedResponse,
    #[error("service returned empty translation")]
    Empty,
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),
}
