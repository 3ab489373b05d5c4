use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::{Languages, TranslateError, Translator};

const ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

/// Client for the public Google Translate web endpoint
#[derive(Debug, Clone)]
pub struct GoogleTranslator {
    client: Client,
    languages: Languages,
}

impl GoogleTranslator {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            languages: Languages::google(),
        }
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    fn languages(&self) -> &Languages {
        &self.languages
    }

    async fn translate(&self, text: &str, target: &str) -> Result<String, TranslateError> {
        if !self.languages.contains(target) {
            return Err(TranslateError::UnsupportedLanguage(target.to_string()));
        }

        let body = self
            .client
            .get(ENDPOINT)
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", api_code(target)),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        log::debug!("got translation response of {} bytes", body.len());

        parse_response(&body)
    }
}

/// Endpoint expects region in upper case
fn api_code(code: &str) -> &str {
    match code {
        "zh-cn" => "zh-CN",
        "zh-tw" => "zh-TW",
        c => c,
    }
}

// [[["translated","source",...],["translated","source",...]],null,"en",...]
fn parse_response(body: &str) -> Result<String, TranslateError> {
    let value: Value = serde_json::from_str(body)?;
    let sentences = value
        .get(0)
        .and_then(Value::as_array)
        .ok_or(TranslateError::UnexpectedResponse)?;

    let text: String = sentences
        .iter()
        .filter_map(|s| s.get(0).and_then(Value::as_str))
        .collect();

    if text.trim().is_empty() {
        Err(TranslateError::Empty)
    } else {
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_response() {
        let body = r#"[[["سلام","hello",null,null,10]],null,"en",null,null,null,1.0]"#;
        assert_eq!(parse_response(body).unwrap(), "سلام");

        let body = r#"[[["Hallo. ","Hello. ",null,null,3],["Wie geht's?","How are you?",null,null,3]],null,"en"]"#;
        assert_eq!(parse_response(body).unwrap(), "Hallo. Wie geht's?");
    }

    #[test]
    fn test_parse_invalid_response() {
        assert!(matches!(
            parse_response("not json"),
            Err(TranslateError::Json(_))
        ));
        assert!(matches!(
            parse_response(r#"{"error":"x"}"#),
            Err(TranslateError::UnexpectedResponse)
        ));
        assert!(matches!(
            parse_response(r#"[null,null,"en"]"#),
            Err(TranslateError::UnexpectedResponse)
        ));
        assert!(matches!(
            parse_response(r#"[[[null,"hello"]],null,"en"]"#),
            Err(TranslateError::Empty)
        ));
    }

    #[test]
    fn test_api_code() {
        let table = [("zh-cn", "zh-CN"), ("zh-tw", "zh-TW"), ("en", "en"), ("fa", "fa")];
        for (code, expected) in table {
            assert_eq!(api_code(code), expected);
        }
    }

    #[tokio::test]
    async fn test_unsupported_language_is_not_requested() {
        common::init_logger();

        let translator = GoogleTranslator::new(Client::new());
        let res = translator.translate("hello", "zz").await;
        assert!(matches!(res, Err(TranslateError::UnsupportedLanguage(c)) if c == "zz"));
    }
}
