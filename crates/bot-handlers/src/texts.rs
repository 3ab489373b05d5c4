//! Texts sent to users
use translator::Languages;

pub(crate) const CHOOSE_LANGUAGE: &str = "Please choose the target language:";
pub(crate) const ENTER_LANGUAGE_CODE: &str =
    "Please enter the target language code (e.g. 'en' for English):";
pub(crate) const INVALID_LANGUAGE_CODE: &str =
    "Invalid language code. Use /languages to see the list of supported codes.";
pub(crate) const TIMED_OUT: &str = "Response time is over. Please run /translate again.";
pub(crate) const CANCELED: &str = "Translation canceled. Use /translate to start again.";
pub(crate) const TRANSLATION_FAILED: &str = "Translation failed. Please try again.";

pub(crate) const OTHER_LANGUAGE_BUTTON: &str = "Other language";
pub(crate) const CANCEL_BUTTON: &str = "Cancel";

pub(crate) fn welcome(first_name: Option<&str>) -> String {
    let greeting = match first_name {
        Some(name) => format!("Hello {name}!"),
        None => "Hello!".to_string(),
    };
    [
        greeting.as_str(),
        "",
        "I am a translation bot. I can translate your text into many languages.",
        "",
        "Commands:",
        "- /translate: start translation",
        "- /languages: show the list of supported languages",
        "",
        "Use /translate to begin!",
    ]
    .join("\n")
}

pub(crate) fn languages_list(languages: &Languages) -> String {
    let list = languages
        .iter()
        .map(|(code, name)| format!("{code}: {name}"))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "Supported languages:\n\n{list}\n\n\
        Use /translate and pick a language or type its code (e.g. 'en' for English)."
    )
}

pub(crate) fn selected_language(name: &str) -> String {
    format!("Selected language: {name}\nPlease send the text to translate:")
}

pub(crate) fn translation(text: &str, language: &str, translated: &str) -> String {
    format!("Original text: {text}\nTarget language: {language}\nTranslation: {translated}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_languages_list_has_line_per_language() {
        let languages = Languages::google();
        let text = languages_list(&languages);

        let lines: Vec<_> = text
            .lines()
            .filter(|line| {
                line.split_once(": ")
                    .is_some_and(|(code, name)| languages.name(code) == Some(name))
            })
            .collect();
        assert_eq!(lines.len(), languages.len());

        for (code, name) in languages.iter() {
            let line = format!("{code}: {name}");
            assert_eq!(text.lines().filter(|l| *l == line).count(), 1, "{line}");
        }
    }

    #[test]
    fn test_translation_has_three_lines() {
        let text = translation("hello", "Persian", "سلام");
        assert_eq!(
            text.lines().collect::<Vec<_>>(),
            [
                "Original text: hello",
                "Target language: Persian",
                "Translation: سلام"
            ]
        );
    }

    #[test]
    fn test_welcome() {
        assert!(welcome(Some("Ali")).starts_with("Hello Ali!\n"));
        assert!(welcome(None).starts_with("Hello!\n"));
    }
}
