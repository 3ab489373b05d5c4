use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, ReplyMarkup};

use crate::{callback::Callback, payload::PayloadData, texts};

/// Languages offered in menu, (label, code)
pub(crate) const MENU_LANGUAGES: &[(&str, &str)] = &[
    ("English", "en"),
    ("Persian", "fa"),
    ("Arabic", "ar"),
    ("French", "fr"),
    ("German", "de"),
    ("Spanish", "es"),
];

#[derive(Debug, Default)]
pub(crate) struct KeyboardBuilder {
    keys: Vec<InlineKeyboardButton>,
    columns: usize,
    footer: Vec<InlineKeyboardButton>,
}

impl KeyboardBuilder {
    fn with_layout(rows_capacity: usize, columns: usize) -> Self {
        Self {
            keys: Vec::with_capacity(rows_capacity * columns),
            columns,
            footer: vec![],
        }
    }
    fn callback<T, D>(mut self, text: T, data: D) -> Self
    where
        T: Into<String>,
        D: Into<String>,
    {
        self.keys.push(InlineKeyboardButton::callback(text, data));
        self
    }
    /// Add button to the last row, which is kept apart from grid
    fn footer_callback<T, D>(mut self, text: T, data: D) -> Self
    where
        T: Into<String>,
        D: Into<String>,
    {
        self.footer.push(InlineKeyboardButton::callback(text, data));
        self
    }
}

impl From<KeyboardBuilder> for ReplyMarkup {
    fn from(value: KeyboardBuilder) -> Self {
        Self::InlineKeyboard(value.into())
    }
}

impl From<KeyboardBuilder> for InlineKeyboardMarkup {
    fn from(value: KeyboardBuilder) -> Self {
        let mut rows: Vec<Vec<_>> = value
            .keys
            .chunks(value.columns.max(1))
            .map(|row| row.to_owned())
            .collect();
        if !value.footer.is_empty() {
            rows.push(value.footer);
        }
        Self::new(rows)
    }
}

pub(crate) struct Keyboards;

impl Keyboards {
    pub(crate) fn languages_menu(languages: &[(&str, &str)]) -> KeyboardBuilder {
        const LANGS_IN_ROW: usize = 2;
        let mut keyboard =
            KeyboardBuilder::with_layout(languages.len() / LANGS_IN_ROW + 1, LANGS_IN_ROW);
        for (label, code) in languages {
            keyboard = keyboard.callback(
                format!("{label} ({code})"),
                Callback::language(*code).to_payload(),
            );
        }

        keyboard
            .footer_callback(
                texts::OTHER_LANGUAGE_BUTTON,
                Callback::CustomLanguage.to_payload(),
            )
            .footer_callback(texts::CANCEL_BUTTON, Callback::Cancel.to_payload())
    }
}
