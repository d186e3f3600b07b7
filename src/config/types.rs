use mediameta_common::{DisplayContext, DisplayLocale, TableTranslator};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Separators, display offset and date pattern
    #[serde(default)]
    pub display: DisplayLocale,

    /// English label or unit -> localized text
    #[serde(default)]
    pub translations: BTreeMap<String, String>,
}

impl Config {
    /// Build the formatting context for this configuration.
    pub fn display_context(&self) -> mediameta_common::Result<DisplayContext> {
        let translator = TableTranslator::new(self.translations.clone());
        DisplayContext::new(self.display.clone(), Box::new(translator))
    }
}
