use log::error;
use rust_embed::RustEmbed;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(RustEmbed)]
#[folder = "assets/"]
pub struct Assets;

/// (lang_code, display_name)
pub const SUPPORTED_LANGUAGES: &[(&str, &str)] = &[("nl", "Nederlands"), ("en", "English")];

const SUPPORTED_LANG_CODES: &[&str] = &["nl", "en"];

pub const DEFAULT_LANGUAGE: &str = "nl";

pub struct I18nManager {
    translations: HashMap<String, Arc<HashMap<String, String>>>,
}

impl I18nManager {
    pub fn new() -> Self {
        let mut translations = HashMap::new();

        for &(lang, _) in SUPPORTED_LANGUAGES {
            let path = format!("i18n/{}.json", lang);

            let Some(data) = Assets::get(&path) else {
                error!("missing translation file: {}", path);
                continue;
            };

            match serde_json::from_slice::<HashMap<String, String>>(&data.data) {
                Ok(map) => {
                    translations.insert(lang.to_string(), Arc::new(map));
                }
                Err(e) => error!("invalid JSON in {}: {}", path, e),
            }
        }

        I18nManager { translations }
    }

    pub fn for_lang(&self, lang: &str) -> I18n {
        let lang_key = if self.translations.contains_key(lang) {
            lang
        } else {
            DEFAULT_LANGUAGE
        };

        let translations = self
            .translations
            .get(lang_key)
            .cloned()
            .unwrap_or_else(|| Arc::new(HashMap::new()));
        let fallback = if lang_key != DEFAULT_LANGUAGE {
            self.translations
                .get(DEFAULT_LANGUAGE)
                .cloned()
                .unwrap_or_else(|| Arc::new(HashMap::new()))
        } else {
            translations.clone()
        };

        I18n {
            translations,
            fallback,
            lang: lang_key.to_string(),
        }
    }

    pub fn is_supported_language(lang: &str) -> bool {
        SUPPORTED_LANG_CODES.contains(&lang)
    }
}

impl Default for I18nManager {
    fn default() -> Self {
        Self::new()
    }
}

pub struct I18n {
    translations: Arc<HashMap<String, String>>,
    fallback: Arc<HashMap<String, String>>,
    pub lang: String,
}

impl I18n {
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        self.translations
            .get(key)
            .or_else(|| self.fallback.get(key))
            .map(|s| s.as_str())
            .unwrap_or(key)
    }
}

pub fn detect_language(accept_language: &str) -> String {
    for part in accept_language.split(',') {
        let lang = part.split(';').next().unwrap_or("").trim();
        let lang_prefix = lang.split('-').next().unwrap_or("").to_lowercase();
        if I18nManager::is_supported_language(&lang_prefix) {
            return lang_prefix;
        }
    }
    DEFAULT_LANGUAGE.to_string()
}
