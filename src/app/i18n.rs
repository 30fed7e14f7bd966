use crate::utils::error::{GainError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

const EN_TABLE: &str = include_str!("../../locales/en.toml");
const NO_TABLE: &str = include_str!("../../locales/no.toml");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    No,
}

impl Locale {
    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::No => "no",
        }
    }

    fn table_source(&self) -> &'static str {
        match self {
            Locale::En => EN_TABLE,
            Locale::No => NO_TABLE,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = GainError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Locale::En),
            "no" | "nb" | "norsk" | "norwegian" => Ok(Locale::No),
            other => Err(GainError::ConfigValidationError {
                field: "lang".to_string(),
                message: format!("Unsupported language '{}'. Valid languages: en, no", other),
            }),
        }
    }
}

/// 語系字串表，找不到的鍵先回退到英文，再回退到鍵本身
#[derive(Debug, Clone)]
pub struct Messages {
    locale: Locale,
    table: HashMap<String, String>,
    fallback: HashMap<String, String>,
}

impl Messages {
    pub fn load(locale: Locale) -> Result<Self> {
        Self::from_tables(locale, locale.table_source(), EN_TABLE)
    }

    pub fn from_tables(locale: Locale, table: &str, fallback: &str) -> Result<Self> {
        Ok(Self {
            locale,
            table: parse_table(locale.code(), table)?,
            fallback: parse_table(Locale::En.code(), fallback)?,
        })
    }

    pub fn text<'a>(&'a self, key: &'a str) -> &'a str {
        self.table
            .get(key)
            .or_else(|| self.fallback.get(key))
            .map(String::as_str)
            .unwrap_or_else(|| {
                tracing::warn!("Missing message key '{}' for locale {}", key, self.locale);
                key
            })
    }

    /// 以 `{name}` 佔位符填入參數
    pub fn format(&self, key: &str, args: &[(&str, String)]) -> String {
        args.iter()
            .fold(self.text(key).to_string(), |text, (name, value)| {
                text.replace(&format!("{{{}}}", name), value)
            })
    }
}

fn parse_table(code: &str, content: &str) -> Result<HashMap<String, String>> {
    toml::from_str(content).map_err(|e| GainError::ConfigValidationError {
        field: format!("locales/{}.toml", code),
        message: format!("TOML parsing error: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_parsing() {
        assert_eq!("EN".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!("nb".parse::<Locale>().unwrap(), Locale::No);
        assert!("de".parse::<Locale>().is_err());
    }

    #[test]
    fn test_bundled_tables_have_the_same_keys() {
        let en = parse_table("en", EN_TABLE).unwrap();
        let no = parse_table("no", NO_TABLE).unwrap();
        let mut en_keys: Vec<_> = en.keys().collect();
        let mut no_keys: Vec<_> = no.keys().collect();
        en_keys.sort();
        no_keys.sort();
        assert_eq!(en_keys, no_keys);
    }

    #[test]
    fn test_format_replaces_placeholders() {
        let messages = Messages::load(Locale::No).unwrap();
        let text = messages.format(
            "headline_smoking",
            &[("now", "20".to_string()), ("goal", "0".to_string()), ("months", "60".to_string())],
        );
        assert!(text.starts_with("Gode nyheter!"));
        assert!(text.contains("fra 20 til 0 sigaretter"));
        assert!(text.contains("+60 måneder"));
    }

    #[test]
    fn test_missing_key_falls_back_to_english_then_key() {
        let messages = Messages::from_tables(Locale::No, "male = \"Mann\"", EN_TABLE).unwrap();
        assert_eq!(messages.text("male"), "Mann");
        assert_eq!(messages.text("female"), "Female");
        assert_eq!(messages.text("no_such_key"), "no_such_key");
    }
}
