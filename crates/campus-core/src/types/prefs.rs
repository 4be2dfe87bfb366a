//! Persisted display preferences.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, InvalidInputError};

/// Light or dark colour scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            _ => Err(InvalidInputError::ThemeMode {
                value: s.to_string(),
            }
            .into()),
        }
    }
}

/// A language code such as `en` or `bn-BD`.
///
/// A two or three letter lowercase primary subtag, optionally followed by a
/// region subtag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageCode(String);

impl LanguageCode {
    pub const DEFAULT: &'static str = "en";

    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref().trim();
        let reject = |reason: &str| -> Error {
            InvalidInputError::Language {
                value: s.to_string(),
                reason: reason.to_string(),
            }
            .into()
        };

        let mut parts = s.split(['-', '_']);
        let primary = parts.next().unwrap_or_default();
        if !(2..=3).contains(&primary.len()) || !primary.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(reject("primary subtag must be 2-3 letters"));
        }
        let region = parts.next();
        if parts.next().is_some() {
            return Err(reject("only language and region subtags are supported"));
        }

        let mut code = primary.to_ascii_lowercase();
        if let Some(region) = region {
            if region.len() != 2 || !region.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(reject("region subtag must be 2 letters"));
            }
            code.push('-');
            code.push_str(&region.to_ascii_uppercase());
        }

        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for LanguageCode {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for LanguageCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for LanguageCode {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<LanguageCode> for String {
    fn from(code: LanguageCode) -> Self {
        code.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_parse() {
        assert_eq!("DARK".parse::<ThemeMode>().unwrap(), ThemeMode::Dark);
        assert!("sepia".parse::<ThemeMode>().is_err());
        assert_eq!(ThemeMode::default(), ThemeMode::Light);
    }

    #[test]
    fn language_normalizes_case() {
        assert_eq!(LanguageCode::new("EN").unwrap().as_str(), "en");
        assert_eq!(LanguageCode::new("bn_bd").unwrap().as_str(), "bn-BD");
    }

    #[test]
    fn language_rejects_garbage() {
        assert!(LanguageCode::new("").is_err());
        assert!(LanguageCode::new("english").is_err());
        assert!(LanguageCode::new("en-US-x").is_err());
        assert!(LanguageCode::new("e1").is_err());
    }
}
