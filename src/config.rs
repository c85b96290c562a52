use crate::theme::Theme;
use anyhow::Result;
use std::path::{Path, PathBuf};

pub const DEFAULT_DB_PATH: &str = "finance.db";
pub const DEFAULT_CURRENCY: &str = "TL";
pub const DEFAULT_LOG_FILE: &str = "finance.log";

/// Resolved application settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub db_path: PathBuf,
    pub currency: String,
    pub theme: Theme,
}

impl Settings {
    /// Builds settings, reading the theme file when one is given.
    pub fn resolve(db_path: PathBuf, currency: &str, theme_path: Option<&Path>) -> Result<Self> {
        let theme = match theme_path {
            Some(path) => Theme::load(path)?,
            None => Theme::default(),
        };

        Ok(Self {
            db_path,
            currency: currency.trim().to_string(),
            theme,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_without_theme() {
        let settings = Settings::resolve(PathBuf::from("x.db"), " USD ", None).unwrap();
        assert_eq!(settings.db_path, PathBuf::from("x.db"));
        assert_eq!(settings.currency, "USD");
        assert_eq!(settings.theme, Theme::default());
    }

    #[test]
    fn test_missing_theme_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(Settings::resolve(PathBuf::from("x.db"), "TL", Some(missing.as_path())).is_err());
    }

    #[test]
    fn test_defaults() {
        let settings =
            Settings::resolve(PathBuf::from(DEFAULT_DB_PATH), DEFAULT_CURRENCY, None).unwrap();
        assert_eq!(settings.db_path, PathBuf::from("finance.db"));
        assert_eq!(settings.currency, "TL");
    }
}
