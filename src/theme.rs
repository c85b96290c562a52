use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Declarative colour scheme consumed by the presentation layer.
/// Any field missing from a theme file keeps its default.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub income: String,
    pub expense: String,
    pub accent: String,
    pub highlight: String,
    pub text: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            income: "#4a90e2".to_string(),
            expense: "#e94e4e".to_string(),
            accent: "#0078d7".to_string(),
            highlight: "#005a9e".to_string(),
            text: "#333333".to_string(),
        }
    }
}

impl Theme {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read theme file {}", path.display()))?;
        let theme: Theme = serde_json::from_str(&raw).context("Failed to parse theme file")?;
        theme.check()?;
        Ok(theme)
    }

    /// Every colour must be a `#rrggbb` value.
    pub fn check(&self) -> Result<()> {
        for (name, value) in self.entries() {
            parse_hex(value).ok_or_else(|| anyhow!("Theme colour '{}' is not #rrggbb: {}", name, value))?;
        }
        Ok(())
    }

    fn entries(&self) -> [(&'static str, &str); 5] {
        [
            ("income", self.income.as_str()),
            ("expense", self.expense.as_str()),
            ("accent", self.accent.as_str()),
            ("highlight", self.highlight.as_str()),
            ("text", self.text.as_str()),
        ]
    }
}

/// Parses `#rrggbb` into its RGB components.
pub fn parse_hex(value: &str) -> Option<(u8, u8, u8)> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("#4a90e2"), Some((0x4a, 0x90, 0xe2)));
        assert_eq!(parse_hex("#FFFFFF"), Some((255, 255, 255)));
        assert_eq!(parse_hex("4a90e2"), None);
        assert_eq!(parse_hex("#4a90e"), None);
        assert_eq!(parse_hex("#zz90e2"), None);
    }

    #[test]
    fn test_default_theme_is_valid() {
        assert!(Theme::default().check().is_ok());
    }

    #[test]
    fn test_partial_theme_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r##"{{"income": "#00ff00"}}"##).unwrap();

        let theme = Theme::load(file.path()).unwrap();
        assert_eq!(theme.income, "#00ff00");
        assert_eq!(theme.expense, Theme::default().expense);
    }

    #[test]
    fn test_bad_colour_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r##"{{"accent": "blue"}}"##).unwrap();

        assert!(Theme::load(file.path()).is_err());
    }
}
