use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::summarize::DEFAULT_SENTENCE_COUNT;

/// YouTube-specific configuration block from config.toml.
#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct YouTubeConfig {
    /// Override the base URL (proxy or test server).
    pub base_url: Option<String>,
}

/// Top-level ytsum config file structure.
#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct YtsumConfig {
    /// Default summary length in sentences.
    pub sentences: Option<usize>,
    /// Stopword set language tag (default "en").
    pub language: Option<String>,
    /// Extra stopwords layered on top of the language set.
    pub extra_stopwords: Option<Vec<String>>,
    pub youtube: Option<YouTubeConfig>,
}

impl YtsumConfig {
    /// Load config from ~/.ytsum/config.toml. Returns default if file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = config_path()?;
        if !path.exists() {
            return Ok(YtsumConfig::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: YtsumConfig =
            toml::from_str(&content).with_context(|| "Failed to parse config.toml")?;
        Ok(config)
    }

    /// Effective summary length: CLI flag > config > built-in default.
    pub fn effective_sentences(&self, cli_flag: Option<usize>) -> usize {
        cli_flag
            .or(self.sentences)
            .unwrap_or(DEFAULT_SENTENCE_COUNT)
    }

    /// Effective stopword language: CLI flag > config > "en".
    pub fn effective_language(&self, cli_flag: Option<&str>) -> String {
        cli_flag
            .map(|l| l.to_string())
            .or_else(|| self.language.clone())
            .unwrap_or_else(|| "en".to_string())
    }

    pub fn youtube_base_url(&self) -> Option<String> {
        self.youtube.as_ref().and_then(|y| y.base_url.clone())
    }

    /// Display the effective config.
    pub fn display(&self) -> String {
        let mut lines = Vec::new();
        lines.push(format!(
            "sentences = {}",
            self.sentences.unwrap_or(DEFAULT_SENTENCE_COUNT)
        ));
        lines.push(format!(
            "language = \"{}\"",
            self.language.as_deref().unwrap_or("en")
        ));
        if let Some(ref extra) = self.extra_stopwords {
            lines.push(format!("extra_stopwords = {extra:?}"));
        }
        if let Some(ref yt) = self.youtube {
            lines.push("[youtube]".to_string());
            if let Some(ref url) = yt.base_url {
                lines.push(format!("  base_url = \"{url}\""));
            }
        }
        lines.join("\n")
    }
}

/// Path to the config file: ~/.ytsum/config.toml
pub fn config_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".ytsum").join("config.toml"))
}

/// Default config template content.
pub fn default_config_template() -> &'static str {
    r#"# ~/.ytsum/config.toml
# CLI flags override these values.

# sentences = 5
# language = "en"
# extra_stopwords = ["uh", "um", "yeah"]

[youtube]
# base_url = "https://www.youtube.com"
"#
}

/// Create the default config file if it doesn't already exist.
pub fn init_config() -> Result<bool> {
    let path = config_path()?;
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, default_config_template())?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_unset() {
        let cfg = YtsumConfig::default();
        assert_eq!(cfg.effective_sentences(None), DEFAULT_SENTENCE_COUNT);
        assert_eq!(cfg.effective_language(None), "en");
        assert_eq!(cfg.youtube_base_url(), None);
    }

    #[test]
    fn cli_flag_wins_over_config() {
        let cfg = YtsumConfig {
            sentences: Some(3),
            language: Some("de".to_string()),
            ..Default::default()
        };
        assert_eq!(cfg.effective_sentences(Some(7)), 7);
        assert_eq!(cfg.effective_sentences(None), 3);
        assert_eq!(cfg.effective_language(Some("fr")), "fr");
        assert_eq!(cfg.effective_language(None), "de");
    }

    #[test]
    fn template_parses() {
        let cfg: YtsumConfig = toml::from_str(default_config_template()).unwrap();
        assert!(cfg.sentences.is_none());
        assert!(cfg.youtube.is_some());
    }
}
