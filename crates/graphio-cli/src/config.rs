//! CLI configuration

use std::path::{Path, PathBuf};

use graphio_core::{EdgeReaderConfig, WriterFormat};
use serde::{Deserialize, Serialize};

/// Default location of the config file
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("graphio")
        .join("config.toml")
}

/// Configuration for the CLI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Read edges as directed
    pub directed: bool,

    /// Line comment character, "none" to disable comments
    #[serde(with = "comment_char")]
    pub comment_char: Option<char>,

    /// Output format when the output file extension names none
    pub default_format: WriterFormat,
}

impl Default for Config {
    fn default() -> Self {
        let reader = EdgeReaderConfig::default();
        Self {
            directed: reader.directed,
            comment_char: reader.comment_char,
            default_format: WriterFormat::default(),
        }
    }
}

impl Config {
    /// Load from `path`, falling back to defaults when the file is missing
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::debug!("No config file at {}", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config file {}: {}", path.display(), e))?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn keys() -> &'static [&'static str] {
        &["directed", "comment_char", "default_format"]
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "directed" => Some(self.directed.to_string()),
            "comment_char" => Some(
                self.comment_char
                    .map(String::from)
                    .unwrap_or_else(|| "none".to_string()),
            ),
            "default_format" => Some(self.default_format.name().to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "directed" => {
                self.directed = value
                    .parse()
                    .map_err(|_| anyhow::anyhow!("Expected true or false, got '{}'", value))?;
            }
            "comment_char" => {
                self.comment_char = parse_comment_char(value).map_err(|e| anyhow::anyhow!(e))?;
            }
            "default_format" => {
                self.default_format = WriterFormat::from_name(value)
                    .ok_or_else(|| anyhow::anyhow!("Unknown format '{}'", value))?;
            }
            _ => anyhow::bail!(
                "Unknown config key: {}. Available keys: {}",
                key,
                Self::keys().join(", ")
            ),
        }
        Ok(())
    }

    pub fn reader_config(&self) -> EdgeReaderConfig {
        EdgeReaderConfig {
            directed: self.directed,
            comment_char: self.comment_char,
        }
    }
}

/// Parse a comment character setting: one character, or "none"
pub fn parse_comment_char(value: &str) -> Result<Option<char>, String> {
    if value == "none" || value.is_empty() {
        return Ok(None);
    }
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(Some(c)),
        _ => Err(format!("Expected a single character or 'none', got '{}'", value)),
    }
}

mod comment_char {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<char>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(c) => s.serialize_char(*c),
            None => s.serialize_str("none"),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<char>, D::Error> {
        let value = String::deserialize(d)?;
        super::parse_comment_char(&value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.comment_char, Some('#'));
    }

    #[test]
    fn test_set_save_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.set("directed", "true").unwrap();
        config.set("comment_char", "%").unwrap();
        config.set("default_format", "graphml").unwrap();
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.get("default_format").as_deref(), Some("graphml"));
    }

    #[test]
    fn test_invalid_values() {
        let mut config = Config::default();
        assert!(config.set("directed", "maybe").is_err());
        assert!(config.set("comment_char", "//").is_err());
        assert!(config.set("default_format", "gml").is_err());
        assert!(config.set("colour", "red").is_err());

        config.set("comment_char", "none").unwrap();
        assert_eq!(config.get("comment_char").as_deref(), Some("none"));
    }

    #[test]
    fn test_disabled_comments_survive_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.set("comment_char", "none").unwrap();
        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap().comment_char, None);
    }
}
