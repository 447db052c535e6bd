//! Configuration settings for Explain This.

use crate::error::{ExplainError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub openai: OpenAISettings,
    pub server: ServerSettings,
    pub limits: LimitSettings,
    pub youtube: YoutubeSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// Directory holding a custom `prompts.toml` (overrides defaults).
    pub prompts_dir: Option<String>,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            prompts_dir: None,
        }
    }
}

/// Completion model settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAISettings {
    /// Chat model used for explanations.
    pub model: String,
    /// Upper bound on tokens in the generated explanation.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
}

impl Default for OpenAISettings {
    fn default() -> Self {
        Self {
            model: "gpt-4".to_string(),
            max_tokens: 1500,
            temperature: 0.7,
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Origin allowed to make cross-origin requests (in addition to localhost:3000).
    pub frontend_url: String,
    /// Verbose request tracing and error output.
    pub debug: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            frontend_url: "http://localhost:3000".to_string(),
            debug: true,
        }
    }
}

/// Input size limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitSettings {
    /// Maximum accepted PDF upload, in megabytes.
    pub max_file_size_mb: u64,
    /// Maximum characters forwarded to the model before truncation.
    pub max_text_length: usize,
}

impl Default for LimitSettings {
    fn default() -> Self {
        Self {
            max_file_size_mb: 50,
            max_text_length: 10_000,
        }
    }
}

impl LimitSettings {
    /// Upload ceiling in bytes.
    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_mb.saturating_mul(1024 * 1024)
    }
}

/// YouTube transcript settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct YoutubeSettings {
    /// Preferred caption language code.
    pub language: String,
}

impl Default for YoutubeSettings {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file, then apply
    /// environment overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        let mut settings = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            Settings::default()
        };

        settings.apply_env(|key| std::env::var(key).ok())?;
        Ok(settings)
    }

    /// Load a `.env` file into the process environment.
    ///
    /// Searches the current directory and its parents when `path` is None.
    /// Variables already present in the environment are left untouched.
    /// Returns the file that was read, if any.
    pub fn load_env_file(path: Option<&Path>) -> Option<PathBuf> {
        match path {
            Some(p) => dotenvy::from_path(p).ok().map(|_| p.to_path_buf()),
            None => dotenvy::dotenv().ok(),
        }
    }

    /// Override settings from environment-style variables.
    ///
    /// `lookup` is `std::env::var` in production; tests pass a map.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("OPENAI_MODEL") {
            self.openai.model = v;
        }
        if let Some(v) = lookup("OPENAI_MAX_TOKENS") {
            self.openai.max_tokens = parse_var("OPENAI_MAX_TOKENS", &v)?;
        }
        if let Some(v) = lookup("OPENAI_TEMPERATURE") {
            self.openai.temperature = parse_var("OPENAI_TEMPERATURE", &v)?;
        }
        if let Some(v) = lookup("FRONTEND_URL") {
            self.server.frontend_url = v;
        }
        if let Some(v) = lookup("MAX_FILE_SIZE_MB") {
            self.limits.max_file_size_mb = parse_var("MAX_FILE_SIZE_MB", &v)?;
        }
        if let Some(v) = lookup("MAX_TEXT_LENGTH") {
            self.limits.max_text_length = parse_var("MAX_TEXT_LENGTH", &v)?;
        }
        if let Some(v) = lookup("DEBUG") {
            self.server.debug = v.eq_ignore_ascii_case("true");
        }
        if let Some(v) = lookup("HOST") {
            self.server.host = v;
        }
        if let Some(v) = lookup("PORT") {
            self.server.port = parse_var("PORT", &v)?;
        }
        if let Some(v) = lookup("LOG_LEVEL") {
            self.general.log_level = v.to_lowercase();
        }
        if let Some(v) = lookup("TRANSCRIPT_LANGUAGE") {
            self.youtube.language = v;
        }
        Ok(())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| ExplainError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("explain-this")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded custom prompts directory, if configured.
    pub fn prompts_dir(&self) -> Option<PathBuf> {
        self.general.prompts_dir.as_deref().map(Self::expand_path)
    }
}

fn parse_var<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| ExplainError::Config(format!("{}='{}' is invalid: {}", key, value, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.openai.model, "gpt-4");
        assert_eq!(settings.openai.max_tokens, 1500);
        assert_eq!(settings.limits.max_file_size_mb, 50);
        assert_eq!(settings.limits.max_text_length, 10_000);
        assert_eq!(settings.server.port, 8000);
        assert!(settings.server.debug);
    }

    #[test]
    fn test_env_overrides() {
        let vars = env(&[
            ("OPENAI_MODEL", "gpt-4o-mini"),
            ("OPENAI_MAX_TOKENS", "500"),
            ("OPENAI_TEMPERATURE", "0.2"),
            ("MAX_TEXT_LENGTH", "42"),
            ("DEBUG", "False"),
            ("PORT", "9001"),
        ]);
        let mut settings = Settings::default();
        settings.apply_env(|k| vars.get(k).cloned()).unwrap();

        assert_eq!(settings.openai.model, "gpt-4o-mini");
        assert_eq!(settings.openai.max_tokens, 500);
        assert!((settings.openai.temperature - 0.2).abs() < f32::EPSILON);
        assert_eq!(settings.limits.max_text_length, 42);
        assert!(!settings.server.debug);
        assert_eq!(settings.server.port, 9001);
    }

    #[test]
    fn test_invalid_env_value_is_config_error() {
        let vars = env(&[("MAX_FILE_SIZE_MB", "lots")]);
        let mut settings = Settings::default();
        let err = settings.apply_env(|k| vars.get(k).cloned()).unwrap_err();
        assert!(matches!(err, ExplainError::Config(_)));
        assert!(err.to_string().contains("MAX_FILE_SIZE_MB"));
    }

    #[test]
    fn test_huge_file_limit_saturates() {
        let vars = env(&[("MAX_FILE_SIZE_MB", &u64::MAX.to_string())]);
        let mut settings = Settings::default();
        settings.apply_env(|k| vars.get(k).cloned()).unwrap();

        assert_eq!(settings.limits.max_file_size_bytes(), u64::MAX);
    }

    #[test]
    fn test_env_file_fills_unset_variables_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(
            &path,
            "EXPLAIN_THIS_DOTENV_MODEL=gpt-from-file\nEXPLAIN_THIS_DOTENV_PORT=9100\n",
        )
        .unwrap();
        std::env::set_var("EXPLAIN_THIS_DOTENV_PORT", "9200");

        let loaded = Settings::load_env_file(Some(&path));

        assert_eq!(loaded.as_deref(), Some(path.as_path()));
        assert_eq!(
            std::env::var("EXPLAIN_THIS_DOTENV_MODEL").unwrap(),
            "gpt-from-file"
        );
        assert_eq!(std::env::var("EXPLAIN_THIS_DOTENV_PORT").unwrap(), "9200");
    }

    #[test]
    fn test_missing_env_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Settings::load_env_file(Some(&dir.path().join("absent.env"))).is_none());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[limits]\nmax_text_length = 200\n").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let settings: Settings = toml::from_str(&content).unwrap();
        assert_eq!(settings.limits.max_text_length, 200);
        assert_eq!(settings.limits.max_file_size_mb, 50);
        assert_eq!(settings.openai.model, "gpt-4");
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut settings = Settings::default();
        settings.server.frontend_url = "https://explain.example.com".to_string();
        settings.save_to(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let reloaded: Settings = toml::from_str(&content).unwrap();
        assert_eq!(reloaded.server.frontend_url, "https://explain.example.com");
    }
}
