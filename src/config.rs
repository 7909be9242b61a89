//! Configuration types and loading

use eyre::{Context, Result, eyre};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level configuration: a named map of model configurations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub models: BTreeMap<String, ModelConfig>,
}

impl Default for Config {
    fn default() -> Self {
        let mut models = BTreeMap::new();
        models.insert("default".to_string(), ModelConfig::default());
        Self { models }
    }
}

impl Config {
    /// Load configuration with fallback chain
    ///
    /// Explicit path, then `./.mteval.yml`, then
    /// `~/.config/mteval/mteval.yml`, then built-in defaults.
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        let local_config = PathBuf::from(".mteval.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("mteval").join("mteval.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Look up a model configuration by name
    pub fn model(&self, name: &str) -> Result<&ModelConfig> {
        self.models.get(name).ok_or_else(|| {
            eyre!(
                "Unknown model '{}'. Configured models: {}",
                name,
                self.models.keys().cloned().collect::<Vec<_>>().join(", ")
            )
        })
    }
}

/// Per-model endpoint and sampling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// API base URL (OpenAI-compatible server)
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Environment variable containing the API key
    #[serde(rename = "api-key-env")]
    pub api_key_env: String,

    /// Model identifier or local model path
    pub model: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Maximum tokens per response
    #[serde(rename = "max-tokens")]
    pub max_tokens: u32,

    /// Per-request timeout in seconds
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Retry attempts before a batch is aborted
    #[serde(rename = "max-retries")]
    pub max_retries: u32,

    /// Fixed sleep between retries, in seconds
    #[serde(rename = "retry-sleep-secs")]
    pub retry_sleep_secs: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            model: "gpt-4".to_string(),
            temperature: 0.0,
            max_tokens: 256,
            timeout_secs: 10,
            max_retries: 5,
            retry_sleep_secs: 5,
        }
    }
}

impl ModelConfig {
    /// Resolve the API key from the configured environment variable
    pub fn get_api_key(&self) -> Result<String> {
        std::env::var(&self.api_key_env)
            .map_err(|_| eyre!("API key not found. Set the {} environment variable.", self.api_key_env))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_config_defaults() {
        let config = ModelConfig::default();
        assert_eq!(config.temperature, 0.0);
        assert_eq!(config.max_tokens, 256);
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.retry_sleep_secs, 5);
    }

    #[test]
    fn test_parse_yaml_with_partial_fields() {
        let yaml = r#"
models:
  llama2-70b:
    base-url: http://localhost:8000/v1
    model: /models/llama2-70b-chat
    timeout-secs: 40
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        let model = config.model("llama2-70b").unwrap();
        assert_eq!(model.base_url, "http://localhost:8000/v1");
        assert_eq!(model.timeout_secs, 40);
        // Unspecified fields fall back to defaults
        assert_eq!(model.max_retries, 5);
        assert_eq!(model.temperature, 0.0);
    }

    #[test]
    fn test_unknown_model_is_an_error() {
        let config = Config::default();
        let err = config.model("no-such-model").unwrap_err();
        assert!(err.to_string().contains("no-such-model"));
    }

    #[test]
    fn test_default_config_has_default_model() {
        let config = Config::default();
        assert!(config.model("default").is_ok());
    }
}
