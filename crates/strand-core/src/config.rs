use std::path::Path;

use anyhow::{Context, bail};
use serde::Deserialize;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_CHAT_MODEL: &str = "gpt-5-mini";
const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub openai: OpenAiConfig,
    pub pgvector: PgVectorConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub base_url: String,
    pub chat_model: String,
    pub embedding_model: String,
    pub temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PgVectorConfig {
    pub url: String,
    pub collection: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.into(),
            chat_model: DEFAULT_CHAT_MODEL.into(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.into(),
            temperature: None,
        }
    }
}

#[allow(clippy::derivable_impls)]
impl Default for PgVectorConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            collection: String::new(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            openai: OpenAiConfig::default(),
            pgvector: PgVectorConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from an optional TOML file, then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str::<Self>(&content).context("failed to parse config file")?
        } else {
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Environment wins over file values. Empty variables are ignored.
    pub fn apply_overrides(&mut self, get: impl Fn(&str) -> Option<String>) {
        let mut set = |key: &str, slot: &mut String| {
            if let Some(v) = get(key)
                && !v.is_empty()
            {
                *slot = v;
            }
        };
        set("OPENAI_API_KEY", &mut self.openai.api_key);
        set("OPENAI_BASE_URL", &mut self.openai.base_url);
        set("OPENAI_MODEL_CHAT", &mut self.openai.chat_model);
        set("OPENAI_MODEL", &mut self.openai.embedding_model);
        set("PGVECTOR_URL", &mut self.pgvector.url);
        set("PGVECTOR_COLLECTION", &mut self.pgvector.collection);

        if let Some(v) = get("OPENAI_TEMPERATURE")
            && let Ok(t) = v.parse::<f32>()
        {
            self.openai.temperature = Some(t);
        }
    }

    /// Pre-flight check for commands that talk to the chat/embeddings API.
    ///
    /// # Errors
    ///
    /// Names the missing variable.
    pub fn require_openai(&self) -> anyhow::Result<&OpenAiConfig> {
        if self.openai.api_key.is_empty() {
            bail!("environment variable OPENAI_API_KEY is not set");
        }
        Ok(&self.openai)
    }

    /// Pre-flight check for commands that touch the vector store.
    ///
    /// # Errors
    ///
    /// Names the first missing variable.
    pub fn require_pgvector(&self) -> anyhow::Result<&PgVectorConfig> {
        if self.pgvector.url.is_empty() {
            bail!("environment variable PGVECTOR_URL is not set");
        }
        if self.pgvector.collection.is_empty() {
            bail!("environment variable PGVECTOR_COLLECTION is not set");
        }
        Ok(&self.pgvector)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn defaults_when_file_missing() {
        let config = Config::default();
        assert_eq!(config.openai.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.openai.chat_model, "gpt-5-mini");
        assert_eq!(config.openai.embedding_model, "text-embedding-3-small");
        assert!(config.openai.api_key.is_empty());
    }

    #[test]
    fn parse_valid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("strand.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        write!(
            f,
            r#"
[openai]
chat_model = "gpt-5-nano"
temperature = 0.5

[pgvector]
url = "postgres://localhost/rag"
collection = "docs"
"#
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.openai.chat_model, "gpt-5-nano");
        assert_eq!(config.openai.temperature, Some(0.5));
        assert_eq!(config.pgvector.collection, "docs");
        // Unset file keys keep their defaults.
        assert_eq!(config.openai.embedding_model, "text-embedding-3-small");
    }

    #[test]
    fn env_overrides_file_values() {
        let vars = env(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_MODEL", "text-embedding-3-large"),
            ("PGVECTOR_URL", "postgres://db/vectors"),
        ]);
        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).cloned());

        assert_eq!(config.openai.api_key, "sk-test");
        assert_eq!(config.openai.embedding_model, "text-embedding-3-large");
        assert_eq!(config.pgvector.url, "postgres://db/vectors");
        // Untouched values keep their defaults.
        assert_eq!(config.openai.chat_model, "gpt-5-mini");
    }

    #[test]
    fn empty_env_values_ignored() {
        let vars = env(&[("OPENAI_MODEL_CHAT", "")]);
        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).cloned());
        assert_eq!(config.openai.chat_model, "gpt-5-mini");
    }

    #[test]
    fn require_openai_names_the_variable() {
        let config = Config::default();
        let err = config.require_openai().unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn require_pgvector_names_the_first_missing() {
        let mut config = Config::default();
        let err = config.require_pgvector().unwrap_err();
        assert!(err.to_string().contains("PGVECTOR_URL"));

        config.pgvector.url = "postgres://localhost/rag".into();
        let err = config.require_pgvector().unwrap_err();
        assert!(err.to_string().contains("PGVECTOR_COLLECTION"));

        config.pgvector.collection = "docs".into();
        assert!(config.require_pgvector().is_ok());
    }

    #[test]
    fn temperature_override_parses() {
        let vars = env(&[("OPENAI_TEMPERATURE", "0.9")]);
        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).cloned());
        assert_eq!(config.openai.temperature, Some(0.9));
    }
}
