use anyhow::{Context, Result};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_PATH: &str = "config.toml";
const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Application configuration
#[derive(Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub api_key: String,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("server", &self.server)
            .field("llm", &self.llm)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Settings read from the optional TOML file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub server: ServerConfig,
    pub llm: LlmConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub base_url: String,
    pub analysis_model: String,
    pub insight_model: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            analysis_model: "gpt-4o".to_string(),
            insight_model: "gpt-4".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `APP_CONFIG` (or `config.toml`) and the environment.
    ///
    /// The file is optional; the API key must come from `OPENAI_API_KEY`.
    pub fn load() -> Result<Self> {
        let path = std::env::var("APP_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));

        let file = FileConfig::load(&path)?;
        let api_key = std::env::var(API_KEY_VAR).unwrap_or_default();

        Self::from_parts(file, api_key)
    }

    pub fn from_parts(file: FileConfig, api_key: String) -> Result<Self> {
        let api_key = api_key.trim().to_string();
        if api_key.is_empty() {
            anyhow::bail!("{} must be set", API_KEY_VAR);
        }
        if file.llm.analysis_model.trim().is_empty() || file.llm.insight_model.trim().is_empty() {
            anyhow::bail!("llm model identifiers cannot be empty");
        }
        if !file.llm.base_url.starts_with("http") {
            anyhow::bail!("llm.base_url must start with http or https");
        }

        Ok(Self {
            server: file.server,
            llm: file.llm,
            api_key,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl FileConfig {
    /// Read the TOML file at `path`, falling back to defaults when it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("failed to parse config {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_listen_on_port_8000() {
        let config = AppConfig::from_parts(FileConfig::default(), "sk-test".to_string()).unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:8000");
        assert_eq!(config.llm.analysis_model, "gpt-4o");
        assert_eq!(config.llm.insight_model, "gpt-4");
        assert_eq!(config.llm.base_url, "https://api.openai.com/v1");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let input = r#"
[llm]
insight_model = "gpt-4o-mini"
"#;
        let parsed: FileConfig = toml::from_str(input).unwrap();
        assert_eq!(parsed.llm.insight_model, "gpt-4o-mini");
        assert_eq!(parsed.llm.analysis_model, "gpt-4o");
        assert_eq!(parsed.server.port, 8000);
    }

    #[test]
    fn server_section_overrides_bind_addr() {
        let input = r#"
[server]
host = "127.0.0.1"
port = 9000
"#;
        let parsed: FileConfig = toml::from_str(input).unwrap();
        let config = AppConfig::from_parts(parsed, "sk-test".to_string()).unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:9000");
    }

    #[test]
    fn debug_output_hides_api_key() {
        let config =
            AppConfig::from_parts(FileConfig::default(), "sk-secret-123".to_string()).unwrap();
        let printed = format!("{:?}", config);
        assert!(!printed.contains("sk-secret-123"));
        assert!(printed.contains("<redacted>"));
        assert!(printed.contains("gpt-4o"));
    }

    #[test]
    fn blank_api_key_is_rejected() {
        assert!(AppConfig::from_parts(FileConfig::default(), String::new()).is_err());
        assert!(AppConfig::from_parts(FileConfig::default(), "   ".to_string()).is_err());
    }

    #[test]
    fn non_http_base_url_is_rejected() {
        let input = r#"
[llm]
base_url = "api.openai.com"
"#;
        let parsed: FileConfig = toml::from_str(input).unwrap();
        assert!(AppConfig::from_parts(parsed, "sk-test".to_string()).is_err());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let parsed = FileConfig::load(Path::new("does-not-exist/config.toml")).unwrap();
        assert_eq!(parsed.server.host, "0.0.0.0");
    }
}
