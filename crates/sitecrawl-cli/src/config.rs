//! Configuration management for the CLI.

use crate::cli::RunOverrides;
use crate::error::{CliError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use sitecrawl_fetch::FetchConfig;
use sitecrawl_llm::OllamaConfig;
use sitecrawl_orchestrator::OrchestratorConfig;
use sitecrawl_refiner::RefinerConfig;
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
///
/// Every section is optional in the file; missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Ollama connection
    #[serde(default = "default_llm")]
    pub llm: OllamaConfig,

    /// HTTP fetching and URL discovery
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Keyword generation and cleaning
    #[serde(default)]
    pub refiner: RefinerConfig,

    /// Driving loop
    #[serde(default = "default_crawl", deserialize_with = "deserialize_crawl")]
    pub crawl: OrchestratorConfig,

    /// Where state and reports live
    #[serde(default)]
    pub storage: Storage,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Storage locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Storage {
    /// Directory of per-run state files
    #[serde(default = "default_state_dir")]
    pub state_dir: PathBuf,

    /// Directory of per-run Markdown reports
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

/// Global CLI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        Ok(sitecrawl_home()?.join("config.toml"))
    }

    /// Load configuration from `path` (or the default path), falling back to defaults.
    ///
    /// An explicit path that does not exist is an error; a missing default
    /// file is not.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (Self::path()?, false),
        };

        if path.exists() {
            let contents = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&contents)?;
            config.validate()?;
            Ok(config)
        } else if explicit {
            Err(CliError::Config(format!("Config file not found: {}", path.display())))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = self.to_toml()?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Serialize to TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<()> {
        self.llm.validate().map_err(|e| CliError::Config(format!("[llm] {}", e)))?;
        self.fetch.validate().map_err(|e| CliError::Config(format!("[fetch] {}", e)))?;
        self.refiner.validate().map_err(|e| CliError::Config(format!("[refiner] {}", e)))?;
        self.crawl.validate().map_err(|e| CliError::Config(format!("[crawl] {}", e)))?;
        Ok(())
    }

    /// Apply command-line overrides.
    pub fn apply(&mut self, overrides: &RunOverrides) {
        if let Some(model) = &overrides.model {
            self.llm.model = model.clone();
        }
        if let Some(url) = &overrides.ollama_url {
            self.llm.endpoint = url.clone();
        }
        if let Some(output) = &overrides.output {
            self.storage.output_dir = output.clone();
        }
        if let Some(state_dir) = &overrides.state_dir {
            self.storage.state_dir = state_dir.clone();
        }
        if let Some(max_attempts) = overrides.max_attempts {
            self.crawl.max_attempts = max_attempts;
        }
        if let Some(delay_ms) = overrides.delay_ms {
            self.crawl.request_delay_ms = delay_ms;
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm: default_llm(),
            fetch: FetchConfig::default(),
            refiner: RefinerConfig::default(),
            crawl: default_crawl(),
            storage: Storage::default(),
            settings: Settings::default(),
        }
    }
}

impl Default for Storage {
    fn default() -> Self {
        Self {
            state_dir: default_state_dir(),
            output_dir: default_output_dir(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn sitecrawl_home() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
    Ok(home.join(".sitecrawl"))
}

// Matches the refiner's per-call budget.
fn default_llm() -> OllamaConfig {
    OllamaConfig {
        timeout_secs: 120,
        ..OllamaConfig::default()
    }
}

/// Pause between targets unless `[crawl]` sets one
const DEFAULT_REQUEST_DELAY_MS: u64 = 1_000;

fn default_crawl() -> OrchestratorConfig {
    OrchestratorConfig {
        request_delay_ms: DEFAULT_REQUEST_DELAY_MS,
        ..OrchestratorConfig::default()
    }
}

// A partial `[crawl]` table keeps the CLI delay, not the library's 0.
fn deserialize_crawl<'de, D>(deserializer: D) -> std::result::Result<OrchestratorConfig, D::Error>
where
    D: Deserializer<'de>,
{
    let mut table = toml::Table::deserialize(deserializer)?;
    table
        .entry("request_delay_ms")
        .or_insert(toml::Value::Integer(DEFAULT_REQUEST_DELAY_MS as i64));
    toml::Value::Table(table)
        .try_into()
        .map_err(serde::de::Error::custom)
}

fn default_state_dir() -> PathBuf {
    sitecrawl_home()
        .map(|home| home.join("state"))
        .unwrap_or_else(|_| PathBuf::from(".sitecrawl").join("state"))
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.settings.color);
        assert_eq!(config.settings.format, OutputFormat::Table);
        assert_eq!(config.crawl.request_delay_ms, 1_000);
        assert_eq!(config.storage.output_dir, PathBuf::from("output"));
        assert!(config.storage.state_dir.ends_with("state"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_takes_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[llm]\nmodel = \"qwen2\"\n\n[crawl]\nmax_attempts = 0\n\n[settings]\nformat = \"json\"\n",
        )
        .unwrap();

        let config = Config::load_from(Some(&path)).unwrap();
        assert_eq!(config.llm.model, "qwen2");
        assert_eq!(config.llm.endpoint, OllamaConfig::default().endpoint);
        assert_eq!(config.crawl.attempt_limit(), None);
        assert_eq!(config.crawl.fetch_timeout_secs, 60);
        assert_eq!(config.crawl.request_delay_ms, 1_000);
        assert_eq!(config.settings.format, OutputFormat::Json);
        assert_eq!(config.fetch, FetchConfig::default());
    }

    #[test]
    fn test_partial_crawl_section_keeps_delay() {
        let config: Config = toml::from_str("[crawl]\ncase_insensitive = true\n").unwrap();
        assert!(config.crawl.case_insensitive);
        assert_eq!(config.crawl.request_delay_ms, 1_000);
        assert_eq!(config.crawl.max_attempts, 3);

        let config: Config = toml::from_str("[crawl]\nrequest_delay_ms = 0\n").unwrap();
        assert_eq!(config.crawl.request_delay_ms, 0);

        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.crawl.request_delay_ms, 1_000);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.storage.output_dir = PathBuf::from("reports");
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(Some(&path)).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = TempDir::new().unwrap();
        let result = Config::load_from(Some(&dir.path().join("absent.toml")));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_invalid_section_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[crawl]\nfetch_timeout_secs = 0\n").unwrap();

        match Config::load_from(Some(&path)) {
            Err(CliError::Config(msg)) => assert!(msg.starts_with("[crawl]")),
            other => panic!("Expected config error, got {:?}", other),
        }
    }

    #[test]
    fn test_overrides() {
        let mut config = Config::default();
        let overrides = RunOverrides {
            model: Some("mistral".into()),
            max_attempts: Some(1),
            delay_ms: Some(0),
            output: Some(PathBuf::from("out")),
            ..RunOverrides::default()
        };
        config.apply(&overrides);

        assert_eq!(config.llm.model, "mistral");
        assert_eq!(config.crawl.max_attempts, 1);
        assert_eq!(config.crawl.request_delay_ms, 0);
        assert_eq!(config.storage.output_dir, PathBuf::from("out"));
        assert_eq!(config.llm.endpoint, OllamaConfig::default().endpoint);
    }
}
