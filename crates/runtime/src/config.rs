//! Configuration management for the sentiment service
//!
//! Provides centralized configuration handling with validation, environment
//! variable overlays, and secure defaults. The configuration is built once at
//! startup and shared read-only afterwards.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::sentiment::KeywordLexicon;

/// Configuration errors
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("IO error reading config file: {message}")]
    IoError { message: String },

    #[error("Configuration parsing error: {message}")]
    ParseError { message: String },
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Classification policy configuration
    pub classifier: ClassifierConfig,
    /// Remote AI provider configuration
    pub provider: ProviderConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind (use "0.0.0.0" to listen on all interfaces)
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Maximum size of incoming request body in bytes
    pub max_body_bytes: usize,
    /// Answer every origin with permissive CORS headers
    pub cors_enabled: bool,
    /// Directory served for paths not matched by the API
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            max_body_bytes: 1_048_576,
            cors_enabled: true,
            static_dir: Some(PathBuf::from("public")),
        }
    }
}

/// Confidence reported when no AI provider is configured
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeuristicConfidence {
    /// Fixed 0.8 sentinel
    #[default]
    Fixed,
    /// Share of winning cues, 0.5 on ties
    Ratio,
}

impl std::str::FromStr for HeuristicConfidence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fixed" => Ok(HeuristicConfidence::Fixed),
            "ratio" => Ok(HeuristicConfidence::Ratio),
            other => Err(format!("expected 'fixed' or 'ratio', got '{}'", other)),
        }
    }
}

/// Classification policy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Largest accepted batch
    pub max_batch_size: usize,
    /// Items of one batch classified at the same time
    pub batch_concurrency: usize,
    /// Confidence policy for the heuristic-only mode
    pub heuristic_confidence: HeuristicConfidence,
    /// Replacement cue lists; the built-in lexicon is used when absent
    pub lexicon: Option<KeywordLexicon>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            max_batch_size: 50,
            batch_concurrency: 4,
            heuristic_confidence: HeuristicConfidence::Fixed,
            lexicon: None,
        }
    }
}

/// Remote providers with a known wire shape
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Gemini,
    OpenRouter,
    OpenAi,
    Anthropic,
}

impl ProviderKind {
    /// Order used when detecting a provider from the environment
    pub const DETECTION_ORDER: [ProviderKind; 4] = [
        ProviderKind::Gemini,
        ProviderKind::OpenRouter,
        ProviderKind::OpenAi,
        ProviderKind::Anthropic,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "Gemini",
            ProviderKind::OpenRouter => "OpenRouter",
            ProviderKind::OpenAi => "OpenAI",
            ProviderKind::Anthropic => "Anthropic",
        }
    }

    pub fn key_var(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "GEMINI_API_KEY",
            ProviderKind::OpenRouter => "OPENROUTER_API_KEY",
            ProviderKind::OpenAi => "OPENAI_API_KEY",
            ProviderKind::Anthropic => "ANTHROPIC_API_KEY",
        }
    }

    pub fn model_var(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "GEMINI_MODEL",
            ProviderKind::OpenRouter => "OPENROUTER_MODEL",
            ProviderKind::OpenAi => "CHAT_MODEL",
            ProviderKind::Anthropic => "ANTHROPIC_MODEL",
        }
    }

    pub fn base_url_var(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "GEMINI_BASE_URL",
            ProviderKind::OpenRouter => "OPENROUTER_BASE_URL",
            ProviderKind::OpenAi => "OPENAI_BASE_URL",
            ProviderKind::Anthropic => "ANTHROPIC_BASE_URL",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini-2.5-flash",
            ProviderKind::OpenRouter => "google/gemini-2.5-flash",
            ProviderKind::OpenAi => "gpt-4o-mini",
            ProviderKind::Anthropic => "claude-3-5-haiku-latest",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "https://generativelanguage.googleapis.com/v1beta",
            ProviderKind::OpenRouter => "https://openrouter.ai/api/v1",
            ProviderKind::OpenAi => "https://api.openai.com/v1",
            ProviderKind::Anthropic => "https://api.anthropic.com/v1",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gemini" => Ok(ProviderKind::Gemini),
            "openrouter" => Ok(ProviderKind::OpenRouter),
            "openai" => Ok(ProviderKind::OpenAi),
            "anthropic" => Ok(ProviderKind::Anthropic),
            other => Err(format!("unknown provider '{}'", other)),
        }
    }
}

/// Remote AI provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Wire shape of the remote API
    pub kind: ProviderKind,
    /// API credential; absence disables delegation
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Model override (provider default otherwise)
    pub model: Option<String>,
    /// Base URL override (provider default otherwise)
    pub base_url: Option<String>,
    /// Upper bound for a single remote call
    pub timeout_seconds: u64,
    /// Token budget for the reply
    pub max_tokens: u32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::Gemini,
            api_key: None,
            model: None,
            base_url: None,
            timeout_seconds: 5,
            max_tokens: 16,
        }
    }
}

impl ProviderConfig {
    pub fn has_credential(&self) -> bool {
        self.api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }

    pub fn model(&self) -> String {
        self.model
            .clone()
            .unwrap_or_else(|| self.kind.default_model().to_string())
    }

    pub fn base_url(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| self.kind.default_base_url().to_string())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level
    pub level: String,
    /// Log format
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
        }
    }
}

/// Log format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

/// Read an environment variable, treating empty values as unset
fn env_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_env<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    env_var(key)
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                reason: e.to_string(),
            })
        })
        .transpose()
}

impl Config {
    /// Load configuration from environment variables and defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            message: format!("{}: {}", path.display(), e),
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                message: e.to_string(),
            })?;
        config.logging.level = config.logging.level.to_lowercase();
        Ok(config)
    }

    /// Overlay environment variables on top of the current values
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Some(port) = parse_env::<u16>("PORT")? {
            self.server.port = port;
        }

        if let Some(host) = env_var("HOST") {
            self.server.host = host;
        }

        if let Some(dir) = env_var("STATIC_DIR") {
            self.server.static_dir = Some(PathBuf::from(dir));
        }

        if let Some(max) = parse_env::<usize>("MAX_BATCH_SIZE")? {
            self.classifier.max_batch_size = max;
        }

        if let Some(concurrency) = parse_env::<usize>("BATCH_CONCURRENCY")? {
            self.classifier.batch_concurrency = concurrency;
        }

        if let Some(mode) = parse_env::<HeuristicConfidence>("HEURISTIC_CONFIDENCE")? {
            self.classifier.heuristic_confidence = mode;
        }

        if let Some(timeout) = parse_env::<u64>("AI_TIMEOUT_SECS")? {
            self.provider.timeout_seconds = timeout;
        }

        if let Some(level) = env_var("LOG_LEVEL") {
            self.logging.level = level.to_lowercase();
        }

        if let Some(format) = parse_env::<LogFormat>("LOG_FORMAT")? {
            self.logging.format = format;
        }

        self.apply_provider_env()
    }

    /// Pick up provider credentials.
    ///
    /// `AI_PROVIDER` pins the provider; otherwise the first provider in
    /// `ProviderKind::DETECTION_ORDER` whose key variable is set wins.
    fn apply_provider_env(&mut self) -> Result<(), ConfigError> {
        let pinned = parse_env::<ProviderKind>("AI_PROVIDER")?;

        let detected = match pinned {
            Some(kind) => env_var(kind.key_var()).map(|key| (kind, key)),
            None => ProviderKind::DETECTION_ORDER
                .into_iter()
                .find_map(|kind| env_var(kind.key_var()).map(|key| (kind, key))),
        };

        let Some((kind, api_key)) = detected else {
            if let Some(kind) = pinned {
                if kind != self.provider.kind {
                    self.provider.kind = kind;
                    self.provider.api_key = None;
                }
            }
            return Ok(());
        };

        if kind != self.provider.kind {
            self.provider.model = None;
            self.provider.base_url = None;
        }
        self.provider.kind = kind;
        self.provider.api_key = Some(api_key);

        if let Some(model) = env_var(kind.model_var()) {
            self.provider.model = Some(model);
        }
        if let Some(base_url) = env_var(kind.base_url_var()) {
            self.provider.base_url = Some(base_url);
        }

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                key: "server.port".to_string(),
                reason: "Port cannot be 0".to_string(),
            });
        }

        if self.server.max_body_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                key: "server.max_body_bytes".to_string(),
                reason: "Body limit must be > 0".to_string(),
            });
        }

        if self.classifier.max_batch_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "classifier.max_batch_size".to_string(),
                reason: "Batch size must be > 0".to_string(),
            });
        }

        if self.classifier.batch_concurrency == 0 {
            return Err(ConfigError::InvalidValue {
                key: "classifier.batch_concurrency".to_string(),
                reason: "Concurrency must be > 0".to_string(),
            });
        }

        if self.provider.timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                key: "provider.timeout_seconds".to_string(),
                reason: "Remote calls must be bounded by a timeout > 0".to_string(),
            });
        }

        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::InvalidValue {
                key: "logging.level".to_string(),
                reason: format!("Must be one of: {}", valid_levels.join(", ")),
            });
        }

        Ok(())
    }

    /// Render the effective configuration as TOML. Credentials are never
    /// serialized.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })
    }
}
