// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

use directories::ProjectDirs;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::{ApproveArg, Cli};
use crate::domain::Language;
use crate::error::{Error, Result};

pub const PROJECT_CONFIG_FILE: &str = ".procommit.toml";

/// Keys accepted by `procommit set`
pub const SETTINGS: &[&str] = &[
    "generator",
    "language",
    "include_file_extension",
    "use_multiple_results",
    "message_approve_method",
    "api_key",
    "endpoint",
    "model",
    "temperature",
    "max_tokens",
    "timeout_secs",
];

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Generator {
    #[default]
    ChatGpt,
    Gemini,
    Ollama,
    LmStudio,
    Custom,
}

impl Generator {
    pub const NAMES: &'static [&'static str] = &["chatgpt", "gemini", "ollama", "lmstudio", "custom"];

    /// Total mapping: anything unrecognized, legacy names included, is ChatGPT
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "gemini" => Self::Gemini,
            "ollama" => Self::Ollama,
            "lmstudio" | "lm-studio" | "lm studio" => Self::LmStudio,
            "custom" => Self::Custom,
            _ => Self::ChatGpt,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ChatGpt => "chatgpt",
            Self::Gemini => "gemini",
            Self::Ollama => "ollama",
            Self::LmStudio => "lmstudio",
            Self::Custom => "custom",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Self::ChatGpt | Self::Custom => "gpt-4o-mini",
            Self::Gemini => "gemini-2.5-flash",
            Self::Ollama => "llama3.2",
            Self::LmStudio => "local-model",
        }
    }

    /// Provider-specific environment variable holding the API key
    pub fn key_env_var(&self) -> Option<&'static str> {
        match self {
            Self::ChatGpt => Some("OPENAI_API_KEY"),
            Self::Gemini => Some("GEMINI_API_KEY"),
            Self::Ollama | Self::LmStudio | Self::Custom => None,
        }
    }

    pub fn requires_api_key(&self) -> bool {
        matches!(self, Self::ChatGpt | Self::Gemini)
    }
}

impl<'de> Deserialize<'de> for Generator {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from_name(&name))
    }
}

impl std::fmt::Display for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ApproveMethod {
    #[default]
    QuickPick,
    MessageFile,
}

impl std::fmt::Display for ApproveMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::QuickPick => write!(f, "quick-pick"),
            Self::MessageFile => write!(f, "message-file"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub generator: Generator,

    #[serde(default)]
    pub language: Language,

    /// Keep `.ext` on file-name scopes (default: true)
    #[serde(default = "default_true")]
    pub include_file_extension: bool,

    /// Ask the backend for several candidates (default: false)
    #[serde(default)]
    pub use_multiple_results: bool,

    #[serde(default)]
    pub message_approve_method: ApproveMethod,

    #[serde(default)]
    pub api_key: Option<String>,

    /// Backend base URL; each generator has its own default
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Model name; each generator has its own default
    #[serde(default)]
    pub model: Option<String>,

    /// LLM temperature (0.0-2.0, default 0.2)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens to generate (default 196)
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Request timeout in seconds (default 300)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_true() -> bool {
    true
}
fn default_temperature() -> f32 {
    0.2
}
fn default_max_tokens() -> u32 {
    196
}
fn default_timeout_secs() -> u64 {
    300
}

impl Default for Config {
    fn default() -> Self {
        Self {
            generator: Generator::default(),
            language: Language::default(),
            include_file_extension: true,
            use_multiple_results: false,
            message_approve_method: ApproveMethod::default(),
            api_key: None,
            endpoint: None,
            model: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Load with priority: CLI > ENV > user config > project config > defaults
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        if let Ok(cwd) = std::env::current_dir() {
            let project_config = cwd.join(PROJECT_CONFIG_FILE);
            if project_config.exists() {
                figment = figment.merge(Toml::file(&project_config));
            }
        }

        if let Some(path) = Self::config_path() {
            if path.exists() {
                figment = figment.merge(Toml::file(&path));
            }
        }

        // PROCOMMIT_MODEL, PROCOMMIT_GENERATOR, ...
        figment = figment.merge(Env::prefixed("PROCOMMIT_").split("__"));

        let mut config: Config = figment
            .extract()
            .map_err(|e| Error::Config(e.to_string()))?;

        // CLI may switch the generator, so apply it before resolving keys
        config.apply_cli(cli);

        if config.api_key.is_none() {
            config.api_key = config
                .generator
                .key_env_var()
                .and_then(|var| std::env::var(var).ok())
                .filter(|key| !key.trim().is_empty());
        }

        #[cfg(feature = "secure-storage")]
        if config.api_key.is_none() && config.generator != Generator::Ollama {
            if let Ok(entry) = keyring::Entry::new("procommit", config.generator.as_str()) {
                if let Ok(key) = entry.get_password() {
                    config.api_key = Some(key);
                }
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "procommit").map(|dirs| dirs.config_dir().to_path_buf())
    }

    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("config.toml"))
    }

    /// Configured model, or the generator's default
    pub fn model(&self) -> &str {
        self.model
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| self.generator.default_model())
    }

    /// Configured endpoint with surrounding whitespace removed, if non-blank
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
    }

    /// API key reduced to its last four characters for display
    pub fn masked_api_key(&self) -> String {
        match self.api_key.as_deref() {
            None => "(not set)".into(),
            Some(key) if key.chars().count() <= 8 => "****".into(),
            Some(key) => {
                let tail: String = key
                    .chars()
                    .rev()
                    .take(4)
                    .collect::<Vec<_>>()
                    .into_iter()
                    .rev()
                    .collect();
                format!("****{tail}")
            }
        }
    }

    fn apply_cli(&mut self, cli: &Cli) {
        if let Some(ref g) = cli.generator {
            self.generator = Generator::from_name(g);
        }
        if let Some(ref m) = cli.model {
            self.model = Some(m.clone());
        }
        if let Some(language) = cli.language {
            self.language = language;
        }
        if cli.multiple {
            self.use_multiple_results = true;
        }
        if cli.no_extension {
            self.include_file_extension = false;
        }
        if let Some(approve) = cli.approve {
            self.message_approve_method = match approve {
                ApproveArg::QuickPick => ApproveMethod::QuickPick,
                ApproveArg::MessageFile => ApproveMethod::MessageFile,
            };
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(Error::Config(format!(
                "temperature must be 0.0–2.0, got {}",
                self.temperature
            )));
        }

        if !(1..=32_768).contains(&self.max_tokens) {
            return Err(Error::Config(format!(
                "max_tokens must be 1–32768, got {}",
                self.max_tokens
            )));
        }

        if !(1..=3600).contains(&self.timeout_secs) {
            return Err(Error::Config(format!(
                "timeout_secs must be 1–3600, got {}",
                self.timeout_secs
            )));
        }

        if let Some(endpoint) = self.endpoint() {
            let parsed = url::Url::parse(endpoint).map_err(|e| {
                Error::Config(format!("endpoint '{endpoint}' is not a valid URL: {e}"))
            })?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(Error::Config(format!(
                    "endpoint must start with http:// or https://, got '{endpoint}'"
                )));
            }
        }

        Ok(())
    }

    /// Set one key in the user config file, creating it if needed
    pub fn set_user_value(key: &str, value: &str) -> Result<PathBuf> {
        let Some(path) = Self::config_path() else {
            return Err(Error::Config("Cannot determine config directory".into()));
        };
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        Self::set_value(&path, key, value)?;
        Ok(path)
    }

    /// Set (or, with a blank value, remove) one key in a TOML config file.
    ///
    /// The edited file must still produce a valid configuration, otherwise
    /// nothing is written.
    pub fn set_value(path: &Path, key: &str, value: &str) -> Result<()> {
        let mut table: toml::Table = if path.exists() {
            toml::from_str(&fs::read_to_string(path)?)
                .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?
        } else {
            toml::Table::new()
        };

        match Self::parse_setting(key, value)? {
            Some(parsed) => {
                table.insert(key.to_string(), parsed);
            }
            None => {
                table.remove(key);
            }
        }

        let rendered =
            toml::to_string(&table).map_err(|e| Error::Config(format!("cannot render: {e}")))?;
        let config: Config =
            toml::from_str(&rendered).map_err(|e| Error::Config(format!("{key}: {e}")))?;
        config.validate()?;

        fs::write(path, rendered)?;
        restrict_permissions(path)?;
        Ok(())
    }

    fn parse_setting(key: &str, value: &str) -> Result<Option<toml::Value>> {
        let value = value.trim();
        let invalid = |expected: &str| {
            Error::Config(format!("{key} expects {expected}, got '{value}'"))
        };

        let parsed = match key {
            "generator" => {
                let name = value.to_lowercase();
                if !Generator::NAMES.contains(&name.as_str()) {
                    return Err(invalid(&Generator::NAMES.join(", ")));
                }
                toml::Value::String(name)
            }
            "language" => {
                let language: Language = value.parse().map_err(|e: String| Error::Config(e))?;
                toml::Value::String(language.to_string())
            }
            "include_file_extension" | "use_multiple_results" => {
                toml::Value::Boolean(value.parse().map_err(|_| invalid("true or false"))?)
            }
            "message_approve_method" => match value {
                "quick-pick" | "message-file" => toml::Value::String(value.to_string()),
                _ => return Err(invalid("quick-pick or message-file")),
            },
            "api_key" | "endpoint" | "model" => {
                if value.is_empty() {
                    return Ok(None);
                }
                toml::Value::String(value.to_string())
            }
            "temperature" => toml::Value::Float(value.parse().map_err(|_| invalid("a number"))?),
            "max_tokens" | "timeout_secs" => {
                toml::Value::Integer(value.parse().map_err(|_| invalid("an integer"))?)
            }
            _ => {
                return Err(Error::Config(format!(
                    "Unknown setting '{key}'. Known settings: {}",
                    SETTINGS.join(", ")
                )));
            }
        };

        Ok(Some(parsed))
    }

    /// Create default config file with secure permissions
    pub fn create_default() -> Result<PathBuf> {
        let Some(dir) = Self::config_dir() else {
            return Err(Error::Config("Cannot determine config directory".into()));
        };

        fs::create_dir_all(&dir)?;

        let path = dir.join("config.toml");
        let content = r#"# ProCommit Configuration

# Backend: chatgpt, gemini, ollama, lmstudio, custom
generator = "chatgpt"

# Language of the generated message: english, russian, japanese, korean, german
language = "english"

# Keep the file extension in scopes, e.g. feat(client.ts) vs feat(client)
include_file_extension = true

# Ask the backend for several candidates and pick one
use_multiple_results = false

# How to approve a message: quick-pick or message-file
message_approve_method = "quick-pick"

# Model name (defaults depend on the generator)
# model = "gpt-4o-mini"

# Base URL of the backend. Required for the custom generator.
# endpoint = "http://localhost:11434"

# Prefer OPENAI_API_KEY / GEMINI_API_KEY or `procommit set-key <generator>`
# api_key = ""

# temperature = 0.2
# max_tokens = 196
# timeout_secs = 300
"#;

        fs::write(&path, content)?;
        restrict_permissions(&path)?;

        Ok(path)
    }
}

/// Config files may hold API keys: owner read/write only
fn restrict_permissions(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(path)?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(path, perms)?;
    }
    #[cfg(not(unix))]
    let _ = path;
    Ok(())
}
