// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use secrecy::SecretString;
use serde::Deserialize;
use tracing::debug;

pub mod custom;
pub mod gemini;
pub mod ollama;
pub mod openai;

use crate::config::{Config, Generator};
use crate::domain::{Language, PromptContext};
use crate::error::{Error, Result};
use crate::services::context::ContextBuilder;
use crate::services::sanitizer::{CommitSanitizer, NormalizeOptions};

/// Candidates requested when several results are enabled
pub const MULTIPLE_CANDIDATES: u32 = 4;

#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Turn a unified diff into normalized, deduplicated commit messages.
    ///
    /// Never returns an empty list: no usable reply is `Error::NoCandidates`.
    async fn generate(&self, diff: &str) -> Result<Vec<String>>;

    fn name(&self) -> &str;
}

/// Immutable per-invocation snapshot of everything an adapter needs
#[derive(Debug, Clone)]
pub struct RequestSettings {
    pub model: String,
    pub endpoint: Option<String>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub candidates: u32,
    pub language: Language,
    pub include_file_extension: bool,
    pub timeout: Duration,
}

impl RequestSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            model: config.model().to_string(),
            endpoint: config.endpoint().map(str::to_string),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            candidates: if config.use_multiple_results {
                MULTIPLE_CANDIDATES
            } else {
                1
            },
            language: config.language,
            include_file_extension: config.include_file_extension,
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// Configured endpoint, or the adapter's default base URL
    pub fn base_url(&self, default: &str) -> String {
        self.endpoint
            .as_deref()
            .unwrap_or(default)
            .trim_end_matches('/')
            .to_string()
    }

    pub fn client(&self) -> Client {
        Client::builder()
            .timeout(self.timeout)
            .build()
            .unwrap_or_default()
    }
}

/// One variant per supported backend, chosen once per flow
pub enum Backend {
    ChatGpt(openai::OpenAiProvider),
    LmStudio(openai::OpenAiProvider),
    Gemini(gemini::GeminiProvider),
    Ollama(ollama::OllamaProvider),
    Custom(custom::CustomProvider),
}

impl Backend {
    pub fn from_config(config: &Config) -> Result<Self> {
        let settings = RequestSettings::from_config(config);
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(|k| SecretString::from(k.to_string()));

        if config.generator.requires_api_key() && api_key.is_none() {
            return Err(Error::MissingApiKey {
                generator: config.generator.to_string(),
            });
        }

        let backend = match config.generator {
            Generator::ChatGpt => Self::ChatGpt(openai::OpenAiProvider::chatgpt(settings, api_key)),
            Generator::LmStudio => {
                Self::LmStudio(openai::OpenAiProvider::lm_studio(settings, api_key))
            }
            Generator::Gemini => match api_key {
                Some(key) => Self::Gemini(gemini::GeminiProvider::new(settings, key)),
                None => {
                    return Err(Error::MissingApiKey {
                        generator: config.generator.to_string(),
                    });
                }
            },
            Generator::Ollama => Self::Ollama(ollama::OllamaProvider::new(settings)),
            Generator::Custom => Self::Custom(custom::CustomProvider::new(settings)?),
        };

        debug!(provider = backend.name(), "backend selected");
        Ok(backend)
    }

    fn settings(&self) -> &RequestSettings {
        match self {
            Self::ChatGpt(p) | Self::LmStudio(p) => p.settings(),
            Self::Gemini(p) => p.settings(),
            Self::Ollama(p) => p.settings(),
            Self::Custom(p) => p.settings(),
        }
    }

    /// Raw, unnormalized replies from the remote
    async fn complete(&self, context: &PromptContext) -> Result<Vec<String>> {
        match self {
            Self::ChatGpt(p) | Self::LmStudio(p) => p.complete(context).await,
            Self::Gemini(p) => p.complete(context).await,
            Self::Ollama(p) => p.complete(context).await,
            Self::Custom(p) => p.complete(context).await,
        }
    }
}

#[async_trait]
impl LlmProvider for Backend {
    async fn generate(&self, diff: &str) -> Result<Vec<String>> {
        let context = ContextBuilder::build(diff);
        let raws = self.complete(&context).await?;
        finish(self.name(), raws, &context, self.settings())
    }

    fn name(&self) -> &str {
        match self {
            Self::ChatGpt(_) => "chatgpt",
            Self::LmStudio(_) => "lmstudio",
            Self::Gemini(_) => "gemini",
            Self::Ollama(_) => "ollama",
            Self::Custom(_) => "custom",
        }
    }
}

/// Drop blank replies, normalize the rest, and require at least one
pub fn finish(
    provider: &str,
    raws: Vec<String>,
    context: &PromptContext,
    settings: &RequestSettings,
) -> Result<Vec<String>> {
    let replies: Vec<String> = raws.into_iter().filter(|r| !r.trim().is_empty()).collect();
    debug!(provider, replies = replies.len(), "backend replied");

    let opts = NormalizeOptions {
        include_file_extension: settings.include_file_extension,
        analysis: &context.analysis,
    };
    let candidates = CommitSanitizer::sanitize_all(&replies, &opts);

    if candidates.is_empty() {
        return Err(Error::NoCandidates {
            provider: provider.into(),
        });
    }

    debug!(provider, candidates = candidates.len(), "candidates normalized");
    Ok(candidates)
}

/// `{"error": {"message": ...}}` as returned by OpenAI-style and Google APIs
#[derive(Debug, Deserialize)]
pub(crate) struct ApiError {
    #[serde(default)]
    pub message: String,
}

pub(crate) fn request_error(provider: &str, e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Provider {
            provider: provider.into(),
            message: "request timed out".into(),
        }
    } else {
        Error::Provider {
            provider: provider.into(),
            message: e.to_string(),
        }
    }
}

/// Read the full body so error payloads survive a non-success status
pub(crate) async fn read_body(provider: &str, response: Response) -> Result<(StatusCode, String)> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| request_error(provider, e))?;
    debug!(provider, %status, body_len = body.len(), "response received");
    Ok((status, body))
}

/// Error reported by the backend itself, or the HTTP status when it gave none
pub(crate) fn backend_error(provider: &str, status: StatusCode, message: Option<&str>) -> Error {
    let message = match message.map(str::trim).filter(|m| !m.is_empty()) {
        Some(m) => m.to_string(),
        None => format!("HTTP {status}"),
    };
    Error::Provider {
        provider: provider.into(),
        message,
    }
}

/// Body that matched none of the expected response shapes
pub(crate) fn unexpected_body(provider: &str, status: StatusCode, body: &str) -> Error {
    let excerpt: String = body.chars().take(200).collect();
    Error::Provider {
        provider: provider.into(),
        message: format!("HTTP {status}: unexpected response {excerpt}"),
    }
}
