// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{RequestSettings, backend_error, read_body, request_error, unexpected_body};
use crate::domain::PromptContext;
use crate::error::Result;

const NAME: &str = "ollama";
pub const DEFAULT_GENERATE_URL: &str = "http://localhost:11434/api/generate";

pub struct OllamaProvider {
    client: Client,
    url: String,
    settings: RequestSettings,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    system: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    temperature: f32,
    num_predict: u32,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum GenerateResponse {
    Error { error: String },
    Reply { response: String },
}

/// Accept a bare host, a `/api` base, or the full generate URL
pub fn build_ollama_generate_url(endpoint: &str) -> String {
    let base = endpoint.trim().trim_end_matches('/');
    if base.is_empty() {
        return DEFAULT_GENERATE_URL.to_string();
    }

    let lower = base.to_lowercase();
    if lower.ends_with("/api/generate") {
        base.to_string()
    } else if lower.ends_with("/api") {
        format!("{base}/generate")
    } else {
        format!("{base}/api/generate")
    }
}

impl OllamaProvider {
    pub fn new(settings: RequestSettings) -> Self {
        Self {
            client: settings.client(),
            url: build_ollama_generate_url(settings.endpoint.as_deref().unwrap_or_default()),
            settings,
        }
    }

    pub fn settings(&self) -> &RequestSettings {
        &self.settings
    }

    /// Ollama returns one reply per request, regardless of the candidate count
    pub async fn complete(&self, context: &PromptContext) -> Result<Vec<String>> {
        let response = self
            .client
            .post(&self.url)
            .json(&GenerateRequest {
                model: &self.settings.model,
                system: self.settings.language.instruction(),
                prompt: &context.user_prompt,
                stream: false,
                options: GenerateOptions {
                    temperature: self.settings.temperature,
                    num_predict: self.settings.max_tokens,
                },
            })
            .send()
            .await
            .map_err(|e| request_error(NAME, e))?;
        let (status, body) = read_body(NAME, response).await?;

        match serde_json::from_str::<GenerateResponse>(&body) {
            Ok(GenerateResponse::Error { error }) => Err(backend_error(NAME, status, Some(&error))),
            Ok(GenerateResponse::Reply { response }) if status.is_success() => Ok(vec![response]),
            _ if !status.is_success() => Err(backend_error(NAME, status, None)),
            _ => Err(unexpected_body(NAME, status, &body)),
        }
    }
}
