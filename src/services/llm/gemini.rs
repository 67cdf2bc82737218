// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::{ApiError, RequestSettings, backend_error, read_body, request_error, unexpected_body};
use crate::domain::PromptContext;
use crate::error::Result;

const NAME: &str = "gemini";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

pub struct GeminiProvider {
    client: Client,
    base_url: String,
    api_key: SecretString,
    settings: RequestSettings,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
    candidate_count: u32,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum GenerateResponse {
    Error { error: ApiError },
    Candidates { candidates: Vec<Candidate> },
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl Candidate {
    fn text(self) -> String {
        self.content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default()
    }
}

impl GeminiProvider {
    pub fn new(settings: RequestSettings, api_key: SecretString) -> Self {
        Self {
            client: settings.client(),
            base_url: settings.base_url(DEFAULT_BASE_URL),
            api_key,
            settings,
        }
    }

    pub fn settings(&self) -> &RequestSettings {
        &self.settings
    }

    pub async fn complete(&self, context: &PromptContext) -> Result<Vec<String>> {
        let url = format!("{}/{}:generateContent", self.base_url, self.settings.model);
        let prompt = context.to_prompt(self.settings.language);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&GenerateRequest {
                contents: vec![Content {
                    role: "user",
                    parts: vec![Part { text: &prompt }],
                }],
                generation_config: GenerationConfig {
                    temperature: self.settings.temperature,
                    max_output_tokens: self.settings.max_tokens,
                    candidate_count: self.settings.candidates,
                },
            })
            .send()
            .await
            .map_err(|e| request_error(NAME, e))?;
        let (status, body) = read_body(NAME, response).await?;

        match serde_json::from_str::<GenerateResponse>(&body) {
            Ok(GenerateResponse::Error { error }) => {
                Err(backend_error(NAME, status, Some(&error.message)))
            }
            Ok(GenerateResponse::Candidates { candidates }) if status.is_success() => {
                Ok(candidates.into_iter().map(Candidate::text).collect())
            }
            _ if !status.is_success() => Err(backend_error(NAME, status, None)),
            _ => Err(unexpected_body(NAME, status, &body)),
        }
    }
}
