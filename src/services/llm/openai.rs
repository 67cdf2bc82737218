// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::{ApiError, RequestSettings, backend_error, read_body, request_error, unexpected_body};
use crate::domain::PromptContext;
use crate::error::Result;

const CHATGPT_BASE_URL: &str = "https://api.openai.com/v1";
const LM_STUDIO_BASE_URL: &str = "http://localhost:1234/v1";

/// OpenAI chat completions, also spoken by LM Studio
pub struct OpenAiProvider {
    client: Client,
    name: &'static str,
    base_url: String,
    api_key: Option<SecretString>,
    settings: RequestSettings,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f32,
    max_tokens: u32,
    n: u32,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ChatResponse {
    Error { error: ApiError },
    Choices { choices: Vec<Choice> },
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiProvider {
    pub fn chatgpt(settings: RequestSettings, api_key: Option<SecretString>) -> Self {
        Self::new("chatgpt", CHATGPT_BASE_URL, settings, api_key)
    }

    pub fn lm_studio(settings: RequestSettings, api_key: Option<SecretString>) -> Self {
        Self::new("lmstudio", LM_STUDIO_BASE_URL, settings, api_key)
    }

    fn new(
        name: &'static str,
        default_base_url: &str,
        settings: RequestSettings,
        api_key: Option<SecretString>,
    ) -> Self {
        Self {
            client: settings.client(),
            name,
            base_url: settings.base_url(default_base_url),
            api_key,
            settings,
        }
    }

    pub fn settings(&self) -> &RequestSettings {
        &self.settings
    }

    pub async fn complete(&self, context: &PromptContext) -> Result<Vec<String>> {
        let url = format!("{}/chat/completions", self.base_url);
        let language = self.settings.language;

        let mut request = self.client.post(&url).json(&ChatRequest {
            model: &self.settings.model,
            messages: vec![
                Message {
                    role: "system",
                    content: language.instruction(),
                },
                Message {
                    role: "user",
                    content: &context.user_prompt,
                },
                Message {
                    role: "assistant",
                    content: language.primer(),
                },
            ],
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
            n: self.settings.candidates,
        });

        if let Some(ref key) = self.api_key {
            request = request.bearer_auth(key.expose_secret());
        }

        let response = request
            .send()
            .await
            .map_err(|e| request_error(self.name, e))?;
        let (status, body) = read_body(self.name, response).await?;

        match serde_json::from_str::<ChatResponse>(&body) {
            Ok(ChatResponse::Error { error }) => {
                Err(backend_error(self.name, status, Some(&error.message)))
            }
            Ok(ChatResponse::Choices { choices }) if status.is_success() => Ok(choices
                .into_iter()
                .filter_map(|c| c.message.content)
                .collect()),
            _ if !status.is_success() => Err(backend_error(self.name, status, None)),
            _ => Err(unexpected_body(self.name, status, &body)),
        }
    }
}
