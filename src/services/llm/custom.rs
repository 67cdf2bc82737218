// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{RequestSettings, read_body, request_error, unexpected_body};
use crate::domain::PromptContext;
use crate::error::{Error, Result};

const NAME: &str = "custom";

/// User-hosted endpoint taking `{"diff": prompt}`
pub struct CustomProvider {
    client: Client,
    url: String,
    settings: RequestSettings,
}

#[derive(Serialize)]
struct CustomRequest<'a> {
    diff: &'a str,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CustomResponse {
    Text(String),
    Fields(ReplyFields),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReplyFields {
    #[serde(default)]
    commit_message: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    output: Option<String>,
}

impl ReplyFields {
    fn into_reply(self) -> Option<String> {
        [self.commit_message, self.message, self.output]
            .into_iter()
            .flatten()
            .find(|text| !text.trim().is_empty())
    }
}

impl CustomProvider {
    pub fn new(settings: RequestSettings) -> Result<Self> {
        let Some(url) = settings.endpoint.clone() else {
            return Err(Error::Config("Custom endpoint is required.".into()));
        };
        Ok(Self {
            client: settings.client(),
            url,
            settings,
        })
    }

    pub fn settings(&self) -> &RequestSettings {
        &self.settings
    }

    pub async fn complete(&self, context: &PromptContext) -> Result<Vec<String>> {
        let prompt = context.to_prompt(self.settings.language);

        let response = self
            .client
            .post(&self.url)
            .json(&CustomRequest { diff: &prompt })
            .send()
            .await
            .map_err(|e| request_error(NAME, e))?;
        let (status, body) = read_body(NAME, response).await?;

        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or(status.as_str());
            return Err(Error::Provider {
                provider: NAME.into(),
                message: format!("Custom generator API error: {reason}"),
            });
        }

        match serde_json::from_str::<CustomResponse>(&body) {
            Ok(CustomResponse::Text(text)) => Ok(vec![text]),
            Ok(CustomResponse::Fields(fields)) => Ok(fields.into_reply().into_iter().collect()),
            Err(_) => Err(unexpected_body(NAME, status, &body)),
        }
    }
}
