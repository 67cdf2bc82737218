// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

use tracing::debug;

use crate::error::{Error, Result};
use crate::services::approval::ApprovalSurface;
use crate::services::git::DiffSource;
use crate::services::llm::LlmProvider;
use crate::services::writer::CommitWriter;

/// Diff source → generator → approval → writer, stopping at the first failure
pub struct CompletionFlow<'a> {
    pub source: &'a dyn DiffSource,
    pub provider: &'a dyn LlmProvider,
    pub approval: &'a dyn ApprovalSurface,
    pub writer: &'a dyn CommitWriter,
}

impl CompletionFlow<'_> {
    /// Returns the message that was written
    pub async fn run(&self) -> Result<String> {
        let diff = self.source.diff().await?;
        debug!(bytes = diff.len(), "diff acquired");

        let candidates = self.provider.generate(&diff).await?;
        if candidates.is_empty() {
            return Err(Error::NoCandidates {
                provider: self.provider.name().into(),
            });
        }
        debug!(
            provider = self.provider.name(),
            candidates = candidates.len(),
            "candidates ready"
        );

        let approval = self.approval.review(&candidates)?;
        if !approval.accepted {
            return Err(Error::Rejected);
        }

        let message = approval
            .resolve(&candidates)
            .ok_or_else(|| Error::NoCandidates {
                provider: self.provider.name().into(),
            })?;

        self.writer.write(&message)?;
        Ok(message)
    }
}
