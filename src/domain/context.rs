// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

use super::{DiffAnalysis, Language};

/// Prompt payload plus the analysis it was rendered from.
///
/// The analysis travels with the prompt so the normalizer's fallback path
/// reuses it instead of re-parsing the diff.
#[derive(Debug, Clone)]
pub struct PromptContext {
    pub user_prompt: String,
    pub analysis: DiffAnalysis,
}

impl PromptContext {
    /// Single-message prompt for backends without a system role
    pub fn to_prompt(&self, language: Language) -> String {
        format!("{}\n\n{}", language.instruction(), self.user_prompt)
    }
}
