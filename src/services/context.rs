// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

use crate::domain::{ChangeKind, DiffAnalysis, PromptContext};
use crate::services::analyzer::DiffAnalyzer;

/// Character budget for the raw diff excerpt appended after the summary
pub const MAX_RAW_DIFF_CHARS: usize = 18_000;

pub const SUMMARY_HEADER: &str = "DIFF_SUMMARY";
pub const RAW_DIFF_HEADER: &str = "RAW_DIFF";

pub struct ContextBuilder;

impl ContextBuilder {
    /// Analyze the diff once and render the bounded user prompt from it
    pub fn build(diff: &str) -> PromptContext {
        let analysis = DiffAnalyzer::analyze(diff);
        let summary = Self::summarize(&analysis);
        let excerpt = Self::truncate_diff(diff, MAX_RAW_DIFF_CHARS);

        PromptContext {
            user_prompt: format!("{summary}\n\n{RAW_DIFF_HEADER}\n{}\n", excerpt.trim()),
            analysis,
        }
    }

    fn summarize(analysis: &DiffAnalysis) -> String {
        let mut lines = vec![SUMMARY_HEADER.to_string()];

        if let Some(type_hint) = analysis.type_hint {
            lines.push(format!("- type_hint: {type_hint}"));
        }
        if let Some(ref scope) = analysis.scope_hint {
            lines.push(format!("- scope_hint: {scope}"));
        }

        if !analysis.files.is_empty() {
            lines.push("- files:".to_string());
            for file in &analysis.files {
                let token = file.change.token();
                let entry = match file.change {
                    ChangeKind::Renamed => format!(
                        "({token}) {} -> {}",
                        file.old_path.as_deref().unwrap_or("?"),
                        file.path
                    ),
                    _ => format!(
                        "({token}) {} (+{} -{})",
                        file.path, file.additions, file.deletions
                    ),
                };
                lines.push(format!("  - {entry}"));
            }
        }

        if !analysis.primary_identifiers.is_empty() {
            lines.push(format!(
                "- identifiers: {}",
                analysis.primary_identifiers.join(", ")
            ));
        }

        let keys = analysis.config_keys();
        if !keys.is_empty() {
            lines.push(format!("- config_keys: {}", keys.join(", ")));
        }

        let deps = analysis.dependencies();
        if !deps.is_empty() {
            lines.push(format!("- dependencies: {}", deps.join(", ")));
        }

        lines.join("\n")
    }

    /// Strict character prefix; may split a line
    pub fn truncate_diff(diff: &str, max_chars: usize) -> &str {
        match diff.char_indices().nth(max_chars) {
            Some((byte_idx, _)) => &diff[..byte_idx],
            None => diff,
        }
    }
}
