// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::domain::{DiffAnalysis, basename};
use crate::services::context::{RAW_DIFF_HEADER, SUMMARY_HEADER};

/// `type(scope): subject`, ASCII word type, non-empty parenthesized scope
static COMMIT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z0-9_]+)\(([^)]+)\):\s*(.+)$").unwrap());

static CODE_FENCE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```[\s\S]*?```").unwrap());

static FENCE_OPEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^```[^\n]*\n?").unwrap());

static LETTER_DIGIT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z]\d").unwrap());

/// Lines that echo the prompt back instead of answering it
const ECHO_PREFIXES: &[&str] = &["diff --git", RAW_DIFF_HEADER, SUMMARY_HEADER];

const GENERIC_VERBS: &[&str] = &[
    "update", "improve", "change", "fix", "refactor", "cleanup", "adjust", "modify", "tweak",
    "rework",
];

const FALLBACK_SCOPE: &str = "changes";
const FALLBACK_TYPE: &str = "chore";

/// Inputs the normalizer needs besides the raw reply
#[derive(Debug, Clone, Copy)]
pub struct NormalizeOptions<'a> {
    pub include_file_extension: bool,
    pub analysis: &'a DiffAnalysis,
}

pub struct CommitSanitizer;

impl CommitSanitizer {
    /// Turn a raw model reply into a single `type(scope): subject` line.
    ///
    /// Never fails. Unusable or generic replies are replaced by a message
    /// synthesized from the diff analysis.
    pub fn sanitize(raw: &str, opts: &NormalizeOptions<'_>) -> String {
        let cleaned = Self::strip_code_fences(raw);
        let line = Self::first_meaningful_line(cleaned.trim());

        let Some(normalized) = Self::normalize_line(line, opts.include_file_extension) else {
            return Self::fallback(opts.analysis, opts.include_file_extension);
        };

        let Some(caps) = COMMIT_REGEX.captures(&normalized) else {
            // Best effort: no grammar to enforce
            return normalized;
        };

        let commit_type = caps[1].to_lowercase();
        let scope = Self::normalize_scope(&caps[2], opts.include_file_extension);
        let subject = Self::strip_subject_backticks(caps[3].trim());

        if subject.is_empty()
            || (Self::is_generic_subject(subject) && !opts.analysis.primary_identifiers.is_empty())
        {
            return Self::fallback(opts.analysis, opts.include_file_extension);
        }

        format!("{commit_type}({scope}): {subject}")
    }

    /// Normalize every candidate, then drop repeats keeping first-seen order
    pub fn sanitize_all<I, S>(raws: I, opts: &NormalizeOptions<'_>) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::dedup(
            raws.into_iter()
                .map(|raw| Self::sanitize(raw.as_ref(), opts)),
        )
    }

    /// Deduplicate by trimmed text, first occurrence wins
    pub fn dedup<I>(messages: I) -> Vec<String>
    where
        I: IntoIterator<Item = String>,
    {
        let mut seen = HashSet::new();
        messages
            .into_iter()
            .filter(|m| seen.insert(m.trim().to_string()))
            .collect()
    }

    /// Reduce a scope to one path segment, optionally without its extension
    pub fn normalize_scope(scope: &str, include_file_extension: bool) -> String {
        // Repeat until nothing more is peeled off
        let mut s = scope;
        loop {
            let trimmed = s.trim().trim_matches(['`', '/', '\\']);
            let segment = trimmed.rsplit(['/', '\\']).next().unwrap_or(trimmed);
            if segment == s {
                break;
            }
            s = segment;
        }

        if !include_file_extension {
            if let Some(dot) = s.rfind('.').filter(|&dot| dot > 0) {
                s = s[..dot].trim_end_matches(|c: char| c.is_whitespace() || c == '`');
            }
        }

        if s.is_empty() {
            FALLBACK_SCOPE.to_string()
        } else {
            s.to_string()
        }
    }

    /// Whether a subject is too vague to ship without naming an artifact
    pub fn is_generic_subject(subject: &str) -> bool {
        let original = subject.trim();
        let lower = original.to_lowercase();

        if lower.chars().count() < 8 {
            return true;
        }

        let starts_generic = GENERIC_VERBS
            .iter()
            .any(|verb| lower == *verb || lower.starts_with(&format!("{verb} ")));
        if !starts_generic {
            return false;
        }

        let tokens: Vec<&str> = original.split_whitespace().collect();
        if tokens.len() <= 2 {
            return true;
        }

        !tokens.iter().any(|t| Self::is_specific_token(t))
    }

    fn is_specific_token(token: &str) -> bool {
        token.contains(['.', '/', '_'])
            || LETTER_DIGIT_REGEX.is_match(token)
            || token.chars().any(char::is_uppercase)
            || token.chars().count() >= 10
    }

    /// Message synthesized from the analysis alone
    pub fn fallback(analysis: &DiffAnalysis, include_file_extension: bool) -> String {
        let scope = Self::normalize_scope(
            analysis.scope_hint.as_deref().unwrap_or(FALLBACK_SCOPE),
            include_file_extension,
        );
        let commit_type = analysis
            .type_hint
            .map(|t| t.as_str())
            .unwrap_or(FALLBACK_TYPE);

        let identifier = analysis.primary_identifiers.first().map(String::as_str);
        let file_token = analysis.files.first().map(|f| basename(&f.path));

        let mut parts: Vec<&str> = identifier.into_iter().collect();
        if let Some(file) = file_token {
            if identifier.is_none_or(|id| !id.eq_ignore_ascii_case(file)) {
                parts.push(file);
            }
        }

        let subject = if parts.is_empty() {
            "update changes".to_string()
        } else {
            format!("update {}", parts.join(" "))
        };

        format!("{commit_type}({scope}): {subject}")
    }

    /// Remove fence markers, keep what was inside them
    fn strip_code_fences(text: &str) -> String {
        CODE_FENCE_REGEX
            .replace_all(text, |caps: &Captures<'_>| {
                let block = &caps[0];
                let inner = FENCE_OPEN_REGEX.replace(block, "");
                inner.strip_suffix("```").unwrap_or(&inner).to_string()
            })
            .into_owned()
    }

    fn first_meaningful_line(text: &str) -> &str {
        text.lines()
            .map(str::trim)
            .find(|line| {
                !line.is_empty() && !ECHO_PREFIXES.iter().any(|prefix| line.starts_with(prefix))
            })
            .unwrap_or("")
    }

    /// Strip list markers and wrapping quotes, repair the grammar if present.
    ///
    /// `None` means nothing usable is left.
    fn normalize_line(line: &str, include_file_extension: bool) -> Option<String> {
        let mut s = line.trim();
        if let Some(rest) = s.strip_prefix('*') {
            s = rest.trim_start();
        }
        if let Some(rest) = s.strip_prefix(['-', '–', '—']) {
            s = rest.trim_start();
        }
        s = s.trim_matches('"').trim_matches('\'');
        if s.starts_with('`') && s.ends_with('`') {
            s = s.trim_matches('`');
        }
        let s = s.trim();

        if s.is_empty() {
            return None;
        }

        let Some(caps) = COMMIT_REGEX.captures(s) else {
            return Some(s.to_string());
        };

        let subject = caps[3].trim();
        if subject.is_empty() {
            return None;
        }

        Some(format!(
            "{}({}): {}",
            caps[1].to_lowercase(),
            Self::normalize_scope(&caps[2], include_file_extension),
            subject
        ))
    }

    /// Drop leading backticks; trailing ones only when the subject was wrapped
    fn strip_subject_backticks(subject: &str) -> &str {
        if subject.starts_with('`') && subject.ends_with('`') {
            subject.trim_matches('`').trim()
        } else {
            subject.trim_start_matches('`').trim_start()
        }
    }
}
