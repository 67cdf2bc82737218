// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

use std::collections::HashSet;

use super::{CommitType, FileSummary};

pub const MAX_PRIMARY_FILES: usize = 12;
pub const MAX_IDENTIFIERS: usize = 14;
pub const MAX_CONFIG_KEYS: usize = 14;
pub const MAX_DEPENDENCIES: usize = 12;

/// Aggregate view of a diff, computed once and never mutated
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffAnalysis {
    /// Heaviest files first, at most [`MAX_PRIMARY_FILES`]
    pub files: Vec<FileSummary>,
    pub primary_identifiers: Vec<String>,
    pub scope_hint: Option<String>,
    pub type_hint: Option<CommitType>,
}

impl DiffAnalysis {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Config keys pooled across primary files
    pub fn config_keys(&self) -> Vec<String> {
        unique_keep_order(
            self.files.iter().flat_map(|f| f.config_keys.iter()),
            MAX_CONFIG_KEYS,
        )
    }

    /// Dependency names pooled across primary files
    pub fn dependencies(&self) -> Vec<String> {
        unique_keep_order(
            self.files.iter().flat_map(|f| f.dependencies.iter()),
            MAX_DEPENDENCIES,
        )
    }
}

/// Trim, drop blanks and duplicates (first occurrence wins), then cap.
pub fn unique_keep_order<I, S>(items: I, cap: usize) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();

    for item in items {
        if out.len() == cap {
            break;
        }
        let key = item.as_ref().trim();
        if key.is_empty() || !seen.insert(key.to_string()) {
            continue;
        }
        out.push(key.to_string());
    }

    out
}
