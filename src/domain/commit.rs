// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

/// Commit types the analyzer can suggest on its own.
///
/// The model may answer with any conventional type; those pass through the
/// normalizer as lowercased strings and never round-trip through this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitType {
    Feat,
    Docs,
    Test,
    Chore,
    Ci,
}

impl CommitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Feat => "feat",
            Self::Docs => "docs",
            Self::Test => "test",
            Self::Chore => "chore",
            Self::Ci => "ci",
        }
    }
}

impl std::fmt::Display for CommitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
