// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Deleted,
    #[default]
    Modified,
    Renamed,
}

impl ChangeKind {
    /// Single-letter token used in the prompt file list
    pub fn token(&self) -> char {
        match self {
            Self::Added => 'A',
            Self::Deleted => 'D',
            Self::Modified => 'M',
            Self::Renamed => 'R',
        }
    }
}

/// One changed path in a unified diff
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSummary {
    pub path: String,
    /// Prior path, only set for renames (or a/ b/ header mismatch)
    pub old_path: Option<String>,
    pub change: ChangeKind,
    pub additions: usize,
    pub deletions: usize,
    pub identifiers: Vec<String>,
    pub config_keys: Vec<String>,
    pub dependencies: Vec<String>,
}

impl FileSummary {
    pub fn new(path: impl Into<String>, old_path: Option<String>) -> Self {
        Self {
            path: path.into(),
            old_path,
            change: ChangeKind::Modified,
            additions: 0,
            deletions: 0,
            identifiers: Vec::new(),
            config_keys: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    /// Changed-line volume used to rank files
    pub fn weight(&self) -> usize {
        self.additions + self.deletions
    }

    pub fn basename(&self) -> &str {
        basename(&self.path)
    }

    /// Lowercased extension of the current path, empty when there is none
    pub fn extension(&self) -> String {
        extension(&self.path)
    }
}

/// Last segment of a path, splitting on both `/` and `\`
pub fn basename(path: &str) -> &str {
    match path.rfind(['/', '\\']) {
        Some(pos) => &path[pos + 1..],
        None => path,
    }
}

pub fn extension(path: &str) -> String {
    let name = basename(path);
    name.rfind('.')
        .map(|dot| name[dot + 1..].to_lowercase())
        .unwrap_or_default()
}

/// Dependency manifests and lockfiles the analyzer knows how to read
pub const DEPENDENCY_FILES: &[&str] = &[
    "package.json",
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "bun.lockb",
];

/// Path traits that drive the commit type hint.
///
/// A path can carry several traits at once (`package.json` is both config
/// and a dependency manifest), so this is a set of flags rather than one
/// category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathClass {
    pub docs: bool,
    pub ci: bool,
    pub test: bool,
    pub config: bool,
    pub dependency: bool,
}

impl PathClass {
    pub fn of(path: &str) -> Self {
        let p = path.to_lowercase();
        Self {
            docs: p.ends_with(".md")
                || p.ends_with(".mdx")
                || p.contains("/docs/")
                || p.starts_with("docs/"),
            ci: p.contains(".github/workflows/")
                || p.contains(".gitlab-ci")
                || p.ends_with(".circleci/config.yml"),
            test: p.contains("/test/")
                || p.contains("/tests/")
                || p.contains("__tests__")
                || p.ends_with(".spec.ts")
                || p.ends_with(".spec.js")
                || p.ends_with(".test.ts")
                || p.ends_with(".test.js"),
            config: p.ends_with(".yml")
                || p.ends_with(".yaml")
                || p.ends_with(".toml")
                || p.ends_with(".ini")
                || p.ends_with(".env")
                || p.contains(".env.")
                || p.ends_with(".json")
                || p.ends_with(".jsonc"),
            dependency: DEPENDENCY_FILES.iter().any(|name| p.ends_with(name)),
        }
    }
}
