// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{
    ChangeKind, CommitType, DiffAnalysis, FileSummary, MAX_CONFIG_KEYS, MAX_DEPENDENCIES,
    MAX_IDENTIFIERS, MAX_PRIMARY_FILES, PathClass, basename, extension, unique_keep_order,
};

static HEADER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^diff --git a/(.+?) b/(.+)$").unwrap());

/// Symbol-declaration rules for one family of source extensions
struct LanguageRules {
    extensions: &'static [&'static str],
    patterns: Vec<Regex>,
}

const IDENT: &str = r"([A-Za-z_][A-Za-z0-9_]*)";

fn rules(extensions: &'static [&'static str], patterns: &[&str]) -> LanguageRules {
    LanguageRules {
        extensions,
        patterns: patterns
            .iter()
            .map(|p| Regex::new(&p.replace("{id}", IDENT)).unwrap())
            .collect(),
    }
}

// Every pattern anchors on a keyword boundary; a miss is fine, a bogus hit is not.
static IDENTIFIER_RULES: LazyLock<Vec<LanguageRules>> = LazyLock::new(|| {
    vec![
        rules(
            &["ts", "tsx", "js", "jsx", "mjs", "cjs"],
            &[
                r"\bexport\s+(?:default\s+)?class\s+{id}\b",
                r"\bclass\s+{id}\b",
                r"\bexport\s+(?:async\s+)?function\s+{id}\b",
                r"\b(?:async\s+)?function\s+{id}\b",
                r"\bexport\s+interface\s+{id}\b",
                r"\binterface\s+{id}\b",
                r"\bexport\s+type\s+{id}\b",
                r"\btype\s+{id}\b",
                r"\bexport\s+enum\s+{id}\b",
                r"\benum\s+{id}\b",
                r"\bexport\s+const\s+{id}\b",
                r"\bconst\s+{id}\s*=\s*(?:async\s*)?(?:\(|function\b)",
                r#"\bdescribe\(\s*["'`]([^"'`]{1,60})["'`]"#,
                r#"\bit\(\s*["'`]([^"'`]{1,60})["'`]"#,
            ],
        ),
        rules(&["py"], &[r"\bdef\s+{id}\b", r"\bclass\s+{id}\b"]),
        rules(
            &["go"],
            &[r"\bfunc\s+(?:\([^)]+\)\s*)?{id}\b", r"\btype\s+{id}\b"],
        ),
        rules(
            &["rs"],
            &[r"\bfn\s+{id}\b", r"\bstruct\s+{id}\b", r"\benum\s+{id}\b"],
        ),
        rules(
            &["java", "kt"],
            &[r"\bclass\s+{id}\b", r"\binterface\s+{id}\b"],
        ),
    ]
});

/// Config file formats whose left-hand keys are worth surfacing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Env,
    Json,
    Yaml,
    Toml,
}

// Indexed by `ConfigFormat` discriminant
static CONFIG_KEY_PATTERNS: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [
        Regex::new(r"^\s*([A-Z0-9_]{2,})\s*=").unwrap(),
        Regex::new(r#"^\s*"?([A-Za-z0-9_.-]{2,})"?\s*:"#).unwrap(),
        Regex::new(r"^\s*([A-Za-z0-9_.-]{2,})\s*:").unwrap(),
        Regex::new(r"^\s*([A-Za-z0-9_.-]{2,})\s*=").unwrap(),
    ]
});

impl ConfigFormat {
    fn detect(path: &str) -> Option<Self> {
        let p = path.to_lowercase();
        if p.ends_with(".env") || p.contains(".env.") {
            return Some(Self::Env);
        }
        match extension(&p).as_str() {
            "json" | "jsonc" => Some(Self::Json),
            "yml" | "yaml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }

    fn key_pattern(self) -> &'static Regex {
        &CONFIG_KEY_PATTERNS[self as usize]
    }
}

static MANIFEST_DEP_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^\s*"(@?[^"]+)"\s*:\s*"[^"]+""#).unwrap());

static LOCKFILE_DEP_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^\s*"?(@?[^"\s]+)"?\s*(?:@|:)\s*"#).unwrap());

const LOCKFILES: &[&str] = &["package-lock.json", "yarn.lock", "pnpm-lock.yaml", "bun.lockb"];

/// Settings of this tool that live in `package.json`-style manifests
const SELF_NAMESPACE: &str = "procommit.";

/// Collects one file's records until the next header or end of input
struct FileAccumulator {
    summary: FileSummary,
    rename_from: Option<String>,
    rename_to: Option<String>,
}

impl FileAccumulator {
    fn new(a_path: &str, b_path: &str) -> Self {
        let old_path = (a_path != b_path).then(|| a_path.to_string());
        Self {
            summary: FileSummary::new(b_path, old_path),
            rename_from: None,
            rename_to: None,
        }
    }

    fn apply_rename(&mut self) {
        if let (Some(from), Some(to)) = (&self.rename_from, &self.rename_to) {
            self.summary.change = ChangeKind::Renamed;
            self.summary.old_path = Some(from.clone());
            self.summary.path = to.clone();
            self.rename_from = None;
            self.rename_to = None;
        }
    }

    fn record_content(&mut self, payload: &str, is_addition: bool) {
        if is_addition {
            self.summary.additions += 1;
        } else {
            self.summary.deletions += 1;
        }

        let path = self.summary.path.clone();
        self.summary
            .identifiers
            .extend(DiffAnalyzer::extract_identifiers(payload, &extension(&path)));
        self.summary
            .config_keys
            .extend(DiffAnalyzer::extract_config_keys(payload, &path));
        self.summary
            .dependencies
            .extend(DiffAnalyzer::extract_dependencies(payload, &path));
    }

    fn seal(self) -> FileSummary {
        let mut summary = self.summary;
        summary.identifiers = unique_keep_order(&summary.identifiers, MAX_IDENTIFIERS);
        summary.config_keys = unique_keep_order(&summary.config_keys, MAX_CONFIG_KEYS);
        summary.dependencies = unique_keep_order(&summary.dependencies, MAX_DEPENDENCIES);
        summary
    }
}

pub struct DiffAnalyzer;

impl DiffAnalyzer {
    /// Parse a unified diff into ranked file summaries and hints.
    ///
    /// Total: text that is not a diff yields an empty analysis.
    pub fn analyze(diff: &str) -> DiffAnalysis {
        let files = Self::parse_files(diff);
        Self::summarize(files)
    }

    /// Per-file summaries in diff order, before ranking
    pub fn parse_files(diff: &str) -> Vec<FileSummary> {
        let mut files = Vec::new();
        let mut current: Option<FileAccumulator> = None;

        for line in diff.lines() {
            if let Some(caps) = HEADER_REGEX.captures(line) {
                if let Some(done) = current.take() {
                    files.push(done.seal());
                }
                current = Some(FileAccumulator::new(&caps[1], &caps[2]));
                continue;
            }

            let Some(acc) = current.as_mut() else {
                continue;
            };

            if line.starts_with("new file mode") {
                acc.summary.change = ChangeKind::Added;
                continue;
            }
            if line.starts_with("deleted file mode") {
                acc.summary.change = ChangeKind::Deleted;
                continue;
            }
            if let Some(from) = line.strip_prefix("rename from ") {
                acc.rename_from = Some(from.trim().to_string());
                acc.apply_rename();
                continue;
            }
            if let Some(to) = line.strip_prefix("rename to ") {
                acc.rename_to = Some(to.trim().to_string());
                acc.apply_rename();
                continue;
            }

            if line.starts_with("+++ ") || line.starts_with("--- ") || line.starts_with("@@") {
                continue;
            }

            let (is_addition, payload) = if let Some(rest) = line.strip_prefix('+') {
                (true, rest)
            } else if let Some(rest) = line.strip_prefix('-') {
                (false, rest)
            } else {
                continue;
            };

            if payload.trim().is_empty() {
                continue;
            }

            acc.record_content(payload, is_addition);
        }

        if let Some(done) = current {
            files.push(done.seal());
        }

        files
    }

    fn summarize(mut files: Vec<FileSummary>) -> DiffAnalysis {
        // Stable: equal weights keep diff order
        files.sort_by(|a, b| b.weight().cmp(&a.weight()));
        files.truncate(MAX_PRIMARY_FILES);

        let primary_identifiers = unique_keep_order(
            files.iter().flat_map(|f| f.identifiers.iter()),
            MAX_IDENTIFIERS,
        );
        let scope_hint = Self::infer_scope(&files);
        let type_hint = Self::infer_commit_type(&files);

        DiffAnalysis {
            files,
            primary_identifiers,
            scope_hint,
            type_hint,
        }
    }

    /// Basename for a single file, else the recurring top-level directory.
    pub fn infer_scope(files: &[FileSummary]) -> Option<String> {
        let first = files.first()?;
        if files.len() == 1 {
            return Some(first.basename().to_string());
        }

        // Insertion-ordered counts so ties resolve to the earliest segment
        let mut segments: Vec<(&str, usize)> = Vec::new();
        for file in files {
            let Some(segment) = file.path.split('/').next().map(str::trim) else {
                continue;
            };
            if segment.is_empty() || segment == "." || segment == "src" {
                continue;
            }
            match segments.iter_mut().find(|(s, _)| *s == segment) {
                Some((_, count)) => *count += 1,
                None => segments.push((segment, 1)),
            }
        }

        let best = segments
            .iter()
            .fold(None::<(&str, usize)>, |best, &(segment, count)| match best {
                Some((_, top)) if top >= count => best,
                _ => Some((segment, count)),
            });

        match best {
            Some((segment, count)) if count > 1 => Some(segment.to_string()),
            _ => Some(first.basename().to_string()),
        }
    }

    /// Priority: docs, ci, test, dependency chore, config chore, feat.
    pub fn infer_commit_type(files: &[FileSummary]) -> Option<CommitType> {
        if files.is_empty() {
            return None;
        }

        let classes: Vec<PathClass> = files.iter().map(|f| PathClass::of(&f.path)).collect();

        if classes.iter().all(|c| c.docs) {
            return Some(CommitType::Docs);
        }
        if classes.iter().any(|c| c.ci) {
            return Some(CommitType::Ci);
        }
        if classes.iter().all(|c| c.test) {
            return Some(CommitType::Test);
        }
        if classes.iter().any(|c| c.dependency) {
            return Some(CommitType::Chore);
        }
        if classes.iter().any(|c| c.config) && classes.iter().all(|c| c.config || c.dependency) {
            return Some(CommitType::Chore);
        }
        if files.iter().any(|f| f.change == ChangeKind::Added) {
            return Some(CommitType::Feat);
        }

        None
    }

    /// Declared symbol names on one changed line, keyed by file extension
    pub fn extract_identifiers(line: &str, ext: &str) -> Vec<String> {
        IDENTIFIER_RULES
            .iter()
            .filter(|r| r.extensions.contains(&ext))
            .flat_map(|r| r.patterns.iter())
            .filter_map(|p| p.captures(line))
            .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
            .collect()
    }

    pub fn extract_config_keys(line: &str, path: &str) -> Vec<String> {
        let Some(format) = ConfigFormat::detect(path) else {
            return Vec::new();
        };

        format
            .key_pattern()
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| vec![m.as_str().to_string()])
            .unwrap_or_default()
    }

    pub fn extract_dependencies(line: &str, path: &str) -> Vec<String> {
        let p = path.to_lowercase();
        let name = basename(&p);

        let found = if name == "package.json" {
            MANIFEST_DEP_REGEX
                .captures(line)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str())
                .filter(|dep| !dep.starts_with(SELF_NAMESPACE))
        } else if LOCKFILES.contains(&name) {
            LOCKFILE_DEP_REGEX
                .captures(line)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str())
        } else {
            None
        };

        found.map(|dep| vec![dep.to_string()]).unwrap_or_default()
    }
}
