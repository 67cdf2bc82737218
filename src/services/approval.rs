// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::Command;
use std::time::SystemTime;

use console::style;
use dialoguer::Select;
use tracing::debug;

use crate::error::{Error, Result};

pub const MESSAGE_FILE_HEADER: &str =
    "# This is a generated commit message. You can edit it and save to approve it #";

/// Outcome of showing candidates to the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Approval {
    pub accepted: bool,
    pub edited: bool,
    pub chosen_index: Option<usize>,
    pub edited_text: Option<String>,
}

impl Approval {
    pub fn rejected() -> Self {
        Self::default()
    }

    pub fn pick(index: usize) -> Self {
        Self {
            accepted: true,
            chosen_index: Some(index),
            ..Self::default()
        }
    }

    pub fn edited(text: impl Into<String>) -> Self {
        Self {
            accepted: true,
            edited: true,
            chosen_index: Some(0),
            edited_text: Some(text.into()),
        }
    }

    /// Message to write: edited text when non-blank, else the chosen
    /// candidate, else the first one. Always trimmed.
    pub fn resolve(&self, candidates: &[String]) -> Option<String> {
        if self.edited {
            if let Some(text) = self.edited_text.as_deref().map(str::trim) {
                if !text.is_empty() {
                    return Some(text.to_string());
                }
            }
        }

        self.chosen_index
            .and_then(|i| candidates.get(i))
            .or_else(|| candidates.first())
            .map(|c| c.trim().to_string())
    }
}

pub trait ApprovalSurface: Send + Sync {
    fn review(&self, candidates: &[String]) -> Result<Approval>;
}

/// Accepts the first candidate without asking
pub struct AutoApprove;

impl ApprovalSurface for AutoApprove {
    fn review(&self, candidates: &[String]) -> Result<Approval> {
        Ok(if candidates.is_empty() {
            Approval::rejected()
        } else {
            Approval::pick(0)
        })
    }
}

/// Terminal picker: a list for several candidates, yes/no for one
pub struct QuickPick;

impl ApprovalSurface for QuickPick {
    fn review(&self, candidates: &[String]) -> Result<Approval> {
        if candidates.len() > 1 {
            let items: Vec<String> = candidates
                .iter()
                .enumerate()
                .map(|(i, msg)| format!("Result {}  {}", i + 1, style(msg).green()))
                .collect();

            let selection = Select::new()
                .with_prompt("Pick a commit message")
                .items(&items)
                .default(0)
                .interact_opt()?;

            return Ok(selection.map_or_else(Approval::rejected, Approval::pick));
        }

        let Some(message) = candidates.first() else {
            return Ok(Approval::rejected());
        };

        eprintln!("\n{}", style("Generated commit message:").bold());
        eprintln!("{}\n", style(message).green());

        let answer = Select::new()
            .with_prompt("Use this commit message?")
            .items(&["Yes", "No"])
            .default(0)
            .interact_opt()?;

        Ok(match answer {
            Some(0) => Approval::pick(0),
            _ => Approval::rejected(),
        })
    }
}

/// Opens the first candidate in `$VISUAL`/`$EDITOR`; saving approves it
pub struct MessageFile {
    editor: String,
}

impl MessageFile {
    pub fn new(editor: impl Into<String>) -> Self {
        Self {
            editor: editor.into(),
        }
    }

    /// `$VISUAL`, then `$EDITOR`, then the platform default
    pub fn from_env() -> Self {
        let editor = ["VISUAL", "EDITOR"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|e| !e.trim().is_empty())
            .unwrap_or_else(|| default_editor().to_string());
        Self::new(editor)
    }

    fn open(&self, path: &Path) -> Result<bool> {
        let mut parts = self.editor.split_whitespace();
        let Some(program) = parts.next() else {
            return Err(Error::Editor("no editor configured".into()));
        };

        let status = Command::new(program)
            .args(parts)
            .arg(path)
            .status()
            .map_err(|e| Error::Editor(format!("cannot start '{program}': {e}")))?;

        debug!(editor = program, %status, "editor exited");
        Ok(status.success())
    }
}

impl ApprovalSurface for MessageFile {
    fn review(&self, candidates: &[String]) -> Result<Approval> {
        let Some(message) = candidates.first() else {
            return Ok(Approval::rejected());
        };

        let mut file = tempfile::Builder::new()
            .prefix("procommit-")
            .suffix(".txt")
            .tempfile()?;
        let original = format!("{MESSAGE_FILE_HEADER}\n\n{message}\n");
        file.write_all(original.as_bytes())?;
        file.flush()?;

        // Dropping the TempPath removes the file on every return path
        let path = file.into_temp_path();
        let before = modified(&path);

        if !self.open(&path)? {
            return Ok(Approval::rejected());
        }

        let saved = fs::read_to_string(&path)?;
        if modified(&path) == before && saved == original {
            debug!("message file closed without saving");
            return Ok(Approval::rejected());
        }

        Ok(Approval::edited(strip_comment_lines(&saved)))
    }
}

/// Drop `# ... #` banner lines
pub fn strip_comment_lines(text: &str) -> String {
    text.lines()
        .filter(|line| {
            let t = line.trim();
            !(t.len() >= 2 && t.starts_with('#') && t.ends_with('#'))
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

fn modified(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}

fn default_editor() -> &'static str {
    if cfg!(windows) { "notepad" } else { "vi" }
}
