// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

use std::io::Read;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::error::{Error, Result};

/// Where the unified diff comes from
#[async_trait]
pub trait DiffSource: Send + Sync {
    /// Non-blank unified diff text, or `Error::NoStagedChanges`
    async fn diff(&self) -> Result<String>;
}

pub struct GitService {
    work_dir: PathBuf,
    hooks_dir: PathBuf,
}

impl GitService {
    /// Resolve the repository containing the current directory
    pub fn discover() -> Result<Self> {
        let repo = gix::discover(".").map_err(|_| Error::NotAGitRepo)?;

        let work_dir = repo
            .work_dir()
            .ok_or_else(|| Error::Git("Bare repository not supported".into()))?
            .to_path_buf();
        // Shared by all worktrees
        let hooks_dir = repo.common_dir().join("hooks");

        Ok(Self {
            work_dir,
            hooks_dir,
        })
    }

    pub fn hooks_dir(&self) -> PathBuf {
        self.hooks_dir.clone()
    }

    pub async fn staged_diff(&self) -> Result<String> {
        let output = Command::new("git")
            .args(["diff", "--cached", "--no-ext-diff", "--no-color"])
            .current_dir(&self.work_dir)
            .output()
            .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Git(stderr.trim().to_string()));
        }

        let diff = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!(bytes = diff.len(), "staged diff read");
        non_blank(diff)
    }
}

#[async_trait]
impl DiffSource for GitService {
    async fn diff(&self) -> Result<String> {
        self.staged_diff().await
    }
}

/// Diff read from a file, or from stdin when the path is `-`
pub struct DiffFile {
    path: PathBuf,
}

impl DiffFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn is_stdin(&self) -> bool {
        self.path.as_os_str() == "-"
    }
}

#[async_trait]
impl DiffSource for DiffFile {
    async fn diff(&self) -> Result<String> {
        let diff = if self.is_stdin() {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        } else {
            std::fs::read_to_string(&self.path)?
        };
        debug!(path = %self.path.display(), bytes = diff.len(), "diff file read");
        non_blank(diff)
    }
}

fn non_blank(diff: String) -> Result<String> {
    if diff.trim().is_empty() {
        Err(Error::NoStagedChanges)
    } else {
        Ok(diff)
    }
}
