// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

use std::path::PathBuf;

use tracing::debug;

use crate::error::Result;

/// Final destination of the approved message
pub trait CommitWriter: Send + Sync {
    fn write(&self, message: &str) -> Result<()>;
}

pub struct StdoutWriter;

impl CommitWriter for StdoutWriter {
    fn write(&self, message: &str) -> Result<()> {
        println!("{message}");
        Ok(())
    }
}

/// Writes to a file such as git's `COMMIT_EDITMSG`
pub struct FileWriter {
    path: PathBuf,
}

impl FileWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CommitWriter for FileWriter {
    fn write(&self, message: &str) -> Result<()> {
        std::fs::write(&self.path, format!("{message}\n"))?;
        debug!(path = %self.path.display(), "message written");
        Ok(())
    }
}
