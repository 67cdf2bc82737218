// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

// miette's Diagnostic derive generates code that triggers this false positive
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    #[error("No staged changes found. Make sure to stage your changes with `git add`.")]
    #[diagnostic(
        code(procommit::git::no_staged),
        help("Stage files with: git add <files>")
    )]
    NoStagedChanges,

    #[error("Not a git repository")]
    #[diagnostic(
        code(procommit::git::not_repo),
        help("Run this command inside a git work tree, or pass --diff-file")
    )]
    NotAGitRepo,

    #[error("Git error: {0}")]
    #[diagnostic(code(procommit::git::error))]
    Git(String),

    #[error("You should set an API Key before using the selected generator! ({generator})")]
    #[diagnostic(
        code(procommit::config::missing_key),
        help("Set PROCOMMIT_API_KEY, the provider variable, or run: procommit set-key {generator}")
    )]
    MissingApiKey { generator: String },

    #[error("Provider '{provider}' error: {message}")]
    #[diagnostic(code(procommit::provider::error))]
    Provider { provider: String, message: String },

    #[error("No commit message were generated by '{provider}'")]
    #[diagnostic(
        code(procommit::provider::empty),
        help("Try again, or switch model with --model")
    )]
    NoCandidates { provider: String },

    #[error("User rejected commit message.")]
    Rejected,

    #[error("Operation cancelled by user")]
    Cancelled,

    #[error("Configuration error: {0}")]
    #[diagnostic(code(procommit::config::error))]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Dialog error: {0}")]
    Dialog(String),

    #[error("Editor error: {0}")]
    #[diagnostic(
        code(procommit::approve::editor),
        help("Set $VISUAL or $EDITOR to an editor that waits until the file is closed")
    )]
    Editor(String),

    #[cfg(feature = "secure-storage")]
    #[error("Keyring error: {0}")]
    #[diagnostic(
        code(procommit::keyring::error),
        help("Check your system keychain configuration")
    )]
    Keyring(String),
}

impl From<dialoguer::Error> for Error {
    fn from(e: dialoguer::Error) -> Self {
        Error::Dialog(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
