// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_complete::Shell;

use crate::domain::Language;

#[derive(Parser, Debug, Default)]
#[command(name = "procommit")]
#[command(version)]
#[command(
    about = "Conventional commit messages from staged changes",
    long_about = None
)]
pub struct Cli {
    /// Backend (chatgpt, gemini, ollama, lmstudio, custom)
    #[arg(short, long, env = "PROCOMMIT_GENERATOR")]
    pub generator: Option<String>,

    /// Model name
    #[arg(short, long, env = "PROCOMMIT_MODEL")]
    pub model: Option<String>,

    /// Language of the message (english, russian, japanese, korean, german)
    #[arg(short, long)]
    pub language: Option<Language>,

    /// Request several candidates and pick one
    #[arg(long)]
    pub multiple: bool,

    /// Drop file extensions from scopes
    #[arg(long)]
    pub no_extension: bool,

    /// How to approve the message
    #[arg(long, value_enum)]
    pub approve: Option<ApproveArg>,

    /// Accept the first candidate without prompting
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Read the unified diff from a file instead of git ("-" for stdin)
    #[arg(long, value_name = "PATH")]
    pub diff_file: Option<PathBuf>,

    /// Write the message to a file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Show the prompt sent to the backend
    #[arg(long)]
    pub show_prompt: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApproveArg {
    QuickPick,
    MessageFile,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Initialize config file
    Init,
    /// Show current configuration
    Config,
    /// Change one setting in the user config file
    Set {
        /// Setting name, e.g. temperature or generator
        key: String,
        /// New value; an empty string clears optional settings
        value: String,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
    /// Manage the prepare-commit-msg hook
    Hook {
        #[command(subcommand)]
        action: HookAction,
    },
    /// Store an API key in the system keychain
    #[cfg(feature = "secure-storage")]
    SetKey {
        /// Generator the key belongs to (chatgpt, gemini, ...)
        generator: String,
    },
    /// Check whether an API key is stored in the system keychain
    #[cfg(feature = "secure-storage")]
    GetKey {
        generator: String,
    },
}

#[derive(clap::Subcommand, Debug, Clone, Copy)]
pub enum HookAction {
    /// Install the hook into the current repository
    Install,
    /// Remove the hook, restoring any backed-up hook
    Uninstall,
    /// Report whether the hook is installed
    Status,
}
