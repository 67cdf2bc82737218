// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::cli::{Cli, Commands, HookAction};
use crate::config::{ApproveMethod, Config};
use crate::domain::Language;
use crate::error::{Error, Result};
use crate::services::{
    approval::{ApprovalSurface, AutoApprove, MessageFile, QuickPick},
    context::ContextBuilder,
    flow::CompletionFlow,
    git::{DiffFile, DiffSource, GitService},
    llm::{Backend, LlmProvider},
    writer::{CommitWriter, FileWriter, StdoutWriter},
};

const HOOK_MARKER: &str = "# procommit hook";
const HOOK_NAME: &str = "prepare-commit-msg";
const HOOK_BACKUP: &str = "prepare-commit-msg.procommit-backup";

pub struct App {
    cli: Cli,
    config: Config,
    cancel_token: CancellationToken,
}

impl App {
    pub fn new(cli: Cli) -> Result<Self> {
        let config = Config::load(&cli)?;
        debug!(
            generator = %config.generator,
            model = config.model(),
            language = %config.language,
            multiple = config.use_multiple_results,
            "config loaded"
        );
        Ok(Self {
            cli,
            config,
            cancel_token: CancellationToken::new(),
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let cancel = self.cancel_token.clone();
        tokio::spawn(async move {
            signal::ctrl_c().await.ok();
            cancel.cancel();
        });

        if let Some(ref cmd) = self.cli.command {
            return self.handle_command(cmd);
        }

        self.generate_commit().await
    }

    async fn generate_commit(&self) -> Result<()> {
        let source: Box<dyn DiffSource> = match self.cli.diff_file {
            Some(ref path) => Box::new(DiffFile::new(path)),
            None => {
                self.print_status("Reading staged changes...");
                Box::new(GitService::discover()?)
            }
        };

        let backend = Backend::from_config(&self.config)?;
        let provider = Reporting {
            inner: &backend,
            language: self.config.language,
            model: self.config.model().to_string(),
            show_prompt: self.cli.show_prompt,
        };

        let approval = self.approval_surface();
        let writer: Box<dyn CommitWriter> = match self.cli.output {
            Some(ref path) => Box::new(FileWriter::new(path)),
            None => Box::new(StdoutWriter),
        };

        let flow = CompletionFlow {
            source: source.as_ref(),
            provider: &provider,
            approval: approval.as_ref(),
            writer: writer.as_ref(),
        };

        let message = tokio::select! {
            _ = self.cancel_token.cancelled() => Err(Error::Cancelled),
            result = flow.run() => result,
        }?;

        if let Some(ref path) = self.cli.output {
            eprintln!(
                "{} Commit message written to {}",
                style("✓").green().bold(),
                path.display()
            );
        }
        debug!(message = %message, "flow complete");
        Ok(())
    }

    fn approval_surface(&self) -> Box<dyn ApprovalSurface> {
        if self.cli.yes {
            return Box::new(AutoApprove);
        }

        let interactive = std::io::stdin().is_terminal() && std::io::stderr().is_terminal();
        if !interactive {
            self.print_info("Not a terminal, accepting the first message. Use --yes to silence this.");
            return Box::new(AutoApprove);
        }

        match self.config.message_approve_method {
            ApproveMethod::QuickPick => Box::new(QuickPick),
            ApproveMethod::MessageFile => Box::new(MessageFile::from_env()),
        }
    }

    fn handle_command(&self, cmd: &Commands) -> Result<()> {
        match cmd {
            Commands::Init => {
                let path = Config::create_default()?;
                println!("Created config: {}", path.display());
                Ok(())
            }
            Commands::Config => {
                self.show_config();
                Ok(())
            }
            Commands::Set { key, value } => {
                let path = Config::set_user_value(key, value)?;
                eprintln!(
                    "{} {} updated in {}",
                    style("✓").green().bold(),
                    key,
                    path.display()
                );
                Ok(())
            }
            Commands::Completions { shell } => {
                let mut cmd = <Cli as clap::CommandFactory>::command();
                clap_complete::generate(*shell, &mut cmd, "procommit", &mut std::io::stdout());
                Ok(())
            }
            Commands::Hook { action } => self.handle_hook(*action),
            #[cfg(feature = "secure-storage")]
            Commands::SetKey { generator } => self.set_api_key(generator),
            #[cfg(feature = "secure-storage")]
            Commands::GetKey { generator } => self.get_api_key(generator),
        }
    }

    fn show_config(&self) {
        println!("Generator: {}", self.config.generator);
        println!("Model: {}", self.config.model());
        println!("Language: {}", self.config.language);
        println!(
            "Endpoint: {}",
            self.config.endpoint().unwrap_or("(generator default)")
        );
        println!("API key: {}", self.config.masked_api_key());
        println!(
            "Include file extension: {}",
            self.config.include_file_extension
        );
        println!("Multiple results: {}", self.config.use_multiple_results);
        println!("Approve method: {}", self.config.message_approve_method);
        println!("Temperature: {}", self.config.temperature);
        println!("Max tokens: {}", self.config.max_tokens);
        println!("Timeout: {}s", self.config.timeout_secs);
        if let Some(ref path) = Config::config_path() {
            let status = if path.exists() { "found" } else { "not found" };
            println!("Config file: {} ({})", path.display(), status);
        }
    }

    // ─── Hook Commands ───

    fn handle_hook(&self, action: HookAction) -> Result<()> {
        let hooks_dir = GitService::discover()?.hooks_dir();
        match action {
            HookAction::Install => hook_install(&hooks_dir),
            HookAction::Uninstall => hook_uninstall(&hooks_dir),
            HookAction::Status => hook_status(&hooks_dir),
        }
    }

    // ─── Keyring Commands ───

    #[cfg(feature = "secure-storage")]
    fn keyring_entry(generator: &str) -> Result<(String, keyring::Entry)> {
        use crate::config::Generator;

        let name = generator.trim().to_lowercase();
        if !Generator::NAMES.contains(&name.as_str()) || name == "ollama" {
            return Err(Error::Config(format!(
                "Keyring storage is for generators that take a key \
                 (chatgpt, gemini, lmstudio, custom), got '{generator}'"
            )));
        }

        let entry =
            keyring::Entry::new("procommit", &name).map_err(|e| Error::Keyring(e.to_string()))?;
        Ok((name, entry))
    }

    #[cfg(feature = "secure-storage")]
    fn set_api_key(&self, generator: &str) -> Result<()> {
        let (name, entry) = Self::keyring_entry(generator)?;

        eprintln!(
            "Enter API key for {} (input will be hidden):",
            style(&name).bold()
        );

        let key = dialoguer::Password::new()
            .with_prompt("API key")
            .interact()?;

        if key.trim().is_empty() {
            return Err(Error::Config("API key cannot be empty".into()));
        }

        entry
            .set_password(key.trim())
            .map_err(|e| Error::Keyring(e.to_string()))?;

        eprintln!("{} API key stored for {}", style("✓").green().bold(), name);
        Ok(())
    }

    #[cfg(feature = "secure-storage")]
    fn get_api_key(&self, generator: &str) -> Result<()> {
        let (name, entry) = Self::keyring_entry(generator)?;

        match entry.get_password() {
            Ok(_) => {
                eprintln!(
                    "{} API key for {} is stored in keychain",
                    style("✓").green().bold(),
                    name
                );
            }
            Err(keyring::Error::NoEntry) => {
                eprintln!(
                    "{} No API key found for {} in keychain",
                    style("✗").red().bold(),
                    name
                );
                eprintln!(
                    "  Store one with: {}",
                    style(format!("procommit set-key {name}")).yellow()
                );
            }
            Err(e) => return Err(Error::Keyring(e.to_string())),
        }

        Ok(())
    }

    // ─── Output Helpers ───

    fn print_status(&self, msg: &str) {
        eprintln!("{} {}", style("→").cyan(), msg);
    }

    fn print_info(&self, msg: &str) {
        eprintln!("{} {}", style("info:").cyan(), msg);
    }
}

const HOOK_SCRIPT: &str = r#"#!/bin/sh
# procommit hook (auto-generated, do not edit)
# Fills the commit message for plain `git commit` runs.
# Skips merge, squash, amend, and message-provided commits.

COMMIT_MSG_FILE="$1"
COMMIT_SOURCE="$2"

case "$COMMIT_SOURCE" in
    merge|squash|message|commit)
        exit 0
        ;;
esac

if ! command -v procommit >/dev/null 2>&1; then
    exit 0
fi

procommit --yes --output "$COMMIT_MSG_FILE" 2>/dev/null || true
"#;

pub fn hook_install(hooks_dir: &Path) -> Result<()> {
    let hook_path = hooks_dir.join(HOOK_NAME);
    let backup_path = hooks_dir.join(HOOK_BACKUP);

    std::fs::create_dir_all(hooks_dir)?;

    if hook_path.exists() {
        let content = std::fs::read_to_string(&hook_path).unwrap_or_default();
        if content.contains(HOOK_MARKER) {
            eprintln!(
                "{} Hook already installed at {}",
                style("✓").green().bold(),
                hook_path.display()
            );
            return Ok(());
        }
        std::fs::copy(&hook_path, &backup_path)?;
        eprintln!(
            "{} Backed up existing hook to {}",
            style("info:").cyan(),
            backup_path.display()
        );
    }

    // Write then rename so a half-written hook never runs
    let temp_path = hooks_dir.join(".prepare-commit-msg.tmp");
    std::fs::write(&temp_path, HOOK_SCRIPT)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = std::fs::metadata(&temp_path)?.permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&temp_path, perms)?;
    }

    std::fs::rename(&temp_path, &hook_path)?;

    eprintln!(
        "{} Hook installed at {}",
        style("✓").green().bold(),
        hook_path.display()
    );
    Ok(())
}

pub fn hook_uninstall(hooks_dir: &Path) -> Result<()> {
    let hook_path = hooks_dir.join(HOOK_NAME);
    let backup_path = hooks_dir.join(HOOK_BACKUP);

    if !hook_path.exists() {
        eprintln!(
            "{} No hook found at {}",
            style("info:").cyan(),
            hook_path.display()
        );
        return Ok(());
    }

    let content = std::fs::read_to_string(&hook_path).unwrap_or_default();
    if !content.contains(HOOK_MARKER) {
        return Err(Error::Git(format!(
            "Hook at {} was not installed by procommit. Remove manually if intended.",
            hook_path.display()
        )));
    }

    std::fs::remove_file(&hook_path)?;

    if backup_path.exists() {
        std::fs::rename(&backup_path, &hook_path)?;
        eprintln!(
            "{} Restored previous hook from backup",
            style("info:").cyan()
        );
    }

    eprintln!(
        "{} Hook removed from {}",
        style("✓").green().bold(),
        hook_path.display()
    );
    Ok(())
}

pub fn hook_status(hooks_dir: &Path) -> Result<()> {
    let hook_path: PathBuf = hooks_dir.join(HOOK_NAME);

    if !hook_path.exists() {
        eprintln!(
            "{} No prepare-commit-msg hook installed",
            style("✗").red().bold()
        );
        eprintln!(
            "  Install with: {}",
            style("procommit hook install").yellow()
        );
        return Ok(());
    }

    let content = std::fs::read_to_string(&hook_path).unwrap_or_default();
    if content.contains(HOOK_MARKER) {
        eprintln!(
            "{} procommit hook is installed at {}",
            style("✓").green().bold(),
            hook_path.display()
        );
    } else {
        eprintln!(
            "{} A prepare-commit-msg hook exists but was not installed by procommit",
            style("info:").cyan()
        );
    }

    Ok(())
}

/// Shows the prompt on request and a spinner while the backend works
struct Reporting<'a> {
    inner: &'a dyn LlmProvider,
    language: Language,
    model: String,
    show_prompt: bool,
}

#[async_trait]
impl LlmProvider for Reporting<'_> {
    async fn generate(&self, diff: &str) -> Result<Vec<String>> {
        if self.show_prompt {
            let prompt = ContextBuilder::build(diff).to_prompt(self.language);
            eprintln!("{}", style("--- PROMPT ---").dim());
            eprintln!("{prompt}");
            eprintln!("{}", style("--- END PROMPT ---").dim());
        }

        let spinner = spinner(format!("Contacting {} ({})...", self.inner.name(), self.model));
        let result = self.inner.generate(diff).await;
        spinner.finish_and_clear();
        result
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}
