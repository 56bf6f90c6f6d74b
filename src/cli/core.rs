//! Shell context, dispatch and error reporting.

use std::{io, path::PathBuf};

use dialoguer::theme::ColorfulTheme;
use rustyline::error::ReadlineError;
use strsim::levenshtein;
use tracing::warn;

use crate::config::{app_home, Config, ConfigManager};
use crate::core::{Clock, FinanceSession, SystemClock};
use crate::currency::MoneyFormat;
use crate::errors::FinanceError;
use crate::storage::JsonFileStore;

use super::commands::{self, CommandDefinition, CommandRegistry};
use super::io as cli_io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Finance(#[from] FinanceError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

/// Failures that end the shell.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Finance(#[from] FinanceError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Command failed: {0}")]
    Command(String),
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        CliError::Command(err.to_string())
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Command(err.to_string())
    }
}

impl From<ReadlineError> for CliError {
    fn from(err: ReadlineError) -> Self {
        CliError::Input(err.to_string())
    }
}

pub struct ShellContext {
    pub(crate) mode: CliMode,
    pub(crate) registry: CommandRegistry,
    pub(crate) session: FinanceSession<JsonFileStore>,
    pub(crate) theme: ColorfulTheme,
    config_manager: ConfigManager,
    config: Config,
    money: MoneyFormat,
    pub(crate) running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_base_dir(mode, app_home(), &SystemClock)
    }

    /// Builds a shell whose config, data and backups live under `base`.
    pub fn with_base_dir(mode: CliMode, base: PathBuf, clock: &dyn Clock) -> Result<Self, CliError> {
        let config_manager = ConfigManager::with_base_dir(base)?;
        let config = match config_manager.load() {
            Ok(config) => config,
            Err(err) => {
                warn!(error = %err, "configuration unreadable; using defaults");
                cli_io::print_warning(format!("Ignoring unreadable configuration: {}", err));
                Config::default()
            }
        };
        super::output::set_color_enabled(config.ui_color_enabled && mode == CliMode::Interactive);

        let store = JsonFileStore::new(config_manager.data_dir(&config))?;
        let session = FinanceSession::open(store, clock);
        let money = MoneyFormat::new(config.currency_symbol.clone(), config.show_balance);

        Ok(Self {
            mode,
            registry: CommandRegistry::new(commands::all_definitions()),
            session,
            theme: ColorfulTheme::default(),
            config_manager,
            config,
            money,
            running: true,
        })
    }

    pub(crate) fn mode(&self) -> CliMode {
        self.mode
    }

    pub(crate) fn command_usages(&self) -> Vec<(&'static str, &'static str)> {
        self.registry
            .iter()
            .map(|definition| (definition.name, definition.usage))
            .collect()
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandDefinition> {
        self.registry.get(name)
    }

    pub(crate) fn prompt(&self) -> String {
        if self.session.is_unlocked() {
            format!("financas [{}] > ", self.session.selected_month())
        } else {
            "financas (locked) > ".to_string()
        }
    }

    pub(crate) fn money(&self) -> &MoneyFormat {
        &self.money
    }

    pub(crate) fn backup_dir(&self) -> PathBuf {
        self.config_manager.backup_dir(&self.config)
    }

    /// Flips balance visibility and remembers the choice.
    pub(crate) fn set_balance_visible(&mut self, visible: bool) -> CommandResult {
        self.money.set_visible(visible);
        self.config.show_balance = visible;
        self.config_manager.save(&self.config)?;
        Ok(())
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.get(command).map(|definition| definition.handler) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    #[cfg(test)]
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        super::shell::handle_line(self, line)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let mut suggestions: Vec<_> = self
            .registry
            .names()
            .map(|key| (levenshtein(key, input), key))
            .collect();
        suggestions.sort_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = suggestions.first() {
            if *distance <= 3 {
                cli_io::print_info(format!("Suggestion: `{}`?", best));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(cli_io::confirm_action(&self.theme, "Exit shell?", true)?)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                self.print_error(&message);
                cli_io::print_hint("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::Finance(FinanceError::Locked) => {
                self.print_error("Session is locked.");
                cli_io::print_hint("Use `unlock <pin>` first.");
                Ok(())
            }
            other => {
                self.print_error(&other.to_string());
                Ok(())
            }
        }
    }

    pub(crate) fn print_error(&self, message: &str) {
        cli_io::print_error(message);
    }

    pub(crate) fn print_warning(&self, message: &str) {
        cli_io::print_warning(message);
    }
}

#[cfg(test)]
pub(crate) fn process_script(
    base: PathBuf,
    clock: &dyn Clock,
    lines: &[&str],
) -> Result<ShellContext, CliError> {
    let mut app = ShellContext::with_base_dir(CliMode::Script, base, clock)?;
    for line in lines {
        match app.process_line(line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => app.report_error(err)?,
        }
    }
    Ok(app)
}
