//! Shell state, command dispatch, and error reporting.

use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use shell_words::split;
use thiserror::Error;

use smartspend_config::{Config, ConfigError, ConfigManager};
use smartspend_core::CoreError;
use smartspend_domain::ScanItem;

use crate::{
    app::SmartSpendApp,
    errors::{CliError, SmartSpendError},
};

use super::{
    commands, help, output,
    registry::{CommandEntry, CommandRegistry},
};

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

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    App(#[from] SmartSpendError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<CoreError> for CommandError {
    fn from(err: CoreError) -> Self {
        CommandError::App(err.into())
    }
}

impl From<ConfigError> for CommandError {
    fn from(err: ConfigError) -> Self {
        CommandError::App(err.into())
    }
}

impl CommandError {
    pub(crate) fn usage(usage: &str) -> Self {
        CommandError::InvalidArguments(format!("usage: {usage}"))
    }
}

pub type CommandResult = Result<(), CommandError>;

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub app: SmartSpendApp,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub theme: ColorfulTheme,
    /// Item from the latest `scan`, used by a bare `buy`.
    pub last_scan: Option<ScanItem>,
    pub running: bool,
}

impl ShellContext {
    /// Loads the config under the SmartSpend home and wires the app from it.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::from_env()?;
        let config = config_manager.load()?;
        let app = SmartSpendApp::from_config(&config)?;
        Ok(Self::with_app(mode, app, config_manager, config))
    }

    pub fn with_app(
        mode: CliMode,
        app: SmartSpendApp,
        config_manager: ConfigManager,
        config: Config,
    ) -> Self {
        output::apply_config(&config);
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);
        Self {
            mode,
            registry,
            app,
            config_manager,
            config,
            theme: ColorfulTheme::default(),
            last_scan: None,
            running: true,
        }
    }

    pub fn prompt(&self) -> String {
        format!("smartspend [{}]> ", self.app.session_state())
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    /// Amount rendered in the configured currency.
    pub(crate) fn money(&self, amount: f64) -> String {
        match self.config.currency.as_str() {
            "USD" => format!("${amount:.2}"),
            code => format!("{amount:.2} {code}"),
        }
    }

    pub(crate) fn persist_config(&self) -> CommandResult {
        self.config_manager.save(&self.config)?;
        Ok(())
    }

    pub(crate) fn can_prompt(&self) -> bool {
        self.mode == CliMode::Interactive
    }

    pub(crate) fn prompt_text(&self, prompt: &str) -> Result<String, CommandError> {
        Ok(Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .interact_text()?)
    }

    /// Asks before destructive actions; script mode always proceeds.
    pub(crate) fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        if !self.can_prompt() {
            return Ok(true);
        }
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(false)
            .interact()?)
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
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

    /// Tokenises one input line and runs it; `exit` also stops the shell.
    pub(crate) fn execute(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = split(line).map_err(|err| CommandError::InvalidArguments(err.to_string()))?;
        let Some((raw, rest)) = tokens.split_first() else {
            return Ok(LoopControl::Continue);
        };
        let args: Vec<&str> = rest.iter().map(String::as_str).collect();
        let control = self.dispatch(&raw.to_lowercase(), raw, &args)?;
        if control == LoopControl::Exit {
            self.running = false;
        }
        Ok(control)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{input}`. Type `help` to see available commands."
        ));
        if let Some(best) = self.registry.closest(input) {
            output::info(format!("Suggestion: `{best}`?"));
        }
    }

    pub(crate) fn print_help(&self, topic: Option<&str>) {
        match topic {
            Some(name) => match self.command(&name.to_lowercase()) {
                Some(entry) => help::print_command(entry),
                None => self.suggest_command(name),
            },
            None => help::print_overview(&self.registry),
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if !self.can_prompt() {
            return Ok(true);
        }
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt("Exit SmartSpend?")
            .default(true)
            .interact()?)
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
            }
            CommandError::App(SmartSpendError::NotOnDashboard(state)) => {
                output::error(format!("That needs the dashboard; you are at `{state}`."));
                output::hint("Run `session` to see the next step.");
            }
            other => output::error(other),
        }
    }
}

/// Script-mode shell over a store in `dir`, with a pinned clock and local rules.
#[cfg(test)]
pub(crate) fn scripted_context(dir: &tempfile::TempDir) -> ShellContext {
    use smartspend_core::{FixedClock, RuleClassifier};
    use smartspend_storage_json::JsonProfileStore;

    let config = Config::default();
    let store = JsonProfileStore::new(dir.path().join("data")).unwrap();
    let clock = FixedClock("2024-05-01T09:00:00Z".parse().unwrap());
    let app = SmartSpendApp::new(
        config.warning_ratio,
        Box::new(store),
        Box::new(RuleClassifier::default()),
        Box::new(clock),
    );
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
    ShellContext::with_app(CliMode::Script, app, manager, config)
}

#[cfg(test)]
pub(crate) fn onboarded_context(dir: &tempfile::TempDir) -> ShellContext {
    let mut ctx = scripted_context(dir);
    for line in ["start", "signup Ada", "setup 5000 3000 0 1000 0"] {
        ctx.execute(line).unwrap();
    }
    ctx
}
