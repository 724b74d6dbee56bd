use std::{
    borrow::Cow,
    io::{self, BufRead},
};

use colored::Colorize;
use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::Validator,
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};

use crate::cli::completion::CompletionModel;
use crate::cli::context::{CliMode, LoopControl, ShellContext};
use crate::cli::output;
use crate::errors::CliError;

/// Presence of this variable switches the shell to reading commands from stdin.
pub const SCRIPT_ENV: &str = "SMARTSPEND_CLI_SCRIPT";

pub fn run_cli() -> Result<(), CliError> {
    if std::env::var_os(SCRIPT_ENV).is_some() {
        let mut context = ShellContext::new(CliMode::Script)?;
        drive(&mut context, &mut ScriptSource::new(io::stdin().lock()))
    } else {
        let mut context = ShellContext::new(CliMode::Interactive)?;
        drive(&mut context, &mut EditorSource::new()?)
    }
}

enum ShellInput {
    Line(String),
    Interrupted,
    Closed,
}

/// Where the shell reads its next command from.
trait LineSource {
    fn read(&mut self, context: &ShellContext) -> Result<ShellInput, CliError>;

    fn record(&mut self, _line: &str) {}
}

/// Runs commands until `exit`, end of input, or a confirmed interrupt.
fn drive(context: &mut ShellContext, source: &mut dyn LineSource) -> Result<(), CliError> {
    while context.running {
        let line = match source.read(context)? {
            ShellInput::Line(line) => line,
            ShellInput::Interrupted => {
                if context.confirm_exit()? {
                    break;
                }
                continue;
            }
            ShellInput::Closed => {
                if context.can_prompt() {
                    output::info("Goodbye.");
                }
                break;
            }
        };

        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        source.record(trimmed);

        match context.execute(trimmed) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err),
        }
    }
    Ok(())
}

struct ScriptSource<R> {
    lines: io::Lines<R>,
}

impl<R: BufRead> ScriptSource<R> {
    fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }
}

impl<R: BufRead> LineSource for ScriptSource<R> {
    fn read(&mut self, _context: &ShellContext) -> Result<ShellInput, CliError> {
        match self.lines.next() {
            Some(line) => Ok(ShellInput::Line(line?)),
            None => Ok(ShellInput::Closed),
        }
    }
}

struct EditorSource {
    editor: Editor<CommandHelper, DefaultHistory>,
}

impl EditorSource {
    fn new() -> Result<Self, CliError> {
        let mut editor = Editor::<CommandHelper, DefaultHistory>::new()?;
        editor.set_helper(Some(CommandHelper::default()));
        editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);
        Ok(Self { editor })
    }
}

impl LineSource for EditorSource {
    fn read(&mut self, context: &ShellContext) -> Result<ShellInput, CliError> {
        // budgets, goals, and the onboarding step change between prompts
        if let Some(helper) = self.editor.helper_mut() {
            helper.model = CompletionModel::snapshot(context);
        }
        match self.editor.readline(&context.prompt()) {
            Ok(line) => Ok(ShellInput::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(ShellInput::Interrupted),
            Err(ReadlineError::Eof) => Ok(ShellInput::Closed),
            Err(err) => Err(err.into()),
        }
    }

    fn record(&mut self, line: &str) {
        self.editor.add_history_entry(line).ok();
    }
}

#[derive(Default)]
struct CommandHelper {
    model: CompletionModel,
}

impl Helper for CommandHelper {}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];
        let start = prefix
            .rfind(char::is_whitespace)
            .map_or(0, |idx| idx + 1);
        let before: Vec<&str> = prefix[..start].split_whitespace().collect();
        let pairs = self
            .model
            .candidates(&before, &prefix[start..])
            .into_iter()
            .map(|candidate| Pair {
                display: candidate.clone(),
                replacement: candidate,
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Hinter for CommandHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &ReadlineContext<'_>) -> Option<String> {
        if pos < line.len() {
            return None;
        }
        self.model.usage_hint(line)
    }
}

impl Highlighter for CommandHelper {
    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(hint.dimmed().to_string())
    }
}

impl Validator for CommandHelper {}
