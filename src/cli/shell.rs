use std::io::{self, BufRead};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::Validator,
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};

use crate::cli::core::{CliError, CliMode, CommandError, LoopControl, ShellContext};
use crate::cli::output::info as output_info;
use crate::ledger::{categories_for, InvestmentBucket, TransactionKind, EXPENSE_CATEGORIES};

/// Set to any value to read commands from stdin without a line editor.
pub const SCRIPT_ENV: &str = "FINANCAS_CLI_SCRIPT";

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;
    match mode {
        CliMode::Interactive => {
            output_info("Financas shell. Type `unlock` to begin or `help` for commands.");
            run_interactive(&mut context)
        }
        CliMode::Script => run_script(&mut context),
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = Editor::<ArgumentHelper, DefaultHistory>::new()?;
    editor.set_helper(Some(ArgumentHelper::new(context.command_usages())));
    editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);

    while context.running {
        // Rebuilt every turn: it shows the lock state and the selected month.
        let prompt = context.prompt();
        match editor.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                editor.add_history_entry(trimmed).ok();
                if step(context, trimmed)? == LoopControl::Exit {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                if context.confirm_exit()? {
                    break;
                }
            }
            Err(ReadlineError::Eof) => {
                output_info("Exiting shell.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

fn run_script(context: &mut ShellContext) -> Result<(), CliError> {
    for line in io::stdin().lock().lines() {
        if !context.running || step(context, &line?)? == LoopControl::Exit {
            break;
        }
    }
    Ok(())
}

/// Runs one line; command failures are reported and the shell keeps going.
fn step(context: &mut ShellContext, line: &str) -> Result<LoopControl, CliError> {
    match handle_line(context, line) {
        Ok(control) => Ok(control),
        Err(err) => {
            context.report_error(err)?;
            Ok(LoopControl::Continue)
        }
    }
}

pub(crate) fn handle_line(
    context: &mut ShellContext,
    line: &str,
) -> Result<LoopControl, CommandError> {
    let tokens = match shell_words::split(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            context.print_warning(&format!("Could not parse `{}`: {}", line.trim(), err));
            return Ok(LoopControl::Continue);
        }
    };
    let Some((raw, rest)) = tokens.split_first() else {
        return Ok(LoopControl::Continue);
    };

    let args: Vec<&str> = rest.iter().map(String::as_str).collect();
    let control = context.dispatch(&raw.to_lowercase(), raw, &args)?;
    if control == LoopControl::Exit {
        context.running = false;
    }
    Ok(control)
}

/// Completes command names and, per command, the argument vocabulary the
/// handlers accept: transaction kinds, catalog categories, bucket keys and
/// month steps. Typing a command and a space hints its usage line.
struct ArgumentHelper {
    commands: Vec<(&'static str, &'static str)>,
}

impl ArgumentHelper {
    fn new(mut commands: Vec<(&'static str, &'static str)>) -> Self {
        commands.sort_by_key(|(name, _)| *name);
        Self { commands }
    }

    /// Returns where the word under the cursor starts and its candidates.
    fn candidates(&self, prefix: &str) -> (usize, Vec<String>) {
        let words: Vec<&str> = prefix.split_whitespace().collect();
        let (current, position) = if prefix.is_empty() || prefix.ends_with(char::is_whitespace) {
            ("", words.len())
        } else {
            (words[words.len() - 1], words.len() - 1)
        };
        let start = prefix.len() - current.len();

        let vocabulary: Vec<&str> = match position {
            0 => self.commands.iter().map(|(name, _)| *name).collect(),
            _ => argument_words(&words, position, &self.commands),
        };
        let needle = current.to_lowercase();
        let matches = vocabulary
            .into_iter()
            .filter(|word| word.to_lowercase().starts_with(&needle))
            .map(str::to_string)
            .collect();
        (start, matches)
    }

    fn usage_hint(&self, line: &str) -> Option<String> {
        let name = line.strip_suffix(' ')?.trim_start();
        if name.contains(char::is_whitespace) {
            return None;
        }
        let (_, usage) = self
            .commands
            .iter()
            .find(|(command, _)| command.eq_ignore_ascii_case(name))?;
        usage
            .split_once(' ')
            .map(|(_, arguments)| arguments.to_string())
    }
}

fn argument_words(
    words: &[&str],
    position: usize,
    commands: &[(&'static str, &'static str)],
) -> Vec<&'static str> {
    let command = words[0].to_lowercase();
    match (command.as_str(), position) {
        ("month", 1) => vec!["prev", "next"],
        ("add", 1) | ("categories", 1) => vec!["income", "expense"],
        ("add", 3) => match TransactionKind::parse(words[1]) {
            Some(kind) => categories_for(kind).to_vec(),
            None => Vec::new(),
        },
        ("goal", 1) => EXPENSE_CATEGORIES.to_vec(),
        ("invest", 1) => InvestmentBucket::ALL.iter().map(|bucket| bucket.key()).collect(),
        ("balance", 1) => vec!["show", "hide"],
        ("help", 1) => commands.iter().map(|(name, _)| *name).collect(),
        _ => Vec::new(),
    }
}

impl Helper for ArgumentHelper {}

impl Completer for ArgumentHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, words) = self.candidates(&line[..pos]);
        let pairs = words
            .into_iter()
            .map(|word| Pair {
                display: word.clone(),
                replacement: format!("{word} "),
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Hinter for ArgumentHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &ReadlineContext<'_>) -> Option<String> {
        if pos < line.len() {
            return None;
        }
        self.usage_hint(line)
    }
}

impl Highlighter for ArgumentHelper {}

impl Validator for ArgumentHelper {}
