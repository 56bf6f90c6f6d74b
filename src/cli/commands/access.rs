use crate::cli::core::{CliMode, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::core::UnlockOutcome;

use super::CommandDefinition;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "unlock",
            "Enter the PIN (the first PIN entered becomes the PIN)",
            "unlock [pin]",
            cmd_unlock,
        ),
        CommandDefinition::new("lock", "Hide everything until the PIN is entered", "lock", cmd_lock),
    ]
}

fn cmd_unlock(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if context.session.is_unlocked() {
        io::print_info("Already unlocked.");
        return Ok(());
    }
    let pin = match args.first() {
        Some(pin) => pin.to_string(),
        None if context.mode() == CliMode::Interactive => {
            let prompt = if context.session.has_pin() {
                "PIN"
            } else {
                "Choose a PIN"
            };
            io::prompt_pin(&context.theme, prompt)?
        }
        None => {
            return Err(CommandError::InvalidArguments(
                "a PIN is required in script mode".into(),
            ))
        }
    };

    match context.session.unlock(&pin)? {
        UnlockOutcome::Created(_) => io::print_success("PIN created. Session unlocked."),
        UnlockOutcome::Verified => io::print_success("Session unlocked."),
    }
    Ok(())
}

fn cmd_lock(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.session.lock();
    io::print_success("Session locked.");
    Ok(())
}
