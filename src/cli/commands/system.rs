use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::help;
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::ledger::{categories_for, TransactionKind};

use super::{usage_error, CommandDefinition};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "categories",
            "List the categories offered for each transaction type",
            "categories [income|expense]",
            cmd_categories,
        ),
        CommandDefinition::new(
            "balance",
            "Show or hide amounts",
            "balance [show|hide]",
            cmd_balance,
        ),
        CommandDefinition::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandDefinition::new("exit", "Exit the shell", "exit", cmd_exit),
    ]
}

fn cmd_categories(_context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let kinds = match args.first() {
        Some(raw) => vec![TransactionKind::parse(raw)
            .ok_or_else(|| usage_error("categories [income|expense]"))?],
        None => vec![TransactionKind::Income, TransactionKind::Expense],
    };
    for kind in kinds {
        output_section(format!("Categories ({})", kind));
        for name in categories_for(kind) {
            io::print_info(format!("  {}", name));
        }
    }
    Ok(())
}

fn cmd_balance(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let visible = match args.first().map(|arg| arg.to_lowercase()) {
        None => !context.money().is_visible(),
        Some(arg) if arg == "show" => true,
        Some(arg) if arg == "hide" => false,
        Some(_) => return Err(usage_error("balance [show|hide]")),
    };
    context.set_balance_visible(visible)?;
    if visible {
        io::print_success("Amounts visible.");
    } else {
        io::print_success("Amounts hidden.");
    }
    Ok(())
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(command) = args.first().map(|name| name.to_lowercase()) {
        if let Some(command) = context.command(&command) {
            help::print_command(command);
        } else {
            context.suggest_command(args[0]);
        }
        return Ok(());
    }

    help::print_overview(&context.registry);
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
