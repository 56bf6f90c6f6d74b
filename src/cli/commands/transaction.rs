use chrono::NaiveDate;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::core::services::parse_amount;
use crate::ledger::{categories_for, resolve_category, TransactionDraft, TransactionKind};

use super::{parse_month, usage_error, CommandDefinition};

const ADD_USAGE: &str = "add <income|expense> <value> <category> <description> [YYYY-MM-DD]";
const MONTH_USAGE: &str = "month [prev|next|YYYY-MM]";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "month",
            "Show or change the selected month",
            MONTH_USAGE,
            cmd_month,
        ),
        CommandDefinition::new("add", "Record an income or expense", ADD_USAGE, cmd_add),
        CommandDefinition::new(
            "list",
            "List transactions of the selected month",
            "list",
            cmd_list,
        ),
        CommandDefinition::new(
            "copy-previous",
            "Copy last month's transactions into the selected month",
            "copy-previous",
            cmd_copy_previous,
        ),
    ]
}

fn cmd_month(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first().map(|arg| arg.to_lowercase()).as_deref() {
        None => {}
        Some("prev") | Some("previous") => {
            context.session.previous_month();
        }
        Some("next") => {
            context.session.next_month();
        }
        Some(raw) => context.session.select_month(parse_month(raw)?),
    }
    let month = context.session.selected_month();
    io::print_info(format!("Selected month: {} ({})", month.long_label(), month));
    Ok(())
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() < 4 {
        return Err(usage_error(ADD_USAGE));
    }
    let kind = TransactionKind::parse(args[0]).ok_or_else(|| usage_error(ADD_USAGE))?;
    let value = parse_amount(args[1])?;
    let category = resolve_category(kind, args[2]).ok_or_else(|| {
        CommandError::InvalidArguments(format!(
            "unknown {} category `{}` (choose one of: {})",
            kind,
            args[2],
            categories_for(kind).join(", ")
        ))
    })?;

    let mut rest = &args[3..];
    let mut date = context.session.today();
    if rest.len() > 1 {
        if let Some(parsed) = rest.last().and_then(|raw| parse_date(raw)) {
            date = parsed;
            rest = &rest[..rest.len() - 1];
        }
    }
    let description = rest.join(" ");

    let money = context.money().clone();
    let added = context.session.add_transaction(TransactionDraft {
        kind,
        date,
        value,
        description,
        category: category.to_string(),
    })?;
    io::print_success(format!(
        "Recorded {} {} on {} ({}).",
        kind,
        money.amount(added.value),
        added.date,
        added.category
    ));
    Ok(())
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let transactions = context.session.month_transactions()?;
    let month = context.session.selected_month();
    output_section(format!("Transactions: {}", month.long_label()));
    if transactions.is_empty() {
        io::print_info("No transactions this month.");
        return Ok(());
    }
    let money = context.money();
    for txn in &transactions {
        io::print_info(format!(
            "  {}  {:<14}  {:<13}  {}",
            txn.date,
            money.signed(txn.kind.sign(), txn.value),
            txn.category,
            txn.description
        ));
    }
    Ok(())
}

fn cmd_copy_previous(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let copied = context.session.copy_previous_month()?;
    let month = context.session.selected_month();
    if copied == 0 {
        io::print_warning(format!(
            "Nothing to copy from {}.",
            month.previous().long_label()
        ));
    } else {
        io::print_success(format!(
            "Copied {} transaction(s) from {} into {}.",
            copied,
            month.previous().long_label(),
            month.long_label()
        ));
    }
    Ok(())
}

fn parse_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d").ok()
}
