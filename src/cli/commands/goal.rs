use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::core::services::{parse_amount, GoalStatus};
use crate::currency::format_percent;
use crate::ledger::{resolve_category, GoalDraft, TransactionKind, EXPENSE_CATEGORIES};

use super::{usage_error, CommandDefinition};

const GOAL_USAGE: &str = "goal <expense category> <monthly limit>";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "goal",
            "Set a monthly spending limit for a category",
            GOAL_USAGE,
            cmd_goal,
        ),
        CommandDefinition::new(
            "goals",
            "Show goal usage for the selected month",
            "goals",
            cmd_goals,
        ),
    ]
}

fn cmd_goal(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [category, limit] = args else {
        return Err(usage_error(GOAL_USAGE));
    };
    let category = resolve_category(TransactionKind::Expense, category).ok_or_else(|| {
        CommandError::InvalidArguments(format!(
            "unknown expense category `{}` (choose one of: {})",
            category,
            EXPENSE_CATEGORIES.join(", ")
        ))
    })?;
    let limit = parse_amount(limit)?;
    context.session.add_goal(GoalDraft {
        category: category.to_string(),
        limit,
    })?;
    io::print_success(format!(
        "Goal set: {} up to {} per month.",
        category,
        context.money().amount(limit)
    ));
    Ok(())
}

fn cmd_goals(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let report = context.session.report()?;
    output_section(format!("Goals: {}", report.month.long_label()));
    if report.goals.is_empty() {
        io::print_info("No goals yet. Use `goal <category> <limit>`.");
        return Ok(());
    }
    let money = context.money();
    for progress in &report.goals {
        let line = format!(
            "  {:<13} {} {} / {}  {} used",
            progress.goal.category,
            progress_bar(progress.display_percent()),
            money.amount(progress.spent),
            money.amount(progress.goal.limit),
            format_percent(progress.percent, 1)
        );
        match progress.status {
            GoalStatus::Ok => io::print_info(line),
            GoalStatus::Warning => io::print_warning(line),
            GoalStatus::Over => io::print_error(format!("{}  over the limit", line.trim_start())),
        }
    }
    Ok(())
}

const BAR_WIDTH: usize = 10;

fn progress_bar(percent: f64) -> String {
    let filled = ((percent / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}
