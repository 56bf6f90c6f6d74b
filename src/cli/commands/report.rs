use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::currency::format_percent;

use super::CommandDefinition;

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "summary",
            "Totals, spending by category and reserve share for the selected month",
            "summary",
            cmd_summary,
        ),
        CommandDefinition::new(
            "compare",
            "Income and expenses over the six months ending at the selected month",
            "compare",
            cmd_compare,
        ),
    ]
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let report = context.session.report()?;
    let money = context.money();

    output_section(format!("Summary: {}", report.month.long_label()));
    io::print_info(format!("  Balance   : {}", money.amount(report.totals.net)));
    io::print_info(format!("  Income    : {}", money.amount(report.totals.income)));
    io::print_info(format!("  Expenses  : {}", money.amount(report.totals.expense)));
    io::print_info(format!(
        "  Reserve   : {} of {} invested",
        format_percent(report.reserve_percent, 1),
        money.amount(report.investment_total)
    ));

    output_section("Spending by category");
    if report.categories.is_empty() {
        io::print_info("  No expenses this month.");
    }
    for entry in &report.categories {
        io::print_info(format!("  {:<13} {}", entry.category, money.amount(entry.value)));
    }

    let over: Vec<_> = report
        .goals
        .iter()
        .filter(|progress| progress.is_over_limit())
        .collect();
    for progress in over {
        io::print_warning(format!(
            "Goal exceeded: {} at {}",
            progress.goal.category,
            format_percent(progress.percent, 1)
        ));
    }
    Ok(())
}

fn cmd_compare(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let report = context.session.report()?;
    let money = context.money();
    output_section("Last six months");
    for entry in &report.comparative {
        io::print_info(format!(
            "  {} {}  in {:>14}  out {:>14}",
            entry.label,
            entry.month.year(),
            money.amount(entry.income),
            money.amount(entry.expense)
        ));
    }
    Ok(())
}
