use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::core::services::SummaryService;
use crate::currency::format_percent;
use crate::ledger::InvestmentBucket;

use super::{usage_error, CommandDefinition};

const INVEST_USAGE: &str =
    "invest <reserve|fixed_income|equities|crypto|vehicles> <amount>";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "invest",
            "Set the balance of an investment bucket",
            INVEST_USAGE,
            cmd_invest,
        ),
        CommandDefinition::new(
            "investments",
            "Show investment balances and the reserve share",
            "investments",
            cmd_investments,
        ),
    ]
}

fn cmd_invest(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [bucket, amount] = args else {
        return Err(usage_error(INVEST_USAGE));
    };
    let bucket = InvestmentBucket::parse(bucket).ok_or_else(|| {
        CommandError::InvalidArguments(format!("unknown investment bucket `{}`", bucket))
    })?;
    let stored = context.session.set_investment_text(bucket, amount)?;
    io::print_success(format!(
        "{} set to {}.",
        bucket.label(),
        context.money().amount(stored)
    ));
    Ok(())
}

fn cmd_investments(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let investments = context.session.snapshot()?.investments;
    let money = context.money();
    output_section("Investments");
    for (bucket, balance) in investments.entries() {
        io::print_info(format!("  {:<24} {}", bucket.label(), money.amount(balance)));
    }
    io::print_info(format!("  {:<24} {}", "Total", money.amount(investments.total())));
    io::print_info(format!(
        "  Reserve share: {}",
        format_percent(SummaryService::reserve_percent(&investments), 1)
    ));
    Ok(())
}
