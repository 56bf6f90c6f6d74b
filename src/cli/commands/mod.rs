use std::collections::HashMap;

pub mod access;
pub mod backup;
pub mod goal;
pub mod investment;
pub mod report;
pub mod system;
pub mod transaction;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::ledger::MonthKey;

pub(crate) fn all_definitions() -> Vec<CommandDefinition> {
    let mut commands = Vec::new();
    commands.extend(access::definitions());
    commands.extend(transaction::definitions());
    commands.extend(report::definitions());
    commands.extend(goal::definitions());
    commands.extend(investment::definitions());
    commands.extend(backup::definitions());
    commands.extend(system::definitions());
    commands
}

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

#[derive(Clone)]
pub struct CommandDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandDefinition {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            handler,
        }
    }
}

pub struct CommandRegistry {
    commands: HashMap<&'static str, CommandDefinition>,
    order: Vec<&'static str>,
}

impl CommandRegistry {
    pub fn new(definitions: Vec<CommandDefinition>) -> Self {
        let mut commands = HashMap::new();
        let mut order = Vec::new();
        for definition in definitions {
            order.push(definition.name);
            commands.insert(definition.name, definition);
        }
        Self { commands, order }
    }

    pub fn get(&self, name: &str) -> Option<&CommandDefinition> {
        self.commands.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandDefinition> {
        self.order
            .iter()
            .filter_map(move |name| self.commands.get(name))
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.order.iter().copied()
    }
}

pub(crate) fn parse_month(input: &str) -> Result<MonthKey, CommandError> {
    input.parse::<MonthKey>().map_err(|_| {
        CommandError::InvalidArguments(format!("invalid month `{}` (use YYYY-MM)", input))
    })
}

pub(crate) fn usage_error(usage: &str) -> CommandError {
    CommandError::InvalidArguments(format!("usage: {}", usage))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_command_is_registered_once() {
        let registry = CommandRegistry::new(all_definitions());
        let mut names: Vec<_> = registry.names().collect();
        let total = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), total);
        for expected in [
            "unlock",
            "lock",
            "month",
            "add",
            "list",
            "summary",
            "compare",
            "goal",
            "goals",
            "invest",
            "investments",
            "copy-previous",
            "backup",
            "restore",
            "categories",
            "balance",
            "help",
            "exit",
        ] {
            assert!(registry.get(expected).is_some(), "missing `{expected}`");
        }
    }
}
