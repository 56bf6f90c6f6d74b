use std::path::PathBuf;

use tracing::info;

use crate::cli::core::{CliMode, CommandResult, ShellContext};
use crate::cli::io;
use crate::errors::FinanceError;
use crate::storage::json_backend::{backup_file_name, read_backup_file, write_backup_file};

use super::{usage_error, CommandDefinition};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "backup",
            "Export all data to a JSON file",
            "backup [path]",
            cmd_backup,
        ),
        CommandDefinition::new(
            "restore",
            "Replace all data with the contents of a backup file",
            "restore <path>",
            cmd_restore,
        ),
    ]
}

fn cmd_backup(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let document = context.session.export_backup()?;
    let path = match args.first() {
        Some(raw) => PathBuf::from(raw),
        None => context
            .backup_dir()
            .join(backup_file_name(context.session.today())),
    };
    write_backup_file(&path, &document)?;
    info!(path = %path.display(), "backup exported");
    io::print_success(format!("Backup written to {}", path.display()));
    Ok(())
}

fn cmd_restore(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(raw) = args.first() else {
        return Err(usage_error("restore <path>"));
    };
    if !context.session.is_unlocked() {
        return Err(FinanceError::Locked.into());
    }
    let path = PathBuf::from(raw);
    let bytes = read_backup_file(&path)?;

    if context.mode() == CliMode::Interactive
        && !io::confirm_action(
            &context.theme,
            "Replace all current data with this backup?",
            false,
        )?
    {
        io::print_info("Restore cancelled.");
        return Ok(());
    }

    let restored = context.session.restore_backup(&bytes)?;
    io::print_success(format!(
        "Restored {} transaction(s) and {} goal(s) from {}.",
        restored.transaction_count(),
        restored.goals.len(),
        path.display()
    ));
    Ok(())
}
