//! Purpose: Hold top-level CLI command dispatch for `file-client`.
//! Exports: `dispatch_command`.
//! Role: Keep `main.rs` focused on parse/bootstrap and delegate command execution.
//! Invariants: Each invocation connects one backend and makes exactly one backend call.

use super::*;
use clap::CommandFactory;
use file_client::api::{Backend, connect};

pub(super) fn dispatch_command(
    command: Command,
    config: &ClientConfig,
) -> Result<RunOutcome, Error> {
    match command {
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::aot::generate(shell, &mut cmd, "file-client", &mut io::stdout());
            Ok(RunOutcome::ok())
        }
        Command::Read { id } => {
            let backend = connect(config)?;
            backend.read_and_emit(&id)?;
            Ok(RunOutcome::ok())
        }
        Command::Stat { id } => {
            let backend = connect(config)?;
            backend.stat_and_emit(&id)?;
            Ok(RunOutcome::ok())
        }
    }
}
