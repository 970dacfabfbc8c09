use crate::commands::output::Output;
use crate::db::error::DbError;
use async_trait::async_trait;
use std::process::ExitCode;
use thiserror::Error;

pub mod output;
mod resource_update;

pub use resource_update::{UpdateResourceArgs, UpdateResourceCommand};

pub type CommandResult<T> = Result<T, CommandError>;

/// An administrative command. `configure` describes the command line surface, `execute` runs the
/// command against already parsed input and never fails: problems end up in the output and the
/// returned status.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    type Input: clap::Args + Send + 'static;

    /// Full command name (e.g. "calendar-resource:resource:update")
    const NAME: &'static str;
    /// One line description shown in the help output
    const ABOUT: &'static str;

    fn configure() -> clap::Command
    where
        Self: Sized,
    {
        <Self::Input as clap::Args>::augment_args(clap::Command::new(Self::NAME).about(Self::ABOUT))
    }

    async fn execute(&self, ctx: &CmdCtx, input: Self::Input) -> CommandStatus;
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Db(#[from] DbError),
}

/// Outcome of a command, mapped onto the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    Success,
    Failure,
}

impl CommandStatus {
    pub fn code(self) -> u8 {
        match self {
            CommandStatus::Success => 0,
            CommandStatus::Failure => 1,
        }
    }
}

impl From<CommandStatus> for ExitCode {
    fn from(status: CommandStatus) -> Self {
        ExitCode::from(status.code())
    }
}

/// Command context passed to command handlers
#[derive(Default)]
pub struct CmdCtx {
    /// Output system
    pub output: Output,
}

impl CmdCtx {
    pub fn new(output: Output) -> Self {
        Self { output }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(CommandStatus::Success.code(), 0);
        assert_eq!(CommandStatus::Failure.code(), 1);
    }
}
