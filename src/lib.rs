pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod models;

// Convenient re-exports (so call sites can do `calendar_resource::UpdateResourceCommand`, etc.)
pub use commands::{CmdCtx, CommandHandler, CommandStatus, UpdateResourceArgs, UpdateResourceCommand};
