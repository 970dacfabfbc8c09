use calendar_resource::{CmdCtx, CommandHandler, UpdateResourceArgs, UpdateResourceCommand, config};
use clap::{Args, FromArgMatches};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

// cargo run -- room-42 3 "Main Hall" hall@example.org room --contact-person-user-id alice

/// Process level options, added on top of the command's own arguments
#[derive(Debug, Args)]
struct GlobalArgs {
    /// Override database URL (if omitted, use env/config)
    #[arg(long)]
    database_url: Option<String>,

    /// Read configuration from this TOML file instead of the environment
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let matches = GlobalArgs::augment_args(UpdateResourceCommand::configure())
        .version(env!("CARGO_PKG_VERSION"))
        .get_matches();
    let global = GlobalArgs::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());
    let args = UpdateResourceArgs::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let cfg = match &global.config {
        Some(path) => config::Config::load(path)?,
        None => config::Config::from_env()?,
    };

    init_tracing(&cfg.log_level)?;

    // allow overriding the DSN from CLI
    let database_url = global.database_url.as_deref().unwrap_or(&cfg.database_url);

    let ctx = CmdCtx::default();
    let status = UpdateResourceCommand::connect_and_execute(&ctx, database_url, args).await;

    let color = std::io::stdout().is_terminal();
    ctx.output
        .flush_to(&mut std::io::stdout().lock(), &mut std::io::stderr().lock(), color)?;

    Ok(status.into())
}

fn init_tracing(log_level: &str) -> anyhow::Result<()> {
    use tracing_subscriber::{EnvFilter, prelude::*};

    color_eyre::install().map_err(|e| anyhow::anyhow!(e))?;

    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(log_level))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_timer(tracing_subscriber::fmt::time::uptime()),
        )
        .with(tracing_error::ErrorLayer::default())
        .init();

    Ok(())
}
