//! CLI entry point - the composition root.
//!
//! Loads `.env`, parses arguments, installs the tracing subscriber, then
//! layers settings and dispatches to a handler. The handler's return
//! value is the process exit code.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use capaudit_cli::error::exit_code_for;
use capaudit_cli::{Cli, CliConfig, Commands, bootstrap, handlers};

/// Log to stderr so stdout stays machine-readable. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    let config = CliConfig::load(cli.config.as_deref(), &cli.overrides())?;
    let ctx = bootstrap(config);

    match cli.command {
        Commands::Run { json, .. } => handlers::run::execute(&ctx, json).await,
        Commands::List => handlers::list::execute(&ctx),
        Commands::Platform => handlers::platform::execute(&ctx),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables before parsing so clap `env` sees them
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let code = match dispatch(cli).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            exit_code_for(&err)
        }
    };
    ExitCode::from(u8::try_from(code).unwrap_or(70))
}
