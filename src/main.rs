use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod auth;
mod backend;
mod cli;
mod config;
mod error;
mod model;
mod notify;
mod screens;
mod selection;
mod session;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing - only show logs with --verbose
    let filter = if cli.verbose {
        EnvFilter::new("appraise=debug")
    } else {
        EnvFilter::new("appraise=warn")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    if let Commands::Schema = cli.command {
        return cli::schema::execute();
    }

    let config = cli::load_config(&cli.config)?;
    match cli.command {
        Commands::Campaigns(args) => cli::campaigns::execute(args, config).await,
        Commands::Wizard(args) => cli::wizard::execute(args, config).await,
        Commands::Factors(args) => cli::factors::execute(args, config).await,
        Commands::Grades(args) => cli::grades::execute(args, config).await,
        Commands::Targets(args) => cli::targets::execute(args, config).await,
        Commands::Login(args) => cli::login::execute(args, config),
        Commands::Logout => cli::login::logout(config),
        Commands::Schema => cli::schema::execute(),
    }
}
