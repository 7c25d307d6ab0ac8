use clap::Parser;

mod cli;

use cli::commands::{self, Context};
use cli::{Cli, Commands};
use invoice_desk_core::notice::{Level, Notice};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{reload, EnvFilter};

const DEFAULT_LOG_LEVEL: &str = "info";

fn log_filter(level: &str) -> anyhow::Result<EnvFilter> {
    Ok(EnvFilter::from_default_env()
        .add_directive(format!("invoice_desk={}", level).parse()?)
        .add_directive(format!("invoice_desk_core={}", level).parse()?))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging before anything can emit events; the configured
    // level is applied once the config is loaded
    let (filter, filter_handle) = reload::Layer::new(log_filter(DEFAULT_LOG_LEVEL)?);
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let loaded = invoice_desk_core::config::load_config(cli.config.clone())?;
    filter_handle.reload(log_filter(&loaded.config.logging.level)?)?;

    let ctx = Context::new(loaded)?;
    if let Some(reason) = &ctx.skipped_local {
        commands::render_notice(&Notice::new(
            format!("Ignored ./config.toml ({}); using {}", reason, ctx.config_source),
            Level::Warning,
        ));
    }

    let result = match cli.command {
        Commands::Login { email, password } => commands::auth::login(&ctx, &email, &password).await,
        Commands::Register {
            company_name,
            email,
            password,
        } => commands::auth::register(&ctx, &company_name, &email, &password).await,
        Commands::Logout => commands::auth::logout(&ctx),
        Commands::Whoami => commands::auth::whoami(&ctx),
        Commands::Invoices { command } => commands::invoices::run(&ctx, command).await,
        Commands::User { command } => commands::user::run(&ctx, command).await,
        Commands::Billing { command } => commands::billing::run(&ctx, command).await,
        Commands::Payments { command } => commands::payments::run(&ctx, command).await,
        Commands::Convert { amount, from, to } => commands::convert::run(&ctx, amount, &from, &to).await,
        Commands::Status => commands::status::run(&ctx),
    };

    if let Err(e) = result {
        commands::render_notice(&Notice::error(e.to_string()));
        std::process::exit(1);
    }

    Ok(())
}
