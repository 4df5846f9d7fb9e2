//! Sitecrawl CLI - Crawl the relevant pages of a site into one Markdown report.

use clap::Parser;
use sitecrawl_cli::commands;
use sitecrawl_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Logs on stderr; stdout carries command output
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> sitecrawl_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    let mut config = Config::load_from(cli.config.as_deref())?;

    // Determine output format
    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    // Create formatter
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Crawl(args) => commands::execute_crawl(args, &mut config, &formatter).await?,
        Command::Resume(args) => commands::execute_resume(args, &mut config, &formatter).await?,
        Command::Status(args) => commands::execute_status(args, &mut config, &formatter).await?,
        Command::Classify(args) => commands::execute_classify(args, &mut config, &formatter).await?,
        Command::Config(args) => {
            commands::execute_config(args, &config, cli.config.as_deref(), format, &formatter).await?
        }
    }

    Ok(())
}
