//! CLI command definitions and argument parsing.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Sitecrawl - Crawl the relevant pages of a site into one clean Markdown report.
#[derive(Debug, Parser)]
#[command(name = "sitecrawl")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "SITECRAWL_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (URLs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Plan a new run for a site and crawl its targets; fails if the site already has a run
    Crawl(CrawlArgs),

    /// Continue an existing run; fails when the run has no state yet
    Resume(ResumeArgs),

    /// Show the targets and progress of a run
    Status(StatusArgs),

    /// Discover candidate URLs and label them without touching any state
    Classify(ClassifyArgs),

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Settings that override the configuration file for one invocation.
#[derive(Debug, Default, Args)]
pub struct RunOverrides {
    /// Ollama model
    #[arg(long, env = "SITECRAWL_MODEL")]
    pub model: Option<String>,

    /// Ollama API endpoint
    #[arg(long, env = "OLLAMA_URL")]
    pub ollama_url: Option<String>,

    /// Directory for the Markdown report
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Directory for run state files
    #[arg(long)]
    pub state_dir: Option<PathBuf>,

    /// Attempts per target before giving up (0 = unbounded)
    #[arg(long)]
    pub max_attempts: Option<u32>,

    /// Pause between targets in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,
}

/// Arguments for the crawl command.
#[derive(Debug, Args)]
pub struct CrawlArgs {
    /// Root URL of the site
    pub url: String,

    /// Markdown report path (default: <output>/<run id>.md)
    #[arg(long)]
    pub report: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: RunOverrides,
}

/// Arguments for the resume command.
#[derive(Debug, Args)]
pub struct ResumeArgs {
    /// Root URL the run was started from
    pub url: String,

    /// Markdown report path (default: <output>/<run id>.md)
    #[arg(long)]
    pub report: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: RunOverrides,
}

/// Arguments for the status command.
#[derive(Debug, Args)]
pub struct StatusArgs {
    /// Root URL the run was started from
    pub url: String,

    /// Directory for run state files
    #[arg(long)]
    pub state_dir: Option<PathBuf>,
}

/// Arguments for the classify command.
#[derive(Debug, Args)]
pub struct ClassifyArgs {
    /// Root URL of the site
    pub url: String,

    /// Use these keywords instead of asking the LLM (repeatable)
    #[arg(short, long = "keyword")]
    pub keywords: Vec<String>,

    /// Match keywords ignoring case
    #[arg(short = 'i', long)]
    pub ignore_case: bool,

    #[command(flatten)]
    pub overrides: RunOverrides,
}

/// Arguments for configuration management.
#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration management actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the configuration file path
    Path,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
