//! Crawl and resume command implementations.

use super::{build_orchestrator, run_context};
use crate::cli::{CrawlArgs, ResumeArgs};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use sitecrawl_domain::RunContext;
use sitecrawl_store::{InitMode, TrackerError};
use std::path::PathBuf;
use tracing::debug;

/// Execute the crawl command.
///
/// Always starts a new run; existing state for the site is an error.
pub async fn execute_crawl(args: CrawlArgs, config: &mut Config, formatter: &Formatter) -> Result<()> {
    config.apply(&args.overrides);
    let ctx = context(config, &args.url, args.report);
    ensure_new_run(&ctx)?;

    drive(&ctx, InitMode::Fresh, config, formatter).await
}

/// Execute the resume command.
pub async fn execute_resume(args: ResumeArgs, config: &mut Config, formatter: &Formatter) -> Result<()> {
    config.apply(&args.overrides);
    let ctx = context(config, &args.url, args.report);
    ensure_existing_run(&ctx)?;

    drive(&ctx, InitMode::Resume, config, formatter).await
}

fn context(config: &Config, url: &str, report: Option<PathBuf>) -> RunContext {
    let ctx = run_context(config, url);
    match report {
        Some(path) => ctx.with_report_path(path),
        None => ctx,
    }
}

fn ensure_new_run(ctx: &RunContext) -> Result<()> {
    if ctx.state_path.exists() {
        return Err(CliError::InvalidInput(format!(
            "a run for {} already exists at {}; use `sitecrawl resume {}` to continue it",
            ctx.root_url,
            ctx.state_path.display(),
            ctx.root_url
        )));
    }
    Ok(())
}

fn ensure_existing_run(ctx: &RunContext) -> Result<()> {
    if !ctx.state_path.exists() {
        return Err(TrackerError::NotFound(ctx.state_path.display().to_string()).into());
    }
    Ok(())
}

async fn drive(ctx: &RunContext, mode: InitMode, config: &Config, formatter: &Formatter) -> Result<()> {
    debug!(
        "Run {} for {}: state {}, model {}",
        ctx.run_id,
        ctx.root_url,
        ctx.state_path.display(),
        config.llm.model
    );
    let orchestrator = build_orchestrator(config)?;
    let report = orchestrator.run(ctx, mode).await?;

    println!("{}", formatter.format_run(&report)?);

    if !formatter.is_quiet() {
        println!(
            "{}",
            formatter.success(&format!("Report written to {}", ctx.report_path.display()))
        );
        if report.progress.remaining() > 0 {
            println!(
                "{}",
                formatter.warning(&format!(
                    "{} targets left; run `sitecrawl resume {}` to retry them",
                    report.progress.remaining(),
                    ctx.root_url
                ))
            );
        }
    }

    Ok(())
}
