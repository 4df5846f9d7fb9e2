//! Status command implementation.

use super::run_context;
use crate::cli::StatusArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use sitecrawl_store::ProgressTracker;

/// Execute the status command.
pub async fn execute_status(args: StatusArgs, config: &mut Config, formatter: &Formatter) -> Result<()> {
    if let Some(state_dir) = args.state_dir {
        config.storage.state_dir = state_dir;
    }

    let ctx = run_context(config, &args.url);
    let tracker = ProgressTracker::load(&ctx)?.with_max_attempts(config.crawl.attempt_limit());

    println!(
        "{}",
        formatter.format_status(ctx.run_id.as_str(), tracker.targets(), &tracker.summary())?
    );
    Ok(())
}
