//! Classify command implementation.

use super::build_orchestrator;
use crate::cli::ClassifyArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use sitecrawl_domain::traits::UrlSource;
use sitecrawl_domain::Classifier;
use sitecrawl_fetch::HttpFetcher;
use sitecrawl_orchestrator::Discovery;

/// Execute the classify command.
///
/// Keywords given on the command line skip the root page fetch and the LLM.
pub async fn execute_classify(args: ClassifyArgs, config: &mut Config, formatter: &Formatter) -> Result<()> {
    config.apply(&args.overrides);
    config.crawl.case_insensitive |= args.ignore_case;

    let discovery = if args.keywords.is_empty() {
        build_orchestrator(config)?.discover(&args.url).await?
    } else {
        let fetcher = HttpFetcher::new(config.fetch.clone())?;
        let candidates = fetcher.candidate_urls(&args.url).await?;
        classify_with(candidates, args.keywords, config.crawl.case_insensitive)
    };

    println!("{}", formatter.format_discovery(&discovery)?);
    Ok(())
}

fn classify_with(candidates: Vec<String>, keywords: Vec<String>, case_insensitive: bool) -> Discovery {
    let classifier = Classifier::new(keywords).case_insensitive(case_insensitive);
    let targets = classifier.partition(&candidates);

    Discovery {
        candidates,
        keywords: classifier.keywords().to_vec(),
        targets,
    }
}
