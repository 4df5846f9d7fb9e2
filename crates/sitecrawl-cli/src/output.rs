//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use serde::Serialize;
use sitecrawl_domain::{CrawlTarget, TargetStatus};
use sitecrawl_orchestrator::{Discovery, RunReport};
use sitecrawl_store::ProgressSummary;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

#[derive(Serialize)]
struct StatusView<'a> {
    run_id: &'a str,
    summary: ProgressSummary,
    targets: &'a [CrawlTarget],
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format the targets and progress of a run.
    pub fn format_status(&self, run_id: &str, targets: &[CrawlTarget], summary: &ProgressSummary) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&StatusView {
                run_id,
                summary: *summary,
                targets,
            })?),
            OutputFormat::Table => Ok(self.format_status_table(targets, summary)),
            // Quiet lists what is left to do
            OutputFormat::Quiet => Ok(targets
                .iter()
                .filter(|t| t.status != TargetStatus::Success)
                .map(|t| t.url.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    fn format_status_table(&self, targets: &[CrawlTarget], summary: &ProgressSummary) -> String {
        if targets.is_empty() {
            return self.colorize("No targets in this run.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["URL", "Status", "Attempts", "Error"]);

        for target in targets {
            builder.push_record([
                target.url.clone(),
                self.status_label(target.status),
                target.attempts.to_string(),
                target.error.clone().unwrap_or_default(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        format!("{}\n{}", table, self.progress_line(summary))
    }

    /// Format the outcome of a crawl invocation.
    pub fn format_run(&self, report: &RunReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            OutputFormat::Table => {
                let pass = &report.pass;
                let mut lines = vec![
                    self.info(&format!("Run {}", report.run_id)),
                    format!(
                        "Attempted {}, succeeded {}, failed {}, skipped {} in {}ms",
                        pass.attempted,
                        pass.succeeded,
                        pass.failed(),
                        pass.exhausted,
                        pass.elapsed_ms
                    ),
                ];
                for failure in &pass.failures {
                    lines.push(self.error(&format!("{}: {}", failure.url, failure.error)));
                }
                lines.push(self.progress_line(&report.progress));
                Ok(lines.join("\n"))
            }
            OutputFormat::Quiet => Ok(pass_failures(report)),
        }
    }

    /// Format discovered candidates and their labels.
    pub fn format_discovery(&self, discovery: &Discovery) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(discovery)?),
            OutputFormat::Table => {
                if discovery.candidates.is_empty() {
                    return Ok(self.colorize("No candidate URLs found.", "yellow"));
                }

                let mut builder = Builder::default();
                builder.push_record(["URL", "Relevance"]);
                for url in &discovery.candidates {
                    let label = if discovery.targets.contains(url) {
                        self.colorize("HIGH", "green")
                    } else {
                        "LOW".to_string()
                    };
                    builder.push_record([url.clone(), label]);
                }

                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));

                Ok(format!(
                    "{}\n{}\n{}",
                    self.info(&format!("Keywords: {}", discovery.keywords.join(", "))),
                    table,
                    self.info(&format!(
                        "{} of {} URLs are HIGH",
                        discovery.targets.len(),
                        discovery.candidates.len()
                    ))
                ))
            }
            OutputFormat::Quiet => Ok(discovery.targets.join("\n")),
        }
    }

    /// Whether messages should be printed at all.
    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn progress_line(&self, summary: &ProgressSummary) -> String {
        let line = format!(
            "{} targets: {} success, {} failed ({} exhausted), {} pending",
            summary.total, summary.success, summary.failed, summary.exhausted, summary.pending
        );
        if summary.is_complete() {
            self.success(&line)
        } else {
            self.warning(&line)
        }
    }

    fn status_label(&self, status: TargetStatus) -> String {
        let color = match status {
            TargetStatus::Success => "green",
            TargetStatus::Failed => "red",
            TargetStatus::Pending => "yellow",
        };
        self.colorize(status.as_str(), color)
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn pass_failures(report: &RunReport) -> String {
    report
        .pass
        .failures
        .iter()
        .map(|f| f.url.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}
