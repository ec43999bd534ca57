//! UI/Progress presentation layer
//!
//! This module handles:
//! - Progress reporting while a reconciliation pass runs
//! - Per-channel outcome lines as each declaration finishes
//! - Silent reporting for JSON output and tests
//!
//! The reconciler never prints. It calls a [`ReconcileReporter`], and the
//! command picks the implementation based on command-line flags.

pub mod summary;

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::PackageDeclaration;
use crate::reconcile::{DeclarationReport, DeclarationStatus, ReconcileReport, ReconciliationOutcome};

/// Receives reconciliation events in declaration order
pub trait ReconcileReporter {
    /// Called once before the first declaration
    fn start(&mut self, total: usize);

    fn declaration_started(&mut self, index: usize, declaration: &PackageDeclaration);

    fn declaration_finished(&mut self, report: &DeclarationReport);

    /// Called once after the last declaration
    fn finish(&mut self, report: &ReconcileReport);
}

/// Progress bar on stderr plus outcome lines on stdout
pub struct ConsoleReporter {
    pb: ProgressBar,
}

impl ConsoleReporter {
    pub fn new(show_progress: bool) -> Self {
        let pb = if show_progress {
            ProgressBar::new(0)
        } else {
            ProgressBar::hidden()
        };
        let style = ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
        pb.set_style(style);
        Self { pb }
    }

    fn print(&self, line: String) {
        self.pb.suspend(|| println!("{line}"));
    }
}

impl ReconcileReporter for ConsoleReporter {
    fn start(&mut self, total: usize) {
        self.pb.set_length(total as u64);
    }

    fn declaration_started(&mut self, index: usize, declaration: &PackageDeclaration) {
        let total = self.pb.length().unwrap_or_default();
        self.pb
            .set_message(format!("({}/{}) {}", index + 1, total, declaration.nvr()));
    }

    fn declaration_finished(&mut self, report: &DeclarationReport) {
        for line in outcome_lines(report) {
            self.print(line);
        }
        self.pb.inc(1);
    }

    fn finish(&mut self, _report: &ReconcileReport) {
        self.pb.finish_and_clear();
    }
}

/// No-op reporter
#[derive(Default)]
pub struct SilentReporter;

impl ReconcileReporter for SilentReporter {
    fn start(&mut self, _total: usize) {}

    fn declaration_started(&mut self, _index: usize, _declaration: &PackageDeclaration) {}

    fn declaration_finished(&mut self, _report: &DeclarationReport) {}

    fn finish(&mut self, _report: &ReconcileReport) {}
}

/// Styled lines describing one finished declaration
pub fn outcome_lines(report: &DeclarationReport) -> Vec<String> {
    let declaration = &report.declaration;
    let title = match &report.package {
        Some(package) => package.to_string(),
        None => declaration.nvr(),
    };
    let mut lines = vec![format!("  {}", Style::new().bold().yellow().apply_to(&title))];

    match &report.status {
        DeclarationStatus::Invalid { reason } => {
            lines.push(format!(
                "    {} {}",
                Style::new().red().apply_to("skipped:"),
                reason
            ));
        }
        DeclarationStatus::LookupFailed { reason } => {
            lines.push(format!(
                "    {} {}",
                Style::new().red().apply_to("lookup failed:"),
                reason
            ));
        }
        DeclarationStatus::NotFound => {
            lines.push(format!(
                "    {} {}",
                Style::new().red().apply_to("not found in"),
                declaration.source_channel
            ));
        }
        DeclarationStatus::NoProvidingChannels | DeclarationStatus::Done => {}
    }

    for pair in &report.outcomes {
        let style = match pair.outcome {
            ReconciliationOutcome::AlreadyPresent => Style::new().dim(),
            ReconciliationOutcome::Added => Style::new().green(),
            ReconciliationOutcome::NoProvidingChannelsFound => Style::new().yellow(),
            ReconciliationOutcome::AddFailed { .. } | ReconciliationOutcome::PackageNotFound => {
                Style::new().red()
            }
        };
        let mut line = format!(
            "    {} {}",
            Style::new().cyan().apply_to(&pair.channel),
            style.apply_to(pair.outcome.label())
        );
        if let ReconciliationOutcome::AddFailed { reason } = &pair.outcome {
            line.push_str(&format!(" ({reason})"));
        }
        lines.push(line);
    }

    lines
}
