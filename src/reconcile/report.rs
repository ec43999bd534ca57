//! Structured results of a reconciliation pass

use serde::Serialize;

use crate::config::PackageDeclaration;
use crate::domain::ResolvedPackage;

/// Result for one (package, target channel) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ReconciliationOutcome {
    AlreadyPresent,
    Added,
    AddFailed { reason: String },
    NoProvidingChannelsFound,
    PackageNotFound,
}

impl ReconciliationOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::AddFailed { .. } | Self::PackageNotFound)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::AlreadyPresent => "already present",
            Self::Added => "added",
            Self::AddFailed { .. } => "add failed",
            Self::NoProvidingChannelsFound => "no providing channels",
            Self::PackageNotFound => "package not found",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChannelOutcome {
    pub channel: String,
    #[serde(flatten)]
    pub outcome: ReconciliationOutcome,
}

/// Terminal state of one declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DeclarationStatus {
    /// Failed validation; nothing was looked up
    Invalid { reason: String },
    /// Listing the source channel or the providing channels failed
    LookupFailed { reason: String },
    NotFound,
    NoProvidingChannels,
    Done,
}

/// Everything that happened to one declaration
#[derive(Debug, Clone, Serialize)]
pub struct DeclarationReport {
    pub declaration: PackageDeclaration,
    pub package: Option<ResolvedPackage>,
    #[serde(flatten)]
    pub status: DeclarationStatus,
    pub outcomes: Vec<ChannelOutcome>,
}

impl DeclarationReport {
    pub(crate) fn without_outcomes(declaration: &PackageDeclaration, status: DeclarationStatus) -> Self {
        Self {
            declaration: declaration.clone(),
            package: None,
            status,
            outcomes: Vec::new(),
        }
    }

    /// Number of failures this declaration contributes to the pass
    pub fn failures(&self) -> usize {
        match self.status {
            DeclarationStatus::Invalid { .. } | DeclarationStatus::LookupFailed { .. } => 1,
            _ => self.outcomes.iter().filter(|o| o.outcome.is_failure()).count(),
        }
    }

    #[cfg(test)]
    pub fn outcome_for(&self, channel: &str) -> Option<&ReconciliationOutcome> {
        self.outcomes
            .iter()
            .find(|o| o.channel == channel)
            .map(|o| &o.outcome)
    }
}

/// Counts over a whole pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub declarations: usize,
    pub invalid: usize,
    pub lookup_failed: usize,
    pub already_present: usize,
    pub added: usize,
    pub add_failed: usize,
    pub no_providing_channels: usize,
    pub package_not_found: usize,
}

/// All declaration reports of one pass, in declaration order
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReconcileReport {
    pub declarations: Vec<DeclarationReport>,
}

impl ReconcileReport {
    pub fn summary(&self) -> Summary {
        let mut summary = Summary {
            declarations: self.declarations.len(),
            ..Summary::default()
        };

        for report in &self.declarations {
            match report.status {
                DeclarationStatus::Invalid { .. } => summary.invalid += 1,
                DeclarationStatus::LookupFailed { .. } => summary.lookup_failed += 1,
                _ => {}
            }
            for pair in &report.outcomes {
                match pair.outcome {
                    ReconciliationOutcome::AlreadyPresent => summary.already_present += 1,
                    ReconciliationOutcome::Added => summary.added += 1,
                    ReconciliationOutcome::AddFailed { .. } => summary.add_failed += 1,
                    ReconciliationOutcome::NoProvidingChannelsFound => {
                        summary.no_providing_channels += 1;
                    }
                    ReconciliationOutcome::PackageNotFound => summary.package_not_found += 1,
                }
            }
        }

        summary
    }

    pub fn failures(&self) -> usize {
        self.declarations.iter().map(DeclarationReport::failures).sum()
    }

    pub fn has_failures(&self) -> bool {
        self.failures() > 0
    }
}
