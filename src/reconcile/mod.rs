//! Channel reconciliation
//!
//! One pass walks the declarations in order. For each one:
//!
//! 1. [`resolver`]: find the exact name/version/release in the source channel
//! 2. [`membership`]: snapshot the channels currently providing it
//! 3. [`planner`]: mark each target channel as present or needing an add
//! 4. [`applicator`]: send one add batch per channel that needs it
//!
//! Every step's failure is recorded in the [`DeclarationReport`] and the pass
//! moves on to the next declaration. Nothing is retried.

pub mod applicator;
pub mod membership;
pub mod planner;
pub mod report;
pub mod resolver;

pub use report::{
    ChannelOutcome, DeclarationReport, DeclarationStatus, ReconcileReport, ReconciliationOutcome,
    Summary,
};

use tracing::{info, warn};

use crate::cli::{AddPackagesArgs, UnindexedArg};
use crate::config::PackageDeclaration;
use crate::domain::{PackageId, ProvidingChannel, ResolvedPackage};
use crate::error::Result;
use crate::ui::ReconcileReporter;

/// The remote lookups and mutations reconciliation needs
pub trait PackageCatalog {
    fn list_all_packages(&self, channel: &str) -> Result<Vec<ResolvedPackage>>;

    fn list_providing_channels(&self, package_id: PackageId) -> Result<Vec<ProvidingChannel>>;

    fn add_packages_to_channel(&self, channel: &str, ids: &[PackageId]) -> Result<()>;
}

/// What to do with a resolved package that no channel provides
///
/// The server can list a package in a channel before its providing-channels
/// index knows about it. `Skip` leaves such packages alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnindexedPolicy {
    #[default]
    Skip,
    Add,
}

/// Configuration options for a reconciliation pass
#[derive(Debug, Clone, Default)]
pub struct ReconcileOptions {
    pub unindexed: UnindexedPolicy,
}

impl From<&AddPackagesArgs> for ReconcileOptions {
    fn from(args: &AddPackagesArgs) -> Self {
        Self {
            unindexed: match args.on_unindexed {
                UnindexedArg::Skip => UnindexedPolicy::Skip,
                UnindexedArg::Add => UnindexedPolicy::Add,
            },
        }
    }
}

/// Runs reconciliation passes against one catalog
pub struct Reconciler<'a, C: PackageCatalog + ?Sized> {
    catalog: &'a C,
    options: ReconcileOptions,
}

impl<'a, C: PackageCatalog + ?Sized> Reconciler<'a, C> {
    pub fn new(catalog: &'a C, options: ReconcileOptions) -> Self {
        Self { catalog, options }
    }

    /// Reconcile every declaration, in order
    pub fn run(
        &self,
        declarations: &[PackageDeclaration],
        reporter: &mut dyn ReconcileReporter,
    ) -> ReconcileReport {
        reporter.start(declarations.len());

        let mut report = ReconcileReport::default();
        for (index, declaration) in declarations.iter().enumerate() {
            reporter.declaration_started(index, declaration);
            let result = self.reconcile(declaration);
            reporter.declaration_finished(&result);
            report.declarations.push(result);
        }

        reporter.finish(&report);
        report
    }

    /// Reconcile a single declaration
    pub fn reconcile(&self, declaration: &PackageDeclaration) -> DeclarationReport {
        if let Err(e) = declaration.validate() {
            warn!("Skipping declaration: {e}");
            return DeclarationReport::without_outcomes(
                declaration,
                DeclarationStatus::Invalid {
                    reason: e.to_string(),
                },
            );
        }

        info!(
            package = %declaration.nvr(),
            source = %declaration.source_channel,
            "Processing package"
        );
        let targets = declaration.unique_targets();

        let package = match resolver::resolve(self.catalog, declaration) {
            Ok(Some(package)) => package,
            Ok(None) => {
                warn!(
                    package = %declaration.nvr(),
                    source = %declaration.source_channel,
                    "Package not found in source channel"
                );
                return DeclarationReport {
                    declaration: declaration.clone(),
                    package: None,
                    status: DeclarationStatus::NotFound,
                    outcomes: every_target(&targets, &ReconciliationOutcome::PackageNotFound),
                };
            }
            Err(e) => {
                warn!(source = %declaration.source_channel, "Failed to list source channel: {e}");
                return DeclarationReport::without_outcomes(
                    declaration,
                    DeclarationStatus::LookupFailed {
                        reason: e.to_string(),
                    },
                );
            }
        };

        let membership = match membership::query(self.catalog, &package) {
            Ok(membership) => membership,
            Err(e) => {
                warn!(package = %package, "Failed to list providing channels: {e}");
                return DeclarationReport {
                    declaration: declaration.clone(),
                    package: Some(package),
                    status: DeclarationStatus::LookupFailed {
                        reason: e.to_string(),
                    },
                    outcomes: Vec::new(),
                };
            }
        };

        if membership.is_empty() && self.options.unindexed == UnindexedPolicy::Skip {
            warn!(package = %package, id = %package.id, "No providing channels found, not adding");
            return DeclarationReport {
                declaration: declaration.clone(),
                outcomes: every_target(&targets, &ReconciliationOutcome::NoProvidingChannelsFound),
                package: Some(package),
                status: DeclarationStatus::NoProvidingChannels,
            };
        }

        let plan = planner::plan(&targets, &membership);
        let outcomes = applicator::apply_plan(self.catalog, &package, &plan);

        DeclarationReport {
            declaration: declaration.clone(),
            package: Some(package),
            status: DeclarationStatus::Done,
            outcomes,
        }
    }
}

fn every_target(targets: &[&str], outcome: &ReconciliationOutcome) -> Vec<ChannelOutcome> {
    targets
        .iter()
        .map(|channel| ChannelOutcome {
            channel: (*channel).to_string(),
            outcome: outcome.clone(),
        })
        .collect()
}
