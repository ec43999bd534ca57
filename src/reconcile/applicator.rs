//! Issue add operations and classify their results

use tracing::{info, warn};

use super::PackageCatalog;
use super::planner::PlannedChannel;
use super::report::{ChannelOutcome, ReconciliationOutcome};
use crate::domain::{PackageId, ResolvedPackage};

/// One `addPackages` call: a set of ids for a single channel
///
/// The server answers for the batch as a whole, so every id in it shares
/// the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddBatch {
    pub channel: String,
    pub package_ids: Vec<PackageId>,
}

impl AddBatch {
    pub fn single(channel: &str, id: PackageId) -> Self {
        Self {
            channel: channel.to_string(),
            package_ids: vec![id],
        }
    }
}

/// Send one batch; failures are returned as outcomes, never as errors
pub fn apply_batch<C: PackageCatalog + ?Sized>(catalog: &C, batch: &AddBatch) -> ReconciliationOutcome {
    match catalog.add_packages_to_channel(&batch.channel, &batch.package_ids) {
        Ok(()) => ReconciliationOutcome::Added,
        Err(e) => ReconciliationOutcome::AddFailed {
            reason: e.to_string(),
        },
    }
}

/// Walk a package's plan, one batch per channel that needs it
pub fn apply_plan<C: PackageCatalog + ?Sized>(
    catalog: &C,
    package: &ResolvedPackage,
    plan: &[PlannedChannel<'_>],
) -> Vec<ChannelOutcome> {
    plan.iter()
        .map(|step| {
            let outcome = if step.needs_add {
                let batch = AddBatch::single(step.channel, package.id);
                let outcome = apply_batch(catalog, &batch);
                match &outcome {
                    ReconciliationOutcome::AddFailed { reason } => {
                        warn!(package = %package, channel = step.channel, "Add failed: {reason}");
                    }
                    _ => info!(package = %package, channel = step.channel, "Added to channel"),
                }
                outcome
            } else {
                info!(package = %package, channel = step.channel, "Already in channel");
                ReconciliationOutcome::AlreadyPresent
            };
            ChannelOutcome {
                channel: step.channel.to_string(),
                outcome,
            }
        })
        .collect()
}
