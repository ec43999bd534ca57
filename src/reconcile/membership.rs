//! Query which channels currently provide a package

use tracing::debug;

use super::PackageCatalog;
use crate::domain::{ChannelMembership, ResolvedPackage};
use crate::error::Result;

/// Fresh membership snapshot for one package
pub fn query<C: PackageCatalog + ?Sized>(
    catalog: &C,
    package: &ResolvedPackage,
) -> Result<ChannelMembership> {
    let channels = catalog.list_providing_channels(package.id)?;
    let labels: Vec<&str> = channels.iter().map(|c| c.label.as_str()).collect();
    let membership: ChannelMembership = labels.iter().copied().collect();
    debug!(
        package = %package,
        id = %package.id,
        count = membership.len(),
        channels = ?labels,
        "Providing channels"
    );
    Ok(membership)
}
