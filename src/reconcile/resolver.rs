//! Find the declared package in its source channel

use tracing::debug;

use super::PackageCatalog;
use crate::config::PackageDeclaration;
use crate::domain::ResolvedPackage;
use crate::error::Result;

/// Look the declaration up among all packages of its source channel
///
/// `Ok(None)` means the channel was listed but holds no exact
/// name/version/release match, which includes an empty channel. When the
/// server lists the same NVR more than once (one per architecture), the
/// first entry wins.
pub fn resolve<C: PackageCatalog + ?Sized>(
    catalog: &C,
    declaration: &PackageDeclaration,
) -> Result<Option<ResolvedPackage>> {
    let packages = catalog.list_all_packages(&declaration.source_channel)?;
    if packages.is_empty() {
        debug!(channel = %declaration.source_channel, "Source channel has no packages");
    }

    Ok(find_exact(packages, declaration))
}

fn find_exact(
    packages: Vec<ResolvedPackage>,
    declaration: &PackageDeclaration,
) -> Option<ResolvedPackage> {
    packages.into_iter().find(|pkg| {
        pkg.matches(
            &declaration.name,
            &declaration.version,
            &declaration.release,
        )
    })
}
