//! List-packages command

use tracing::warn;

use crate::cli::{ListPackagesArgs, ServerArgs};
use crate::config::ServerConfig;
use crate::error::Result;
use crate::reconcile::PackageCatalog;
use crate::session::{Session, XmlRpcApi};
use crate::ui::summary::print_packages;

/// Run list-packages command
pub fn run(server: &ServerArgs, args: ListPackagesArgs) -> Result<()> {
    let config = ServerConfig::from_args(server)?;
    let api = XmlRpcApi::new(&config)?;
    let session = Session::open(&api, &config.user, &config.password)?;

    let listed = session.list_all_packages(&args.channel);
    if let Err(e) = session.close() {
        warn!("{e}");
    }
    let packages = listed?;

    if packages.is_empty() {
        warn!(channel = %args.channel, "No packages found in channel");
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&packages)?);
    } else {
        print_packages(&args.channel, &packages);
    }
    Ok(())
}
