//! Add-packages command
//!
//! Loads the declaration file, opens one session and runs a single
//! reconciliation pass over it.

use serde::Serialize;
use tracing::{info, warn};

use crate::cli::{AddPackagesArgs, ServerArgs};
use crate::config::{ServerConfig, load_declarations};
use crate::error::{Result, SyncError};
use crate::reconcile::{DeclarationReport, ReconcileOptions, ReconcileReport, Reconciler, Summary};
use crate::session::{Session, XmlRpcApi};
use crate::ui::summary::print_summary;
use crate::ui::{ConsoleReporter, ReconcileReporter, SilentReporter};

#[derive(Serialize)]
struct JsonReport<'a> {
    summary: Summary,
    declarations: &'a [DeclarationReport],
}

/// The bar only runs on quiet runs; `-v` log lines on stderr would tear it
fn show_progress(verbose: u8) -> bool {
    verbose == 0
}

/// Run add-packages command
pub fn run(server: &ServerArgs, args: AddPackagesArgs, verbose: u8) -> Result<()> {
    let declarations = load_declarations(&args.config)?;
    if declarations.is_empty() {
        warn!(config = %args.config.display(), "No packages declared");
    }

    let config = ServerConfig::from_args(server)?;
    let api = XmlRpcApi::new(&config)?;
    info!(endpoint = api.endpoint(), "Connecting to SUSE Manager");

    let session = Session::open(&api, &config.user, &config.password)?;

    let mut reporter: Box<dyn ReconcileReporter> = if args.json {
        Box::new(SilentReporter)
    } else {
        Box::new(ConsoleReporter::new(show_progress(verbose)))
    };
    let report = Reconciler::new(&session, ReconcileOptions::from(&args))
        .run(&declarations, reporter.as_mut());
    info!(
        user = session.user(),
        failures = report.failures(),
        "Reconciliation pass finished"
    );

    if let Err(e) = session.close() {
        warn!("{e}");
    }

    print_report(&report, args.json)?;

    if report.has_failures() {
        return Err(SyncError::ReconcileIncomplete {
            failed: report.failures(),
        });
    }
    Ok(())
}

fn print_report(report: &ReconcileReport, json: bool) -> Result<()> {
    if json {
        let output = JsonReport {
            summary: report.summary(),
            declarations: &report.declarations,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_summary(&report.summary());
    }
    Ok(())
}
