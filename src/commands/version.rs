//! Version command implementation

use crate::error::Result;
use crate::session::xmlrpc::METHODS;

/// Run version command
pub fn run() -> Result<()> {
    for line in version_lines() {
        println!("{line}");
    }
    Ok(())
}

/// Binary version and the SUSE Manager API surface it depends on
fn version_lines() -> Vec<String> {
    let mut lines = vec![
        format!("smlm-sync {} ({})", env!("CARGO_PKG_VERSION"), build_profile()),
        String::new(),
        "SUSE Manager XML-RPC methods (/rpc/api):".to_string(),
    ];
    lines.extend(METHODS.iter().map(|method| format!("  {method}")));
    lines
}

fn build_profile() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    }
}
