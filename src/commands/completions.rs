//! Shell completions command

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::{Cli, CompletionsArgs};
use crate::error::{Result, SyncError};

/// Write the completion script for a shell to stdout
pub fn run(args: CompletionsArgs) -> Result<()> {
    let shell = parse_shell(&args.shell)?;
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "smlm-sync", &mut std::io::stdout().lock());
    Ok(())
}

fn parse_shell(name: &str) -> Result<Shell> {
    let name = name.to_lowercase();
    let name = if name == "pwsh" { "powershell" } else { name.as_str() };
    name.parse::<Shell>()
        .map_err(|_| SyncError::UnknownShell {
            shell: name.to_string(),
        })
}
