use clap::Parser;

/// Arguments for the list-packages command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  List all packages in a channel:\n    smlm-sync list-packages --channel sles15-sp5-pool-x86_64\n\n\
                  Print them as JSON:\n    smlm-sync list-packages --channel sles15-sp5-pool-x86_64 --json")]
pub struct ListPackagesArgs {
    /// Channel label to list packages from
    #[arg(long, value_name = "LABEL")]
    pub channel: String,

    /// Print packages as JSON
    #[arg(long)]
    pub json: bool,
}
