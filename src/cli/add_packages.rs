use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// What to do with a package the server lists in no channel at all
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnindexedArg {
    /// Leave it alone and report it
    #[default]
    Skip,
    /// Add it to every target channel
    Add,
}

/// Arguments for the add-packages command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Reconcile packages declared in a file:\n    smlm-sync add-packages --config pkg_list.yaml\n\n\
                  Print the outcome report as JSON:\n    smlm-sync add-packages --config pkg_list.yaml --json\n\n\
                  FILE FORMAT:\n  \
                  - name: curl\n    \
                    version: 8.0.0\n    \
                    release: \"1\"\n    \
                    source_channel: base-os\n    \
                    target_channels: [updates, extras]")]
pub struct AddPackagesArgs {
    /// Path to the YAML declaration file
    #[arg(long, short = 'c', value_name = "FILE")]
    pub config: PathBuf,

    /// Print the outcome report as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Policy for packages without any providing channel
    #[arg(long, value_enum, default_value_t = UnindexedArg::Skip)]
    pub on_unindexed: UnindexedArg,
}
