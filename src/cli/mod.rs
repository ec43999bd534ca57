//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - add_packages: Add-packages command arguments
//! - list_packages: List-packages command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Args, Parser, Subcommand};

pub mod add_packages;
pub mod completions;
pub mod list_packages;

pub use add_packages::{AddPackagesArgs, UnindexedArg};
pub use completions::CompletionsArgs;
pub use list_packages::ListPackagesArgs;

/// smlm-sync - channel reconciliation for SUSE Manager
///
/// Make sure declared packages are present in their target channels.
#[derive(Parser, Debug)]
#[command(
    name = "smlm-sync",
    author,
    version,
    color = clap::ColorChoice::Auto,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Declarative package-to-channel reconciliation for SUSE Manager",
    long_about = "smlm-sync reads a YAML list of packages, finds each one in its source channel \
                  and adds it to every declared target channel that does not provide it yet. \
                  Packages already present are left alone, so runs are safe to repeat.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  smlm-sync add-packages --config pkg_list.yaml   \x1b[90m# Reconcile declared packages\x1b[0m\n   \
                  smlm-sync list-packages --channel sles15-sp5    \x1b[90m# List packages in a channel\x1b[0m\n\n\
                  \x1b[1m\x1b[32mEnvironment:\x1b[0m\n   \
                  SUSE_MANAGER_HOSTNAME, SUSE_MANAGER_PORT, SUSE_MANAGER_USER, SUSE_MANAGER_PASSWORD\n"
)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(flatten)]
    pub server: ServerArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Connection settings, usually taken from the environment
#[derive(Args, Debug, Clone, Default)]
pub struct ServerArgs {
    /// SUSE Manager hostname
    #[arg(long = "host", global = true, env = "SUSE_MANAGER_HOSTNAME")]
    pub hostname: Option<String>,

    /// API port
    #[arg(long, global = true, env = "SUSE_MANAGER_PORT", default_value_t = 443)]
    pub port: u16,

    /// API user
    #[arg(long, global = true, env = "SUSE_MANAGER_USER")]
    pub user: Option<String>,

    /// API password
    #[arg(long, global = true, env = "SUSE_MANAGER_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// URL scheme of the API endpoint
    #[arg(
        long,
        global = true,
        env = "SUSE_MANAGER_SCHEME",
        default_value = "https",
        value_parser = ["https", "http"]
    )]
    pub scheme: String,

    /// Verify the server's TLS certificate
    #[arg(
        long,
        global = true,
        env = "SUSE_MANAGER_VERIFY_TLS",
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    pub verify_tls: bool,

    /// Timeout for each remote call, in seconds
    #[arg(
        long,
        global = true,
        env = "SUSE_MANAGER_TIMEOUT",
        default_value_t = 60,
        value_name = "SECONDS"
    )]
    pub timeout: u64,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add declared packages to their target channels
    #[command(alias = "add_packages")]
    AddPackages(AddPackagesArgs),

    /// List packages in a channel
    #[command(alias = "list_packages")]
    ListPackages(ListPackagesArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::path::PathBuf;

    const SERVER_VARS: [&str; 7] = [
        "SUSE_MANAGER_HOSTNAME",
        "SUSE_MANAGER_PORT",
        "SUSE_MANAGER_USER",
        "SUSE_MANAGER_PASSWORD",
        "SUSE_MANAGER_SCHEME",
        "SUSE_MANAGER_VERIFY_TLS",
        "SUSE_MANAGER_TIMEOUT",
    ];

    fn clear_server_env() {
        for var in SERVER_VARS {
            unsafe {
                std::env::remove_var(var);
            }
        }
    }

    #[test]
    #[serial]
    fn test_cli_parsing_add_packages() {
        clear_server_env();
        let cli =
            Cli::try_parse_from(["smlm-sync", "add-packages", "--config", "pkg_list.yaml"]).unwrap();
        match cli.command {
            Commands::AddPackages(args) => {
                assert_eq!(args.config, PathBuf::from("pkg_list.yaml"));
                assert!(!args.json);
                assert_eq!(args.on_unindexed, UnindexedArg::Skip);
            }
            _ => panic!("Expected AddPackages command"),
        }
    }

    #[test]
    #[serial]
    fn test_cli_accepts_underscore_aliases() {
        clear_server_env();
        let cli = Cli::try_parse_from(["smlm-sync", "add_packages", "--config", "x.yaml"]).unwrap();
        assert!(matches!(cli.command, Commands::AddPackages(_)));

        let cli = Cli::try_parse_from(["smlm-sync", "list_packages", "--channel", "base"]).unwrap();
        assert!(matches!(cli.command, Commands::ListPackages(_)));
    }

    #[test]
    #[serial]
    fn test_cli_server_defaults() {
        clear_server_env();
        let cli = Cli::try_parse_from(["smlm-sync", "version"]).unwrap();
        assert_eq!(cli.server.hostname, None);
        assert_eq!(cli.server.port, 443);
        assert_eq!(cli.server.scheme, "https");
        assert!(!cli.server.verify_tls);
        assert_eq!(cli.server.timeout, 60);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    #[serial]
    fn test_cli_server_from_env() {
        clear_server_env();
        unsafe {
            std::env::set_var("SUSE_MANAGER_HOSTNAME", "suma.example.com");
            std::env::set_var("SUSE_MANAGER_PORT", "8443");
            std::env::set_var("SUSE_MANAGER_USER", "apiuser");
            std::env::set_var("SUSE_MANAGER_PASSWORD", "secret");
        }
        let cli = Cli::try_parse_from(["smlm-sync", "list-packages", "--channel", "base"]).unwrap();
        clear_server_env();

        assert_eq!(cli.server.hostname.as_deref(), Some("suma.example.com"));
        assert_eq!(cli.server.port, 8443);
        assert_eq!(cli.server.user.as_deref(), Some("apiuser"));
        assert_eq!(cli.server.password.as_deref(), Some("secret"));
    }

    #[test]
    #[serial]
    fn test_cli_flag_overrides_env() {
        clear_server_env();
        unsafe {
            std::env::set_var("SUSE_MANAGER_HOSTNAME", "from-env");
        }
        let cli = Cli::try_parse_from(["smlm-sync", "--host", "from-flag", "version"]).unwrap();
        clear_server_env();
        assert_eq!(cli.server.hostname.as_deref(), Some("from-flag"));
    }

    #[test]
    #[serial]
    fn test_cli_rejects_unknown_scheme() {
        clear_server_env();
        let result = Cli::try_parse_from(["smlm-sync", "--scheme", "ftp", "version"]);
        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn test_cli_verbose_count() {
        clear_server_env();
        let cli = Cli::try_parse_from(["smlm-sync", "-vv", "version"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    #[serial]
    fn test_cli_parsing_completions() {
        clear_server_env();
        let cli = Cli::try_parse_from(["smlm-sync", "completions", "bash"]).unwrap();
        match cli.command {
            Commands::Completions(args) => {
                assert_eq!(args.shell, "bash");
            }
            _ => panic!("Expected Completions command"),
        }
    }
}
