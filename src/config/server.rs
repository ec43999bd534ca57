//! Connection settings for the SUSE Manager API

use std::fmt;
use std::time::Duration;

use crate::cli::ServerArgs;
use crate::error::{Result, config_invalid};

/// Validated connection settings
#[derive(Clone)]
pub struct ServerConfig {
    pub hostname: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub scheme: String,
    pub verify_tls: bool,
    pub timeout: Duration,
}

impl ServerConfig {
    /// Build the configuration from parsed CLI/environment arguments
    ///
    /// Hostname, user and password have no usable defaults and must be set.
    pub fn from_args(args: &ServerArgs) -> Result<Self> {
        let missing: Vec<&str> = [
            ("SUSE_MANAGER_HOSTNAME", &args.hostname),
            ("SUSE_MANAGER_USER", &args.user),
            ("SUSE_MANAGER_PASSWORD", &args.password),
        ]
        .into_iter()
        .filter(|(_, value)| value.as_deref().is_none_or(|v| v.trim().is_empty()))
        .map(|(name, _)| name)
        .collect();

        if !missing.is_empty() {
            return Err(config_invalid(format!(
                "{} must be set",
                missing.join(", ")
            )));
        }

        if args.port == 0 {
            return Err(config_invalid("SUSE_MANAGER_PORT must not be 0"));
        }

        Ok(Self {
            hostname: args.hostname.clone().unwrap_or_default(),
            port: args.port,
            user: args.user.clone().unwrap_or_default(),
            password: args.password.clone().unwrap_or_default(),
            scheme: args.scheme.clone(),
            verify_tls: args.verify_tls,
            timeout: Duration::from_secs(args.timeout.max(1)),
        })
    }

    /// URL of the XML-RPC endpoint
    pub fn endpoint(&self) -> String {
        format!("{}://{}:{}/rpc/api", self.scheme, self.hostname, self.port)
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("hostname", &self.hostname)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("scheme", &self.scheme)
            .field("verify_tls", &self.verify_tls)
            .field("timeout", &self.timeout)
            .finish()
    }
}
