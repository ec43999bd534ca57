//! Authenticated sessions against the SUSE Manager API
//!
//! [`ServerApi`] is the raw remote surface (every call takes a session key).
//! [`Session`] wraps one logged-in key and releases it when dropped, so the
//! server-side session is closed on every exit path, including errors.

pub mod xmlrpc;

pub use xmlrpc::XmlRpcApi;

use tracing::{debug, info, warn};

use crate::domain::{PackageId, ProvidingChannel, ResolvedPackage};
use crate::error::{Result, SyncError, auth_failed};
use crate::reconcile::PackageCatalog;

/// Remote operations the tool consumes
pub trait ServerApi {
    /// Log in and return a session key
    fn login(&self, user: &str, password: &str) -> Result<String>;

    fn logout(&self, session_key: &str) -> Result<()>;

    /// Every package in a channel, all versions
    fn list_all_packages(&self, session_key: &str, channel: &str) -> Result<Vec<ResolvedPackage>>;

    fn list_providing_channels(
        &self,
        session_key: &str,
        package_id: PackageId,
    ) -> Result<Vec<ProvidingChannel>>;

    /// Add packages to a channel as one batch
    ///
    /// The server answers for the batch as a whole; a rejected batch is an
    /// error.
    fn add_packages(&self, session_key: &str, channel: &str, ids: &[PackageId]) -> Result<()>;
}

/// A logged-in session, logged out on drop
pub struct Session<'a, A: ServerApi + ?Sized> {
    api: &'a A,
    key: String,
    user: String,
    closed: bool,
}

impl<'a, A: ServerApi + ?Sized> Session<'a, A> {
    /// Log in; any failure is an authentication failure
    pub fn open(api: &'a A, user: &str, password: &str) -> Result<Self> {
        let key = api.login(user, password).map_err(|e| match e {
            SyncError::AuthFailed { .. } => e,
            other => auth_failed(user, other.to_string()),
        })?;
        info!(user, "Logged in to SUSE Manager");

        Ok(Self {
            api,
            key,
            user: user.to_string(),
            closed: false,
        })
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    /// Log out now and report the result
    pub fn close(mut self) -> Result<()> {
        self.closed = true;
        self.api.logout(&self.key)?;
        info!(user = %self.user, "Logged out from SUSE Manager");
        Ok(())
    }
}

impl<A: ServerApi + ?Sized> Drop for Session<'_, A> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        debug!(user = %self.user, "Session dropped without close, logging out");
        if let Err(e) = self.api.logout(&self.key) {
            warn!("Failed to log out from SUSE Manager: {e}");
        }
    }
}

impl<A: ServerApi + ?Sized> PackageCatalog for Session<'_, A> {
    fn list_all_packages(&self, channel: &str) -> Result<Vec<ResolvedPackage>> {
        self.api.list_all_packages(&self.key, channel)
    }

    fn list_providing_channels(&self, package_id: PackageId) -> Result<Vec<ProvidingChannel>> {
        self.api.list_providing_channels(&self.key, package_id)
    }

    fn add_packages_to_channel(&self, channel: &str, ids: &[PackageId]) -> Result<()> {
        self.api.add_packages(&self.key, channel, ids)
    }
}
