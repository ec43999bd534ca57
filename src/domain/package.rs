//! Package and channel domain types

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

/// Server-assigned package identifier, stable for one session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PackageId(pub i64);

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A package as known to the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedPackage {
    pub id: PackageId,
    pub name: String,
    pub version: String,
    pub release: String,
    pub epoch: String,
    pub arch_label: String,
}

impl ResolvedPackage {
    /// Exact match on name, version and release
    pub fn matches(&self, name: &str, version: &str, release: &str) -> bool {
        self.name == name && self.version == version && self.release == release
    }
}

impl fmt::Display for ResolvedPackage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-", self.name)?;
        if !self.epoch.is_empty() {
            write!(f, "{}:", self.epoch)?;
        }
        write!(f, "{}-{}", self.version, self.release)?;
        if !self.arch_label.is_empty() {
            write!(f, ".{}", self.arch_label)?;
        }
        Ok(())
    }
}

/// A channel reported as providing a package
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProvidingChannel {
    pub label: String,
    pub parent_label: String,
    pub name: String,
}

/// Labels of the channels currently providing one package
///
/// A snapshot taken once per package; adds issued afterwards are not
/// reflected in it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelMembership {
    labels: HashSet<String>,
}

impl ChannelMembership {
    pub fn contains(&self, label: &str) -> bool {
        self.labels.contains(label)
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }
}

impl FromIterator<ProvidingChannel> for ChannelMembership {
    fn from_iter<I: IntoIterator<Item = ProvidingChannel>>(iter: I) -> Self {
        Self {
            labels: iter.into_iter().map(|c| c.label).collect(),
        }
    }
}

impl<'a> FromIterator<&'a str> for ChannelMembership {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self {
            labels: iter.into_iter().map(ToString::to_string).collect(),
        }
    }
}
