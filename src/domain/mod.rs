//! Domain models for smlm-sync
//!
//! This module contains pure domain objects representing packages and
//! channels as the server reports them.

pub mod package;

pub use package::{ChannelMembership, PackageId, ProvidingChannel, ResolvedPackage};
