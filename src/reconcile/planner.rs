//! Decide which target channels need an add

use crate::domain::ChannelMembership;

/// One step of a package's plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedChannel<'a> {
    pub channel: &'a str,
    pub needs_add: bool,
}

/// Pair every target with whether it still needs the package
///
/// Targets keep their declared order. The membership is the snapshot taken
/// before any add, so an add planned here is never visible to a later target
/// of the same package.
pub fn plan<'a>(targets: &[&'a str], membership: &ChannelMembership) -> Vec<PlannedChannel<'a>> {
    targets
        .iter()
        .map(|&channel| PlannedChannel {
            channel,
            needs_add: !membership.contains(channel),
        })
        .collect()
}
