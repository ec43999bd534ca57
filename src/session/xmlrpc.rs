//! [`ServerApi`] over the SUSE Manager XML-RPC endpoint

use std::collections::BTreeMap;

use tracing::debug;

use super::ServerApi;
use crate::config::ServerConfig;
use crate::domain::{PackageId, ProvidingChannel, ResolvedPackage};
use crate::error::{Result, add_rejected, logout_failed, rpc_malformed};
use crate::rpc::{RpcClient, Value};

const LOGIN: &str = "auth.login";
const LOGOUT: &str = "auth.logout";
const LIST_ALL_PACKAGES: &str = "channel.software.listAllPackages";
const LIST_PROVIDING_CHANNELS: &str = "packages.listProvidingChannels";
const ADD_PACKAGES: &str = "channel.software.addPackages";

/// Every remote method the client calls, in call order
pub const METHODS: [&str; 5] = [
    LOGIN,
    LIST_ALL_PACKAGES,
    LIST_PROVIDING_CHANNELS,
    ADD_PACKAGES,
    LOGOUT,
];

/// SUSE Manager API client
pub struct XmlRpcApi {
    client: RpcClient,
}

impl XmlRpcApi {
    pub fn new(config: &ServerConfig) -> Result<Self> {
        Ok(Self {
            client: RpcClient::new(config)?,
        })
    }

    pub fn endpoint(&self) -> &str {
        self.client.endpoint()
    }
}

impl ServerApi for XmlRpcApi {
    fn login(&self, user: &str, password: &str) -> Result<String> {
        let value = self.client.call(LOGIN, &[user.into(), password.into()])?;
        value
            .as_str()
            .filter(|key| !key.is_empty())
            .map(ToString::to_string)
            .ok_or_else(|| rpc_malformed(LOGIN, "expected a session key string"))
    }

    fn logout(&self, session_key: &str) -> Result<()> {
        let value = self.client.call(LOGOUT, &[session_key.into()])?;
        if is_success(&value) {
            Ok(())
        } else {
            Err(logout_failed(format!("server returned {value:?}")))
        }
    }

    fn list_all_packages(&self, session_key: &str, channel: &str) -> Result<Vec<ResolvedPackage>> {
        let value = self
            .client
            .call(LIST_ALL_PACKAGES, &[session_key.into(), channel.into()])?;
        let packages = structs(LIST_ALL_PACKAGES, &value)?
            .into_iter()
            .map(package_from)
            .collect::<Result<Vec<_>>>()?;
        debug!(channel, count = packages.len(), "Listed channel packages");
        Ok(packages)
    }

    fn list_providing_channels(
        &self,
        session_key: &str,
        package_id: PackageId,
    ) -> Result<Vec<ProvidingChannel>> {
        let value = self.client.call(
            LIST_PROVIDING_CHANNELS,
            &[session_key.into(), package_id.0.into()],
        )?;
        structs(LIST_PROVIDING_CHANNELS, &value)?
            .into_iter()
            .map(|members| {
                Ok(ProvidingChannel {
                    label: required_text(LIST_PROVIDING_CHANNELS, members, "label")?,
                    parent_label: optional_text(members, "parent_label"),
                    name: optional_text(members, "name"),
                })
            })
            .collect()
    }

    fn add_packages(&self, session_key: &str, channel: &str, ids: &[PackageId]) -> Result<()> {
        let ids: Vec<Value> = ids.iter().map(|id| Value::Int(id.0)).collect();
        let value = self.client.call(
            ADD_PACKAGES,
            &[session_key.into(), channel.into(), Value::Array(ids)],
        )?;
        if is_success(&value) {
            Ok(())
        } else {
            Err(add_rejected(channel))
        }
    }
}

/// The API reports success as the integer 1
fn is_success(value: &Value) -> bool {
    matches!(value, Value::Int(1) | Value::Boolean(true))
}

fn structs<'v>(method: &str, value: &'v Value) -> Result<Vec<&'v BTreeMap<String, Value>>> {
    let items = value
        .as_array()
        .ok_or_else(|| rpc_malformed(method, "expected an array"))?;
    items
        .iter()
        .map(|item| {
            item.as_struct()
                .ok_or_else(|| rpc_malformed(method, "expected an array of structs"))
        })
        .collect()
}

fn package_from(members: &BTreeMap<String, Value>) -> Result<ResolvedPackage> {
    let id = members
        .get("id")
        .and_then(Value::as_i64)
        .ok_or_else(|| rpc_malformed(LIST_ALL_PACKAGES, "package without integer id"))?;

    Ok(ResolvedPackage {
        id: PackageId(id),
        name: required_text(LIST_ALL_PACKAGES, members, "name")?,
        version: optional_text(members, "version"),
        release: optional_text(members, "release"),
        epoch: optional_text(members, "epoch"),
        arch_label: optional_text(members, "arch_label"),
    })
}

fn required_text(method: &str, members: &BTreeMap<String, Value>, key: &str) -> Result<String> {
    members
        .get(key)
        .and_then(Value::to_text)
        .ok_or_else(|| rpc_malformed(method, format!("missing '{key}'")))
}

fn optional_text(members: &BTreeMap<String, Value>, key: &str) -> String {
    members.get(key).and_then(Value::to_text).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member_map(pairs: &[(&str, Value)]) -> BTreeMap<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_package_from_struct() {
        let members = member_map(&[
            ("name", "curl".into()),
            ("version", "8.0.0".into()),
            ("release", "1".into()),
            ("epoch", Value::Int(0)),
            ("id", Value::Int(4711)),
            ("arch_label", "x86_64".into()),
        ]);
        let pkg = package_from(&members).unwrap();
        assert_eq!(pkg.id, PackageId(4711));
        assert_eq!(pkg.epoch, "0");
        assert!(pkg.matches("curl", "8.0.0", "1"));
    }

    #[test]
    fn test_package_without_id_is_malformed() {
        let members = member_map(&[("name", "curl".into())]);
        assert!(package_from(&members).is_err());
    }

    #[test]
    fn test_structs_rejects_non_array() {
        assert!(structs(LIST_ALL_PACKAGES, &Value::Int(1)).is_err());
        assert!(structs(LIST_ALL_PACKAGES, &Value::Array(vec![Value::Int(1)])).is_err());
        assert!(structs(LIST_ALL_PACKAGES, &Value::Array(vec![])).unwrap().is_empty());
    }

    #[test]
    fn test_success_values() {
        assert!(is_success(&Value::Int(1)));
        assert!(is_success(&Value::Boolean(true)));
        assert!(!is_success(&Value::Int(0)));
        assert!(!is_success(&"1".into()));
    }
}
