//! Common test utilities for smlm-sync integration tests
//!
//! [`SumaMock`] stands in for a SUSE Manager XML-RPC endpoint. Every remote
//! method is one `httpmock` mock matched on the method name and the
//! parameters it must carry. A request nothing matches gets a 404, which the
//! binary reports as a transport error.

#![allow(dead_code)]

use std::path::PathBuf;

use assert_cmd::Command;
use httpmock::prelude::*;
use httpmock::{Mock, MockServer};
use tempfile::TempDir;

pub const SESSION_KEY: &str = "mock-session-key";

const ENDPOINT: &str = "/rpc/api";

#[derive(Debug, Clone)]
pub struct MockPackage {
    pub id: i64,
    pub name: String,
    pub version: String,
    pub release: String,
}

impl MockPackage {
    pub fn new(id: i64, name: &str, version: &str, release: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            version: version.to_string(),
            release: release.to_string(),
        }
    }
}

/// A mock SUSE Manager API
pub struct SumaMock {
    server: MockServer,
}

impl SumaMock {
    pub fn start() -> Self {
        Self {
            server: MockServer::start(),
        }
    }

    /// Mock for one method call whose body contains every fragment
    fn call(&self, method: &str, fragments: &[String], response: String) -> Mock<'_> {
        self.server.mock(|when, then| {
            let mut when = when
                .method(POST)
                .path(ENDPOINT)
                .body_contains(format!("<methodName>{method}</methodName>"));
            for fragment in fragments {
                when = when.body_contains(fragment.as_str());
            }
            then.status(200)
                .header("content-type", "text/xml")
                .body(response);
        })
    }

    pub fn login(&self) -> Mock<'_> {
        self.call(
            "auth.login",
            &[string("apiuser")],
            success(&string(SESSION_KEY)),
        )
    }

    pub fn reject_login(&self) -> Mock<'_> {
        self.call(
            "auth.login",
            &[string("apiuser")],
            fault(2950, "Either the password or username is incorrect."),
        )
    }

    pub fn logout(&self) -> Mock<'_> {
        self.call("auth.logout", &[string(SESSION_KEY)], success("<int>1</int>"))
    }

    /// `listAllPackages` for a channel holding `packages`
    pub fn channel(&self, channel: &str, packages: &[MockPackage]) -> Mock<'_> {
        self.call(
            "channel.software.listAllPackages",
            &[string(channel)],
            success(&array(packages.iter().map(package_struct))),
        )
    }

    pub fn unknown_channel(&self, channel: &str) -> Mock<'_> {
        self.call(
            "channel.software.listAllPackages",
            &[string(channel)],
            fault(-210, &format!("No such channel: {channel}")),
        )
    }

    /// `listProvidingChannels` for a package id
    pub fn providing(&self, id: i64, channels: &[&str]) -> Mock<'_> {
        self.call(
            "packages.listProvidingChannels",
            &[int(id)],
            success(&array(channels.iter().map(|label| channel_struct(label)))),
        )
    }

    /// `addPackages` of one id into one channel, accepted
    pub fn add(&self, channel: &str, id: i64) -> Mock<'_> {
        self.call(
            "channel.software.addPackages",
            &[string(channel), int(id)],
            success("<int>1</int>"),
        )
    }

    pub fn failing_add(&self, channel: &str, id: i64) -> Mock<'_> {
        self.call(
            "channel.software.addPackages",
            &[string(channel), int(id)],
            fault(1200, &format!("Permission denied for channel {channel}")),
        )
    }

    /// The binary with connection settings pointing at this server
    pub fn command(&self) -> Command {
        let mut cmd = smlm_cmd();
        cmd.env("SUSE_MANAGER_HOSTNAME", "127.0.0.1")
            .env("SUSE_MANAGER_PORT", self.server.port().to_string())
            .env("SUSE_MANAGER_USER", "apiuser")
            .env("SUSE_MANAGER_PASSWORD", "secret")
            .env("SUSE_MANAGER_SCHEME", "http")
            .env("SUSE_MANAGER_TIMEOUT", "10");
        cmd
    }
}

/// The binary with no connection settings from the outer environment
#[allow(deprecated)]
pub fn smlm_cmd() -> Command {
    let mut cmd = Command::cargo_bin("smlm-sync").expect("binary should be built");
    for var in [
        "SUSE_MANAGER_HOSTNAME",
        "SUSE_MANAGER_PORT",
        "SUSE_MANAGER_USER",
        "SUSE_MANAGER_PASSWORD",
        "SUSE_MANAGER_SCHEME",
        "SUSE_MANAGER_VERIFY_TLS",
        "SUSE_MANAGER_TIMEOUT",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

/// A temporary directory holding declaration files
pub struct TestDir {
    pub temp: TempDir,
}

impl TestDir {
    pub fn new() -> Self {
        Self {
            temp: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Write a file and return its path
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.temp.path().join(name);
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }
}

impl Default for TestDir {
    fn default() -> Self {
        Self::new()
    }
}

fn string(text: &str) -> String {
    format!("<string>{text}</string>")
}

fn int(value: i64) -> String {
    format!("<int>{value}</int>")
}

fn success(value: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<methodResponse><params><param><value>{value}</value></param></params></methodResponse>"
    )
}

fn fault(code: i64, message: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<methodResponse><fault><value><struct>\
         <member><name>faultCode</name><value><int>{code}</int></value></member>\
         <member><name>faultString</name><value><string>{message}</string></value></member>\
         </struct></value></fault></methodResponse>"
    )
}

fn array(items: impl Iterator<Item = String>) -> String {
    let values: String = items.map(|item| format!("<value>{item}</value>")).collect();
    format!("<array><data>{values}</data></array>")
}

fn member(name: &str, value: &str) -> String {
    format!("<member><name>{name}</name><value>{value}</value></member>")
}

fn package_struct(package: &MockPackage) -> String {
    format!(
        "<struct>{}{}{}{}{}{}</struct>",
        member("name", &string(&package.name)),
        member("version", &string(&package.version)),
        member("release", &string(&package.release)),
        member("epoch", "<string></string>"),
        member("id", &int(package.id)),
        member("arch_label", &string("x86_64")),
    )
}

fn channel_struct(label: &str) -> String {
    format!(
        "<struct>{}{}{}</struct>",
        member("label", &string(label)),
        member("parent_label", "<string></string>"),
        member("name", &string(label)),
    )
}
