//! CLI integration tests using the REAL smlm-sync binary

mod common;

use common::{TestDir, smlm_cmd};
use predicates::prelude::*;

#[test]
fn test_help_output() {
    smlm_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("SUSE Manager"))
        .stdout(predicate::str::contains("add-packages"))
        .stdout(predicate::str::contains("list-packages"))
        .stdout(predicate::str::contains("SUSE_MANAGER_HOSTNAME"));
}

#[test]
fn test_add_packages_help_lists_policy() {
    smlm_cmd()
        .args(["add-packages", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--config"))
        .stdout(predicate::str::contains("--on-unindexed"));
}

#[test]
fn test_version_output() {
    smlm_cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("smlm-sync"))
        .stdout(predicate::str::contains("/rpc/api"))
        .stdout(predicate::str::contains("packages.listProvidingChannels"));
}

#[test]
fn test_completions_bash() {
    smlm_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("smlm-sync"));
}

#[test]
fn test_completions_unknown_shell() {
    smlm_cmd()
        .args(["completions", "tcsh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown shell: tcsh"));
}

#[test]
fn test_missing_subcommand_fails() {
    smlm_cmd().assert().failure();
}

#[test]
fn test_missing_config_file() {
    let dir = TestDir::new();
    let missing = dir.temp.path().join("nope.yaml");

    smlm_cmd()
        .env("SUSE_MANAGER_HOSTNAME", "127.0.0.1")
        .env("SUSE_MANAGER_USER", "apiuser")
        .env("SUSE_MANAGER_PASSWORD", "secret")
        .args(["add-packages", "--config"])
        .arg(&missing)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration file not found"));
}

#[test]
fn test_malformed_config_file() {
    let dir = TestDir::new();
    let config = dir.write("pkg_list.yaml", "name: curl\nversion: [unclosed\n");

    smlm_cmd()
        .args(["add-packages", "--config"])
        .arg(&config)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse configuration file"));
}

#[test]
fn test_missing_server_settings() {
    let dir = TestDir::new();
    let config = dir.write(
        "pkg_list.yaml",
        "- name: curl\n  version: 8.0.0\n  release: 1\n  source_channel: base-os\n  target_channels: [extras]\n",
    );

    smlm_cmd()
        .args(["add-packages", "--config"])
        .arg(&config)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("SUSE_MANAGER_HOSTNAME"))
        .stderr(predicate::str::contains("SUSE_MANAGER_PASSWORD"));
}

#[test]
fn test_list_packages_requires_channel() {
    smlm_cmd()
        .arg("list-packages")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--channel"));
}

#[test]
fn test_unreachable_server() {
    // Bind then drop to get a port nothing listens on
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .and_then(|l| l.local_addr())
        .map(|a| a.port())
        .unwrap();

    smlm_cmd()
        .env("SUSE_MANAGER_HOSTNAME", "127.0.0.1")
        .env("SUSE_MANAGER_PORT", port.to_string())
        .env("SUSE_MANAGER_USER", "apiuser")
        .env("SUSE_MANAGER_PASSWORD", "secret")
        .env("SUSE_MANAGER_SCHEME", "http")
        .args(["list-packages", "--channel", "base-os"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to log in"));
}
