//! list-packages against a mock SUSE Manager endpoint

mod common;

use common::{MockPackage, SumaMock};
use predicates::prelude::*;

#[test]
fn test_lists_channel_packages() {
    let suma = SumaMock::start();
    let login = suma.login();
    let logout = suma.logout();
    let listing = suma.channel(
        "base-os",
        &[
            MockPackage::new(101, "curl", "8.0.0", "1"),
            MockPackage::new(202, "wget", "1.21.4", "3"),
        ],
    );

    suma.command()
        .args(["list-packages", "--channel", "base-os"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 packages in channel base-os"))
        .stdout(predicate::str::contains("curl"))
        .stdout(predicate::str::contains("1.21.4"))
        .stdout(predicate::str::contains("202"));

    login.assert_hits(1);
    listing.assert_hits(1);
    logout.assert_hits(1);
}

#[test]
fn test_empty_channel_warns() {
    let suma = SumaMock::start();
    suma.login();
    suma.logout();
    suma.channel("base-os", &[]);

    suma.command()
        .args(["list_packages", "--channel", "base-os"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 0 packages"))
        .stderr(predicate::str::contains("No packages found in channel"));
}

#[test]
fn test_unknown_channel_fails_after_logout() {
    let suma = SumaMock::start();
    suma.login();
    let logout = suma.logout();
    suma.unknown_channel("no-such");

    suma.command()
        .args(["list-packages", "--channel", "no-such"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No such channel: no-such"));

    logout.assert_hits(1);
}

#[test]
fn test_json_listing() {
    let suma = SumaMock::start();
    suma.login();
    suma.logout();
    suma.channel("base-os", &[MockPackage::new(101, "curl", "8.0.0", "1")]);

    let output = suma
        .command()
        .args(["list-packages", "--json", "--channel", "base-os"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let packages: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(packages[0]["name"], "curl");
    assert_eq!(packages[0]["id"], 101);
    assert_eq!(packages[0]["arch_label"], "x86_64");
}
