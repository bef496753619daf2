//! Drives the `adh` binary end to end.
//!
//! Everything here runs offline: `ata` and `classify` never fetch, and
//! replay resolution gets its preimage from `--preimage`.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

const SOLANA_OWNER: &str = "9UuMq6FkcZLbCX84sw6L4sVzkNc6VBhTmASRVQoX6HLV";
const MOVE_ADDRESS: &str = "0x34718c95e4f204739ebe79f01fd51825baaab6db96c89a4e28cd43dad19e3aaa";

const OVERRIDE_VARS: [&str; 8] = [
    "ADH_CONFIG",
    "ADH_BASE_URL",
    "ADH_RECEIPT_PROGRAM",
    "ADH_MINT",
    "ADH_TOKEN_PROGRAM",
    "ADH_ASSOCIATED_TOKEN_PROGRAM",
    "ADH_TIMEOUT_MS",
    "RUST_LOG",
];

/// The binary with a clean environment, so only the test's own overrides apply.
fn adh() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_adh"));
    for var in OVERRIDE_VARS {
        cmd.env_remove(var);
    }
    cmd
}

fn stdout_json(cmd: &mut Command) -> Value {
    let assert = cmd.assert().success();
    serde_json::from_slice(&assert.get_output().stdout).unwrap()
}

/// 32 bytes of `0xab`.
const PREIMAGE: &str = "abababababababababababababababababababababababababababababababab";

// ---------------------------------------------------------------------------
// 1. Usage
// ---------------------------------------------------------------------------

#[test]
fn no_arguments_prints_usage_and_succeeds() {
    adh()
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stderr(predicate::str::is_empty());
}

#[test]
fn extra_positional_is_a_usage_error() {
    adh()
        .args(["468526016151814164", "s", "extra"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());
}

// ---------------------------------------------------------------------------
// 2. Replay Address
// ---------------------------------------------------------------------------

#[test]
fn resolves_replay_address_with_supplied_preimage() {
    adh()
        .args([SOLANA_OWNER, "--preimage", PREIMAGE])
        .assert()
        .success()
        .stdout("ReplayAddress: 5GHWb1LzRyWp88cYVW73yeT5jeJ56qJ8CeUi3fb1d7Jm\n");
}

#[test]
fn json_flag_after_identity_is_honoured() {
    let json = stdout_json(adh().args([SOLANA_OWNER, "--preimage", PREIMAGE, "--json"]));
    assert_eq!(json["replay_address"], "5GHWb1LzRyWp88cYVW73yeT5jeJ56qJ8CeUi3fb1d7Jm");
    assert_eq!(json["bump"], 255);
    assert_eq!(json["ecosystem"], "solana");
    assert_eq!(json["chain_code"], 1);
    assert_eq!(json["identity"], SOLANA_OWNER);
}

#[test]
fn flags_before_and_after_identity_agree() {
    let before = stdout_json(adh().args(["--json", "--preimage", PREIMAGE, SOLANA_OWNER]));
    let after = stdout_json(adh().args([SOLANA_OWNER, "--preimage", PREIMAGE, "--json"]));
    assert_eq!(before, after);
}

#[test]
fn hint_is_applied_to_move_addresses() {
    let json = stdout_json(adh().args([MOVE_ADDRESS, "a", "--preimage", "00", "--json"]));
    assert_eq!(json["ecosystem"], "aptos");
    assert_eq!(json["chain_code"], 22);
}

#[test]
fn ambiguous_address_fails_with_message() {
    adh()
        .args([MOVE_ADDRESS, "--preimage", "00"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::starts_with("failed with error:\n"))
        .stderr(predicate::str::contains(
            "Can't automatically distinguish Sui and Aptos addresses",
        ));
}

#[test]
fn unrecognized_identity_fails_with_message() {
    adh()
        .args(["hello", "--preimage", "00"])
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("failed with error:\n"))
        .stderr(predicate::str::contains("Invalid address: 'hello'"));
}

#[test]
fn bad_preimage_hex_fails() {
    adh()
        .args([SOLANA_OWNER, "--preimage", "xyz"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid preimage"));
}

// ---------------------------------------------------------------------------
// 3. Token Account
// ---------------------------------------------------------------------------

#[test]
fn ata_prints_token_account() {
    adh()
        .args(["ata", SOLANA_OWNER])
        .assert()
        .success()
        .stdout("ATA: 531v6L3n4Txwa6vanUz3sVqv8TUjxzqcTj13nDpb1HhR\n");
}

#[test]
fn ata_json_shape() {
    let json = stdout_json(adh().args(["ata", SOLANA_OWNER, "--json"]));
    assert_eq!(json["owner"], SOLANA_OWNER);
    assert_eq!(json["mint"], "85VBFQZC9TZkfaptBWjvUw7YbZjy52A6mjtPGjstQAmQ");
    assert_eq!(json["ata"], "531v6L3n4Txwa6vanUz3sVqv8TUjxzqcTj13nDpb1HhR");
    assert_eq!(json["bump"], 255);
}

#[test]
fn ata_rejects_bad_owner() {
    adh()
        .args(["ata", "not-a-key"])
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("failed with error:\n"))
        .stderr(predicate::str::contains("invalid owner address"));
}

// ---------------------------------------------------------------------------
// 4. Classification Dry Run
// ---------------------------------------------------------------------------

#[test]
fn classify_prints_flat_file_location() {
    adh()
        .args(["classify", "123456789012345678"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Address:    123456789012345678"))
        .stdout(predicate::str::contains("Ecosystem:  Discord"))
        .stdout(predicate::str::contains("Chain code: 14443"))
        .stdout(predicate::str::contains(
            "Flat file:  https://prod-flat-files-min.wormhole.com/123456789012345678_14443.json",
        ));
}

#[test]
fn classify_json_shape() {
    let json = stdout_json(adh().args([
        "classify",
        "0x000000000000A25D11D75BDD1EBF1397DB20BBC1",
        "--json",
    ]));
    assert_eq!(json["address"], "0x000000000000a25d11d75bdd1ebf1397db20bbc1");
    assert_eq!(json["ecosystem"], "ethereum");
    assert_eq!(json["chain_code"], 2);
    assert_eq!(
        json["url"],
        "https://prod-flat-files-min.wormhole.com/0x000000000000a25d11d75bdd1ebf1397db20bbc1_2.json"
    );
}

#[test]
fn base_url_override_from_environment() {
    let json = stdout_json(
        adh()
            .env("ADH_BASE_URL", "http://127.0.0.1:8080/files/")
            .args(["classify", "123456789012345678", "--json"]),
    );
    assert_eq!(json["url"], "http://127.0.0.1:8080/files/123456789012345678_14443.json");
}

#[test]
fn invalid_configuration_is_reported() {
    adh()
        .args(["classify", "123456789012345678", "--base-url", "ftp://nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid configuration"));
}
