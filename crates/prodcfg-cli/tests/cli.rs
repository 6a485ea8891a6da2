//! CLI integration tests over the demo data directory.

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data")
}

fn prodcfg() -> Command {
    let mut cmd = Command::cargo_bin("prodcfg").unwrap();
    cmd.env_remove("PRODCFG_CONFIG")
        .env_remove("RUST_LOG")
        .arg("--data-dir")
        .arg(data_dir());
    cmd
}

// =============================================================================
// RESOLVE
// =============================================================================

#[test]
fn test_resolve_valid_path_as_json() {
    prodcfg()
        .args(["resolve", "tshirt", "M/white/10", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""configPath": "M/white/10""#))
        .stdout(predicate::str::contains(r#""repaired": false"#));
}

#[test]
fn test_resolve_adjusts_unavailable_option() {
    // Large is out of stock in red.
    prodcfg()
        .args(["resolve", "tshirt", "L/red/5", "--format", "minimal"])
        .assert()
        .success()
        .stdout("S/red/5\n");
}

#[test]
fn test_resolve_clamps_quantity_to_formula_bound() {
    prodcfg()
        .args(["resolve", "tshirt", "M/red/300", "--format", "minimal"])
        .assert()
        .success()
        .stdout("M/red/100\n");
}

#[test]
fn test_resolve_strict_rejects_adjustment() {
    prodcfg()
        .args(["resolve", "tshirt", "L/red/5", "--strict"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot configure 'tshirt'"))
        .stderr(predicate::str::contains("S/red/5"));
}

#[test]
fn test_resolve_table_output() {
    prodcfg()
        .args(["resolve", "tshirt", "M/black/2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Classic T-Shirt"))
        .stdout(predicate::str::contains("Parameters"))
        .stdout(predicate::str::contains("Prices"))
        .stdout(predicate::str::contains("101"));
}

#[test]
fn test_resolve_disabled_and_unknown_products() {
    prodcfg()
        .args(["resolve", "mug"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("disabled"));

    prodcfg()
        .args(["resolve", "kettle"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("kettle"));
}

// =============================================================================
// CHECK AND DEFAULTS
// =============================================================================

#[test]
fn test_check_valid_path() {
    prodcfg()
        .args(["check", "tshirt", "M/white/10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("valid configuration"));
}

#[test]
fn test_check_suggests_nearest_configuration() {
    // Frames are not offered for A3.
    prodcfg()
        .args(["check", "poster", "A3/oak"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nearest valid configuration: 'A3/none'"));

    prodcfg()
        .args(["check", "poster", "A2/oak", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""valid": true"#));
}

#[test]
fn test_defaults() {
    prodcfg()
        .args(["defaults", "poster", "--format", "minimal"])
        .assert()
        .success()
        .stdout("A3/none\n");

    prodcfg()
        .args(["defaults", "tshirt", "--format", "minimal"])
        .assert()
        .success()
        .stdout("S/white/1\n");
}

// =============================================================================
// LIST AND CONFIGURATION
// =============================================================================

#[test]
fn test_list_products() {
    prodcfg()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("tshirt"))
        .stdout(predicate::str::contains("mug"))
        .stdout(predicate::str::contains("apparel").not());

    prodcfg()
        .args(["list", "--enabled", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("poster"))
        .stdout(predicate::str::contains("mug").not());
}

#[test]
fn test_config_file_locates_data() {
    let config = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../config/prodcfg.toml");
    Command::cargo_bin("prodcfg")
        .unwrap()
        .env_remove("PRODCFG_DATA_DIR")
        .arg("--config")
        .arg(config)
        .args(["defaults", "tshirt", "--format", "minimal"])
        .assert()
        .success()
        .stdout("S/white/1\n");
}

#[test]
fn test_missing_data_dir() {
    let dir = tempfile::tempdir().unwrap();
    Command::cargo_bin("prodcfg")
        .unwrap()
        .arg("--data-dir")
        .arg(dir.path())
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("registry file"));
}
