use assert_cmd::prelude::*;
use std::path::Path;
use std::process::Command;

fn iso_image(len: usize) -> Vec<u8> {
    let mut data: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();
    data[..0x8000].fill(0);
    data[0x8000..0x8006].copy_from_slice(b"\x01CD001");
    data
}

fn cvmutil() -> Command {
    let mut cmd = Command::cargo_bin("cvmutil").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

fn stderr(assert: &assert_cmd::assert::Assert) -> String {
    String::from_utf8_lossy(&assert.get_output().stderr).into_owned()
}

#[test]
fn test_cli_usage_errors() {
    cvmutil().assert().failure().code(254);
    cvmutil().arg("-x").arg("in.iso").assert().failure().code(254);
    cvmutil()
        .args(["a.iso", "b.cvm", "c.cvm"])
        .assert()
        .failure()
        .code(254);
}

#[test]
fn test_cli_last_direction_flag_wins() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("disc.iso");
    let iso = iso_image(0x10000);
    std::fs::write(&input, &iso).unwrap();

    let assert = cvmutil().arg("-d").arg("-e").arg(&input).assert().success();
    assert!(stderr(&assert).contains("ENCODING: requested by caller"));
    let cvm_path = dir.path().join("disc.iso.cvm");
    let cvm = std::fs::read(&cvm_path).unwrap();
    assert_eq!(cvm.len(), iso.len() + 0x1800);

    let out = dir.path().join("back.iso");
    let assert = cvmutil()
        .args(["-e", "-d"])
        .arg(&cvm_path)
        .arg(&out)
        .assert()
        .success();
    assert!(stderr(&assert).contains("DECODING: requested by caller"));
    assert_eq!(std::fs::read(&out).unwrap(), iso);
}

#[test]
fn test_cli_help() {
    let assert = cvmutil().arg("--help").assert().success();
    let help = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    assert!(help.contains("Encodes .iso to .cvm"));
    assert!(help.contains("Decodes .cvm to .iso"));
    assert!(help.contains("automatically derived from infile"));
}

#[test]
fn test_cli_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.iso");
    let assert = cvmutil().arg(&missing).assert().failure().code(1);
    assert!(stderr(&assert).contains("Cannot open input path"));
}

#[test]
fn test_cli_too_small() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("small.iso");
    std::fs::write(&input, iso_image(0x10000)[..0xFFFF].to_vec()).unwrap();

    let assert = cvmutil().arg(&input).assert().failure().code(1);
    assert!(stderr(&assert).contains("too small"));
    assert!(!dir.path().join("small.iso.cvm").exists());
    assert!(!dir.path().join("small.iso.iso").exists());

    cvmutil().arg("-e").arg(&input).assert().failure().code(1);
    assert!(!dir.path().join("small.iso.cvm").exists());
}

#[test]
fn test_cli_unknown_format() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("blank.bin");
    std::fs::write(&input, vec![0u8; 0x10000]).unwrap();

    let assert = cvmutil().arg(&input).assert().failure().code(2);
    assert!(stderr(&assert).contains("could not detect"));
    assert!(!dir.path().join("blank.bin.cvm").exists());

    // forcing a direction skips detection
    cvmutil().arg("-e").arg(&input).assert().success();
    assert_eq!(
        std::fs::metadata(dir.path().join("blank.bin.cvm"))
            .unwrap()
            .len(),
        0x11800
    );
}

#[test]
fn test_cli_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("disc.iso");
    let iso = iso_image(0x23456);
    std::fs::write(&input, &iso).unwrap();

    let assert = cvmutil().arg(&input).assert().success();
    assert!(stderr(&assert).contains("ENCODING: auto-detected ISO9660 header"));
    let cvm_path = dir.path().join("disc.iso.cvm");
    let cvm = std::fs::read(&cvm_path).unwrap();
    assert_eq!(cvm.len(), iso.len() + 0x1800);
    assert_eq!(&cvm[..4], b"CVMH");

    let out = dir.path().join("back.iso");
    let assert = cvmutil().arg(&cvm_path).arg(&out).assert().success();
    assert!(stderr(&assert).contains("DECODING: auto-detected CVM header"));
    assert_eq!(std::fs::read(&out).unwrap(), iso);

    cvmutil().arg("-d").arg(&cvm_path).assert().success();
    assert_eq!(
        std::fs::read(dir.path().join("disc.iso.cvm.iso")).unwrap(),
        iso
    );
}

#[test]
fn test_cli_product_code() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("disc.iso");
    std::fs::write(&input, iso_image(0x10000)).unwrap();

    let default = dir.path().join("default.cvm");
    let other = dir.path().join("other.cvm");
    cvmutil().arg(&input).arg(&default).assert().success();
    cvmutil()
        .args(["-p", "SLPM_123.45"])
        .arg(&input)
        .arg(&other)
        .assert()
        .success();
    assert_ne!(
        std::fs::read(&default).unwrap(),
        std::fs::read(&other).unwrap()
    );
}

#[test]
fn test_cli_header_template() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("disc.iso");
    std::fs::write(&input, iso_image(0x10000)).unwrap();

    let template = dir.path().join("cvmhead.bin");
    let mut bytes = vec![0x5A; 0x1800];
    bytes[..4].copy_from_slice(b"CVMH");
    std::fs::write(&template, &bytes).unwrap();

    let out = dir.path().join("out.cvm");
    cvmutil()
        .arg("--header")
        .arg(&template)
        .arg(&input)
        .arg(&out)
        .assert()
        .success();
    let cvm = std::fs::read(&out).unwrap();
    assert_eq!(&cvm[0x40..0x1000], &bytes[0x40..0x1000]);
    assert_eq!(&cvm[0x20..0x24], &[0x00, 0x01, 0x18, 0x00]);

    let bad = dir.path().join("short.bin");
    std::fs::write(&bad, vec![0; 0x800]).unwrap();
    let assert = cvmutil()
        .arg("--header")
        .arg(&bad)
        .arg(&input)
        .assert()
        .failure()
        .code(1);
    assert!(stderr(&assert).contains("header template"));
    assert!(!Path::new(&format!("{}.cvm", input.display())).exists());
}

#[test]
fn test_cli_header_template_missing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("disc.iso");
    std::fs::write(&input, iso_image(0x10000)).unwrap();

    let template = dir.path().join("cvmhead.bin");
    let assert = cvmutil()
        .arg("--header")
        .arg(&template)
        .arg(&input)
        .assert()
        .failure()
        .code(1);
    let err = stderr(&assert);
    assert!(err.contains("Cannot open header template"));
    assert!(err.contains("cvmhead.bin"));
    assert!(!err.contains("Cannot open input path"));
    assert!(!dir.path().join("disc.iso.cvm").exists());
}
