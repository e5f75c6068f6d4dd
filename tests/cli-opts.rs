use assert_cmd::Command;

const BIN: &str = "zawodyctl";

#[test]
fn test_empty_args() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.assert().failure();
}

#[test]
fn test_help() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("-h").assert().success();
}

#[test]
fn test_version_keyword() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("version").assert().success();
}

#[test]
fn test_bad_keyword() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("bouh").assert().failure();
}

#[test]
fn test_completion() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("completion").arg("zsh").assert().success();
}

#[test]
fn test_verify_without_export() {
    let dir = tempfile::tempdir().unwrap();
    let absent = dir.path().join("competitions.json");

    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("verify")
        .arg("-f")
        .arg(&absent)
        .assert()
        .failure();
}

#[test]
fn test_verify_with_export() {
    let dir = tempfile::tempdir().unwrap();
    let json = dir.path().join("competitions.json");
    std::fs::write(
        &json,
        r#"[{"club":"KS A","location":"Poznań","latitude":null,"longitude":null,"website":""}]"#,
    )
    .unwrap();

    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("verify").arg("-f").arg(&json).assert().success();
}
