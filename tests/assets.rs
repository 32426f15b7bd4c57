use assert_cmd::Command;
use tempfile::TempDir;

#[test]
fn test_generate_assets_writes_man_page_and_completions() {
    let tmp = TempDir::new().unwrap();

    Command::cargo_bin("generate-assets")
        .unwrap()
        .arg(tmp.path())
        .assert()
        .success();

    let man = std::fs::read_to_string(tmp.path().join("man/hdfs-ls.1")).unwrap();
    assert!(man.contains("hdfs"), "man page should name the command");
    assert!(tmp.path().join("completions/hdfs-ls.bash").exists());
    assert!(tmp.path().join("completions/hdfs-ls.fish").exists());
}

#[test]
fn test_generate_assets_limits_output_to_requested_shells() {
    let tmp = TempDir::new().unwrap();

    let assert = Command::cargo_bin("generate-assets")
        .unwrap()
        .arg(tmp.path())
        .args(["--shell", "fish", "--no-man"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert_eq!(stdout.lines().count(), 1, "one file per line: {stdout}");
    assert!(stdout.contains("hdfs-ls.fish"));
    assert!(tmp.path().join("completions/hdfs-ls.fish").exists());
    assert!(!tmp.path().join("completions/hdfs-ls.bash").exists());
    assert!(!tmp.path().join("man").exists());
}
