use assert_cmd::Command;

#[test]
fn queries_lists_every_registered_name() {
    let output = Command::cargo_bin("bookshelf-cli")
        .unwrap()
        .arg("queries")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "author\tlast-modified",
            "author\tmost-books",
            "book\tby-date",
            "book\tlast-modified",
            "book\tlongest",
            "book\toldest",
        ]
    );
}

#[test]
fn config_prints_environment_overrides() {
    let output = Command::cargo_bin("bookshelf-cli")
        .unwrap()
        .arg("config")
        .env("BOOKSHELF_CONFIG_DIR", env!("CARGO_MANIFEST_DIR"))
        .env("BOOKSHELF_SERVER__PORT", "9191")
        .output()
        .unwrap();

    assert!(output.status.success());
    let settings: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(settings["server"]["port"], 9191);
    assert_eq!(settings["telemetry"]["log_level"], "info");
}

#[test]
fn unknown_subcommand_fails() {
    Command::cargo_bin("bookshelf-cli")
        .unwrap()
        .arg("reindex")
        .assert()
        .failure();
}
