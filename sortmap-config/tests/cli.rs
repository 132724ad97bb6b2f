//! End-to-end checks of the `sortmap` binary against the demo mapping file.

use std::path::PathBuf;

use assert_cmd::Command;

fn demo(file: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../demos")
        .join(file)
}

fn sortmap(args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("sortmap").expect("sortmap binary");
    cmd.env_remove("SORTMAP_CONFIG_PATH")
        .env_remove("SORTMAP_CONFIG_JSON")
        .env("RUST_LOG", "warn")
        .arg("--config")
        .arg(demo("mappings.toml"))
        .args(args);
    cmd
}

fn stdout(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).expect("utf8 stdout")
}

const PAIR: [&str; 4] = ["--public", "AuthorDto", "--internal", "Author"];

#[test]
fn show_lists_fields() {
    let out = stdout(&mut sortmap(&["show"]));
    assert!(out.contains("AuthorDto -> Author"));
    assert!(out.contains("Age: DateOfBirth (revert)"));
    assert!(out.contains("Name: Firstname, Lastname"));
}

#[test]
fn validate_reports_unknown_field() {
    let mut ok = sortmap(&["validate"]);
    ok.args(PAIR).args(["--fields", "name, AGE desc"]);
    assert_eq!(stdout(&mut ok).trim(), "valid");

    let mut bad = sortmap(&["validate"]);
    bad.args(PAIR).args(["--fields", "Name,Title"]);
    let output = bad.assert().failure().get_output().stdout.clone();
    assert_eq!(
        String::from_utf8(output).unwrap().trim(),
        "invalid (unknown field: Title)"
    );
}

#[test]
fn sort_prints_ordered_page() {
    let records = demo("authors.json");
    let mut cmd = sortmap(&["sort"]);
    cmd.args(PAIR)
        .args(["--order-by", "Age", "--limit", "2", "--records"])
        .arg(&records);

    let sorted: Vec<serde_json::Value> = serde_json::from_str(&stdout(&mut cmd)).unwrap();
    let ids: Vec<i64> = sorted.iter().map(|r| r["Id"].as_i64().unwrap()).collect();
    assert_eq!(ids, [3, 4]);
}

#[test]
fn plan_prints_order_by_clause() {
    let mut cmd = sortmap(&["sort"]);
    cmd.args(PAIR).args(["--order-by", "Name,Age desc", "--plan"]);

    let out = stdout(&mut cmd);
    assert!(out.contains(r#"ORDER BY "Firstname" ASC, "Lastname" ASC, "DateOfBirth" ASC"#));
}
