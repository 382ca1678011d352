use assert_cmd::prelude::*;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;
use tempfile::tempdir;

mod common;

#[test]
fn lists_keys_with_their_values() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempdir()?;
    let file = tmp.path().join("app.js");
    fs::write(&file, "const alpha = 1;\nlet beta = alpha;\n")?;

    common::cli(tmp.path())?
        .arg("terms")
        .arg(&file)
        .assert()
        .success()
        .stdout(contains("name (2)").and(contains("alpha, beta")).and(contains("declarations (0)")));
    Ok(())
}

#[test]
fn suggests_values_for_a_key() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempdir()?;
    let file = tmp.path().join("app.js");
    fs::write(&file, "const Alpha = 1;\nlet beta = 2;\nvar alphabet;\n")?;

    let output = common::cli(tmp.path())?
        .args(["terms", "--key", "name", "--match", "ALPHA"])
        .arg(&file)
        .output()?;
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout)?, "Alpha\nalphabet\n");
    Ok(())
}

#[test]
fn json_output_is_an_ordered_map() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempdir()?;
    let file = tmp.path().join("ast.json");
    fs::write(
        &file,
        r#"{"type": "Program", "body": [{"type": "Identifier", "name": "x"}], "sourceType": "script"}"#,
    )?;

    let output = common::cli(tmp.path())?
        .args(["terms", "--format", "json"])
        .arg(&file)
        .output()?;
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys, ["type", "body", "name", "sourceType"]);
    assert_eq!(value["type"], serde_json::json!(["Program", "Identifier"]));
    assert_eq!(value["body"], serde_json::json!([]));
    Ok(())
}

#[test]
fn match_requires_key() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempdir()?;
    let file = tmp.path().join("app.js");
    fs::write(&file, "x;")?;
    common::cli(tmp.path())?
        .args(["terms", "--match", "x"])
        .arg(&file)
        .assert()
        .failure();
    Ok(())
}
