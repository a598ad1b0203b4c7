//! File conversion integration tests.

use std::fs;

use delta_cli::{convert, convert_file, load_config};
use delta_tests::prelude::*;
use pretty_assertions::assert_eq;

#[test]
fn test_fixture_converts_to_file() {
    // GIVEN
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("blocks.soar");
    let config = DeltaConfig::default();

    // WHEN
    let summary = convert_file(&fixture_path("blocks_world.delta"), &output, &config).unwrap();

    // THEN
    let written = fs::read_to_string(&output).unwrap();
    let source = fs::read_to_string(fixture_path("blocks_world.delta")).unwrap();
    assert_eq!(written, convert(&source, &config).unwrap());
    assert!(written.starts_with(&"#".repeat(77)));
    assert!(written.contains("\r\nsmem --add {\r\n"));
    assert!(written.ends_with("}\r\n\r\n"));
    assert_eq!(summary.contexts, 2);
    assert_eq!(summary.prims, 8);
}

#[test]
fn test_output_is_byte_identical_across_runs() {
    let dir = tempfile::tempdir().unwrap();
    let config = DeltaConfig::default();
    let first = dir.path().join("first.soar");
    let second = dir.path().join("second.soar");

    convert_file(&fixture_path("multi_attribute.delta"), &first, &config).unwrap();
    convert_file(&fixture_path("multi_attribute.delta"), &second, &config).unwrap();

    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

#[test]
fn test_failing_input_leaves_destination_untouched() {
    // GIVEN
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.delta");
    let output = dir.path().join("out.soar");
    fs::write(&input, "(problem-space p (ins r (wme x)))").unwrap();
    fs::write(&output, "keep me").unwrap();

    // WHEN
    let err = convert_file(&input, &output, &DeltaConfig::default()).unwrap_err();

    // THEN
    assert_eq!(err.kind(), ErrorKind::Structural);
    assert_eq!(fs::read_to_string(&output).unwrap(), "keep me");
}

#[test]
fn test_config_file_changes_output_constants() {
    // GIVEN
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("delta.json");
    fs::write(
        &config_path,
        r##"{ "emit": { "banner": ["# generated"], "line_ending": "\n" } }"##,
    )
    .unwrap();

    // WHEN
    let config = load_config(&config_path).unwrap();
    let out = convert("(problem-space p)", &config).unwrap();

    // THEN
    assert!(out.starts_with("# generated\n\nsmem --add {\n"));
    assert!(!out.contains('\r'));
}
