//! End-to-end tests for the tstidy binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Full config content with every field present, as the loader requires
const CONFIG_OBJECTS_ONE_PER_LINE: &str = r#"{
    "indentation": { "type": "spaces", "size": 2 },
    "importFormat": { "spacesAroundImports": true },
    "maxLineLength": 100,
    "objectFormatting": { "maxPropertiesPerLine": 1, "trailingComma": false },
    "typeFormatting": { "maxPropertiesPerLine": 3, "trailingSemicolon": true },
    "arrayFormatting": { "maxElementsPerLine": 3, "trailingSemicolon": true }
}"#;

const CONFIG_TABS: &str = r#"{
    "indentation": { "type": "tabs", "size": 1 },
    "importFormat": { "spacesAroundImports": true },
    "maxLineLength": 100,
    "objectFormatting": { "maxPropertiesPerLine": 1, "trailingComma": false },
    "typeFormatting": { "maxPropertiesPerLine": 3, "trailingSemicolon": true },
    "arrayFormatting": { "maxElementsPerLine": 3, "trailingSemicolon": true }
}"#;

fn tstidy() -> Command {
    let mut cmd = Command::cargo_bin("tstidy").unwrap();
    cmd.env("NO_COLOR", "1");
    cmd
}

fn write_file(root: &Path, rel: &str, content: &str) -> PathBuf {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn fmt_single_file_prints_to_stdout() {
    let temp = TempDir::new().unwrap();
    let file = write_file(temp.path(), "input.ts", "const x = {a: 1};");

    tstidy()
        .arg("fmt")
        .arg(&file)
        .assert()
        .success()
        .stdout("const x = { a: 1 };");

    // Stdout mode never writes back
    assert_eq!(fs::read_to_string(&file).unwrap(), "const x = {a: 1};");
}

#[test]
fn format_alias_matches_fmt() {
    let temp = TempDir::new().unwrap();
    let file = write_file(temp.path(), "input.ts", "const x = {a: 1};");

    tstidy()
        .arg("format")
        .arg(&file)
        .assert()
        .success()
        .stdout("const x = { a: 1 };");
}

#[test]
fn fmt_default_run_reports_without_writing() {
    let temp = TempDir::new().unwrap();
    let file = write_file(temp.path(), "input.ts", "const x = {a: 1};");

    tstidy()
        .arg("fmt")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("would reformat"))
        .stdout(predicate::str::contains(
            "1 file would be reformatted (run with --write to apply)",
        ));

    assert_eq!(fs::read_to_string(&file).unwrap(), "const x = {a: 1};");
}

#[test]
fn fmt_write_formats_in_place() {
    let temp = TempDir::new().unwrap();
    let file = write_file(temp.path(), "input.ts", "const x = {a :1};");

    tstidy()
        .arg("fmt")
        .arg("--write")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Applied formatting to 1 file"));

    assert_eq!(fs::read_to_string(&file).unwrap(), "const x = { a: 1 };");

    // A second run finds nothing left to change
    tstidy()
        .arg("fmt")
        .arg("--write")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("All files are formatted correctly"));
}

#[test]
fn fmt_check_exits_one_on_unformatted_input() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "bad.ts", "const x = {a: 1};");

    tstidy()
        .arg("fmt")
        .arg("--check")
        .arg(temp.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("would reformat"))
        .stdout(predicate::str::contains("1 file would be reformatted"));
}

#[test]
fn fmt_check_passes_on_formatted_input() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "good.ts", "const x = { a: 1 };");

    tstidy()
        .arg("fmt")
        .arg("--check")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("All files are formatted correctly"));
}

#[test]
fn fmt_diff_shows_changes_without_writing() {
    let temp = TempDir::new().unwrap();
    let file = write_file(temp.path(), "input.ts", "const x = {a: 1};");

    tstidy()
        .arg("fmt")
        .arg("--diff")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("input.ts"))
        .stdout(predicate::str::contains("- "))
        .stdout(predicate::str::contains("+ "))
        .stdout(predicate::str::contains("{ a: 1 }"));

    assert_eq!(fs::read_to_string(&file).unwrap(), "const x = {a: 1};");
}

#[test]
fn fmt_discovers_config_next_to_target() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), ".tstidyrc.json", CONFIG_OBJECTS_ONE_PER_LINE);
    let file = write_file(temp.path(), "input.ts", "const o = {a: 1, b: 2};");

    tstidy()
        .arg("fmt")
        .arg(&file)
        .assert()
        .success()
        .stdout("const o = {\n  a: 1,\n  b: 2\n};");
}

#[test]
fn fmt_explicit_config_flag_overrides_discovery() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), ".tstidyrc.json", CONFIG_OBJECTS_ONE_PER_LINE);
    let custom = write_file(temp.path(), "custom.json", CONFIG_TABS);
    let file = write_file(temp.path(), "input.ts", "const o = {a: 1, b: 2};");

    tstidy()
        .arg("fmt")
        .arg("--config")
        .arg(&custom)
        .arg(&file)
        .assert()
        .success()
        .stdout("const o = {\n\ta: 1,\n\tb: 2\n};");
}

#[test]
fn fmt_missing_config_file_is_fatal() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "input.ts", "const x = 1;");

    tstidy()
        .arg("fmt")
        .arg("--config")
        .arg(temp.path().join("no-such.json"))
        .arg(temp.path())
        .assert()
        .code(2);
}

#[test]
fn fmt_missing_source_file_fails_the_run() {
    let temp = TempDir::new().unwrap();

    tstidy()
        .arg("fmt")
        .arg(temp.path().join("ghost.ts"))
        .assert()
        .code(1);
}

#[test]
fn fmt_indent_size_flag_overrides_config() {
    let temp = TempDir::new().unwrap();
    let file = write_file(
        temp.path(),
        "input.ts",
        "function f() { const o = {a: 1, b: 2, c: 3, d: 4}; }",
    );

    tstidy()
        .arg("fmt")
        .arg("--indent-size")
        .arg("4")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("\n    const o = {\n        a: 1,"));
}

#[test]
fn fmt_exclude_patterns_filter_directory_walk() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "src/app.ts", "const x = {a: 1};");
    write_file(temp.path(), "src/app.test.ts", "const y = {b: 2};");

    tstidy()
        .arg("fmt")
        .arg("--check")
        .arg(temp.path())
        .arg("--exclude")
        .arg("**/*.test.ts")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("1 files checked"))
        .stdout(predicate::str::contains("app.test.ts").not());
}

#[test]
fn fmt_include_patterns_narrow_directory_walk() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "src/app.ts", "const x = {a: 1};");
    write_file(temp.path(), "lib/other.ts", "const y = {b: 2};");

    tstidy()
        .arg("fmt")
        .arg("--check")
        .arg(temp.path())
        .arg("--include")
        .arg("src/**/*.ts")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("1 files checked"))
        .stdout(predicate::str::contains("other.ts").not());
}

#[test]
fn fmt_glob_argument_expands_relative_to_cwd() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "src/a.ts", "const x = {a: 1};");
    write_file(temp.path(), "src/b.tsx", "const y = {b: 2};");

    tstidy()
        .current_dir(temp.path())
        .arg("fmt")
        .arg("--check")
        .arg("src/*.ts")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("1 files checked"))
        .stdout(predicate::str::contains("b.tsx").not());
}

#[test]
fn fmt_empty_directory_finds_nothing() {
    let temp = TempDir::new().unwrap();

    tstidy()
        .arg("fmt")
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No TypeScript files found"));
}

#[test]
fn fmt_skips_unsupported_extensions() {
    let temp = TempDir::new().unwrap();
    let readme = write_file(temp.path(), "README.md", "# notes\n");

    tstidy()
        .arg("fmt")
        .arg(&readme)
        .assert()
        .success()
        .stdout(predicate::str::contains("No TypeScript files found"));
}

#[test]
fn config_init_writes_a_loadable_file() {
    let temp = TempDir::new().unwrap();

    tstidy()
        .current_dir(temp.path())
        .arg("config")
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created configuration file"));

    let written = fs::read_to_string(temp.path().join(".tstidyrc.json")).unwrap();
    assert!(written.contains("\"indentation\""));
    assert!(written.contains("\"maxLineLength\""));

    tstidy()
        .current_dir(temp.path())
        .arg("config")
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}

#[test]
fn config_init_refuses_overwrite_without_force() {
    let temp = TempDir::new().unwrap();

    tstidy()
        .current_dir(temp.path())
        .arg("config")
        .arg("init")
        .assert()
        .success();

    tstidy()
        .current_dir(temp.path())
        .arg("config")
        .arg("init")
        .assert()
        .code(2);

    tstidy()
        .current_dir(temp.path())
        .arg("config")
        .arg("init")
        .arg("--force")
        .assert()
        .success();
}

#[test]
fn config_init_supports_toml() {
    let temp = TempDir::new().unwrap();

    tstidy()
        .current_dir(temp.path())
        .arg("config")
        .arg("init")
        .arg("--format")
        .arg("toml")
        .assert()
        .success();

    let written = fs::read_to_string(temp.path().join(".tstidyrc.toml")).unwrap();
    assert!(written.contains("[indentation]"));

    tstidy()
        .current_dir(temp.path())
        .arg("config")
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}

#[test]
fn config_show_prints_resolved_configuration() {
    let temp = TempDir::new().unwrap();

    tstidy()
        .current_dir(temp.path())
        .arg("config")
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("maxLineLength"))
        .stdout(predicate::str::contains("objectFormatting"));
}

#[test]
fn config_validate_rejects_incomplete_file() {
    let temp = TempDir::new().unwrap();
    let partial = write_file(temp.path(), "partial.json", r#"{ "maxLineLength": 80 }"#);

    tstidy()
        .arg("config")
        .arg("validate")
        .arg(&partial)
        .assert()
        .code(2);
}

#[test]
fn version_prints_package_version() {
    tstidy()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn bare_invocation_shows_help() {
    tstidy()
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("fmt"));
}
