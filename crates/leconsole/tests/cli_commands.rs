use clap::Parser;
use leconsole::{Cli, OutputFormat, ProjectConfig};
use rstest::rstest;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

const RUST_SOURCE: &str = "fn main() {}";

fn run(args: &[&str]) -> anyhow::Result<String> {
    let cli = Cli::try_parse_from(std::iter::once("lerendu").chain(args.iter().copied()))?;
    let mut out = Vec::new();
    cli.execute(&mut out)?;
    Ok(String::from_utf8(out)?)
}

fn project_with(files: &[(&str, &str)]) -> TempDir {
    let dir = tempdir().unwrap();
    for (name, contents) in files {
        fs::write(dir.path().join(name), contents).unwrap();
    }
    dir
}

fn write_config(dir: &Path, toml: &str) -> String {
    let path = dir.join("lerendu.toml");
    fs::write(&path, toml).unwrap();
    path.display().to_string()
}

fn path_str(dir: &TempDir, name: &str) -> String {
    dir.path().join(name).display().to_string()
}

#[test]
fn tree_prints_named_nodes() {
    let dir = project_with(&[("main.rs", RUST_SOURCE)]);
    let config = write_config(dir.path(), "");
    let output = run(&["tree", &path_str(&dir, "main.rs"), "-c", &config]).unwrap();
    assert_eq!(
        output,
        "source_file [0, 0] - [0, 12]\n\
         \x20 function_item [0, 0] - [0, 12]\n\
         \x20   identifier [0, 3] - [0, 7]\n\
         \x20   parameters [0, 7] - [0, 9]\n\
         \x20   block [0, 10] - [0, 12]\n"
    );
}

#[test]
fn tree_flags_override_config() {
    let dir = project_with(&[("main.rs", RUST_SOURCE)]);
    let config = write_config(dir.path(), "[render]\nhide_unnamed = true\n");
    let output = run(&[
        "tree",
        &path_str(&dir, "main.rs"),
        "-c",
        &config,
        "--fields",
        "--all",
    ])
    .unwrap();
    assert!(output.contains("    name: identifier [0, 3] - [0, 7]\n"));
    assert!(output.contains("    fn [0, 0] - [0, 2]\n"));
}

#[test]
fn tree_uses_config_defaults() {
    let dir = project_with(&[("main.rs", RUST_SOURCE)]);
    let config = write_config(
        dir.path(),
        "[render]\nshow_field_names = true\niterative = true\n",
    );
    let output = run(&["tree", &path_str(&dir, "main.rs"), "-c", &config]).unwrap();
    assert!(output.contains("    body: block [0, 10] - [0, 12]\n"));
}

#[test]
fn tree_json_output() {
    let dir = project_with(&[("main.rs", RUST_SOURCE)]);
    let config = write_config(dir.path(), "");
    let output = run(&[
        "tree",
        &path_str(&dir, "main.rs"),
        "-c",
        &config,
        "--format",
        "json",
    ])
    .unwrap();

    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    let files = value.as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["language"], "Rust");
    let records = files[0]["records"].as_array().unwrap();
    assert_eq!(records.len(), 5);
    assert_eq!(records[2]["name"], "identifier");
    assert_eq!(records[2]["startPosition"]["column"], 3);
    assert!(files[0].get("error").is_none());
}

#[test]
fn tree_html_output() {
    let dir = project_with(&[("main.rs", RUST_SOURCE)]);
    let config = write_config(dir.path(), "[render]\nformat = \"html\"\n");
    let output = run(&["tree", &path_str(&dir, "main.rs"), "-c", &config]).unwrap();
    assert!(output.starts_with("<section data-path="));
    assert_eq!(output.matches("<li ").count(), 5);
    assert!(output.trim_end().ends_with("</section>"));
}

#[test]
fn tree_multiple_files_get_headers() {
    let dir = project_with(&[("a.rs", RUST_SOURCE), ("b.json", "[1]")]);
    let config = write_config(dir.path(), "");
    let output = run(&[
        "tree",
        &path_str(&dir, "a.rs"),
        &path_str(&dir, "b.json"),
        "-c",
        &config,
    ])
    .unwrap();
    let a_header = format!("==> {} <==", path_str(&dir, "a.rs"));
    let b_header = format!("==> {} <==", path_str(&dir, "b.json"));
    let a_at = output.find(&a_header).unwrap();
    let b_at = output.find(&b_header).unwrap();
    assert!(a_at < b_at);
    assert!(output.contains("  array [0, 0] - [0, 3]\n"));
}

#[test]
fn tree_alias_from_config() {
    let dir = project_with(&[("data.cfg", "{\"a\": 1}")]);
    let config = write_config(dir.path(), "[languages.aliases]\ncfg = \"json\"\n");
    let output = run(&["tree", &path_str(&dir, "data.cfg"), "-c", &config]).unwrap();
    assert!(output.starts_with("document [0, 0] - [0, 8]\n"));
}

#[test]
fn tree_reports_failed_files() {
    let dir = project_with(&[("a.rs", RUST_SOURCE), ("notes.unknown", "hello")]);
    let config = write_config(dir.path(), "");
    let err = run(&[
        "tree",
        &path_str(&dir, "a.rs"),
        &path_str(&dir, "notes.unknown"),
        "-c",
        &config,
    ])
    .unwrap_err();
    assert!(err.to_string().contains("1 of 2 file(s)"));
}

#[test]
fn sexp_is_laid_out_by_depth() {
    let dir = project_with(&[("main.rs", RUST_SOURCE)]);
    let config = write_config(dir.path(), "");
    let output = run(&["sexp", &path_str(&dir, "main.rs"), "-c", &config]).unwrap();

    // single parentheses alternate between literal and structural
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines[0], "(source_file (");
    assert_eq!(lines[1], "  function_item ");
    assert_eq!(lines.last(), Some(&"))"));
}

#[test]
fn sexp_needs_language_for_unknown_extension() {
    let dir = project_with(&[("main.txt", RUST_SOURCE)]);
    let config = write_config(dir.path(), "");
    let path = path_str(&dir, "main.txt");

    let err = run(&["sexp", &path, "-c", &config]).unwrap_err();
    assert!(err.to_string().contains("--language"));

    let output = run(&["sexp", &path, "-c", &config, "--language", "rust"]).unwrap();
    assert!(output.starts_with("(source_file (\n"));
}

#[rstest]
#[case("fn main( {}")]
#[case("fn f() { let x = (1; }")]
fn sexp_handles_missing_parens(#[case] source: &str) {
    let dir = project_with(&[("broken.rs", source)]);
    let config = write_config(dir.path(), "");
    let output = run(&["sexp", &path_str(&dir, "broken.rs"), "-c", &config]).unwrap();

    assert!(output.starts_with("(source_file ("));
    assert!(output.contains("MISSING"));
    assert!(output.contains(r#"")""#));
}

#[rstest]
#[case("((a)(b))", "((\n  a\n)\n(\n  b\n))\n")]
#[case("plain", "plain\n")]
fn brackets_command(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(run(&["brackets", input]).unwrap(), expected);
}

#[test]
fn init_writes_default_config_once() {
    let dir = tempdir().unwrap();
    let project = dir.path().display().to_string();

    let output = run(&["init", &project]).unwrap();
    assert!(output.starts_with("Wrote "));

    let config = ProjectConfig::load(dir.path()).unwrap();
    assert_eq!(config, ProjectConfig::default());
    assert_eq!(config.render.format, OutputFormat::Text);

    assert!(run(&["init", &project]).is_err());
    assert!(run(&["init", &project, "--force"]).is_ok());
}

#[test]
fn invalid_config_is_an_error() {
    let dir = project_with(&[("main.rs", RUST_SOURCE)]);
    let config = write_config(dir.path(), "[render]\nformat = \"pdf\"\n");
    let err = run(&["tree", &path_str(&dir, "main.rs"), "-c", &config]).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
}
