use assert_cmd::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn repo_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("expected crates/<name> layout")
        .to_path_buf()
}

fn fixture(name: &str) -> PathBuf {
    let path = repo_root().join("fixtures").join("inputs").join(name);
    assert!(path.exists(), "fixture missing: {}", path.display());
    path
}

fn empflow() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo_bin!("empflow"));
    cmd.current_dir(repo_root()).env_remove("EMPFLOW_LOG");
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).expect("utf-8 stdout")
}

#[test]
fn classify_reports_class_and_tall() {
    let out = stdout_of(empflow().args(["classify", "--viewport-width", "768", "--viewport-height", "900"]));
    assert_eq!(out.trim(), "mobile");

    let out = stdout_of(empflow().args(["classify", "--viewport-width", "769", "--viewport-height", "1200"]));
    assert_eq!(out.trim(), "tablet tall");

    let out = stdout_of(empflow().args([
        "classify",
        "--viewport-width",
        "1921",
        "--viewport-height",
        "1080",
        "--json",
    ]));
    let v: serde_json::Value = serde_json::from_str(&out).expect("json");
    assert_eq!(v["class"], "large");
    assert_eq!(v["tall"], false);
}

#[test]
fn tokens_print_json_and_css() {
    let out = stdout_of(empflow().args(["tokens", "--container-width", "1800", "--container-height", "900"]));
    let v: serde_json::Value = serde_json::from_str(&out).expect("json");
    assert_eq!(v["lineWidth"], 6.0);
    assert_eq!(v["measured"], true);
    assert_eq!(v["viewport"]["class"], "desktop");

    let out = stdout_of(empflow().args([
        "tokens",
        "--container-width",
        "1800",
        "--container-height",
        "900",
        "--css",
    ]));
    assert!(out.lines().any(|l| l == "--lw: 6px;"));
    assert!(out.lines().any(|l| l == "--is-mobile: 0;"));
}

#[test]
fn tokens_without_container_are_the_fallback() {
    let out = stdout_of(empflow().args(["tokens"]));
    let v: serde_json::Value = serde_json::from_str(&out).expect("json");
    assert_eq!(v["measured"], false);
    assert_eq!(v["lineWidth"], 3.0);
}

#[test]
fn layout_prints_the_model() {
    let input = fixture("full.json");
    let out = stdout_of(empflow().args([
        "layout",
        "--container-width",
        "1800",
        "--container-height",
        "900",
        input.to_string_lossy().as_ref(),
    ]));
    let v: serde_json::Value = serde_json::from_str(&out).expect("json");
    assert_eq!(v["cards"].as_array().map(Vec::len), Some(5));
    assert_eq!(v["arrows"].as_array().map(Vec::len), Some(5));
    assert_eq!(v["center"]["slot"], "center");
}

#[test]
fn render_svg_to_stdout() {
    let input = fixture("full.json");
    let out = stdout_of(empflow().args([
        "render",
        "--container-width",
        "1800",
        "--container-height",
        "900",
        "--id",
        "board 1",
        input.to_string_lossy().as_ref(),
    ]));
    let doc = roxmltree::Document::parse(&out).expect("svg parses");
    assert_eq!(doc.root_element().attribute("id"), Some("board-1"));
    let slots = doc
        .descendants()
        .filter(|n| n.attribute("data-slot").is_some())
        .count();
    assert_eq!(slots, 6);
    assert!(doc.descendants().any(|n| n.has_tag_name("animate")));
}

#[test]
fn render_reads_yaml_from_stdin() {
    let exe = assert_cmd::cargo_bin!("empflow");
    let output = assert_cmd::Command::new(exe)
        .args(["render", "--static", "--input-format", "yaml", "-"])
        .write_stdin("number1: 42\n")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let svg = String::from_utf8(output).expect("utf-8");
    assert!(svg.contains(">42</text>"));
    assert!(!svg.contains("<animate"));
    assert!(svg.contains(r#"data-measured="false""#));
}

#[test]
fn render_embeds_images() {
    let input = fixture("minimal.yaml");
    let out = stdout_of(empflow().args([
        "render",
        "--embed-images",
        input.to_string_lossy().as_ref(),
    ]));
    assert!(out.contains(r#"href="data:image/svg+xml;base64,"#));
}

#[test]
fn render_png_to_file() {
    let input = fixture("full.json");
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("board.png");

    empflow()
        .args([
            "render",
            "--format",
            "png",
            "--scale",
            "0.5",
            "--container-width",
            "800",
            "--container-height",
            "400",
            "--out",
            out.to_string_lossy().as_ref(),
            input.to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    let bytes = fs::read(&out).expect("read png");
    assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"), "output is not a PNG");
}

#[test]
fn render_raster_defaults_next_to_input() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = tmp.path().join("board.json");
    fs::write(&input, r#"{"number1": 7}"#).expect("write input");

    empflow()
        .args(["render", "--format", "jpeg", input.to_string_lossy().as_ref()])
        .assert()
        .success();

    let bytes = fs::read(input.with_extension("jpg")).expect("read jpg");
    assert!(bytes.starts_with(&[0xFF, 0xD8, 0xFF]));
}

#[test]
fn config_files_merge_in_order() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let base = tmp.path().join("base.yaml");
    let over = tmp.path().join("over.json");
    fs::write(&base, "theme:\n  currencySuffix: EUR\n  salesLabel: 'SALES:'\n").expect("write");
    fs::write(&over, r#"{"theme": {"currencySuffix": "USD"}}"#).expect("write");

    let exe = assert_cmd::cargo_bin!("empflow");
    let output = assert_cmd::Command::new(exe)
        .args([
            "render",
            "--config",
            base.to_string_lossy().as_ref(),
            "--config",
            over.to_string_lossy().as_ref(),
            "-",
        ])
        .write_stdin(r#"{"stat5_2": 10}"#)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let svg = String::from_utf8(output).expect("utf-8");
    assert!(svg.contains(">SALES:</text>"));
    assert!(svg.contains(">USD</text>"));
    assert!(!svg.contains(">EUR</text>"));
}

#[test]
fn failures_exit_non_zero() {
    // Usage errors come from argument parsing.
    empflow().args(["render", "--format", "gif"]).assert().code(2);
    empflow()
        .args(["tokens", "--container-width", "10"])
        .assert()
        .code(2);

    // Everything else is a runtime failure.
    empflow()
        .args(["layout", "fixtures/inputs/does-not-exist.json"])
        .assert()
        .code(1);

    let tmp = tempfile::tempdir().expect("tempdir");
    let bad = tmp.path().join("bad.json");
    fs::write(&bad, r#"{"colors": {}}"#).expect("write");
    empflow()
        .args(["tokens", "--config", bad.to_string_lossy().as_ref()])
        .assert()
        .code(1);
}
