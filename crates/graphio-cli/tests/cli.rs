//! End-to-end tests of the graphio binary

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("graphio").unwrap();
        cmd.env("GRAPHIO_CONFIG", self.path("config.toml"))
            .env_remove("RUST_LOG");
        cmd
    }
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn test_parse_prints_json_lines() {
    let ws = Workspace::new();
    let input = ws.file("g.edge", "a b c\n# comment\nb b\n");

    ws.cmd()
        .arg("parse")
        .arg(&input)
        .assert()
        .success()
        .stdout(
            "{\"event\":\"edge_added\",\"id\":\"0\",\"from\":\"a\",\"to\":\"b\",\"directed\":false,\"attributes\":null}\n\
             {\"event\":\"edge_added\",\"id\":\"1\",\"from\":\"a\",\"to\":\"c\",\"directed\":false,\"attributes\":null}\n",
        );
}

#[test]
fn test_parse_directed_flag() {
    let ws = Workspace::new();
    let input = ws.file("g.edge", "x y\n");

    ws.cmd()
        .args(["parse", "--directed"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"directed\":true"));
}

#[test]
fn test_parse_max_lines() {
    let ws = Workspace::new();
    let input = ws.file("g.edge", "a b\nc d\ne f\n");

    ws.cmd()
        .args(["parse", "--max-lines", "2"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"from\":\"c\""))
        .stdout(predicate::str::contains("\"from\":\"e\"").not());
}

#[test]
fn test_parse_missing_file_fails() {
    let ws = Workspace::new();

    ws.cmd()
        .arg("parse")
        .arg(ws.path("missing.edge"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.edge"));
}

#[test]
fn test_parse_unterminated_quote_reports_line() {
    let ws = Workspace::new();
    let input = ws.file("bad.edge", "a b\n\"c d\n");

    ws.cmd()
        .arg("parse")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn test_convert_to_edge_list() {
    let ws = Workspace::new();
    let input = ws.file("star.edge", "hub a b\n");
    let output = ws.path("out.edge");

    ws.cmd()
        .arg("convert")
        .arg(&input)
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 3 nodes and 2 edges"));

    assert_eq!(read(&output), "# star\nhub a\nhub b\n");
}

#[test]
fn test_convert_to_dgs_and_graphml() {
    let ws = Workspace::new();
    let input = ws.file("g.edge", "a b\n");

    let dgs = ws.path("g.dgs");
    ws.cmd()
        .args(["convert", "--directed"])
        .arg(&input)
        .arg(&dgs)
        .assert()
        .success();
    let text = read(&dgs);
    assert!(text.starts_with("DGS004\n\"g\" 0 0\n"));
    assert!(text.contains("ae \"0\" \"a\" > \"b\"\n"));

    let graphml = ws.path("g.graphml");
    ws.cmd()
        .args(["--quiet", "convert"])
        .arg(&input)
        .arg(&graphml)
        .assert()
        .success()
        .stdout("");
    assert!(read(&graphml).contains("<edge id=\"0\" source=\"a\" target=\"b\" directed=\"false\"/>"));
}

#[test]
fn test_convert_format_flag_overrides_extension() {
    let ws = Workspace::new();
    let input = ws.file("g.edge", "a b\n");
    let output = ws.path("g.txt");

    ws.cmd()
        .args(["convert", "--format", "graphml"])
        .arg(&input)
        .arg(&output)
        .assert()
        .success();

    assert!(read(&output).starts_with("<?xml"));
}

#[test]
fn test_convert_unknown_extension_uses_configured_format() {
    let ws = Workspace::new();
    let input = ws.file("g.edge", "a b\n");
    let output = ws.path("g.out");

    ws.cmd()
        .args(["config", "set", "default_format", "edge"])
        .assert()
        .success();
    ws.cmd()
        .arg("convert")
        .arg(&input)
        .arg(&output)
        .assert()
        .success();

    assert_eq!(read(&output), "# g\na b\n");
}

#[test]
fn test_stats() {
    let ws = Workspace::new();
    let input = ws.file("g.edge", "a b c\nb b\nc c\n");

    ws.cmd()
        .arg("stats")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Nodes:              3"))
        .stdout(predicate::str::contains("Edges:              2"))
        .stdout(predicate::str::contains("Self-loops dropped: 2"));
}

#[test]
fn test_stats_json() {
    let ws = Workspace::new();
    let input = ws.file("g.edge", "a b\n");

    let output = ws
        .cmd()
        .args(["stats", "--json", "--directed"])
        .arg(&input)
        .output()
        .unwrap();
    assert!(output.status.success());

    let stats: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(stats["graph"], "g");
    assert_eq!(stats["nodes"], 2);
    assert_eq!(stats["edges"], 1);
    assert_eq!(stats["directed_edges"], 1);
}

#[test]
fn test_config_set_get_and_reader_defaults() {
    let ws = Workspace::new();
    let input = ws.file("g.edge", "% not a comment yet\n");

    ws.cmd()
        .args(["config", "set", "comment_char", "%"])
        .assert()
        .success();
    ws.cmd()
        .args(["config", "get", "comment_char"])
        .assert()
        .success()
        .stdout("%\n");

    ws.cmd()
        .arg("parse")
        .arg(&input)
        .assert()
        .success()
        .stdout("");

    ws.cmd()
        .args(["parse", "--comment-char", "none"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"from\":\"%\""));
}

#[test]
fn test_config_unknown_key_fails() {
    let ws = Workspace::new();

    ws.cmd()
        .args(["config", "get", "colour"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn test_config_init_refuses_overwrite() {
    let ws = Workspace::new();

    ws.cmd().args(["config", "init"]).assert().success();
    assert!(read(&ws.path("config.toml")).contains("default_format = \"dgs\""));

    ws.cmd()
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
    ws.cmd().args(["config", "init", "--force"]).assert().success();
}

#[test]
fn test_completions() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("graphio"));
    ws.cmd()
        .args(["completions", "powershell"])
        .assert()
        .success();
    ws.cmd().args(["completions", "tcsh"]).assert().failure();
}
