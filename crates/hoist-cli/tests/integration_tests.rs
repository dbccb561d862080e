//! Integration tests for the `hoist` binary.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A scratch directory with an empty config file, so the user's own
/// configuration never leaks into a test.
struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("hoist.toml"), "").unwrap();
        Self { dir }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn hoist_in(&self, cwd: impl AsRef<Path>) -> Command {
        let mut cmd = Command::cargo_bin("hoist").unwrap();
        cmd.current_dir(self.path().join(cwd))
            .arg("--config")
            .arg(self.path().join("hoist.toml"))
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        cmd
    }

    fn hoist(&self) -> Command {
        self.hoist_in("")
    }
}

fn files_under(root: &Path) -> Vec<PathBuf> {
    let mut out = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        for entry in fs::read_dir(&dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                stack.push(path);
            } else {
                out.push(path);
            }
        }
    }
    out
}

// ── help / version ────────────────────────────────────────────────────────────

#[test]
fn help_lists_subcommands() {
    Command::cargo_bin("hoist")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("setup"))
        .stdout(predicate::str::contains("install"))
        .stdout(predicate::str::contains("setup-tests"));
}

#[test]
fn version_flag() {
    Command::cargo_bin("hoist")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

// ── setup ─────────────────────────────────────────────────────────────────────

#[test]
fn setup_creates_full_module() {
    let sandbox = Sandbox::new();
    sandbox
        .hoist()
        .args(["setup", "myModule"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Module 'myModule' created"));

    let root = sandbox.path().join("myModule");
    for path in [
        "README.md",
        ".gitignore",
        "package.json",
        "bower.json",
        "bedrock.json",
        "lib/index.js",
        "lib/config.js",
        "components/main.js",
        "test/test.js",
        "test/package.json",
        "test/bower.json",
        "test/protractor/config.js",
        "app/package.json",
        "app/bower.json",
        "app/run.js",
    ] {
        assert!(root.join(path).is_file(), "missing {path}");
    }

    let readme = fs::read_to_string(root.join("README.md")).unwrap();
    assert!(readme.starts_with("# myModule"));

    let package: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(root.join("package.json")).unwrap()).unwrap();
    assert_eq!(package["name"], "myModule");
}

#[test]
fn node_only_setup_has_no_bower_json() {
    let sandbox = Sandbox::new();
    sandbox
        .hoist()
        .args(["setup", "svc", "--node-only"])
        .assert()
        .success();

    let files = files_under(&sandbox.path().join("svc"));
    assert!(!files.is_empty());
    assert!(
        files
            .iter()
            .all(|p| p.file_name().is_some_and(|n| n != "bower.json")),
        "{files:?}"
    );
    assert!(!sandbox.path().join("svc/app").exists());
}

#[test]
fn bower_only_setup_has_root_main_and_no_lib() {
    let sandbox = Sandbox::new();
    sandbox
        .hoist()
        .args(["setup", "widgets", "--bower-only"])
        .assert()
        .success();

    let root = sandbox.path().join("widgets");
    assert!(root.join("main.js").is_file());
    assert!(root.join("bower.json").is_file());
    assert!(!root.join("lib").exists());
    assert!(!root.join("package.json").exists());
    assert!(!root.join("app").exists());
}

#[test]
fn plugin_setup_has_no_app() {
    let sandbox = Sandbox::new();
    sandbox
        .hoist()
        .args(["setup", "plug", "--plugin"])
        .assert()
        .success();

    let root = sandbox.path().join("plug");
    assert!(root.join("components/main.js").is_file());
    assert!(!root.join("app").exists());
}

#[test]
fn dry_run_writes_nothing() {
    let sandbox = Sandbox::new();
    sandbox
        .hoist()
        .args(["setup", "preview", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"))
        .stdout(predicate::str::contains("README.md"));

    assert!(!sandbox.path().join("preview").exists());
}

// ── install ───────────────────────────────────────────────────────────────────

#[test]
fn install_outside_app_declined_on_stdin() {
    let sandbox = Sandbox::new();
    fs::create_dir(sandbox.path().join("elsewhere")).unwrap();

    sandbox
        .hoist_in("elsewhere")
        .arg("install")
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("cancelled"));

    assert!(!sandbox.path().join("elsewhere/package.json").exists());
}

#[test]
fn install_declined_by_flag() {
    let sandbox = Sandbox::new();
    fs::create_dir(sandbox.path().join("elsewhere")).unwrap();

    sandbox
        .hoist_in("elsewhere")
        .args(["install", "--no"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cancelled"));
}

#[test]
fn install_declined_by_environment() {
    let sandbox = Sandbox::new();
    fs::create_dir(sandbox.path().join("elsewhere")).unwrap();

    sandbox
        .hoist_in("elsewhere")
        .arg("install")
        .env("HOIST_INSTALL__ASSUME_YES", "false")
        .assert()
        .success()
        .stdout(predicate::str::contains("cancelled"));
}

#[cfg(unix)]
#[test]
fn install_from_app_links_host() {
    let sandbox = Sandbox::new();
    sandbox.hoist().args(["setup", "host"]).assert().success();

    // `true install` stands in for the package managers.
    sandbox
        .hoist_in("host/app")
        .arg("install")
        .env("HOIST_INSTALL__NODE_PROGRAM", "true")
        .env("HOIST_INSTALL__FRONT_END_PROGRAM", "true")
        .env("HOIST_REGISTRY__PROGRAM", "false")
        .assert()
        .failure()
        // the blueprint declares a `bedrock` peer; the registry stub refuses
        .stderr(predicate::str::contains("bedrock"));

    let app = sandbox.path().join("host/app");
    fs::write(
        sandbox.path().join("host/package.json"),
        r#"{ "name": "host", "dependencies": { "async": "^1.5.0" } }"#,
    )
    .unwrap();

    sandbox
        .hoist_in("host/app")
        .arg("install")
        .env("HOIST_INSTALL__NODE_PROGRAM", "true")
        .env("HOIST_INSTALL__FRONT_END_PROGRAM", "true")
        .assert()
        .success()
        .stdout(predicate::str::contains("Linked 'host'"));

    let manifest: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(app.join("package.json")).unwrap()).unwrap();
    assert_eq!(manifest["name"], "host-app");
    assert_eq!(manifest["dependencies"]["async"], "^1.5.0");

    let link = fs::read_link(app.join("node_modules/host")).unwrap();
    assert_eq!(link, sandbox.path().join("host"));
    assert!(app.join("bower_components/host").is_symlink());
}

// ── setup-tests ───────────────────────────────────────────────────────────────

#[cfg(unix)]
#[test]
fn setup_tests_creates_harness() {
    let sandbox = Sandbox::new();
    let module = sandbox.path().join("widgets");
    fs::create_dir(&module).unwrap();
    fs::write(
        module.join("package.json"),
        r#"{ "name": "widgets", "dependencies": { "bedrock": "^1.0.0" } }"#,
    )
    .unwrap();

    sandbox
        .hoist_in("widgets")
        .arg("setup-tests")
        .env("HOIST_INSTALL__NODE_PROGRAM", "true")
        .assert()
        .success()
        .stdout(predicate::str::contains("Test harness ready"));

    let test_js = fs::read_to_string(module.join("test/test.js")).unwrap();
    assert!(test_js.contains("require('widgets');"));
    let manifest = fs::read_to_string(module.join("test/package.json")).unwrap();
    assert!(manifest.contains("\"bedrock\": \"^1.0.0\""));
    assert_eq!(
        fs::read_link(module.join("test/node_modules/widgets")).unwrap(),
        module
    );
    assert!(!module.join("test/bower.json").exists());
}

#[cfg(unix)]
#[test]
fn setup_tests_keeps_existing_entry() {
    let sandbox = Sandbox::new();
    let module = sandbox.path().join("widgets");
    fs::create_dir_all(module.join("test")).unwrap();
    fs::write(module.join("package.json"), r#"{ "name": "widgets" }"#).unwrap();
    fs::write(module.join("bower.json"), r#"{ "name": "widgets" }"#).unwrap();
    fs::write(module.join("test/test.js"), "// mine\n").unwrap();

    sandbox
        .hoist_in("widgets")
        .arg("setup-tests")
        .env("HOIST_INSTALL__NODE_PROGRAM", "true")
        .assert()
        .success()
        .stdout(predicate::str::contains("left untouched"));

    assert_eq!(
        fs::read_to_string(module.join("test/test.js")).unwrap(),
        "// mine\n"
    );
    assert!(module.join("test/bower.json").is_file());
}

// ── templates / config / completions ─────────────────────────────────────────

#[test]
fn templates_lists_blueprints() {
    Sandbox::new()
        .hoist()
        .arg("templates")
        .assert()
        .success()
        .stdout(predicate::str::contains("package.json"))
        .stdout(predicate::str::contains("harness/test.js"));
}

#[test]
fn config_get_reads_environment() {
    let sandbox = Sandbox::new();
    sandbox
        .hoist()
        .args(["config", "get", "install.node_program"])
        .assert()
        .success()
        .stdout(predicate::str::contains("npm"));

    sandbox
        .hoist()
        .args(["config", "get", "install.node_program"])
        .env("HOIST_INSTALL__NODE_PROGRAM", "pnpm")
        .assert()
        .success()
        .stdout(predicate::str::contains("pnpm"));
}

#[test]
fn config_list_shows_sections() {
    Sandbox::new()
        .hoist()
        .args(["config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[install]"))
        .stdout(predicate::str::contains("[registry]"));
}

#[test]
fn completions_for_bash() {
    Command::cargo_bin("hoist")
        .unwrap()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hoist"));
}
