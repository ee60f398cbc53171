#![cfg(unix)]

use std::fs;
use std::path::Path;

use predicates::str::contains;
use tempfile::TempDir;

macro_rules! prebundle {
    () => {
        assert_cmd::cargo::cargo_bin_cmd!("prebundle")
    };
}

/// Writes both artifacts of every bundle listed in `PREBUNDLE_BUNDLES`.
const FAKE_BUNDLER: &str = r#"[build]
command = ["sh", "-c", 'mkdir -p "$PREBUNDLE_STATE_DIR" && for b in $(echo "$PREBUNDLE_BUNDLES" | tr "," " "); do touch "$PREBUNDLE_STATE_DIR/$b.dll.js" "$PREBUNDLE_STATE_DIR/$b-manifest.json"; done && echo "$PREBUNDLE_ENTRIES" > entries.json']
"#;

const BUNDLES: &str = r#"
[[bundles]]
name = "vendor"
packages = ["react", { name = "lodash", path = "lodash/fp" }]

[[bundles]]
name = "charts"
packages = ["d3"]
"#;

fn write_package(root: &Path, name: &str, version: &str) {
    let dir = root.join("node_modules").join(name);
    fs::create_dir_all(&dir).expect("create package dir");
    fs::write(dir.join("index.js"), "").expect("write entry");
    fs::write(dir.join("fp.js"), "").expect("write secondary entry");
    fs::write(
        dir.join("package.json"),
        format!(r#"{{"name": "{name}", "version": "{version}"}}"#),
    )
    .expect("write manifest");
}

fn create_project(config: &str) -> TempDir {
    let dir = TempDir::new().expect("create temp dir");
    fs::write(
        dir.path().join("prebundle.toml"),
        format!("state-dir = \"dll\"\n{config}"),
    )
    .expect("write config");
    write_package(dir.path(), "react", "18.2.0");
    write_package(dir.path(), "lodash", "4.17.21");
    write_package(dir.path(), "d3", "7.8.5");
    dir
}

fn read_state(dir: &TempDir) -> serde_json::Value {
    let content = fs::read_to_string(dir.path().join("dll/dll-bundles-state.json"))
        .expect("read state file");
    serde_json::from_str(&content).expect("parse state file")
}

#[test]
fn rebuild_runs_command_and_saves_state() {
    let project = create_project(&format!("{FAKE_BUNDLER}{BUNDLES}"));

    prebundle!()
        .arg("rebuild")
        .current_dir(project.path())
        .assert()
        .success()
        .stdout(contains("Rebuilt 2 bundle(s): vendor, charts"));

    assert!(project.path().join("dll/vendor.dll.js").is_file());
    assert!(project.path().join("dll/charts-manifest.json").is_file());

    let state = read_state(&project);
    assert_eq!(state["react"]["version"], "18.2.0");
    assert_eq!(state["lodash"]["bundle"], "vendor");
    assert_eq!(state["d3"]["bundle"], "charts");

    let entries: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(project.path().join("entries.json")).expect("read entries"),
    )
    .expect("parse entries");
    assert_eq!(entries["vendor"], serde_json::json!(["react", "lodash/fp"]));
}

#[test]
fn second_rebuild_is_up_to_date() {
    let project = create_project(&format!("{FAKE_BUNDLER}{BUNDLES}"));

    prebundle!()
        .arg("rebuild")
        .current_dir(project.path())
        .assert()
        .success();

    prebundle!()
        .arg("rebuild")
        .current_dir(project.path())
        .assert()
        .success()
        .stdout(contains("All bundles are up to date."));

    prebundle!()
        .arg("check")
        .current_dir(project.path())
        .assert()
        .success()
        .stdout(contains("All bundles are up to date."));
}

#[test]
fn rebuild_only_touches_stale_bundle() {
    let project = create_project(&format!("{FAKE_BUNDLER}{BUNDLES}"));
    prebundle!()
        .arg("rebuild")
        .current_dir(project.path())
        .assert()
        .success();

    write_package(project.path(), "d3", "7.9.0");

    prebundle!()
        .arg("rebuild")
        .current_dir(project.path())
        .assert()
        .success()
        .stdout(contains("Rebuilt 1 bundle(s): charts"));

    assert_eq!(read_state(&project)["d3"]["version"], "7.9.0");
}

#[test]
fn force_rebuilds_up_to_date_bundles() {
    let project = create_project(&format!("{FAKE_BUNDLER}{BUNDLES}"));
    prebundle!()
        .arg("rebuild")
        .current_dir(project.path())
        .assert()
        .success();

    prebundle!()
        .args(["rebuild", "--force"])
        .current_dir(project.path())
        .assert()
        .success()
        .stdout(contains("Rebuilt 2 bundle(s)"));
}

#[test]
fn failing_build_command_keeps_state_untouched() {
    let config = format!("[build]\ncommand = [\"sh\", \"-c\", \"exit 2\"]\n{BUNDLES}");
    let project = create_project(&config);

    prebundle!()
        .arg("rebuild")
        .current_dir(project.path())
        .assert()
        .failure()
        .stderr(contains("error: bundle build failed"))
        .stderr(contains("caused by: build command 'sh' failed"));

    assert!(!project.path().join("dll/dll-bundles-state.json").exists());
}

#[test]
fn rebuild_without_build_command_fails() {
    let project = create_project(BUNDLES);

    prebundle!()
        .arg("rebuild")
        .current_dir(project.path())
        .assert()
        .failure()
        .stderr(contains("no build command configured"));
}
