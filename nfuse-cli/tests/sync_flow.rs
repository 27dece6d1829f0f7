//! End-to-end sync flow through the real binary: first-run rebuild,
//! unchanged skip, and forced reconstruction.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn nfuse() -> Command {
    Command::cargo_bin("nfuse").expect("nfuse binary")
}

fn setup_project(dir: &Path, dependencies: &str) {
    fs::write(
        dir.join("package.json"),
        format!(r#"{{ "name": "app", "dependencies": {dependencies} }}"#),
    )
    .expect("write package.json");
    fs::write(dir.join("app.unoproj"), r#"{ "RootNamespace": "App" }"#)
        .expect("write app.unoproj");
}

fn install_package(dir: &Path, name: &str) {
    let pkg = dir.join("node_modules").join(name);
    fs::create_dir_all(&pkg).expect("mkdir package");
    fs::write(
        pkg.join("package.json"),
        format!(r#"{{ "name": "{name}", "main": "index.js" }}"#),
    )
    .expect("write package manifest");
    fs::write(pkg.join("index.js"), "module.exports = {};\n").expect("write entry");
}

#[test]
fn first_run_generates_the_module_project() {
    let project = TempDir::new().unwrap();
    setup_project(project.path(), r#"{ "left-pad": "1.1.3" }"#);
    install_package(project.path(), "left-pad");

    nfuse()
        .current_dir(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("synced"));

    let out_dir = project.path().join("NPM-Packages");
    assert!(out_dir.join("Lib_left_pad.uno").exists());
    assert!(out_dir.join("app_modules.unoproj").exists());

    let cache = fs::read_to_string(out_dir.join("dependencies.json")).unwrap();
    assert!(cache.contains("left-pad:1.1.3"));

    let primary = fs::read_to_string(project.path().join("app.unoproj")).unwrap();
    assert!(primary.contains("NPM-Packages/app_modules.unoproj"));
    assert!(primary.contains("node_modules"));
    assert!(primary.contains("RootNamespace"));
}

#[test]
fn unchanged_dependencies_skip_the_rebuild() {
    let project = TempDir::new().unwrap();
    setup_project(project.path(), r#"{ "left-pad": "1.1.3" }"#);
    install_package(project.path(), "left-pad");

    nfuse().current_dir(project.path()).assert().success();

    nfuse()
        .current_dir(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to do"));
}

#[test]
fn force_flag_rebuilds_an_unchanged_project() {
    let project = TempDir::new().unwrap();
    setup_project(project.path(), r#"{ "left-pad": "1.1.3" }"#);
    install_package(project.path(), "left-pad");

    nfuse().current_dir(project.path()).assert().success();

    nfuse()
        .current_dir(project.path())
        .arg("--force")
        .assert()
        .success()
        .stdout(predicate::str::contains("synced"));
}

#[test]
fn added_dependency_triggers_a_rebuild() {
    let project = TempDir::new().unwrap();
    setup_project(project.path(), r#"{ "a": "1.0.0" }"#);
    install_package(project.path(), "a");

    nfuse().current_dir(project.path()).assert().success();

    setup_project(project.path(), r#"{ "a": "1.0.0", "b": "2.0.0" }"#);
    install_package(project.path(), "b");

    nfuse()
        .current_dir(project.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("synced"));

    let out_dir = project.path().join("NPM-Packages");
    assert!(out_dir.join("Lib_a.uno").exists());
    assert!(out_dir.join("Lib_b.uno").exists());

    let cache = fs::read_to_string(out_dir.join("dependencies.json")).unwrap();
    assert!(cache.contains("a:1.0.0"));
    assert!(cache.contains("b:2.0.0"));
}
