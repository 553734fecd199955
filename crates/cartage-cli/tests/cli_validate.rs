use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn cartage_cmd(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("cartage").unwrap();
    cmd.env("HOME", home).env_remove("CARTAGE_PROJECT_DIR");
    cmd
}

fn write_project(root: &Path, alamofire_pin: &str) {
    fs::write(
        root.join("Cartfile.resolved"),
        format!(
            "github \"Alamofire/Alamofire\" \"{alamofire_pin}\"\n\
             github \"Moya/Moya\" \"10.0.2\"\n\
             github \"antitypical/Result\" \"3.2.4\"\n"
        ),
    )
    .unwrap();
    let moya = root.join("Carthage/Checkouts/Moya");
    fs::create_dir_all(&moya).unwrap();
    fs::write(
        moya.join("Cartfile"),
        "github \"Alamofire/Alamofire\" ~> 4.1\ngithub \"antitypical/Result\" ~> 3.1\n",
    )
    .unwrap();
}

#[test]
fn test_validate_compatible_project() {
    let tmp = TempDir::new().unwrap();
    write_project(tmp.path(), "4.6.0");

    cartage_cmd(tmp.path())
        .current_dir(tmp.path())
        .args(["validate"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Validated"));
}

#[test]
fn test_validate_reports_incompatibility() {
    let tmp = TempDir::new().unwrap();
    write_project(tmp.path(), "5.0.0");

    cartage_cmd(tmp.path())
        .current_dir(tmp.path())
        .args(["validate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "The following incompatibilities were found in Cartfile.resolved:",
        ))
        .stderr(predicate::str::contains(
            "Alamofire \"5.0.0\" is incompatible with Moya ~> 4.1.0",
        ));
}

#[test]
fn test_validate_from_subdirectory() {
    let tmp = TempDir::new().unwrap();
    write_project(tmp.path(), "4.6.0");
    let nested = tmp.path().join("Sources/App");
    fs::create_dir_all(&nested).unwrap();

    cartage_cmd(tmp.path())
        .current_dir(&nested)
        .args(["validate", "--verbose"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Checked"));
}

#[test]
fn test_validate_with_project_dir() {
    let tmp = TempDir::new().unwrap();
    let project = tmp.path().join("app");
    fs::create_dir_all(&project).unwrap();
    write_project(&project, "4.6.0");

    cartage_cmd(tmp.path())
        .current_dir(tmp.path())
        .arg("validate")
        .arg("--project-dir")
        .arg(&project)
        .assert()
        .success();
}

#[test]
fn test_validate_without_resolved_manifest_fails() {
    let tmp = TempDir::new().unwrap();

    cartage_cmd(tmp.path())
        .current_dir(tmp.path())
        .args(["validate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No Cartfile.resolved found"));
}

#[test]
fn test_validate_malformed_resolved_manifest_fails() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("Cartfile.resolved"),
        "github \"Moya/Moya\" \"10.0.2\"\ngithub \"Moya/Moya\" \"11.0.0\"\n",
    )
    .unwrap();

    cartage_cmd(tmp.path())
        .current_dir(tmp.path())
        .args(["validate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse"))
        .stderr(predicate::str::contains("pinned"));
}

#[test]
fn test_validate_uses_configured_checkouts() {
    let tmp = TempDir::new().unwrap();
    let home = tmp.path().join("home");
    fs::create_dir_all(home.join(".cartage")).unwrap();
    fs::write(
        home.join(".cartage/config.toml"),
        "[paths]\ncheckouts = \"vendor\"\n",
    )
    .unwrap();

    let project = tmp.path().join("app");
    fs::create_dir_all(project.join("vendor/Moya")).unwrap();
    fs::write(
        project.join("Cartfile.resolved"),
        "github \"Alamofire/Alamofire\" \"5.0.0\"\ngithub \"Moya/Moya\" \"10.0.2\"\n",
    )
    .unwrap();
    fs::write(
        project.join("vendor/Moya/Cartfile"),
        "github \"Alamofire/Alamofire\" ~> 4.1\n",
    )
    .unwrap();

    cartage_cmd(&home)
        .current_dir(&project)
        .args(["validate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("incompatible with Moya"));
}
