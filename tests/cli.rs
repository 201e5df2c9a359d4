use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Working directory with `dotfiles/bashrc`, an empty `home/` and a mapping
/// file linking one into the other.
fn workspace() -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("dotfiles")).unwrap();
    fs::create_dir(temp.path().join("home")).unwrap();
    fs::write(temp.path().join("dotfiles/bashrc"), "export A=1\n").unwrap();
    fs::write(temp.path().join(".neostow"), "dotfiles/bashrc=home\n").unwrap();
    temp
}

fn neostow(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("neostow").unwrap();
    cmd.current_dir(dir)
        .env("XDG_CONFIG_HOME", dir.join("xdg"))
        .env("HOME", dir)
        .env("CLICOLOR", "0")
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

fn source_of(dir: &Path) -> PathBuf {
    fs::canonicalize(dir.join("dotfiles/bashrc")).unwrap()
}

#[test]
fn test_links_entries_from_mapping_file() {
    let temp = workspace();

    neostow(temp.path())
        .arg("--verbose")
        .assert()
        .success()
        .stdout(predicate::str::contains("bashrc ==> "))
        .stdout(predicate::str::contains("1 operations were applied."));

    let link = temp.path().join("home/bashrc");
    assert_eq!(fs::read_link(&link).unwrap(), source_of(temp.path()));
}

#[test]
fn test_second_run_reports_existing_link() {
    let temp = workspace();
    neostow(temp.path()).assert().success();

    neostow(temp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("error:"))
        .stdout(predicate::str::contains("no operations were applied."));

    let link = temp.path().join("home/bashrc");
    assert_eq!(fs::read_link(&link).unwrap(), source_of(temp.path()));
}

#[test]
fn test_dry_run_changes_nothing() {
    let temp = workspace();

    neostow(temp.path())
        .arg("--dry")
        .assert()
        .success()
        .stdout(predicate::str::contains("bashrc ==> "))
        .stdout(predicate::str::contains("(dry run - no changes made)"));

    assert!(fs::read_dir(temp.path().join("home")).unwrap().next().is_none());
}

#[test]
fn test_missing_mapping_file_is_fatal() {
    let temp = workspace();

    neostow(temp.path())
        .args(["--file", "absent.neostow"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("fatal:"));
}

#[test]
fn test_declining_prompt_keeps_file() {
    let temp = workspace();
    let existing = temp.path().join("home/bashrc");
    fs::write(&existing, "export A=2\n").unwrap();

    neostow(temp.path())
        .arg("--overwrite")
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Do you want to continue? (y/N): "))
        .stdout(predicate::str::contains("+export A=2"))
        .stdout(predicate::str::contains("no operations were applied."));

    assert_eq!(fs::read_to_string(&existing).unwrap(), "export A=2\n");
}

#[test]
fn test_force_overwrite_replaces_file() {
    let temp = workspace();
    let existing = temp.path().join("home/bashrc");
    fs::write(&existing, "export A=2\n").unwrap();

    neostow(temp.path())
        .args(["-o", "-F"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 operations were applied."));

    assert_eq!(fs::read_link(&existing).unwrap(), source_of(temp.path()));
}

#[test]
fn test_delete_removes_links() {
    let temp = workspace();
    neostow(temp.path()).assert().success();

    neostow(temp.path())
        .arg("delete")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 operations were applied."));

    assert!(fs::symlink_metadata(temp.path().join("home/bashrc")).is_err());
    assert!(temp.path().join("dotfiles/bashrc").exists());
}

#[test]
fn test_missing_destination_is_skipped_unless_created() {
    let temp = workspace();
    fs::write(temp.path().join(".neostow"), "dotfiles/bashrc=new/dir\n").unwrap();

    neostow(temp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("destination not found"));
    assert!(!temp.path().join("new").exists());

    neostow(temp.path()).arg("--create-dirs").assert().success();
    assert!(temp.path().join("new/dir/bashrc").is_symlink());
}

#[test]
fn test_bare_path_links_next_to_its_directory() {
    let temp = workspace();
    fs::write(temp.path().join(".neostow"), "dotfiles/bashrc\n").unwrap();

    neostow(temp.path())
        .args(["-o", "-F"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 operations were applied."));

    let link = temp.path().join("bashrc");
    assert_eq!(fs::read_link(&link).unwrap(), source_of(temp.path()));
    let source = temp.path().join("dotfiles/bashrc");
    assert!(!source.is_symlink());
    assert_eq!(fs::read_to_string(&source).unwrap(), "export A=1\n");
}

#[test]
fn test_link_onto_its_own_source_is_refused() {
    let temp = workspace();
    fs::write(temp.path().join(".neostow"), "dotfiles/bashrc=dotfiles\n").unwrap();

    neostow(temp.path())
        .args(["-o", "-F"])
        .assert()
        .success()
        .stderr(predicate::str::contains("link target is the source itself"))
        .stdout(predicate::str::contains("no operations were applied."));

    let source = temp.path().join("dotfiles/bashrc");
    assert!(!source.is_symlink());
    assert_eq!(fs::read_to_string(&source).unwrap(), "export A=1\n");
}

#[test]
fn test_status_reports_states() {
    let temp = workspace();

    neostow(temp.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("missing:  1"));

    neostow(temp.path()).assert().success();

    neostow(temp.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("linked:   1"));
}

#[test]
fn test_diff_shows_conflicting_file() {
    let temp = workspace();
    fs::write(temp.path().join("home/bashrc"), "export A=3\n").unwrap();

    neostow(temp.path())
        .arg("diff")
        .assert()
        .success()
        .stdout(predicate::str::contains("-export A=1"))
        .stdout(predicate::str::contains("+export A=3"));
}

#[test]
fn test_settings_file_changes_orientation() {
    let temp = workspace();
    fs::create_dir_all(temp.path().join("xdg/neostow")).unwrap();
    fs::write(
        temp.path().join("xdg/neostow/config.toml"),
        "[settings]\norientation = \"dest-first\"\n",
    )
    .unwrap();
    fs::write(temp.path().join(".neostow"), "home=dotfiles/bashrc\n").unwrap();

    neostow(temp.path()).assert().success();

    assert!(temp.path().join("home/bashrc").is_symlink());
}

#[test]
fn test_autocomplete_bash() {
    let temp = TempDir::new().unwrap();

    neostow(temp.path())
        .args(["autocomplete", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("neostow"));
}

#[test]
fn test_version() {
    let temp = TempDir::new().unwrap();

    neostow(temp.path())
        .arg("-v")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
