use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn zoom_reset(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("zoom-reset").unwrap();
    cmd.env("HOME", home.path())
        .env_remove("ZOOM_RESET_BACKUP_DIR")
        .arg("--no-color");
    cmd
}

// ─── Help & version ──────────────────────────────────────────────────────────

#[test]
fn test_help_flag() {
    let home = TempDir::new().unwrap();
    zoom_reset(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("1132"))
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("--skip-kill"))
        .stdout(predicate::str::contains("--backup-dir"));
}

#[test]
fn test_version_flag() {
    let home = TempDir::new().unwrap();
    zoom_reset(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("zoom-reset"));
}

// ─── Catalog listing ─────────────────────────────────────────────────────────

#[test]
fn test_list_paths_linux() {
    let home = TempDir::new().unwrap();
    let expected = home.path().join(".var/app/us.zoom.Zoom");
    zoom_reset(&home)
        .args(["--list-paths", "--platform", "linux", "--format", "quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains(expected.display().to_string()));
}

#[cfg(unix)]
#[test]
fn test_list_paths_windows_uses_env() {
    let home = TempDir::new().unwrap();
    zoom_reset(&home)
        .env("APPDATA", "/tmp/roam")
        .env("LOCALAPPDATA", "/tmp/local")
        .args(["--list-paths", "--platform", "windows", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/tmp/roam/Zoom"))
        .stdout(predicate::str::contains("/tmp/local/ZoomOpener"));
}

#[test]
fn test_unsupported_platform_fails() {
    let home = TempDir::new().unwrap();
    zoom_reset(&home)
        .args(["--list-paths", "--platform", "plan9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported platform"));
}

#[test]
fn test_bad_config_file_fails() {
    let home = TempDir::new().unwrap();
    std::fs::write(home.path().join(".zoom-reset.toml"), "backup_dir = [").unwrap();
    zoom_reset(&home)
        .args(["--list-paths", "--platform", "linux"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config error"));
}

// ─── Reset ───────────────────────────────────────────────────────────────────

#[cfg(target_os = "linux")]
#[test]
fn test_dry_run_changes_nothing() {
    let home = TempDir::new().unwrap();
    let zoom = home.path().join(".zoom");
    std::fs::create_dir_all(&zoom).unwrap();
    let backups = home.path().join("backups");

    zoom_reset(&home)
        .args(["--dry-run", "--skip-kill", "--backup-dir"])
        .arg(&backups)
        .assert()
        .success()
        .stdout(predicate::str::contains("Would move ~/.zoom"))
        .stdout(predicate::str::contains("Dry run complete"));

    assert!(zoom.exists());
    assert!(!backups.exists());
}

#[cfg(target_os = "linux")]
#[test]
fn test_reset_moves_into_backup_dir() {
    let home = TempDir::new().unwrap();
    let config = home.path().join(".config/zoom");
    std::fs::create_dir_all(&config).unwrap();
    std::fs::write(config.join("zoomus.conf"), "[General]").unwrap();
    let backups = home.path().join("backups");

    zoom_reset(&home)
        .args(["--skip-kill", "--backup-dir"])
        .arg(&backups)
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipping process termination step"))
        .stdout(predicate::str::contains("Reset complete"));

    assert!(!config.exists());
    let runs: Vec<_> = std::fs::read_dir(&backups).unwrap().flatten().collect();
    assert_eq!(runs.len(), 1);
    assert_eq!(
        std::fs::read_to_string(runs[0].path().join("zoom/zoomus.conf")).unwrap(),
        "[General]"
    );
}

#[cfg(target_os = "linux")]
#[test]
fn test_backup_dir_from_env() {
    let home = TempDir::new().unwrap();
    std::fs::create_dir_all(home.path().join(".zoom")).unwrap();
    let backups = home.path().join("env-backups");

    zoom_reset(&home)
        .env("ZOOM_RESET_BACKUP_DIR", &backups)
        .args(["--skip-kill", "--format", "quiet"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("1  "));

    assert!(backups.is_dir());
}

#[cfg(target_os = "linux")]
#[test]
fn test_json_report() {
    let home = TempDir::new().unwrap();
    zoom_reset(&home)
        .args(["--dry-run", "--skip-kill", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"platform\": \"linux\""))
        .stdout(predicate::str::contains("\"paths\""));
}

#[cfg(target_os = "linux")]
#[test]
fn test_foreign_platform_requires_dry_run() {
    let home = TempDir::new().unwrap();
    zoom_reset(&home)
        .args(["--platform", "windows", "--skip-kill"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--dry-run"));
}
