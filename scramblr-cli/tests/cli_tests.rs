use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Runs the binary from `cwd` with no environment overrides leaking in.
fn scramblr(cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("scramblr").unwrap();
    cmd.current_dir(cwd)
        .env_remove("NO_COLOR")
        .env_remove("SCRAMBLR_PREFIX")
        .env_remove("SCRAMBLR_YES")
        .env_remove("SCRAMBLR_LOG");
    cmd
}

fn names_in(dir: &Path) -> BTreeSet<String> {
    fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect()
}

fn set(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|s| (*s).to_string()).collect()
}

fn photo_dir(temp_dir: &TempDir, names: &[&str]) -> std::path::PathBuf {
    let photos = temp_dir.child("photos");
    photos.create_dir_all().unwrap();
    for name in names {
        photos.child(name).write_str(name).unwrap();
    }
    photos.path().to_path_buf()
}

#[test]
fn test_help_command() {
    let temp_dir = TempDir::new().unwrap();
    scramblr(temp_dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Randomize image file names in a directory without collisions",
        ));
}

#[test]
fn test_version_subcommand() {
    let temp_dir = TempDir::new().unwrap();
    scramblr(temp_dir.path())
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("scramblr 0.1.0"));
}

#[test]
fn test_version_subcommand_json() {
    let temp_dir = TempDir::new().unwrap();
    scramblr(temp_dir.path())
        .args(["version", "--output", "json"])
        .assert()
        .success()
        .stdout(
            predicate::str::is_match(r#"\{"name":"scramblr","version":"0\.1\.0"\}"#).unwrap(),
        );
}

#[test]
fn test_shuffle_with_yes_renames_everything() {
    let temp_dir = TempDir::new().unwrap();
    let photos = photo_dir(&temp_dir, &["a.png", "b.jpg", "c.png", "notes.txt"]);

    scramblr(temp_dir.path())
        .args(["shuffle", photos.to_str().unwrap(), "--prefix", "img_", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ Renamed 3 files"));

    let names = names_in(&photos);
    assert_eq!(names.len(), 4);
    assert!(names.contains("notes.txt"));
    let pngs = names.iter().filter(|n| n.ends_with(".png")).count();
    assert_eq!(pngs, 2);
    for index in 0..3 {
        assert!(
            names.contains(&format!("img_{index}.png")) || names.contains(&format!("img_{index}.jpg")),
            "missing index {index} in {names:?}"
        );
    }
}

#[test]
fn test_shuffle_refuses_to_prompt_without_terminal() {
    let temp_dir = TempDir::new().unwrap();
    let photos = photo_dir(&temp_dir, &["a.png", "b.png"]);

    scramblr(temp_dir.path())
        .args(["shuffle", photos.to_str().unwrap()])
        .write_stdin("y\n")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Use --yes"));

    assert_eq!(names_in(&photos), set(&["a.png", "b.png"]));
}

#[test]
fn test_shuffle_missing_directory() {
    let temp_dir = TempDir::new().unwrap();

    scramblr(temp_dir.path())
        .args(["shuffle", "nowhere", "--yes"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid directory"))
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_shuffle_file_instead_of_directory() {
    let temp_dir = TempDir::new().unwrap();
    temp_dir.child("a.png").write_str("x").unwrap();

    scramblr(temp_dir.path())
        .args(["shuffle", "a.png", "--yes"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not a directory"));
}

#[test]
fn test_shuffle_rejects_prefix_with_separator() {
    let temp_dir = TempDir::new().unwrap();
    let photos = photo_dir(&temp_dir, &["a.png"]);

    scramblr(temp_dir.path())
        .args(["shuffle", photos.to_str().unwrap(), "--prefix", "../img_", "--yes"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid prefix"));

    assert_eq!(names_in(&photos), set(&["a.png"]));
}

#[test]
fn test_shuffle_prefix_from_env() {
    let temp_dir = TempDir::new().unwrap();
    let photos = photo_dir(&temp_dir, &["only.gif"]);

    scramblr(temp_dir.path())
        .env("SCRAMBLR_PREFIX", "env_")
        .args(["shuffle", photos.to_str().unwrap(), "--yes", "--quiet"])
        .assert()
        .success();

    assert_eq!(names_in(&photos), set(&["env_0.gif"]));
}

#[test]
fn test_shuffle_default_prefix() {
    let temp_dir = TempDir::new().unwrap();
    let photos = photo_dir(&temp_dir, &["only.gif"]);

    scramblr(temp_dir.path())
        .args(["shuffle", photos.to_str().unwrap(), "-y", "-q"])
        .assert()
        .success();

    assert_eq!(names_in(&photos), set(&["image_0.gif"]));
}

#[test]
fn test_shuffle_dry_run_touches_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let photos = photo_dir(&temp_dir, &["a.png", "b.jpg"]);

    scramblr(temp_dir.path())
        .args(["shuffle", photos.to_str().unwrap(), "--dry-run", "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a.png"))
        .stdout(predicate::str::contains("2 image files in"));

    assert_eq!(names_in(&photos), set(&["a.png", "b.jpg"]));
}

#[test]
fn test_shuffle_json_output() {
    let temp_dir = TempDir::new().unwrap();
    let photos = photo_dir(&temp_dir, &["a.png", "b.png"]);

    let output = scramblr(temp_dir.path())
        .args(["shuffle", photos.to_str().unwrap(), "--yes", "--output", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["operation"], "shuffle");
    assert_eq!(json["summary"]["renamed"], 2);
    assert_eq!(json["summary"]["total"], 2);
}

#[test]
fn test_shuffle_empty_directory() {
    let temp_dir = TempDir::new().unwrap();
    let photos = photo_dir(&temp_dir, &["readme.md"]);

    scramblr(temp_dir.path())
        .args(["shuffle", photos.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("No compatible image files found"));

    assert_eq!(names_in(&photos), set(&["readme.md"]));
}

#[test]
fn test_shuffle_journal_records_renames() {
    let temp_dir = TempDir::new().unwrap();
    let photos = photo_dir(&temp_dir, &["a.png", "b.png"]);
    let journal = temp_dir.child("logs").child("run.log");

    scramblr(temp_dir.path())
        .args(["shuffle", photos.to_str().unwrap(), "-y", "-q", "--journal"])
        .arg(journal.path())
        .assert()
        .success();

    let content = fs::read_to_string(journal.path()).unwrap();
    assert_eq!(content.lines().filter(|l| l.contains("phase 1")).count(), 2);
    assert_eq!(content.lines().filter(|l| l.contains("phase 2")).count(), 2);
}

#[test]
fn test_config_file_sets_naming() {
    let temp_dir = TempDir::new().unwrap();
    let photos = photo_dir(&temp_dir, &["a.png", "b.png"]);
    temp_dir
        .child(".scramblr.toml")
        .write_str("[defaults]\nprefix = \"holiday_\"\nstart_index = 1\npad_width = 3\n")
        .unwrap();

    scramblr(temp_dir.path())
        .args(["shuffle", photos.to_str().unwrap(), "-y", "-q"])
        .assert()
        .success();

    assert_eq!(
        names_in(&photos),
        set(&["holiday_001.png", "holiday_002.png"])
    );
}

#[test]
fn test_explicit_config_path_and_flag_override() {
    let temp_dir = TempDir::new().unwrap();
    let photos = photo_dir(&temp_dir, &["a.png"]);
    let config = temp_dir.child("custom.toml");
    config.write_str("[defaults]\npad_width = 2\n").unwrap();

    scramblr(temp_dir.path())
        .args(["shuffle", photos.to_str().unwrap(), "-y", "-q", "--pad", "4", "--config"])
        .arg(config.path())
        .assert()
        .success();

    assert_eq!(names_in(&photos), set(&["image_0000.png"]));
}

#[test]
fn test_broken_config_is_invalid_input() {
    let temp_dir = TempDir::new().unwrap();
    let photos = photo_dir(&temp_dir, &["a.png"]);
    temp_dir.child(".scramblr.toml").write_str("[defaults").unwrap();

    scramblr(temp_dir.path())
        .args(["shuffle", photos.to_str().unwrap(), "-y"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains(".scramblr.toml"));

    assert_eq!(names_in(&photos), set(&["a.png"]));
}

#[test]
fn test_plan_leaves_files_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let photos = photo_dir(&temp_dir, &["a.png", "b.jpg"]);

    scramblr(temp_dir.path())
        .args([
            "plan",
            photos.to_str().unwrap(),
            "--prefix",
            "img_",
            "--preview",
            "summary",
            "--no-color",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("[PLAN]"))
        .stdout(predicate::str::contains("Prefix: img_"))
        .stdout(predicate::str::contains("Renames: 2 files"));

    assert_eq!(names_in(&photos), set(&["a.png", "b.jpg"]));
}

#[test]
fn test_plan_json_output() {
    let temp_dir = TempDir::new().unwrap();
    let photos = photo_dir(&temp_dir, &["a.png", "b.jpg", "c.gif"]);

    let output = scramblr(temp_dir.path())
        .args(["plan", photos.to_str().unwrap(), "--output", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["operation"], "plan");
    assert_eq!(json["dry_run"], true);
    assert_eq!(json["summary"]["files"], 3);
    assert_eq!(json["plan"]["renames"].as_array().unwrap().len(), 3);
}

#[test]
fn test_plan_missing_directory() {
    let temp_dir = TempDir::new().unwrap();

    scramblr(temp_dir.path())
        .args(["plan", "nowhere"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_completions_command() {
    let temp_dir = TempDir::new().unwrap();

    scramblr(temp_dir.path())
        .args(["completions", "bash", "--dir", "out"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated completion file"));

    temp_dir
        .child("out")
        .child("scramblr.bash")
        .assert(predicate::path::exists());
}

#[test]
fn test_shuffle_rejects_oversized_naming() {
    let temp_dir = TempDir::new().unwrap();
    let photos = photo_dir(&temp_dir, &["a.png"]);

    scramblr(temp_dir.path())
        .args(["shuffle", photos.to_str().unwrap(), "-y", "--start"])
        .arg(usize::MAX.to_string())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid start index"));

    scramblr(temp_dir.path())
        .args(["shuffle", photos.to_str().unwrap(), "-y", "--pad", "4000000000"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid pad width"));

    assert_eq!(names_in(&photos), set(&["a.png"]));
}
