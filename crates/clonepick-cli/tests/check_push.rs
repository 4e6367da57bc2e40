mod support;

use predicates::prelude::*;

use support::{new_command_with_temp_home, sized_file, write_config};

const MIB: u64 = 1024 * 1024;

#[test]
fn small_files_pass_silently_without_config() {
    let (mut command, temp_home) = new_command_with_temp_home();
    let repo = temp_home.path().join("repo");
    sized_file(&repo.join("README.md"), 512);
    sized_file(&repo.join("src").join("main.rs"), 2048);

    command
        .args(["check-push", "--no-tui"])
        .arg(&repo)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn oversized_file_is_listed_and_push_is_canceled() {
    let (mut command, temp_home) = new_command_with_temp_home();
    let repo = temp_home.path().join("repo");
    sized_file(&repo.join("assets").join("video.mov"), 3 * MIB);
    sized_file(&repo.join("README.md"), 100);

    command
        .args(["check-push", "--no-tui", "--limit-mb", "1"])
        .arg(&repo)
        .assert()
        .failure()
        .stdout(predicate::str::contains("video.mov"))
        .stdout(predicate::str::contains("3.0 MB"))
        .stdout(predicate::str::contains("README.md").not())
        .stdout(predicate::str::contains("Git LFS"))
        .stderr(predicate::str::contains(
            "push canceled: 1 file(s) exceed the 1 MB limit",
        ));
}

#[test]
fn file_exactly_at_limit_is_allowed() {
    let (mut command, temp_home) = new_command_with_temp_home();
    let file = temp_home.path().join("exact.bin");
    sized_file(&file, MIB);

    command
        .args(["check-push", "--no-tui", "--limit-mb", "1"])
        .arg(&file)
        .assert()
        .success();
}

#[test]
fn configured_limit_applies_when_flag_is_absent() {
    let (mut command, temp_home) = new_command_with_temp_home();
    write_config(temp_home.path(), "\n[push]\nlimit_mb = 2\n");
    let file = temp_home.path().join("data.bin");
    sized_file(&file, 3 * MIB);

    command
        .args(["check-push", "--no-tui"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceed the 2 MB limit"));
}

#[test]
fn git_directory_contents_are_ignored() {
    let (mut command, temp_home) = new_command_with_temp_home();
    let repo = temp_home.path().join("repo");
    sized_file(&repo.join(".git").join("objects").join("pack.bin"), 3 * MIB);

    command
        .args(["check-push", "--no-tui", "--limit-mb", "1"])
        .arg(&repo)
        .assert()
        .success();
}

#[test]
fn zero_limit_is_rejected() {
    let (mut command, temp_home) = new_command_with_temp_home();
    let file = temp_home.path().join("a.txt");
    sized_file(&file, 1);

    command
        .args(["check-push", "--no-tui", "--limit-mb", "0"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "push limit must be greater than zero",
        ));
}

#[test]
fn missing_path_reports_scan_failure() {
    let (mut command, temp_home) = new_command_with_temp_home();
    command
        .args(["check-push", "--no-tui"])
        .arg(temp_home.path().join("does-not-exist"))
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "failed to scan files for the push size limit",
        ));
}

#[test]
fn check_push_requires_paths() {
    let (mut command, _temp_home) = new_command_with_temp_home();
    command
        .args(["check-push", "--no-tui"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}
