use assert_cmd::Command;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

pub fn new_command_with_temp_home() -> (Command, tempfile::TempDir) {
    let temp_home = tempfile::tempdir().expect("temp home");
    let binary = assert_cmd::cargo::cargo_bin!("clonepick");
    let mut command = Command::new(binary);
    command.env("HOME", temp_home.path());
    command.env("XDG_CONFIG_HOME", temp_home.path().join(".config"));
    (command, temp_home)
}

#[allow(dead_code)]
pub fn config_path(home: &Path) -> PathBuf {
    home.join(".config").join("clonepick").join("config.toml")
}

#[allow(dead_code)]
pub fn write_config(home: &Path, extra: &str) {
    let path = config_path(home);
    fs::create_dir_all(path.parent().expect("config dir")).expect("create config dir");
    fs::write(
        path,
        format!(
            r#"
version = 1

[[accounts]]
id = 1
login = "octocat"

[[accounts]]
id = 2
login = "hubot"
host = "ghe.example.com"
{extra}
"#
        ),
    )
    .expect("write config");
}

#[allow(dead_code)]
pub fn sized_file(path: &Path, size: u64) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent");
    }
    File::create(path)
        .expect("create file")
        .set_len(size)
        .expect("set length");
}

#[allow(dead_code)]
pub fn assert_timestamp_log_names(entries: &[std::fs::DirEntry]) {
    assert!(!entries.is_empty(), "expected at least one diagnostics log");

    for entry in entries {
        let name = entry
            .file_name()
            .into_string()
            .expect("diagnostics filename utf8");
        let stem = name
            .strip_suffix(".log")
            .expect("diagnostics filename .log suffix");
        assert!(
            !stem.is_empty() && stem.chars().all(|character| character.is_ascii_digit()),
            "diagnostics filename must be <timestamp>.log, got: {name}"
        );
    }
}
