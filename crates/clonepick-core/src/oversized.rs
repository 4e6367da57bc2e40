use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use thiserror::Error;
use walkdir::WalkDir;

pub const DEFAULT_LIMIT_MB: u64 = 100;
pub const GIT_LFS_HELP_URL: &str = "https://help.github.com/articles/versioning-large-files/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OversizedFile {
    pub path: String,
    pub size_bytes: u64,
}

#[derive(Debug, Error)]
pub enum OversizedError {
    #[error("failed to read metadata for {path}: {source}")]
    Metadata {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to walk {path}: {message}")]
    Walk { path: PathBuf, message: String },
}

pub fn limit_bytes(limit_mb: u64) -> u64 {
    limit_mb.saturating_mul(1024 * 1024)
}

/// Returns every file at or below `paths` strictly larger than `limit_bytes`,
/// in the order the files were discovered. `.git` directories are skipped.
pub fn find_oversized_files(
    paths: &[PathBuf],
    limit_bytes: u64,
) -> Result<Vec<OversizedFile>, OversizedError> {
    let files = expand_files(paths)?;

    let sized = files
        .par_iter()
        .map(|path| {
            fs::metadata(path)
                .map(|metadata| (path, metadata.len()))
                .map_err(|source| OversizedError::Metadata {
                    path: path.clone(),
                    source,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(sized
        .into_iter()
        .filter(|(_, size)| *size > limit_bytes)
        .map(|(path, size_bytes)| OversizedFile {
            path: path.to_string_lossy().to_string(),
            size_bytes,
        })
        .collect())
}

pub fn format_size(size_bytes: u64) -> String {
    let mb = size_bytes as f64 / (1024.0 * 1024.0);
    format!("{mb:.1} MB")
}

fn expand_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>, OversizedError> {
    let mut files = Vec::new();
    for path in paths {
        let metadata = fs::metadata(path).map_err(|source| OversizedError::Metadata {
            path: path.clone(),
            source,
        })?;
        if !metadata.is_dir() {
            files.push(path.clone());
            continue;
        }

        for entry in WalkDir::new(path)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !is_git_dir(entry.path()))
        {
            let entry = entry.map_err(|error| OversizedError::Walk {
                path: path.clone(),
                message: error.to_string(),
            })?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }
    }
    Ok(files)
}

fn is_git_dir(path: &Path) -> bool {
    path.file_name().is_some_and(|name| name == ".git")
}

#[cfg(test)]
mod tests {
    use std::fs::{self, File};

    use super::*;

    fn sized_file(path: &Path, size: u64) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent");
        }
        File::create(path)
            .expect("create file")
            .set_len(size)
            .expect("set length");
    }

    #[test]
    fn finds_files_over_limit_in_files_and_directories() {
        let temp = tempfile::tempdir().expect("temp dir");
        let root = temp.path();
        sized_file(&root.join("small.bin"), 10);
        sized_file(&root.join("assets/big.psd"), 2048);
        sized_file(&root.join("assets/tiny.png"), 12);
        sized_file(&root.join("video.mov"), 4096);

        let found = find_oversized_files(
            &[
                root.join("assets"),
                root.join("small.bin"),
                root.join("video.mov"),
            ],
            1024,
        )
        .expect("scan");

        let names: Vec<&str> = found
            .iter()
            .map(|file| {
                Path::new(&file.path)
                    .file_name()
                    .and_then(|name| name.to_str())
                    .expect("file name")
            })
            .collect();
        assert_eq!(names, vec!["big.psd", "video.mov"]);
        assert_eq!(found[1].size_bytes, 4096);
    }

    #[test]
    fn skips_git_directories_and_files_at_limit() {
        let temp = tempfile::tempdir().expect("temp dir");
        let root = temp.path();
        sized_file(&root.join(".git/objects/pack/huge.pack"), 9000);
        sized_file(&root.join("exact.bin"), 1024);

        let found = find_oversized_files(&[root.to_path_buf()], 1024).expect("scan");
        assert!(found.is_empty());
    }

    #[test]
    fn missing_path_is_reported() {
        let temp = tempfile::tempdir().expect("temp dir");
        let error = find_oversized_files(&[temp.path().join("nope")], 1).expect_err("scan");
        assert!(error.to_string().contains("failed to read metadata"));
    }

    #[test]
    fn limit_and_size_formatting_use_binary_megabytes() {
        assert_eq!(limit_bytes(100), 104_857_600);
        assert_eq!(format_size(157_286_400), "150.0 MB");
    }
}
