use std::path::{Path, PathBuf};

pub fn expand_home(raw: &str, home: &Path) -> PathBuf {
    if raw == "~" {
        return home.to_path_buf();
    }

    match raw.strip_prefix("~/") {
        Some(rest) => home.join(rest),
        None => PathBuf::from(raw),
    }
}

pub fn repository_name_from_url(url: &str) -> Option<&str> {
    let trimmed = url.trim().trim_end_matches('/');
    let last = trimmed.rsplit(['/', ':']).next()?;
    let name = last.strip_suffix(".git").unwrap_or(last);
    if name.is_empty() { None } else { Some(name) }
}

pub fn default_clone_path(base_dir: &Path, url: &str) -> Option<PathBuf> {
    repository_name_from_url(url).map(|name| base_dir.join(name))
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::{default_clone_path, expand_home, repository_name_from_url};

    #[test]
    fn expand_home_replaces_leading_tilde_only() {
        let home = Path::new("/home/me");
        assert_eq!(expand_home("~", home), PathBuf::from("/home/me"));
        assert_eq!(expand_home("~/src", home), PathBuf::from("/home/me/src"));
        assert_eq!(expand_home("/opt/~src", home), PathBuf::from("/opt/~src"));
    }

    #[test]
    fn repository_name_handles_https_and_ssh_urls() {
        assert_eq!(
            repository_name_from_url("https://github.com/octocat/Hello-World.git"),
            Some("Hello-World")
        );
        assert_eq!(
            repository_name_from_url("git@github.com:octocat/spoon-knife.git"),
            Some("spoon-knife")
        );
        assert_eq!(
            repository_name_from_url("https://github.com/octocat/linguist/"),
            Some("linguist")
        );
        assert_eq!(repository_name_from_url(""), None);
    }

    #[test]
    fn default_clone_path_joins_base_and_repository_name() {
        assert_eq!(
            default_clone_path(
                Path::new("/home/me/src"),
                "https://github.com/octocat/Hello-World.git"
            ),
            Some(PathBuf::from("/home/me/src/Hello-World"))
        );
        assert_eq!(default_clone_path(Path::new("/tmp"), "   "), None);
    }
}
