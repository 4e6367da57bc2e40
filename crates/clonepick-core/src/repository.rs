use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const YOUR_REPOSITORIES_IDENTIFIER: &str = "your-repositories";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ApiOwner {
    pub login: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ApiRepository {
    pub name: String,
    pub owner: ApiOwner,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub fork: bool,
    pub clone_url: String,
}

impl ApiRepository {
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner.login, self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryIcon {
    Repo,
    Lock,
    Fork,
}

impl RepositoryIcon {
    pub fn for_repository(repository: &ApiRepository) -> Self {
        if repository.private {
            Self::Lock
        } else if repository.fork {
            Self::Fork
        } else {
            Self::Repo
        }
    }
}

/// One selectable entry in the clone list.
///
/// `text[0]` is the repository name and `text[1]` its `owner/name`; both are
/// searched by the filter, only the first is highlighted as the title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClonableRepositoryListItem {
    pub text: Vec<String>,
    pub icon: RepositoryIcon,
    pub url: String,
    pub group: String,
}

impl ClonableRepositoryListItem {
    pub fn from_repository(repository: &ApiRepository, group: &str) -> Self {
        Self {
            text: vec![repository.name.clone(), repository.full_name()],
            icon: RepositoryIcon::for_repository(repository),
            url: repository.clone_url.clone(),
            group: group.to_string(),
        }
    }

    pub fn title(&self) -> &str {
        self.text.first().map(String::as_str).unwrap_or_default()
    }

    pub fn subtitle(&self) -> Option<&str> {
        self.text.get(1).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterListGroup {
    pub identifier: String,
    pub items: Vec<ClonableRepositoryListItem>,
}

impl FilterListGroup {
    pub fn is_own(&self) -> bool {
        self.identifier == YOUR_REPOSITORIES_IDENTIFIER
    }
}

pub fn group_identifier(owner_login: &str, login: &str) -> String {
    if owner_login.eq_ignore_ascii_case(login) {
        YOUR_REPOSITORIES_IDENTIFIER.to_string()
    } else {
        owner_login.to_string()
    }
}

/// Groups repositories for display: the account's own repositories first,
/// then one group per other owner ordered by login. Items keep the order in
/// which they were received.
pub fn group_repositories(repositories: &[ApiRepository], login: &str) -> Vec<FilterListGroup> {
    let mut own = Vec::new();
    let mut others = BTreeMap::<String, FilterListGroup>::new();

    for repository in repositories {
        let identifier = group_identifier(&repository.owner.login, login);
        let item = ClonableRepositoryListItem::from_repository(repository, &identifier);
        if identifier == YOUR_REPOSITORIES_IDENTIFIER {
            own.push(item);
            continue;
        }

        others
            .entry(identifier.to_lowercase())
            .or_insert_with(|| FilterListGroup {
                identifier,
                items: Vec::new(),
            })
            .items
            .push(item);
    }

    let mut groups = Vec::with_capacity(others.len() + 1);
    if !own.is_empty() {
        groups.push(FilterListGroup {
            identifier: YOUR_REPOSITORIES_IDENTIFIER.to_string(),
            items: own,
        });
    }
    groups.extend(others.into_values());
    groups
}

#[cfg(test)]
pub(crate) fn repository(owner: &str, name: &str) -> ApiRepository {
    ApiRepository {
        name: name.to_string(),
        owner: ApiOwner {
            login: owner.to_string(),
        },
        private: false,
        fork: false,
        clone_url: format!("https://github.com/{owner}/{name}.git"),
    }
}
