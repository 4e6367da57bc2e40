use crate::repository::{ClonableRepositoryListItem, FilterListGroup};

/// Character indices matched by the current filter text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemMatches {
    pub title: Vec<usize>,
    pub subtitle: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedItem<'a> {
    pub item: &'a ClonableRepositoryListItem,
    pub matches: ItemMatches,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredGroup<'a> {
    pub identifier: &'a str,
    pub items: Vec<MatchedItem<'a>>,
}

/// Filters grouped items against `text`, dropping groups left empty.
///
/// Items match when the query is a case-insensitive subsequence of the title,
/// falling back to the subtitle. Group and item order are preserved.
pub fn filter_groups<'a>(groups: &'a [FilterListGroup], text: &str) -> Vec<FilteredGroup<'a>> {
    let query: Vec<char> = text
        .trim()
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .map(fold_case)
        .collect();

    groups
        .iter()
        .filter_map(|group| {
            let items: Vec<MatchedItem<'a>> = group
                .items
                .iter()
                .filter_map(|item| {
                    match_item(item, &query).map(|matches| MatchedItem { item, matches })
                })
                .collect();
            if items.is_empty() {
                None
            } else {
                Some(FilteredGroup {
                    identifier: group.identifier.as_str(),
                    items,
                })
            }
        })
        .collect()
}

pub fn matched_len(groups: &[FilteredGroup<'_>]) -> usize {
    groups.iter().map(|group| group.items.len()).sum()
}

fn match_item(item: &ClonableRepositoryListItem, query: &[char]) -> Option<ItemMatches> {
    if query.is_empty() {
        return Some(ItemMatches::default());
    }

    if let Some(title) = subsequence_indices(item.title(), query) {
        return Some(ItemMatches {
            title,
            subtitle: Vec::new(),
        });
    }

    let subtitle = subsequence_indices(item.subtitle()?, query)?;
    Some(ItemMatches {
        title: Vec::new(),
        subtitle,
    })
}

fn subsequence_indices(target: &str, query: &[char]) -> Option<Vec<usize>> {
    let mut indices = Vec::with_capacity(query.len());
    let mut remaining = query.iter().peekable();

    for (index, ch) in target.chars().enumerate() {
        let Some(expected) = remaining.peek() else {
            break;
        };
        if fold_case(ch) == **expected {
            indices.push(index);
            remaining.next();
        }
    }

    if remaining.peek().is_none() {
        Some(indices)
    } else {
        None
    }
}

fn fold_case(ch: char) -> char {
    ch.to_lowercase().next().unwrap_or(ch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{group_repositories, repository};

    fn sample_groups() -> Vec<FilterListGroup> {
        group_repositories(
            &[
                repository("octocat", "hello-world"),
                repository("octocat", "spoon-knife"),
                repository("github", "linguist"),
                repository("github", "hub"),
            ],
            "octocat",
        )
    }

    fn visible_titles<'a>(groups: &[FilteredGroup<'a>]) -> Vec<&'a str> {
        groups
            .iter()
            .flat_map(|group| group.items.iter().map(|matched| matched.item.title()))
            .collect()
    }

    #[test]
    fn empty_query_keeps_everything_without_highlights() {
        let groups = sample_groups();
        let filtered = filter_groups(&groups, "   ");
        assert_eq!(matched_len(&filtered), 4);
        assert!(
            filtered
                .iter()
                .flat_map(|group| &group.items)
                .all(|matched| matched.matches == ItemMatches::default())
        );
    }

    #[test]
    fn subsequence_match_records_title_indices() {
        let groups = sample_groups();
        let filtered = filter_groups(&groups, "HW");
        assert_eq!(visible_titles(&filtered), vec!["hello-world"]);
        assert_eq!(filtered[0].items[0].matches.title, vec![0, 6]);
    }

    #[test]
    fn subtitle_match_is_used_when_title_misses() {
        let groups = sample_groups();
        let filtered = filter_groups(&groups, "github/h");
        assert_eq!(visible_titles(&filtered), vec!["hub"]);
        let matches = &filtered[0].items[0].matches;
        assert!(matches.title.is_empty());
        assert_eq!(matches.subtitle[..6], [0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn groups_without_matches_are_dropped() {
        let groups = sample_groups();
        let filtered = filter_groups(&groups, "spoon");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].identifier, "your-repositories");
    }

    #[test]
    fn filter_is_a_pure_function_of_current_text() {
        let groups = sample_groups();
        let narrowed = filter_groups(&groups, "abc");
        assert!(narrowed.is_empty());

        let restored = filter_groups(&groups, "");
        assert_eq!(restored, filter_groups(&groups, ""));
        assert_eq!(
            visible_titles(&restored),
            vec!["hello-world", "spoon-knife", "linguist", "hub"]
        );
    }
}
