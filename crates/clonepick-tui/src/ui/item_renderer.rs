use clonepick_core::filter::ItemMatches;
use clonepick_core::repository::{
    ClonableRepositoryListItem, RepositoryIcon, YOUR_REPOSITORIES_IDENTIFIER,
};
use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::theme;

pub(crate) fn icon_tag(icon: RepositoryIcon) -> &'static str {
    match icon {
        RepositoryIcon::Repo => "repo",
        RepositoryIcon::Lock => "lock",
        RepositoryIcon::Fork => "fork",
    }
}

pub(crate) fn group_header_title(identifier: &str) -> String {
    if identifier == YOUR_REPOSITORIES_IDENTIFIER {
        "Your repositories".to_string()
    } else {
        identifier.to_string()
    }
}

/// Builds the display line for one repository.
///
/// Matched characters in the name and in the `owner/name` suffix are
/// highlighted independently; the suffix is dimmed and skipped when it
/// repeats the name.
pub(crate) fn render_item_line(
    item: &ClonableRepositoryListItem,
    matches: &ItemMatches,
) -> Line<'static> {
    let mut spans = vec![Span::styled(
        format!("[{}] ", icon_tag(item.icon)),
        theme::secondary_text(),
    )];
    spans.extend(highlighted_spans(
        item.title(),
        &matches.title,
        Style::default(),
        theme::match_highlight(),
    ));

    if let Some(subtitle) = item.subtitle()
        && subtitle != item.title()
    {
        spans.push(Span::styled("  ", theme::secondary_text()));
        spans.extend(highlighted_spans(
            subtitle,
            &matches.subtitle,
            theme::secondary_text(),
            theme::match_highlight(),
        ));
    }

    Line::from(spans)
}

fn highlighted_spans(
    text: &str,
    indices: &[usize],
    base: Style,
    highlight: Style,
) -> Vec<Span<'static>> {
    if indices.is_empty() {
        return vec![Span::styled(text.to_string(), base)];
    }

    let mut spans = Vec::new();
    let mut current = String::new();
    let mut current_matched = false;
    for (index, ch) in text.chars().enumerate() {
        let matched = indices.contains(&index);
        if matched != current_matched && !current.is_empty() {
            let style = if current_matched { highlight } else { base };
            spans.push(Span::styled(std::mem::take(&mut current), style));
        }
        current_matched = matched;
        current.push(ch);
    }
    if !current.is_empty() {
        let style = if current_matched { highlight } else { base };
        spans.push(Span::styled(current, style));
    }

    spans
}

#[cfg(test)]
mod tests {
    use clonepick_core::filter::ItemMatches;
    use clonepick_core::repository::{ClonableRepositoryListItem, RepositoryIcon};

    use super::{group_header_title, render_item_line};
    use crate::theme;

    fn item(name: &str, full_name: &str, icon: RepositoryIcon) -> ClonableRepositoryListItem {
        ClonableRepositoryListItem {
            text: vec![name.to_string(), full_name.to_string()],
            icon,
            url: format!("https://github.com/{full_name}.git"),
            group: "your-repositories".to_string(),
        }
    }

    fn plain(line: &ratatui::text::Line<'_>) -> String {
        line.spans
            .iter()
            .map(|span| span.content.as_ref())
            .collect()
    }

    #[test]
    fn renders_icon_name_and_full_name() {
        let line = render_item_line(
            &item("desktop", "octocat/desktop", RepositoryIcon::Lock),
            &ItemMatches::default(),
        );
        assert_eq!(plain(&line), "[lock] desktop  octocat/desktop");
    }

    #[test]
    fn highlights_matched_title_characters() {
        let matches = ItemMatches {
            title: vec![0, 1],
            subtitle: Vec::new(),
        };
        let line = render_item_line(&item("desk", "o/desk", RepositoryIcon::Repo), &matches);

        assert_eq!(line.spans[1].content.as_ref(), "de");
        assert_eq!(line.spans[1].style, theme::match_highlight());
        assert_eq!(line.spans[2].content.as_ref(), "sk");
        assert_ne!(line.spans[2].style, theme::match_highlight());
    }

    #[test]
    fn highlights_matched_subtitle_characters() {
        let matches = ItemMatches {
            title: Vec::new(),
            subtitle: vec![0],
        };
        let line = render_item_line(&item("api", "acme/api", RepositoryIcon::Fork), &matches);
        let highlighted: Vec<&str> = line
            .spans
            .iter()
            .filter(|span| span.style == theme::match_highlight())
            .map(|span| span.content.as_ref())
            .collect();
        assert_eq!(highlighted, vec!["a"]);
        assert!(plain(&line).starts_with("[fork] api"));
    }

    #[test]
    fn skips_subtitle_identical_to_title() {
        let line = render_item_line(
            &item("same", "same", RepositoryIcon::Repo),
            &ItemMatches::default(),
        );
        assert_eq!(plain(&line), "[repo] same");
    }

    #[test]
    fn own_group_has_friendly_header() {
        assert_eq!(group_header_title("your-repositories"), "Your repositories");
        assert_eq!(group_header_title("acme"), "acme");
    }
}
