use clonepick_core::filter::FilteredGroup;
use ratatui::Frame;
use ratatui::layout::{Margin, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState, Scrollbar, ScrollbarOrientation, ScrollbarState};

use crate::theme;
use crate::ui::item_renderer::{group_header_title, render_item_line};

pub(crate) struct FilterListRender<'a> {
    pub(crate) title: Line<'a>,
    pub(crate) highlight_style: Style,
}

/// Flattens filtered groups into list rows, returning the row index of the
/// selected url when it is visible.
fn list_rows(
    groups: &[FilteredGroup<'_>],
    selected_url: Option<&str>,
) -> (Vec<ListItem<'static>>, Option<usize>) {
    let mut rows = Vec::new();
    let mut selected_row = None;

    for group in groups {
        rows.push(ListItem::new(Line::from(Span::styled(
            group_header_title(group.identifier),
            theme::group_header(),
        ))));
        for matched in &group.items {
            if selected_url == Some(matched.item.url.as_str()) {
                selected_row = Some(rows.len());
            }
            let mut line = render_item_line(matched.item, &matched.matches);
            line.spans.insert(0, Span::raw("  "));
            rows.push(ListItem::new(line));
        }
    }

    (rows, selected_row)
}

pub(crate) fn render_filter_list(
    frame: &mut Frame<'_>,
    area: Rect,
    groups: &[FilteredGroup<'_>],
    selected_url: Option<&str>,
    render: FilterListRender<'_>,
) {
    let (rows, selected_row) = list_rows(groups, selected_url);
    let row_count = rows.len();

    let list = List::new(rows)
        .block(theme::chrome(render.title))
        .highlight_style(render.highlight_style)
        .highlight_symbol(">> ");

    let mut state = ListState::default();
    state.select(selected_row);
    frame.render_stateful_widget(list, area, &mut state);

    let viewport = area.height.saturating_sub(2) as usize;
    if row_count <= viewport {
        return;
    }
    let mut scrollbar_state = ScrollbarState::new(row_count)
        .position(selected_row.unwrap_or(0))
        .viewport_content_length(viewport);
    frame.render_stateful_widget(
        Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(None)
            .end_symbol(None),
        area.inner(Margin {
            vertical: 1,
            horizontal: 0,
        }),
        &mut scrollbar_state,
    );
}
