use clonepick_core::filter::matched_len;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Color;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::Clear;

use super::{CloneScreen, Focus};
use crate::centered_rect;
use crate::selector::SelectorView;
use crate::theme;
use crate::ui::filter_list::{FilterListRender, render_filter_list};
use crate::ui::input_field::render_input;
use crate::ui::modal::render_notice_modal;
use crate::ui::text::{
    compact_hint, focus_line, key_hint_height, key_hint_paragraph, label_value_line,
    wrapped_paragraph,
};

impl CloneScreen {
    pub(crate) fn render(&self, frame: &mut Frame<'_>) {
        let area = frame.area();
        let key_text = self.key_text(area.width);
        let footer_height = key_hint_height(area.width, key_text);
        let [header, filter_area, body, path_area, footer] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(6),
                Constraint::Length(3),
                Constraint::Length(footer_height),
            ])
            .areas(area);

        self.render_header(frame, header);

        let filter_title = if self.focus == Focus::Filter {
            focus_line("Filter")
        } else {
            Line::from("Filter (/ to focus)")
        };
        render_input(
            frame,
            filter_area,
            &self.filter,
            filter_title,
            self.focus == Focus::Filter && !self.has_overlay(),
        );

        self.render_list(frame, body);

        let path_title = if self.focus == Focus::Path {
            focus_line("Local path")
        } else {
            Line::from("Local path (o: Choose…)")
        };
        render_input(
            frame,
            path_area,
            &self.path,
            path_title,
            self.focus == Focus::Path && !self.has_overlay(),
        );

        frame.render_widget(
            key_hint_paragraph(key_text).block(theme::key_block()),
            footer,
        );

        if self.prompt_requested() {
            self.render_directory_prompt(frame);
        }

        if let Some(message) = self.notice.as_deref() {
            render_notice_modal(frame, "Clone", message, 60, 30, "Enter/Esc: continue");
        }
    }

    fn has_overlay(&self) -> bool {
        self.notice.is_some() || self.prompt_requested()
    }

    fn key_text(&self, width: u16) -> &'static str {
        match self.focus {
            Focus::List => compact_hint(
                width,
                "Enter: clone    Up/Down or j/k: move    /: filter    a: account    o: choose path    r: retry    Tab: focus    Esc/q: cancel",
                "Enter: clone    j/k: move    /: filter    a: account    o: path    r: retry    Esc: cancel",
                "Enter clone | j/k | / filter | a acct | o path | Esc",
            ),
            Focus::Filter => compact_hint(
                width,
                "Type: filter    Up/Down: move    Enter: clone    Tab: next field    Esc: list focus",
                "Type filter    Up/Down move    Enter clone    Esc: list",
                "Type filter | Enter clone | Esc list",
            ),
            Focus::Path => compact_hint(
                width,
                "Type: local path    Enter: clone    Tab: next field    Esc: list focus",
                "Type path    Enter clone    Tab next    Esc: list",
                "Type path | Enter clone | Esc list",
            ),
        }
    }

    fn render_header(&self, frame: &mut Frame<'_>, area: Rect) {
        let account = self.current_account();
        let mut spans = label_value_line("Account", account.to_string()).spans;
        if self.prepare.accounts.len() > 1 {
            spans.push(Span::styled(
                format!(
                    "  ({}/{}, a: switch)",
                    self.account_index + 1,
                    self.prepare.accounts.len()
                ),
                theme::secondary_text(),
            ));
        }
        frame.render_widget(
            wrapped_paragraph(Line::from(spans)).block(theme::chrome("Clone a repository")),
            area,
        );
    }

    fn list_title(&self, label: String) -> Line<'static> {
        if self.focus == Focus::List {
            focus_line(label)
        } else {
            Line::from(label)
        }
    }

    fn render_list(&self, frame: &mut Frame<'_>, area: Rect) {
        let title = self.list_title("Repositories".to_string());

        match self.selector.view() {
            SelectorView::Loading => {
                let body = Text::from(vec![
                    Line::from(""),
                    self.selector.spinner().line("Loading repositories…"),
                ]);
                frame.render_widget(wrapped_paragraph(body).block(theme::chrome(title)), area);
            }
            SelectorView::ConnectionFailed => {
                let body = Text::from(vec![
                    Line::from(""),
                    Line::from(Span::styled(
                        "No internet connection. Try again?",
                        theme::warning_prompt(),
                    )),
                    Line::from(Span::styled("r: retry", theme::secondary_text())),
                ]);
                frame.render_widget(wrapped_paragraph(body).block(theme::chrome(title)), area);
            }
            SelectorView::NoMatches => {
                let body = Text::from(vec![
                    Line::from(""),
                    Line::from("Sorry, I can't find that repository."),
                ]);
                frame.render_widget(wrapped_paragraph(body).block(theme::chrome(title)), area);
            }
            SelectorView::Populated(groups) => {
                let title = self.list_title(format!("Repositories ({})", matched_len(&groups)));
                let selected_url = self
                    .selector
                    .state()
                    .selected_item
                    .as_ref()
                    .map(|item| item.url.as_str());
                render_filter_list(
                    frame,
                    area,
                    &groups,
                    selected_url,
                    FilterListRender {
                        title,
                        highlight_style: theme::list_highlight(Color::Cyan),
                    },
                );
            }
        }
    }

    fn render_directory_prompt(&self, frame: &mut Frame<'_>) {
        let area = centered_rect(70, 20, frame.area());
        let [input_area, hint_area] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(3)])
            .areas(area);

        frame.render_widget(Clear, area);
        render_input(
            frame,
            input_area,
            &self.prompt_input,
            focus_line("Choose a directory"),
            true,
        );
        frame.render_widget(
            key_hint_paragraph("Enter: use directory    Esc: cancel").block(theme::key_block()),
            hint_area,
        );
    }
}
