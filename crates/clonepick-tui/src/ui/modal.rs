use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::Clear;

use crate::centered_rect;
use crate::keymap;
use crate::theme;
use crate::ui::text::{key_hint_height, key_hint_paragraph, text_from_message, wrapped_paragraph};

pub(crate) struct ModalSpec<'a> {
    pub(crate) title: &'a str,
    pub(crate) title_style: Option<Style>,
    pub(crate) body: Text<'a>,
    pub(crate) key_hint: Option<&'a str>,
    pub(crate) width_pct: u16,
    pub(crate) height_pct: u16,
}

pub(crate) fn render_modal(frame: &mut Frame<'_>, spec: ModalSpec<'_>) {
    render_modal_scrolled(frame, spec, 0);
}

pub(crate) fn render_modal_scrolled(frame: &mut Frame<'_>, spec: ModalSpec<'_>, scroll: u16) {
    let area = centered_rect(spec.width_pct, spec.height_pct, frame.area());
    let title = if let Some(style) = spec.title_style {
        Line::from(Span::styled(spec.title.to_string(), style))
    } else {
        Line::from(spec.title.to_string())
    };
    let mut body_area = area;
    let key_area = if let Some(key_hint) = spec.key_hint {
        let footer_height = key_hint_height(area.width, key_hint);
        choose_key_area(frame.area(), area, footer_height).or_else(|| {
            let [inner_body, inner_key] = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(3), Constraint::Length(footer_height)])
                .areas(area);
            body_area = inner_body;
            Some(inner_key)
        })
    } else {
        None
    };

    frame.render_widget(Clear, body_area);
    frame.render_widget(
        wrapped_paragraph(spec.body)
            .scroll((scroll, 0))
            .block(theme::chrome(title)),
        body_area,
    );

    if let (Some(key_hint), Some(key_area)) = (spec.key_hint, key_area) {
        frame.render_widget(Clear, key_area);
        frame.render_widget(
            key_hint_paragraph(key_hint).block(theme::key_block()),
            key_area,
        );
    }
}

fn choose_key_area(screen: Rect, body: Rect, footer_height: u16) -> Option<Rect> {
    let screen_top = screen.y;
    let screen_bottom = screen.y.saturating_add(screen.height);
    let below_y = body.y.saturating_add(body.height);
    if below_y.saturating_add(footer_height) <= screen_bottom {
        return Some(Rect::new(body.x, below_y, body.width, footer_height));
    }

    let above_y = body.y.saturating_sub(footer_height);
    if above_y >= screen_top {
        return Some(Rect::new(body.x, above_y, body.width, footer_height));
    }

    None
}

/// Modal chrome with a single primary action that dismisses the dialog.
pub(crate) struct DialogSpec<'a> {
    pub(crate) title: &'a str,
    pub(crate) title_style: Option<Style>,
    pub(crate) body: Text<'a>,
    pub(crate) primary_action: &'a str,
    pub(crate) width_pct: u16,
    pub(crate) height_pct: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DialogSignal {
    Continue,
    Dismiss,
}

pub(crate) fn dialog_on_key(key: KeyEvent) -> DialogSignal {
    if keymap::is_confirm(key) || keymap::is_back(key) || keymap::is_quit(key) {
        DialogSignal::Dismiss
    } else {
        DialogSignal::Continue
    }
}

pub(crate) fn dialog_key_hint(primary_action: &str) -> String {
    format!("Enter/Esc: {primary_action}")
}

pub(crate) fn render_dialog(frame: &mut Frame<'_>, spec: DialogSpec<'_>, scroll: u16) {
    let key_hint = dialog_key_hint(spec.primary_action);
    render_modal_scrolled(
        frame,
        ModalSpec {
            title: spec.title,
            title_style: spec.title_style,
            body: spec.body,
            key_hint: Some(&key_hint),
            width_pct: spec.width_pct,
            height_pct: spec.height_pct,
        },
        scroll,
    );
}

pub(crate) fn render_error_modal(
    frame: &mut Frame<'_>,
    message: &str,
    width_pct: u16,
    height_pct: u16,
    footer: &str,
) {
    render_modal(
        frame,
        ModalSpec {
            title: "Error",
            title_style: Some(theme::error_prompt()),
            body: text_from_message(message),
            key_hint: Some(footer),
            width_pct,
            height_pct,
        },
    );
}

pub(crate) fn render_notice_modal(
    frame: &mut Frame<'_>,
    title: &str,
    message: &str,
    width_pct: u16,
    height_pct: u16,
    footer: &str,
) {
    render_modal(
        frame,
        ModalSpec {
            title,
            title_style: Some(theme::focus_prompt()),
            body: text_from_message(message),
            key_hint: Some(footer),
            width_pct,
            height_pct,
        },
    );
}
