use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::text::{Line, Span, Text};

use clonepick_core::oversized::GIT_LFS_HELP_URL;

use crate::keymap;
use crate::theme;
use crate::ui::modal::{DialogSignal, DialogSpec, dialog_on_key, render_dialog};

/// Read-only warning listing files that are too large to push.
pub(crate) struct OversizedFilesScreen {
    files: Vec<String>,
    limit_mb: u64,
    scroll: u16,
}

impl OversizedFilesScreen {
    pub(crate) fn new(files: Vec<String>, limit_mb: u64) -> Self {
        Self {
            files,
            limit_mb,
            scroll: 0,
        }
    }

    pub(crate) fn on_key(&mut self, key: KeyEvent) -> DialogSignal {
        if keymap::is_up(key) {
            self.scroll = self.scroll.saturating_sub(1);
            return DialogSignal::Continue;
        }
        if keymap::is_down(key) {
            let max = u16::try_from(self.body().lines.len().saturating_sub(1)).unwrap_or(u16::MAX);
            self.scroll = self.scroll.saturating_add(1).min(max);
            return DialogSignal::Continue;
        }

        dialog_on_key(key)
    }

    fn body(&self) -> Text<'static> {
        let mut lines = vec![
            Line::from(format!(
                "The following files are over the {}MB file limit. Files of this size can not be pushed to GitHub, and need to be removed in order to push.",
                self.limit_mb
            )),
            Line::from(""),
        ];
        lines.extend(
            self.files
                .iter()
                .map(|path| Line::from(Span::styled(path.clone(), theme::monospace_path()))),
        );
        lines.push(Line::from(""));
        lines.push(Line::from(
            "We recommend you avoid committing these files or use Git LFS to store large files on GitHub.",
        ));
        lines.push(Line::from(Span::styled(
            GIT_LFS_HELP_URL,
            theme::secondary_text(),
        )));
        Text::from(lines)
    }

    pub(crate) fn render(&self, frame: &mut Frame<'_>) {
        render_dialog(
            frame,
            DialogSpec {
                title: "Files too large",
                title_style: Some(theme::warning_prompt()),
                body: self.body(),
                primary_action: "Cancel push",
                width_pct: 80,
                height_pct: 70,
            },
            self.scroll,
        );
    }
}
