use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use tui_input::Input;

use crate::theme;

/// Renders a single-line input inside chrome, placing the cursor when focused.
pub(crate) fn render_input(
    frame: &mut Frame<'_>,
    area: Rect,
    input: &Input,
    title: Line<'_>,
    show_cursor: bool,
) {
    let width = area.width.saturating_sub(2) as usize;
    let scroll = input.visual_scroll(width);
    let paragraph = Paragraph::new(input.value())
        .scroll((0, scroll as u16))
        .block(theme::chrome(title));
    frame.render_widget(paragraph, area);

    if !show_cursor || width == 0 {
        return;
    }

    let visual = input.visual_cursor();
    let relative = visual.saturating_sub(scroll).min(width.saturating_sub(1));
    frame.set_cursor_position((area.x + 1 + relative as u16, area.y + 1));
}
