use crate::app::theme::UiTheme;
use crate::kernel::InputDialogState;
use crate::views::util::centered_rect;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

const PROMPT: &str = "> ";

fn dialog_area(area: Rect) -> Rect {
    centered_rect(60, 5, area)
}

pub fn render_input_dialog(frame: &mut Frame, area: Rect, dialog: &InputDialogState, theme: &UiTheme) {
    if !dialog.visible {
        return;
    }
    let popup = dialog_area(area);
    if popup.width < 20 || popup.height < 5 {
        return;
    }

    frame.render_widget(Clear, popup);
    let title = if dialog.title.is_empty() {
        " Input ".to_string()
    } else {
        format!(" {} ", dialog.title)
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.popup_border));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let base = Style::default().bg(theme.popup_bg).fg(theme.file_fg);
    let muted = Style::default().fg(theme.muted_fg);
    let status = match dialog.error.as_deref() {
        Some(err) => Line::from(Span::styled(err, Style::default().fg(theme.error_fg))),
        None => Line::from(vec![
            Span::styled("[Enter]", Style::default().fg(theme.info_fg)),
            Span::raw(" OK  "),
            Span::styled("[Esc]", muted),
            Span::raw(" Cancel"),
        ]),
    };
    let lines = vec![
        Line::from(vec![
            Span::styled(PROMPT, base),
            Span::styled(dialog.value.as_str(), base),
        ]),
        Line::raw(""),
        status,
    ];
    frame.render_widget(Paragraph::new(lines).style(base), inner);
}

/// Terminal cell of the text cursor, in display columns.
pub fn input_dialog_cursor(area: Rect, dialog: &InputDialogState) -> Option<(u16, u16)> {
    if !dialog.visible {
        return None;
    }
    let popup = dialog_area(area);
    if popup.width < 20 || popup.height < 5 {
        return None;
    }

    let cursor = dialog.cursor.min(dialog.value.len());
    let before = dialog.value.get(..cursor).unwrap_or_default();
    let x = popup
        .x
        .saturating_add(1)
        .saturating_add(PROMPT.width() as u16)
        .saturating_add(before.width() as u16)
        .min(popup.x + popup.width.saturating_sub(2));
    Some((x, popup.y.saturating_add(1)))
}

#[cfg(test)]
#[path = "../../tests/unit/views/input_dialog.rs"]
mod tests;
