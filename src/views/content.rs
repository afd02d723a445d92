//! 文件内容面板：只读展示当前选中文件。

use crate::app::theme::UiTheme;
use crate::kernel::FileSelection;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

#[derive(Debug, Default)]
pub struct ContentView {
    scroll: u16,
    shown_seq: u64,
    line_count: usize,
    view_height: u16,
}

impl ContentView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scroll_by(&mut self, delta: isize) -> bool {
        let max = self
            .line_count
            .saturating_sub(self.view_height.max(1) as usize)
            .min(u16::MAX as usize) as u16;
        let next = if delta < 0 {
            self.scroll.saturating_sub(delta.unsigned_abs().min(u16::MAX as usize) as u16)
        } else {
            self.scroll
                .saturating_add(delta.min(u16::MAX as isize) as u16)
                .min(max)
        };
        let changed = next != self.scroll;
        self.scroll = next;
        changed
    }

    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        selection: &FileSelection,
        focused: bool,
        theme: &UiTheme,
    ) {
        // A new selection starts at the top.
        if selection.seq != self.shown_seq {
            self.shown_seq = selection.seq;
            self.scroll = 0;
        }

        let title = selection
            .name
            .as_deref()
            .map(|name| format!(" {name} "))
            .unwrap_or_else(|| " Content ".to_string());
        let border = if focused {
            theme.focus_border
        } else {
            theme.inactive_border
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        self.view_height = inner.height;

        let muted = Style::default().fg(theme.muted_fg);
        let paragraph = match (&selection.file, &selection.content) {
            (None, _) => {
                self.line_count = 0;
                Paragraph::new(Line::from(Span::styled("No file selected", muted)))
            }
            (Some(_), None) => {
                self.line_count = 0;
                Paragraph::new(Line::from(Span::styled("Loading…", muted)))
            }
            (Some(_), Some(content)) => {
                self.line_count = content.lines().count();
                Paragraph::new(content.as_str()).scroll((self.scroll, 0))
            }
        };
        frame.render_widget(paragraph, inner);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/views/content.rs"]
mod tests;
