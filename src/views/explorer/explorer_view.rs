//! 项目树视图（纯渲染 + 命中测试）

use crate::app::theme::UiTheme;
use crate::models::{NodeRef, TreeError, TreeRow};
use crate::views::util::rect_contains;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

pub struct ExplorerView {
    area: Option<Rect>,
}

impl Default for ExplorerView {
    fn default() -> Self {
        Self::new()
    }
}

impl ExplorerView {
    pub fn new() -> Self {
        Self { area: None }
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        self.area.is_some_and(|a| rect_contains(a, x, y))
    }

    pub fn view_height(&self) -> Option<usize> {
        self.area.map(|a| a.height as usize)
    }

    /// Absolute row index under the cell, which may be past the last row.
    pub fn hit_test_row(&self, x: u16, y: u16, scroll_offset: usize) -> Option<usize> {
        let area = self.area?;
        if !rect_contains(area, x, y) {
            return None;
        }
        Some((y - area.y) as usize + scroll_offset)
    }

    /// Cell just right of the row's left edge, used to anchor a keyboard-opened menu.
    pub fn row_anchor(&self, row: usize, scroll_offset: usize) -> Option<(u16, u16)> {
        let area = self.area?;
        let visible = row.checked_sub(scroll_offset)?;
        if visible >= area.height as usize {
            return None;
        }
        Some((area.x.saturating_add(2), area.y + visible as u16))
    }

    fn render_row(row: &TreeRow, is_selected: bool, theme: &UiTheme) -> Line<'static> {
        let indent = "  ".repeat(row.depth as usize);
        let icon = if row.is_folder() { "▾ " } else { "  " };
        let text = format!("{indent}{icon}{}", row.name);

        let style = if is_selected {
            Style::default().bg(theme.selected_bg).fg(theme.selected_fg)
        } else if row.is_folder() {
            Style::default()
                .fg(theme.folder_fg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.file_fg)
        };

        Line::from(Span::styled(text, style))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        rows: &[TreeRow],
        selected: Option<&NodeRef>,
        scroll_offset: usize,
        tree_error: Option<&TreeError>,
        theme: &UiTheme,
    ) {
        self.area = Some(area);

        if let Some(err) = tree_error {
            let line = Line::from(Span::styled(
                format!("Project tree unavailable: {err}"),
                Style::default().fg(theme.error_fg),
            ));
            frame.render_widget(Paragraph::new(line), area);
            return;
        }

        if rows.is_empty() {
            let line = Line::from(Span::styled(
                "Empty project (m: menu)",
                Style::default().fg(theme.muted_fg),
            ));
            frame.render_widget(Paragraph::new(line), area);
            return;
        }

        let start = scroll_offset.min(rows.len());
        let end = (start + area.height as usize).min(rows.len());
        let lines: Vec<Line> = rows[start..end]
            .iter()
            .map(|row| Self::render_row(row, selected == Some(&row.node), theme))
            .collect();

        frame.render_widget(Paragraph::new(lines), area);
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/views/explorer.rs"]
mod tests;
