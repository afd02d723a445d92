use crate::app::theme::UiTheme;
use crate::kernel::ContextMenuState;
use crate::views::util::{inner_rect, rect_contains};
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuHit {
    Item(usize),
    Frame,
    Outside,
}

/// Popup rectangle for the menu: anchored at the click cell, shifted back inside `area`.
pub fn menu_rect(menu: &ContextMenuState, area: Rect) -> Option<Rect> {
    if !menu.visible || menu.items.is_empty() || area.width < 3 || area.height < 3 {
        return None;
    }

    let label_w = menu
        .items
        .iter()
        .map(|item| item.label().width())
        .max()
        .unwrap_or(0);
    let width = (label_w.saturating_add(4).min(u16::MAX as usize) as u16)
        .saturating_add(2)
        .min(area.width);
    let height = (menu.items.len().min(u16::MAX as usize) as u16)
        .saturating_add(2)
        .min(area.height);

    let right = area.x.saturating_add(area.width);
    let bottom = area.y.saturating_add(area.height);
    let mut x = menu.anchor.0.max(area.x);
    let mut y = menu.anchor.1.max(area.y);
    if x.saturating_add(width) > right {
        x = right.saturating_sub(width);
    }
    if y.saturating_add(height) > bottom {
        y = bottom.saturating_sub(height);
    }
    Some(Rect::new(x, y, width, height))
}

#[derive(Debug, Default)]
pub struct ContextMenuView {
    area: Option<Rect>,
}

impl ContextMenuView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hit_test(&self, x: u16, y: u16, item_count: usize) -> MenuHit {
        let Some(area) = self.area else {
            return MenuHit::Outside;
        };
        let inner = inner_rect(area);
        if rect_contains(inner, x, y) {
            let index = (y - inner.y) as usize;
            if index < item_count {
                return MenuHit::Item(index);
            }
        }
        if rect_contains(area, x, y) {
            MenuHit::Frame
        } else {
            MenuHit::Outside
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, menu: &ContextMenuState, theme: &UiTheme) {
        self.area = menu_rect(menu, area);
        let Some(popup) = self.area else {
            return;
        };

        frame.render_widget(Clear, popup);
        let base = Style::default().bg(theme.popup_bg).fg(theme.file_fg);
        frame.render_widget(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.popup_border))
                .style(base),
            popup,
        );

        let inner = inner_rect(popup);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let selected_style = Style::default().bg(theme.selected_bg).fg(theme.selected_fg);
        let selected = menu.selected.min(menu.items.len().saturating_sub(1));
        let pad_to = inner.width as usize;
        let lines: Vec<Line> = menu
            .items
            .iter()
            .enumerate()
            .take(inner.height as usize)
            .map(|(idx, item)| {
                let is_selected = idx == selected;
                let prefix = if is_selected { "▸ " } else { "  " };
                let mut text = format!("{prefix}{}", item.label());
                let w = text.width();
                if w < pad_to {
                    text.push_str(&" ".repeat(pad_to - w));
                }
                Line::from(Span::styled(text, if is_selected { selected_style } else { base }))
            })
            .collect();

        frame.render_widget(Paragraph::new(lines).style(base), inner);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/views/context_menu.rs"]
mod tests;
