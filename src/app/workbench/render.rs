use super::{Focus, Workbench};
use crate::kernel::{Action as KernelAction, StatusLevel};
use crate::views::{input_dialog_cursor, render_input_dialog};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

struct WorkbenchLayout {
    header: Rect,
    explorer: Rect,
    content: Rect,
    status: Rect,
}

fn compute_layout(area: Rect) -> WorkbenchLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(super::HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(super::STATUS_HEIGHT),
        ])
        .split(area);

    let body = rows[1];
    let explorer_width = body
        .width
        .saturating_mul(super::EXPLORER_WIDTH_PERCENT)
        .saturating_div(100)
        .max(super::EXPLORER_MIN_WIDTH.min(body.width));
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(explorer_width), Constraint::Min(0)])
        .split(body);

    WorkbenchLayout {
        header: rows[0],
        explorer: cols[0],
        content: cols[1],
        status: rows[2],
    }
}

pub(super) fn render(workbench: &mut Workbench, frame: &mut Frame, area: Rect) {
    workbench.last_render_area = Some(area);
    let layout = compute_layout(area);

    render_header(workbench, frame, layout.header);
    render_explorer(workbench, frame, layout.explorer);

    let focused = workbench.focus == Focus::Content;
    workbench.content.render(
        frame,
        layout.content,
        &workbench.store.state().selection,
        focused,
        &workbench.theme,
    );

    render_status(workbench, frame, layout.status);

    workbench.context_menu.render(
        frame,
        area,
        &workbench.store.state().ui.context_menu,
        &workbench.theme,
    );
    render_input_dialog(
        frame,
        area,
        &workbench.store.state().ui.input_dialog,
        &workbench.theme,
    );
}

pub(super) fn cursor_position(workbench: &Workbench) -> Option<(u16, u16)> {
    let area = workbench.last_render_area?;
    input_dialog_cursor(area, &workbench.store.state().ui.input_dialog)
}

fn render_header(workbench: &Workbench, frame: &mut Frame, area: Rect) {
    let title = match workbench.store.state().selected_project() {
        Some(project) => format!("projtree | {} ({})", project.name, project.language),
        None => "projtree".to_string(),
    };
    let header = Paragraph::new(Span::styled(
        title,
        Style::default().fg(workbench.theme.header_fg),
    ));
    frame.render_widget(header, area);
}

fn render_explorer(workbench: &mut Workbench, frame: &mut Frame, area: Rect) {
    let border = if workbench.focus == Focus::Explorer {
        workbench.theme.focus_border
    } else {
        workbench.theme.inactive_border
    };
    let block = Block::default()
        .title(" Explorer ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let state = workbench.store.state();
    let explorer = &state.explorer;
    workbench.explorer.render(
        frame,
        inner,
        &explorer.rows,
        explorer.selected(),
        explorer.scroll_offset,
        explorer.tree_error.as_ref(),
        &workbench.theme,
    );

    let Some(height) = workbench.explorer.view_height() else {
        return;
    };
    if explorer.view_height != height {
        let _ = workbench.dispatch_kernel(KernelAction::ExplorerSetViewHeight { height });
    }
}

fn render_status(workbench: &Workbench, frame: &mut Frame, area: Rect) {
    let theme = &workbench.theme;
    let line = match &workbench.store.state().ui.status {
        Some(status) => {
            let color = match status.level {
                StatusLevel::Info => theme.info_fg,
                StatusLevel::Error => theme.error_fg,
            };
            Line::from(Span::styled(status.message.clone(), Style::default().fg(color)))
        }
        None => {
            let text = workbench
                .logs
                .back()
                .map(String::as_str)
                .unwrap_or("↑↓ move  Enter open  m menu  r refresh  Tab focus  q quit");
            Line::from(Span::styled(text.to_string(), Style::default().fg(theme.muted_fg)))
        }
    };
    frame.render_widget(Paragraph::new(line), area);
}
