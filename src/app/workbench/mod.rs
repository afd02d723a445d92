//! 工作台模块：持有 Store，分发输入，执行副作用，渲染各视图

use super::theme::UiTheme;
use crate::kernel::services::adapters::{AppMessage, AsyncRuntime};
use crate::kernel::{Action as KernelAction, AppState, Store};
use crate::models::{ProjectId, WorkspaceStore};
use crate::tui::view::{EventResult, View};
use crate::views::{ContentView, ContextMenuView, ExplorerView};
use crossterm::event::Event;
use ratatui::layout::Rect;
use ratatui::Frame;
use std::collections::VecDeque;
use std::sync::mpsc::{self, Receiver};

mod input;
mod render;

const HEADER_HEIGHT: u16 = 1;
const STATUS_HEIGHT: u16 = 1;
const EXPLORER_WIDTH_PERCENT: u16 = 30;
const EXPLORER_MIN_WIDTH: u16 = 20;
const LOG_BUFFER_CAP: usize = 500;
const MAX_LOG_DRAIN_PER_TICK: usize = 256;
const MAX_MESSAGE_DRAIN_PER_TICK: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Explorer,
    Content,
}

pub struct Workbench {
    store: Store,
    runtime: AsyncRuntime,
    message_rx: Receiver<AppMessage>,
    log_rx: Option<Receiver<String>>,
    logs: VecDeque<String>,
    theme: UiTheme,
    focus: Focus,
    explorer: ExplorerView,
    content: ContentView,
    context_menu: ContextMenuView,
    last_render_area: Option<Rect>,
}

impl Workbench {
    pub fn new(
        runtime: AsyncRuntime,
        message_rx: Receiver<AppMessage>,
        log_rx: Option<Receiver<String>>,
    ) -> Self {
        let mut theme = UiTheme::default();
        if !cfg!(test) {
            theme.adapt_to_terminal_capabilities();
        }

        Self {
            store: Store::new(AppState::new(WorkspaceStore::new())),
            runtime,
            message_rx,
            log_rx,
            logs: VecDeque::with_capacity(64),
            theme,
            focus: Focus::default(),
            explorer: ExplorerView::new(),
            content: ContentView::new(),
            context_menu: ContextMenuView::new(),
            last_render_area: None,
        }
    }

    pub fn state(&self) -> &AppState {
        self.store.state()
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn logs(&self) -> impl Iterator<Item = &str> {
        self.logs.iter().map(String::as_str)
    }

    pub fn open_project(&mut self, project: ProjectId) -> bool {
        self.dispatch_kernel(KernelAction::SelectProject(project))
    }

    pub fn create_project(&mut self, name: String, language: String) -> bool {
        self.dispatch_kernel(KernelAction::CreateProject { name, language })
    }

    /// Reduces the action and hands every resulting effect to the runtime.
    pub(super) fn dispatch_kernel(&mut self, action: KernelAction) -> bool {
        let result = self.store.dispatch(action);
        for effect in result.effects {
            tracing::debug!(?effect, "run effect");
            self.runtime.run(effect);
        }
        result.state_changed
    }

    pub fn handle_message(&mut self, msg: AppMessage) -> bool {
        self.dispatch_kernel(msg.into_action())
    }

    pub fn tick(&mut self) -> bool {
        let mut changed = self.poll_messages();
        changed |= self.poll_logs();
        changed
    }

    fn poll_messages(&mut self) -> bool {
        let mut changed = false;
        for _ in 0..MAX_MESSAGE_DRAIN_PER_TICK {
            match self.message_rx.try_recv() {
                Ok(msg) => changed |= self.handle_message(msg),
                Err(_) => break,
            }
        }
        changed
    }

    fn poll_logs(&mut self) -> bool {
        let Some(rx) = self.log_rx.take() else {
            return false;
        };

        let mut changed = false;
        let mut disconnected = false;
        for _ in 0..MAX_LOG_DRAIN_PER_TICK {
            match rx.try_recv() {
                Ok(line) => {
                    changed = true;
                    self.logs.push_back(line);
                    while self.logs.len() > LOG_BUFFER_CAP {
                        self.logs.pop_front();
                    }
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    disconnected = true;
                    break;
                }
            }
        }

        if !disconnected {
            self.log_rx = Some(rx);
        }
        changed
    }
}

impl View for Workbench {
    fn handle_input(&mut self, event: &Event) -> EventResult {
        input::handle_input(self, event)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        render::render(self, frame, area);
    }

    fn cursor_position(&self) -> Option<(u16, u16)> {
        render::cursor_position(self)
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/app/workbench.rs"]
mod tests;
