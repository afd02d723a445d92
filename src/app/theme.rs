//! UI 主题：颜色集中管理，避免散落在渲染代码里。

use ratatui::style::Color;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiTheme {
    pub focus_border: Color,
    pub inactive_border: Color,
    pub header_fg: Color,
    pub folder_fg: Color,
    pub file_fg: Color,
    pub muted_fg: Color,
    pub selected_bg: Color,
    pub selected_fg: Color,
    pub error_fg: Color,
    pub info_fg: Color,
    pub popup_border: Color,
    pub popup_bg: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalColorSupport {
    TrueColor,
    Ansi256,
    Ansi16,
}

pub fn detect_terminal_color_support() -> TerminalColorSupport {
    if let Ok(value) = std::env::var("PROJTREE_COLOR_SUPPORT") {
        match value.trim().to_ascii_lowercase().as_str() {
            "truecolor" | "24bit" | "rgb" => return TerminalColorSupport::TrueColor,
            "256" | "ansi256" => return TerminalColorSupport::Ansi256,
            "16" | "ansi16" | "basic" => return TerminalColorSupport::Ansi16,
            _ => {}
        }
    }

    let colorterm = std::env::var("COLORTERM")
        .unwrap_or_default()
        .to_ascii_lowercase();
    let term = std::env::var("TERM").unwrap_or_default().to_ascii_lowercase();
    if colorterm.contains("truecolor") || colorterm.contains("24bit") || term.contains("direct") {
        return TerminalColorSupport::TrueColor;
    }
    if term.contains("256color") {
        return TerminalColorSupport::Ansi256;
    }
    TerminalColorSupport::Ansi16
}

impl Default for UiTheme {
    fn default() -> Self {
        Self {
            focus_border: Color::Indexed(6),    // Cyan
            inactive_border: Color::Indexed(8), // DarkGray
            header_fg: Color::Indexed(6),
            folder_fg: Color::Rgb(0xDC, 0xDC, 0xAA),
            file_fg: Color::Indexed(15),
            muted_fg: Color::Indexed(8),
            selected_bg: Color::Indexed(8),
            selected_fg: Color::Indexed(15),
            error_fg: Color::Indexed(1),
            info_fg: Color::Rgb(0x4E, 0xC9, 0xB0),
            popup_border: Color::Indexed(6),
            popup_bg: Color::Reset,
        }
    }
}

impl UiTheme {
    pub fn adapt_to_terminal_capabilities(&mut self) {
        self.apply_color_support(detect_terminal_color_support());
    }

    fn apply_color_support(&mut self, support: TerminalColorSupport) {
        if support == TerminalColorSupport::TrueColor {
            return;
        }
        for color in [
            &mut self.focus_border,
            &mut self.inactive_border,
            &mut self.header_fg,
            &mut self.folder_fg,
            &mut self.file_fg,
            &mut self.muted_fg,
            &mut self.selected_bg,
            &mut self.selected_fg,
            &mut self.error_fg,
            &mut self.info_fg,
            &mut self.popup_border,
            &mut self.popup_bg,
        ] {
            *color = map_color_for_support(*color, support);
        }
    }
}

fn map_color_for_support(color: Color, support: TerminalColorSupport) -> Color {
    let Color::Rgb(r, g, b) = color else {
        return color;
    };
    match support {
        TerminalColorSupport::TrueColor => color,
        TerminalColorSupport::Ansi256 => {
            let level = |c: u8| ((c as u16 * 5 + 127) / 255) as u8;
            Color::Indexed(16 + 36 * level(r) + 6 * level(g) + level(b))
        }
        TerminalColorSupport::Ansi16 => {
            let bright = r.max(g).max(b) > 0xC0;
            let bit = |c: u8| u8::from(c > 0x80);
            let index = bit(r) | (bit(g) << 1) | (bit(b) << 2);
            Color::Indexed(if bright { index + 8 } else { index })
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/theme.rs"]
mod tests;
