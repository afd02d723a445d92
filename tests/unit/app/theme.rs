use super::*;

#[test]
fn truecolor_keeps_rgb_values() {
    let mut theme = UiTheme::default();
    theme.apply_color_support(TerminalColorSupport::TrueColor);
    assert_eq!(theme, UiTheme::default());
}

#[test]
fn ansi256_maps_rgb_into_color_cube() {
    assert_eq!(
        map_color_for_support(Color::Rgb(0xDC, 0xDC, 0xAA), TerminalColorSupport::Ansi256),
        Color::Indexed(187)
    );
    assert_eq!(
        map_color_for_support(Color::Rgb(0, 0, 0), TerminalColorSupport::Ansi256),
        Color::Indexed(16)
    );
}

#[test]
fn ansi16_maps_rgb_to_basic_palette() {
    assert_eq!(
        map_color_for_support(Color::Rgb(0xDC, 0xDC, 0xAA), TerminalColorSupport::Ansi16),
        Color::Indexed(15)
    );
    assert_eq!(
        map_color_for_support(Color::Rgb(0xA0, 0x10, 0x10), TerminalColorSupport::Ansi16),
        Color::Indexed(1)
    );
}

#[test]
fn indexed_colors_are_left_alone() {
    let mut theme = UiTheme::default();
    theme.apply_color_support(TerminalColorSupport::Ansi16);
    assert_eq!(theme.focus_border, Color::Indexed(6));
    assert_eq!(theme.error_fg, Color::Indexed(1));
    assert!(matches!(theme.folder_fg, Color::Indexed(_)));
}
