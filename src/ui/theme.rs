use ratatui::style::{Color, Modifier, Style};

use super::app::InputMode;

pub(crate) const HEADER_BG: Color = Color::Rgb(30, 30, 46);
pub(crate) const HEADER_FG: Color = Color::Rgb(205, 214, 244);
pub(crate) const ACCENT: Color = Color::Rgb(137, 180, 250);
pub(crate) const GREEN: Color = Color::Rgb(166, 227, 161);
pub(crate) const RED: Color = Color::Rgb(243, 139, 168);
pub(crate) const YELLOW: Color = Color::Rgb(249, 226, 175);
pub(crate) const SURFACE: Color = Color::Rgb(49, 50, 68);
pub(crate) const TEXT: Color = Color::Rgb(205, 214, 244);
pub(crate) const TEXT_DIM: Color = Color::Rgb(127, 132, 156);
pub(crate) const OVERLAY: Color = Color::Rgb(69, 71, 90);
pub(crate) const COMMAND_BG: Color = Color::Rgb(24, 24, 37);

/// Chart colours, indexed by `ChartData::colors`.
pub(crate) const PALETTE: [Color; crate::report::PALETTE_SIZE] = [
    Color::Rgb(4, 109, 82),
    Color::Rgb(245, 197, 66),
    Color::Rgb(44, 130, 201),
    Color::Rgb(142, 68, 173),
    Color::Rgb(230, 126, 34),
    Color::Rgb(231, 76, 60),
    Color::Rgb(22, 160, 133),
    Color::Rgb(26, 188, 156),
    Color::Rgb(155, 89, 182),
    Color::Rgb(243, 156, 18),
    Color::Rgb(211, 84, 0),
    Color::Rgb(39, 174, 96),
];

pub(crate) fn palette(index: usize) -> Color {
    PALETTE[index % PALETTE.len()]
}

pub(crate) fn header_style() -> Style {
    Style::default()
        .fg(HEADER_FG)
        .bg(HEADER_BG)
        .add_modifier(Modifier::BOLD)
}

pub(crate) fn title_style() -> Style {
    Style::default().fg(TEXT_DIM).add_modifier(Modifier::BOLD)
}

pub(crate) fn selected_style() -> Style {
    Style::default().fg(HEADER_BG).bg(ACCENT)
}

pub(crate) fn normal_style() -> Style {
    Style::default().fg(TEXT)
}

pub(crate) fn dim_style() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub(crate) fn expense_style() -> Style {
    Style::default().fg(RED)
}

pub(crate) fn alt_row_style() -> Style {
    Style::default().fg(TEXT).bg(SURFACE)
}

/// Badge at the left of the status bar.
pub(crate) fn mode_style(mode: InputMode) -> Style {
    let bg = match mode {
        InputMode::Normal => ACCENT,
        InputMode::Command => GREEN,
        InputMode::Confirm => RED,
    };
    Style::default()
        .fg(HEADER_BG)
        .bg(bg)
        .add_modifier(Modifier::BOLD)
}

pub(crate) fn command_bar_style() -> Style {
    Style::default().fg(TEXT).bg(COMMAND_BG)
}

pub(crate) fn status_bar_style() -> Style {
    Style::default().fg(TEXT_DIM).bg(SURFACE)
}

/// Green for non-negative balances, red otherwise.
pub(crate) fn balance_color(amount: rust_decimal::Decimal) -> Color {
    if amount.is_sign_negative() && !amount.is_zero() {
        RED
    } else {
        GREEN
    }
}
