use ratatui::style::Color;

use crate::data::RowEmphasis;

pub const COLOR_ACCENT: Color = Color::Rgb(78, 190, 210);
pub const COLOR_MUTED: Color = Color::Rgb(138, 148, 158);
pub const COLOR_BORDER: Color = Color::Rgb(78, 86, 96);
pub const COLOR_GOOD: Color = Color::Rgb(95, 200, 120);
pub const COLOR_HOT: Color = Color::Rgb(230, 90, 70);
pub const COLOR_SELECTED_BG: Color = Color::Rgb(40, 48, 58);

pub fn color_for_emphasis(emphasis: RowEmphasis) -> Option<Color> {
    match emphasis {
        RowEmphasis::Running => Some(COLOR_GOOD),
        RowEmphasis::Killed => Some(COLOR_HOT),
        RowEmphasis::Neutral => None,
    }
}
