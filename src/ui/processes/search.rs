use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::App;
use crate::ui::theme::COLOR_MUTED;
use crate::ui::{panel_block, panel_block_focused};
use crate::utils::{fit_text, text_width};

pub fn render_search_panel(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.table.is_filter_focused();
    let filter = app.table.filter();
    let block = if focused {
        panel_block_focused("Filter")
    } else {
        panel_block("Filter")
    };
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let label_style = Style::default().fg(COLOR_MUTED);
    let value_style = if focused || !filter.is_empty() {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(COLOR_MUTED)
    };

    let value = if focused {
        format!("{filter}|")
    } else if filter.is_empty() {
        "press / to filter by id, database, user, status or type".to_string()
    } else {
        filter.to_string()
    };

    let max_width = inner.width as usize;
    let prefix = "search: ";
    let prefix_width = text_width(prefix);
    let value = if prefix_width < max_width {
        fit_text(&value, max_width - prefix_width)
    } else {
        String::new()
    };

    let line = Line::from(vec![
        Span::styled(prefix, label_style),
        Span::styled(value, value_style),
    ]);
    frame.render_widget(Paragraph::new(line), inner);
}
