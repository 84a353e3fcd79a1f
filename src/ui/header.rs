use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::panel_block;
use super::theme::{COLOR_ACCENT, COLOR_MUTED};
use crate::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let title_style = Style::default()
        .fg(COLOR_ACCENT)
        .add_modifier(Modifier::BOLD);
    let label_style = Style::default()
        .fg(COLOR_MUTED)
        .add_modifier(Modifier::BOLD);
    let hint_style = Style::default().fg(COLOR_MUTED);

    let table = &app.table;
    let count = if table.is_loaded() {
        if table.filter().is_empty() {
            table.total_len().to_string()
        } else {
            format!("{}/{}", table.visible_len(), table.total_len())
        }
    } else {
        "-".to_string()
    };

    let lines = vec![
        Line::from(vec![
            Span::styled("dog-watcher", title_style),
            Span::raw("  "),
            Span::styled("a Stardog process manager", hint_style),
            Span::raw("  "),
            Span::styled("processes ", label_style),
            Span::styled(count, Style::default().fg(Color::White)),
        ]),
        Line::from(vec![
            Span::styled("Processes updated every: ", label_style),
            Span::styled(table.interval().label(), Style::default().fg(COLOR_ACCENT)),
            Span::styled(" | d/i to decrement/increment by 1s", hint_style),
        ]),
    ];

    let paragraph = Paragraph::new(lines).block(panel_block(""));
    frame.render_widget(paragraph, area);
}
