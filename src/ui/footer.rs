use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use super::theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_MUTED};
use crate::app::App;
use crate::utils::{fit_text, text_width};

const KEY_HINTS: [(&str, &str); 5] = [
    ("↑/↓", "navigate"),
    ("/", "filter"),
    ("ctrl+x", "kill process"),
    ("i/d", "interval"),
    ("ctrl+c", "quit"),
];

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let key_style = Style::default()
        .fg(COLOR_ACCENT)
        .add_modifier(Modifier::BOLD);
    let hint_style = Style::default().fg(COLOR_MUTED);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Plain)
        .border_style(Style::default().fg(COLOR_BORDER));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let status_line = match app.status.current() {
        Some(status) => Line::from(Span::styled(
            fit_text(&status.text, inner.width as usize),
            status.level.style(),
        )),
        None => Line::default(),
    };

    let mut hints = Vec::with_capacity(KEY_HINTS.len() * 2);
    for (idx, (key, label)) in KEY_HINTS.iter().enumerate() {
        let sep = if idx + 1 < KEY_HINTS.len() { "  " } else { "" };
        hints.push(Span::styled(*key, key_style));
        hints.push(Span::styled(format!(" {label}{sep}"), hint_style));
    }

    let identity = format!("{}@{}", app.username, app.endpoint);
    let identity_width = (text_width(&identity) as u16).min(inner.width / 2);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner);
    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(identity_width)])
        .split(rows[1]);

    frame.render_widget(Paragraph::new(status_line), rows[0]);
    frame.render_widget(Paragraph::new(Line::from(hints)), bottom[0]);
    frame.render_widget(
        Paragraph::new(fit_text(&identity, identity_width as usize))
            .style(Style::default().fg(COLOR_ACCENT))
            .alignment(Alignment::Right),
        bottom[1],
    );
}
