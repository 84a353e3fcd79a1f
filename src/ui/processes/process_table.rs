use ratatui::prelude::*;
use ratatui::widgets::{Cell, Paragraph, Row, Table, TableState};

use super::super::panel_block;
use super::super::theme::{COLOR_MUTED, COLOR_SELECTED_BG, color_for_emphasis};
use crate::app::App;
use crate::data::ProcessRow;
use crate::utils::fit_text;

const HEADERS: [&str; 7] = [
    "ID",
    "Database",
    "Elapsed Time",
    "User",
    "Status",
    "Type",
    "Progress",
];

const COLUMN_SPACING: u16 = 1;
const DATABASE_WIDTH: u16 = 12;
const ELAPSED_WIDTH: u16 = 12;
const USER_WIDTH: u16 = 10;
const STATUS_WIDTH: u16 = 11;
const TYPE_WIDTH: u16 = 12;
/// Stardog process ids are UUIDs.
const ID_MAX_WIDTH: u16 = 36;
const PROGRESS_MIN_WIDTH: u16 = 10;

pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
    let block = panel_block("Processes");
    let inner = block.inner(area);

    if !app.table.is_loaded() {
        app.process_body = None;
        let placeholder = Paragraph::new("Loading processes...")
            .style(Style::default().fg(COLOR_MUTED))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    // First inner row is the column header.
    app.process_body = if inner.width > 0 && inner.height > 1 {
        Some(Rect {
            x: inner.x,
            y: inner.y.saturating_add(1),
            width: inner.width,
            height: inner.height.saturating_sub(1),
        })
    } else {
        None
    };
    let max_rows = app
        .process_body
        .map(|rect| rect.height as usize)
        .unwrap_or(0);
    app.table.ensure_visible(max_rows);

    let widths = column_widths(inner.width);
    let start = app.table.scroll;
    let table_rows = app
        .table
        .visible_rows()
        .skip(start)
        .take(max_rows)
        .map(|row| table_row(row, &widths))
        .collect::<Vec<_>>();
    let end = start + table_rows.len();

    let header_style = Style::default()
        .fg(COLOR_MUTED)
        .add_modifier(Modifier::BOLD);
    let header = Row::new(
        HEADERS
            .iter()
            .map(|label| Cell::from(*label).style(header_style)),
    );

    let table = Table::new(table_rows, widths.map(Constraint::Length))
        .header(header)
        .block(block)
        .column_spacing(COLUMN_SPACING)
        .row_highlight_style(
            Style::default()
                .fg(Color::White)
                .bg(COLOR_SELECTED_BG)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = TableState::default();
    if let Some(selected) = app.table.table_state.selected()
        && selected >= start
        && selected < end
    {
        state.select(Some(selected - start));
    }

    frame.render_stateful_widget(table, area, &mut state);
}

/// Fixed columns keep their width; what is left goes to the id (up to a
/// full UUID) and then to progress.
fn column_widths(inner_width: u16) -> [u16; 7] {
    let fixed = DATABASE_WIDTH
        + ELAPSED_WIDTH
        + USER_WIDTH
        + STATUS_WIDTH
        + TYPE_WIDTH
        + COLUMN_SPACING * (HEADERS.len() as u16 - 1);
    let flexible = inner_width.saturating_sub(fixed);
    let id = flexible.saturating_sub(PROGRESS_MIN_WIDTH).min(ID_MAX_WIDTH);
    let progress = flexible - id;
    [
        id,
        DATABASE_WIDTH,
        ELAPSED_WIDTH,
        USER_WIDTH,
        STATUS_WIDTH,
        TYPE_WIDTH,
        progress,
    ]
}

fn table_row(row: &ProcessRow, widths: &[u16; 7]) -> Row<'static> {
    let values = [
        &row.id,
        &row.database,
        &row.elapsed,
        &row.user,
        &row.status,
        &row.kind,
        &row.progress,
    ];
    let cells = values
        .iter()
        .zip(widths)
        .map(|(value, width)| Cell::from(fit_text(value, *width as usize)))
        .collect::<Vec<_>>();
    match color_for_emphasis(row.emphasis) {
        Some(color) => Row::new(cells).style(Style::default().fg(color)),
        None => Row::new(cells),
    }
}
