mod footer;
mod header;
mod processes;
pub mod theme;

use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::App;
use theme::COLOR_BORDER;

const MIN_WIDTH: u16 = 100;
const MIN_HEIGHT: u16 = 20;

const HEADER_HEIGHT: u16 = 4;
const SEARCH_HEIGHT: u16 = 3;
const FOOTER_HEIGHT: u16 = 4;

pub fn render(frame: &mut Frame, app: &mut App) {
    app.process_body = None;
    let size = frame.area();
    if size.width < MIN_WIDTH || size.height < MIN_HEIGHT {
        let msg = Paragraph::new(format!(
            "Terminal too small. Resize to at least {MIN_WIDTH}x{MIN_HEIGHT}."
        ))
        .block(panel_block("dog-watcher"))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
        frame.render_widget(msg, size);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Length(SEARCH_HEIGHT),
            Constraint::Min(5),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(size);

    header::render(frame, chunks[0], app);
    processes::render_search_panel(frame, chunks[1], app);
    processes::render(frame, chunks[2], app);
    footer::render(frame, chunks[3], app);
}

pub fn panel_block(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Plain)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title_style(
            Style::default()
                .fg(theme::COLOR_ACCENT)
                .add_modifier(Modifier::BOLD),
        )
}

pub fn panel_block_focused(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(theme::COLOR_ACCENT))
        .title_style(
            Style::default()
                .fg(theme::COLOR_ACCENT)
                .add_modifier(Modifier::BOLD),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::UNIX_EPOCH;

    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use crate::app::{Config, StatusLevel};
    use crate::data::{Process, ProcessStatus, Progress};

    fn process(id: &str, status: ProcessStatus) -> Process {
        Process {
            id: id.to_string(),
            kind: "DB Create".to_string(),
            database: "movies".to_string(),
            user: "admin".to_string(),
            start_time: 0,
            status,
            progress: Progress {
                current: 1,
                max: 4,
                stage: "Parsing".to_string(),
            },
        }
    }

    fn draw(app: &mut App, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|line| line.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn loading_placeholder_before_first_fetch() {
        let mut app = App::new(&Config::default(), "admin");
        let screen = draw(&mut app, 120, 30);
        assert!(screen.contains("Loading processes..."));
        assert!(screen.contains("Processes updated every: 5s"));
        assert!(app.process_body.is_none());
    }

    #[test]
    fn renders_rows_and_status() {
        let mut app = App::new(&Config::default(), "admin");
        app.start();
        app.apply_processes(
            1,
            vec![
                process("p-1", ProcessStatus::Running),
                process("p-2", ProcessStatus::Killed),
            ],
            UNIX_EPOCH,
        );
        app.post_status(StatusLevel::Error, "connection refused");

        let screen = draw(&mut app, 120, 30);
        assert!(screen.contains("p-1"));
        assert!(screen.contains("p-2"));
        assert!(screen.contains("Parsing 25.00%"));
        assert!(screen.contains("connection refused"));
        assert!(screen.contains("admin@"));

        let body = app.process_body.unwrap();
        assert_eq!(body.height, 30 - 14);
        assert_eq!(app.page_rows(), body.height as usize);
    }

    #[test]
    fn too_small_terminal_shows_hint() {
        let mut app = App::new(&Config::default(), "admin");
        let screen = draw(&mut app, 40, 10);
        assert!(screen.contains("Terminal"));
    }
}
