use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use crossterm::cursor::Show;
use crossterm::event::{Event, EventStream, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use futures::StreamExt;
use ratatui::prelude::*;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{info, warn};

use dog_watcher::WatcherError;
use dog_watcher::app::{App, Config};
use dog_watcher::data::{Auth, StardogClient};
use dog_watcher::events::{AppEvent, CommandRunner, handle_event};
use dog_watcher::logging::init_logging;
use dog_watcher::ui;

type AppTerminal = Terminal<CrosstermBackend<io::Stdout>>;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match Config::from_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(err) = init_logging(config.log_file.as_deref(), &config.log_level) {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }

    let auth = Auth::select(config.token.as_deref(), &config.username, &config.password);
    let client = match StardogClient::new(&config.server, auth, config.timeout) {
        Ok(client) => client,
        Err(err) => {
            eprintln!("unable to create client: {err}");
            return ExitCode::FAILURE;
        }
    };

    match client.is_alive().await {
        Ok(true) => {}
        Ok(false) => {
            eprintln!("{}", WatcherError::not_alive(client.endpoint()));
            return ExitCode::FAILURE;
        }
        Err(err) => {
            eprintln!("{}", WatcherError::not_alive(client.endpoint()));
            eprintln!("err: {err}");
            return ExitCode::FAILURE;
        }
    }

    let username = client.whoami().await.unwrap_or_else(|err| {
        warn!(%err, "whoami failed");
        "unknown".to_string()
    });
    info!(server = client.endpoint(), %username, "connected");

    let mut app = App::new(&config, username);
    let (tx, rx) = mpsc::unbounded_channel();
    let runner = CommandRunner::new(Arc::new(client), tx);

    let mut terminal = match setup_terminal() {
        Ok(terminal) => terminal,
        Err(err) => {
            restore_terminal_raw();
            eprintln!("{}", WatcherError::from(err));
            return ExitCode::FAILURE;
        }
    };
    install_panic_hook();

    let result = run_app(&mut terminal, &mut app, &runner, rx).await;
    if let Err(err) = restore_terminal(&mut terminal) {
        eprintln!("{}", WatcherError::from(err));
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error running program: {err}");
            ExitCode::FAILURE
        }
    }
}

fn setup_terminal() -> io::Result<AppTerminal> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut AppTerminal) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore_terminal_raw();
        default_hook(info);
    }));
}

fn restore_terminal_raw() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, LeaveAlternateScreen, Show);
}

/// Single owner of `App`: every keystroke and every command outcome is
/// handled here, one at a time, followed by a redraw. In-flight commands
/// are abandoned when this returns.
async fn run_app(
    terminal: &mut AppTerminal,
    app: &mut App,
    runner: &CommandRunner,
    mut inbox: UnboundedReceiver<AppEvent>,
) -> io::Result<()> {
    let mut events = EventStream::new();
    let size = terminal.size()?;
    app.resize(size.width, size.height);

    app.start();
    runner.dispatch_all(app.take_commands());

    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        let event = tokio::select! {
            maybe_event = events.next() => match maybe_event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => AppEvent::Key(key),
                Some(Ok(Event::Resize(width, height))) => AppEvent::Resize(width, height),
                Some(Ok(_)) => continue,
                Some(Err(err)) => return Err(err),
                None => AppEvent::Quit,
            },
            Some(event) = inbox.recv() => event,
        };

        let result = handle_event(app, event);
        runner.dispatch_all(app.take_commands());
        if result.should_exit() {
            return Ok(());
        }
    }
}
