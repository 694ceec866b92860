use std::io;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use murmur_service::BlockingHttpService;
use murmur_tui::app::App;
use ratatui::prelude::*;

#[derive(Debug, Parser)]
#[command(name = "murmur-verify", about = "Verify a murmur account")]
struct Cli {
    /// Username from the verification link
    username: String,

    /// Backend URL
    #[arg(long = "server", env = "MURMUR_SERVER_URL", default_value = "http://127.0.0.1:3000")]
    server_url: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let service = BlockingHttpService::new(&cli.server_url);
    run_tui(App::new(service, &cli.username))
}

fn run_tui(app: App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        eprintln!("Error: {e}");
    }

    result
}

fn event_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|frame| app.render(frame))?;

        // The submitting frame is on screen; now block on the request.
        if app.needs_submit() {
            app.perform_submit();
            continue;
        }

        if app.should_quit() {
            break;
        }

        if let Event::Key(key) = event::read()? {
            // Ctrl+C always quits
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                break;
            }
            app.handle_key(key);
        }
    }

    Ok(())
}
