use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self as crossterm_event, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    Terminal,
};
use std::{fs::File, io, path::Path, time::Duration};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod app;
mod config;
mod constants;
mod error;
mod flow;
mod transactions;
mod ui;
mod utils;
mod wallet;

use app::{Action, App};
use config::Cli;
use constants::EVENT_POLL_MILLIS;

/// Logs go to a file: the terminal belongs to the UI
fn init_logging(log_file: &Path) -> Result<()> {
    let file = File::create(log_file)
        .with_context(|| format!("Failed to open log file {}", log_file.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Cli::parse().into_config()?;
    init_logging(&config.log_file)?;
    info!(network = config.network_state.get_current_network(), "starting loyalty-mint");

    // connect before taking over the terminal so errors print normally
    let app = Arc::new(Mutex::new(App::new(&config).await?));
    tokio::spawn(App::refresh_balance(Arc::clone(&app)));

    // terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, Arc::clone(&app)).await;

    // restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        error!(error = %err, "application exited with an error");
        eprintln!("{:?}", err);
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: Arc<Mutex<App>>,
) -> Result<()> {
    loop {
        {
            let app_guard = app.lock().await;
            terminal.draw(|f| ui::draw(f, &app_guard))?;
        }

        if !crossterm_event::poll(Duration::from_millis(EVENT_POLL_MILLIS))? {
            continue;
        }
        let Event::Key(key) = crossterm_event::read()? else {
            continue;
        };
        // Windows reports releases as well
        if key.kind != KeyEventKind::Press {
            continue;
        }

        let action = app.lock().await.handle_key(key);
        match action {
            Action::None => {}
            Action::Quit => return Ok(()),
            Action::Simulate => App::start_simulation(Arc::clone(&app)).await,
            Action::Execute => App::start_execution(Arc::clone(&app)).await,
            Action::ToggleWallet => {
                let connected = app.lock().await.toggle_wallet();
                if connected {
                    tokio::spawn(App::refresh_balance(Arc::clone(&app)));
                }
            }
            Action::SwitchNetwork => {
                tokio::spawn(App::switch_network(Arc::clone(&app)));
            }
        }
    }
}
