// src/main.rs
mod cli;
mod commands;
mod config;
mod effects;
mod error;
mod form;
mod input;
mod models;
mod network;
mod paths;
mod runtime;
mod state;
mod storage;
mod theme;
mod ui;

use std::{fs, io, sync::Arc, time::Duration};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tokio::{runtime::Runtime, sync::mpsc::UnboundedReceiver};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::config::Settings;
use crate::effects::ApiEvent;
use crate::input::KeyOutcome;
use crate::network::ApiClient;
use crate::runtime::Executor;
use crate::state::AppState;
use crate::storage::{FileTokenStore, TokenStore};
use crate::theme::Theme;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::new(cli.base_url.as_deref())?;
    let _log_guard = init_logging(&settings)?;
    tracing::info!(base_url = %settings.base_url, "starting");

    let rt = Runtime::new()?;
    let store: Arc<dyn TokenStore> = Arc::new(FileTokenStore::new(settings.token_path()?));
    let client = ApiClient::new(&settings);

    match cli.command {
        Some(command) => rt.block_on(commands::run(command, &settings, &client, store.as_ref())),
        None => run_tui(&rt, client, store),
    }
}

/// Logs go to a file so they never draw over the terminal UI.
fn init_logging(settings: &Settings) -> anyhow::Result<WorkerGuard> {
    let log_path = settings.log_path()?;
    let dir = log_path.parent().context("Log file has no parent directory")?;
    fs::create_dir_all(dir).with_context(|| format!("Could not create {}", dir.display()))?;
    let file_name = log_path.file_name().context("Log file has no file name")?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = EnvFilter::try_from_env("ARTICLES_LOG").unwrap_or_else(|_| EnvFilter::new("articles=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Ok(guard)
}

fn run_tui(rt: &Runtime, client: ApiClient, store: Arc<dyn TokenStore>) -> anyhow::Result<()> {
    let token = store.load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "could not read stored token");
        None
    });
    let mut state = AppState::new(token);
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let executor = Executor::new(client, store, rt.handle().clone(), tx);
    let theme = Theme::default();

    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = event_loop(&mut terminal, &mut state, &executor, &mut rx, &theme);

    terminal::disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}

fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    state: &mut AppState,
    executor: &Executor,
    rx: &mut UnboundedReceiver<ApiEvent>,
    theme: &Theme,
) -> anyhow::Result<()> {
    let mut tick: usize = 0;
    loop {
        // Results are applied in the order they arrive; the last one wins.
        while let Ok(event) = rx.try_recv() {
            let effects = state.apply(event);
            executor.dispatch(effects);
        }

        terminal.draw(|f| ui::render(f, state, theme, tick))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match input::handle_key(key, state) {
                    KeyOutcome::Quit => break,
                    KeyOutcome::Continue(effects) => executor.dispatch(effects),
                }
            }
        }
        tick = tick.wrapping_add(1);
    }
    Ok(())
}
