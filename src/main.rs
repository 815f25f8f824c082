mod app;
mod components;
mod draw;
mod keys;
mod state;
mod ui;

use crate::app::App;
use crate::state::app_settings::AppSettings;
use crate::state::messages::{NetworkRequest, NetworkResponse, RefreshTrigger, UiEvent};
use crate::state::network::{LoadingState, NetworkWorker, request_refresh};
use crate::state::refresher::PeriodicRefresher;
use anyhow::Context;
use crossterm::event::{self as crossterm_event, Event};
use crossterm::{cursor, execute, terminal};
use log::{info, warn};
use sports_feed::{Aggregator, FeedConfig};
use std::io::Stdout;
use std::sync::Arc;
use std::{io, panic};
use tokio::sync::{Mutex, mpsc};
use tokio::time::Duration;
use tui::{Terminal, backend::CrosstermBackend};

enum RunMode {
    Dashboard,
    Json,
    Exit,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mode = handle_cli_args();
    if matches!(mode, RunMode::Exit) {
        return Ok(());
    }

    let settings = AppSettings::load().context("invalid dashboard settings")?;
    let config = FeedConfig::from_env().context("invalid feed configuration")?;

    if matches!(mode, RunMode::Json) {
        return print_snapshot(&config).await;
    }

    better_panic::install();

    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;

    setup_panic_hook();
    setup_terminal();

    tui_logger::init_logger(settings.effective_log_level())?;

    let app = Arc::new(Mutex::new(App::new(settings.clone())));
    info!(
        "sportsdash starting with {} scoreboard sources, refresh every {}s",
        config.sources.len(),
        settings.refresh_interval.as_secs()
    );

    let (ui_event_tx, ui_event_rx) = mpsc::channel::<UiEvent>(100);
    let (network_req_tx, network_req_rx) = mpsc::channel::<NetworkRequest>(100);
    let (network_resp_tx, network_resp_rx) = mpsc::channel::<NetworkResponse>(100);

    // Input handler thread
    let input_handler = tokio::spawn(input_handler_task(ui_event_tx.clone()));

    // Network thread
    let network_worker = NetworkWorker::new(Aggregator::new(&config), network_req_rx, network_resp_tx);
    let network_task = tokio::spawn(network_worker.run());

    // Periodic feed refresh thread
    let periodic_updater = PeriodicRefresher::new(network_req_tx.clone(), settings.refresh_interval);
    let periodic_task = tokio::spawn(periodic_updater.run());

    // Animation tick thread, 80ms
    let anim_tx = ui_event_tx.clone();
    let animation_task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(80));
        loop {
            interval.tick().await;
            if anim_tx.send(UiEvent::AnimationTick).await.is_err() {
                break;
            }
        }
    });

    // Initial load
    let _ = ui_event_tx.send(UiEvent::AppStarted).await;

    main_ui_loop(terminal, app, ui_event_rx, network_req_tx, network_resp_rx).await;

    input_handler.abort();
    network_task.abort();
    periodic_task.abort();
    animation_task.abort();

    Ok(())
}

fn handle_cli_args() -> RunMode {
    let mut args = std::env::args().skip(1);
    let Some(arg) = args.next() else {
        return RunMode::Dashboard;
    };

    match arg.as_str() {
        "-h" | "--help" => {
            println!("{}", usage_text());
            RunMode::Exit
        }
        "-V" | "--version" => {
            println!("sportsdash {}", env!("CARGO_PKG_VERSION"));
            RunMode::Exit
        }
        "--json" => RunMode::Json,
        _ => {
            eprintln!("Unknown argument: {arg}\n\n{}", usage_text());
            std::process::exit(2);
        }
    }
}

fn usage_text() -> &'static str {
    "sportsdash - live multi-sport events dashboard

Usage:
  sportsdash
  sportsdash --json
  sportsdash --help
  sportsdash --version

Environment:
  SPORTSDASH_REFRESH_SECS   Seconds between refreshes (default 120, minimum 5)
  SPORTSDASH_LOG            Log level: off|error|warn|info|debug|trace (default info)
  SPORTSDASH_LEAGUES        Comma list of sport/league[=Label], e.g. hockey/nhl=Hockey
  SPORTSDASH_TIMEOUT_SECS   Per-request timeout (default 10)
  SPORTSDASH_ESPN_BASE      ESPN site API base URL
  SPORTSDASH_SPORTSDB_BASE  TheSportsDB API base URL"
}

/// One refresh cycle, printed as JSON instead of drawn.
async fn print_snapshot(config: &FeedConfig) -> anyhow::Result<()> {
    let snapshot = Aggregator::new(config).refresh().await;
    let body = serde_json::to_string_pretty(&snapshot).context("failed to encode snapshot")?;
    println!("{body}");
    if snapshot.all_sources_failed() {
        std::process::exit(1);
    }
    Ok(())
}

async fn main_ui_loop(
    mut terminal: Terminal<CrosstermBackend<Stdout>>,
    app: Arc<Mutex<App>>,
    mut ui_events: mpsc::Receiver<UiEvent>,
    network_requests: mpsc::Sender<NetworkRequest>,
    mut network_responses: mpsc::Receiver<NetworkResponse>,
) {
    let mut loading = LoadingState::default();

    loop {
        tokio::select! {
            Some(ui_event) = ui_events.recv() => {
                let should_redraw = handle_ui_event(ui_event, &app, &network_requests).await;
                if should_redraw {
                    let mut app_guard = app.lock().await;
                    draw::draw(&mut terminal, &mut app_guard, loading);
                }
            }

            Some(response) = network_responses.recv() => {
                handle_network_response(response, &app, &mut loading).await;
                let mut app_guard = app.lock().await;
                draw::draw(&mut terminal, &mut app_guard, loading);
            }
        }
    }
}

async fn handle_ui_event(
    ui_event: UiEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) -> bool {
    match ui_event {
        UiEvent::AppStarted => {
            request_refresh(network_requests, RefreshTrigger::Startup).await;
            true
        }
        UiEvent::KeyPressed(key_event) => {
            keys::handle_key_bindings(key_event, app, network_requests).await;
            true
        }
        UiEvent::Resize => true,
        UiEvent::AnimationTick => {
            let mut guard = app.lock().await;
            if guard.state.animation.paused {
                return false;
            }
            guard.advance_animation(draw::FRAME_COUNT);
            true
        }
    }
}

async fn handle_network_response(
    response: NetworkResponse,
    app: &Arc<Mutex<App>>,
    loading: &mut LoadingState,
) {
    match response {
        NetworkResponse::LoadingStateChanged { loading_state } => {
            *loading = loading_state;
        }
        NetworkResponse::SnapshotLoaded { snapshot } => {
            if snapshot.all_sources_failed() {
                warn!("every source failed this cycle; showing an empty feed");
            }
            let mut guard = app.lock().await;
            guard.on_snapshot_loaded(snapshot);
        }
    }
}

async fn input_handler_task(ui_events: mpsc::Sender<UiEvent>) {
    loop {
        if let Ok(event) = crossterm_event::read() {
            let ui_event = match event {
                Event::Key(key_event) => Some(UiEvent::KeyPressed(key_event)),
                Event::Resize(_, _) => Some(UiEvent::Resize),
                _ => None,
            };

            if let Some(ui_event) = ui_event
                && ui_events.send(ui_event).await.is_err()
            {
                break;
            }
        }
    }
}

fn setup_terminal() {
    let mut stdout = io::stdout();
    let _ = execute!(stdout, cursor::Hide);
    let _ = execute!(stdout, terminal::EnterAlternateScreen);
    let _ = execute!(stdout, terminal::Clear(terminal::ClearType::All));
    let _ = terminal::enable_raw_mode();
}

pub fn cleanup_terminal() {
    let mut stdout = io::stdout();
    let _ = execute!(stdout, cursor::MoveTo(0, 0));
    let _ = execute!(stdout, terminal::Clear(terminal::ClearType::All));
    let _ = execute!(stdout, terminal::LeaveAlternateScreen);
    let _ = execute!(stdout, cursor::Show);
    let _ = terminal::disable_raw_mode();
}

fn setup_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        cleanup_terminal();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));
}
