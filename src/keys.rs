use crate::app::{App, MenuItem};
use crate::state::messages::{NetworkRequest, RefreshTrigger};
use crate::state::network::request_refresh;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    let mut guard = app.lock().await;

    match (guard.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) | (_, Char('c'), KeyModifiers::CONTROL) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // Tab switching
        (_, Char('1'), _) => guard.update_tab(MenuItem::Dashboard),
        (_, Char('2'), _) => guard.update_tab(MenuItem::Events),
        (_, Char('?'), _) => guard.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => guard.exit_help(),

        // Table scrolling
        (MenuItem::Dashboard | MenuItem::Events, Char('j') | KeyCode::Down, _) => guard.table_down(),
        (MenuItem::Dashboard | MenuItem::Events, Char('k') | KeyCode::Up, _) => guard.table_up(),

        // Refresh now
        (_, Char('r'), _) => {
            drop(guard);
            request_refresh(network_requests, RefreshTrigger::Manual).await;
        }

        // Global
        (_, Char('p'), _) => guard.toggle_animations(),
        (_, Char('f'), _) => guard.toggle_full_screen(),
        (_, Char('"'), _) => guard.toggle_show_logs(),

        _ => {}
    }
}
