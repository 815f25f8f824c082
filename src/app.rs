use crate::state::app_settings::AppSettings;
use crate::state::app_state::AppState;
use sports_feed::Snapshot;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Dashboard,
    Events,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new(settings: AppSettings) -> Self {
        let level = settings.effective_log_level();
        log::set_max_level(level);
        tui_logger::set_default_level(level);

        Self { state: AppState::new(), settings }
    }

    // -----------------------------------------------------------------------
    // Network response handlers, called from main_ui_loop
    // -----------------------------------------------------------------------

    pub fn on_snapshot_loaded(&mut self, snapshot: Snapshot) {
        self.state.feed.apply(snapshot);
        let rows = self.state.feed.events().len();
        self.state.table.clamp(rows);
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    pub fn toggle_animations(&mut self) {
        self.state.animation.toggle_paused();
    }

    // -----------------------------------------------------------------------
    // Events table
    // -----------------------------------------------------------------------

    pub fn table_down(&mut self) {
        let rows = self.state.feed.events().len();
        self.state.table.scroll_down(rows);
    }

    pub fn table_up(&mut self) {
        self.state.table.scroll_up();
    }

    // -----------------------------------------------------------------------
    // Animation tick, every 80ms from AnimationTick
    // -----------------------------------------------------------------------

    pub fn advance_animation(&mut self, frame_count: usize) {
        self.state.animation.advance(frame_count);
    }
}
