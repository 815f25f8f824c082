use crate::state::network::LoadingState;
use crossterm::event::KeyEvent;
use sports_feed::Snapshot;

/// What asked for a refresh. Only used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTrigger {
    Startup,
    Timer,
    Manual,
}

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    Refresh { trigger: RefreshTrigger },
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    SnapshotLoaded { snapshot: Snapshot },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
    AnimationTick,
}
