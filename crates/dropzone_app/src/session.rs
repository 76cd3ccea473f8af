use std::time::{Duration, Instant};

use dropzone_core::{update, AppState, AppViewModel, Msg};

use crate::effects::EffectRunner;

/// Longest single wait on the engine when no deadline applies.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// One page session: the single `AppState` plus the runner executing its effects.
///
/// All transitions happen on the caller's thread; only the network work runs
/// in the background.
pub struct Session {
    state: AppState,
    runner: EffectRunner,
}

impl Session {
    pub fn new(runner: EffectRunner) -> Self {
        Self {
            state: AppState::new(),
            runner,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    /// Applies a message, runs its effects, and returns the new view if anything changed.
    pub fn dispatch(&mut self, msg: Msg) -> Option<AppViewModel> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let changed = state.consume_dirty();
        let view = changed.then(|| state.view());
        self.state = state;
        self.runner.enqueue(effects);
        view
    }

    /// Feeds engine events into the state until no upload is in progress.
    ///
    /// `on_change` sees every view that results from an engine event. Returns
    /// false if `timeout` elapsed first; `None` waits indefinitely.
    pub fn wait_settled(
        &mut self,
        timeout: Option<Duration>,
        mut on_change: impl FnMut(&AppViewModel),
    ) -> bool {
        let deadline = timeout.map(|timeout| Instant::now() + timeout);
        while self.state.is_uploading() {
            let wait = match deadline {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return false;
                    }
                    (deadline - now).min(POLL_INTERVAL)
                }
                None => POLL_INTERVAL,
            };
            if let Some(msg) = self.runner.next_msg(wait) {
                if let Some(view) = self.dispatch(msg) {
                    on_change(&view);
                }
            }
        }
        true
    }

    /// Keeps feeding engine events for `duration`, whatever the state.
    /// Lets late answers from superseded requests arrive (and be discarded).
    pub fn pump_for(&mut self, duration: Duration) {
        let deadline = Instant::now() + duration;
        loop {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            if let Some(msg) = self.runner.next_msg(deadline - now) {
                self.dispatch(msg);
            }
        }
    }
}
