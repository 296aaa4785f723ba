use tokio::sync::mpsc;
use tracing::{info, trace, warn};

use crate::alert::alert::{Alert, AlertCue};
use crate::config::config::TimerConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PomodoroMode {
    Work,
    Break,
    LongBreak,
}

impl PomodoroMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PomodoroMode::Work => "Work",
            PomodoroMode::Break => "Break",
            PomodoroMode::LongBreak => "Long Break",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionState {
    pub mode: PomodoroMode,
    pub remaining_seconds: u32,
    pub cycle_index: u32,
    pub running: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionChange {
    Started,
    Paused,
    Stopped,
    Ticked,
    Transitioned {
        from: PomodoroMode,
        to: PomodoroMode,
    },
}

/// Published after every mutation of the session; this is the render callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionUpdate {
    pub change: SessionChange,
    pub state: SessionState,
}

pub type UpdateSender = mpsc::UnboundedSender<SessionUpdate>;
pub type UpdateReceiver = mpsc::UnboundedReceiver<SessionUpdate>;

pub fn create_update_channel() -> (UpdateSender, UpdateReceiver) {
    mpsc::unbounded_channel()
}

/// Work/break cycle controller. Owns the session state and nothing else:
/// the tick source lives with whoever drives `tick()`, and watches `running`.
pub struct CycleController {
    config: TimerConfig,
    state: SessionState,
    alert: Box<dyn Alert>,
    updates: UpdateSender,
}

impl CycleController {
    pub fn new(config: TimerConfig, alert: Box<dyn Alert>, updates: UpdateSender) -> Self {
        let state = SessionState {
            mode: PomodoroMode::Work,
            remaining_seconds: config.work_seconds,
            cycle_index: 0,
            running: false,
        };
        Self {
            config,
            state,
            alert,
            updates,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn start(&mut self) {
        if self.state.running {
            return;
        }
        self.state.running = true;
        info!(
            mode = self.state.mode.as_str(),
            remaining = self.state.remaining_seconds,
            "Timer started"
        );
        self.publish(SessionChange::Started);
    }

    pub fn pause(&mut self) {
        if !self.state.running {
            return;
        }
        self.state.running = false;
        info!(
            mode = self.state.mode.as_str(),
            remaining = self.state.remaining_seconds,
            "Timer paused"
        );
        self.publish(SessionChange::Paused);
    }

    pub fn toggle(&mut self) {
        if self.state.running {
            self.pause();
        } else {
            self.start();
        }
    }

    /// Back to a fresh Work interval. The rotation position (`cycle_index`)
    /// is kept.
    pub fn stop(&mut self) {
        self.state.running = false;
        self.state.mode = PomodoroMode::Work;
        self.state.remaining_seconds = self.config.work_seconds;
        info!(cycle_index = self.state.cycle_index, "Timer stopped");
        self.publish(SessionChange::Stopped);
    }

    pub fn tick(&mut self) {
        if !self.state.running {
            return;
        }

        if self.state.remaining_seconds > 0 {
            self.state.remaining_seconds -= 1;
            trace!(remaining = self.state.remaining_seconds, "tick");
            self.publish(SessionChange::Ticked);
            return;
        }

        let from = self.state.mode;
        let next = self.next_state();
        let cue = AlertCue {
            finished: from,
            next: next.mode,
        };
        if let Err(e) = self.alert.play(&cue) {
            warn!("Failed to play alert: {}", e);
        }

        self.state = next;
        info!(
            from = from.as_str(),
            to = next.mode.as_str(),
            cycle_index = next.cycle_index,
            "Switched mode"
        );
        self.publish(SessionChange::Transitioned {
            from,
            to: next.mode,
        });
    }

    /// The state entered once the current interval has run out.
    fn next_state(&self) -> SessionState {
        let mut next = self.state;
        match self.state.mode {
            PomodoroMode::Work => {
                if self.state.cycle_index >= self.config.cycles_before_long_break {
                    next.cycle_index = 0;
                    next.mode = PomodoroMode::LongBreak;
                    next.remaining_seconds = self.config.long_break_seconds;
                } else {
                    next.cycle_index += 1;
                    next.mode = PomodoroMode::Break;
                    next.remaining_seconds = self.config.break_seconds;
                }
            }
            PomodoroMode::Break | PomodoroMode::LongBreak => {
                next.mode = PomodoroMode::Work;
                next.remaining_seconds = self.config.work_seconds;
            }
        }
        next
    }

    fn publish(&self, change: SessionChange) {
        let update = SessionUpdate {
            change,
            state: self.state,
        };
        // A closed receiver means the shell is gone; nothing left to render.
        let _ = self.updates.send(update);
    }
}
