use chrono::Local;
use notify_rust::{Notification, Timeout};
use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::config::config::{TimerConfig, WINDOW_TITLE};
use crate::pomodoro::pomodoro::PomodoroMode;

const NOTIFICATION_TIMEOUT_MS: u32 = 5000;

/// Command-line players tried in order; the first one found on `PATH` wins.
const PLAYERS: &[(&str, &[&str])] = &[
    ("mpg123", &["-q"]),
    ("ffplay", &["-nodisp", "-autoexit", "-loglevel", "quiet"]),
    ("afplay", &[]),
    ("paplay", &[]),
];

#[derive(Debug, Error)]
pub enum AlertError {
    #[error("alert sound not found: {}", .0.display())]
    MissingAsset(PathBuf),
    #[error("no audio player available")]
    NoPlayer,
    #[error("failed to start audio player: {0}")]
    Spawn(#[source] io::Error),
    #[error("desktop notification failed: {0}")]
    Notification(String),
}

/// What just ended and what comes next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertCue {
    pub finished: PomodoroMode,
    pub next: PomodoroMode,
}

impl AlertCue {
    pub fn message(&self) -> String {
        match (self.finished, self.next) {
            (PomodoroMode::Work, PomodoroMode::LongBreak) => {
                "Work session complete! Time for a long break.".to_string()
            }
            (PomodoroMode::Work, _) => "Work session complete! Time for a break.".to_string(),
            (_, _) => "Break is over! Back to work.".to_string(),
        }
    }
}

/// Signals the end of an interval. Fire-and-forget: callers log failures
/// and carry on.
pub trait Alert {
    fn play(&mut self, cue: &AlertCue) -> Result<(), AlertError>;
}

pub struct SoundAlert {
    sound: PathBuf,
    icon: PathBuf,
    notify: bool,
}

impl SoundAlert {
    pub fn new(config: &TimerConfig) -> Self {
        Self {
            sound: config.alert_sound.clone(),
            icon: config.icon.clone(),
            notify: true,
        }
    }
}

impl Alert for SoundAlert {
    fn play(&mut self, cue: &AlertCue) -> Result<(), AlertError> {
        let sound = play_sound(&self.sound);

        if self.notify {
            let message = format!("[{}] {}", Local::now().format("%H:%M:%S"), cue.message());
            if let Err(e) = send_notification(&message, &self.icon) {
                warn!("Failed to send notification: {}", e);
            }
        }

        sound
    }
}

fn play_sound(path: &Path) -> Result<(), AlertError> {
    if !path.exists() {
        return Err(AlertError::MissingAsset(path.to_path_buf()));
    }

    for (player, args) in PLAYERS {
        let spawned = Command::new(player)
            .args(*args)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        match spawned {
            // The child is not awaited; the runtime reaps it once it exits.
            Ok(_child) => {
                debug!(player, "Playing alert sound");
                return Ok(());
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
            Err(e) => return Err(AlertError::Spawn(e)),
        }
    }

    Err(AlertError::NoPlayer)
}

fn send_notification(message: &str, icon: &Path) -> Result<(), AlertError> {
    Notification::new()
        .summary(WINDOW_TITLE)
        .body(message)
        .appname("flowstate")
        .icon(&icon.to_string_lossy())
        .timeout(Timeout::Milliseconds(NOTIFICATION_TIMEOUT_MS))
        .show()
        .map_err(|e| AlertError::Notification(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_follow_the_cue() {
        let to_break = AlertCue {
            finished: PomodoroMode::Work,
            next: PomodoroMode::Break,
        };
        let to_long_break = AlertCue {
            finished: PomodoroMode::Work,
            next: PomodoroMode::LongBreak,
        };
        let back_to_work = AlertCue {
            finished: PomodoroMode::LongBreak,
            next: PomodoroMode::Work,
        };

        assert!(to_break.message().contains("Time for a break"));
        assert!(to_long_break.message().contains("long break"));
        assert!(back_to_work.message().starts_with("Break is over"));
    }

    #[test]
    fn test_missing_asset_is_reported() {
        let config = TimerConfig {
            alert_sound: PathBuf::from("/nonexistent/flowstate/alert1.mp3"),
            ..TimerConfig::default()
        };
        let mut alert = SoundAlert {
            notify: false,
            ..SoundAlert::new(&config)
        };
        let cue = AlertCue {
            finished: PomodoroMode::Work,
            next: PomodoroMode::Break,
        };

        let err = alert.play(&cue).unwrap_err();
        assert!(matches!(err, AlertError::MissingAsset(_)));
        assert!(err.to_string().contains("alert1.mp3"));
    }
}
