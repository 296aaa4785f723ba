use std::path::PathBuf;
use std::time::Duration;

pub const WORK_SECONDS: u32 = 25 * 60;
pub const BREAK_SECONDS: u32 = 5 * 60;
pub const LONG_BREAK_SECONDS: u32 = 30 * 60;
pub const CYCLES_BEFORE_LONG_BREAK: u32 = 3; // Work completions before a long break
pub const TICK_INTERVAL_MS: u64 = 1000;

pub const WINDOW_TITLE: &str = "FlowState Timer";
pub const ALERT_SOUND_PATH: &str = "assets/alert1.mp3";
pub const ICON_PATH: &str = "assets/timer_icon.png";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerConfig {
    pub work_seconds: u32,
    pub break_seconds: u32,
    pub long_break_seconds: u32,
    pub cycles_before_long_break: u32,
    pub tick_interval: Duration,
    pub alert_sound: PathBuf,
    pub icon: PathBuf,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work_seconds: WORK_SECONDS,
            break_seconds: BREAK_SECONDS,
            long_break_seconds: LONG_BREAK_SECONDS,
            cycles_before_long_break: CYCLES_BEFORE_LONG_BREAK,
            tick_interval: Duration::from_millis(TICK_INTERVAL_MS),
            alert_sound: PathBuf::from(ALERT_SOUND_PATH),
            icon: PathBuf::from(ICON_PATH),
        }
    }
}

/// Directory for the session log, `~/.local/share/flowstate`.
pub fn data_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".local/share/flowstate")
}

pub fn log_path() -> PathBuf {
    data_dir().join("flowstate.log")
}
