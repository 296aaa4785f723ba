use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io;
use tracing::{error, info};
mod alert;
mod config;
mod logging;
mod pomodoro;
mod shell;
mod theme;

use alert::alert::SoundAlert;
use config::config::{TimerConfig, WINDOW_TITLE};
use pomodoro::pomodoro::{CycleController, create_update_channel};
use shell::shell::Shell;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::logging::init(&config::config::log_path())?;

    let config = TimerConfig::default();
    info!(
        "Pomodoro settings: {}s work / {}s break / {}s long break",
        config.work_seconds, config.break_seconds, config.long_break_seconds
    );

    let (updates_tx, updates_rx) = create_update_channel();
    let alert = SoundAlert::new(&config);
    let period = config.tick_interval;
    let controller = CycleController::new(config, Box::new(alert), updates_tx);
    let mut shell = Shell::new(controller, updates_rx);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetTitle(WINDOW_TITLE))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = shell::shell::run(&mut terminal, &mut shell, period).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = res {
        error!("Event loop failed: {}", e);
        eprintln!("Error: {}", e);
    }
    info!("Session ended");

    Ok(())
}
