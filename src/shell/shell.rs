use std::io;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures_util::StreamExt;
use ratatui::Terminal;
use ratatui::backend::Backend;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};
use tracing::info;

use crate::pomodoro::pomodoro::{CycleController, SessionChange, SessionUpdate, UpdateReceiver};
use crate::shell::menu::{Menu, TrayAction, theme_menu, tray_menu};
use crate::shell::view;
use crate::theme::theme::{Palette, ThemeName};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellFlow {
    Continue,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    Themes(Menu<ThemeName>),
    Tray(Menu<TrayAction>),
}

/// What the widgets show. Rebuilt only from `SessionUpdate`s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Display {
    pub mode_label: &'static str,
    pub countdown: String,
    pub primary_button: &'static str,
    pub running: bool,
    pub cycle_index: u32,
}

pub fn format_time(seconds: u32) -> String {
    let (mins, secs) = (seconds / 60, seconds % 60);
    format!("{:02}:{:02}", mins, secs)
}

pub struct Shell {
    controller: CycleController,
    updates: UpdateReceiver,
    display: Display,
    theme: ThemeName,
    palette: Palette,
    overlay: Overlay,
}

impl Shell {
    pub fn new(controller: CycleController, updates: UpdateReceiver) -> Self {
        let state = controller.state();
        let theme = ThemeName::default();
        Self {
            controller,
            updates,
            display: Display {
                mode_label: state.mode.as_str(),
                countdown: format_time(state.remaining_seconds),
                primary_button: "Start",
                running: state.running,
                cycle_index: state.cycle_index,
            },
            theme,
            palette: theme.palette(),
            overlay: Overlay::None,
        }
    }

    pub fn controller(&self) -> &CycleController {
        &self.controller
    }

    pub fn display(&self) -> &Display {
        &self.display
    }

    pub fn theme(&self) -> ThemeName {
        self.theme
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    pub fn select_theme(&mut self, theme: ThemeName) {
        self.theme = theme;
        self.palette = theme.palette();
        info!(theme = theme.as_str(), "Theme selected");
    }

    pub fn tick(&mut self) {
        self.controller.tick();
        self.drain_updates();
    }

    /// Apply every pending controller update to the display.
    pub fn drain_updates(&mut self) {
        while let Ok(update) = self.updates.try_recv() {
            self.render_update(update);
        }
    }

    fn render_update(&mut self, update: SessionUpdate) {
        let state = update.state;
        self.display.mode_label = state.mode.as_str();
        self.display.countdown = format_time(state.remaining_seconds);
        self.display.running = state.running;
        self.display.cycle_index = state.cycle_index;

        match update.change {
            SessionChange::Started => self.display.primary_button = "Pause",
            SessionChange::Paused => self.display.primary_button = "Resume",
            SessionChange::Stopped => self.display.primary_button = "Start",
            SessionChange::Ticked | SessionChange::Transitioned { .. } => {}
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> ShellFlow {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return ShellFlow::Quit;
        }

        let flow = match std::mem::replace(&mut self.overlay, Overlay::None) {
            Overlay::None => self.handle_main_key(key),
            Overlay::Themes(mut menu) => match key.code {
                KeyCode::Enter => {
                    if let Some(theme) = menu.selected() {
                        self.select_theme(theme);
                    }
                    ShellFlow::Continue
                }
                KeyCode::Esc => ShellFlow::Continue,
                code => {
                    move_cursor(&mut menu, code);
                    self.overlay = Overlay::Themes(menu);
                    ShellFlow::Continue
                }
            },
            Overlay::Tray(mut menu) => match key.code {
                KeyCode::Enter => match menu.selected() {
                    Some(action) => self.handle_tray(action),
                    None => ShellFlow::Continue,
                },
                KeyCode::Esc => ShellFlow::Continue,
                code => {
                    move_cursor(&mut menu, code);
                    self.overlay = Overlay::Tray(menu);
                    ShellFlow::Continue
                }
            },
        };

        self.drain_updates();
        flow
    }

    fn handle_main_key(&mut self, key: KeyEvent) -> ShellFlow {
        match key.code {
            KeyCode::Char(' ') | KeyCode::Enter => self.controller.toggle(),
            KeyCode::Char('s') | KeyCode::Char('S') => self.controller.stop(),
            KeyCode::Char('t') | KeyCode::Char('T') => self.overlay = Overlay::Themes(theme_menu()),
            KeyCode::Char('m') | KeyCode::Char('M') => self.overlay = Overlay::Tray(tray_menu()),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return ShellFlow::Quit,
            _ => {}
        }
        ShellFlow::Continue
    }

    pub fn handle_tray(&mut self, action: TrayAction) -> ShellFlow {
        match action {
            TrayAction::PauseResume => {
                self.controller.toggle();
                ShellFlow::Continue
            }
            TrayAction::Quit => ShellFlow::Quit,
        }
    }
}

fn move_cursor<T: crate::shell::menu::MenuItem>(menu: &mut Menu<T>, code: KeyCode) {
    match code {
        KeyCode::Down | KeyCode::Char('j') => menu.next(),
        KeyCode::Up | KeyCode::Char('k') => menu.previous(),
        _ => {}
    }
}

/// Arm or disarm the one-second tick to match the controller. A fresh
/// interval fires its first tick a full period from now, so a resumed timer
/// never catches up on time spent paused.
fn sync_ticker(ticker: &mut Option<Interval>, running: bool, period: std::time::Duration) {
    match (running, ticker.is_some()) {
        (true, false) => {
            let mut armed = interval_at(Instant::now() + period, period);
            armed.set_missed_tick_behavior(MissedTickBehavior::Delay);
            *ticker = Some(armed);
        }
        (false, true) => *ticker = None,
        _ => {}
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

/// Single-threaded event loop: terminal input and the countdown tick share
/// one `select!`, and every iteration ends with a redraw.
pub async fn run<B: Backend>(
    terminal: &mut Terminal<B>,
    shell: &mut Shell,
    period: std::time::Duration,
) -> io::Result<()> {
    let mut events = EventStream::new();
    let mut ticker: Option<Interval> = None;

    terminal.draw(|f| view::render(f, shell))?;

    loop {
        tokio::select! {
            biased;

            maybe_event = events.next() => match maybe_event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    if shell.handle_key(key) == ShellFlow::Quit {
                        info!("Quit requested");
                        return Ok(());
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e),
                None => return Ok(()),
            },

            _ = next_tick(&mut ticker) => shell.tick(),
        }

        sync_ticker(&mut ticker, shell.controller().is_running(), period);
        terminal.draw(|f| view::render(f, shell))?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::alert::{Alert, AlertCue, AlertError};
    use crate::config::config::TimerConfig;
    use crate::pomodoro::pomodoro::{PomodoroMode, create_update_channel};
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    struct SilentAlert;

    impl Alert for SilentAlert {
        fn play(&mut self, _cue: &AlertCue) -> Result<(), AlertError> {
            Ok(())
        }
    }

    fn shell_with(config: TimerConfig) -> Shell {
        let (tx, rx) = create_update_channel();
        let controller = CycleController::new(config, Box::new(SilentAlert), tx);
        Shell::new(controller, rx)
    }

    fn press(shell: &mut Shell, code: KeyCode) -> ShellFlow {
        shell.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(59), "00:59");
        assert_eq!(format_time(1500), "25:00");
        assert_eq!(format_time(1799), "29:59");
    }

    #[test]
    fn test_initial_display() {
        let shell = shell_with(TimerConfig::default());
        assert_eq!(
            shell.display(),
            &Display {
                mode_label: "Work",
                countdown: "25:00".to_string(),
                primary_button: "Start",
                running: false,
                cycle_index: 0,
            }
        );
    }

    #[test]
    fn test_primary_button_relabels() {
        let mut shell = shell_with(TimerConfig::default());
        press(&mut shell, KeyCode::Char(' '));
        assert_eq!(shell.display().primary_button, "Pause");
        assert!(shell.controller().is_running());

        press(&mut shell, KeyCode::Char(' '));
        assert_eq!(shell.display().primary_button, "Resume");

        press(&mut shell, KeyCode::Char('s'));
        assert_eq!(shell.display().primary_button, "Start");
    }

    #[test]
    fn test_ticks_update_countdown_and_mode_label() {
        let mut shell = shell_with(TimerConfig {
            work_seconds: 61,
            ..TimerConfig::default()
        });
        press(&mut shell, KeyCode::Enter);
        shell.tick();
        assert_eq!(shell.display().countdown, "01:00");

        for _ in 0..61 {
            shell.tick();
        }
        assert_eq!(shell.display().mode_label, "Break");
        assert_eq!(shell.display().countdown, "05:00");
        assert_eq!(shell.display().cycle_index, 1);
        assert_eq!(shell.display().primary_button, "Pause");
    }

    #[test]
    fn test_theme_selection_leaves_session_untouched() {
        let mut shell = shell_with(TimerConfig::default());
        press(&mut shell, KeyCode::Char(' '));
        shell.tick();
        let before = shell.controller().state();
        let display_before = shell.display().clone();

        for theme in ThemeName::ALL {
            shell.select_theme(theme);
            assert_eq!(shell.palette(), theme.palette());
            assert_eq!(shell.controller().state(), before);
            assert_eq!(shell.display(), &display_before);
        }
    }

    #[test]
    fn test_theme_menu_selects_with_keys() {
        let mut shell = shell_with(TimerConfig::default());
        press(&mut shell, KeyCode::Char('t'));
        assert!(matches!(shell.overlay(), Overlay::Themes(_)));

        press(&mut shell, KeyCode::Down);
        press(&mut shell, KeyCode::Enter);
        assert_eq!(shell.theme(), ThemeName::Dark);
        assert_eq!(shell.overlay(), &Overlay::None);
        assert!(!shell.controller().is_running());
    }

    #[test]
    fn test_escape_closes_menu_without_quitting() {
        let mut shell = shell_with(TimerConfig::default());
        press(&mut shell, KeyCode::Char('m'));
        assert_eq!(press(&mut shell, KeyCode::Esc), ShellFlow::Continue);
        assert_eq!(shell.overlay(), &Overlay::None);
        assert_eq!(press(&mut shell, KeyCode::Esc), ShellFlow::Quit);
    }

    #[test]
    fn test_tray_pause_resume_delegates_to_toggle() {
        let mut shell = shell_with(TimerConfig::default());
        press(&mut shell, KeyCode::Char('m'));
        press(&mut shell, KeyCode::Enter);
        assert!(shell.controller().is_running());
        assert_eq!(shell.display().primary_button, "Pause");

        assert_eq!(shell.handle_tray(TrayAction::PauseResume), ShellFlow::Continue);
        shell.drain_updates();
        assert!(!shell.controller().is_running());
        assert_eq!(shell.display().primary_button, "Resume");
    }

    #[test]
    fn test_tray_quit() {
        let mut shell = shell_with(TimerConfig::default());
        press(&mut shell, KeyCode::Char('m'));
        press(&mut shell, KeyCode::Down);
        assert_eq!(press(&mut shell, KeyCode::Enter), ShellFlow::Quit);
    }

    #[test]
    fn test_ctrl_c_quits_from_menu() {
        let mut shell = shell_with(TimerConfig::default());
        press(&mut shell, KeyCode::Char('t'));
        let flow = shell.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(flow, ShellFlow::Quit);
    }

    #[test]
    fn test_stop_keeps_rotation_position() {
        let mut shell = shell_with(TimerConfig {
            work_seconds: 1,
            ..TimerConfig::default()
        });
        press(&mut shell, KeyCode::Char(' '));
        shell.tick();
        shell.tick();
        assert_eq!(shell.controller().state().mode, PomodoroMode::Break);

        press(&mut shell, KeyCode::Char('s'));
        assert_eq!(shell.display().mode_label, "Work");
        assert_eq!(shell.display().countdown, "00:01");
        assert_eq!(shell.display().cycle_index, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticker_arms_and_disarms() {
        let period = Duration::from_secs(1);
        let mut ticker = None;

        sync_ticker(&mut ticker, true, period);
        assert!(ticker.is_some());

        let before = Instant::now();
        next_tick(&mut ticker).await;
        assert!(Instant::now() - before >= period);

        sync_ticker(&mut ticker, false, period);
        assert!(ticker.is_none());
    }
}
