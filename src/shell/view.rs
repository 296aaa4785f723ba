use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph};

use crate::config::config::{CYCLES_BEFORE_LONG_BREAK, WINDOW_TITLE};
use crate::shell::menu::{Menu, MenuItem};
use crate::shell::shell::{Overlay, Shell};
use crate::theme::theme::Palette;

pub fn render(f: &mut Frame, shell: &Shell) {
    let palette = shell.palette();
    let display = shell.display();
    let base = Style::default().fg(palette.text).bg(palette.primary);

    let window = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(Span::styled(
            format!(" {} ", WINDOW_TITLE),
            base.add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Center)
        .style(base);
    let inner = window.inner(f.area());
    f.render_widget(window, f.area());

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(15),
            Constraint::Length(1), // Mode
            Constraint::Length(1),
            Constraint::Length(1), // Countdown
            Constraint::Length(1),
            Constraint::Length(1), // Status
            Constraint::Min(1),
            Constraint::Length(3), // Buttons
            Constraint::Length(1), // Key hints
        ])
        .split(inner);

    let mode = Paragraph::new(display.mode_label)
        .style(base.add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    f.render_widget(mode, rows[1]);

    let countdown = Paragraph::new(display.countdown.as_str())
        .style(base.add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    f.render_widget(countdown, rows[3]);

    let status = format!(
        "{}  •  {}/{} work sessions before long break",
        if display.running { "● running" } else { "⏸ paused" },
        display.cycle_index,
        CYCLES_BEFORE_LONG_BREAK
    );
    f.render_widget(
        Paragraph::new(status)
            .style(base)
            .alignment(Alignment::Center),
        rows[5],
    );

    render_buttons(f, rows[7], palette, display.primary_button);

    let hints = Line::from(vec![
        Span::styled("Space", base.add_modifier(Modifier::BOLD)),
        Span::raw(" start/pause  "),
        Span::styled("S", base.add_modifier(Modifier::BOLD)),
        Span::raw(" stop  "),
        Span::styled("T", base.add_modifier(Modifier::BOLD)),
        Span::raw(format!(" theme ({})  ", shell.theme().as_str())),
        Span::styled("M", base.add_modifier(Modifier::BOLD)),
        Span::raw(" menu  "),
        Span::styled("Q", base.add_modifier(Modifier::BOLD)),
        Span::raw(" quit"),
    ]);
    f.render_widget(
        Paragraph::new(hints).style(base).alignment(Alignment::Center),
        rows[8],
    );

    match shell.overlay() {
        Overlay::None => {}
        Overlay::Themes(menu) => render_menu(f, menu, palette),
        Overlay::Tray(menu) => render_menu(f, menu, palette),
    }
}

fn render_buttons(f: &mut Frame, area: Rect, palette: Palette, primary_label: &str) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(10),
            Constraint::Percentage(38),
            Constraint::Percentage(4),
            Constraint::Percentage(38),
            Constraint::Percentage(10),
        ])
        .split(area);

    let style = Style::default().fg(palette.text).bg(palette.secondary);
    for (label, column) in [(primary_label, columns[1]), ("Stop", columns[3])] {
        let button = Paragraph::new(label)
            .style(style.add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .style(style),
            );
        f.render_widget(button, column);
    }
}

fn render_menu<T: MenuItem>(f: &mut Frame, menu: &Menu<T>, palette: Palette) {
    let height = menu.items().len() as u16 + 2;
    let area = centered_rect(30, height, f.area());

    let items: Vec<ListItem> = menu.items().iter().map(|i| ListItem::new(i.label())).collect();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(menu.title()),
        )
        .style(Style::default().fg(palette.text).bg(palette.primary))
        .highlight_style(
            Style::default()
                .bg(palette.secondary)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(Some(menu.selected_index()));
    f.render_widget(Clear, area);
    f.render_stateful_widget(list, area, &mut state);
}

fn centered_rect(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    Rect {
        x: r.x + (r.width - width) / 2,
        y: r.y + (r.height - height) / 2,
        width,
        height,
    }
}
