use crate::theme::theme::ThemeName;

/// Entries of the tray context menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayAction {
    PauseResume,
    Quit,
}

impl TrayAction {
    pub const ALL: [TrayAction; 2] = [TrayAction::PauseResume, TrayAction::Quit];
}

pub trait MenuItem: Copy {
    fn label(&self) -> &'static str;
}

impl MenuItem for TrayAction {
    fn label(&self) -> &'static str {
        match self {
            TrayAction::PauseResume => "Pause/Resume",
            TrayAction::Quit => "Quit",
        }
    }
}

impl MenuItem for ThemeName {
    fn label(&self) -> &'static str {
        self.as_str()
    }
}

/// A popup list with a wrapping cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu<T> {
    title: &'static str,
    items: Vec<T>,
    selected: usize,
}

impl<T: MenuItem> Menu<T> {
    pub fn new(title: &'static str, items: impl IntoIterator<Item = T>) -> Self {
        Self {
            title,
            items: items.into_iter().collect(),
            selected: 0,
        }
    }

    pub fn title(&self) -> &'static str {
        self.title
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> Option<T> {
        self.items.get(self.selected).copied()
    }

    pub fn next(&mut self) {
        if !self.items.is_empty() {
            self.selected = (self.selected + 1) % self.items.len();
        }
    }

    pub fn previous(&mut self) {
        if !self.items.is_empty() {
            self.selected = (self.selected + self.items.len() - 1) % self.items.len();
        }
    }
}

pub fn tray_menu() -> Menu<TrayAction> {
    Menu::new(" FlowState Timer ", TrayAction::ALL)
}

pub fn theme_menu() -> Menu<ThemeName> {
    Menu::new(" Theme ", ThemeName::ALL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_wraps_both_ways() {
        let mut menu = theme_menu();
        assert_eq!(menu.selected(), Some(ThemeName::Forest));

        menu.previous();
        assert_eq!(menu.selected(), Some(ThemeName::Light));

        menu.next();
        menu.next();
        assert_eq!(menu.selected(), Some(ThemeName::Dark));
    }

    #[test]
    fn test_tray_menu_entries() {
        let menu = tray_menu();
        let labels: Vec<_> = menu.items().iter().map(|a| a.label()).collect();
        assert_eq!(labels, vec!["Pause/Resume", "Quit"]);
    }
}
