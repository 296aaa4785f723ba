pub mod menu;
pub mod shell;
pub mod view;
