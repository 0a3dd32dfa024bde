//! TUI widgets

mod alert_panel;
mod status_bar;
mod thread_tree;

pub use alert_panel::AlertPanel;
pub use status_bar::StatusBar;
pub use thread_tree::ThreadTree;
