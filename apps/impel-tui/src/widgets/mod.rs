//! TUI widgets

mod alert_panel;
mod mode_indicator;
mod status_bar;
mod thread_tree;

pub use alert_panel::AlertPanel;
pub use mode_indicator::ModeIndicator;
pub use status_bar::StatusBar;
pub use thread_tree::ThreadTree;
