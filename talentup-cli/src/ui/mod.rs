// Terminal UI module using ratatui

mod app;
mod dashboard;
mod widgets;

pub use app::{Action, App, InputMode, Snapshot};
pub use dashboard::{load_snapshot, Dashboard, Exit};
