//! hamlet-tui: Terminal viewer for generated towns
//!
//! Renders a town grid with ratatui and maps keys to regeneration commands.

pub mod app;
pub mod input;
pub mod logging;
pub mod theme;
pub mod widgets;

pub use app::{App, ViewMode};
pub use input::{Action, key_to_action};
pub use theme::{PaletteMode, Theme};
