//! Ratatui widgets for the promotion editor

mod help_bar;
mod line_list;
mod picker_dialog;
mod search_bar;
mod status_bar;

pub use help_bar::{HelpBar, KeyHint, hints_for};
pub use line_list::LineList;
pub use picker_dialog::PickerDialog;
pub use search_bar::SearchBar;
pub use status_bar::StatusBar;
