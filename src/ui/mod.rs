//! Terminal frontend for the promotion editor
//!
//! ```text
//! ┌──────────────┐   keys    ┌──────────┐  dispatch  ┌─────────────┐
//! │  crossterm   │ ────────▶ │ AppState │ ─────────▶ │ PromoEditor │
//! └──────────────┘           └──────────┘            └─────────────┘
//!                              ▲      │ SearchRequest
//!                  PageLoaded  │      ▼
//!                           ┌─────────────────┐
//!                           │ tokio + Catalog │
//!                           └─────────────────┘
//! ```
//!
//! Drawing uses ratatui widgets; catalog fetches run on a tokio runtime and
//! their results come back over a channel polled by the event loop.

mod app;
mod error;
mod events;
mod state;
mod theme;
pub mod widgets;

pub use app::EditorApp;
pub use error::{Result, UiError};
pub use events::{EventResult, handle_key};
pub use state::{AppState, MessageLevel, Mode, PickerRow, Row, StatusMessage};
pub use theme::Theme;
