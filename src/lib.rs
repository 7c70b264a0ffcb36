//! # Courier TUI
//!
//! A minimal terminal-based HTTP request client: compose a request, send
//! it, inspect the classified response.
//!
//! ## Features
//! - HTTP methods: GET, POST, PUT, DELETE, OPTIONS
//! - Request body editor with pair completion
//! - Custom headers
//! - Saved-request catalog sidebar loaded from a flat text file
//! - JSON pretty-printing and syntax highlighting
//! - Copy either response pane to the system clipboard
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Network Layer (Tokio runtime)

pub mod app;
pub mod catalog;
pub mod clipboard;
pub mod config;
pub mod constants;
pub mod dispatch;
pub mod messages;
pub mod models;
pub mod ui;

// Re-export commonly used types
pub use app::{AppActor, AppState};
pub use catalog::{Catalog, CatalogEntry, CatalogGroup};
pub use clipboard::{Clipboard, SystemClipboard};
pub use config::Settings;
pub use dispatch::{Dispatcher, HttpTransport, NetworkActor, Transport};
pub use messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
pub use models::{Header, HttpMethod, Outcome, Request, ResponseResult};
