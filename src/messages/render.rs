//! Render state - data structure sent from App layer to UI for rendering

use crate::app::state::ResponseView;
use crate::messages::ui_events::{InputMode, Panel};
use crate::models::{Header, HttpMethod};

/// Severity of a transient status notification
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

/// Transient status line describing the latest submission or action
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub text: String,
}

impl Notification {
    pub fn info(text: impl Into<String>) -> Self {
        Notification {
            severity: Severity::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Notification {
            severity: Severity::Error,
            text: text.into(),
        }
    }
}

/// One row of the saved-request sidebar, precomputed by the App layer so
/// the UI only styles it
#[derive(Clone, Debug)]
pub enum SidebarRow {
    Group(String),
    Entry {
        method: String,
        url: String,
        selected: bool,
    },
}

/// Complete state needed by the UI to render
#[derive(Clone, Debug)]
pub struct RenderState {
    // HTTP Request data
    pub method: HttpMethod,
    pub url: String,
    pub body: String,
    pub headers: Vec<Header>,

    // UI state
    pub active_panel: Panel,
    pub input_mode: InputMode,
    pub cursor_position: usize,

    // Response slots
    pub view: ResponseView,
    pub response_scroll: u16,
    pub headers_scroll: u16,
    pub is_loading: bool,

    // Headers panel
    pub selected_header: usize,

    // Status notification
    pub notification: Option<Notification>,

    // Saved-request sidebar
    pub sidebar_visible: bool,
    pub sidebar_rows: Vec<SidebarRow>,

    // Popups
    pub show_help: bool,
}

impl Default for RenderState {
    fn default() -> Self {
        use crate::constants::DEFAULT_HTTP_URL;
        RenderState {
            method: HttpMethod::GET,
            url: String::from(DEFAULT_HTTP_URL),
            body: String::new(),
            headers: vec![
                Header::new("Content-Type", "application/json"),
                Header::new("Accept", "application/json"),
            ],
            active_panel: Panel::Url,
            input_mode: InputMode::Normal,
            cursor_position: DEFAULT_HTTP_URL.len(),
            view: ResponseView::default(),
            response_scroll: 0,
            headers_scroll: 0,
            is_loading: false,
            selected_header: 0,
            notification: None,
            sidebar_visible: false,
            sidebar_rows: Vec::new(),
            show_help: false,
        }
    }
}
