//! App state - pure data structure with no I/O logic

use crate::catalog::Catalog;
use crate::messages::render::{Notification, RenderState, SidebarRow};
use crate::messages::ui_events::{InputMode, Panel};
use crate::models::Request;

/// Text content of the two response display slots plus the status line data.
/// Rebuilt from a `ResponseResult` on each completed submission.
#[derive(Clone, Debug)]
pub struct ResponseView {
    pub body: String,
    pub headers: String,
    pub status_code: Option<u16>,
    pub status_phrase: String,
    pub time_ms: u64,
}

impl Default for ResponseView {
    fn default() -> Self {
        ResponseView {
            body: String::from(
                r#"Quick Reference:
────────────────────────────
  s     Send request
  m     Change method
  Tab   Next panel
  e     Edit field
  b     Saved requests
  c     Copy active pane
  ?     Full help
  q     Quit
────────────────────────────
Press 's' to send your first request!"#,
            ),
            headers: String::new(),
            status_code: None,
            status_phrase: String::new(),
            time_ms: 0,
        }
    }
}

/// Main application state - pure data, no I/O
pub struct AppState {
    // HTTP Request draft
    pub draft: Request,
    pub cursor_position: usize,

    // UI state
    pub active_panel: Panel,
    pub input_mode: InputMode,
    pub response_scroll: u16,
    pub headers_scroll: u16,

    // Response slots
    pub view: ResponseView,
    pub is_loading: bool,
    pub next_request_id: u64,
    pub pending_request_id: Option<u64>,

    // Headers panel
    pub selected_header: usize,

    // Saved-request catalog (parsed once at startup, read-only)
    pub catalog: Catalog,
    pub sidebar_visible: bool,
    pub selected_entry: usize,

    // Status notification
    pub notification: Option<Notification>,

    // Popups
    pub show_help: bool,
}

impl AppState {
    pub fn new(catalog: Catalog) -> Self {
        let sidebar_visible = !catalog.is_empty();
        let draft = Request::default();
        AppState {
            cursor_position: draft.url.len(),
            draft,
            active_panel: Panel::Url,
            input_mode: InputMode::Normal,
            response_scroll: 0,
            headers_scroll: 0,
            view: ResponseView::default(),
            is_loading: false,
            next_request_id: 1,
            pending_request_id: None,
            selected_header: 0,
            catalog,
            sidebar_visible,
            selected_entry: 0,
            notification: None,
            show_help: false,
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    /// Get the current input field content
    pub fn current_input(&self) -> &str {
        match self.active_panel {
            Panel::Url => &self.draft.url,
            Panel::Body => &self.draft.body,
            _ => "",
        }
    }

    /// Get mutable reference to current input field
    pub fn current_input_mut(&mut self) -> &mut String {
        match self.active_panel {
            Panel::Body => &mut self.draft.body,
            // Editing only starts on Url or Body; fall back to the URL
            _ => &mut self.draft.url,
        }
    }

    /// Sidebar rows for rendering: group headers interleaved with entries,
    /// selection marked on the entry at the flat index
    pub fn sidebar_rows(&self) -> Vec<SidebarRow> {
        let mut rows = Vec::new();
        let mut flat = 0;
        for group in &self.catalog.groups {
            rows.push(SidebarRow::Group(group.name.clone()));
            for entry in &group.entries {
                rows.push(SidebarRow::Entry {
                    method: entry.method.clone(),
                    url: entry.url.clone(),
                    selected: flat == self.selected_entry,
                });
                flat += 1;
            }
        }
        rows
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            method: self.draft.method,
            url: self.draft.url.clone(),
            body: self.draft.body.clone(),
            headers: self.draft.headers.clone(),
            active_panel: self.active_panel,
            input_mode: self.input_mode,
            cursor_position: self.cursor_position,
            view: self.view.clone(),
            response_scroll: self.response_scroll,
            headers_scroll: self.headers_scroll,
            is_loading: self.is_loading,
            selected_header: self.selected_header,
            notification: self.notification.clone(),
            sidebar_visible: self.sidebar_visible,
            sidebar_rows: self.sidebar_rows(),
            show_help: self.show_help,
        }
    }
}
