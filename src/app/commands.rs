//! Command handlers - business logic for processing UI events

use crate::app::state::ResponseView;
use crate::app::AppState;
use crate::messages::render::Notification;
use crate::messages::ui_events::{InputMode, Panel};
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::{format_header_lines, Header, HttpMethod, Outcome, ResponseResult};

impl AppState {
    // ========================
    // Navigation
    // ========================

    pub fn next_panel(&mut self) {
        self.active_panel = self.active_panel.next();
        if self.active_panel == Panel::Catalog && !self.sidebar_visible {
            self.active_panel = self.active_panel.next();
        }
    }

    pub fn prev_panel(&mut self) {
        self.active_panel = self.active_panel.prev();
        if self.active_panel == Panel::Catalog && !self.sidebar_visible {
            self.active_panel = self.active_panel.prev();
        }
    }

    // ========================
    // Input editing
    // ========================

    pub fn start_editing(&mut self) {
        self.input_mode = InputMode::Editing;
        self.cursor_position = self.current_input().len();
    }

    pub fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn move_cursor_left(&mut self) {
        let input = self.current_input();
        if self.cursor_position > 0 {
            let new_pos = input[..self.cursor_position]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.cursor_position = new_pos;
        }
    }

    pub fn move_cursor_right(&mut self) {
        let input = self.current_input();
        if self.cursor_position < input.len() {
            let new_pos = input[self.cursor_position..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_position + i)
                .unwrap_or(input.len());
            self.cursor_position = new_pos;
        }
    }

    pub fn enter_char(&mut self, c: char) {
        // The body editor auto-closes paired characters and leaves the
        // cursor between them
        if self.active_panel == Panel::Body {
            if let Some(closing) = closing_pair(c) {
                let cursor_pos = self.cursor_position;
                let input = self.current_input_mut();
                if cursor_pos <= input.len() {
                    input.insert(cursor_pos, c);
                    input.insert(cursor_pos + c.len_utf8(), closing);
                    self.cursor_position = cursor_pos + c.len_utf8();
                }
                return;
            }
        }

        let cursor_pos = self.cursor_position;
        let input = self.current_input_mut();
        if cursor_pos <= input.len() {
            input.insert(cursor_pos, c);
            self.cursor_position = cursor_pos + c.len_utf8();
        }
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let cursor_pos = self.cursor_position;
            let input = self.current_input_mut();
            let prev_pos = input[..cursor_pos]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            input.remove(prev_pos);
            self.cursor_position = prev_pos;
        }
    }

    // ========================
    // HTTP Method
    // ========================

    pub fn cycle_method(&mut self) {
        if !self.is_loading {
            self.draft.method = self.draft.method.next();
        }
    }

    // ========================
    // Response scrolling
    // ========================

    pub fn scroll_up(&mut self) {
        match self.active_panel {
            Panel::ResponseHeaders => {
                self.headers_scroll = self.headers_scroll.saturating_sub(1);
            }
            _ => {
                self.response_scroll = self.response_scroll.saturating_sub(1);
            }
        }
    }

    pub fn scroll_down(&mut self) {
        match self.active_panel {
            Panel::ResponseHeaders => {
                self.headers_scroll = self.headers_scroll.saturating_add(1);
            }
            _ => {
                self.response_scroll = self.response_scroll.saturating_add(1);
            }
        }
    }

    // ========================
    // Headers
    // ========================

    pub fn next_header(&mut self) {
        if !self.draft.headers.is_empty() {
            self.selected_header = (self.selected_header + 1) % self.draft.headers.len();
        }
    }

    pub fn prev_header(&mut self) {
        if !self.draft.headers.is_empty() {
            self.selected_header = self
                .selected_header
                .checked_sub(1)
                .unwrap_or(self.draft.headers.len() - 1);
        }
    }

    pub fn toggle_header(&mut self) {
        if let Some(header) = self.draft.headers.get_mut(self.selected_header) {
            header.enabled = !header.enabled;
        }
    }

    pub fn add_header(&mut self) {
        self.draft.headers.push(Header::new("X-Custom", "value"));
        self.selected_header = self.draft.headers.len() - 1;
    }

    pub fn delete_header(&mut self) {
        if !self.draft.headers.is_empty() {
            self.draft.headers.remove(self.selected_header);
            if self.selected_header > 0 {
                self.selected_header -= 1;
            }
        }
    }

    // ========================
    // Saved-request sidebar
    // ========================

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_visible = !self.sidebar_visible;
        if self.sidebar_visible {
            self.active_panel = Panel::Catalog;
        } else if self.active_panel == Panel::Catalog {
            self.active_panel = Panel::Url;
        }
    }

    pub fn next_catalog_entry(&mut self) {
        let count = self.catalog.entry_count();
        if count > 0 {
            self.selected_entry = (self.selected_entry + 1) % count;
        }
    }

    pub fn prev_catalog_entry(&mut self) {
        let count = self.catalog.entry_count();
        if count > 0 {
            self.selected_entry = self.selected_entry.checked_sub(1).unwrap_or(count - 1);
        }
    }

    /// Fill the draft's method and URL from the selected catalog entry.
    /// Body and headers panes are left untouched. A method token outside
    /// the supported verb set leaves the draft method unchanged.
    pub fn select_catalog_entry(&mut self) {
        let Some((_, entry)) = self.catalog.entry_at(self.selected_entry) else {
            return;
        };
        let method_token = entry.method.clone();
        let url = entry.url.clone();

        match HttpMethod::parse(&method_token) {
            Some(method) => {
                self.draft.method = method;
                self.notification = None;
            }
            None => {
                self.notification = Some(Notification::error(format!(
                    "Unsupported method '{}' in catalog entry",
                    method_token
                )));
            }
        }

        self.draft.url = url;
        self.cursor_position = self.draft.url.len();
        self.active_panel = Panel::Url;
    }

    // ========================
    // Help popup
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }

    // ========================
    // Request sending
    // ========================

    /// Build the execute command for the current draft. At most one request
    /// is in flight: a submission while one is pending is rejected with an
    /// error notification, never queued.
    pub fn prepare_request(&mut self) -> Option<NetworkCommand> {
        if self.is_loading {
            self.notification = Some(Notification::error(
                "A request is already in flight (Ctrl+X to cancel)",
            ));
            return None;
        }

        self.is_loading = true;
        self.view.body = String::from("Loading...");
        self.view.headers = String::new();
        self.view.status_code = None;
        self.view.status_phrase = String::new();
        self.notification = None;

        let id = self.next_id();
        self.pending_request_id = Some(id);

        Some(NetworkCommand::Execute {
            id,
            request: self.draft.clone(),
        })
    }

    /// Cancel the current pending request
    pub fn cancel_request(&mut self) -> Option<NetworkCommand> {
        self.pending_request_id.map(NetworkCommand::Cancel)
    }

    // ========================
    // Response handling
    // ========================

    /// Route a network response into the display slots. Responses whose id
    /// does not match the pending request are stale - a cancelled or
    /// superseded submission - and are discarded so they never overwrite
    /// newer state.
    pub fn handle_response(&mut self, response: NetworkResponse) {
        if self.pending_request_id != Some(response.id()) {
            tracing::debug!(id = response.id(), "Discarding stale response");
            return;
        }

        match response {
            NetworkResponse::Completed {
                result, time_ms, ..
            } => {
                self.notification = Some(notification_for(&result));
                self.view = response_view(result, time_ms);
                self.finalize_request();
            }
            NetworkResponse::Cancelled { .. } => {
                self.view.body = String::from("Request cancelled");
                self.view.headers = String::new();
                self.view.status_code = None;
                self.view.status_phrase = String::new();
                self.view.time_ms = 0;
                self.notification = Some(Notification::info("Request cancelled"));
                self.finalize_request();
            }
        }
    }

    /// Text of whichever response slot is focused, byte-for-byte. Outside
    /// the response panes the body slot is the copy target.
    pub fn copy_active_view(&self) -> &str {
        match self.active_panel {
            Panel::ResponseHeaders => &self.view.headers,
            _ => &self.view.body,
        }
    }

    /// Reset per-request state after a terminal response
    fn finalize_request(&mut self) {
        self.is_loading = false;
        self.pending_request_id = None;
        self.response_scroll = 0;
        self.headers_scroll = 0;
    }
}

fn closing_pair(c: char) -> Option<char> {
    match c {
        '"' => Some('"'),
        '(' => Some(')'),
        '{' => Some('}'),
        '[' => Some(']'),
        _ => None,
    }
}

fn notification_for(result: &ResponseResult) -> Notification {
    match &result.outcome {
        Outcome::Success => {
            let code = result.status_code.unwrap_or_default();
            Notification::info(format!("{} {}", code, result.status_phrase))
        }
        Outcome::HttpError { code } => {
            Notification::error(format!("HTTP {} {}", code, result.status_phrase))
        }
        Outcome::TransportError { message } => Notification::error(message.clone()),
        Outcome::InvalidUrl { message } => Notification::error(message.clone()),
    }
}

/// Build the display slots out of a classified result
fn response_view(result: ResponseResult, time_ms: u64) -> ResponseView {
    ResponseView {
        headers: format_header_lines(&result.headers),
        body: result.body_text,
        status_code: result.status_code,
        status_phrase: result.status_phrase,
        time_ms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::messages::render::Severity;
    use crate::models::Outcome;

    const CATALOG_TEXT: &str = r#"
[[pokemon]]
request: GET https://pokeapi.co/api/v2/pokemon/ditto
request: BREW https://example.com/coffee

[[personal]]
request: POST http://localhost:8000/items
"#;

    fn state_with_catalog() -> AppState {
        AppState::new(Catalog::parse(CATALOG_TEXT))
    }

    fn success_result(body: &str) -> ResponseResult {
        ResponseResult {
            status_code: Some(200),
            status_phrase: "OK".to_string(),
            body_text: body.to_string(),
            headers: vec![
                ("content-type".to_string(), "application/json".to_string()),
                ("x-request-id".to_string(), "abc".to_string()),
            ],
            outcome: Outcome::Success,
        }
    }

    fn completed(id: u64, result: ResponseResult) -> NetworkResponse {
        NetworkResponse::Completed {
            id,
            result,
            time_ms: 12,
        }
    }

    #[test]
    fn select_catalog_entry_copies_method_and_url_only() {
        let mut state = state_with_catalog();
        state.draft.body = String::from("{\"keep\": true}");
        let headers_before = state.draft.headers.len();

        state.selected_entry = 2; // POST http://localhost:8000/items
        state.select_catalog_entry();

        assert_eq!(state.draft.method, HttpMethod::POST);
        assert_eq!(state.draft.url, "http://localhost:8000/items");
        assert_eq!(state.draft.body, "{\"keep\": true}");
        assert_eq!(state.draft.headers.len(), headers_before);
        assert_eq!(state.active_panel, Panel::Url);
    }

    #[test]
    fn unsupported_catalog_method_keeps_draft_method_and_warns() {
        let mut state = state_with_catalog();
        state.selected_entry = 1; // BREW entry
        state.select_catalog_entry();

        assert_eq!(state.draft.method, HttpMethod::GET);
        assert_eq!(state.draft.url, "https://example.com/coffee");
        let notification = state.notification.expect("warning expected");
        assert_eq!(notification.severity, Severity::Error);
        assert!(notification.text.contains("BREW"));
    }

    #[test]
    fn second_submission_while_in_flight_is_rejected() {
        let mut state = state_with_catalog();

        let first = state.prepare_request();
        assert!(first.is_some());

        let second = state.prepare_request();
        assert!(second.is_none());
        let notification = state.notification.expect("rejection must be observable");
        assert_eq!(notification.severity, Severity::Error);
        assert!(notification.text.contains("in flight"));
    }

    #[test]
    fn stale_response_never_overwrites_pending_state() {
        let mut state = state_with_catalog();
        let Some(NetworkCommand::Execute { id, .. }) = state.prepare_request() else {
            panic!("expected execute command");
        };

        state.handle_response(completed(id + 999, success_result("{\"stale\": true}")));
        assert!(state.is_loading);
        assert_ne!(state.view.body, "{\"stale\": true}");

        state.handle_response(completed(id, success_result("{\"fresh\": true}")));
        assert!(!state.is_loading);
        assert_eq!(state.view.body, "{\"fresh\": true}");
    }

    #[test]
    fn out_of_order_completion_reflects_only_newest_submission() {
        let mut state = state_with_catalog();

        // first request goes out, gets cancelled
        let Some(NetworkCommand::Execute { id: first_id, .. }) = state.prepare_request() else {
            panic!("expected execute command");
        };
        assert!(matches!(
            state.cancel_request(),
            Some(NetworkCommand::Cancel(id)) if id == first_id
        ));
        state.handle_response(NetworkResponse::Cancelled { id: first_id });
        assert!(!state.is_loading);

        // second request goes out
        let Some(NetworkCommand::Execute { id: second_id, .. }) = state.prepare_request() else {
            panic!("expected execute command");
        };

        // the first request's late completion must be dropped
        state.handle_response(completed(first_id, success_result("{\"old\": 1}")));
        assert!(state.is_loading);
        assert_ne!(state.view.body, "{\"old\": 1}");

        state.handle_response(completed(second_id, success_result("{\"new\": 2}")));
        assert_eq!(state.view.body, "{\"new\": 2}");
    }

    #[test]
    fn completed_response_fans_out_to_both_slots_and_notification() {
        let mut state = state_with_catalog();
        let Some(NetworkCommand::Execute { id, .. }) = state.prepare_request() else {
            panic!("expected execute command");
        };

        state.handle_response(completed(id, success_result("{\n  \"a\": 1\n}")));

        assert_eq!(state.view.body, "{\n  \"a\": 1\n}");
        assert_eq!(
            state.view.headers,
            "content-type: application/json\nx-request-id: abc"
        );
        assert_eq!(state.view.status_code, Some(200));
        let notification = state.notification.expect("status notification expected");
        assert_eq!(notification.severity, Severity::Info);
        assert_eq!(notification.text, "200 OK");
    }

    #[test]
    fn http_error_notification_carries_code_and_phrase() {
        let mut state = state_with_catalog();
        let Some(NetworkCommand::Execute { id, .. }) = state.prepare_request() else {
            panic!("expected execute command");
        };

        let result = ResponseResult {
            status_code: Some(404),
            status_phrase: "Not Found".to_string(),
            body_text: "{\n  \"error\": \"missing\"\n}".to_string(),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            outcome: Outcome::HttpError { code: 404 },
        };
        state.handle_response(completed(id, result));

        let notification = state.notification.unwrap();
        assert_eq!(notification.severity, Severity::Error);
        assert_eq!(notification.text, "HTTP 404 Not Found");
        // the payload is still shown for diagnosis
        assert!(state.view.body.contains("missing"));
    }

    #[test]
    fn copy_active_view_returns_focused_slot_byte_for_byte() {
        let mut state = state_with_catalog();
        state.view.body = String::from("{\n  \"a\": 1\n}");
        state.view.headers = String::from("content-type: application/json");

        state.active_panel = Panel::Response;
        assert_eq!(state.copy_active_view(), "{\n  \"a\": 1\n}");

        state.active_panel = Panel::ResponseHeaders;
        assert_eq!(state.copy_active_view(), "content-type: application/json");

        // outside the response panes the body slot is the copy target
        state.active_panel = Panel::Url;
        assert_eq!(state.copy_active_view(), "{\n  \"a\": 1\n}");
    }

    #[test]
    fn body_editor_auto_closes_pairs() {
        let mut state = state_with_catalog();
        state.active_panel = Panel::Body;
        state.start_editing();

        state.enter_char('{');
        assert_eq!(state.draft.body, "{}");
        assert_eq!(state.cursor_position, 1);

        state.enter_char('"');
        assert_eq!(state.draft.body, "{\"\"}");
        assert_eq!(state.cursor_position, 2);
    }

    #[test]
    fn url_editor_does_not_auto_close() {
        let mut state = state_with_catalog();
        state.active_panel = Panel::Url;
        state.draft.url.clear();
        state.start_editing();
        state.cursor_position = 0;

        state.enter_char('(');
        assert_eq!(state.draft.url, "(");
    }

    #[test]
    fn toggle_sidebar_moves_focus_with_it() {
        let mut state = AppState::new(Catalog::default());
        assert!(!state.sidebar_visible);

        state.toggle_sidebar();
        assert!(state.sidebar_visible);
        assert_eq!(state.active_panel, Panel::Catalog);

        state.toggle_sidebar();
        assert!(!state.sidebar_visible);
        assert_eq!(state.active_panel, Panel::Url);
    }

    #[test]
    fn panel_cycle_skips_hidden_sidebar() {
        let mut state = AppState::new(Catalog::default());
        state.active_panel = Panel::ResponseHeaders;
        state.next_panel();
        assert_eq!(state.active_panel, Panel::Url);

        state.sidebar_visible = true;
        state.active_panel = Panel::ResponseHeaders;
        state.next_panel();
        assert_eq!(state.active_panel, Panel::Catalog);
    }

    #[test]
    fn catalog_selection_wraps_in_both_directions() {
        let mut state = state_with_catalog();
        assert_eq!(state.catalog.entry_count(), 3);

        state.prev_catalog_entry();
        assert_eq!(state.selected_entry, 2);
        state.next_catalog_entry();
        assert_eq!(state.selected_entry, 0);
    }
}
