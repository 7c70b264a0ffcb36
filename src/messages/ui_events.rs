//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Events generated from user input in the UI layer
#[derive(Debug, Clone)]
pub enum UiEvent {
    // Panel navigation
    NextPanel,
    PrevPanel,
    ScrollUp,
    ScrollDown,

    // Input editing
    StartEditing,
    StopEditing,
    CharInput(char),
    Backspace,
    CursorLeft,
    CursorRight,

    // HTTP Request actions
    SendRequest,
    CancelRequest,
    CycleMethod,

    // Headers
    NextHeader,
    PrevHeader,
    ToggleHeader,
    AddHeader,
    DeleteHeader,

    // Saved-request sidebar
    ToggleSidebar,
    NextCatalogEntry,
    PrevCatalogEntry,
    SelectCatalogEntry,

    // Clipboard
    CopyActiveView,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Active panel in the UI (needed for context-aware event mapping)
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Panel {
    Url,
    Body,
    Headers,
    Response,
    ResponseHeaders,
    Catalog,
}

impl Panel {
    pub fn next(&self) -> Panel {
        match self {
            Panel::Url => Panel::Body,
            Panel::Body => Panel::Headers,
            Panel::Headers => Panel::Response,
            Panel::Response => Panel::ResponseHeaders,
            Panel::ResponseHeaders => Panel::Catalog,
            Panel::Catalog => Panel::Url,
        }
    }

    pub fn prev(&self) -> Panel {
        match self {
            Panel::Url => Panel::Catalog,
            Panel::Body => Panel::Url,
            Panel::Headers => Panel::Body,
            Panel::Response => Panel::Headers,
            Panel::ResponseHeaders => Panel::Response,
            Panel::Catalog => Panel::ResponseHeaders,
        }
    }
}

/// Input mode
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum InputMode {
    Normal,
    Editing,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(
    key: KeyEvent,
    active_panel: Panel,
    input_mode: InputMode,
    show_help: bool,
) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    // Global Ctrl shortcuts
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('x') => return Some(UiEvent::CancelRequest),
            KeyCode::Char('c') => return Some(UiEvent::Quit),
            _ => {}
        }
    }

    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    match input_mode {
        InputMode::Normal => match key.code {
            KeyCode::Char('q') => Some(UiEvent::Quit),
            KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
            KeyCode::Tab => Some(UiEvent::NextPanel),
            KeyCode::BackTab => Some(UiEvent::PrevPanel),
            KeyCode::Char('e') | KeyCode::Enter => match active_panel {
                Panel::Url | Panel::Body => Some(UiEvent::StartEditing),
                Panel::Headers => Some(UiEvent::ToggleHeader),
                Panel::Catalog => Some(UiEvent::SelectCatalogEntry),
                Panel::Response | Panel::ResponseHeaders => None,
            },
            KeyCode::Char('m') => Some(UiEvent::CycleMethod),
            KeyCode::Char('s') => Some(UiEvent::SendRequest),
            KeyCode::Char('c') => Some(UiEvent::CopyActiveView),
            KeyCode::Char('b') => Some(UiEvent::ToggleSidebar),
            KeyCode::Up => match active_panel {
                Panel::Headers => Some(UiEvent::PrevHeader),
                Panel::Response | Panel::ResponseHeaders => Some(UiEvent::ScrollUp),
                Panel::Catalog => Some(UiEvent::PrevCatalogEntry),
                _ => None,
            },
            KeyCode::Down => match active_panel {
                Panel::Headers => Some(UiEvent::NextHeader),
                Panel::Response | Panel::ResponseHeaders => Some(UiEvent::ScrollDown),
                Panel::Catalog => Some(UiEvent::NextCatalogEntry),
                _ => None,
            },
            KeyCode::Char('a') if active_panel == Panel::Headers => Some(UiEvent::AddHeader),
            KeyCode::Char('d') if active_panel == Panel::Headers => Some(UiEvent::DeleteHeader),
            _ => None,
        },
        InputMode::Editing => match key.code {
            KeyCode::Esc => Some(UiEvent::StopEditing),
            KeyCode::Left => Some(UiEvent::CursorLeft),
            KeyCode::Right => Some(UiEvent::CursorRight),
            KeyCode::Backspace => Some(UiEvent::Backspace),
            KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
            KeyCode::Enter => {
                if active_panel == Panel::Url {
                    Some(UiEvent::SendRequest)
                } else {
                    Some(UiEvent::StopEditing)
                }
            }
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyEventKind, KeyEventState};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn enter_in_url_editing_sends_the_request() {
        let event = key_to_ui_event(press(KeyCode::Enter), Panel::Url, InputMode::Editing, false);
        assert!(matches!(event, Some(UiEvent::SendRequest)));
    }

    #[test]
    fn enter_in_catalog_selects_the_entry() {
        let event = key_to_ui_event(press(KeyCode::Enter), Panel::Catalog, InputMode::Normal, false);
        assert!(matches!(event, Some(UiEvent::SelectCatalogEntry)));
    }

    #[test]
    fn any_key_closes_help() {
        let event = key_to_ui_event(press(KeyCode::Char('z')), Panel::Url, InputMode::Normal, true);
        assert!(matches!(event, Some(UiEvent::CloseHelp)));
    }

    #[test]
    fn panel_cycle_is_closed() {
        let mut panel = Panel::Url;
        for _ in 0..6 {
            panel = panel.next();
        }
        assert_eq!(panel, Panel::Url);
        assert_eq!(Panel::Url.prev(), Panel::Catalog);
    }
}
