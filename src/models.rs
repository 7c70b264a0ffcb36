use serde::{Deserialize, Serialize};

/// HTTP Method enum
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    GET,
    POST,
    PUT,
    DELETE,
    OPTIONS,
}

impl HttpMethod {
    pub fn as_str(&self) -> &str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::DELETE => "DELETE",
            HttpMethod::OPTIONS => "OPTIONS",
        }
    }

    pub fn next(&self) -> HttpMethod {
        match self {
            HttpMethod::GET => HttpMethod::POST,
            HttpMethod::POST => HttpMethod::PUT,
            HttpMethod::PUT => HttpMethod::DELETE,
            HttpMethod::DELETE => HttpMethod::OPTIONS,
            HttpMethod::OPTIONS => HttpMethod::GET,
        }
    }

    /// Whether this verb carries the body pane's content when sent
    pub fn sends_body(&self) -> bool {
        matches!(self, HttpMethod::POST | HttpMethod::PUT)
    }

    /// Parse a method token. Returns None for anything outside the
    /// supported verb set; callers decide how to surface that.
    pub fn parse(token: &str) -> Option<HttpMethod> {
        match token.to_uppercase().as_str() {
            "GET" => Some(HttpMethod::GET),
            "POST" => Some(HttpMethod::POST),
            "PUT" => Some(HttpMethod::PUT),
            "DELETE" => Some(HttpMethod::DELETE),
            "OPTIONS" => Some(HttpMethod::OPTIONS),
            _ => None,
        }
    }
}

/// HTTP Header
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Header {
    pub key: String,
    pub value: String,
    pub enabled: bool,
}

impl Header {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Header {
            key: key.into(),
            value: value.into(),
            enabled: true,
        }
    }
}

/// A single HTTP request draft: everything needed to describe an outbound
/// request before it is sent. An empty or malformed `url` is a valid state;
/// the dispatcher classifies it rather than the type rejecting it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Request {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<Header>,
    /// Request payload, interpreted as JSON text when non-empty
    pub body: String,
}

impl Default for Request {
    fn default() -> Self {
        use crate::constants::DEFAULT_HTTP_URL;
        Request {
            method: HttpMethod::GET,
            url: String::from(DEFAULT_HTTP_URL),
            headers: vec![
                Header::new("Content-Type", "application/json"),
                Header::new("Accept", "application/json"),
            ],
            body: String::new(),
        }
    }
}

/// Exhaustive classification of one dispatch call. Replaces ordered catch
/// clauses: callers match on this instead of guessing at error shapes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// HTTP status in [200, 299]
    Success,
    /// The server answered with a status outside [200, 299]
    HttpError { code: u16 },
    /// No usable HTTP exchange: DNS, refused connection, timeout, or
    /// anything else unexpected at the transport level
    TransportError { message: String },
    /// The URL was empty or carried no http/https scheme; no network call
    /// was attempted
    InvalidUrl { message: String },
}

/// The complete, classified outcome of one dispatch call. Built once per
/// request, handed to the presentation layer, then discarded.
#[derive(Clone, Debug)]
pub struct ResponseResult {
    pub status_code: Option<u16>,
    pub status_phrase: String,
    pub body_text: String,
    /// Server-supplied order preserved
    pub headers: Vec<(String, String)>,
    pub outcome: Outcome,
}

impl ResponseResult {
    pub fn invalid_url(message: String) -> Self {
        ResponseResult {
            status_code: None,
            status_phrase: String::new(),
            body_text: message.clone(),
            headers: Vec::new(),
            outcome: Outcome::InvalidUrl { message },
        }
    }

    pub fn transport_error(message: String) -> Self {
        ResponseResult {
            status_code: None,
            status_phrase: String::new(),
            body_text: message.clone(),
            headers: Vec::new(),
            outcome: Outcome::TransportError { message },
        }
    }

}

/// Standard reason phrase for a status code, empty for codes without one
pub fn status_phrase(code: u16) -> &'static str {
    reqwest::StatusCode::from_u16(code)
        .ok()
        .and_then(|status| status.canonical_reason())
        .unwrap_or("")
}

/// Render headers as `name: value` lines, one per header, order preserved
pub fn format_header_lines(headers: &[(String, String)]) -> String {
    headers
        .iter()
        .map(|(name, value)| format!("{}: {}", name, value))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_cycle_covers_all_verbs() {
        let mut method = HttpMethod::GET;
        let mut seen = Vec::new();
        for _ in 0..5 {
            seen.push(method);
            method = method.next();
        }
        assert_eq!(method, HttpMethod::GET);
        assert_eq!(
            seen,
            vec![
                HttpMethod::GET,
                HttpMethod::POST,
                HttpMethod::PUT,
                HttpMethod::DELETE,
                HttpMethod::OPTIONS,
            ]
        );
    }

    #[test]
    fn parse_accepts_known_verbs_case_insensitively() {
        assert_eq!(HttpMethod::parse("get"), Some(HttpMethod::GET));
        assert_eq!(HttpMethod::parse("OPTIONS"), Some(HttpMethod::OPTIONS));
        assert_eq!(HttpMethod::parse("BREW"), None);
    }

    #[test]
    fn only_post_and_put_send_a_body() {
        assert!(HttpMethod::POST.sends_body());
        assert!(HttpMethod::PUT.sends_body());
        assert!(!HttpMethod::GET.sends_body());
        assert!(!HttpMethod::DELETE.sends_body());
        assert!(!HttpMethod::OPTIONS.sends_body());
    }

    #[test]
    fn status_phrase_uses_standard_table() {
        assert_eq!(status_phrase(200), "OK");
        assert_eq!(status_phrase(404), "Not Found");
        assert_eq!(status_phrase(599), "");
    }

    #[test]
    fn header_lines_preserve_order() {
        let headers = vec![
            ("b-second".to_string(), "2".to_string()),
            ("a-first".to_string(), "1".to_string()),
        ];
        assert_eq!(format_header_lines(&headers), "b-second: 2\na-first: 1");
    }
}
