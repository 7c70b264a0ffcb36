//! Request dispatcher - executes a request draft against the transport
//! capability and classifies the result.
//!
//! All five verbs share one code path: whether a body is attached comes from
//! `HttpMethod::sends_body`, and classification is uniform apart from the
//! OPTIONS success body. The dispatcher never fails across its boundary;
//! every outcome is a `ResponseResult` value.

use crate::dispatch::transport::{Transport, TransportCall, TransportReply};
use crate::models::{
    format_header_lines, status_phrase, HttpMethod, Outcome, Request, ResponseResult,
};

/// Stateless per call: holds only the transport it is given and retains
/// neither requests nor results.
#[derive(Clone)]
pub struct Dispatcher<T> {
    transport: T,
}

impl<T: Transport> Dispatcher<T> {
    pub fn new(transport: T) -> Self {
        Dispatcher { transport }
    }

    pub async fn dispatch(&self, request: &Request) -> ResponseResult {
        // The URL check runs before the transport is touched: clients fail
        // unpredictably on schema-less URLs, and callers must not depend on
        // a particular error shape for this case.
        if let Some(message) = invalid_url_reason(&request.url) {
            return ResponseResult::invalid_url(message);
        }

        let body = (request.method.sends_body() && !request.body.is_empty())
            .then(|| request.body.clone());
        let call = TransportCall {
            method: request.method,
            url: request.url.trim().to_string(),
            body,
            headers: request.headers.clone(),
        };

        match self.transport.execute(call).await {
            Ok(reply) => classify(request.method, reply),
            Err(failure) => ResponseResult::transport_error(failure.to_string()),
        }
    }
}

/// Why a URL cannot be dispatched, or None when it can
fn invalid_url_reason(url: &str) -> Option<String> {
    let url = url.trim();
    if url.is_empty() {
        return Some(String::from("Missing URL. Enter a URL before sending."));
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Some(format!(
            "URL has no http:// or https:// scheme: {}",
            url
        ));
    }
    None
}

fn classify(method: HttpMethod, reply: TransportReply) -> ResponseResult {
    let success = (200..=299).contains(&reply.status);

    let body_text = if success && method == HttpMethod::OPTIONS {
        options_body(&reply)
    } else {
        format_body(&reply.body)
    };

    let outcome = if success {
        Outcome::Success
    } else {
        Outcome::HttpError { code: reply.status }
    };

    ResponseResult {
        status_code: Some(reply.status),
        status_phrase: status_phrase(reply.status).to_string(),
        body_text,
        headers: reply.headers,
        outcome,
    }
}

/// Pretty-print JSON payloads, pass anything else through raw
fn format_body(raw: &str) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(raw) {
        serde_json::to_string_pretty(&json).unwrap_or_else(|_| raw.to_string())
    } else {
        raw.to_string()
    }
}

/// OPTIONS responses are about allowed verbs, so the body slot shows the
/// Access-Control-Allow-Methods value when the server sent one, and the
/// full header set otherwise.
fn options_body(reply: &TransportReply) -> String {
    reply
        .headers
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case("access-control-allow-methods"))
        .map(|(_, value)| value.clone())
        .unwrap_or_else(|| format_header_lines(&reply.headers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::transport::TransportFailure;
    use crate::models::Header;
    use std::future::Future;
    use std::sync::{Arc, Mutex};

    /// Test transport: records every call and answers with a canned result.
    /// Built with `never()` it panics on use, proving a code path does not
    /// reach the network.
    #[derive(Clone)]
    struct StubTransport {
        reply: Option<Result<TransportReply, TransportFailure>>,
        calls: Arc<Mutex<Vec<TransportCall>>>,
    }

    impl StubTransport {
        fn returning(reply: Result<TransportReply, TransportFailure>) -> Self {
            StubTransport {
                reply: Some(reply),
                calls: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn never() -> Self {
            StubTransport {
                reply: None,
                calls: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        fn last_call(&self) -> TransportCall {
            self.calls.lock().unwrap().last().cloned().unwrap()
        }
    }

    impl Transport for StubTransport {
        fn execute(
            &self,
            call: TransportCall,
        ) -> impl Future<Output = Result<TransportReply, TransportFailure>> + Send {
            let reply = self.reply.clone();
            let calls = self.calls.clone();
            async move {
                calls.lock().unwrap().push(call);
                reply.expect("transport must not be invoked for this request")
            }
        }
    }

    fn request(method: HttpMethod, url: &str) -> Request {
        Request {
            method,
            url: url.to_string(),
            ..Request::default()
        }
    }

    fn reply(status: u16, body: &str) -> TransportReply {
        TransportReply {
            status,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: body.to_string(),
        }
    }

    #[tokio::test]
    async fn empty_url_short_circuits_without_network_call() {
        let transport = StubTransport::never();
        let dispatcher = Dispatcher::new(transport.clone());

        let result = dispatcher.dispatch(&request(HttpMethod::GET, "")).await;

        assert!(matches!(result.outcome, Outcome::InvalidUrl { .. }));
        assert!(result.status_code.is_none());
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn schemeless_url_short_circuits_without_network_call() {
        let transport = StubTransport::never();
        let dispatcher = Dispatcher::new(transport.clone());

        let result = dispatcher
            .dispatch(&request(HttpMethod::GET, "example.com/items"))
            .await;

        match result.outcome {
            Outcome::InvalidUrl { message } => assert!(message.contains("scheme")),
            other => panic!("expected InvalidUrl, got {:?}", other),
        }
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn get_success_pretty_prints_json_and_preserves_header_order() {
        let transport = StubTransport::returning(Ok(TransportReply {
            status: 200,
            headers: vec![
                ("x-second-seen".to_string(), "b".to_string()),
                ("x-first-seen".to_string(), "a".to_string()),
            ],
            body: r#"{"a":1}"#.to_string(),
        }));
        let dispatcher = Dispatcher::new(transport);

        let result = dispatcher
            .dispatch(&request(HttpMethod::GET, "https://example.com/items"))
            .await;

        assert_eq!(result.outcome, Outcome::Success);
        assert_eq!(result.status_code, Some(200));
        assert_eq!(result.status_phrase, "OK");
        assert_eq!(result.body_text, "{\n  \"a\": 1\n}");
        assert_eq!(result.headers[0].0, "x-second-seen");
        assert_eq!(result.headers[1].0, "x-first-seen");
    }

    #[tokio::test]
    async fn non_json_payload_passes_through_raw() {
        let transport = StubTransport::returning(Ok(reply(200, "plain text here")));
        let dispatcher = Dispatcher::new(transport);

        let result = dispatcher
            .dispatch(&request(HttpMethod::GET, "https://example.com/"))
            .await;

        assert_eq!(result.body_text, "plain text here");
    }

    #[tokio::test]
    async fn http_error_keeps_payload_and_headers() {
        let transport = StubTransport::returning(Ok(reply(404, r#"{"error":"missing"}"#)));
        let dispatcher = Dispatcher::new(transport);

        let result = dispatcher
            .dispatch(&request(HttpMethod::GET, "https://example.com/gone"))
            .await;

        assert_eq!(result.outcome, Outcome::HttpError { code: 404 });
        assert_eq!(result.status_phrase, "Not Found");
        assert_eq!(result.body_text, "{\n  \"error\": \"missing\"\n}");
        assert!(!result.headers.is_empty());
    }

    #[tokio::test]
    async fn connection_failure_is_transport_error_never_http_error() {
        let transport = StubTransport::returning(Err(TransportFailure::Connect(
            "connection refused".to_string(),
        )));
        let dispatcher = Dispatcher::new(transport);

        let result = dispatcher
            .dispatch(&request(HttpMethod::GET, "http://localhost:1/"))
            .await;

        match result.outcome {
            Outcome::TransportError { message } => assert!(message.contains("connection refused")),
            other => panic!("expected TransportError, got {:?}", other),
        }
        assert!(result.status_code.is_none());
    }

    #[tokio::test]
    async fn timeout_is_transport_error() {
        let transport = StubTransport::returning(Err(TransportFailure::Timeout));
        let dispatcher = Dispatcher::new(transport);

        let result = dispatcher
            .dispatch(&request(HttpMethod::GET, "https://example.com/slow"))
            .await;

        assert!(matches!(result.outcome, Outcome::TransportError { .. }));
        assert!(result.body_text.contains("timed out"));
    }

    #[tokio::test]
    async fn post_sends_the_draft_body_once_verbatim() {
        let transport = StubTransport::returning(Ok(reply(201, "{}")));
        let dispatcher = Dispatcher::new(transport.clone());

        let mut draft = request(HttpMethod::POST, "https://example.com/items");
        draft.body = r#"{"name": "widget"}"#.to_string();
        dispatcher.dispatch(&draft).await;

        // Sent exactly as written, not re-encoded into a JSON string
        assert_eq!(transport.last_call().body.as_deref(), Some(r#"{"name": "widget"}"#));
    }

    #[tokio::test]
    async fn put_carries_a_body_and_delete_does_not() {
        let transport = StubTransport::returning(Ok(reply(200, "{}")));
        let dispatcher = Dispatcher::new(transport.clone());

        let mut draft = request(HttpMethod::PUT, "https://example.com/items/1");
        draft.body = r#"{"name": "renamed"}"#.to_string();
        dispatcher.dispatch(&draft).await;
        assert!(transport.last_call().body.is_some());

        let mut draft = request(HttpMethod::DELETE, "https://example.com/items/1");
        draft.body = r#"{"ignored": true}"#.to_string();
        dispatcher.dispatch(&draft).await;
        assert!(transport.last_call().body.is_none());
    }

    #[tokio::test]
    async fn get_never_carries_a_body() {
        let transport = StubTransport::returning(Ok(reply(200, "{}")));
        let dispatcher = Dispatcher::new(transport.clone());

        let mut draft = request(HttpMethod::GET, "https://example.com/items");
        draft.body = r#"{"stale": "body pane text"}"#.to_string();
        dispatcher.dispatch(&draft).await;

        assert!(transport.last_call().body.is_none());
    }

    #[tokio::test]
    async fn options_uses_allow_methods_header_as_body() {
        let transport = StubTransport::returning(Ok(TransportReply {
            status: 204,
            headers: vec![
                ("allow".to_string(), "GET, POST".to_string()),
                (
                    "Access-Control-Allow-Methods".to_string(),
                    "GET, POST, OPTIONS".to_string(),
                ),
            ],
            body: String::new(),
        }));
        let dispatcher = Dispatcher::new(transport);

        let result = dispatcher
            .dispatch(&request(HttpMethod::OPTIONS, "https://example.com/items"))
            .await;

        assert_eq!(result.body_text, "GET, POST, OPTIONS");
        // headers are always copied regardless of the body selection
        assert_eq!(result.headers.len(), 2);
    }

    #[tokio::test]
    async fn options_without_allow_methods_renders_all_headers() {
        let transport = StubTransport::returning(Ok(TransportReply {
            status: 200,
            headers: vec![
                ("allow".to_string(), "GET".to_string()),
                ("server".to_string(), "test".to_string()),
            ],
            body: String::new(),
        }));
        let dispatcher = Dispatcher::new(transport);

        let result = dispatcher
            .dispatch(&request(HttpMethod::OPTIONS, "https://example.com/items"))
            .await;

        assert_eq!(result.body_text, "allow: GET\nserver: test");
    }

    #[tokio::test]
    async fn options_error_response_keeps_payload_body() {
        let transport = StubTransport::returning(Ok(reply(405, r#"{"error":"nope"}"#)));
        let dispatcher = Dispatcher::new(transport);

        let result = dispatcher
            .dispatch(&request(HttpMethod::OPTIONS, "https://example.com/items"))
            .await;

        assert_eq!(result.outcome, Outcome::HttpError { code: 405 });
        assert_eq!(result.body_text, "{\n  \"error\": \"nope\"\n}");
    }

    #[tokio::test]
    async fn disabled_headers_are_not_sent() {
        let transport = StubTransport::returning(Ok(reply(200, "{}")));
        let dispatcher = Dispatcher::new(transport.clone());

        let mut draft = request(HttpMethod::GET, "https://example.com/");
        draft.headers = vec![
            Header::new("X-Active", "yes"),
            Header {
                key: "X-Disabled".to_string(),
                value: "no".to_string(),
                enabled: false,
            },
        ];
        dispatcher.dispatch(&draft).await;

        // the transport receives the full list and sends only enabled ones;
        // what matters here is the draft header order survives the call
        let call = transport.last_call();
        assert_eq!(call.headers.len(), 2);
        assert_eq!(call.headers[0].key, "X-Active");
    }
}
