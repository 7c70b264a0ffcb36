//! Transport capability - the swappable mechanism that performs the actual
//! network exchange. The dispatcher only depends on the `Transport` trait;
//! `HttpTransport` is the reqwest-backed production implementation.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use crate::models::{Header, HttpMethod};

/// Everything the transport needs to perform one exchange
#[derive(Clone, Debug)]
pub struct TransportCall {
    pub method: HttpMethod,
    pub url: String,
    pub body: Option<String>,
    pub headers: Vec<Header>,
}

/// Raw result of a completed exchange, before classification
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransportReply {
    pub status: u16,
    /// Server-supplied order preserved
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// Transport-level failure: no usable HTTP exchange took place
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransportFailure {
    Timeout,
    Connect(String),
    Other(String),
}

impl fmt::Display for TransportFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportFailure::Timeout => write!(f, "Request timed out"),
            TransportFailure::Connect(msg) => write!(f, "Connection failed: {}", msg),
            TransportFailure::Other(msg) => write!(f, "Request failed: {}", msg),
        }
    }
}

/// External transport capability. Any HTTP client that can answer a
/// `TransportCall` satisfies this; tests substitute stubs.
pub trait Transport {
    fn execute(
        &self,
        call: TransportCall,
    ) -> impl Future<Output = Result<TransportReply, TransportFailure>> + Send;
}

/// Production transport over a shared reqwest client
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        HttpTransport { client }
    }
}

impl Transport for HttpTransport {
    fn execute(
        &self,
        call: TransportCall,
    ) -> impl Future<Output = Result<TransportReply, TransportFailure>> + Send {
        let client = self.client.clone();
        async move {
            let mut builder = match call.method {
                HttpMethod::GET => client.get(&call.url),
                HttpMethod::POST => client.post(&call.url),
                HttpMethod::PUT => client.put(&call.url),
                HttpMethod::DELETE => client.delete(&call.url),
                HttpMethod::OPTIONS => client.request(reqwest::Method::OPTIONS, &call.url),
            };

            for header in &call.headers {
                if header.enabled {
                    builder = builder.header(&header.key, &header.value);
                }
            }

            if let Some(body) = call.body {
                builder = builder.body(body);
            }

            let resp = builder.send().await.map_err(classify_send_error)?;

            let status = resp.status().as_u16();
            let headers = resp
                .headers()
                .iter()
                .map(|(name, value)| {
                    (
                        name.to_string(),
                        String::from_utf8_lossy(value.as_bytes()).to_string(),
                    )
                })
                .collect();
            let body = resp
                .text()
                .await
                .map_err(|e| TransportFailure::Other(format!("Error reading body: {}", e)))?;

            Ok(TransportReply {
                status,
                headers,
                body,
            })
        }
    }
}

fn classify_send_error(e: reqwest::Error) -> TransportFailure {
    if e.is_timeout() {
        TransportFailure::Timeout
    } else if e.is_connect() {
        TransportFailure::Connect(e.to_string())
    } else {
        TransportFailure::Other(e.to_string())
    }
}
