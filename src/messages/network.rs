//! Network messages - communication between App and Network layers

use crate::models::{Request, ResponseResult};

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Execute an HTTP request
    Execute { id: u64, request: Request },
    /// Cancel a pending request
    Cancel(u64),
    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer. Exactly one terminal
/// response is delivered per request id.
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    /// The dispatch finished; the result is already classified
    Completed {
        id: u64,
        result: ResponseResult,
        time_ms: u64,
    },
    /// Request was cancelled before the transport answered
    Cancelled { id: u64 },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::Completed { id, .. } => *id,
            NetworkResponse::Cancelled { id } => *id,
        }
    }
}
