//! Dispatch layer - request execution and outcome classification
//!
//! The Network actor receives execute/cancel commands and sends back
//! classified results.

pub mod actor;
pub mod dispatcher;
pub mod transport;

pub use actor::NetworkActor;
pub use dispatcher::Dispatcher;
pub use transport::{HttpTransport, Transport, TransportCall, TransportFailure, TransportReply};
