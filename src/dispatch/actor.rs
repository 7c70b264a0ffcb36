//! Network actor - runs request dispatches in the Tokio async runtime

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinSet;

use crate::dispatch::dispatcher::Dispatcher;
use crate::dispatch::transport::HttpTransport;
use crate::messages::{NetworkCommand, NetworkResponse};

/// Network actor that processes execute and cancel commands. At most one
/// request is in flight per id; the app layer enforces one id at a time.
pub struct NetworkActor {
    dispatcher: Dispatcher<HttpTransport>,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    in_flight: JoinSet<()>,
    cancel_handles: HashMap<u64, oneshot::Sender<()>>,
}

impl NetworkActor {
    pub fn new(response_tx: mpsc::UnboundedSender<NetworkResponse>, timeout: Duration) -> Self {
        NetworkActor {
            dispatcher: Dispatcher::new(HttpTransport::new(timeout)),
            response_tx,
            in_flight: JoinSet::new(),
            cancel_handles: HashMap::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::Execute { id, request }) => {
                            let (cancel_tx, mut cancel_rx) = oneshot::channel();
                            self.cancel_handles.insert(id, cancel_tx);

                            let response_tx = self.response_tx.clone();
                            let dispatcher = self.dispatcher.clone();

                            self.in_flight.spawn(async move {
                                tracing::info!(id, method = ?request.method, url = %request.url, "Executing request");
                                let start = Instant::now();
                                tokio::select! {
                                    biased;

                                    _ = &mut cancel_rx => {
                                        let _ = response_tx.send(NetworkResponse::Cancelled { id });
                                    }
                                    result = dispatcher.dispatch(&request) => {
                                        let time_ms = start.elapsed().as_millis() as u64;
                                        tracing::info!(id, status = ?result.status_code, time_ms, "Request completed");
                                        let _ = response_tx.send(NetworkResponse::Completed { id, result, time_ms });
                                    }
                                }
                            });
                        }

                        Some(NetworkCommand::Cancel(id)) => {
                            if let Some(cancel_tx) = self.cancel_handles.remove(&id) {
                                tracing::info!(id, "Cancelling request");
                                let _ = cancel_tx.send(());
                            }
                        }

                        Some(NetworkCommand::Shutdown) => {
                            for (_, cancel_tx) in self.cancel_handles.drain() {
                                let _ = cancel_tx.send(());
                            }
                            break;
                        }

                        None => break,
                    }
                }

                // Clean up completed tasks
                Some(_result) = self.in_flight.join_next() => {}
            }
        }
    }
}
