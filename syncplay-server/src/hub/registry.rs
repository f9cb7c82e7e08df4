//! Connection registry and fan-out
//!
//! Maps live connection ids to their outbound channels. Delivery is
//! fire-and-forget: a send failure means the receiving task is gone, and
//! the connection is pruned on the spot. A slow or dead recipient never
//! blocks the dispatcher.

use std::collections::HashMap;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use syncplay_common::{ConnectionId, Recipients, ServerMessage};

/// The set of connections a broadcast fans out to.
#[derive(Default)]
pub struct ConnectionRegistry {
    connections: HashMap<ConnectionId, mpsc::UnboundedSender<ServerMessage>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connection's outbound channel.
    pub fn insert(&mut self, id: ConnectionId, outbound: mpsc::UnboundedSender<ServerMessage>) {
        self.connections.insert(id, outbound);
    }

    /// Remove a departed connection. Unknown ids are fine.
    pub fn remove(&mut self, id: ConnectionId) {
        self.connections.remove(&id);
    }

    /// Number of live connections.
    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    /// Deliver `message` to every connection in `recipients`, pruning
    /// connections whose receiving task has gone away. Returns the number
    /// of successful deliveries.
    pub fn publish(&mut self, recipients: Recipients, message: &ServerMessage) -> usize {
        let mut delivered = 0;
        let mut dead = Vec::new();

        for (&id, outbound) in &self.connections {
            if !recipients.includes(id) {
                continue;
            }
            if outbound.send(message.clone()).is_ok() {
                delivered += 1;
            } else {
                dead.push(id);
            }
        }

        for id in dead {
            warn!("Dropping dead connection {}", id);
            self.connections.remove(&id);
        }

        debug!(
            "Published {} to {} connection(s)",
            message.message_type(),
            delivered
        );
        delivered
    }
}
