//! Inbound dispatch.
//!
//! One entry point per inbound event: serializes turns per address (FIFO),
//! runs the orchestrator, delivers replies over the transport, and acts as
//! the catch-all error boundary. Delivery failures are logged only; by the
//! time delivery runs the turn's state is already committed.

use std::sync::Arc;

use dashmap::DashMap;
use frontdesk_core::{Address, InboundMessage};
use metrics::counter;
use tokio::sync::Mutex;
use tracing::{debug, error, instrument, warn};

use crate::errors::RuntimeError;
use crate::orchestrator::Orchestrator;
use crate::transport::Transport;

/// Last-resort reply when a turn fails past every recovery path.
pub const APOLOGY_REPLY: &str =
    "😓 Sorry, something went wrong on our side. Please try again in a moment.";

/// Per-address serialized dispatch over an [`Orchestrator`] and a
/// [`Transport`].
pub struct Dispatcher {
    orchestrator: Arc<Orchestrator>,
    transport: Arc<dyn Transport>,
    /// One mutex per address with in-flight or recent traffic; pruned
    /// opportunistically after each turn.
    turn_locks: DashMap<Address, Arc<Mutex<()>>>,
}

impl Dispatcher {
    /// Wire an orchestrator to a transport.
    pub fn new(orchestrator: Arc<Orchestrator>, transport: Arc<dyn Transport>) -> Self {
        Self {
            orchestrator,
            transport,
            turn_locks: DashMap::new(),
        }
    }

    /// Handle one inbound event end to end.
    ///
    /// Turns for the same address run strictly one at a time, in arrival
    /// order at the lock; different addresses proceed concurrently. Never
    /// returns an error: validation drops are silent, anything else is
    /// answered with [`APOLOGY_REPLY`].
    #[instrument(skip(self, event), fields(address = %event.address))]
    pub async fn dispatch(&self, event: InboundMessage) {
        counter!("frontdesk_messages_total").increment(1);

        // Delivery happens under the per-address lock too, so replies for
        // one address always reach the transport in turn order.
        {
            let lock = {
                let entry = self.turn_locks.entry(event.address.clone()).or_default();
                Arc::clone(entry.value())
            };
            let _guard = lock.lock().await;

            let replies = match self.orchestrator.take_turn(&event).await {
                Ok(turn) => {
                    debug!(state = ?turn.state, replies = turn.replies.len(), "turn complete");
                    turn.replies
                }
                Err(RuntimeError::Validation(reason)) => {
                    debug!(reason, "dropping inbound event");
                    Vec::new()
                }
                Err(err) => {
                    error!(error = %err, "turn failed");
                    counter!("frontdesk_turn_failures_total").increment(1);
                    vec![APOLOGY_REPLY.to_owned()]
                }
            };

            counter!("frontdesk_replies_total").increment(replies.len() as u64);
            for reply in &replies {
                if let Err(err) = self.transport.deliver(&event.address, reply).await {
                    warn!(error = %err, "delivery failed");
                }
            }
        }

        self.prune_turn_locks();
    }

    /// Drop lock entries nobody holds. The caller's own clone keeps its
    /// entry alive, so this only sheds other addresses' stale entries.
    fn prune_turn_locks(&self) {
        self.turn_locks
            .retain(|_, lock| Arc::strong_count(lock) > 1);
    }
}
