//! Hub engine
//!
//! This module contains the in-memory hub implementation responsible for:
//! - tracking the set of connected sessions
//! - fanning each broadcast message out to every session's outbound queue
//! - evicting sessions whose outbound queue is full or closed
//!
//! Concurrency and usage notes:
//! - The [`Hub`] value is consumed by its own `run` task; nothing else can
//!   touch the membership set. All other components interact with it
//!   through a cloned [`HubHandle`], which feeds one bounded event channel.
//! - Events are processed strictly one at a time, so register, unregister,
//!   and broadcast are totally ordered relative to each other and the
//!   membership map needs no lock.
//! - Fan-out never waits on a receiver: a full or closed outbound queue is
//!   treated as that session's failure, and the session is evicted on the
//!   spot. Delivery to other sessions is unaffected.

use std::collections::HashMap;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, info, warn};

use crate::hub::message::Message;
use crate::session::{SessionHandle, SessionId};

/// One event accepted by the hub's serialized loop.
#[derive(Debug)]
pub enum HubEvent {
    /// A freshly-connected session joins the membership set.
    Register(SessionHandle),
    /// A session leaves. Duplicate or late unregistration is a no-op.
    Unregister(SessionId),
    /// A stamped message to deliver to every connected session.
    Broadcast(Message),
}

/// Single authority over session membership and message fan-out.
///
/// Owns the membership map outright; the only way in is a [`HubHandle`].
#[derive(Debug)]
pub struct Hub {
    pub sessions: HashMap<SessionId, SessionHandle>,
    events: mpsc::Receiver<HubEvent>,
}

/// Cloneable sender half used by sessions and the transport to reach the hub.
#[derive(Debug, Clone)]
pub struct HubHandle {
    events: mpsc::Sender<HubEvent>,
}

impl Hub {
    /// Creates a hub and the handle used to feed it events.
    ///
    /// `event_buffer` bounds the shared event channel; producers suspend
    /// when the hub is momentarily saturated, which is acceptable
    /// backpressure into the single serialization point.
    pub fn new(event_buffer: usize) -> (Self, HubHandle) {
        let (tx, rx) = mpsc::channel(event_buffer);
        (
            Self {
                sessions: HashMap::new(),
                events: rx,
            },
            HubHandle { events: tx },
        )
    }

    /// Runs the event loop until every [`HubHandle`] has been dropped.
    ///
    /// Exactly one event is handled to completion before the next is
    /// considered; this total order is the hub's only synchronization.
    pub async fn run(mut self) {
        while let Some(event) = self.events.recv().await {
            match event {
                HubEvent::Register(session) => self.register(session),
                HubEvent::Unregister(id) => self.unregister(&id),
                HubEvent::Broadcast(message) => self.broadcast(message),
            }
        }
        info!("hub stopped: all handles dropped");
    }

    /// Adds a session to the membership set.
    pub fn register(&mut self, session: SessionHandle) {
        info!(
            "client registered: {} ({} connected)",
            session.username,
            self.sessions.len() + 1
        );
        self.sessions.insert(session.id.clone(), session);
    }

    /// Removes a session if present, closing its outbound queue.
    ///
    /// The map holds the only sender for the session's queue, so removal
    /// and queue closure are one atomic step: no broadcast can observe a
    /// registered session with a closed queue or vice versa. Unregistering
    /// an absent session is a no-op; both the inbound-termination path and
    /// the queue-full path may ask for the same session.
    pub fn unregister(&mut self, id: &SessionId) {
        if let Some(session) = self.sessions.remove(id) {
            info!(
                "client unregistered: {} ({} connected)",
                session.username,
                self.sessions.len()
            );
        }
    }

    /// Attempts delivery of `message` to every connected session.
    ///
    /// Each delivery is a non-blocking `try_send`. A session whose queue is
    /// full (consumer too slow) or closed (write pump gone) is evicted
    /// after the sweep; it never delays or affects the others, and nothing
    /// is retried.
    pub fn broadcast(&mut self, message: Message) {
        let mut evicted: Vec<SessionId> = Vec::new();
        for (id, session) in &self.sessions {
            match session.sender.try_send(message.clone()) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    warn!(
                        "outbound queue full for {} ({}), evicting",
                        session.username, id
                    );
                    evicted.push(id.clone());
                }
                Err(TrySendError::Closed(_)) => {
                    debug!(
                        "outbound queue closed for {} ({}), evicting",
                        session.username, id
                    );
                    evicted.push(id.clone());
                }
            }
        }
        for id in &evicted {
            self.unregister(id);
        }
    }
}

impl HubHandle {
    /// Submits a registration event. See [`Hub::register`].
    pub async fn register(&self, session: SessionHandle) {
        self.send(HubEvent::Register(session)).await;
    }

    /// Submits an unregistration event. See [`Hub::unregister`].
    pub async fn unregister(&self, id: SessionId) {
        self.send(HubEvent::Unregister(id)).await;
    }

    /// Submits a message for fan-out. See [`Hub::broadcast`].
    ///
    /// May suspend while the hub drains other producers' submissions.
    pub async fn broadcast(&self, message: Message) {
        self.send(HubEvent::Broadcast(message)).await;
    }

    // A torn-down hub (process shutdown) must not panic late senders; the
    // event is dropped and logged instead.
    async fn send(&self, event: HubEvent) {
        if self.events.send(event).await.is_err() {
            warn!("hub is gone; dropping event");
        }
    }
}
