// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
// Event Bus - Pub/Sub for workflow lifecycle events
//
// In-memory event streaming over tokio broadcast channels. Subscribers are
// observers: publishing never blocks the workflow manager, and events are
// dropped once the channel buffer wraps.

use crate::domain::events::WorkflowEvent;
use crate::domain::request::RequestId;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Event bus for publishing and subscribing to workflow events.
#[derive(Clone)]
pub struct EventBus {
    sender: Arc<broadcast::Sender<WorkflowEvent>>,
}

impl EventBus {
    /// Channel capacity bounds how many events buffer before old ones drop.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Default capacity: 1000 events.
    pub fn with_default_capacity() -> Self {
        Self::new(1000)
    }

    /// Publish an event to all subscribers. A bus with no subscribers is
    /// valid; the event is simply dropped.
    pub fn publish(&self, event: WorkflowEvent) {
        debug!(request_id = %event.request_id(), "publishing workflow event");
        let _ = self.sender.send(event);
    }

    /// Subscribe to all workflow events.
    pub fn subscribe(&self) -> EventReceiver {
        EventReceiver {
            receiver: self.sender.subscribe(),
        }
    }

    /// Subscribe to events for a single request.
    pub fn subscribe_request(&self, request_id: RequestId) -> RequestEventReceiver {
        RequestEventReceiver {
            receiver: self.sender.subscribe(),
            request_id,
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// Receiver for all workflow events.
pub struct EventReceiver {
    receiver: broadcast::Receiver<WorkflowEvent>,
}

impl EventReceiver {
    pub async fn recv(&mut self) -> Result<WorkflowEvent, EventBusError> {
        self.receiver.recv().await.map_err(|e| match e {
            broadcast::error::RecvError::Closed => EventBusError::Closed,
            broadcast::error::RecvError::Lagged(n) => {
                warn!("event receiver lagged by {n} events");
                EventBusError::Lagged(n)
            }
        })
    }

    pub fn try_recv(&mut self) -> Result<WorkflowEvent, EventBusError> {
        self.receiver.try_recv().map_err(|e| match e {
            broadcast::error::TryRecvError::Empty => EventBusError::Empty,
            broadcast::error::TryRecvError::Closed => EventBusError::Closed,
            broadcast::error::TryRecvError::Lagged(n) => EventBusError::Lagged(n),
        })
    }
}

/// Receiver filtered to a single request's events.
pub struct RequestEventReceiver {
    receiver: broadcast::Receiver<WorkflowEvent>,
    request_id: RequestId,
}

impl RequestEventReceiver {
    /// Receive the next event for the subscribed request, skipping others.
    pub async fn recv(&mut self) -> Result<WorkflowEvent, EventBusError> {
        loop {
            let event = self.receiver.recv().await.map_err(|e| match e {
                broadcast::error::RecvError::Closed => EventBusError::Closed,
                broadcast::error::RecvError::Lagged(n) => EventBusError::Lagged(n),
            })?;
            if event.request_id() == self.request_id {
                return Ok(event);
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EventBusError {
    #[error("Event bus channel closed")]
    Closed,
    #[error("Receiver lagged behind by {0} events")]
    Lagged(u64),
    #[error("No events available")]
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn received(request_id: RequestId) -> WorkflowEvent {
        WorkflowEvent::WorkflowReceived {
            request_id,
            priority: Default::default(),
            received_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn subscriber_sees_published_event() {
        let bus = EventBus::with_default_capacity();
        let mut receiver = bus.subscribe();

        let id = RequestId::new();
        bus.publish(received(id));

        let event = receiver.recv().await.unwrap();
        assert_eq!(event.request_id(), id);
    }

    #[tokio::test]
    async fn request_receiver_filters_other_requests() {
        let bus = EventBus::with_default_capacity();
        let wanted = RequestId::new();
        let mut receiver = bus.subscribe_request(wanted);

        bus.publish(received(RequestId::new()));
        bus.publish(received(wanted));

        let event = receiver.recv().await.unwrap();
        assert_eq!(event.request_id(), wanted);
    }

    #[test]
    fn publish_without_subscribers_is_fine() {
        let bus = EventBus::new(8);
        bus.publish(received(RequestId::new()));
        assert_eq!(bus.subscriber_count(), 0);
    }
}
