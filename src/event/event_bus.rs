// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event bus for broadcasting home events.

use tokio::sync::broadcast;

use super::HomeEvent;

/// Default channel capacity for the event bus.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Largest channel capacity the event bus allocates.
pub const MAX_CHANNEL_CAPACITY: usize = 65_536;

/// Event bus for broadcasting home events to multiple subscribers.
///
/// Publishing never blocks and never fails: with no subscribers the event is
/// discarded, and a subscriber that falls more than the capacity behind
/// receives `RecvError::Lagged` and should re-render from the current state.
///
/// # Examples
///
/// ```
/// use smarthome_lib::event::{EventBus, HomeEvent};
///
/// let bus = EventBus::new();
/// let mut rx = bus.subscribe();
///
/// bus.publish(HomeEvent::device_added(0));
/// assert_eq!(rx.try_recv().unwrap(), HomeEvent::device_added(0));
/// ```
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<HomeEvent>,
}

impl EventBus {
    /// Creates a new event bus with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Creates a new event bus with the specified capacity.
    ///
    /// The capacity is clamped to `1..=MAX_CHANNEL_CAPACITY`.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.clamp(1, MAX_CHANNEL_CAPACITY));
        Self { sender }
    }

    /// Subscribes to events published after this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<HomeEvent> {
        self.sender.subscribe()
    }

    /// Returns the number of active subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Publishes an event to all subscribers.
    pub fn publish(&self, event: HomeEvent) {
        // No subscribers is not an error
        let _ = self.sender.send(event);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
