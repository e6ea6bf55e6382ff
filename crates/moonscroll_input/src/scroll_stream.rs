//! Scroll sample fan-out
//!
//! One [`ScrollStream`] receives scroll offsets from the host and delivers every
//! sample to each [`ScrollSubscription`]. Subscribers drain at their own pace and
//! never see each other, so the camera follower and the object spinner stay
//! independent.

use std::sync::mpsc::{self, Receiver, Sender};

/// Publisher side of the scroll stream
#[derive(Default)]
pub struct ScrollStream {
    subscribers: Vec<Sender<f32>>,
    latest: Option<f32>,
}

impl ScrollStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscriber
    ///
    /// The subscriber only receives samples published after this call.
    pub fn subscribe(&mut self) -> ScrollSubscription {
        let (sender, receiver) = mpsc::channel();
        self.subscribers.push(sender);
        ScrollSubscription { receiver }
    }

    /// Deliver a scroll offset to every live subscriber
    pub fn publish(&mut self, offset: f32) {
        self.latest = Some(offset);
        // Dropped subscriptions are pruned here
        self.subscribers.retain(|s| s.send(offset).is_ok());
    }

    /// Most recent offset published
    pub fn latest(&self) -> Option<f32> {
        self.latest
    }

    /// Number of live subscribers as of the last publish
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

/// Receiver side of the scroll stream
pub struct ScrollSubscription {
    receiver: Receiver<f32>,
}

impl ScrollSubscription {
    /// Take every sample received since the last drain, oldest first
    pub fn drain(&self) -> Vec<f32> {
        self.receiver.try_iter().collect()
    }

    /// Take every pending sample and return the newest
    pub fn latest(&self) -> Option<f32> {
        self.receiver.try_iter().last()
    }
}
