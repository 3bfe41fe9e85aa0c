//! Outbound notifications for the audio/event collaborator.
//!
//! Notifications are fire-and-forget: a sink must never block evaluation
//! and never fails it. [`ChannelEventSink`] hands events to another thread
//! over a `crossbeam-channel`, dropping them when the channel is full or
//! disconnected.

use crossbeam_channel::{Receiver, Sender, TrySendError};
use std::sync::atomic::{AtomicU64, Ordering};
use voxlogic_core::{BlockId, BlockPos};

/// Something a listener outside the engine may want to react to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CircuitEvent {
    /// A block replaced itself in response to a dispatched event.
    Became {
        /// The block.
        pos: BlockPos,
        /// Previous type.
        from: BlockId,
        /// New type.
        to: BlockId,
    },
}

/// Receiver of [`CircuitEvent`]s.
pub trait EventSink {
    /// Deliver one event. Must not block.
    fn notify(&self, event: CircuitEvent);
}

/// Drops every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullEvents;

impl EventSink for NullEvents {
    fn notify(&self, _event: CircuitEvent) {}
}

/// Delivers events over a crossbeam channel without blocking.
#[derive(Debug)]
pub struct ChannelEventSink {
    tx: Sender<CircuitEvent>,
    dropped: AtomicU64,
}

impl ChannelEventSink {
    /// Wrap an existing sender.
    pub fn new(tx: Sender<CircuitEvent>) -> Self {
        Self {
            tx,
            dropped: AtomicU64::new(0),
        }
    }

    /// A sink over a fresh bounded channel, and its receiving end.
    pub fn bounded(capacity: usize) -> (Self, Receiver<CircuitEvent>) {
        let (tx, rx) = crossbeam_channel::bounded(capacity);
        (Self::new(tx), rx)
    }

    /// Events lost to a full or disconnected channel.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl EventSink for ChannelEventSink {
    fn notify(&self, event: CircuitEvent) {
        match self.tx.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(_) | TrySendError::Disconnected(_)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
            }
        }
    }
}
