//! Crawl frontier
//!
//! Outlinks discovered by a capture are handed to the coordinator through an
//! unbounded channel, so enqueueing never blocks a worker.

use crate::crawler::item::CaptureItem;
use std::sync::Arc;
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};

/// Sending half of the frontier, shared by every capture
#[derive(Debug, Clone)]
pub struct Frontier {
    sender: UnboundedSender<Arc<CaptureItem>>,
}

impl Frontier {
    /// Queues an item; returns false once the receiver is gone
    pub fn push(&self, item: Arc<CaptureItem>) -> bool {
        self.sender.send(item).is_ok()
    }
}

/// Receiving half of the frontier, owned by the coordinator
#[derive(Debug)]
pub struct FrontierReceiver {
    receiver: UnboundedReceiver<Arc<CaptureItem>>,
}

impl FrontierReceiver {
    pub async fn recv(&mut self) -> Option<Arc<CaptureItem>> {
        self.receiver.recv().await
    }

    /// Takes an item if one is ready
    pub fn try_recv(&mut self) -> Option<Arc<CaptureItem>> {
        match self.receiver.try_recv() {
            Ok(item) => Some(item),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Stops accepting new items; already queued items can still be drained
    pub fn close(&mut self) {
        self.receiver.close();
    }
}

/// Creates a connected frontier pair
pub fn channel() -> (Frontier, FrontierReceiver) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (Frontier { sender }, FrontierReceiver { receiver })
}
