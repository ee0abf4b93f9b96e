// src/transport.rs

//! Bounded in-process transport.
//!
//! A transport is a FIFO queue with a fixed capacity, split in two halves:
//!
//! - [`Transport`] is the push side. The registry holds the only instance, so
//!   removing it from the registry closes the queue.
//! - [`Inbox`] is the pull side, kept by the receiver record.
//!
//! ## Semantics
//!
//! - Pushing never blocks. A full queue is reported as
//!   [`Error::ReceiverBufferFull`] and the value is dropped.
//! - Pulling waits for the next value. Once the push side is gone, values
//!   already buffered are still delivered in order; after that every pull
//!   fails with [`Error::LocationDeleted`].

use tokio::sync::{mpsc, Mutex};

use crate::{Error, Location, Result};

/// Create a transport with room for `capacity` values.
///
/// `capacity` must be at least 1; callers validate it beforehand.
pub(crate) fn channel<M>(capacity: usize) -> (Transport<M>, Inbox<M>) {
    // ---
    let (tx, rx) = mpsc::channel(capacity);
    (
        Transport { tx },
        Inbox {
            rx: Mutex::new(rx),
        },
    )
}

/// Push side of a transport.
pub(crate) struct Transport<M> {
    tx: mpsc::Sender<M>,
}

impl<M> Transport<M> {
    /// Enqueue without waiting.
    pub fn try_push(&self, location: &Location, value: M) -> Result<()> {
        // ---
        self.tx.try_send(value).map_err(|err| match err {
            mpsc::error::TrySendError::Full(_) => Error::ReceiverBufferFull(location.to_string()),
            mpsc::error::TrySendError::Closed(_) => Error::LocationDeleted(location.to_string()),
        })
    }
}

/// Pull side of a transport.
///
/// Concurrent pulls are serialized; each value is handed to exactly one of
/// them.
pub(crate) struct Inbox<M> {
    rx: Mutex<mpsc::Receiver<M>>,
}

impl<M> Inbox<M> {
    /// Wait for the next value.
    ///
    /// Cancel safe: dropping the returned future never loses a value.
    pub async fn pull(&self, location: &Location) -> Result<M> {
        // ---
        let mut rx = self.rx.lock().await;
        rx.recv()
            .await
            .ok_or_else(|| Error::LocationDeleted(location.to_string()))
    }

    /// Take the next value if one is buffered.
    ///
    /// `Ok(None)` means the queue is empty but still open. If another pull
    /// currently holds the queue this also reports `Ok(None)`.
    pub fn try_pull(&self, location: &Location) -> Result<Option<M>> {
        // ---
        let mut rx = match self.rx.try_lock() {
            Ok(rx) => rx,
            Err(_) => return Ok(None),
        };

        match rx.try_recv() {
            Ok(value) => Ok(Some(value)),
            Err(mpsc::error::TryRecvError::Empty) => Ok(None),
            Err(mpsc::error::TryRecvError::Disconnected) => {
                Err(Error::LocationDeleted(location.to_string()))
            }
        }
    }
}
