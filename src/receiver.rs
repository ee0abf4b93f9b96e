// src/receiver.rs

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::handler::wrap_handler;
use crate::registry::{ReceiverSlot, Registry};
use crate::{log_debug, Error, Location, Result};

/// The consuming end of a location.
///
/// Created by [`Deliverer::new_receiver`](crate::Deliverer::new_receiver),
/// which also allocates the transport this receiver reads from.
pub struct Receiver<M, R = M> {
    // ---
    registry: Arc<Registry<M, R>>,
    slot: Arc<ReceiverSlot<M, R>>,
}

impl<M, R> Receiver<M, R>
where
    M: Send + 'static,
    R: Send + 'static,
{
    pub(crate) fn new(registry: Arc<Registry<M, R>>, slot: Arc<ReceiverSlot<M, R>>) -> Self {
        Self { registry, slot }
    }

    pub fn location(&self) -> &Location {
        &self.slot.location
    }

    /// Capacity of this receiver's transport.
    pub fn buffer_len(&self) -> usize {
        self.slot.buffer_len
    }

    /// Wait for the next value sent to this location.
    ///
    /// There is no built-in deadline. The returned future is cancel safe, so a
    /// caller can bound the wait with `tokio::time::timeout` or race it in
    /// `tokio::select!` against its own cancellation signal without losing
    /// values.
    ///
    /// # Errors
    ///
    /// - [`Error::NoSender`] if no sender is registered here. This is checked
    ///   up front; the call does not wait for a sender to appear.
    /// - [`Error::LocationDeleted`] once the location is deleted, including
    ///   while the call is waiting. Values buffered before the deletion are
    ///   still returned first.
    pub async fn to_receive(&self) -> Result<M> {
        // ---
        self.ensure_sender()?;
        self.slot.inbox.pull(&self.slot.location).await
    }

    /// Like [`to_receive`](Self::to_receive), giving up with
    /// [`Error::Timeout`] after `timeout`.
    pub async fn to_receive_with_timeout(&self, timeout: Duration) -> Result<M> {
        // ---
        tokio::time::timeout(timeout, self.to_receive())
            .await
            .map_err(|_| Error::Timeout(self.slot.location.to_string()))?
    }

    /// Take the next value if one is already buffered.
    ///
    /// Returns `Ok(None)` when the transport is empty.
    pub fn try_receive(&self) -> Result<Option<M>> {
        // ---
        self.ensure_sender()?;
        self.slot.inbox.try_pull(&self.slot.location)
    }

    /// Register the handler invoked by the paired sender's
    /// [`sync_send_to`](crate::Sender::sync_send_to).
    ///
    /// Replaces any previously registered handler. Registration does not
    /// require a sender to exist yet.
    ///
    /// # Example
    ///
    /// ```
    /// # use courier::Deliverer;
    /// # async fn example() -> courier::Result<()> {
    /// let deliverer: Deliverer<u32> = Deliverer::new();
    /// let sender = deliverer.new_sender("double")?;
    /// let receiver = deliverer.new_receiver("double")?;
    ///
    /// receiver.to_sync_receive(|v: u32| async move { Ok(v * 2) });
    /// assert_eq!(sender.sync_send_to(21).await?, 42);
    /// # Ok(())
    /// # }
    /// ```
    pub fn to_sync_receive<F, Fut>(&self, handler: F)
    where
        F: Fn(M) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<R>> + Send + 'static,
    {
        // ---
        self.slot.set_handler(wrap_handler(handler));
        log_debug!(
            "{}: sync handler registered at {}",
            self.registry.config().id,
            self.slot.location
        );
    }

    fn ensure_sender(&self) -> Result<()> {
        // ---
        if self.registry.has_sender(self.slot.location.as_str()) {
            Ok(())
        } else {
            Err(Error::NoSender(self.slot.location.to_string()))
        }
    }
}
