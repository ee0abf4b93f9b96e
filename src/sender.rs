// src/sender.rs

use std::sync::Arc;
use std::time::Duration;

use crate::registry::{Registry, SenderSlot};
use crate::{log_debug, log_warn, Error, Location, Result};

/// The producing end of a location.
///
/// Created by [`Deliverer::new_sender`](crate::Deliverer::new_sender). A
/// sender never owns the transport it writes to; it looks the transport up
/// on every call, so it observes deletion and late receiver registration
/// immediately.
pub struct Sender<M, R = M> {
    // ---
    registry: Arc<Registry<M, R>>,
    slot: Arc<SenderSlot>,
}

impl<M, R> Sender<M, R>
where
    M: Send + 'static,
    R: Send + 'static,
{
    pub(crate) fn new(registry: Arc<Registry<M, R>>, slot: Arc<SenderSlot>) -> Self {
        Self { registry, slot }
    }

    pub fn location(&self) -> &Location {
        &self.slot.location
    }

    /// Deliver `value` to the receiver at this location without waiting.
    ///
    /// Backpressure is reported, never absorbed: a full transport fails the
    /// call instead of blocking, and the value is dropped.
    ///
    /// # Errors
    ///
    /// - [`Error::NoReceiver`] if no receiver is registered here.
    /// - [`Error::LocationDeleted`] if the location has been deleted.
    /// - [`Error::ReceiverBufferFull`] if the receiver's buffer is at capacity.
    pub fn send_to(&self, value: M) -> Result<()> {
        // ---
        let location = &self.slot.location;

        if self.registry.receiver_slot(location.as_str()).is_none() {
            return Err(Error::NoReceiver(location.to_string()));
        }

        let res = self.registry.push(location, value);
        if let Err(Error::ReceiverBufferFull(_)) = &res {
            log_warn!("{}: receiver buffer full at {location}", self.registry.config().id);
        }
        res
    }

    /// Call the receiver's sync handler with `value` and return its result.
    ///
    /// Bypasses the transport entirely. The future completes when the handler
    /// does; if this sender was configured with a sync timeout the call
    /// fails with [`Error::Timeout`] once it elapses.
    ///
    /// # Errors
    ///
    /// - [`Error::NoReceiver`] if no receiver is registered here, or the
    ///   receiver has not registered a sync handler yet.
    /// - Any error returned by the handler, unchanged.
    pub async fn sync_send_to(&self, value: M) -> Result<R> {
        // ---
        match self.slot.sync_timeout {
            Some(timeout) => self.sync_send_to_with_timeout(value, timeout).await,
            None => self.call_handler(value).await,
        }
    }

    /// Like [`sync_send_to`](Self::sync_send_to), with an explicit deadline.
    ///
    /// On timeout the handler's future is dropped.
    pub async fn sync_send_to_with_timeout(&self, value: M, timeout: Duration) -> Result<R> {
        // ---
        tokio::time::timeout(timeout, self.call_handler(value))
            .await
            .map_err(|_| {
                log_warn!(
                    "{}: sync call to {} timed out after {timeout:?}",
                    self.registry.config().id,
                    self.slot.location
                );
                Error::Timeout(self.slot.location.to_string())
            })?
    }

    async fn call_handler(&self, value: M) -> Result<R> {
        // ---
        let location = &self.slot.location;

        let handler = self
            .registry
            .receiver_slot(location.as_str())
            .and_then(|receiver| receiver.handler())
            .ok_or_else(|| Error::NoReceiver(location.to_string()))?;

        log_debug!("{}: sync call to {location}", self.registry.config().id);
        handler(value).await
    }
}

#[cfg(test)]
mod tests {
    // ---
    use crate::{Deliverer, Error, ReceiverConfig};

    #[tokio::test]
    async fn test_send_without_receiver() {
        // ---
        let deliverer: Deliverer<&'static str> = Deliverer::new();
        let sender = deliverer.new_sender("solo").unwrap();

        assert!(matches!(sender.send_to("x"), Err(Error::NoReceiver(loc)) if loc == "solo"));
        assert!(matches!(
            sender.sync_send_to("x").await,
            Err(Error::NoReceiver(_))
        ));
    }

    #[tokio::test]
    async fn test_receiver_registered_after_sender() {
        // ---
        let deliverer: Deliverer<u8> = Deliverer::new();
        let sender = deliverer.new_sender("late").unwrap();
        assert!(sender.send_to(1).is_err());

        let receiver = deliverer.new_receiver("late").unwrap();
        sender.send_to(2).unwrap();
        assert_eq!(receiver.to_receive().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_buffer_full() {
        // ---
        let deliverer: Deliverer<u8> = Deliverer::new();
        let sender = deliverer.new_sender("tight").unwrap();
        let _receiver = deliverer
            .new_receiver_with_config("tight", ReceiverConfig::default().with_buffer_len(1))
            .unwrap();

        sender.send_to(1).unwrap();
        assert!(matches!(sender.send_to(2), Err(Error::ReceiverBufferFull(_))));
    }
}
