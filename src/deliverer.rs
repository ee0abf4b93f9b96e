// src/deliverer.rs

//! Deliverer façade.
//!
//! Owns the location registry and hands out [`Sender`]s and [`Receiver`]s
//! bound to it. The registry is not global: every deliverer has its own, and
//! endpoints created by different deliverers never see each other.

use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{DelivererConfig, ReceiverConfig, SenderConfig};
use crate::registry::Registry;
use crate::{log_info, Location, Receiver, Result, Sender};

/// Factory and owner of senders, receivers and their transports.
///
/// `M` is the type of values sent through a location; `R` is the type a sync
/// handler hands back, defaulting to `M`. Cloning a deliverer is cheap and
/// yields a handle to the same registry.
///
/// The registry lives as long as the deliverer or any endpoint created from
/// it.
///
/// # Example
///
/// ```
/// use courier::Deliverer;
///
/// # async fn example() -> courier::Result<()> {
/// let deliverer: Deliverer<String> = Deliverer::new();
///
/// let sender = deliverer.new_sender("greetings")?;
/// let receiver = deliverer.new_receiver("greetings")?;
///
/// sender.send_to("hello".to_string())?;
/// assert_eq!(receiver.to_receive().await?, "hello");
///
/// deliverer.delete_location("greetings");
/// assert!(receiver.to_receive().await.is_err());
/// # Ok(())
/// # }
/// ```
pub struct Deliverer<M, R = M> {
    inner: Arc<Registry<M, R>>,
}

impl<M, R> Deliverer<M, R>
where
    M: Send + 'static,
    R: Send + 'static,
{
    /// Create a deliverer with default configuration.
    pub fn new() -> Self {
        // ---
        Self::from_registry(Registry::new(DelivererConfig::default()))
    }

    /// Start configuring a deliverer.
    ///
    /// The payload types are taken from the binding the built deliverer is
    /// assigned to.
    pub fn builder() -> DelivererBuilder<M, R> {
        DelivererBuilder::new()
    }

    /// Create a deliverer from an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`](crate::Error::InvalidConfig) if the
    /// default buffer length is zero.
    pub fn with_config(config: DelivererConfig) -> Result<Self> {
        // ---
        config.validate()?;
        Ok(Self::from_registry(Registry::new(config)))
    }

    fn from_registry(registry: Registry<M, R>) -> Self {
        // ---
        log_info!("{}: deliverer created", registry.config().id);
        Self {
            inner: Arc::new(registry),
        }
    }

    /// Identifier used in log output.
    pub fn id(&self) -> &str {
        &self.inner.config().id
    }

    pub fn config(&self) -> &DelivererConfig {
        self.inner.config()
    }

    /// Register the sender for `location` with default options.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidLocation`](crate::Error::InvalidLocation) for an empty location.
    /// - [`Error::DuplicateLocation`](crate::Error::DuplicateLocation) if a
    ///   sender already exists at `location`, including a deleted one.
    pub fn new_sender(&self, location: &str) -> Result<Sender<M, R>> {
        self.new_sender_with_config(location, SenderConfig::default())
    }

    /// Register the sender for `location` with explicit options.
    pub fn new_sender_with_config(
        &self,
        location: &str,
        config: SenderConfig,
    ) -> Result<Sender<M, R>> {
        // ---
        let location = Location::new(location)?;
        let slot = self.inner.register_sender(location, &config)?;
        Ok(Sender::new(self.inner.clone(), slot))
    }

    /// Register the receiver for `location` with default options.
    ///
    /// Also allocates the location's transport.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidLocation`](crate::Error::InvalidLocation) for an empty location.
    /// - [`Error::DuplicateLocation`](crate::Error::DuplicateLocation) if a
    ///   receiver already exists at `location`, including a deleted one.
    pub fn new_receiver(&self, location: &str) -> Result<Receiver<M, R>> {
        self.new_receiver_with_config(location, ReceiverConfig::default())
    }

    /// Register the receiver for `location` with explicit options.
    ///
    /// # Errors
    ///
    /// In addition to those of [`new_receiver`](Self::new_receiver), returns
    /// [`Error::InvalidConfig`](crate::Error::InvalidConfig) for a zero
    /// buffer length.
    pub fn new_receiver_with_config(
        &self,
        location: &str,
        config: ReceiverConfig,
    ) -> Result<Receiver<M, R>> {
        // ---
        let location = Location::new(location)?;
        let slot = self.inner.register_receiver(location, &config)?;
        Ok(Receiver::new(self.inner.clone(), slot))
    }

    /// Tear down the transport at `location`.
    ///
    /// Idempotent: deleting an unknown or already deleted location does
    /// nothing. A receiver waiting on the location wakes up with
    /// [`Error::LocationDeleted`](crate::Error::LocationDeleted) once any
    /// buffered values are drained.
    ///
    /// Deleted locations are one-shot. The sender and receiver records stay
    /// registered, so the location cannot be registered again.
    pub fn delete_location(&self, location: &str) {
        self.inner.delete(location);
    }

    /// Locations that currently have an open transport, sorted.
    pub fn locations(&self) -> Vec<Location> {
        self.inner.locations()
    }

    /// Delete every location. Idempotent.
    pub fn shutdown(&self) {
        // ---
        let _closed = self.inner.delete_all();
        log_info!("{}: shutdown closed {} location(s)", self.id(), _closed.len());
    }
}

impl<M, R> Default for Deliverer<M, R>
where
    M: Send + 'static,
    R: Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<M, R> Clone for Deliverer<M, R> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

/// Builder for [`Deliverer`] instances.
///
/// # Example
///
/// ```
/// use courier::{Deliverer, DelivererBuilder};
/// use std::time::Duration;
///
/// # fn example() -> courier::Result<()> {
/// let deliverer: Deliverer<Vec<u8>> = DelivererBuilder::new()
///     .id("ingest")
///     .buffer_len(32)
///     .sync_timeout(Duration::from_secs(5))
///     .build()?;
/// assert_eq!(deliverer.id(), "ingest");
/// # Ok(())
/// # }
/// ```
pub struct DelivererBuilder<M, R = M> {
    // ---
    id: Option<String>,
    buffer_len: Option<usize>,
    sync_timeout: Option<Duration>,
    _payload: PhantomData<fn() -> (M, R)>,
}

impl<M, R> Default for DelivererBuilder<M, R> {
    fn default() -> Self {
        // ---
        Self {
            id: None,
            buffer_len: None,
            sync_timeout: None,
            _payload: PhantomData,
        }
    }
}

impl<M, R> DelivererBuilder<M, R>
where
    M: Send + 'static,
    R: Send + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the identifier used in log output.
    ///
    /// Default: a random UUID.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the default receiver buffer length.
    ///
    /// Default: 5.
    pub fn buffer_len(mut self, len: usize) -> Self {
        self.buffer_len = Some(len);
        self
    }

    /// Set the default sync call deadline.
    ///
    /// Default: none, sync calls wait for their handler indefinitely.
    pub fn sync_timeout(mut self, timeout: Duration) -> Self {
        self.sync_timeout = Some(timeout);
        self
    }

    /// Build the deliverer (consumes self).
    pub fn build(self) -> Result<Deliverer<M, R>> {
        // ---
        let mut config = DelivererConfig::default();
        if let Some(id) = self.id {
            config.id = id;
        }
        if let Some(len) = self.buffer_len {
            config.buffer_len = len;
        }
        config.sync_timeout = self.sync_timeout;

        Deliverer::with_config(config)
    }
}
