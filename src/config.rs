// src/config.rs

//! Deliverer and endpoint configuration.
//!
//! Configuration is plain data. Nothing is validated until it is applied at
//! registration time, so an invalid value surfaces as
//! [`Error::InvalidConfig`](crate::Error::InvalidConfig) from the call that
//! would have made the endpoint visible.

use std::time::Duration;

use crate::{Error, Result};

/// Buffer length used when neither the receiver nor the deliverer set one.
pub const DEFAULT_BUFFER_LEN: usize = 5;

/// Deliverer-wide defaults.
#[derive(Debug, Clone)]
pub struct DelivererConfig {
    // ---
    /// Identifier used in log output.
    ///
    /// Defaults to a random UUID.
    pub id: String,

    /// Transport capacity for receivers that do not choose their own.
    ///
    /// Default: 5
    pub buffer_len: usize,

    /// Deadline for sync calls from senders that do not choose their own.
    ///
    /// Default: `None`, a sync call waits for its handler indefinitely.
    pub sync_timeout: Option<Duration>,
}

impl Default for DelivererConfig {
    fn default() -> Self {
        // ---
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            buffer_len: DEFAULT_BUFFER_LEN,
            sync_timeout: None,
        }
    }
}

impl DelivererConfig {
    /// Set the identifier used in log output.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the default receiver buffer length.
    pub fn with_buffer_len(mut self, len: usize) -> Self {
        self.buffer_len = len;
        self
    }

    /// Set the default sync call deadline.
    pub fn with_sync_timeout(mut self, timeout: Duration) -> Self {
        self.sync_timeout = Some(timeout);
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        // ---
        if self.buffer_len == 0 {
            return Err(Error::InvalidConfig(
                "deliverer buffer_len must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Options applied to a sender before it is registered.
///
/// # Example
///
/// ```
/// use courier::SenderConfig;
/// use std::time::Duration;
///
/// let config = SenderConfig::default().with_sync_timeout(Duration::from_secs(2));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SenderConfig {
    /// Deadline for [`Sender::sync_send_to`](crate::Sender::sync_send_to).
    ///
    /// `None` falls back to the deliverer default.
    pub sync_timeout: Option<Duration>,
}

impl SenderConfig {
    pub fn with_sync_timeout(mut self, timeout: Duration) -> Self {
        self.sync_timeout = Some(timeout);
        self
    }

    pub(crate) fn resolve(&self, defaults: &DelivererConfig) -> Option<Duration> {
        self.sync_timeout.or(defaults.sync_timeout)
    }
}

/// Options applied to a receiver before it is registered.
///
/// The buffer length depends on how fast the receiver drains its transport:
/// the faster the receiver, the smaller the buffer can be. A sender that
/// outpaces the receiver gets
/// [`Error::ReceiverBufferFull`](crate::Error::ReceiverBufferFull).
///
/// # Example
///
/// ```
/// use courier::ReceiverConfig;
///
/// let config = ReceiverConfig::default().with_buffer_len(64);
/// assert_eq!(config.buffer_len, Some(64));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReceiverConfig {
    /// Transport capacity. `None` falls back to the deliverer default.
    pub buffer_len: Option<usize>,
}

impl ReceiverConfig {
    pub fn with_buffer_len(mut self, len: usize) -> Self {
        self.buffer_len = Some(len);
        self
    }

    pub(crate) fn resolve(&self, defaults: &DelivererConfig) -> Result<usize> {
        // ---
        match self.buffer_len.unwrap_or(defaults.buffer_len) {
            0 => Err(Error::InvalidConfig(
                "receiver buffer_len must be at least 1".into(),
            )),
            len => Ok(len),
        }
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn test_receiver_falls_back_to_deliverer_default() {
        // ---
        let defaults = DelivererConfig::default().with_buffer_len(9);
        assert_eq!(ReceiverConfig::default().resolve(&defaults).unwrap(), 9);
        assert_eq!(
            ReceiverConfig::default()
                .with_buffer_len(2)
                .resolve(&defaults)
                .unwrap(),
            2
        );
    }

    #[test]
    fn test_zero_buffer_rejected() {
        // ---
        let defaults = DelivererConfig::default();
        let res = ReceiverConfig::default().with_buffer_len(0).resolve(&defaults);
        assert!(matches!(res, Err(Error::InvalidConfig(_))));

        assert!(DelivererConfig::default().with_buffer_len(0).validate().is_err());
    }

    #[test]
    fn test_sender_timeout_override() {
        // ---
        let defaults = DelivererConfig::default().with_sync_timeout(Duration::from_secs(1));
        assert_eq!(
            SenderConfig::default().resolve(&defaults),
            Some(Duration::from_secs(1))
        );
        assert_eq!(
            SenderConfig::default()
                .with_sync_timeout(Duration::from_millis(5))
                .resolve(&defaults),
            Some(Duration::from_millis(5))
        );
        assert_eq!(SenderConfig::default().resolve(&DelivererConfig::default()), None);
    }

    #[test]
    fn test_default_ids_are_unique() {
        // ---
        assert_ne!(DelivererConfig::default().id, DelivererConfig::default().id);
    }
}
