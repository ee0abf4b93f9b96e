// src/error.rs

use std::fmt;

use thiserror::Error;

/// Which side of a location an endpoint sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Sender,
    Receiver,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // ---
        match self {
            Role::Sender => f.write_str("sender"),
            Role::Receiver => f.write_str("receiver"),
        }
    }
}

/// Errors that can occur while registering endpoints or delivering values
#[derive(Error, Debug)]
pub enum Error {
    /// An endpoint of the same role is already registered at the location
    #[error("{role} location already exists: {location}")]
    DuplicateLocation { role: Role, location: String },

    /// No sender is registered at the location
    #[error("no corresponding sender: {0}")]
    NoSender(String),

    /// No receiver (or no sync handler) is registered at the location
    #[error("no corresponding receiver: {0}")]
    NoReceiver(String),

    /// The receiver's buffer is at capacity
    #[error("receiver buffer is full, receiver missing or too busy: {0}")]
    ReceiverBufferFull(String),

    /// The location's transport has been torn down
    #[error("location removed: {0}")]
    LocationDeleted(String),

    /// Location strings must be non-empty
    #[error("invalid location: {0:?}")]
    InvalidLocation(String),

    /// Rejected endpoint or deliverer configuration
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A caller-supplied deadline elapsed
    #[error("timed out at location: {0}")]
    Timeout(String),

    /// Failure reported by a sync receive handler
    #[error("handler error: {0}")]
    Handler(String),

    /// JSON serialization or deserialization failed
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Whether retrying the same call later may succeed.
    ///
    /// The crate never retries on its own; this only helps hosts decide.
    pub fn is_transient(&self) -> bool {
        // ---
        matches!(
            self,
            Error::NoSender(_) | Error::NoReceiver(_) | Error::ReceiverBufferFull(_) | Error::Timeout(_)
        )
    }
}

/// Result type alias for delivery operations
pub type Result<T> = std::result::Result<T, Error>;
