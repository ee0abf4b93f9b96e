//! In-process message delivery between endpoints paired by a named location
//!
//! Producers ([`Sender`]) and consumers ([`Receiver`]) never hold references
//! to each other. Both register against a string [`Location`] on a shared
//! [`Deliverer`], and the deliverer connects them. This lets independent
//! subsystems talk without importing one another.
//!
//! Two delivery protocols are available on every location:
//!
//! - **Asynchronous**: [`Sender::send_to`] pushes onto a bounded FIFO
//!   transport without waiting; [`Receiver::to_receive`] waits for the next
//!   value. A full transport is reported to the sender as
//!   [`Error::ReceiverBufferFull`] rather than slowing it down.
//! - **Synchronous**: [`Sender::sync_send_to`] calls the handler registered
//!   with [`Receiver::to_sync_receive`] directly and returns its result.
//!
//! Each location has at most one sender and one receiver. Registration order
//! does not matter. [`Deliverer::delete_location`] closes a location's
//! transport and wakes any waiting receiver.
//!
//! # Example
//!
//! ```
//! use courier::{Deliverer, ReceiverConfig};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> courier::Result<()> {
//! let deliverer: Deliverer<u64> = Deliverer::new();
//!
//! let receiver = deliverer.new_receiver_with_config(
//!     "jobs",
//!     ReceiverConfig::default().with_buffer_len(16),
//! )?;
//! let sender = deliverer.new_sender("jobs")?;
//!
//! sender.send_to(1)?;
//! sender.send_to(2)?;
//! assert_eq!(receiver.to_receive().await?, 1);
//! assert_eq!(receiver.to_receive().await?, 2);
//!
//! receiver.to_sync_receive(|job: u64| async move { Ok(job * 10) });
//! assert_eq!(sender.sync_send_to(4).await?, 40);
//! # Ok(())
//! # }
//! ```
//!
//! # Limitations
//!
//! - State lives only as long as the process; nothing is persisted.
//! - There is no built-in deadline on [`Receiver::to_receive`] or on
//!   [`Sender::sync_send_to`] unless one is configured; a hanging sync handler
//!   stalls its caller.
//! - Deleted locations cannot be registered again.

// Import all sub modules once...
mod codec;
mod config;
mod deliverer;
mod domain;
mod error;
mod handler;
mod macros;
mod receiver;
mod registry;
mod sender;
mod transport;

pub(crate) use macros::{log_debug, log_error, log_info, log_warn};

// Re-export main types
pub use deliverer::{Deliverer, DelivererBuilder};
pub use receiver::Receiver;
pub use sender::Sender;

pub use config::{DelivererConfig, ReceiverConfig, SenderConfig, DEFAULT_BUFFER_LEN};
pub use domain::Location;
pub use error::{Error, Result, Role};

pub use bytes::Bytes;
