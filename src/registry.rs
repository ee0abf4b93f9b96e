// src/registry.rs

//! Location registry.
//!
//! Three independent maps keyed by [`Location`]:
//!
//! - senders: one record per registered sender
//! - receivers: one record per registered receiver, holding the pull side of
//!   its transport and the sync handler slot
//! - transports: the push side of each receiver's transport
//!
//! Each map sits behind its own `RwLock`, so lookups from the delivery paths
//! only contend with registration and deletion. Registration does its
//! exists-check and insert under one write guard; two concurrent
//! registrations for the same location cannot both succeed.
//!
//! Lock order is receivers before transports. Nothing ever holds the senders
//! lock together with another one.
//!
//! A transport entry exists for a location iff a receiver was registered there
//! and the location has not been deleted since.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use crate::config::{DelivererConfig, ReceiverConfig, SenderConfig};
use crate::handler::SyncHandler;
use crate::transport::{self, Inbox, Transport};
use crate::{log_debug, log_error, log_info, Error, Location, Result, Role};

/// Registry record for a sender.
pub(crate) struct SenderSlot {
    pub location: Location,
    pub sync_timeout: Option<Duration>,
}

/// Registry record for a receiver.
pub(crate) struct ReceiverSlot<M, R> {
    pub location: Location,
    pub buffer_len: usize,
    pub inbox: Inbox<M>,
    handler: RwLock<Option<SyncHandler<M, R>>>,
}

impl<M, R> ReceiverSlot<M, R> {
    /// Replace the sync handler. Last writer wins.
    pub fn set_handler(&self, handler: SyncHandler<M, R>) {
        // ---
        *write_ignore_poison(&self.handler) = Some(handler);
    }

    /// Clone the current sync handler out of its slot.
    pub fn handler(&self) -> Option<SyncHandler<M, R>> {
        // ---
        read_ignore_poison(&self.handler).clone()
    }
}

pub(crate) struct Registry<M, R> {
    // ---
    config: DelivererConfig,
    senders: RwLock<HashMap<Location, Arc<SenderSlot>>>,
    receivers: RwLock<HashMap<Location, Arc<ReceiverSlot<M, R>>>>,
    transports: RwLock<HashMap<Location, Transport<M>>>,
}

/// Acquire read guard, ignoring poisoning
fn read_ignore_poison<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    // ---
    match lock.read() {
        Ok(guard) => guard,
        Err(poisoned) => {
            log_error!("recovering poisoned registry lock");
            poisoned.into_inner()
        }
    }
}

/// Acquire write guard, ignoring poisoning
fn write_ignore_poison<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    // ---
    match lock.write() {
        Ok(guard) => guard,
        Err(poisoned) => {
            log_error!("recovering poisoned registry lock");
            poisoned.into_inner()
        }
    }
}

impl<M, R> Registry<M, R> {
    // ---

    pub fn new(config: DelivererConfig) -> Self {
        // ---
        Self {
            config,
            senders: RwLock::new(HashMap::new()),
            receivers: RwLock::new(HashMap::new()),
            transports: RwLock::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &DelivererConfig {
        &self.config
    }

    /// Register a sender at `location`.
    ///
    /// The configuration is applied before the record becomes visible.
    pub fn register_sender(
        &self,
        location: Location,
        config: &SenderConfig,
    ) -> Result<Arc<SenderSlot>> {
        // ---
        let sync_timeout = config.resolve(&self.config);

        let mut senders = write_ignore_poison(&self.senders);
        if senders.contains_key(&location) {
            return Err(Error::DuplicateLocation {
                role: Role::Sender,
                location: location.to_string(),
            });
        }

        let slot = Arc::new(SenderSlot {
            location: location.clone(),
            sync_timeout,
        });
        senders.insert(location, slot.clone());

        log_debug!("{}: sender registered at {}", self.config.id, slot.location);
        Ok(slot)
    }

    /// Register a receiver at `location` and allocate its transport.
    ///
    /// The transport is published before the receiver record, so a sender
    /// that sees the receiver always finds its transport too.
    pub fn register_receiver(
        &self,
        location: Location,
        config: &ReceiverConfig,
    ) -> Result<Arc<ReceiverSlot<M, R>>> {
        // ---
        let buffer_len = config.resolve(&self.config)?;

        let mut receivers = write_ignore_poison(&self.receivers);
        if receivers.contains_key(&location) {
            return Err(Error::DuplicateLocation {
                role: Role::Receiver,
                location: location.to_string(),
            });
        }

        let (tx, inbox) = transport::channel(buffer_len);
        let slot = Arc::new(ReceiverSlot {
            location: location.clone(),
            buffer_len,
            inbox,
            handler: RwLock::new(None),
        });

        write_ignore_poison(&self.transports).insert(location.clone(), tx);
        receivers.insert(location, slot.clone());

        log_debug!(
            "{}: receiver registered at {} (buffer_len={buffer_len})",
            self.config.id,
            slot.location
        );
        Ok(slot)
    }

    /// Close and forget the transport at `location`.
    ///
    /// Sender and receiver records are left in place. Returns whether a
    /// transport was removed; removing nothing is not an error.
    pub fn delete(&self, location: &str) -> bool {
        // ---
        // Serialize with receiver registration
        let _receivers = write_ignore_poison(&self.receivers);

        if write_ignore_poison(&self.transports).remove(location).is_none() {
            log_debug!("{}: delete of {location} is a no-op", self.config.id);
            return false;
        }

        log_info!("{}: location {location} deleted", self.config.id);
        true
    }

    /// Close every transport. Returns the locations that were closed.
    pub fn delete_all(&self) -> Vec<Location> {
        // ---
        let _receivers = write_ignore_poison(&self.receivers);

        let drained: Vec<Location> = write_ignore_poison(&self.transports)
            .drain()
            .map(|(location, _transport)| location)
            .collect();

        log_info!("{}: closed {} location(s)", self.config.id, drained.len());
        drained
    }

    pub fn has_sender(&self, location: &str) -> bool {
        read_ignore_poison(&self.senders).contains_key(location)
    }

    pub fn receiver_slot(&self, location: &str) -> Option<Arc<ReceiverSlot<M, R>>> {
        read_ignore_poison(&self.receivers).get(location).cloned()
    }

    /// Enqueue onto the transport at `location` without waiting.
    pub fn push(&self, location: &Location, value: M) -> Result<()> {
        // ---
        let transports = read_ignore_poison(&self.transports);
        match transports.get(location.as_str()) {
            Some(transport) => transport.try_push(location, value),
            None => Err(Error::LocationDeleted(location.to_string())),
        }
    }

    /// Locations that currently have an open transport, sorted.
    pub fn locations(&self) -> Vec<Location> {
        // ---
        let mut locations: Vec<Location> = read_ignore_poison(&self.transports)
            .keys()
            .cloned()
            .collect();
        locations.sort();
        locations
    }
}
