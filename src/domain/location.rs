// src/domain/location.rs

//! Location identifiers.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use crate::{Error, Result};

/// A named rendezvous point.
///
/// A `Location` pairs exactly one [`Sender`](crate::Sender) with exactly one
/// [`Receiver`](crate::Receiver). Different locations are unrelated; the
/// string is compared verbatim, with no hierarchy or wildcard matching.
///
/// Locations are immutable, cheap to clone, and safe to share across threads.
///
/// ```
/// # use courier::Location;
/// let loc = Location::new("orders/new")?;
/// assert_eq!(loc.as_str(), "orders/new");
/// assert!(Location::new("").is_err());
/// # Ok::<(), courier::Error>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Location(Arc<str>);

impl Location {
    /// Validate and wrap a location string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLocation`] for an empty string. Whitespace is
    /// kept verbatim and is a valid location.
    pub fn new(value: impl AsRef<str>) -> Result<Self> {
        // ---
        let value = value.as_ref();
        if value.is_empty() {
            return Err(Error::InvalidLocation(value.to_string()));
        }
        Ok(Self(Arc::from(value)))
    }

    /// Borrow the location as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Location {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Location {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for Location {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Location::new(value)
    }
}

impl TryFrom<String> for Location {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Location::new(value)
    }
}
