// src/domain/mod.rs

//! Domain layer public interface.
//!
//! Holds the identifiers shared by every other layer. Nothing here knows
//! about channels, registries or async runtimes.
//!
//! All consumers must import symbols via this module, not by referencing
//! individual files directly.

mod location;

pub use location::Location;
