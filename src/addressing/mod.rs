//! KNX group addressing.
//!
//! Group addresses identify logical functions on the bus in 3-level form
//! Main/Middle/Sub.

pub mod group;

pub use group::{GroupAddress, GroupAddressFields};
