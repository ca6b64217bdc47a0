#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
#![doc = include_str!("../README.md")]

//! ## Modules
//!
//! - [`addressing`]: 3-level group address type, parser and encoder
//! - [`segment`]: per-segment derivation, conflict detection, segment table
//! - [`config`]: configuration value object and `KEY=VALUE` loader
//! - [`error`]: structured error types

// Macro modules (must be declared before use)
#[macro_use]
pub mod logging;
#[macro_use]
pub mod macros;

pub mod addressing;
pub mod config;
pub mod error;
pub mod segment;

// Re-export commonly used types
#[doc(inline)]
pub use addressing::{GroupAddress, GroupAddressFields};
#[doc(inline)]
pub use config::SegmentConfig;
#[doc(inline)]
pub use error::{KnxError, Result};
#[doc(inline)]
pub use segment::{
    all_used_addresses, analyze_conflicts, has_conflicts, is_in_use, parse_address,
    segment_address, try_parse_address, try_segment_address, AddressKind, CentralAddressSet,
    Conflict, SegmentAddresses, SegmentOffset, SegmentTable, MAX_SEGMENTS,
};
