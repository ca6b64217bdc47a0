//! Per-segment group address mapping.
//!
//! Each LED segment gets its own copy of the six central communication
//! objects, at addresses derived from the central ones by a linear
//! [`SegmentOffset`]:
//!
//! ```text
//! segment n = central + n * offset      (per field, no wraparound)
//! ```
//!
//! Derived addresses that leave the KNX field widths are dropped, and a
//! configuration whose addresses collide is refused as a whole.

pub mod calculator;
pub mod central;
pub mod conflict;
pub mod offset;
pub mod table;

/// Maximum number of segments mapped onto the bus.
pub const MAX_SEGMENTS: u8 = 32;

#[doc(inline)]
pub use calculator::{parse_address, segment_address, try_parse_address, try_segment_address};
#[doc(inline)]
pub use central::{AddressKind, CentralAddressSet};
#[doc(inline)]
pub use conflict::{
    all_used_addresses, analyze_conflicts, has_conflicts, is_in_use, AddressSlot, Conflict,
    Conflicts, UsedAddresses,
};
#[doc(inline)]
pub use offset::SegmentOffset;
#[doc(inline)]
pub use table::{SegmentAddresses, SegmentTable};
