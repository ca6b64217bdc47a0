//! Segment address derivation.
//!
//! Segment `n` of a central address adds `n` times the configured
//! [`SegmentOffset`] to each field. Results that leave the KNX field widths
//! are rejected rather than masked.
//!
//! Two flavours are provided: `try_*` functions return a [`Result`] that
//! distinguishes parse failures from range overflow, and the plain functions
//! collapse every failure into [`GroupAddress::UNSET`].

use crate::addressing::{GroupAddress, GroupAddressFields};
use crate::error::{KnxError, Result};
use crate::segment::offset::SegmentOffset;

/// Parse and range check `main/middle/sub`.
///
/// # Errors
///
/// Parse failure for malformed text, out of range when a field exceeds its
/// width.
pub fn try_parse_address(text: &str) -> Result<GroupAddress> {
    GroupAddressFields::parse(text)?.to_group_address()
}

/// Parse `main/middle/sub`, returning [`GroupAddress::UNSET`] on any failure.
///
/// ```
/// use knx_segments::{parse_address, GroupAddress};
///
/// assert_eq!(parse_address("1/2/50"), GroupAddress::encode(1, 2, 50));
/// assert!(parse_address("").is_unset());
/// assert!(parse_address("99/9/999").is_unset());
/// ```
pub fn parse_address(text: &str) -> GroupAddress {
    try_parse_address(text).unwrap_or(GroupAddress::UNSET)
}

/// Fields of `central` shifted by `index` strides, not yet range checked.
///
/// # Errors
///
/// Out of range if the arithmetic itself overflows 32 bits.
pub fn offset_fields(
    central: GroupAddressFields,
    segment_index: u8,
    offset: SegmentOffset,
) -> Result<GroupAddressFields> {
    let index = u32::from(segment_index);
    let shift = |field: u32, stride: u8| {
        u32::from(stride)
            .checked_mul(index)
            .and_then(|delta| field.checked_add(delta))
            .ok_or_else(KnxError::address_out_of_range)
    };

    Ok(GroupAddressFields {
        main: shift(central.main, offset.main())?,
        middle: shift(central.middle, offset.middle())?,
        sub: shift(central.sub, offset.sub())?,
    })
}

/// Derive the address of segment `segment_index` from a central address text.
///
/// Segment 0 always reproduces the central address itself.
///
/// # Errors
///
/// Parse failure when `central` is malformed or empty, out of range when the
/// central address or any shifted field exceeds its KNX width.
pub fn try_segment_address(
    central: &str,
    segment_index: u8,
    offset: SegmentOffset,
) -> Result<GroupAddress> {
    let fields = GroupAddressFields::parse(central)?;
    offset_fields(fields, segment_index, offset)?.to_group_address()
}

/// Derive the address of segment `segment_index`, or [`GroupAddress::UNSET`]
/// when the central text is invalid or the result leaves the KNX ranges.
///
/// ```
/// use knx_segments::{segment_address, GroupAddress, SegmentOffset};
///
/// let offset = SegmentOffset::new(1, 0, 10).unwrap();
/// assert_eq!(segment_address("1/2/50", 2, offset), GroupAddress::encode(3, 2, 70));
/// assert!(segment_address("30/7/250", 2, offset).is_unset());
/// ```
pub fn segment_address(central: &str, segment_index: u8, offset: SegmentOffset) -> GroupAddress {
    match try_segment_address(central, segment_index, offset) {
        Ok(addr) => addr,
        Err(err) => {
            if err.is_out_of_range() {
                knx_log!(
                    debug,
                    "Segment {} address for {} exceeds KNX limits",
                    segment_index,
                    central
                );
            }
            GroupAddress::UNSET
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offset(main: u8, middle: u8, sub: u8) -> SegmentOffset {
        SegmentOffset::new(main, middle, sub).unwrap()
    }

    #[test]
    fn test_identity_segment_zero() {
        let off = offset(1, 0, 10);
        assert_eq!(segment_address("1/2/50", 0, off), parse_address("1/2/50"));
        assert_eq!(segment_address("1/2/50", 0, off), GroupAddress::encode(1, 2, 50));
    }

    #[test]
    fn test_linear_segments() {
        let off = offset(1, 0, 10);
        assert_eq!(segment_address("1/2/50", 1, off), GroupAddress::encode(2, 2, 60));
        assert_eq!(segment_address("1/2/50", 2, off), GroupAddress::encode(3, 2, 70));
    }

    #[test]
    fn test_all_fields_shift() {
        let off = offset(2, 1, 5);
        assert_eq!(segment_address("5/3/100", 1, off), GroupAddress::encode(7, 4, 105));

        let off = offset(1, 2, 15);
        assert_eq!(segment_address("5/3/100", 1, off), GroupAddress::encode(6, 5, 115));
    }

    #[test]
    fn test_boundary_overflow() {
        let off = offset(1, 0, 10);
        // 32/7/270
        assert!(segment_address("30/7/250", 2, off).is_unset());
        let err = try_segment_address("30/7/250", 2, off).unwrap_err();
        assert!(err.is_out_of_range());
    }

    #[test]
    fn test_exact_limits_are_valid() {
        let off = offset(1, 1, 5);
        assert_eq!(
            segment_address("30/6/250", 1, off),
            GroupAddress::encode(31, 7, 255)
        );
    }

    #[test]
    fn test_invalid_central_text() {
        let off = offset(1, 0, 10);
        assert!(segment_address("", 1, off).is_unset());
        assert!(segment_address("invalid", 1, off).is_unset());
        assert!(try_segment_address("", 1, off).unwrap_err().is_parse_failure());
    }

    #[test]
    fn test_out_of_range_central_is_rejected_at_any_index() {
        assert!(segment_address("99/9/999", 0, SegmentOffset::ZERO).is_unset());
        assert!(try_segment_address("99/9/999", 0, SegmentOffset::ZERO)
            .unwrap_err()
            .is_out_of_range());
    }

    #[test]
    fn test_offset_fields_no_wraparound() {
        let fields = GroupAddressFields {
            main: u32::MAX,
            middle: 0,
            sub: 0,
        };
        assert!(offset_fields(fields, 1, offset(1, 0, 0))
            .unwrap_err()
            .is_out_of_range());
    }
}
