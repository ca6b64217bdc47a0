//! Per-segment address stride.

use crate::addressing::GroupAddress;
use crate::error::{KnxError, Result};

/// Linear stride added to a central address once per segment index.
///
/// Segment `n` of a central address `m/i/s` is
/// `(m + n * main) / (i + n * middle) / (s + n * sub)`.
///
/// ```
/// use knx_segments::SegmentOffset;
///
/// let offset = SegmentOffset::new(1, 0, 10).unwrap();
/// assert_eq!(offset.sub(), 10);
/// assert!(SegmentOffset::new(32, 0, 0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawSegmentOffset"))]
pub struct SegmentOffset {
    main: u8,
    middle: u8,
    sub: u8,
}

impl SegmentOffset {
    /// No stride: every segment maps onto its central address.
    pub const ZERO: Self = Self {
        main: 0,
        middle: 0,
        sub: 0,
    };

    /// Create an offset, bounded by the width of the field it is added to.
    ///
    /// # Errors
    ///
    /// Returns an offset-out-of-range configuration error if `main > 31` or
    /// `middle > 7`.
    pub fn new(main: u8, middle: u8, sub: u8) -> Result<Self> {
        if main > GroupAddress::MAX_MAIN || middle > GroupAddress::MAX_MIDDLE {
            return Err(KnxError::offset_out_of_range());
        }
        Ok(Self { main, middle, sub })
    }

    /// Main group stride.
    pub const fn main(self) -> u8 {
        self.main
    }

    /// Middle group stride.
    pub const fn middle(self) -> u8 {
        self.middle
    }

    /// Sub group stride.
    pub const fn sub(self) -> u8 {
        self.sub
    }

    /// True when all three strides are zero.
    pub const fn is_zero(self) -> bool {
        self.main == 0 && self.middle == 0 && self.sub == 0
    }
}

/// Unchecked wire form, validated through [`SegmentOffset::new`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawSegmentOffset {
    main: u8,
    middle: u8,
    sub: u8,
}

#[cfg(feature = "serde")]
impl TryFrom<RawSegmentOffset> for SegmentOffset {
    type Error = KnxError;

    fn try_from(raw: RawSegmentOffset) -> Result<Self> {
        Self::new(raw.main, raw.middle, raw.sub)
    }
}
