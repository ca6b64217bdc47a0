//! Segment mapping configuration.
//!
//! [`SegmentConfig`] is the value object handed to every calculation. It can
//! be built in code, deserialized with the `serde` feature, or loaded from
//! `KEY=VALUE` lines:
//!
//! ```text
//! KNX_SEGMENT_OFFSET_MAIN=1
//! KNX_SEGMENT_OFFSET_MIDDLE=0
//! KNX_SEGMENT_OFFSET_SUB=10
//! KNX_GA_IN_POWER=1/2/10
//! ```

use crate::addressing::GroupAddress;
use crate::error::{KnxError, Result};
use crate::segment::calculator;
use crate::segment::central::{AddressKind, CentralAddressSet};
use crate::segment::conflict::{self, Conflicts, UsedAddresses};
use crate::segment::offset::SegmentOffset;

/// Configuration used when nothing is stored yet.
pub const DEFAULT_CONFIG: &str = r"
KNX_SEGMENT_OFFSET_MAIN=1
KNX_SEGMENT_OFFSET_MIDDLE=0
KNX_SEGMENT_OFFSET_SUB=10
KNX_GA_IN_POWER=
KNX_GA_IN_BRI=
KNX_GA_IN_FX=
KNX_GA_OUT_POWER=
KNX_GA_OUT_BRI=
KNX_GA_OUT_FX=
";

const KEY_OFFSET_MAIN: &str = "KNX_SEGMENT_OFFSET_MAIN";
const KEY_OFFSET_MIDDLE: &str = "KNX_SEGMENT_OFFSET_MIDDLE";
const KEY_OFFSET_SUB: &str = "KNX_SEGMENT_OFFSET_SUB";

/// Segment offset plus central addresses.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SegmentConfig {
    /// Per-segment stride
    pub offset: SegmentOffset,
    /// Whole-device addresses
    pub central: CentralAddressSet,
}

impl SegmentConfig {
    /// Configuration with no central addresses.
    pub fn new(offset: SegmentOffset) -> Self {
        Self {
            offset,
            central: CentralAddressSet::new(),
        }
    }

    /// Parse `KEY=VALUE` lines.
    ///
    /// Blank lines and `#` comments are skipped and unknown keys ignored.
    /// Missing keys keep their defaults (zero offset, unconfigured address).
    ///
    /// # Errors
    ///
    /// Malformed lines, non-numeric offsets, offsets beyond the field widths
    /// and over-long address texts are rejected.
    ///
    /// ```
    /// use knx_segments::{AddressKind, GroupAddress, SegmentConfig};
    ///
    /// let config = SegmentConfig::from_config_text(
    ///     "KNX_SEGMENT_OFFSET_MAIN=1\nKNX_SEGMENT_OFFSET_SUB=10\nKNX_GA_IN_POWER=1/2/50",
    /// )
    /// .unwrap();
    /// assert_eq!(
    ///     config.segment_address(AddressKind::InPower, 1),
    ///     GroupAddress::encode(2, 2, 60)
    /// );
    /// ```
    pub fn from_config_text(text: &str) -> Result<Self> {
        let (mut main, mut middle, mut sub) = (0u8, 0u8, 0u8);
        let mut central = CentralAddressSet::new();

        for line in text.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (key, value) = line
                .split_once('=')
                .ok_or_else(KnxError::malformed_config_line)?;
            let (key, value) = (key.trim(), value.trim());

            match key {
                KEY_OFFSET_MAIN => main = parse_offset(value)?,
                KEY_OFFSET_MIDDLE => middle = parse_offset(value)?,
                KEY_OFFSET_SUB => sub = parse_offset(value)?,
                _ => match AddressKind::from_config_key(key) {
                    Some(kind) => central.set(kind, value)?,
                    None => knx_log!(debug, "Ignoring unknown config key {}", key),
                },
            }
        }

        let config = Self {
            offset: SegmentOffset::new(main, middle, sub)?,
            central,
        };
        config.report_central_issues();
        Ok(config)
    }

    /// Derived address of `kind` for segment `index`, or unset.
    pub fn segment_address(&self, kind: AddressKind, index: u8) -> GroupAddress {
        calculator::segment_address(self.central.get(kind), index, self.offset)
    }

    /// See [`conflict::all_used_addresses`].
    pub fn all_used_addresses(&self, segment_count: u8) -> UsedAddresses {
        conflict::all_used_addresses(self.offset, &self.central, segment_count)
    }

    /// See [`conflict::is_in_use`].
    pub fn is_in_use(&self, address: GroupAddress, segment_count: u8) -> bool {
        conflict::is_in_use(address, self.offset, &self.central, segment_count)
    }

    /// See [`conflict::has_conflicts`].
    pub fn has_conflicts(&self, segment_count: u8) -> bool {
        conflict::has_conflicts(segment_count, self.offset, &self.central)
    }

    /// See [`conflict::analyze_conflicts`].
    pub fn analyze_conflicts(&self, segment_count: u8) -> Conflicts {
        conflict::analyze_conflicts(self.offset, &self.central, segment_count)
    }

    /// Check a configuration before it is saved.
    ///
    /// # Errors
    ///
    /// Returns an address-conflict error if any addresses collide.
    pub fn validate(&self, segment_count: u8) -> Result<()> {
        if self.has_conflicts(segment_count) {
            return Err(KnxError::address_conflict());
        }
        knx_log!(info, "Segment GA validation passed - no conflicts detected");
        Ok(())
    }

    fn report_central_issues(&self) {
        if self.offset.is_zero() {
            knx_log!(
                warn,
                "Segment offset 0/0/0 maps every segment onto the central addresses"
            );
        }
        for kind in self.central.invalid_kinds() {
            knx_log!(warn, "Central {} address is invalid and will be skipped", kind);
        }
        for kind in AddressKind::ALL {
            if let Ok(addr) = calculator::try_parse_address(self.central.get(kind)) {
                if addr.is_unset() {
                    knx_log!(
                        warn,
                        "Central {} address 0/0/0 is indistinguishable from unset",
                        kind
                    );
                }
            }
        }
    }
}

fn parse_offset(value: &str) -> Result<u8> {
    value
        .parse::<u8>()
        .ok()
        .ok_or_else(KnxError::invalid_config_value)
}
