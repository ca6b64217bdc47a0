//! Per-segment address records.
//!
//! The table is the registration manager's view of segment communication
//! objects. It is rebuilt wholesale on every registration attempt and is
//! either fully populated or empty, never partially updated.

use crate::addressing::GroupAddress;
use crate::config::SegmentConfig;
use crate::error::{KnxError, Result};
use crate::segment::central::AddressKind;
use crate::segment::MAX_SEGMENTS;

/// The six derived addresses of one segment.
///
/// Kinds whose central address is missing, or whose derived address leaves
/// the KNX ranges, hold no address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SegmentAddresses {
    index: u8,
    in_power: GroupAddress,
    in_brightness: GroupAddress,
    in_effect: GroupAddress,
    out_power: GroupAddress,
    out_brightness: GroupAddress,
    out_effect: GroupAddress,
}

impl SegmentAddresses {
    /// Derive all six addresses of segment `index`.
    pub fn derive(config: &SegmentConfig, index: u8) -> Self {
        let addr = |kind| config.segment_address(kind, index);
        Self {
            index,
            in_power: addr(AddressKind::InPower),
            in_brightness: addr(AddressKind::InBrightness),
            in_effect: addr(AddressKind::InEffect),
            out_power: addr(AddressKind::OutPower),
            out_brightness: addr(AddressKind::OutBrightness),
            out_effect: addr(AddressKind::OutEffect),
        }
    }

    /// Segment index.
    pub const fn index(&self) -> u8 {
        self.index
    }

    /// Address of `kind`, `None` when it cannot be registered.
    pub const fn get(&self, kind: AddressKind) -> Option<GroupAddress> {
        let addr = match kind {
            AddressKind::InPower => self.in_power,
            AddressKind::InBrightness => self.in_brightness,
            AddressKind::InEffect => self.in_effect,
            AddressKind::OutPower => self.out_power,
            AddressKind::OutBrightness => self.out_brightness,
            AddressKind::OutEffect => self.out_effect,
        };
        addr.into_option()
    }

    /// Registrable `(kind, address)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (AddressKind, GroupAddress)> + '_ {
        AddressKind::ALL
            .into_iter()
            .filter_map(|kind| self.get(kind).map(|addr| (kind, addr)))
    }
}

/// Ordered per-segment address records, at most [`MAX_SEGMENTS`].
///
/// ```
/// use knx_segments::{AddressKind, GroupAddress, SegmentConfig, SegmentOffset, SegmentTable};
///
/// let mut config = SegmentConfig::new(SegmentOffset::new(1, 0, 10).unwrap());
/// config.central.set(AddressKind::InPower, "1/2/10").unwrap();
///
/// let table = SegmentTable::build(&config, 3).unwrap();
/// assert_eq!(table.len(), 3);
/// assert_eq!(
///     table.find(GroupAddress::encode(3, 2, 30)),
///     Some((2, AddressKind::InPower))
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentTable {
    segments: heapless::Vec<SegmentAddresses, { MAX_SEGMENTS as usize }>,
}

impl SegmentTable {
    /// Empty table.
    pub const fn new() -> Self {
        Self {
            segments: heapless::Vec::new(),
        }
    }

    /// Derive records for `segment_count` segments.
    ///
    /// # Errors
    ///
    /// Returns an address-conflict error, and no table, when any derived
    /// address collides.
    pub fn build(config: &SegmentConfig, segment_count: u8) -> Result<Self> {
        let conflicts = config.analyze_conflicts(segment_count);
        if !conflicts.is_empty() {
            for conflict in conflicts.iter() {
                knx_log!(
                    warn,
                    "Segment GA {} conflicts with existing GA",
                    conflict.address
                );
            }
            knx_log!(error, "GA conflicts detected! Skipping segment KO registration");
            return Err(KnxError::address_conflict());
        }

        let count = segment_count.min(MAX_SEGMENTS);
        let mut segments = heapless::Vec::new();
        for index in 0..count {
            // count is clamped to the capacity
            let _ = segments.push(SegmentAddresses::derive(config, index));
        }

        knx_log!(info, "Registering per-segment KOs for {} segments", count);
        Ok(Self { segments })
    }

    /// Replace the contents with a fresh [`build`](Self::build).
    ///
    /// On failure the table is left empty so that no stale addresses stay
    /// registered.
    pub fn rebuild(&mut self, config: &SegmentConfig, segment_count: u8) -> Result<()> {
        match Self::build(config, segment_count) {
            Ok(table) => {
                *self = table;
                Ok(())
            }
            Err(err) => {
                self.clear();
                Err(err)
            }
        }
    }

    /// Drop every record.
    pub fn clear(&mut self) {
        self.segments.clear();
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True when no segments are registered.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Record of segment `index`.
    pub fn get(&self, index: u8) -> Option<&SegmentAddresses> {
        self.segments.get(usize::from(index))
    }

    /// Records in segment order.
    pub fn iter(&self) -> core::slice::Iter<'_, SegmentAddresses> {
        self.segments.iter()
    }

    /// Resolve an incoming destination address to `(segment, kind)`.
    pub fn find(&self, address: GroupAddress) -> Option<(u8, AddressKind)> {
        if address.is_unset() {
            return None;
        }
        self.segments.iter().find_map(|segment| {
            segment
                .iter()
                .find(|&(_, addr)| addr == address)
                .map(|(kind, _)| (segment.index(), kind))
        })
    }
}

impl<'a> IntoIterator for &'a SegmentTable {
    type Item = &'a SegmentAddresses;
    type IntoIter = core::slice::Iter<'a, SegmentAddresses>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
