//! Group address conflict detection.
//!
//! The live address set is every valid central address plus every valid
//! derived address for segments `0..segment_count` and all six kinds.
//! Unset (invalid or overflowing) addresses never take part.
//!
//! A conflict is any two distinct slots sharing an address, except segment 0
//! of a kind reproducing that same kind's central address.

use core::fmt;

use crate::addressing::GroupAddress;
use crate::segment::central::{AddressKind, CentralAddressSet};
use crate::segment::offset::SegmentOffset;
use crate::segment::{segment_address, MAX_SEGMENTS};

/// Upper bound on live addresses: central set plus one per kind and segment.
pub const MAX_USED_ADDRESSES: usize = AddressKind::COUNT * (MAX_SEGMENTS as usize + 1);

/// Live addresses, without duplicates, in scan order.
pub type UsedAddresses = heapless::Vec<GroupAddress, MAX_USED_ADDRESSES>;

/// Detected conflicts, one per colliding derived slot.
pub type Conflicts = heapless::Vec<Conflict, MAX_USED_ADDRESSES>;

/// Where an address comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AddressSlot {
    /// Communication object kind
    pub kind: AddressKind,
    /// Segment index, `None` for the central address
    pub segment: Option<u8>,
}

impl AddressSlot {
    const fn central(kind: AddressKind) -> Self {
        Self {
            kind,
            segment: None,
        }
    }

    const fn derived(kind: AddressKind, segment: u8) -> Self {
        Self {
            kind,
            segment: Some(segment),
        }
    }
}

impl fmt::Display for AddressSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.segment {
            Some(index) => write!(f, "segment {} {}", index, self.kind),
            None => write!(f, "central {}", self.kind),
        }
    }
}

/// Two slots mapped onto the same group address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Conflict {
    /// Shared address
    pub address: GroupAddress,
    /// Slot that already held the address
    pub existing: AddressSlot,
    /// Derived slot that collided with it
    pub colliding: AddressSlot,
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) conflicts with {}",
            self.address, self.colliding, self.existing
        )
    }
}

fn clamp_segment_count(segment_count: u8) -> u8 {
    if segment_count > MAX_SEGMENTS {
        knx_log!(
            warn,
            "Segment count {} exceeds limit, using {}",
            segment_count,
            MAX_SEGMENTS
        );
        MAX_SEGMENTS
    } else {
        segment_count
    }
}

/// Every derived slot with a valid address, in (segment, kind) order.
fn derived_slots(
    offset: SegmentOffset,
    central: &CentralAddressSet,
    segment_count: u8,
) -> impl Iterator<Item = (AddressSlot, GroupAddress)> + '_ {
    (0..clamp_segment_count(segment_count)).flat_map(move |index| {
        AddressKind::ALL.into_iter().filter_map(move |kind| {
            segment_address(central.get(kind), index, offset)
                .into_option()
                .map(|addr| (AddressSlot::derived(kind, index), addr))
        })
    })
}

/// All addresses that would be live if registration proceeded.
pub fn all_used_addresses(
    offset: SegmentOffset,
    central: &CentralAddressSet,
    segment_count: u8,
) -> UsedAddresses {
    let mut used = UsedAddresses::new();
    let central_addrs = central.resolve_all().into_iter().filter(|a| !a.is_unset());
    let derived = derived_slots(offset, central, segment_count).map(|(_, addr)| addr);

    for addr in central_addrs.chain(derived) {
        if !used.contains(&addr) {
            // capacity covers MAX_SEGMENTS segments of every kind
            let _ = used.push(addr);
        }
    }
    used
}

/// True iff `address` is in [`all_used_addresses`]. Unset is never in use.
pub fn is_in_use(
    address: GroupAddress,
    offset: SegmentOffset,
    central: &CentralAddressSet,
    segment_count: u8,
) -> bool {
    if address.is_unset() {
        return false;
    }
    central.resolve_all().contains(&address)
        || derived_slots(offset, central, segment_count).any(|(_, addr)| addr == address)
}

/// List every conflict among central and derived addresses.
///
/// Each derived slot is reported at most once, against the first slot that
/// already held its address (central slots first).
pub fn analyze_conflicts(
    offset: SegmentOffset,
    central: &CentralAddressSet,
    segment_count: u8,
) -> Conflicts {
    let central_addrs = central.resolve_all();
    let mut seen: heapless::Vec<(AddressSlot, GroupAddress), MAX_USED_ADDRESSES> =
        heapless::Vec::new();
    let mut conflicts = Conflicts::new();

    for (slot, addr) in derived_slots(offset, central, segment_count) {
        let central_hit = AddressKind::ALL
            .into_iter()
            .zip(central_addrs)
            .find(|&(kind, central_addr)| {
                central_addr == addr && (slot.segment != Some(0) || kind != slot.kind)
            })
            .map(|(kind, _)| AddressSlot::central(kind));

        let existing = central_hit.or_else(|| {
            seen.iter()
                .find(|&&(_, seen_addr)| seen_addr == addr)
                .map(|&(seen_slot, _)| seen_slot)
        });

        if let Some(existing) = existing {
            let _ = conflicts.push(Conflict {
                address: addr,
                existing,
                colliding: slot,
            });
        }
        let _ = seen.push((slot, addr));
    }
    conflicts
}

/// True when any two slots would share an address.
///
/// ```
/// use knx_segments::{has_conflicts, AddressKind, CentralAddressSet, SegmentOffset};
///
/// let central = CentralAddressSet::new()
///     .with(AddressKind::InPower, "1/2/50")
///     .unwrap();
/// assert!(!has_conflicts(3, SegmentOffset::new(1, 0, 10).unwrap(), &central));
/// assert!(has_conflicts(2, SegmentOffset::ZERO, &central));
/// ```
pub fn has_conflicts(segment_count: u8, offset: SegmentOffset, central: &CentralAddressSet) -> bool {
    let conflicts = analyze_conflicts(offset, central, segment_count);
    for conflict in conflicts.iter() {
        knx_log!(warn, "Segment GA conflict: {}", conflict);
    }
    !conflicts.is_empty()
}
