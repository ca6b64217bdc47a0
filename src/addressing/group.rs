//! KNX Group Address implementation.
//!
//! Group addresses are written in 3-level form Main/Middle/Sub (e.g. 1/2/3)
//! and stored as 16 bits:
//! - Main: 5 bits (0-31)
//! - Middle: 3 bits (0-7)
//! - Sub: 8 bits (0-255)
//!
//! The raw value 0 doubles as the "unset" sentinel, so the literal address
//! `0/0/0` cannot be told apart from a missing one.

use crate::error::{KnxError, Result};
use core::fmt;

/// KNX Group Address
///
/// # Examples
///
/// ```
/// use knx_segments::GroupAddress;
///
/// let addr = GroupAddress::new(1, 2, 3).unwrap();
/// assert_eq!(addr.to_string(), "1/2/3");
/// assert_eq!(u16::from(addr), 0x0A03);
///
/// let addr: GroupAddress = "1/2/50".parse().unwrap();
/// assert_eq!(addr, GroupAddress::encode(1, 2, 50));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupAddress {
    raw: u16,
}

impl GroupAddress {
    /// Maximum main group value (5 bits)
    pub const MAX_MAIN: u8 = 31;
    /// Maximum middle group value (3 bits)
    pub const MAX_MIDDLE: u8 = 7;
    /// Maximum sub group value (8 bits)
    pub const MAX_SUB: u8 = 255;

    /// Sentinel for an invalid, unparseable or out-of-range address.
    pub const UNSET: Self = Self { raw: 0 };

    /// Create a new 3-level Group Address (Main/Middle/Sub).
    ///
    /// # Errors
    ///
    /// Returns an out-of-range addressing error if `main > 31` or `middle > 7`.
    pub fn new(main: u8, middle: u8, sub: u8) -> Result<Self> {
        if main > Self::MAX_MAIN || middle > Self::MAX_MIDDLE {
            return Err(KnxError::address_out_of_range());
        }
        Ok(Self::encode(u16::from(main), u16::from(middle), u16::from(sub)))
    }

    /// Pack three fields into a group address.
    ///
    /// High bits beyond each field's width are masked off. This is not a
    /// validation step: range check the fields first (see
    /// [`GroupAddressFields::to_group_address`]).
    #[inline]
    pub const fn encode(main: u16, middle: u16, sub: u16) -> Self {
        Self {
            raw: ((main & 0x1F) << 11) | ((middle & 0x07) << 8) | (sub & 0xFF),
        }
    }

    /// Get the raw u16 representation of the address.
    #[inline(always)]
    pub const fn raw(self) -> u16 {
        self.raw
    }

    /// Get the main group component (0-31).
    #[inline(always)]
    pub const fn main(self) -> u8 {
        ((self.raw >> 11) & 0x1F) as u8
    }

    /// Get the middle group component (0-7).
    #[inline(always)]
    pub const fn middle(self) -> u8 {
        ((self.raw >> 8) & 0x07) as u8
    }

    /// Get the sub group component (0-255).
    #[inline(always)]
    pub const fn sub(self) -> u8 {
        (self.raw & 0xFF) as u8
    }

    /// True for the zero sentinel.
    #[inline(always)]
    pub const fn is_unset(self) -> bool {
        self.raw == 0
    }

    /// `None` for the zero sentinel, the address otherwise.
    #[inline]
    pub const fn into_option(self) -> Option<Self> {
        if self.is_unset() {
            None
        } else {
            Some(self)
        }
    }

    /// Format as 3-level string without allocating.
    pub fn to_string_3level(&self) -> heapless::String<16> {
        use core::fmt::Write;
        let mut s = heapless::String::new();
        // "31/7/255" is at most 8 bytes
        let _ = write!(s, "{}/{}/{}", self.main(), self.middle(), self.sub());
        s
    }
}

impl Default for GroupAddress {
    fn default() -> Self {
        Self::UNSET
    }
}

impl From<u16> for GroupAddress {
    #[inline(always)]
    fn from(raw: u16) -> Self {
        Self { raw }
    }
}

impl From<GroupAddress> for u16 {
    #[inline(always)]
    fn from(addr: GroupAddress) -> u16 {
        addr.raw
    }
}

impl fmt::Display for GroupAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.main(), self.middle(), self.sub())
    }
}

impl core::str::FromStr for GroupAddress {
    type Err = KnxError;

    fn from_str(s: &str) -> Result<Self> {
        s.parse::<GroupAddressFields>()?.to_group_address()
    }
}

/// The three fields of a parsed `main/middle/sub` text, not yet range checked.
///
/// Fields are kept 32 bits wide so that offset arithmetic can detect overflow
/// instead of wrapping.
///
/// ```
/// use knx_segments::GroupAddressFields;
///
/// let fields: GroupAddressFields = "99/9/999".parse().unwrap();
/// assert_eq!(fields.main, 99);
/// assert!(fields.to_group_address().unwrap_err().is_out_of_range());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GroupAddressFields {
    /// Main group
    pub main: u32,
    /// Middle group
    pub middle: u32,
    /// Sub group
    pub sub: u32,
}

impl GroupAddressFields {
    /// Parse `main/middle/sub`: exactly three unsigned decimal fields.
    pub fn parse(text: &str) -> Result<Self> {
        let mut parts = text.trim().split('/');

        let mut next_field = || {
            parts
                .next()
                .and_then(|s| s.parse::<u32>().ok())
                .ok_or_else(KnxError::invalid_group_address)
        };
        let main = next_field()?;
        let middle = next_field()?;
        let sub = next_field()?;

        if parts.next().is_some() {
            return Err(KnxError::invalid_group_address());
        }

        Ok(Self { main, middle, sub })
    }

    /// True when every field fits its KNX width.
    pub const fn is_in_range(&self) -> bool {
        self.main <= GroupAddress::MAX_MAIN as u32
            && self.middle <= GroupAddress::MAX_MIDDLE as u32
            && self.sub <= GroupAddress::MAX_SUB as u32
    }

    /// Range check, then pack.
    pub fn to_group_address(self) -> Result<GroupAddress> {
        if !self.is_in_range() {
            return Err(KnxError::address_out_of_range());
        }
        Ok(GroupAddress::encode(
            self.main as u16,
            self.middle as u16,
            self.sub as u16,
        ))
    }
}

impl core::str::FromStr for GroupAddressFields {
    type Err = KnxError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<GroupAddress> for GroupAddressFields {
    fn from(addr: GroupAddress) -> Self {
        Self {
            main: u32::from(addr.main()),
            middle: u32::from(addr.middle()),
            sub: u32::from(addr.sub()),
        }
    }
}
