//! Central (whole-device) group addresses.

use core::fmt;

use crate::addressing::GroupAddress;
use crate::error::{KnxError, Result};
use crate::segment::calculator::parse_address;

/// Maximum length of a stored address text ("31/7/255" needs 8).
pub const ADDRESS_TEXT_CAPACITY: usize = 16;

/// Stored address text.
pub type AddressText = heapless::String<ADDRESS_TEXT_CAPACITY>;

/// The six communication object kinds that have a central address and one
/// derived address per segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AddressKind {
    /// Power command (DPT 1.001)
    InPower,
    /// Brightness command (DPT 5.001)
    InBrightness,
    /// Effect command (DPT 5.010)
    InEffect,
    /// Power status
    OutPower,
    /// Brightness status
    OutBrightness,
    /// Effect status
    OutEffect,
}

impl AddressKind {
    /// Number of kinds.
    pub const COUNT: usize = 6;

    /// All kinds in scan order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::InPower,
        Self::InBrightness,
        Self::InEffect,
        Self::OutPower,
        Self::OutBrightness,
        Self::OutEffect,
    ];

    /// Short human readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::InPower => "power in",
            Self::InBrightness => "brightness in",
            Self::InEffect => "effect in",
            Self::OutPower => "power out",
            Self::OutBrightness => "brightness out",
            Self::OutEffect => "effect out",
        }
    }

    /// Key of this kind's central address in the configuration text.
    pub const fn config_key(self) -> &'static str {
        match self {
            Self::InPower => "KNX_GA_IN_POWER",
            Self::InBrightness => "KNX_GA_IN_BRI",
            Self::InEffect => "KNX_GA_IN_FX",
            Self::OutPower => "KNX_GA_OUT_POWER",
            Self::OutBrightness => "KNX_GA_OUT_BRI",
            Self::OutEffect => "KNX_GA_OUT_FX",
        }
    }

    /// Inverse of [`config_key`](Self::config_key).
    pub fn from_config_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.config_key() == key)
    }
}

impl fmt::Display for AddressKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Textual central address per [`AddressKind`], as stored in configuration.
///
/// Empty text means "not configured"; it resolves to the unset sentinel.
///
/// ```
/// use knx_segments::{AddressKind, CentralAddressSet, GroupAddress};
///
/// let central = CentralAddressSet::new()
///     .with(AddressKind::InPower, "1/2/50")
///     .unwrap();
/// assert_eq!(central.resolve(AddressKind::InPower), GroupAddress::encode(1, 2, 50));
/// assert!(central.resolve(AddressKind::OutPower).is_unset());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CentralAddressSet {
    in_power: AddressText,
    in_brightness: AddressText,
    in_effect: AddressText,
    out_power: AddressText,
    out_brightness: AddressText,
    out_effect: AddressText,
}

impl CentralAddressSet {
    /// Set with no configured addresses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, kind: AddressKind, text: &str) -> Result<Self> {
        self.set(kind, text)?;
        Ok(self)
    }

    /// Store the address text for `kind`.
    ///
    /// The text is stored as given (trimmed); it is only parsed when
    /// resolved, so a malformed entry disables that kind rather than the
    /// whole set.
    ///
    /// # Errors
    ///
    /// Returns a text-too-long addressing error if the text does not fit.
    pub fn set(&mut self, kind: AddressKind, text: &str) -> Result<()> {
        let mut stored = AddressText::new();
        if stored.push_str(text.trim()).is_err() {
            return Err(KnxError::address_text_too_long());
        }
        *self.slot_mut(kind) = stored;
        Ok(())
    }

    /// Stored text for `kind`.
    pub fn get(&self, kind: AddressKind) -> &str {
        match kind {
            AddressKind::InPower => self.in_power.as_str(),
            AddressKind::InBrightness => self.in_brightness.as_str(),
            AddressKind::InEffect => self.in_effect.as_str(),
            AddressKind::OutPower => self.out_power.as_str(),
            AddressKind::OutBrightness => self.out_brightness.as_str(),
            AddressKind::OutEffect => self.out_effect.as_str(),
        }
    }

    /// Parsed, range checked address for `kind`, or the unset sentinel.
    pub fn resolve(&self, kind: AddressKind) -> GroupAddress {
        parse_address(self.get(kind))
    }

    /// All six resolved addresses, indexed in [`AddressKind::ALL`] order.
    pub fn resolve_all(&self) -> [GroupAddress; AddressKind::COUNT] {
        AddressKind::ALL.map(|kind| self.resolve(kind))
    }

    /// Kinds whose address text is configured but does not resolve.
    pub fn invalid_kinds(&self) -> impl Iterator<Item = AddressKind> + '_ {
        AddressKind::ALL
            .into_iter()
            .filter(|&kind| !self.get(kind).is_empty() && self.resolve(kind).is_unset())
    }

    fn slot_mut(&mut self, kind: AddressKind) -> &mut AddressText {
        match kind {
            AddressKind::InPower => &mut self.in_power,
            AddressKind::InBrightness => &mut self.in_brightness,
            AddressKind::InEffect => &mut self.in_effect,
            AddressKind::OutPower => &mut self.out_power,
            AddressKind::OutBrightness => &mut self.out_brightness,
            AddressKind::OutEffect => &mut self.out_effect,
        }
    }
}
