//! Error types for segment address mapping.
//!
//! Structured error categories with private kind enums, query helpers and a
//! captured backtrace when the `std` feature is enabled.

use core::fmt;

#[cfg(feature = "std")]
use std::backtrace::Backtrace;

/// Result type alias for address mapping operations.
pub type Result<T> = core::result::Result<T, KnxError>;

// =============================================================================
// Error Kind Enums (Internal)
// =============================================================================

/// Addressing error variants (internal)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) enum AddressingErrorKind {
    InvalidGroupAddress,
    OutOfRange,
    TextTooLong,
}

/// Configuration error variants (internal)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) enum ConfigurationErrorKind {
    MalformedLine,
    InvalidValue,
    OffsetOutOfRange,
}

/// Segment mapping error variants (internal)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) enum SegmentErrorKind {
    AddressConflict,
}

// =============================================================================
// Main Error Type
// =============================================================================

/// Segment address mapping error.
///
/// Every failure of this crate is local and recoverable. The caller decides
/// whether a failure disables a single communication object or a whole batch.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KnxError {
    /// Group address text or range errors
    Addressing(AddressingError),
    /// Configuration loading errors
    Configuration(ConfigurationError),
    /// Per-segment mapping errors (conflicts)
    Segment(SegmentError),
}

// =============================================================================
// Structured Error Types
// =============================================================================

/// Addressing error with optional backtrace
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AddressingError {
    kind: AddressingErrorKind,
    #[cfg(feature = "std")]
    backtrace: Backtrace,
}

impl AddressingError {
    pub(crate) fn new(kind: AddressingErrorKind) -> Self {
        Self {
            kind,
            #[cfg(feature = "std")]
            backtrace: Backtrace::capture(),
        }
    }

    /// Check if the address text could not be parsed
    pub fn is_parse_failure(&self) -> bool {
        matches!(self.kind, AddressingErrorKind::InvalidGroupAddress)
    }

    /// Check if address is out of range
    pub fn is_out_of_range(&self) -> bool {
        matches!(self.kind, AddressingErrorKind::OutOfRange)
    }

    /// Check if the address text does not fit its storage
    pub fn is_text_too_long(&self) -> bool {
        matches!(self.kind, AddressingErrorKind::TextTooLong)
    }
}

/// Configuration error with optional backtrace
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConfigurationError {
    kind: ConfigurationErrorKind,
    #[cfg(feature = "std")]
    backtrace: Backtrace,
}

impl ConfigurationError {
    pub(crate) fn new(kind: ConfigurationErrorKind) -> Self {
        Self {
            kind,
            #[cfg(feature = "std")]
            backtrace: Backtrace::capture(),
        }
    }

    /// Check if a line is not in `KEY=VALUE` form
    pub fn is_malformed_line(&self) -> bool {
        matches!(self.kind, ConfigurationErrorKind::MalformedLine)
    }

    /// Check if a value could not be parsed
    pub fn is_invalid_value(&self) -> bool {
        matches!(self.kind, ConfigurationErrorKind::InvalidValue)
    }

    /// Check if a segment offset exceeds its field width
    pub fn is_offset_out_of_range(&self) -> bool {
        matches!(self.kind, ConfigurationErrorKind::OffsetOutOfRange)
    }
}

/// Segment mapping error with optional backtrace
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SegmentError {
    kind: SegmentErrorKind,
    #[cfg(feature = "std")]
    backtrace: Backtrace,
}

impl SegmentError {
    pub(crate) fn new(kind: SegmentErrorKind) -> Self {
        Self {
            kind,
            #[cfg(feature = "std")]
            backtrace: Backtrace::capture(),
        }
    }

    /// Check if derived addresses collide
    pub fn is_address_conflict(&self) -> bool {
        matches!(self.kind, SegmentErrorKind::AddressConflict)
    }
}

// =============================================================================
// Convenience Constructors for KnxError
// =============================================================================

impl KnxError {
    // Addressing errors
    pub(crate) fn invalid_group_address() -> Self {
        Self::Addressing(AddressingError::new(AddressingErrorKind::InvalidGroupAddress))
    }

    pub(crate) fn address_out_of_range() -> Self {
        Self::Addressing(AddressingError::new(AddressingErrorKind::OutOfRange))
    }

    pub(crate) fn address_text_too_long() -> Self {
        Self::Addressing(AddressingError::new(AddressingErrorKind::TextTooLong))
    }

    // Configuration errors
    pub(crate) fn malformed_config_line() -> Self {
        Self::Configuration(ConfigurationError::new(ConfigurationErrorKind::MalformedLine))
    }

    pub(crate) fn invalid_config_value() -> Self {
        Self::Configuration(ConfigurationError::new(ConfigurationErrorKind::InvalidValue))
    }

    pub(crate) fn offset_out_of_range() -> Self {
        Self::Configuration(ConfigurationError::new(ConfigurationErrorKind::OffsetOutOfRange))
    }

    // Segment errors
    pub(crate) fn address_conflict() -> Self {
        Self::Segment(SegmentError::new(SegmentErrorKind::AddressConflict))
    }

    /// Malformed or empty address text.
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, Self::Addressing(e) if e.is_parse_failure())
    }

    /// Address fields exceed the KNX field widths.
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Self::Addressing(e) if e.is_out_of_range())
    }

    /// Derived addresses collide with each other or with central addresses.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Segment(e) if e.is_address_conflict())
    }
}

// =============================================================================
// Display Implementation
// =============================================================================

impl fmt::Display for KnxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KnxError::Addressing(e) => write!(f, "Addressing error: {:?}", e.kind),
            KnxError::Configuration(e) => write!(f, "Configuration error: {:?}", e.kind),
            KnxError::Segment(e) => write!(f, "Segment error: {:?}", e.kind),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for KnxError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_helpers() {
        assert!(KnxError::invalid_group_address().is_parse_failure());
        assert!(!KnxError::invalid_group_address().is_out_of_range());
        assert!(KnxError::address_out_of_range().is_out_of_range());
        assert!(KnxError::address_conflict().is_conflict());
        assert!(!KnxError::offset_out_of_range().is_conflict());
    }

    #[test]
    fn test_display() {
        let err = KnxError::address_out_of_range();
        assert_eq!(format!("{}", err), "Addressing error: OutOfRange");

        let err = KnxError::address_conflict();
        assert_eq!(format!("{}", err), "Segment error: AddressConflict");
    }
}
