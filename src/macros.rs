//! Convenience macros for group addresses.

/// Creates a [`GroupAddress`](crate::addressing::GroupAddress) from 3-level
/// notation, checked at compile time.
///
/// # Examples
///
/// ```
/// use knx_segments::{ga, GroupAddress};
///
/// assert_eq!(ga!(1 / 2 / 50), GroupAddress::encode(1, 2, 50));
/// assert_eq!(ga!(31 / 7 / 255).raw(), 0xFFFF);
/// ```
///
/// Out-of-range components fail to compile:
///
/// ```compile_fail
/// let addr = knx_segments::ga!(32 / 0 / 0);
/// ```
///
/// ```compile_fail
/// let addr = knx_segments::ga!(1 / 8 / 0);
/// ```
#[macro_export]
macro_rules! ga {
    ($main:literal / $middle:literal / $sub:literal) => {{
        const ADDR: $crate::addressing::GroupAddress = {
            assert!($main <= 31, "Main group must be 0-31");
            assert!($middle <= 7, "Middle group must be 0-7");
            assert!($sub <= 255, "Sub group must be 0-255");
            $crate::addressing::GroupAddress::encode($main, $middle, $sub)
        };
        ADDR
    }};
}

#[cfg(test)]
mod tests {
    use crate::addressing::GroupAddress;

    #[test]
    fn test_ga_macro_basic() {
        assert_eq!(ga!(1 / 2 / 3), GroupAddress::from(0x0A03));
    }

    #[test]
    fn test_ga_macro_matches_checked_constructor() {
        assert_eq!(ga!(5 / 3 / 100), GroupAddress::new(5, 3, 100).unwrap());
        assert_eq!(ga!(0 / 0 / 1), GroupAddress::from(0x0001));
        assert_eq!(ga!(1 / 0 / 0), GroupAddress::from(0x0800));
    }
}
