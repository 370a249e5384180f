//! Tri-level classification of a multiplexed analog input.
//!
//! Two buttons share one ADC channel through a resistor divider: one pulls
//! the node low, the other pulls it high, and neither leaves it near the
//! mid-rail. Thresholds sit at nominal 2 V and 4 V of a 10-bit 0-5 V
//! conversion.

/// 2 V in 10-bit counts (1024 * 2 / 5).
pub const LOW_COUNTS: u16 = 410;

/// 4 V in 10-bit counts (1024 * 4 / 5).
pub const HIGH_COUNTS: u16 = 819;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low,
    Mid,
    High,
}

/// Classify one conversion. Samples exactly at a threshold fall in `Mid`,
/// so both boundaries are inclusive on the neutral side.
pub fn classify(sample: u16) -> Level {
    if sample < LOW_COUNTS {
        Level::Low
    } else if sample > HIGH_COUNTS {
        Level::High
    } else {
        Level::Mid
    }
}
