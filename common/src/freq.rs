//! Timer reload tables for the AC drive frequency.
//!
//! Counts were searched offline against a 64 MHz clock with the 1:64
//! prescaler: the count clock runs at 250 kHz, the interrupt rate for a
//! reload count `n` is `250000 / (65025 - n + 1)`, and the motor sees one
//! AC period per four interrupts.

/// Number of discrete speed steps.
pub const SPEED_STEPS: usize = 10;

/// Motor stopped, east limit. The timer keeps running at this index but
/// phase output is suppressed.
pub const SPEED_EAST: u8 = 0;

/// Lunar tracking rate (58.696 Hz on 60 Hz mains, 48.912 Hz on 50 Hz).
pub const SPEED_LUNAR: u8 = 4;

/// Sidereal tracking rate, the nominal target.
pub const SPEED_SIDEREAL: u8 = 5;

/// Fastest westward correction rate.
pub const SPEED_WEST: u8 = 9;

/// One table of reload counts, indexed by speed step.
pub type FreqTable = [u16; SPEED_STEPS];

/// Reload counts for 60 Hz mains synchronous motors.
/// Targets: 15, 15, 30, 45, 58.696 (lunar), 60 (sidereal), 75, 90, 105, 120 Hz.
pub static FREQ_60HZ: FreqTable = [
    60859, 60859, 62943, 63637, 63961, 63984, 64193, 64332, 64431, 64505,
];

/// Reload counts for 50 Hz mains motors. Only the lunar and sidereal
/// entries differ from the 60 Hz table.
pub static FREQ_50HZ: FreqTable = [
    60859, 60859, 62943, 63637, 63748, 63776, 64193, 64332, 64431, 64505,
];

/// Fixed compensation added to every reload for the interrupt latency
/// between timer expiry and the reload write.
pub const RELOAD_FUDGE: u16 = 12;
