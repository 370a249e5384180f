//! Saturating up/down debounce for mechanical switch inputs.

/// Outcome of one debounce observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Decision {
    /// Counter is pinned at the threshold.
    Asserted,
    /// Counter is pinned at zero.
    Deasserted,
    /// Counter is in between; the caller holds its previous decision.
    Unsettled,
}

/// One saturating counter per monitored switch. The counter increments
/// while the raw input reads asserted and decrements while it reads
/// deasserted, never leaving `0..=threshold`. A settled decision flips
/// only after `threshold` consecutive consistent samples.
#[derive(Debug, Clone)]
pub struct Debounce {
    count: u8,
    threshold: u8,
}

/// Default threshold: ten consistent samples at the ~1 ms poll period.
pub const DEBOUNCE_THRESHOLD: u8 = 10;

impl Debounce {
    pub fn new(threshold: u8) -> Self {
        Self { count: 0, threshold }
    }

    pub fn observe(&mut self, raw: bool) -> Decision {
        if raw {
            if self.count < self.threshold {
                self.count += 1;
            }
        } else if self.count > 0 {
            self.count -= 1;
        }
        if self.count == self.threshold {
            Decision::Asserted
        } else if self.count == 0 {
            Decision::Deasserted
        } else {
            Decision::Unsettled
        }
    }
}

impl Default for Debounce {
    fn default() -> Self {
        Self::new(DEBOUNCE_THRESHOLD)
    }
}
