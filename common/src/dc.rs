//! Tri-state DC motor output driver for the declination and focus axes.
//!
//! Each axis has two mutually exclusive direction pins into an H-bridge
//! stage. Both pins asserted at once would short the driver, so every
//! transition breaks both pins, waits out the settling delay, then makes
//! at most one.

use crate::hal::{CorrectorHal, Pin};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AxisMode {
    #[default]
    Off,
    Forward,
    Reverse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    Dec,
    Focus,
}

impl Axis {
    /// (forward pin, reverse pin)
    fn pins(self) -> (Pin, Pin) {
        match self {
            Axis::Dec => (Pin::DecPlus, Pin::DecMinus),
            Axis::Focus => (Pin::FocusIn, Pin::FocusOut),
        }
    }
}

#[derive(Debug)]
pub struct DcAxis {
    axis: Axis,
    mode: AxisMode,
}

impl DcAxis {
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            mode: AxisMode::Off,
        }
    }

    /// Transition to the requested mode. A no-op when the mode is
    /// unchanged or the global output inhibit is active, so repeated
    /// calls with the same mode touch no pins.
    pub fn set_mode<H: CorrectorHal>(&mut self, hal: &mut H, want: AxisMode, inhibit: bool) {
        if want == self.mode || inhibit {
            return;
        }
        let (fwd, rev) = self.axis.pins();
        hal.pin_write(fwd, false);
        hal.pin_write(rev, false);
        hal.settle_delay();
        match want {
            AxisMode::Forward => hal.pin_write(fwd, true),
            AxisMode::Reverse => hal.pin_write(rev, true),
            AxisMode::Off => {}
        }
        self.mode = want;
    }

    pub fn mode(&self) -> AxisMode {
        self.mode
    }

    /// Axis is actively correcting; feeds the status indicator.
    pub fn active(&self) -> bool {
        self.mode != AxisMode::Off
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testhal::{Event, TestHal};

    #[test]
    fn set_mode_is_idempotent() {
        let mut hal = TestHal::new();
        let mut axis = DcAxis::new(Axis::Focus);

        axis.set_mode(&mut hal, AxisMode::Forward, false);
        let writes = hal.events.len();
        axis.set_mode(&mut hal, AxisMode::Forward, false);
        assert_eq!(hal.events.len(), writes, "repeat call must touch no pins");
    }

    #[test]
    fn direction_pins_never_overlap() {
        let mut hal = TestHal::new();
        let mut axis = DcAxis::new(Axis::Dec);

        axis.set_mode(&mut hal, AxisMode::Forward, false);
        axis.set_mode(&mut hal, AxisMode::Reverse, false);
        axis.set_mode(&mut hal, AxisMode::Forward, false);
        axis.set_mode(&mut hal, AxisMode::Off, false);

        let mut plus = false;
        let mut minus = false;
        for e in &hal.events {
            if let Event::PinWrite(pin, level) = *e {
                match pin {
                    Pin::DecPlus => plus = level,
                    Pin::DecMinus => minus = level,
                    _ => {}
                }
            }
            assert!(!(plus && minus), "H-bridge shoot-through");
        }
    }

    #[test]
    fn transition_breaks_then_settles_then_makes() {
        let mut hal = TestHal::new();
        let mut axis = DcAxis::new(Axis::Focus);
        axis.set_mode(&mut hal, AxisMode::Reverse, false);

        assert_eq!(
            hal.events,
            [
                Event::PinWrite(Pin::FocusIn, false),
                Event::PinWrite(Pin::FocusOut, false),
                Event::Settle,
                Event::PinWrite(Pin::FocusOut, true),
            ]
        );
    }

    #[test]
    fn inhibit_blocks_engagement() {
        let mut hal = TestHal::new();
        let mut axis = DcAxis::new(Axis::Dec);
        axis.set_mode(&mut hal, AxisMode::Forward, true);
        assert!(hal.events.is_empty());
        assert_eq!(axis.mode(), AxisMode::Off);
        assert!(!axis.active());
    }

    #[test]
    fn active_reflects_mode() {
        let mut hal = TestHal::new();
        let mut axis = DcAxis::new(Axis::Focus);
        assert!(!axis.active());
        axis.set_mode(&mut hal, AxisMode::Forward, false);
        assert!(axis.active());
        axis.set_mode(&mut hal, AxisMode::Off, false);
        assert!(!axis.active());
    }
}
