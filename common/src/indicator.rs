//! Status LED: blinks while the startup inhibit runs, steady on while any
//! correction is active or the tracking rate is off sidereal, steady off
//! when everything is nominal.

use crate::hal::{CorrectorHal, Pin};

/// Half period of the startup blink, counted in main-loop iterations (the
/// loop period is only approximately regular, which is fine for a lamp).
pub const BLINK_HALF_PERIOD: u16 = 256;

#[derive(Debug, Default)]
pub struct Indicator {
    counter: u16,
    lit: bool,
}

impl Indicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update<H: CorrectorHal>(
        &mut self,
        hal: &mut H,
        inhibited: bool,
        correcting: bool,
        tracking_nominal: bool,
    ) {
        if inhibited {
            self.counter += 1;
            if self.counter >= BLINK_HALF_PERIOD {
                self.counter = 0;
                self.lit = !self.lit;
            }
        } else {
            self.counter = 0;
            self.lit = correcting || !tracking_nominal;
        }
        hal.pin_write(Pin::Status, self.lit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testhal::TestHal;

    #[test]
    fn blinks_while_inhibited() {
        let mut hal = TestHal::new();
        let mut ind = Indicator::new();

        for _ in 0..BLINK_HALF_PERIOD {
            ind.update(&mut hal, true, false, true);
        }
        assert!(hal.pin(Pin::Status));
        for _ in 0..BLINK_HALF_PERIOD {
            ind.update(&mut hal, true, false, true);
        }
        assert!(!hal.pin(Pin::Status));
    }

    #[test]
    fn steady_on_while_correcting() {
        let mut hal = TestHal::new();
        let mut ind = Indicator::new();
        for _ in 0..1000 {
            ind.update(&mut hal, false, true, true);
            assert!(hal.pin(Pin::Status));
        }
    }

    #[test]
    fn steady_on_when_rate_off_sidereal() {
        let mut hal = TestHal::new();
        let mut ind = Indicator::new();
        ind.update(&mut hal, false, false, false);
        assert!(hal.pin(Pin::Status));
    }

    #[test]
    fn steady_off_when_nominal() {
        let mut hal = TestHal::new();
        let mut ind = Indicator::new();
        for _ in 0..1000 {
            ind.update(&mut hal, false, false, true);
            assert!(!hal.pin(Pin::Status));
        }
    }
}
