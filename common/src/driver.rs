//! Main-loop orchestration: polls the controls, merges the remote mask,
//! feeds the phase generator its target, and drives the DC outputs, lamp,
//! and indicator.
//!
//! Ownership discipline: the timer ISR is the sole writer of the phase
//! generator's active index and cycle state; this loop is the sole writer
//! of its target, override, and table, and brackets those writes in a
//! masked-timer critical section. The bus ISR is the sole writer of the
//! register file.

use crate::buttons::{ButtonPoller, Buttons};
use crate::dc::{Axis, DcAxis};
use crate::freq::{FREQ_50HZ, FREQ_60HZ, SPEED_SIDEREAL};
use crate::hal::{CorrectorHal, Pin};
use crate::indicator::Indicator;
use crate::phase::PhaseGenerator;
use crate::registers::RegisterFile;

pub struct DriveCorrector {
    poller: ButtonPoller,
    dec: DcAxis,
    focus: DcAxis,
    indicator: Indicator,
    last_target: u8,
}

impl DriveCorrector {
    pub fn new() -> Self {
        Self {
            poller: ButtonPoller::new(),
            dec: DcAxis::new(Axis::Dec),
            focus: DcAxis::new(Axis::Focus),
            indicator: Indicator::new(),
            last_target: SPEED_SIDEREAL,
        }
    }

    /// Run one iteration of the main loop. Never blocks beyond the
    /// busy-waited ADC conversions inside the HAL.
    pub fn poll<H: CorrectorHal>(
        &mut self,
        hal: &mut H,
        phase: &mut PhaseGenerator,
        regs: &RegisterFile,
    ) {
        let remote = Buttons::from_bits_truncate(regs.buttons_mask());
        let ctl = self.poller.poll(hal, remote);

        // Multi-field update of timer-ISR-visible state: mask its
        // interrupt so a tick cannot observe a half-applied change.
        hal.mask_timer_irq();
        phase.set_table(if ctl.table_50hz { &FREQ_50HZ } else { &FREQ_60HZ });
        phase.set_target(ctl.target_speed);
        phase.set_override(regs.ac_reload());
        hal.unmask_timer_irq();

        if ctl.target_speed != self.last_target {
            match ctl.target_speed {
                s if s == SPEED_SIDEREAL => hal.log("ra: tracking"),
                s if s < SPEED_SIDEREAL => hal.log("ra: slewing east"),
                _ => hal.log("ra: slewing west"),
            }
            self.last_target = ctl.target_speed;
        }

        let inhibited = phase.is_inhibited();
        self.dec.set_mode(hal, ctl.dec_mode, inhibited);
        self.focus.set_mode(hal, ctl.focus_mode, inhibited);
        hal.pin_write(Pin::Lamp, ctl.lamp);

        let correcting = self.dec.active() || self.focus.active();
        self.indicator.update(
            hal,
            inhibited,
            correcting,
            ctl.target_speed == SPEED_SIDEREAL,
        );
    }
}

impl Default for DriveCorrector {
    fn default() -> Self {
        Self::new()
    }
}
