//! AC phase generator: a 4-step interrupt-clocked cycle producing the
//! two-phase drive waveform for the synchronous RA motor.
//!
//! Each timer interrupt advances the cycle by one step, so four interrupts
//! make one AC period at the tabulated frequency. The active speed index
//! steps toward the target by at most one entry per completed cycle, which
//! bounds the frequency slew and keeps the motor in sync.

use crate::freq::{FreqTable, RELOAD_FUDGE, SPEED_EAST, SPEED_WEST};
use crate::hal::{CorrectorHal, Pin};

/// Cycle position. `Idle` is occupied only before the first tick; after
/// that the cycle boundary is `Phase2Clear`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    Idle,
    Phase1Set,
    Phase1Clear,
    Phase2Set,
    Phase2Clear,
}

impl Phase {
    /// Pure transition: Idle -> P1Set -> P1Clear -> P2Set -> P2Clear -> P1Set...
    pub fn next(self) -> Phase {
        match self {
            Phase::Idle | Phase::Phase2Clear => Phase::Phase1Set,
            Phase::Phase1Set => Phase::Phase1Clear,
            Phase::Phase1Clear => Phase::Phase2Set,
            Phase::Phase2Set => Phase::Phase2Clear,
        }
    }
}

/// Ticks of output inhibit after power-up, letting the supply rails and
/// drive stage settle before the motor sees current. Roughly four seconds
/// at the sidereal interrupt rate.
pub const STARTUP_DELAY_TICKS: u32 = 960;

/// State owned by the timer ISR. `set_target`, `set_override` and
/// `set_table` are the only mutators called from outside and must run
/// with the timer interrupt masked.
#[derive(Debug)]
pub struct PhaseGenerator {
    phase: Phase,
    active: u8,
    target: u8,
    startup_delay: u32,
    override_reload: u16,
    table: &'static FreqTable,
}

impl PhaseGenerator {
    pub fn new(table: &'static FreqTable, target: u8) -> Self {
        Self::with_startup_delay(table, target, STARTUP_DELAY_TICKS)
    }

    /// Construct with an explicit startup delay, for boards whose supply
    /// settles faster (or bench setups that want none).
    pub fn with_startup_delay(table: &'static FreqTable, target: u8, delay_ticks: u32) -> Self {
        Self {
            phase: Phase::Idle,
            active: SPEED_EAST,
            target: target.min(SPEED_WEST),
            startup_delay: delay_ticks,
            override_reload: 0,
            table,
        }
    }

    /// Service one timer interrupt: advance the phase cycle, drive the
    /// phase pins unless output is suppressed, converge the active index
    /// at the cycle boundary, and reload the timer. The timer is reloaded
    /// on every tick so convergence keeps working while output is
    /// suppressed.
    pub fn on_timer_tick<H: CorrectorHal>(&mut self, hal: &mut H) {
        let inhibited = if self.startup_delay > 0 {
            self.startup_delay -= 1;
            true
        } else {
            false
        };
        let suppress = inhibited || self.active == SPEED_EAST;

        let next = self.phase.next();
        match next {
            Phase::Phase1Set => {
                if !suppress {
                    hal.pin_write(Pin::SqWave, true);
                    hal.pin_write(Pin::Phase1, true);
                }
            }
            Phase::Phase1Clear => {
                if !suppress {
                    hal.pin_write(Pin::Phase1, false);
                }
            }
            Phase::Phase2Set => {
                if !suppress {
                    hal.pin_write(Pin::SqWave, false);
                    hal.pin_write(Pin::Phase2, true);
                }
            }
            Phase::Phase2Clear => {
                if !suppress {
                    hal.pin_write(Pin::Phase2, false);
                }
                // Cycle complete: step the active index toward the target.
                if self.active < self.target {
                    self.active += 1;
                } else if self.active > self.target {
                    self.active -= 1;
                }
            }
            // next() never yields Idle; defensive no-op.
            Phase::Idle => {}
        }
        self.phase = next;

        let reload = if self.override_reload != 0 {
            self.override_reload
        } else {
            self.table[self.active as usize].wrapping_add(RELOAD_FUDGE)
        };
        hal.timer_reload(reload);
    }

    /// Set the speed index to converge toward. Out-of-range values clamp
    /// to the west limit.
    pub fn set_target(&mut self, index: u8) {
        self.target = index.min(SPEED_WEST);
    }

    /// Force the timer reload count, bypassing the table. 0 disables the
    /// override. Test and calibration escape hatch.
    pub fn set_override(&mut self, count: u16) {
        self.override_reload = count;
    }

    /// Swap the frequency table (50 Hz vs 60 Hz mains motors). Takes
    /// effect at the next reload.
    pub fn set_table(&mut self, table: &'static FreqTable) {
        self.table = table;
    }

    pub fn active(&self) -> u8 {
        self.active
    }

    pub fn target(&self) -> u8 {
        self.target
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Startup delay still running; DC outputs and the indicator treat
    /// this as a global output inhibit.
    pub fn is_inhibited(&self) -> bool {
        self.startup_delay > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::freq::{FREQ_60HZ, SPEED_SIDEREAL};
    use crate::testhal::TestHal;

    fn warmed_up(target: u8) -> PhaseGenerator {
        PhaseGenerator::with_startup_delay(&FREQ_60HZ, target, 0)
    }

    fn run_cycles<H: CorrectorHal>(gen: &mut PhaseGenerator, hal: &mut H, cycles: usize) {
        for _ in 0..cycles * 4 {
            gen.on_timer_tick(hal);
        }
    }

    #[test]
    fn phase_sequence_wraps_through_four_states() {
        let mut p = Phase::Idle;
        let expect = [
            Phase::Phase1Set,
            Phase::Phase1Clear,
            Phase::Phase2Set,
            Phase::Phase2Clear,
            Phase::Phase1Set,
        ];
        for e in expect {
            p = p.next();
            assert_eq!(p, e);
        }
    }

    #[test]
    fn converges_one_step_per_cycle_without_overshoot() {
        let mut hal = TestHal::new();
        let mut gen = warmed_up(SPEED_SIDEREAL);
        assert_eq!(gen.active(), SPEED_EAST);

        for cycle in 1..=SPEED_SIDEREAL {
            run_cycles(&mut gen, &mut hal, 1);
            assert_eq!(gen.active(), cycle);
            assert_eq!(gen.phase(), Phase::Phase2Clear);
        }
        // Target reached: further cycles leave the index alone.
        run_cycles(&mut gen, &mut hal, 3);
        assert_eq!(gen.active(), SPEED_SIDEREAL);
    }

    #[test]
    fn target_change_midcycle_applies_at_cycle_boundary() {
        let mut hal = TestHal::new();
        let mut gen = warmed_up(SPEED_SIDEREAL);
        run_cycles(&mut gen, &mut hal, 5);
        assert_eq!(gen.active(), SPEED_SIDEREAL);

        // Two ticks into a cycle, retarget east.
        gen.on_timer_tick(&mut hal);
        gen.on_timer_tick(&mut hal);
        assert_eq!(gen.phase(), Phase::Phase1Clear);
        gen.set_target(SPEED_EAST);
        gen.on_timer_tick(&mut hal);
        gen.on_timer_tick(&mut hal);
        assert_eq!(gen.active(), SPEED_SIDEREAL - 1);
    }

    #[test]
    fn ramp_to_east_suppresses_output_but_timer_runs() {
        let mut hal = TestHal::new();
        let mut gen = warmed_up(SPEED_SIDEREAL);
        run_cycles(&mut gen, &mut hal, 5);
        assert_eq!(gen.active(), SPEED_SIDEREAL);

        gen.set_target(SPEED_EAST);
        run_cycles(&mut gen, &mut hal, 5);
        assert_eq!(gen.active(), SPEED_EAST);

        // Subsequent cycles: no pin activity, but reloads continue.
        hal.events.clear();
        let reloads_before = hal.reloads.len();
        run_cycles(&mut gen, &mut hal, 2);
        assert!(hal.pin_writes().is_empty());
        assert_eq!(hal.reloads.len(), reloads_before + 8);
    }

    #[test]
    fn reload_tracks_active_index_plus_fudge() {
        let mut hal = TestHal::new();
        let mut gen = warmed_up(SPEED_SIDEREAL);
        run_cycles(&mut gen, &mut hal, SPEED_SIDEREAL as usize + 2);
        assert_eq!(
            *hal.reloads.last().unwrap(),
            FREQ_60HZ[SPEED_SIDEREAL as usize] + RELOAD_FUDGE
        );
    }

    #[test]
    fn override_replaces_table_lookup() {
        let mut hal = TestHal::new();
        let mut gen = warmed_up(SPEED_SIDEREAL);
        gen.set_override(0xf000);
        run_cycles(&mut gen, &mut hal, 2);
        assert!(hal.reloads.iter().all(|&r| r == 0xf000));

        gen.set_override(0);
        hal.reloads.clear();
        gen.on_timer_tick(&mut hal);
        assert_ne!(hal.reloads[0], 0xf000);
    }

    #[test]
    fn startup_delay_inhibits_output_and_elapses() {
        let mut hal = TestHal::new();
        let mut gen = PhaseGenerator::new(&FREQ_60HZ, SPEED_SIDEREAL);
        assert!(gen.is_inhibited());

        // Convergence proceeds during the delay, but pins stay quiet.
        for _ in 0..STARTUP_DELAY_TICKS {
            gen.on_timer_tick(&mut hal);
        }
        assert!(hal.pin_writes().is_empty());
        assert!(!gen.is_inhibited());
        assert_eq!(gen.active(), SPEED_SIDEREAL);

        gen.on_timer_tick(&mut hal);
        assert!(!hal.pin_writes().is_empty());
    }

    #[test]
    fn phase_pins_alternate_and_never_overlap() {
        let mut hal = TestHal::new();
        let mut gen = warmed_up(SPEED_SIDEREAL);
        run_cycles(&mut gen, &mut hal, 10);

        let mut p1 = false;
        let mut p2 = false;
        for &(pin, level) in &hal.pin_writes() {
            match pin {
                Pin::Phase1 => p1 = level,
                Pin::Phase2 => p2 = level,
                _ => {}
            }
            assert!(!(p1 && p2), "both phases driven simultaneously");
        }
    }
}
