//! Simulated board: implements [`CorrectorHal`] over recorded state, with
//! a count-clock timestamp on every pin event so waveforms can be audited.

use corrector_common::hal::{AdcChannel, CorrectorHal, Pin, Switch};
use corrector_common::i2c_slave::BusSnapshot;
use corrector_common::phase::PhaseGenerator;

/// Timer counts from reload to overflow on the 16-bit AC timer.
const TIMER_SPAN: u64 = 65536;

/// One recorded hardware event, stamped with the simulated count clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    PinWrite { at: u64, pin: Pin, level: bool },
    Settle { at: u64 },
}

pub struct SimHal {
    /// Simulated count clock (250 kHz on the real board).
    pub now: u64,
    pub pins: [bool; 9],
    pub events: Vec<Event>,
    pub reloads: Vec<u16>,
    pub adc: [u16; 3],
    pub switches: [bool; 5],
    pub bus_snapshot: BusSnapshot,
    pub bus_rx: u8,
    pub bus_tx: Vec<u8>,
    pub bus_overrun: bool,
    pub timer_mask_depth: i32,
    last_reload: u16,
}

impl SimHal {
    pub fn new() -> Self {
        Self {
            now: 0,
            pins: [false; 9],
            events: Vec::new(),
            reloads: Vec::new(),
            adc: [512; 3],
            switches: [false; 5],
            bus_snapshot: BusSnapshot::default(),
            bus_rx: 0,
            bus_tx: Vec::new(),
            bus_overrun: false,
            timer_mask_depth: 0,
            last_reload: 0,
        }
    }

    pub fn pin(&self, pin: Pin) -> bool {
        self.pins[pin as usize]
    }

    pub fn set_adc(&mut self, channel: AdcChannel, counts: u16) {
        self.adc[channel as usize] = counts;
    }

    pub fn set_switch(&mut self, sw: Switch, closed: bool) {
        self.switches[sw as usize] = closed;
    }

    /// Deliver `n` timer interrupts to the phase generator, advancing the
    /// simulated clock by the programmed reload interval each time.
    pub fn run_timer_ticks(&mut self, gen: &mut PhaseGenerator, n: usize) {
        for _ in 0..n {
            gen.on_timer_tick(self);
            self.now += TIMER_SPAN - u64::from(self.last_reload);
        }
    }
}

impl Default for SimHal {
    fn default() -> Self {
        Self::new()
    }
}

impl CorrectorHal for SimHal {
    fn pin_write(&mut self, pin: Pin, level: bool) {
        self.pins[pin as usize] = level;
        self.events.push(Event::PinWrite {
            at: self.now,
            pin,
            level,
        });
    }

    fn timer_reload(&mut self, count: u16) {
        self.last_reload = count;
        self.reloads.push(count);
    }

    fn adc_read(&mut self, channel: AdcChannel) -> u16 {
        self.adc[channel as usize]
    }

    fn switch_read(&mut self, sw: Switch) -> bool {
        self.switches[sw as usize]
    }

    fn bus_snapshot(&mut self) -> BusSnapshot {
        self.bus_snapshot
    }

    fn bus_read(&mut self) -> u8 {
        self.bus_rx
    }

    fn bus_write(&mut self, byte: u8) {
        self.bus_tx.push(byte);
    }

    fn bus_overrun(&mut self) -> bool {
        self.bus_overrun
    }

    fn bus_clear_overrun(&mut self) {
        self.bus_overrun = false;
    }

    fn mask_timer_irq(&mut self) {
        self.timer_mask_depth += 1;
    }

    fn unmask_timer_irq(&mut self) {
        self.timer_mask_depth -= 1;
    }

    fn settle_delay(&mut self) {
        self.events.push(Event::Settle { at: self.now });
        self.now += 1;
    }

    fn log(&mut self, message: &str) {
        log::info!("[board] {message}");
    }
}
