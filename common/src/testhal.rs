//! Recording HAL used by the unit tests in this crate. The richer
//! simulator in the testbench crate builds on the same idea.

use std::string::String;
use std::vec::Vec;

use crate::hal::{AdcChannel, CorrectorHal, Pin, Switch};
use crate::i2c_slave::BusSnapshot;

/// Ordered record of pin activity, including the settling delays, so
/// tests can check transition ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    PinWrite(Pin, bool),
    Settle,
}

pub struct TestHal {
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
    pub logs: Vec<String>,
}

impl TestHal {
    pub fn new() -> Self {
        Self {
            pins: [false; 9],
            events: Vec::new(),
            reloads: Vec::new(),
            // All analog channels idle at mid-rail.
            adc: [512; 3],
            switches: [false; 5],
            bus_snapshot: BusSnapshot::default(),
            bus_rx: 0,
            bus_tx: Vec::new(),
            bus_overrun: false,
            timer_mask_depth: 0,
            logs: Vec::new(),
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

    pub fn pin_writes(&self) -> Vec<(Pin, bool)> {
        self.events
            .iter()
            .filter_map(|e| match *e {
                Event::PinWrite(pin, level) => Some((pin, level)),
                Event::Settle => None,
            })
            .collect()
    }
}

impl CorrectorHal for TestHal {
    fn pin_write(&mut self, pin: Pin, level: bool) {
        self.pins[pin as usize] = level;
        self.events.push(Event::PinWrite(pin, level));
    }

    fn timer_reload(&mut self, count: u16) {
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
        self.events.push(Event::Settle);
    }

    fn log(&mut self, message: &str) {
        self.logs.push(String::from(message));
    }
}
