//! I2C slave protocol state machine.
//!
//! Simple protocol based on 1-byte and 2-byte registers:
//! to write a register, the master writes `2 <regnum> <lsb> [<msb>]`;
//! to read a register, the master writes `1 <regnum>`, then reads
//! `<lsb> [<msb>]`. After a read or a write, another read re-samples the
//! same register until a new address phase redefines it.

use crate::hal::CorrectorHal;
use crate::registers::{ByteSel, RegisterFile};

/// Immutable capture of the slave peripheral status flags, taken once per
/// bus interrupt so classification cannot race a live flag change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusSnapshot {
    /// Start condition seen (S).
    pub start: bool,
    /// Last byte was data, not address (D_A).
    pub data_phase: bool,
    /// Master is reading from us (R_W).
    pub read: bool,
    /// Receive buffer holds a byte (BF).
    pub buffer_full: bool,
    /// Slave has released the bus clock (CKP).
    pub clock_released: bool,
}

/// The five slave states of the AN734B application note, plus a defensive
/// default for flag combinations the table does not cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusEvent {
    /// Write transaction, address byte just received.
    AddressedWrite,
    /// Write transaction, data byte just received.
    DataWrite,
    /// Read transaction, address phase: transmit the first byte.
    ReadRequest,
    /// Read transaction continues: transmit the next byte.
    ReadContinue,
    /// Master NAKed; slave logic must reset.
    NakReset,
    /// Unclassified status, take no action.
    Unknown,
}

/// Classify a status snapshot. Checks run in table order with the last
/// match winning, matching the AN734B decode; `ReadContinue` and
/// `NakReset` share flags and are told apart by `clock_released`.
pub fn classify(s: &BusSnapshot) -> BusEvent {
    let mut event = BusEvent::Unknown;

    // State 1: write operation, last byte was an address byte.
    if s.start && !s.data_phase && !s.read && s.buffer_full {
        event = BusEvent::AddressedWrite;
    }
    // State 2: write operation, last byte was a data byte.
    if s.start && s.data_phase && !s.read && s.buffer_full {
        event = BusEvent::DataWrite;
    }
    // State 3: read operation, last byte was an address byte.
    if s.start && !s.data_phase && s.read {
        event = BusEvent::ReadRequest;
    }
    // State 4: read operation, last byte was a data byte.
    if s.start && s.data_phase && s.read && !s.buffer_full {
        event = BusEvent::ReadContinue;
    }
    // State 5: slave logic reset by NACK from master.
    if s.start && s.data_phase && !s.buffer_full && s.clock_released {
        event = BusEvent::NakReset;
    }
    event
}

const CMD_READ: u8 = 1;
const CMD_WRITE: u8 = 2;

/// Per-transaction slave state: a byte counter, the command opcode, and
/// the addressed register. The register number survives transactions so
/// repeated reads re-sample it.
#[derive(Debug)]
pub struct I2cSlave {
    count: u8,
    cmd: u8,
    regnum: u8,
}

impl I2cSlave {
    pub fn new() -> Self {
        Self {
            count: 0,
            cmd: CMD_READ,
            regnum: 0,
        }
    }

    /// Service one bus interrupt against the register file. Anomalies
    /// (unknown status, overrun, NAK) reset local state and are never
    /// reported; the wire protocol has no error channel.
    pub fn on_interrupt<H: CorrectorHal>(&mut self, hal: &mut H, regs: &mut RegisterFile) {
        let status = hal.bus_snapshot();
        match classify(&status) {
            BusEvent::AddressedWrite => {
                let _ = hal.bus_read();
                self.count = 0;
            }
            BusEvent::DataWrite => {
                match self.count {
                    0 => self.cmd = hal.bus_read(),
                    1 => self.regnum = hal.bus_read(),
                    2 if self.cmd == CMD_WRITE => {
                        let val = hal.bus_read();
                        regs.set(self.regnum, val, ByteSel::Lsb);
                    }
                    3 if self.cmd == CMD_WRITE => {
                        let val = hal.bus_read();
                        regs.set(self.regnum, val, ByteSel::Msb);
                    }
                    _ => {
                        // Excess data for this command: consume and discard.
                        let _ = hal.bus_read();
                    }
                }
                self.count = self.count.wrapping_add(1);
            }
            BusEvent::ReadRequest => {
                self.count = 0;
                hal.bus_write(regs.get(self.regnum, ByteSel::Lsb));
                self.count += 1;
            }
            BusEvent::ReadContinue => {
                if self.count == 1 {
                    hal.bus_write(regs.get(self.regnum, ByteSel::Msb));
                } else {
                    hal.bus_write(0);
                }
                self.count = self.count.wrapping_add(1);
            }
            BusEvent::NakReset => {
                self.count = 0;
                let _ = hal.bus_read();
            }
            BusEvent::Unknown => {}
        }

        // A stuck overrun would block all future transfers; clear it and
        // drop the stale byte.
        if hal.bus_overrun() {
            hal.bus_clear_overrun();
            let _ = hal.bus_read();
        }
    }
}

impl Default for I2cSlave {
    fn default() -> Self {
        Self::new()
    }
}
