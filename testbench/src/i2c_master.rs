//! Scripted I2C master: produces the per-byte status-flag sequences the
//! slave peripheral would raise for complete transactions, and collects
//! what the slave clocks back out.

use corrector_common::i2c_slave::{BusSnapshot, I2cSlave};
use corrector_common::registers::RegisterFile;

use crate::sim_hal::SimHal;

const CMD_READ: u8 = 1;
const CMD_WRITE: u8 = 2;

/// Slave address on the simulated bus, as the aux board wears it.
pub const SLAVE_ADDR: u8 = 0x0a;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusFault {
    /// The slave did not queue the byte the master tried to clock out.
    NoData,
}

fn addr_write() -> BusSnapshot {
    BusSnapshot {
        start: true,
        data_phase: false,
        read: false,
        buffer_full: true,
        clock_released: false,
    }
}

fn data_write() -> BusSnapshot {
    BusSnapshot {
        start: true,
        data_phase: true,
        read: false,
        buffer_full: true,
        clock_released: false,
    }
}

fn read_request() -> BusSnapshot {
    BusSnapshot {
        start: true,
        data_phase: false,
        read: true,
        buffer_full: false,
        clock_released: false,
    }
}

fn read_continue() -> BusSnapshot {
    BusSnapshot {
        start: true,
        data_phase: true,
        read: true,
        buffer_full: false,
        clock_released: false,
    }
}

fn nak() -> BusSnapshot {
    BusSnapshot {
        start: true,
        data_phase: true,
        read: false,
        buffer_full: false,
        clock_released: true,
    }
}

/// Drives one slave over one simulated bus.
pub struct I2cMaster;

impl I2cMaster {
    fn byte(hal: &mut SimHal, slave: &mut I2cSlave, regs: &mut RegisterFile, snap: BusSnapshot, rx: u8) {
        hal.bus_snapshot = snap;
        hal.bus_rx = rx;
        slave.on_interrupt(hal, regs);
    }

    /// `2 <regnum> <lsb> [<msb>]`: write a register, MSB included only
    /// for 2-byte registers.
    pub fn write_register(
        hal: &mut SimHal,
        slave: &mut I2cSlave,
        regs: &mut RegisterFile,
        regnum: u8,
        value: u16,
        wide: bool,
    ) {
        Self::byte(hal, slave, regs, addr_write(), SLAVE_ADDR << 1);
        Self::byte(hal, slave, regs, data_write(), CMD_WRITE);
        Self::byte(hal, slave, regs, data_write(), regnum);
        Self::byte(hal, slave, regs, data_write(), (value & 0xff) as u8);
        if wide {
            Self::byte(hal, slave, regs, data_write(), (value >> 8) as u8);
        }
        Self::byte(hal, slave, regs, nak(), 0);
    }

    /// `1 <regnum>`, then clock out 1 or 2 bytes.
    pub fn read_register(
        hal: &mut SimHal,
        slave: &mut I2cSlave,
        regs: &mut RegisterFile,
        regnum: u8,
        wide: bool,
    ) -> Result<u16, BusFault> {
        Self::byte(hal, slave, regs, addr_write(), SLAVE_ADDR << 1);
        Self::byte(hal, slave, regs, data_write(), CMD_READ);
        Self::byte(hal, slave, regs, data_write(), regnum);

        // The read address phase surfaces directly as the read-request
        // state (R/W set, address byte), no separate write state.
        hal.bus_tx.clear();
        Self::byte(hal, slave, regs, read_request(), (SLAVE_ADDR << 1) | 1);
        if wide {
            Self::byte(hal, slave, regs, read_continue(), 0);
        }
        Self::byte(hal, slave, regs, nak(), 0);

        let lsb = *hal.bus_tx.first().ok_or(BusFault::NoData)?;
        let msb = if wide {
            *hal.bus_tx.get(1).ok_or(BusFault::NoData)?
        } else {
            0
        };
        Ok(u16::from(msb) << 8 | u16::from(lsb))
    }

    /// Re-read the currently addressed register without a new command
    /// sequence.
    pub fn reread(
        hal: &mut SimHal,
        slave: &mut I2cSlave,
        regs: &mut RegisterFile,
        wide: bool,
    ) -> Result<u16, BusFault> {
        hal.bus_tx.clear();
        Self::byte(hal, slave, regs, read_request(), (SLAVE_ADDR << 1) | 1);
        if wide {
            Self::byte(hal, slave, regs, read_continue(), 0);
        }
        Self::byte(hal, slave, regs, nak(), 0);

        let lsb = *hal.bus_tx.first().ok_or(BusFault::NoData)?;
        let msb = if wide {
            *hal.bus_tx.get(1).ok_or(BusFault::NoData)?
        } else {
            0
        };
        Ok(u16::from(msb) << 8 | u16::from(lsb))
    }

    /// Start a write and abandon it after `nbytes` data bytes, ending in
    /// a NAK, to model an interrupted master.
    pub fn aborted_write(
        hal: &mut SimHal,
        slave: &mut I2cSlave,
        regs: &mut RegisterFile,
        bytes: &[u8],
    ) {
        Self::byte(hal, slave, regs, addr_write(), SLAVE_ADDR << 1);
        for &b in bytes {
            Self::byte(hal, slave, regs, data_write(), b);
        }
        Self::byte(hal, slave, regs, nak(), 0);
    }
}
