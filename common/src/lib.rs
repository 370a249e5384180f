//! Portable firmware core for the Ultima 8 drive corrector base board:
//! AC phase synthesis for the RA tracking motor, the I2C register
//! interface, operator control polling, and the DC correction outputs.
//! Everything hardware-facing goes through [`hal::CorrectorHal`] so the
//! same logic runs on target and under host tests.
#![no_std]

#[cfg(test)]
extern crate std;

pub mod buttons;
pub mod dc;
pub mod debounce;
pub mod driver;
pub mod freq;
pub mod hal;
pub mod i2c_slave;
pub mod indicator;
pub mod phase;
pub mod registers;
pub mod trilevel;

#[cfg(test)]
mod testhal;

pub use buttons::{ButtonPoller, Buttons, ControlState};
pub use dc::{Axis, AxisMode, DcAxis};
pub use driver::DriveCorrector;
pub use hal::CorrectorHal;
pub use i2c_slave::I2cSlave;
pub use phase::PhaseGenerator;
pub use registers::RegisterFile;
