//! Host-side simulation rig for the drive corrector core: a recording
//! board simulator, a scripted I2C master, and a waveform audit for the
//! AC phase outputs. The integration tests in `tests/` wire these
//! together into full-system scenarios.

mod i2c_master;
mod motor_bench;
mod sim_hal;

pub use i2c_master::{BusFault, I2cMaster, SLAVE_ADDR};
pub use motor_bench::WaveformAudit;
pub use sim_hal::{Event, SimHal};
