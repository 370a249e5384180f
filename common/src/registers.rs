//! Virtual register file served to the I2C master.
//!
//! The bus protocol has no error channel back to the master, so every
//! operation here is total: writes to unknown registers are dropped and
//! reads of unknown registers return 0.

/// Remote control bitmask, 1 byte. Bit layout matches [`crate::buttons::Buttons`].
pub const REG_BUTTONS: u8 = 0;

/// AC timer override reload, 2 bytes. 0 disables the override and the
/// phase generator falls back to the frequency table.
pub const REG_AC_RELOAD: u8 = 1;

/// Which half of a register a byte transfer addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ByteSel {
    Lsb,
    Msb,
}

#[derive(Debug, Default)]
pub struct RegisterFile {
    buttons: u8,
    ac_reload: u16,
}

impl RegisterFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write one byte of a register. An LSB write to a 2-byte register
    /// replaces the whole value (high byte zeroed) and the following MSB
    /// write ORs the high byte in, so a reader between the two byte writes
    /// sees nothing worse than "high byte not yet written".
    pub fn set(&mut self, regnum: u8, val: u8, sel: ByteSel) {
        match regnum {
            REG_BUTTONS => {
                if sel == ByteSel::Lsb {
                    self.buttons = val;
                }
            }
            REG_AC_RELOAD => match sel {
                ByteSel::Lsb => self.ac_reload = val as u16,
                ByteSel::Msb => self.ac_reload |= (val as u16) << 8,
            },
            _ => {}
        }
    }

    /// Read one byte of a register. Unknown registers read as 0, as does
    /// the MSB of a 1-byte register.
    pub fn get(&self, regnum: u8, sel: ByteSel) -> u8 {
        match regnum {
            REG_BUTTONS => match sel {
                ByteSel::Lsb => self.buttons,
                ByteSel::Msb => 0,
            },
            REG_AC_RELOAD => match sel {
                ByteSel::Lsb => (self.ac_reload & 0xff) as u8,
                ByteSel::Msb => (self.ac_reload >> 8) as u8,
            },
            _ => 0,
        }
    }

    /// Remote control bitmask, for the button poller.
    pub fn buttons_mask(&self) -> u8 {
        self.buttons
    }

    /// Current override reload count (0 = disabled).
    pub fn ac_reload(&self) -> u16 {
        self.ac_reload
    }
}
