//! Operator control polling: debounced switches and tri-level analog
//! button channels, merged with the remotely-set bitmask into one
//! effective command state.

use bitflags::bitflags;

use crate::dc::AxisMode;
use crate::debounce::{Debounce, Decision};
use crate::freq::{SPEED_EAST, SPEED_LUNAR, SPEED_SIDEREAL, SPEED_WEST};
use crate::hal::{AdcChannel, CorrectorHal, Switch};
use crate::trilevel::{classify, Level};

bitflags! {
    /// Control bits. The layout is the wire format of the remote buttons
    /// register, so local and remote masks OR together directly.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Buttons: u8 {
        const NORTH = 0x01;
        const SOUTH = 0x02;
        const EAST = 0x04;
        const WEST = 0x08;
        const FOCUS_IN = 0x10;
        const FOCUS_OUT = 0x20;
        const LAMP = 0x40;
    }
}

/// One poll cycle's verdict: the merged mask and what it commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlState {
    /// Local buttons ORed with the remote register mask.
    pub effective: Buttons,
    /// Speed index the phase generator should converge to.
    pub target_speed: u8,
    pub dec_mode: AxisMode,
    pub focus_mode: AxisMode,
    pub lamp: bool,
    /// Mains-frequency selector: use the 50 Hz table.
    pub table_50hz: bool,
}

/// Debounce state for one digital switch; holds the last settled decision
/// across unsettled samples.
#[derive(Debug, Default)]
struct Held {
    debounce: Debounce,
    closed: bool,
}

impl Held {
    fn sample<H: CorrectorHal>(&mut self, hal: &mut H, sw: Switch) -> bool {
        match self.debounce.observe(hal.switch_read(sw)) {
            Decision::Asserted => self.closed = true,
            Decision::Deasserted => self.closed = false,
            Decision::Unsettled => {}
        }
        self.closed
    }
}

/// Polls every monitored input once per main-loop iteration.
#[derive(Debug, Default)]
pub struct ButtonPoller {
    lamp: Held,
    lunar: Held,
    mains50: Held,
    swap_ns: Held,
    swap_ew: Held,
}

impl ButtonPoller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sample all channels, build the local mask, merge the remote mask,
    /// and derive the command state.
    ///
    /// Channel map (resistor divider per channel, two buttons + neutral):
    /// - Dec:   Low = north, High = south, Mid = neither
    /// - Ra:    Low = east,  High = west,  Mid = neither
    /// - Focus: Low = in,    High = out,   Mid = neither
    ///
    /// The direction-swap switches invert the local analog channels only;
    /// remote bits already name an absolute direction.
    pub fn poll<H: CorrectorHal>(&mut self, hal: &mut H, remote: Buttons) -> ControlState {
        let lamp_button = self.lamp.sample(hal, Switch::Lamp);
        let lunar = self.lunar.sample(hal, Switch::Lunar);
        let mains50 = self.mains50.sample(hal, Switch::Mains50);
        let swap_ns = self.swap_ns.sample(hal, Switch::SwapNorthSouth);
        let swap_ew = self.swap_ew.sample(hal, Switch::SwapEastWest);

        let mut local = Buttons::empty();
        match classify(hal.adc_read(AdcChannel::Dec)) {
            Level::Low => local |= if swap_ns { Buttons::SOUTH } else { Buttons::NORTH },
            Level::High => local |= if swap_ns { Buttons::NORTH } else { Buttons::SOUTH },
            Level::Mid => {}
        }
        match classify(hal.adc_read(AdcChannel::Ra)) {
            Level::Low => local |= if swap_ew { Buttons::WEST } else { Buttons::EAST },
            Level::High => local |= if swap_ew { Buttons::EAST } else { Buttons::WEST },
            Level::Mid => {}
        }
        match classify(hal.adc_read(AdcChannel::Focus)) {
            Level::Low => local |= Buttons::FOCUS_IN,
            Level::High => local |= Buttons::FOCUS_OUT,
            Level::Mid => {}
        }
        if lamp_button {
            local |= Buttons::LAMP;
        }

        let effective = local | remote;

        let east = effective.contains(Buttons::EAST);
        let west = effective.contains(Buttons::WEST);
        let target_speed = if east && !west {
            SPEED_EAST
        } else if west && !east {
            SPEED_WEST
        } else if lunar {
            SPEED_LUNAR
        } else {
            SPEED_SIDEREAL
        };

        let north = effective.contains(Buttons::NORTH);
        let south = effective.contains(Buttons::SOUTH);
        let dec_mode = if north && !south {
            AxisMode::Forward
        } else if south && !north {
            AxisMode::Reverse
        } else {
            AxisMode::Off
        };

        let focus_in = effective.contains(Buttons::FOCUS_IN);
        let focus_out = effective.contains(Buttons::FOCUS_OUT);
        let focus_mode = if focus_in && !focus_out {
            AxisMode::Forward
        } else if focus_out && !focus_in {
            AxisMode::Reverse
        } else {
            AxisMode::Off
        };

        ControlState {
            effective,
            target_speed,
            dec_mode,
            focus_mode,
            lamp: effective.contains(Buttons::LAMP),
            table_50hz: mains50,
        }
    }
}
