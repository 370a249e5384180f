use crate::i2c_slave::BusSnapshot;

/// Discrete outputs driven by the corrector logic. All are active high.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pin {
    /// AC motor phase 1 drive.
    Phase1,
    /// AC motor phase 2 drive.
    Phase2,
    /// Square wave test/sync point, toggled once per AC half period.
    SqWave,
    /// Declination motor "+north" direction.
    DecPlus,
    /// Declination motor "+south" direction.
    DecMinus,
    /// Focus motor inward direction.
    FocusIn,
    /// Focus motor outward direction.
    FocusOut,
    /// Reticle/panel lamp.
    Lamp,
    /// Status indicator LED.
    Status,
}

/// Multiplexed analog button channels. Each carries two buttons and a
/// neutral state through a resistor divider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcChannel {
    /// East / west correction buttons.
    Ra,
    /// North / south correction buttons.
    Dec,
    /// Focus in / out buttons.
    Focus,
}

/// Plain digital switches, debounced by the poller. Read true when closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Switch {
    /// Momentary lamp button.
    Lamp,
    /// Select lunar tracking rate instead of sidereal.
    Lunar,
    /// Motor is a 50 Hz unit (default 60 Hz).
    Mains50,
    /// Swap the sense of the north/south buttons.
    SwapNorthSouth,
    /// Swap the sense of the east/west buttons.
    SwapEastWest,
}

/// The hardware abstraction required by the corrector core. The same
/// logic runs against the PIC peripherals on target and against the
/// recorded-state simulator in the testbench.
pub trait CorrectorHal {
    /// Drive an output pin. Writes are observed in program order.
    fn pin_write(&mut self, pin: Pin, level: bool);

    /// Load the AC timer with a new reload count.
    fn timer_reload(&mut self, count: u16);

    /// Start a conversion on the given channel and busy-wait for the
    /// 10-bit result.
    fn adc_read(&mut self, channel: AdcChannel) -> u16;

    /// Sample a digital switch (raw, undebounced).
    fn switch_read(&mut self, sw: Switch) -> bool;

    /// Capture the bus peripheral status flags for classification.
    fn bus_snapshot(&mut self) -> BusSnapshot;

    /// Take the received byte out of the bus buffer.
    fn bus_read(&mut self) -> u8;

    /// Queue a byte for the master to clock out, releasing the bus clock.
    fn bus_write(&mut self, byte: u8);

    /// Whether the receive buffer overran since last cleared.
    fn bus_overrun(&mut self) -> bool;

    /// Clear the overrun condition.
    fn bus_clear_overrun(&mut self);

    /// Mask the AC timer interrupt around a multi-step shared update.
    fn mask_timer_irq(&mut self);

    /// Restore the AC timer interrupt.
    fn unmask_timer_irq(&mut self);

    /// A few instruction cycles of settling time between clearing one
    /// direction pin and asserting the other.
    fn settle_delay(&mut self);

    /// Diagnostic output. A no-op on target builds without a console.
    fn log(&mut self, message: &str);
}
