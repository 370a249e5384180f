//! Waveform audit for the simulated AC motor: replays the recorded pin
//! events and reports what the motor coils would have seen.

use corrector_common::hal::Pin;

use crate::sim_hal::Event;

/// Summary of one recorded run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaveformAudit {
    /// Completed AC periods (phase-1 rising edges).
    pub periods: usize,
    /// Both phase pins high at once at any sampled instant.
    pub overlap: bool,
    /// Count-clock spans between consecutive phase-1 rising edges.
    pub period_counts: Vec<u64>,
}

impl WaveformAudit {
    /// Replay the event log, tracking both phase pins.
    pub fn of(events: &[Event]) -> Self {
        let mut p1 = false;
        let mut p2 = false;
        let mut overlap = false;
        let mut rising_edges = Vec::new();

        for e in events {
            if let Event::PinWrite { at, pin, level } = *e {
                match pin {
                    Pin::Phase1 => {
                        if level && !p1 {
                            rising_edges.push(at);
                        }
                        p1 = level;
                    }
                    Pin::Phase2 => p2 = level,
                    _ => {}
                }
                if p1 && p2 {
                    overlap = true;
                }
            }
        }

        let period_counts = rising_edges.windows(2).map(|w| w[1] - w[0]).collect();
        Self {
            periods: rising_edges.len(),
            overlap,
            period_counts,
        }
    }

    /// Nominal motor frequency over the measured periods, derived from
    /// the 250 kHz count clock.
    pub fn mean_frequency_hz(&self) -> Option<f64> {
        if self.period_counts.is_empty() {
            return None;
        }
        let total: u64 = self.period_counts.iter().sum();
        let mean = total as f64 / self.period_counts.len() as f64;
        Some(250_000.0 / mean)
    }
}
