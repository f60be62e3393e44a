//! Simulation progress monitoring.
//!
//! Observers receive immutable per-step snapshots; the core itself keeps no
//! mutable process-wide state. [`PeakRateMonitor`] records the peak slip
//! rate over time and reports through the `log` facade, leaving rendering to
//! whatever the host application hooks up.

use crate::ode::{StepObserver, StepSnapshot};

const SECONDS_PER_YEAR: f64 = 365.0 * 24.0 * 60.0 * 60.0;

/// Format a simulation time in seconds as years/days/hours/minutes/seconds.
pub fn format_duration(seconds: f64) -> String {
    let mut ms = (1000.0 * seconds).round() as i64;
    let years = ms.div_euclid(1000 * 60 * 60 * 24 * 365);
    ms = ms.rem_euclid(1000 * 60 * 60 * 24 * 365);
    let days = ms.div_euclid(1000 * 60 * 60 * 24);
    ms = ms.rem_euclid(1000 * 60 * 60 * 24);
    let hours = ms.div_euclid(1000 * 60 * 60);
    ms = ms.rem_euclid(1000 * 60 * 60);
    let minutes = ms.div_euclid(1000 * 60);
    ms = ms.rem_euclid(1000 * 60);
    let secs = ms.div_euclid(1000);
    ms = ms.rem_euclid(1000);
    format!("{years:>6} yr, {days:>3} d, {hours:>2} h, {minutes:>2} m, {secs:>2} s, {ms:>3} ms")
}

/// Observer tracking the peak on-fault slip rate per step.
#[derive(Debug, Default)]
pub struct PeakRateMonitor {
    /// `(time [s], max slip rate [m/s])` per observed step
    pub history: Vec<(f64, f64)>,
}

impl PeakRateMonitor {
    /// Create an empty monitor.
    pub fn new() -> Self {
        Self::default()
    }
}

impl StepObserver for PeakRateMonitor {
    fn on_step(&mut self, snapshot: &StepSnapshot<'_>) {
        let vmax = snapshot
            .slip_rate
            .iter()
            .fold(f64::NEG_INFINITY, |m, &v| m.max(v));
        self.history.push((snapshot.time, vmax));
        log::info!(
            "{} | v_max = {:.3e} m/s ({:.3e} cm/yr)",
            format_duration(snapshot.time),
            vmax,
            vmax * 100.0 * SECONDS_PER_YEAR
        );
    }
}
