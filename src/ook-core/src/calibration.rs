// SPDX-FileCopyrightText: 2026 Stan Grams <sjg@haxx.space>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Startup DC-offset and noise-floor calibration.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::CalibrationError;
use crate::radio::RadioAdapter;

/// Immutable calibration result, produced once and reused for the process
/// lifetime. `trigger_level` is guaranteed strictly positive: a zero noise
/// peak is rejected as [`CalibrationError::ZeroNoisePeak`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationVector {
    pub i_leak: f64,
    pub q_leak: f64,
    pub trigger_level: f64,
}

impl CalibrationVector {
    /// DC-corrected magnitude of a raw (I, Q) sample under this vector.
    pub fn magnitude(&self, i: i16, q: i16) -> f64 {
        let di = i as f64 - self.i_leak;
        let dq = q as f64 - self.q_leak;
        (di * di + dq * dq).sqrt()
    }
}

/// Run the calibration sequence against an already-configured radio:
/// `k_cal` chunks to estimate DC leakage, then one more chunk to estimate
/// the peak noise magnitude.
pub fn calibrate(
    radio: &mut dyn RadioAdapter,
    config: &Config,
) -> Result<CalibrationVector, CalibrationError> {
    let mut i_sum = 0.0_f64;
    let mut q_sum = 0.0_f64;
    let mut n_samples = 0u64;

    for _ in 0..config.k_cal {
        radio.refill()?;
        let view = radio.iq_view();
        for (i, q) in view.iter() {
            i_sum += i as f64;
            q_sum += q as f64;
        }
        n_samples += view.len() as u64;
    }
    let i_leak = i_sum / n_samples as f64;
    let q_leak = q_sum / n_samples as f64;

    radio.refill()?;
    let mut max_noise = 0.0_f64;
    for (i, q) in radio.iq_view().iter() {
        let di = i as f64 - i_leak;
        let dq = q as f64 - q_leak;
        let mag = (di * di + dq * dq).sqrt();
        if mag > max_noise {
            max_noise = mag;
        }
    }

    if max_noise <= 0.0 {
        return Err(CalibrationError::ZeroNoisePeak);
    }

    let trigger_level = max_noise * config.trigger_factor;
    tracing::info!(
        i_leak,
        q_leak,
        trigger_level,
        max_noise,
        "calibration complete"
    );

    Ok(CalibrationVector {
        i_leak,
        q_leak,
        trigger_level,
    })
}
