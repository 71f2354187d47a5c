// SPDX-FileCopyrightText: 2026 Stan Grams <sjg@haxx.space>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Envelope extraction: decimate, compute DC-corrected magnitude, smooth
//! with a first-order IIR, track the running peak, and binarize at a
//! fixed fraction of that peak.
//!
//! No anti-alias filter precedes decimation — deliberate, per the
//! specification; the IIR below provides the smoothing instead.

use crate::calibration::CalibrationVector;
use crate::config::Config;

/// Smoothed magnitude trace plus its peak and the derived binary envelope.
pub struct Envelope {
    pub magnitudes: Vec<f64>,
    pub peak: f64,
    pub binary: Vec<u8>,
}

/// Run the full envelope pipeline (decimate → magnitude → IIR smooth →
/// peak → binarize) over a snapshot's raw IQ samples.
pub fn extract(samples: &[(i16, i16)], calib: &CalibrationVector, config: &Config) -> Envelope {
    let decimation = config.decimation.max(1);
    let m = samples.len() / decimation;

    let mut magnitudes = Vec::with_capacity(m);
    for k in 0..m {
        let (i, q) = samples[k * decimation];
        magnitudes.push(calib.magnitude(i, q));
    }

    let alpha = config.alpha;
    let mut peak = 0.0_f64;
    if let Some(first) = magnitudes.first_mut() {
        peak = *first;
        let mut smoothed = *first;
        for mag in magnitudes.iter_mut().skip(1) {
            smoothed = alpha * *mag + (1.0 - alpha) * smoothed;
            *mag = smoothed;
            if smoothed > peak {
                peak = smoothed;
            }
        }
    }

    let threshold = peak * config.peak_ratio;
    let binary = magnitudes
        .iter()
        .map(|&m| if m > threshold { 1 } else { 0 })
        .collect();

    Envelope {
        magnitudes,
        peak,
        binary,
    }
}
