// SPDX-FileCopyrightText: 2026 Stan Grams <sjg@haxx.space>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Fatal error types. Every variant here is unrecoverable: the trigger
//! loop does not retry a broken radio context, it surfaces the error to
//! the caller, which logs it and exits non-zero. Expected, recoverable
//! outcomes (no preamble match, too few pulses) are *not* errors — see
//! [`crate::pipeline::SoftFailure`].

use thiserror::Error;

/// Errors surfaced by a [`crate::radio::RadioAdapter`]. All are fatal.
#[derive(Debug, Error)]
pub enum RadioError {
    #[error("radio device unavailable: {0}")]
    RadioUnavailable(String),

    #[error("radio rejected configuration: {0}")]
    ConfigRejected(String),

    #[error("radio buffer exhausted: {0}")]
    BufferExhausted(String),
}

/// Startup calibration failed. Fatal — a zero-valued calibration vector
/// would trigger on every sample.
#[derive(Debug, Error)]
pub enum CalibrationError {
    #[error("calibration refill failed: {0}")]
    Radio(#[from] RadioError),

    #[error("calibration produced a zero noise peak; check the receive chain")]
    ZeroNoisePeak,
}
