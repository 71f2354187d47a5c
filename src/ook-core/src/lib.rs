// SPDX-FileCopyrightText: 2026 Stan Grams <sjg@haxx.space>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Trigger-mode snapshot receiver core: DC calibration, burst trigger,
//! envelope extraction, pulse segmentation, and PWM demodulation for
//! short-burst OOK packets (315 MHz RKE rolling-code transmissions).
//!
//! This crate is the hardware-independent half of the receiver. It consumes
//! IQ chunks through the [`radio::RadioAdapter`] trait and never blocks on
//! anything except that trait's `refill`.

pub mod calibration;
pub mod config;
pub mod envelope;
pub mod error;
pub mod mock;
pub mod pipeline;
pub mod preamble;
pub mod pulse;
pub mod radio;
pub mod sink;
pub mod snapshot;
pub mod trigger;

pub use calibration::CalibrationVector;
pub use config::Config;
pub use error::{CalibrationError, RadioError};
pub use mock::MockRadio;
pub use pipeline::{decode_snapshot, DecodeOutcome, DecodedPacket, SoftFailure};
pub use pulse::{Level, Pulse};
pub use radio::{IqView, RadioAdapter};
pub use sink::{NullSink, Sink, TextSink};
pub use snapshot::Snapshot;
pub use trigger::{TriggerLoop, TriggerState};
