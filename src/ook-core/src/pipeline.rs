// SPDX-FileCopyrightText: 2026 Stan Grams <sjg@haxx.space>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Ties the envelope, pulse segmentation, and preamble/PWM stages into a
//! single pure function over a captured [`Snapshot`]: same snapshot, same
//! config, same output, every time.

use serde::{Deserialize, Serialize};

use crate::calibration::CalibrationVector;
use crate::config::Config;
use crate::envelope;
use crate::preamble;
use crate::pulse::{self, Pulse};
use crate::snapshot::Snapshot;

/// A fully decoded packet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodedPacket {
    pub bits: Vec<u8>,
    pub hex: String,
    pub sync_idx: usize,
    pub preamble_streak: u32,
}

/// Reasons a snapshot did not yield a packet. All are expected, recoverable
/// outcomes — a burst fired the trigger but didn't carry a valid payload,
/// or never carried one at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoftFailure {
    /// Fewer than `min_clean_pulses` survived cleaning.
    InsufficientPulses,
    /// No preamble streak followed by a qualifying sync gap was found.
    NoPreambleMatch,
    /// A sync gap was found but no High pulse produced a bit.
    NoPayloadBits,
}

/// Result of decoding one snapshot, together with the Clean Pulse Sequence
/// a [`crate::sink::Sink`] needs to render full diagnostics regardless of
/// outcome.
pub struct DecodeOutcome {
    pub clean_pulses: Vec<Pulse>,
    pub result: Result<DecodedPacket, SoftFailure>,
}

/// Run the full offline pipeline over a captured snapshot: decimate and
/// smooth the envelope, binarize, segment into pulses, clean, locate the
/// preamble/sync gap, and slice PWM bits.
pub fn decode_snapshot(
    snapshot: &Snapshot,
    calib: &CalibrationVector,
    config: &Config,
) -> DecodeOutcome {
    let env = envelope::extract(snapshot.samples(), calib, config);
    let raw_pulses = pulse::segment(&env.binary);
    let clean_pulses = pulse::clean(&raw_pulses, config.min_pulse);

    if clean_pulses.len() < config.min_clean_pulses {
        return DecodeOutcome {
            clean_pulses,
            result: Err(SoftFailure::InsufficientPulses),
        };
    }

    let Some(sync) = preamble::locate_sync(&clean_pulses, config) else {
        return DecodeOutcome {
            clean_pulses,
            result: Err(SoftFailure::NoPreambleMatch),
        };
    };

    let bits = preamble::slice_bits(&clean_pulses, sync.sync_idx, config);
    if bits.is_empty() {
        return DecodeOutcome {
            clean_pulses,
            result: Err(SoftFailure::NoPayloadBits),
        };
    }

    let hex = preamble::bits_to_hex(&bits);
    DecodeOutcome {
        clean_pulses,
        result: Ok(DecodedPacket {
            bits,
            hex,
            sync_idx: sync.sync_idx,
            preamble_streak: sync.streak,
        }),
    }
}
