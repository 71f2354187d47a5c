// SPDX-FileCopyrightText: 2026 Stan Grams <sjg@haxx.space>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Renders the diagnostics for one decoded snapshot: a banner, the full
//! Clean Pulse Sequence, the located sync gap, and the payload (or a soft
//! failure reason) — in that order, regardless of outcome.

use std::io::{self, Write};

use crate::calibration::CalibrationVector;
use crate::pipeline::{DecodeOutcome, SoftFailure};
use crate::pulse::{Level, Pulse};

/// Where a decoded snapshot's diagnostics go. A `TextSink` writes the
/// human-readable report the specification describes; a `NullSink` is used
/// by callers (tests, tooling) that only want the [`DecodeOutcome`] value.
pub trait Sink {
    fn calibration(&mut self, calib: &CalibrationVector);
    fn snapshot(&mut self, outcome: &DecodeOutcome);
}

fn pulse_token(p: &Pulse) -> String {
    let tag = match p.level {
        Level::High => 'H',
        Level::Low => 'L',
    };
    format!("{tag}{}", p.duration)
}

fn failure_reason(reason: SoftFailure) -> &'static str {
    match reason {
        SoftFailure::InsufficientPulses => "too few clean pulses survived filtering",
        SoftFailure::NoPreambleMatch => "no preamble streak followed by a qualifying sync gap",
        SoftFailure::NoPayloadBits => "sync gap located but no High pulse produced a bit",
    }
}

/// Writes the diagnostics described in the specification's Sink component
/// to any [`Write`] sink — `stdout` in the CLI, a buffer in tests.
pub struct TextSink<W: Write> {
    out: W,
}

impl<W: Write> TextSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn write_pulses(&mut self, pulses: &[Pulse]) -> io::Result<()> {
        for (i, chunk) in pulses.chunks(8).enumerate() {
            if i > 0 {
                writeln!(self.out)?;
            }
            let line: Vec<String> = chunk.iter().map(pulse_token).collect();
            write!(self.out, "  {}", line.join(" "))?;
        }
        writeln!(self.out)
    }

    fn write_binary(&mut self, bits: &[u8]) -> io::Result<()> {
        let groups: Vec<String> = bits
            .chunks(8)
            .map(|g| g.iter().map(|b| if *b != 0 { '1' } else { '0' }).collect())
            .collect();
        write!(self.out, "{}", groups.join(" "))
    }

    fn try_snapshot(&mut self, outcome: &DecodeOutcome) -> io::Result<()> {
        writeln!(self.out, "------------------------------------------------------------")?;
        writeln!(self.out, "snapshot captured")?;
        writeln!(self.out, "------------------------------------------------------------")?;

        writeln!(self.out, "raw pulses ({}):", outcome.clean_pulses.len())?;
        if outcome.clean_pulses.is_empty() {
            writeln!(self.out, "  (none)")?;
        } else {
            self.write_pulses(&outcome.clean_pulses)?;
        }

        match &outcome.result {
            Ok(packet) => {
                writeln!(
                    self.out,
                    "sync gap at pulse {} after {} preamble pairs",
                    packet.sync_idx, packet.preamble_streak
                )?;
                writeln!(self.out, "payload bits: {}", packet.bits.len())?;
                write!(self.out, "binary: ")?;
                self.write_binary(&packet.bits)?;
                writeln!(self.out)?;
                writeln!(self.out, "hex: {}", packet.hex)?;
            }
            Err(reason) => {
                writeln!(self.out, "decode failed: {}", failure_reason(*reason))?;
            }
        }

        writeln!(self.out, "------------------------------------------------------------")?;
        writeln!(self.out, "continuing monitoring")?;
        self.out.flush()
    }
}

impl<W: Write> Sink for TextSink<W> {
    fn calibration(&mut self, calib: &CalibrationVector) {
        let _ = writeln!(
            self.out,
            "calibration complete: i_leak={:.1} q_leak={:.1} trigger_level={:.1}",
            calib.i_leak, calib.q_leak, calib.trigger_level
        );
    }

    fn snapshot(&mut self, outcome: &DecodeOutcome) {
        if let Err(e) = self.try_snapshot(outcome) {
            tracing::warn!(error = %e, "failed writing sink output");
        }
    }
}

/// Discards everything. Used by tests and tooling that only care about the
/// returned [`DecodeOutcome`], not the rendered text.
#[derive(Debug, Default)]
pub struct NullSink;

impl Sink for NullSink {
    fn calibration(&mut self, _calib: &CalibrationVector) {}
    fn snapshot(&mut self, _outcome: &DecodeOutcome) {}
}
