// SPDX-FileCopyrightText: 2026 Stan Grams <sjg@haxx.space>
//
// SPDX-License-Identifier: BSD-2-Clause

//! The trigger/snapshot state machine: Armed → Capturing → Draining → Armed.
//!
//! Single thread of control. `refill` is the only blocking call, so the
//! shutdown flag is only ever observed between refills — never during
//! them. Per the resolved open question in the specification, a capture
//! that has already started always runs to completion and is decoded; the
//! flag is re-checked only once the loop returns to Armed.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::calibration::CalibrationVector;
use crate::config::Config;
use crate::error::RadioError;
use crate::pipeline::{self, DecodeOutcome};
use crate::radio::RadioAdapter;
use crate::sink::Sink;
use crate::snapshot::Snapshot;

/// Current phase of the trigger loop. Exposed mainly for diagnostics and
/// tests; the loop drives its own transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerState {
    Armed,
    Capturing,
    Draining,
}

/// Owns the preallocated Snapshot buffer and drives the Armed/Capturing/
/// Draining cycle against a [`RadioAdapter`], handing each captured
/// snapshot to [`pipeline::decode_snapshot`] and the result to a [`Sink`].
pub struct TriggerLoop {
    state: TriggerState,
    snapshot: Snapshot,
}

impl TriggerLoop {
    pub fn new(config: &Config) -> Self {
        Self {
            state: TriggerState::Armed,
            snapshot: Snapshot::new(config.snapshot_len()),
        }
    }

    pub fn state(&self) -> TriggerState {
        self.state
    }

    /// Probe the leading `probe_len` samples of the most recently refilled
    /// chunk for a DC-corrected magnitude exceeding `calib.trigger_level`.
    fn probe_hit(radio: &dyn RadioAdapter, calib: &CalibrationVector, probe_len: usize) -> bool {
        let view = radio.iq_view();
        let n = probe_len.min(view.len());
        view.iter()
            .take(n)
            .any(|(i, q)| calib.magnitude(i, q) > calib.trigger_level)
    }

    /// Run one full iteration of the loop: in Armed, this is one refill and
    /// probe; a hit immediately captures and decodes a snapshot and drains
    /// the configured number of stale chunks before returning to Armed.
    ///
    /// Returns `Ok(Some(outcome))` when a snapshot was captured and decoded
    /// this call, `Ok(None)` when the call was a non-triggering Armed probe,
    /// and `Err` on any fatal radio error.
    pub fn step(
        &mut self,
        radio: &mut dyn RadioAdapter,
        calib: &CalibrationVector,
        config: &Config,
        sink: &mut dyn Sink,
    ) -> Result<Option<DecodeOutcome>, RadioError> {
        debug_assert_eq!(self.state, TriggerState::Armed);

        radio.refill()?;
        if !Self::probe_hit(radio, calib, config.probe_len) {
            return Ok(None);
        }

        self.state = TriggerState::Capturing;
        tracing::debug!("burst detected, capturing snapshot");
        self.snapshot.begin();
        self.snapshot.append_chunk(&radio.iq_view());
        for _ in 1..config.snapshot_chunks {
            radio.refill()?;
            self.snapshot.append_chunk(&radio.iq_view());
        }

        let outcome = pipeline::decode_snapshot(&self.snapshot, calib, config);
        sink.snapshot(&outcome);

        self.state = TriggerState::Draining;
        for _ in 0..config.k_drain {
            radio.refill()?;
        }
        self.state = TriggerState::Armed;

        Ok(Some(outcome))
    }

    /// Run the loop until `shutdown` is observed true between refills (i.e.
    /// only while Armed, between probe attempts — an in-flight Capturing
    /// pass is never abandoned). Returns when the flag is set.
    pub fn run(
        &mut self,
        radio: &mut dyn RadioAdapter,
        calib: &CalibrationVector,
        config: &Config,
        sink: &mut dyn Sink,
        shutdown: &Arc<AtomicBool>,
    ) -> Result<(), RadioError> {
        while !shutdown.load(Ordering::Relaxed) {
            self.step(radio, calib, config, sink)?;
        }
        tracing::info!("shutdown observed, trigger loop exiting");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockRadio;
    use crate::pulse::Level;
    use crate::radio::IqView;

    fn calib() -> CalibrationVector {
        CalibrationVector {
            i_leak: 0.0,
            q_leak: 0.0,
            trigger_level: 500.0,
        }
    }

    /// Build raw IQ samples for an envelope description, expanding each
    /// (level, duration) pair into `duration * decimation` samples so the
    /// decimated pulse widths come out as specified.
    fn samples_from_pulses(pulses: &[(Level, u32)], decimation: usize) -> Vec<(i16, i16)> {
        let mut raw = Vec::new();
        for &(level, duration) in pulses {
            let amplitude: i16 = if level == Level::High { 1000 } else { 0 };
            for _ in 0..duration as usize * decimation {
                raw.push((amplitude, 0));
            }
        }
        raw
    }

    fn e1_payload_pulses() -> Vec<(Level, u32)> {
        let mut pulses = Vec::new();
        for _ in 0..4 {
            pulses.push((Level::High, 93));
            pulses.push((Level::Low, 150));
        }
        pulses.push((Level::High, 90)); // bridges the last preamble pair to the sync gap
        pulses.push((Level::Low, 220));
        pulses.push((Level::High, 90));
        pulses.push((Level::Low, 100));
        pulses.push((Level::High, 40));
        pulses.push((Level::Low, 100));
        pulses.push((Level::High, 90));
        pulses.push((Level::Low, 100));
        pulses.push((Level::High, 40));
        pulses.push((Level::Low, 100));
        pulses
    }

    #[test]
    fn armed_probe_without_hit_stays_armed() {
        let config = Config {
            decimation: 1,
            chunk_len: 10,
            snapshot_chunks: 2,
            probe_len: 10,
            ..Config::default()
        };
        let mut radio = MockRadio::from_chunks(vec![vec![(0, 0); 10]; 6], config.chunk_len);
        let mut trigger = TriggerLoop::new(&config);
        let mut sink = crate::sink::NullSink;
        let outcome = trigger.step(&mut radio, &calib(), &config, &mut sink).unwrap();
        assert!(outcome.is_none());
        assert_eq!(trigger.state(), TriggerState::Armed);
    }

    #[test]
    fn trigger_captures_and_decodes_across_chunk_boundaries() {
        let decimation = 1;
        let config = Config {
            decimation,
            chunk_len: 50,
            snapshot_chunks: 40,
            probe_len: 50,
            trigger_factor: 3.5,
            min_clean_pulses: 10,
            ..Config::default()
        };
        let payload = samples_from_pulses(&e1_payload_pulses(), decimation);
        // Chunk the full burst into chunk_len-sized pieces so the snapshot
        // capture must stitch several refills together, as the real loop
        // does.
        let mut chunks: Vec<Vec<(i16, i16)>> = Vec::new();
        for window in payload.chunks(config.chunk_len) {
            let mut c = window.to_vec();
            c.resize(config.chunk_len, (0, 0));
            chunks.push(c);
        }
        while chunks.len() < config.snapshot_chunks + config.k_drain + 1 {
            chunks.push(vec![(0, 0); config.chunk_len]);
        }
        let mut radio = MockRadio::from_chunks(chunks, config.chunk_len);
        let mut trigger = TriggerLoop::new(&config);
        let mut sink = crate::sink::NullSink;
        let outcome = trigger
            .step(&mut radio, &calib(), &config, &mut sink)
            .unwrap()
            .expect("first chunk already carries a High pulse above threshold");
        let packet = outcome.result.expect("should decode");
        assert_eq!(packet.bits, vec![1, 0, 1, 0]);
        assert_eq!(trigger.state(), TriggerState::Armed);
    }

    #[test]
    fn shutdown_flag_stops_loop_between_refills() {
        let config = Config {
            decimation: 1,
            chunk_len: 10,
            snapshot_chunks: 2,
            probe_len: 10,
            ..Config::default()
        };
        let mut radio = MockRadio::from_chunks(vec![vec![(0, 0); 10]; 100], config.chunk_len);
        let mut trigger = TriggerLoop::new(&config);
        let mut sink = crate::sink::NullSink;
        let shutdown = Arc::new(AtomicBool::new(true));
        trigger
            .run(&mut radio, &calib(), &config, &mut sink, &shutdown)
            .unwrap();
        assert_eq!(radio.refill_count(), 0);
    }

    #[test]
    fn probe_only_inspects_leading_window() {
        let config = Config {
            decimation: 1,
            chunk_len: 20,
            probe_len: 5,
            ..Config::default()
        };
        let mut chunk = vec![(0i16, 0i16); 20];
        chunk[10] = (1000, 0); // hit is past the probe window
        let view_chunk = chunk.clone();
        let radio = MockRadio::from_chunks(vec![view_chunk], config.chunk_len);
        let view = IqView::new(&chunk);
        let _ = &radio;
        assert!(!TriggerLoop::probe_hit(&radio, &calib(), config.probe_len));
        assert!(TriggerLoop::probe_hit(&radio, &calib(), 20));
        let _ = view;
    }
}
