// SPDX-FileCopyrightText: 2026 Stan Grams <sjg@haxx.space>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Radio adapter abstraction: a thin, synchronous interface over an SDR
//! front end. The pipeline knows nothing about any particular device; it
//! only configures, refills, and reads through this trait.

use crate::error::RadioError;

/// An indexable view over the interleaved (I, Q) pairs of the most recently
/// refilled chunk. `len()` always equals the `chunk_len` passed to
/// `open_rx_buffer`.
pub struct IqView<'a> {
    samples: &'a [(i16, i16)],
}

impl<'a> IqView<'a> {
    pub fn new(samples: &'a [(i16, i16)]) -> Self {
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn get(&self, i: usize) -> (i16, i16) {
        self.samples[i]
    }

    pub fn iter(&self) -> impl Iterator<Item = (i16, i16)> + '_ {
        self.samples.iter().copied()
    }
}

/// Abstraction over an SDR device's RX path, consumed by the calibrator and
/// the trigger loop. `refill` is the only operation allowed to block.
pub trait RadioAdapter {
    /// Configure LO frequency, sample rate, RF bandwidth, and manual gain.
    fn configure(
        &mut self,
        center_hz: f64,
        sample_hz: f64,
        bandwidth_hz: f64,
        gain_db: f64,
    ) -> Result<(), RadioError>;

    /// Allocate the device buffer for `chunk_len` IQ pairs per refill.
    fn open_rx_buffer(&mut self, chunk_len: usize) -> Result<(), RadioError>;

    /// Block until one chunk of IQ samples is available. After this
    /// returns, `iq_view` observes the new chunk.
    fn refill(&mut self) -> Result<(), RadioError>;

    /// View over the most recently refilled chunk.
    fn iq_view(&self) -> IqView<'_>;

    /// Release the buffer and device context.
    fn close(&mut self) -> Result<(), RadioError>;
}
