// SPDX-FileCopyrightText: 2026 Stan Grams <sjg@haxx.space>
//
// SPDX-License-Identifier: BSD-2-Clause

//! An in-memory [`RadioAdapter`] for tests and integration tests: serves a
//! fixed script of chunks instead of talking to hardware.

use crate::error::RadioError;
use crate::radio::{IqView, RadioAdapter};

/// Serves pre-loaded chunks of (I, Q) pairs in order. The first `refill`
/// delivers `chunks[0]` (matching a real device, where `configure` and
/// `open_rx_buffer` leave no sample ready until the first refill);
/// subsequent refills advance one chunk at a time and clamp at the last
/// chunk. With no chunks loaded, every refill serves silence.
pub struct MockRadio {
    chunks: Vec<Vec<(i16, i16)>>,
    chunk_len: usize,
    cursor: usize,
    refilled: bool,
    refill_count: usize,
    silence: Vec<(i16, i16)>,
}

impl MockRadio {
    pub fn from_chunks(chunks: Vec<Vec<(i16, i16)>>, chunk_len: usize) -> Self {
        Self {
            chunks,
            chunk_len,
            cursor: 0,
            refilled: false,
            refill_count: 0,
            silence: vec![(0, 0); chunk_len],
        }
    }

    /// Number of `refill` calls observed so far. Lets tests assert the
    /// trigger loop never refilled past a shutdown boundary.
    pub fn refill_count(&self) -> usize {
        self.refill_count
    }
}

impl RadioAdapter for MockRadio {
    fn configure(
        &mut self,
        _center_hz: f64,
        _sample_hz: f64,
        _bandwidth_hz: f64,
        _gain_db: f64,
    ) -> Result<(), RadioError> {
        Ok(())
    }

    fn open_rx_buffer(&mut self, chunk_len: usize) -> Result<(), RadioError> {
        self.chunk_len = chunk_len;
        self.silence = vec![(0, 0); chunk_len];
        Ok(())
    }

    fn refill(&mut self) -> Result<(), RadioError> {
        self.refill_count += 1;
        if self.chunks.is_empty() {
            return Ok(());
        }
        if !self.refilled {
            self.refilled = true;
        } else if self.cursor + 1 < self.chunks.len() {
            self.cursor += 1;
        }
        Ok(())
    }

    fn iq_view(&self) -> IqView<'_> {
        if self.chunks.is_empty() {
            IqView::new(&self.silence)
        } else {
            IqView::new(&self.chunks[self.cursor])
        }
    }

    fn close(&mut self) -> Result<(), RadioError> {
        Ok(())
    }
}
