// SPDX-FileCopyrightText: 2026 Stan Grams <sjg@haxx.space>
//
// SPDX-License-Identifier: BSD-2-Clause

//! The Snapshot buffer: a contiguous recording of one RF burst plus
//! pre/post context, reused across triggers.

use crate::radio::IqView;

/// Fixed-capacity buffer holding `snapshot_chunks * chunk_len` IQ pairs.
/// Preallocated once and refilled in place on every trigger; never
/// reallocates after construction.
pub struct Snapshot {
    data: Vec<(i16, i16)>,
    filled: usize,
}

impl Snapshot {
    pub fn new(capacity: usize) -> Self {
        Self {
            data: vec![(0, 0); capacity],
            filled: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Start a new capture: reset the fill cursor to zero.
    pub fn begin(&mut self) {
        self.filled = 0;
    }

    /// Append one chunk's worth of samples at the current cursor.
    ///
    /// # Panics
    /// Panics if the chunk would overflow the preallocated capacity —
    /// this indicates a misconfigured `snapshot_chunks`/`chunk_len`, a
    /// programming error rather than a runtime condition to recover from.
    pub fn append_chunk(&mut self, chunk: &IqView<'_>) {
        let end = self.filled + chunk.len();
        assert!(
            end <= self.data.len(),
            "snapshot overflow: {} samples appended would exceed capacity {}",
            end,
            self.data.len()
        );
        for (i, sample) in chunk.iter().enumerate() {
            self.data[self.filled + i] = sample;
        }
        self.filled = end;
    }

    /// Whether the snapshot has been fully populated (`filled == capacity`).
    pub fn is_full(&self) -> bool {
        self.filled == self.data.len()
    }

    pub fn samples(&self) -> &[(i16, i16)] {
        &self.data[..self.filled]
    }

    pub fn len(&self) -> usize {
        self.filled
    }

    pub fn is_empty(&self) -> bool {
        self.filled == 0
    }
}
