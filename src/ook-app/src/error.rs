// SPDX-FileCopyrightText: 2026 Stan Grams <sjg@haxx.space>
//
// SPDX-License-Identifier: BSD-2-Clause

/// Catch-all error type for `main`: every fallible step here is a one-shot
/// startup or fatal-radio condition, not something the caller recovers
/// from, so there is no value in a dedicated enum per call site.
pub type DynResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;
