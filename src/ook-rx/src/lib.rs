// SPDX-FileCopyrightText: 2026 Stan Grams <sjg@haxx.space>
//
// SPDX-License-Identifier: BSD-2-Clause

//! SoapySDR-backed [`RadioAdapter`](ook_core::RadioAdapter) for any
//! SoapySDR-compatible 315 MHz-capable receiver. Gated behind the
//! `soapysdr-sys` feature, same as the rest of this tree's optional
//! system-library hardware backends: a workspace built without a SoapySDR
//! install still compiles everything else.

#[cfg(feature = "soapysdr-sys")]
mod soapy;

#[cfg(feature = "soapysdr-sys")]
pub use soapy::SoapyRadio;
