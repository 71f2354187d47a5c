// SPDX-FileCopyrightText: 2026 Stan Grams <sjg@haxx.space>
//
// SPDX-License-Identifier: BSD-2-Clause

//! Real SoapySDR device adapter.
//!
//! SoapySDR's Rust bindings stream `num_complex::Complex<f32>` (CF32), not
//! the `(i16, i16)` pairs the core pipeline's [`IqView`] contract expects.
//! Every sample is rescaled from the device's normalized [-1.0, 1.0] range
//! to full-scale `i16` on refill; this keeps `ook-core` free of any
//! dependency on `num-complex` or a particular stream sample type.

use num_complex::Complex;
use soapysdr::Device;

use ook_core::error::RadioError;
use ook_core::radio::{IqView, RadioAdapter};

/// One second; gives a stalled device a chance to recover instead of
/// blocking `refill` forever.
const TIMEOUT_US: i64 = 1_000_000;

fn to_i16(x: f32) -> i16 {
    (x * i16::MAX as f32).round().clamp(i16::MIN as f32, i16::MAX as f32) as i16
}

/// Hardware [`RadioAdapter`] over any SoapySDR-compatible device.
pub struct SoapyRadio {
    device_args: String,
    device: Option<Device>,
    stream: Option<soapysdr::RxStream<Complex<f32>>>,
    chunk_len: usize,
    cf32_buf: Vec<Complex<f32>>,
    iq_buf: Vec<(i16, i16)>,
}

impl SoapyRadio {
    /// `device_args` follows SoapySDR's key=value convention, e.g.
    /// `"driver=rtlsdr"`.
    pub fn new(device_args: impl Into<String>) -> Self {
        Self {
            device_args: device_args.into(),
            device: None,
            stream: None,
            chunk_len: 0,
            cf32_buf: Vec::new(),
            iq_buf: Vec::new(),
        }
    }
}

impl RadioAdapter for SoapyRadio {
    fn configure(
        &mut self,
        center_hz: f64,
        sample_hz: f64,
        bandwidth_hz: f64,
        gain_db: f64,
    ) -> Result<(), RadioError> {
        tracing::info!(args = %self.device_args, "opening SoapySDR device");
        let device = Device::new(self.device_args.as_str())
            .map_err(|e| RadioError::RadioUnavailable(e.to_string()))?;

        device
            .set_sample_rate(soapysdr::Direction::Rx, 0, sample_hz)
            .map_err(|e| RadioError::ConfigRejected(format!("sample rate: {e}")))?;
        device
            .set_frequency(soapysdr::Direction::Rx, 0, center_hz, ())
            .map_err(|e| RadioError::ConfigRejected(format!("center frequency: {e}")))?;
        if bandwidth_hz > 0.0 {
            device
                .set_bandwidth(soapysdr::Direction::Rx, 0, bandwidth_hz)
                .map_err(|e| RadioError::ConfigRejected(format!("bandwidth: {e}")))?;
        }
        device
            .set_gain(soapysdr::Direction::Rx, 0, gain_db)
            .map_err(|e| RadioError::ConfigRejected(format!("gain: {e}")))?;

        tracing::info!(
            center_hz,
            sample_hz,
            bandwidth_hz,
            gain_db,
            "SoapySDR device configured"
        );
        self.device = Some(device);
        Ok(())
    }

    fn open_rx_buffer(&mut self, chunk_len: usize) -> Result<(), RadioError> {
        let device = self
            .device
            .as_ref()
            .ok_or_else(|| RadioError::RadioUnavailable("configure() not called".into()))?;

        let mut stream = device
            .rx_stream::<Complex<f32>>(&[0])
            .map_err(|e| RadioError::RadioUnavailable(format!("rx stream: {e}")))?;
        stream
            .activate(None)
            .map_err(|e| RadioError::RadioUnavailable(format!("activate: {e}")))?;

        self.chunk_len = chunk_len;
        self.cf32_buf = vec![Complex::new(0.0, 0.0); chunk_len];
        self.iq_buf = vec![(0, 0); chunk_len];
        self.stream = Some(stream);
        Ok(())
    }

    fn refill(&mut self) -> Result<(), RadioError> {
        let stream = self
            .stream
            .as_mut()
            .ok_or_else(|| RadioError::RadioUnavailable("open_rx_buffer() not called".into()))?;

        let mut filled = 0;
        while filled < self.chunk_len {
            let n = stream
                .read(&mut [&mut self.cf32_buf[filled..]], TIMEOUT_US)
                .map_err(|e| RadioError::BufferExhausted(e.to_string()))?;
            if n == 0 {
                return Err(RadioError::BufferExhausted(
                    "stream read returned zero samples".into(),
                ));
            }
            filled += n;
        }

        for (dst, src) in self.iq_buf.iter_mut().zip(self.cf32_buf.iter()) {
            *dst = (to_i16(src.re), to_i16(src.im));
        }
        Ok(())
    }

    fn iq_view(&self) -> IqView<'_> {
        IqView::new(&self.iq_buf)
    }

    fn close(&mut self) -> Result<(), RadioError> {
        if let Some(mut stream) = self.stream.take() {
            stream
                .deactivate(None)
                .map_err(|e| RadioError::RadioUnavailable(format!("deactivate: {e}")))?;
        }
        self.device = None;
        Ok(())
    }
}
