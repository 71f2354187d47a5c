// SPDX-FileCopyrightText: 2026 Stan Grams <sjg@haxx.space>
//
// SPDX-License-Identifier: BSD-2-Clause

mod config;
mod error;
mod logging;

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Parser;
use tracing::info;

use config::{AppConfig, ConfigFile};
use error::DynResult;
use ook_core::{calibration, radio::RadioAdapter, Sink, TextSink, TriggerLoop};

const PKG_DESCRIPTION: &str = concat!(
    env!("CARGO_PKG_NAME"),
    " - trigger-mode 315 MHz OOK/RKE snapshot receiver"
);

#[derive(Debug, Parser)]
#[command(author = env!("CARGO_PKG_AUTHORS"), version = env!("CARGO_PKG_VERSION"), about = PKG_DESCRIPTION)]
struct Cli {
    /// Path to configuration file
    #[arg(long = "config", short = 'C', value_name = "FILE")]
    config: Option<PathBuf>,
    /// Print the effective configuration as TOML and exit
    #[arg(long = "print-config")]
    print_config: bool,
}

#[cfg(feature = "soapysdr")]
fn open_radio(device_args: &str) -> DynResult<impl RadioAdapter> {
    Ok(ook_rx::SoapyRadio::new(device_args))
}

#[cfg(not(feature = "soapysdr"))]
fn open_radio(_device_args: &str) -> DynResult<Box<dyn RadioAdapter>> {
    Err("no radio backend compiled in; rebuild with --features soapysdr".into())
}

fn main() -> DynResult<()> {
    let cli = Cli::parse();

    let (cfg, config_path) = if let Some(ref path) = cli.config {
        (AppConfig::load_from_file(path)?, Some(path.clone()))
    } else {
        AppConfig::load_from_default_paths()?
    };

    if cli.print_config {
        println!("{}", toml::to_string_pretty(&cfg)?);
        return Ok(());
    }

    logging::init_logging(cfg.log_level.as_deref());

    if let Some(path) = &config_path {
        info!("loaded configuration from {}", path.display());
    } else {
        info!("no configuration file found, using built-in defaults");
    }

    let mut radio = open_radio(&cfg.device_args)?;
    radio.configure(
        cfg.receiver.center_freq_hz,
        cfg.receiver.sample_rate_hz,
        cfg.receiver.bandwidth_hz,
        cfg.receiver.gain_db,
    )?;
    radio.open_rx_buffer(cfg.receiver.chunk_len)?;

    let calib = calibration::calibrate(&mut radio, &cfg.receiver)?;

    let mut sink = TextSink::new(std::io::stdout());
    sink.calibration(&calib);

    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let shutdown = Arc::clone(&shutdown);
        ctrlc::set_handler(move || {
            info!("Ctrl+C received, will stop between refills");
            shutdown.store(true, Ordering::Relaxed);
        })?;
    }

    let mut trigger = TriggerLoop::new(&cfg.receiver);
    trigger.run(&mut radio, &calib, &cfg.receiver, &mut sink, &shutdown)?;

    radio.close()?;
    Ok(())
}
