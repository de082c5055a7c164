use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use clap_verbosity_flag::{InfoLevel, Verbosity};
use tracing::trace;
use tracing_log::AsTrace;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, Registry};

/// Console output goes to stderr, leaving stdout for command output.
///
/// When a trace file is given, everything down to `TRACE` is also written to it.
pub fn configure_tracing(trace: Option<PathBuf>, verbose: Verbosity<InfoLevel>) -> anyhow::Result<()> {
    let console_level = verbose.log_level_filter().as_trace();

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .compact()
        .with_filter(console_level);

    let trace_layer = match &trace {
        Some(path) => {
            let file = File::create(path)?;
            Some(
                fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .with_filter(LevelFilter::TRACE),
            )
        }
        None => None,
    };

    Registry::default()
        .with(console_layer)
        .with(trace_layer)
        .try_init()?;

    trace!("tracing configured. console_level: {}, trace: {:?}", console_level, trace);

    Ok(())
}
