use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use tracing::level_filters::LevelFilter;
use tracing::trace;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

/// Installs the global subscriber.
///
/// Console output goes to stderr, filtered by the verbosity flags, so stdout is left for command output.
/// When a trace file is given, everything down to TRACE level is also written to it, regardless of verbosity.
pub fn configure_tracing(trace: Option<PathBuf>, verbose: Verbosity<InfoLevel>) -> anyhow::Result<()> {
    let console_filter: LevelFilter = verbose.tracing_level_filter();

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .with_filter(console_filter);

    let trace_layer = match &trace {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("Creating trace log. file: {}", path.display()))?;
            Some(
                fmt::layer()
                    .with_writer(Arc::new(file))
                    .with_ansi(false)
                    .with_filter(LevelFilter::TRACE),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(trace_layer)
        .try_init()
        .context("Installing tracing subscriber")?;

    if let Some(path) = trace {
        trace!("Tracing to file. path: {}", path.display());
    }

    Ok(())
}
