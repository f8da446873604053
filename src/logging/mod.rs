//! Tracing subscriber setup.
//!
//! Logs go to stderr (human-readable) and, optionally, to rotated JSON files.
//! Both outputs share one filter.

use std::{fs, io};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{Layer, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{FilesConfig, LogRotation, LoggingConfig, StderrConfig};

/// Installs the global tracing subscriber.
///
/// The returned guard must be kept alive for as long as logs should be
/// written to files; dropping it flushes any buffered output.
pub fn init(config: &LoggingConfig) -> io::Result<Option<WorkerGuard>>
{
	if !config.enable {
		return Ok(None);
	}

	let stderr = config.stderr.enable.then(|| stderr_layer(&config.stderr));
	let (files, guard) = if config.files.enable {
		let (layer, guard) = files_layer(&config.files)?;
		(Some(layer), Some(guard))
	} else {
		(None, None)
	};

	tracing_subscriber::registry()
		.with(Layer::and_then(stderr, files).with_filter(config.env_filter()))
		.init();

	info!(
		stderr = config.stderr.enable,
		files = ?config.files.enable.then_some(&config.files.directory),
		"initialized tracing",
	);

	Ok(guard)
}

fn span_events(enable: bool) -> FmtSpan
{
	if enable { FmtSpan::NEW | FmtSpan::CLOSE } else { FmtSpan::NONE }
}

fn stderr_layer<S>(config: &StderrConfig) -> impl Layer<S> + use<S>
where
	S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
	tracing_subscriber::fmt::layer()
		.pretty()
		.with_writer(io::stderr)
		.with_ansi(config.ansi)
		.with_span_events(span_events(config.span_events))
}

/// Opens the log directory (creating it if necessary) and builds a JSON layer
/// writing into it from a background thread.
fn files_layer<S>(config: &FilesConfig) -> io::Result<(impl Layer<S> + use<S>, WorkerGuard)>
where
	S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
	fs::create_dir_all(&config.directory)?;

	let rotation = match config.rotation {
		LogRotation::Hourly => Rotation::HOURLY,
		LogRotation::Daily => Rotation::DAILY,
		LogRotation::Never => Rotation::NEVER,
	};

	let mut appender = RollingFileAppender::builder()
		.rotation(rotation)
		.filename_prefix(&*config.prefix)
		.filename_suffix("log");

	if let Some(max_files) = config.max_files {
		appender = appender.max_log_files(max_files.get());
	}

	let (writer, guard) = appender
		.build(&config.directory)
		.map(tracing_appender::non_blocking)
		.map_err(io::Error::other)?;

	let layer = tracing_subscriber::fmt::layer()
		.json()
		.with_writer(writer)
		.with_current_span(true)
		.with_span_list(false)
		.with_span_events(FmtSpan::CLOSE);

	Ok((layer, guard))
}
