use std::num::NonZero;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct LoggingConfig
{
	/// Whether to install a tracing subscriber at all.
	pub enable: bool,

	/// Default filter directives, used when `RUST_LOG` is not set.
	pub filter: Box<str>,
	pub stderr: StderrConfig,
	pub files: FilesConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct StderrConfig
{
	pub enable: bool,
	pub ansi: bool,

	/// Also log when spans (e.g. requests) open and close.
	pub span_events: bool,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct FilesConfig
{
	pub enable: bool,

	#[serde(default = "default_files_directory")]
	pub directory: Box<Path>,

	/// File names are `<prefix>.<date>.log`.
	pub prefix: Box<str>,
	pub rotation: LogRotation,

	/// Older files beyond this count are deleted on rotation.
	pub max_files: Option<NonZero<usize>>,
}

/// How often log files are rotated.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LogRotation
{
	Hourly,
	#[default]
	Daily,
	Never,
}

impl LoggingConfig
{
	/// Returns the filter to apply to all log output.
	///
	/// `RUST_LOG` takes precedence over the configured filter.
	pub fn env_filter(&self) -> EnvFilter
	{
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&*self.filter))
	}
}

impl Default for LoggingConfig
{
	fn default() -> Self
	{
		Self {
			enable: true,
			filter: Box::from("campus_nav=info,tower_http=info,warn"),
			stderr: StderrConfig::default(),
			files: FilesConfig::default(),
		}
	}
}

impl Default for StderrConfig
{
	fn default() -> Self
	{
		Self { enable: true, ansi: true, span_events: false }
	}
}

impl Default for FilesConfig
{
	fn default() -> Self
	{
		Self {
			enable: false,
			directory: default_files_directory(),
			prefix: Box::from("campus-nav"),
			rotation: LogRotation::default(),
			max_files: None,
		}
	}
}

fn default_files_directory() -> Box<Path>
{
	PathBuf::from("/var/log/campus-nav").into_boxed_path()
}
