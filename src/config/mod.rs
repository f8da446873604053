//! Runtime configuration.
//!
//! The configuration is read from a TOML file on startup. Every section has
//! sensible defaults, so an empty file (or no file at all) is valid, except
//! that an access token for the directions API must be supplied somewhere.
//! See `campus-nav.example.toml` in the root of the repository.

#![allow(missing_copy_implementations, reason = "configs won't be copied around")]

mod buildings;
mod directions;
mod http;
mod logging;
mod runtime;

use std::{fs, io, path::Path};

use derive_more::{Display, Error, From};
use serde::{Deserialize, Deserializer};

pub use self::{
	buildings::BuildingsConfig,
	directions::DirectionsConfig,
	http::HttpConfig,
	logging::{FilesConfig, LogRotation, LoggingConfig, StderrConfig},
	runtime::RuntimeConfig,
};

/// The service's configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct Config
{
	pub runtime: RuntimeConfig,
	pub http: HttpConfig,
	pub tracing: LoggingConfig,
	pub buildings: BuildingsConfig,
	pub directions: DirectionsConfig,
}

/// Errors that can occur while loading a [`Config`] from a file.
#[derive(Debug, Display, Error, From)]
pub enum LoadConfigError
{
	#[display("failed to read configuration file")]
	Read(io::Error),

	#[display("failed to parse configuration file")]
	Parse(toml::de::Error),
}

impl Config
{
	/// Reads and parses the configuration file at `path`.
	pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, LoadConfigError>
	{
		let text = fs::read_to_string(path.as_ref())?;
		let config = toml::from_str(&text)?;

		Ok(config)
	}
}

/// Deserializes a number of seconds, possibly fractional, into a
/// [`std::time::Duration`].
fn deserialize_duration<'de, D>(deserializer: D) -> Result<std::time::Duration, D::Error>
where
	D: Deserializer<'de>,
{
	let secs = f64::deserialize(deserializer)?;

	std::time::Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
}
