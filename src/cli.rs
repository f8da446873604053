//! CLI argument handling.

use std::net::IpAddr;
use std::path::Path;

use campus_nav::Config;
use clap::Parser;

/// Parses the process' command line arguments.
pub(crate) fn args() -> Args
{
	Args::parse()
}

/// The backend of the campus map.
///
/// Serves the building table and walking directions between buildings.
/// Directions are fetched from the Mapbox Directions API, which requires an
/// access token.
#[derive(Debug, Parser)]
#[command(version)]
pub(crate) struct Args
{
	/// Path to the configuration file.
	///
	/// If omitted, `./campus-nav.toml` is used if it exists.
	#[arg(long = "config")]
	pub config_path: Option<Box<Path>>,

	/// The IP address to listen on.
	///
	/// This option takes precedence over the configuration file.
	#[arg(long)]
	pub ip: Option<IpAddr>,

	/// The port to listen on.
	///
	/// This option takes precedence over the configuration file.
	#[arg(long)]
	pub port: Option<u16>,

	/// Path to the JSON file containing the building table.
	///
	/// This option takes precedence over the configuration file.
	#[arg(long = "buildings")]
	pub buildings_path: Option<Box<Path>>,

	/// Access token for the Mapbox Directions API.
	///
	/// This option takes precedence over the configuration file.
	#[arg(long, env = "MAPBOX_ACCESS_TOKEN", hide_env_values = true)]
	pub access_token: Option<Box<str>>,
}

impl Args
{
	/// Applies any relevant config overrides specified as CLI flags in the
	/// given `config` object.
	pub(crate) fn apply_to_config(&self, config: &mut Config)
	{
		if let Some(ip) = self.ip {
			config.http.ip = ip;
		}

		if let Some(port) = self.port {
			config.http.port = port;
		}

		if let Some(ref path) = self.buildings_path {
			config.buildings.path = path.clone();
		}

		if let Some(ref access_token) = self.access_token {
			config.directions.access_token = Some(access_token.clone());
		}
	}
}
