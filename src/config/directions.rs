use std::time::Duration;

use serde::Deserialize;
use url::Url;

#[derive(derive_more::Debug, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct DirectionsConfig
{
	/// Base URL of the Mapbox API.
	#[debug("{:?}", base_url.as_str())]
	#[serde(default = "default_base_url")]
	pub base_url: Url,

	/// Mapbox access token.
	///
	/// Usually supplied through the `MAPBOX_ACCESS_TOKEN` environment variable
	/// instead of the configuration file.
	#[debug("{}", if access_token.is_some() { "Some(<redacted>)" } else { "None" })]
	pub access_token: Option<Box<str>>,

	/// Language of the turn-by-turn instructions.
	pub language: Box<str>,

	/// How long to wait for the directions API before giving up (in seconds).
	#[serde(default = "default_timeout", deserialize_with = "super::deserialize_duration")]
	pub timeout: Duration,
}

impl Default for DirectionsConfig
{
	fn default() -> Self
	{
		Self {
			base_url: default_base_url(),
			access_token: None,
			language: Box::from("en"),
			timeout: default_timeout(),
		}
	}
}

fn default_base_url() -> Url
{
	Url::parse("https://api.mapbox.com").unwrap_or_else(|err| {
		panic!("failed to parse hard-coded URL: {err}");
	})
}

fn default_timeout() -> Duration
{
	Duration::from_secs(10)
}
