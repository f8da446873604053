use std::sync::Arc;

use bytes::Bytes;
use derive_more::{Display, Error, From};
use http_body_util::BodyExt;
use serde::de::IgnoredAny;
use url::Url;

use crate::buildings::Coordinates;
use crate::config::DirectionsConfig;

/// Path segments of the walking profile, relative to the API's base URL.
const WALKING_PROFILE: [&str; 4] = ["directions", "v5", "mapbox", "walking"];

#[derive(Debug, Display, Error, From)]
#[display("directions API error: {_variant}")]
pub enum ApiError
{
	#[display("failed to make http request")]
	Http(reqwest::Error),

	#[display("unexpected response status {}", response.status())]
	#[from(ignore)]
	UnexpectedStatus
	{
		response: http::Response<Bytes>
	},

	#[display("failed to buffer response body")]
	#[from(ignore)]
	BufferResponseBody
	{
		#[error(source)]
		error: reqwest::Error,
		response: http::response::Parts,
	},

	#[display("directions API did not return valid JSON")]
	#[from(ignore)]
	DeserializeResponse
	{
		#[error(source)]
		error: serde_json::Error,
		response: http::Response<Bytes>,
	},
}

/// Errors that can occur when constructing a [`DirectionsClient`].
#[derive(Debug, Display, Error, From)]
pub enum ClientError
{
	#[display("failed to build http client")]
	BuildHttpClient(reqwest::Error),

	#[display("`{url}` cannot be used as a base URL")]
	#[from(ignore)]
	InvalidBaseUrl
	{
		url: Url
	},
}

/// A client for the Mapbox Directions API.
///
/// Cheap to clone.
#[derive(derive_more::Debug, Clone)]
pub struct DirectionsClient
{
	http_client: reqwest::Client,

	#[debug("{:?}", base_url.as_str())]
	base_url: Arc<Url>,

	#[debug(skip)]
	access_token: Arc<str>,

	language: Arc<str>,
}

impl DirectionsClient
{
	pub fn new(
		config: &DirectionsConfig,
		access_token: impl Into<Arc<str>>,
	) -> Result<Self, ClientError>
	{
		if config.base_url.cannot_be_a_base() {
			return Err(ClientError::InvalidBaseUrl { url: config.base_url.clone() });
		}

		let http_client = reqwest::Client::builder()
			.timeout(config.timeout)
			.user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
			.build()?;

		Ok(Self {
			http_client,
			base_url: Arc::new(config.base_url.clone()),
			access_token: access_token.into(),
			language: Arc::from(&*config.language),
		})
	}

	/// Builds the URL for a walking route from `from` to `to`.
	///
	/// The result contains the access token and must not be logged.
	pub fn request_url(&self, from: Coordinates, to: Coordinates) -> Url
	{
		let mut url = Url::clone(&self.base_url);
		let waypoints = format!("{from};{to}");

		url.set_query(None);
		url.set_fragment(None);

		// `new()` rejected URLs that cannot be a base
		if let Ok(mut path) = url.path_segments_mut() {
			path.pop_if_empty().extend(WALKING_PROFILE).push(&waypoints);
		}

		url.query_pairs_mut()
			.append_pair("alternatives", "false")
			.append_pair("annotations", "distance,duration")
			.append_pair("geometries", "geojson")
			.append_pair("language", &self.language)
			.append_pair("overview", "full")
			.append_pair("steps", "true")
			.append_pair("access_token", &self.access_token);

		url
	}

	/// Fetches a walking route from `from` to `to`.
	///
	/// The returned bytes are the API's response body, unchanged. They are
	/// guaranteed to be valid JSON.
	#[instrument(level = "debug", skip(self), err(level = "debug"))]
	pub async fn walking_directions(
		&self,
		from: Coordinates,
		to: Coordinates,
	) -> Result<Bytes, ApiError>
	{
		let response = self
			.http_client
			.get(self.request_url(from, to))
			.send()
			.await
			.map_err(|error| ApiError::Http(error.without_url()))?;

		let (response, body) = http::Response::from(response).into_parts();
		let body = match body.collect().await {
			Ok(collected) => collected.to_bytes(),
			Err(error) => {
				return Err(ApiError::BufferResponseBody { error: error.without_url(), response });
			},
		};

		if !response.status.is_success() {
			return Err(ApiError::UnexpectedStatus {
				response: http::Response::from_parts(response, body),
			});
		}

		if let Err(error) = serde_json::from_slice::<IgnoredAny>(&body[..]) {
			return Err(ApiError::DeserializeResponse {
				error,
				response: http::Response::from_parts(response, body),
			});
		}

		debug!(size = body.len(), "received directions");

		Ok(body)
	}
}
