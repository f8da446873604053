//! Shared test fixtures.

use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use http::{StatusCode, Uri, header};
use http_body_util::BodyExt;
use url::Url;

use crate::buildings::{Building, BuildingDirectory};
use crate::config::{DirectionsConfig, HttpConfig};
use crate::directions::DirectionsClient;

pub(crate) type Result<T = (), E = color_eyre::Report> = std::result::Result<T, E>;

pub(crate) const ACCESS_TOKEN: &str = "pk.test-token";

pub(crate) fn building(name: &str, longitude: f64, latitude: f64) -> Building
{
	Building {
		name: name.to_owned(),
		address: String::from("845 Sherbrooke St W, Montreal, QC H3A 0G4"),
		latitude,
		longitude,
		category: None,
	}
}

/// A small building table.
pub(crate) fn buildings() -> BuildingDirectory
{
	BuildingDirectory::new(vec![
		building("Burnside Hall", -73.574910039976, 45.504622946636026),
		building("Trottier Building", -73.5793, 45.5071),
		building("Arts Building", -73.5771, 45.5044),
		building("Redpath-McLennan Library", -73.57629194829202, 45.5034465093453),
	])
	.unwrap_or_else(|error| panic!("invalid test fixture: {error}"))
}

pub(crate) fn directions_client(base_url: Url) -> DirectionsClient
{
	let config = DirectionsConfig { base_url, ..Default::default() };

	DirectionsClient::new(&config, ACCESS_TOKEN)
		.unwrap_or_else(|error| panic!("failed to build directions client: {error}"))
}

/// The full application, talking to a directions API at `directions_url`.
pub(crate) fn app(directions_url: Url) -> axum::Router
{
	crate::router(
		Arc::new(buildings()),
		directions_client(directions_url),
		&HttpConfig::default(),
	)
}

pub(crate) async fn collect_body(response: Response) -> Result<Bytes>
{
	Ok(response.into_body().collect().await?.to_bytes())
}

pub(crate) async fn collect_json(response: Response) -> Result<serde_json::Value>
{
	Ok(serde_json::from_slice(&collect_body(response).await?[..])?)
}

/// A URL nothing is listening on.
pub(crate) async fn unreachable_url() -> Result<Url>
{
	let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
	let addr = listener.local_addr()?;

	drop(listener);

	Ok(Url::parse(&format!("http://{addr}"))?)
}

/// A stand-in for the directions API that always responds the same way and
/// records every request it receives.
#[derive(Debug)]
pub(crate) struct FakeUpstream
{
	url: Url,
	requests: Arc<Mutex<Vec<Uri>>>,
}

#[derive(Debug, Clone)]
struct FakeUpstreamState
{
	status: StatusCode,
	body: &'static str,
	requests: Arc<Mutex<Vec<Uri>>>,
}

impl FakeUpstream
{
	pub(crate) async fn spawn(status: StatusCode, body: &'static str) -> Result<Self>
	{
		let requests = Arc::new(Mutex::new(Vec::new()));
		let state = FakeUpstreamState { status, body, requests: Arc::clone(&requests) };
		let router = axum::Router::new().fallback(respond).with_state(state);
		let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
		let url = Url::parse(&format!("http://{}", listener.local_addr()?))?;

		tokio::spawn(async move {
			if let Err(error) = axum::serve(listener, router).await {
				panic!("fake upstream failed: {error}");
			}
		});

		Ok(Self { url, requests })
	}

	pub(crate) fn url(&self) -> Url
	{
		self.url.clone()
	}

	pub(crate) fn requests(&self) -> Vec<Uri>
	{
		self.requests
			.lock()
			.unwrap_or_else(|err| err.into_inner())
			.clone()
	}
}

async fn respond(State(state): State<FakeUpstreamState>, uri: Uri) -> Response
{
	state
		.requests
		.lock()
		.unwrap_or_else(|err| err.into_inner())
		.push(uri);

	(state.status, [(header::CONTENT_TYPE, "application/json")], Body::from(state.body))
		.into_response()
}
