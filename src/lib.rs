//! campus-nav - the backend of the campus map.
//!
//! This crate owns the campus building table and proxies walking directions
//! between two buildings to the Mapbox Directions API.

/*
 * campus-nav - campus map backend.
 * Copyright (C) 2025  campus-nav contributors
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see https://www.gnu.org/licenses.
 */

use std::{io, net::SocketAddr, path::Path, sync::Arc};

use derive_more::{Display, Error, From};
use tower::ServiceBuilder;

#[macro_use]
extern crate tracing as _;

#[cfg(test)]
mod testing;

mod http;
mod signal;

pub mod buildings;
pub mod config;
pub mod directions;
pub mod logging;
pub mod panic_hook;

pub use self::config::Config;
use self::{buildings::BuildingDirectory, directions::DirectionsService};

/// Errors returned by [`run()`].
#[derive(Debug, Display, Error, From)]
pub enum RunError
{
	/// The building table could not be loaded.
	#[display("failed to load buildings from {}", path.display())]
	#[from(ignore)]
	LoadBuildings
	{
		path: Box<Path>,

		#[error(source)]
		error: buildings::LoadBuildingsError,
	},

	/// No access token (or only a blank one) for the directions API was
	/// configured.
	#[display("missing directions API access token")]
	#[from(ignore)]
	MissingAccessToken,

	/// The directions client could not be built.
	#[display("failed to build directions client")]
	DirectionsClient(directions::ClientError),

	/// Some other I/O failure, e.g. binding the TCP socket.
	#[display("I/O error")]
	Io(io::Error),
}

/// Runs the HTTP server until a shutdown signal is received.
pub async fn run(config: Config) -> Result<(), RunError>
{
	let buildings = BuildingDirectory::load(&config.buildings.path).map_err(|error| {
		RunError::LoadBuildings { path: config.buildings.path.clone(), error }
	})?;

	info!(count = buildings.len(), path = ?config.buildings.path, "loaded buildings");

	let access_token = config
		.directions
		.access_token
		.clone()
		.filter(|token| !token.trim().is_empty())
		.ok_or(RunError::MissingAccessToken)?;

	let directions_client = directions::DirectionsClient::new(&config.directions, access_token)?;
	let service = router(Arc::new(buildings), directions_client, &config.http);

	let tcp_listener = tokio::net::TcpListener::bind(config.http.socket_addr()).await?;
	let addr = tcp_listener.local_addr()?;

	info!(%addr, "listening for http requests");

	axum::serve(tcp_listener, service.into_make_service_with_connect_info::<SocketAddr>())
		.with_graceful_shutdown(signal::shutdown())
		.await?;

	info!("server shut down");

	Ok(())
}

/// Builds the complete HTTP router, including middleware.
pub fn router(
	buildings: Arc<BuildingDirectory>,
	directions_client: directions::DirectionsClient,
	http_config: &config::HttpConfig,
) -> axum::Router
{
	let directions_service = DirectionsService::new(Arc::clone(&buildings), directions_client);
	let (set_request_id, propagate_request_id) = http::middleware::request_id::layers();

	let middleware = ServiceBuilder::new()
		.layer(set_request_id)
		.layer(propagate_request_id)
		.layer(http::middleware::trace::layer(http_config.include_http_headers))
		.layer(http::middleware::catch_panic::layer())
		.layer(http::middleware::cors::layer(http_config.allowed_origins()));

	axum::Router::new()
		.route("/health", axum::routing::get(|| async { "ok" }))
		.nest("/buildings", buildings::http::router(buildings))
		.nest("/directions", directions::http::router(directions_service))
		.layer(middleware)
}
