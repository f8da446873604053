use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing;
use http::{HeaderValue, header};

use super::{DirectionsService, FindRouteRequest};
use crate::http::extract::Json;
use crate::http::HandlerResult;

pub(crate) fn router(service: DirectionsService) -> axum::Router
{
	axum::Router::new()
		.route("/", routing::post(find_route))
		.with_state(service)
}

/// Relays the directions API's response for a route between two buildings.
#[instrument(level = "debug", skip(service))]
async fn find_route(
	State(service): State<DirectionsService>,
	Json(request): Json<FindRouteRequest>,
) -> HandlerResult<Response>
{
	let directions = service.find_route(request).await?;

	Ok((
		[(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
		directions,
	)
		.into_response())
}
