use std::error::Error;

use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::Serialize;

use crate::directions::{ApiError, FindRouteError, UnresolvedBuilding, Waypoint};
use crate::http::extract::JsonRejection;

pub(crate) type HandlerResult<T> = Result<T, HandlerError>;

/// An error returned from an HTTP handler.
///
/// Every variant renders as a JSON object with at least an `error` field.
#[derive(Debug)]
pub(crate) enum HandlerError
{
	/// The request was malformed or incomplete.
	BadRequest
	{
		message: String,
		missing: Vec<Waypoint>,
	},

	/// One or more building names could not be resolved.
	NotFound
	{
		message: String,
		unresolved: Vec<UnresolvedBuilding>,
	},

	/// The directions API failed us.
	Directions,

	/// A handler panicked.
	Internal,
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a>
{
	error: &'a str,

	#[serde(skip_serializing_if = "is_empty")]
	missing: &'a [Waypoint],

	#[serde(skip_serializing_if = "is_empty")]
	unresolved: &'a [UnresolvedBuilding],
}

fn is_empty<T>(slice: &&[T]) -> bool
{
	slice.is_empty()
}

impl HandlerError
{
	pub(crate) fn status(&self) -> StatusCode
	{
		match self {
			HandlerError::BadRequest { .. } => StatusCode::BAD_REQUEST,
			HandlerError::NotFound { .. } => StatusCode::NOT_FOUND,
			HandlerError::Directions | HandlerError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}
}

impl IntoResponse for HandlerError
{
	fn into_response(self) -> Response
	{
		let status = self.status();
		let body = match self {
			HandlerError::BadRequest { ref message, ref missing } => ErrorBody {
				error: message,
				missing,
				unresolved: &[],
			},
			HandlerError::NotFound { ref message, ref unresolved } => ErrorBody {
				error: message,
				missing: &[],
				unresolved,
			},
			HandlerError::Directions => ErrorBody {
				error: "error fetching directions",
				missing: &[],
				unresolved: &[],
			},
			HandlerError::Internal => ErrorBody {
				error: "something went wrong; please report this incident",
				missing: &[],
				unresolved: &[],
			},
		};

		if status.is_client_error() {
			debug!(status = status.as_u16(), error = body.error, "rejecting request");
		}

		(status, axum::Json(body)).into_response()
	}
}

impl From<JsonRejection> for HandlerError
{
	fn from(rejection: JsonRejection) -> Self
	{
		Self::BadRequest { message: rejection.to_string(), missing: Vec::new() }
	}
}

impl From<FindRouteError> for HandlerError
{
	fn from(error: FindRouteError) -> Self
	{
		let message = error.to_string();

		match error {
			FindRouteError::MissingBuildingNames { missing } => Self::BadRequest { message, missing },
			FindRouteError::UnknownBuildings { unresolved } => Self::NotFound { message, unresolved },
			FindRouteError::Directions(api_error) => api_error.into(),
		}
	}
}

impl From<ApiError> for HandlerError
{
	fn from(error: ApiError) -> Self
	{
		match error {
			ApiError::Http(ref error) => {
				error!(
					error = error as &dyn Error,
					timeout = error.is_timeout(),
					"failed to reach directions API",
				);
			},
			ApiError::UnexpectedStatus { ref response } => {
				error!(
					res.status = response.status().as_u16(),
					res.body = std::str::from_utf8(response.body()).unwrap_or("<invalid utf-8>"),
					"directions API returned an error",
				);
			},
			ApiError::BufferResponseBody { ref error, ref response } => {
				error!(
					error = error as &dyn Error,
					res.status = response.status.as_u16(),
					"failed to read directions API response",
				);
			},
			ApiError::DeserializeResponse { ref error, ref response } => {
				error!(
					res.status = response.status().as_u16(),
					res.body = std::str::from_utf8(response.body()).unwrap_or("<invalid utf-8>"),
					error = error as &dyn Error,
					"directions API returned a non-JSON payload",
				);
			},
		}

		Self::Directions
	}
}

#[cfg(test)]
mod tests
{
	use super::*;
	use crate::testing::{self, Result};

	#[tokio::test]
	async fn missing_names_render_as_bad_request() -> Result
	{
		let error = HandlerError::from(FindRouteError::MissingBuildingNames {
			missing: vec![Waypoint::Start, Waypoint::Destination],
		});

		let response = error.into_response();

		assert_eq!(response.status(), StatusCode::BAD_REQUEST);

		let body = testing::collect_json(response).await?;

		assert_eq!(body["missing"], serde_json::json!(["start", "destination"]));
		assert!(body["error"].is_string());
		assert!(body.get("unresolved").is_none());

		Ok(())
	}

	#[tokio::test]
	async fn unresolved_names_render_as_not_found() -> Result
	{
		let error = HandlerError::from(FindRouteError::UnknownBuildings {
			unresolved: vec![UnresolvedBuilding {
				field: Waypoint::Destination,
				name: String::from("Hogwarts"),
			}],
		});

		let response = error.into_response();

		assert_eq!(response.status(), StatusCode::NOT_FOUND);

		let body = testing::collect_json(response).await?;

		assert_eq!(
			body["unresolved"],
			serde_json::json!([{ "field": "destination", "name": "Hogwarts" }]),
		);
		assert!(body["error"].as_str().is_some_and(|msg| msg.contains("Hogwarts")));

		Ok(())
	}

	#[tokio::test]
	async fn directions_errors_hide_details() -> Result
	{
		let response = HandlerError::Directions.into_response();

		assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
		assert_eq!(
			testing::collect_json(response).await?,
			serde_json::json!({ "error": "error fetching directions" }),
		);

		Ok(())
	}
}
