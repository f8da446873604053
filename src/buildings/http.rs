use std::sync::Arc;

use axum::extract::{Path, State};
use axum::{Json, routing};

use super::{Building, BuildingDirectory};
use crate::http::{HandlerError, HandlerResult};

pub(crate) fn router(buildings: Arc<BuildingDirectory>) -> axum::Router
{
	axum::Router::new()
		.route("/", routing::get(get_buildings))
		.route("/{name}", routing::get(get_building))
		.with_state(buildings)
}

/// Returns every building, in table order.
async fn get_buildings(State(buildings): State<Arc<BuildingDirectory>>) -> Json<Vec<Building>>
{
	Json(buildings.as_slice().to_vec())
}

/// Returns the building with the given name, ignoring case.
#[instrument(level = "debug", skip(buildings))]
async fn get_building(
	State(buildings): State<Arc<BuildingDirectory>>,
	Path(name): Path<String>,
) -> HandlerResult<Json<Building>>
{
	match buildings.resolve(&name) {
		Some(building) => Ok(Json(building.clone())),
		None => Err(HandlerError::NotFound {
			message: format!("building `{}` not found", name.trim()),
			unresolved: Vec::new(),
		}),
	}
}

#[cfg(test)]
mod tests
{
	use axum::body::Body;
	use http::{Request, StatusCode};
	use tower::ServiceExt;

	use crate::testing::{self, Result};

	fn get(uri: &str) -> Request<Body>
	{
		Request::get(uri).body(Body::empty()).unwrap()
	}

	#[tokio::test]
	async fn lists_all_buildings() -> Result
	{
		let app = testing::app(testing::unreachable_url().await?);
		let response = app.oneshot(get("/buildings")).await?;

		assert_eq!(response.status(), StatusCode::OK);

		let body = testing::collect_json(response).await?;
		let Some(buildings) = body.as_array() else {
			panic!("expected an array, got {body}");
		};

		assert_eq!(buildings.len(), testing::buildings().len());
		assert_eq!(buildings[0]["name"], "Burnside Hall");
		assert_eq!(buildings[0]["longitude"], -73.574910039976);

		Ok(())
	}

	#[tokio::test]
	async fn finds_single_building() -> Result
	{
		let app = testing::app(testing::unreachable_url().await?);
		let response = app.oneshot(get("/buildings/arts%20building")).await?;

		assert_eq!(response.status(), StatusCode::OK);
		assert_eq!(testing::collect_json(response).await?["name"], "Arts Building");

		Ok(())
	}

	#[tokio::test]
	async fn unknown_building_is_not_found() -> Result
	{
		let app = testing::app(testing::unreachable_url().await?);
		let response = app.oneshot(get("/buildings/Hogwarts")).await?;

		assert_eq!(response.status(), StatusCode::NOT_FOUND);
		assert_eq!(
			testing::collect_json(response).await?["error"],
			"building `Hogwarts` not found",
		);

		Ok(())
	}
}
