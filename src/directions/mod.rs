//! Walking directions between two campus buildings.
//!
//! Building names are resolved against the [`BuildingDirectory`] first; only
//! if both resolve is the directions API contacted.

use std::{fmt, sync::Arc};

use bytes::Bytes;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

use crate::buildings::BuildingDirectory;

mod client;
pub use client::{ApiError, ClientError, DirectionsClient};

pub(crate) mod http;

/// One end of a route.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Waypoint
{
	#[display("start")]
	Start,

	#[display("destination")]
	Destination,
}

/// A building name that did not match any known building.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresolvedBuilding
{
	pub field: Waypoint,
	pub name: String,
}

/// Request for [`DirectionsService::find_route()`].
///
/// Missing names are reported by the service rather than failing
/// deserialization, so callers learn about every missing field at once.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct FindRouteRequest
{
	#[serde(default, alias = "startBuilding", alias = "startBuildingName")]
	pub start: Option<String>,

	#[serde(default, alias = "destinationBuilding", alias = "destinationBuildingName")]
	pub destination: Option<String>,
}

#[derive(Debug, Error)]
pub enum FindRouteError
{
	/// At least one building name is absent or blank.
	MissingBuildingNames
	{
		missing: Vec<Waypoint>
	},

	/// At least one building name did not resolve.
	UnknownBuildings
	{
		unresolved: Vec<UnresolvedBuilding>
	},

	/// Both buildings resolved, but fetching the route failed.
	Directions(ApiError),
}

impl fmt::Display for FindRouteError
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		match self {
			FindRouteError::MissingBuildingNames { missing } => match missing.as_slice() {
				[] => f.write_str("missing building name"),
				[waypoint] => write!(f, "missing {waypoint} building name"),
				[first, rest @ ..] => {
					write!(f, "missing {first}")?;

					for waypoint in rest {
						write!(f, " and {waypoint}")?;
					}

					f.write_str(" building names")
				},
			},
			FindRouteError::UnknownBuildings { unresolved } => {
				for (idx, UnresolvedBuilding { field, name }) in unresolved.iter().enumerate() {
					if idx > 0 {
						f.write_str(", ")?;
					}

					write!(f, "{field} building `{name}` not found")?;
				}

				Ok(())
			},
			FindRouteError::Directions(_) => f.write_str("error fetching directions"),
		}
	}
}

impl From<ApiError> for FindRouteError
{
	fn from(error: ApiError) -> Self
	{
		Self::Directions(error)
	}
}

/// Resolves building names and fetches walking routes between them.
#[derive(Debug, Clone)]
pub struct DirectionsService
{
	buildings: Arc<BuildingDirectory>,
	client: DirectionsClient,
}

impl DirectionsService
{
	pub fn new(buildings: Arc<BuildingDirectory>, client: DirectionsClient) -> Self
	{
		Self { buildings, client }
	}

	/// Finds a walking route between two buildings.
	///
	/// On success, returns the directions API's JSON response as-is.
	#[instrument(skip(self), err(level = "debug"))]
	pub async fn find_route(&self, request: FindRouteRequest) -> Result<Bytes, FindRouteError>
	{
		let start = non_blank(request.start.as_deref());
		let destination = non_blank(request.destination.as_deref());

		let (Some(start), Some(destination)) = (start, destination) else {
			let missing = [(Waypoint::Start, start), (Waypoint::Destination, destination)]
				.into_iter()
				.filter(|(_, name)| name.is_none())
				.map(|(waypoint, _)| waypoint)
				.collect();

			return Err(FindRouteError::MissingBuildingNames { missing });
		};

		let (Some(from), Some(to)) =
			(self.buildings.resolve(start), self.buildings.resolve(destination))
		else {
			let unresolved = [(Waypoint::Start, start), (Waypoint::Destination, destination)]
				.into_iter()
				.filter(|&(_, name)| self.buildings.resolve(name).is_none())
				.map(|(field, name)| UnresolvedBuilding { field, name: name.to_owned() })
				.collect();

			return Err(FindRouteError::UnknownBuildings { unresolved });
		};

		debug!(from = %from.name, to = %to.name, "resolved buildings");

		let directions = self
			.client
			.walking_directions(from.coordinates(), to.coordinates())
			.await?;

		Ok(directions)
	}
}

fn non_blank(name: Option<&str>) -> Option<&str>
{
	name.map(str::trim).filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests
{
	use ::http::StatusCode;

	use super::*;
	use crate::testing::{self, FakeUpstream, Result};

	const DIRECTIONS: &str = r#"{"routes":[],"waypoints":[],"code":"Ok"}"#;

	fn request(start: Option<&str>, destination: Option<&str>) -> FindRouteRequest
	{
		FindRouteRequest {
			start: start.map(String::from),
			destination: destination.map(String::from),
		}
	}

	async fn service() -> Result<(DirectionsService, FakeUpstream)>
	{
		let upstream = FakeUpstream::spawn(StatusCode::OK, DIRECTIONS).await?;
		let service = DirectionsService::new(
			Arc::new(testing::buildings()),
			testing::directions_client(upstream.url()),
		);

		Ok((service, upstream))
	}

	#[tokio::test]
	async fn missing_names_skip_upstream() -> Result
	{
		let (service, upstream) = service().await?;

		for (start, destination, expected) in [
			(None, None, &[Waypoint::Start, Waypoint::Destination][..]),
			(Some("Burnside Hall"), None, &[Waypoint::Destination][..]),
			(Some("  "), Some("Arts Building"), &[Waypoint::Start][..]),
		] {
			let result = service.find_route(request(start, destination)).await;
			let Err(FindRouteError::MissingBuildingNames { missing }) = result else {
				panic!("expected `MissingBuildingNames`, got {result:?}");
			};

			assert_eq!(missing, expected);
		}

		assert!(upstream.requests().is_empty());

		Ok(())
	}

	#[tokio::test]
	async fn unknown_names_skip_upstream() -> Result
	{
		let (service, upstream) = service().await?;
		let result = service
			.find_route(request(Some("Hogwarts"), Some("Arts Building")))
			.await;

		let Err(FindRouteError::UnknownBuildings { unresolved }) = result else {
			panic!("expected `UnknownBuildings`, got {result:?}");
		};

		assert_eq!(unresolved, [UnresolvedBuilding {
			field: Waypoint::Start,
			name: String::from("Hogwarts"),
		}]);

		assert!(upstream.requests().is_empty());

		Ok(())
	}

	#[tokio::test]
	async fn reports_both_unknown_names() -> Result
	{
		let (service, _upstream) = service().await?;
		let error = service
			.find_route(request(Some("Hogwarts"), Some("Narnia")))
			.await
			.unwrap_err();

		assert_eq!(
			error.to_string(),
			"start building `Hogwarts` not found, destination building `Narnia` not found",
		);

		Ok(())
	}

	#[tokio::test]
	async fn resolves_names_ignoring_case() -> Result
	{
		let (service, upstream) = service().await?;
		let directions = service
			.find_route(request(Some("burnside hall"), Some(" TROTTIER BUILDING ")))
			.await?;

		assert_eq!(&directions[..], DIRECTIONS.as_bytes());

		let requests = upstream.requests();

		assert_eq!(requests.len(), 1);
		assert_eq!(
			requests[0].path(),
			"/directions/v5/mapbox/walking/-73.574910039976,45.504622946636026;-73.5793,45.5071",
		);

		Ok(())
	}

	#[test]
	fn missing_names_message_lists_every_side()
	{
		let message = |missing: Vec<Waypoint>| {
			FindRouteError::MissingBuildingNames { missing }.to_string()
		};

		assert_eq!(message(vec![Waypoint::Destination]), "missing destination building name");
		assert_eq!(
			message(vec![Waypoint::Start, Waypoint::Destination]),
			"missing start and destination building names",
		);
		assert_eq!(message(Vec::new()), "missing building name");
	}

	#[test]
	fn accepts_legacy_field_names()
	{
		let request = serde_json::from_str::<FindRouteRequest>(
			r#"{ "startBuilding": "Burnside Hall", "destinationBuildingName": "Arts Building" }"#,
		)
		.unwrap();

		assert_eq!(request.start.as_deref(), Some("Burnside Hall"));
		assert_eq!(request.destination.as_deref(), Some("Arts Building"));
	}
}
