//! The campus building table.
//!
//! Buildings are loaded once on startup from a JSON file and never change
//! afterwards. Lookups are a linear scan; the table only holds a couple dozen
//! entries.

use std::{collections::HashSet, fmt, fs, path::Path};

use serde::{Deserialize, Serialize};

mod errors;
pub use errors::{InvalidBuildings, LoadBuildingsError};

pub(crate) mod http;

/// A campus building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Building
{
	/// The building's name. Unique across the table, ignoring case.
	#[serde(alias = "building")]
	pub name: String,

	/// Postal address.
	pub address: String,

	/// Latitude in degrees.
	pub latitude: f64,

	/// Longitude in degrees.
	pub longitude: f64,

	/// Which group of markers the building belongs to on the map.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub category: Option<Category>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category
{
	Service,
	Residence,
	Library,
}

/// A point on the map.
///
/// Formats as `longitude,latitude`, which is the order the directions API
/// expects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates
{
	pub longitude: f64,
	pub latitude: f64,
}

impl Coordinates
{
	/// Returns `true` if both components are finite and within the valid
	/// ranges for degrees.
	pub fn is_valid(&self) -> bool
	{
		self.latitude.is_finite()
			&& self.longitude.is_finite()
			&& (-90.0..=90.0).contains(&self.latitude)
			&& (-180.0..=180.0).contains(&self.longitude)
	}
}

impl fmt::Display for Coordinates
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		write!(f, "{},{}", self.longitude, self.latitude)
	}
}

impl Building
{
	pub fn coordinates(&self) -> Coordinates
	{
		Coordinates { longitude: self.longitude, latitude: self.latitude }
	}

	/// Checks whether `name` refers to this building.
	///
	/// Surrounding whitespace on either name is ignored and the comparison is
	/// case-insensitive.
	pub fn is_named(&self, name: &str) -> bool
	{
		eq_ignore_case(self.name.trim(), name.trim())
	}
}

/// The immutable, ordered set of campus buildings.
#[derive(Debug, Default)]
pub struct BuildingDirectory
{
	buildings: Box<[Building]>,
}

impl BuildingDirectory
{
	/// Creates a directory from a list of buildings, keeping their order.
	///
	/// Every building must have a non-blank name that is unique (ignoring
	/// case) and valid coordinates.
	pub fn new(buildings: Vec<Building>) -> Result<Self, InvalidBuildings>
	{
		let mut seen = HashSet::with_capacity(buildings.len());

		for (idx, building) in buildings.iter().enumerate() {
			if building.name.trim().is_empty() {
				return Err(InvalidBuildings::BlankName { idx });
			}

			if !building.coordinates().is_valid() {
				return Err(InvalidBuildings::InvalidCoordinates {
					name: building.name.clone(),
					latitude: building.latitude,
					longitude: building.longitude,
				});
			}

			if !seen.insert(fold_case(building.name.trim())) {
				return Err(InvalidBuildings::DuplicateName { name: building.name.clone() });
			}
		}

		Ok(Self { buildings: buildings.into_boxed_slice() })
	}

	/// Reads the building table from a JSON file.
	///
	/// The file must contain an array of buildings.
	pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadBuildingsError>
	{
		let path = path.as_ref();
		let text = fs::read_to_string(path).map_err(|error| LoadBuildingsError::Read {
			path: path.into(),
			error,
		})?;

		Self::from_json(&text)
	}

	/// Parses the building table from JSON text.
	pub fn from_json(text: &str) -> Result<Self, LoadBuildingsError>
	{
		let buildings = serde_json::from_str::<Vec<Building>>(text)?;

		Ok(Self::new(buildings)?)
	}

	/// Finds the building called `name`.
	///
	/// See [`Building::is_named()`] for the matching rules.
	pub fn resolve(&self, name: &str) -> Option<&Building>
	{
		let building = self.buildings.iter().find(|building| building.is_named(name));

		trace!(name, found = building.is_some(), "resolved building");

		building
	}

	pub fn iter(&self) -> impl ExactSizeIterator<Item = &Building>
	{
		self.buildings.iter()
	}

	pub fn as_slice(&self) -> &[Building]
	{
		&self.buildings
	}

	pub fn len(&self) -> usize
	{
		self.buildings.len()
	}

	pub fn is_empty(&self) -> bool
	{
		self.buildings.is_empty()
	}
}

/// Unicode-aware case-insensitive equality that doesn't allocate.
///
/// Must agree with [`fold_case()`].
fn eq_ignore_case(lhs: &str, rhs: &str) -> bool
{
	lhs.chars()
		.flat_map(char::to_lowercase)
		.eq(rhs.chars().flat_map(char::to_lowercase))
}

fn fold_case(name: &str) -> String
{
	name.chars().flat_map(char::to_lowercase).collect()
}
