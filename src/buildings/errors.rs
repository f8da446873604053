use std::{io, path::Path};

use derive_more::{Display, Error, From};

/// Errors that can occur when loading the building table from a file.
#[derive(Debug, Display, Error, From)]
pub enum LoadBuildingsError
{
	#[display("failed to read building table at {}", path.display())]
	#[from(ignore)]
	Read
	{
		path: Box<Path>,

		#[error(source)]
		error: io::Error,
	},

	#[display("building table is not valid JSON")]
	Parse(serde_json::Error),

	#[display("building table contains invalid entries")]
	Invalid(InvalidBuildings),
}

/// A building table violated one of its invariants.
#[derive(Debug, Display, Error)]
pub enum InvalidBuildings
{
	#[display("building #{idx} has a blank name")]
	BlankName
	{
		idx: usize
	},

	#[display("building `{name}` appears more than once")]
	DuplicateName
	{
		name: String
	},

	#[display("building `{name}` has invalid coordinates (lat {latitude}, lon {longitude})")]
	InvalidCoordinates
	{
		name: String,
		latitude: f64,
		longitude: f64,
	},
}
