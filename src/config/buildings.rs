use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct BuildingsConfig
{
	/// Path to the JSON file containing the building table.
	pub path: Box<Path>,
}

impl Default for BuildingsConfig
{
	fn default() -> Self
	{
		Self { path: PathBuf::from("./data/buildings.json").into_boxed_path() }
	}
}
