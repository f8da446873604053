use std::num::NonZero;

use serde::{Deserialize, Deserializer};

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct RuntimeConfig
{
	/// The amount of worker threads to spin up. Defaults to the number of CPU
	/// cores.
	#[serde(deserialize_with = "deserialize_option_usize")]
	pub worker_threads: Option<NonZero<usize>>,
}

impl RuntimeConfig
{
	/// Builds the tokio runtime the server runs on.
	pub fn build_runtime(&self) -> std::io::Result<tokio::runtime::Runtime>
	{
		let mut builder = tokio::runtime::Builder::new_multi_thread();

		builder.enable_all();

		if let Some(n) = self.worker_threads {
			builder.worker_threads(n.get());
		}

		builder.build()
	}
}

fn deserialize_option_usize<'de, D>(deserializer: D) -> Result<Option<NonZero<usize>>, D::Error>
where
	D: Deserializer<'de>,
{
	<Option<usize> as Deserialize<'de>>::deserialize(deserializer)
		.map(|maybe_num| maybe_num.and_then(NonZero::new))
}
