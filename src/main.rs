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

use std::fs;
use std::path::Path;

use color_eyre::eyre::{self, WrapErr};

mod cli;

const DEFAULT_CONFIG_PATH: &str = "./campus-nav.toml";

fn main() -> eyre::Result<()>
{
	color_eyre::install()?;

	// A missing `.env` file is fine; everything can be configured through the
	// config file and real environment variables as well.
	if let Err(error) = dotenvy::dotenv() {
		if !error.not_found() {
			return Err(error).wrap_err("failed to load `.env` file");
		}
	}

	let cli_args = cli::args();
	let mut config = if let Some(config_path) = cli_args.config_path.as_deref() {
		load_config(config_path)?
	} else if fs::exists(DEFAULT_CONFIG_PATH)? {
		load_config(Path::new(DEFAULT_CONFIG_PATH))?
	} else {
		campus_nav::Config::default()
	};

	cli_args.apply_to_config(&mut config);

	let _guard = campus_nav::logging::init(&config.tracing).wrap_err("failed to initialize tracing")?;

	campus_nav::panic_hook::install();

	tracing::debug!(?config, "loaded configuration");

	config
		.runtime
		.build_runtime()
		.wrap_err("failed to build tokio runtime")?
		.block_on(campus_nav::run(config))
		.wrap_err("failed to run server")
}

fn load_config(path: &Path) -> eyre::Result<campus_nav::Config>
{
	campus_nav::Config::load_from_file(path)
		.wrap_err_with(|| format!("failed to load configuration from `{}`", path.display()))
}
