mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, ProviderConfig, Providers, Search, Service};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}

	for (label, provider) in [
		("packaged", &cfg.providers.packaged),
		("government", &cfg.providers.government),
		("recipes", &cfg.providers.recipes),
	] {
		if provider.api_base.trim().is_empty() {
			return Err(Error::Validation {
				message: format!("providers.{label}.api_base must be non-empty."),
			});
		}
		if provider.timeout_ms == 0 {
			return Err(Error::Validation {
				message: format!("providers.{label}.timeout_ms must be greater than zero."),
			});
		}
		if provider.page_size == 0 {
			return Err(Error::Validation {
				message: format!("providers.{label}.page_size must be greater than zero."),
			});
		}
	}

	if cfg.search.max_variants == 0 {
		return Err(Error::Validation {
			message: "search.max_variants must be greater than zero.".to_string(),
		});
	}
	if cfg.search.max_variants > 64 {
		return Err(Error::Validation {
			message: "search.max_variants must be 64 or less.".to_string(),
		});
	}
	if cfg.search.result_cap == 0 {
		return Err(Error::Validation {
			message: "search.result_cap must be greater than zero.".to_string(),
		});
	}
	if cfg.search.per_group_cap == 0 {
		return Err(Error::Validation {
			message: "search.per_group_cap must be greater than zero.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	for provider in [
		&mut cfg.providers.packaged,
		&mut cfg.providers.government,
		&mut cfg.providers.recipes,
	] {
		if provider.api_key.as_deref().map(|key| key.trim().is_empty()).unwrap_or(false) {
			provider.api_key = None;
		}
		while provider.api_base.ends_with('/') {
			provider.api_base.pop();
		}
	}
}
