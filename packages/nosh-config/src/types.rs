use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub providers: Providers,
	#[serde(default)]
	pub search: Search,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Providers {
	pub packaged: ProviderConfig,
	pub government: ProviderConfig,
	pub recipes: ProviderConfig,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ProviderConfig {
	pub api_base: String,
	/// Optional because the packaged-foods database is keyless; the other
	/// two reject unauthenticated calls server-side.
	#[serde(default)]
	pub api_key: Option<String>,
	pub timeout_ms: u64,
	pub page_size: u32,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Search {
	pub max_variants: usize,
	pub result_cap: usize,
	pub per_group_cap: usize,
}
impl Default for Search {
	fn default() -> Self {
		Self { max_variants: 12, result_cap: 25, per_group_cap: 2 }
	}
}
