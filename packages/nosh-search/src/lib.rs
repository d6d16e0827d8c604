pub mod dedupe;
pub mod expand;
pub mod rank;
pub mod search;

mod error;

pub use dedupe::dedupe_and_cluster;
pub use error::{Error, Result};
pub use expand::{QueryPlan, build_fallback_queries};
pub use rank::{rank_products, score_product};

use std::{future::Future, pin::Pin, sync::Arc};

use tokio_util::sync::CancellationToken;

use nosh_config::{Config, ProviderConfig};
use nosh_domain::Food;
use nosh_providers::packaged::RawProduct;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Packaged-foods database. The one provider with brand-scoped entry points,
/// and the one whose native records require scoring before normalization.
pub trait PackagedFoodsProvider: Send + Sync {
	fn search<'a>(
		&'a self,
		cfg: &'a ProviderConfig,
		query: &'a str,
		cancel: &'a CancellationToken,
	) -> BoxFuture<'a, nosh_providers::Result<Vec<RawProduct>>>;

	fn search_brand_facet<'a>(
		&'a self,
		cfg: &'a ProviderConfig,
		brand: &'a str,
		cancel: &'a CancellationToken,
	) -> BoxFuture<'a, nosh_providers::Result<Vec<RawProduct>>>;

	fn search_brand_filtered<'a>(
		&'a self,
		cfg: &'a ProviderConfig,
		brand: &'a str,
		item_query: &'a str,
		cancel: &'a CancellationToken,
	) -> BoxFuture<'a, nosh_providers::Result<Vec<RawProduct>>>;
}

pub trait GovernmentProvider: Send + Sync {
	fn search<'a>(
		&'a self,
		cfg: &'a ProviderConfig,
		query: &'a str,
		cancel: &'a CancellationToken,
	) -> BoxFuture<'a, nosh_providers::Result<Vec<Food>>>;
}

pub trait RecipesProvider: Send + Sync {
	fn search<'a>(
		&'a self,
		cfg: &'a ProviderConfig,
		query: &'a str,
		cancel: &'a CancellationToken,
	) -> BoxFuture<'a, nosh_providers::Result<Vec<Food>>>;
}

struct DefaultProviders;

impl PackagedFoodsProvider for DefaultProviders {
	fn search<'a>(
		&'a self,
		cfg: &'a ProviderConfig,
		query: &'a str,
		cancel: &'a CancellationToken,
	) -> BoxFuture<'a, nosh_providers::Result<Vec<RawProduct>>> {
		Box::pin(nosh_providers::packaged::search(cfg, query, cancel))
	}

	fn search_brand_facet<'a>(
		&'a self,
		cfg: &'a ProviderConfig,
		brand: &'a str,
		cancel: &'a CancellationToken,
	) -> BoxFuture<'a, nosh_providers::Result<Vec<RawProduct>>> {
		Box::pin(nosh_providers::packaged::search_brand_facet(cfg, brand, cancel))
	}

	fn search_brand_filtered<'a>(
		&'a self,
		cfg: &'a ProviderConfig,
		brand: &'a str,
		item_query: &'a str,
		cancel: &'a CancellationToken,
	) -> BoxFuture<'a, nosh_providers::Result<Vec<RawProduct>>> {
		Box::pin(nosh_providers::packaged::search_brand_filtered(cfg, brand, item_query, cancel))
	}
}

impl GovernmentProvider for DefaultProviders {
	fn search<'a>(
		&'a self,
		cfg: &'a ProviderConfig,
		query: &'a str,
		cancel: &'a CancellationToken,
	) -> BoxFuture<'a, nosh_providers::Result<Vec<Food>>> {
		Box::pin(nosh_providers::government::search(cfg, query, cancel))
	}
}

impl RecipesProvider for DefaultProviders {
	fn search<'a>(
		&'a self,
		cfg: &'a ProviderConfig,
		query: &'a str,
		cancel: &'a CancellationToken,
	) -> BoxFuture<'a, nosh_providers::Result<Vec<Food>>> {
		Box::pin(nosh_providers::recipes::search(cfg, query, cancel))
	}
}

#[derive(Clone)]
pub struct Providers {
	pub packaged: Arc<dyn PackagedFoodsProvider>,
	pub government: Arc<dyn GovernmentProvider>,
	pub recipes: Arc<dyn RecipesProvider>,
}

impl Providers {
	pub fn new(
		packaged: Arc<dyn PackagedFoodsProvider>,
		government: Arc<dyn GovernmentProvider>,
		recipes: Arc<dyn RecipesProvider>,
	) -> Self {
		Self { packaged, government, recipes }
	}
}

impl Default for Providers {
	fn default() -> Self {
		let provider = Arc::new(DefaultProviders);
		Self { packaged: provider.clone(), government: provider.clone(), recipes: provider }
	}
}

pub struct SearchService {
	pub cfg: Config,
	pub providers: Providers,
}

impl SearchService {
	pub fn new(cfg: Config) -> Self {
		Self { cfg, providers: Providers::default() }
	}

	pub fn with_providers(cfg: Config, providers: Providers) -> Self {
		Self { cfg, providers }
	}
}
