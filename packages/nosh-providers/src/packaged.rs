//! Packaged-foods database adapter (Open Food Facts shaped API).
//!
//! The only provider whose native records cross the adapter boundary:
//! the ranker scores [`RawProduct`]s before [`normalize`] maps the
//! survivors into [`Food`].

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

use nosh_config::ProviderConfig;
use nosh_domain::{Food, Source};

use crate::{Result, race_cancel};

/// One kcal is 4.184 kJ; the database reports plain `energy` fields in kJ.
const KJ_PER_KCAL: f64 = 4.184;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawProduct {
	#[serde(default)]
	pub product_name: Option<String>,
	#[serde(default)]
	pub generic_name: Option<String>,
	#[serde(default)]
	pub brands: Option<String>,
	#[serde(default)]
	pub code: Option<String>,
	#[serde(default)]
	pub serving_size: Option<String>,
	#[serde(default)]
	pub nutriments: Nutriments,
}

impl RawProduct {
	/// Whether any energy field is usable at all, per-serving or per-100g,
	/// kcal or kJ. Records without one take the ranker's hard penalty.
	pub fn has_energy(&self) -> bool {
		self.nutriments.energy_kcal_serving.is_some()
			|| self.nutriments.energy_kcal_100g.is_some()
			|| self.nutriments.energy_kj_serving.is_some()
			|| self.nutriments.energy_kj_100g.is_some()
	}
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Nutriments {
	#[serde(default, rename = "energy-kcal_serving")]
	pub energy_kcal_serving: Option<f64>,
	#[serde(default, rename = "energy-kcal_100g")]
	pub energy_kcal_100g: Option<f64>,
	#[serde(default, rename = "energy_serving")]
	pub energy_kj_serving: Option<f64>,
	#[serde(default, rename = "energy_100g")]
	pub energy_kj_100g: Option<f64>,
	#[serde(default)]
	pub proteins_serving: Option<f64>,
	#[serde(default)]
	pub proteins_100g: Option<f64>,
	#[serde(default)]
	pub carbohydrates_serving: Option<f64>,
	#[serde(default)]
	pub carbohydrates_100g: Option<f64>,
	#[serde(default)]
	pub fat_serving: Option<f64>,
	#[serde(default)]
	pub fat_100g: Option<f64>,
	#[serde(default)]
	pub fiber_serving: Option<f64>,
	#[serde(default)]
	pub fiber_100g: Option<f64>,
	#[serde(default)]
	pub sugars_serving: Option<f64>,
	#[serde(default)]
	pub sugars_100g: Option<f64>,
	#[serde(default)]
	pub sodium_serving: Option<f64>,
	#[serde(default)]
	pub sodium_100g: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
	#[serde(default)]
	products: Vec<RawProduct>,
}

pub async fn search(
	cfg: &ProviderConfig,
	query: &str,
	cancel: &CancellationToken,
) -> Result<Vec<RawProduct>> {
	let client = crate::client(cfg)?;
	let url = format!("{}/cgi/search.pl", cfg.api_base);
	let page_size = cfg.page_size.to_string();
	let request = async {
		let response = client
			.get(url)
			.query(&[
				("action", "process"),
				("json", "1"),
				("search_simple", "1"),
				("search_terms", query),
				("page_size", page_size.as_str()),
			])
			.send()
			.await?;
		let parsed: SearchResponse = response.error_for_status()?.json().await?;

		tracing::debug!(count = parsed.products.len(), "Packaged-foods search returned.");

		Ok(parsed.products)
	};

	race_cancel(cancel, request).await
}

/// Native category browse by brand. Returns whatever the database files
/// under the brand facet, which routinely includes stale or third-party
/// listings; callers re-check the brand field before trusting a record.
pub async fn search_brand_facet(
	cfg: &ProviderConfig,
	brand: &str,
	cancel: &CancellationToken,
) -> Result<Vec<RawProduct>> {
	let client = crate::client(cfg)?;
	let slug = brand_slug(brand);
	let url = format!("{}/brand/{slug}.json", cfg.api_base);
	let page_size = cfg.page_size.to_string();
	let request = async {
		let response = client
			.get(url)
			.query(&[("page_size", page_size.as_str())])
			.send()
			.await?;
		let parsed: SearchResponse = response.error_for_status()?.json().await?;

		Ok(parsed.products)
	};

	race_cancel(cancel, request).await
}

/// Server-side brand-constrained free-text search.
pub async fn search_brand_filtered(
	cfg: &ProviderConfig,
	brand: &str,
	item_query: &str,
	cancel: &CancellationToken,
) -> Result<Vec<RawProduct>> {
	let client = crate::client(cfg)?;
	let url = format!("{}/cgi/search.pl", cfg.api_base);
	let page_size = cfg.page_size.to_string();
	let request = async {
		let response = client
			.get(url)
			.query(&[
				("action", "process"),
				("json", "1"),
				("tagtype_0", "brands"),
				("tag_contains_0", "contains"),
				("tag_0", brand),
				("search_terms", item_query),
				("page_size", page_size.as_str()),
			])
			.send()
			.await?;
		let parsed: SearchResponse = response.error_for_status()?.json().await?;

		Ok(parsed.products)
	};

	race_cancel(cancel, request).await
}

/// Map a native record to the canonical shape. Returns `None` for records
/// normalization must drop: no display name, or energy data that is present
/// but does not resolve to a finite kcal value. A record with no energy
/// data at all is kept with `calories = None`; the ranker has already sunk
/// it.
pub fn normalize(raw: &RawProduct) -> Option<Food> {
	let name = raw.product_name.as_deref().map(str::trim).filter(|name| !name.is_empty())?;
	let grams = raw.serving_size.as_deref().and_then(parse_serving_grams);
	let nutriments = &raw.nutriments;
	let calories = match resolve_energy_kcal(nutriments, grams) {
		EnergyKcal::Resolved(kcal) => Some(kcal),
		EnergyKcal::Absent => None,
		EnergyKcal::Unresolvable => return None,
	};

	Some(Food {
		name: name.to_string(),
		brand: primary_brand(raw.brands.as_deref()),
		barcode: raw.code.as_deref().map(str::trim).filter(|code| !code.is_empty()).map(str::to_string),
		serving_size: raw
			.serving_size
			.as_deref()
			.map(str::trim)
			.filter(|serving| !serving.is_empty())
			.map(str::to_string),
		calories,
		protein: resolve_field(nutriments.proteins_serving, nutriments.proteins_100g, grams),
		carbs: resolve_field(
			nutriments.carbohydrates_serving,
			nutriments.carbohydrates_100g,
			grams,
		),
		fat: resolve_field(nutriments.fat_serving, nutriments.fat_100g, grams),
		fiber: resolve_field(nutriments.fiber_serving, nutriments.fiber_100g, grams),
		sugar: resolve_field(nutriments.sugars_serving, nutriments.sugars_100g, grams),
		sodium: resolve_field(nutriments.sodium_serving, nutriments.sodium_100g, grams),
		source: Source::Packaged,
	})
}

enum EnergyKcal {
	Resolved(f64),
	Absent,
	Unresolvable,
}

fn resolve_energy_kcal(nutriments: &Nutriments, grams: Option<f64>) -> EnergyKcal {
	let per_serving = nutriments
		.energy_kcal_serving
		.or_else(|| nutriments.energy_kj_serving.map(kj_to_kcal));
	let per_100g =
		nutriments.energy_kcal_100g.or_else(|| nutriments.energy_kj_100g.map(kj_to_kcal));
	let resolved = match (per_serving, per_100g) {
		(Some(kcal), _) => kcal,
		// Without a parseable gram serving size the per-100g figure is the
		// best available reading and stands as-is.
		(None, Some(kcal)) => grams.map(|grams| (kcal * grams / 100.0).round()).unwrap_or(kcal),
		(None, None) => return EnergyKcal::Absent,
	};

	if resolved.is_finite() { EnergyKcal::Resolved(resolved) } else { EnergyKcal::Unresolvable }
}

fn resolve_field(per_serving: Option<f64>, per_100g: Option<f64>, grams: Option<f64>) -> Option<f64> {
	per_serving
		.or_else(|| match (per_100g, grams) {
			(Some(value), Some(grams)) => Some(value * grams / 100.0),
			(Some(value), None) => Some(value),
			(None, _) => None,
		})
		.filter(|value| value.is_finite())
}

fn kj_to_kcal(kj: f64) -> f64 {
	(kj / KJ_PER_KCAL).round()
}

fn primary_brand(brands: Option<&str>) -> Option<String> {
	brands
		.and_then(|list| list.split(',').next())
		.map(str::trim)
		.filter(|brand| !brand.is_empty())
		.map(str::to_string)
}

static SERVING_GRAMS: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"(?i)([0-9]+(?:\.[0-9]+)?)\s*(?:g|grams?)\b").expect("Serving-size regex must compile.")
});

/// Pull a gram amount out of a free-form serving string ("1 bar (60 g)",
/// "30g"). `None` for volumes or unitless counts.
pub fn parse_serving_grams(serving: &str) -> Option<f64> {
	let captures = SERVING_GRAMS.captures(serving)?;
	let grams: f64 = captures.get(1)?.as_str().parse().ok()?;

	(grams.is_finite() && grams > 0.0).then_some(grams)
}

fn brand_slug(brand: &str) -> String {
	brand
		.trim()
		.to_lowercase()
		.split_whitespace()
		.collect::<Vec<_>>()
		.join("-")
}
