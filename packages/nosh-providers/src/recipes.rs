//! Recipe/ingredient database adapter.
//!
//! Free-text search with per-serving nutrition attached to each hit.
//! Recipes carry neither brand nor barcode, so downstream dedup keys on
//! their cluster label and the brand-first phase's strict filter rejects
//! them wholesale.

use serde::Deserialize;
use tokio_util::sync::CancellationToken;

use nosh_config::ProviderConfig;
use nosh_domain::{Food, Source};

use crate::{Result, race_cancel};

#[derive(Debug, Default, Deserialize)]
struct RawRecipe {
	#[serde(default)]
	title: Option<String>,
	#[serde(default)]
	nutrition: Option<RawNutrition>,
}

#[derive(Debug, Default, Deserialize)]
struct RawNutrition {
	#[serde(default)]
	nutrients: Vec<RawNutrient>,
}

#[derive(Debug, Default, Deserialize)]
struct RawNutrient {
	#[serde(default)]
	name: Option<String>,
	#[serde(default)]
	amount: Option<f64>,
	#[serde(default)]
	unit: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
	#[serde(default)]
	results: Vec<RawRecipe>,
}

pub async fn search(
	cfg: &ProviderConfig,
	query: &str,
	cancel: &CancellationToken,
) -> Result<Vec<Food>> {
	let client = crate::client(cfg)?;
	let url = format!("{}/recipes/complexSearch", cfg.api_base);
	let api_key = cfg.api_key.clone().unwrap_or_default();
	let page_size = cfg.page_size.to_string();
	let request = async {
		let response = client
			.get(url)
			.query(&[
				("apiKey", api_key.as_str()),
				("query", query),
				("addRecipeNutrition", "true"),
				("number", page_size.as_str()),
			])
			.send()
			.await?;
		let parsed: SearchResponse = response.error_for_status()?.json().await?;

		tracing::debug!(count = parsed.results.len(), "Recipe search returned.");

		Ok(parsed.results.iter().filter_map(normalize).collect())
	};

	race_cancel(cancel, request).await
}

fn normalize(raw: &RawRecipe) -> Option<Food> {
	let name = raw.title.as_deref().map(str::trim).filter(|name| !name.is_empty())?;
	let mut food = Food {
		name: name.to_string(),
		brand: None,
		barcode: None,
		serving_size: Some("1 serving".to_string()),
		calories: None,
		protein: None,
		carbs: None,
		fat: None,
		fiber: None,
		sugar: None,
		sodium: None,
		source: Source::Recipes,
	};

	for nutrient in raw.nutrition.iter().flat_map(|nutrition| &nutrition.nutrients) {
		apply_nutrient(&mut food, nutrient);
	}

	Some(food)
}

fn apply_nutrient(food: &mut Food, nutrient: &RawNutrient) {
	let Some(amount) = nutrient.amount.filter(|amount| amount.is_finite()) else {
		return;
	};
	let name = nutrient.name.as_deref().unwrap_or("");
	let unit = nutrient.unit.as_deref().unwrap_or("");
	// Sodium arrives in milligrams; everything else is already grams/kcal.
	let in_grams = if unit.eq_ignore_ascii_case("mg") { amount / 1_000.0 } else { amount };

	match name {
		"Calories" => food.calories = Some(amount),
		"Protein" => food.protein = Some(in_grams),
		"Carbohydrates" => food.carbs = Some(in_grams),
		"Fat" => food.fat = Some(in_grams),
		"Fiber" => food.fiber = Some(in_grams),
		"Sugar" => food.sugar = Some(in_grams),
		"Sodium" => food.sodium = Some(in_grams),
		_ => {},
	}
}

#[cfg(test)]
mod tests {
	use super::{RawNutrient, RawNutrition, RawRecipe, normalize};

	fn nutrient(name: &str, amount: f64, unit: &str) -> RawNutrient {
		RawNutrient {
			name: Some(name.to_string()),
			amount: Some(amount),
			unit: Some(unit.to_string()),
		}
	}

	#[test]
	fn normalize_maps_named_nutrients() {
		let raw = RawRecipe {
			title: Some("Turkey Club Sandwich".to_string()),
			nutrition: Some(RawNutrition {
				nutrients: vec![
					nutrient("Calories", 540.0, "kcal"),
					nutrient("Protein", 32.0, "g"),
					nutrient("Sodium", 980.0, "mg"),
				],
			}),
		};
		let food = normalize(&raw).expect("Expected a normalized food.");

		assert_eq!(food.calories, Some(540.0));
		assert_eq!(food.protein, Some(32.0));
		assert_eq!(food.sodium, Some(0.98));
		assert_eq!(food.brand, None);
		assert_eq!(food.barcode, None);
	}

	#[test]
	fn normalize_drops_untitled_recipes() {
		let raw = RawRecipe::default();

		assert!(normalize(&raw).is_none());
	}

	#[test]
	fn normalize_survives_missing_nutrition() {
		let raw = RawRecipe { title: Some("Plain Rice".to_string()), nutrition: None };
		let food = normalize(&raw).expect("Expected a normalized food.");

		assert_eq!(food.calories, None);
	}
}
