//! Government nutrition database adapter (FoodData Central shaped API).
//!
//! Free-text search only. Records normalize straight to [`Food`]; the
//! native shape stays inside this module.

use serde::Deserialize;
use tokio_util::sync::CancellationToken;

use nosh_config::ProviderConfig;
use nosh_domain::{Food, Source};

use crate::{Result, race_cancel};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFood {
	#[serde(default)]
	description: Option<String>,
	#[serde(default)]
	brand_owner: Option<String>,
	#[serde(default)]
	gtin_upc: Option<String>,
	#[serde(default)]
	serving_size: Option<f64>,
	#[serde(default)]
	serving_size_unit: Option<String>,
	#[serde(default)]
	food_nutrients: Vec<RawNutrient>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawNutrient {
	#[serde(default)]
	nutrient_number: Option<String>,
	#[serde(default)]
	nutrient_name: Option<String>,
	#[serde(default)]
	unit_name: Option<String>,
	#[serde(default)]
	value: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
	#[serde(default)]
	foods: Vec<RawFood>,
}

pub async fn search(
	cfg: &ProviderConfig,
	query: &str,
	cancel: &CancellationToken,
) -> Result<Vec<Food>> {
	let client = crate::client(cfg)?;
	let url = format!("{}/v1/foods/search", cfg.api_base);
	let api_key = cfg.api_key.clone().unwrap_or_default();
	let page_size = cfg.page_size.to_string();
	let request = async {
		let response = client
			.get(url)
			.query(&[
				("api_key", api_key.as_str()),
				("query", query),
				("pageSize", page_size.as_str()),
			])
			.send()
			.await?;
		let parsed: SearchResponse = response.error_for_status()?.json().await?;

		tracing::debug!(count = parsed.foods.len(), "Government-nutrition search returned.");

		Ok(parsed.foods.iter().filter_map(normalize).collect())
	};

	race_cancel(cancel, request).await
}

fn normalize(raw: &RawFood) -> Option<Food> {
	let name = raw.description.as_deref().map(str::trim).filter(|name| !name.is_empty())?;
	let mut food = Food {
		name: name.to_string(),
		brand: raw
			.brand_owner
			.as_deref()
			.map(str::trim)
			.filter(|brand| !brand.is_empty())
			.map(str::to_string),
		barcode: raw
			.gtin_upc
			.as_deref()
			.map(str::trim)
			.filter(|code| !code.is_empty())
			.map(str::to_string),
		serving_size: serving_label(raw),
		calories: None,
		protein: None,
		carbs: None,
		fat: None,
		fiber: None,
		sugar: None,
		sodium: None,
		source: Source::Government,
	};

	for nutrient in &raw.food_nutrients {
		apply_nutrient(&mut food, nutrient);
	}

	Some(food)
}

fn serving_label(raw: &RawFood) -> Option<String> {
	let size = raw.serving_size.filter(|size| size.is_finite() && *size > 0.0)?;
	let unit = raw.serving_size_unit.as_deref().map(str::trim).filter(|unit| !unit.is_empty())?;

	Some(format!("{size} {unit}"))
}

/// Nutrient numbers are the stable identifiers; names are the fallback for
/// records that omit them. Sodium is reported in milligrams and stored in
/// grams like every other field.
fn apply_nutrient(food: &mut Food, nutrient: &RawNutrient) {
	let Some(value) = nutrient.value.filter(|value| value.is_finite()) else {
		return;
	};
	let number = nutrient.nutrient_number.as_deref().unwrap_or("");
	let name = nutrient.nutrient_name.as_deref().unwrap_or("");
	let unit = nutrient.unit_name.as_deref().unwrap_or("");

	match number {
		"208" => food.calories = Some(value),
		"203" => food.protein = Some(value),
		"205" => food.carbs = Some(value),
		"204" => food.fat = Some(value),
		"291" => food.fiber = Some(value),
		"269" => food.sugar = Some(value),
		"307" => food.sodium = Some(value / 1_000.0),
		_ => match name {
			"Energy" if unit.eq_ignore_ascii_case("kcal") => food.calories = Some(value),
			"Protein" => food.protein = Some(value),
			"Carbohydrate, by difference" => food.carbs = Some(value),
			"Total lipid (fat)" => food.fat = Some(value),
			"Fiber, total dietary" => food.fiber = Some(value),
			"Sugars, total including NLEA" => food.sugar = Some(value),
			"Sodium, Na" => food.sodium = Some(value / 1_000.0),
			_ => {},
		},
	}
}

#[cfg(test)]
mod tests {
	use super::{RawFood, RawNutrient, normalize};

	fn nutrient(number: &str, value: f64) -> RawNutrient {
		RawNutrient {
			nutrient_number: Some(number.to_string()),
			nutrient_name: None,
			unit_name: None,
			value: Some(value),
		}
	}

	#[test]
	fn normalize_maps_nutrient_numbers() {
		let raw = RawFood {
			description: Some("Cheddar Cheese".to_string()),
			brand_owner: Some("Tillamook".to_string()),
			gtin_upc: Some("0072830000017".to_string()),
			serving_size: Some(28.0),
			serving_size_unit: Some("g".to_string()),
			food_nutrients: vec![
				nutrient("208", 110.0),
				nutrient("203", 7.0),
				nutrient("205", 1.0),
				nutrient("204", 9.0),
				nutrient("307", 180.0),
			],
		};
		let food = normalize(&raw).expect("Expected a normalized food.");

		assert_eq!(food.calories, Some(110.0));
		assert_eq!(food.protein, Some(7.0));
		assert_eq!(food.carbs, Some(1.0));
		assert_eq!(food.fat, Some(9.0));
		assert_eq!(food.sodium, Some(0.18));
		assert_eq!(food.serving_size.as_deref(), Some("28 g"));
	}

	#[test]
	fn normalize_falls_back_to_nutrient_names() {
		let raw = RawFood {
			description: Some("Spinach, raw".to_string()),
			food_nutrients: vec![RawNutrient {
				nutrient_number: None,
				nutrient_name: Some("Energy".to_string()),
				unit_name: Some("KCAL".to_string()),
				value: Some(23.0),
			}],
			..RawFood::default()
		};
		let food = normalize(&raw).expect("Expected a normalized food.");

		assert_eq!(food.calories, Some(23.0));
	}

	#[test]
	fn normalize_drops_nameless_records() {
		let raw = RawFood { food_nutrients: vec![nutrient("208", 100.0)], ..RawFood::default() };

		assert!(normalize(&raw).is_none());
	}

	#[test]
	fn normalize_ignores_non_finite_values() {
		let raw = RawFood {
			description: Some("Odd Record".to_string()),
			food_nutrients: vec![nutrient("208", f64::NAN)],
			..RawFood::default()
		};
		let food = normalize(&raw).expect("Expected a normalized food.");

		assert_eq!(food.calories, None);
	}
}
