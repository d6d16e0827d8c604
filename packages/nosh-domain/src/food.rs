use serde::{Deserialize, Serialize};

/// Which database a [`Food`] was normalized from.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
	Packaged,
	Government,
	Recipes,
}

/// Canonical nutrition record. Every provider normalizes into this shape;
/// nothing provider-native crosses further into the pipeline.
///
/// Macronutrients are grams. `calories` is kcal. A `Food` always carries a
/// non-empty `name`; adapters drop nameless records during normalization.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Food {
	pub name: String,
	pub brand: Option<String>,
	pub barcode: Option<String>,
	pub serving_size: Option<String>,
	pub calories: Option<f64>,
	pub protein: Option<f64>,
	pub carbs: Option<f64>,
	pub fat: Option<f64>,
	pub fiber: Option<f64>,
	pub sugar: Option<f64>,
	pub sodium: Option<f64>,
	pub source: Source,
}

impl Food {
	/// Data-quality score used to break dedup ties. Unrelated to how well an
	/// item matches any query.
	pub fn completeness(&self) -> i64 {
		let mut score = 0;

		if has_text(self.serving_size.as_deref()) {
			score += 4;
		}
		if self.calories.is_some() {
			score += 3;
		}
		for value in [self.protein, self.carbs, self.fat] {
			if value.is_some_and(f64::is_finite) {
				score += 1;
			}
		}
		if has_text(self.brand.as_deref()) {
			score += 1;
		}
		if has_text(self.barcode.as_deref()) {
			score += 2;
		}

		score
	}
}

fn has_text(value: Option<&str>) -> bool {
	value.map(|text| !text.trim().is_empty()).unwrap_or(false)
}
