//! Relevance scoring for packaged-foods native records. The other two
//! providers are merged unranked in arrival order; only the packaged
//! database returns enough noise to need a cut.

use std::cmp::Reverse;

use nosh_domain::text::simplify;
use nosh_providers::packaged::RawProduct;

const NAME_PREFIX_BONUS: i64 = 60;
const NAME_CONTAINS_BONUS: i64 = 35;
const GENERIC_CONTAINS_BONUS: i64 = 20;
const BRAND_CONTAINS_BONUS: i64 = 12;
const SERVING_DECLARED_BONUS: i64 = 4;
const NO_ENERGY_PENALTY: i64 = 30;

/// Score one native record against a query already in simplified form.
///
/// The energy penalty is a hard de-rank, not a discard: a strong name match
/// with no nutrition data sinks below weaker matches that have it, but can
/// still surface when nothing better exists.
pub fn score_product(query: &str, product: &RawProduct) -> i64 {
	let mut score = 0;

	if !query.is_empty() {
		let name = simplify(product.product_name.as_deref().unwrap_or(""));
		let generic = simplify(product.generic_name.as_deref().unwrap_or(""));
		let brand = simplify(product.brands.as_deref().unwrap_or(""));

		if !name.is_empty() {
			if name.starts_with(query) {
				score += NAME_PREFIX_BONUS;
			} else if name.contains(query) {
				score += NAME_CONTAINS_BONUS;
			}
		}
		if !generic.is_empty() && generic.contains(query) {
			score += GENERIC_CONTAINS_BONUS;
		}
		if !brand.is_empty() && brand.contains(query) {
			score += BRAND_CONTAINS_BONUS;
		}
	}
	if product.serving_size.as_deref().map(|serving| !serving.trim().is_empty()).unwrap_or(false)
	{
		score += SERVING_DECLARED_BONUS;
	}
	if !product.has_energy() {
		score -= NO_ENERGY_PENALTY;
	}

	score
}

/// Sort records best-first against a raw query. The sort is stable, so ties
/// keep provider order.
pub fn rank_products(query: &str, mut products: Vec<RawProduct>) -> Vec<RawProduct> {
	let normalized = simplify(query);

	products.sort_by_cached_key(|product| Reverse(score_product(&normalized, product)));

	products
}

#[cfg(test)]
mod tests {
	use nosh_providers::packaged::{Nutriments, RawProduct};

	use super::{rank_products, score_product};

	fn product(name: &str) -> RawProduct {
		RawProduct { product_name: Some(name.to_string()), ..RawProduct::default() }
	}

	fn with_calories(mut product: RawProduct, kcal: f64) -> RawProduct {
		product.nutriments =
			Nutriments { energy_kcal_serving: Some(kcal), ..Nutriments::default() };
		product
	}

	#[test]
	fn prefix_match_with_serving_and_energy_scores_sixty_four() {
		let mut bar = with_calories(product("Bench Press Protein Bar"), 190.0);

		bar.serving_size = Some("1 bar (60 g)".to_string());

		assert_eq!(score_product("bench press", &bar), 64);
	}

	#[test]
	fn prefix_match_outranks_unrelated_name() {
		let mut named = with_calories(product("Bench Press Protein Bar"), 190.0);

		named.serving_size = Some("1 bar (60 g)".to_string());

		let generic = with_calories(product("Protein Bar"), 200.0);

		assert!(score_product("bench press", &named) > score_product("bench press", &generic));
	}

	#[test]
	fn contains_match_scores_below_prefix_match() {
		let prefix = with_calories(product("Protein Bar"), 200.0);
		let contains = with_calories(product("Bench Press Protein Bar"), 190.0);

		assert_eq!(score_product("protein bar", &prefix), 60);
		assert_eq!(score_product("protein bar", &contains), 35);
	}

	#[test]
	fn generic_name_and_brand_matches_add_up() {
		let mut record = with_calories(product("Crunchy Spread"), 190.0);

		record.generic_name = Some("Peanut Butter Spread".to_string());
		record.brands = Some("Peanut Butter Co".to_string());

		assert_eq!(score_product("peanut butter", &record), 32);
	}

	#[test]
	fn missing_energy_takes_the_hard_penalty_but_keeps_the_record() {
		let energyless = product("Bench Press Protein Bar");

		assert_eq!(score_product("bench press", &energyless), 30);
	}

	#[test]
	fn ranking_is_stable_on_ties() {
		let first = with_calories(product("Oat Bar Original"), 120.0);
		let second = with_calories(product("Oat Bar Original"), 130.0);
		let ranked = rank_products("oat bar", vec![first, second]);

		assert_eq!(ranked[0].nutriments.energy_kcal_serving, Some(120.0));
		assert_eq!(ranked[1].nutriments.energy_kcal_serving, Some(130.0));
	}

	#[test]
	fn energyless_records_sink_below_nutritive_matches() {
		let bare = product("Turkey Sub");
		let nutritive = with_calories(product("Turkey Sub Large"), 510.0);
		let ranked = rank_products("turkey sub", vec![bare, nutritive]);

		assert_eq!(ranked[0].product_name.as_deref(), Some("Turkey Sub Large"));
	}
}
