//! Query expansion: one raw query becomes an ordered, deduplicated list of
//! alternate search strings that bridge vocabulary gaps between providers
//! ("pb" vs "peanut butter", "yoghurt" vs "yogurt", sub-phrases of long
//! item names).

use std::collections::HashSet;

use nosh_domain::{detect_brand_and_item, text};

const NGRAM_MAX_WORDS: usize = 4;
const NGRAM_MIN_WORDS: usize = 2;

/// Expansion output: the ordered tries plus the brand/item split they were
/// derived from. All strings are in simplified form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryPlan {
	pub tries: Vec<String>,
	pub brand: String,
	pub item: String,
}

/// Expand a raw query into at most `max_tries` alternate query strings,
/// deduplicated by normalized key with first-seen order preserved.
///
/// Union order biases toward specificity: full-query variants first, then
/// item-only variants, brand-prefixed item variants, the brand alone,
/// item n-grams, and finally the bare item text.
pub fn build_fallback_queries(raw: &str, max_tries: usize) -> QueryPlan {
	let full = text::simplify(raw);

	if full.is_empty() {
		return QueryPlan::default();
	}

	let split = detect_brand_and_item(raw);
	let brand = split.brand;
	let item = split.item;
	let mut tries = Vec::new();
	let mut seen = HashSet::new();

	for variant in lexical_variants(&full) {
		push_try(&mut tries, &mut seen, &variant, max_tries);
	}
	if !item.is_empty() && item != full {
		for variant in lexical_variants(&item) {
			push_try(&mut tries, &mut seen, &variant, max_tries);
		}
		if !brand.is_empty() {
			for variant in lexical_variants(&item) {
				push_try(&mut tries, &mut seen, &format!("{brand} {variant}"), max_tries);
			}
		}
	}
	if !brand.is_empty() {
		push_try(&mut tries, &mut seen, &brand, max_tries);
	}
	for ngram in word_ngrams(&item) {
		push_try(&mut tries, &mut seen, &ngram, max_tries);
	}
	if !item.is_empty() {
		push_try(&mut tries, &mut seen, &item, max_tries);
	}

	QueryPlan { tries, brand, item }
}

/// The fixed substitution table, each rule applied independently to the
/// input (never chained). The identity variant always comes first; no-op
/// rules produce nothing.
fn lexical_variants(input: &str) -> Vec<String> {
	let mut out = vec![input.to_string()];
	let candidates = [
		replace_ampersand(input),
		remove_word(input, "and"),
		remove_word(input, "sandwich"),
		replace_word(input, "subs", "sub"),
		replace_word(input, "pb", "peanut butter"),
		replace_word(input, "yoghurt", "yogurt"),
	];

	for candidate in candidates.into_iter().flatten() {
		if candidate != input {
			out.push(candidate);
		}
	}

	out
}

fn replace_ampersand(input: &str) -> Option<String> {
	input.contains('&').then(|| text::collapse(&input.replace('&', " and ")))
}

fn remove_word(input: &str, word: &str) -> Option<String> {
	let kept: Vec<&str> = input.split_whitespace().filter(|token| *token != word).collect();
	let changed = kept.len() != input.split_whitespace().count();

	(changed && !kept.is_empty()).then(|| kept.join(" "))
}

fn replace_word(input: &str, from: &str, to: &str) -> Option<String> {
	let mut changed = false;
	let mapped: Vec<&str> = input
		.split_whitespace()
		.map(|token| {
			if token == from {
				changed = true;
				to
			} else {
				token
			}
		})
		.collect();

	changed.then(|| text::collapse(&mapped.join(" ")))
}

/// Word n-grams of the item text, longest first, all positions. Connective
/// tokens are excluded so "turkey & swiss sub" still yields "turkey swiss".
fn word_ngrams(item: &str) -> Vec<String> {
	let words: Vec<&str> =
		item.split_whitespace().filter(|word| *word != "&" && *word != "and").collect();
	let mut out = Vec::new();

	for len in (NGRAM_MIN_WORDS..=NGRAM_MAX_WORDS).rev() {
		if words.len() < len {
			continue;
		}
		for start in 0..=(words.len() - len) {
			out.push(words[start..start + len].join(" "));
		}
	}

	out
}

fn push_try(tries: &mut Vec<String>, seen: &mut HashSet<String>, value: &str, max_tries: usize) {
	if tries.len() >= max_tries {
		return;
	}

	let trimmed = value.trim();

	if trimmed.is_empty() {
		return;
	}

	if seen.insert(try_key(trimmed)) {
		tries.push(trimmed.to_string());
	}
}

/// Dedup key: the try with connective `&` stripped, so an ampersand form
/// and its bare form do not produce near-identical provider calls.
fn try_key(value: &str) -> String {
	value.split_whitespace().filter(|word| *word != "&").collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
	use super::{QueryPlan, build_fallback_queries, word_ngrams};

	#[test]
	fn empty_query_expands_to_nothing() {
		assert_eq!(build_fallback_queries("", 12), QueryPlan::default());
		assert_eq!(build_fallback_queries("  \t ", 12), QueryPlan::default());
	}

	#[test]
	fn branded_sandwich_query_produces_expected_variants() {
		let plan = build_fallback_queries("Jersey Mike's Turkey & Swiss Sub", 12);

		assert_eq!(plan.brand, "jersey mikes");
		assert_eq!(plan.item, "turkey & swiss sub");
		assert_eq!(plan.tries[0], "jersey mikes turkey & swiss sub");
		// The ampersand substitution form.
		assert!(plan.tries.iter().any(|t| t == "jersey mikes turkey and swiss sub"));
		// The connective-free bigram of the item.
		assert!(plan.tries.iter().any(|t| t == "turkey swiss"));
		// The brand alone is one of the tries.
		assert!(plan.tries.iter().any(|t| t == "jersey mikes"));
		assert!(plan.tries.len() <= 12);
	}

	#[test]
	fn substitutions_apply_independently_not_chained() {
		let plan = build_fallback_queries("ham sandwich and cheese", 12);

		assert!(plan.tries.iter().any(|t| t == "ham sandwich cheese"));
		assert!(plan.tries.iter().any(|t| t == "ham and cheese"));
		// Both words removed at once would require chaining two rules.
		assert!(!plan.tries.iter().any(|t| t == "ham cheese"));
	}

	#[test]
	fn pb_expands_to_peanut_butter() {
		let plan = build_fallback_queries("pb and j", 12);

		assert!(plan.tries.iter().any(|t| t == "peanut butter and j"));
	}

	#[test]
	fn yoghurt_spelling_bridges_to_yogurt() {
		let plan = build_fallback_queries("greek yoghurt", 12);

		assert_eq!(plan.tries[0], "greek yoghurt");
		assert!(plan.tries.iter().any(|t| t == "greek yogurt"));
	}

	#[test]
	fn tries_are_deduplicated_in_first_seen_order() {
		let plan = build_fallback_queries("chicken salad", 12);

		let mut sorted = plan.tries.clone();

		sorted.sort();
		sorted.dedup();

		assert_eq!(sorted.len(), plan.tries.len());
		assert_eq!(plan.tries[0], "chicken salad");
	}

	#[test]
	fn tries_are_capped() {
		let plan = build_fallback_queries(
			"Trader Joe's organic free range roasted unsalted crunchy almond butter spread",
			12,
		);

		assert_eq!(plan.tries.len(), 12);
	}

	#[test]
	fn ngrams_run_longest_first_and_skip_connectives() {
		let grams = word_ngrams("turkey & swiss sub");

		assert_eq!(
			grams,
			vec![
				"turkey swiss sub".to_string(),
				"turkey swiss".to_string(),
				"swiss sub".to_string(),
			]
		);
	}

	#[test]
	fn unbranded_query_has_no_brand_tries() {
		let plan = build_fallback_queries("lentil soup", 12);

		assert_eq!(plan.brand, "");
		assert_eq!(plan.item, "lentil soup");
		assert_eq!(plan.tries, vec!["lentil soup".to_string()]);
	}
}
