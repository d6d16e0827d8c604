use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// Normalize free text for matching: lowercase, fold diacritics away, map
/// punctuation to spaces, collapse runs of whitespace.
///
/// Two characters get special treatment. `&` survives as a token of its own
/// because the query expander's substitution table is defined over it
/// ("mac & cheese"). Apostrophes vanish instead of splitting, so a
/// possessive collapses ("mike's" -> "mikes") rather than shedding a stray
/// `s` token.
pub fn simplify(input: &str) -> String {
	let mut out = String::with_capacity(input.len());

	for ch in input.nfkd() {
		if ch.is_ascii_alphanumeric() {
			out.push(ch.to_ascii_lowercase());
		} else if ch == '&' {
			out.push('&');
		} else if matches!(ch, '\'' | '\u{2019}') || is_combining_mark(ch) {
			// Dropped entirely; everything else becomes a word break.
		} else {
			out.push(' ');
		}
	}

	collapse(&out)
}

/// Canonical base label of an item name: the simplified name with pack
/// sizes, counts, and connective tokens removed. Near-duplicate listings
/// that differ only in pack size ("Cola Zero 330ml" vs "Cola Zero 12x330ml")
/// land on the same label.
pub fn base_label(name: &str) -> String {
	let simplified = simplify(name);
	let kept: Vec<&str> = simplified
		.split_whitespace()
		.filter(|word| !is_quantity_token(word) && !is_unit_token(word) && *word != "&")
		.collect();

	if kept.is_empty() { simplified } else { kept.join(" ") }
}

pub fn collapse(input: &str) -> String {
	input.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_quantity_token(word: &str) -> bool {
	let Some(first) = word.chars().next() else {
		return false;
	};
	if !first.is_ascii_digit() {
		return false;
	}

	let suffix: String =
		word.chars().filter(|ch| !ch.is_ascii_digit() && *ch != '.').collect();

	suffix.is_empty() || is_unit_token(&suffix)
}

fn is_unit_token(word: &str) -> bool {
	matches!(
		word,
		"g" | "kg"
			| "mg" | "oz"
			| "lb" | "lbs"
			| "ml" | "l"
			| "fl" | "x"
			| "pk" | "pack"
			| "ct" | "count"
			| "pc" | "pcs"
			| "cal" | "kcal"
	)
}
