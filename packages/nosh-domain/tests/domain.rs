use nosh_domain::{Food, Source, detect_brand_and_item, text};

fn food(name: &str) -> Food {
	Food {
		name: name.to_string(),
		brand: None,
		barcode: None,
		serving_size: None,
		calories: None,
		protein: None,
		carbs: None,
		fat: None,
		fiber: None,
		sugar: None,
		sodium: None,
		source: Source::Packaged,
	}
}

#[test]
fn pack_size_variants_share_a_base_label() {
	let single = text::base_label("Cola Zero 330ml");
	let multipack = text::base_label("Cola Zero 12x330ml");

	assert_eq!(single, multipack);
}

#[test]
fn brand_detection_composes_with_simplify() {
	let split = detect_brand_and_item("TRADER JOE'S Crème Fraîche");

	assert_eq!(split.brand, "trader joes");
	assert_eq!(split.item, "creme fraiche");
}

#[test]
fn completeness_orders_richer_records_first() {
	let mut rich = food("Protein Bar");

	rich.calories = Some(190.0);
	rich.serving_size = Some("60 g".to_string());
	rich.brand = Some("Quest".to_string());

	let mut sparse = food("Protein Bar");

	sparse.calories = Some(190.0);

	assert!(rich.completeness() > sparse.completeness());
}

#[test]
fn food_round_trips_through_json() {
	let mut original = food("Greek Yogurt");

	original.brand = Some("Fage".to_string());
	original.calories = Some(120.0);
	original.sodium = Some(0.065);

	let json = serde_json::to_string(&original).expect("Failed to serialize food.");
	let parsed: Food = serde_json::from_str(&json).expect("Failed to parse food.");

	assert_eq!(parsed, original);
}
