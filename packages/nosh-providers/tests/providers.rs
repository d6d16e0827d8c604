use nosh_providers::packaged::{self, Nutriments, RawProduct};

#[test]
fn packaged_search_payload_shape_deserializes() {
	let payload = serde_json::json!({
		"products": [
			{
				"product_name": "Peanut Butter",
				"brands": "Skippy",
				"code": "037600105002",
				"serving_size": "2 tbsp (32 g)",
				"nutriments": {
					"energy-kcal_serving": 190.0,
					"proteins_serving": 7.0
				}
			},
			{
				"generic_name": "a record with no display name"
			}
		]
	});
	let products: Vec<RawProduct> = serde_json::from_value(
		payload.get("products").cloned().expect("Missing products array."),
	)
	.expect("Failed to deserialize products.");

	assert_eq!(products.len(), 2);

	let normalized: Vec<_> = products.iter().filter_map(packaged::normalize).collect();

	// The nameless record drops during normalization.
	assert_eq!(normalized.len(), 1);
	assert_eq!(normalized[0].name, "Peanut Butter");
	assert_eq!(normalized[0].brand.as_deref(), Some("Skippy"));
	assert_eq!(normalized[0].calories, Some(190.0));
}

#[test]
fn packaged_kilojoule_only_records_resolve_to_kcal() {
	let raw = RawProduct {
		product_name: Some("Oat Drink".to_string()),
		serving_size: Some("250 ml".to_string()),
		nutriments: Nutriments { energy_kj_100g: Some(196.0), ..Nutriments::default() },
		..RawProduct::default()
	};
	let food = packaged::normalize(&raw).expect("Expected a normalized food.");

	// 196 kJ / 4.184 rounds to 47 kcal; the ml serving does not rescale it.
	assert_eq!(food.calories, Some(47.0));
}
