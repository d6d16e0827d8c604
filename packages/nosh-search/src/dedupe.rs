//! Cross-provider deduplication: exact merges by barcode, then clustering
//! of near-duplicate listings by `(brand, base label)` with a survivor cap,
//! so one popular product does not crowd out legitimate variety.

use std::{cmp::Reverse, collections::HashMap};

use nosh_domain::{Food, text};

/// Merge and cluster, keeping at most `per_group_cap` survivors per
/// `(brand, base label)` cluster.
///
/// Invariants: the output is never longer than the input; no two outputs
/// share a non-empty normalized barcode; no cluster exceeds the cap.
/// Collisions keep the higher completeness score; cluster and in-cluster
/// orders are first-seen and stable.
pub fn dedupe_and_cluster(items: Vec<Food>, per_group_cap: usize) -> Vec<Food> {
	let merged = merge_by_barcode(items);
	let mut out = Vec::new();

	for mut members in cluster(merged) {
		members.sort_by_key(|food| Reverse(food.completeness()));
		members.truncate(per_group_cap);
		out.extend(members);
	}

	out
}

/// Admission identity of a food: its normalized barcode when present, else
/// its cluster key. Two foods with the same key are the same listing as far
/// as the result accumulator is concerned.
pub fn dedup_key(food: &Food) -> String {
	match normalize_barcode(food.barcode.as_deref()) {
		Some(code) => format!("code:{code}"),
		None => {
			let (brand, label) = cluster_key(food);

			format!("label:{brand}|{label}")
		},
	}
}

pub fn cluster_key(food: &Food) -> (String, String) {
	(text::simplify(food.brand.as_deref().unwrap_or("")), text::base_label(&food.name))
}

pub fn normalize_barcode(barcode: Option<&str>) -> Option<String> {
	let code: String =
		barcode?.chars().filter(char::is_ascii_alphanumeric).map(|ch| ch.to_ascii_lowercase()).collect();

	(!code.is_empty()).then_some(code)
}

fn merge_by_barcode(items: Vec<Food>) -> Vec<Food> {
	let mut out: Vec<Food> = Vec::new();
	let mut index_by_barcode: HashMap<String, usize> = HashMap::new();

	for food in items {
		let Some(code) = normalize_barcode(food.barcode.as_deref()) else {
			out.push(food);
			continue;
		};

		match index_by_barcode.get(&code) {
			Some(&index) => {
				if food.completeness() > out[index].completeness() {
					out[index] = food;
				}
			},
			None => {
				index_by_barcode.insert(code, out.len());
				out.push(food);
			},
		}
	}

	out
}

fn cluster(items: Vec<Food>) -> Vec<Vec<Food>> {
	let mut clusters: Vec<Vec<Food>> = Vec::new();
	let mut index_by_key: HashMap<(String, String), usize> = HashMap::new();

	for food in items {
		let key = cluster_key(&food);

		match index_by_key.get(&key) {
			Some(&index) => clusters[index].push(food),
			None => {
				index_by_key.insert(key, clusters.len());
				clusters.push(vec![food]);
			},
		}
	}

	clusters
}
