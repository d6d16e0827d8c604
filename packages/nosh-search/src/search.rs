//! Two-phase search orchestration: a brand-scoped phase when the query
//! names a known brand, then sequential variant iteration with a
//! concurrent three-provider fan-out per variant, accumulating into a
//! bounded, deduplicated result list.

use std::collections::HashSet;

use futures::join;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use nosh_domain::{Food, text};
use nosh_providers::packaged::{self, RawProduct};

use crate::{Error, QueryPlan, Result, SearchService, dedupe, expand, rank};

/// Per-call state. Each search owns one of these; nothing is shared across
/// concurrent invocations, so there is no locking anywhere in the pipeline.
struct SearchContext {
	accumulator: Vec<Food>,
	seen: HashSet<String>,
	cap: usize,
}

impl SearchContext {
	fn new(cap: usize) -> Self {
		Self { accumulator: Vec::new(), seen: HashSet::new(), cap }
	}

	fn full(&self) -> bool {
		self.accumulator.len() >= self.cap
	}

	/// Append items whose dedup key is unseen, halting at the cap.
	fn admit_all(&mut self, foods: Vec<Food>) {
		for food in foods {
			if self.full() {
				break;
			}
			if self.seen.insert(dedupe::dedup_key(&food)) {
				self.accumulator.push(food);
			}
		}
	}
}

impl SearchService {
	/// Search every provider for `query`, returning at most
	/// `search.result_cap` items, best-effort ranked: brand-phase hits and
	/// earlier variants bias toward the front.
	///
	/// Rejects only on cancellation. A provider failure costs that provider
	/// one round and is otherwise invisible; `Ok(vec![])` on an uncancelled
	/// call genuinely means no results.
	pub async fn search_all_providers(
		&self,
		query: &str,
		cancel: &CancellationToken,
	) -> Result<Vec<Food>> {
		let plan = expand::build_fallback_queries(query, self.cfg.search.max_variants);

		if plan.tries.is_empty() {
			return Ok(Vec::new());
		}

		let mut ctx = SearchContext::new(self.cfg.search.result_cap);
		let full_query = text::simplify(query);

		if !plan.brand.is_empty() {
			self.brand_first_phase(&plan, &full_query, &mut ctx, cancel).await?;
		}

		for variant in &plan.tries {
			if ctx.full() {
				break;
			}
			ensure_live(cancel)?;
			self.variant_round(variant, &mut ctx, cancel).await?;
		}

		debug!(query = %full_query, results = ctx.accumulator.len(), "Search finished.");

		Ok(ctx.accumulator)
	}

	/// Brand-scoped steps, issued sequentially so the budget check can skip
	/// later calls. Admission is strict here: an item survives only when
	/// its own brand field contains the detected brand, which also rejects
	/// every brand-less record.
	async fn brand_first_phase(
		&self,
		plan: &QueryPlan,
		full_query: &str,
		ctx: &mut SearchContext,
		cancel: &CancellationToken,
	) -> Result<()> {
		let brand = plan.brand.as_str();
		let focus = if plan.item.is_empty() { full_query } else { plan.item.as_str() };
		let cluster_cap = self.cfg.search.per_group_cap;

		if !ctx.full() {
			ensure_live(cancel)?;

			let raw = recover(
				"packaged.brand_facet",
				self.providers
					.packaged
					.search_brand_facet(&self.cfg.providers.packaged, brand, cancel)
					.await,
			);
			let foods = score_and_normalize(focus, raw);

			admit_brand_filtered(ctx, dedupe::dedupe_and_cluster(foods, cluster_cap), brand);
		}
		if !ctx.full() {
			ensure_live(cancel)?;

			let raw = recover(
				"packaged.brand_filtered",
				self.providers
					.packaged
					.search_brand_filtered(&self.cfg.providers.packaged, brand, focus, cancel)
					.await,
			);
			let foods = score_and_normalize(focus, raw);

			admit_brand_filtered(ctx, dedupe::dedupe_and_cluster(foods, cluster_cap), brand);
		}
		if !ctx.full() {
			ensure_live(cancel)?;

			let foods = recover(
				"recipes",
				self.providers
					.recipes
					.search(&self.cfg.providers.recipes, full_query, cancel)
					.await,
			);

			admit_brand_filtered(ctx, dedupe::dedupe_and_cluster(foods, cluster_cap), brand);
		}

		Ok(())
	}

	/// One variant round: all three providers in flight together, awaited
	/// together. Merge order is packaged (ranked), then government, then
	/// recipes, the latter two in arrival order.
	async fn variant_round(
		&self,
		variant: &str,
		ctx: &mut SearchContext,
		cancel: &CancellationToken,
	) -> Result<()> {
		let (packaged_outcome, government_outcome, recipes_outcome) = join!(
			self.providers.packaged.search(&self.cfg.providers.packaged, variant, cancel),
			self.providers.government.search(&self.cfg.providers.government, variant, cancel),
			self.providers.recipes.search(&self.cfg.providers.recipes, variant, cancel),
		);

		ensure_live(cancel)?;

		let mut round = score_and_normalize(variant, recover("packaged", packaged_outcome));

		round.extend(recover("government", government_outcome));
		round.extend(recover("recipes", recipes_outcome));

		ctx.admit_all(dedupe::dedupe_and_cluster(round, self.cfg.search.per_group_cap));

		Ok(())
	}
}

fn ensure_live(cancel: &CancellationToken) -> Result<()> {
	if cancel.is_cancelled() { Err(Error::Cancelled) } else { Ok(()) }
}

/// A failed provider call contributes an empty round. A cancelled call is
/// not a provider failure and is not logged as one; the caller re-checks
/// the token right after and bails out of the whole search.
fn recover<T>(provider: &'static str, outcome: nosh_providers::Result<Vec<T>>) -> Vec<T> {
	match outcome {
		Ok(items) => items,
		Err(err) if err.is_cancelled() => Vec::new(),
		Err(err) => {
			warn!(provider, error = %err, "Provider round failed; continuing without it.");

			Vec::new()
		},
	}
}

fn score_and_normalize(query: &str, products: Vec<RawProduct>) -> Vec<Food> {
	rank::rank_products(query, products).iter().filter_map(packaged::normalize).collect()
}

fn admit_brand_filtered(ctx: &mut SearchContext, foods: Vec<Food>, brand: &str) {
	let matching = foods
		.into_iter()
		.filter(|food| {
			food.brand
				.as_deref()
				.map(|field| text::simplify(field).contains(brand))
				.unwrap_or(false)
		})
		.collect();

	ctx.admit_all(matching);
}
