//! Candidate Selector - keyword and price based narrowing of the catalog
//!
//! ## Algorithm
//! 1. Parse the query into terms and an optional price ceiling
//! 2. Drop every product priced above the ceiling (hard filter)
//! 3. Score the remaining products, drop those scoring 0
//! 4. Stable sort by score descending, so ties keep catalog order
//! 5. Return the first `top_n`

use crate::query_context::build_query_context;
use crate::scoring::{ScoreWeights, score_product};
use crate::types::{QueryContext, ScoredCandidate};
use catalog::{Catalog, Product};
use rayon::prelude::*;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Number of candidates handed to the generator by default
pub const DEFAULT_TOP_N: usize = 3;

/// Selects the best matching products for a query.
///
/// Holds a shared handle to the read-only catalog, so cloning is cheap and
/// clones can be moved into blocking tasks.
#[derive(Debug, Clone)]
pub struct CandidateSelector {
    catalog: Arc<Catalog>,
    weights: ScoreWeights,
}

impl CandidateSelector {
    /// Create a selector over the given catalog with the default weights
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            weights: ScoreWeights::default(),
        }
    }

    /// Override the per-field score weights (default: 10/5/5/2)
    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    /// The catalog this selector reads from
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Best `top_n` products for the query, best first.
    pub fn select_candidates(&self, query: &str, top_n: usize) -> Vec<Product> {
        self.scored_candidates(query, top_n)
            .into_iter()
            .map(|candidate| candidate.product.clone())
            .collect()
    }

    /// Like [`select_candidates`](Self::select_candidates) but keeps the scores.
    #[instrument(skip(self))]
    pub fn scored_candidates(&self, query: &str, top_n: usize) -> Vec<ScoredCandidate<'_>> {
        let context = build_query_context(query);
        let candidates = rank_candidates(self.catalog.products(), &context, &self.weights, top_n);

        debug!(
            "Selected {} candidates out of {} products",
            candidates.len(),
            self.catalog.len()
        );
        candidates
    }

    /// Whole catalog, or only the products of one category (case-insensitive).
    ///
    /// An empty category string means no filter.
    pub fn list_all(&self, category: Option<&str>) -> Vec<Product> {
        match category.filter(|c| !c.is_empty()) {
            Some(category) => self
                .catalog
                .by_category(category)
                .into_iter()
                .cloned()
                .collect(),
            None => self.catalog.products().to_vec(),
        }
    }
}

/// Score, filter and rank `products` for an already-parsed query.
pub fn rank_candidates<'a>(
    products: &'a [Product],
    context: &QueryContext,
    weights: &ScoreWeights,
    top_n: usize,
) -> Vec<ScoredCandidate<'a>> {
    // Indexed parallel iterators collect in input order, which the stable
    // sort below relies on for tie-breaking.
    let mut scored: Vec<ScoredCandidate<'a>> = products
        .par_iter()
        .filter(|product| !context.exceeds_ceiling(product))
        .filter_map(|product| {
            let score = score_product(product, context, weights);
            (score > 0).then(|| ScoredCandidate::new(score, product))
        })
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(top_n);
    scored
}

/// One-shot selection over a borrowed catalog with the default weights.
pub fn select_candidates(query: &str, catalog: &Catalog, top_n: usize) -> Vec<Product> {
    let context = build_query_context(query);
    rank_candidates(catalog.products(), &context, &ScoreWeights::default(), top_n)
        .into_iter()
        .map(|candidate| candidate.product.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, name: &str, category: &str, price: f64, tags: &[&str]) -> Product {
        Product {
            id,
            name: name.to_string(),
            description: String::new(),
            category: category.to_string(),
            price,
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn create_test_selector() -> CandidateSelector {
        let catalog = Catalog::from_products(vec![
            product(1, "Wireless Mouse", "Electronics", 25.0, &["wireless", "mouse"]),
            product(2, "Gaming Mouse", "Electronics", 60.0, &["gaming", "mouse"]),
            product(3, "Mouse Pad", "Accessories", 10.0, &["mouse"]),
            product(4, "Desk Lamp", "Home", 30.0, &["lamp"]),
        ])
        .unwrap();
        CandidateSelector::new(Arc::new(catalog))
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let selector = create_test_selector();

        // All three mice score name +5, tag +5
        let ids: Vec<_> = selector
            .select_candidates("mouse", 10)
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_higher_score_ranks_first() {
        let selector = create_test_selector();

        let scored = selector.scored_candidates("gaming mouse", 10);
        assert_eq!(scored[0].product.id, 2);
        assert_eq!(scored[0].score, 20);
        assert_eq!(scored.len(), 3);
    }

    #[test]
    fn test_truncates_to_top_n() {
        let selector = create_test_selector();
        assert_eq!(selector.select_candidates("mouse", 2).len(), 2);
        assert!(selector.select_candidates("mouse", 0).is_empty());
    }

    #[test]
    fn test_price_ceiling_is_a_hard_filter() {
        let selector = create_test_selector();

        let ids: Vec<_> = selector
            .select_candidates("gaming mouse under 50", 10)
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_price_equal_to_ceiling_is_kept() {
        let selector = create_test_selector();
        let ids: Vec<_> = selector
            .select_candidates("lamp under 30", 10)
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![4]);
    }

    #[test]
    fn test_zero_scores_are_excluded() {
        let selector = create_test_selector();
        assert!(selector.select_candidates("bicycle", 10).is_empty());
        assert!(selector.select_candidates("", 10).is_empty());
        assert!(selector.select_candidates("show me what i need", 10).is_empty());
    }

    #[test]
    fn test_list_all() {
        let selector = create_test_selector();

        assert_eq!(selector.list_all(None).len(), 4);
        assert_eq!(selector.list_all(Some("")).len(), 4);

        let electronics = selector.list_all(Some("electronics"));
        assert_eq!(electronics.len(), 2);
        assert!(electronics.iter().all(|p| p.category == "Electronics"));

        assert!(selector.list_all(Some("garden")).is_empty());
    }

    #[test]
    fn test_free_function_matches_selector() {
        let selector = create_test_selector();
        let direct = select_candidates("wireless mouse", selector.catalog(), DEFAULT_TOP_N);
        assert_eq!(direct, selector.select_candidates("wireless mouse", DEFAULT_TOP_N));
    }
}
