//! Keyword scoring of a single product against a query.
//!
//! ## Algorithm
//! For every query term (digit-only terms are skipped, they only ever
//! carry a price):
//! 1. Category: exact match, or equal after stripping trailing `s` → +10
//! 2. Name contains the term → +5
//! 3. Some tag equals the term → +5
//! 4. Description contains the term → +2
//!
//! Buckets are independent, so one term can score in several of them.

use crate::types::QueryContext;
use catalog::Product;

/// Points awarded per matching field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreWeights {
    pub category: u32,
    pub name: u32,
    pub tag: u32,
    pub description: u32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            category: 10,
            name: 5,
            tag: 5,
            description: 2,
        }
    }
}

/// Lower-cased copies of the searchable product fields.
struct ProductFields {
    category: String,
    name: String,
    description: String,
    tags: Vec<String>,
}

impl ProductFields {
    fn of(product: &Product) -> Self {
        Self {
            category: product.category.to_lowercase(),
            name: product.name.to_lowercase(),
            description: product.description.to_lowercase(),
            tags: product.tags.iter().map(|t| t.to_lowercase()).collect(),
        }
    }
}

/// Total lexical score of `product` for the query.
///
/// Price is not considered here; see [`QueryContext::exceeds_ceiling`].
pub fn score_product(product: &Product, context: &QueryContext, weights: &ScoreWeights) -> u32 {
    let fields = ProductFields::of(product);

    context
        .terms
        .iter()
        .filter(|term| !is_numeric_term(term))
        .map(|term| score_term(term, &fields, weights))
        .sum()
}

fn score_term(term: &str, fields: &ProductFields, weights: &ScoreWeights) -> u32 {
    let mut score = 0;

    if matches_category(term, &fields.category) {
        score += weights.category;
    }
    if fields.name.contains(term) {
        score += weights.name;
    }
    if fields.tags.iter().any(|tag| tag == term) {
        score += weights.tag;
    }
    if fields.description.contains(term) {
        score += weights.description;
    }

    score
}

/// Category match with a naive plural fold: every trailing `s` is stripped
/// from both sides, so "phones" matches "phone" (and "glass" matches "gla").
pub fn matches_category(term: &str, category: &str) -> bool {
    term == category || term.trim_end_matches('s') == category.trim_end_matches('s')
}

fn is_numeric_term(term: &str) -> bool {
    term.chars().all(char::is_numeric)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query_context::build_query_context;

    fn mouse() -> Product {
        Product {
            id: 1,
            name: "Wireless Mouse".to_string(),
            description: "Ergonomic wireless mouse with silent clicks".to_string(),
            category: "Electronics".to_string(),
            price: 25.0,
            tags: vec!["wireless".to_string(), "mouse".to_string()],
        }
    }

    fn score(query: &str, product: &Product) -> u32 {
        score_product(product, &build_query_context(query), &ScoreWeights::default())
    }

    #[test]
    fn test_category_match() {
        assert_eq!(score("electronics", &mouse()), 10);
    }

    #[test]
    fn test_category_plural_fold() {
        assert!(matches_category("electronic", "electronics"));
        assert!(matches_category("phones", "phone"));
        assert!(matches_category("glass", "gla"));
        assert!(!matches_category("phone", "home"));
        assert_eq!(score("electronic", &mouse()), 10);
    }

    #[test]
    fn test_term_scores_in_every_matching_bucket() {
        // name +5, tag +5, description +2
        assert_eq!(score("mouse", &mouse()), 12);
        assert_eq!(score("wireless mouse", &mouse()), 24);
    }

    #[test]
    fn test_name_and_description_use_substring_match() {
        // "wire" is inside the name and description but equals no tag
        assert_eq!(score("wire", &mouse()), 7);
        // "click" only appears in the description
        assert_eq!(score("click", &mouse()), 2);
    }

    #[test]
    fn test_repeated_term_scores_each_time() {
        assert_eq!(score("electronics electronics", &mouse()), 20);
    }

    #[test]
    fn test_digit_terms_are_skipped() {
        let mut product = mouse();
        product.name = "Mouse 3000".to_string();
        assert_eq!(score("3000", &product), 0);
    }

    #[test]
    fn test_stop_word_tag_never_scores() {
        let mut product = mouse();
        product.category = "Me".to_string();
        product.tags = vec!["the".to_string(), "for".to_string()];
        product.name = "The Thing For Me".to_string();
        assert_eq!(score("the thing for me", &product), 5);
    }

    #[test]
    fn test_custom_weights() {
        let weights = ScoreWeights {
            category: 1,
            name: 0,
            tag: 0,
            description: 0,
        };
        let context = build_query_context("electronics mouse");
        assert_eq!(score_product(&mouse(), &context, &weights), 1);
    }
}
