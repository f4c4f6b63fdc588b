//! Types shared by the query parser, the scorer and the selector.

use catalog::Product;

/// Everything the scorer needs to know about one query.
///
/// Built once per request by [`build_query_context`](crate::query_context::build_query_context)
/// so scoring never has to look at the raw text again.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryContext {
    /// Lower-cased word tokens with stop words removed, in query order
    pub terms: Vec<String>,

    /// Upper price bound extracted from the query, if any
    pub price_ceiling: Option<f64>,
}

impl QueryContext {
    pub fn new(terms: Vec<String>, price_ceiling: Option<f64>) -> Self {
        Self {
            terms,
            price_ceiling,
        }
    }

    /// True when the price ceiling rules this product out.
    pub fn exceeds_ceiling(&self, product: &Product) -> bool {
        matches!(self.price_ceiling, Some(ceiling) if product.price > ceiling)
    }
}

/// A product that survived filtering, with its lexical score.
///
/// Only lives for the duration of one selection call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredCandidate<'a> {
    pub score: u32,
    pub product: &'a Product,
}

impl<'a> ScoredCandidate<'a> {
    pub fn new(score: u32, product: &'a Product) -> Self {
        Self { score, product }
    }
}
