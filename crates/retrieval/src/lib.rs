//! # Retrieval Crate
//!
//! First stage of the question-answering pipeline: narrows the product
//! catalog down to a handful of candidates for the language model.
//!
//! ## Components
//!
//! ### Query Context
//! Lower-cased `\w+` terms without stop words, plus an optional price
//! ceiling such as "under 50".
//!
//! ### Keyword Scoring
//! Additive per-term score: category +10, name +5, tag +5, description +2.
//!
//! ### Candidate Selector
//! Hard price filter, zero-score removal, stable best-first ranking, top N.
//!
//! ## Example Usage
//!
//! ```ignore
//! use retrieval::CandidateSelector;
//! use catalog::Catalog;
//! use std::sync::Arc;
//!
//! let catalog = Arc::new(Catalog::load_from_file("data/products.json".as_ref())?);
//! let selector = CandidateSelector::new(catalog);
//!
//! let candidates = selector.select_candidates("wireless mouse under 30", 3);
//! ```
//!
//! Selection is pure CPU work with no I/O, so it never suspends.

pub mod types;
pub mod query_context;
pub mod scoring;
pub mod selector;

pub use types::{QueryContext, ScoredCandidate};
pub use query_context::{STOP_WORDS, build_query_context};
pub use scoring::{ScoreWeights, score_product};
pub use selector::{CandidateSelector, DEFAULT_TOP_N, rank_candidates, select_candidates};
