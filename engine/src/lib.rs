//! In-memory ranked retrieval: a tokenizer, an inverted index over interned
//! terms, and a tf-idf vector-space scorer.

pub mod shared;
pub mod tokenizer;

mod index;
mod scorer;

pub use index::{DocId, Index, Stats, TermId};
pub use scorer::Hit;
pub use shared::SharedIndex;
