use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::index::{DocId, Index, TermId};

/// A single scored document.
///
/// [`Index::search`] emits hits in no particular order; sort by `score`
/// (and by `doc_id` to break ties) when determinism matters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hit {
    pub doc_id: DocId,
    pub score: f64,
    pub text: String,
}

impl Index {
    /// Score every document sharing at least one term with `query`.
    ///
    /// Each matched query term contributes
    /// `query_count * doc_count * ln(N / df)` to a candidate's score, with
    /// `N` the corpus size at call time. Query terms absent from the corpus
    /// contribute nothing; a term present in every document carries zero
    /// weight but still surfaces its documents.
    pub fn search(&self, query: &str) -> Vec<Hit> {
        let mut query_counts: HashMap<TermId, u32> = HashMap::new();
        for token in self.tokenizer().tokenize(query) {
            if let Some(tid) = self.term_id(&token) {
                *query_counts.entry(tid).or_insert(0) += 1;
            }
        }
        if query_counts.is_empty() {
            return Vec::new();
        }

        // Every term that survived the dictionary lookup has df >= 1 and
        // df <= N, so the log below is always defined.
        let total = self.len() as f64;
        let mut scores: HashMap<DocId, f64> = HashMap::new();
        for (&tid, &q_count) in &query_counts {
            let postings = self.postings_for(tid);
            let idf = (total / postings.len() as f64).ln();
            let weight = f64::from(q_count) * idf;
            for &doc_id in postings {
                let d_count = self.vector(doc_id).get(&tid).copied().unwrap_or(0);
                *scores.entry(doc_id).or_insert(0.0) += weight * f64::from(d_count);
            }
        }

        debug!(terms = query_counts.len(), candidates = scores.len(), "scored query");

        scores
            .into_iter()
            .filter_map(|(doc_id, score)| {
                self.text(doc_id).map(|text| Hit {
                    doc_id,
                    score,
                    text: text.to_owned(),
                })
            })
            .collect()
    }
}
