use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::tokenizer::{DelimiterTokenizer, Tokenizer};

pub type TermId = u32;
pub type DocId = u32;

/// Corpus-level counts, as reported by [`Index::stats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub num_docs: u32,
    pub num_terms: u32,
}

/// Append-only inverted index over an in-memory corpus.
///
/// Documents are identified by dense insertion-order ids. For every term the
/// index keeps a posting list of containing documents, and for every document
/// a sparse raw term-frequency vector; a document appears in a term's posting
/// list exactly when its vector holds a nonzero count for that term.
pub struct Index {
    tokenizer: Box<dyn Tokenizer>,
    dictionary: HashMap<String, TermId>,
    postings: Vec<Vec<DocId>>,
    vectors: Vec<HashMap<TermId, u32>>,
    docs: Vec<String>,
}

impl Default for Index {
    fn default() -> Self {
        Self::new()
    }
}

impl Index {
    pub fn new() -> Self {
        Self::with_tokenizer(DelimiterTokenizer)
    }

    pub fn with_tokenizer<T: Tokenizer + 'static>(tokenizer: T) -> Self {
        Self {
            tokenizer: Box::new(tokenizer),
            dictionary: HashMap::new(),
            postings: Vec::new(),
            vectors: Vec::new(),
            docs: Vec::new(),
        }
    }

    /// Index `text`, assigning and returning the next document id.
    ///
    /// Ids start at 0, are dense, and are never reused. The document store,
    /// the term-frequency vector, and the posting lists are all updated
    /// before this returns.
    pub fn index_document(&mut self, text: &str) -> DocId {
        let doc_id = self.docs.len() as DocId;

        let mut counts: HashMap<TermId, u32> = HashMap::new();
        for token in self.tokenizer.tokenize(text) {
            let next_id = self.dictionary.len() as TermId;
            let tid = *self.dictionary.entry(token).or_insert(next_id);
            if tid as usize == self.postings.len() {
                self.postings.push(Vec::new());
            }
            *counts.entry(tid).or_insert(0) += 1;
        }

        // Counting first, then one posting per distinct term: a doc id can
        // never land in the same posting list twice.
        for &tid in counts.keys() {
            self.postings[tid as usize].push(doc_id);
        }

        debug!(doc_id, distinct_terms = counts.len(), "indexed document");
        self.docs.push(text.to_owned());
        self.vectors.push(counts);
        doc_id
    }

    /// Number of indexed documents.
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Number of distinct terms seen across the corpus.
    pub fn vocab_len(&self) -> usize {
        self.dictionary.len()
    }

    /// Original text of a document, if `doc_id` has been assigned.
    pub fn text(&self, doc_id: DocId) -> Option<&str> {
        self.docs.get(doc_id as usize).map(String::as_str)
    }

    /// Number of documents containing `term`; 0 for unknown terms.
    pub fn document_frequency(&self, term: &str) -> usize {
        match self.dictionary.get(term) {
            Some(&tid) => self.postings[tid as usize].len(),
            None => 0,
        }
    }

    pub fn stats(&self) -> Stats {
        Stats {
            num_docs: self.docs.len() as u32,
            num_terms: self.dictionary.len() as u32,
        }
    }

    pub(crate) fn term_id(&self, term: &str) -> Option<TermId> {
        self.dictionary.get(term).copied()
    }

    pub(crate) fn postings_for(&self, tid: TermId) -> &[DocId] {
        &self.postings[tid as usize]
    }

    pub(crate) fn vector(&self, doc_id: DocId) -> &HashMap<TermId, u32> {
        &self.vectors[doc_id as usize]
    }

    pub(crate) fn tokenizer(&self) -> &dyn Tokenizer {
        &*self.tokenizer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::FnTokenizer;
    use std::collections::HashSet;

    #[test]
    fn ids_are_dense_and_text_is_stored() {
        let mut index = Index::new();
        assert_eq!(index.index_document("syrah grenache"), 0);
        assert_eq!(index.index_document("grenache mourvedre"), 1);
        assert_eq!(index.len(), 2);
        assert_eq!(index.text(0), Some("syrah grenache"));
        assert_eq!(index.text(1), Some("grenache mourvedre"));
        assert_eq!(index.text(2), None);
    }

    #[test]
    fn repeated_terms_count_once_in_postings() {
        let mut index = Index::new();
        let doc = index.index_document("syrah syrah syrah");
        let tid = index.term_id("syrah").unwrap();
        assert_eq!(index.postings_for(tid), &[doc]);
        assert_eq!(index.vector(doc)[&tid], 3);
        assert_eq!(index.document_frequency("syrah"), 1);
    }

    #[test]
    fn postings_and_vectors_stay_consistent() {
        let mut index = Index::new();
        index.index_document("syrah syrah grenache");
        index.index_document("grenache mourvedre");
        index.index_document("syrah, barbera");

        for (tid, plist) in index.postings.iter().enumerate() {
            let unique: HashSet<_> = plist.iter().collect();
            assert_eq!(unique.len(), plist.len(), "duplicate posting for term {tid}");
            for (doc_id, vector) in index.vectors.iter().enumerate() {
                let posted = plist.contains(&(doc_id as DocId));
                let count = vector.get(&(tid as TermId)).copied().unwrap_or(0);
                assert_eq!(posted, count > 0);
            }
        }
    }

    #[test]
    fn document_frequency_counts_documents_not_occurrences() {
        let mut index = Index::new();
        index.index_document("syrah syrah");
        index.index_document("syrah");
        index.index_document("gamay");
        assert_eq!(index.document_frequency("syrah"), 2);
        assert_eq!(index.document_frequency("gamay"), 1);
        assert_eq!(index.document_frequency("riesling"), 0);
    }

    #[test]
    fn custom_tokenizer_plugs_in() {
        let lowercase = FnTokenizer(|text: &str| {
            text.split_whitespace().map(str::to_lowercase).collect()
        });
        let mut index = Index::with_tokenizer(lowercase);
        index.index_document("Syrah GRENACHE");
        assert_eq!(index.document_frequency("syrah"), 1);
        assert_eq!(index.document_frequency("Syrah"), 0);
    }
}
