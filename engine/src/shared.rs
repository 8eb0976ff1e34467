//! Single-writer concurrent handle over [`Index`].

use std::sync::Arc;

use parking_lot::RwLock;

use crate::index::{DocId, Index, Stats};
use crate::scorer::Hit;

/// Cheaply cloneable handle sharing one [`Index`] across threads.
///
/// Indexing takes the exclusive lock, so a document id is never visible
/// before its postings and vector are; searches share the read lock and run
/// in parallel.
#[derive(Clone)]
pub struct SharedIndex {
    inner: Arc<RwLock<Index>>,
}

impl SharedIndex {
    pub fn new(index: Index) -> Self {
        Self {
            inner: Arc::new(RwLock::new(index)),
        }
    }

    pub fn index_document(&self, text: &str) -> DocId {
        self.inner.write().index_document(text)
    }

    pub fn search(&self, query: &str) -> Vec<Hit> {
        self.inner.read().search(query)
    }

    pub fn stats(&self) -> Stats {
        self.inner.read().stats()
    }
}

impl Default for SharedIndex {
    fn default() -> Self {
        Self::new(Index::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_one_index() {
        let shared = SharedIndex::default();
        let writer = shared.clone();
        writer.index_document("cabernet sauvignon");
        let hits = shared.search("cabernet");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].text, "cabernet sauvignon");
        assert_eq!(shared.stats().num_docs, 1);
    }

    #[test]
    fn readable_from_other_threads() {
        let shared = SharedIndex::default();
        shared.index_document("malbec");
        let handle = {
            let shared = shared.clone();
            std::thread::spawn(move || shared.search("malbec").len())
        };
        assert_eq!(handle.join().unwrap(), 1);
    }
}
