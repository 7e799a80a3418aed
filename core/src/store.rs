use crate::corpus::Corpus;
use crate::error::Result;
use crate::tokenizer::Tokenizer;
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;

/// Owner of the authoritative corpus.
///
/// Readers take an `Arc` snapshot and never observe a partially built corpus. Rebuilds are
/// serialized and run without holding the snapshot slot; the slot is write-locked only for
/// the pointer swap.
pub struct CorpusStore {
    tokenizer: Tokenizer,
    defaults: Arc<[String]>,
    current: RwLock<Arc<Corpus>>,
    rebuild: Mutex<()>,
}

impl CorpusStore {
    /// Capture `defaults` and build the initial corpus from them.
    pub fn new(defaults: Vec<String>, tokenizer: Tokenizer) -> Result<Self> {
        let corpus = Corpus::build(defaults.clone(), tokenizer)?;
        Ok(Self {
            tokenizer,
            defaults: defaults.into(),
            current: RwLock::new(Arc::new(corpus)),
            rebuild: Mutex::new(()),
        })
    }

    pub fn tokenizer(&self) -> Tokenizer { self.tokenizer }

    pub fn defaults(&self) -> &[String] { &self.defaults }

    pub fn snapshot(&self) -> Arc<Corpus> { self.current.read().clone() }

    /// Rebuild from `documents` and swap it in. An empty list fails with
    /// `InvalidDataset` and the current corpus stays authoritative.
    pub fn replace(&self, documents: Vec<String>) -> Result<Arc<Corpus>> {
        let _guard = self.rebuild.lock();
        let corpus = match Corpus::build(documents, self.tokenizer) {
            Ok(c) => Arc::new(c),
            Err(e) => {
                tracing::warn!(error = %e, "rejected dataset update");
                return Err(e);
            }
        };
        self.swap(corpus.clone());
        Ok(corpus)
    }

    /// Restore the captured default documents.
    pub fn reset(&self) -> Result<Arc<Corpus>> {
        let _guard = self.rebuild.lock();
        let corpus = Arc::new(Corpus::build(self.defaults.to_vec(), self.tokenizer)?);
        self.swap(corpus.clone());
        Ok(corpus)
    }

    fn swap(&self, corpus: Arc<Corpus>) {
        let previous = std::mem::replace(&mut *self.current.write(), corpus);
        tracing::info!(previous_docs = previous.len(), "swapped corpus snapshot");
    }
}
