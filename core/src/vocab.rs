use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub type TermId = usize;

/// Bijective term <-> index mapping. Indices are dense in `[0, len)` and assigned in
/// first-seen order while scanning documents in corpus order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    dictionary: HashMap<String, TermId>,
    terms: Vec<String>,
}

impl Vocabulary {
    pub fn new() -> Self { Self::default() }

    /// Build from already-tokenized documents.
    pub fn build<D, T>(documents: D) -> Self
    where
        D: IntoIterator<Item = T>,
        T: AsRef<[String]>,
    {
        let mut vocab = Self::new();
        for tokens in documents {
            for term in tokens.as_ref() {
                vocab.insert(term);
            }
        }
        vocab
    }

    /// Returns the index of `term`, assigning the next one if it is new.
    pub fn insert(&mut self, term: &str) -> TermId {
        if let Some(&id) = self.dictionary.get(term) {
            return id;
        }
        let id = self.terms.len();
        self.dictionary.insert(term.to_string(), id);
        self.terms.push(term.to_string());
        id
    }

    pub fn get(&self, term: &str) -> Option<TermId> { self.dictionary.get(term).copied() }

    pub fn term(&self, id: TermId) -> Option<&str> { self.terms.get(id).map(String::as_str) }

    /// Terms in index order.
    pub fn terms(&self) -> &[String] { &self.terms }

    pub fn len(&self) -> usize { self.terms.len() }

    pub fn is_empty(&self) -> bool { self.terms.is_empty() }
}
