//! Term frequency, inverse document frequency and TF-IDF weighting against a fixed vocabulary.

use crate::tokenizer::Tokenizer;
use crate::vocab::Vocabulary;

/// Dense weights, one per vocabulary term.
pub type TermVector = Vec<f64>;

/// One `TermVector` per document, index-aligned with the corpus.
pub type WeightMatrix = Vec<TermVector>;

/// Occurrence count of each vocabulary term divided by the total token count.
///
/// Tokens missing from `vocab` count towards the total but carry no weight. A token list
/// with no tokens yields the zero vector instead of dividing by zero.
pub fn term_frequencies(tokens: &[String], vocab: &Vocabulary) -> TermVector {
    let mut tf = vec![0.0; vocab.len()];
    if tokens.is_empty() {
        return tf;
    }
    for term in tokens {
        if let Some(id) = vocab.get(term) {
            tf[id] += 1.0;
        }
    }
    let total = tokens.len() as f64;
    for w in tf.iter_mut() {
        *w /= total;
    }
    tf
}

/// `ln(N / (1 + df))` per term, where `df` counts documents containing the term at least once.
pub fn inverse_document_frequencies<T: AsRef<[String]>>(documents: &[T], vocab: &Vocabulary) -> Vec<f64> {
    let mut df = vec![0u32; vocab.len()];
    let mut seen_in_doc = vec![usize::MAX; vocab.len()];
    for (doc_id, tokens) in documents.iter().enumerate() {
        for term in tokens.as_ref() {
            if let Some(id) = vocab.get(term) {
                if seen_in_doc[id] != doc_id {
                    seen_in_doc[id] = doc_id;
                    df[id] += 1;
                }
            }
        }
    }
    let n = documents.len() as f64;
    df.into_iter().map(|d| (n / (1.0 + d as f64)).ln()).collect()
}

/// Elementwise `tf * idf`.
pub fn tf_idf(tf: &[f64], idf: &[f64]) -> TermVector {
    debug_assert_eq!(tf.len(), idf.len());
    tf.iter().zip(idf).map(|(t, i)| t * i).collect()
}

pub fn weight_matrix<T: AsRef<[String]>>(documents: &[T], vocab: &Vocabulary, idf: &[f64]) -> WeightMatrix {
    documents
        .iter()
        .map(|tokens| tf_idf(&term_frequencies(tokens.as_ref(), vocab), idf))
        .collect()
}

/// Weight a free-text query exactly like a document of the corpus owning `vocab` and `idf`.
pub fn weigh_query(query: &str, tokenizer: Tokenizer, vocab: &Vocabulary, idf: &[f64]) -> TermVector {
    let tokens = tokenizer.tokenize(query);
    tf_idf(&term_frequencies(&tokens, vocab), idf)
}
