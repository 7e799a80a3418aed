use crate::corpus::DocId;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub doc_id: DocId,
    pub score: f64,
}

/// `dot(a, b) / (|a| * |b|)`, or `0.0` when either magnitude is zero.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    if a.len() != b.len() {
        return 0.0;
    }
    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(-1.0, 1.0)
}

/// Score every row of `matrix` against `query`, best first.
/// Equal scores keep ascending document order.
pub fn rank(query: &[f64], matrix: &[Vec<f64>]) -> Vec<SearchResult> {
    let mut scored: Vec<SearchResult> = matrix
        .iter()
        .enumerate()
        .map(|(doc_id, row)| SearchResult { doc_id, score: cosine_similarity(query, row) })
        .collect();
    // stable sort
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_vectors_score_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0, 2.0], &[0.0, 0.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }

    #[test]
    fn similarity_is_symmetric_and_bounded() {
        let a = [0.3, -1.2, 4.0, 0.0];
        let b = [-2.0, 0.5, 1.0, 7.5];
        let ab = cosine_similarity(&a, &b);
        assert_eq!(ab, cosine_similarity(&b, &a));
        assert!((-1.0..=1.0).contains(&ab));
        assert!((cosine_similarity(&a, &a) - 1.0).abs() < 1e-12);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic]
    fn mismatched_lengths_trip_debug_assert() {
        cosine_similarity(&[1.0, 0.0], &[1.0]);
    }

    #[test]
    fn ties_keep_document_order() {
        let matrix = vec![vec![0.0, 1.0], vec![1.0, 0.0], vec![0.0, 2.0], vec![2.0, 0.0]];
        let ranked = rank(&[1.0, 0.0], &matrix);
        let order: Vec<DocId> = ranked.iter().map(|r| r.doc_id).collect();
        assert_eq!(order, vec![1, 3, 0, 2]);
    }
}
