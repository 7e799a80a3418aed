use crate::error::{CoreError, Result};
use crate::rank::{rank, SearchResult};
use crate::reduce;
use crate::tokenizer::Tokenizer;
use crate::vocab::Vocabulary;
use crate::weighting::{inverse_document_frequencies, weigh_query, weight_matrix, TermVector, WeightMatrix};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Ordinal position of a document inside one corpus snapshot.
pub type DocId = usize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryWeight {
    pub term: String,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchOutcome {
    /// Best `k` documents.
    pub hits: Vec<SearchResult>,
    /// Non-zero query weights, heaviest first.
    pub query_weights: Vec<QueryWeight>,
    /// Every document, best first.
    pub similarities: Vec<SearchResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetInfo {
    pub num_documents: usize,
    pub num_features: usize,
    pub sample_documents: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixSample {
    pub feature_names: Vec<String>,
    pub tfidf_sample: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub doc_id: DocId,
    pub coords: Vec<f64>,
}

/// A fully built `(documents, vocabulary, weight matrix)` snapshot.
///
/// Vocabulary, IDF and matrix are only ever derived together in [`Corpus::build`], so
/// `matrix.len() == documents.len()` and every row has `vocabulary.len()` weights.
#[derive(Debug, Clone, PartialEq)]
pub struct Corpus {
    tokenizer: Tokenizer,
    documents: Vec<Document>,
    vocabulary: Vocabulary,
    idf: Vec<f64>,
    matrix: WeightMatrix,
}

impl Corpus {
    pub fn build(texts: Vec<String>, tokenizer: Tokenizer) -> Result<Self> {
        if texts.is_empty() {
            return Err(CoreError::InvalidDataset("document list is empty".into()));
        }
        let start = Instant::now();
        let tokens: Vec<Vec<String>> = texts.iter().map(|t| tokenizer.tokenize(t)).collect();
        let vocabulary = Vocabulary::build(&tokens);
        let idf = inverse_document_frequencies(&tokens, &vocabulary);
        let matrix = weight_matrix(&tokens, &vocabulary, &idf);
        let documents = texts
            .into_iter()
            .enumerate()
            .map(|(id, content)| Document { id, content })
            .collect::<Vec<_>>();
        tracing::info!(
            num_docs = documents.len(),
            num_terms = vocabulary.len(),
            %tokenizer,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "built corpus"
        );
        Ok(Self { tokenizer, documents, vocabulary, idf, matrix })
    }

    pub fn tokenizer(&self) -> Tokenizer { self.tokenizer }
    pub fn documents(&self) -> &[Document] { &self.documents }
    pub fn vocabulary(&self) -> &Vocabulary { &self.vocabulary }
    pub fn idf(&self) -> &[f64] { &self.idf }
    pub fn matrix(&self) -> &WeightMatrix { &self.matrix }
    pub fn len(&self) -> usize { self.documents.len() }
    pub fn is_empty(&self) -> bool { self.documents.is_empty() }

    /// External identifier, valid for this snapshot only.
    pub fn label(index: DocId) -> String { format!("doc{}", index + 1) }

    pub fn title(index: DocId) -> String { format!("Document {}", index + 1) }

    /// Resolve a `docN` label against this snapshot.
    pub fn find(&self, label: &str) -> Option<&Document> {
        let n: usize = label.strip_prefix("doc")?.parse().ok()?;
        self.documents.get(n.checked_sub(1)?)
    }

    pub fn weigh_query(&self, query: &str) -> TermVector {
        weigh_query(query, self.tokenizer, &self.vocabulary, &self.idf)
    }

    pub fn search(&self, query: &str, k: usize) -> SearchOutcome {
        let q = self.weigh_query(query);
        let mut query_weights: Vec<QueryWeight> = q
            .iter()
            .enumerate()
            .filter(|(_, w)| **w != 0.0)
            .filter_map(|(id, w)| {
                self.vocabulary.term(id).map(|term| QueryWeight { term: term.to_string(), weight: *w })
            })
            .collect();
        query_weights.sort_by(|a, b| b.weight.total_cmp(&a.weight));

        let similarities = rank(&q, &self.matrix);
        let hits = similarities.iter().take(k).copied().collect::<Vec<_>>();
        tracing::debug!(query, hits = hits.len(), terms = query_weights.len(), "search");
        SearchOutcome { hits, query_weights, similarities }
    }

    pub fn dataset_info(&self, sample: usize) -> DatasetInfo {
        DatasetInfo {
            num_documents: self.documents.len(),
            num_features: self.vocabulary.len(),
            sample_documents: self.documents.iter().take(sample).map(|d| d.content.clone()).collect(),
        }
    }

    /// First `cols` terms and the top-left `rows x cols` block of the weight matrix.
    pub fn matrix_sample(&self, rows: usize, cols: usize) -> MatrixSample {
        let cols = cols.min(self.vocabulary.len());
        MatrixSample {
            feature_names: self.vocabulary.terms()[..cols].to_vec(),
            tfidf_sample: self.matrix.iter().take(rows).map(|row| row[..cols].to_vec()).collect(),
        }
    }

    pub fn try_project(&self, dims: usize) -> Result<Vec<Projection>> {
        let coords = reduce::try_project(&self.matrix, dims)?;
        Ok(Self::projections(coords))
    }

    /// Principal-component layout. Degenerate input collapses to the origin instead of failing.
    pub fn project(&self, dims: usize) -> Vec<Projection> {
        Self::projections(reduce::project(&self.matrix, dims))
    }

    fn projections(coords: Vec<Vec<f64>>) -> Vec<Projection> {
        coords
            .into_iter()
            .enumerate()
            .map(|(doc_id, coords)| Projection { doc_id, coords })
            .collect()
    }
}
