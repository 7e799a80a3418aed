pub mod corpus;
pub mod error;
pub mod rank;
pub mod reduce;
pub mod sample;
pub mod store;
pub mod tokenizer;
pub mod vocab;
pub mod weighting;

pub use corpus::{Corpus, DatasetInfo, DocId, Document, MatrixSample, Projection, QueryWeight, SearchOutcome};
pub use error::{CoreError, Result};
pub use rank::{cosine_similarity, SearchResult};
pub use sample::default_documents;
pub use store::CorpusStore;
pub use tokenizer::Tokenizer;
pub use vocab::{TermId, Vocabulary};
pub use weighting::{TermVector, WeightMatrix};
