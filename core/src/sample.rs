use crate::error::{CoreError, Result};

const DEFAULT_DOCUMENTS: &str = include_str!("../data/default_documents.json");

/// Built-in corpus used when no dataset is supplied at startup.
pub fn default_documents() -> Result<Vec<String>> {
    serde_json::from_str(DEFAULT_DOCUMENTS)
        .map_err(|e| CoreError::InvalidDataset(format!("bundled default documents: {e}")))
}
