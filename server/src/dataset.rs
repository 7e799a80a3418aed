use anyhow::{bail, Context, Result};
use ir_core::CoreError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Deserialize)]
#[serde(untagged)]
enum DatasetFile {
    List(Vec<String>),
    Wrapped { documents: Vec<String> },
    Single(String),
}

/// Parse a dataset: a JSON array of strings, `{"documents": [...]}`, a JSON string, or
/// one document per line. Valid JSON of any other shape yields no documents.
pub fn parse_documents(text: &str) -> Vec<String> {
    let docs = match serde_json::from_str::<serde_json::Value>(text) {
        Ok(value) => match serde_json::from_value::<DatasetFile>(value) {
            Ok(DatasetFile::List(docs)) | Ok(DatasetFile::Wrapped { documents: docs }) => docs,
            Ok(DatasetFile::Single(doc)) => vec![doc],
            Err(_) => Vec::new(),
        },
        Err(_) => text.lines().map(str::to_string).collect(),
    };
    docs.into_iter().filter(|d| !d.trim().is_empty()).collect()
}

pub fn load_documents(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path).with_context(|| format!("reading dataset {}", path.display()))?;
    let docs = parse_documents(&text);
    if docs.is_empty() {
        bail!(CoreError::InvalidDataset(format!("{} contains no documents", path.display())));
    }
    tracing::info!(path = %path.display(), num_docs = docs.len(), "loaded dataset");
    Ok(docs)
}
