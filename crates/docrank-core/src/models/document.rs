use serde::{Deserialize, Serialize};

use crate::constants::CONTENT_HASH_LEN;

/// Structured key-value metadata attached to a document.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// A document submitted for ingestion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Raw text. Normalized before it is hashed and stored.
    pub content: String,
    #[serde(default)]
    pub metadata: Metadata,
}

impl Document {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            metadata: Metadata::new(),
        }
    }

    /// Builder-style metadata setter.
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Builder-style single-entry metadata setter.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Fixed-length fingerprint of already-normalized content: the first
/// [`CONTENT_HASH_LEN`] hex characters of its BLAKE3 digest.
pub fn content_hash(normalized_content: &str) -> String {
    let mut hex = blake3::hash(normalized_content.as_bytes()).to_hex().to_string();
    hex.truncate(CONTENT_HASH_LEN);
    hex
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_hash_is_fixed_length_hex() {
        for s in ["", "alpha beta", "Ünïcödé"] {
            let h = content_hash(s);
            assert_eq!(h.len(), CONTENT_HASH_LEN);
            assert!(h.chars().all(|c| c.is_ascii_hexdigit()));
        }
    }

    #[test]
    fn content_hash_is_deterministic_and_discriminating() {
        assert_eq!(content_hash("alpha beta"), content_hash("alpha beta"));
        assert_ne!(content_hash("alpha beta"), content_hash("beta alpha"));
    }

    #[test]
    fn builder_sets_metadata() {
        let doc = Document::new("text").with_field("source", "wiki").with_field("page", 3);
        assert_eq!(doc.metadata["source"], "wiki");
        assert_eq!(doc.metadata["page"], 3);
    }
}
