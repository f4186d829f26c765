use crate::category::Category;
use crate::chunk_id::{parse_chunk_id, strip_chunk_suffix, ChunkRef};
use serde::{Deserialize, Serialize};

/// A chunk of a document prepared for embedding
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chunk {
    /// `{source_document}#chunk-NNNN`
    pub chunk_id: String,

    /// Trimmed chunk content, never empty
    pub text: String,

    /// Position and provenance metadata
    pub metadata: ChunkMetadata,
}

impl Chunk {
    /// Base document id recovered from the chunk id
    #[must_use]
    pub fn base_id(&self) -> &str {
        strip_chunk_suffix(&self.chunk_id)
    }

    /// Parsed form of the chunk id
    #[must_use]
    pub fn chunk_ref(&self) -> Option<ChunkRef> {
        parse_chunk_id(&self.chunk_id)
    }

    /// Get estimated token count
    #[must_use]
    pub const fn estimated_tokens(&self) -> usize {
        self.metadata.token_estimate
    }

    /// Check if a code chunk covers a specific 1-based line
    #[must_use]
    pub const fn contains_line(&self, line: usize) -> bool {
        match self.metadata.span {
            ChunkSpan::Lines {
                line_start,
                line_end,
            } => line >= line_start && line <= line_end,
            ChunkSpan::Chars { .. } => false,
        }
    }
}

/// Metadata attached to every chunk.
///
/// Serializes as a flat mapping whose position keys depend on the span kind:
/// `line_start`/`line_end` for code, `char_start`/`char_end` for prose.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChunkMetadata {
    /// 0-based position within the document
    pub chunk_index: usize,

    /// Number of chunks emitted for the document
    pub chunk_count: usize,

    /// Content category the document was chunked as
    pub category: Category,

    /// Base document id
    pub source_document: String,

    /// Caller-supplied label, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_kind: Option<String>,

    /// Coarse token count, see [`estimate_tokens`]
    pub token_estimate: usize,

    /// Position of the chunk in the source
    #[serde(flatten)]
    pub span: ChunkSpan,
}

impl ChunkMetadata {
    /// Metadata as a JSON object, the shape embedding stores expect
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

/// Where a chunk sits in its document
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum ChunkSpan {
    /// 1-based inclusive line range
    Lines { line_start: usize, line_end: usize },

    /// 0-based character range with exclusive end, counted in `char`s of
    /// the normalized text
    Chars { char_start: usize, char_end: usize },
}

impl ChunkSpan {
    /// Start position (line or character)
    #[must_use]
    pub const fn start(&self) -> usize {
        match *self {
            Self::Lines { line_start, .. } => line_start,
            Self::Chars { char_start, .. } => char_start,
        }
    }

    /// End position (inclusive line or exclusive character)
    #[must_use]
    pub const fn end(&self) -> usize {
        match *self {
            Self::Lines { line_end, .. } => line_end,
            Self::Chars { char_end, .. } => char_end,
        }
    }
}

/// A document as supplied by a loader
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document {
    /// `/`-separated document id, possibly carrying a chunk suffix
    pub doc_id: String,

    /// Decoded text; `None` when the loader could not read it
    pub content: Option<String>,

    /// Category override
    #[serde(default)]
    pub category: Option<Category>,

    /// Passthrough label for chunk metadata
    #[serde(default)]
    pub source_kind: Option<String>,
}

impl Document {
    /// Create a document with content
    pub fn new(doc_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            doc_id: doc_id.into(),
            content: Some(content.into()),
            ..Default::default()
        }
    }

    /// Builder: set category
    #[must_use]
    pub const fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Builder: set source kind
    #[must_use]
    pub fn source_kind(mut self, kind: impl Into<String>) -> Self {
        self.source_kind = Some(kind.into());
        self
    }
}

/// Estimate tokens from content (rough heuristic: 4 chars per token)
#[must_use]
pub fn estimate_tokens(content: &str) -> usize {
    (content.chars().count() / 4).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn code_chunk() -> Chunk {
        Chunk {
            chunk_id: "repo/lib.rs#chunk-0001".to_string(),
            text: "fn main() {}".to_string(),
            metadata: ChunkMetadata {
                chunk_index: 1,
                chunk_count: 3,
                category: Category::Code,
                source_document: "repo/lib.rs".to_string(),
                source_kind: None,
                token_estimate: 3,
                span: ChunkSpan::Lines {
                    line_start: 10,
                    line_end: 15,
                },
            },
        }
    }

    #[test]
    fn test_chunk_contains_line() {
        let chunk = code_chunk();
        assert!(chunk.contains_line(10));
        assert!(chunk.contains_line(15));
        assert!(!chunk.contains_line(9));
        assert!(!chunk.contains_line(16));
    }

    #[test]
    fn test_chunk_ids() {
        let chunk = code_chunk();
        assert_eq!(chunk.base_id(), "repo/lib.rs");
        assert_eq!(chunk.chunk_ref().map(|r| r.index), Some(1));
    }

    #[test]
    fn test_metadata_json_is_flat() {
        let value = code_chunk().metadata.to_json().unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "chunk_index": 1,
                "chunk_count": 3,
                "category": "code",
                "source_document": "repo/lib.rs",
                "token_estimate": 3,
                "line_start": 10,
                "line_end": 15,
            })
        );
    }

    #[test]
    fn test_metadata_deserializes_char_span() {
        let meta: ChunkMetadata = serde_json::from_value(serde_json::json!({
            "chunk_index": 0,
            "chunk_count": 1,
            "category": "docs",
            "source_document": "notes.txt",
            "source_kind": "repo",
            "token_estimate": 5,
            "char_start": 0,
            "char_end": 20,
        }))
        .unwrap();

        assert_eq!(meta.span, ChunkSpan::Chars { char_start: 0, char_end: 20 });
        assert_eq!(meta.source_kind.as_deref(), Some("repo"));
    }

    #[test]
    fn test_estimate_tokens() {
        assert_eq!(estimate_tokens(""), 1);
        assert_eq!(estimate_tokens("abc"), 1);
        assert_eq!(estimate_tokens(&"x".repeat(400)), 100);
        assert_eq!(estimate_tokens("ééééééée"), 2);
    }
}
