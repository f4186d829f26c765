//! # Context Doc Chunker
//!
//! Deterministic chunking of repository documents for embedding and
//! exact-range retrieval.
//!
//! ## Philosophy
//!
//! The chunker creates overlapping, addressable fragments that:
//! - Carry stable ids (`{doc_id}#chunk-NNNN`) that map back to their document
//! - Record where they came from (line ranges for code, char ranges for prose)
//! - Come out identical for identical input and configuration
//! - Never fail: unusable documents simply produce no chunks
//!
//! ## Architecture
//!
//! ```text
//! (doc_id, content, category?)
//!     │
//!     ├──> Suffix stripping (base doc id)
//!     │
//!     ├──> Category inference (code / docs / mixed)
//!     │
//!     ├──> Skip rules (blank, too short, export stubs, trivial code)
//!     │
//!     └──> Strategy execution
//!          ├─> Code:  fixed line windows with overlap
//!          ├─> Prose: char windows cut at paragraphs/sentences
//!          └─> Emit Chunk[] with ids, counts and spans
//! ```
//!
//! ## Example
//!
//! ```rust
//! use context_doc_chunker::{strip_chunk_suffix, Chunker, ChunkerConfig};
//!
//! let chunker = Chunker::new(ChunkerConfig {
//!     code_chunk_lines: 40,
//!     code_overlap_lines: 5,
//!     ..ChunkerConfig::default()
//! });
//!
//! let code: String = (1..=120).map(|i| format!("line_{i} = {i}\n")).collect();
//! let chunks = chunker.chunk_str("repo/sample.py", &code);
//!
//! assert_eq!(chunks.len(), 4);
//! for chunk in &chunks {
//!     assert_eq!(strip_chunk_suffix(&chunk.chunk_id), chunk.metadata.source_document);
//!     println!("{} covers {:?}", chunk.chunk_id, chunk.metadata.span);
//! }
//! ```

mod category;
mod chunk_id;
mod chunker;
mod config;
mod error;
mod language;
mod strategy;
mod types;

pub use category::Category;
pub use chunk_id::{
    make_chunk_id, parse_chunk_id, strip_chunk_suffix, ChunkMarker, ChunkRef, CHUNK_INDEX_WIDTH,
};
pub use chunker::{Chunker, ChunkingStats};
pub use config::{ChunkerConfig, CODE_LINES_ENV, CODE_OVERLAP_ENV};
pub use error::{ChunkerError, Result};
pub use language::Language;
pub use strategy::ChunkStrategy;
pub use types::{estimate_tokens, Chunk, ChunkMetadata, ChunkSpan, Document};
