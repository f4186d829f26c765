use crate::category::{file_name, Category};
use crate::chunk_id::{make_chunk_id, strip_chunk_suffix};
use crate::config::ChunkerConfig;
use crate::language::Language;
use crate::strategy::{ChunkStrategy, StrategyExecutor, Window};
use crate::types::{estimate_tokens, Chunk, ChunkMetadata, Document};
use std::collections::BTreeSet;
use std::fmt;

/// File name prefixes kept even when the document is very short
const PROTECTED_PREFIXES: &[&str] = &["readme", "license", "notice", "changelog"];

/// Short prose is still indexed when it has at least this many words
const MIN_SHORT_DOC_WORDS: usize = 4;

/// Code with at most one real line below this size carries no signal
const TRIVIAL_CODE_CHARS: usize = 80;

/// Package export stubs with this few code lines are skipped
const INIT_STUB_MAX_LINES: usize = 2;

/// Why a document produced no chunks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SkipReason {
    Blank,
    TooShort,
    ExportStub,
    TrivialCode,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Blank => "blank content",
            Self::TooShort => "below minimum size",
            Self::ExportStub => "package export stub",
            Self::TrivialCode => "trivial code",
        })
    }
}

/// Main chunker interface for splitting documents
#[derive(Debug, Clone)]
pub struct Chunker {
    config: ChunkerConfig,
}

impl Chunker {
    /// Create a new chunker; overlaps are clamped below their window sizes.
    #[must_use]
    pub fn new(config: ChunkerConfig) -> Self {
        Self {
            config: config.clamped(),
        }
    }

    /// Split a document into chunks.
    ///
    /// `doc_id` may carry a chunk suffix from an earlier pass; it is stripped
    /// before classification. Missing, blank and skippable documents yield an
    /// empty vector.
    pub fn chunk(
        &self,
        doc_id: &str,
        content: Option<&str>,
        category: Option<Category>,
        source_kind: Option<&str>,
    ) -> Vec<Chunk> {
        let Some(content) = content else {
            return Vec::new();
        };

        let normalized = normalize_line_endings(content);
        let text = normalized.trim_matches('\n');
        let base_doc_id = strip_chunk_suffix(doc_id);
        let category = category.unwrap_or_else(|| Category::infer(base_doc_id));
        let language = Language::from_doc_id(base_doc_id);

        if let Some(reason) = self.skip_reason(base_doc_id, text, category, language) {
            log::debug!("Skipping {base_doc_id}: {reason}");
            return Vec::new();
        }

        let strategy = ChunkStrategy::for_category(category);
        log::debug!(
            "Chunking {base_doc_id} as {category} ({strategy:?}, {})",
            language.as_str()
        );

        let windows = StrategyExecutor::new(&self.config).execute(strategy, text, language);
        Self::finalize(windows, base_doc_id, category, source_kind)
    }

    /// Chunk a string, inferring the category from `doc_id`
    pub fn chunk_str(&self, doc_id: &str, content: &str) -> Vec<Chunk> {
        self.chunk(doc_id, Some(content), None, None)
    }

    /// Chunk a loaded document
    pub fn chunk_document(&self, document: &Document) -> Vec<Chunk> {
        self.chunk(
            &document.doc_id,
            document.content.as_deref(),
            document.category,
            document.source_kind.as_deref(),
        )
    }

    /// Chunk documents in order, concatenating their chunks
    pub fn chunk_documents(&self, documents: &[Document]) -> Vec<Chunk> {
        documents
            .iter()
            .flat_map(|document| self.chunk_document(document))
            .collect()
    }

    fn skip_reason(
        &self,
        base_doc_id: &str,
        text: &str,
        category: Category,
        language: Language,
    ) -> Option<SkipReason> {
        let stripped = text.trim();
        if stripped.is_empty() {
            return Some(SkipReason::Blank);
        }

        let name = file_name(base_doc_id);
        let char_len = stripped.chars().count();
        if char_len < self.config.min_index_chars && !is_protected_name(name) {
            if category == Category::Code {
                return Some(SkipReason::TooShort);
            }
            if stripped.split_whitespace().count() < MIN_SHORT_DOC_WORDS {
                return Some(SkipReason::TooShort);
            }
        }

        if category == Category::Code {
            let code_lines = count_code_lines(stripped, language);
            if name == "__init__.py" && code_lines <= INIT_STUB_MAX_LINES {
                return Some(SkipReason::ExportStub);
            }
            if code_lines <= 1 && char_len < TRIVIAL_CODE_CHARS {
                return Some(SkipReason::TrivialCode);
            }
        }

        None
    }

    /// Assign ids and metadata once the final chunk count is known
    fn finalize(
        windows: Vec<Window>,
        base_doc_id: &str,
        category: Category,
        source_kind: Option<&str>,
    ) -> Vec<Chunk> {
        let chunk_count = windows.len();
        let source_kind = source_kind.filter(|kind| !kind.is_empty());

        windows
            .into_iter()
            .enumerate()
            .map(|(chunk_index, window)| Chunk {
                chunk_id: make_chunk_id(base_doc_id, chunk_index),
                metadata: ChunkMetadata {
                    chunk_index,
                    chunk_count,
                    category,
                    source_document: base_doc_id.to_string(),
                    source_kind: source_kind.map(str::to_string),
                    token_estimate: estimate_tokens(&window.text),
                    span: window.span,
                },
                text: window.text,
            })
            .collect()
    }

    /// Get configuration
    #[must_use]
    pub const fn config(&self) -> &ChunkerConfig {
        &self.config
    }

    /// Get statistics about chunking
    #[must_use]
    pub fn get_stats(chunks: &[Chunk]) -> ChunkingStats {
        let tokens = || chunks.iter().map(Chunk::estimated_tokens);
        let total_tokens: usize = tokens().sum();

        ChunkingStats {
            total_chunks: chunks.len(),
            total_documents: chunks
                .iter()
                .map(|c| c.metadata.source_document.as_str())
                .collect::<BTreeSet<_>>()
                .len(),
            total_tokens,
            avg_tokens_per_chunk: if chunks.is_empty() {
                0
            } else {
                total_tokens / chunks.len()
            },
            min_tokens: tokens().min().unwrap_or(0),
            max_tokens: tokens().max().unwrap_or(0),
        }
    }
}

impl Default for Chunker {
    fn default() -> Self {
        Self::new(ChunkerConfig::default())
    }
}

/// Statistics about chunking results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkingStats {
    pub total_chunks: usize,
    pub total_documents: usize,
    pub total_tokens: usize,
    pub avg_tokens_per_chunk: usize,
    pub min_tokens: usize,
    pub max_tokens: usize,
}

impl fmt::Display for ChunkingStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Chunks: {} | Documents: {} | Tokens: {} | Avg: {} | Range: {}-{}",
            self.total_chunks,
            self.total_documents,
            self.total_tokens,
            self.avg_tokens_per_chunk,
            self.min_tokens,
            self.max_tokens
        )
    }
}

fn normalize_line_endings(content: &str) -> String {
    content.replace("\r\n", "\n").replace('\r', "\n")
}

fn is_protected_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    PROTECTED_PREFIXES
        .iter()
        .any(|prefix| lower.starts_with(prefix))
}

/// Non-blank lines that are not comments
fn count_code_lines(text: &str, language: Language) -> usize {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !language.is_comment_line(line))
        .count()
}
