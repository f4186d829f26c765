//! Chunk identifiers.
//!
//! Every chunk id is `{base_doc_id}{marker}{index}`. The chunker itself only
//! emits `#chunk-NNNN`, but ids written by older pipelines may use any of the
//! four markers in [`ChunkMarker`], so parsing and stripping accept all of them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

/// Width of the zero-padded index in ids produced by [`make_chunk_id`]
pub const CHUNK_INDEX_WIDTH: usize = 4;

/// Separator between a base document id and a chunk index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChunkMarker {
    /// `#chunk-`
    Hash,
    /// `::chunk-`
    DoubleColon,
    /// `|chunk:`
    Pipe,
    /// `@chunk:`
    At,
}

impl ChunkMarker {
    /// All recognized markers
    pub const ALL: [Self; 4] = [Self::Hash, Self::DoubleColon, Self::Pipe, Self::At];

    /// Literal marker text
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hash => "#chunk-",
            Self::DoubleColon => "::chunk-",
            Self::Pipe => "|chunk:",
            Self::At => "@chunk:",
        }
    }

    fn from_literal(literal: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == literal)
    }
}

impl fmt::Display for ChunkMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build the canonical id for chunk `index` of `base_doc_id`.
#[must_use]
pub fn make_chunk_id(base_doc_id: &str, index: usize) -> String {
    format!(
        "{base_doc_id}{}{index:0width$}",
        ChunkMarker::Hash,
        width = CHUNK_INDEX_WIDTH
    )
}

/// Remove a chunk suffix from an identifier.
///
/// Cuts at the leftmost marker that is followed by a digit. Identifiers
/// without such a marker are returned unchanged, so the function is
/// idempotent.
#[must_use]
pub fn strip_chunk_suffix(doc_id: &str) -> &str {
    match leftmost_marker(doc_id) {
        Some((pos, _)) => &doc_id[..pos],
        None => doc_id,
    }
}

fn leftmost_marker(doc_id: &str) -> Option<(usize, ChunkMarker)> {
    let mut best: Option<(usize, ChunkMarker)> = None;

    for marker in ChunkMarker::ALL {
        let literal = marker.as_str();
        let found = doc_id.match_indices(literal).find(|(pos, _)| {
            doc_id[pos + literal.len()..].starts_with(|c: char| c.is_ascii_digit())
        });

        if let Some((pos, _)) = found {
            if best.map_or(true, |(current, _)| pos < current) {
                best = Some((pos, marker));
            }
        }
    }

    best
}

fn chunk_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?P<base>.+?)(?P<marker>::chunk-|#chunk-|@chunk:|\|chunk:)(?P<idx>\d+)$")
            .expect("chunk id pattern is valid")
    })
}

/// A chunk id split back into its parts
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkRef {
    /// Base document id
    pub base: String,

    /// Marker the id was written with
    pub marker: ChunkMarker,

    /// Chunk index
    pub index: usize,

    /// Number of digits the index was written with
    pub width: usize,
}

impl ChunkRef {
    /// Id of chunk `index` of the same document, in this id's notation
    #[must_use]
    pub fn sibling_id(&self, index: usize) -> String {
        if self.width > 1 {
            format!(
                "{}{}{index:0width$}",
                self.base,
                self.marker,
                width = self.width
            )
        } else {
            format!("{}{}{index}", self.base, self.marker)
        }
    }

    /// Ids of the chunks within `radius` of this one, in index order.
    ///
    /// The lower end is clamped at zero; the upper end is not bounded since
    /// the chunk count is only known to the store holding the chunks.
    #[must_use]
    pub fn window(&self, radius: usize) -> Vec<String> {
        let first = self.index.saturating_sub(radius);
        let last = self.index.saturating_add(radius);
        (first..=last).map(|i| self.sibling_id(i)).collect()
    }
}

impl fmt::Display for ChunkRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sibling_id(self.index))
    }
}

/// Parse a chunk id into base, marker and index.
///
/// Returns `None` unless the id ends with a marker followed only by digits.
#[must_use]
pub fn parse_chunk_id(doc_id: &str) -> Option<ChunkRef> {
    let caps = chunk_id_pattern().captures(doc_id)?;
    let idx = caps.name("idx")?.as_str();
    let marker = ChunkMarker::from_literal(caps.name("marker")?.as_str())?;

    Some(ChunkRef {
        base: caps.name("base")?.as_str().to_string(),
        marker,
        index: idx.parse().ok()?,
        width: idx.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_make_chunk_id_pads_index() {
        assert_eq!(make_chunk_id("pkg/mod.py", 0), "pkg/mod.py#chunk-0000");
        assert_eq!(make_chunk_id("pkg/mod.py", 42), "pkg/mod.py#chunk-0042");
        assert_eq!(make_chunk_id("a", 12345), "a#chunk-12345");
    }

    #[test]
    fn test_strip_all_markers() {
        let cases = [
            ("pkg/module.py#chunk-0002", "pkg/module.py"),
            ("pkg/module.py::chunk-0002", "pkg/module.py"),
            ("pkg/module.py|chunk:3", "pkg/module.py"),
            ("pkg/module.py@chunk:7", "pkg/module.py"),
            ("pkg/module.py", "pkg/module.py"),
            ("", ""),
        ];
        for (input, expected) in cases {
            assert_eq!(strip_chunk_suffix(input), expected, "input: {input}");
        }
    }

    #[test]
    fn test_strip_uses_leftmost_marker() {
        assert_eq!(strip_chunk_suffix("a::chunk-1#chunk-0002"), "a");
        assert_eq!(strip_chunk_suffix("a#chunk-0001|chunk:4"), "a");
    }

    #[test]
    fn test_strip_requires_numeric_index() {
        assert_eq!(strip_chunk_suffix("notes#chunk-intro"), "notes#chunk-intro");
        assert_eq!(
            strip_chunk_suffix("notes#chunk-intro#chunk-0003"),
            "notes#chunk-intro"
        );
    }

    #[test]
    fn test_strip_is_idempotent() {
        for id in [
            "pkg/module.py#chunk-0002",
            "x|chunk::chunk-5",
            "@chunk:#chunk-1",
            "plain/doc.md",
        ] {
            let once = strip_chunk_suffix(id);
            assert_eq!(strip_chunk_suffix(once), once);
        }
    }

    #[test]
    fn test_parse_chunk_id() {
        let parsed = parse_chunk_id("repo/src/lib.rs::chunk-0012").unwrap();
        assert_eq!(parsed.base, "repo/src/lib.rs");
        assert_eq!(parsed.marker, ChunkMarker::DoubleColon);
        assert_eq!(parsed.index, 12);
        assert_eq!(parsed.width, 4);
        assert_eq!(parsed.to_string(), "repo/src/lib.rs::chunk-0012");
    }

    #[test]
    fn test_parse_rejects_non_chunk_ids() {
        assert!(parse_chunk_id("repo/src/lib.rs").is_none());
        assert!(parse_chunk_id("#chunk-0001").is_none());
        assert!(parse_chunk_id("doc#chunk-0001-extra").is_none());
        assert!(parse_chunk_id("").is_none());
    }

    #[test]
    fn test_window_keeps_notation() {
        let parsed = parse_chunk_id("doc.md#chunk-0001").unwrap();
        assert_eq!(
            parsed.window(2),
            vec!["doc.md#chunk-0000", "doc.md#chunk-0001", "doc.md#chunk-0002", "doc.md#chunk-0003"]
        );

        let unpadded = parse_chunk_id("doc.md|chunk:5").unwrap();
        assert_eq!(
            unpadded.window(1),
            vec!["doc.md|chunk:4", "doc.md|chunk:5", "doc.md|chunk:6"]
        );
    }
}
