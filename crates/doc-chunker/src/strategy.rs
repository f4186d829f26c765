use crate::category::Category;
use crate::config::ChunkerConfig;
use crate::language::Language;
use crate::types::ChunkSpan;
use regex::Regex;
use std::sync::OnceLock;

/// A prose chunk is never cut shorter than this unless it is the last one
const MIN_PROSE_CHUNK_CHARS: usize = 200;

/// How far before the target end a sentence boundary is searched for
const SENTENCE_LOOKBACK_CHARS: usize = 200;

/// How far past the target end a prose break is searched for
const TEXT_BOUNDARY_LOOKAHEAD_CHARS: usize = 180;

/// How far past the window end a code cut point is searched for
const CODE_BOUNDARY_LOOKAHEAD_LINES: usize = 12;

/// Windowing algorithm, chosen by content category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChunkStrategy {
    /// Fixed line windows with line overlap
    Code,
    /// Character windows cut at paragraph and sentence boundaries
    Prose,
}

impl ChunkStrategy {
    /// Strategy used for a category
    #[must_use]
    pub const fn for_category(category: Category) -> Self {
        match category {
            Category::Code => Self::Code,
            Category::Docs | Category::Mixed => Self::Prose,
        }
    }
}

/// A cut of the document before ids and metadata are assigned
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Window {
    pub text: String,
    pub span: ChunkSpan,
}

impl Window {
    fn lines(text: &str, line_start: usize, line_end: usize) -> Self {
        Self {
            text: text.to_string(),
            span: ChunkSpan::Lines {
                line_start,
                line_end,
            },
        }
    }

    fn chars(text: &str, char_start: usize) -> Self {
        Self {
            text: text.to_string(),
            span: ChunkSpan::Chars {
                char_start,
                char_end: char_start + text.chars().count(),
            },
        }
    }
}

/// Execute a chunking strategy over normalized document text
pub(crate) struct StrategyExecutor<'a> {
    config: &'a ChunkerConfig,
}

impl<'a> StrategyExecutor<'a> {
    pub(crate) const fn new(config: &'a ChunkerConfig) -> Self {
        Self { config }
    }

    /// Execute the given strategy
    pub(crate) fn execute(
        &self,
        strategy: ChunkStrategy,
        text: &str,
        language: Language,
    ) -> Vec<Window> {
        match strategy {
            ChunkStrategy::Code => self.chunk_code(text, language),
            ChunkStrategy::Prose => self.chunk_prose(text),
        }
    }

    /// Sliding line windows
    fn chunk_code(&self, text: &str, language: Language) -> Vec<Window> {
        let lines: Vec<&str> = text.split('\n').collect();
        let total_lines = lines.len();

        let window = self.config.code_chunk_lines.max(1);
        let overlap = self.config.code_overlap_lines.min(window - 1);

        if total_lines <= window {
            let whole = text.trim();
            if whole.is_empty() {
                return Vec::new();
            }
            return vec![Window::lines(whole, 1, total_lines)];
        }

        let mut windows: Vec<Window> = Vec::new();
        let mut start = 0;

        while start < total_lines {
            let mut end = (start + window).min(total_lines);
            if self.config.snap_code_boundaries && end < total_lines {
                end = snap_code_end(&lines, start, end, window, language);
            }
            if end <= start {
                end = (start + 1).min(total_lines);
            }

            let joined = lines[start..end].join("\n");
            push_nonblank(&mut windows, joined.trim(), |t| {
                Window::lines(t, start + 1, end)
            });
            log::trace!("code window lines {}-{}", start + 1, end);

            if end >= total_lines {
                break;
            }
            start = end.saturating_sub(overlap).max(start + 1);
        }

        if windows.is_empty() {
            let whole = text.trim();
            if !whole.is_empty() {
                windows.push(Window::lines(whole, 1, total_lines));
            }
        }

        windows
    }

    /// Character windows with paragraph- and sentence-aware cuts
    fn chunk_prose(&self, text: &str) -> Vec<Window> {
        let normalized = collapse_blank_runs(text.trim());
        let index = CharIndex::new(&normalized);
        let length = index.len();
        if length == 0 {
            return Vec::new();
        }

        let size = self.config.text_chunk_chars.max(1);
        if length <= size {
            return vec![Window::chars(&normalized, 0)];
        }

        let overlap = self.config.text_overlap_chars.min(size - 1);
        let min_chunk = self.config.min_index_chars.max(MIN_PROSE_CHUNK_CHARS);

        let mut windows: Vec<Window> = Vec::new();
        let mut start = 0;

        while start < length {
            let target_end = (start + size).min(length);
            let mut end = find_text_break(&index, start, target_end);
            if end.saturating_sub(start) < min_chunk && end < length {
                end = target_end;
            }
            if end <= start {
                end = if target_end > start { target_end } else { length };
            }

            let raw = index.slice(start, end);
            let body = raw.trim_start();
            let leading = raw[..raw.len() - body.len()].chars().count();
            push_nonblank(&mut windows, body.trim_end(), |t| {
                Window::chars(t, start + leading)
            });
            log::trace!("prose window chars {start}-{end}");

            if end >= length {
                break;
            }
            start = end.saturating_sub(overlap).max(start + 1);
        }

        if windows.is_empty() {
            windows.push(Window::chars(&normalized, 0));
        }

        windows
    }
}

/// Append a window unless its trimmed text is blank.
///
/// Windows repeating their neighbor's text are kept so every line or char
/// range stays covered.
fn push_nonblank<F>(windows: &mut Vec<Window>, text: &str, make: F)
where
    F: FnOnce(&str) -> Window,
{
    if !text.is_empty() {
        windows.push(make(text));
    }
}

/// Pick a cleaner end for the code window `[start, end)`.
///
/// Looks back for a blank line in the second half of the window, then ahead
/// for a blank line or a top-level definition. Returns an exclusive line
/// index; the line at that index begins the cut.
fn snap_code_end(
    lines: &[&str],
    start: usize,
    end: usize,
    window: usize,
    language: Language,
) -> usize {
    let floor = start + (window / 2).max(1);
    if let Some(blank) = (floor..end).rev().find(|&i| lines[i].trim().is_empty()) {
        return blank;
    }

    let limit = (end + CODE_BOUNDARY_LOOKAHEAD_LINES).min(lines.len());
    (end..limit)
        .find(|&i| lines[i].trim().is_empty() || language.is_top_level_definition(lines[i]))
        .unwrap_or(end)
}

/// Choose where the prose window starting at `start` should end.
fn find_text_break(index: &CharIndex<'_>, start: usize, target_end: usize) -> usize {
    let length = index.len();
    if target_end >= length {
        return length;
    }

    let window = index.slice(start, target_end);
    for pattern in ["\n\n", "\n"] {
        if let Some(byte) = window.rfind(pattern) {
            let offset = window[..byte].chars().count();
            if offset > MIN_PROSE_CHUNK_CHARS {
                return start + offset;
            }
        }
    }

    let probe_start = target_end.saturating_sub(SENTENCE_LOOKBACK_CHARS).max(start);
    let probe = index.slice(probe_start, (target_end + 1).min(length));
    if let Some(found) = sentence_end().find_iter(probe).last() {
        let cut = probe_start + probe[..found.start()].chars().count() + 1;
        if cut > start + MIN_PROSE_CHUNK_CHARS && cut <= target_end {
            return cut;
        }
    }

    let lookahead_end = (target_end + TEXT_BOUNDARY_LOOKAHEAD_CHARS).min(length);
    let lookahead = index.slice(target_end, lookahead_end);
    for pattern in ["\n\n", "\n"] {
        if let Some(byte) = lookahead.find(pattern) {
            return target_end + lookahead[..byte].chars().count();
        }
    }
    if let Some(found) = sentence_end().find(lookahead) {
        return target_end + lookahead[..found.end()].chars().count();
    }

    target_end
}

fn sentence_end() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[.!?]\s+").expect("sentence pattern is valid"))
}

fn blank_runs() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\n{3,}").expect("blank run pattern is valid"))
}

/// Collapse three or more consecutive newlines into a paragraph break
fn collapse_blank_runs(text: &str) -> String {
    blank_runs().replace_all(text, "\n\n").into_owned()
}

/// Character-indexed view over a string
struct CharIndex<'a> {
    text: &'a str,
    offsets: Vec<usize>,
}

impl<'a> CharIndex<'a> {
    fn new(text: &'a str) -> Self {
        let offsets = text
            .char_indices()
            .map(|(byte, _)| byte)
            .chain(std::iter::once(text.len()))
            .collect();
        Self { text, offsets }
    }

    /// Number of chars
    fn len(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Substring covering chars `[start, end)`
    fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.text[self.offsets[start]..self.offsets[end]]
    }
}
