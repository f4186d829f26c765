use crate::error::{ChunkerError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable overriding [`ChunkerConfig::code_chunk_lines`]
pub const CODE_LINES_ENV: &str = "SMART_CHUNK_CODE_LINES";

/// Environment variable overriding [`ChunkerConfig::code_overlap_lines`]
pub const CODE_OVERLAP_ENV: &str = "SMART_CHUNK_CODE_OVERLAP";

/// Configuration for document chunking.
///
/// Read once by [`crate::Chunker::new`]; the chunker never consults the
/// environment on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkerConfig {
    /// Target prose chunk size in characters
    pub text_chunk_chars: usize,

    /// Characters shared by consecutive prose chunks
    pub text_overlap_chars: usize,

    /// Code window size in lines
    pub code_chunk_lines: usize,

    /// Lines shared by consecutive code windows
    pub code_overlap_lines: usize,

    /// Documents shorter than this are skipped unless they look meaningful
    pub min_index_chars: usize,

    /// Move code window ends to blank lines or definition starts
    pub snap_code_boundaries: bool,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            text_chunk_chars: 1400,
            text_overlap_chars: 220,
            code_chunk_lines: 80,
            code_overlap_lines: 10,
            min_index_chars: 60,
            snap_code_boundaries: false,
        }
    }
}

impl ChunkerConfig {
    /// Parse a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&raw)
    }

    /// Apply `SMART_CHUNK_CODE_LINES` / `SMART_CHUNK_CODE_OVERLAP` from the
    /// process environment.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply code window overrides from an arbitrary key lookup.
    ///
    /// Values that do not parse are ignored.
    #[must_use]
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(lines) = parse_override(CODE_LINES_ENV, lookup(CODE_LINES_ENV).as_deref()) {
            self.code_chunk_lines = lines.max(1);
        }
        if let Some(overlap) =
            parse_override(CODE_OVERLAP_ENV, lookup(CODE_OVERLAP_ENV).as_deref())
        {
            self.code_overlap_lines = overlap;
        }
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.text_chunk_chars == 0 {
            return Err(ChunkerError::invalid_config(
                "text_chunk_chars must be > 0",
            ));
        }

        if self.code_chunk_lines == 0 {
            return Err(ChunkerError::invalid_config(
                "code_chunk_lines must be > 0",
            ));
        }

        Ok(())
    }

    /// Force window sizes to be positive and overlaps strictly smaller than
    /// their windows.
    #[must_use]
    pub fn clamped(mut self) -> Self {
        let before = self.clone();

        self.text_chunk_chars = self.text_chunk_chars.max(1);
        self.code_chunk_lines = self.code_chunk_lines.max(1);
        self.text_overlap_chars = self.text_overlap_chars.min(self.text_chunk_chars - 1);
        self.code_overlap_lines = self.code_overlap_lines.min(self.code_chunk_lines - 1);

        if self != before {
            log::warn!(
                "Clamped chunker configuration: text {}/{} -> {}/{} chars, code {}/{} -> {}/{} lines",
                before.text_chunk_chars,
                before.text_overlap_chars,
                self.text_chunk_chars,
                self.text_overlap_chars,
                before.code_chunk_lines,
                before.code_overlap_lines,
                self.code_chunk_lines,
                self.code_overlap_lines,
            );
        }

        self
    }
}

fn parse_override(key: &str, raw: Option<&str>) -> Option<usize> {
    let raw = raw.map(str::trim).filter(|v| !v.is_empty())?;
    match raw.parse::<usize>() {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Ignoring {key}={raw:?}: {e}");
            None
        }
    }
}
