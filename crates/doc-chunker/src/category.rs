use crate::error::{ChunkerError, Result};
use crate::language::Language;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Markup and config formats that mix prose with structure
const MIXED_EXTENSIONS: &[&str] = &["md", "rst", "json", "yaml", "yml", "toml", "ini", "tex"];

/// Content class of a document, which selects the windowing strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Source code, windowed by lines
    Code,
    /// Plain prose, windowed by characters
    Docs,
    /// Markup, config and notebooks, windowed like prose
    Mixed,
}

impl Category {
    /// Infer the category from a document id's file name.
    pub fn infer(doc_id: &str) -> Self {
        if Language::from_doc_id(doc_id).is_known() {
            return Self::Code;
        }

        let is_mixed = file_extension(doc_id)
            .is_some_and(|ext| MIXED_EXTENSIONS.contains(&ext.to_lowercase().as_str()));
        if is_mixed || is_notebook(doc_id) {
            return Self::Mixed;
        }

        Self::Docs
    }

    /// Get category name as string
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Docs => "docs",
            Self::Mixed => "mixed",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ChunkerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "code" => Ok(Self::Code),
            "docs" => Ok(Self::Docs),
            "mixed" => Ok(Self::Mixed),
            other => Err(ChunkerError::unknown_category(other)),
        }
    }
}

/// Last `/`-separated segment of a document id
pub(crate) fn file_name(doc_id: &str) -> &str {
    doc_id.rsplit('/').next().unwrap_or(doc_id)
}

/// Extension of the file name, without the dot.
///
/// Dotfiles such as `.gitignore` have no extension.
pub(crate) fn file_extension(doc_id: &str) -> Option<&str> {
    let name = file_name(doc_id);
    let pos = name.rfind('.')?;
    if pos == 0 || pos + 1 == name.len() {
        return None;
    }
    Some(&name[pos + 1..])
}

/// `report.nb.txt`, `analysis.nb.json` and the like
fn is_notebook(doc_id: &str) -> bool {
    file_name(doc_id)
        .trim_start_matches('.')
        .split('.')
        .skip(1)
        .any(|suffix| suffix.eq_ignore_ascii_case("nb"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_code() {
        assert_eq!(Category::infer("repo/src/main.rs"), Category::Code);
        assert_eq!(Category::infer("repo/pkg/module.py"), Category::Code);
        assert_eq!(Category::infer("repo/lib/Foo.JAVA"), Category::Code);
        assert_eq!(Category::infer("repo/ios/View.m"), Category::Code);
    }

    #[test]
    fn test_infer_mixed() {
        assert_eq!(Category::infer("repo/README.md"), Category::Mixed);
        assert_eq!(Category::infer("repo/config.yml"), Category::Mixed);
        assert_eq!(Category::infer("repo/Cargo.toml"), Category::Mixed);
        assert_eq!(Category::infer("repo/paper.tex"), Category::Mixed);
        assert_eq!(Category::infer("repo/notebooks/fit.nb.txt"), Category::Mixed);
    }

    #[test]
    fn test_infer_docs_fallback() {
        assert_eq!(Category::infer("repo/notes.txt"), Category::Docs);
        assert_eq!(Category::infer("repo/LICENSE"), Category::Docs);
        assert_eq!(Category::infer("repo/.gitignore"), Category::Docs);
        assert_eq!(Category::infer("repo.md/CHANGES"), Category::Docs);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("code".parse::<Category>().unwrap(), Category::Code);
        assert_eq!(" Mixed ".parse::<Category>().unwrap(), Category::Mixed);
        assert!("binary".parse::<Category>().is_err());
    }

    #[test]
    fn test_file_extension() {
        assert_eq!(file_extension("a/b/c.tar.gz"), Some("gz"));
        assert_eq!(file_extension("a/b/.env"), None);
        assert_eq!(file_extension("a/b/trailing."), None);
        assert_eq!(file_extension("Makefile"), None);
    }
}
