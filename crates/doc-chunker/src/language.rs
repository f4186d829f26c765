use crate::category::file_extension;

/// Supported programming language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Rust,
    Python,
    JavaScript,
    TypeScript,
    Go,
    Java,
    C,
    Cpp,
    CSharp,
    ObjectiveC,
    Ruby,
    Swift,
    Kotlin,
    Unknown,
}

impl Language {
    /// Detect language from file extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "rs" => Language::Rust,
            "py" | "pyw" => Language::Python,
            "js" | "mjs" | "cjs" | "jsx" => Language::JavaScript,
            "ts" | "tsx" => Language::TypeScript,
            "go" => Language::Go,
            "java" => Language::Java,
            "c" | "h" => Language::C,
            "cpp" | "cc" | "cxx" | "hpp" | "hh" | "hxx" => Language::Cpp,
            "cs" => Language::CSharp,
            "m" => Language::ObjectiveC,
            "rb" => Language::Ruby,
            "swift" => Language::Swift,
            "kt" | "kts" => Language::Kotlin,
            _ => Language::Unknown,
        }
    }

    /// Detect language from a `/`-separated document id
    pub fn from_doc_id(doc_id: &str) -> Self {
        file_extension(doc_id)
            .map(Self::from_extension)
            .unwrap_or(Language::Unknown)
    }

    /// Get language name as string
    pub fn as_str(self) -> &'static str {
        match self {
            Language::Rust => "rust",
            Language::Python => "python",
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Go => "go",
            Language::Java => "java",
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::CSharp => "csharp",
            Language::ObjectiveC => "objective-c",
            Language::Ruby => "ruby",
            Language::Swift => "swift",
            Language::Kotlin => "kotlin",
            Language::Unknown => "unknown",
        }
    }

    /// Whether the extension belongs to a programming language
    pub fn is_known(self) -> bool {
        self != Language::Unknown
    }

    /// Line prefixes that mark a comment.
    ///
    /// Unknown languages fall back to `#`, which covers shell, config and
    /// most scripting formats handed in with an explicit `code` category.
    pub fn comment_prefixes(self) -> &'static [&'static str] {
        match self {
            Language::Rust
            | Language::JavaScript
            | Language::TypeScript
            | Language::Go
            | Language::Java
            | Language::C
            | Language::Cpp
            | Language::CSharp
            | Language::ObjectiveC
            | Language::Swift
            | Language::Kotlin => &["//", "/*", "* ", "*/"],
            Language::Python | Language::Ruby | Language::Unknown => &["#"],
        }
    }

    /// Whether a trimmed line is a comment.
    ///
    /// A prefix with trailing space also matches on its own, so the bare `*`
    /// inside a block comment counts while `*out = v;` does not.
    pub fn is_comment_line(self, line: &str) -> bool {
        self.comment_prefixes()
            .iter()
            .any(|prefix| line.starts_with(prefix) || line == prefix.trim_end())
    }

    /// Prefixes of lines that open a new top-level definition
    pub fn definition_prefixes(self) -> &'static [&'static str] {
        match self {
            Language::Python => &["def ", "async def ", "class ", "@"],
            Language::Rust => &[
                "fn ", "pub ", "impl", "struct ", "enum ", "trait ", "mod ", "const ", "static ",
                "type ", "#[", "async fn ", "unsafe ",
            ],
            Language::JavaScript | Language::TypeScript => &[
                "function ",
                "async function ",
                "export ",
                "class ",
                "const ",
                "interface ",
                "type ",
                "@",
            ],
            Language::Go => &["func ", "type ", "var ", "const "],
            Language::Java | Language::CSharp | Language::Kotlin | Language::Swift => &[
                "public ",
                "private ",
                "protected ",
                "internal ",
                "class ",
                "interface ",
                "fun ",
                "func ",
                "struct ",
                "enum ",
                "@",
                "[",
            ],
            Language::C | Language::Cpp | Language::ObjectiveC => &[
                "#define ", "struct ", "class ", "static ", "typedef ", "namespace ", "template",
                "@interface", "@implementation",
            ],
            Language::Ruby => &["def ", "class ", "module "],
            Language::Unknown => &["def ", "class ", "fn ", "function ", "@"],
        }
    }

    /// Whether an unindented line starts a new definition
    pub fn is_top_level_definition(self, line: &str) -> bool {
        if line.starts_with(char::is_whitespace) {
            return false;
        }
        self.definition_prefixes()
            .iter()
            .any(|prefix| line.starts_with(prefix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(Language::from_extension("rs"), Language::Rust);
        assert_eq!(Language::from_extension("RS"), Language::Rust);
        assert_eq!(Language::from_extension("py"), Language::Python);
        assert_eq!(Language::from_extension("jsx"), Language::JavaScript);
        assert_eq!(Language::from_extension("ts"), Language::TypeScript);
        assert_eq!(Language::from_extension("m"), Language::ObjectiveC);
        assert_eq!(Language::from_extension("md"), Language::Unknown);
    }

    #[test]
    fn test_from_doc_id() {
        assert_eq!(Language::from_doc_id("test.rs"), Language::Rust);
        assert_eq!(Language::from_doc_id("cat/repo/src/main.py"), Language::Python);
        assert_eq!(Language::from_doc_id("web/index.tsx"), Language::TypeScript);
        assert_eq!(Language::from_doc_id("no_extension"), Language::Unknown);
        assert_eq!(Language::from_doc_id("dir.rs/Makefile"), Language::Unknown);
    }

    #[test]
    fn test_comment_prefixes() {
        assert!(Language::Rust.comment_prefixes().contains(&"//"));
        assert!(Language::Python.comment_prefixes().contains(&"#"));
        assert!(!Language::C.comment_prefixes().contains(&"#"));
        assert_eq!(Language::Unknown.comment_prefixes(), &["#"]);
    }

    #[test]
    fn test_comment_lines() {
        assert!(Language::C.is_comment_line("// copy out"));
        assert!(Language::C.is_comment_line("/* block"));
        assert!(Language::C.is_comment_line("* continued"));
        assert!(Language::C.is_comment_line("*"));
        assert!(Language::C.is_comment_line("*/"));
        assert!(!Language::C.is_comment_line("*out = value;"));
        assert!(!Language::Cpp.is_comment_line("**argv = 0;"));
        assert!(!Language::C.is_comment_line("#include <stdio.h>"));
        assert!(Language::Python.is_comment_line("# note"));
    }

    #[test]
    fn test_as_str() {
        assert_eq!(Language::Python.as_str(), "python");
        assert_eq!(Language::ObjectiveC.as_str(), "objective-c");
        assert_eq!(Language::from_doc_id("notes.txt").as_str(), "unknown");
    }

    #[test]
    fn test_top_level_definition() {
        assert!(Language::Python.is_top_level_definition("def main():"));
        assert!(Language::Python.is_top_level_definition("@dataclass"));
        assert!(!Language::Python.is_top_level_definition("    def method(self):"));
        assert!(Language::Rust.is_top_level_definition("pub fn run() {"));
        assert!(!Language::Rust.is_top_level_definition("let x = 1;"));
    }
}
