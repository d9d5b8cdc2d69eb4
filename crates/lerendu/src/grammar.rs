// Lazy-loaded grammar cache
//
// This module provides a unified language registry that combines:
// - Language identification by name or file extension
// - Grammar caching (via GrammarCache)
// - Parsing with a per-thread tree-sitter parser

use crate::traits::{Error, Result};
use once_cell::sync::Lazy;
use std::cell::RefCell;
use std::sync::RwLock;
use tree_sitter::{Language, Parser, Tree};

thread_local! {
    /// Thread-local tree-sitter parser to avoid repeated allocations.
    static THREAD_PARSER: RefCell<Parser> = RefCell::new(Parser::new());
}

/// Thread-safe grammar cache
///
/// Grammars are loaded on first access and reused afterwards.
#[derive(Debug, Default)]
pub struct GrammarCache {
    grammars: RwLock<Vec<Option<Language>>>,
}

impl GrammarCache {
    /// Create a new empty grammar cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a language by index, loading it lazily if needed
    pub fn get_or_load<F>(&self, index: usize, loader: F) -> Result<Language>
    where
        F: FnOnce() -> Language,
    {
        {
            let read_guard = self
                .grammars
                .read()
                .map_err(|e| Error::Language(format!("Cache lock poisoned: {}", e)))?;
            if let Some(Some(language)) = read_guard.get(index) {
                return Ok(language.clone());
            }
        }

        let mut write_guard = self
            .grammars
            .write()
            .map_err(|e| Error::Language(format!("Cache lock poisoned: {}", e)))?;

        // Another thread might have loaded it while we waited
        if let Some(Some(language)) = write_guard.get(index) {
            return Ok(language.clone());
        }

        if write_guard.len() <= index {
            write_guard.resize(index + 1, None);
        }

        let language = loader();
        write_guard[index] = Some(language.clone());
        tracing::debug!(index, "loaded grammar");

        Ok(language)
    }

    /// Number of cached grammars
    pub fn len(&self) -> usize {
        self.grammars
            .read()
            .map(|g| g.iter().filter(|l| l.is_some()).count())
            .unwrap_or(0)
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Global grammar cache, shared by every parse in the process
pub static GLOBAL_GRAMMAR_CACHE: Lazy<GrammarCache> = Lazy::new(GrammarCache::new);

/// Supported languages.
///
/// Discriminants are cache indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageId {
    /// Python
    Python = 0,
    /// JavaScript
    JavaScript = 1,
    /// TypeScript
    TypeScript = 2,
    /// TypeScript with JSX
    Tsx = 3,
    /// Go
    Go = 4,
    /// Rust
    Rust = 5,
    /// Java
    Java = 6,
    /// C
    C = 7,
    /// C++
    Cpp = 8,
    /// C#
    CSharp = 9,
    /// Ruby
    Ruby = 10,
    /// PHP
    Php = 11,
    /// Bash
    Bash = 12,
    /// JSON
    Json = 13,
    /// Lua
    Lua = 14,
    /// Scala
    Scala = 15,
}

impl LanguageId {
    /// Every supported language
    pub const ALL: [LanguageId; 16] = [
        LanguageId::Python,
        LanguageId::JavaScript,
        LanguageId::TypeScript,
        LanguageId::Tsx,
        LanguageId::Go,
        LanguageId::Rust,
        LanguageId::Java,
        LanguageId::C,
        LanguageId::Cpp,
        LanguageId::CSharp,
        LanguageId::Ruby,
        LanguageId::Php,
        LanguageId::Bash,
        LanguageId::Json,
        LanguageId::Lua,
        LanguageId::Scala,
    ];

    /// Get the LanguageId for a file extension (case-insensitive)
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "py" | "pyi" => Some(LanguageId::Python),
            "js" | "jsx" | "mjs" | "cjs" => Some(LanguageId::JavaScript),
            "ts" | "mts" | "cts" => Some(LanguageId::TypeScript),
            "tsx" => Some(LanguageId::Tsx),
            "go" => Some(LanguageId::Go),
            "rs" => Some(LanguageId::Rust),
            "java" => Some(LanguageId::Java),
            "c" | "h" => Some(LanguageId::C),
            "cpp" | "cc" | "cxx" | "hpp" | "hh" | "hxx" => Some(LanguageId::Cpp),
            "cs" => Some(LanguageId::CSharp),
            "rb" => Some(LanguageId::Ruby),
            "php" => Some(LanguageId::Php),
            "sh" | "bash" => Some(LanguageId::Bash),
            "json" => Some(LanguageId::Json),
            "lua" => Some(LanguageId::Lua),
            "scala" | "sc" => Some(LanguageId::Scala),
            _ => None,
        }
    }

    /// Get the LanguageId for a language name or one of its extensions
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|id| id.name().to_lowercase() == lower)
            .or_else(|| match lower.as_str() {
                "c++" => Some(LanguageId::Cpp),
                "c#" | "c-sharp" => Some(LanguageId::CSharp),
                "shell" => Some(LanguageId::Bash),
                _ => Self::from_extension(&lower),
            })
    }

    /// Detect the language of a path from its extension
    pub fn from_path(path: &std::path::Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            LanguageId::Python => "Python",
            LanguageId::JavaScript => "JavaScript",
            LanguageId::TypeScript => "TypeScript",
            LanguageId::Tsx => "TSX",
            LanguageId::Go => "Go",
            LanguageId::Rust => "Rust",
            LanguageId::Java => "Java",
            LanguageId::C => "C",
            LanguageId::Cpp => "Cpp",
            LanguageId::CSharp => "CSharp",
            LanguageId::Ruby => "Ruby",
            LanguageId::Php => "PHP",
            LanguageId::Bash => "Bash",
            LanguageId::Json => "JSON",
            LanguageId::Lua => "Lua",
            LanguageId::Scala => "Scala",
        }
    }

    fn load_language(&self) -> Language {
        match self {
            LanguageId::Python => tree_sitter_python::LANGUAGE.into(),
            LanguageId::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
            LanguageId::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            LanguageId::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
            LanguageId::Go => tree_sitter_go::LANGUAGE.into(),
            LanguageId::Rust => tree_sitter_rust::LANGUAGE.into(),
            LanguageId::Java => tree_sitter_java::LANGUAGE.into(),
            LanguageId::C => tree_sitter_c::LANGUAGE.into(),
            LanguageId::Cpp => tree_sitter_cpp::LANGUAGE.into(),
            LanguageId::CSharp => tree_sitter_c_sharp::LANGUAGE.into(),
            LanguageId::Ruby => tree_sitter_ruby::LANGUAGE.into(),
            LanguageId::Php => tree_sitter_php::LANGUAGE_PHP.into(),
            LanguageId::Bash => tree_sitter_bash::LANGUAGE.into(),
            LanguageId::Json => tree_sitter_json::LANGUAGE.into(),
            LanguageId::Lua => tree_sitter_lua::LANGUAGE.into(),
            LanguageId::Scala => tree_sitter_scala::LANGUAGE.into(),
        }
    }

    /// Get the language from the global cache (lazy-loaded)
    pub fn from_cache(&self) -> Result<Language> {
        GLOBAL_GRAMMAR_CACHE.get_or_load(*self as usize, || self.load_language())
    }
}

impl std::str::FromStr for LanguageId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s).ok_or_else(|| Error::UnsupportedLanguage(s.to_string()))
    }
}

impl std::fmt::Display for LanguageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Parse `source` with the grammar for `language`.
///
/// Uses the calling thread's parser, so concurrent callers never share one.
pub fn parse_source(language: LanguageId, source: &str) -> Result<Tree> {
    let grammar = language.from_cache()?;
    THREAD_PARSER.with(|parser| {
        let mut parser = parser.borrow_mut();
        parser
            .set_language(&grammar)
            .map_err(|e| Error::Language(format!("{}: {}", language, e)))?;
        parser
            .parse(source, None)
            .ok_or_else(|| Error::ParseFailed(format!("{} parser returned no tree", language)))
    })
}
