// Parallel file rendering with rayon
//
// Parses and renders several source files concurrently. Each worker thread
// parses with its own tree-sitter parser (see `grammar::parse_source`).

use crate::grammar::{parse_source, LanguageId};
use crate::record::FormatTree;
use crate::render::{render_records, RenderOptions};
use crate::traits::Result;
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Parse `source` and render its syntax tree as records
pub fn render_source(
    language: LanguageId,
    source: &str,
    options: &RenderOptions,
) -> Result<Vec<FormatTree>> {
    let tree = parse_source(language, source)?;
    Ok(render_records(&tree.root_node(), options))
}

/// Result of rendering a single file
#[derive(Debug, Clone)]
pub struct FileRendering {
    /// Path to the file that was rendered
    pub file_path: PathBuf,

    /// Language used to parse the file
    pub language: Option<LanguageId>,

    /// Rendered records (empty on failure)
    pub records: Vec<FormatTree>,

    /// Failure description (if any)
    pub error: Option<String>,

    /// Time taken to parse and render this file (milliseconds)
    pub render_time_ms: u64,
}

impl FileRendering {
    fn success(
        file_path: PathBuf,
        language: LanguageId,
        records: Vec<FormatTree>,
        render_time_ms: u64,
    ) -> Self {
        Self {
            file_path,
            language: Some(language),
            records,
            error: None,
            render_time_ms,
        }
    }

    fn failure(file_path: PathBuf, language: Option<LanguageId>, error: String) -> Self {
        Self {
            file_path,
            language,
            records: Vec::new(),
            error: Some(error),
            render_time_ms: 0,
        }
    }

    /// Check if rendering was successful
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Check if rendering failed
    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}

/// Renders many files concurrently
#[derive(Debug, Clone, Default)]
pub struct BatchRenderer {
    options: RenderOptions,

    /// Language forced for every file, bypassing extension detection
    language: Option<LanguageId>,

    /// Extension -> language overrides, consulted before built-in detection
    aliases: HashMap<String, LanguageId>,

    /// Maximum number of threads to use (None = use rayon default)
    max_threads: Option<usize>,
}

impl BatchRenderer {
    /// Create a renderer with the given options
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Parse every file with `language`
    pub fn with_language(mut self, language: LanguageId) -> Self {
        self.language = Some(language);
        self
    }

    /// Map extra file extensions to languages
    pub fn with_aliases(mut self, aliases: HashMap<String, LanguageId>) -> Self {
        self.aliases = aliases
            .into_iter()
            .map(|(ext, id)| (ext.to_lowercase(), id))
            .collect();
        self
    }

    /// Set the maximum number of threads to use
    pub fn with_max_threads(mut self, max_threads: usize) -> Self {
        self.max_threads = Some(max_threads);
        self
    }

    /// Language for `path`: forced language, then aliases, then extension
    pub fn language_for(&self, path: &Path) -> Option<LanguageId> {
        if let Some(id) = self.language {
            return Some(id);
        }
        let ext = path.extension()?.to_str()?.to_lowercase();
        self.aliases
            .get(&ext)
            .copied()
            .or_else(|| LanguageId::from_extension(&ext))
    }

    /// Render files in parallel; results keep the input order
    pub fn render_files(&self, file_paths: Vec<PathBuf>) -> Vec<FileRendering> {
        let start_time = Instant::now();

        let results = match self.max_threads {
            Some(threads) => match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
                Ok(pool) => pool.install(|| self.render_all(file_paths)),
                Err(e) => {
                    tracing::warn!("Falling back to global thread pool: {}", e);
                    self.render_all(file_paths)
                }
            },
            None => self.render_all(file_paths),
        };

        let failed = results.iter().filter(|r| r.is_failure()).count();
        tracing::info!(
            "Rendered {} files: {} successful, {} failed in {}ms",
            results.len(),
            results.len() - failed,
            failed,
            start_time.elapsed().as_millis()
        );

        results
    }

    fn render_all(&self, file_paths: Vec<PathBuf>) -> Vec<FileRendering> {
        file_paths
            .into_par_iter()
            .map(|path| self.render_single_file(path))
            .collect()
    }

    fn render_single_file(&self, file_path: PathBuf) -> FileRendering {
        let start_time = Instant::now();

        let Some(language) = self.language_for(&file_path) else {
            tracing::warn!("Skipping {}: unknown language", file_path.display());
            let ext = file_path
                .extension()
                .and_then(|ext| ext.to_str())
                .unwrap_or("")
                .to_string();
            return FileRendering::failure(
                file_path,
                None,
                format!("Unsupported file extension: {}", ext),
            );
        };

        let source = match std::fs::read_to_string(&file_path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::warn!("Skipping {}: {}", file_path.display(), e);
                return FileRendering::failure(
                    file_path,
                    Some(language),
                    format!("Failed to read file: {}", e),
                );
            }
        };

        match render_source(language, &source, &self.options) {
            Ok(records) => {
                let elapsed = start_time.elapsed().as_millis() as u64;
                FileRendering::success(file_path, language, records, elapsed)
            }
            Err(e) => FileRendering::failure(file_path, Some(language), format!("Parse error: {}", e)),
        }
    }

    /// Get only successfully rendered results
    pub fn successful_results(results: &[FileRendering]) -> Vec<&FileRendering> {
        results.iter().filter(|r| r.is_success()).collect()
    }

    /// Get only failed results
    pub fn failed_results(results: &[FileRendering]) -> Vec<&FileRendering> {
        results.iter().filter(|r| r.is_failure()).collect()
    }
}
