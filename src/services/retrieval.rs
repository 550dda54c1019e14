//! Corpus retrieval.
//!
//! This module provides abstractions over where raw verse text comes from: the
//! `diatheke` front end of libsword, or a directory of pre-fetched text files.

use std::path::PathBuf;
use std::process::Command;

use crate::config::Config;
use crate::constants::retrieval;
use crate::error::{Error, Result};
use crate::types::Edition;

/// Trait for raw corpus providers.
///
/// Implementations return text in the line format understood by
/// [`crate::corpus::segment`]: verse header lines, continuation lines and
/// edition labels, with Strong's markers embedded as `<H430>`.
pub trait CorpusSource: Send + Sync {
    /// Fetch the raw text of `key` (e.g. `Genesis 1:1-5`) in `edition`.
    fn fetch(&self, edition: &Edition, key: &str) -> Result<String>;

    /// Get the name of this source (for debugging/logging).
    fn name(&self) -> &'static str;
}

/// Runs the `diatheke` program once per request.
#[derive(Debug, Clone)]
pub struct DiathekeSource {
    program: PathBuf,
}

impl DiathekeSource {
    /// Create a source that runs `program`.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self { program: program.into() }
    }

    /// Build the command for one request without running it.
    pub fn command(&self, edition: &Edition, key: &str) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("-b")
            .arg(edition.as_str())
            .arg("-f")
            .arg(retrieval::OUTPUT_FORMAT)
            .arg("-o")
            .arg(retrieval::OPTION_FILTERS)
            .arg("-k")
            .arg(key);
        cmd
    }
}

impl CorpusSource for DiathekeSource {
    fn fetch(&self, edition: &Edition, key: &str) -> Result<String> {
        tracing::debug!("Running {} for {edition} {key}", self.program.display());
        let output = self
            .command(edition, key)
            .output()
            .map_err(|e| Error::retrieval_spawn(edition.as_str(), key, &e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::retrieval_status(edition.as_str(), key, output.status.code(), &stderr));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn name(&self) -> &'static str {
        "diatheke"
    }
}

/// Reads pre-fetched text from `<dir>/<edition>/<key>.txt`.
#[derive(Debug, Clone)]
pub struct FileSource {
    dir: PathBuf,
}

impl FileSource {
    /// Create a source rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path holding the text for one request.
    pub fn path_for(&self, edition: &Edition, key: &str) -> PathBuf {
        self.dir
            .join(edition.as_str())
            .join(format!("{}.{}", file_stem_for_key(key), retrieval::CORPUS_FILE_EXTENSION))
    }
}

impl CorpusSource for FileSource {
    fn fetch(&self, edition: &Edition, key: &str) -> Result<String> {
        let path = self.path_for(edition, key);
        tracing::debug!("Reading {}", path.display());
        fs_err::read_to_string(&path).map_err(|source| Error::io(source, path))
    }

    fn name(&self) -> &'static str {
        "files"
    }
}

/// Map a reference-range key to a file stem: `Gen 1:1-5` → `Gen_1_1-5`.
fn file_stem_for_key(key: &str) -> String {
    key.trim()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '.' { c } else { '_' })
        .collect()
}

/// Pick the source the configuration asks for.
pub fn source_from_config(config: &Config) -> Box<dyn CorpusSource> {
    config.corpus_dir.as_ref().map_or_else(
        || Box::new(DiathekeSource::new(config.diatheke_path.clone())) as Box<dyn CorpusSource>,
        |dir| Box::new(FileSource::new(dir.clone())),
    )
}
