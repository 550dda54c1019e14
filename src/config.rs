//! Application configuration.
//!
//! Handles loading configuration from environment variables and .env files.

use dotenv::dotenv;
use std::env;
use std::path::PathBuf;

use crate::constants::{editions, retrieval};
use crate::corpus::OrphanPolicy;
use crate::error::{Error, Result};
use crate::types::{Edition, Testament};

/// Configuration for the application.
#[derive(Debug, Clone)]
pub struct Config {
    /// The application name
    app_name: String,
    /// The application version
    app_version: String,
    /// Retrieval program to run when no corpus directory is set
    pub diatheke_path: PathBuf,
    /// Directory of pre-fetched corpus text, used instead of the program
    pub corpus_dir: Option<PathBuf>,
    /// Original-language edition for Old Testament passes
    pub old_testament_edition: Edition,
    /// Original-language edition for New Testament passes
    pub new_testament_edition: Edition,
    /// Translated edition aligned against both testaments
    pub translation_edition: Edition,
    /// Handling of text that precedes the first verse header
    pub orphan_policy: OrphanPolicy,
}

impl Config {
    /// Get the application name.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Get the application version.
    #[must_use]
    pub fn app_version(&self) -> &str {
        &self.app_version
    }

    /// Original-language edition configured for a testament.
    #[must_use]
    pub const fn original_edition(&self, testament: Testament) -> &Edition {
        match testament {
            Testament::Old => &self.old_testament_edition,
            Testament::New => &self.new_testament_edition,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: env!("CARGO_PKG_NAME").to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            diatheke_path: PathBuf::from(retrieval::DEFAULT_PROGRAM),
            corpus_dir: None,
            old_testament_edition: Edition::new(editions::OLD_TESTAMENT),
            new_testament_edition: Edition::new(editions::NEW_TESTAMENT),
            translation_edition: Edition::new(editions::TRANSLATION),
            orphan_policy: OrphanPolicy::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from a variable lookup (the environment, or a map in tests)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        // Retrieval program: explicit path, or a well-known install location
        if let Some(path) = lookup("INTERLINEAR_DIATHEKE") {
            config.diatheke_path = expand(&path);
        } else if let Some(path) = detect_diatheke_path() {
            config.diatheke_path = path;
        }

        if let Some(dir) = lookup("INTERLINEAR_CORPUS_DIR") {
            let dir = expand(&dir);
            if !dir.is_dir() {
                return Err(Error::config(
                    format!("INTERLINEAR_CORPUS_DIR {} is not a directory", dir.display()),
                    "Point it at a directory containing <edition>/<key>.txt files, or unset it to use diatheke",
                ));
            }
            config.corpus_dir = Some(dir);
        }

        if let Some(edition) = lookup("INTERLINEAR_OT_EDITION") {
            config.old_testament_edition = Edition::new(edition);
        }

        if let Some(edition) = lookup("INTERLINEAR_NT_EDITION") {
            config.new_testament_edition = Edition::new(edition);
        }

        if let Some(edition) = lookup("INTERLINEAR_TRANSLATION") {
            config.translation_edition = Edition::new(edition);
        }

        if let Some(policy) = lookup("INTERLINEAR_ORPHAN_POLICY") {
            config.orphan_policy = policy.parse()?;
        }

        Ok(config)
    }
}

fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).to_string())
}

/// Attempt to detect a `diatheke` installation outside `PATH`
fn detect_diatheke_path() -> Option<PathBuf> {
    // Common installation paths for different platforms
    let paths = if cfg!(target_os = "macos") {
        vec!["/opt/homebrew/bin/diatheke", "/usr/local/bin/diatheke"]
    } else if cfg!(target_os = "windows") {
        vec!["C:\\Program Files\\CrossWire\\The SWORD Project\\diatheke.exe"]
    } else {
        // Linux resolves through PATH
        vec![]
    };

    paths.into_iter().map(PathBuf::from).find(|p| p.exists())
}
