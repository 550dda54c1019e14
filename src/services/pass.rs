//! Building one testament pass: fetch, segment, check scope, extract, align.

use std::collections::{HashMap, HashSet};

use rayon::prelude::*;
use serde::Serialize;

use crate::concordance::{extract_all, AnnotatedToken};
use crate::corpus::{segment, OrphanPolicy, SegmentedText};
use crate::error::{Error, Result};
use crate::interlinear::{align_verse, AlignedVerse};
use crate::services::retrieval::CorpusSource;
use crate::types::{Edition, Testament, VerseReference};

/// What to align in one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassRequest {
    /// Testament covered, which also decides layout.
    pub testament: Testament,
    /// Reference-range key handed to the corpus source.
    pub key: String,
    /// Strong's-tagged original-language edition.
    pub original: Edition,
    /// Strong's-tagged translated edition.
    pub translated: Edition,
}

impl PassRequest {
    /// Request using the testament's default original edition.
    pub fn new(testament: Testament, key: impl Into<String>, translated: Edition) -> Self {
        Self {
            testament,
            key: key.into(),
            original: Edition::new(testament.default_original_edition()),
            translated,
        }
    }

    /// Override the original-language edition.
    #[must_use]
    pub fn with_original(mut self, original: Edition) -> Self {
        self.original = original;
        self
    }
}

/// Aligned verses for one testament, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterlinearPass {
    /// Testament covered.
    pub testament: Testament,
    /// Key the pass was built from.
    pub key: String,
    /// Original-language edition name.
    pub original_edition: Edition,
    /// Translated edition name.
    pub translated_edition: Edition,
    /// Verses in the order the original edition lists them.
    pub verses: Vec<AlignedVerse>,
}

/// Builds passes from a corpus source.
pub struct InterlinearBuilder<'a> {
    source: &'a dyn CorpusSource,
    orphan_policy: OrphanPolicy,
}

impl<'a> InterlinearBuilder<'a> {
    /// Create a builder reading from `source`.
    pub fn new(source: &'a dyn CorpusSource, orphan_policy: OrphanPolicy) -> Self {
        Self { source, orphan_policy }
    }

    /// Fetch both editions and align every verse.
    ///
    /// Fails without partial output if the editions cover different verses.
    pub fn build(&self, request: &PassRequest) -> Result<InterlinearPass> {
        tracing::info!(
            "Building {} pass for {} ({} / {}) from {}, orphan policy {}",
            request.testament.name(),
            request.key,
            request.original,
            request.translated,
            self.source.name(),
            self.orphan_policy.name()
        );

        let original_raw = self.source.fetch(&request.original, &request.key)?;
        let translated_raw = self.source.fetch(&request.translated, &request.key)?;

        let original = segment(&original_raw, self.orphan_policy)?;
        let translated = segment(&translated_raw, self.orphan_policy)?;
        check_scope(&original, &translated, &request.original, &request.translated)?;

        let verses = align_segmented(&original, &translated)?;
        let unmatched: usize = verses.iter().map(|v| v.unused).sum();
        tracing::info!(
            "Aligned {} verses, {unmatched} translated tokens unmatched",
            verses.len()
        );

        Ok(InterlinearPass {
            testament: request.testament,
            key: request.key.clone(),
            original_edition: request.original.clone(),
            translated_edition: request.translated.clone(),
            verses,
        })
    }
}

/// Fail with [`Error::ScopeMismatch`] unless both editions list the same verses.
pub fn check_scope(
    original: &SegmentedText,
    translated: &SegmentedText,
    original_edition: &Edition,
    translated_edition: &Edition,
) -> Result<()> {
    let original_refs = original.reference_set();
    let translated_refs = translated.reference_set();
    if original_refs == translated_refs {
        return Ok(());
    }

    Err(Error::ScopeMismatch {
        original: original_edition.to_string(),
        translated: translated_edition.to_string(),
        only_in_original: references_missing_from(original, &translated_refs),
        only_in_translated: references_missing_from(translated, &original_refs),
    })
}

fn references_missing_from(text: &SegmentedText, other: &HashSet<&VerseReference>) -> Vec<VerseReference> {
    text.references()
        .iter()
        .filter(|r| !other.contains(r))
        .cloned()
        .collect()
}

/// Extract and align every verse of two segmented editions.
///
/// Verses missing from `translated` align against nothing; run
/// [`check_scope`] first to rule that out.
pub fn align_segmented(original: &SegmentedText, translated: &SegmentedText) -> Result<Vec<AlignedVerse>> {
    let original_sets = extract_all(original)?;
    let translated_sets = extract_all(translated)?;

    let translated_by_ref: HashMap<&VerseReference, &[AnnotatedToken]> = translated_sets
        .iter()
        .map(|set| (&set.reference, set.tokens.as_slice()))
        .collect();

    Ok(original_sets
        .par_iter()
        .map(|set| {
            let translated_tokens = translated_by_ref.get(&set.reference).copied().unwrap_or_default();
            align_verse(set.reference.clone(), &set.tokens, translated_tokens)
        })
        .collect())
}
