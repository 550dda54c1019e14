//! Verse segmentation of raw corpus text.
//!
//! The retrieval program prints one verse per header line (`Genesis 1:1: ...`),
//! wraps long verses onto continuation lines and ends with an edition label
//! such as `(OSHB)`. This module folds that output into one text blob per verse.

use std::collections::{HashMap, HashSet};
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};
use crate::types::VerseReference;

/// Regex matching verse header lines like `1 John 3:16: For God so loved`.
#[allow(clippy::expect_used)]
static RE_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^((?:\w|\s)+)\s(\d+):(\d+):\s+(.+)$").expect("valid regex: RE_HEADER")
});

/// Regex matching bare edition labels like `(SpaRV1909)`.
#[allow(clippy::expect_used)]
static RE_EDITION_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\(\w+\)$").expect("valid regex: RE_EDITION_LABEL")
});

/// What to do with text that appears before the first verse header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrphanPolicy {
    /// Collect it under the empty reference key.
    #[default]
    Bucket,
    /// Fail segmentation with [`Error::OrphanContinuation`].
    Reject,
}

impl OrphanPolicy {
    /// Returns the configuration name of this policy.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bucket => "bucket",
            Self::Reject => "reject",
        }
    }
}

impl FromStr for OrphanPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bucket" => Ok(Self::Bucket),
            "reject" | "strict" => Ok(Self::Reject),
            other => Err(Error::config(
                format!("unknown orphan policy {other:?}"),
                "Use \"bucket\" or \"reject\"",
            )),
        }
    }
}

/// How a single physical line was classified.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Line<'a> {
    Header { reference: VerseReference, content: &'a str },
    EditionLabel,
    Blank,
    Continuation(&'a str),
}

fn classify(line: &str) -> Line<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Line::Blank;
    }
    if RE_EDITION_LABEL.is_match(trimmed) {
        return Line::EditionLabel;
    }
    if let Some(caps) = RE_HEADER.captures(line) {
        if let (Some(book), Some(chapter), Some(verse), Some(content)) =
            (caps.get(1), caps.get(2), caps.get(3), caps.get(4))
        {
            let reference = VerseReference::new(format!(
                "{} {}:{}",
                book.as_str().trim(),
                chapter.as_str(),
                verse.as_str()
            ));
            return Line::Header { reference, content: content.as_str() };
        }
    }
    Line::Continuation(trimmed)
}

/// Surround every `<` and `>` with whitespace so markers split as their own tokens.
pub fn pad_markers(raw: &str) -> String {
    raw.replace('<', " <").replace('>', "> ")
}

/// Verse texts keyed by reference, in first-encountered order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentedText {
    order: Vec<VerseReference>,
    verses: HashMap<VerseReference, String>,
}

impl SegmentedText {
    /// Append `content` to the verse, creating it at the end of the order if new.
    fn append(&mut self, reference: &VerseReference, content: &str) {
        if let Some(text) = self.verses.get_mut(reference) {
            text.push_str(content);
        } else {
            self.order.push(reference.clone());
            self.verses.insert(reference.clone(), content.to_string());
        }
    }

    /// Text of one verse.
    pub fn get(&self, reference: &VerseReference) -> Option<&str> {
        self.verses.get(reference).map(String::as_str)
    }

    /// References in first-encountered order.
    pub fn references(&self) -> &[VerseReference] {
        &self.order
    }

    /// Set of references, for scope comparison between editions.
    pub fn reference_set(&self) -> HashSet<&VerseReference> {
        self.order.iter().collect()
    }

    /// Verses in first-encountered order.
    pub fn iter(&self) -> impl Iterator<Item = (&VerseReference, &str)> {
        self.order
            .iter()
            .filter_map(|r| self.verses.get(r).map(|text| (r, text.as_str())))
    }

    /// Number of verses.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether no verse was found.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Split raw retrieval output into per-verse text.
///
/// Header content is appended as matched and continuation lines trimmed, with
/// no separator inserted between them.
pub fn segment(raw: &str, policy: OrphanPolicy) -> Result<SegmentedText> {
    let padded = pad_markers(raw);
    let mut segmented = SegmentedText::default();
    let mut current: Option<VerseReference> = None;

    for (idx, line) in padded.lines().enumerate() {
        match classify(line) {
            Line::Blank | Line::EditionLabel => {}
            Line::Header { reference, content } => {
                segmented.append(&reference, content);
                current = Some(reference);
            }
            Line::Continuation(content) => {
                if let Some(reference) = &current {
                    segmented.append(reference, content);
                    continue;
                }
                match policy {
                    OrphanPolicy::Reject => {
                        return Err(Error::OrphanContinuation {
                            line_number: idx + 1,
                            line: content.to_string(),
                        });
                    }
                    OrphanPolicy::Bucket => {
                        tracing::warn!("Line {} precedes any verse header, bucketing it", idx + 1);
                        segmented.append(&VerseReference::default(), content);
                    }
                }
            }
        }
    }

    tracing::debug!("Segmented {} verses", segmented.len());
    Ok(segmented)
}
