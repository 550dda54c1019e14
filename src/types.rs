//! Core type definitions for compile-time safety.
//!
//! Newtype wrappers for verse keys and concordance identifiers, plus the
//! testament/edition descriptors a pass is built from.

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::constants::{editions, layout};
use crate::error::{Error, Result};

/// Key identifying one verse within one corpus pass (e.g. `Genesis 1:1`).
///
/// Treated as opaque: two editions agree on a verse only if their keys are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct VerseReference(pub String);

impl VerseReference {
    /// Create a new `VerseReference` from a string.
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The degenerate key that orphan continuation lines collect under.
    pub fn is_orphan_bucket(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for VerseReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for VerseReference {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for VerseReference {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Normalized lexical-concordance (Strong's) identifier such as `H430` or `G2316`.
///
/// The namespace letter is upper-cased and the number carries no leading
/// zeros, so `g7`, `G07` and `g007` all compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConcordanceId {
    namespace: char,
    number: u32,
}

impl ConcordanceId {
    /// Create an identifier from its parts, case-folding the namespace.
    pub fn new(namespace: char, number: u32) -> Self {
        Self {
            namespace: namespace.to_ascii_uppercase(),
            number,
        }
    }

    /// Parse a raw identifier body like `h0430` (no angle brackets).
    ///
    /// `marker` is the text reported in errors, usually the full `<h0430>`.
    pub fn parse_raw(body: &str, marker: &str) -> Result<Self> {
        let mut chars = body.chars();
        let namespace = chars
            .next()
            .filter(char::is_ascii_alphabetic)
            .ok_or_else(|| Error::malformed(marker, "missing namespace letter"))?;
        let digits = chars.as_str();
        if digits.is_empty() {
            return Err(Error::malformed(marker, "missing number"));
        }
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::malformed(marker, "number is not numeric"));
        }
        let number = digits
            .parse::<u32>()
            .map_err(|_| Error::malformed(marker, "number out of range"))?;
        Ok(Self::new(namespace, number))
    }
}

impl fmt::Display for ConcordanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.namespace, self.number)
    }
}

impl FromStr for ConcordanceId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_raw(s, s)
    }
}

impl Serialize for ConcordanceId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Which half of the canon a pass covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Testament {
    /// Hebrew Old Testament, read right to left.
    Old,
    /// Greek New Testament.
    New,
}

impl Testament {
    /// Returns the human-readable name of this testament.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Old => "Old Testament",
            Self::New => "New Testament",
        }
    }

    /// Default original-language edition for this testament.
    #[must_use]
    pub const fn default_original_edition(self) -> &'static str {
        match self {
            Self::Old => editions::OLD_TESTAMENT,
            Self::New => editions::NEW_TESTAMENT,
        }
    }

    /// Whether the original-language text is written right to left.
    #[must_use]
    pub const fn is_right_to_left(self) -> bool {
        matches!(self, Self::Old)
    }

    /// Characters of original text that fit in the narrowest display column.
    #[must_use]
    pub const fn column_letters(self) -> usize {
        match self {
            Self::Old => layout::OLD_TESTAMENT_COLUMN_LETTERS,
            Self::New => layout::NEW_TESTAMENT_COLUMN_LETTERS,
        }
    }
}

/// A corpus edition as known to the retrieval collaborator (e.g. `SpaRV1909`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edition(pub String);

impl Edition {
    /// Create a new edition identifier.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Get the edition code.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Edition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Edition {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
