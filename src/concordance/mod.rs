//! Extraction of Strong's-annotated tokens from verse text.
//!
//! In tagged editions a marker follows the word group it annotates:
//! `In the beginning <H7225> God <H430>`. Consecutive markers all describe the
//! same preceding group.

use std::sync::LazyLock;

use rayon::prelude::*;
use regex::Regex;
use serde::Serialize;

use crate::corpus::SegmentedText;
use crate::error::Result;
use crate::types::{ConcordanceId, VerseReference};

/// Regex matching a standalone Strong's marker like `<H430>` or `<g0025>`.
///
/// Anything after the namespace letter is captured, so a lettered variant such
/// as `<H1254a>` or a marker with non-ASCII digits is still a marker and fails
/// in [`ConcordanceId::parse_raw`] instead of passing through as a word.
#[allow(clippy::expect_used)]
static RE_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^<([GgHh]\w*)>$").expect("valid regex: RE_MARKER")
});

/// A word group together with the concordance identifiers attached to it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnnotatedToken {
    /// Identifiers in the order they appeared.
    pub ids: Vec<ConcordanceId>,
    /// Words covered, in reading order.
    pub words: Vec<String>,
}

impl AnnotatedToken {
    /// Create a token from parts.
    pub const fn new(ids: Vec<ConcordanceId>, words: Vec<String>) -> Self {
        Self { ids, words }
    }

    /// Whether any identifier of this token is in `ids`.
    pub fn shares_id_with(&self, ids: &[ConcordanceId]) -> bool {
        self.ids.iter().any(|id| ids.contains(id))
    }

    /// Words joined by single spaces.
    pub fn text(&self) -> String {
        self.words.join(" ")
    }
}

/// All tokens of one verse in one edition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerseTokenSet {
    /// Verse the tokens belong to.
    pub reference: VerseReference,
    /// Tokens in reading order.
    pub tokens: Vec<AnnotatedToken>,
}

/// Split one verse into annotated tokens.
///
/// Fails with [`crate::error::Error::MalformedIdentifier`] when a marker has no
/// usable number.
pub fn extract(verse_text: &str) -> Result<Vec<AnnotatedToken>> {
    let mut tokens: Vec<AnnotatedToken> = Vec::new();
    let mut pending: Vec<String> = Vec::new();

    for raw in verse_text.split_whitespace() {
        let Some(body) = RE_MARKER.captures(raw).and_then(|caps| caps.get(1)) else {
            pending.push(raw.to_string());
            continue;
        };
        let id = ConcordanceId::parse_raw(body.as_str(), raw)?;

        if !pending.is_empty() {
            tokens.push(AnnotatedToken::new(vec![id], std::mem::take(&mut pending)));
        } else if let Some(last) = tokens.last_mut() {
            last.ids.push(id);
        } else {
            // Marker before any word: keep it as a word-less token.
            tokens.push(AnnotatedToken::new(vec![id], Vec::new()));
        }
    }

    if !pending.is_empty() {
        tokens.push(AnnotatedToken::new(Vec::new(), pending));
    }

    Ok(tokens)
}

/// Extract every verse of a segmented edition, in parallel, keeping verse order.
pub fn extract_all(segmented: &SegmentedText) -> Result<Vec<VerseTokenSet>> {
    let verses: Vec<(&VerseReference, &str)> = segmented.iter().collect();
    verses
        .into_par_iter()
        .map(|(reference, text)| {
            Ok(VerseTokenSet {
                reference: reference.clone(),
                tokens: extract(text)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::corpus::{segment, OrphanPolicy};
    use crate::error::Error;

    fn id(s: &str) -> ConcordanceId {
        s.parse().unwrap()
    }

    fn words(ws: &[&str]) -> Vec<String> {
        ws.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_marker_closes_preceding_words() {
        let tokens = extract("In the beginning <H7225> God <H430>").unwrap();
        assert_eq!(
            tokens,
            vec![
                AnnotatedToken::new(vec![id("H7225")], words(&["In", "the", "beginning"])),
                AnnotatedToken::new(vec![id("H430")], words(&["God"])),
            ]
        );
    }

    #[test]
    fn test_consecutive_markers_join_previous_token() {
        let tokens = extract("created <H1254> <H8804> the").unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].ids, vec![id("H1254"), id("H8804")]);
        assert_eq!(tokens[1], AnnotatedToken::new(Vec::new(), words(&["the"])));
    }

    #[test]
    fn test_leading_marker_opens_wordless_token() {
        let tokens = extract("<H853> <H9000> heavens <H8064>").unwrap();
        assert_eq!(tokens[0], AnnotatedToken::new(vec![id("H853"), id("H9000")], Vec::new()));
        assert_eq!(tokens[1], AnnotatedToken::new(vec![id("H8064")], words(&["heavens"])));
    }

    #[test]
    fn test_markers_are_normalized() {
        let tokens = extract("logos <g03056>").unwrap();
        assert_eq!(tokens[0].ids[0].to_string(), "G3056");
    }

    #[test]
    fn test_malformed_marker_fails() {
        let err = extract("word <H> other").unwrap_err();
        match err {
            Error::MalformedIdentifier { marker, .. } => assert_eq!(marker, "<H>"),
            other => panic!("expected malformed identifier, got {other:?}"),
        }
        assert!(extract("word <G12x>").is_err());
    }

    #[test]
    fn test_lettered_or_non_ascii_suffix_is_malformed() {
        for text in ["bara <H1254a>", "logos <G\u{0663}\u{0660}>"] {
            match extract(text) {
                Err(Error::MalformedIdentifier { reason, .. }) => assert_eq!(reason, "number is not numeric"),
                other => panic!("expected malformed identifier for {text:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_non_marker_brackets_are_words() {
        let tokens = extract("a <note> b").unwrap();
        assert_eq!(tokens, vec![AnnotatedToken::new(Vec::new(), words(&["a", "<note>", "b"]))]);
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let text = "Dios <H430> creó <H1254> los cielos <H8064>";
        assert_eq!(extract(text).unwrap(), extract(text).unwrap());
    }

    #[test]
    fn test_empty_verse() {
        assert!(extract("   ").unwrap().is_empty());
    }

    #[test]
    fn test_extract_all_keeps_order() {
        let raw = "John 1:1: In <G1722> the beginning <G746>\nJohn 1:2: He <G3778>\n";
        let seg = segment(raw, OrphanPolicy::Bucket).unwrap();
        let sets = extract_all(&seg).unwrap();
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0].reference.as_str(), "John 1:1");
        assert_eq!(sets[1].tokens[0].text(), "He");
    }
}
