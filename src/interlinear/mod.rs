//! Word-for-word alignment of a translated verse against its original.
//!
//! The original-language tokens drive the walk. Each one claims the first
//! still-unused translated token sharing any Strong's number with it; original
//! tokens that find nothing are merged into the next entry that does.

use std::ops::Range;

use serde::Serialize;

use crate::concordance::AnnotatedToken;
use crate::types::{ConcordanceId, VerseReference};

/// One display cell: a run of original words and the translated words matched to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlignedEntry {
    /// Original words of the run, joined by single spaces.
    pub original: String,
    /// Indices of the original tokens that make up the run.
    pub original_span: Range<usize>,
    /// Words of the matched translated token (empty when unmatched).
    pub translated: Vec<String>,
    /// Position of the matched token in the translated sequence.
    pub translated_index: Option<usize>,
}

impl AlignedEntry {
    /// Whether this entry found a translated counterpart.
    pub const fn is_matched(&self) -> bool {
        self.translated_index.is_some()
    }

    /// Whether there is nothing to display on either side.
    pub fn is_blank(&self) -> bool {
        self.original.is_empty() && self.translated.is_empty()
    }
}

/// The full alignment of one verse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlignedVerse {
    /// Verse this alignment belongs to.
    pub reference: VerseReference,
    /// Entries in original reading order.
    pub entries: Vec<AlignedEntry>,
    /// The whole translated verse, for display when cells are not enough.
    pub translated_text: String,
    /// Translated tokens that no original token claimed.
    pub unused: usize,
}

/// Translated tokens available for matching, consumed at most once each.
#[derive(Debug)]
struct Pool<'a> {
    tokens: &'a [AnnotatedToken],
    consumed: Vec<bool>,
}

impl<'a> Pool<'a> {
    fn new(tokens: &'a [AnnotatedToken]) -> Self {
        Self {
            tokens,
            consumed: vec![false; tokens.len()],
        }
    }

    /// Claim the first unconsumed token sharing an id with `ids`.
    fn take_first_match(&mut self, ids: &[ConcordanceId]) -> Option<(usize, &'a AnnotatedToken)> {
        if ids.is_empty() {
            return None;
        }
        let tokens = self.tokens;
        let (idx, token) = tokens
            .iter()
            .enumerate()
            .find(|(idx, token)| !self.consumed[*idx] && token.shares_id_with(ids))?;
        self.consumed[idx] = true;
        Some((idx, token))
    }

    fn remaining(&self) -> usize {
        self.consumed.iter().filter(|used| !**used).count()
    }
}

/// Align translated tokens against original tokens.
///
/// Matching is greedy and first-come: an earlier original token always wins a
/// shared translated token, and among candidates the leftmost in the
/// translated sequence is taken.
pub fn align(original: &[AnnotatedToken], translated: &[AnnotatedToken]) -> Vec<AlignedEntry> {
    align_with_pool(original, &mut Pool::new(translated))
}

fn align_with_pool(original: &[AnnotatedToken], pool: &mut Pool<'_>) -> Vec<AlignedEntry> {
    let mut entries = Vec::new();
    let mut run_start = 0;
    let mut run_words: Vec<&str> = Vec::new();

    for (idx, token) in original.iter().enumerate() {
        run_words.extend(token.words.iter().map(String::as_str));

        if let Some((translated_index, matched)) = pool.take_first_match(&token.ids) {
            entries.push(AlignedEntry {
                original: run_words.join(" "),
                original_span: run_start..idx + 1,
                translated: matched.words.clone(),
                translated_index: Some(translated_index),
            });
            run_words.clear();
            run_start = idx + 1;
        }
    }

    if run_start < original.len() {
        entries.push(AlignedEntry {
            original: run_words.join(" "),
            original_span: run_start..original.len(),
            translated: Vec::new(),
            translated_index: None,
        });
    }

    entries
}

/// Align one verse and keep the full translated text alongside the entries.
pub fn align_verse(
    reference: VerseReference,
    original: &[AnnotatedToken],
    translated: &[AnnotatedToken],
) -> AlignedVerse {
    let mut pool = Pool::new(translated);
    let entries = align_with_pool(original, &mut pool);
    let unused = pool.remaining();
    if unused > 0 {
        tracing::debug!("{reference}: {unused} translated tokens left unmatched");
    }

    let translated_text = translated
        .iter()
        .flat_map(|token| token.words.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ");

    AlignedVerse {
        reference,
        entries,
        translated_text,
        unused,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::concordance::extract;

    fn token(ids: &[&str], ws: &[&str]) -> AnnotatedToken {
        AnnotatedToken::new(
            ids.iter().map(|s| s.parse().unwrap()).collect(),
            ws.iter().map(ToString::to_string).collect(),
        )
    }

    #[test]
    fn test_untagged_original_accumulates_into_one_entry() {
        let original = vec![token(&[], &["In"]), token(&[], &["the"]), token(&[], &["beginning"])];
        let entries = align(&original, &[]);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].original, "In the beginning");
        assert!(entries[0].translated.is_empty());
        assert_eq!(entries[0].original_span, 0..3);
    }

    #[test]
    fn test_shared_id_pairs_tokens() {
        let original = vec![token(&["H1254"], &["created"])];
        let translated = vec![token(&["H1254"], &["creó"])];
        let entries = align(&original, &translated);
        assert_eq!(
            entries,
            vec![AlignedEntry {
                original: "created".into(),
                original_span: 0..1,
                translated: vec!["creó".into()],
                translated_index: Some(0),
            }]
        );
    }

    #[test]
    fn test_translated_token_is_consumed_once() {
        let original = vec![token(&["H430"], &["Elohim"]), token(&["H430"], &["Elohim"])];
        let translated = vec![token(&["H430"], &["Dios"])];
        let entries = align(&original, &translated);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].translated, vec!["Dios".to_string()]);
        assert_eq!(entries[1].original, "Elohim");
        assert!(!entries[1].is_matched());
    }

    #[test]
    fn test_partial_id_overlap_matches() {
        let original = vec![token(&["H1254"], &["bara"])];
        let translated = vec![token(&["H8804", "H1254"], &["creó"])];
        assert!(align(&original, &translated)[0].is_matched());
    }

    #[test]
    fn test_earliest_pool_position_wins() {
        let original = vec![token(&["G2316"], &["theos"])];
        let translated = vec![
            token(&["G3588"], &["el"]),
            token(&["G2316"], &["Dios"]),
            token(&["G2316"], &["Señor"]),
        ];
        let entries = align(&original, &translated);
        assert_eq!(entries[0].translated_index, Some(1));
    }

    #[test]
    fn test_unmatched_run_merges_into_next_match() {
        let original = vec![token(&["H9999"], &["a"]), token(&[], &["b"]), token(&["H1"], &["c"])];
        let translated = vec![token(&["H1"], &["x"])];
        let entries = align(&original, &translated);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].original, "a b c");
        assert_eq!(entries[0].original_span, 0..3);
    }

    #[test]
    fn test_order_differences_are_tolerated() {
        let original = extract("bereshit <H7225> bara <H1254> elohim <H430>").unwrap();
        let translated = extract("En el principio <H7225> Dios <H430> creó <H1254>").unwrap();
        let entries = align(&original, &translated);
        let pairs: Vec<(&str, String)> = entries
            .iter()
            .map(|e| (e.original.as_str(), e.translated.join(" ")))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("bereshit", "En el principio".to_string()),
                ("bara", "creó".to_string()),
                ("elohim", "Dios".to_string()),
            ]
        );
    }

    #[test]
    fn test_alignment_conserves_words() {
        let original = extract("a <H1> b c <H2> d <H3> <H4> e").unwrap();
        let translated = extract("w <H2> x <H9> y <H1> <H3> z").unwrap();
        let verse = align_verse(VerseReference::new("Test 1:1"), &original, &translated);

        let original_words: Vec<&str> = verse
            .entries
            .iter()
            .flat_map(|e| e.original.split_whitespace())
            .collect();
        assert_eq!(original_words, vec!["a", "b", "c", "d", "e"]);

        let mut used: Vec<usize> = verse.entries.iter().filter_map(|e| e.translated_index).collect();
        let before = used.len();
        used.sort_unstable();
        used.dedup();
        assert_eq!(used.len(), before, "a translated token was used twice");

        let matched_words: usize = verse.entries.iter().map(|e| e.translated.len()).sum();
        let dropped_words: usize = (0..translated.len())
            .filter(|idx| !used.contains(idx))
            .map(|idx| translated[idx].words.len())
            .sum();
        assert_eq!(matched_words + dropped_words, 4);
        assert_eq!(verse.unused, translated.len() - used.len());
    }

    #[test]
    fn test_align_verse_keeps_translated_text() {
        let original = extract("logos <G3056>").unwrap();
        let translated = extract("el <G3588> Verbo <G3056> y").unwrap();
        let verse = align_verse(VerseReference::new("John 1:1"), &original, &translated);
        assert_eq!(verse.translated_text, "el Verbo y");
        assert_eq!(verse.unused, 2);
        assert_eq!(verse.entries[0].translated, vec!["Verbo".to_string()]);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(align(&[], &[]).is_empty());
        let verse = align_verse(VerseReference::new("Empty 1:1"), &[], &[]);
        assert!(verse.entries.is_empty());
        assert!(verse.translated_text.is_empty());
    }

    #[test]
    fn test_wordless_leading_token_can_match() {
        let original = extract("<H853> shamayim <H8064>").unwrap();
        let translated = extract("los <H853> cielos <H8064>").unwrap();
        let entries = align(&original, &translated);
        assert_eq!(entries[0].original, "");
        assert_eq!(entries[0].translated, vec!["los".to_string()]);
        assert!(!entries[0].is_blank());
        assert_eq!(entries[1].original, "shamayim");
    }
}
