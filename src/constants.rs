//! Application constants.
//!
//! Centralizes edition names, retrieval arguments and layout thresholds.

/// Default corpus editions.
pub mod editions {
    /// Open Scriptures Hebrew Bible, Strong's-tagged Old Testament.
    pub const OLD_TESTAMENT: &str = "OSHB";

    /// Textus Receptus, Strong's-tagged New Testament.
    pub const NEW_TESTAMENT: &str = "TR";

    /// Default translated edition aligned against both testaments.
    pub const TRANSLATION: &str = "SpaRV1909";
}

/// Corpus retrieval constants.
pub mod retrieval {
    /// Default retrieval program (from libsword).
    pub const DEFAULT_PROGRAM: &str = "diatheke";

    /// Output format requested from the retrieval program.
    pub const OUTPUT_FORMAT: &str = "plain";

    /// Option filters: verse numbers, cantillation, accents, Strong's numbers.
    pub const OPTION_FILTERS: &str = "vcan";

    /// File extension of pre-fetched corpus text.
    pub const CORPUS_FILE_EXTENSION: &str = "txt";
}

/// Rendering layout constants.
pub mod layout {
    /// Original-text characters per narrow column for Hebrew.
    pub const OLD_TESTAMENT_COLUMN_LETTERS: usize = 25;

    /// Original-text characters per narrow column for Greek.
    pub const NEW_TESTAMENT_COLUMN_LETTERS: usize = 12;

    /// Column class for short original text.
    pub const NARROW_COLUMN: &str = "col-md-3";

    /// Column class for original text at least one column budget long.
    pub const MEDIUM_COLUMN: &str = "col-md-6";

    /// Column class for original text at least two column budgets long.
    pub const WIDE_COLUMN: &str = "col-md-9";

    /// Row class that lays cells out right to left.
    pub const REVERSE_ROW: &str = "flex-row-reverse";

    /// Default stylesheet for the rendered document.
    pub const DEFAULT_STYLESHEET: &str =
        "https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css";

    /// Default document title.
    pub const DEFAULT_TITLE: &str = "Interlinear";
}
