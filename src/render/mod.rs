//! HTML rendering of aligned passes.
//!
//! Produces a Bootstrap grid: one row per verse, one cell per aligned entry,
//! original words above their translation. Old Testament rows run right to left.

use std::fmt::Write;

use serde::Serialize;

use crate::constants::layout;
use crate::error::Result;
use crate::interlinear::AlignedVerse;
use crate::services::pass::InterlinearPass;
use crate::types::Testament;

/// Rendering options
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Document title.
    pub title: String,
    /// Stylesheet URL linked from the document head, if any.
    pub stylesheet: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: layout::DEFAULT_TITLE.to_string(),
            stylesheet: Some(layout::DEFAULT_STYLESHEET.to_string()),
        }
    }
}

/// One displayed cell of a verse row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cell {
    /// Bootstrap column class sized to the original text.
    pub column_class: &'static str,
    /// Original-language words.
    pub original: String,
    /// Translated words, joined.
    pub translated: String,
}

/// Render-agnostic layout of one verse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerseView {
    /// Verse reference as displayed.
    pub reference: String,
    /// Whole translated verse.
    pub translated_text: String,
    /// Cells in original reading order.
    pub cells: Vec<Cell>,
    /// Whether cells are laid out right to left.
    pub right_to_left: bool,
}

impl VerseView {
    /// Lay out one aligned verse, skipping entries with nothing on either side.
    pub fn from_aligned(verse: &AlignedVerse, testament: Testament) -> Self {
        let letters = testament.column_letters();
        let cells = verse
            .entries
            .iter()
            .filter(|entry| !entry.is_blank())
            .map(|entry| Cell {
                column_class: column_class(&entry.original, letters),
                original: entry.original.clone(),
                translated: entry.translated.join(" "),
            })
            .collect();

        Self {
            reference: verse.reference.to_string(),
            translated_text: verse.translated_text.clone(),
            cells,
            right_to_left: testament.is_right_to_left(),
        }
    }
}

/// Pick a column width for original text given the narrow-column letter budget.
pub fn column_class(original: &str, letters: usize) -> &'static str {
    let len = original.chars().count();
    if len >= 2 * letters {
        layout::WIDE_COLUMN
    } else if len >= letters {
        layout::MEDIUM_COLUMN
    } else {
        layout::NARROW_COLUMN
    }
}

/// Escape text for HTML element content and attribute values.
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Rendering state for one invocation.
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    options: RenderOptions,
}

impl RenderContext {
    /// Create a context with the given options.
    pub const fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render all passes into one HTML document.
    pub fn render(&self, passes: &[InterlinearPass]) -> String {
        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
        let _ = writeln!(html, "<title>{}</title>", escape_html(&self.options.title));
        if let Some(stylesheet) = &self.options.stylesheet {
            let _ = writeln!(html, "<link rel=\"stylesheet\" href=\"{}\">", escape_html(stylesheet));
        }
        html.push_str("</head>\n<body>\n<div class=\"container\">\n");

        for pass in passes {
            self.render_pass(&mut html, pass);
        }

        html.push_str("</div>\n</body>\n</html>\n");
        html
    }

    fn render_pass(&self, html: &mut String, pass: &InterlinearPass) {
        html.push_str("<section class=\"translation\">\n");
        let _ = writeln!(
            html,
            "<h2>{} <small class=\"text-muted\">{} / {}</small></h2>",
            escape_html(pass.testament.name()),
            escape_html(pass.original_edition.as_str()),
            escape_html(pass.translated_edition.as_str())
        );
        for verse in &pass.verses {
            self.render_verse(html, &VerseView::from_aligned(verse, pass.testament));
        }
        html.push_str("</section>\n");
    }

    #[allow(clippy::unused_self)]
    fn render_verse(&self, html: &mut String, view: &VerseView) {
        html.push_str("<div class=\"verse mb-4\">\n");
        let _ = writeln!(html, "<h3 class=\"h5\">{}</h3>", escape_html(&view.reference));

        let row_class = if view.right_to_left {
            format!("row {}", layout::REVERSE_ROW)
        } else {
            "row".to_string()
        };
        let dir = if view.right_to_left { " dir=\"rtl\"" } else { "" };
        let _ = writeln!(html, "<div class=\"{row_class}\">");
        for cell in &view.cells {
            let _ = writeln!(
                html,
                "<div class=\"{} cell\"><div class=\"original\"{dir}>{}</div><div class=\"translated\">{}</div></div>",
                cell.column_class,
                escape_html(&cell.original),
                escape_html(&cell.translated)
            );
        }
        html.push_str("</div>\n");
        let _ = writeln!(html, "<p class=\"translated-text\">{}</p>", escape_html(&view.translated_text));
        html.push_str("</div>\n");
    }
}

/// Serialize passes as pretty JSON.
pub fn render_json(passes: &[InterlinearPass]) -> Result<String> {
    Ok(serde_json::to_string_pretty(passes)?)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::interlinear::AlignedEntry;
    use crate::types::{Edition, VerseReference};

    fn entry(original: &str, translated: &[&str]) -> AlignedEntry {
        AlignedEntry {
            original: original.to_string(),
            original_span: 0..1,
            translated: translated.iter().map(ToString::to_string).collect(),
            translated_index: (!translated.is_empty()).then_some(0),
        }
    }

    fn pass(testament: Testament) -> InterlinearPass {
        InterlinearPass {
            testament,
            key: "John 1:1".into(),
            original_edition: Edition::new("TR"),
            translated_edition: Edition::new("SpaRV1909"),
            verses: vec![AlignedVerse {
                reference: VerseReference::new("John 1:1"),
                entries: vec![entry("en", &["En"]), entry("", &[]), entry("<logos>", &["el", "Verbo"])],
                translated_text: "En el Verbo".into(),
                unused: 0,
            }],
        }
    }

    #[test]
    fn test_column_class_thresholds() {
        assert_eq!(column_class("abc", 12), "col-md-3");
        assert_eq!(column_class(&"a".repeat(12), 12), "col-md-6");
        assert_eq!(column_class(&"a".repeat(24), 12), "col-md-9");
        // Counted in characters, not bytes.
        assert_eq!(column_class(&"א".repeat(11), 12), "col-md-3");
    }

    #[test]
    fn test_view_skips_blank_entries() {
        let p = pass(Testament::New);
        let view = VerseView::from_aligned(&p.verses[0], p.testament);
        assert_eq!(view.cells.len(), 2);
        assert_eq!(view.cells[1].translated, "el Verbo");
        assert!(!view.right_to_left);
    }

    #[test]
    fn test_render_escapes_and_lays_out() {
        let html = RenderContext::default().render(&[pass(Testament::New)]);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("&lt;logos&gt;"));
        assert!(html.contains("TR / SpaRV1909"));
        assert!(!html.contains(layout::REVERSE_ROW));
        assert!(html.contains("<div class=\"row\">"));
    }

    #[test]
    fn test_old_testament_rows_reverse() {
        let html = RenderContext::new(RenderOptions { title: "T".into(), stylesheet: None })
            .render(&[pass(Testament::Old)]);
        assert!(html.contains("<div class=\"row flex-row-reverse\">"));
        assert!(html.contains("dir=\"rtl\""));
        assert!(!html.contains("<link"));
    }

    #[test]
    fn test_render_json() {
        let json = render_json(&[pass(Testament::New)]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["verses"][0]["entries"][2]["translated"][1], "Verbo");
        assert_eq!(value[0]["testament"], "New");
    }
}
