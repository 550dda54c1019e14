//! Dump the tokens (or alignment) of raw corpus text as JSON.
//!
//! Usage:
//!   `cargo run --bin dump_tokens -- oshb.txt`
//!   `cargo run --bin dump_tokens -- oshb.txt --translated spa.txt`

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use interlinear::concordance::extract_all;
use interlinear::corpus::{segment, OrphanPolicy};
use interlinear::services::pass::{align_segmented, check_scope};
use interlinear::types::Edition;

#[derive(Parser, Debug)]
#[command(name = "dump_tokens", about = "Dump annotated tokens or alignments of raw corpus text")]
struct Args {
    /// Raw original-language text, as printed by diatheke.
    original: PathBuf,

    /// Raw translated text to align against the original.
    #[arg(long)]
    translated: Option<PathBuf>,

    /// Fail on text that precedes the first verse header.
    #[arg(long, default_value_t = false)]
    strict_orphans: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let policy = if args.strict_orphans { OrphanPolicy::Reject } else { OrphanPolicy::Bucket };

    let original_raw = fs_err::read_to_string(&args.original)?;
    let original = segment(&original_raw, policy)
        .with_context(|| format!("Failed to segment {}", args.original.display()))?;

    let Some(translated_path) = &args.translated else {
        let sets = extract_all(&original)?;
        println!("{}", serde_json::to_string_pretty(&sets)?);
        return Ok(());
    };

    let translated_raw = fs_err::read_to_string(translated_path)?;
    let translated = segment(&translated_raw, policy)
        .with_context(|| format!("Failed to segment {}", translated_path.display()))?;

    check_scope(
        &original,
        &translated,
        &Edition::new(args.original.display().to_string()),
        &Edition::new(translated_path.display().to_string()),
    )?;

    let verses = align_segmented(&original, &translated)?;
    println!("{}", serde_json::to_string_pretty(&verses)?);
    Ok(())
}
