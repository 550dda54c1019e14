//! `Interlinear` - build a side-by-side interlinear document from Strong's-tagged editions.
//!
//! Writes the document to stdout; diagnostics go to stderr.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{ArgAction, CommandFactory, Parser, ValueEnum};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use interlinear::config::Config;
use interlinear::corpus::OrphanPolicy;
use interlinear::error::Error;
use interlinear::render::{render_json, RenderContext, RenderOptions};
use interlinear::services::pass::{InterlinearBuilder, PassRequest};
use interlinear::services::retrieval::source_from_config;
use interlinear::types::{Edition, Testament};

/// Output document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Bootstrap HTML page.
    Html,
    /// Aligned passes as JSON.
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "interlinear",
    version,
    about = "Link Bible verse translations word for word via Strong's numbers. Writes to STDOUT.",
    long_about = "Link Bible verse translations word for word via Strong's numbers. Writes to STDOUT.\n\
                  Requires diatheke from libsword with the OSHB, TR and SpaRV1909 modules, \
                  unless INTERLINEAR_CORPUS_DIR points at pre-fetched text."
)]
struct Cli {
    /// Old Testament key (e.g. "Gen 1:1-5").
    #[arg(short = 'o', long, value_name = "KEY")]
    ot_key: Option<String>,

    /// New Testament key (e.g. "John 1:1-5").
    #[arg(short = 'n', long, value_name = "KEY")]
    nt_key: Option<String>,

    /// Translated edition to align (default: SpaRV1909).
    #[arg(long, value_name = "EDITION")]
    translation: Option<String>,

    /// Read pre-fetched text from this directory instead of running diatheke.
    #[arg(long, value_name = "DIR")]
    corpus_dir: Option<PathBuf>,

    /// Fail on text that precedes the first verse header.
    #[arg(long, default_value_t = false)]
    strict_orphans: bool,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Html)]
    format: Format,

    /// Document title (HTML only).
    #[arg(long)]
    title: Option<String>,

    /// Diagnostic output on stderr (repeat for more).
    #[arg(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,
}

fn level_from_verbosity(verbosity: u8) -> tracing::metadata::LevelFilter {
    match verbosity {
        0 => tracing::metadata::LevelFilter::WARN,
        1 => tracing::metadata::LevelFilter::INFO,
        _ => tracing::metadata::LevelFilter::DEBUG,
    }
}

fn init_tracing(verbosity: u8) {
    let filter = EnvFilter::builder()
        .with_default_directive(level_from_verbosity(verbosity).into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

/// Command-line flags take precedence over the environment.
fn apply_overrides(cli: &Cli, mut config: Config) -> Config {
    if let Some(translation) = &cli.translation {
        config.translation_edition = Edition::new(translation.as_str());
    }
    if let Some(dir) = &cli.corpus_dir {
        config.corpus_dir = Some(dir.clone());
    }
    if cli.strict_orphans {
        config.orphan_policy = OrphanPolicy::Reject;
    }
    config
}

fn is_usage_error(err: &anyhow::Error) -> bool {
    matches!(err.downcast_ref::<Error>(), Some(Error::NoInputKeys))
}

fn run(cli: &Cli) -> anyhow::Result<String> {
    if cli.ot_key.is_none() && cli.nt_key.is_none() {
        return Err(Error::NoInputKeys.into());
    }

    let config = apply_overrides(cli, Config::load().context("Failed to load configuration")?);

    tracing::info!(
        "{} {} parsing with OT: {:?} and NT: {:?}",
        config.app_name(),
        config.app_version(),
        cli.ot_key,
        cli.nt_key
    );

    let source = source_from_config(&config);
    let builder = InterlinearBuilder::new(source.as_ref(), config.orphan_policy);

    let mut passes = Vec::new();
    for (testament, key) in [(Testament::Old, &cli.ot_key), (Testament::New, &cli.nt_key)] {
        let Some(key) = key else {
            continue;
        };
        let request = PassRequest::new(testament, key.as_str(), config.translation_edition.clone())
            .with_original(config.original_edition(testament).clone());
        let pass = builder
            .build(&request)
            .with_context(|| format!("Failed to build {} pass for {key}", testament.name()))?;
        passes.push(pass);
    }

    match cli.format {
        Format::Html => {
            let mut options = RenderOptions::default();
            if let Some(title) = &cli.title {
                options.title.clone_from(title);
            }
            Ok(RenderContext::new(options).render(&passes))
        }
        Format::Json => Ok(render_json(&passes)?),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(document) => {
            println!("{document}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            if is_usage_error(&err) {
                eprintln!("{err}");
                eprintln!("{}", Cli::command().render_usage());
                return ExitCode::from(2);
            }
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
