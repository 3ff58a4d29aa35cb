//! orgtangle CLI - Include-aware tangling for Org documents

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use orgtangle::commands;
use orgtangle::config::{ExtractorKind, Strategy};
use orgtangle::extract::ExtractArgs;
use orgtangle::interface::Context;

#[derive(Parser)]
#[command(name = "orgtangle")]
#[command(author, version, about = "Include-aware tangling for Org documents", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Working directory
    #[arg(short = 'C', long, global = true)]
    directory: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Extraction engine, as accepted on the command line.
#[derive(Clone, Copy, ValueEnum)]
enum CliExtractor {
    Native,
    Emacs,
}

impl From<CliExtractor> for ExtractorKind {
    fn from(kind: CliExtractor) -> Self {
        match kind {
            CliExtractor::Native => ExtractorKind::Native,
            CliExtractor::Emacs => ExtractorKind::Emacs,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve includes and tangle code blocks
    Tangle {
        /// Root documents (default: the configured document)
        #[arg(value_name = "FILE")]
        files: Vec<PathBuf>,

        /// Glob patterns selecting root documents
        #[arg(short, long = "glob", value_name = "PATTERN")]
        globs: Vec<String>,

        /// Only tangle blocks of this language (skips include resolution)
        #[arg(long)]
        lang: Option<String>,

        /// Only tangle into this file (skips include resolution)
        #[arg(long)]
        target: Option<PathBuf>,

        /// Tangle the documents as written, without resolving includes
        #[arg(long)]
        direct: bool,

        /// Remove the composite artifact afterwards
        #[arg(long)]
        delete_artifact: bool,

        /// Extraction engine
        #[arg(long, value_enum)]
        extractor: Option<CliExtractor>,
    },

    /// Print or save the composite document
    Resolve {
        /// Root document
        file: PathBuf,

        /// Output file (default: standard output)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the include tree of a document
    Includes {
        /// Root document
        file: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Determine working directory
    let base_dir = cli
        .directory
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    // Read configuration from file or search for one
    let config = match cli.config {
        Some(ref path) => orgtangle::config::read_config_file(path),
        None => orgtangle::config::read_config(&base_dir),
    };
    let mut config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error reading configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Execute command
    let result = match cli.command {
        Commands::Tangle {
            files,
            globs,
            lang,
            target,
            direct,
            delete_artifact,
            extractor,
        } => {
            if let Some(kind) = extractor {
                config.extractor = kind.into();
            }
            let mut ctx = Context::new(config, base_dir);
            let options = commands::TangleOptions {
                files,
                globs,
                args: ExtractArgs { lang, target },
                strategy: direct.then_some(Strategy::Direct),
                delete_artifact,
            };
            commands::tangle(&mut ctx, options).map(|_| ())
        }

        Commands::Resolve { file, output } => {
            let ctx = Context::new(config, base_dir);
            commands::resolve(&ctx, commands::ResolveOptions { file, output })
        }

        Commands::Includes { file, json } => {
            let ctx = Context::new(config, base_dir);
            commands::includes(&ctx, commands::IncludesOptions { file, json })
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
