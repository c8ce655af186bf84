//! Figma Content - tone/type text tokens for Figma design systems
//!
//! Generates six tones × six text types of copy for a content entry and
//! writes it into a three-layer token file set (Language, Type, Tone).

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use figma_content::cli::{
    AddArgs, ApplyArgs, CliResult, ConfigArgs, ExitCode, GlobalOptions, InitArgs, ListArgs,
    PreviewArgs, ResolveArgs,
};
use figma_content::constants::APP_BINARY_NAME;

/// Figma Content - tone/type text tokens for Figma design systems
#[derive(Parser, Debug)]
#[command(name = APP_BINARY_NAME, author, version, about, long_about = None)]
struct Cli {
    /// Directory holding the token files (overrides config)
    #[arg(long, global = true, value_name = "DIR")]
    tokens_dir: Option<PathBuf>,

    /// Use a specific config file instead of the platform default
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create missing token files
    Init(InitArgs),
    /// Generate content for entries and apply it
    Add(AddArgs),
    /// Apply a content matrix file
    Apply(ApplyArgs),
    /// Show the tokens a content matrix would produce
    Preview(PreviewArgs),
    /// List existing entries
    List(ListArgs),
    /// Follow one token through the reference chain
    Resolve(ResolveArgs),
    /// Manage configuration
    Config(ConfigArgs),
}

impl Commands {
    fn execute(&self, global: &GlobalOptions) -> CliResult<()> {
        match self {
            Self::Init(args) => args.execute(global),
            Self::Add(args) => args.execute(global),
            Self::Apply(args) => args.execute(global),
            Self::Preview(args) => args.execute(global),
            Self::List(args) => args.execute(global),
            Self::Resolve(args) => args.execute(global),
            Self::Config(args) => args.execute(global),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so --json output stays parseable
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let global = GlobalOptions {
        tokens_dir: cli.tokens_dir,
        config_path: cli.config,
    };

    match cli.command.execute(&global) {
        Ok(()) => std::process::exit(ExitCode::Success.code()),
        Err(err) => {
            eprintln!("Error: {}", err.message);
            std::process::exit(err.code.code());
        }
    }
}
