use anyhow::{Context, Result};
use clap::{Parser as ClapParser, Subcommand};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use jack_analyzer::driver::analyze_path;
use jack_analyzer::engine::analyze_source;
use jack_analyzer::lexer::tokenize;
use jack_analyzer::xml::write_tokens;

#[derive(ClapParser)]
#[command(name = "jack-analyzer")]
#[command(about = "Syntax analyzer for the Jack language", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a .jack file, or every .jack file in a directory, writing .xml siblings
    Analyze {
        /// Input file or directory
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },
    /// Print the token listing of a file
    Tokens {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output file path (defaults to stdout)
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,
    },
    /// Print the parse tree of a file
    Parse {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { path } => {
            let outputs = analyze_path(&path)?;
            tracing::info!(units = outputs.len(), "analysis complete");
        }
        Commands::Tokens { file, output } => tokens_file(&file, output.as_deref())?,
        Commands::Parse { file } => parse_file(&file)?,
    }

    Ok(())
}

fn tokens_file(path: &Path, output: Option<&Path>) -> Result<()> {
    let input = fs::read_to_string(path)
        .with_context(|| format!("failed to read file '{}'", path.display()))?;

    let tokens = tokenize(&input)
        .with_context(|| format!("failed to tokenize '{}'", path.display()))?;

    let mut listing = Vec::new();
    write_tokens(&tokens, &mut listing)?;

    if let Some(output_path) = output {
        fs::write(output_path, &listing)
            .with_context(|| format!("failed to write '{}'", output_path.display()))?;
        tracing::info!(output = %output_path.display(), "token listing written");
    } else {
        io::stdout().write_all(&listing)?;
    }

    Ok(())
}

fn parse_file(path: &Path) -> Result<()> {
    let input = fs::read_to_string(path)
        .with_context(|| format!("failed to read file '{}'", path.display()))?;

    let xml = analyze_source(&input)
        .with_context(|| format!("failed to parse '{}'", path.display()))?;

    print!("{xml}");

    Ok(())
}
