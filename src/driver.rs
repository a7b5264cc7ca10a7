//! Resolve input paths into source units and write one `.xml` per unit.

use crate::engine::analyze_source;
use anyhow::{bail, Context, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const SOURCE_EXTENSION: &str = "jack";
pub const OUTPUT_EXTENSION: &str = "xml";

fn is_source_file(path: &Path) -> bool {
    path.is_file() && path.extension().is_some_and(|ext| ext == SOURCE_EXTENSION)
}

/// A `.jack` file resolves to itself; a directory to its direct `.jack`
/// children, sorted by name.
/// # Errors
/// If the path is missing, is some other kind of file, or is a directory
/// without sources.
pub fn resolve_sources(path: &Path) -> Result<Vec<PathBuf>> {
    if !path.exists() {
        bail!("path '{}' does not exist", path.display());
    }

    if path.is_file() {
        if !is_source_file(path) {
            bail!("'{}' is not a .{SOURCE_EXTENSION} file", path.display());
        }
        return Ok(vec![path.to_path_buf()]);
    }

    let mut sources = Vec::new();
    for entry in fs::read_dir(path)
        .with_context(|| format!("failed to read directory '{}'", path.display()))?
    {
        let entry_path = entry?.path();
        if is_source_file(&entry_path) {
            sources.push(entry_path);
        }
    }

    if sources.is_empty() {
        bail!("no .{SOURCE_EXTENSION} files found in '{}'", path.display());
    }

    sources.sort();
    Ok(sources)
}

/// Sibling output path: same directory and stem, `.xml` extension.
pub fn output_path(source: &Path) -> PathBuf {
    source.with_extension(OUTPUT_EXTENSION)
}

/// Remove an output left over from an earlier run, if there is one.
fn remove_stale_output(output: &Path) -> Result<()> {
    match fs::remove_file(output) {
        Ok(()) => {
            warn!(output = %output.display(), "removed stale output");
            Ok(())
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err)
            .with_context(|| format!("failed to remove stale '{}'", output.display())),
    }
}

/// Analyze one file and write its tree next to it. When the unit fails to
/// lex or parse, nothing is written and any earlier output is removed.
/// # Errors
/// On read, analysis or write failure, with the file named in the context.
pub fn analyze_file(source: &Path) -> Result<PathBuf> {
    info!(file = %source.display(), "processing");

    let input = fs::read_to_string(source)
        .with_context(|| format!("failed to read file '{}'", source.display()))?;

    let output = output_path(source);
    let xml = match analyze_source(&input) {
        Ok(xml) => xml,
        Err(err) => {
            remove_stale_output(&output)?;
            return Err(err)
                .with_context(|| format!("failed to analyze '{}'", source.display()));
        }
    };

    fs::write(&output, xml)
        .with_context(|| format!("failed to write '{}'", output.display()))?;

    info!(output = %output.display(), "output written");
    Ok(output)
}

/// Analyze every unit under `path`, stopping at the first failure.
/// # Errors
/// If resolution fails or any unit fails.
pub fn analyze_path(path: &Path) -> Result<Vec<PathBuf>> {
    resolve_sources(path)?
        .iter()
        .map(|source| analyze_file(source))
        .collect()
}
