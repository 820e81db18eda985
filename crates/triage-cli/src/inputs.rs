//! Loading CSV sources from disk

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;
use triage_core::{SourceWorkbook, Table};

/// Load every input path as a source
pub fn load_sources(paths: &[PathBuf]) -> Result<Vec<SourceWorkbook>> {
    paths.iter().map(|path| load_source(path)).collect()
}

/// Load one source
///
/// A directory becomes a source named after the directory holding one
/// table per `*.csv` file, labelled by file stem. A file becomes a source
/// named after the file with a single table labelled by its stem.
pub fn load_source(path: &Path) -> Result<SourceWorkbook> {
    if path.is_dir() {
        load_directory(path)
    } else if path.is_file() {
        let mut source = SourceWorkbook::new(file_name(path));
        source.tables.push(load_table(path)?);
        Ok(source)
    } else {
        bail!("Input not found: {}", path.display())
    }
}

fn load_directory(dir: &Path) -> Result<SourceWorkbook> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && is_csv(path))
        .collect();
    files.sort();

    let mut source = SourceWorkbook::new(file_name(dir));
    for file in &files {
        source.tables.push(load_table(file)?);
    }

    debug!(source = %source.name, tables = source.tables.len(), "Loaded source directory");
    Ok(source)
}

fn load_table(path: &Path) -> Result<(String, Table)> {
    let table = Table::from_csv_path(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let label = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok((label, table))
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
