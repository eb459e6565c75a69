//! Build pipeline: collect -> flatten -> write
//!
//! Every source is parsed before the database is opened, so a malformed
//! document never leaves a partially written table behind.

use std::fmt;
use std::path::{Path, PathBuf};
use crate::Result;
use crate::collect::collect_sources;
use crate::flatten::{flatten_with, DEFAULT_SEPARATOR};
use crate::storage::ParameterStore;

/// Options controlling a build
#[derive(Debug, Clone)]
pub struct BuildOptions {
    pub separator: String,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

/// Summary of a completed build
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub output: PathBuf,
    pub files: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
    pub parameters: usize,
}

impl fmt::Display for BuildReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Build Summary:")?;
        writeln!(f, "  Files read: {}", self.files.len())?;
        writeln!(f, "  Parameters written: {}", self.parameters)?;
        write!(f, "  Skipped inputs: {}", self.skipped.len())
    }
}

/// Convert `sources` into the parameter table at `output`.
pub fn build_database<P: AsRef<Path>>(
    sources: &[P],
    output: &Path,
    options: &BuildOptions,
) -> Result<BuildReport> {
    let collection = collect_sources(sources)?;
    let parameters = flatten_with(&collection.documents, &options.separator);

    tracing::info!("Writing {} parameters to {}", parameters.len(), output.display());
    let mut store = ParameterStore::open(output)?;
    let written = store.write(&parameters)?;
    store.close()?;

    Ok(BuildReport {
        output: output.to_path_buf(),
        files: collection.files,
        skipped: collection.skipped,
        parameters: written,
    })
}
