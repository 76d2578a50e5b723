//! Batch runner: one read → migrate → write pass per file, in path order.
//!
//! A malformed file is reported and skipped. Any I/O failure stops the run.

use bcdmap_core::MappingConfig;
use bcdmap_engine::{migrate_document, DocumentReport};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use crate::discover::discover_documents;
use crate::persist::{read_document, write_document};
use crate::CliError;

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Report changes without writing files
    pub dry_run: bool,
}

/// Result of processing a single file
#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub report: DocumentReport,
    pub written: bool,
}

/// Totals for a whole run
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub files: usize,
    pub records: usize,
    /// Records whose destination entry was filled in
    pub changed: usize,
    /// Files rewritten on disk
    pub written: usize,
    pub warnings: usize,
    pub malformed: Vec<PathBuf>,
}

impl RunSummary {
    /// No file failed to parse
    pub fn is_clean(&self) -> bool {
        self.malformed.is_empty()
    }

    pub fn log(&self) {
        info!(
            "{} files, {} support records, {} mapped, {} files written",
            self.files, self.records, self.changed, self.written
        );
        if self.warnings > 0 {
            warn!("{} records left unmodified (unrecognized versions)", self.warnings);
        }
        if !self.malformed.is_empty() {
            error!("{} malformed files skipped", self.malformed.len());
        }
    }

    fn absorb(&mut self, outcome: &FileOutcome) {
        self.records += outcome.report.records;
        self.changed += outcome.report.changed;
        self.warnings += outcome.report.warnings.len();
        if outcome.written {
            self.written += 1;
        }
    }
}

/// Process every candidate file under `root`
pub fn run_batch(
    root: &Path,
    config: &MappingConfig,
    options: RunOptions,
) -> Result<RunSummary, CliError> {
    debug!("Using directory {}", root.display());
    let files = discover_documents(root)?;

    let mut summary = RunSummary {
        files: files.len(),
        ..Default::default()
    };

    for file in &files {
        match process_file(file, config, options) {
            Ok(outcome) => summary.absorb(&outcome),
            Err(CliError::Malformed { path, source }) => {
                error!("Malformed JSON in {}: {}", path.display(), source);
                summary.malformed.push(path);
            }
            Err(err) => {
                error!("Error processing {}", file.display());
                return Err(err);
            }
        }
    }

    Ok(summary)
}

/// Read, migrate and (if anything changed) write back one file
pub fn process_file(
    path: &Path,
    config: &MappingConfig,
    options: RunOptions,
) -> Result<FileOutcome, CliError> {
    debug!("Read file {}", path.display());
    let mut document = read_document(path)?;

    let report = migrate_document(&mut document, config);
    if report.records > 0 {
        info!(
            "Parsing {}: {} of {} records mapped",
            path.display(),
            report.changed,
            report.records
        );
    }

    let written = report.is_modified() && !options.dry_run;
    if written {
        write_document(path, &document)?;
        debug!("Saved {}", path.display());
    } else if report.is_modified() {
        info!("Dry run, not writing {}", path.display());
    }

    Ok(FileOutcome { report, written })
}
