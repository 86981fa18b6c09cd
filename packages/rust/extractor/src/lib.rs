//! Curriculum extraction: Drive ids → PDFs → plain text → course lines.
//!
//! This crate provides:
//! - [`DriveClient`]: direct-link document download
//! - [`TextExtractor`] / [`PdfTextExtractor`]: per-page text extraction
//! - [`extract_courses`]: the course line heuristic
//! - [`extract_all`]: the batch job producing a [`CurriculumStore`]

pub mod courses;
pub mod download;
pub mod pdf;

use std::time::{Duration, Instant};

use itmo_advisor_shared::{CurriculumStore, DocumentCourses, DocumentLinkSet, Program, Result};
use tracing::{info, instrument, warn};

pub use courses::{extract_courses, is_course_line};
pub use download::{DEFAULT_DRIVE_BASE_URL, DownloadOptions, DriveClient};
pub use pdf::{PdfTextExtractor, TextExtractor, document_text};

// ---------------------------------------------------------------------------
// Progress reporting
// ---------------------------------------------------------------------------

/// Progress callback for reporting extraction status.
pub trait ProgressReporter: Send + Sync {
    /// Called when starting a program.
    fn program(&self, program: Program, documents: usize);
    /// Called before each document is processed.
    fn document(&self, file_id: &str, current: usize, total: usize);
    /// Called when the batch completes.
    fn done(&self, report: &ExtractReport);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn program(&self, _program: Program, _documents: usize) {}
    fn document(&self, _file_id: &str, _current: usize, _total: usize) {}
    fn done(&self, _report: &ExtractReport) {}
}

// ---------------------------------------------------------------------------
// Batch extraction
// ---------------------------------------------------------------------------

/// Outcome of an extraction run.
#[derive(Debug, Clone)]
pub struct ExtractReport {
    /// Course lines per program; every program of the link set is present.
    pub store: CurriculumStore,
    /// Documents that could not be processed (file id, error message).
    pub failures: Vec<(String, String)>,
    /// Total duration of the run.
    pub duration: Duration,
}

impl ExtractReport {
    /// Number of documents successfully processed.
    pub fn documents(&self) -> usize {
        self.store.values().map(Vec::len).sum()
    }

    /// Number of course lines across all documents.
    pub fn courses(&self) -> usize {
        self.store
            .values()
            .flatten()
            .map(|doc| doc.courses.len())
            .sum()
    }
}

/// Download and extract every document in `links`, one at a time.
///
/// A document that fails to download or decode is logged and left out;
/// the run always completes with whatever was collected.
#[instrument(skip_all, fields(programs = links.len()))]
pub async fn extract_all(
    links: &DocumentLinkSet,
    downloader: &DriveClient,
    extractor: &dyn TextExtractor,
    progress: &dyn ProgressReporter,
) -> ExtractReport {
    let start = Instant::now();
    let total: usize = links.values().map(Vec::len).sum();
    let mut current = 0;
    let mut store = CurriculumStore::new();
    let mut failures = Vec::new();

    info!(documents = total, "starting extraction");

    for (program, ids) in links {
        progress.program(*program, ids.len());
        let entries = store.entry(*program).or_default();

        for file_id in ids {
            current += 1;
            progress.document(file_id, current, total);

            match extract_document(downloader, extractor, file_id).await {
                Ok(doc) => {
                    info!(%program, file_id, courses = doc.courses.len(), "document processed");
                    entries.push(doc);
                }
                Err(e) => {
                    warn!(%program, file_id, error = %e, "failed to process document");
                    failures.push((file_id.clone(), e.to_string()));
                }
            }
        }
    }

    let report = ExtractReport {
        store,
        failures,
        duration: start.elapsed(),
    };

    info!(
        documents = report.documents(),
        courses = report.courses(),
        failures = report.failures.len(),
        duration_ms = report.duration.as_millis(),
        "extraction completed"
    );

    progress.done(&report);
    report
}

/// Download one document and collect its course lines.
pub async fn extract_document(
    downloader: &DriveClient,
    extractor: &dyn TextExtractor,
    file_id: &str,
) -> Result<DocumentCourses> {
    let bytes = downloader.download(file_id).await?;
    let pages = extractor.extract_pages(&bytes)?;
    let text = document_text(&pages);

    Ok(DocumentCourses {
        file_id: file_id.to_string(),
        courses: extract_courses(&text),
    })
}
