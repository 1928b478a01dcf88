//! Generation entry points
//!
//! This module orchestrates the pipeline:
//! 1. Validate options and resolve the template
//! 2. Normalize photos (decode, orient, downscale, re-encode)
//! 3. Paginate, lay out and render to document bytes
//!
//! The CPU-bound stages run on the blocking pool; progress events are
//! reported in pipeline order through the caller's [`ProgressReporter`].

use std::path::Path;

use crate::normalize::normalize_entries;
use crate::options::GenerationOptions;
use crate::progress::{ProgressReporter, ProgressStage};
use crate::render::render_document;
use crate::template::resolve_template;
use crate::types::{ReportEntry, ReportError, Result};

/// Generate a report and return the PDF bytes.
///
/// Stages reported: init, compressing, generating, complete. The
/// file-handling stages belong to [`generate_to_file`].
pub async fn generate(
    entries: &[ReportEntry],
    options: &GenerationOptions,
    reporter: &ProgressReporter,
) -> Result<Vec<u8>> {
    let bytes = generate_bytes(entries, options, reporter).await?;
    reporter.report(ProgressStage::Complete, "PDF generated successfully!");
    Ok(bytes)
}

/// Generate a report and write it to `path`.
pub async fn generate_to_file(
    entries: &[ReportEntry],
    options: &GenerationOptions,
    path: impl AsRef<Path>,
    reporter: &ProgressReporter,
) -> Result<()> {
    let bytes = generate_bytes(entries, options, reporter).await?;

    reporter.report(ProgressStage::Creating, "Creating PDF file...");
    reporter.report(ProgressStage::Sharing, "Preparing to share PDF...");
    tokio::fs::write(path.as_ref(), bytes).await?;

    reporter.report(ProgressStage::Complete, "PDF generated successfully!");
    Ok(())
}

/// Shared pipeline up to the rendered bytes; stops short of the complete
/// stage so the entry points can report their own tail.
async fn generate_bytes(
    entries: &[ReportEntry],
    options: &GenerationOptions,
    reporter: &ProgressReporter,
) -> Result<Vec<u8>> {
    options.validate()?;
    if entries.is_empty() {
        return Err(ReportError::NoEntries);
    }

    reporter.report(ProgressStage::Init, "Starting PDF generation...");
    let template = resolve_template(&options.template);

    let entries = entries.to_vec();
    let header = options.header.clone();
    let include_header = options.include_header;
    let reporter = reporter.clone();

    tokio::task::spawn_blocking(move || {
        let spec = template.spec();
        let photo_count = entries.iter().filter(|entry| entry.photo.is_some()).count();

        if photo_count > 0 {
            reporter.report_count(
                ProgressStage::Compressing,
                "Processing images...",
                0,
                0,
                photo_count,
            );
        }
        let processed = normalize_entries(&entries, &reporter);
        if photo_count > 0 {
            reporter.report_count(
                ProgressStage::Compressing,
                "Image processing complete.",
                100,
                photo_count,
                photo_count,
            );
        }

        reporter.report(ProgressStage::Generating, "Generating PDF content...");
        render_document(&processed, &header, spec, include_header)
    })
    .await?
}
