//! Rendering entry points.
//!
//! [`render`] lays a plan out into pages without touching the filesystem;
//! [`render_to_bytes`] adds PDF serialisation and [`render_to_file`] writes
//! the result atomically.

use crate::config::RenderConfig;
use crate::error::TripDocError;
use crate::output::RenderedDocument;
use crate::pipeline::{layout, pdf};
use crate::plan::TravelPlan;
use std::io::Write;
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// Lay out `plan` into pages.
///
/// # Errors
/// [`TripDocError::EmptyDestination`] when the plan has no destination.
pub fn render(plan: &TravelPlan, config: &RenderConfig) -> Result<RenderedDocument, TripDocError> {
    let start = Instant::now();
    info!(
        "Rendering travel plan for {} ({} profile)",
        plan.destination.trim(),
        config.profile
    );
    let doc = layout::layout_document(plan, config)?;
    info!(
        "Laid out {} page(s): {} day(s), {} restaurant(s), {} hotel(s) in {:?}",
        doc.stats.pages,
        doc.stats.day_headings,
        doc.stats.restaurants,
        doc.stats.hotels,
        start.elapsed()
    );
    Ok(doc)
}

/// Lay out `plan` and serialise it to PDF bytes.
pub fn render_to_bytes(
    plan: &TravelPlan,
    config: &RenderConfig,
) -> Result<(Vec<u8>, RenderedDocument), TripDocError> {
    let doc = render(plan, config)?;
    let g = &config.geometry;
    let bytes = pdf::write_pdf(&doc, g.width, g.height, config.compress_streams);
    Ok((bytes, doc))
}

/// Render `plan` and write the PDF to `output_path`.
///
/// Uses atomic write (temp file + rename) so an existing document at the
/// path is either fully replaced or left as it was.
pub fn render_to_file(
    plan: &TravelPlan,
    output_path: impl AsRef<Path>,
    config: &RenderConfig,
) -> Result<RenderedDocument, TripDocError> {
    let (bytes, doc) = render_to_bytes(plan, config)?;
    let path = output_path.as_ref();
    let write_err = |source: std::io::Error| TripDocError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(write_err)?;

    let mut tmp = tempfile::NamedTempFile::new_in(parent).map_err(write_err)?;
    tmp.write_all(&bytes).map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;

    info!("Wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_to_bytes_produces_pdf() {
        let plan = TravelPlan::new("Oslo", "Day 1\nMorning: fjord cruise");
        let (bytes, doc) = render_to_bytes(&plan, &RenderConfig::default()).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        assert_eq!(doc.page_count(), 1);
    }

    #[test]
    fn render_to_file_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Travel_Plan.pdf");
        std::fs::write(&path, b"old").unwrap();

        let plan = TravelPlan::new("Oslo", "Day 1");
        render_to_file(&plan, &path, &RenderConfig::default()).unwrap();

        let written = std::fs::read(&path).unwrap();
        assert!(written.starts_with(b"%PDF-"));
        let leftovers = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 1, "temp file left behind");
    }

    #[test]
    fn render_to_file_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/nested/plan.pdf");
        let doc = render_to_file(
            &TravelPlan::new("Oslo", "Day 1"),
            &path,
            &RenderConfig::default(),
        )
        .unwrap();
        assert_eq!(doc.stats.pages, 1);
        assert!(path.exists());
    }

    #[test]
    fn empty_destination_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Travel_Plan.pdf");
        let err = render_to_file(&TravelPlan::new("", "Day 1"), &path, &RenderConfig::default())
            .unwrap_err();
        assert!(matches!(err, TripDocError::EmptyDestination));
        assert!(!path.exists());
    }
}
