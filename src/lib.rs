mod error;

pub mod assessment;
pub mod content;
pub mod fonts;
pub mod layout;
pub mod letterhead;
pub mod model;
pub mod pdf;
pub mod rubric;
pub mod sink;

pub use assessment::{Assessment, AssessmentSource};
pub use error::Error;
pub use layout::{LayoutReport, PageGeometry};
pub use letterhead::RasterImage;
pub use model::{ContentBlock, Level, RubricRecord};

use std::path::Path;
use std::time::Instant;

use pdf::PdfSink;
use sink::Sink;

/// File name the summary is saved under when none is given.
pub const DEFAULT_OUTPUT_NAME: &str = "Curriculum_Rubric_Summary.pdf";
pub const DOCUMENT_TITLE: &str = "Curriculum Rubric Summary";

/// Build the content model for `records`, paginate it into `sink` and stamp
/// page numbers. The sink is left ready for `export`.
pub fn layout_summary<A, S>(
    records: &[RubricRecord],
    assessment: &A,
    letterhead: &RasterImage,
    geometry: &PageGeometry,
    sink: &mut S,
) -> Result<LayoutReport, Error>
where
    A: AssessmentSource + ?Sized,
    S: Sink,
{
    let blocks = content::build(records, assessment);
    let report = layout::paginate(&blocks, sink, geometry, letterhead)?;
    layout::footer::stamp_page_numbers(sink, geometry)?;
    Ok(report)
}

/// Render the summary PDF in memory.
pub fn render_summary<A>(
    records: &[RubricRecord],
    assessment: &A,
    letterhead: &RasterImage,
) -> Result<Vec<u8>, Error>
where
    A: AssessmentSource + ?Sized,
{
    let t0 = Instant::now();
    let geometry = PageGeometry::default();
    let mut sink = PdfSink::new(geometry.page_width, geometry.page_height);
    sink.set_title(DOCUMENT_TITLE);

    let report = layout_summary(records, assessment, letterhead, &geometry, &mut sink)?;
    let t_layout = t0.elapsed();

    let bytes = sink.export()?;
    let t_total = t0.elapsed();

    log::info!(
        "Rendered {} page(s): layout={:.1}ms, export={:.1}ms",
        report.page_count,
        t_layout.as_secs_f64() * 1000.0,
        (t_total - t_layout).as_secs_f64() * 1000.0,
    );
    Ok(bytes)
}

/// Read the rubric CSV, the optional assessment JSON and the letterhead PNG,
/// then write the summary PDF to `output`.
pub fn export_summary(
    rubric_path: &Path,
    assessment_path: Option<&Path>,
    letterhead_path: &Path,
    output: &Path,
) -> Result<(), Error> {
    let t0 = Instant::now();

    let records = rubric::parse(rubric_path)?;
    let assessment = match assessment_path {
        Some(path) => Assessment::load(path)?,
        None => Assessment::new(),
    };
    let letterhead = letterhead::load(letterhead_path)?;
    let t_load = t0.elapsed();

    let bytes = render_summary(&records, &assessment, &letterhead)?;
    let t_render = t0.elapsed();

    std::fs::write(output, &bytes).map_err(Error::Io)?;
    let t_total = t0.elapsed();

    log::info!(
        "Timing: load={:.1}ms, render={:.1}ms, write={:.1}ms, total={:.1}ms (output {} bytes)",
        t_load.as_secs_f64() * 1000.0,
        (t_render - t_load).as_secs_f64() * 1000.0,
        (t_total - t_render).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        bytes.len(),
    );

    Ok(())
}
