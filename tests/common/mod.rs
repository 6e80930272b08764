#![allow(dead_code)]

use std::path::PathBuf;

use rubric_pdf::sink::{DisplayList, Page, Sink};
use rubric_pdf::{Assessment, LayoutReport, Level, PageGeometry, RasterImage, RubricRecord};

pub const LETTERHEAD_KEY: &str = "logo.png";

pub fn letterhead() -> RasterImage {
    RasterImage::from_rgb(LETTERHEAD_KEY, 2, 1, vec![41, 72, 90, 255, 255, 255])
        .expect("valid letterhead")
}

pub fn record(domain: &str) -> RubricRecord {
    RubricRecord {
        domain: domain.to_string(),
        indicators: format!("Evidence of {domain} across the curriculum"),
        emerging: format!("{domain} is starting to appear"),
        developing: format!("{domain} is developing in some areas"),
        embedding: format!("{domain} is embedded in most areas"),
        excelling: format!("{domain} is excellent everywhere"),
    }
}

const SENTENCE: &str = "Staff plan sequenced units with clear progression, shared success criteria \
    and regular checks for understanding that inform the next lesson.";

/// `n` domains, each with long indicators, a rating (every fourth left
/// unrated), multi-line evidence and next steps.
pub fn rich_records(n: usize) -> (Vec<RubricRecord>, Assessment) {
    let mut records = Vec::new();
    let mut assessment = Assessment::new();
    for i in 0..n {
        let domain = format!("Domain {}", i + 1);
        let mut r = record(&domain);
        r.indicators = format!("{SENTENCE} {SENTENCE}");
        r.excelling = format!("{SENTENCE} {SENTENCE} {SENTENCE}");
        records.push(r);

        let level = if i % 4 == 3 {
            None
        } else {
            Some(Level::ALL[i % Level::ALL.len()])
        };
        assessment
            .set_rating(&domain, level)
            .set_evidence(&domain, &format!("- {SENTENCE}\n- Used exemplars\n- Book looks"))
            .set_next_steps(&domain, "Moderate with partner school\nShare planning templates");
    }
    (records, assessment)
}

/// Lay out into a display list and return the pages with the report.
pub fn layout_pages(records: &[RubricRecord], assessment: &Assessment) -> (Vec<Page>, LayoutReport) {
    let geometry = PageGeometry::default();
    let mut sink = DisplayList::new();
    let report =
        rubric_pdf::layout_summary(records, assessment, &letterhead(), &geometry, &mut sink)
            .expect("layout");
    (sink.export().expect("export"), report)
}

pub fn all_texts(pages: &[Page]) -> Vec<String> {
    pages
        .iter()
        .flat_map(|p| p.texts().map(|(t, _, _)| t.to_string()))
        .collect()
}

/// Output directory for files written by tests: tests/output/<name>/
pub fn output_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("tests/output").join(name);
    std::fs::create_dir_all(&dir).expect("create output dir");
    dir
}

pub fn png_bytes(width: u32, height: u32, alpha: u8) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([41, 72, 90, alpha]));
    let mut buf = std::io::Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png)
        .expect("encode png");
    buf.into_inner()
}

pub fn count(haystack: &[u8], needle: &[u8]) -> usize {
    haystack.windows(needle.len()).filter(|w| *w == needle).count()
}
