use crate::error::Error;
use crate::fonts::Font;
use crate::sink::{PageStamp, Sink, TextStyle};

use super::PageGeometry;

pub const FOOTER_STYLE: TextStyle = TextStyle::new(Font::Helvetica, 9.0, [150, 150, 150]);

pub fn page_label(page_num: usize, total_pages: usize) -> String {
    format!("Page {page_num} of {total_pages}")
}

/// Second pass over a fully paginated sink: stamp "Page i of N" into every
/// page's footer slot. The total is only known once layout has finished.
/// Stamps replace earlier ones, so running this again changes nothing.
pub fn stamp_page_numbers<S: Sink>(sink: &mut S, geometry: &PageGeometry) -> Result<(), Error> {
    let total_pages = sink.page_count();
    for page_idx in 0..total_pages {
        sink.select_page(page_idx)?;
        sink.stamp(PageStamp {
            text: page_label(page_idx + 1, total_pages),
            x: geometry.footer_x,
            y: geometry.footer_y,
            style: FOOTER_STYLE,
        });
    }
    log::debug!("stamped page numbers on {total_pages} page(s)");
    Ok(())
}
