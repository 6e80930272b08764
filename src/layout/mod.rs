mod cursor;
pub mod footer;

use crate::error::Error;
use crate::fonts::{Font, Line, text_width, wrap};
use crate::letterhead::RasterImage;
use crate::model::{ContentBlock, Emphasis, RatingBox};
use crate::sink::{Frame, LineStyle, Sink, TextStyle};

pub use cursor::{Placement, Unit};
use cursor::Cursor;

/// Page size and the fixed anchors of the summary layout, in points measured
/// from the top-left corner.
#[derive(Clone, Debug, PartialEq)]
pub struct PageGeometry {
    pub page_width: f32,
    pub page_height: f32,
    pub margin_left: f32,
    pub content_width: f32,
    /// Cursor position at the top of every page, below the letterhead.
    pub content_top: f32,
    /// No unit may extend below this line.
    pub bottom_limit: f32,
    pub letterhead: Frame,
    pub footer_x: f32,
    pub footer_y: f32,
}

impl Default for PageGeometry {
    /// A4 portrait.
    fn default() -> Self {
        PageGeometry {
            page_width: 595.28,
            page_height: 841.89,
            margin_left: 50.0,
            content_width: 440.0,
            content_top: 90.0,
            bottom_limit: 750.0,
            letterhead: Frame::new(50.0, 20.0, 140.0, 40.0),
            footer_x: 500.0,
            footer_y: 820.0,
        }
    }
}

impl PageGeometry {
    pub fn usable_height(&self) -> f32 {
        self.bottom_limit - self.content_top
    }
}

const BLACK: [u8; 3] = [0, 0, 0];

pub const HEADING_STYLE: TextStyle = TextStyle::new(Font::HelveticaBold, 14.0, [41, 72, 90]);
pub const BODY_STYLE: TextStyle = TextStyle::new(Font::Helvetica, 10.0, BLACK);
pub const RATING_LABEL_STYLE: TextStyle =
    TextStyle::new(Font::HelveticaBold, 11.0, [0, 119, 168]);
pub const RATING_TEXT_STYLE: TextStyle = TextStyle::new(Font::Helvetica, 11.0, BLACK);
pub const LIST_TITLE_STYLE: TextStyle = TextStyle::new(Font::HelveticaBold, 11.0, BLACK);
pub const LIST_ITEM_STYLE: TextStyle = TextStyle::new(Font::Helvetica, 11.0, BLACK);
pub const RULE_STYLE: LineStyle = LineStyle {
    width: 0.5,
    color: [204, 204, 204],
};
pub const BOX_FILL: [u8; 3] = [224, 245, 241];
pub const BULLET_MARKER: &str = "\u{2022} ";

// Reservations (checked against the bottom limit) and advances (cursor moves).
const HEADING_KEEP: f32 = 60.0; // heading + rule + first indicator line
const HEADING_PITCH: f32 = 18.0;
const HEADING_ADVANCE: f32 = 10.0;
const RULE_ADVANCE: f32 = 18.0;
const LINE_NEEDED: f32 = 16.0;
const LINE_PITCH: f32 = 14.0;
const PARAGRAPH_GAP: f32 = 10.0;
const BOX_INSET: f32 = 8.0;
const BOX_LABEL_BASELINE: f32 = 18.0;
const BOX_LABEL_ROW: f32 = 20.0;
const BOX_LINE_PITCH: f32 = 14.0;
const BOX_PAD_BOTTOM: f32 = 6.0;
const BOX_GAP: f32 = 14.0;
const LIST_TITLE_NEEDED: f32 = 20.0;
const LIST_TITLE_ADVANCE: f32 = 14.0;
const BULLET_INSET: f32 = 8.0;
const BULLET_NEEDED: f32 = 18.0;
const BULLET_PITCH: f32 = 16.0;
const LIST_GAP: f32 = 8.0;
const RECORD_GAP: f32 = 20.0;

/// Outcome of one pagination run.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutReport {
    pub page_count: usize,
    pub placements: Vec<Placement>,
}

/// Height of a whole rating box holding `lines` description lines.
pub fn rating_box_height(lines: usize, min_height: f32) -> f32 {
    (BOX_LABEL_ROW + lines as f32 * BOX_LINE_PITCH + BOX_PAD_BOTTOM).max(min_height)
}

/// Lay `blocks` out top to bottom on as many pages as they need.
///
/// Every page starts with the letterhead. Before each atomic unit (a wrapped
/// line, a rule, a rating box, a bullet line) the remaining space is checked
/// and the page is broken if the unit would cross `bottom_limit`, so units are
/// never split across pages. The exceptions are a rating box or a heading
/// taller than a whole page, which are split at line boundaries. Page numbers
/// are not drawn here; see [`footer::stamp_page_numbers`].
pub fn paginate<S: Sink>(
    blocks: &[ContentBlock],
    sink: &mut S,
    geometry: &PageGeometry,
    letterhead: &RasterImage,
) -> Result<LayoutReport, Error> {
    let mut cursor = Cursor::start(sink, geometry, letterhead)?;
    let mut headings = 0usize;

    for block in blocks {
        match block {
            ContentBlock::Heading(text) => {
                if headings > 0 {
                    cursor.advance(RECORD_GAP);
                }
                headings += 1;
                place_heading(&mut cursor, geometry, text)?;
            }
            ContentBlock::Rule => place_rule(&mut cursor, geometry)?,
            ContentBlock::Paragraph {
                text,
                emphasis,
                color,
            } => {
                let font = match emphasis {
                    Emphasis::Regular => Font::Helvetica,
                    Emphasis::Bold => Font::HelveticaBold,
                };
                let style = TextStyle::new(font, BODY_STYLE.size, color.unwrap_or(BLACK));
                place_paragraph(&mut cursor, geometry, text, &style)?;
            }
            ContentBlock::HighlightedBox(rating) => place_rating_box(&mut cursor, geometry, rating)?,
            ContentBlock::BulletList { title, items } => {
                place_bullet_list(&mut cursor, geometry, title, items)?
            }
        }
    }

    let page_count = cursor.sink.page_count();
    log::debug!(
        "paginated {} blocks into {} page(s), {} units",
        blocks.len(),
        page_count,
        cursor.placements.len()
    );
    Ok(LayoutReport {
        page_count,
        placements: cursor.placements,
    })
}

fn place_heading<S: Sink>(
    cursor: &mut Cursor<'_, S>,
    geometry: &PageGeometry,
    text: &str,
) -> Result<(), Error> {
    let lines = wrap(text, geometry.content_width, HEADING_STYLE.spec());
    let last = lines.len() - 1;
    let whole = HEADING_KEEP + last as f32 * HEADING_PITCH;

    // A heading that fits is kept in one piece with its rule. A longer one
    // flows line by line and only its last line is kept with the rule.
    let first_needed = if whole <= geometry.usable_height() {
        whole
    } else {
        log::warn!(
            "heading '{}' needs {:.0}pt but a page holds {:.0}pt; letting it flow across pages",
            lines[0].text,
            whole,
            geometry.usable_height()
        );
        if last == 0 { HEADING_KEEP } else { HEADING_PITCH }
    };

    for (i, line) in lines.iter().enumerate() {
        let y = if i == 0 {
            cursor.reserve(first_needed, Unit::Heading)?
        } else {
            cursor.advance(HEADING_PITCH);
            let needed = if i == last { HEADING_KEEP } else { HEADING_PITCH };
            cursor.reserve(needed, Unit::HeadingLine)?
        };
        cursor
            .sink
            .draw_text(&line.text, geometry.margin_left, y, &HEADING_STYLE);
    }
    cursor.advance(HEADING_ADVANCE);
    Ok(())
}

fn place_rule<S: Sink>(cursor: &mut Cursor<'_, S>, geometry: &PageGeometry) -> Result<(), Error> {
    let y = cursor.reserve(RULE_ADVANCE, Unit::Rule)?;
    cursor.sink.draw_line(
        (geometry.margin_left, y),
        (geometry.margin_left + geometry.content_width, y),
        &RULE_STYLE,
    );
    cursor.advance(RULE_ADVANCE);
    Ok(())
}

fn place_paragraph<S: Sink>(
    cursor: &mut Cursor<'_, S>,
    geometry: &PageGeometry,
    text: &str,
    style: &TextStyle,
) -> Result<(), Error> {
    for line in wrap(text, geometry.content_width, style.spec()) {
        let y = cursor.reserve(LINE_NEEDED, Unit::TextLine)?;
        if !line.text.is_empty() {
            cursor.sink.draw_text(&line.text, geometry.margin_left, y, style);
        }
        cursor.advance(LINE_PITCH);
    }
    cursor.advance(PARAGRAPH_GAP);
    Ok(())
}

fn place_rating_box<S: Sink>(
    cursor: &mut Cursor<'_, S>,
    geometry: &PageGeometry,
    rating: &RatingBox,
) -> Result<(), Error> {
    let inner_width = geometry.content_width - 2.0 * BOX_INSET;
    let lines = if rating.description.trim().is_empty() {
        Vec::new()
    } else {
        wrap(&rating.description, inner_width, RATING_TEXT_STYLE.spec())
    };

    let height = rating_box_height(lines.len(), rating.min_height);
    if height <= geometry.usable_height() {
        let top = cursor.reserve(height, Unit::RatingBox)?;
        draw_box_segment(cursor, geometry, rating, true, &lines, top, height);
        cursor.advance(height + BOX_GAP);
        return Ok(());
    }

    log::warn!(
        "'{}' box needs {:.0}pt but a page holds {:.0}pt; splitting it across pages",
        rating.label,
        height,
        geometry.usable_height()
    );

    let mut rest: &[Line] = &lines;
    let mut first = true;
    loop {
        let head = if first { BOX_LABEL_ROW } else { 0.0 };
        let fit = ((cursor.remaining() - head - BOX_PAD_BOTTOM) / BOX_LINE_PITCH).floor();
        if fit < 1.0 && !cursor.at_page_top() {
            cursor.page_break()?;
            continue;
        }
        let take = (fit.max(1.0) as usize).min(rest.len());
        let (segment, tail) = rest.split_at(take);
        let seg_height = head + take as f32 * BOX_LINE_PITCH + BOX_PAD_BOTTOM;

        let top = cursor.reserve(seg_height, Unit::RatingBoxSegment)?;
        draw_box_segment(cursor, geometry, rating, first, segment, top, seg_height);
        cursor.advance(seg_height);

        rest = tail;
        first = false;
        if rest.is_empty() {
            break;
        }
    }
    cursor.advance(BOX_GAP);
    Ok(())
}

/// Draw the fill (highlighted boxes only) then the text layers of a box or
/// box segment occupying `top..top + height`.
fn draw_box_segment<S: Sink>(
    cursor: &mut Cursor<'_, S>,
    geometry: &PageGeometry,
    rating: &RatingBox,
    with_label: bool,
    lines: &[Line],
    top: f32,
    height: f32,
) {
    if rating.is_highlighted() {
        cursor.sink.draw_rect(
            Frame::new(geometry.margin_left, top, geometry.content_width, height),
            BOX_FILL,
        );
    }

    let x = geometry.margin_left + BOX_INSET;
    let head = if with_label {
        cursor
            .sink
            .draw_text(&rating.label, x, top + BOX_LABEL_BASELINE, &RATING_LABEL_STYLE);
        BOX_LABEL_ROW
    } else {
        0.0
    };
    for (j, line) in lines.iter().enumerate() {
        let y = top + head + (j + 1) as f32 * BOX_LINE_PITCH;
        cursor.sink.draw_text(&line.text, x, y, &RATING_TEXT_STYLE);
    }
}

fn place_bullet_list<S: Sink>(
    cursor: &mut Cursor<'_, S>,
    geometry: &PageGeometry,
    title: &str,
    items: &[String],
) -> Result<(), Error> {
    let y = cursor.reserve(LIST_TITLE_NEEDED, Unit::ListTitle)?;
    cursor
        .sink
        .draw_text(title, geometry.margin_left, y, &LIST_TITLE_STYLE);
    cursor.advance(LIST_TITLE_ADVANCE);

    let spec = LIST_ITEM_STYLE.spec();
    let marker_w = text_width(BULLET_MARKER, spec);
    let x = geometry.margin_left + BULLET_INSET;
    let item_width = geometry.content_width - BULLET_INSET - marker_w;

    for item in items {
        for (i, line) in wrap(item, item_width, spec).iter().enumerate() {
            let y = cursor.reserve(BULLET_NEEDED, Unit::Bullet)?;
            if i == 0 {
                let text = format!("{BULLET_MARKER}{}", line.text);
                cursor.sink.draw_text(&text, x, y, &LIST_ITEM_STYLE);
            } else {
                cursor
                    .sink
                    .draw_text(&line.text, x + marker_w, y, &LIST_ITEM_STYLE);
            }
            cursor.advance(BULLET_PITCH);
        }
    }
    cursor.advance(LIST_GAP);
    Ok(())
}
