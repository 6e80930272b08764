use crate::error::Error;
use crate::letterhead::RasterImage;
use crate::sink::Sink;

use super::PageGeometry;

/// Kind of atomic unit the paginator reserved space for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Unit {
    /// First line of a heading.
    Heading,
    /// Wrapped continuation line of a heading.
    HeadingLine,
    Rule,
    TextLine,
    RatingBox,
    /// Part of a rating box too tall for one page.
    RatingBoxSegment,
    ListTitle,
    Bullet,
}

/// Space reserved for one atomic unit. `top` is the cursor position at the
/// time of reservation; the unit never extends below `top + height`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub page: usize,
    pub top: f32,
    pub height: f32,
    pub unit: Unit,
}

impl Placement {
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// Vertical cursor of a single pagination run.
#[derive(Clone, Copy, Debug)]
struct LayoutState {
    page: usize,
    y: f32,
}

/// Owns the cursor and applies the check-before-place rule: a unit that does
/// not fit below the cursor goes to a fresh page, letterhead first.
pub(super) struct Cursor<'a, S: Sink> {
    pub(super) sink: &'a mut S,
    geometry: &'a PageGeometry,
    letterhead: &'a RasterImage,
    state: LayoutState,
    pub(super) placements: Vec<Placement>,
}

impl<'a, S: Sink> Cursor<'a, S> {
    /// Open the first page and draw its letterhead.
    pub(super) fn start(
        sink: &'a mut S,
        geometry: &'a PageGeometry,
        letterhead: &'a RasterImage,
    ) -> Result<Self, Error> {
        let mut cursor = Cursor {
            sink,
            geometry,
            letterhead,
            state: LayoutState {
                page: 0,
                y: geometry.content_top,
            },
            placements: Vec::new(),
        };
        cursor.open_page()?;
        Ok(cursor)
    }

    fn open_page(&mut self) -> Result<(), Error> {
        self.sink.new_page();
        self.sink
            .draw_image(self.letterhead, self.geometry.letterhead)?;
        self.state.page = self.sink.page_count() - 1;
        self.state.y = self.geometry.content_top;
        Ok(())
    }

    pub(super) fn page_break(&mut self) -> Result<(), Error> {
        log::debug!(
            "page break at y={:.1} on page {}",
            self.state.y,
            self.state.page + 1
        );
        self.open_page()
    }

    pub(super) fn at_page_top(&self) -> bool {
        self.state.y <= self.geometry.content_top
    }

    /// Height left between the cursor and the bottom limit.
    pub(super) fn remaining(&self) -> f32 {
        self.geometry.bottom_limit - self.state.y
    }

    /// Reserve `needed` points for a unit, breaking the page first when it
    /// would cross the bottom limit. Returns the y the unit starts at.
    pub(super) fn reserve(&mut self, needed: f32, unit: Unit) -> Result<f32, Error> {
        if self.state.y + needed > self.geometry.bottom_limit && !self.at_page_top() {
            self.page_break()?;
        }
        let top = self.state.y;
        self.placements.push(Placement {
            page: self.state.page,
            top,
            height: needed,
            unit,
        });
        Ok(top)
    }

    pub(super) fn advance(&mut self, dy: f32) {
        self.state.y += dy;
    }
}
