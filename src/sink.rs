//! Drawing surface the paginator writes to.
//!
//! Coordinates are in points with the origin at the top-left corner of the
//! page and y growing downwards. Text is positioned by its baseline.

use crate::error::Error;
use crate::fonts::{Font, FontSpec};
use crate::letterhead::RasterImage;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub font: Font,
    pub size: f32,
    pub color: [u8; 3],
}

impl TextStyle {
    pub const fn new(font: Font, size: f32, color: [u8; 3]) -> Self {
        TextStyle { font, size, color }
    }

    pub fn spec(&self) -> FontSpec {
        FontSpec::new(self.font, self.size)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineStyle {
    pub width: f32,
    pub color: [u8; 3],
}

/// Axis-aligned box; (x, y) is the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Frame {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Frame {
            x,
            y,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Text reserved for the page-number slot. Each page holds at most one;
/// stamping again replaces it.
#[derive(Clone, Debug, PartialEq)]
pub struct PageStamp {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub style: TextStyle,
}

pub trait Sink {
    type Artifact;

    /// Append a page and make it the target of subsequent drawing.
    fn new_page(&mut self);
    fn draw_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle);
    fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), style: &LineStyle);
    fn draw_rect(&mut self, frame: Frame, fill: [u8; 3]);
    fn draw_image(&mut self, image: &RasterImage, frame: Frame) -> Result<(), Error>;
    fn page_count(&self) -> usize;
    /// Retarget drawing at an existing page (0-based).
    fn select_page(&mut self, index: usize) -> Result<(), Error>;
    /// Fill the page-number slot of the selected page.
    fn stamp(&mut self, stamp: PageStamp);
    fn export(self) -> Result<Self::Artifact, Error>
    where
        Self: Sized;
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Text {
        text: String,
        x: f32,
        y: f32,
        style: TextStyle,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
        style: LineStyle,
    },
    Rect {
        frame: Frame,
        fill: [u8; 3],
    },
    Image {
        key: String,
        frame: Frame,
    },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Page {
    pub commands: Vec<DrawCommand>,
    pub stamp: Option<PageStamp>,
}

impl Page {
    pub fn texts(&self) -> impl Iterator<Item = (&str, f32, f32)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, x, y, .. } => Some((text.as_str(), *x, *y)),
            _ => None,
        })
    }

    pub fn images(&self) -> impl Iterator<Item = (&str, &Frame)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Image { key, frame } => Some((key.as_str(), frame)),
            _ => None,
        })
    }

    pub fn rects(&self) -> impl Iterator<Item = (&Frame, [u8; 3])> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Rect { frame, fill } => Some((frame, *fill)),
            _ => None,
        })
    }
}

/// In-memory sink that records draw commands per page. Used for previews and
/// for checking layout decisions without producing a PDF.
#[derive(Debug, Default)]
pub struct DisplayList {
    pages: Vec<Page>,
    current: usize,
}

impl DisplayList {
    pub fn new() -> Self {
        DisplayList::default()
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    fn push(&mut self, command: DrawCommand) {
        match self.pages.get_mut(self.current) {
            Some(page) => page.commands.push(command),
            None => log::warn!("draw command with no open page dropped"),
        }
    }
}

impl Sink for DisplayList {
    type Artifact = Vec<Page>;

    fn new_page(&mut self) {
        self.pages.push(Page::default());
        self.current = self.pages.len() - 1;
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle) {
        self.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
            style: *style,
        });
    }

    fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), style: &LineStyle) {
        self.push(DrawCommand::Line {
            from,
            to,
            style: *style,
        });
    }

    fn draw_rect(&mut self, frame: Frame, fill: [u8; 3]) {
        self.push(DrawCommand::Rect { frame, fill });
    }

    fn draw_image(&mut self, image: &RasterImage, frame: Frame) -> Result<(), Error> {
        image.validate()?;
        self.push(DrawCommand::Image {
            key: image.key.clone(),
            frame,
        });
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn select_page(&mut self, index: usize) -> Result<(), Error> {
        if index >= self.pages.len() {
            return Err(Error::PageOutOfRange {
                index,
                count: self.pages.len(),
            });
        }
        self.current = index;
        Ok(())
    }

    fn stamp(&mut self, stamp: PageStamp) {
        match self.pages.get_mut(self.current) {
            Some(page) => page.stamp = Some(stamp),
            None => log::warn!("page stamp with no open page dropped"),
        }
    }

    fn export(self) -> Result<Vec<Page>, Error> {
        Ok(self.pages)
    }
}
