use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, Str, TextStr};

use crate::error::Error;
use crate::fonts::{Font, to_winansi_bytes};
use crate::letterhead::RasterImage;
use crate::sink::{Frame, LineStyle, PageStamp, Sink, TextStyle};

struct PageBuffer {
    content: Content,
    stamp: Option<PageStamp>,
}

/// Sink that writes a PDF. Each page keeps its own content stream until
/// `export`, so earlier pages can still be selected and stamped after layout.
pub struct PdfSink {
    page_width: f32,
    page_height: f32,
    title: Option<String>,
    pages: Vec<PageBuffer>,
    current: usize,
    /// Images in order of first use; embedded once, shared by every page.
    images: Vec<RasterImage>,
}

fn rgb(color: [u8; 3]) -> (f32, f32, f32) {
    (
        color[0] as f32 / 255.0,
        color[1] as f32 / 255.0,
        color[2] as f32 / 255.0,
    )
}

fn image_name(index: usize) -> String {
    format!("Im{}", index + 1)
}

/// Emit one text run with its baseline at `baseline_y` (PDF coordinates).
fn show_text(content: &mut Content, text: &str, x: f32, baseline_y: f32, style: &TextStyle) {
    let (r, g, b) = rgb(style.color);
    content.begin_text();
    content.set_fill_rgb(r, g, b);
    content.set_font(Name(style.font.pdf_name().as_bytes()), style.size);
    content.next_line(x, baseline_y);
    content.show(Str(&to_winansi_bytes(text)));
    content.end_text();
}

impl PdfSink {
    pub fn new(page_width: f32, page_height: f32) -> Self {
        PdfSink {
            page_width,
            page_height,
            title: None,
            pages: Vec::new(),
            current: 0,
            images: Vec::new(),
        }
    }

    /// Set the document info title.
    pub fn set_title(&mut self, title: &str) -> &mut Self {
        self.title = Some(title.to_string());
        self
    }

    /// Flip a top-down y coordinate into PDF's bottom-up space.
    fn flip(&self, y: f32) -> f32 {
        self.page_height - y
    }

    fn content(&mut self) -> Option<&mut Content> {
        let page = self.pages.get_mut(self.current);
        if page.is_none() {
            log::warn!("draw command with no open page dropped");
        }
        page.map(|p| &mut p.content)
    }

    fn register_image(&mut self, image: &RasterImage) -> Result<String, Error> {
        if let Some(idx) = self.images.iter().position(|i| i.key == image.key) {
            return Ok(image_name(idx));
        }
        image.validate()?;
        self.images.push(image.clone());
        Ok(image_name(self.images.len() - 1))
    }
}

impl Sink for PdfSink {
    type Artifact = Vec<u8>;

    fn new_page(&mut self) {
        self.pages.push(PageBuffer {
            content: Content::new(),
            stamp: None,
        });
        self.current = self.pages.len() - 1;
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle) {
        let baseline_y = self.flip(y);
        if let Some(content) = self.content() {
            show_text(content, text, x, baseline_y, style);
        }
    }

    fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), style: &LineStyle) {
        let (y1, y2) = (self.flip(from.1), self.flip(to.1));
        let (r, g, b) = rgb(style.color);
        if let Some(content) = self.content() {
            content.save_state();
            content.set_stroke_rgb(r, g, b);
            content.set_line_width(style.width);
            content.move_to(from.0, y1);
            content.line_to(to.0, y2);
            content.stroke();
            content.restore_state();
        }
    }

    fn draw_rect(&mut self, frame: Frame, fill: [u8; 3]) {
        let y_bottom = self.flip(frame.bottom());
        let (r, g, b) = rgb(fill);
        if let Some(content) = self.content() {
            content.save_state();
            content.set_fill_rgb(r, g, b);
            content.rect(frame.x, y_bottom, frame.width, frame.height);
            content.fill_nonzero();
            content.restore_state();
        }
    }

    fn draw_image(&mut self, image: &RasterImage, frame: Frame) -> Result<(), Error> {
        let name = self.register_image(image)?;
        let y_bottom = self.flip(frame.bottom());
        if let Some(content) = self.content() {
            content.save_state();
            content.transform([frame.width, 0.0, 0.0, frame.height, frame.x, y_bottom]);
            content.x_object(Name(name.as_bytes()));
            content.restore_state();
        }
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

    fn export(self) -> Result<Vec<u8>, Error> {
        let t0 = std::time::Instant::now();
        let mut pdf = Pdf::new();
        let mut next_id = 1i32;
        let mut alloc = || {
            let r = Ref::new(next_id);
            next_id += 1;
            r
        };

        let catalog_id = alloc();
        let pages_id = alloc();

        let mut font_refs: Vec<(Font, Ref)> = Vec::new();
        for font in Font::ALL {
            let font_ref = alloc();
            pdf.type1_font(font_ref)
                .base_font(Name(font.base_font().as_bytes()))
                .encoding_predefined(Name(b"WinAnsiEncoding"));
            font_refs.push((font, font_ref));
        }

        let mut image_xobjects: Vec<(String, Ref)> = Vec::new();
        for (idx, img) in self.images.iter().enumerate() {
            let xobj_ref = alloc();
            let smask_ref = match &img.alpha {
                Some(alpha) => {
                    let compressed_alpha = miniz_oxide::deflate::compress_to_vec_zlib(alpha, 6);
                    let mask_ref = alloc();
                    let mut mask = pdf.image_xobject(mask_ref, &compressed_alpha);
                    mask.filter(Filter::FlateDecode);
                    mask.width(img.width as i32);
                    mask.height(img.height as i32);
                    mask.color_space().device_gray();
                    mask.bits_per_component(8);
                    Some(mask_ref)
                }
                None => None,
            };

            let compressed_rgb = miniz_oxide::deflate::compress_to_vec_zlib(&img.rgb, 6);
            let mut xobj = pdf.image_xobject(xobj_ref, &compressed_rgb);
            xobj.filter(Filter::FlateDecode);
            xobj.width(img.width as i32);
            xobj.height(img.height as i32);
            xobj.color_space().device_rgb();
            xobj.bits_per_component(8);
            if let Some(mask_ref) = smask_ref {
                xobj.s_mask(mask_ref);
            }
            image_xobjects.push((image_name(idx), xobj_ref));
        }

        let n = self.pages.len();
        let page_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();
        let content_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();
        let info_id = self.title.as_ref().map(|_| alloc());

        let page_height = self.page_height;
        for (i, page) in self.pages.into_iter().enumerate() {
            let mut content = page.content;
            if let Some(stamp) = &page.stamp {
                show_text(&mut content, &stamp.text, stamp.x, page_height - stamp.y, &stamp.style);
            }
            let raw = content.finish();
            let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
            pdf.stream(content_ids[i], &compressed).filter(Filter::FlateDecode);
        }

        pdf.catalog(catalog_id).pages(pages_id);
        pdf.pages(pages_id)
            .kids(page_ids.iter().copied())
            .count(n as i32);

        for i in 0..n {
            let mut page = pdf.page(page_ids[i]);
            page.media_box(Rect::new(0.0, 0.0, self.page_width, page_height))
                .parent(pages_id)
                .contents(content_ids[i]);
            {
                let mut resources = page.resources();
                {
                    let mut fonts = resources.fonts();
                    for (font, font_ref) in &font_refs {
                        fonts.pair(Name(font.pdf_name().as_bytes()), *font_ref);
                    }
                }
                if !image_xobjects.is_empty() {
                    let mut xobjects = resources.x_objects();
                    for (name, xobj_ref) in &image_xobjects {
                        xobjects.pair(Name(name.as_bytes()), *xobj_ref);
                    }
                }
            }
        }

        if let (Some(info_id), Some(title)) = (info_id, &self.title) {
            pdf.document_info(info_id).title(TextStr(title));
        }

        let bytes = pdf.finish();
        log::debug!(
            "pdf export: {} page(s), {} image(s), {} bytes in {:.1}ms",
            n,
            image_xobjects.len(),
            bytes.len(),
            t0.elapsed().as_secs_f64() * 1000.0,
        );
        Ok(bytes)
    }
}
