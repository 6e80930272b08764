use std::path::Path;

use crate::error::Error;

/// Decoded 8-bit RGB image with an optional alpha channel, ready to embed.
#[derive(Clone, Debug, PartialEq)]
pub struct RasterImage {
    /// Identifies the image across pages so it is embedded once.
    pub key: String,
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
    pub alpha: Option<Vec<u8>>,
}

impl RasterImage {
    pub fn from_rgb(key: &str, width: u32, height: u32, rgb: Vec<u8>) -> Result<Self, Error> {
        let image = RasterImage {
            key: key.to_string(),
            width,
            height,
            rgb,
            alpha: None,
        };
        image.validate()?;
        Ok(image)
    }

    pub fn from_png(key: &str, data: &[u8]) -> Result<Self, Error> {
        let cursor = std::io::Cursor::new(data);
        let reader =
            image::ImageReader::with_format(std::io::BufReader::new(cursor), image::ImageFormat::Png);
        let decoded = reader
            .decode()
            .map_err(|e| Error::asset(format!("cannot decode '{key}'"), e))?;

        let rgba: image::RgbaImage = decoded.to_rgba8();
        let (w, h) = (rgba.width(), rgba.height());
        let has_alpha = rgba.pixels().any(|p| p.0[3] < 255);

        let rgb: Vec<u8> = rgba
            .pixels()
            .flat_map(|p| [p.0[0], p.0[1], p.0[2]])
            .collect();
        let alpha = has_alpha.then(|| rgba.pixels().map(|p| p.0[3]).collect());

        let image = RasterImage {
            key: key.to_string(),
            width: w,
            height: h,
            rgb,
            alpha,
        };
        image.validate()?;
        log::debug!("letterhead '{key}': {w}x{h} px, alpha={has_alpha}");
        Ok(image)
    }

    /// Check that the pixel buffers match the declared dimensions.
    pub fn validate(&self) -> Result<(), Error> {
        let pixels = self.width as usize * self.height as usize;
        if pixels == 0 {
            return Err(Error::asset(&self.key, "image has no pixels"));
        }
        if self.rgb.len() != pixels * 3 {
            return Err(Error::asset(
                &self.key,
                format!("expected {} RGB bytes, found {}", pixels * 3, self.rgb.len()),
            ));
        }
        if let Some(alpha) = &self.alpha {
            if alpha.len() != pixels {
                return Err(Error::asset(
                    &self.key,
                    format!("expected {} alpha bytes, found {}", pixels, alpha.len()),
                ));
            }
        }
        Ok(())
    }
}

/// Read and decode the letterhead PNG drawn at the top of every page.
pub fn load(path: &Path) -> Result<RasterImage, Error> {
    let data = std::fs::read(path)
        .map_err(|e| Error::asset(format!("cannot read {}", path.display()), e))?;
    let key = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("letterhead");
    RasterImage::from_png(key, &data)
}
