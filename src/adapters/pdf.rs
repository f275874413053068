use crate::domain::model::CropRect;
use crate::domain::ports::DocumentEngine;
use crate::utils::error::{Result, WatchError};
use image::DynamicImage;
use pdfium_render::prelude::*;
use std::io::Cursor;

/// Pdfium-backed document engine. Looks for the pdfium library next to the
/// executable first, then falls back to the system library.
pub struct PdfiumEngine {
    pdfium: Pdfium,
}

impl PdfiumEngine {
    pub fn new() -> Result<Self> {
        let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library())
            .map_err(|e| WatchError::document(format!("failed to bind pdfium: {:?}", e)))?;

        Ok(Self {
            pdfium: Pdfium::new(bindings),
        })
    }

    fn load_page_text(&self, document: &[u8], page_index: usize) -> Result<String> {
        let document = self
            .pdfium
            .load_pdf_from_byte_slice(document, None)
            .map_err(|e| WatchError::document(format!("failed to open document: {:?}", e)))?;

        let page = document
            .pages()
            .get(page_index as u16)
            .map_err(|e| WatchError::document(format!("no page {}: {:?}", page_index, e)))?;

        let text = page
            .text()
            .map_err(|e| WatchError::document(format!("text extraction failed: {:?}", e)))?
            .all();

        Ok(text)
    }
}

impl DocumentEngine for PdfiumEngine {
    fn text_blocks(&self, document: &[u8], page_index: usize) -> Result<Vec<String>> {
        let text = self.load_page_text(document, page_index)?;
        Ok(split_blocks(&text))
    }

    fn render_region(
        &self,
        document: &[u8],
        page_index: usize,
        rect: CropRect,
        zoom: f32,
    ) -> Result<Vec<u8>> {
        let document = self
            .pdfium
            .load_pdf_from_byte_slice(document, None)
            .map_err(|e| WatchError::document(format!("failed to open document: {:?}", e)))?;

        let page = document
            .pages()
            .get(page_index as u16)
            .map_err(|e| WatchError::document(format!("no page {}: {:?}", page_index, e)))?;

        let config = PdfRenderConfig::new().scale_page_by_factor(zoom);
        let bitmap = page
            .render_with_config(&config)
            .map_err(|e| WatchError::document(format!("page render failed: {:?}", e)))?;

        let width = bitmap.width() as u32;
        let height = bitmap.height() as u32;
        let pixels = bitmap.as_rgba_bytes();
        let image = image::RgbaImage::from_raw(width, height, pixels)
            .ok_or_else(|| WatchError::document("bitmap size mismatch".to_string()))?;

        let cropped = crop_scaled(DynamicImage::ImageRgba8(image), rect, zoom);

        let mut png = Vec::new();
        cropped.write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)?;
        Ok(png)
    }
}

/// Applies the document-space crop to an already-zoomed raster. The rect is
/// in document points, so it scales by the same zoom factor as the page.
fn crop_scaled(image: DynamicImage, rect: CropRect, zoom: f32) -> DynamicImage {
    let x = ((rect.x0 * zoom).max(0.0) as u32).min(image.width());
    let y = ((rect.y0 * zoom).max(0.0) as u32).min(image.height());
    let w = ((rect.width() * zoom) as u32).min(image.width() - x);
    let h = ((rect.height() * zoom) as u32).min(image.height() - y);
    image.crop_imm(x, y, w, h)
}

/// Groups page text into block-level regions: consecutive non-blank lines
/// form a block, blank lines separate blocks.
fn split_blocks(text: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current = String::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            if !current.is_empty() {
                current.push('\n');
            }
            current.push_str(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
}
