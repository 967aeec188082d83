//! PDF assembly with `pdf-writer`.
//!
//! The raster is cut into horizontal bands, one per A4 page. Every page gets
//! the image band inside a 10 mm margin and a centered footer.

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use pdf_writer::{Content, Filter, Finish, Name, Pdf, Rect, Ref, Str};

use super::raster::Raster;
use super::ExportError;

const A4_SHORT: f32 = 595.28;
const A4_LONG: f32 = 841.89;
/// 10 mm in points.
pub const MARGIN: f32 = 28.35;
const FOOTER_SIZE: f32 = 9.0;
pub const FOOTER_TITLE: &str = "Full Report";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub page_width: f32,
    pub page_height: f32,
    /// Points per raster pixel.
    pub scale: f32,
    /// Raster rows that fit on one page.
    pub rows_per_page: u32,
    pub page_count: u32,
}

impl PageLayout {
    /// Landscape when the content is wider than tall, otherwise portrait.
    pub fn for_raster(width: u32, height: u32) -> Self {
        let (page_width, page_height) = if width > height {
            (A4_LONG, A4_SHORT)
        } else {
            (A4_SHORT, A4_LONG)
        };
        let usable_width = page_width - 2.0 * MARGIN;
        let usable_height = page_height - 2.0 * MARGIN;
        let scale = usable_width / width.max(1) as f32;
        let rows_per_page = ((usable_height / scale).floor() as u32).max(1);
        let page_count = height.div_ceil(rows_per_page).max(1);

        Self {
            page_width,
            page_height,
            scale,
            rows_per_page,
            page_count,
        }
    }
}

pub fn footer_text(page: u32, total: u32) -> String {
    format!("Page {page} of {total} | {FOOTER_TITLE}")
}

pub fn build_pdf(raster: &Raster) -> Result<Vec<u8>, ExportError> {
    if raster.width == 0 || raster.height == 0 {
        return Err(ExportError::Pdf("nothing to paginate".into()));
    }
    let expected = raster.width as usize * raster.height as usize * 3;
    if raster.rgb.len() != expected {
        return Err(ExportError::Pdf(format!(
            "raster holds {} bytes, expected {expected}",
            raster.rgb.len()
        )));
    }

    let layout = PageLayout::for_raster(raster.width, raster.height);

    let catalog_id = Ref::new(1);
    let tree_id = Ref::new(2);
    let font_id = Ref::new(3);
    let first_page = 4;
    // Three objects per page: page, content stream, image.
    let page_ids: Vec<Ref> = (0..layout.page_count)
        .map(|idx| Ref::new(first_page + 3 * idx as i32))
        .collect();

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(tree_id);
    pdf.pages(tree_id)
        .kids(page_ids.iter().copied())
        .count(layout.page_count as i32);
    pdf.type1_font(font_id).base_font(Name(b"Helvetica"));

    let image_name = Name(b"Im1");
    let font_name = Name(b"F1");

    for (idx, page_id) in page_ids.iter().enumerate() {
        let content_id = Ref::new(page_id.get() + 1);
        let image_id = Ref::new(page_id.get() + 2);

        let top = idx as u32 * layout.rows_per_page;
        let band_rows = layout.rows_per_page.min(raster.height - top);
        let band = compress(&raster.rows(top, band_rows))?;

        let mut image = pdf.image_xobject(image_id, &band);
        image.filter(Filter::FlateDecode);
        image.width(raster.width as i32);
        image.height(band_rows as i32);
        image.color_space().device_rgb();
        image.bits_per_component(8);
        image.finish();

        let mut page = pdf.page(*page_id);
        page.media_box(Rect::new(0.0, 0.0, layout.page_width, layout.page_height));
        page.parent(tree_id);
        page.contents(content_id);
        let mut resources = page.resources();
        resources.x_objects().pair(image_name, image_id);
        resources.fonts().pair(font_name, font_id);
        resources.finish();
        page.finish();

        let draw_width = raster.width as f32 * layout.scale;
        let draw_height = band_rows as f32 * layout.scale;
        let footer = footer_text(idx as u32 + 1, layout.page_count);
        // Helvetica averages roughly half an em per glyph.
        let footer_width = footer.len() as f32 * FOOTER_SIZE * 0.5;

        let mut content = Content::new();
        content.save_state();
        content.transform([
            draw_width,
            0.0,
            0.0,
            draw_height,
            MARGIN,
            layout.page_height - MARGIN - draw_height,
        ]);
        content.x_object(image_name);
        content.restore_state();

        content.begin_text();
        content.set_font(font_name, FOOTER_SIZE);
        content.set_fill_gray(0.4);
        content.next_line((layout.page_width - footer_width) / 2.0, MARGIN / 2.0);
        content.show(Str(footer.as_bytes()));
        content.end_text();

        pdf.stream(content_id, &content.finish());
    }

    tracing::debug!(pages = layout.page_count, "pdf assembled");
    Ok(pdf.finish())
}

fn compress(bytes: &[u8]) -> Result<Vec<u8>, ExportError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(bytes)
        .map_err(|err| ExportError::Pdf(err.to_string()))?;
    encoder.finish().map_err(|err| ExportError::Pdf(err.to_string()))
}
