//! SVG to RGB raster.
//!
//! Desktop renders with resvg. The browser draws the SVG onto an off-screen
//! canvas and reads the pixels back.

use super::ExportError;

/// Device pixels per SVG unit.
pub const RENDER_SCALE: f32 = 2.0;

/// Largest raster either renderer will allocate, in pixels.
pub const MAX_RASTER_PIXELS: u64 = 40_000_000;

/// Refuse sizes whose buffer would exceed [`MAX_RASTER_PIXELS`].
pub fn check_pixel_budget(width: u32, height: u32) -> Result<(), ExportError> {
    let pixels = u64::from(width) * u64::from(height);
    if pixels > MAX_RASTER_PIXELS {
        return Err(ExportError::Render(format!(
            "report is too large to render ({width}x{height} px)"
        )));
    }
    Ok(())
}

/// Opaque 8-bit RGB pixels, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
}

impl Raster {
    /// Copy rows `[top, top + rows)`.
    pub fn rows(&self, top: u32, rows: u32) -> Vec<u8> {
        let stride = self.width as usize * 3;
        let start = (top as usize * stride).min(self.rgb.len());
        let end = ((top + rows) as usize * stride).min(self.rgb.len());
        self.rgb[start..end].to_vec()
    }
}

/// Drop alpha, compositing straight (non-premultiplied) RGBA over white.
pub fn rgba_over_white(rgba: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(rgba.len() / 4 * 3);
    for px in rgba.chunks_exact(4) {
        let alpha = u16::from(px[3]);
        for channel in &px[..3] {
            let blended = (u16::from(*channel) * alpha + 255 * (255 - alpha)) / 255;
            rgb.push(blended as u8);
        }
    }
    rgb
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn rasterize(svg: &str, scale: f32) -> Result<Raster, ExportError> {
    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &options)
        .map_err(|err| ExportError::Render(format!("invalid report markup: {err}")))?;
    let size = tree
        .size()
        .to_int_size()
        .scale_by(scale)
        .ok_or_else(|| ExportError::Render("report has no area".into()))?;
    check_pixel_budget(size.width(), size.height())?;

    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| ExportError::Render("unable to allocate canvas".into()))?;
    pixmap.fill(tiny_skia::Color::WHITE);
    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );

    // The background is opaque, so premultiplied and straight channels agree.
    let rgb = pixmap
        .data()
        .chunks_exact(4)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();

    tracing::debug!(width = size.width(), height = size.height(), "report rasterized");
    Ok(Raster {
        width: size.width(),
        height: size.height(),
        rgb,
    })
}

#[cfg(target_arch = "wasm32")]
pub async fn rasterize(svg: &str, scale: f32) -> Result<Raster, ExportError> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

    let render_err = |msg: &str| ExportError::Render(msg.to_string());

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| render_err("document unavailable"))?;

    let image = HtmlImageElement::new().map_err(|_| render_err("unable to create image"))?;
    let loaded = js_sys::Promise::new(&mut |resolve, reject| {
        image.set_onload(Some(&resolve));
        image.set_onerror(Some(&reject));
    });
    let encoded = String::from(js_sys::encode_uri_component(svg));
    image.set_src(&format!("data:image/svg+xml;charset=utf-8,{encoded}"));
    JsFuture::from(loaded)
        .await
        .map_err(|_| render_err("the browser could not load the report markup"))?;

    let width = ((image.natural_width() as f32) * scale).round() as u32;
    let height = ((image.natural_height() as f32) * scale).round() as u32;
    if width == 0 || height == 0 {
        return Err(render_err("report has no area"));
    }
    check_pixel_budget(width, height)?;

    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|_| render_err("unable to create canvas"))?
        .dyn_into()
        .map_err(|_| render_err("canvas cast failed"))?;
    canvas.set_width(width);
    canvas.set_height(height);

    let context: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(|_| render_err("2d context unavailable"))?
        .ok_or_else(|| render_err("2d context unavailable"))?
        .dyn_into()
        .map_err(|_| render_err("2d context cast failed"))?;
    context
        .draw_image_with_html_image_element_and_dw_and_dh(&image, 0.0, 0.0, width as f64, height as f64)
        .map_err(|_| render_err("unable to draw report"))?;

    let pixels = context
        .get_image_data(0.0, 0.0, width as f64, height as f64)
        .map_err(|_| render_err("unable to read canvas pixels"))?
        .data();

    Ok(Raster {
        width,
        height,
        rgb: rgba_over_white(&pixels.0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transparent_pixels_become_white() {
        let rgba = [0, 0, 0, 0, 10, 20, 30, 255, 0, 0, 0, 128];
        let rgb = rgba_over_white(&rgba);
        assert_eq!(&rgb[..3], &[255, 255, 255]);
        assert_eq!(&rgb[3..6], &[10, 20, 30]);
        assert_eq!(&rgb[6..9], &[127, 127, 127]);
    }

    #[test]
    fn row_slices_clamp_to_the_image() {
        let raster = Raster {
            width: 2,
            height: 3,
            rgb: (0..18).collect(),
        };
        assert_eq!(raster.rows(1, 1), (6..12).collect::<Vec<u8>>());
        assert_eq!(raster.rows(2, 5), (12..18).collect::<Vec<u8>>());
    }

    #[test]
    fn pixel_budget_rejects_oversized_reports() {
        assert!(check_pixel_budget(1600, 12_000).is_ok());
        assert!(check_pixel_budget(0, u32::MAX).is_ok());
        assert!(matches!(
            check_pixel_budget(2400, 20_000),
            Err(ExportError::Render(_))
        ));
        assert!(matches!(
            check_pixel_budget(u32::MAX, u32::MAX),
            Err(ExportError::Render(_))
        ));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn tall_markup_is_refused_before_allocating() {
        let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" width="1200" height="50000"><rect width="10" height="10"/></svg>"##;
        let err = futures::executor::block_on(rasterize(svg, RENDER_SCALE)).unwrap_err();
        assert!(matches!(err, ExportError::Render(msg) if msg.contains("too large")));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn resvg_renders_simple_markup() {
        let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="4"><rect x="0" y="0" width="5" height="4" fill="#ff0000"/></svg>"##;
        let raster = futures::executor::block_on(rasterize(svg, 1.0)).unwrap();
        assert_eq!((raster.width, raster.height), (10, 4));
        assert_eq!(raster.rgb.len(), 10 * 4 * 3);
        assert_eq!(&raster.rgb[..3], &[255, 0, 0]);
        assert_eq!(&raster.rgb[27..30], &[255, 255, 255]);
    }
}
