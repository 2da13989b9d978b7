use std::path::Path;

use crate::foundation::error::{BoxofficeError, BoxofficeResult};

/// Font size used for text whose size usvg cannot resolve (`rem` units): `0.6rem` at a 16px root.
pub const FALLBACK_FONT_SIZE: f32 = 9.6;

const MAX_DIM: u32 = 16_384;

/// Straight (non-premultiplied) RGBA8 pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl RasterImage {
    /// RGBA of the pixel at `(x, y)`, if inside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 4) as usize;
        self.data.get(i..i + 4).map(|px| [px[0], px[1], px[2], px[3]])
    }

    pub fn save_png(&self, path: &Path) -> BoxofficeResult<()> {
        image::save_buffer_with_format(
            path,
            &self.data,
            self.width,
            self.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .map_err(|e| BoxofficeError::render(format!("write png '{}': {e}", path.display())))
    }
}

/// Rasterize standalone SVG text at `scale` device pixels per SVG unit.
///
/// `background` is painted first; `None` keeps uncovered pixels transparent.
#[tracing::instrument(skip_all, fields(scale = %scale))]
pub fn rasterize_svg(
    svg: &str,
    scale: f32,
    background: Option<[u8; 4]>,
) -> BoxofficeResult<RasterImage> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(BoxofficeError::render(format!(
            "raster scale must be positive, got {scale}"
        )));
    }

    let mut opt = usvg::Options {
        font_size: FALLBACK_FONT_SIZE,
        ..usvg::Options::default()
    };
    opt.fontdb_mut().load_system_fonts();
    let tree = usvg::Tree::from_str(svg, &opt)
        .map_err(|e| BoxofficeError::render(format!("parse svg tree: {e}")))?;

    let size = tree.size();
    let width = to_px(size.width() * scale)?;
    let height = to_px(size.height() * scale)?;
    if width > MAX_DIM || height > MAX_DIM {
        return Err(BoxofficeError::render(format!(
            "raster size too large: {width}x{height} (max {MAX_DIM}x{MAX_DIM})"
        )));
    }

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| BoxofficeError::render("failed to allocate pixmap"))?;
    if let Some([r, g, b, a]) = background {
        pixmap.fill(resvg::tiny_skia::Color::from_rgba8(r, g, b, a));
    }
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    tracing::debug!(width, height, "rasterized svg");

    let mut data = Vec::with_capacity(pixmap.data().len());
    for px in pixmap.pixels() {
        let c = px.demultiply();
        data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    Ok(RasterImage {
        width,
        height,
        data,
    })
}

fn to_px(v: f32) -> BoxofficeResult<u32> {
    if !v.is_finite() || v <= 0.0 {
        return Err(BoxofficeError::render("svg has invalid width/height"));
    }
    Ok((v.ceil() as u32).max(1))
}
