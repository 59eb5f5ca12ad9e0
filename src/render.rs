use image::{imageops, Luma, Rgb, RgbImage};
use qrcode::QrCode;

use crate::error::{Result, SheetError};
use crate::fonts::CaptionFont;

/// Rendering options passed through opaquely to the unit renderer.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Horizontal pixels per symbol module.
    pub module_width: u32,
    /// Vertical pixels per symbol module.
    pub module_height: u32,
    /// Quiet-zone border around the symbol, in pixels.
    pub quiet_zone: u32,
    /// Caption font size in pixels.
    pub font_size: f32,
    /// Padding above and below the caption, in pixels.
    pub caption_padding: u32,
    pub foreground: Rgb<u8>,
    pub background: Rgb<u8>,
}

impl Default for RenderOptions {
    // Sized so the legacy 65-copy batch fits on a single A4 sheet at 300 DPI.
    fn default() -> Self {
        Self {
            module_width: 6,
            module_height: 6,
            quiet_zone: 20,
            font_size: 22.0,
            caption_padding: 10,
            foreground: Rgb([0, 0, 0]),
            background: Rgb([255, 255, 255]),
        }
    }
}

/// Renders one barcode unit: the symbol plus an optional caption band above it.
///
/// Without a caption the unit is exactly the symbol raster. With one, the
/// caption is centered horizontally in a band of `text_h + 2 * padding`
/// pixels and the unit widens to fit whichever of the two is wider.
pub fn render_unit(
    number: &str,
    title: Option<&str>,
    opts: &RenderOptions,
    font: &CaptionFont,
) -> Result<RgbImage> {
    let symbol = render_symbol(number, opts)?;

    let title = title.unwrap_or("");
    if title.is_empty() {
        return Ok(symbol);
    }

    let (text_w, text_h) = font.measure(title, opts.font_size);
    let band_height = text_h + 2 * opts.caption_padding;
    let width = symbol.width().max(text_w + 2 * opts.caption_padding);
    let height = symbol.height() + band_height;

    let mut unit = RgbImage::from_pixel(width, height, opts.background);
    let text_x = (width - text_w) / 2;
    font.draw(&mut unit, text_x, opts.caption_padding, title, opts.font_size, opts.foreground);

    let symbol_x = (width - symbol.width()) / 2;
    imageops::overlay(&mut unit, &symbol, symbol_x as i64, band_height as i64);
    Ok(unit)
}

/// Encodes `number` and rasterizes it with the configured module size,
/// quiet zone and colors.
fn render_symbol(number: &str, opts: &RenderOptions) -> Result<RgbImage> {
    let code = QrCode::new(number.as_bytes()).map_err(|e| SheetError::Encode {
        number: number.to_string(),
        reason: e.to_string(),
    })?;

    let modules = code
        .render::<Luma<u8>>()
        .module_dimensions(opts.module_width, opts.module_height)
        .quiet_zone(false)
        .build();

    let width = modules.width() + 2 * opts.quiet_zone;
    let height = modules.height() + 2 * opts.quiet_zone;
    let mut symbol = RgbImage::from_pixel(width, height, opts.background);
    for (x, y, pixel) in modules.enumerate_pixels() {
        if pixel.0[0] < 128 {
            symbol.put_pixel(x + opts.quiet_zone, y + opts.quiet_zone, opts.foreground);
        }
    }
    Ok(symbol)
}
