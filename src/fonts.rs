use ab_glyph::{FontVec, PxScale};
use font8x8::legacy::BASIC_LEGACY;
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_text_mut, text_size};

/// Candidate caption fonts, tried in order. Covers the usual Linux, macOS
/// and Windows install locations.
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Font used for unit captions.
///
/// Resolution never fails: if no system font can be loaded, captions are
/// drawn with a built-in 8x8 bitmap font scaled to the requested size.
pub enum CaptionFont {
    System(FontVec),
    Builtin,
}

impl CaptionFont {
    pub fn load() -> Self {
        for path in FONT_CANDIDATES {
            if let Ok(bytes) = std::fs::read(path) {
                if let Ok(font) = FontVec::try_from_vec(bytes) {
                    return CaptionFont::System(font);
                }
            }
        }
        CaptionFont::Builtin
    }

    /// Pixel dimensions of `text` rendered at `size`.
    pub fn measure(&self, text: &str, size: f32) -> (u32, u32) {
        match self {
            CaptionFont::System(font) => text_size(PxScale::from(size), font, text),
            CaptionFont::Builtin => {
                let s = builtin_scale(size);
                (text.chars().count() as u32 * 8 * s, 8 * s)
            }
        }
    }

    /// Draws `text` onto `canvas` with its top-left corner at `(x, y)`.
    pub fn draw(&self, canvas: &mut RgbImage, x: u32, y: u32, text: &str, size: f32, color: Rgb<u8>) {
        match self {
            CaptionFont::System(font) => {
                draw_text_mut(canvas, color, x as i32, y as i32, PxScale::from(size), font, text);
            }
            CaptionFont::Builtin => {
                let s = builtin_scale(size);
                let mut pen_x = x;
                for ch in text.chars() {
                    let glyph = BASIC_LEGACY
                        .get(ch as usize)
                        .copied()
                        .unwrap_or(BASIC_LEGACY[b'?' as usize]);
                    for (row, bits) in glyph.iter().enumerate() {
                        for col in 0..8u32 {
                            if bits & (1 << col) == 0 {
                                continue;
                            }
                            fill_block(canvas, pen_x + col * s, y + row as u32 * s, s, color);
                        }
                    }
                    pen_x += 8 * s;
                }
            }
        }
    }
}

fn builtin_scale(size: f32) -> u32 {
    (size / 8.0).round().max(1.0) as u32
}

fn fill_block(canvas: &mut RgbImage, x: u32, y: u32, size: u32, color: Rgb<u8>) {
    for dy in 0..size {
        for dx in 0..size {
            let px = x + dx;
            let py = y + dy;
            if px < canvas.width() && py < canvas.height() {
                canvas.put_pixel(px, py, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_never_fails() {
        // Either a system font resolves or the builtin fallback applies;
        // both must measure non-empty text to non-zero dimensions.
        let font = CaptionFont::load();
        let (w, h) = font.measure("Product A", 22.0);
        assert!(w > 0);
        assert!(h > 0);
    }

    #[test]
    fn builtin_draw_marks_pixels() {
        let font = CaptionFont::Builtin;
        let (w, h) = font.measure("A", 8.0);
        assert_eq!((w, h), (8, 8));

        let mut canvas = RgbImage::from_pixel(16, 16, Rgb([255, 255, 255]));
        font.draw(&mut canvas, 0, 0, "A", 8.0, Rgb([0, 0, 0]));
        let dark = canvas.pixels().filter(|p| p.0[0] == 0).count();
        assert!(dark > 0, "glyph should produce dark pixels");
    }

    #[test]
    fn builtin_scales_with_font_size() {
        let font = CaptionFont::Builtin;
        let (small_w, _) = font.measure("AB", 8.0);
        let (large_w, _) = font.measure("AB", 24.0);
        assert_eq!(large_w, small_w * 3);
    }
}
