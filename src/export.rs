use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbImage};
use printpdf::{
    ColorBits, ColorSpace, Image, ImageTransform, ImageXObject, Mm, PdfDocument,
    PdfLayerReference, Px,
};

use crate::error::{Result, SheetError};

const MM_PER_INCH: f32 = 25.4;

fn px_to_mm(px: u32, dpi: u32) -> f32 {
    px as f32 * MM_PER_INCH / dpi as f32
}

/// Staging sibling of `path`; output is written here first and renamed into
/// place so a failed export never leaves a half-written destination.
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Saves the ordered sheets as one multi-page PDF.
///
/// Each sheet becomes one page sized to the sheet's pixel dimensions at
/// `dpi`, with the raster embedded full-page.
pub fn save_pdf(sheets: &[RgbImage], path: &Path, dpi: u32) -> Result<()> {
    let first = sheets
        .first()
        .ok_or_else(|| SheetError::Pdf("no sheets to export".to_string()))?;

    let (doc, page1, layer1) = PdfDocument::new(
        "Barcode Sheets",
        Mm(px_to_mm(first.width(), dpi)),
        Mm(px_to_mm(first.height(), dpi)),
        "Layer 1",
    );

    for (i, sheet) in sheets.iter().enumerate() {
        let layer = if i == 0 {
            doc.get_page(page1).get_layer(layer1)
        } else {
            let (page, layer) = doc.add_page(
                Mm(px_to_mm(sheet.width(), dpi)),
                Mm(px_to_mm(sheet.height(), dpi)),
                "Layer 1",
            );
            doc.get_page(page).get_layer(layer)
        };
        embed_sheet(&layer, sheet, dpi);
    }

    let staged = staging_path(path);
    let file = File::create(&staged).map_err(|e| SheetError::Export {
        path: path.to_owned(),
        source: e,
    })?;
    let mut writer = BufWriter::new(file);
    if let Err(e) = doc.save(&mut writer) {
        let _ = fs::remove_file(&staged);
        return Err(SheetError::Pdf(e.to_string()));
    }
    drop(writer);

    fs::rename(&staged, path).map_err(|e| SheetError::Export {
        path: path.to_owned(),
        source: e,
    })
}

/// Saves one sheet as a PNG, with the same atomic finalize as [`save_pdf`].
pub fn save_png(sheet: &RgbImage, path: &Path) -> Result<()> {
    let staged = staging_path(path);
    let file = File::create(&staged).map_err(|e| SheetError::Export {
        path: path.to_owned(),
        source: e,
    })?;
    let mut writer = BufWriter::new(file);
    if let Err(e) = sheet.write_to(&mut writer, ImageFormat::Png) {
        drop(writer);
        let _ = fs::remove_file(&staged);
        return Err(SheetError::Image(e));
    }
    drop(writer);

    fs::rename(&staged, path).map_err(|e| SheetError::Export {
        path: path.to_owned(),
        source: e,
    })
}

fn embed_sheet(layer: &PdfLayerReference, sheet: &RgbImage, dpi: u32) {
    let (width, height) = sheet.dimensions();
    let image = Image::from(ImageXObject {
        width: Px(width as usize),
        height: Px(height as usize),
        color_space: ColorSpace::Rgb,
        bits_per_component: ColorBits::Bit8,
        interpolate: false,
        image_data: sheet.clone().into_raw(),
        image_filter: None,
        clipping_bbox: None,
        smask: None,
    });

    image.add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(0.0)),
            translate_y: Some(Mm(0.0)),
            dpi: Some(dpi as f32),
            ..Default::default()
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn blank_sheet() -> RgbImage {
        RgbImage::from_pixel(400, 300, Rgb([255, 255, 255]))
    }

    #[test]
    fn pdf_export_writes_valid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.pdf");
        save_pdf(&[blank_sheet(), blank_sheet()], &path, 300).unwrap();

        let bytes = fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 1000, "PDF file is too small");
        assert!(!staging_path(&path).exists(), "staging file left behind");
    }

    #[test]
    fn pdf_export_rejects_empty_batch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.pdf");
        assert!(matches!(save_pdf(&[], &path, 300), Err(SheetError::Pdf(_))));
        assert!(!path.exists());
    }

    #[test]
    fn unwritable_destination_leaves_no_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-subdir").join("out.pdf");
        match save_pdf(&[blank_sheet()], &path, 300) {
            Err(SheetError::Export { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected Export error, got {:?}", other),
        }
        assert!(!path.exists());
    }

    #[test]
    fn png_round_trips_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sheet.png");
        save_png(&blank_sheet(), &path).unwrap();

        let reread = image::open(&path).unwrap();
        assert_eq!(reread.width(), 400);
        assert_eq!(reread.height(), 300);
        assert!(!staging_path(&path).exists());
    }
}
