//! Bulk barcode sheet generation.
//!
//! Takes a list of barcode specifications (payload, copy count, optional
//! title), packs the expanded copies onto as few fixed-size page canvases as
//! possible using a uniform centered grid, and exports the result as one
//! multi-page PDF (or per-sheet PNGs).

mod compose;
mod error;
mod export;
mod fonts;
mod layout;
mod render;
mod spec;

pub use compose::{composite_sheets, Progress};
pub use error::{Result, SheetError};
pub use export::{save_pdf, save_png};
pub use fonts::CaptionFont;
pub use layout::{compute_layout, GridLayout, SheetOptions};
pub use render::{render_unit, RenderOptions};
pub use spec::{expand, BarcodeInstance, BarcodeSpec};

use image::RgbImage;

/// Runs the full batch: validate and expand the specs, size the grid, and
/// composite every sheet.
///
/// The grid is sized from one sample render per spec, taking the maximum
/// unit dimensions across them so differing titles cannot overflow their
/// cells. Export is a separate step; the caller decides what to do with the
/// returned sheets, so an export failure never discards computed pages.
pub fn generate_sheets<F: FnMut(Progress)>(
    specs: &[BarcodeSpec],
    sheet: &SheetOptions,
    render: &RenderOptions,
    mut progress: F,
) -> Result<Vec<RgbImage>> {
    let barcodes = expand(specs)?;
    let font = CaptionFont::load();

    let mut unit_width = 0;
    let mut unit_height = 0;
    for s in specs {
        let sample = render_unit(&s.number, s.title.as_deref(), render, &font)?;
        unit_width = unit_width.max(sample.width());
        unit_height = unit_height.max(sample.height());
    }

    let layout = compute_layout(unit_width, unit_height, sheet)?;
    progress(Progress::GridComputed {
        columns: layout.columns,
        rows: layout.rows,
        per_sheet: layout.capacity(),
        unit_width,
        unit_height,
    });

    composite_sheets(&barcodes, &layout, render, &font, progress)
}

/// Legacy single-payload batch over all-default A4/300 DPI settings.
pub fn single_number_sheets(number: &str, count: u32) -> Result<Vec<RgbImage>> {
    let specs = [BarcodeSpec::new(number, count)];
    generate_sheets(
        &specs,
        &SheetOptions::default(),
        &RenderOptions::default(),
        |_| {},
    )
}
