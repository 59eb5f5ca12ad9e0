use image::{imageops, RgbImage};

use crate::error::{Result, SheetError};
use crate::fonts::CaptionFont;
use crate::layout::GridLayout;
use crate::render::{render_unit, RenderOptions};
use crate::spec::BarcodeInstance;

/// Structured progress events emitted while a batch runs.
///
/// Hosting CLIs or UIs subscribe with a callback instead of parsing text
/// output. Indices are 1-based for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    GridComputed {
        columns: u32,
        rows: u32,
        per_sheet: usize,
        unit_width: u32,
        unit_height: u32,
    },
    SheetStarted {
        sheet: usize,
        sheets: usize,
    },
    BarcodeRendered {
        index: usize,
        total: usize,
        number: String,
        sheet: usize,
    },
    SheetCompleted {
        sheet: usize,
    },
    BatchFinished {
        sheets: usize,
        barcodes: usize,
    },
}

/// Partitions the flattened sequence into sheet-sized chunks and composites
/// each chunk onto a blank page canvas, row-major.
///
/// A render failure aborts the whole batch; skipping an item silently would
/// corrupt the expected total and every later sheet index.
pub fn composite_sheets<F: FnMut(Progress)>(
    barcodes: &[BarcodeInstance],
    layout: &GridLayout,
    opts: &RenderOptions,
    font: &CaptionFont,
    mut progress: F,
) -> Result<Vec<RgbImage>> {
    let capacity = layout.capacity();
    let total = barcodes.len();
    let sheets_needed = total.div_ceil(capacity);

    let mut sheets = Vec::with_capacity(sheets_needed);
    for (sheet_idx, chunk) in barcodes.chunks(capacity).enumerate() {
        let sheet = sheet_idx + 1;
        progress(Progress::SheetStarted {
            sheet,
            sheets: sheets_needed,
        });

        let mut canvas = RgbImage::from_pixel(
            layout.sheet.page_width,
            layout.sheet.page_height,
            opts.background,
        );

        for (k, barcode) in chunk.iter().enumerate() {
            let (row, col) = layout.slot(k);
            // Cannot trigger given the ceiling division above; kept as an
            // explicit bound on the grid.
            if row >= layout.rows {
                break;
            }

            let index = sheet_idx * capacity + k + 1;
            let unit = render_unit(&barcode.number, barcode.title.as_deref(), opts, font)
                .map_err(|e| match e {
                    SheetError::Encode { number, reason } => SheetError::Render {
                        index,
                        total,
                        sheet,
                        number,
                        reason,
                    },
                    other => other,
                })?;

            let (x, y) = layout.offset(row, col);
            imageops::overlay(&mut canvas, &unit, x as i64, y as i64);

            progress(Progress::BarcodeRendered {
                index,
                total,
                number: barcode.number.clone(),
                sheet,
            });
        }

        progress(Progress::SheetCompleted { sheet });
        sheets.push(canvas);
    }

    progress(Progress::BatchFinished {
        sheets: sheets.len(),
        barcodes: total,
    });
    Ok(sheets)
}
