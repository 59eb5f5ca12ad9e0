use crate::error::{Result, SheetError};

/// A4 dimensions at 300 DPI, in pixels.
pub const A4_WIDTH_PX: u32 = 2480;
pub const A4_HEIGHT_PX: u32 = 3508;

/// Default margin on all sides, in pixels.
pub const DEFAULT_MARGIN_PX: u32 = 100;

/// Default spacing between adjacent units, in pixels.
pub const DEFAULT_SPACING_PX: u32 = 10;

/// Default rendering resolution.
pub const DEFAULT_DPI: u32 = 300;

/// Page geometry for one sheet. All values in pixels at `dpi`.
#[derive(Debug, Clone)]
pub struct SheetOptions {
    pub page_width: u32,
    pub page_height: u32,
    pub margin_left: u32,
    pub margin_right: u32,
    pub margin_top: u32,
    pub margin_bottom: u32,
    pub spacing: u32,
    pub dpi: u32,
}

impl Default for SheetOptions {
    fn default() -> Self {
        Self {
            page_width: A4_WIDTH_PX,
            page_height: A4_HEIGHT_PX,
            margin_left: DEFAULT_MARGIN_PX,
            margin_right: DEFAULT_MARGIN_PX,
            margin_top: DEFAULT_MARGIN_PX,
            margin_bottom: DEFAULT_MARGIN_PX,
            spacing: DEFAULT_SPACING_PX,
            dpi: DEFAULT_DPI,
        }
    }
}

impl SheetOptions {
    pub fn available_width(&self) -> u32 {
        self.page_width
            .saturating_sub(self.margin_left)
            .saturating_sub(self.margin_right)
    }

    pub fn available_height(&self) -> u32 {
        self.page_height
            .saturating_sub(self.margin_top)
            .saturating_sub(self.margin_bottom)
    }
}

/// Uniform grid computed once per batch and read-only afterwards.
#[derive(Debug, Clone)]
pub struct GridLayout {
    pub unit_width: u32,
    pub unit_height: u32,
    pub columns: u32,
    pub rows: u32,
    pub sheet: SheetOptions,
}

/// Computes how many units of the given size fit on one sheet.
///
/// Fails with [`SheetError::UnitTooLarge`] when not even a single unit fits
/// the printable area; the caller must not proceed to render any page.
pub fn compute_layout(unit_width: u32, unit_height: u32, sheet: &SheetOptions) -> Result<GridLayout> {
    let columns = sheet.available_width() / (unit_width + sheet.spacing);
    let rows = sheet.available_height() / (unit_height + sheet.spacing);
    if columns == 0 || rows == 0 {
        return Err(SheetError::UnitTooLarge {
            width: unit_width,
            height: unit_height,
        });
    }
    Ok(GridLayout {
        unit_width,
        unit_height,
        columns,
        rows,
        sheet: sheet.clone(),
    })
}

impl GridLayout {
    /// Units per sheet.
    pub fn capacity(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    pub fn grid_width(&self) -> u32 {
        self.columns * self.unit_width + (self.columns - 1) * self.sheet.spacing
    }

    pub fn grid_height(&self) -> u32 {
        self.rows * self.unit_height + (self.rows - 1) * self.sheet.spacing
    }

    /// Top-left pixel of the grid, centered inside the printable area.
    pub fn origin(&self) -> (u32, u32) {
        let x = self.sheet.margin_left + (self.sheet.available_width() - self.grid_width()) / 2;
        let y = self.sheet.margin_top + (self.sheet.available_height() - self.grid_height()) / 2;
        (x, y)
    }

    /// Row-major cell for local slot `k`: `row = k div columns`,
    /// `col = k mod columns`.
    pub fn slot(&self, k: usize) -> (u32, u32) {
        ((k / self.columns as usize) as u32, (k % self.columns as usize) as u32)
    }

    /// Pixel offset of the cell at `(row, col)`.
    pub fn offset(&self, row: u32, col: u32) -> (u32, u32) {
        let (start_x, start_y) = self.origin();
        (
            start_x + col * (self.unit_width + self.sheet.spacing),
            start_y + row * (self.unit_height + self.sheet.spacing),
        )
    }
}
