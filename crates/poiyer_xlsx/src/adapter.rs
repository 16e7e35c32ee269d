//! Capability set the grid writer and style builder need from a spreadsheet
//! object model.
//!
//! [`crate::book::XlsxBook`] is the bundled implementation. Other models plug
//! in by implementing these traits; the helpers in [`crate::grid`],
//! [`crate::style`] and [`crate::layout`] only ever talk to the traits.

use std::path::Path;

use crate::error::Result;
use crate::spec::{EnumCellType, EnumCellValue, EnumFillPattern, SpecCellRegion};

/// Font setters used by the style builder.
pub trait FontAdapter {
    /// Palette index of the font color.
    fn set_color(&mut self, color: u16);
    fn set_boldweight(&mut self, weight: u16);
    fn set_italic(&mut self, italic: bool);
    fn set_strikeout(&mut self, strikeout: bool);
    fn set_underline(&mut self, underline: u8);
}

/// Style setters used by the style builder.
pub trait StyleAdapter {
    type Font: FontAdapter;

    fn set_fill_pattern(&mut self, pattern: EnumFillPattern);
    /// Palette index of the fill foreground color.
    fn set_fill_foreground_color(&mut self, color: u16);
    /// Index returned by [`WorkbookAdapter::resolve_builtin_format`].
    fn set_data_format(&mut self, format: u16);
    fn set_font(&mut self, font: Self::Font);
}

pub trait CellAdapter {
    type Style;

    /// Store `value`; the type tag follows the value.
    fn set_value(&mut self, value: EnumCellValue);
    fn value(&self) -> EnumCellValue;
    fn cell_type(&self) -> EnumCellType;
    fn set_style(&mut self, style: &Self::Style);
    fn style(&self) -> &Self::Style;
}

pub trait RowAdapter {
    type Cell: CellAdapter;

    /// Get the cell at `index`, creating it when missing.
    fn cell_mut(&mut self, index: usize) -> Result<&mut Self::Cell>;
    fn cell(&self, index: usize) -> Option<&Self::Cell>;
    /// One past the highest populated cell index; `0` for an empty row.
    fn last_cell_num(&self) -> usize;
}

pub trait SheetAdapter {
    type Row: RowAdapter;

    /// Get the row at `index`, creating it when missing.
    fn row_mut(&mut self, index: usize) -> Result<&mut Self::Row>;
    fn row(&self, index: usize) -> Option<&Self::Row>;
    /// Existing rows in ascending index order.
    fn iter_rows(&self) -> impl Iterator<Item = &Self::Row>;
    /// Register a merged region and return its index.
    fn add_merged_region(&mut self, region: SpecCellRegion) -> Result<usize>;
    /// Freeze rows above `row` and columns left of `col`.
    fn create_freeze_pane(&mut self, row: usize, col: usize) -> Result<()>;
    /// Fit the width of column `col` to its content.
    fn auto_size_column(&mut self, col: usize) -> Result<()>;
}

/// Style type attached to cells of sheet `S`.
pub type SheetStyle<S> =
    <<<S as SheetAdapter>::Row as RowAdapter>::Cell as CellAdapter>::Style;

pub trait WorkbookAdapter {
    type Style: StyleAdapter + Clone;
    type Sheet: SheetAdapter;

    /// Add a sheet; `None` picks the next default name.
    fn create_sheet(&mut self, name: Option<&str>) -> Result<&mut Self::Sheet>;
    fn sheet_mut(&mut self, name: &str) -> Option<&mut Self::Sheet>;
    fn create_cell_style(&mut self) -> Self::Style;
    fn create_font(&mut self) -> <Self::Style as StyleAdapter>::Font;
    /// Map a number format string to the index stored in styles.
    fn resolve_builtin_format(&mut self, format: &str) -> u16;
    fn save(&mut self, path: &Path) -> Result<()>;
    fn close(&mut self) -> Result<()>;
}
