//! Sheet-level sugar: merged regions, frozen panes and column auto-sizing.

use crate::adapter::{RowAdapter, SheetAdapter};
use crate::error::Result;
use crate::spec::SpecCellRegion;

/// Merge the inclusive block `row_start..=row_end` x `col_start..=col_end`.
///
/// Returns the index of the new region on the sheet.
pub fn merge_region<S: SheetAdapter>(
    sheet: &mut S,
    row_start: usize,
    row_end: usize,
    col_start: usize,
    col_end: usize,
) -> Result<usize> {
    sheet.add_merged_region(SpecCellRegion::new(row_start, row_end, col_start, col_end))
}

/// Freeze everything above `row` and left of `col`. `(0, 0)` unfreezes.
pub fn freeze_panes<S: SheetAdapter>(sheet: &mut S, row: usize, col: usize) -> Result<()> {
    sheet.create_freeze_pane(row, col)
}

pub fn freeze_rows<S: SheetAdapter>(sheet: &mut S, n_rows: usize) -> Result<()> {
    freeze_panes(sheet, n_rows, 0)
}

pub fn freeze_columns<S: SheetAdapter>(sheet: &mut S, n_cols: usize) -> Result<()> {
    freeze_panes(sheet, 0, n_cols)
}

/// Auto-size every column up to the widest row.
///
/// The bound is inclusive of `last_cell_num`, so one column past the data is
/// sized as well; empty columns keep their width.
pub fn auto_size_columns<S: SheetAdapter>(sheet: &mut S) -> Result<()> {
    let n_cols_longest = sheet
        .iter_rows()
        .map(|row| row.last_cell_num())
        .fold(1, usize::max);

    for n_col in 0..=n_cols_longest {
        sheet.auto_size_column(n_col)?;
    }
    Ok(())
}
