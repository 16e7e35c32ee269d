//! Grid writer: lays scalars and nested token sequences out as single-cell
//! writes on any [`SheetAdapter`].
//!
//! A sequence written as a row advances one column per token; a nested
//! sequence met inside it is written downward as a column from the current
//! position, and vice versa. The optional style is attached to every cell the
//! expansion touches.

use crate::adapter::{CellAdapter, RowAdapter, SheetAdapter, SheetStyle};
use crate::error::{EnumAxis, PoiyerError, Result};
use crate::spec::{EnumCellValue, EnumWriteToken};

/// Write `token` at `(row, col)`. Sequences are laid out as a row.
pub fn write<S: SheetAdapter>(
    sheet: &mut S,
    row: usize,
    col: usize,
    token: impl Into<EnumWriteToken>,
    style: Option<&SheetStyle<S>>,
) -> Result<()> {
    write_token(sheet, row, col, &token.into(), style)
}

/// Write a sequence left to right starting at `(row, col)`.
pub fn write_row<S: SheetAdapter>(
    sheet: &mut S,
    row: usize,
    col: usize,
    tokens: impl Into<EnumWriteToken>,
    style: Option<&SheetStyle<S>>,
) -> Result<()> {
    write_row_token(sheet, row, col, &tokens.into(), style)
}

/// Write a sequence top to bottom starting at `(row, col)`.
pub fn write_column<S: SheetAdapter>(
    sheet: &mut S,
    row: usize,
    col: usize,
    tokens: impl Into<EnumWriteToken>,
    style: Option<&SheetStyle<S>>,
) -> Result<()> {
    write_column_token(sheet, row, col, &tokens.into(), style)
}

fn write_token<S: SheetAdapter>(
    sheet: &mut S,
    row: usize,
    col: usize,
    token: &EnumWriteToken,
    style: Option<&SheetStyle<S>>,
) -> Result<()> {
    match token {
        EnumWriteToken::Scalar(value) => write_scalar(sheet, row, col, value, style),
        EnumWriteToken::Nested(_) => write_row_token(sheet, row, col, token, style),
    }
}

fn write_row_token<S: SheetAdapter>(
    sheet: &mut S,
    row: usize,
    col: usize,
    token: &EnumWriteToken,
    style: Option<&SheetStyle<S>>,
) -> Result<()> {
    let EnumWriteToken::Nested(tokens) = token else {
        return write_token(sheet, row, col, token, style);
    };

    for (n_offset, token_inner) in tokens.iter().enumerate() {
        let n_col = derive_offset_index(col, n_offset, EnumAxis::Column)?;
        match token_inner {
            EnumWriteToken::Nested(_) => {
                write_column_token(sheet, row, n_col, token_inner, style)?;
            }
            EnumWriteToken::Scalar(value) => write_scalar(sheet, row, n_col, value, style)?,
        }
    }
    Ok(())
}

fn write_column_token<S: SheetAdapter>(
    sheet: &mut S,
    row: usize,
    col: usize,
    token: &EnumWriteToken,
    style: Option<&SheetStyle<S>>,
) -> Result<()> {
    let EnumWriteToken::Nested(tokens) = token else {
        return write_token(sheet, row, col, token, style);
    };

    for (n_offset, token_inner) in tokens.iter().enumerate() {
        let n_row = derive_offset_index(row, n_offset, EnumAxis::Row)?;
        match token_inner {
            EnumWriteToken::Nested(_) => {
                write_row_token(sheet, n_row, col, token_inner, style)?;
            }
            EnumWriteToken::Scalar(value) => write_scalar(sheet, n_row, col, value, style)?,
        }
    }
    Ok(())
}

fn derive_offset_index(base: usize, offset: usize, axis: EnumAxis) -> Result<usize> {
    base.checked_add(offset)
        .ok_or(PoiyerError::OutOfBounds { axis, index: base })
}

fn write_scalar<S: SheetAdapter>(
    sheet: &mut S,
    row: usize,
    col: usize,
    value: &EnumCellValue,
    style: Option<&SheetStyle<S>>,
) -> Result<()> {
    let cell = sheet.row_mut(row)?.cell_mut(col)?;
    cell.set_value(value.clone());
    if let Some(style) = style {
        cell.set_style(style);
    }
    Ok(())
}

/// Set the value at `(row, col)` and leave its style alone.
pub fn set_cell<S: SheetAdapter>(
    sheet: &mut S,
    row: usize,
    col: usize,
    value: impl Into<EnumCellValue>,
) -> Result<()> {
    sheet.row_mut(row)?.cell_mut(col)?.set_value(value.into());
    Ok(())
}

/// Typed value at `(row, col)`; cells never written read as `None`.
pub fn read_cell<S: SheetAdapter>(sheet: &S, row: usize, col: usize) -> EnumCellValue {
    sheet
        .row(row)
        .and_then(|r| r.cell(col))
        .map_or(EnumCellValue::None, |cell| cell.value())
}
