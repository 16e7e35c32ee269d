//! Stateless lookup, validation and estimation helpers.

use crate::conf::{
    N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX, TUP_BUILTIN_FORMATS,
    TUP_EXCEL_ILLEGAL, TUP_NAMED_BUILTIN_FORMATS, TUP_NAMED_COLORS, SpecNamedColor,
};
use crate::error::{EnumAxis, PoiyerError, Result};
use crate::spec::EnumCellValue;

////////////////////////////////////////////////////////////////////////////////
// #region NamedLookups

/// Find a named color, or `None` when the name is not in the table.
pub fn lookup_named_color(name: &str) -> Option<&'static SpecNamedColor> {
    TUP_NAMED_COLORS.iter().find(|color| color.name == name)
}

/// Palette index for `name`, or `None` when the name is unknown.
pub fn lookup_color_index_strict(name: &str) -> Option<u16> {
    lookup_named_color(name).map(|color| color.index)
}

/// Palette index for `name`.
///
/// Unknown names resolve to the first table entry (black) instead of failing.
/// Callers that would rather reject typos can use
/// [`lookup_color_index_strict`].
pub fn lookup_color_index(name: &str) -> u16 {
    lookup_color_index_strict(name).unwrap_or_else(|| {
        log::debug!(
            "unknown color name {name:?}; falling back to {:?}",
            TUP_NAMED_COLORS[0].name
        );
        TUP_NAMED_COLORS[0].index
    })
}

/// `0xRRGGBB` value for a palette index, if the index is in the table.
pub fn derive_rgb_from_color_index(index: u16) -> Option<u32> {
    TUP_NAMED_COLORS
        .iter()
        .find(|color| color.index == index)
        .map(|color| color.rgb)
}

/// Substitute a named format key by its format string; other input is returned as is.
pub fn resolve_named_format(format: &str) -> &str {
    TUP_NAMED_BUILTIN_FORMATS
        .iter()
        .find(|(c_name, _)| *c_name == format)
        .map_or(format, |(_, c_fmt)| *c_fmt)
}

/// Index of `format` among the builtin number formats.
pub fn find_builtin_format_index(format: &str) -> Option<u16> {
    TUP_BUILTIN_FORMATS
        .iter()
        .position(|c_fmt| *c_fmt == Some(format))
        .and_then(|n_idx| u16::try_from(n_idx).ok())
}

/// Builtin format string stored at `index`.
pub fn derive_builtin_format_string(index: u16) -> Option<&'static str> {
    TUP_BUILTIN_FORMATS.get(usize::from(index)).copied().flatten()
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Validation

/// Reject names Excel would refuse for a worksheet tab.
pub fn validate_sheet_name(name: &str) -> Result<()> {
    let invalid = |reason: &str| PoiyerError::InvalidSheetName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.trim().is_empty() {
        return Err(invalid("name is empty"));
    }
    if name.chars().count() > N_LEN_EXCEL_SHEET_NAME_MAX {
        return Err(invalid(&format!(
            "longer than {N_LEN_EXCEL_SHEET_NAME_MAX} characters"
        )));
    }
    if let Some(c_illegal) = TUP_EXCEL_ILLEGAL.iter().find(|c| name.contains(**c)) {
        return Err(invalid(&format!("contains {c_illegal:?}")));
    }
    if name.starts_with('\'') || name.ends_with('\'') {
        return Err(invalid("starts or ends with an apostrophe"));
    }
    Ok(())
}

/// Check a zero-based row index against the Excel grid.
pub fn validate_row_index(index: usize) -> Result<usize> {
    if index >= N_NROWS_EXCEL_MAX {
        return Err(PoiyerError::OutOfBounds {
            axis: EnumAxis::Row,
            index,
        });
    }
    Ok(index)
}

/// Check a zero-based column index against the Excel grid.
pub fn validate_col_index(index: usize) -> Result<usize> {
    if index >= N_NCOLS_EXCEL_MAX {
        return Err(PoiyerError::OutOfBounds {
            axis: EnumAxis::Column,
            index,
        });
    }
    Ok(index)
}

pub fn cast_row_num(value: usize) -> Result<u32> {
    u32::try_from(validate_row_index(value)?).map_err(|_| PoiyerError::OutOfBounds {
        axis: EnumAxis::Row,
        index: value,
    })
}

pub fn cast_col_num(value: usize) -> Result<u16> {
    u16::try_from(validate_col_index(value)?).map_err(|_| PoiyerError::OutOfBounds {
        axis: EnumAxis::Column,
        index: value,
    })
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region WidthEstimation

/// Estimate displayed width units for one cell value.
pub fn estimate_width_len(value: &EnumCellValue) -> usize {
    match value {
        EnumCellValue::None => 0,
        EnumCellValue::Number(n) => {
            if n.fract() == 0.0 && n.abs() < 1e15 {
                format!("{n:.0}").len()
            } else {
                n.to_string().len()
            }
        }
        other => estimate_unicode_string_width(&other.to_string()),
    }
}

fn estimate_unicode_string_width(s: &str) -> usize {
    let n_ascii = s.chars().filter(|chr| chr.is_ascii()).count();
    let n_non_ascii = s.chars().count().saturating_sub(n_ascii);
    n_ascii + (n_non_ascii as f64 * 1.6).round() as usize
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
