//! Materialize an [`XlsxBook`] into an `.xlsx` file with `rust_xlsxwriter`.

use std::collections::HashMap;
use std::path::Path;

use rust_xlsxwriter::{Color, Format, FormatPattern, FormatUnderline, Formula, Workbook, Worksheet};

use crate::adapter::CellAdapter;
use crate::book::{CellStyle, XlsxBook, XlsxSheet};
use crate::conf::{
    N_BOLDWEIGHT_BOLD, N_COLOR_INDEX_AUTOMATIC, N_FORMAT_INDEX_CUSTOM_START, N_UNDERLINE_NONE,
};
use crate::error::Result;
use crate::spec::{EnumCellValue, EnumFillPattern};
use crate::util::{cast_col_num, cast_row_num, derive_rgb_from_color_index};

/// Write every sheet of `book` to `path`, in creation order.
pub(crate) fn write_book(book: &XlsxBook, path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let mut cache_formats = FormatCache::new(book);

    for sheet in book.iter_sheets() {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet.name())?;
        write_sheet(worksheet, sheet, &mut cache_formats)?;
    }

    workbook.save(path)?;
    log::info!(
        "wrote workbook {} ({} sheets)",
        path.display(),
        book.sheet_count()
    );
    Ok(())
}

fn write_sheet(
    worksheet: &mut Worksheet,
    sheet: &XlsxSheet,
    cache_formats: &mut FormatCache<'_>,
) -> Result<()> {
    // Merges go first: merge_range blanks the block, cell values then fill it.
    for region in sheet.merged_regions() {
        if region.is_single_cell() {
            log::debug!(
                "sheet {:?}: skipping single-cell merge at ({}, {})",
                sheet.name(),
                region.row_from,
                region.col_from
            );
            continue;
        }
        let format = match sheet.cell(region.row_from, region.col_from) {
            Some(cell) => cache_formats.derive(cell.style()),
            None => cache_formats.derive_default(),
        };
        worksheet.merge_range(
            cast_row_num(region.row_from)?,
            cast_col_num(region.col_from)?,
            cast_row_num(region.row_to)?,
            cast_col_num(region.col_to)?,
            "",
            &format,
        )?;
    }

    for (n_row, row) in sheet.iter_indexed_rows() {
        for (n_col, cell) in row.iter_cells() {
            let value = cell.value();
            if value.is_none() && cache_formats.is_default(cell.style()) {
                continue;
            }
            let format = cache_formats.derive(cell.style());
            write_cell_with_format(worksheet, n_row, n_col, &value, &format)?;
        }
    }

    if let Some(pane) = sheet.freeze_pane() {
        worksheet.set_freeze_panes(cast_row_num(pane.row)?, cast_col_num(pane.col)?)?;
    }

    for (n_col, width) in sheet.iter_column_widths() {
        worksheet.set_column_width(cast_col_num(n_col)?, width)?;
    }

    Ok(())
}

fn write_cell_with_format(
    worksheet: &mut Worksheet,
    row_idx: usize,
    col_idx: usize,
    value: &EnumCellValue,
    format: &Format,
) -> Result<()> {
    let n_row = cast_row_num(row_idx)?;
    let n_col = cast_col_num(col_idx)?;

    match value {
        EnumCellValue::None => {
            worksheet.write_blank(n_row, n_col, format)?;
        }
        EnumCellValue::Number(val) if val.is_finite() => {
            worksheet.write_number_with_format(n_row, n_col, *val, format)?;
        }
        // NaN and infinities have no cell representation.
        EnumCellValue::Number(val) => {
            worksheet.write_string_with_format(n_row, n_col, val.to_string(), format)?;
        }
        EnumCellValue::String(val) => {
            worksheet.write_string_with_format(n_row, n_col, val, format)?;
        }
        EnumCellValue::Boolean(val) => {
            worksheet.write_boolean_with_format(n_row, n_col, *val, format)?;
        }
        EnumCellValue::Formula(val) => {
            worksheet.write_formula_with_format(n_row, n_col, Formula::new(val), format)?;
        }
        EnumCellValue::Error(err) => {
            worksheet.write_formula_with_format(
                n_row,
                n_col,
                Formula::new(err.as_str()).set_result(err.as_str()),
                format,
            )?;
        }
    }
    Ok(())
}

/// One `Format` per distinct cell style.
struct FormatCache<'a> {
    book: &'a XlsxBook,
    style_default: CellStyle,
    dict_formats: HashMap<CellStyle, Format>,
}

impl<'a> FormatCache<'a> {
    fn new(book: &'a XlsxBook) -> Self {
        Self {
            book,
            style_default: book.default_cell_style(),
            dict_formats: HashMap::new(),
        }
    }

    fn is_default(&self, style: &CellStyle) -> bool {
        *style == self.style_default
    }

    fn derive_default(&mut self) -> Format {
        let style_default = self.style_default.clone();
        self.derive(&style_default)
    }

    fn derive(&mut self, style: &CellStyle) -> Format {
        if let Some(format) = self.dict_formats.get(style) {
            return format.clone();
        }
        let format = derive_rust_xlsx_format(self.book, style);
        self.dict_formats.insert(style.clone(), format.clone());
        format
    }
}

fn derive_rust_xlsx_format(book: &XlsxBook, style: &CellStyle) -> Format {
    let font = style.font();
    let mut format = Format::new()
        .set_font_name(font.name())
        .set_font_size(f64::from(font.height()) / 20.0);

    if font.boldweight() >= N_BOLDWEIGHT_BOLD {
        format = format.set_bold();
    }
    if font.italic() {
        format = format.set_italic();
    }
    if font.strikeout() {
        format = format.set_font_strikethrough();
    }
    if let Some(underline) = derive_format_underline(font.underline()) {
        format = format.set_underline(underline);
    }
    if font.color() != N_COLOR_INDEX_AUTOMATIC
        && let Some(n_rgb) = derive_rgb_from_color_index(font.color())
    {
        format = format.set_font_color(Color::RGB(n_rgb));
    }

    if style.fill_pattern() == EnumFillPattern::SolidForeground {
        format = format.set_pattern(FormatPattern::Solid);
        if let Some(n_rgb) = derive_rgb_from_color_index(style.fill_foreground_color()) {
            format = format.set_background_color(Color::RGB(n_rgb));
        }
    }

    let n_format = style.data_format();
    if n_format >= N_FORMAT_INDEX_CUSTOM_START {
        if let Some(c_format) = book.data_format_string(n_format) {
            format = format.set_num_format(c_format);
        }
    } else if n_format != 0
        && let Ok(n_index) = u8::try_from(n_format)
    {
        format = format.set_num_format_index(n_index);
    }

    format
}

fn derive_format_underline(underline: u8) -> Option<FormatUnderline> {
    match underline {
        N_UNDERLINE_NONE => None,
        1 => Some(FormatUnderline::Single),
        2 => Some(FormatUnderline::Double),
        0x21 => Some(FormatUnderline::SingleAccounting),
        0x22 => Some(FormatUnderline::DoubleAccounting),
        _ => Some(FormatUnderline::Single),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::SpecStyleOptions;

    #[test]
    fn test_format_cache_reuses_equal_styles() {
        let mut book = XlsxBook::new();
        let style_a = book.create_style(&SpecStyleOptions::default().with_bold(true));
        let style_b = book.create_style(&SpecStyleOptions::default().with_bold(true));

        let mut cache_formats = FormatCache::new(&book);
        cache_formats.derive(&style_a);
        cache_formats.derive(&style_b);
        cache_formats.derive_default();

        assert_eq!(cache_formats.dict_formats.len(), 2);
        assert!(cache_formats.is_default(&book.default_cell_style()));
        assert!(!cache_formats.is_default(&style_a));
    }

    #[test]
    fn test_derive_format_underline() {
        assert_eq!(derive_format_underline(0), None);
        assert_eq!(derive_format_underline(1), Some(FormatUnderline::Single));
        assert_eq!(
            derive_format_underline(0x22),
            Some(FormatUnderline::DoubleAccounting)
        );
    }
}
