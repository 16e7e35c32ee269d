//! In-memory workbook model backing the adapter traits.
//!
//! Cells, styles, merges, panes and column widths live here until
//! [`XlsxBook::save`] hands them to [`crate::writer`].

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use crate::adapter::{
    CellAdapter, FontAdapter, RowAdapter, SheetAdapter, StyleAdapter, WorkbookAdapter,
};
use crate::conf::{
    N_BOLDWEIGHT_NORMAL, N_COLOR_INDEX_AUTOMATIC, N_FORMAT_INDEX_CUSTOM_START,
    N_UNDERLINE_NONE, N_WIDTH_COLUMN_DEFAULT, N_WIDTH_COLUMN_MAX, derive_default_book_options,
};
use crate::error::{PoiyerError, Result};
use crate::spec::{
    EnumCellType, EnumCellValue, EnumFillPattern, SpecAutofitCellsPolicy, SpecBookOptions,
    SpecCellRegion, SpecFreezePane, SpecStyleOptions,
};
use crate::util::{
    derive_builtin_format_string, estimate_width_len, find_builtin_format_index,
    validate_col_index, validate_row_index, validate_sheet_name,
};

////////////////////////////////////////////////////////////////////////////////
// #region FontAndStyle

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellFont {
    name: String,
    height: u16,
    color: u16,
    boldweight: u16,
    italic: bool,
    strikeout: bool,
    underline: u8,
}

impl CellFont {
    pub fn new(name: impl Into<String>, height: u16) -> Self {
        Self {
            name: name.into(),
            height,
            color: N_COLOR_INDEX_AUTOMATIC,
            boldweight: N_BOLDWEIGHT_NORMAL,
            italic: false,
            strikeout: false,
            underline: N_UNDERLINE_NONE,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Height in twentieths of a point.
    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn color(&self) -> u16 {
        self.color
    }

    pub fn boldweight(&self) -> u16 {
        self.boldweight
    }

    pub fn italic(&self) -> bool {
        self.italic
    }

    pub fn strikeout(&self) -> bool {
        self.strikeout
    }

    pub fn underline(&self) -> u8 {
        self.underline
    }
}

impl FontAdapter for CellFont {
    fn set_color(&mut self, color: u16) {
        self.color = color;
    }

    fn set_boldweight(&mut self, weight: u16) {
        self.boldweight = weight;
    }

    fn set_italic(&mut self, italic: bool) {
        self.italic = italic;
    }

    fn set_strikeout(&mut self, strikeout: bool) {
        self.strikeout = strikeout;
    }

    fn set_underline(&mut self, underline: u8) {
        self.underline = underline;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellStyle {
    fill_pattern: EnumFillPattern,
    fill_foreground_color: u16,
    data_format: u16,
    font: CellFont,
}

impl CellStyle {
    pub fn new(font: CellFont) -> Self {
        Self {
            fill_pattern: EnumFillPattern::None,
            fill_foreground_color: N_COLOR_INDEX_AUTOMATIC,
            data_format: 0,
            font,
        }
    }

    pub fn fill_pattern(&self) -> EnumFillPattern {
        self.fill_pattern
    }

    pub fn fill_foreground_color(&self) -> u16 {
        self.fill_foreground_color
    }

    pub fn data_format(&self) -> u16 {
        self.data_format
    }

    pub fn font(&self) -> &CellFont {
        &self.font
    }
}

impl StyleAdapter for CellStyle {
    type Font = CellFont;

    fn set_fill_pattern(&mut self, pattern: EnumFillPattern) {
        self.fill_pattern = pattern;
    }

    fn set_fill_foreground_color(&mut self, color: u16) {
        self.fill_foreground_color = color;
    }

    fn set_data_format(&mut self, format: u16) {
        self.data_format = format;
    }

    fn set_font(&mut self, font: CellFont) {
        self.font = font;
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region CellAndRow

#[derive(Debug, Clone)]
pub struct XlsxCell {
    value: EnumCellValue,
    style: CellStyle,
}

impl CellAdapter for XlsxCell {
    type Style = CellStyle;

    fn set_value(&mut self, value: EnumCellValue) {
        self.value = value;
    }

    fn value(&self) -> EnumCellValue {
        self.value.clone()
    }

    fn cell_type(&self) -> EnumCellType {
        self.value.cell_type()
    }

    fn set_style(&mut self, style: &CellStyle) {
        self.style = style.clone();
    }

    fn style(&self) -> &CellStyle {
        &self.style
    }
}

#[derive(Debug, Clone)]
pub struct XlsxRow {
    cells: BTreeMap<usize, XlsxCell>,
    style_default: CellStyle,
}

impl XlsxRow {
    fn new(style_default: CellStyle) -> Self {
        Self {
            cells: BTreeMap::new(),
            style_default,
        }
    }

    /// Existing cells in ascending column order.
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, &XlsxCell)> {
        self.cells.iter().map(|(n_idx, cell)| (*n_idx, cell))
    }
}

impl RowAdapter for XlsxRow {
    type Cell = XlsxCell;

    fn cell_mut(&mut self, index: usize) -> Result<&mut XlsxCell> {
        validate_col_index(index)?;
        let style_default = &self.style_default;
        Ok(self.cells.entry(index).or_insert_with(|| XlsxCell {
            value: EnumCellValue::None,
            style: style_default.clone(),
        }))
    }

    fn cell(&self, index: usize) -> Option<&XlsxCell> {
        self.cells.get(&index)
    }

    fn last_cell_num(&self) -> usize {
        self.cells.keys().next_back().map_or(0, |n_idx| n_idx + 1)
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Sheet

#[derive(Debug, Clone)]
pub struct XlsxSheet {
    name: String,
    rows: BTreeMap<usize, XlsxRow>,
    merged_regions: Vec<SpecCellRegion>,
    freeze_pane: Option<SpecFreezePane>,
    col_widths: BTreeMap<usize, f64>,
    style_default: CellStyle,
    policy_autofit: SpecAutofitCellsPolicy,
}

impl XlsxSheet {
    fn new(name: String, style_default: CellStyle, policy_autofit: SpecAutofitCellsPolicy) -> Self {
        Self {
            name,
            rows: BTreeMap::new(),
            merged_regions: Vec::new(),
            freeze_pane: None,
            col_widths: BTreeMap::new(),
            style_default,
            policy_autofit,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cell at `(row, col)` if it was ever touched.
    pub fn cell(&self, row: usize, col: usize) -> Option<&XlsxCell> {
        self.rows.get(&row).and_then(|r| r.cell(col))
    }

    pub fn merged_regions(&self) -> &[SpecCellRegion] {
        &self.merged_regions
    }

    pub fn merged_region_at(&self, index: usize) -> Option<&SpecCellRegion> {
        self.merged_regions.get(index)
    }

    pub fn num_merged_regions(&self) -> usize {
        self.merged_regions.len()
    }

    pub fn freeze_pane(&self) -> Option<SpecFreezePane> {
        self.freeze_pane
    }

    /// Width of `col` in character units.
    pub fn column_width(&self, col: usize) -> f64 {
        self.col_widths
            .get(&col)
            .copied()
            .unwrap_or(N_WIDTH_COLUMN_DEFAULT)
    }

    pub fn set_column_width(&mut self, col: usize, width: f64) -> Result<()> {
        validate_col_index(col)?;
        self.col_widths
            .insert(col, width.clamp(0.0, N_WIDTH_COLUMN_MAX));
        Ok(())
    }

    /// Columns whose width was set explicitly or by auto-size.
    pub fn iter_column_widths(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.col_widths.iter().map(|(n_idx, width)| (*n_idx, *width))
    }

    /// Existing rows with their indices, ascending.
    pub fn iter_indexed_rows(&self) -> impl Iterator<Item = (usize, &XlsxRow)> {
        self.rows.iter().map(|(n_idx, row)| (*n_idx, row))
    }
}

impl SheetAdapter for XlsxSheet {
    type Row = XlsxRow;

    fn row_mut(&mut self, index: usize) -> Result<&mut XlsxRow> {
        validate_row_index(index)?;
        let style_default = &self.style_default;
        Ok(self
            .rows
            .entry(index)
            .or_insert_with(|| XlsxRow::new(style_default.clone())))
    }

    fn row(&self, index: usize) -> Option<&XlsxRow> {
        self.rows.get(&index)
    }

    fn iter_rows(&self) -> impl Iterator<Item = &XlsxRow> {
        self.rows.values()
    }

    fn add_merged_region(&mut self, region: SpecCellRegion) -> Result<usize> {
        validate_row_index(region.row_to)?;
        validate_col_index(region.col_to)?;
        if region.row_from > region.row_to || region.col_from > region.col_to {
            return Err(PoiyerError::InvalidRegion(format!(
                "rows {}..={} / columns {}..={} are reversed",
                region.row_from, region.row_to, region.col_from, region.col_to
            )));
        }
        if let Some(existing) = self
            .merged_regions
            .iter()
            .find(|existing| existing.intersects(&region))
        {
            return Err(PoiyerError::InvalidRegion(format!(
                "rows {}..={} / columns {}..={} overlap rows {}..={} / columns {}..={}",
                region.row_from,
                region.row_to,
                region.col_from,
                region.col_to,
                existing.row_from,
                existing.row_to,
                existing.col_from,
                existing.col_to
            )));
        }
        self.merged_regions.push(region);
        Ok(self.merged_regions.len() - 1)
    }

    fn create_freeze_pane(&mut self, row: usize, col: usize) -> Result<()> {
        validate_row_index(row)?;
        validate_col_index(col)?;
        self.freeze_pane = if row == 0 && col == 0 {
            None
        } else {
            Some(SpecFreezePane { row, col })
        };
        Ok(())
    }

    fn auto_size_column(&mut self, col: usize) -> Result<()> {
        validate_col_index(col)?;

        let n_width_recorded = self
            .rows
            .values()
            .filter_map(|row| row.cell(col))
            .map(|cell| estimate_width_len(&cell.value))
            .max()
            .unwrap_or(0);
        if n_width_recorded == 0 {
            return Ok(());
        }

        let policy = &self.policy_autofit;
        let n_min = usize::max(1, policy.width_cell_min);
        let n_max = usize::min(255, usize::max(n_min, policy.width_cell_max));
        let n_width_final = usize::min(
            n_max,
            usize::max(n_min, n_width_recorded + policy.width_cell_padding),
        );
        self.col_widths.insert(col, n_width_final as f64);
        Ok(())
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Workbook

/// Workbook buffered in memory until [`Self::save`] or [`Self::close`].
#[derive(Debug, Clone)]
pub struct XlsxBook {
    sheets: Vec<XlsxSheet>,
    options: SpecBookOptions,
    l_formats_custom: Vec<String>,
    dict_formats_custom: HashMap<String, u16>,
    path_file_out: Option<PathBuf>,
    if_closed: bool,
}

impl Default for XlsxBook {
    fn default() -> Self {
        Self::new()
    }
}

impl XlsxBook {
    pub fn new() -> Self {
        Self::with_options(derive_default_book_options())
    }

    pub fn with_options(options: SpecBookOptions) -> Self {
        Self {
            sheets: Vec::new(),
            options,
            l_formats_custom: Vec::new(),
            dict_formats_custom: HashMap::new(),
            path_file_out: None,
            if_closed: false,
        }
    }

    /// Create a workbook that [`Self::close`] writes to `path`.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        let mut book = Self::new();
        book.path_file_out = Some(path.into());
        book
    }

    pub fn options(&self) -> &SpecBookOptions {
        &self.options
    }

    pub fn file_out(&self) -> Option<&Path> {
        self.path_file_out.as_deref()
    }

    pub fn is_closed(&self) -> bool {
        self.if_closed
    }

    /// Style every cell starts with.
    pub fn default_cell_style(&self) -> CellStyle {
        CellStyle::new(self.default_font())
    }

    fn default_font(&self) -> CellFont {
        CellFont::new(self.options.font_name.clone(), self.options.font_height)
    }

    /// Add a sheet. `None` names it `Sheet<position>`.
    pub fn create_sheet(&mut self, name: Option<&str>) -> Result<&mut XlsxSheet> {
        let c_name = match name {
            Some(val) => val.to_string(),
            None => format!("Sheet{}", self.sheets.len()),
        };
        validate_sheet_name(&c_name)?;

        let c_name_folded = c_name.to_lowercase();
        if self
            .sheets
            .iter()
            .any(|sheet| sheet.name.to_lowercase() == c_name_folded)
        {
            return Err(PoiyerError::DuplicateSheet(c_name));
        }

        let sheet = XlsxSheet::new(
            c_name,
            self.default_cell_style(),
            self.options.policy_autofit.clone(),
        );
        self.sheets.push(sheet);
        let n_idx_last = self.sheets.len() - 1;
        Ok(&mut self.sheets[n_idx_last])
    }

    /// Add a named sheet.
    pub fn add_worksheet(&mut self, name: &str) -> Result<&mut XlsxSheet> {
        self.create_sheet(Some(name))
    }

    pub fn sheet(&self, name: &str) -> Option<&XlsxSheet> {
        self.sheets.iter().find(|sheet| sheet.name == name)
    }

    pub fn sheet_mut(&mut self, name: &str) -> Option<&mut XlsxSheet> {
        self.sheets.iter_mut().find(|sheet| sheet.name == name)
    }

    pub fn sheet_at(&self, index: usize) -> Option<&XlsxSheet> {
        self.sheets.get(index)
    }

    pub fn sheet_at_mut(&mut self, index: usize) -> Option<&mut XlsxSheet> {
        self.sheets.get_mut(index)
    }

    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    pub fn iter_sheets(&self) -> impl Iterator<Item = &XlsxSheet> {
        self.sheets.iter()
    }

    /// Build a style from keyword-style options.
    pub fn create_style(&mut self, options: &SpecStyleOptions) -> CellStyle {
        crate::style::build_cell_style(self, options)
    }

    /// Index for `format`: builtin index when one matches, otherwise a custom
    /// index registered on first use. Once the custom range is exhausted,
    /// new strings fall back to General (0).
    pub fn resolve_builtin_format(&mut self, format: &str) -> u16 {
        if let Some(n_idx) = find_builtin_format_index(format) {
            return n_idx;
        }
        if let Some(n_idx) = self.dict_formats_custom.get(format) {
            return *n_idx;
        }

        let n_idx_next = u16::try_from(self.l_formats_custom.len())
            .ok()
            .and_then(|n_pos| N_FORMAT_INDEX_CUSTOM_START.checked_add(n_pos));
        let Some(n_idx) = n_idx_next else {
            log::debug!("custom number format table is full; {format:?} falls back to General");
            return 0;
        };
        self.l_formats_custom.push(format.to_string());
        self.dict_formats_custom.insert(format.to_string(), n_idx);
        n_idx
    }

    /// Format string behind a style's data format index.
    pub fn data_format_string(&self, index: u16) -> Option<&str> {
        if index < N_FORMAT_INDEX_CUSTOM_START {
            return derive_builtin_format_string(index);
        }
        self.l_formats_custom
            .get(usize::from(index - N_FORMAT_INDEX_CUSTOM_START))
            .map(String::as_str)
    }

    /// Write the workbook to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        crate::writer::write_book(self, path.as_ref())
    }

    /// Write to the path given at construction, if any. Idempotent.
    pub fn close(&mut self) -> Result<()> {
        if self.if_closed {
            return Ok(());
        }
        if let Some(path) = &self.path_file_out {
            crate::writer::write_book(self, path)?;
        }
        self.if_closed = true;
        Ok(())
    }
}

impl WorkbookAdapter for XlsxBook {
    type Style = CellStyle;
    type Sheet = XlsxSheet;

    fn create_sheet(&mut self, name: Option<&str>) -> Result<&mut XlsxSheet> {
        XlsxBook::create_sheet(self, name)
    }

    fn sheet_mut(&mut self, name: &str) -> Option<&mut XlsxSheet> {
        XlsxBook::sheet_mut(self, name)
    }

    fn create_cell_style(&mut self) -> CellStyle {
        self.default_cell_style()
    }

    fn create_font(&mut self) -> CellFont {
        self.default_font()
    }

    fn resolve_builtin_format(&mut self, format: &str) -> u16 {
        XlsxBook::resolve_builtin_format(self, format)
    }

    fn save(&mut self, path: &Path) -> Result<()> {
        XlsxBook::save(self, path)
    }

    fn close(&mut self) -> Result<()> {
        XlsxBook::close(self)
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_sheet_default_names_follow_position() {
        let mut book = XlsxBook::new();
        assert_eq!(book.create_sheet(None).unwrap().name(), "Sheet0");
        assert_eq!(book.create_sheet(None).unwrap().name(), "Sheet1");
        assert_eq!(book.sheet_count(), 2);
    }

    #[test]
    fn test_add_worksheet_is_found_by_name() {
        let mut book = XlsxBook::new();
        book.add_worksheet("Tab Title").unwrap();
        assert_eq!(book.sheet("Tab Title").map(XlsxSheet::name), Some("Tab Title"));
        assert!(book.sheet("Missing").is_none());
    }

    #[test]
    fn test_create_sheet_rejects_duplicates_case_insensitively() {
        let mut book = XlsxBook::new();
        book.add_worksheet("Data").unwrap();
        assert!(matches!(
            book.add_worksheet("DATA"),
            Err(PoiyerError::DuplicateSheet(_))
        ));
        assert!(matches!(
            book.add_worksheet("a:b"),
            Err(PoiyerError::InvalidSheetName { .. })
        ));
    }

    #[test]
    fn test_resolve_builtin_format_registers_custom_once() {
        let mut book = XlsxBook::new();
        assert_eq!(book.resolve_builtin_format("0.00%"), 0x0A);

        let n_custom = book.resolve_builtin_format("yyyy-mm-dd");
        assert_eq!(n_custom, N_FORMAT_INDEX_CUSTOM_START);
        assert_eq!(book.resolve_builtin_format("yyyy-mm-dd"), n_custom);
        assert_eq!(book.data_format_string(n_custom), Some("yyyy-mm-dd"));
        assert_eq!(book.data_format_string(0x0A), Some("0.00%"));
    }

    #[test]
    fn test_resolve_builtin_format_falls_back_when_custom_range_is_full() {
        let mut book = XlsxBook::new();
        let n_capacity = usize::from(u16::MAX - N_FORMAT_INDEX_CUSTOM_START) + 1;
        for n_idx in 0..n_capacity {
            book.resolve_builtin_format(&format!("0.{n_idx}"));
        }
        let c_last = format!("0.{}", n_capacity - 1);
        assert_eq!(book.resolve_builtin_format(&c_last), u16::MAX);
        assert_eq!(book.data_format_string(u16::MAX), Some(c_last.as_str()));

        assert_eq!(book.resolve_builtin_format("one too many"), 0);
        assert_eq!(book.resolve_builtin_format("0.00%"), 0x0A);
    }

    #[test]
    fn test_row_last_cell_num() {
        let mut book = XlsxBook::new();
        let sheet = book.create_sheet(None).unwrap();
        let row = sheet.row_mut(0).unwrap();
        assert_eq!(row.last_cell_num(), 0);
        row.cell_mut(4).unwrap();
        row.cell_mut(1).unwrap();
        assert_eq!(row.last_cell_num(), 5);
    }

    #[test]
    fn test_new_cells_start_blank_with_default_style() {
        let mut book = XlsxBook::new();
        let style_default = book.default_cell_style();
        let sheet = book.create_sheet(None).unwrap();
        let cell = sheet.row_mut(2).unwrap().cell_mut(3).unwrap();
        assert_eq!(cell.cell_type(), EnumCellType::Blank);
        assert_eq!(cell.style(), &style_default);
        assert_eq!(cell.style().font().boldweight(), N_BOLDWEIGHT_NORMAL);
    }

    #[test]
    fn test_merged_region_bookkeeping() {
        let mut book = XlsxBook::new();
        let sheet = book.create_sheet(None).unwrap();
        let n_idx = sheet
            .add_merged_region(SpecCellRegion::new(0, 3, 0, 3))
            .unwrap();
        assert_eq!(sheet.num_merged_regions(), 1);
        assert_eq!(
            sheet.merged_region_at(n_idx),
            Some(&SpecCellRegion::new(0, 3, 0, 3))
        );
        assert!(matches!(
            sheet.add_merged_region(SpecCellRegion::new(3, 0, 0, 0)),
            Err(PoiyerError::InvalidRegion(_))
        ));
    }

    #[test]
    fn test_freeze_pane_zero_clears() {
        let mut book = XlsxBook::new();
        let sheet = book.create_sheet(None).unwrap();
        sheet.create_freeze_pane(2, 4).unwrap();
        assert_eq!(sheet.freeze_pane(), Some(SpecFreezePane { row: 2, col: 4 }));
        sheet.create_freeze_pane(0, 0).unwrap();
        assert_eq!(sheet.freeze_pane(), None);
    }

    #[test]
    fn test_auto_size_column_uses_policy_bounds() {
        let mut book = XlsxBook::new();
        let sheet = book.create_sheet(None).unwrap();
        sheet
            .row_mut(0)
            .unwrap()
            .cell_mut(0)
            .unwrap()
            .set_value(EnumCellValue::from("ab"));
        sheet
            .row_mut(0)
            .unwrap()
            .cell_mut(1)
            .unwrap()
            .set_value(EnumCellValue::from("x".repeat(200)));

        sheet.auto_size_column(0).unwrap();
        sheet.auto_size_column(1).unwrap();
        sheet.auto_size_column(2).unwrap();

        assert_eq!(sheet.column_width(0), 8.0);
        assert_eq!(sheet.column_width(1), 60.0);
        assert_eq!(sheet.column_width(2), N_WIDTH_COLUMN_DEFAULT);
    }

    #[test]
    fn test_set_column_width_clamps_and_indexes_by_position() {
        let mut book = XlsxBook::new();
        book.create_sheet(None).unwrap();
        let sheet = book.sheet_at_mut(0).unwrap();
        sheet.set_column_width(1, 300.0).unwrap();
        sheet.set_column_width(2, 12.5).unwrap();

        let sheet = book.sheet_at(0).unwrap();
        assert_eq!(sheet.column_width(1), N_WIDTH_COLUMN_MAX);
        assert_eq!(sheet.column_width(2), 12.5);
        assert_eq!(sheet.iter_column_widths().count(), 2);
        assert!(book.sheet_at(1).is_none());
    }

    #[test]
    fn test_close_without_path_is_noop_and_idempotent() {
        let mut book = XlsxBook::new();
        book.close().unwrap();
        assert!(book.is_closed());
        book.close().unwrap();
    }
}
