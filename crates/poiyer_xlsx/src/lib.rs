//! `poiyer_xlsx`:
//! Sugar for building spreadsheets cell by cell.
//!
//! Modules:
//! - `conf`    : constants, lookup tables and default presets
//! - `spec`    : cell values, write tokens, style options and policies
//! - `error`   : crate error type
//! - `adapter` : traits a spreadsheet object model implements
//! - `util`    : pure lookup and validation helpers
//! - `grid`    : nested-array writes and typed read-back
//! - `style`   : style/font construction from options
//! - `layout`  : merge, freeze and auto-size helpers
//! - `book`    : in-memory workbook model
//! - `writer`  : `rust_xlsxwriter` output on save
pub mod adapter;
pub mod book;
pub mod conf;
pub mod error;
pub mod grid;
pub mod layout;
pub mod spec;
pub mod style;
pub mod util;
mod writer;

pub use adapter::{
    CellAdapter, FontAdapter, RowAdapter, SheetAdapter, SheetStyle, StyleAdapter, WorkbookAdapter,
};
pub use book::{CellFont, CellStyle, XlsxBook, XlsxCell, XlsxRow, XlsxSheet};
pub use conf::{
    N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX, TUP_BUILTIN_FORMATS,
    TUP_EXCEL_ILLEGAL, TUP_NAMED_BUILTIN_FORMATS, TUP_NAMED_COLORS,
};
pub use error::{EnumAxis, PoiyerError, Result};
pub use grid::{read_cell, set_cell, write, write_column, write_row};
pub use layout::{auto_size_columns, freeze_columns, freeze_panes, freeze_rows, merge_region};
pub use spec::{
    EnumBoldOption, EnumCellError, EnumCellType, EnumCellValue, EnumFillPattern,
    EnumStyleOptionValue, EnumWriteToken, SpecAutofitCellsPolicy, SpecBookOptions,
    SpecCellRegion, SpecFreezePane, SpecStyleOptions,
};
pub use style::{apply_style_options, build_cell_style};
pub use util::{lookup_color_index, lookup_color_index_strict, resolve_named_format};
