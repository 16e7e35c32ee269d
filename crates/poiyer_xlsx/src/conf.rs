//! Workbook constants, named lookup tables and default preset factories.

use crate::spec::{SpecAutofitCellsPolicy, SpecBookOptions};

////////////////////////////////////////////////////////////////////////////////
// #region ExcelLimits

/// Excel worksheet maximum row count.
pub const N_NROWS_EXCEL_MAX: usize = 1_048_576;
/// Excel worksheet maximum column count.
pub const N_NCOLS_EXCEL_MAX: usize = 16_384;
/// Excel sheet name maximum length.
pub const N_LEN_EXCEL_SHEET_NAME_MAX: usize = 31;
/// Characters not allowed in sheet names.
pub const TUP_EXCEL_ILLEGAL: [&str; 7] = ["*", ":", "?", "/", "\\", "[", "]"];
/// Maximum column width accepted by Excel, in character units.
pub const N_WIDTH_COLUMN_MAX: f64 = 255.0;
/// Width of a column nobody has sized, in character units.
pub const N_WIDTH_COLUMN_DEFAULT: f64 = 8.43;

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region FontConstants

/// Font weight for regular text.
pub const N_BOLDWEIGHT_NORMAL: u16 = 400;
/// Font weight for bold text.
pub const N_BOLDWEIGHT_BOLD: u16 = 700;
/// No underline.
pub const N_UNDERLINE_NONE: u8 = 0;
/// Single underline.
pub const N_UNDERLINE_SINGLE: u8 = 1;
/// Palette index meaning "automatic" font color.
pub const N_COLOR_INDEX_AUTOMATIC: u16 = 0x7FFF;
/// Default font family.
pub const C_FONT_NAME_DEFAULT: &str = "Arial";
/// Default font height in twentieths of a point.
pub const N_FONT_HEIGHT_DEFAULT: u16 = 200;

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region NamedColors

/// One entry of the legacy indexed color palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecNamedColor {
    /// Symbolic name.
    pub name: &'static str,
    /// Palette index stored in styles and fonts.
    pub index: u16,
    /// `0xRRGGBB` value of the palette slot.
    pub rgb: u32,
}

const fn named_color(name: &'static str, index: u16, rgb: u32) -> SpecNamedColor {
    SpecNamedColor { name, index, rgb }
}

/// Symbolic colors in lookup order. Entry 0 is the fallback for unknown names.
pub const TUP_NAMED_COLORS: [SpecNamedColor; 47] = [
    named_color("black", 8, 0x000000),
    named_color("brown", 60, 0x993300),
    named_color("olive_green", 59, 0x333300),
    named_color("dark_green", 58, 0x003300),
    named_color("dark_teal", 56, 0x003366),
    named_color("dark_blue", 18, 0x000080),
    named_color("indigo", 62, 0x333399),
    named_color("grey_80_percent", 63, 0x333333),
    named_color("orange", 53, 0xFF6600),
    named_color("dark_yellow", 19, 0x808000),
    named_color("green", 17, 0x008000),
    named_color("teal", 21, 0x008080),
    named_color("blue", 12, 0x0000FF),
    named_color("blue_grey", 54, 0x666699),
    named_color("grey_50_percent", 23, 0x808080),
    named_color("red", 10, 0xFF0000),
    named_color("light_orange", 52, 0xFF9900),
    named_color("lime", 50, 0x99CC00),
    named_color("sea_green", 57, 0x339966),
    named_color("aqua", 49, 0x33CCCC),
    named_color("light_blue", 48, 0x3366FF),
    named_color("violet", 20, 0x800080),
    named_color("grey_40_percent", 55, 0x969696),
    named_color("pink", 14, 0xFF00FF),
    named_color("gold", 51, 0xFFCC00),
    named_color("yellow", 13, 0xFFFF00),
    named_color("bright_green", 11, 0x00FF00),
    named_color("turquoise", 15, 0x00FFFF),
    named_color("dark_red", 16, 0x800000),
    named_color("sky_blue", 40, 0x00CCFF),
    named_color("plum", 61, 0x993366),
    named_color("grey_25_percent", 22, 0xC0C0C0),
    named_color("rose", 45, 0xFF99CC),
    named_color("light_yellow", 43, 0xFFFF99),
    named_color("light_green", 42, 0xCCFFCC),
    named_color("light_turquoise", 41, 0xCCFFFF),
    named_color("pale_blue", 44, 0x99CCFF),
    named_color("lavender", 46, 0xCC99FF),
    named_color("white", 9, 0xFFFFFF),
    named_color("cornflower_blue", 24, 0x9999FF),
    named_color("lemon_chiffon", 26, 0xFFFFCC),
    named_color("maroon", 25, 0x7F0000),
    named_color("orchid", 28, 0x660066),
    named_color("coral", 29, 0xFF8080),
    named_color("royal_blue", 30, 0x0066CC),
    named_color("light_cornflower_blue", 31, 0xCCCCFF),
    named_color("tan", 47, 0xFFCC99),
];

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region NumberFormats

/// Short names accepted by the `format` style option.
pub const TUP_NAMED_BUILTIN_FORMATS: [(&str, &str); 6] = [
    ("currency", "($#,##0_);($#,##0)"),
    ("currency_colored", "($#,##0_);[Red]($#,##0)"),
    ("currency_precision", "($#,##0.00);($#,##0.00)"),
    ("currency_precision_colored", "($#,##0.00_);[Red]($#,##0.00)"),
    ("percent", "0%"),
    ("percent_precision", "0.00%"),
];

/// Builtin number formats by index. Slots `0x17..=0x24` are reserved.
pub const TUP_BUILTIN_FORMATS: [Option<&str>; 50] = [
    Some("General"),
    Some("0"),
    Some("0.00"),
    Some("#,##0"),
    Some("#,##0.00"),
    Some("($#,##0_);($#,##0)"),
    Some("($#,##0_);[Red]($#,##0)"),
    Some("($#,##0.00);($#,##0.00)"),
    Some("($#,##0.00_);[Red]($#,##0.00)"),
    Some("0%"),
    Some("0.00%"),
    Some("0.00E+00"),
    Some("# ?/?"),
    Some("# ??/??"),
    Some("m/d/yy"),
    Some("d-mmm-yy"),
    Some("d-mmm"),
    Some("mmm-yy"),
    Some("h:mm AM/PM"),
    Some("h:mm:ss AM/PM"),
    Some("h:mm"),
    Some("h:mm:ss"),
    Some("m/d/yy h:mm"),
    None,
    None,
    None,
    None,
    None,
    None,
    None,
    None,
    None,
    None,
    None,
    None,
    None,
    None,
    Some("(#,##0_);(#,##0)"),
    Some("(#,##0_);[Red](#,##0)"),
    Some("(#,##0.00_);(#,##0.00)"),
    Some("(#,##0.00_);[Red](#,##0.00)"),
    Some("_(*#,##0_);_(*(#,##0);_(* \"-\"_);_(@_)"),
    Some("_($*#,##0_);_($*(#,##0);_($* \"-\"_);_(@_)"),
    Some("_(*#,##0.00_);_(*(#,##0.00);_(*\"-\"??_);_(@_)"),
    Some("_($*#,##0.00_);_($*(#,##0.00);_($*\"-\"??_);_(@_)"),
    Some("mm:ss"),
    Some("[h]:mm:ss"),
    Some("mm:ss.0"),
    Some("##0.0E+0"),
    Some("@"),
];

/// First index handed out to user-defined number formats.
pub const N_FORMAT_INDEX_CUSTOM_START: u16 = 164;

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region DefaultPresets

/// Smallest width an auto-sized column gets.
pub const N_WIDTH_CELL_MIN_DEFAULT: usize = 8;
/// Largest width an auto-sized column gets.
pub const N_WIDTH_CELL_MAX_DEFAULT: usize = 60;
/// Padding added to the estimated content width.
pub const N_WIDTH_CELL_PADDING_DEFAULT: usize = 2;

/// Build the default autofit policy used by `auto_size_column`.
pub fn derive_default_autofit_policy() -> SpecAutofitCellsPolicy {
    SpecAutofitCellsPolicy {
        width_cell_min: N_WIDTH_CELL_MIN_DEFAULT,
        width_cell_max: N_WIDTH_CELL_MAX_DEFAULT,
        width_cell_padding: N_WIDTH_CELL_PADDING_DEFAULT,
    }
}

/// Build default workbook options.
pub fn derive_default_book_options() -> SpecBookOptions {
    SpecBookOptions {
        font_name: C_FONT_NAME_DEFAULT.to_string(),
        font_height: N_FONT_HEIGHT_DEFAULT,
        policy_autofit: derive_default_autofit_policy(),
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
