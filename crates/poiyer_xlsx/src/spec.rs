//! Shared value, token, option and policy models.

use std::collections::BTreeMap;
use std::fmt;

use crate::conf::{derive_default_autofit_policy, derive_default_book_options};

////////////////////////////////////////////////////////////////////////////////
// #region CellValueSpecification

/// Excel error codes a cell can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumCellError {
    /// `#NULL!`
    Null,
    /// `#DIV/0!`
    Div0,
    /// `#VALUE!`
    Value,
    /// `#REF!`
    Ref,
    /// `#NAME?`
    Name,
    /// `#NUM!`
    Num,
    /// `#N/A`
    NA,
}

impl EnumCellError {
    /// Raw error byte as stored in the file format.
    pub fn code(self) -> u8 {
        match self {
            EnumCellError::Null => 0x00,
            EnumCellError::Div0 => 0x07,
            EnumCellError::Value => 0x0F,
            EnumCellError::Ref => 0x17,
            EnumCellError::Name => 0x1D,
            EnumCellError::Num => 0x24,
            EnumCellError::NA => 0x2A,
        }
    }

    /// Inverse of [`Self::code`].
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0x00 => Some(EnumCellError::Null),
            0x07 => Some(EnumCellError::Div0),
            0x0F => Some(EnumCellError::Value),
            0x17 => Some(EnumCellError::Ref),
            0x1D => Some(EnumCellError::Name),
            0x24 => Some(EnumCellError::Num),
            0x2A => Some(EnumCellError::NA),
            _ => None,
        }
    }

    /// Literal shown by spreadsheet applications.
    pub fn as_str(self) -> &'static str {
        match self {
            EnumCellError::Null => "#NULL!",
            EnumCellError::Div0 => "#DIV/0!",
            EnumCellError::Value => "#VALUE!",
            EnumCellError::Ref => "#REF!",
            EnumCellError::Name => "#NAME?",
            EnumCellError::Num => "#NUM!",
            EnumCellError::NA => "#N/A",
        }
    }
}

/// Type tag a cell carries after a value has been set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EnumCellType {
    /// Never written, or written with `None`.
    #[default]
    Blank,
    /// Numeric value.
    Numeric,
    /// Text value.
    String,
    /// Boolean value.
    Boolean,
    /// Formula text.
    Formula,
    /// Error code.
    Error,
}

/// Typed cell value, both for writes and for read-back.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EnumCellValue {
    /// Missing/blank value.
    #[default]
    None,
    /// Numeric value.
    Number(f64),
    /// Text value.
    String(String),
    /// Boolean value.
    Boolean(bool),
    /// Formula text without the leading `=`.
    Formula(String),
    /// Error value.
    Error(EnumCellError),
}

impl EnumCellValue {
    /// Type tag the collaborator assigns to this value.
    pub fn cell_type(&self) -> EnumCellType {
        match self {
            EnumCellValue::None => EnumCellType::Blank,
            EnumCellValue::Number(_) => EnumCellType::Numeric,
            EnumCellValue::String(_) => EnumCellType::String,
            EnumCellValue::Boolean(_) => EnumCellType::Boolean,
            EnumCellValue::Formula(_) => EnumCellType::Formula,
            EnumCellValue::Error(_) => EnumCellType::Error,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, EnumCellValue::None)
    }
}

impl fmt::Display for EnumCellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnumCellValue::None => Ok(()),
            EnumCellValue::Number(n) => write!(f, "{n:?}"),
            EnumCellValue::String(s) => f.write_str(s),
            EnumCellValue::Boolean(true) => f.write_str("TRUE"),
            EnumCellValue::Boolean(false) => f.write_str("FALSE"),
            EnumCellValue::Formula(s) => f.write_str(s),
            EnumCellValue::Error(err) => f.write_str(err.as_str()),
        }
    }
}

macro_rules! impl_cell_value_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for EnumCellValue {
                fn from(value: $ty) -> Self {
                    EnumCellValue::Number(f64::from(value))
                }
            }
        )*
    };
}

impl_cell_value_from_number!(f64, f32, i32, u32, i16, u16, i8, u8);

impl From<bool> for EnumCellValue {
    fn from(value: bool) -> Self {
        EnumCellValue::Boolean(value)
    }
}

impl From<&str> for EnumCellValue {
    fn from(value: &str) -> Self {
        EnumCellValue::String(value.to_string())
    }
}

impl From<String> for EnumCellValue {
    fn from(value: String) -> Self {
        EnumCellValue::String(value)
    }
}

impl From<EnumCellError> for EnumCellValue {
    fn from(value: EnumCellError) -> Self {
        EnumCellValue::Error(value)
    }
}

impl<T: Into<EnumCellValue>> From<Option<T>> for EnumCellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(EnumCellValue::None, Into::into)
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region WriteTokenSpecification

/// Value or nested sequence of values handed to the grid writer.
#[derive(Debug, Clone, PartialEq)]
pub enum EnumWriteToken {
    /// One cell.
    Scalar(EnumCellValue),
    /// Sequence laid out along one axis; its nested members use the other.
    Nested(Vec<EnumWriteToken>),
}

macro_rules! impl_write_token_from_scalar {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for EnumWriteToken {
                fn from(value: $ty) -> Self {
                    EnumWriteToken::Scalar(EnumCellValue::from(value))
                }
            }
        )*
    };
}

impl_write_token_from_scalar!(
    f64,
    f32,
    i32,
    u32,
    i16,
    u16,
    i8,
    u8,
    bool,
    &str,
    String,
    EnumCellError
);

impl From<EnumCellValue> for EnumWriteToken {
    fn from(value: EnumCellValue) -> Self {
        EnumWriteToken::Scalar(value)
    }
}

impl<T: Into<EnumCellValue>> From<Option<T>> for EnumWriteToken {
    fn from(value: Option<T>) -> Self {
        EnumWriteToken::Scalar(value.into())
    }
}

impl<T: Into<EnumWriteToken>> From<Vec<T>> for EnumWriteToken {
    fn from(values: Vec<T>) -> Self {
        EnumWriteToken::Nested(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<EnumWriteToken>, const N: usize> From<[T; N]> for EnumWriteToken {
    fn from(values: [T; N]) -> Self {
        EnumWriteToken::Nested(values.into_iter().map(Into::into).collect())
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region StyleOptionSpecification

/// Fill patterns understood by the style model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EnumFillPattern {
    /// No fill.
    #[default]
    None,
    /// Solid fill using the foreground color.
    SolidForeground,
}

/// Value of the `bold` option: a flag or a raw weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumBoldOption {
    /// `true` maps to bold weight, `false` to normal weight.
    Flag(bool),
    /// Weight passed through unchanged.
    Weight(u16),
}

impl From<bool> for EnumBoldOption {
    fn from(value: bool) -> Self {
        EnumBoldOption::Flag(value)
    }
}

impl From<u16> for EnumBoldOption {
    fn from(value: u16) -> Self {
        EnumBoldOption::Weight(value)
    }
}

/// Scalar value for the loose option-map representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumStyleOptionValue {
    /// String option value.
    String(String),
    /// Integer option value.
    Integer(i64),
    /// Boolean option value.
    Boolean(bool),
}

impl From<&str> for EnumStyleOptionValue {
    fn from(value: &str) -> Self {
        EnumStyleOptionValue::String(value.to_string())
    }
}

impl From<i64> for EnumStyleOptionValue {
    fn from(value: i64) -> Self {
        EnumStyleOptionValue::Integer(value)
    }
}

impl From<bool> for EnumStyleOptionValue {
    fn from(value: bool) -> Self {
        EnumStyleOptionValue::Boolean(value)
    }
}

/// Options understood by the style builder. Every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecStyleOptions {
    /// Solid background color name.
    pub bg_color: Option<String>,
    /// Named format key or literal number format.
    pub format: Option<String>,
    /// Font color name.
    pub color: Option<String>,
    /// Bold flag or weight.
    pub bold: Option<EnumBoldOption>,
    /// Italic font.
    pub italic: Option<bool>,
    /// Struck-out font.
    pub strikeout: Option<bool>,
    /// Underline; only `Some(true)` has an effect.
    pub underline: Option<bool>,
}

impl SpecStyleOptions {
    pub fn with_bg_color(mut self, name: impl Into<String>) -> Self {
        self.bg_color = Some(name.into());
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn with_color(mut self, name: impl Into<String>) -> Self {
        self.color = Some(name.into());
        self
    }

    pub fn with_bold(mut self, bold: impl Into<EnumBoldOption>) -> Self {
        self.bold = Some(bold.into());
        self
    }

    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = Some(italic);
        self
    }

    pub fn with_strikeout(mut self, strikeout: bool) -> Self {
        self.strikeout = Some(strikeout);
        self
    }

    pub fn with_underline(mut self, underline: bool) -> Self {
        self.underline = Some(underline);
        self
    }

    /// True when any option that needs a font is present.
    pub fn has_font_options(&self) -> bool {
        self.color.is_some()
            || self.bold.is_some()
            || self.italic.is_some()
            || self.strikeout.is_some()
            || self.underline.is_some()
    }

    /// Read options from a loose key/value map.
    ///
    /// Unknown keys are ignored. Values of the wrong shape for a known key are
    /// dropped, except `underline`, whose presence alone still requests a font.
    pub fn from_map(dict_opts: &BTreeMap<String, EnumStyleOptionValue>) -> Self {
        let mut opts = SpecStyleOptions::default();

        for (c_key, value) in dict_opts {
            match (c_key.as_str(), value) {
                ("bg_color", EnumStyleOptionValue::String(s)) => {
                    opts.bg_color = Some(s.clone());
                }
                ("format", EnumStyleOptionValue::String(s)) => {
                    opts.format = Some(s.clone());
                }
                ("color", EnumStyleOptionValue::String(s)) => {
                    opts.color = Some(s.clone());
                }
                ("bold", EnumStyleOptionValue::Boolean(b)) => {
                    opts.bold = Some(EnumBoldOption::Flag(*b));
                }
                ("bold", EnumStyleOptionValue::Integer(n)) => match u16::try_from(*n) {
                    Ok(n_weight) => opts.bold = Some(EnumBoldOption::Weight(n_weight)),
                    Err(_) => log::debug!("ignoring out-of-range bold weight {n}"),
                },
                ("italic", EnumStyleOptionValue::Boolean(b)) => {
                    opts.italic = Some(*b);
                }
                ("strikeout", EnumStyleOptionValue::Boolean(b)) => {
                    opts.strikeout = Some(*b);
                }
                ("underline", EnumStyleOptionValue::Boolean(b)) => {
                    opts.underline = Some(*b);
                }
                ("underline", _) => {
                    opts.underline = Some(false);
                }
                (
                    "bg_color" | "format" | "color" | "bold" | "italic" | "strikeout",
                    other,
                ) => {
                    log::debug!("ignoring style option {c_key:?} with value {other:?}");
                }
                _ => {}
            }
        }

        opts
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetLayoutSpecification

/// Inclusive rectangular merge region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpecCellRegion {
    /// First row.
    pub row_from: usize,
    /// Last row (inclusive).
    pub row_to: usize,
    /// First column.
    pub col_from: usize,
    /// Last column (inclusive).
    pub col_to: usize,
}

impl SpecCellRegion {
    pub fn new(row_from: usize, row_to: usize, col_from: usize, col_to: usize) -> Self {
        Self {
            row_from,
            row_to,
            col_from,
            col_to,
        }
    }

    /// True when the region covers exactly one cell.
    pub fn is_single_cell(&self) -> bool {
        self.row_from == self.row_to && self.col_from == self.col_to
    }

    /// True when the two regions share at least one cell.
    pub fn intersects(&self, other: &SpecCellRegion) -> bool {
        self.row_from <= other.row_to
            && other.row_from <= self.row_to
            && self.col_from <= other.col_to
            && other.col_from <= self.col_to
    }
}

/// Frozen split position: rows above `row` and columns left of `col` stay put.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpecFreezePane {
    /// Number of frozen rows.
    pub row: usize,
    /// Number of frozen columns.
    pub col: usize,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region BookOptions

/// Autofit policy applied by `auto_size_column`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecAutofitCellsPolicy {
    /// Minimum final width.
    pub width_cell_min: usize,
    /// Maximum final width.
    pub width_cell_max: usize,
    /// Width padding added after inference.
    pub width_cell_padding: usize,
}

impl Default for SpecAutofitCellsPolicy {
    fn default() -> Self {
        derive_default_autofit_policy()
    }
}

/// Workbook-wide defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecBookOptions {
    /// Font family of the default font.
    pub font_name: String,
    /// Default font height in twentieths of a point.
    pub font_height: u16,
    /// Column auto-size policy.
    pub policy_autofit: SpecAutofitCellsPolicy,
}

impl Default for SpecBookOptions {
    fn default() -> Self {
        derive_default_book_options()
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_token_from_nested_vec() {
        let token = EnumWriteToken::from(vec![vec![1.0, 2.0]]);
        assert_eq!(
            token,
            EnumWriteToken::Nested(vec![EnumWriteToken::Nested(vec![
                EnumWriteToken::Scalar(EnumCellValue::Number(1.0)),
                EnumWriteToken::Scalar(EnumCellValue::Number(2.0)),
            ])])
        );
    }

    #[test]
    fn test_cell_region_intersects() {
        let region = SpecCellRegion::new(0, 2, 0, 2);
        assert!(region.intersects(&SpecCellRegion::new(1, 3, 1, 3)));
        assert!(region.intersects(&SpecCellRegion::new(2, 2, 2, 2)));
        assert!(!region.intersects(&SpecCellRegion::new(3, 4, 0, 2)));
        assert!(!region.intersects(&SpecCellRegion::new(0, 2, 3, 3)));
    }

    #[test]
    fn test_option_maps_to_none_scalar() {
        let token = EnumWriteToken::from(None::<&str>);
        assert_eq!(token, EnumWriteToken::Scalar(EnumCellValue::None));
    }

    #[test]
    fn test_cell_value_display() {
        assert_eq!(EnumCellValue::None.to_string(), "");
        assert_eq!(EnumCellValue::Number(1.0).to_string(), "1.0");
        assert_eq!(EnumCellValue::Boolean(false).to_string(), "FALSE");
        assert_eq!(EnumCellValue::Error(EnumCellError::Div0).to_string(), "#DIV/0!");
    }

    #[test]
    fn test_cell_error_code_roundtrip_for_every_variant() {
        for err in [
            EnumCellError::Null,
            EnumCellError::Div0,
            EnumCellError::Value,
            EnumCellError::Ref,
            EnumCellError::Name,
            EnumCellError::Num,
            EnumCellError::NA,
        ] {
            assert_eq!(EnumCellError::from_code(err.code()), Some(err));
        }
        assert_eq!(EnumCellError::from_code(0x01), None);
    }

    #[test]
    fn test_style_options_from_map_ignores_unknown_keys() {
        let dict_opts = BTreeMap::from([
            ("bold".to_string(), EnumStyleOptionValue::from(true)),
            ("shadow".to_string(), EnumStyleOptionValue::from(true)),
            ("format".to_string(), EnumStyleOptionValue::from("currency")),
        ]);

        let opts = SpecStyleOptions::from_map(&dict_opts);
        assert_eq!(
            opts,
            SpecStyleOptions::default()
                .with_bold(true)
                .with_format("currency")
        );
    }

    #[test]
    fn test_style_options_from_map_keeps_underline_presence() {
        let dict_opts = BTreeMap::from([(
            "underline".to_string(),
            EnumStyleOptionValue::from("double"),
        )]);

        let opts = SpecStyleOptions::from_map(&dict_opts);
        assert_eq!(opts.underline, Some(false));
        assert!(opts.has_font_options());
    }

    #[test]
    fn test_style_options_from_map_bold_weight() {
        let dict_opts = BTreeMap::from([
            ("bold".to_string(), EnumStyleOptionValue::from(100_i64)),
            ("italic".to_string(), EnumStyleOptionValue::from("yes")),
        ]);

        let opts = SpecStyleOptions::from_map(&dict_opts);
        assert_eq!(opts.bold, Some(EnumBoldOption::Weight(100)));
        assert_eq!(opts.italic, None);
    }
}
