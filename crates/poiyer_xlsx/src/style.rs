//! Style builder: turns [`SpecStyleOptions`] into setter calls on a workbook's
//! style and font objects.

use crate::adapter::{FontAdapter, StyleAdapter, WorkbookAdapter};
use crate::conf::{N_BOLDWEIGHT_BOLD, N_BOLDWEIGHT_NORMAL, N_UNDERLINE_SINGLE};
use crate::spec::{EnumBoldOption, EnumFillPattern, SpecStyleOptions};
use crate::util::{lookup_color_index, resolve_named_format};

/// Create a fresh style from `book` and apply `options` to it.
pub fn build_cell_style<B: WorkbookAdapter>(book: &mut B, options: &SpecStyleOptions) -> B::Style {
    let mut style = book.create_cell_style();
    apply_style_options(book, &mut style, options);
    style
}

/// Apply `options` to an existing style.
///
/// Font options share one new font, assigned to the style after all of them
/// are applied. `underline` only acts on `Some(true)`.
pub fn apply_style_options<B: WorkbookAdapter>(
    book: &mut B,
    style: &mut B::Style,
    options: &SpecStyleOptions,
) {
    if let Some(c_color) = &options.bg_color {
        style.set_fill_pattern(EnumFillPattern::SolidForeground);
        style.set_fill_foreground_color(lookup_color_index(c_color));
    }

    if let Some(c_format) = &options.format {
        let n_format = book.resolve_builtin_format(resolve_named_format(c_format));
        style.set_data_format(n_format);
    }

    if !options.has_font_options() {
        return;
    }

    let mut font = book.create_font();
    if let Some(c_color) = &options.color {
        font.set_color(lookup_color_index(c_color));
    }
    if let Some(bold) = options.bold {
        font.set_boldweight(match bold {
            EnumBoldOption::Flag(true) => N_BOLDWEIGHT_BOLD,
            EnumBoldOption::Flag(false) => N_BOLDWEIGHT_NORMAL,
            EnumBoldOption::Weight(n_weight) => n_weight,
        });
    }
    if let Some(italic) = options.italic {
        font.set_italic(italic);
    }
    if let Some(strikeout) = options.strikeout {
        font.set_strikeout(strikeout);
    }
    if options.underline == Some(true) {
        font.set_underline(N_UNDERLINE_SINGLE);
    }
    style.set_font(font);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::XlsxBook;
    use crate::conf::{N_COLOR_INDEX_AUTOMATIC, N_UNDERLINE_NONE, TUP_NAMED_BUILTIN_FORMATS};
    use crate::spec::{EnumStyleOptionValue, SpecStyleOptions};
    use std::collections::BTreeMap;

    #[test]
    fn test_bg_color_sets_solid_fill() {
        let mut book = XlsxBook::new();
        let style = build_cell_style(&mut book, &SpecStyleOptions::default().with_bg_color("lime"));

        assert_eq!(style.fill_pattern(), EnumFillPattern::SolidForeground);
        assert_eq!(style.fill_foreground_color(), 50);
    }

    #[test]
    fn test_unknown_bg_color_falls_back_to_black() {
        let mut book = XlsxBook::new();
        let style = build_cell_style(
            &mut book,
            &SpecStyleOptions::default().with_bg_color("not-a-color"),
        );

        assert_eq!(style.fill_foreground_color(), 8);
    }

    #[test]
    fn test_raw_builtin_format() {
        let mut book = XlsxBook::new();
        let c_fmt = "($#,##0_);[Red]($#,##0)";
        let style = build_cell_style(&mut book, &SpecStyleOptions::default().with_format(c_fmt));

        assert_eq!(book.data_format_string(style.data_format()), Some(c_fmt));

        let style_pct = build_cell_style(&mut book, &SpecStyleOptions::default().with_format("0.00%"));
        assert_eq!(style_pct.data_format(), 0x0A);
    }

    #[test]
    fn test_named_builtin_format() {
        let mut book = XlsxBook::new();
        for (c_name, c_fmt) in TUP_NAMED_BUILTIN_FORMATS {
            let style =
                build_cell_style(&mut book, &SpecStyleOptions::default().with_format(c_name));
            assert_eq!(book.data_format_string(style.data_format()), Some(c_fmt));
        }
    }

    #[test]
    fn test_named_currency_resolves_to_builtin_five() {
        let mut book = XlsxBook::new();
        let style =
            build_cell_style(&mut book, &SpecStyleOptions::default().with_format("currency"));

        assert_eq!(style.data_format(), 5);
        assert_eq!(
            book.data_format_string(style.data_format()),
            Some("($#,##0_);($#,##0)")
        );
    }

    #[test]
    fn test_font_color() {
        let mut book = XlsxBook::new();
        let style = build_cell_style(&mut book, &SpecStyleOptions::default().with_color("blue"));

        assert_eq!(style.font().color(), lookup_color_index("blue"));
    }

    #[test]
    fn test_bold_flag_and_weight() {
        let mut book = XlsxBook::new();
        let style_bold = build_cell_style(&mut book, &SpecStyleOptions::default().with_bold(true));
        let style_normal =
            build_cell_style(&mut book, &SpecStyleOptions::default().with_bold(false));
        let style_weight =
            build_cell_style(&mut book, &SpecStyleOptions::default().with_bold(100_u16));

        assert_eq!(style_bold.font().boldweight(), N_BOLDWEIGHT_BOLD);
        assert_eq!(style_normal.font().boldweight(), N_BOLDWEIGHT_NORMAL);
        assert_eq!(style_weight.font().boldweight(), 100);
    }

    #[test]
    fn test_italic_and_strikeout() {
        let mut book = XlsxBook::new();
        let style = build_cell_style(
            &mut book,
            &SpecStyleOptions::default()
                .with_italic(true)
                .with_strikeout(true),
        );

        assert!(style.font().italic());
        assert!(style.font().strikeout());
    }

    #[test]
    fn test_underline_only_true_has_effect() {
        let mut book = XlsxBook::new();
        let style_on =
            build_cell_style(&mut book, &SpecStyleOptions::default().with_underline(true));
        let style_off =
            build_cell_style(&mut book, &SpecStyleOptions::default().with_underline(false));

        assert_eq!(style_on.font().underline(), N_UNDERLINE_SINGLE);
        assert_eq!(style_off.font().underline(), N_UNDERLINE_NONE);
    }

    #[test]
    fn test_font_options_share_one_font() {
        let mut book = XlsxBook::new();
        let style = build_cell_style(
            &mut book,
            &SpecStyleOptions::default()
                .with_color("red")
                .with_bold(true)
                .with_underline(true),
        );

        let font = style.font();
        assert_eq!(font.color(), lookup_color_index("red"));
        assert_eq!(font.boldweight(), N_BOLDWEIGHT_BOLD);
        assert_eq!(font.underline(), N_UNDERLINE_SINGLE);
    }

    #[test]
    fn test_no_options_leaves_default_style() {
        let mut book = XlsxBook::new();
        let style = build_cell_style(&mut book, &SpecStyleOptions::default());

        assert_eq!(style, book.default_cell_style());
        assert_eq!(style.font().color(), N_COLOR_INDEX_AUTOMATIC);
    }

    #[test]
    fn test_apply_to_existing_style_keeps_earlier_settings() {
        let mut book = XlsxBook::new();
        let mut style = build_cell_style(&mut book, &SpecStyleOptions::default().with_bg_color("red"));
        apply_style_options(&mut book, &mut style, &SpecStyleOptions::default().with_italic(true));

        assert_eq!(style.fill_foreground_color(), lookup_color_index("red"));
        assert!(style.font().italic());
    }

    #[test]
    fn test_options_from_map_build_the_same_style() {
        let mut book = XlsxBook::new();
        let dict_opts = BTreeMap::from([
            ("bg_color".to_string(), EnumStyleOptionValue::from("lime")),
            ("bold".to_string(), EnumStyleOptionValue::from(true)),
            ("unknown".to_string(), EnumStyleOptionValue::from(1_i64)),
        ]);

        let style_map = build_cell_style(&mut book, &SpecStyleOptions::from_map(&dict_opts));
        let style_typed = build_cell_style(
            &mut book,
            &SpecStyleOptions::default()
                .with_bg_color("lime")
                .with_bold(true),
        );
        assert_eq!(style_map, style_typed);
    }
}
