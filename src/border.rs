//! Border drawing characters for tables.
//!
//! Each named [`BorderStyle`] resolves to a constant [`BorderChars`] set of 15
//! glyphs. [`render_separator`] builds the horizontal rules drawn above the
//! header, between header and body, and below the last row.

use std::fmt;

/// The 15 glyphs of one border style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BorderChars {
    pub top: char,
    pub bottom: char,
    pub left: char,
    pub right: char,
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
    /// Interior intersection: ┼
    pub cross: char,
    /// Top edge T-junction: ┬
    pub top_cross: char,
    /// Bottom edge T-junction: ┴
    pub bottom_cross: char,
    /// Left edge T-junction: ├
    pub left_cross: char,
    /// Right edge T-junction: ┤
    pub right_cross: char,
    pub horizontal: char,
    pub vertical: char,
}

impl BorderChars {
    /// Build a set from the four corners, the five junctions and the two
    /// line glyphs. Edge glyphs repeat the line glyphs.
    #[must_use]
    #[expect(
        clippy::too_many_arguments,
        reason = "const constructor names every glyph"
    )]
    pub const fn new(
        top_left: char,
        top_right: char,
        bottom_left: char,
        bottom_right: char,
        cross: char,
        top_cross: char,
        bottom_cross: char,
        left_cross: char,
        right_cross: char,
        horizontal: char,
        vertical: char,
    ) -> Self {
        Self {
            top: horizontal,
            bottom: horizontal,
            left: vertical,
            right: vertical,
            top_left,
            top_right,
            bottom_left,
            bottom_right,
            cross,
            top_cross,
            bottom_cross,
            left_cross,
            right_cross,
            horizontal,
            vertical,
        }
    }

    /// All glyphs in declaration order.
    #[must_use]
    pub const fn glyphs(&self) -> [char; 15] {
        [
            self.top,
            self.bottom,
            self.left,
            self.right,
            self.top_left,
            self.top_right,
            self.bottom_left,
            self.bottom_right,
            self.cross,
            self.top_cross,
            self.bottom_cross,
            self.left_cross,
            self.right_cross,
            self.horizontal,
            self.vertical,
        ]
    }

    /// Returns true if every glyph is a space.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.glyphs().iter().all(|&c| c == ' ')
    }

    /// Corner and junction glyphs for a separator position as
    /// (left, cross, right).
    #[must_use]
    pub const fn separator_glyphs(&self, position: SeparatorPosition) -> (char, char, char) {
        match position {
            SeparatorPosition::Top => (self.top_left, self.top_cross, self.top_right),
            SeparatorPosition::Middle => (self.left_cross, self.cross, self.right_cross),
            SeparatorPosition::Bottom => (self.bottom_left, self.bottom_cross, self.bottom_right),
        }
    }
}

impl fmt::Display for BorderChars {
    /// A small two-column sample drawn with the set.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = [2, 2];
        let v = self.vertical;
        writeln!(f, "{}", render_separator(&widths, self, SeparatorPosition::Top))?;
        writeln!(f, "{v}  {v}  {v}")?;
        writeln!(f, "{}", render_separator(&widths, self, SeparatorPosition::Middle))?;
        writeln!(f, "{v}  {v}  {v}")?;
        write!(f, "{}", render_separator(&widths, self, SeparatorPosition::Bottom))
    }
}

/// Thin lines: ┌─┬┐
pub const SINGLE: BorderChars = BorderChars::new(
    '\u{250C}', '\u{2510}', '\u{2514}', '\u{2518}', '\u{253C}', '\u{252C}', '\u{2534}', '\u{251C}',
    '\u{2524}', '\u{2500}', '\u{2502}',
);

/// Double lines: ╔═╦╗
pub const DOUBLE: BorderChars = BorderChars::new(
    '\u{2554}', '\u{2557}', '\u{255A}', '\u{255D}', '\u{256C}', '\u{2566}', '\u{2569}', '\u{2560}',
    '\u{2563}', '\u{2550}', '\u{2551}',
);

/// Thin lines with rounded corners: ╭─┬╮
pub const ROUND: BorderChars = BorderChars::new(
    '\u{256D}', '\u{256E}', '\u{2570}', '\u{256F}', '\u{253C}', '\u{252C}', '\u{2534}', '\u{251C}',
    '\u{2524}', '\u{2500}', '\u{2502}',
);

/// Heavy lines: ┏━┳┓
pub const BOLD: BorderChars = BorderChars::new(
    '\u{250F}', '\u{2513}', '\u{2517}', '\u{251B}', '\u{254B}', '\u{2533}', '\u{253B}', '\u{2523}',
    '\u{252B}', '\u{2501}', '\u{2503}',
);

/// ASCII only: +-+|
pub const CLASSIC: BorderChars =
    BorderChars::new('+', '+', '+', '+', '+', '+', '+', '+', '+', '-', '|');

/// Every position is a space.
pub const NONE: BorderChars =
    BorderChars::new(' ', ' ', ' ', ' ', ' ', ' ', ' ', ' ', ' ', ' ', ' ');

/// Named border styles.
///
/// `SingleDouble` and `DoubleSingle` are aliases of `Single` and `Double`:
/// they draw with the same glyph set and keep their own names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BorderStyle {
    #[default]
    Single,
    Double,
    Round,
    Bold,
    SingleDouble,
    DoubleSingle,
    Classic,
    None,
}

impl BorderStyle {
    /// Every style, in registry order.
    pub const ALL: [Self; 8] = [
        Self::Single,
        Self::Double,
        Self::Round,
        Self::Bold,
        Self::SingleDouble,
        Self::DoubleSingle,
        Self::Classic,
        Self::None,
    ];

    /// Look up a style by name, case-insensitively.
    ///
    /// Accepts the camelCase names (`singleDouble`) as well as snake and kebab
    /// case. Unknown names fall back to [`BorderStyle::Single`].
    #[must_use]
    pub fn parse(name: &str) -> Self {
        let normalized: String = name
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "single" => Self::Single,
            "double" => Self::Double,
            "round" => Self::Round,
            "bold" => Self::Bold,
            "singledouble" => Self::SingleDouble,
            "doublesingle" => Self::DoubleSingle,
            "classic" => Self::Classic,
            "none" => Self::None,
            _ => {
                log::debug!("unknown border style {name:?}, using single");
                Self::Single
            }
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Double => "double",
            Self::Round => "round",
            Self::Bold => "bold",
            Self::SingleDouble => "singleDouble",
            Self::DoubleSingle => "doubleSingle",
            Self::Classic => "classic",
            Self::None => "none",
        }
    }

    /// The glyph set this style draws with.
    #[must_use]
    pub const fn chars(self) -> &'static BorderChars {
        match self {
            Self::Single | Self::SingleDouble => &SINGLE,
            Self::Double | Self::DoubleSingle => &DOUBLE,
            Self::Round => &ROUND,
            Self::Bold => &BOLD,
            Self::Classic => &CLASSIC,
            Self::None => &NONE,
        }
    }

    /// Returns true for the borderless style.
    #[must_use]
    pub const fn is_none(self) -> bool {
        matches!(self, Self::None)
    }
}

impl fmt::Display for BorderStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<&str> for BorderStyle {
    fn from(name: &str) -> Self {
        Self::parse(name)
    }
}

/// Resolve a border style name to its glyph set.
///
/// Unknown names resolve to the single-line set.
#[must_use]
pub fn resolve_border_chars(name: &str) -> &'static BorderChars {
    BorderStyle::parse(name).chars()
}

/// Vertical position of a horizontal separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeparatorPosition {
    /// Above the header.
    Top,
    /// Between header and body.
    Middle,
    /// Below the last row.
    Bottom,
}

/// Render a horizontal separator for the given column widths.
///
/// Runs of `horizontal` are joined by the position's junction glyph and
/// bracketed by its corner glyphs.
///
/// ```
/// use rich_table::border::{render_separator, SeparatorPosition, SINGLE};
///
/// assert_eq!(render_separator(&[3, 2], &SINGLE, SeparatorPosition::Top), "┌───┬──┐");
/// ```
#[must_use]
pub fn render_separator(
    widths: &[usize],
    chars: &BorderChars,
    position: SeparatorPosition,
) -> String {
    let (left, cross, right) = chars.separator_glyphs(position);

    let mut result = String::with_capacity(widths.iter().sum::<usize>() * 3 + widths.len() + 2);
    result.push(left);
    for (i, &width) in widths.iter().enumerate() {
        if i > 0 {
            result.push(cross);
        }
        result.extend(std::iter::repeat_n(chars.horizontal, width));
    }
    result.push(right);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_corners() {
        let chars = resolve_border_chars("single");
        assert_eq!(chars.top_left, '┌');
        assert_eq!(chars.bottom_right, '┘');
        assert_eq!(chars.cross, '┼');
        assert_eq!(chars.horizontal, '─');
        assert_eq!(chars.vertical, '│');
    }

    #[test]
    fn test_each_style_glyphs() {
        assert_eq!(resolve_border_chars("double").top_left, '╔');
        assert_eq!(resolve_border_chars("round").top_left, '╭');
        assert_eq!(resolve_border_chars("round").cross, '┼');
        assert_eq!(resolve_border_chars("bold").horizontal, '━');
        assert_eq!(resolve_border_chars("bold").cross, '╋');
        assert_eq!(resolve_border_chars("classic").top_left, '+');
        assert_eq!(resolve_border_chars("classic").horizontal, '-');
        assert_eq!(resolve_border_chars("classic").vertical, '|');
    }

    #[test]
    fn test_none_is_all_spaces() {
        assert!(resolve_border_chars("none").is_blank());
        assert!(!SINGLE.is_blank());
    }

    #[test]
    fn test_aliases() {
        assert_eq!(resolve_border_chars("singleDouble"), &SINGLE);
        assert_eq!(resolve_border_chars("doubleSingle"), &DOUBLE);
        assert_eq!(BorderStyle::parse("single_double"), BorderStyle::SingleDouble);
        assert_eq!(BorderStyle::SingleDouble.name(), "singleDouble");
    }

    #[test]
    fn test_parse_case_insensitive_and_fallback() {
        assert_eq!(BorderStyle::parse("DOUBLE"), BorderStyle::Double);
        assert_eq!(BorderStyle::parse("  round "), BorderStyle::Round);
        assert_eq!(BorderStyle::parse("sparkly"), BorderStyle::Single);
        assert_eq!(resolve_border_chars("sparkly"), &SINGLE);
    }

    #[test]
    fn test_name_round_trip() {
        for style in BorderStyle::ALL {
            assert_eq!(BorderStyle::parse(style.name()), style);
        }
    }

    #[test]
    fn test_render_separator_positions() {
        let widths = [5, 10, 3];
        assert_eq!(
            render_separator(&widths, &SINGLE, SeparatorPosition::Top),
            "┌─────┬──────────┬───┐"
        );
        assert_eq!(
            render_separator(&widths, &SINGLE, SeparatorPosition::Middle),
            "├─────┼──────────┼───┤"
        );
        assert_eq!(
            render_separator(&widths, &SINGLE, SeparatorPosition::Bottom),
            "└─────┴──────────┴───┘"
        );
    }

    #[test]
    fn test_render_separator_edge_widths() {
        assert_eq!(render_separator(&[], &SINGLE, SeparatorPosition::Top), "┌┐");
        assert_eq!(
            render_separator(&[0, 5], &SINGLE, SeparatorPosition::Top),
            "┌┬─────┐"
        );
        assert_eq!(
            render_separator(&[2, 2], &CLASSIC, SeparatorPosition::Middle),
            "+--+--+"
        );
    }

    #[test]
    fn test_display_sample() {
        let sample = ROUND.to_string();
        assert!(sample.starts_with("╭──┬──╮"));
        assert!(sample.ends_with("╰──┴──╯"));
    }
}
