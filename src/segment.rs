//! Segment - the atomic rendering unit.
//!
//! The layout renderer turns a node tree into lines of segments. Each segment
//! is a run of text with a single style; the table's plain and ANSI outputs are
//! both produced from the same segment stream.

use std::fmt;

use crate::cells::cell_len;
use crate::color::ColorSystem;
use crate::style::Style;

/// A piece of text with a single, consistent style.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Segment {
    /// The text content.
    pub text: String,
    /// The style to apply (None = no styling).
    pub style: Option<Style>,
}

impl Segment {
    /// Create a new segment with text and optional style.
    #[must_use]
    pub fn new(text: impl Into<String>, style: Option<Style>) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Create a segment with a style.
    ///
    /// A plain style is stored as `None`.
    #[must_use]
    pub fn styled(text: impl Into<String>, style: Style) -> Self {
        if style.is_plain() {
            Self::plain(text)
        } else {
            Self::new(text, Some(style))
        }
    }

    /// Create a plain segment with no style.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, None)
    }

    /// Create a newline segment.
    #[must_use]
    pub fn line() -> Self {
        Self::plain("\n")
    }

    /// Get the cell width of this segment.
    #[must_use]
    pub fn cell_length(&self) -> usize {
        cell_len(&self.text)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Split this segment at a cell position, returning (left, right).
    #[must_use]
    pub fn split_at_cell(&self, cell_pos: usize) -> (Self, Self) {
        let (left, _) = crate::cells::truncate(&self.text, cell_pos);
        let (left_text, right_text) = self.text.split_at(left.len());
        (
            Self::new(left_text, self.style.clone()),
            Self::new(right_text, self.style.clone()),
        )
    }
}

impl From<&str> for Segment {
    fn from(value: &str) -> Self {
        Self::plain(value)
    }
}

impl From<String> for Segment {
    fn from(value: String) -> Self {
        Self::plain(value)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

// ============================================================================
// Segment Operations
// ============================================================================

/// Combine `base` underneath every segment's own style.
///
/// Segment styles take precedence, so a bold header keeps its weight when a
/// row background is applied around it.
pub fn apply_style<'a, I>(segments: I, base: &'a Style) -> impl Iterator<Item = Segment> + 'a
where
    I: Iterator<Item = Segment> + 'a,
{
    segments.map(move |mut seg| {
        if base.is_plain() {
            return seg;
        }
        let combined = match &seg.style {
            Some(own) => base.combine(own),
            None => base.clone(),
        };
        seg.style = Some(combined);
        seg
    })
}

/// Pad or truncate a line to exactly `length` cells.
#[must_use]
pub fn adjust_line_length(mut line: Vec<Segment>, length: usize, style: &Style) -> Vec<Segment> {
    let current = line_length(&line);

    if current < length {
        line.push(Segment::styled(" ".repeat(length - current), style.clone()));
    } else if current > length {
        line = truncate_line(line, length);
    }

    line
}

fn truncate_line(segments: Vec<Segment>, max_width: usize) -> Vec<Segment> {
    let mut result = Vec::new();
    let mut remaining = max_width;

    for segment in segments {
        let seg_width = segment.cell_length();
        if seg_width <= remaining {
            remaining -= seg_width;
            result.push(segment);
        } else {
            let (left, _) = segment.split_at_cell(remaining);
            let left_width = left.cell_length();
            if !left.is_empty() {
                result.push(left);
            }
            // A wide char cut at the boundary leaves a gap to fill.
            if left_width < remaining {
                result.push(Segment::new(
                    " ".repeat(remaining - left_width),
                    segment.style.clone(),
                ));
            }
            break;
        }
    }

    result
}

/// Simplify segments by merging adjacent segments with identical styles.
#[must_use]
pub fn simplify(segments: impl Iterator<Item = Segment>) -> Vec<Segment> {
    let mut result: Vec<Segment> = Vec::new();

    for segment in segments {
        if segment.text.is_empty() {
            continue;
        }

        if let Some(last) = result.last_mut()
            && last.style == segment.style
            && last.text != "\n"
            && segment.text != "\n"
        {
            last.text.push_str(&segment.text);
            continue;
        }

        result.push(segment);
    }

    result
}

/// Get the total cell length of a line of segments.
#[must_use]
pub fn line_length(line: &[Segment]) -> usize {
    line.iter().map(Segment::cell_length).sum()
}

/// Join segments into a string, emitting SGR escapes when a color system is
/// given. `None` produces plain text.
#[must_use]
pub fn render_ansi(segments: &[Segment], color_system: Option<ColorSystem>) -> String {
    let mut out = String::new();
    for segment in segments {
        match (color_system, &segment.style) {
            (Some(system), Some(style)) if segment.text != "\n" => {
                out.push_str(&style.render(&segment.text, system));
            }
            _ => out.push_str(&segment.text),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::style::Attributes;

    #[test]
    fn test_segment_new() {
        let seg = Segment::new("hello", None);
        assert_eq!(seg.text, "hello");
        assert!(seg.style.is_none());
        assert_eq!(seg.cell_length(), 5);
    }

    #[test]
    fn test_styled_plain_is_none() {
        assert!(Segment::styled("x", Style::new()).style.is_none());
        assert!(Segment::styled("x", Style::new().bold()).style.is_some());
    }

    #[test]
    fn test_split_at_cell() {
        let seg = Segment::plain("hello");
        let (left, right) = seg.split_at_cell(2);
        assert_eq!(left.text, "he");
        assert_eq!(right.text, "llo");
    }

    #[test]
    fn test_apply_style_keeps_own_precedence() {
        let base = Style::new().bgcolor(Color::Ansi(4)).not(Attributes::BOLD);
        let segs = vec![
            Segment::styled("Name", Style::new().bold()),
            Segment::plain("  "),
        ];
        let out: Vec<Segment> = apply_style(segs.into_iter(), &base).collect();
        let first = out[0].style.as_ref().unwrap();
        assert!(first.attributes.contains(Attributes::BOLD));
        assert_eq!(first.bgcolor, Some(Color::Ansi(4)));
        assert_eq!(out[1].style.as_ref().unwrap().bgcolor, Some(Color::Ansi(4)));
    }

    #[test]
    fn test_adjust_line_length() {
        let line = vec![Segment::plain("ab")];
        let padded = adjust_line_length(line, 5, &Style::new());
        assert_eq!(line_length(&padded), 5);

        let line = vec![Segment::plain("abc"), Segment::plain("def")];
        let cut = adjust_line_length(line, 4, &Style::new());
        assert_eq!(line_length(&cut), 4);
        assert_eq!(cut[1].text, "d");
    }

    #[test]
    fn test_truncate_wide_boundary_fills_gap() {
        let line = vec![Segment::plain("日本")];
        let cut = adjust_line_length(line, 3, &Style::new());
        assert_eq!(line_length(&cut), 3);
    }

    #[test]
    fn test_simplify() {
        let segments = vec![
            Segment::plain("hello"),
            Segment::plain(" "),
            Segment::plain("world"),
            Segment::line(),
            Segment::plain("next"),
        ];
        let simplified = simplify(segments.into_iter());
        assert_eq!(simplified.len(), 3);
        assert_eq!(simplified[0].text, "hello world");
    }

    #[test]
    fn test_render_ansi() {
        let segments = vec![
            Segment::styled("A", Style::new().bold()),
            Segment::plain("b"),
            Segment::line(),
        ];
        assert_eq!(render_ansi(&segments, None), "Ab\n");
        assert_eq!(
            render_ansi(&segments, Some(ColorSystem::Standard)),
            "\x1b[1mA\x1b[0mb\n"
        );
    }
}
