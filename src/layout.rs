//! Layout tree and line renderer.
//!
//! A table is composed into a small tree of [`Node`]s: text runs, horizontal
//! rules and containers that stack their children vertically
//! ([`Layout::Column`]), place them side by side ([`Layout::Row`]) or lay them
//! out on grid tracks ([`Layout::Grid`]). Rendering resolves every node to a
//! fixed number of terminal cells and produces lines of styled [`Segment`]s.
//!
//! Every rendered line is exactly as wide as the width it was rendered at:
//! shorter content is padded with spaces, longer content (fixed tracks wider
//! than the available space, text longer than its cell) is cut off. Text is
//! never wrapped.
//!
//! ```
//! use rich_table::cells::Justify;
//! use rich_table::layout::Node;
//!
//! let node = Node::row(Justify::Center, vec![Node::text("hi")]);
//! assert_eq!(node.render_plain(6), "  hi");
//! ```

use std::borrow::Cow;

use num_rational::Ratio;
use smallvec::SmallVec;

use crate::border::BorderChars;
use crate::cells::{Justify, cell_len, truncate};
use crate::column::{FlexTrack, GridTrack};
use crate::segment::{Segment, adjust_line_length, simplify};
use crate::style::Style;

/// Resolved widths of a grid's tracks.
pub type TrackWidths = SmallVec<[usize; 16]>;

/// A run of single-line text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextNode {
    pub content: String,
    pub style: Style,
}

/// How a container places its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Layout {
    /// Children stacked top to bottom, each at the full width.
    Column,
    /// Children side by side at their natural widths, the leftover space
    /// distributed according to the justification.
    Row(Justify),
    /// Children fill the tracks left to right, starting a new grid row every
    /// `tracks.len()` children.
    Grid(Vec<GridTrack>),
}

/// A node with children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub layout: Layout,
    pub children: Vec<Node>,
    /// Combined under the style of every descendant.
    pub style: Style,
    /// Box drawn around the content, taking one cell on each side.
    pub border: Option<BorderChars>,
    /// Blank lines above the container.
    pub margin_top: usize,
    /// Identifies the container in a composed tree.
    pub key: Option<String>,
}

impl Container {
    #[must_use]
    pub fn new(layout: Layout, children: Vec<Node>) -> Self {
        Self {
            layout,
            children,
            style: Style::new(),
            border: None,
            margin_top: 0,
            key: None,
        }
    }

    fn border_width(&self) -> usize {
        if self.border.is_some() { 2 } else { 0 }
    }

    fn natural_width(&self) -> usize {
        let content = match &self.layout {
            Layout::Column => self
                .children
                .iter()
                .map(Node::natural_width)
                .max()
                .unwrap_or(0),
            Layout::Row(_) => self.children.iter().map(Node::natural_width).sum(),
            Layout::Grid(tracks) => self.grid_natural_width(tracks),
        };
        content + self.border_width()
    }

    fn grid_natural_width(&self, tracks: &[GridTrack]) -> usize {
        if tracks.is_empty() {
            return 0;
        }
        tracks
            .iter()
            .enumerate()
            .map(|(i, track)| match track {
                GridTrack::Fixed(n) => *n,
                GridTrack::Flex(flex) => {
                    let widest = self
                        .children
                        .iter()
                        .skip(i)
                        .step_by(tracks.len())
                        .map(Node::natural_width)
                        .max()
                        .unwrap_or(0);
                    let widest = flex.min.map_or(widest, |min| widest.max(min));
                    flex.max.map_or(widest, |max| widest.min(max))
                }
            })
            .sum()
    }

    fn render_lines(&self, width: usize, inherited: &Style) -> Vec<Vec<Segment>> {
        let style = inherited.combine(&self.style);
        let inner_width = width.saturating_sub(self.border_width());

        let mut body = match &self.layout {
            Layout::Column => self
                .children
                .iter()
                .flat_map(|child| child.render_lines(inner_width, &style))
                .collect(),
            Layout::Row(justify) => self.render_row(*justify, inner_width, &style),
            Layout::Grid(tracks) => self.render_grid(tracks, inner_width, &style),
        };

        if let Some(chars) = &self.border {
            body = frame(body, chars, inner_width, &style);
        }

        let mut lines = Vec::with_capacity(self.margin_top + body.len());
        lines.extend((0..self.margin_top).map(|_| blank_line(width, inherited)));
        lines.extend(
            body.into_iter()
                .map(|line| adjust_line_length(line, width, &style)),
        );
        lines
    }

    fn render_row(&self, justify: Justify, width: usize, style: &Style) -> Vec<Vec<Segment>> {
        let mut remaining = width;
        let allocated: SmallVec<[usize; 8]> = self
            .children
            .iter()
            .map(|child| {
                let w = child.natural_width().min(remaining);
                remaining -= w;
                w
            })
            .collect();
        let (before, after) = justify.split(remaining);

        let rendered: Vec<Vec<Vec<Segment>>> = self
            .children
            .iter()
            .zip(&allocated)
            .map(|(child, &w)| child.render_lines(w, style))
            .collect();
        let height = rendered.iter().map(Vec::len).max().unwrap_or(0);

        (0..height)
            .map(|row| {
                let mut line = blank_line(before, style);
                for (child_lines, &w) in rendered.iter().zip(&allocated) {
                    match child_lines.get(row) {
                        Some(child_line) => line.extend(child_line.iter().cloned()),
                        None => line.extend(blank_line(w, style)),
                    }
                }
                line.extend(blank_line(after, style));
                line
            })
            .collect()
    }

    fn render_grid(&self, tracks: &[GridTrack], width: usize, style: &Style) -> Vec<Vec<Segment>> {
        if tracks.is_empty() {
            if !self.children.is_empty() {
                log::debug!("grid without tracks, {} children not rendered", self.children.len());
            }
            return Vec::new();
        }

        let widths = resolve_tracks(tracks, width);
        let mut lines = Vec::new();

        for chunk in self.children.chunks(tracks.len()) {
            let cells: Vec<Vec<Vec<Segment>>> = widths
                .iter()
                .enumerate()
                .map(|(i, &w)| {
                    chunk
                        .get(i)
                        .map(|child| child.render_lines(w, style))
                        .unwrap_or_default()
                })
                .collect();
            let height = cells.iter().map(Vec::len).max().unwrap_or(0);

            for row in 0..height {
                let mut line = Vec::new();
                for (cell, &w) in cells.iter().zip(&widths) {
                    match cell.get(row) {
                        Some(cell_line) => line.extend(cell_line.iter().cloned()),
                        None => line.extend(blank_line(w, style)),
                    }
                }
                lines.push(line);
            }
        }

        lines
    }
}

/// A node of the layout tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Text(TextNode),
    /// A horizontal line filling the available width.
    Rule { glyph: char, style: Style },
    Container(Container),
}

impl Node {
    /// Unstyled text.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::styled_text(content, Style::new())
    }

    #[must_use]
    pub fn styled_text(content: impl Into<String>, style: Style) -> Self {
        Self::Text(TextNode {
            content: content.into(),
            style,
        })
    }

    #[must_use]
    pub fn rule(glyph: char) -> Self {
        Self::Rule {
            glyph,
            style: Style::new(),
        }
    }

    /// Children stacked vertically.
    #[must_use]
    pub fn column(children: Vec<Node>) -> Self {
        Self::Container(Container::new(Layout::Column, children))
    }

    /// Children side by side.
    #[must_use]
    pub fn row(justify: Justify, children: Vec<Node>) -> Self {
        Self::Container(Container::new(Layout::Row(justify), children))
    }

    /// Children placed on grid tracks.
    #[must_use]
    pub fn grid(tracks: Vec<GridTrack>, children: Vec<Node>) -> Self {
        Self::Container(Container::new(Layout::Grid(tracks), children))
    }

    /// Set the node's own style.
    #[must_use]
    pub fn with_style(mut self, new_style: Style) -> Self {
        match &mut self {
            Self::Text(text) => text.style = new_style,
            Self::Rule { style, .. } => *style = new_style,
            Self::Container(container) => container.style = new_style,
        }
        self
    }

    /// Draw a box around the node.
    #[must_use]
    pub fn with_border(self, chars: BorderChars) -> Self {
        let mut container = self.into_container();
        container.border = Some(chars);
        Self::Container(container)
    }

    #[must_use]
    pub fn with_margin_top(self, lines: usize) -> Self {
        let mut container = self.into_container();
        container.margin_top = lines;
        Self::Container(container)
    }

    #[must_use]
    pub fn with_key(self, key: impl Into<String>) -> Self {
        let mut container = self.into_container();
        container.key = Some(key.into());
        Self::Container(container)
    }

    /// The node as a container, wrapping leaves in a one-child column.
    fn into_container(self) -> Container {
        match self {
            Self::Container(container) => container,
            leaf => Container::new(Layout::Column, vec![leaf]),
        }
    }

    /// Width the node occupies when nothing constrains it.
    ///
    /// Rules have no natural width; they fill whatever they are given.
    #[must_use]
    pub fn natural_width(&self) -> usize {
        match self {
            Self::Text(text) => cell_len(&sanitize(&text.content)),
            Self::Rule { .. } => 0,
            Self::Container(container) => container.natural_width(),
        }
    }

    /// Find the first container with the given key, depth first.
    #[must_use]
    pub fn find(&self, key: &str) -> Option<&Container> {
        let Self::Container(container) = self else {
            return None;
        };
        if container.key.as_deref() == Some(key) {
            return Some(container);
        }
        container.children.iter().find_map(|child| child.find(key))
    }

    /// Render to lines of exactly `width` cells.
    #[must_use]
    pub fn render_lines(&self, width: usize, inherited: &Style) -> Vec<Vec<Segment>> {
        match self {
            Self::Text(text) => {
                let content = sanitize(&text.content);
                let (kept, _) = truncate(&content, width);
                let mut line = Vec::with_capacity(2);
                if !kept.is_empty() {
                    line.push(Segment::styled(kept, inherited.combine(&text.style)));
                }
                vec![adjust_line_length(line, width, inherited)]
            }
            Self::Rule { glyph, style } => {
                let run: String = std::iter::repeat_n(*glyph, width).collect();
                let line = vec![Segment::styled(run, inherited.combine(style))];
                vec![adjust_line_length(line, width, inherited)]
            }
            Self::Container(container) => container.render_lines(width, inherited),
        }
    }

    /// Render to a flat segment stream with a newline after every line.
    #[must_use]
    pub fn render(&self, width: usize) -> Vec<Segment> {
        let lines = self.render_lines(width, &Style::new());
        simplify(
            lines
                .into_iter()
                .flat_map(|line| line.into_iter().chain(std::iter::once(Segment::line()))),
        )
    }

    /// Render to plain text, trailing spaces trimmed from every line.
    #[must_use]
    pub fn render_plain(&self, width: usize) -> String {
        self.render_lines(width, &Style::new())
            .iter()
            .map(|line| {
                let text: String = line.iter().map(|seg| seg.text.as_str()).collect();
                text.trim_end().to_string()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Resolve grid tracks to widths within `available` cells.
///
/// Fixed tracks take their size. What remains is shared among flexible
/// tracks in proportion to their weights, each share rounded down against the
/// running total so that the shares add up to exactly the remaining width.
/// A share below a track's minimum or above its maximum pins that track to the
/// bound and the rest is shared again among the others.
#[must_use]
pub fn resolve_tracks(tracks: &[GridTrack], available: usize) -> TrackWidths {
    let fixed: usize = tracks
        .iter()
        .map(|track| match track {
            GridTrack::Fixed(n) => *n,
            GridTrack::Flex(_) => 0,
        })
        .fold(0, usize::saturating_add);

    let mut sizes: TrackWidths = tracks
        .iter()
        .map(|track| match track {
            GridTrack::Fixed(n) => *n,
            GridTrack::Flex(_) => 0,
        })
        .collect();

    let mut active: SmallVec<[(usize, FlexTrack); 16]> = tracks
        .iter()
        .enumerate()
        .filter_map(|(i, track)| match track {
            GridTrack::Flex(flex) => Some((i, *flex)),
            GridTrack::Fixed(_) => None,
        })
        .collect();
    let mut remaining = available.saturating_sub(fixed);

    while !active.is_empty() {
        let shares = split_weighted(remaining, active.iter().map(|(_, flex)| flex.weight));

        let below_min: SmallVec<[usize; 16]> = active
            .iter()
            .zip(&shares)
            .enumerate()
            .filter(|(_, ((_, flex), share))| flex.min.is_some_and(|min| **share < min))
            .map(|(pos, _)| pos)
            .collect();
        let pinned: SmallVec<[usize; 16]> = if below_min.is_empty() {
            active
                .iter()
                .zip(&shares)
                .enumerate()
                .filter(|(_, ((_, flex), share))| flex.max.is_some_and(|max| **share > max))
                .map(|(pos, _)| pos)
                .collect()
        } else {
            below_min
        };

        if pinned.is_empty() {
            for ((index, _), share) in active.iter().zip(shares) {
                sizes[*index] = share;
            }
            break;
        }

        for &pos in pinned.iter().rev() {
            let (index, flex) = active.remove(pos);
            let size = match (flex.min, flex.max) {
                (Some(min), _) if shares[pos] < min => min,
                (_, Some(max)) if shares[pos] > max => max,
                _ => shares[pos],
            };
            sizes[index] = size;
            remaining = remaining.saturating_sub(size);
        }
    }

    sizes
}

/// Split `total` by weight, rounding each cumulative share down.
fn split_weighted(total: usize, weights: impl Iterator<Item = u32>) -> SmallVec<[usize; 16]> {
    let weights: SmallVec<[u128; 16]> = weights.map(u128::from).collect();
    let weight_sum: u128 = weights.iter().sum();
    if weight_sum == 0 {
        return weights.iter().map(|_| 0).collect();
    }

    let total_wide = total as u128;
    let mut cumulative = 0u128;
    let mut assigned = 0usize;
    weights
        .iter()
        .map(|&weight| {
            cumulative += weight;
            let target = Ratio::new(cumulative * total_wide, weight_sum)
                .floor()
                .to_integer();
            let target = usize::try_from(target).unwrap_or(total);
            let share = target - assigned;
            assigned = target;
            share
        })
        .collect()
}

/// Control characters would break line structure; show them as spaces.
fn sanitize(text: &str) -> Cow<'_, str> {
    if text.chars().any(char::is_control) {
        Cow::Owned(
            text.chars()
                .map(|c| if c.is_control() { ' ' } else { c })
                .collect(),
        )
    } else {
        Cow::Borrowed(text)
    }
}

fn blank_line(width: usize, style: &Style) -> Vec<Segment> {
    if width == 0 {
        Vec::new()
    } else {
        vec![Segment::styled(" ".repeat(width), style.clone())]
    }
}

fn frame(
    body: Vec<Vec<Segment>>,
    chars: &BorderChars,
    inner_width: usize,
    style: &Style,
) -> Vec<Vec<Segment>> {
    let edge = |left: char, fill: char, right: char| {
        let mut text = String::with_capacity((inner_width + 2) * fill.len_utf8());
        text.push(left);
        text.extend(std::iter::repeat_n(fill, inner_width));
        text.push(right);
        vec![Segment::styled(text, style.clone())]
    };

    let mut lines = Vec::with_capacity(body.len() + 2);
    lines.push(edge(chars.top_left, chars.top, chars.top_right));
    for line in body {
        let mut framed = vec![Segment::styled(chars.left.to_string(), style.clone())];
        framed.extend(adjust_line_length(line, inner_width, style));
        framed.push(Segment::styled(chars.right.to_string(), style.clone()));
        lines.push(framed);
    }
    lines.push(edge(chars.bottom_left, chars.bottom, chars.bottom_right));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::border::{CLASSIC, SINGLE};
    use crate::segment::line_length;
    use crate::style::Attributes;

    fn flex(weight: u32, min: Option<usize>, max: Option<usize>) -> GridTrack {
        GridTrack::Flex(FlexTrack { weight, min, max })
    }

    #[test]
    fn test_resolve_fixed_only() {
        let widths = resolve_tracks(&[GridTrack::Fixed(1), GridTrack::Fixed(10)], 40);
        assert_eq!(widths.as_slice(), &[1, 10]);
    }

    #[test]
    fn test_resolve_equal_flex() {
        let tracks = [GridTrack::flex(1), GridTrack::flex(1), GridTrack::flex(1)];
        let widths = resolve_tracks(&tracks, 10);
        assert_eq!(widths.as_slice(), &[3, 3, 4]);
    }

    #[test]
    fn test_resolve_weighted_with_fixed() {
        let tracks = [
            GridTrack::Fixed(1),
            GridTrack::flex(50),
            GridTrack::Fixed(1),
            GridTrack::flex(25),
            GridTrack::Fixed(1),
        ];
        let widths = resolve_tracks(&tracks, 33);
        assert_eq!(widths.as_slice(), &[1, 20, 1, 10, 1]);
    }

    #[test]
    fn test_resolve_zero_weights() {
        let tracks = [GridTrack::flex(0), GridTrack::flex(0)];
        assert_eq!(resolve_tracks(&tracks, 10).as_slice(), &[0, 0]);

        let tracks = [GridTrack::flex(0), GridTrack::flex(1)];
        assert_eq!(resolve_tracks(&tracks, 10).as_slice(), &[0, 10]);
    }

    #[test]
    fn test_resolve_fixed_exceeds_available() {
        let tracks = [GridTrack::Fixed(30), GridTrack::flex(1)];
        assert_eq!(resolve_tracks(&tracks, 20).as_slice(), &[30, 0]);
    }

    #[test]
    fn test_resolve_max_redistributes() {
        let tracks = [flex(1, None, Some(3)), flex(1, None, None)];
        assert_eq!(resolve_tracks(&tracks, 20).as_slice(), &[3, 17]);
    }

    #[test]
    fn test_resolve_min_redistributes() {
        let tracks = [flex(1, Some(12), None), flex(1, None, None)];
        assert_eq!(resolve_tracks(&tracks, 20).as_slice(), &[12, 8]);
    }

    #[test]
    fn test_resolve_all_maxed_leaves_space() {
        let tracks = [flex(1, None, Some(2)), flex(1, None, Some(3))];
        assert_eq!(resolve_tracks(&tracks, 20).as_slice(), &[2, 3]);
    }

    #[test]
    fn test_split_weighted_exact_sum() {
        let shares = split_weighted(7, [1, 1, 1].into_iter());
        assert_eq!(shares.iter().sum::<usize>(), 7);
        assert_eq!(shares.as_slice(), &[2, 2, 3]);
    }

    #[test]
    fn test_text_truncates_and_pads() {
        assert_eq!(Node::text("hello world").render_plain(5), "hello");
        let lines = Node::text("hi").render_lines(6, &Style::new());
        assert_eq!(line_length(&lines[0]), 6);
    }

    #[test]
    fn test_text_control_chars_become_spaces() {
        assert_eq!(Node::text("a\nb").render_plain(5), "a b");
    }

    #[test]
    fn test_row_justify() {
        let row = |justify| Node::row(justify, vec![Node::text("ab")]);
        assert_eq!(row(Justify::Start).render_plain(6), "ab");
        assert_eq!(row(Justify::End).render_plain(6), "    ab");
        assert_eq!(row(Justify::Center).render_plain(7), "  ab");
    }

    #[test]
    fn test_row_clamps_children() {
        let row = Node::row(Justify::Start, vec![Node::text("abc"), Node::text("def")]);
        assert_eq!(row.render_plain(4), "abcd");
    }

    #[test]
    fn test_grid_wraps_children() {
        let grid = Node::grid(
            vec![GridTrack::Fixed(3), GridTrack::Fixed(3)],
            vec![
                Node::text("a"),
                Node::text("b"),
                Node::text("c"),
                Node::text("d"),
                Node::text("e"),
            ],
        );
        assert_eq!(grid.render_plain(10), "a  b\nc  d\ne");
    }

    #[test]
    fn test_grid_pads_short_cells() {
        let tall = Node::column(vec![Node::text("1"), Node::text("2")]);
        let grid = Node::grid(
            vec![GridTrack::Fixed(2), GridTrack::Fixed(2)],
            vec![tall, Node::text("x")],
        );
        let lines = grid.render_lines(4, &Style::new());
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|line| line_length(line) == 4));
    }

    #[test]
    fn test_grid_cuts_overflowing_fixed_tracks() {
        let grid = Node::grid(
            vec![GridTrack::Fixed(4), GridTrack::Fixed(4)],
            vec![Node::text("abcd"), Node::text("efgh")],
        );
        assert_eq!(grid.render_plain(6), "abcdef");
    }

    #[test]
    fn test_rule_fills_width() {
        assert_eq!(Node::rule('─').render_plain(4), "────");
        assert_eq!(Node::rule('─').natural_width(), 0);
    }

    #[test]
    fn test_border_frame() {
        let node = Node::row(Justify::Center, vec![Node::text("No data")]).with_border(SINGLE);
        assert_eq!(
            node.render_plain(12),
            "┌──────────┐\n│ No data  │\n└──────────┘"
        );
        assert_eq!(node.natural_width(), 9);
    }

    #[test]
    fn test_margin_top() {
        let node = Node::text("x").with_margin_top(1);
        assert_eq!(node.render_plain(3), "\nx");
    }

    #[test]
    fn test_style_cascades() {
        let node = Node::row(
            Justify::Start,
            vec![Node::styled_text("a", Style::new().bold())],
        )
        .with_style(Style::new().dim());
        let lines = node.render_lines(3, &Style::new());
        let first = lines[0][0].style.as_ref().unwrap();
        assert!(first.attributes.contains(Attributes::BOLD | Attributes::DIM));
        let padding = lines[0][1].style.as_ref().unwrap();
        assert!(padding.attributes.contains(Attributes::DIM));
        assert!(!padding.attributes.contains(Attributes::BOLD));
    }

    #[test]
    fn test_natural_width() {
        let grid = Node::grid(
            vec![GridTrack::Fixed(1), GridTrack::flex(1), GridTrack::Fixed(1)],
            vec![
                Node::text("|"),
                Node::text("abc"),
                Node::text("|"),
                Node::text("|"),
                Node::text("abcdef"),
                Node::text("|"),
            ],
        );
        assert_eq!(grid.natural_width(), 8);
        assert_eq!(Node::text("x").with_border(CLASSIC).natural_width(), 3);
    }

    #[test]
    fn test_find_by_key() {
        let tree = Node::column(vec![
            Node::text("a").with_key("first"),
            Node::column(vec![Node::text("b").with_key("nested")]),
        ]);
        assert!(tree.find("nested").is_some());
        assert!(tree.find("missing").is_none());
    }

    #[test]
    fn test_render_segments_end_lines() {
        let segments = Node::column(vec![Node::text("a"), Node::text("b")]).render(2);
        let text: String = segments.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(text, "a \nb \n");
    }

    #[test]
    fn test_zero_width() {
        assert_eq!(Node::text("abc").render_plain(0), "");
        let lines = Node::text("abc").with_border(SINGLE).render_lines(0, &Style::new());
        assert!(lines.iter().all(|line| line_length(line) == 0));
    }
}
