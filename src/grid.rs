//! Text preprocessing and the rectangular character grid.

use std::sync::OnceLock;

use regex::Regex;

use crate::chars::{ArrowHead, Direction, Shape};

/// Terminal control sequence: ESC `[`, parameter bytes, intermediate
/// bytes, one final byte.
fn ansi_escape() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\x1b\[[0-?]*[ -/]*[@-~]").expect("escape sequence pattern is valid")
    })
}

/// Remove terminal color/style escape sequences.
pub fn strip_ansi(text: &str) -> std::borrow::Cow<'_, str> {
    ansi_escape().replace_all(text, "")
}

/// Expand tab characters to the next multiple of `tab_width`.
/// The column counter restarts after every line break.
pub fn expand_tabs(text: &str, tab_width: usize) -> String {
    if !text.contains('\t') {
        return text.to_string();
    }
    let tab_width = tab_width.max(1);
    let mut out = String::with_capacity(text.len());
    let mut column = 0;
    for c in text.chars() {
        match c {
            '\t' => {
                let pad = tab_width - column % tab_width;
                out.extend(std::iter::repeat(' ').take(pad));
                column += pad;
            }
            '\n' | '\r' => {
                out.push(c);
                column = 0;
            }
            _ => {
                out.push(c);
                column += 1;
            }
        }
    }
    out
}

/// Split on `\n`, `\r\n` and a lone `\r`. A trailing break does not
/// start another line.
fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        let Some(at) = rest.find(|c| c == '\n' || c == '\r') else {
            lines.push(rest);
            break;
        };
        lines.push(&rest[..at]);
        let skip = if rest[at..].starts_with("\r\n") { 2 } else { 1 };
        rest = &rest[at + skip..];
    }
    lines
}

/// Cell coordinate. Signed so that neighbor arithmetic can step off the
/// edge and be rejected by the bounds check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub row: i32,
    pub col: i32,
}

impl Pos {
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    #[inline]
    pub fn step(self, dir: Direction) -> Self {
        let (dr, dc) = dir.step();
        Self::new(self.row + dr, self.col + dc)
    }

    /// Chebyshev distance: neighbors (including diagonals) are at 1.
    #[inline]
    pub fn chebyshev(self, other: Pos) -> i32 {
        (self.row - other.row)
            .abs()
            .max((self.col - other.col).abs())
    }
}

/// What a cell means to the analyzers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    /// Box/connector piece with ports.
    Structural(Shape),
    /// Arrowhead (Unicode, or ASCII that passed disambiguation).
    Arrow(ArrowHead),
    /// Any other visible character (labels).
    Text(char),
    /// Space, padding, or outside the grid.
    Blank,
}

/// Rectangular character grid. All rows have the same length.
#[derive(Debug, Clone, Default)]
pub struct Grid {
    cells: Vec<char>,
    pub width: usize,
    pub height: usize,
}

impl Grid {
    /// Build a grid from already-normalized text (no escapes, no tabs).
    pub fn new(text: &str) -> Self {
        let lines: Vec<Vec<char>> = split_lines(text)
            .into_iter()
            .map(|l| l.chars().collect())
            .collect();
        let width = lines.iter().map(Vec::len).max().unwrap_or(0);
        let height = lines.len();
        let mut cells = Vec::with_capacity(width * height);
        for line in &lines {
            cells.extend_from_slice(line);
            cells.extend(std::iter::repeat(' ').take(width - line.len()));
        }
        Self {
            cells,
            width,
            height,
        }
    }

    /// Text had no lines at all.
    pub fn is_empty(&self) -> bool {
        self.height == 0
    }

    #[inline]
    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.row >= 0
            && pos.col >= 0
            && (pos.row as usize) < self.height
            && (pos.col as usize) < self.width
    }

    /// Dense index of an in-bounds position.
    #[inline]
    pub fn index(&self, pos: Pos) -> usize {
        debug_assert!(self.in_bounds(pos));
        pos.row as usize * self.width + pos.col as usize
    }

    /// Character at `pos`, `None` outside the grid.
    #[inline]
    pub fn cell(&self, pos: Pos) -> Option<char> {
        if self.in_bounds(pos) {
            Some(self.cells[self.index(pos)])
        } else {
            None
        }
    }

    #[inline]
    pub fn shape(&self, pos: Pos) -> Option<Shape> {
        self.cell(pos).and_then(Shape::from_char)
    }

    /// Classify the cell at `pos`.
    ///
    /// ASCII arrow candidates (`> < ^ v`) only count as arrows when no
    /// orthogonal neighbor is alphanumeric and a structural glyph sits on
    /// the side the arrow receives from; otherwise they are label text.
    pub fn glyph(&self, pos: Pos) -> Glyph {
        let Some(c) = self.cell(pos) else {
            return Glyph::Blank;
        };
        if let Some(shape) = Shape::from_char(c) {
            return Glyph::Structural(shape);
        }
        if let Some(head) = ArrowHead::from_char(c) {
            if !head.ascii || self.is_ascii_arrow(pos, head) {
                return Glyph::Arrow(head);
            }
            return Glyph::Text(c);
        }
        if c == ' ' {
            Glyph::Blank
        } else {
            Glyph::Text(c)
        }
    }

    fn is_ascii_arrow(&self, pos: Pos, head: ArrowHead) -> bool {
        let wordy = Direction::ALL
            .iter()
            .any(|d| self.cell(pos.step(*d)).is_some_and(char::is_alphanumeric));
        !wordy && self.shape(pos.step(head.incoming)).is_some()
    }

    /// Every position, row-major.
    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.height as i32)
            .flat_map(move |row| (0..self.width as i32).map(move |col| Pos::new(row, col)))
    }

    /// Positions holding a structural glyph, row-major.
    pub fn structural_positions(&self) -> impl Iterator<Item = Pos> + '_ {
        self.positions().filter(|p| self.shape(*p).is_some())
    }
}

/// Turn raw diagram text into a rectangular grid: strip escape sequences,
/// expand tabs, split lines, pad every row to the widest one.
pub fn normalize(raw: &str, tab_width: usize) -> Grid {
    let stripped = strip_ansi(raw);
    let expanded = expand_tabs(&stripped, tab_width);
    Grid::new(&expanded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_ansi() {
        assert_eq!(strip_ansi("\x1b[35m┌─┐\x1b[0m"), "┌─┐");
        assert_eq!(strip_ansi("\x1b[1;31mred\x1b[m"), "red");
        assert_eq!(strip_ansi("plain"), "plain");
    }

    #[test]
    fn test_expand_tabs() {
        assert_eq!(expand_tabs("a\tb", 8), "a       b");
        assert_eq!(expand_tabs("\t", 4), "    ");
        assert_eq!(expand_tabs("abcd\tx\n\ty", 4), "abcd    x\n    y");
        assert_eq!(expand_tabs("a\tb", 0), "a b");
    }

    #[test]
    fn test_grid_is_padded() {
        let grid = normalize("ab\nabcd\n", 8);
        assert_eq!(grid.width, 4);
        assert_eq!(grid.height, 2);
        assert_eq!(grid.cell(Pos::new(0, 3)), Some(' '));
        assert_eq!(grid.cell(Pos::new(0, 4)), None);
        assert_eq!(grid.cell(Pos::new(-1, 0)), None);
    }

    #[test]
    fn test_empty_grid() {
        let grid = normalize("", 8);
        assert!(grid.is_empty());
        assert_eq!(grid.positions().count(), 0);

        let blank = normalize("   \n\t", 8);
        assert!(!blank.is_empty());
        assert_eq!(blank.width, 8);
    }

    #[test]
    fn test_crlf_lines() {
        let grid = normalize("┌┐\r\n└┘\r\n", 8);
        assert_eq!(grid.height, 2);
        assert_eq!(grid.width, 2);
    }

    #[test]
    fn test_lone_carriage_return_breaks_lines() {
        assert_eq!(split_lines("a\rb\r\nc\nd\r"), vec!["a", "b", "c", "d"]);
        assert_eq!(split_lines("\n"), vec![""]);
        assert!(split_lines("").is_empty());

        let grid = normalize("┌──┐\r│\t │\n└──┘", 2);
        assert_eq!(grid.height, 3);
        assert_eq!(grid.shape(Pos::new(1, 3)), Some(Shape::Vertical));
    }

    #[test]
    fn test_glyph_classification() {
        let grid = normalize("─>  \n  Ser v", 8);
        assert_eq!(grid.glyph(Pos::new(0, 0)), Glyph::Structural(Shape::Horizontal));
        assert!(matches!(grid.glyph(Pos::new(0, 1)), Glyph::Arrow(_)));
        assert_eq!(grid.glyph(Pos::new(0, 2)), Glyph::Blank);
        assert_eq!(grid.glyph(Pos::new(1, 2)), Glyph::Text('S'));
        // 'v' with nothing structural above is just a letter.
        assert_eq!(grid.glyph(Pos::new(1, 6)), Glyph::Text('v'));
        assert_eq!(grid.glyph(Pos::new(9, 9)), Glyph::Blank);
    }

    #[test]
    fn test_ascii_arrow_rejected_inside_word() {
        let grid = normalize("──>x", 8);
        assert_eq!(grid.glyph(Pos::new(0, 2)), Glyph::Text('>'));
    }

    #[test]
    fn test_unicode_arrow_needs_no_context() {
        let grid = normalize("A▶B", 8);
        assert!(matches!(grid.glyph(Pos::new(0, 1)), Glyph::Arrow(_)));
    }
}
