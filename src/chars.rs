//! Glyph classification and the static connectivity table.
//!
//! Every structural glyph exposes a fixed set of ports (the sides it draws
//! a line out of). Arrowheads receive a shaft from exactly one side.
//! Anything else is inert text.

use std::collections::BTreeSet;

/// One of the four cardinal sides of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// All directions in port-scan order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    #[inline]
    pub fn bit(self) -> u8 {
        match self {
            Direction::North => 1,
            Direction::East => 2,
            Direction::South => 4,
            Direction::West => 8,
        }
    }

    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// Row/column delta of one step in this direction.
    #[inline]
    pub fn step(self) -> (i32, i32) {
        match self {
            Direction::North => (-1, 0),
            Direction::East => (0, 1),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
        }
    }

    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::East | Direction::West)
    }

    #[inline]
    pub fn is_vertical(self) -> bool {
        !self.is_horizontal()
    }
}

/// Set of ports, one bit per [`Direction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Mask(u8);

impl Mask {
    pub const EMPTY: Mask = Mask(0);

    pub const fn from_bits(bits: u8) -> Self {
        Mask(bits & 0b1111)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn has(self, dir: Direction) -> bool {
        self.0 & dir.bit() != 0
    }

    /// Iterate the ports that are set, in [`Direction::ALL`] order.
    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::ALL.into_iter().filter(move |d| self.has(*d))
    }
}

const N: u8 = 1;
const E: u8 = 2;
const S: u8 = 4;
const W: u8 = 8;

/// The closed set of recognized structural glyphs (single-line box drawing).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// ┌
    TopLeft,
    /// ┐
    TopRight,
    /// └
    BottomLeft,
    /// ┘
    BottomRight,
    /// ─
    Horizontal,
    /// │
    Vertical,
    /// ├
    TeeRight,
    /// ┤
    TeeLeft,
    /// ┬
    TeeDown,
    /// ┴
    TeeUp,
    /// ┼
    Cross,
}

impl Shape {
    /// Look up the structural shape drawn by `c`, if any.
    pub fn from_char(c: char) -> Option<Self> {
        let shape = match c {
            '┌' => Shape::TopLeft,
            '┐' => Shape::TopRight,
            '└' => Shape::BottomLeft,
            '┘' => Shape::BottomRight,
            '─' => Shape::Horizontal,
            '│' => Shape::Vertical,
            '├' => Shape::TeeRight,
            '┤' => Shape::TeeLeft,
            '┬' => Shape::TeeDown,
            '┴' => Shape::TeeUp,
            '┼' => Shape::Cross,
            _ => return None,
        };
        Some(shape)
    }

    pub fn to_char(self) -> char {
        match self {
            Shape::TopLeft => '┌',
            Shape::TopRight => '┐',
            Shape::BottomLeft => '└',
            Shape::BottomRight => '┘',
            Shape::Horizontal => '─',
            Shape::Vertical => '│',
            Shape::TeeRight => '├',
            Shape::TeeLeft => '┤',
            Shape::TeeDown => '┬',
            Shape::TeeUp => '┴',
            Shape::Cross => '┼',
        }
    }

    /// Ports this glyph draws a line out of.
    pub const fn mask(self) -> Mask {
        match self {
            Shape::TopLeft => Mask::from_bits(E | S),
            Shape::TopRight => Mask::from_bits(W | S),
            Shape::BottomLeft => Mask::from_bits(E | N),
            Shape::BottomRight => Mask::from_bits(W | N),
            Shape::Horizontal => Mask::from_bits(E | W),
            Shape::Vertical => Mask::from_bits(N | S),
            Shape::TeeRight => Mask::from_bits(N | E | S),
            Shape::TeeLeft => Mask::from_bits(N | W | S),
            Shape::TeeDown => Mask::from_bits(E | W | S),
            Shape::TeeUp => Mask::from_bits(E | W | N),
            Shape::Cross => Mask::from_bits(N | E | S | W),
        }
    }

    #[inline]
    pub fn is_corner(self) -> bool {
        matches!(
            self,
            Shape::TopLeft | Shape::TopRight | Shape::BottomLeft | Shape::BottomRight
        )
    }

    #[inline]
    pub fn is_straight(self) -> bool {
        matches!(self, Shape::Horizontal | Shape::Vertical)
    }

    /// A plain wall absorbs a perpendicular connector that ends flush
    /// against it: `│` for a horizontal port, `─` for a vertical one.
    #[inline]
    pub fn is_plain_wall_for(self, port: Direction) -> bool {
        match self {
            Shape::Vertical => port.is_horizontal(),
            Shape::Horizontal => port.is_vertical(),
            _ => false,
        }
    }

    /// Every recognized shape, in table order.
    pub const ALL: [Shape; 11] = [
        Shape::TopLeft,
        Shape::TopRight,
        Shape::BottomLeft,
        Shape::BottomRight,
        Shape::Horizontal,
        Shape::Vertical,
        Shape::TeeRight,
        Shape::TeeLeft,
        Shape::TeeDown,
        Shape::TeeUp,
        Shape::Cross,
    ];
}

/// Ports of `c`, or [`Mask::EMPTY`] for anything outside the table.
#[inline]
pub fn mask_of(c: char) -> Mask {
    Shape::from_char(c).map(Shape::mask).unwrap_or(Mask::EMPTY)
}

#[inline]
pub fn is_structural(c: char) -> bool {
    Shape::from_char(c).is_some()
}

/// Directional arrowhead glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArrowHead {
    pub glyph: char,
    /// Side the shaft must come in from.
    pub incoming: Direction,
    pub ascii: bool,
}

impl ArrowHead {
    /// Arrowhead candidate for `c`. ASCII candidates still need context
    /// before they count as arrows, see [`crate::grid::Grid::glyph`].
    pub fn from_char(c: char) -> Option<Self> {
        let (incoming, ascii) = match c {
            '▶' | '►' => (Direction::West, false),
            '>' => (Direction::West, true),
            '◀' | '◄' => (Direction::East, false),
            '<' => (Direction::East, true),
            '▲' => (Direction::South, false),
            '^' => (Direction::South, true),
            '▼' => (Direction::North, false),
            'v' => (Direction::North, true),
            _ => return None,
        };
        Some(ArrowHead {
            glyph: c,
            incoming,
            ascii,
        })
    }

    /// Side the arrow points out of.
    #[inline]
    pub fn outgoing(self) -> Direction {
        self.incoming.opposite()
    }

    /// True when a neighbor lying in direction `from` may feed this arrow.
    #[inline]
    pub fn accepts_from(self, from: Direction) -> bool {
        self.incoming == from
    }

    #[inline]
    pub fn is_vertical(self) -> bool {
        self.incoming.is_vertical()
    }
}

const BOX_DRAWING_START: char = '\u{2500}';
const BOX_DRAWING_END: char = '\u{257F}';

/// Box-drawing block character that is not one of the recognized shapes
/// (rounded, heavy, double, dashed ...).
#[inline]
pub fn is_disallowed(c: char) -> bool {
    (BOX_DRAWING_START..=BOX_DRAWING_END).contains(&c) && !is_structural(c)
}

/// Collect the unsupported box-drawing characters appearing in `text`.
pub fn disallowed_in(text: &str) -> BTreeSet<char> {
    text.chars().filter(|c| is_disallowed(*c)).collect()
}
