//! Connectivity primitives shared by every analyzer.

use crate::chars::Direction;
use crate::grid::{Glyph, Grid, Pos};

/// True when `pos` and its neighbor in `dir` both present a port on the
/// shared edge. Both sides have to agree.
#[inline]
pub fn mutual_connect(grid: &Grid, pos: Pos, dir: Direction) -> bool {
    let next = pos.step(dir);
    match (grid.shape(pos), grid.shape(next)) {
        (Some(a), Some(b)) => a.mask().has(dir) && b.mask().has(dir.opposite()),
        _ => false,
    }
}

/// True when a port facing `dir` ends flush against a plain wall at
/// `target` (a `│` for horizontal ports, a `─` for vertical ones).
#[inline]
pub fn plain_wall_at(grid: &Grid, target: Pos, dir: Direction) -> bool {
    grid.shape(target)
        .is_some_and(|shape| shape.is_plain_wall_for(dir))
}

/// True when the cell at `target` is an arrowhead fed from a port that
/// faces `dir` (i.e. the arrow receives from `dir.opposite()`).
#[inline]
pub fn arrow_accepts(grid: &Grid, target: Pos, dir: Direction) -> bool {
    match grid.glyph(target) {
        Glyph::Arrow(head) => head.accepts_from(dir.opposite()),
        _ => false,
    }
}

/// True when every consecutive pair from `from` walking `dir` for
/// `steps` cells is mutually connected.
pub fn run_connected(grid: &Grid, from: Pos, dir: Direction, steps: i32) -> bool {
    let mut pos = from;
    for _ in 0..steps {
        if !mutual_connect(grid, pos, dir) {
            return false;
        }
        pos = pos.step(dir);
    }
    true
}
