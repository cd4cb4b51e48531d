//! Arrowhead analysis.
//!
//! An arrowhead is correct when exactly one structural neighbor feeds it
//! (from its incoming side), it points at something that can receive it,
//! and its shaft is anchored to the rest of the diagram.

use std::collections::HashSet;

use crate::chars::{ArrowHead, Direction};
use crate::connect::{mutual_connect, plain_wall_at};
use crate::connector::label_bridge;
use crate::grid::{Glyph, Grid, Pos};

/// Sides of `pos` whose structural neighbor has a port facing `pos`.
fn feeding_sides(grid: &Grid, pos: Pos) -> HashSet<Direction> {
    Direction::ALL
        .into_iter()
        .filter(|d| {
            grid.shape(pos.step(*d))
                .is_some_and(|s| s.mask().has(d.opposite()))
        })
        .collect()
}

/// Follow the outgoing side past blank cells. Labels and other arrows are
/// fine targets; a structural target must either take the line or be a
/// plain wall. Pointing off the grid is not.
fn target_ok(grid: &Grid, pos: Pos, head: ArrowHead) -> bool {
    let dir = head.outgoing();
    let mut cur = pos.step(dir);
    while grid.in_bounds(cur) {
        match grid.glyph(cur) {
            Glyph::Blank => cur = cur.step(dir),
            Glyph::Text(_) | Glyph::Arrow(_) => return true,
            Glyph::Structural(shape) => {
                return shape.mask().has(dir.opposite()) || shape.is_plain_wall_for(dir)
            }
        }
    }
    false
}

/// A dead end still holds the shaft when another of its ports ends on a
/// plain wall or bridges a label.
fn dead_end_anchored(grid: &Grid, pos: Pos, back: Direction) -> bool {
    let Some(shape) = grid.shape(pos) else {
        return false;
    };
    shape
        .mask()
        .iter()
        .filter(|d| *d != back)
        .any(|d| plain_wall_at(grid, pos.step(d), d) || label_bridge(grid, pos, d))
}

/// Walk the shaft back from the arrowhead. Reaching a branch, a loop, or a
/// dead end that hangs from a wall or label means the shaft is anchored.
fn shaft_anchored(grid: &Grid, pos: Pos, head: ArrowHead) -> bool {
    let mut cur = pos.step(head.incoming);
    // Side of `cur` the walk came from.
    let mut back = head.incoming.opposite();
    let mut visited: HashSet<Pos> = HashSet::from([cur]);

    loop {
        let Some(shape) = grid.shape(cur) else {
            return false;
        };
        let onward: Vec<Direction> = shape
            .mask()
            .iter()
            .filter(|d| *d != back && mutual_connect(grid, cur, *d))
            .collect();
        match onward.as_slice() {
            [] => return dead_end_anchored(grid, cur, back),
            [dir] => {
                let next = cur.step(*dir);
                if !visited.insert(next) {
                    return true;
                }
                back = dir.opposite();
                cur = next;
            }
            _ => return true,
        }
    }
}

/// Count arrowheads that are fed wrongly, point at nothing, or hang on an
/// orphaned shaft. Each arrowhead counts at most once.
pub fn count_arrow_errors(grid: &Grid) -> usize {
    let mut errors = 0;
    for pos in grid.positions() {
        let Glyph::Arrow(head) = grid.glyph(pos) else {
            continue;
        };

        let feeding = feeding_sides(grid, pos);
        if feeding.len() != 1 || !feeding.contains(&head.incoming) {
            tracing::trace!(?pos, glyph = %head.glyph, ?feeding, "arrow fed from the wrong side");
            errors += 1;
            continue;
        }
        if !target_ok(grid, pos, head) {
            tracing::trace!(?pos, glyph = %head.glyph, "arrow points at nothing");
            errors += 1;
            continue;
        }
        if !shaft_anchored(grid, pos, head) {
            tracing::trace!(?pos, glyph = %head.glyph, "arrow shaft is orphaned");
            errors += 1;
        }
    }
    tracing::debug!(errors, "arrow pass");
    errors
}
