//! Rectangle detection.
//!
//! A rectangle is a `┌` whose top, left, right and bottom edges are fully
//! mutually-connected runs closing on `┐`, `└` and `┘` at the same two
//! columns and rows. Whatever looks box-like but never closes is counted
//! as a rectangle error. A cornered run whose every port is satisfied is a
//! routed connector, not a broken box.

use std::collections::HashSet;

use crate::chars::{Direction, Shape};
use crate::components::{is_box_like, Components};
use crate::connect::{mutual_connect, run_connected};
use crate::connector::port_satisfied;
use crate::grid::{Grid, Pos};

/// A validated closed box, in inclusive grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub top: i32,
    pub bottom: i32,
    pub left: i32,
    pub right: i32,
}

impl Rect {
    /// Perimeter cells, clockwise from the top-left corner.
    pub fn perimeter(&self) -> impl Iterator<Item = Pos> + '_ {
        let top = (self.left..=self.right).map(move |c| Pos::new(self.top, c));
        let right = (self.top + 1..=self.bottom).map(move |r| Pos::new(r, self.right));
        let bottom = (self.left..self.right)
            .rev()
            .map(move |c| Pos::new(self.bottom, c));
        let left = (self.top + 1..self.bottom)
            .rev()
            .map(move |r| Pos::new(r, self.left));
        top.chain(right).chain(bottom).chain(left)
    }
}

/// Outcome of rectangle detection for one grid.
#[derive(Debug, Clone, Default)]
pub struct RectangleReport {
    /// Validated boxes in discovery order.
    pub boxes: Vec<Rect>,
    /// Top-left candidates that never closed.
    pub unclosed: usize,
    /// Box-like components claimed by no box and holding no candidate.
    pub residual: usize,
    consumed: Vec<bool>,
    width: usize,
}

impl RectangleReport {
    pub fn valid(&self) -> usize {
        self.boxes.len()
    }

    pub fn errors(&self) -> usize {
        self.unclosed + self.residual
    }

    /// True when `pos` lies on the perimeter of a validated box.
    pub fn is_consumed(&self, pos: Pos) -> bool {
        if pos.row < 0 || pos.col < 0 || pos.col as usize >= self.width {
            return false;
        }
        let index = pos.row as usize * self.width + pos.col as usize;
        self.consumed.get(index).copied().unwrap_or(false)
    }

    fn consume(&mut self, rect: &Rect) {
        for pos in rect.perimeter() {
            let index = pos.row as usize * self.width + pos.col as usize;
            self.consumed[index] = true;
        }
    }
}

/// `┌` that opens both to the right and downward.
fn is_candidate(grid: &Grid, pos: Pos) -> bool {
    grid.shape(pos) == Some(Shape::TopLeft)
        && mutual_connect(grid, pos, Direction::East)
        && mutual_connect(grid, pos, Direction::South)
}

/// Find the first closure for the top-left corner at `origin`: increasing
/// column for the top-right corner, then increasing row for the bottom.
fn close_box(grid: &Grid, origin: Pos, used: &HashSet<Pos>) -> Option<Rect> {
    let Pos { row: r0, col: c0 } = origin;
    for c1 in c0 + 1..grid.width as i32 {
        let top_right = Pos::new(r0, c1);
        if grid.shape(top_right) != Some(Shape::TopRight) || used.contains(&top_right) {
            continue;
        }
        if !run_connected(grid, origin, Direction::East, c1 - c0) {
            continue;
        }
        for r2 in r0 + 1..grid.height as i32 {
            let bottom_left = Pos::new(r2, c0);
            let bottom_right = Pos::new(r2, c1);
            if grid.shape(bottom_left) != Some(Shape::BottomLeft)
                || grid.shape(bottom_right) != Some(Shape::BottomRight)
                || used.contains(&bottom_left)
                || used.contains(&bottom_right)
            {
                continue;
            }
            let height = r2 - r0;
            if run_connected(grid, origin, Direction::South, height)
                && run_connected(grid, top_right, Direction::South, height)
                && run_connected(grid, bottom_left, Direction::East, c1 - c0)
            {
                return Some(Rect {
                    top: r0,
                    bottom: r2,
                    left: c0,
                    right: c1,
                });
            }
        }
    }
    None
}

/// True when some port of some cell in `cells` is left open.
fn has_open_port(grid: &Grid, cells: &[Pos]) -> bool {
    cells.iter().any(|&pos| {
        grid.shape(pos)
            .is_some_and(|shape| shape.mask().iter().any(|d| !port_satisfied(grid, pos, d)))
    })
}

/// Find every closed rectangle and count the box-like leftovers.
pub fn detect_rectangles(grid: &Grid, comps: &mut Components) -> RectangleReport {
    let mut report = RectangleReport {
        consumed: vec![false; grid.width * grid.height],
        width: grid.width,
        ..RectangleReport::default()
    };
    if grid.is_empty() {
        return report;
    }

    let candidates: Vec<Pos> = grid
        .structural_positions()
        .filter(|p| is_candidate(grid, *p))
        .collect();

    let mut used: HashSet<Pos> = HashSet::new();
    for &origin in &candidates {
        match close_box(grid, origin, &used) {
            Some(rect) => {
                tracing::trace!(?rect, "closed rectangle");
                used.insert(Pos::new(rect.top, rect.right));
                used.insert(Pos::new(rect.bottom, rect.left));
                used.insert(Pos::new(rect.bottom, rect.right));
                report.consume(&rect);
                report.boxes.push(rect);
            }
            None => {
                tracing::trace!(?origin, "top-left corner never closes");
                report.unclosed += 1;
            }
        }
    }

    let candidate_set: HashSet<Pos> = candidates.into_iter().collect();
    for cells in comps.groups().values() {
        if !is_box_like(grid, cells) {
            continue;
        }
        let claimed = cells.iter().any(|p| report.is_consumed(*p));
        let has_candidate = cells.iter().any(|p| candidate_set.contains(p));
        if !claimed && !has_candidate && has_open_port(grid, cells) {
            tracing::trace!(first = ?cells[0], len = cells.len(), "residual box fragment");
            report.residual += 1;
        }
    }

    tracing::debug!(
        valid = report.valid(),
        unclosed = report.unclosed,
        residual = report.residual,
        "rectangle pass"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::normalize;

    fn detect(text: &str) -> RectangleReport {
        let grid = normalize(text, 8);
        let mut comps = Components::build(&grid);
        detect_rectangles(&grid, &mut comps)
    }

    #[test]
    fn test_single_box() {
        let report = detect("┌─────┐\n│ A   │\n└─────┘\n");
        assert_eq!(report.valid(), 1);
        assert_eq!(report.errors(), 0);
        assert_eq!(
            report.boxes[0],
            Rect {
                top: 0,
                bottom: 2,
                left: 0,
                right: 6
            }
        );
    }

    #[test]
    fn test_perimeter_covers_every_edge_cell_once() {
        let rect = Rect {
            top: 0,
            bottom: 2,
            left: 0,
            right: 3,
        };
        let cells: Vec<Pos> = rect.perimeter().collect();
        let unique: HashSet<Pos> = cells.iter().copied().collect();
        assert_eq!(cells.len(), 10);
        assert_eq!(unique.len(), 10);
        assert_eq!(cells[0], Pos::new(0, 0));
    }

    #[test]
    fn test_nested_boxes() {
        let report = detect(
            "┌─────────┐\n│ ┌─────┐ │\n│ │ X   │ │\n│ └─────┘ │\n└─────────┘\n",
        );
        assert_eq!(report.valid(), 2);
        assert_eq!(report.errors(), 0);
    }

    #[test]
    fn test_missing_corner() {
        let report = detect("┌─────┐\n│ A   │\n└─────\n");
        assert_eq!(report.valid(), 0);
        assert_eq!(report.unclosed, 1);
        assert_eq!(report.residual, 0);
    }

    #[test]
    fn test_shifted_corner_counts_once() {
        let report = detect("┌─────┐\n│ A   │\n └────┘\n");
        assert_eq!(report.valid(), 0);
        assert_eq!(report.errors(), 1);
    }

    #[test]
    fn test_residual_fragment_without_candidate() {
        // The top-left corner cannot open downward, so it is no candidate;
        // both pieces are still box-like leftovers.
        let report = detect("┌───┐\n │   │\n └───┘\n");
        assert_eq!(report.valid(), 0);
        assert_eq!(report.unclosed, 0);
        assert_eq!(report.residual, 2);
    }

    #[test]
    fn test_routed_elbow_is_not_a_fragment() {
        let report = detect(
            "┌────┐\n│ A  │──┐\n└────┘  │\n        ▼\n     ┌────┐\n     │ B  │\n     └────┘\n",
        );
        assert_eq!(report.valid(), 2);
        assert_eq!(report.residual, 0);

        // Same elbow with its arrowhead missing is still a leftover.
        let open = detect("┌────┐\n│ A  │──┐\n└────┘  │\n");
        assert_eq!(open.residual, 1);
    }

    #[test]
    fn test_consumed_cells() {
        let report = detect("┌──┐  \n│  │──\n└──┘  ");
        assert!(report.is_consumed(Pos::new(0, 0)));
        assert!(report.is_consumed(Pos::new(1, 3)));
        assert!(!report.is_consumed(Pos::new(1, 1)));
        assert!(!report.is_consumed(Pos::new(1, 4)));
        assert!(!report.is_consumed(Pos::new(-1, 0)));
    }

    #[test]
    fn test_empty_grid() {
        let report = detect("");
        assert_eq!(report.valid(), 0);
        assert_eq!(report.errors(), 0);
    }
}
