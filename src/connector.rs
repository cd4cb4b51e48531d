//! Connector analysis: dangling ports, broken gaps, free-floating lines.
//!
//! Every port of every structural glyph must be satisfied by one of:
//! a mutually connected neighbor, a plain wall it ends flush against, an
//! arrowhead it feeds, or a label bridge (`── label ──▶`). Unsatisfied
//! ports are grouped into error events so one broken connector is one
//! error no matter how many ports it leaves open.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::chars::{Direction, Shape};
use crate::components::{is_box_like, Components};
use crate::connect::{arrow_accepts, mutual_connect, plain_wall_at};
use crate::grid::{Glyph, Grid, Pos};
use crate::rect::{Rect, RectangleReport};

/// One port of one structural cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Port {
    pub pos: Pos,
    pub dir: Direction,
}

impl Port {
    fn facing(self) -> Pos {
        self.pos.step(self.dir)
    }
}

/// Two unresolved ports facing each other across a blank gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
enum Gap {
    /// row, first column, last column
    Horizontal(i32, i32, i32),
    /// column, first row, last row
    Vertical(i32, i32, i32),
}

impl Gap {
    fn between(a: Pos, b: Pos, dir: Direction) -> Self {
        if dir.is_horizontal() {
            Gap::Horizontal(a.row, a.col.min(b.col), a.col.max(b.col))
        } else {
            Gap::Vertical(a.col, a.row.min(b.row), a.row.max(b.row))
        }
    }
}

/// Breakdown of connector errors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConnectorReport {
    /// Merged clusters of components with unresolved ports.
    pub clusters: usize,
    /// Unlabeled gaps between two open ends.
    pub gaps: usize,
    /// Straight runs hanging only between two arrowheads.
    pub floating: usize,
    /// Off-center tracks in a single-column box stack.
    pub off_center: usize,
}

impl ConnectorReport {
    pub fn total(&self) -> usize {
        self.clusters + self.gaps + self.floating + self.off_center
    }
}

/// Walk from `port` through non-structural cells. Returns the first
/// structural/arrow cell reached (or `None` past the edge) and whether any
/// label text was crossed.
fn scan_gap(grid: &Grid, pos: Pos, dir: Direction) -> (Option<Pos>, bool) {
    let mut cur = pos.step(dir);
    let mut saw_label = false;
    while grid.in_bounds(cur) {
        match grid.glyph(cur) {
            Glyph::Structural(_) | Glyph::Arrow(_) => return (Some(cur), saw_label),
            Glyph::Text(_) => saw_label = true,
            Glyph::Blank => {}
        }
        cur = cur.step(dir);
    }
    (None, saw_label)
}

/// `── label ──` on one row: label text in the gap, then a resumed segment
/// that continues the line (or an endpoint such as `┤` that receives it).
fn label_bridge_horizontal(grid: &Grid, pos: Pos, dir: Direction) -> bool {
    debug_assert!(dir.is_horizontal());
    if !grid.shape(pos).is_some_and(|s| s.mask().has(dir)) {
        return false;
    }
    let (Some(target), true) = scan_gap(grid, pos, dir) else {
        return false;
    };
    // An arrowhead right after the label means the line never resumed.
    let Some(shape) = grid.shape(target) else {
        return false;
    };
    // A bare wall right behind the label is not a resumed segment either.
    if !shape.mask().has(dir.opposite()) {
        return false;
    }
    if !shape.mask().has(dir) {
        return true;
    }
    let next = target.step(dir);
    if !grid.in_bounds(next) {
        return false;
    }
    if grid.shape(next).is_some()
        && (mutual_connect(grid, target, dir) || plain_wall_at(grid, next, dir))
    {
        return true;
    }
    arrow_accepts(grid, next, dir)
}

/// Stacked label between two vertical pieces:
///
/// ```text
///  ┴
/// Pass
///   │
/// ```
///
/// The resumed piece may drift one column either way.
fn label_bridge_vertical(grid: &Grid, pos: Pos, dir: Direction) -> bool {
    debug_assert!(dir.is_vertical());
    if !grid.shape(pos).is_some_and(|s| s.mask().has(dir)) {
        return false;
    }
    let (Some(target), true) = scan_gap(grid, pos, dir) else {
        return false;
    };
    [0, -1, 1].iter().any(|dc| {
        grid.shape(Pos::new(target.row, target.col + dc))
            .is_some_and(|s| s.mask().has(dir.opposite()) || s.is_plain_wall_for(dir))
    })
}

/// True when `port` bridges across label text to a resumed line.
pub fn label_bridge(grid: &Grid, pos: Pos, dir: Direction) -> bool {
    if dir.is_horizontal() {
        label_bridge_horizontal(grid, pos, dir)
    } else {
        label_bridge_vertical(grid, pos, dir)
    }
}

/// Whether a structural port is connected to something meaningful.
pub fn port_satisfied(grid: &Grid, pos: Pos, dir: Direction) -> bool {
    let next = pos.step(dir);
    if !grid.in_bounds(next) {
        return false;
    }
    mutual_connect(grid, pos, dir)
        || plain_wall_at(grid, next, dir)
        || arrow_accepts(grid, next, dir)
        || label_bridge(grid, pos, dir)
}

fn unresolved_ports(grid: &Grid, cells: &[Pos]) -> Vec<Port> {
    let mut ports = Vec::new();
    for &pos in cells {
        let Some(shape) = grid.shape(pos) else {
            continue;
        };
        for dir in shape.mask().iter() {
            if !port_satisfied(grid, pos, dir) {
                tracing::trace!(?pos, ?dir, "unresolved port");
                ports.push(Port { pos, dir });
            }
        }
    }
    ports
}

/// Find the unresolved port facing back at `port` across blank cells.
fn gap_partner(grid: &Grid, port: Port, unresolved: &HashSet<Port>) -> Option<Port> {
    let mut cur = port.facing();
    while grid.in_bounds(cur) {
        match grid.glyph(cur) {
            Glyph::Arrow(_) => return None,
            Glyph::Structural(_) => {
                let partner = Port {
                    pos: cur,
                    dir: port.dir.opposite(),
                };
                return unresolved.contains(&partner).then_some(partner);
            }
            _ => {}
        }
        cur = cur.step(port.dir);
    }
    None
}

/// Group bad components whose cells come within one cell of each other.
fn count_clusters(footprints: &BTreeMap<usize, Vec<Pos>>) -> usize {
    let roots: Vec<usize> = footprints.keys().copied().collect();
    let near = |a: usize, b: usize| {
        footprints[&a]
            .iter()
            .any(|p| footprints[&b].iter().any(|q| p.chebyshev(*q) <= 1))
    };

    let mut seen: HashSet<usize> = HashSet::new();
    let mut clusters = 0;
    for &root in &roots {
        if !seen.insert(root) {
            continue;
        }
        clusters += 1;
        let mut stack = vec![root];
        while let Some(cur) = stack.pop() {
            for &other in &roots {
                if !seen.contains(&other) && near(cur, other) {
                    seen.insert(other);
                    stack.push(other);
                }
            }
        }
    }
    clusters
}

/// Straight runs whose only neighbors are arrowheads on both ends, with no
/// wall or junction to hang from.
fn count_floating_runs(grid: &Grid, comps: &mut Components) -> usize {
    let mut errors = 0;
    for cells in comps.groups().values() {
        if !cells
            .iter()
            .all(|p| grid.shape(*p).is_some_and(|s| s.is_straight()))
        {
            continue;
        }

        let mut anchored = false;
        // (ascii, incoming side) of every arrowhead touching the run.
        let mut heads: HashSet<(bool, Direction)> = HashSet::new();
        for &pos in cells {
            let Some(shape) = grid.shape(pos) else {
                continue;
            };
            for dir in shape.mask().iter() {
                let next = pos.step(dir);
                if !grid.in_bounds(next) {
                    continue;
                }
                if grid.shape(next).is_some()
                    && !mutual_connect(grid, pos, dir)
                    && plain_wall_at(grid, next, dir)
                {
                    anchored = true;
                }
                if let Glyph::Arrow(head) = grid.glyph(next) {
                    heads.insert((head.ascii, head.incoming));
                }
            }
        }
        if anchored {
            continue;
        }

        let opposed = [false, true].iter().any(|&ascii| {
            let has = |d: Direction| heads.contains(&(ascii, d));
            (has(Direction::North) && has(Direction::South))
                || (has(Direction::East) && has(Direction::West))
        });
        if opposed {
            tracing::trace!(first = ?cells[0], "free-floating arrow-to-arrow run");
            errors += 1;
        }
    }
    errors
}

/// Vertical tracks between boxes of a single-column stack must sit on
/// the boxes' center column.
///
/// The stack is the one group of at least 3 boxes sharing a `(left, right)`
/// span. Boxes outside it are ignored; a grid with several such columns
/// has no single stack and is left alone.
fn count_off_center_tracks(grid: &Grid, rects: &RectangleReport) -> usize {
    let mut spans: BTreeMap<(i32, i32), Vec<Rect>> = BTreeMap::new();
    for b in &rects.boxes {
        spans.entry((b.left, b.right)).or_default().push(*b);
    }
    let mut stacks = spans.into_iter().filter(|(_, boxes)| boxes.len() >= 3);
    let (Some(((left, right), mut stack)), None) = (stacks.next(), stacks.next()) else {
        return 0;
    };
    stack.sort_by_key(|b| b.top);

    let is_track = |pos: Pos| match grid.glyph(pos) {
        Glyph::Structural(shape) => shape == Shape::Vertical,
        Glyph::Arrow(head) => head.is_vertical(),
        _ => false,
    };
    let centered = |col: i32| (2 * col - (left + right)).abs() <= 1;

    let mut errors = 0;
    for pair in stack.windows(2) {
        let (upper, lower) = (pair[0], pair[1]);
        let drifted = (upper.bottom + 1..lower.top).any(|row| {
            (left + 1..right).any(|col| is_track(Pos::new(row, col)) && !centered(col))
        });
        if drifted {
            tracing::trace!(upper = upper.bottom, lower = lower.top, "off-center track");
            errors += 1;
        }
    }
    errors
}

/// Count connector errors.
///
/// `comps` holds the mutual-connectivity components; it is cloned so gap
/// pairing can tie components together without disturbing the caller.
pub fn count_connector_errors(
    grid: &Grid,
    comps: &Components,
    rects: &RectangleReport,
    stack_centering: bool,
) -> ConnectorReport {
    let mut report = ConnectorReport::default();
    if comps.cells().is_empty() {
        return report;
    }

    let mut base = comps.clone();
    report.floating = count_floating_runs(grid, &mut base);
    if stack_centering {
        report.off_center = count_off_center_tracks(grid, rects);
    }

    let unresolved = unresolved_ports(grid, comps.cells());
    if unresolved.is_empty() {
        tracing::debug!(?report, "connector pass");
        return report;
    }

    let mut joined = comps.clone();
    let unresolved_set: HashSet<Port> = unresolved.iter().copied().collect();
    let mut paired: HashSet<Port> = HashSet::new();
    let mut pairs: Vec<(Port, Port)> = Vec::new();
    for &port in &unresolved {
        if paired.contains(&port) {
            continue;
        }
        if let Some(partner) = gap_partner(grid, port, &unresolved_set) {
            paired.insert(port);
            paired.insert(partner);
            pairs.push((port, partner));
            joined.join(port.pos, partner.pos);
        }
    }

    let groups = joined.groups();
    let box_like: HashSet<usize> = groups
        .iter()
        .filter(|(_, cells)| is_box_like(grid, cells))
        .map(|(root, _)| *root)
        .collect();

    let mut bad: BTreeSet<usize> = BTreeSet::new();
    for port in unresolved.iter().filter(|p| !paired.contains(*p)) {
        let root = joined.root(port.pos);
        if !box_like.contains(&root) {
            bad.insert(root);
        }
    }

    let footprints: BTreeMap<usize, Vec<Pos>> = bad
        .iter()
        .map(|root| {
            let cells = groups[root]
                .iter()
                .copied()
                .filter(|p| !rects.is_consumed(*p))
                .collect();
            (*root, cells)
        })
        .collect();
    report.clusters = count_clusters(&footprints);

    let mut gaps: BTreeSet<Gap> = BTreeSet::new();
    for (a, b) in pairs {
        let root = joined.root(a.pos);
        debug_assert_eq!(root, joined.root(b.pos));
        if !box_like.contains(&root) {
            gaps.insert(Gap::between(a.pos, b.pos, a.dir));
        }
    }
    report.gaps = gaps.len();

    tracing::debug!(?report, unresolved = unresolved.len(), "connector pass");
    report
}
