//! Connected components of structural cells.
//!
//! Cells are joined only when they are mutually connected, so a connector
//! run that merely touches a box wall stays its own component.

use std::collections::BTreeMap;

use crate::chars::Direction;
use crate::connect::mutual_connect;
use crate::grid::{Grid, Pos};

/// Disjoint-set forest over dense cell indices, with path compression.
#[derive(Debug, Clone)]
pub struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    /// Every element starts as its own root.
    pub fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
        }
    }

    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut cur = x;
        while self.parent[cur] != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }
        root
    }

    /// Merge the sets of `a` and `b`; the root of `a` stays the root.
    pub fn union(&mut self, a: usize, b: usize) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra != rb {
            self.parent[rb] = ra;
        }
    }
}

/// Mutual-connectivity components over all structural cells of a grid.
#[derive(Debug, Clone)]
pub struct Components {
    sets: DisjointSet,
    /// Structural cell positions in row-major order.
    cells: Vec<Pos>,
    width: usize,
}

impl Components {
    pub fn build(grid: &Grid) -> Self {
        let mut sets = DisjointSet::new(grid.width * grid.height);
        let cells: Vec<Pos> = grid.structural_positions().collect();
        for &pos in &cells {
            // East and South are enough to see every shared edge once.
            for dir in [Direction::East, Direction::South] {
                if mutual_connect(grid, pos, dir) {
                    sets.union(grid.index(pos), grid.index(pos.step(dir)));
                }
            }
        }
        Self {
            sets,
            cells,
            width: grid.width,
        }
    }

    #[inline]
    fn index(&self, pos: Pos) -> usize {
        pos.row as usize * self.width + pos.col as usize
    }

    /// Representative of the component holding `pos`.
    pub fn root(&mut self, pos: Pos) -> usize {
        let index = self.index(pos);
        self.sets.find(index)
    }

    /// Merge two components (used to tie both ends of a gap together).
    pub fn join(&mut self, a: Pos, b: Pos) {
        let (ia, ib) = (self.index(a), self.index(b));
        self.sets.union(ia, ib);
    }

    /// All structural cells in row-major order.
    pub fn cells(&self) -> &[Pos] {
        &self.cells
    }

    /// Cells grouped by component root. Groups are ordered by root and
    /// each group is row-major.
    pub fn groups(&mut self) -> BTreeMap<usize, Vec<Pos>> {
        let mut groups: BTreeMap<usize, Vec<Pos>> = BTreeMap::new();
        for i in 0..self.cells.len() {
            let pos = self.cells[i];
            let root = self.root(pos);
            groups.entry(root).or_default().push(pos);
        }
        groups
    }
}

/// A component drawn only with corners and straight edges, with at least
/// one corner: a box, or what is left of one.
pub fn is_box_like(grid: &Grid, cells: &[Pos]) -> bool {
    let mut has_corner = false;
    for &pos in cells {
        match grid.shape(pos) {
            Some(shape) if shape.is_corner() => has_corner = true,
            Some(shape) if shape.is_straight() => {}
            _ => return false,
        }
    }
    has_corner
}
