//! Dense map grids, boolean masks and connected-component labeling

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

/// Map coordinate: `x` is the column, `y` the row
///
/// Positions order row-major (by `y`, then `x`), the order in which the
/// map is scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Manhattan (taxicab) distance
    pub const fn manhattan(self, other: Position) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Squared Euclidean distance
    pub const fn distance_sq(self, other: Position) -> usize {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        dx * dx + dy * dy
    }

    /// Offset by (dx, dy), `None` if it would leave the first quadrant
    pub fn offset(self, dx: isize, dy: isize) -> Option<Position> {
        Some(Position {
            x: self.x.checked_add_signed(dx)?,
            y: self.y.checked_add_signed(dy)?,
        })
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl core::fmt::Display for Position {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Neighborhood used for dilation and labeling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    /// Orthogonal neighbors only
    Four,
    /// Orthogonal and diagonal neighbors
    Eight,
}

impl Connectivity {
    const fn offsets(self) -> &'static [(isize, isize)] {
        match self {
            Connectivity::Four => &[(0, -1), (-1, 0), (1, 0), (0, 1)],
            Connectivity::Eight => &[
                (-1, -1),
                (0, -1),
                (1, -1),
                (-1, 0),
                (1, 0),
                (-1, 1),
                (0, 1),
                (1, 1),
            ],
        }
    }
}

/// Row-major 2D array
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

/// Boolean grid
pub type Mask = Grid<bool>;

/// Connected-component label; 0 means unlabeled
pub type Label = u32;

impl<T: Clone> Grid<T> {
    /// Create a grid with every cell set to `value`
    pub fn filled(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            cells: vec![value; width * height],
        }
    }
}

impl<T> Grid<T> {
    /// Build a grid from rows; `None` if the rows are ragged
    pub fn from_rows(rows: Vec<Vec<T>>) -> Option<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != width) {
            return None;
        }
        Some(Self {
            width,
            height,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    /// (width, height)
    pub const fn dims(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub const fn contains(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    pub fn get(&self, pos: Position) -> Option<&T> {
        if self.contains(pos) {
            self.cells.get(pos.y * self.width + pos.x)
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, pos: Position) -> Option<&mut T> {
        if self.contains(pos) {
            self.cells.get_mut(pos.y * self.width + pos.x)
        } else {
            None
        }
    }

    /// All positions in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<T> {
        let width = self.width;
        (0..self.width * self.height).map(move |i| Position::new(i % width, i / width))
    }

    /// Cells with their positions, row-major
    pub fn iter(&self) -> impl Iterator<Item = (Position, &T)> {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (Position::new(i % width, i / width), cell))
    }

    /// Apply `f` to every cell
    pub fn map<U>(&self, f: impl Fn(&T) -> U) -> Grid<U> {
        Grid {
            width: self.width,
            height: self.height,
            cells: self.cells.iter().map(f).collect(),
        }
    }

    /// In-bounds neighbors of `pos`
    pub fn neighbors(
        &self,
        pos: Position,
        connectivity: Connectivity,
    ) -> impl Iterator<Item = Position> + use<T> {
        let (width, height) = self.dims();
        connectivity
            .offsets()
            .iter()
            .filter_map(move |&(dx, dy)| pos.offset(dx, dy))
            .filter(move |p| p.x < width && p.y < height)
    }
}

impl<T> Index<Position> for Grid<T> {
    type Output = T;

    fn index(&self, pos: Position) -> &T {
        assert!(self.contains(pos), "position {pos} outside {}x{} grid", self.width, self.height);
        &self.cells[pos.y * self.width + pos.x]
    }
}

impl<T> IndexMut<Position> for Grid<T> {
    fn index_mut(&mut self, pos: Position) -> &mut T {
        assert!(self.contains(pos), "position {pos} outside {}x{} grid", self.width, self.height);
        &mut self.cells[pos.y * self.width + pos.x]
    }
}

impl Grid<bool> {
    /// All-false mask
    pub fn empty(width: usize, height: usize) -> Self {
        Self::filled(width, height, false)
    }

    /// Number of set cells
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    pub fn any(&self) -> bool {
        self.cells.iter().any(|&c| c)
    }

    /// Set positions, row-major
    pub fn set_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.iter().filter(|(_, c)| **c).map(|(p, _)| p)
    }

    /// Cell-wise AND
    pub fn and(&self, other: &Mask) -> Mask {
        self.zip_with(other, |a, b| a && b)
    }

    /// Cell-wise OR
    pub fn or(&self, other: &Mask) -> Mask {
        self.zip_with(other, |a, b| a || b)
    }

    /// Cells set here but not in `other`
    pub fn and_not(&self, other: &Mask) -> Mask {
        self.zip_with(other, |a, b| a && !b)
    }

    /// Cell-wise NOT
    pub fn inverted(&self) -> Mask {
        self.map(|c| !c)
    }

    /// Number of cells set in both masks
    pub fn overlap(&self, other: &Mask) -> usize {
        self.cells
            .iter()
            .zip(&other.cells)
            .filter(|&(&a, &b)| a && b)
            .count()
    }

    pub fn intersects(&self, other: &Mask) -> bool {
        self.cells.iter().zip(&other.cells).any(|(&a, &b)| a && b)
    }

    /// Set every cell adjacent to a set cell. Cells beyond the border count
    /// as unset.
    pub fn dilate(&self, connectivity: Connectivity) -> Mask {
        let mut out = self.clone();
        for pos in self.set_positions() {
            for n in self.neighbors(pos, connectivity) {
                out[n] = true;
            }
        }
        out
    }

    fn zip_with(&self, other: &Mask, f: impl Fn(bool, bool) -> bool) -> Mask {
        debug_assert_eq!(self.dims(), other.dims());
        Grid {
            width: self.width,
            height: self.height,
            cells: self
                .cells
                .iter()
                .zip(&other.cells)
                .map(|(&a, &b)| f(a, b))
                .collect(),
        }
    }
}

/// Label 4-connected components of `mask`
///
/// Labels start at 1 and are assigned in row-major order of each
/// component's first cell; unset cells get 0. Returns the label grid and
/// the number of components.
pub fn label_components(mask: &Mask) -> (Grid<Label>, Label) {
    let mut labels = Grid::filled(mask.width, mask.height, 0);
    let mut count: Label = 0;
    let mut queue = VecDeque::new();

    for start in mask.set_positions() {
        if labels[start] != 0 {
            continue;
        }
        count += 1;
        labels[start] = count;
        queue.push_back(start);

        while let Some(pos) = queue.pop_front() {
            for n in mask.neighbors(pos, Connectivity::Four) {
                if mask[n] && labels[n] == 0 {
                    labels[n] = count;
                    queue.push_back(n);
                }
            }
        }
    }

    (labels, count)
}
