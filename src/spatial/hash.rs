//! Uniform-grid spatial hash used as the collision broad phase.
//!
//! The hash covers a bounded rectangular universe split into square cells of
//! `cell_size` units. Every inserted key is appended to each cell its
//! rectangle covers, and the last rectangle inserted for a key is remembered
//! so queries can hand it back alongside the key.
//!
//! Rectangles that reach outside the universe are clamped into the border
//! cells instead of being rejected. Entities far outside the world therefore
//! still collide with whatever sits near the matching edge.
//!
//! Buckets and the rectangle table are cleared in place every frame, and
//! retrieval deduplicates through a pooled set, so a warmed-up hash does not
//! allocate on the hot path.

use std::hash::Hash;
use std::iter::FusedIterator;

use rustc_hash::FxHashMap;

use super::pool::{PooledSet, SetPool};
use super::rect::Rect;

#[derive(Debug)]
pub struct SpatialHash<K> {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    cell_size: i32,
    rows: usize,
    columns: usize,
    /// Row-major, `rows * columns` buckets.
    cells: Vec<Vec<K>>,
    rects: FxHashMap<K, Rect>,
    pool: SetPool<K>,
}

impl<K: Copy + Eq + Hash> SpatialHash<K> {
    /// Create a hash covering `width` x `height` units starting at `(x, y)`.
    ///
    /// # Panics
    /// If `cell_size` is not positive.
    pub fn new(x: i32, y: i32, width: i32, height: i32, cell_size: i32) -> Self {
        assert!(cell_size > 0, "spatial hash cell size must be positive");
        let rows = (height / cell_size).max(1) as usize;
        let columns = (width / cell_size).max(1) as usize;
        let mut cells = Vec::with_capacity(rows * columns);
        cells.resize_with(rows * columns, Vec::new);
        Self {
            x,
            y,
            width,
            height,
            cell_size,
            rows,
            columns,
            cells,
            rects: FxHashMap::default(),
            pool: SetPool::new(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn cell_size(&self) -> i32 {
        self.cell_size
    }

    /// The universe covered by the grid.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Number of distinct keys inserted since the last clear.
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Rectangle last inserted for `id`.
    pub fn rect(&self, id: K) -> Option<Rect> {
        self.rects.get(&id).copied()
    }

    /// Add `id` to every cell `rect` covers. Inserting the same key twice keeps
    /// the old buckets and overwrites the recorded rectangle.
    pub fn insert(&mut self, id: K, rect: Rect) {
        let range = self.cell_range(&rect);
        for (row, column) in range {
            self.cells[row * self.columns + column].push(id);
        }
        self.rects.insert(id, rect);
    }

    /// Empty every bucket and the rectangle table, keeping their capacity.
    pub fn clear(&mut self) {
        for bucket in &mut self.cells {
            bucket.clear();
        }
        self.rects.clear();
    }

    /// Every distinct key sharing a cell with `rect`, with its recorded
    /// rectangle. This is a broad-phase result: callers confirm overlap with
    /// [`Rect::intersects`].
    pub fn retrieve(&mut self, rect: Rect) -> Retrieve<'_, K> {
        self.retrieve_inner(None, rect)
    }

    /// Like [`retrieve`](Self::retrieve) but never yields `id` itself.
    pub fn retrieve_excluding(&mut self, id: K, rect: Rect) -> Retrieve<'_, K> {
        self.retrieve_inner(Some(id), rect)
    }

    /// First key other than `id` whose recorded rectangle truly intersects
    /// `rect`.
    pub fn first_overlap(&mut self, id: K, rect: Rect) -> Option<(K, Rect)> {
        self.retrieve_excluding(id, rect)
            .find(|(_, other)| other.intersects(&rect))
    }

    fn retrieve_inner(&mut self, exclude: Option<K>, rect: Rect) -> Retrieve<'_, K> {
        let cells = self.cell_range(&rect);
        let Self {
            cells: buckets,
            rects,
            pool,
            columns,
            ..
        } = self;
        let mut seen = pool.acquire();
        if let Some(id) = exclude {
            seen.insert(id);
        }
        Retrieve {
            cells,
            buckets,
            columns: *columns,
            rects,
            bucket: Default::default(),
            seen,
        }
    }

    /// Inclusive cell range covered by `rect`, clamped into the grid.
    fn cell_range(&self, rect: &Rect) -> CellRange {
        // widened so rects near the i32 limits still reach the clamp
        let (x, y, cell) = (self.x as i64, self.y as i64, self.cell_size as i64);
        let max_column = self.columns as i64 - 1;
        let max_row = self.rows as i64 - 1;
        let left = rect.x as i64;
        let top = rect.y as i64;
        // last covered unit; degenerate rects still occupy their origin cell
        let right = (left + rect.w as i64).max(left + 1) - 1;
        let bottom = (top + rect.h as i64).max(top + 1) - 1;

        let min_col = (left - x).div_euclid(cell).clamp(0, max_column);
        let max_col = (right - x).div_euclid(cell).clamp(0, max_column);
        let min_row = (top - y).div_euclid(cell).clamp(0, max_row);
        let max_row = (bottom - y).div_euclid(cell).clamp(0, max_row);

        CellRange::new(
            min_row as usize,
            max_row as usize,
            min_col as usize,
            max_col as usize,
        )
    }
}

/// Row-major walk over an inclusive block of `(row, column)` cells.
#[derive(Debug, Clone)]
pub struct CellRange {
    min_col: usize,
    max_col: usize,
    max_row: usize,
    row: usize,
    col: usize,
    done: bool,
}

impl CellRange {
    fn new(min_row: usize, max_row: usize, min_col: usize, max_col: usize) -> Self {
        Self {
            min_col,
            max_col,
            max_row,
            row: min_row,
            col: min_col,
            done: min_row > max_row || min_col > max_col,
        }
    }
}

impl Iterator for CellRange {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let cell = (self.row, self.col);
        if self.col < self.max_col {
            self.col += 1;
        } else if self.row < self.max_row {
            self.col = self.min_col;
            self.row += 1;
        } else {
            self.done = true;
        }
        Some(cell)
    }
}

impl FusedIterator for CellRange {}

/// Lazy, deduplicated query result. Holds a pooled set until dropped.
pub struct Retrieve<'a, K: Copy + Eq + Hash> {
    cells: CellRange,
    buckets: &'a [Vec<K>],
    columns: usize,
    rects: &'a FxHashMap<K, Rect>,
    bucket: std::slice::Iter<'a, K>,
    seen: PooledSet<'a, K>,
}

impl<K: Copy + Eq + Hash> Iterator for Retrieve<'_, K> {
    type Item = (K, Rect);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            for &id in self.bucket.by_ref() {
                if self.seen.insert(id) {
                    // buckets and the rect table are filled and cleared together
                    return Some((id, self.rects[&id]));
                }
            }
            let (row, column) = self.cells.next()?;
            self.bucket = self.buckets[row * self.columns + column].iter();
        }
    }
}

impl<K: Copy + Eq + Hash> FusedIterator for Retrieve<'_, K> {}
