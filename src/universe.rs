//! Toroidal Game of Life field packed one bit per cell.
//!
//! Cell `(row, col)` has index `i = row * width + col` and lives in byte `i / 8`
//! at bit `i % 8` (least significant bit first). Bits past `width * height`
//! in the last byte are always zero.


use log::{debug, trace};

use crate::{parse_rle, Error, Init, Result};

pub struct Universe {
    width: u32,
    height: u32,
    cells: Vec<u8>,
    scratch: Vec<u8>,
    changed: Vec<usize>,
    init: Init,
    generation: u64,
}

impl Universe {
    /// Creates a field with all cells dead.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::with_init(width, height, Init::Dead)
    }

    /// Creates a field filled according to `init`.
    ///
    /// Fails with [`Error::InvalidDimension`] if a side is zero or the cell count
    /// does not fit in memory, and with [`Error::InvalidIndex`] /
    /// [`Error::InvalidFillRate`] if `init` does not fit the grid.
    pub fn with_init(width: u32, height: u32, init: Init) -> Result<Self> {
        let n = (width as usize)
            .checked_mul(height as usize)
            .filter(|&n| n != 0)
            .ok_or(Error::InvalidDimension { width, height })?;
        init.validate(width, height)?;

        let len = n.div_ceil(8);
        let (mut cells, scratch) = zeroed(len)
            .zip(zeroed(len))
            .ok_or(Error::InvalidDimension { width, height })?;
        init.fill(width, height, &mut cells);
        debug!("created {width}x{height} universe ({len} bytes) with {init:?}");
        Ok(Self {
            width,
            height,
            cells,
            scratch,
            changed: Vec::new(),
            init,
            generation: 0,
        })
    }

    /// Creates a field with an RLE pattern placed at the top-left corner.
    pub fn from_rle(width: u32, height: u32, data: &[u8]) -> Result<Self> {
        let pattern = parse_rle(data)?;
        if pattern.width > width || pattern.height > height {
            return Err(Error::Rle(format!(
                "{}x{} pattern does not fit into {width}x{height} grid",
                pattern.width, pattern.height
            )));
        }
        Self::with_init(width, height, Init::cells(pattern.alive))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Packed cells, `ceil(width * height / 8)` bytes.
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Indices of the cells flipped by the last [`Universe::tick`].
    ///
    /// Emptied by every other mutation.
    pub fn changed(&self) -> &[usize] {
        &self.changed
    }

    /// Number of ticks since construction or the last [`Universe::reset`].
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn init(&self) -> &Init {
        &self.init
    }

    /// Number of alive cells.
    pub fn population(&self) -> u64 {
        self.cells.iter().map(|x| x.count_ones() as u64).sum()
    }

    /// Row-major index of the cell, as used by [`Universe::cells`].
    pub fn index(&self, row: u32, col: u32) -> Result<usize> {
        self.check_bounds(row, col)?;
        Ok(self.index_unchecked(row, col))
    }

    pub fn get_cell(&self, row: u32, col: u32) -> Result<bool> {
        self.index(row, col).map(|idx| bit(&self.cells, idx))
    }

    pub fn set_cell(&mut self, row: u32, col: u32, alive: bool) -> Result<()> {
        let idx = self.index(row, col)?;
        let mask = 1 << (idx & 7);
        if alive {
            self.cells[idx >> 3] |= mask;
        } else {
            self.cells[idx >> 3] &= !mask;
        }
        self.changed.clear();
        Ok(())
    }

    /// Makes every listed `[row, col]` cell alive.
    ///
    /// All coordinates are checked before anything is written.
    pub fn set_cells(&mut self, alive: &[[u32; 2]]) -> Result<()> {
        for &[row, col] in alive {
            self.check_bounds(row, col)?;
        }
        for &[row, col] in alive {
            let idx = self.index_unchecked(row, col);
            self.cells[idx >> 3] |= 1 << (idx & 7);
        }
        self.changed.clear();
        Ok(())
    }

    /// Flips a single cell.
    pub fn toggle_cell(&mut self, row: u32, col: u32) -> Result<()> {
        let idx = self.index(row, col)?;
        self.cells[idx >> 3] ^= 1 << (idx & 7);
        self.changed.clear();
        Ok(())
    }

    /// Kills every cell.
    pub fn clear(&mut self) {
        self.cells.fill(0);
        self.changed.clear();
        debug!("cleared universe at generation {}", self.generation);
    }

    /// Restores the construction-time pattern.
    ///
    /// [`Init::Random`] without a seed produces a new pattern each time.
    pub fn reset(&mut self) {
        self.init.fill(self.width, self.height, &mut self.cells);
        self.changed.clear();
        self.generation = 0;
        debug!("reset universe to {:?}", self.init);
    }

    /// Advances the field by one generation (B3/S23) and returns the indices
    /// of cells that changed, in ascending order.
    pub fn tick(&mut self) -> &[usize] {
        let (w, h) = (self.width as usize, self.height as usize);
        self.scratch.fill(0);
        for row in 0..h {
            let north = if row == 0 { h - 1 } else { row - 1 };
            let south = if row == h - 1 { 0 } else { row + 1 };
            for col in 0..w {
                let west = if col == 0 { w - 1 } else { col - 1 };
                let east = if col == w - 1 { 0 } else { col + 1 };
                let neibs = [north, row, south]
                    .into_iter()
                    .flat_map(|r| [west, col, east].map(|c| bit(&self.cells, r * w + c) as u8))
                    .sum::<u8>()
                    - bit(&self.cells, row * w + col) as u8;

                let idx = row * w + col;
                let next = if bit(&self.cells, idx) {
                    neibs == 2 || neibs == 3
                } else {
                    neibs == 3
                };
                self.scratch[idx >> 3] |= (next as u8) << (idx & 7);
            }
        }

        self.changed.clear();
        for (i, (&old, &new)) in self.cells.iter().zip(self.scratch.iter()).enumerate() {
            let mut diff = old ^ new;
            while diff != 0 {
                self.changed.push(i * 8 + diff.trailing_zeros() as usize);
                diff &= diff - 1;
            }
        }
        std::mem::swap(&mut self.cells, &mut self.scratch);
        self.generation += 1;
        trace!(
            "generation {}: {} cells changed",
            self.generation,
            self.changed.len()
        );
        &self.changed
    }

    fn check_bounds(&self, row: u32, col: u32) -> Result<()> {
        if row < self.height && col < self.width {
            Ok(())
        } else {
            Err(Error::InvalidIndex {
                row,
                col,
                width: self.width,
                height: self.height,
            })
        }
    }

    fn index_unchecked(&self, row: u32, col: u32) -> usize {
        row as usize * self.width as usize + col as usize
    }
}

fn zeroed(len: usize) -> Option<Vec<u8>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len).ok()?;
    buf.resize(len, 0);
    Some(buf)
}

fn bit(cells: &[u8], idx: usize) -> bool {
    (cells[idx >> 3] >> (idx & 7)) & 1 == 1
}

impl std::fmt::Display for Universe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let w = self.width as usize;
        for row in 0..self.height as usize {
            for col in 0..w {
                let symbol = if bit(&self.cells, row * w + col) {
                    '◼'
                } else {
                    '◻'
                };
                write!(f, "{symbol}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Universe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Universe")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("generation", &self.generation)
            .field("population", &self.population())
            .finish()
    }
}
