use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::{Error, Result};

/// Initial state of a universe, kept around so that `reset` can replay it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Init {
    /// Every cell is dead.
    #[default]
    Dead,
    /// Listed `[row, col]` cells are alive, the rest are dead.
    Cells { alive: Vec<[u32; 2]> },
    /// Every cell is alive with probability `fill_rate`.
    ///
    /// Cells are drawn in row-major order from `ChaCha8Rng::seed_from_u64(seed)`,
    /// so a fixed seed yields the same field on every platform.
    /// `seed = None` takes a fresh seed from the OS on every (re)initialization.
    Random { seed: Option<u64>, fill_rate: f64 },
}

impl Init {
    pub fn cells(alive: impl Into<Vec<[u32; 2]>>) -> Self {
        Self::Cells {
            alive: alive.into(),
        }
    }

    pub fn random(seed: Option<u64>, fill_rate: f64) -> Self {
        Self::Random { seed, fill_rate }
    }

    /// Checks the mode against the grid it will be applied to.
    pub(crate) fn validate(&self, width: u32, height: u32) -> Result<()> {
        match self {
            Self::Dead => Ok(()),
            Self::Cells { alive } => {
                match alive.iter().find(|&&[row, col]| row >= height || col >= width) {
                    Some(&[row, col]) => Err(Error::InvalidIndex {
                        row,
                        col,
                        width,
                        height,
                    }),
                    None => Ok(()),
                }
            }
            Self::Random { fill_rate, .. } => {
                if (0.0..=1.0).contains(fill_rate) {
                    Ok(())
                } else {
                    Err(Error::InvalidFillRate(*fill_rate))
                }
            }
        }
    }

    /// Writes the pattern into a zeroed packed buffer.
    ///
    /// Must only be called after a successful [`Init::validate`].
    pub(crate) fn fill(&self, width: u32, height: u32, cells: &mut [u8]) {
        cells.fill(0);
        match self {
            Self::Dead => {}
            Self::Cells { alive } => {
                for &[row, col] in alive {
                    let idx = row as usize * width as usize + col as usize;
                    cells[idx >> 3] |= 1 << (idx & 7);
                }
            }
            Self::Random { seed, fill_rate } => {
                let mut rng = if let Some(x) = seed {
                    ChaCha8Rng::seed_from_u64(*x)
                } else {
                    ChaCha8Rng::from_entropy()
                };
                let n = width as usize * height as usize;
                for idx in 0..n {
                    if rng.gen_bool(*fill_rate) {
                        cells[idx >> 3] |= 1 << (idx & 7);
                    }
                }
            }
        }
    }
}
