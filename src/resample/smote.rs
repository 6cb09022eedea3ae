//! SMOTE synthetic oversampling with edited-nearest-neighbour cleaning
//!
//! SMOTE fills each minority class up to the majority count by interpolating
//! between a random minority row and one of its k nearest same-class
//! neighbours. The ENN pass then removes rows whose label disagrees with the
//! majority of their nearest neighbours, trimming the ambiguous boundary
//! points that plain duplication would amplify.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::{Dataset, RebalanceError, Result};
use crate::resample::Resampler;

/// Combined SMOTE + ENN resampler.
///
/// Each trainer owns its own instance; the transform carries no state
/// between `resample` calls beyond the optional seed.
#[derive(Debug, Clone)]
pub struct SmoteEnn {
    smote_neighbors: usize,
    enn_neighbors: usize,
    seed: Option<u64>,
}

impl SmoteEnn {
    /// Create a resampler with the conventional defaults: 5 SMOTE
    /// neighbours, 3 ENN neighbours.
    pub fn new() -> Self {
        Self {
            smote_neighbors: 5,
            enn_neighbors: 3,
            seed: None,
        }
    }

    /// Set the number of same-class neighbours considered for interpolation
    pub fn with_smote_neighbors(mut self, k: usize) -> Self {
        self.smote_neighbors = k;
        self
    }

    /// Set the number of neighbours used by the ENN cleaning vote
    pub fn with_enn_neighbors(mut self, k: usize) -> Self {
        self.enn_neighbors = k;
        self
    }

    /// Fix the RNG seed for reproducible resampling
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Generate synthetic rows until every class matches the majority count
    fn oversample<R: Rng>(&self, data: &Dataset, rng: &mut R) -> Result<Dataset> {
        let counts = data.class_balance();
        let target = counts.max_count();

        let mut synthetic_rows = Vec::new();
        let mut synthetic_labels = Vec::new();

        for (class, count) in counts.iter() {
            let deficit = target - count;
            if deficit == 0 {
                continue;
            }

            let rows = data.rows_of_class(class);
            for _ in 0..deficit {
                let base = rows[rng.gen_range(0..rows.len())];
                let row = if rows.len() == 1 {
                    // A singleton class has nothing to interpolate with
                    data.row(base).to_vec()
                } else {
                    let k = self.smote_neighbors.clamp(1, rows.len() - 1);
                    let neighbors = nearest_in_class(data, base, &rows, k);
                    let neighbor = neighbors[rng.gen_range(0..neighbors.len())];
                    interpolate(data.row(base), data.row(neighbor), rng.gen::<f64>())
                };
                synthetic_rows.push(row);
                synthetic_labels.push(class);
            }
        }

        let mut augmented = data.clone();
        augmented.append(Dataset::new(synthetic_rows, synthetic_labels)?)?;
        Ok(augmented)
    }

    /// Drop rows whose label loses the neighbourhood vote.
    ///
    /// A class is never edited down to zero rows.
    fn clean(&self, data: &Dataset) -> Result<Dataset> {
        if data.len() <= self.enn_neighbors + 1 {
            return Ok(data.clone());
        }

        let mut remaining: HashMap<i32, usize> = data.class_balance().iter().collect();
        let mut keep = Vec::with_capacity(data.len());

        for i in 0..data.len() {
            let label = data.label(i);
            let neighbors = nearest_overall(data, i, self.enn_neighbors);
            let agreeing = neighbors
                .iter()
                .filter(|&&j| data.label(j) == label)
                .count();

            let outvoted = agreeing * 2 < neighbors.len();
            let count = remaining.entry(label).or_insert(1);
            if outvoted && *count > 1 {
                *count -= 1;
            } else {
                keep.push(i);
            }
        }

        Ok(data.select(&keep))
    }
}

impl Default for SmoteEnn {
    fn default() -> Self {
        Self::new()
    }
}

impl Resampler for SmoteEnn {
    fn name(&self) -> String {
        "SMOTE+ENN".to_string()
    }

    fn resample(&self, data: &Dataset) -> Result<Dataset> {
        if data.is_empty() {
            return Err(RebalanceError::EmptyDataset);
        }
        let mut rng = self.rng();
        let augmented = self.oversample(data, &mut rng)?;
        self.clean(&augmented)
    }
}

fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum()
}

/// Linear interpolation: base + gap * (neighbor - base), gap in [0, 1)
fn interpolate(base: &[f64], neighbor: &[f64], gap: f64) -> Vec<f64> {
    base.iter()
        .zip(neighbor.iter())
        .map(|(b, n)| b + gap * (n - b))
        .collect()
}

/// The k nearest rows to `base` among `rows`, excluding `base` itself
fn nearest_in_class(data: &Dataset, base: usize, rows: &[usize], k: usize) -> Vec<usize> {
    let mut by_distance: Vec<(f64, usize)> = rows
        .iter()
        .filter(|&&i| i != base)
        .map(|&i| (squared_distance(data.row(base), data.row(i)), i))
        .collect();
    by_distance.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
    by_distance.into_iter().take(k).map(|(_, i)| i).collect()
}

/// The k nearest rows to row `i` across the whole dataset
fn nearest_overall(data: &Dataset, i: usize, k: usize) -> Vec<usize> {
    let mut by_distance: Vec<(f64, usize)> = (0..data.len())
        .filter(|&j| j != i)
        .map(|j| (squared_distance(data.row(i), data.row(j)), j))
        .collect();
    by_distance.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
    by_distance.into_iter().take(k).map(|(_, i)| i).collect()
}
