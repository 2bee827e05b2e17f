// Seeded clustered data: each class gets a random centre and
// its samples are scattered uniformly around it. Rows are
// shuffled so any contiguous window mixes classes.

use anyhow::{bail, Result};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::data::dataset::{Dataset, DatasetSource};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyntheticSource {
    pub samples:  usize,
    pub features: usize,
    pub classes:  usize,
    pub seed:     u64,
    /// Half-width of the uniform noise around each centre
    pub spread:   f32,
}

impl SyntheticSource {
    pub fn new(samples: usize, features: usize, classes: usize, seed: u64) -> Self {
        Self { samples, features, classes, seed, spread: 1.0 }
    }
}

impl DatasetSource for SyntheticSource {
    fn load(&self) -> Result<Dataset> {
        if self.features == 0 || self.classes == 0 {
            bail!("synthetic data needs at least one feature and one class");
        }
        let mut rng = StdRng::seed_from_u64(self.seed);

        let centres: Vec<Vec<f32>> = (0..self.classes)
            .map(|_| (0..self.features).map(|_| rng.gen_range(-3.0..3.0)).collect())
            .collect();

        let mut rows: Vec<(Vec<f32>, usize)> = (0..self.samples)
            .map(|i| {
                let label = i % self.classes;
                let row = centres[label]
                    .iter()
                    .map(|c| c + rng.gen_range(-self.spread..=self.spread))
                    .collect();
                (row, label)
            })
            .collect();

        rows.shuffle(&mut rng);
        let (features, labels) = rows.into_iter().unzip();

        tracing::debug!(
            "Generated {} synthetic samples ({} features, {} classes, seed {})",
            self.samples, self.features, self.classes, self.seed
        );
        Dataset::new(features, labels)
    }
}
