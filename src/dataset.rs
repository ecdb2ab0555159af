//! The bound dataset and the shuffle seam

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use thiserror::Error;

/// Values bound to the circles on startup
pub const DEFAULT_DATA: [f64; 6] = [5.0, 8.0, 11.0, 14.0, 17.0, 20.0];

#[derive(Debug, Error, PartialEq)]
pub enum DatasetError {
    #[error("dataset is empty")]
    Empty,
    #[error("dataset value at index {index} must be positive and finite, got {value}")]
    NotPositive { index: usize, value: f64 },
}

/// Something that permutes a slice in place
pub trait Shuffler: Send {
    fn shuffle(&mut self, values: &mut [f64]);
}

/// Uniform Fisher-Yates shuffle backed by `rand`
pub struct RandomShuffler {
    rng: StdRng,
}

impl RandomShuffler {
    pub fn from_entropy() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    /// Reproducible orderings for a given seed
    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }
}

impl Shuffler for RandomShuffler {
    fn shuffle(&mut self, values: &mut [f64]) {
        values.shuffle(&mut self.rng);
    }
}

/// Ordered values controlling both order and radius
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    values: Vec<f64>,
}

impl Default for Dataset {
    fn default() -> Self {
        Self { values: DEFAULT_DATA.to_vec() }
    }
}

impl Dataset {
    pub fn new(values: Vec<f64>) -> Result<Self, DatasetError> {
        if values.is_empty() {
            return Err(DatasetError::Empty);
        }
        if let Some((index, &value)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !(v.is_finite() && **v > 0.0))
        {
            return Err(DatasetError::NotPositive { index, value });
        }
        Ok(Self { values })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Permute in place; never adds, drops or alters a value
    pub fn shuffle_with(&mut self, shuffler: &mut dyn Shuffler) {
        shuffler.shuffle(&mut self.values);
        tracing::debug!("Dataset shuffled to {:?}", self.values);
    }
}
