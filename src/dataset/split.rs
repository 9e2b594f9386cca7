use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::{Error, Result};

/// Configuration for the train/test split
#[derive(Debug, Clone)]
pub struct SplitConfig {
    /// Fraction of records that go to the test set, in (0, 1)
    pub test_size: f64,
    /// Shuffle seed
    pub seed: u64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            test_size: 0.2,
            seed: 42,
        }
    }
}

impl SplitConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.test_size > 0.0 && self.test_size < 1.0) {
            return Err(Error::config(
                format!("test size {} is outside (0, 1)", self.test_size),
                "Pass a fraction such as --test-size 0.2",
            ));
        }
        Ok(())
    }
}

/// Seeded shuffle split into `(train, test)`
///
/// The test set takes `max(1, floor(n * test_size))` records (none when the
/// input is empty). Both halves keep the input's relative order.
pub fn split_dataset<T>(records: Vec<T>, config: &SplitConfig) -> Result<(Vec<T>, Vec<T>)> {
    config.validate()?;

    let n = records.len();
    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(config.seed);
    indices.shuffle(&mut rng);

    let test_count = ((n as f64 * config.test_size) as usize).max(1).min(n);
    let mut in_test = vec![false; n];
    for &i in &indices[..test_count] {
        in_test[i] = true;
    }

    let mut train = Vec::with_capacity(n - test_count);
    let mut test = Vec::with_capacity(test_count);
    for (record, is_test) in records.into_iter().zip(in_test) {
        if is_test {
            test.push(record);
        } else {
            train.push(record);
        }
    }

    Ok((train, test))
}
