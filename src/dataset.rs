//! In-memory data set of (input, target) pairs.
//!
//! Samples are stored once; shuffling only permutes the order in which they
//! are read, so a seeded random source gives a reproducible read order.

use crate::error::{NetworkError, Result};
use rand::seq::SliceRandom;
use rand::Rng;

/// Fixed-size collection of (input, target) samples.
///
/// All inputs share one dimension and all targets share one dimension.
///
/// # Example
///
/// ```
/// use feedforward_nn::DataSet;
///
/// let data = DataSet::new(
///     vec![vec![0.0, 1.0], vec![1.0, 1.0]],
///     vec![vec![1.0], vec![0.0]],
/// )
/// .unwrap();
/// assert_eq!(data.len(), 2);
/// assert_eq!(data.input_dimension(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DataSet {
    inputs: Vec<Vec<f64>>,
    targets: Vec<Vec<f64>>,
    order: Vec<usize>,
    input_dimension: usize,
    output_dimension: usize,
}

impl DataSet {
    /// Create a data set, validating counts and dimensions.
    pub fn new(inputs: Vec<Vec<f64>>, targets: Vec<Vec<f64>>) -> Result<Self> {
        if inputs.len() != targets.len() {
            return Err(NetworkError::InvalidDataSet(format!(
                "input and output must have equal size, input has {} samples while output has {}",
                inputs.len(),
                targets.len()
            )));
        }

        if inputs.is_empty() {
            return Err(NetworkError::InvalidDataSet(
                "data set must have data in it, input and output are empty".to_string(),
            ));
        }

        let input_dimension = check_dimension(&inputs, "input")?;
        let output_dimension = check_dimension(&targets, "output")?;

        Ok(Self {
            order: (0..inputs.len()).collect(),
            inputs,
            targets,
            input_dimension,
            output_dimension,
        })
    }

    /// Create a data set of `size` samples produced by `sample(index)`.
    pub fn from_fn<F>(size: usize, mut sample: F) -> Result<Self>
    where
        F: FnMut(usize) -> (Vec<f64>, Vec<f64>),
    {
        let (inputs, targets): (Vec<_>, Vec<_>) = (0..size).map(&mut sample).unzip();
        Self::new(inputs, targets)
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    /// Always false: empty data sets are rejected at construction.
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    pub fn input_dimension(&self) -> usize {
        self.input_dimension
    }

    pub fn output_dimension(&self) -> usize {
        self.output_dimension
    }

    /// Whether `other` has the same input and output dimensions.
    pub fn same_dimensions_as(&self, other: &DataSet) -> bool {
        self.input_dimension == other.input_dimension
            && self.output_dimension == other.output_dimension
    }

    /// Randomize the read order. The samples themselves are not moved.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.order.shuffle(rng);
    }

    /// Iterate over (input, target) pairs in the current read order.
    pub fn iter(&self) -> impl Iterator<Item = (&[f64], &[f64])> + '_ {
        self.order
            .iter()
            .map(move |&i| (self.inputs[i].as_slice(), self.targets[i].as_slice()))
    }

    /// Call `action` on every sample in the current read order.
    pub fn for_each<F: FnMut(&[f64], &[f64])>(&self, mut action: F) {
        for (input, target) in self.iter() {
            action(input, target);
        }
    }

    /// Map every sample, in the current read order, to one result.
    pub fn map<T, F: FnMut(&[f64], &[f64]) -> T>(&self, mut f: F) -> Vec<T> {
        self.iter().map(|(input, target)| f(input, target)).collect()
    }
}

fn check_dimension(samples: &[Vec<f64>], label: &str) -> Result<usize> {
    let dimension = samples[0].len();
    for (index, sample) in samples.iter().enumerate() {
        if sample.len() != dimension {
            return Err(NetworkError::InvalidDataSet(format!(
                "all {label} samples must have the same dimension, {label} sample at index 0 has size {dimension} while {label} sample at index {index} has {}",
                sample.len()
            )));
        }
    }
    Ok(dimension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::SimpleRng;

    fn counting(size: usize) -> DataSet {
        DataSet::from_fn(size, |i| (vec![i as f64], vec![i as f64 * 2.0])).unwrap()
    }

    #[test]
    fn test_mismatched_counts() {
        let err = DataSet::new(vec![vec![0.0]], vec![]).unwrap_err();
        assert!(err.to_string().contains("equal size"));
    }

    #[test]
    fn test_empty_rejected() {
        assert!(matches!(
            DataSet::new(vec![], vec![]),
            Err(NetworkError::InvalidDataSet(_))
        ));
    }

    #[test]
    fn test_inconsistent_dimensions() {
        let err = DataSet::new(
            vec![vec![0.0, 1.0], vec![0.0]],
            vec![vec![1.0], vec![1.0]],
        )
        .unwrap_err();
        assert!(err.to_string().contains("index 1"));

        assert!(DataSet::new(vec![vec![0.0], vec![1.0]], vec![vec![1.0], vec![]]).is_err());
    }

    #[test]
    fn test_iteration_in_order() {
        let data = counting(4);
        let seen = data.map(|input, target| (input[0], target[0]));
        assert_eq!(seen, vec![(0.0, 0.0), (1.0, 2.0), (2.0, 4.0), (3.0, 6.0)]);
    }

    #[test]
    fn test_shuffle_keeps_pairs_together() {
        let mut data = counting(50);
        data.shuffle(&mut SimpleRng::new(11));

        let mut firsts = Vec::new();
        data.for_each(|input, target| {
            assert_eq!(target[0], input[0] * 2.0);
            firsts.push(input[0] as usize);
        });
        assert_ne!(firsts, (0..50).collect::<Vec<_>>());

        firsts.sort();
        assert_eq!(firsts, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_shuffle_deterministic_with_seed() {
        let mut a = counting(20);
        let mut b = counting(20);
        a.shuffle(&mut SimpleRng::new(3));
        b.shuffle(&mut SimpleRng::new(3));
        assert_eq!(a, b);
    }

    #[test]
    fn test_same_dimensions_as() {
        let a = counting(3);
        let b = DataSet::new(vec![vec![1.0]], vec![vec![1.0]]).unwrap();
        let c = DataSet::new(vec![vec![1.0, 2.0]], vec![vec![1.0]]).unwrap();
        assert!(a.same_dimensions_as(&b));
        assert!(!a.same_dimensions_as(&c));
    }
}
