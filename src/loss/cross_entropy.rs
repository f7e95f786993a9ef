//! Binary cross-entropy.

use crate::loss::LossFunction;

/// Guard added inside both logarithms and to the gradient denominator.
pub const CROSS_ENTROPY_EPSILON: f64 = 1e-28;

/// Binary cross-entropy over an epoch.
///
/// Each sample adds `Σ [-t ln(y + ε) - (1 - t) ln(1 - y + ε)] / dataset_size`;
/// the gradient is `-(y - t) / (y (1 - y) + ε)`.
#[derive(Debug, Clone, Default)]
pub struct CrossEntropyLoss {
    loss: f64,
    dataset_size: usize,
    gradients: Vec<f64>,
}

impl CrossEntropyLoss {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LossFunction for CrossEntropyLoss {
    fn on_epoch_started(&mut self, output_size: usize, dataset_size: usize) {
        self.dataset_size = dataset_size;
        self.gradients.clear();
        self.gradients.resize(output_size, 0.0);
        self.loss = 0.0;
    }

    fn on_epoch_sample(&mut self, activation: &[f64], target: &[f64]) -> &[f64] {
        debug_assert!(self.dataset_size > 0, "on_epoch_started with an empty data set");
        debug_assert_eq!(activation.len(), self.gradients.len());
        debug_assert_eq!(target.len(), self.gradients.len());
        let mut sum = 0.0;
        for ((g, &y), &t) in self.gradients.iter_mut().zip(activation).zip(target) {
            let one_minus_y = 1.0 - y;
            *g = -(y - t) / (y * one_minus_y + CROSS_ENTROPY_EPSILON);
            sum += -t * (y + CROSS_ENTROPY_EPSILON).ln()
                - (1.0 - t) * (one_minus_y + CROSS_ENTROPY_EPSILON).ln();
        }
        self.loss += sum / self.dataset_size as f64;
        &self.gradients
    }

    fn epoch_loss(&self) -> f64 {
        self.loss
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reinitializes_values_on_epoch_start() {
        let mut ce = CrossEntropyLoss::new();
        ce.on_epoch_started(10, 10);
        assert_eq!(ce.epoch_loss(), 0.0);
        assert_eq!(ce.gradients.len(), 10);

        ce.on_epoch_started(20, 20);
        assert_eq!(ce.dataset_size, 20);
        assert_eq!(ce.gradients.len(), 20);
    }

    #[test]
    fn test_perfect_prediction_is_zero() {
        let mut ce = CrossEntropyLoss::new();
        ce.on_epoch_started(3, 1);
        let gradients = ce.on_epoch_sample(&[0.0, 0.0, 1.0], &[0.0, 0.0, 1.0]).to_vec();
        assert!(ce.epoch_loss().abs() < 1e-12);
        assert!(gradients.iter().all(|g| *g == 0.0));
    }

    #[test]
    fn test_confident_disagreement_is_large() {
        let mut ce = CrossEntropyLoss::new();
        ce.on_epoch_started(2, 3);

        ce.on_epoch_sample(&[0.0, 1.0], &[0.0, 1.0]);
        assert!(ce.epoch_loss().abs() < 1e-6);

        let gradients = ce.on_epoch_sample(&[0.0, 1.0], &[1.0, 0.0]).to_vec();
        let expected = -2.0 * CROSS_ENTROPY_EPSILON.ln() / 3.0;
        assert!((ce.epoch_loss() - expected).abs() < 1e-9);
        assert!(ce.epoch_loss() > 40.0);
        assert!(gradients[0] > 1e27);
        assert!(gradients[1] < -1e27);
    }

    #[test]
    fn test_loss_grows_with_disagreement() {
        let mut previous = 0.0;
        for y in [0.9, 0.7, 0.5, 0.3, 0.1, 0.01] {
            let mut ce = CrossEntropyLoss::new();
            ce.on_epoch_started(1, 1);
            ce.on_epoch_sample(&[y], &[1.0]);
            assert!(ce.epoch_loss() > previous, "y = {}", y);
            assert!(ce.epoch_loss() >= 0.0);
            previous = ce.epoch_loss();
        }
    }

    #[test]
    fn test_gradient_points_towards_target() {
        let mut ce = CrossEntropyLoss::new();
        ce.on_epoch_started(2, 1);
        let gradients = ce.on_epoch_sample(&[0.25, 0.75], &[1.0, 0.0]).to_vec();
        assert!((gradients[0] - 0.75 / 0.1875).abs() < 1e-9);
        assert!((gradients[1] + 0.75 / 0.1875).abs() < 1e-9);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic]
    fn test_short_activation_panics() {
        let mut loss = CrossEntropyLoss::new();
        loss.on_epoch_started(2, 1);
        loss.on_epoch_sample(&[0.5], &[1.0, 0.0]);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic]
    fn test_sample_without_data_set_size_panics() {
        let mut loss = CrossEntropyLoss::new();
        loss.on_epoch_started(1, 0);
        loss.on_epoch_sample(&[0.5], &[1.0]);
    }
}
