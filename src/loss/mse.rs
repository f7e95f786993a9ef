//! Mean squared error.

use crate::loss::LossFunction;

/// Mean squared error over an epoch.
///
/// Each sample adds `Σ (t - y)² / dataset_size`; the gradient is `t - y`.
#[derive(Debug, Clone, Default)]
pub struct MseLoss {
    loss: f64,
    dataset_size: usize,
    gradients: Vec<f64>,
}

impl MseLoss {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LossFunction for MseLoss {
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
            let diff = t - y;
            *g = diff;
            sum += diff * diff;
        }
        self.loss += sum / self.dataset_size as f64;
        &self.gradients
    }

    fn epoch_loss(&self) -> f64 {
        self.loss
    }
}
