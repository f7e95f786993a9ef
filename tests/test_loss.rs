//! Tests for loss functions: accumulation over a data set and through a
//! network.

use approx::assert_relative_eq;
use feedforward_nn::architecture::{LayerConfig, NetworkConfig};
use feedforward_nn::loss::{CrossEntropyLoss, Loss, LossFunction, MseLoss};
use feedforward_nn::utils::{Activation, SimpleRng};
use feedforward_nn::{DataSet, Network};

/// 1 -> 1 identity network computing `2x + 1`.
fn affine_network() -> Network {
    let config = NetworkConfig::new(1).layer(LayerConfig::new(1).activation(Activation::Identity));
    let mut network = Network::new(&config, &mut SimpleRng::new(1)).unwrap();
    network.import_weights(&[vec![2.0, 1.0]]).unwrap();
    network
}

// ============================================================================
// MSE Tests
// ============================================================================

mod mse_tests {
    use super::*;

    #[test]
    fn test_running_loss() {
        let mut loss = MseLoss::new();
        loss.on_epoch_started(1, 3);

        let expected = [1.0 / 3.0, 5.0 / 3.0, 14.0 / 3.0];
        for (target, expected) in [1.0, 2.0, 3.0].into_iter().zip(expected) {
            let gradient = loss.on_epoch_sample(&[0.0], &[target]).to_vec();
            assert_eq!(gradient, vec![target]);
            assert_relative_eq!(loss.epoch_loss(), expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_compute_over_network() {
        let mut network = affine_network();
        let data = DataSet::new(
            vec![vec![0.0], vec![1.0], vec![2.0]],
            vec![vec![1.0], vec![4.0], vec![5.0]],
        )
        .unwrap();

        // outputs 1, 3, 5
        let loss = MseLoss::new().compute(&mut network, &data).unwrap();
        assert_relative_eq!(loss, 1.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_compute_resets_between_calls() {
        let mut network = affine_network();
        let data = DataSet::new(vec![vec![0.0]], vec![vec![3.0]]).unwrap();
        let mut loss = Loss::Mse.build();

        let first = loss.compute(&mut network, &data).unwrap();
        let second = loss.compute(&mut network, &data).unwrap();
        assert_relative_eq!(first, 4.0);
        assert_eq!(first, second);
    }
}

// ============================================================================
// Cross-Entropy Tests
// ============================================================================

mod cross_entropy_tests {
    use super::*;

    fn binary_cross_entropy(y: f64, t: f64) -> f64 {
        let eps = feedforward_nn::loss::cross_entropy::CROSS_ENTROPY_EPSILON;
        -t * (y + eps).ln() - (1.0 - t) * (1.0 - y + eps).ln()
    }

    #[test]
    fn test_matches_formula() {
        let activations = [[0.2, 0.7], [0.9, 0.4]];
        let targets = [[0.0, 1.0], [1.0, 1.0]];

        let mut loss = CrossEntropyLoss::new();
        loss.on_epoch_started(2, 2);
        let mut expected = 0.0;
        for (y, t) in activations.iter().zip(&targets) {
            let gradient = loss.on_epoch_sample(y, t).to_vec();
            for k in 0..2 {
                expected += binary_cross_entropy(y[k], t[k]) / 2.0;
                assert_relative_eq!(
                    gradient[k],
                    (t[k] - y[k]) / (y[k] * (1.0 - y[k])),
                    epsilon = 1e-9
                );
            }
        }
        assert_relative_eq!(loss.epoch_loss(), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_near_zero_for_perfect_prediction() {
        let mut loss = CrossEntropyLoss::new();
        loss.on_epoch_started(1, 2);
        loss.on_epoch_sample(&[1.0], &[1.0]);
        loss.on_epoch_sample(&[0.0], &[0.0]);
        assert!(loss.epoch_loss().abs() < 1e-12);
    }

    #[test]
    fn test_large_for_confident_mistake() {
        let mut loss = CrossEntropyLoss::new();
        loss.on_epoch_started(1, 1);
        loss.on_epoch_sample(&[0.0], &[1.0]);
        assert!(loss.epoch_loss() > 50.0);
        assert!(loss.epoch_loss().is_finite());
    }

    #[test]
    fn test_compute_with_logistic_output() {
        let config = NetworkConfig::new(2).layer(LayerConfig::new(1));
        let mut network = Network::new(&config, &mut SimpleRng::new(5)).unwrap();
        let data = DataSet::new(vec![vec![0.0, 1.0], vec![1.0, 0.0]], vec![vec![1.0], vec![0.0]])
            .unwrap();

        let y0 = network.forward_pass(&[0.0, 1.0]).unwrap()[0];
        let y1 = network.forward_pass(&[1.0, 0.0]).unwrap()[0];
        let expected = (binary_cross_entropy(y0, 1.0) + binary_cross_entropy(y1, 0.0)) / 2.0;

        let loss = Loss::CrossEntropy.build().compute(&mut network, &data).unwrap();
        assert_relative_eq!(loss, expected, epsilon = 1e-12);
    }
}
