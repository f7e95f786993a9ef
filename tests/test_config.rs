//! Tests for JSON configuration loading
//!
//! This file tests:
//! - Loading the shipped architecture and training configs
//! - Defaults for optional fields
//! - Rejecting invalid values, malformed JSON and missing files
//! - Building and training a network entirely from config files

use feedforward_nn::architecture::{build_network, load_architecture};
use feedforward_nn::config::load_config;
use feedforward_nn::layers::WeightInitializer;
use feedforward_nn::loss::Loss;
use feedforward_nn::training::{EpochCallback, Training};
use feedforward_nn::utils::Activation;
use feedforward_nn::{DataSet, NetworkError};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_temp_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("failed to write temp config");
    file
}

// ============================================================================
// Shipped Config Tests
// ============================================================================

mod shipped_config_tests {
    use super::*;

    #[test]
    fn test_load_xor_architecture() {
        let config = load_architecture("config/architectures/xor.json").unwrap();
        assert_eq!(config.input_size, 2);
        assert_eq!(config.layers.len(), 2);
        assert_eq!(config.layers[0].size, 4);
        assert_eq!(config.layers[0].activation, Activation::Tanh);
        assert_eq!(config.layers[0].initializer, WeightInitializer::XavierUniform);
        assert_eq!(config.layers[1].activation, Activation::Logistic);
        assert!(config.layers[1].bias);
    }

    #[test]
    fn test_load_xor_training() {
        let config = load_config("config/training/xor.json").unwrap();
        assert_eq!(config.epochs, 2000);
        assert_eq!(config.batch_size, Some(1));
        assert_eq!(config.momentum, Some(0.5));
        assert_eq!(config.loss, Loss::Mse);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_load_or_configs() {
        let architecture = load_architecture("config/architectures/or.json").unwrap();
        assert_eq!(
            architecture.layers[0].initializer,
            WeightInitializer::gaussian(0.0, 0.3)
        );

        let training = load_config("config/training/or_batched.json").unwrap();
        assert_eq!(training.loss, Loss::CrossEntropy);
        assert_eq!(training.momentum, None);
    }
}

// ============================================================================
// Temp File Tests
// ============================================================================

mod temp_file_tests {
    use super::*;

    #[test]
    fn test_architecture_defaults() {
        let file = write_temp_config(r#"{"input_size": 3, "layers": [{"size": 2}]}"#);
        let config = load_architecture(file.path()).unwrap();

        let layer = &config.layers[0];
        assert!(layer.bias);
        assert_eq!(layer.activation, Activation::Logistic);
        assert_eq!(layer.initializer, WeightInitializer::default());
    }

    #[test]
    fn test_architecture_without_layers() {
        let file = write_temp_config(r#"{"input_size": 3, "layers": []}"#);
        assert!(matches!(
            load_architecture(file.path()),
            Err(NetworkError::InvalidTopology(_))
        ));
    }

    #[test]
    fn test_architecture_zero_size_layer() {
        let file = write_temp_config(r#"{"input_size": 3, "layers": [{"size": 4}, {"size": 0}]}"#);
        let err = load_architecture(file.path()).unwrap_err();
        assert!(matches!(err, NetworkError::InvalidLayer(_)));
        assert!(err.to_string().contains("Layer 2"));
    }

    #[test]
    fn test_architecture_bad_initializer() {
        let file = write_temp_config(
            r#"{"input_size": 1, "layers": [
                {"size": 1, "initializer": {"type": "gaussian", "mean": 0.0, "std_dev": -1.0}}
            ]}"#,
        );
        assert!(matches!(
            load_architecture(file.path()),
            Err(NetworkError::InvalidLayer(_))
        ));
    }

    #[test]
    fn test_unknown_activation() {
        let file =
            write_temp_config(r#"{"input_size": 1, "layers": [{"size": 1, "activation": "gelu"}]}"#);
        assert!(matches!(
            load_architecture(file.path()),
            Err(NetworkError::Json(_))
        ));
    }

    #[test]
    fn test_training_defaults() {
        let file = write_temp_config(r#"{"epochs": 5, "learning_rate": 0.1}"#);
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.batch_size, None);
        assert_eq!(config.validation_threshold, None);
        assert_eq!(config.options().batch_size, None);
        assert_eq!(config.callback().loss_threshold, None);
    }

    #[test]
    fn test_training_invalid_values() {
        let file = write_temp_config(r#"{"epochs": 5, "learning_rate": 0.1, "momentum": 1.5}"#);
        assert!(matches!(
            load_config(file.path()),
            Err(NetworkError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_malformed_json() {
        let file = write_temp_config(r#"{"epochs": 5, "learning_rate": "#);
        assert!(matches!(load_config(file.path()), Err(NetworkError::Json(_))));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_config("config/training/does_not_exist.json"),
            Err(NetworkError::Io(_))
        ));
        assert!(matches!(
            load_architecture("config/architectures/does_not_exist.json"),
            Err(NetworkError::Io(_))
        ));
    }
}

// ============================================================================
// End-To-End Tests
// ============================================================================

mod end_to_end_tests {
    use super::*;

    struct Count(usize);

    impl EpochCallback for Count {
        fn on_epoch(&mut self, _: usize, _: f64, _: f64, _: bool) {
            self.0 += 1;
        }
    }

    #[test]
    fn test_train_from_config_files() {
        let architecture = load_architecture("config/architectures/xor.json").unwrap();
        let file = write_temp_config(
            r#"{"epochs": 3, "batch_size": 2, "learning_rate": 0.3, "momentum": 0.5, "seed": 42}"#,
        );
        let config = load_config(file.path()).unwrap();

        let mut rng = config.rng();
        let mut network = build_network(&architecture, &mut rng).unwrap();
        let mut data = DataSet::new(
            vec![vec![0.0, 0.0], vec![0.0, 1.0], vec![1.0, 0.0], vec![1.0, 1.0]],
            vec![vec![0.0], vec![1.0], vec![1.0], vec![0.0]],
        )
        .unwrap();
        let validation = data.clone();
        let mut optimizer = config.optimizer();

        let mut count = Count(0);
        let report = Training::new(
            &mut network,
            &mut data,
            &validation,
            &mut optimizer,
            config.options(),
        )
        .unwrap()
        .perform(&mut count, &mut rng)
        .unwrap();

        assert_eq!(count.0, 3);
        assert_eq!(report.epochs_completed, 3);
        assert!(report.validation_loss.is_finite());
    }
}
