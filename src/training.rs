//! Training loop
//!
//! [`Training`] runs mini-batch gradient descent over a training set for a
//! fixed number of epochs, measuring the loss on a validation set after every
//! epoch and reporting both losses to an [`EpochCallback`], which may stop
//! training early.

use crate::dataset::DataSet;
use crate::error::{NetworkError, Result};
use crate::loss::{Loss, LossFunction};
use crate::network::Network;
use crate::optimizers::Optimizer;
use rand::Rng;
use tracing::{debug, info};

/// Options for a training run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingOptions {
    /// Number of passes over the training set
    pub epochs: usize,
    /// Samples per weight update; `None` updates once per epoch
    pub batch_size: Option<usize>,
    /// Loss used for both training and validation
    pub loss: Loss,
}

impl TrainingOptions {
    pub fn new(epochs: usize) -> Self {
        Self {
            epochs,
            batch_size: None,
            loss: Loss::default(),
        }
    }

    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = Some(batch_size);
        self
    }

    pub fn loss(mut self, loss: Loss) -> Self {
        self.loss = loss;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.epochs == 0 {
            return Err(NetworkError::InvalidConfig(
                "epochs must be at least 1".to_string(),
            ));
        }
        if self.batch_size == Some(0) {
            return Err(NetworkError::InvalidConfig(
                "batch size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Observer notified at the end of every epoch.
pub trait EpochCallback {
    /// Called once per epoch; `finished` is set on the last call.
    fn on_epoch(&mut self, epoch: usize, training_loss: f64, validation_loss: f64, finished: bool);

    /// Whether training should stop after the current epoch.
    fn should_end_training(&self, _training_loss: f64, _validation_loss: f64) -> bool {
        false
    }
}

/// Logs every epoch's losses through `tracing`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LogEpochCallback {
    /// Stop once the validation loss falls below this value
    pub loss_threshold: Option<f64>,
}

impl LogEpochCallback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_threshold(loss_threshold: f64) -> Self {
        Self {
            loss_threshold: Some(loss_threshold),
        }
    }
}

impl EpochCallback for LogEpochCallback {
    fn on_epoch(&mut self, epoch: usize, training_loss: f64, validation_loss: f64, finished: bool) {
        info!(epoch, training_loss, validation_loss, finished, "epoch complete");
    }

    fn should_end_training(&self, _training_loss: f64, validation_loss: f64) -> bool {
        below_threshold(self.loss_threshold, validation_loss)
    }
}

/// Records the loss of every epoch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LossHistory {
    pub training: Vec<f64>,
    pub validation: Vec<f64>,
    /// Stop once the validation loss falls below this value
    pub threshold: Option<f64>,
}

impl LossHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold: Some(threshold),
            ..Self::default()
        }
    }

    /// Number of epochs recorded.
    pub fn len(&self) -> usize {
        self.training.len()
    }

    pub fn is_empty(&self) -> bool {
        self.training.is_empty()
    }
}

impl EpochCallback for LossHistory {
    fn on_epoch(
        &mut self,
        _epoch: usize,
        training_loss: f64,
        validation_loss: f64,
        _finished: bool,
    ) {
        self.training.push(training_loss);
        self.validation.push(validation_loss);
    }

    fn should_end_training(&self, _training_loss: f64, validation_loss: f64) -> bool {
        below_threshold(self.threshold, validation_loss)
    }
}

fn below_threshold(threshold: Option<f64>, loss: f64) -> bool {
    threshold.map_or(false, |t| loss < t)
}

/// Outcome of [`Training::perform`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingReport {
    pub epochs_completed: usize,
    /// Training loss of the last epoch
    pub training_loss: f64,
    /// Validation loss after the last epoch
    pub validation_loss: f64,
    /// Whether the callback ended training before the last epoch
    pub stopped_early: bool,
}

/// A configured training run.
///
/// # Example
///
/// ```
/// use feedforward_nn::architecture::{LayerConfig, NetworkConfig};
/// use feedforward_nn::optimizers::Sgd;
/// use feedforward_nn::training::{LossHistory, Training, TrainingOptions};
/// use feedforward_nn::utils::SimpleRng;
/// use feedforward_nn::{DataSet, Network};
///
/// let mut rng = SimpleRng::new(42);
/// let config = NetworkConfig::new(1).layer(LayerConfig::new(1));
/// let mut network = Network::new(&config, &mut rng).unwrap();
/// let mut training_set =
///     DataSet::new(vec![vec![0.0], vec![1.0]], vec![vec![1.0], vec![0.0]]).unwrap();
/// let validation_set = training_set.clone();
/// let mut optimizer = Sgd::new(0.1);
///
/// let mut training = Training::new(
///     &mut network,
///     &mut training_set,
///     &validation_set,
///     &mut optimizer,
///     TrainingOptions::new(5).batch_size(1),
/// )
/// .unwrap();
///
/// let mut history = LossHistory::new();
/// let report = training.perform(&mut history, &mut rng).unwrap();
/// assert_eq!(report.epochs_completed, 5);
/// assert_eq!(history.len(), 5);
/// ```
pub struct Training<'a> {
    network: &'a mut Network,
    training_set: &'a mut DataSet,
    validation_set: &'a DataSet,
    optimizer: &'a mut dyn Optimizer,
    loss: Box<dyn LossFunction>,
    validation_loss: Box<dyn LossFunction>,
    epochs: usize,
    batch_size: usize,
}

impl<'a> Training<'a> {
    /// Validate the data sets against each other and the network, then
    /// prepare the optimizer for `network`.
    pub fn new(
        network: &'a mut Network,
        training_set: &'a mut DataSet,
        validation_set: &'a DataSet,
        optimizer: &'a mut dyn Optimizer,
        options: TrainingOptions,
    ) -> Result<Self> {
        options.validate()?;

        if !training_set.same_dimensions_as(validation_set) {
            return Err(NetworkError::InvalidDataSet(format!(
                "training set dimensions ({} -> {}) differ from validation set dimensions ({} -> {})",
                training_set.input_dimension(),
                training_set.output_dimension(),
                validation_set.input_dimension(),
                validation_set.output_dimension()
            )));
        }
        if training_set.input_dimension() != network.input_size()
            || training_set.output_dimension() != network.output_size()
        {
            return Err(NetworkError::InvalidDataSet(format!(
                "data set dimensions ({} -> {}) do not match network ({} -> {})",
                training_set.input_dimension(),
                training_set.output_dimension(),
                network.input_size(),
                network.output_size()
            )));
        }

        optimizer.setup(network);
        let batch_size = options.batch_size.unwrap_or(training_set.len());

        Ok(Self {
            network,
            training_set,
            validation_set,
            optimizer,
            loss: options.loss.build(),
            validation_loss: options.loss.build(),
            epochs: options.epochs,
            batch_size,
        })
    }

    /// Run up to the configured number of epochs, shuffling the training set
    /// with `rng` before each one.
    pub fn perform<R: Rng + ?Sized>(
        &mut self,
        callback: &mut dyn EpochCallback,
        rng: &mut R,
    ) -> Result<TrainingReport> {
        info!(
            epochs = self.epochs,
            batch_size = self.batch_size,
            samples = self.training_set.len(),
            "starting training"
        );

        let mut report = TrainingReport {
            epochs_completed: 0,
            training_loss: f64::NAN,
            validation_loss: f64::NAN,
            stopped_early: false,
        };

        for epoch in 1..=self.epochs {
            let training_loss = self.train_epoch(rng)?;
            let validation_loss = self.validation_loss()?;
            debug!(epoch, training_loss, validation_loss, "epoch losses");

            let last = epoch == self.epochs;
            let end_requested = callback.should_end_training(training_loss, validation_loss);
            let finished = last || end_requested;
            callback.on_epoch(epoch, training_loss, validation_loss, finished);

            report = TrainingReport {
                epochs_completed: epoch,
                training_loss,
                validation_loss,
                stopped_early: end_requested && !last,
            };

            if finished {
                if report.stopped_early {
                    info!(epoch, validation_loss, "stopping early");
                }
                break;
            }
        }

        info!(
            epochs = report.epochs_completed,
            training_loss = report.training_loss,
            validation_loss = report.validation_loss,
            "training finished"
        );
        Ok(report)
    }

    /// Loss of the network on the validation set. Weights are not changed.
    pub fn validation_loss(&mut self) -> Result<f64> {
        self.network.set_training(false);
        self.validation_loss.compute(self.network, self.validation_set)
    }

    fn train_epoch<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<f64> {
        self.network.set_training(true);
        self.training_set.shuffle(rng);
        self.optimizer.on_start_epoch();
        self.loss.on_epoch_started(self.network.output_size(), self.training_set.len());

        let mut pending = 0;
        for (input, target) in self.training_set.iter() {
            let activation = self.network.forward_pass(input)?;
            let output_error = self.loss.on_epoch_sample(activation, target);
            self.optimizer.train_on_sample(&*self.network, output_error)?;

            pending += 1;
            if pending == self.batch_size {
                self.optimizer.update_weights(self.network)?;
                pending = 0;
            }
        }
        if pending > 0 {
            self.optimizer.update_weights(self.network)?;
        }

        self.network.set_training(false);
        Ok(self.loss.epoch_loss())
    }
}
