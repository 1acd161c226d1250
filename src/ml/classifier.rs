use crate::error::{AppError, Result};
use crate::ml::features::FeatureExtractor;
use crate::ml::models::{MlConfig, ModelMetadata, TrainOutcome, TrainingDataset};
use crate::models::InventoryRecord;
use chrono::{DateTime, Utc};
use linfa::traits::Fit;
use linfa::Dataset;
use linfa_logistic::{FittedLogisticRegression, LogisticRegression};
use ndarray::{Array1, Array2, Axis};

/// Per-feature standardization transform (zero mean, unit variance)
#[derive(Debug, Clone)]
pub struct StandardScaler {
    mean: Array1<f64>,
    std: Array1<f64>,
}

impl StandardScaler {
    /// Fit on a feature matrix with at least one row
    pub fn fit(features: &Array2<f64>) -> Self {
        let n = features.nrows() as f64;
        let mean = features.sum_axis(Axis(0)) / n;

        let mut variance = Array1::<f64>::zeros(features.ncols());
        for row in features.rows() {
            let centered = &row.to_owned() - &mean;
            variance += &centered.mapv(|d| d * d);
        }

        // constant columns scale by 1.0 so the transform stays finite
        let std = (variance / n)
            .mapv(f64::sqrt)
            .mapv(|s| if s > 0.0 { s } else { 1.0 });

        Self { mean, std }
    }

    pub fn transform(&self, features: &Array2<f64>) -> Array2<f64> {
        (features - &self.mean) / &self.std
    }

    pub fn mean(&self) -> &Array1<f64> {
        &self.mean
    }

    pub fn std(&self) -> &Array1<f64> {
        &self.std
    }
}

/// Encoder, scaler and model fitted on the same batch
///
/// Replaced as one unit on every retrain; a scaler from one fit can never be
/// paired with a model from another.
struct FittedState {
    extractor: FeatureExtractor,
    scaler: StandardScaler,
    model: FittedLogisticRegression<f64, usize>,
    trained_at: DateTime<Utc>,
    n_samples: usize,
}

/// Standardized logistic-regression binary classifier predicting whether an
/// inventory record will be wasted before sale
pub struct WasteClassifier {
    config: MlConfig,
    state: Option<FittedState>,
}

impl WasteClassifier {
    pub fn new(config: MlConfig) -> Self {
        Self {
            config,
            state: None,
        }
    }

    pub fn is_trained(&self) -> bool {
        self.state.is_some()
    }

    /// Train on a batch of labeled records, replacing any prior fit
    ///
    /// An empty batch is a no-op that preserves the prior trained state. A
    /// malformed record or a failed fit also leaves prior state untouched:
    /// the new state bundle is only assigned after every step has succeeded.
    pub fn train(&mut self, records: &[InventoryRecord]) -> Result<TrainOutcome> {
        if records.is_empty() {
            return Ok(TrainOutcome::SkippedEmptyBatch);
        }

        let extractor = FeatureExtractor::fit(records)?;
        let dataset = TrainingDataset::from_records(records, &extractor)?;
        let scaler = StandardScaler::fit(&dataset.features);
        let standardized = scaler.transform(&dataset.features);

        let model = LogisticRegression::default()
            .max_iterations(self.config.max_iterations)
            .fit(&Dataset::new(standardized, dataset.labels.clone()))
            .map_err(|e| {
                AppError::Training(format!("Failed to fit logistic regression: {}", e))
            })?;

        let n_samples = dataset.n_samples;
        let n_categories = extractor.n_categories();

        self.state = Some(FittedState {
            extractor,
            scaler,
            model,
            trained_at: Utc::now(),
            n_samples,
        });

        Ok(TrainOutcome::Trained {
            n_samples,
            n_categories,
        })
    }

    /// Estimated probability of the "wasted" class for one record
    ///
    /// An untrained classifier reports the configured default probability for
    /// any input; it signals "no information", not a model output.
    pub fn predict(&self, record: &InventoryRecord) -> Result<f64> {
        let state = match &self.state {
            Some(state) => state,
            None => return Ok(self.config.default_probability),
        };

        let features = state.extractor.transform(record)?;
        let x = Array1::from_vec(features).insert_axis(Axis(0));
        let standardized = state.scaler.transform(&x);
        let probabilities = state.model.predict_probabilities(&standardized);

        Ok(probabilities[0].clamp(0.0, 1.0))
    }

    /// Metadata for the current fit, if any
    pub fn metadata(&self) -> Option<ModelMetadata> {
        self.state.as_ref().map(|state| ModelMetadata {
            trained_at: state.trained_at,
            n_training_samples: state.n_samples,
            n_features: state.extractor.n_features(),
            n_categories: state.extractor.n_categories(),
        })
    }

    pub fn config(&self) -> &MlConfig {
        &self.config
    }
}
