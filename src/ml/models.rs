use crate::error::Result;
use crate::ml::features::{FeatureExtractor, N_FEATURES};
use crate::models::InventoryRecord;
use chrono::{DateTime, Utc};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Classifier configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MlConfig {
    /// Solver iteration cap for the logistic regression fit
    pub max_iterations: u64,

    /// Probability reported while the classifier is untrained
    pub default_probability: f64,
}

impl Default for MlConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            default_probability: 0.5,
        }
    }
}

/// Outcome of a training pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainOutcome {
    /// A new model was fitted and swapped in
    Trained {
        n_samples: usize,
        n_categories: usize,
    },

    /// The batch was empty; prior state is untouched
    SkippedEmptyBatch,
}

/// Feature matrix and labels assembled from a batch of labeled records
#[derive(Debug, Clone)]
pub struct TrainingDataset {
    /// Feature matrix (n_samples × n_features)
    pub features: Array2<f64>,

    /// Wasted labels (1 = wasted)
    pub labels: Array1<usize>,

    pub n_samples: usize,

    pub n_features: usize,
}

impl TrainingDataset {
    /// Extract features and labels for every record in the batch
    pub fn from_records(
        records: &[InventoryRecord],
        extractor: &FeatureExtractor,
    ) -> Result<Self> {
        let n_samples = records.len();
        let mut features = Array2::zeros((n_samples, N_FEATURES));
        let mut labels = Array1::zeros(n_samples);

        for (i, record) in records.iter().enumerate() {
            let row = extractor.transform(record)?;
            for (j, &value) in row.iter().enumerate() {
                features[[i, j]] = value;
            }
            labels[i] = usize::from(record.wasted);
        }

        Ok(Self {
            features,
            labels,
            n_samples,
            n_features: N_FEATURES,
        })
    }
}

/// Metadata for the currently fitted model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Fit timestamp
    pub trained_at: DateTime<Utc>,

    /// Number of training samples
    pub n_training_samples: usize,

    /// Number of features
    pub n_features: usize,

    /// Number of encoded categories
    pub n_categories: usize,
}

/// Prediction result for one inventory record
///
/// Field names and types are the serialization contract consumed by the API
/// layer; `waste_probability` is always in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub inventory_id: i64,
    pub item_id: i64,
    pub store_id: String,
    pub category: String,
    pub waste_probability: f64,
    pub price: f64,
    pub quantity: f64,
}

/// Urgency of a recommended action
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
}

/// A suggested action for an at-risk inventory record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub item_id: i64,
    pub store_id: String,
    pub category: String,
    pub recommendation: String,
    pub priority: Priority,
}

/// Prediction service statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceStats {
    pub is_trained: bool,
    pub n_features: usize,
    pub n_categories: usize,
    pub n_training_samples: usize,
    pub trained_at: Option<DateTime<Utc>>,
}
