/// Machine learning module for waste prediction
///
/// This module provides the prediction-and-recommendation core:
/// - Feature extraction from inventory records
/// - Category label encoding, rebuilt on every training pass
/// - A standardized logistic-regression classifier predicting "will be wasted"
/// - A prediction service orchestrating training and batch prediction
/// - A rule-based recommendation engine over prediction results

pub mod classifier;
pub mod features;
pub mod models;
pub mod recommendations;
pub mod service;

pub use classifier::{StandardScaler, WasteClassifier};
pub use features::{CategoryEncoder, FeatureExtractor, DEFAULT_CATEGORY_CODE, N_FEATURES};
pub use models::{
    MlConfig, ModelMetadata, PredictionRecord, Priority, Recommendation, ServiceStats,
    TrainOutcome, TrainingDataset,
};
pub use recommendations::RecommendationEngine;
pub use service::PredictionService;
