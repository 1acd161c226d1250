use crate::error::Result;
use crate::ml::classifier::WasteClassifier;
use crate::ml::models::{
    MlConfig, ModelMetadata, PredictionRecord, Recommendation, ServiceStats, TrainOutcome,
};
use crate::ml::recommendations::RecommendationEngine;
use crate::models::InventoryRecord;
use crate::state::InventoryStore;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Orchestrates training, per-item prediction and batch prediction
///
/// Owns the classifier state holder. A retrain swaps the fitted encoder,
/// scaler and model as one bundle under the write lock, and a prediction
/// batch holds the read lock for its full duration, so every batch observes
/// fully-old or fully-new classifier state, never a mix.
pub struct PredictionService {
    classifier: Arc<RwLock<WasteClassifier>>,
    store: Arc<dyn InventoryStore>,
}

impl PredictionService {
    pub fn new(config: MlConfig, store: Arc<dyn InventoryStore>) -> Self {
        Self {
            classifier: Arc::new(RwLock::new(WasteClassifier::new(config))),
            store,
        }
    }

    /// Train the classifier on the given snapshot of labeled records
    pub async fn train(&self, records: &[InventoryRecord]) -> Result<TrainOutcome> {
        let mut classifier = self.classifier.write().await;
        let outcome = classifier.train(records)?;

        match &outcome {
            TrainOutcome::Trained {
                n_samples,
                n_categories,
            } => {
                info!(n_samples, n_categories, "Classifier trained");
            }
            TrainOutcome::SkippedEmptyBatch => {
                warn!("Empty training batch, keeping prior classifier state");
            }
        }

        Ok(outcome)
    }

    /// Train on the full labeled snapshot from the store
    pub async fn train_from_store(&self) -> Result<TrainOutcome> {
        let records = self.store.labeled_records().await?;
        self.train(&records).await
    }

    /// Waste probability for a single record
    pub async fn predict(&self, record: &InventoryRecord) -> Result<f64> {
        self.classifier.read().await.predict(record)
    }

    /// Prediction results for a batch of records, in input order
    ///
    /// Does not mutate classifier state; deterministic for a fixed fit.
    pub async fn predict_batch(
        &self,
        records: &[InventoryRecord],
    ) -> Result<Vec<PredictionRecord>> {
        let classifier = self.classifier.read().await;

        records
            .iter()
            .map(|record| {
                let waste_probability = classifier.predict(record)?;
                debug!(
                    inventory_id = record.id,
                    waste_probability, "Prediction computed"
                );

                Ok(PredictionRecord {
                    inventory_id: record.id,
                    item_id: record.item.item_id,
                    store_id: record.store_id.clone(),
                    category: record.item.category.clone(),
                    waste_probability,
                    price: record.price,
                    quantity: record.quantity,
                })
            })
            .collect()
    }

    /// Predictions for every unsold record in the store
    pub async fn predict_current(&self) -> Result<Vec<PredictionRecord>> {
        let records = self.store.unsold_records().await?;
        self.predict_batch(&records).await
    }

    /// Recommendations for every unsold record in the store
    pub async fn recommend_current(&self) -> Result<Vec<Recommendation>> {
        let predictions = self.predict_current().await?;
        Ok(RecommendationEngine::generate(&predictions))
    }

    pub async fn is_trained(&self) -> bool {
        self.classifier.read().await.is_trained()
    }

    /// Metadata for the current fit, if any
    pub async fn metadata(&self) -> Option<ModelMetadata> {
        self.classifier.read().await.metadata()
    }

    /// Service statistics
    pub async fn stats(&self) -> ServiceStats {
        let classifier = self.classifier.read().await;

        match classifier.metadata() {
            Some(metadata) => ServiceStats {
                is_trained: true,
                n_features: metadata.n_features,
                n_categories: metadata.n_categories,
                n_training_samples: metadata.n_training_samples,
                trained_at: Some(metadata.trained_at),
            },
            None => ServiceStats {
                is_trained: false,
                n_features: 0,
                n_categories: 0,
                n_training_samples: 0,
                trained_at: None,
            },
        }
    }
}
