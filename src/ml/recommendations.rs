use crate::ml::models::{PredictionRecord, Priority, Recommendation};

/// Waste probability above which an item is high risk (strict greater-than)
pub const HIGH_RISK_THRESHOLD: f64 = 0.7;

/// Waste probability above which an item is worth watching (strict greater-than)
pub const MEDIUM_RISK_THRESHOLD: f64 = 0.4;

/// Cap on the suggested discount, in currency units
pub const MAX_DISCOUNT: f64 = 0.5;

/// Maps waste probabilities to recommended actions
pub struct RecommendationEngine;

impl RecommendationEngine {
    /// Recommendations for a batch of predictions, in input order
    ///
    /// Items at or below the medium-risk threshold are simply absent from the
    /// output, not emitted as "no action".
    pub fn generate(predictions: &[PredictionRecord]) -> Vec<Recommendation> {
        predictions.iter().filter_map(Self::for_prediction).collect()
    }

    /// Recommendation for a single prediction, if it crosses a threshold
    pub fn for_prediction(prediction: &PredictionRecord) -> Option<Recommendation> {
        let probability = prediction.waste_probability;

        let (recommendation, priority) = if probability > HIGH_RISK_THRESHOLD {
            let discount = (prediction.price * (probability - 0.5).max(0.1)).min(MAX_DISCOUNT);
            (
                format!("Apply ${:.2} discount or donate", discount),
                Priority::High,
            )
        } else if probability > MEDIUM_RISK_THRESHOLD {
            (
                "Monitor closely and consider promotion".to_string(),
                Priority::Medium,
            )
        } else {
            return None;
        };

        Some(Recommendation {
            item_id: prediction.item_id,
            store_id: prediction.store_id.clone(),
            category: prediction.category.clone(),
            recommendation,
            priority,
        })
    }
}
