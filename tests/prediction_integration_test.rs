/// Integration tests for the waste prediction pipeline
///
/// These tests verify the complete flow:
/// - Feature extraction from inventory records
/// - Classifier training and retraining
/// - Batch prediction through the service
/// - Recommendation generation
/// - The storage contract (ids, placeholder predictions, upserts)

use chrono::Utc;
use shelfwatch::{
    ml::{MlConfig, PredictionService, RecommendationEngine, TrainOutcome},
    models::{InventoryRecord, Item, NewInventoryRecord, WastePrediction},
    state::{InMemoryStore, InventoryStore},
};
use std::sync::Arc;

fn labeled_record(
    id: i64,
    category: &str,
    shelf_life_days: u32,
    days_on_shelf: u32,
    quantity: f64,
    price: f64,
    wasted: bool,
) -> InventoryRecord {
    InventoryRecord {
        id,
        item: Item::new(id, category, Utc::now()),
        store_id: "store-1".to_string(),
        timestamp: Utc::now(),
        quantity,
        shelf_life_days,
        days_on_shelf,
        wasted,
        price,
    }
}

fn training_batch() -> Vec<InventoryRecord> {
    vec![
        labeled_record(1, "dairy", 10, 9, 40.0, 1.0, true),
        labeled_record(2, "dairy", 10, 8, 35.0, 1.2, true),
        labeled_record(3, "produce", 10, 1, 5.0, 3.0, false),
        labeled_record(4, "produce", 10, 2, 8.0, 2.8, false),
        labeled_record(5, "bakery", 7, 1, 4.0, 4.0, false),
        labeled_record(6, "bakery", 7, 6, 30.0, 1.5, true),
    ]
}

fn setup_service() -> (PredictionService, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::new());
    let service = PredictionService::new(MlConfig::default(), store.clone());
    (service, store)
}

#[tokio::test]
async fn test_round_trip_train_then_predict() {
    let (service, _) = setup_service();
    let batch = training_batch();

    let outcome = service.train(&batch).await.unwrap();
    assert!(matches!(outcome, TrainOutcome::Trained { n_samples: 6, .. }));

    // predicting on the training batch must not raise and must stay in range
    let predictions = service.predict_batch(&batch).await.unwrap();

    assert_eq!(predictions.len(), batch.len());
    for prediction in &predictions {
        assert!(prediction.waste_probability.is_finite());
        assert!((0.0..=1.0).contains(&prediction.waste_probability));
    }
}

#[tokio::test]
async fn test_untrained_service_returns_default_probability() {
    let (service, _) = setup_service();

    let predictions = service.predict_batch(&training_batch()).await.unwrap();

    for prediction in predictions {
        assert_eq!(prediction.waste_probability, 0.5);
    }
}

#[tokio::test]
async fn test_empty_batch_preserves_trained_state() {
    let (service, _) = setup_service();

    service.train(&training_batch()).await.unwrap();
    let metadata_before = service.metadata().await.unwrap();

    let outcome = service.train(&[]).await.unwrap();

    assert_eq!(outcome, TrainOutcome::SkippedEmptyBatch);
    assert!(service.is_trained().await);
    assert_eq!(service.metadata().await.unwrap(), metadata_before);
}

#[tokio::test]
async fn test_end_to_end_waste_scenario() {
    let (service, _) = setup_service();

    // one clearly wasted record, two clearly fresh ones
    let batch = vec![
        labeled_record(1, "dairy", 10, 9, 50.0, 1.0, true),
        labeled_record(2, "dairy", 10, 1, 5.0, 1.0, false),
        labeled_record(3, "dairy", 10, 2, 4.0, 1.2, false),
    ];
    service.train(&batch).await.unwrap();

    // a fourth record closely matching the wasted one
    let at_risk = labeled_record(4, "dairy", 10, 9, 48.0, 1.0, false);
    let predictions = service.predict_batch(&[at_risk]).await.unwrap();

    assert!(predictions[0].waste_probability > 0.5);
}

#[tokio::test]
async fn test_unseen_categories_share_default_code() {
    let (service, _) = setup_service();
    service.train(&training_batch()).await.unwrap();

    // neither category was in the training batch; both encode to the default
    // code, so the records differ in no feature at all
    let a = labeled_record(10, "seafood", 10, 5, 12.0, 2.0, false);
    let mut b = a.clone();
    b.item.category = "frozen".to_string();

    let predictions = service.predict_batch(&[a, b]).await.unwrap();

    assert_eq!(
        predictions[0].waste_probability,
        predictions[1].waste_probability
    );
}

#[tokio::test]
async fn test_retrain_replaces_whole_fit() {
    let (service, _) = setup_service();

    service.train(&training_batch()).await.unwrap();
    let first = service.stats().await;

    let mut second_batch = training_batch();
    second_batch.push(labeled_record(7, "seafood", 4, 3, 20.0, 6.0, true));
    service.train(&second_batch).await.unwrap();
    let second = service.stats().await;

    assert_eq!(first.n_training_samples, 6);
    assert_eq!(first.n_categories, 3);
    assert_eq!(second.n_training_samples, 7);
    assert_eq!(second.n_categories, 4);
}

#[tokio::test]
async fn test_concurrent_predict_and_retrain() {
    let (service, _) = setup_service();
    let service = Arc::new(service);
    service.train(&training_batch()).await.unwrap();

    let predictor = {
        let service = service.clone();
        tokio::spawn(async move {
            for _ in 0..20 {
                let predictions = service.predict_batch(&training_batch()).await.unwrap();
                for prediction in predictions {
                    assert!((0.0..=1.0).contains(&prediction.waste_probability));
                }
            }
        })
    };

    let trainer = {
        let service = service.clone();
        tokio::spawn(async move {
            for _ in 0..10 {
                service.train(&training_batch()).await.unwrap();
            }
        })
    };

    predictor.await.unwrap();
    trainer.await.unwrap();
}

#[tokio::test]
async fn test_prediction_lifecycle_through_store() {
    let (service, store) = setup_service();

    let mut stored_ids = Vec::new();
    for (item_id, category, shelf, days, qty, price, wasted) in [
        (1, "dairy", 10, 9, 40.0, 1.0, true),
        (2, "dairy", 10, 8, 35.0, 1.2, true),
        (3, "produce", 10, 1, 5.0, 3.0, false),
        (4, "produce", 10, 2, 8.0, 2.8, false),
    ] {
        let stored = store
            .insert_record(
                NewInventoryRecord::new(item_id, category, "store-1", qty, shelf, days, price)
                    .with_wasted(wasted),
            )
            .await
            .unwrap();
        stored_ids.push(stored.id);
    }

    // every record starts with the placeholder prediction
    for id in &stored_ids {
        let prediction = store.get_prediction(*id).await.unwrap().unwrap();
        assert_eq!(prediction.waste_probability, 0.0);
    }

    service.train_from_store().await.unwrap();
    let predictions = service.predict_current().await.unwrap();
    assert_eq!(predictions.len(), 2); // unsold records only

    // the caller persists results by upserting on the inventory reference
    for prediction in &predictions {
        store
            .upsert_prediction(&WastePrediction::new(
                prediction.inventory_id,
                prediction.waste_probability,
            ))
            .await
            .unwrap();
    }

    for prediction in &predictions {
        let persisted = store
            .get_prediction(prediction.inventory_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(persisted.waste_probability, prediction.waste_probability);
    }
}

#[tokio::test]
async fn test_recommendations_from_predictions() {
    let (service, _) = setup_service();
    service.train(&training_batch()).await.unwrap();

    let predictions = service.predict_batch(&training_batch()).await.unwrap();
    let recommendations = RecommendationEngine::generate(&predictions);

    // only at-risk items are emitted, in input order
    assert!(recommendations.len() <= predictions.len());
    for recommendation in &recommendations {
        assert!(!recommendation.recommendation.is_empty());
        let source = predictions
            .iter()
            .find(|p| p.item_id == recommendation.item_id)
            .unwrap();
        assert!(source.waste_probability > 0.4);
    }
}

#[tokio::test]
async fn test_recommendation_serialization_contract() {
    let (service, _) = setup_service();
    service.train(&training_batch()).await.unwrap();

    let predictions = service.predict_batch(&training_batch()).await.unwrap();
    let json = serde_json::to_value(&predictions).unwrap();

    for entry in json.as_array().unwrap() {
        for field in [
            "inventory_id",
            "item_id",
            "store_id",
            "category",
            "waste_probability",
            "price",
            "quantity",
        ] {
            assert!(entry.get(field).is_some(), "missing field {}", field);
        }
    }

    let recommendations = RecommendationEngine::generate(&predictions);
    let json = serde_json::to_value(&recommendations).unwrap();

    for entry in json.as_array().unwrap() {
        for field in ["item_id", "store_id", "category", "recommendation", "priority"] {
            assert!(entry.get(field).is_some(), "missing field {}", field);
        }
        let priority = entry.get("priority").unwrap().as_str().unwrap();
        assert!(priority == "high" || priority == "medium");
    }
}

#[tokio::test]
async fn test_probability_bounds_on_extreme_records() {
    let (service, _) = setup_service();
    service.train(&training_batch()).await.unwrap();

    let extremes = vec![
        labeled_record(20, "dairy", 1, 0, 10000.0, 0.01, false),
        labeled_record(21, "dairy", 365, 364, 0.0, 999.0, false),
        labeled_record(22, "produce", 100, 0, 1.0, 0.0, false),
    ];

    let predictions = service.predict_batch(&extremes).await.unwrap();

    for prediction in predictions {
        assert!(prediction.waste_probability.is_finite());
        assert!((0.0..=1.0).contains(&prediction.waste_probability));
    }
}
