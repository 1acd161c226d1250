use crate::error::{AppError, Result};
use crate::models::{InventoryRecord, Item, NewInventoryRecord, WastePrediction};
use crate::state::InventoryStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use validator::Validate;

/// In-memory inventory store (for MVP and testing)
#[derive(Clone)]
pub struct InMemoryStore {
    records: Arc<DashMap<i64, InventoryRecord>>,
    predictions: Arc<DashMap<i64, WastePrediction>>,
    // (item_id, timestamp) is the logical item identity
    items: Arc<DashMap<(i64, DateTime<Utc>), Item>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            records: Arc::new(DashMap::new()),
            predictions: Arc::new(DashMap::new()),
            items: Arc::new(DashMap::new()),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InventoryStore for InMemoryStore {
    async fn insert_record(&self, record: NewInventoryRecord) -> Result<InventoryRecord> {
        record.validate()?;

        let timestamp = record.timestamp.unwrap_or_else(Utc::now);

        // reuse the catalogued item when (item_id, timestamp) already exists
        let item = self
            .items
            .entry((record.item_id, timestamp))
            .or_insert_with(|| Item::new(record.item_id, record.category.clone(), timestamp))
            .clone();

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let stored = InventoryRecord {
            id,
            item,
            store_id: record.store_id,
            timestamp,
            quantity: record.quantity,
            shelf_life_days: record.shelf_life_days,
            days_on_shelf: record.days_on_shelf,
            wasted: record.wasted,
            price: record.price,
        };

        self.records.insert(id, stored.clone());
        self.predictions
            .insert(id, WastePrediction::placeholder(id));

        tracing::debug!(inventory_id = id, "Inventory record inserted");
        Ok(stored)
    }

    async fn get_record(&self, id: i64) -> Result<Option<InventoryRecord>> {
        Ok(self.records.get(&id).map(|entry| entry.clone()))
    }

    async fn labeled_records(&self) -> Result<Vec<InventoryRecord>> {
        let mut records: Vec<InventoryRecord> = self
            .records
            .iter()
            .map(|entry| entry.value().clone())
            .collect();

        records.sort_by_key(|record| record.id);
        Ok(records)
    }

    async fn unsold_records(&self) -> Result<Vec<InventoryRecord>> {
        let mut records: Vec<InventoryRecord> = self
            .records
            .iter()
            .filter(|entry| entry.value().is_unsold())
            .map(|entry| entry.value().clone())
            .collect();

        records.sort_by_key(|record| record.id);
        Ok(records)
    }

    async fn mark_wasted(&self, id: i64) -> Result<()> {
        match self.records.get_mut(&id) {
            Some(mut entry) => {
                entry.wasted = true;
                tracing::debug!(inventory_id = id, "Inventory record marked wasted");
                Ok(())
            }
            None => Err(AppError::NotFound(format!(
                "Inventory record {} not found",
                id
            ))),
        }
    }

    async fn upsert_prediction(&self, prediction: &WastePrediction) -> Result<()> {
        if !self.records.contains_key(&prediction.inventory_id) {
            return Err(AppError::NotFound(format!(
                "Inventory record {} not found",
                prediction.inventory_id
            )));
        }

        self.predictions
            .insert(prediction.inventory_id, prediction.clone());
        Ok(())
    }

    async fn get_prediction(&self, inventory_id: i64) -> Result<Option<WastePrediction>> {
        Ok(self
            .predictions
            .get(&inventory_id)
            .map(|entry| entry.clone()))
    }
}
