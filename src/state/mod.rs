pub mod store;

pub use store::InMemoryStore;

use crate::error::Result;
use crate::models::{InventoryRecord, NewInventoryRecord, WastePrediction};
use async_trait::async_trait;

/// Trait for inventory storage operations
///
/// The storage layer owns persistence; the prediction core only consumes the
/// two snapshot reads. Identifier assignment is synchronous: insert returns
/// the stored record with its id already set.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// Insert a new inventory record, assigning its identifier and seeding
    /// the placeholder waste prediction
    async fn insert_record(&self, record: NewInventoryRecord) -> Result<InventoryRecord>;

    /// Get a record by id
    async fn get_record(&self, id: i64) -> Result<Option<InventoryRecord>>;

    /// All records with known wasted status (training snapshot)
    async fn labeled_records(&self) -> Result<Vec<InventoryRecord>>;

    /// All records still awaiting sale (prediction snapshot)
    async fn unsold_records(&self) -> Result<Vec<InventoryRecord>>;

    /// Record the retrospective ground truth for a batch
    async fn mark_wasted(&self, id: i64) -> Result<()>;

    /// Write a prediction, overwriting any prior value for the same record
    async fn upsert_prediction(&self, prediction: &WastePrediction) -> Result<()>;

    /// Read the prediction for a record
    async fn get_prediction(&self, inventory_id: i64) -> Result<Option<WastePrediction>>;
}
