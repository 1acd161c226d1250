use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A product line in the catalog
///
/// Identity is the (item_id, timestamp) pair: the same item re-catalogued at
/// a different time is a distinct logical item, which doubles as a versioning
/// mechanism.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Numeric item identifier
    pub item_id: i64,

    /// Category label
    pub category: String,

    /// Catalog timestamp
    pub timestamp: DateTime<Utc>,
}

impl Item {
    pub fn new(item_id: i64, category: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            item_id,
            category: category.into(),
            timestamp,
        }
    }
}

/// One physical batch of an item at a store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRecord {
    /// Store-assigned identifier
    pub id: i64,

    /// The catalogued item this batch belongs to
    pub item: Item,

    /// Store identifier
    pub store_id: String,

    /// Recording timestamp
    pub timestamp: DateTime<Utc>,

    /// Units on hand
    pub quantity: f64,

    /// Total shelf life in days
    pub shelf_life_days: u32,

    /// Days already spent on the shelf
    pub days_on_shelf: u32,

    /// Ground truth, only meaningfully known in retrospect
    pub wasted: bool,

    /// Unit price
    pub price: f64,
}

impl InventoryRecord {
    /// Days of shelf life not yet elapsed
    pub fn remaining_life_days(&self) -> u32 {
        self.shelf_life_days.saturating_sub(self.days_on_shelf)
    }

    /// Still on the shelf awaiting sale
    pub fn is_unsold(&self) -> bool {
        !self.wasted
    }
}

/// Draft inventory record as submitted by the caller, before the store has
/// assigned an identifier
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewInventoryRecord {
    pub item_id: i64,

    #[validate(length(min = 1, message = "category must not be empty"))]
    pub category: String,

    #[validate(length(min = 1, message = "store_id must not be empty"))]
    pub store_id: String,

    pub quantity: f64,

    #[validate(range(min = 1, message = "shelf_life_days must be > 0"))]
    pub shelf_life_days: u32,

    pub days_on_shelf: u32,

    pub price: f64,

    /// Defaults to the insertion time when absent
    pub timestamp: Option<DateTime<Utc>>,

    #[serde(default)]
    pub wasted: bool,
}

impl NewInventoryRecord {
    pub fn new(
        item_id: i64,
        category: impl Into<String>,
        store_id: impl Into<String>,
        quantity: f64,
        shelf_life_days: u32,
        days_on_shelf: u32,
        price: f64,
    ) -> Self {
        Self {
            item_id,
            category: category.into(),
            store_id: store_id.into(),
            quantity,
            shelf_life_days,
            days_on_shelf,
            price,
            timestamp: None,
            wasted: false,
        }
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn with_wasted(mut self, wasted: bool) -> Self {
        self.wasted = wasted;
        self
    }
}

/// Model-estimated likelihood that an inventory unit is discarded before sale
///
/// One-to-one with an [`InventoryRecord`]. Written with a placeholder when
/// inventory is recorded and overwritten whenever predictions are recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WastePrediction {
    pub inventory_id: i64,

    /// Probability in [0, 1]
    pub waste_probability: f64,
}

impl WastePrediction {
    pub fn new(inventory_id: i64, waste_probability: f64) -> Self {
        Self {
            inventory_id,
            waste_probability,
        }
    }

    /// Initial value before any prediction has run
    pub fn placeholder(inventory_id: i64) -> Self {
        Self::new(inventory_id, 0.0)
    }
}
