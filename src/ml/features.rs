use crate::error::{AppError, Result};
use crate::models::InventoryRecord;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Number of features in an extracted vector
pub const N_FEATURES: usize = 5;

/// Code assigned to categories the encoder has not seen
pub const DEFAULT_CATEGORY_CODE: usize = 0;

/// Integer surrogate codes for category labels
///
/// Rebuilt in full on every training pass from the distinct categories in the
/// batch. Codes are assigned in lexicographic order, so a given category set
/// always produces the same mapping. A mapping is only valid for the
/// classifier state fitted alongside it: categories absent from a later
/// training batch lose their code and fall back to the default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryEncoder {
    codes: HashMap<String, usize>,
}

impl CategoryEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the mapping from the distinct categories in a training batch
    pub fn fit(records: &[InventoryRecord]) -> Self {
        let categories: BTreeSet<&str> = records
            .iter()
            .map(|record| record.item.category.as_str())
            .collect();

        let codes = categories
            .into_iter()
            .enumerate()
            .map(|(code, category)| (category.to_string(), code))
            .collect();

        Self { codes }
    }

    /// Encode a category label; unseen labels fall back to the default code
    pub fn encode(&self, category: &str) -> usize {
        self.codes
            .get(category)
            .copied()
            .unwrap_or(DEFAULT_CATEGORY_CODE)
    }

    pub fn contains(&self, category: &str) -> bool {
        self.codes.contains_key(category)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

/// Derives the fixed-order numeric feature vector from one inventory record
///
/// Feature order: remaining-life ratio, quantity, price, days on shelf,
/// category code. Pure function of the record plus current encoder state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeatureExtractor {
    encoder: CategoryEncoder,
}

impl FeatureExtractor {
    /// Extractor with an unfitted encoder; every category encodes to the
    /// default code
    pub fn new() -> Self {
        Self::default()
    }

    /// Fit the category encoder on a training batch
    ///
    /// Every record is validated up front; a malformed record fails the whole
    /// fit before any state is produced.
    pub fn fit(records: &[InventoryRecord]) -> Result<Self> {
        for record in records {
            validate_record(record)?;
        }

        Ok(Self {
            encoder: CategoryEncoder::fit(records),
        })
    }

    /// Transform one record into its feature vector
    pub fn transform(&self, record: &InventoryRecord) -> Result<Vec<f64>> {
        validate_record(record)?;

        let remaining_ratio =
            f64::from(record.remaining_life_days()) / f64::from(record.shelf_life_days);

        Ok(vec![
            remaining_ratio,
            record.quantity,
            record.price,
            f64::from(record.days_on_shelf),
            self.encoder.encode(&record.item.category) as f64,
        ])
    }

    pub fn encoder(&self) -> &CategoryEncoder {
        &self.encoder
    }

    pub fn n_features(&self) -> usize {
        N_FEATURES
    }

    pub fn n_categories(&self) -> usize {
        self.encoder.len()
    }
}

/// Caller contract checks; division by shelf life must stay finite
fn validate_record(record: &InventoryRecord) -> Result<()> {
    if record.shelf_life_days == 0 {
        return Err(AppError::InvalidRecord(format!(
            "inventory {}: shelf_life_days must be > 0",
            record.id
        )));
    }

    if record.item.category.is_empty() {
        return Err(AppError::InvalidRecord(format!(
            "inventory {}: category must not be empty",
            record.id
        )));
    }

    Ok(())
}
