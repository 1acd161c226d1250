//! Waste prediction core for perishable inventory
//!
//! Estimates, for each unit of perishable inventory, the probability it will
//! be wasted before sale, and turns that estimate into an actionable
//! recommendation (discount, donate, or monitor). The crate contains the
//! prediction-and-recommendation engine only: feature extraction, a
//! retrainable logistic-regression classifier, a prediction service and a
//! rule-based recommendation engine. The web API, relational storage and
//! dashboard that consume it live elsewhere; their contract with this core
//! is the [`state::InventoryStore`] trait plus the serialized
//! [`ml::PredictionRecord`] and [`ml::Recommendation`] shapes.

pub mod error;
pub mod ml;
pub mod models;
pub mod state;

pub use error::{AppError, Result};
