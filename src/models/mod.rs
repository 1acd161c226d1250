pub mod inventory;

pub use inventory::{InventoryRecord, Item, NewInventoryRecord, WastePrediction};
