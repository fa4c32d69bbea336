//! Inventory models (Dental Metrix only).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A consumable tracked by the stock page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StockItem {
    pub id: String,
    pub name: String,
    /// Shade, size or variant
    pub description: String,
    /// Counting unit ("syringe", "pack", ...)
    pub unit: String,
    pub current_quantity: u32,
    /// Reorder point
    pub minimum_threshold: u32,
    pub nearest_expiry_date: Option<NaiveDate>,
}

impl StockItem {
    /// At or below the reorder point.
    pub fn is_low_stock(&self) -> bool {
        self.current_quantity <= self.minimum_threshold
    }

    /// Nearest expiry falls before `cutoff`.
    pub fn is_expiring_before(&self, cutoff: NaiveDate) -> bool {
        self.nearest_expiry_date.is_some_and(|expiry| expiry < cutoff)
    }
}

/// Input of the "Add Stock Item" dialog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewStockItem {
    pub name: String,
    pub description: String,
    pub unit: String,
    pub current_quantity: u32,
    pub minimum_threshold: u32,
    pub nearest_expiry_date: Option<NaiveDate>,
}

impl NewStockItem {
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.unit.trim().is_empty() {
            missing.push("unit");
        }
        missing
    }

    pub fn into_item(self, id: String) -> StockItem {
        StockItem {
            id,
            name: self.name.trim().to_string(),
            description: self.description,
            unit: self.unit.trim().to_string(),
            current_quantity: self.current_quantity,
            minimum_threshold: self.minimum_threshold,
            nearest_expiry_date: self.nearest_expiry_date,
        }
    }
}
