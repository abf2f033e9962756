//! Demand plan model.

use serde::{Deserialize, Serialize};

/// A requested quantity of one SKU.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandItem {
    /// Requested SKU.
    pub sku_id: u32,
    /// Requested volume units.
    pub quantity: i64,
    /// Units fulfilled so far. Reported, never incremented by the engine.
    pub fulfilled: i64,
}

impl DemandItem {
    /// Creates an unfulfilled demand item.
    pub fn new(sku_id: u32, quantity: i64) -> Self {
        Self {
            sku_id,
            quantity,
            fulfilled: 0,
        }
    }
}

/// Ordered collection of demand items, at most one per SKU.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DemandPlan {
    items: Vec<DemandItem>,
}

impl DemandPlan {
    /// Creates an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds demand, summing into an existing entry for the same SKU.
    pub fn add(&mut self, sku_id: u32, quantity: i64) {
        match self.items.iter_mut().find(|i| i.sku_id == sku_id) {
            Some(existing) => existing.quantity += quantity,
            None => self.items.push(DemandItem::new(sku_id, quantity)),
        }
    }

    /// Items in submission order.
    pub fn items(&self) -> &[DemandItem] {
        &self.items
    }

    /// Removes and returns all items.
    pub fn take(&mut self) -> Vec<DemandItem> {
        std::mem::take(&mut self.items)
    }

    /// Appends previously taken items.
    pub fn restore(&mut self, items: Vec<DemandItem>) {
        self.items.extend(items);
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the plan is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
