//! Style → unit-cost lookup by source priority.
//!
//! Priority per style: landed cost (> 0) from any cost-sheet row, else
//! FOB cost (> 0) from any cost-sheet row, else the line-list cost.
//! Each tier resolves across the whole record set before the next one
//! is consulted, so an FOB-only component row can never shadow another
//! component's landed cost. Within a tier the first non-zero value
//! wins and is never overwritten.

use std::collections::HashMap;

use crate::records::{CostRecord, ProductRecord};

/// Build the style → unit-cost lookup.
pub fn build_cost_lookup(
    cost_records: &[CostRecord],
    product_records: &[ProductRecord],
) -> HashMap<String, f64> {
    let mut lookup: HashMap<String, f64> = HashMap::new();

    for record in cost_records {
        if record.landed_cost > 0.0 {
            lookup
                .entry(record.style_number.clone())
                .or_insert(record.landed_cost);
        }
    }

    for record in cost_records {
        if record.fob_cost > 0.0 {
            lookup
                .entry(record.style_number.clone())
                .or_insert(record.fob_cost);
        }
    }

    for product in product_records {
        if product.cost > 0.0 {
            lookup
                .entry(product.style_number.clone())
                .or_insert(product.cost);
        }
    }

    lookup
}
