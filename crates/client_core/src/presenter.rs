//! Display model for a fulfillment result.

use shared::protocol::FulfillmentResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackRow {
    pub pack_size: u64,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackRows {
    /// Rows sorted by descending pack size.
    Table(Vec<PackRow>),
    /// The result shipped no packs; rendered as a single placeholder row.
    NoPacks,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub requested_quantity: u64,
    pub total_items: u64,
    pub rows: PackRows,
}

impl ResultView {
    pub fn present(result: &FulfillmentResult, requested_quantity: u64) -> Self {
        let rows = if result.packs.is_empty() {
            PackRows::NoPacks
        } else {
            let mut rows: Vec<PackRow> = result
                .packs
                .iter()
                .map(|(&pack_size, &count)| PackRow { pack_size, count })
                .collect();
            rows.sort_by(|a, b| b.pack_size.cmp(&a.pack_size));
            PackRows::Table(rows)
        };

        Self {
            requested_quantity,
            total_items: result.total_items_or_zero(),
            rows,
        }
    }
}

#[cfg(test)]
#[path = "tests/presenter_tests.rs"]
mod tests;
