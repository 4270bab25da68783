use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Response of `GET /api/fulfill`.
///
/// Pack sizes arrive as string keys (`{"500": 1}`); serde_json parses them
/// into integers. A `null` or missing `Packs` field is an empty mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FulfillmentResult {
    #[serde(rename = "Packs", default, deserialize_with = "null_as_empty")]
    pub packs: BTreeMap<u64, u64>,
    #[serde(rename = "TotalItems", default)]
    pub total_items: Option<u64>,
}

impl FulfillmentResult {
    pub fn total_items_or_zero(&self) -> u64 {
        self.total_items.unwrap_or(0)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<BTreeMap<u64, u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<BTreeMap<u64, u64>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Serialize)]
pub struct FulfillmentQuery<'a> {
    pub product_id: &'a str,
    pub quantity: u64,
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
