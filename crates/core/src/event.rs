// Processed event domain type
//
// One materialized row of the processedevents table. Rows are written by the
// ingestion pipeline and are immutable from this service's point of view.

use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// A processed event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct Event {
    /// Row id, strictly increasing in insertion order.
    #[cfg_attr(feature = "openapi", schema(example = 1042))]
    pub id: i64,
    /// Event type identifier. Many events share an `event_id`.
    #[cfg_attr(feature = "openapi", schema(example = 3))]
    pub event_id: i64,
    /// Structural/identity fields, 1-indexed when referenced by query parameters.
    #[serde(default)]
    pub keys: Vec<String>,
    /// Payload fields, 1-indexed when referenced by query parameters.
    #[serde(default)]
    pub data: Vec<String>,
}

impl Event {
    /// Element of `keys` at a 1-based position, `None` where Postgres yields NULL.
    pub fn key(&self, idx: i32) -> Option<&str> {
        element(&self.keys, idx)
    }

    /// Element of `data` at a 1-based position, `None` where Postgres yields NULL.
    pub fn datum(&self, idx: i32) -> Option<&str> {
        element(&self.data, idx)
    }
}

fn element(values: &[String], idx: i32) -> Option<&str> {
    if idx < 1 {
        return None;
    }
    values.get(idx as usize - 1).map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Event {
        Event {
            id: 7,
            event_id: 2,
            keys: vec!["0xabc".to_string(), "pixel".to_string()],
            data: vec!["12".to_string()],
        }
    }

    #[test]
    fn test_positions_are_one_based() {
        let event = sample();
        assert_eq!(event.key(1), Some("0xabc"));
        assert_eq!(event.key(2), Some("pixel"));
        assert_eq!(event.datum(1), Some("12"));
    }

    #[test]
    fn test_out_of_range_positions_are_null() {
        let event = sample();
        assert_eq!(event.key(0), None);
        assert_eq!(event.key(-1), None);
        assert_eq!(event.key(3), None);
        assert_eq!(event.datum(2), None);
    }

    #[test]
    fn test_event_serialization() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["event_id"], 2);
        assert_eq!(json["keys"][1], "pixel");
        assert_eq!(json["data"][0], "12");
    }
}
