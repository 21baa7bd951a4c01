// Read-only rendering of table snapshots as text and JSON. Never mutates.
use std::fmt::{Display, Write};

use serde::Serialize;
use serde_json::{Value, json};

use crate::core::table::Table;

/// Ordered pair-list text form of the table's current contents, e.g.
/// `[(a, 1), (b, 2)]`.
pub fn render<K, V>(table: &Table<K, V>) -> String
where
    K: Ord + Clone + Display,
    V: Clone + Display,
{
    let mut out = String::from("[");
    for (index, (key, value)) in table.snapshot().into_iter().enumerate() {
        if index > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "({key}, {value})");
    }
    out.push(']');
    out
}

/// JSON array-of-pairs form, `[[k, v], ...]`, in ascending key order.
pub fn to_json<K, V>(table: &Table<K, V>) -> Value
where
    K: Ord + Clone + Serialize,
    V: Clone + Serialize,
{
    Value::Array(
        table
            .snapshot()
            .into_iter()
            .map(|(key, value)| json!([key, value]))
            .collect(),
    )
}
