//! The item record and collection lookups.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A named, priced record.
///
/// Stored as the JSON object the client sent: `name` and `price` are the
/// fields the service understands, anything else rides along untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Item(Map<String, Value>);

impl Item {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        let mut fields = Map::new();
        fields.insert("name".to_owned(), Value::String(name.into()));
        fields.insert("price".to_owned(), Value::from(price));
        Self(fields)
    }

    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    pub fn price(&self) -> Option<f64> {
        self.0.get("price").and_then(Value::as_f64)
    }

    /// Shallow merge: every field in `patch` overwrites, the rest are kept.
    pub fn merge(&mut self, patch: Map<String, Value>) {
        self.0.extend(patch);
    }
}

impl From<Map<String, Value>> for Item {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Index of the first item called `name`. Exact, case-sensitive match.
pub fn position(items: &[Item], name: &str) -> Option<usize> {
    items.iter().position(|item| item.name() == Some(name))
}
