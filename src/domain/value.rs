use chrono::NaiveDate;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// A single cell value from the correction result table. Periods come back
/// as month/year, so `Date` always carries day 1.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Date(NaiveDate),
    Text(String),
}

/// Label → value mapping for one correction response, in first-occurrence
/// label order. A repeated label overwrites its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Adjustment {
    entries: Vec<(String, Value)>,
}

impl Adjustment {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn insert(&mut self, label: String, value: Value) {
        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.0 == label) {
            entry.1 = value;
        } else {
            self.entries.push((label, value));
        }
    }

    pub fn get(&self, label: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|entry| entry.0 == label)
            .map(|entry| &entry.1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries
            .iter()
            .map(|(label, value)| (label.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Adjustment {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, value) in &self.entries {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}
