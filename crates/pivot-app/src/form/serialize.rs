//! Form serializer
//!
//! Turns the flat list of submitted form entries back into a nested property
//! map. Array items arrive as `field[index].sub` entries and are regrouped
//! into a sequence of sub-objects in ascending index order.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Number, Value};

use pivot_core::prelude::*;
use pivot_core::{FieldKind, Properties};

/// `network_interfaces[0].ip` -> (`network_interfaces`, `0`, `ip`)
static INDEXED_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\w+)\[(\d+)\]\.(\w+)$").expect("Invalid INDEXED_NAME regex")
});

/// Submitted state of one control
#[derive(Debug, Clone, PartialEq)]
pub enum FormValue {
    Checkbox(bool),
    Text(String),
}

/// One submitted control
#[derive(Debug, Clone, PartialEq)]
pub struct FormEntry {
    pub name: String,
    pub kind: FieldKind,
    pub comma_list: bool,
    pub value: FormValue,
}

impl FormEntry {
    pub fn text(name: impl Into<String>, kind: FieldKind, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            comma_list: false,
            value: FormValue::Text(value.into()),
        }
    }

    pub fn checkbox(name: impl Into<String>, checked: bool) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Boolean,
            comma_list: false,
            value: FormValue::Checkbox(checked),
        }
    }

    /// Declares an array field so it serializes to `[]` when it has no items
    pub fn array(name: impl Into<String>) -> Self {
        Self::text(name, FieldKind::Array, "")
    }

    pub fn comma_list(mut self) -> Self {
        self.comma_list = true;
        self
    }
}

/// Build the property map for a submitted form. Never fails.
pub fn serialize(entries: &[FormEntry]) -> Properties {
    let mut properties = Properties::new();
    let mut groups: BTreeMap<String, BTreeMap<u64, Properties>> = BTreeMap::new();

    for entry in entries {
        if !entry.name.contains('[') {
            if entry.kind == FieldKind::Array {
                properties
                    .entry(entry.name.clone())
                    .or_insert_with(|| Value::Array(Vec::new()));
            } else {
                properties.insert(entry.name.clone(), scalar_value(entry));
            }
            continue;
        }

        let Some(caps) = INDEXED_NAME.captures(&entry.name) else {
            trace!("Ignoring malformed indexed entry {:?}", entry.name);
            continue;
        };
        let Ok(index) = caps[2].parse::<u64>() else {
            continue;
        };

        // The group is created even when the value is blank so that an
        // all-blank item is dropped below rather than silently merged.
        let group = groups
            .entry(caps[1].to_string())
            .or_default()
            .entry(index)
            .or_default();
        if let Some(value) = item_value(entry) {
            group.insert(caps[3].to_string(), value);
        }
    }

    for (field, items) in groups {
        let values: Vec<Value> = items
            .into_values()
            .filter(|item| !item.is_empty())
            .map(Value::Object)
            .collect();
        properties.insert(field, Value::Array(values));
    }

    properties
}

fn scalar_value(entry: &FormEntry) -> Value {
    match &entry.value {
        FormValue::Checkbox(checked) => Value::Bool(*checked),
        FormValue::Text(text) if entry.kind == FieldKind::Number => parse_number(text),
        FormValue::Text(text) if entry.comma_list => split_list(text),
        FormValue::Text(text) => Value::String(text.clone()),
    }
}

/// Array sub-values: blanks are skipped entirely
fn item_value(entry: &FormEntry) -> Option<Value> {
    match &entry.value {
        FormValue::Checkbox(checked) => Some(Value::Bool(*checked)),
        FormValue::Text(text) if text.trim().is_empty() => None,
        FormValue::Text(_) => Some(scalar_value(entry)),
    }
}

/// Integer when integral, float otherwise, `null` when empty or unparsable
pub fn parse_number(text: &str) -> Value {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    if let Ok(int) = trimmed.parse::<i64>() {
        return Value::Number(int.into());
    }
    trimmed
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

fn split_list(text: &str) -> Value {
    Value::Array(
        text.split(',')
            .map(str::trim)
            .filter(|piece| !piece.is_empty())
            .map(|piece| Value::String(piece.to_string()))
            .collect(),
    )
}
