//! Editable property draft built from a schema
//!
//! [`FormDraftState`] holds one control per schema field, pre-filled from an
//! existing property map. Array fields hold a list of items, each carrying a
//! stable id from a per-field counter; the positional index emitted on submit
//! is recomputed from the current order, so removing an item never leaves a
//! gap.
//!
//! Controls are addressed through a flat list of focusable [`Slot`]s so the
//! owning form can move a single cursor over everything.

use serde_json::Value;

use pivot_core::{FieldDescriptor, FieldKind, Properties};

use super::serialize::{serialize, FormEntry, FormValue};
use super::{FormRow, RowKind};

/// Current value of one control
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Checkbox(bool),
    Text(String),
}

impl FieldValue {
    fn blank(descriptor: &FieldDescriptor) -> Self {
        match descriptor.kind {
            FieldKind::Boolean => FieldValue::Checkbox(false),
            _ => FieldValue::Text(String::new()),
        }
    }

    /// Pre-fill from an existing JSON value
    fn from_existing(descriptor: &FieldDescriptor, value: &Value) -> Self {
        match descriptor.kind {
            FieldKind::Boolean => FieldValue::Checkbox(json_truthy(value)),
            _ => FieldValue::Text(display_text(descriptor, value)),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            FieldValue::Checkbox(_) => None,
        }
    }

    fn to_form_value(&self) -> FormValue {
        match self {
            FieldValue::Checkbox(checked) => FormValue::Checkbox(*checked),
            FieldValue::Text(text) => FormValue::Text(text.clone()),
        }
    }

    fn is_blank(&self) -> bool {
        matches!(self, FieldValue::Text(text) if text.trim().is_empty())
    }
}

/// One repeated group inside an array field
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayItem {
    /// Stable across removals of other items
    pub id: u32,
    /// Parallel to the field's subfields
    pub values: Vec<FieldValue>,
}

#[derive(Debug, Clone)]
enum DraftField {
    Scalar {
        descriptor: FieldDescriptor,
        value: FieldValue,
        /// Value the field was opened with, restored verbatim if unedited
        initial: Option<Value>,
    },
    Array {
        descriptor: FieldDescriptor,
        items: Vec<ArrayItem>,
        next_id: u32,
        initial: Option<Value>,
        dirty: bool,
    },
}

impl DraftField {
    fn descriptor(&self) -> &FieldDescriptor {
        match self {
            DraftField::Scalar { descriptor, .. } | DraftField::Array { descriptor, .. } => {
                descriptor
            }
        }
    }
}

/// Address of a focusable control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Field { field: usize },
    ItemField { field: usize, item: usize, sub: usize },
    AddItem { field: usize },
}

/// Editable state of a schema-driven property form
#[derive(Debug, Clone, Default)]
pub struct FormDraftState {
    fields: Vec<DraftField>,
    /// Existing properties the schema does not describe
    passthrough: Properties,
}

impl FormDraftState {
    /// Build controls for `schema`, pre-filled from `existing`.
    ///
    /// Keys of `existing` that no field claims are kept aside and merged back
    /// by [`FormDraftState::to_properties`].
    pub fn from_schema(schema: &[FieldDescriptor], existing: Option<&Properties>) -> Self {
        let empty = Properties::new();
        let existing = existing.unwrap_or(&empty);

        let fields = schema
            .iter()
            .map(|descriptor| {
                let initial = existing.get(descriptor.name).cloned();
                match descriptor.kind {
                    FieldKind::Array => {
                        let items: Vec<ArrayItem> = initial
                            .as_ref()
                            .and_then(Value::as_array)
                            .map(|entries| {
                                entries
                                    .iter()
                                    .zip(1u32..)
                                    .map(|(entry, id)| ArrayItem {
                                        id,
                                        values: item_values(descriptor, entry),
                                    })
                                    .collect()
                            })
                            .unwrap_or_default();
                        DraftField::Array {
                            descriptor: descriptor.clone(),
                            next_id: items.len() as u32 + 1,
                            items,
                            initial,
                            dirty: false,
                        }
                    }
                    _ => DraftField::Scalar {
                        descriptor: descriptor.clone(),
                        value: initial
                            .as_ref()
                            .map(|v| FieldValue::from_existing(descriptor, v))
                            .unwrap_or_else(|| FieldValue::blank(descriptor)),
                        initial,
                    },
                }
            })
            .collect();

        let passthrough = existing
            .iter()
            .filter(|(key, _)| !schema.iter().any(|f| f.name == key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Self {
            fields,
            passthrough,
        }
    }

    /// Discard unknown properties instead of carrying them through
    pub fn preserve_unknown(mut self, preserve: bool) -> Self {
        if !preserve {
            self.passthrough.clear();
        }
        self
    }

    /// True when the schema has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn passthrough(&self) -> &Properties {
        &self.passthrough
    }

    // ─────────────────────────────────────────────────────────
    // Slots
    // ─────────────────────────────────────────────────────────

    /// Focusable controls in display order
    pub fn slots(&self) -> Vec<Slot> {
        let mut slots = Vec::new();
        for (field, draft) in self.fields.iter().enumerate() {
            match draft {
                DraftField::Scalar { .. } => slots.push(Slot::Field { field }),
                DraftField::Array {
                    descriptor, items, ..
                } => {
                    for item in 0..items.len() {
                        for sub in 0..descriptor.subfields.len() {
                            slots.push(Slot::ItemField { field, item, sub });
                        }
                    }
                    slots.push(Slot::AddItem { field });
                }
            }
        }
        slots
    }

    pub fn slot_count(&self) -> usize {
        self.slots().len()
    }

    fn slot(&self, index: usize) -> Option<Slot> {
        self.slots().get(index).copied()
    }

    /// Descriptor and value behind a slot; `None` for "add item" slots
    fn control_mut(&mut self, slot: Slot) -> Option<(&FieldDescriptor, &mut FieldValue)> {
        match slot {
            Slot::Field { field } => match self.fields.get_mut(field)? {
                DraftField::Scalar {
                    descriptor, value, ..
                } => Some((&*descriptor, value)),
                DraftField::Array { .. } => None,
            },
            Slot::ItemField { field, item, sub } => match self.fields.get_mut(field)? {
                DraftField::Array {
                    descriptor,
                    items,
                    dirty,
                    ..
                } => {
                    *dirty = true;
                    let value = items.get_mut(item)?.values.get_mut(sub)?;
                    Some((descriptor.subfields.get(sub)?, value))
                }
                DraftField::Scalar { .. } => None,
            },
            Slot::AddItem { .. } => None,
        }
    }

    /// Kind of the control at `index`, if it is a value control
    pub fn kind_at(&self, index: usize) -> Option<FieldKind> {
        match self.slot(index)? {
            Slot::Field { field } => Some(self.fields.get(field)?.descriptor().kind),
            Slot::ItemField { field, sub, .. } => Some(
                self.fields
                    .get(field)?
                    .descriptor()
                    .subfields
                    .get(sub)?
                    .kind,
            ),
            Slot::AddItem { .. } => None,
        }
    }

    // ─────────────────────────────────────────────────────────
    // Editing
    // ─────────────────────────────────────────────────────────

    /// Type a character into a textual control
    pub fn input_char(&mut self, index: usize, c: char) {
        let Some(slot) = self.slot(index) else { return };
        if let Some((descriptor, FieldValue::Text(text))) = self.control_mut(slot) {
            if descriptor.kind.is_textual() {
                text.push(c);
            }
        }
    }

    pub fn backspace(&mut self, index: usize) {
        let Some(slot) = self.slot(index) else { return };
        if let Some((descriptor, FieldValue::Text(text))) = self.control_mut(slot) {
            if descriptor.kind.is_textual() {
                text.pop();
            }
        }
    }

    /// Clear a textual control or deselect a select
    pub fn clear(&mut self, index: usize) {
        let Some(slot) = self.slot(index) else { return };
        if let Some((_, FieldValue::Text(text))) = self.control_mut(slot) {
            text.clear();
        }
    }

    /// Flip a checkbox or step a select through `["", options...]`
    pub fn toggle(&mut self, index: usize, forward: bool) {
        let Some(slot) = self.slot(index) else { return };
        let Some((descriptor, value)) = self.control_mut(slot) else {
            return;
        };
        match (descriptor.kind, value) {
            (FieldKind::Boolean, FieldValue::Checkbox(checked)) => *checked = !*checked,
            (FieldKind::Select, FieldValue::Text(text)) => {
                *text = cycle_option(&descriptor.options, text, forward);
            }
            _ => {}
        }
    }

    /// Append a blank item to array field `field`, returning its id
    pub fn add_item(&mut self, field: usize) -> Option<u32> {
        match self.fields.get_mut(field)? {
            DraftField::Array {
                descriptor,
                items,
                next_id,
                dirty,
                ..
            } => {
                let id = *next_id;
                *next_id += 1;
                *dirty = true;
                items.push(ArrayItem {
                    id,
                    values: descriptor.subfields.iter().map(FieldValue::blank).collect(),
                });
                Some(id)
            }
            DraftField::Scalar { .. } => None,
        }
    }

    /// Remove item at position `item` of array field `field`
    pub fn remove_item(&mut self, field: usize, item: usize) -> Option<ArrayItem> {
        match self.fields.get_mut(field)? {
            DraftField::Array { items, dirty, .. } if item < items.len() => {
                *dirty = true;
                Some(items.remove(item))
            }
            _ => None,
        }
    }

    /// Enter on a slot: adds an item when it is an "add item" slot
    pub fn activate(&mut self, index: usize) -> bool {
        match self.slot(index) {
            Some(Slot::AddItem { field }) => self.add_item(field).is_some(),
            _ => false,
        }
    }

    /// Remove the array item that owns the slot at `index`
    pub fn remove_item_at(&mut self, index: usize) -> bool {
        match self.slot(index) {
            Some(Slot::ItemField { field, item, .. }) => self.remove_item(field, item).is_some(),
            _ => false,
        }
    }

    pub fn items(&self, field: usize) -> &[ArrayItem] {
        match self.fields.get(field) {
            Some(DraftField::Array { items, .. }) => items,
            _ => &[],
        }
    }

    /// Index of the field named `name`
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.descriptor().name == name)
    }

    /// Current value of scalar field `name`
    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find_map(|f| match f {
            DraftField::Scalar {
                descriptor, value, ..
            } if descriptor.name == name => Some(value),
            _ => None,
        })
    }

    // ─────────────────────────────────────────────────────────
    // Submission
    // ─────────────────────────────────────────────────────────

    /// Labels of required scalar fields left blank
    pub fn missing_required(&self) -> Vec<&'static str> {
        self.fields
            .iter()
            .filter_map(|f| match f {
                DraftField::Scalar {
                    descriptor, value, ..
                } if descriptor.required && value.is_blank() => Some(descriptor.label),
                _ => None,
            })
            .collect()
    }

    /// The submitted form, with array items numbered by current position
    pub fn entries(&self) -> Vec<FormEntry> {
        let mut entries = Vec::new();
        for draft in &self.fields {
            match draft {
                DraftField::Scalar {
                    descriptor, value, ..
                } => entries.push(FormEntry {
                    name: descriptor.name.to_string(),
                    kind: descriptor.kind,
                    comma_list: descriptor.comma_list,
                    value: value.to_form_value(),
                }),
                DraftField::Array {
                    descriptor, items, ..
                } => {
                    entries.push(FormEntry::array(descriptor.name));
                    for (index, item) in items.iter().enumerate() {
                        for (sub, value) in descriptor.subfields.iter().zip(&item.values) {
                            entries.push(FormEntry {
                                name: format!("{}[{}].{}", descriptor.name, index, sub.name),
                                kind: sub.kind,
                                comma_list: sub.comma_list,
                                value: value.to_form_value(),
                            });
                        }
                    }
                }
            }
        }
        entries
    }

    /// Serialize the draft into the property map sent to the engine.
    ///
    /// Unedited fields keep their original JSON value; passthrough keys are
    /// added last and never override a schema field.
    pub fn to_properties(&self) -> Properties {
        let mut properties = serialize(&self.entries());

        for draft in &self.fields {
            match draft {
                DraftField::Scalar {
                    descriptor,
                    value,
                    initial: Some(initial),
                } if *value == FieldValue::from_existing(descriptor, initial) => {
                    properties.insert(descriptor.name.to_string(), initial.clone());
                }
                DraftField::Array {
                    descriptor,
                    initial: Some(initial),
                    dirty: false,
                    ..
                } => {
                    properties.insert(descriptor.name.to_string(), initial.clone());
                }
                _ => {}
            }
        }

        for (key, value) in &self.passthrough {
            properties
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
        properties
    }

    // ─────────────────────────────────────────────────────────
    // Display
    // ─────────────────────────────────────────────────────────

    /// Display rows, with focusable rows numbered from `slot_offset`
    pub fn rows(&self, slot_offset: usize) -> Vec<FormRow> {
        let mut rows = Vec::new();
        let mut slot = slot_offset;
        let mut next_slot = || {
            let current = slot;
            slot += 1;
            Some(current)
        };

        for draft in &self.fields {
            match draft {
                DraftField::Scalar {
                    descriptor, value, ..
                } => rows.push(control_row(descriptor, value, 0, next_slot())),
                DraftField::Array {
                    descriptor, items, ..
                } => {
                    rows.push(FormRow::heading(descriptor.label, 0));
                    for (position, item) in items.iter().enumerate() {
                        rows.push(FormRow::heading(format!("#{}", position + 1), 1));
                        for (sub, value) in descriptor.subfields.iter().zip(&item.values) {
                            rows.push(control_row(sub, value, 1, next_slot()));
                        }
                    }
                    rows.push(FormRow {
                        slot: next_slot(),
                        depth: 1,
                        label: format!("+ Add {}", descriptor.label),
                        kind: RowKind::Action,
                        required: false,
                    });
                }
            }
        }
        rows
    }
}

fn control_row(
    descriptor: &FieldDescriptor,
    value: &FieldValue,
    depth: u8,
    slot: Option<usize>,
) -> FormRow {
    let kind = match (descriptor.kind, value) {
        (_, FieldValue::Checkbox(checked)) => RowKind::Checkbox(*checked),
        (FieldKind::Select, FieldValue::Text(text)) => RowKind::Choice {
            value: text.clone(),
        },
        (kind, FieldValue::Text(text)) => RowKind::Text {
            value: text.clone(),
            placeholder: descriptor.placeholder,
            masked: kind == FieldKind::Password,
            multiline: kind == FieldKind::Textarea,
        },
    };
    FormRow {
        slot,
        depth,
        label: descriptor.label.to_string(),
        kind,
        required: descriptor.required,
    }
}

fn item_values(descriptor: &FieldDescriptor, entry: &Value) -> Vec<FieldValue> {
    descriptor
        .subfields
        .iter()
        .map(|sub| {
            entry
                .get(sub.name)
                .map(|v| FieldValue::from_existing(sub, v))
                .unwrap_or_else(|| FieldValue::blank(sub))
        })
        .collect()
}

/// Text shown in a textual or select control for an existing value
fn display_text(descriptor: &FieldDescriptor, value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) if descriptor.comma_list => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

fn json_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => matches!(s.to_ascii_lowercase().as_str(), "true" | "yes" | "1"),
        _ => false,
    }
}

/// Next entry of `["", options...]` after `current`. A value outside the
/// option list steps to the first (or last) option.
fn cycle_option(options: &[&'static str], current: &str, forward: bool) -> String {
    let choices: Vec<&str> = std::iter::once("").chain(options.iter().copied()).collect();
    let next = match choices.iter().position(|c| *c == current) {
        Some(pos) if forward => (pos + 1) % choices.len(),
        Some(pos) => (pos + choices.len() - 1) % choices.len(),
        None if forward => 1.min(choices.len() - 1),
        None => choices.len() - 1,
    };
    choices[next].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pivot_core::schema_for;
    use serde_json::json;

    fn props(value: Value) -> Properties {
        value.as_object().cloned().unwrap()
    }

    fn host_draft(existing: Option<&Properties>) -> FormDraftState {
        FormDraftState::from_schema(schema_for("host"), existing)
    }

    /// Slot index of the first item subfield `sub` of array `name`
    fn item_slot(draft: &FormDraftState, name: &str, item: usize, sub: usize) -> usize {
        let field = draft.field_index(name).unwrap();
        draft
            .slots()
            .iter()
            .position(|s| *s == Slot::ItemField { field, item, sub })
            .unwrap()
    }

    fn type_into(draft: &mut FormDraftState, slot: usize, text: &str) {
        for c in text.chars() {
            draft.input_char(slot, c);
        }
    }

    #[test]
    fn test_round_trip_without_edits() {
        let existing = props(json!({
            "ip": "10.0.0.5",
            "hostname": "web-01",
            "mac_address": "",
            "os": "Ubuntu",
            "os_version": "22.04",
            "open_ports": ["22", "80"],
            "status": "online",
            "network_interfaces": [
                { "name": "eth0", "ip": "10.0.0.5" },
                { "name": "eth1", "network": "10.1.0.0/24", "status": "up" }
            ]
        }));

        let draft = host_draft(Some(&existing));
        assert_eq!(draft.to_properties(), existing);
    }

    #[test]
    fn test_round_trip_keeps_non_string_values_of_text_fields() {
        let existing = props(json!({ "cidr": "10.0.0.0/24", "vlan": 100 }));
        let draft = FormDraftState::from_schema(schema_for("network_segment"), Some(&existing));
        let out = draft.to_properties();
        assert_eq!(out["vlan"], json!(100));
        assert_eq!(out["cidr"], json!("10.0.0.0/24"));
    }

    #[test]
    fn test_serializer_round_trip_with_coercions() {
        // Going through entries alone applies the documented coercions.
        let existing = props(json!({
            "port": 8080,
            "protocol": "tcp",
            "requires_auth": true,
            "version": ""
        }));
        let draft = FormDraftState::from_schema(schema_for("service"), Some(&existing));
        let out = serialize(&draft.entries());
        assert_eq!(out["port"], json!(8080));
        assert_eq!(out["protocol"], json!("tcp"));
        assert_eq!(out["requires_auth"], json!(true));
        assert_eq!(out["host"], json!(""));
    }

    #[test]
    fn test_comma_list_string_becomes_array_when_edited() {
        let existing = props(json!({ "open_ports": "22,80,443" }));
        let mut draft = host_draft(Some(&existing));
        let slot = draft
            .slots()
            .iter()
            .position(|s| *s == Slot::Field { field: draft.field_index("open_ports").unwrap() })
            .unwrap();
        draft.input_char(slot, ',');
        draft.input_char(slot, '8');

        assert_eq!(
            draft.to_properties()["open_ports"],
            json!(["22", "80", "443", "8"])
        );
    }

    #[test]
    fn test_add_two_fill_first_yields_one_item() {
        let mut draft = host_draft(None);
        let field = draft.field_index("network_interfaces").unwrap();
        draft.add_item(field);
        draft.add_item(field);

        let name_slot = item_slot(&draft, "network_interfaces", 0, 0);
        type_into(&mut draft, name_slot, "eth0");

        let out = draft.to_properties();
        assert_eq!(out["network_interfaces"], json!([{ "name": "eth0" }]));
    }

    #[test]
    fn test_remove_item_renumbers_and_keeps_order() {
        let existing = props(json!({
            "network_interfaces": [
                { "name": "eth0" }, { "name": "eth1" }, { "name": "eth2" }
            ]
        }));
        let mut draft = host_draft(Some(&existing));
        let field = draft.field_index("network_interfaces").unwrap();

        let removed = draft.remove_item(field, 1).unwrap();
        assert_eq!(removed.id, 2);

        let names: Vec<_> = draft
            .entries()
            .into_iter()
            .filter(|e| e.name.ends_with(".name"))
            .map(|e| e.name)
            .collect();
        assert_eq!(
            names,
            vec!["network_interfaces[0].name", "network_interfaces[1].name"]
        );
        assert_eq!(
            draft.to_properties()["network_interfaces"],
            json!([{ "name": "eth0" }, { "name": "eth2" }])
        );
    }

    #[test]
    fn test_item_ids_stay_unique_after_removal() {
        let mut draft = host_draft(None);
        let field = draft.field_index("network_interfaces").unwrap();
        let first = draft.add_item(field).unwrap();
        let second = draft.add_item(field).unwrap();
        draft.remove_item(field, 0);
        let third = draft.add_item(field).unwrap();

        assert_eq!((first, second, third), (1, 2, 3));
        let ids: Vec<_> = draft.items(field).iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_unknown_properties_pass_through() {
        let existing = props(json!({ "ip": "10.0.0.5", "zone": "dmz", "scan_id": 7 }));
        let draft = host_draft(Some(&existing));
        assert_eq!(draft.passthrough().len(), 2);

        let out = draft.to_properties();
        assert_eq!(out["zone"], json!("dmz"));
        assert_eq!(out["scan_id"], json!(7));

        let dropped = host_draft(Some(&existing)).preserve_unknown(false);
        assert!(!dropped.to_properties().contains_key("zone"));
    }

    #[test]
    fn test_unknown_type_keeps_everything_in_passthrough() {
        let existing = props(json!({ "endpoint": "/api/v1", "methods": ["GET"] }));
        let draft = FormDraftState::from_schema(schema_for("api_endpoint"), Some(&existing));
        assert!(draft.is_empty());
        assert_eq!(draft.slot_count(), 0);
        assert_eq!(draft.to_properties(), existing);
    }

    #[test]
    fn test_toggle_checkbox_and_cycle_select() {
        let mut draft = FormDraftState::from_schema(schema_for("service"), None);
        let slots = draft.slots();
        let auth = slots
            .iter()
            .position(|s| *s == Slot::Field { field: draft.field_index("requires_auth").unwrap() })
            .unwrap();
        let protocol = slots
            .iter()
            .position(|s| *s == Slot::Field { field: draft.field_index("protocol").unwrap() })
            .unwrap();

        draft.toggle(auth, true);
        assert_eq!(draft.value("requires_auth"), Some(&FieldValue::Checkbox(true)));

        draft.toggle(protocol, true);
        assert_eq!(draft.value("protocol"), Some(&FieldValue::Text("tcp".into())));
        draft.toggle(protocol, true);
        draft.toggle(protocol, true);
        assert_eq!(draft.value("protocol"), Some(&FieldValue::Text(String::new())));
        draft.toggle(protocol, false);
        assert_eq!(draft.value("protocol"), Some(&FieldValue::Text("udp".into())));
    }

    #[test]
    fn test_typing_ignored_on_checkbox() {
        let mut draft = FormDraftState::from_schema(schema_for("service"), None);
        let auth = draft.field_index("requires_auth").unwrap();
        let slot = draft
            .slots()
            .iter()
            .position(|s| *s == Slot::Field { field: auth })
            .unwrap();
        draft.input_char(slot, 'x');
        assert_eq!(draft.value("requires_auth"), Some(&FieldValue::Checkbox(false)));
    }

    #[test]
    fn test_missing_required_fields() {
        let draft = host_draft(None);
        assert_eq!(draft.missing_required(), vec!["IP Address"]);
    }

    #[test]
    fn test_activate_add_slot_and_remove_from_item_slot() {
        let mut draft = host_draft(None);
        let add_slot = draft.slot_count() - 1;
        assert!(draft.activate(add_slot));
        assert_eq!(draft.items(draft.field_index("network_interfaces").unwrap()).len(), 1);

        let item_slot = item_slot(&draft, "network_interfaces", 0, 2);
        assert!(draft.remove_item_at(item_slot));
        assert!(draft.items(draft.field_index("network_interfaces").unwrap()).is_empty());
    }

    #[test]
    fn test_rows_number_focusable_slots() {
        let mut draft = host_draft(None);
        let field = draft.field_index("network_interfaces").unwrap();
        draft.add_item(field);

        let rows = draft.rows(3);
        let slots: Vec<usize> = rows.iter().filter_map(|r| r.slot).collect();
        assert_eq!(slots, (3..3 + draft.slot_count()).collect::<Vec<_>>());
        assert!(rows.iter().any(|r| r.label == "#1" && r.slot.is_none()));
    }
}
