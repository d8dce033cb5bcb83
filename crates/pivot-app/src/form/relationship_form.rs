//! New relationship modal state

use serde_json::Value;

use pivot_api::check_relationship;
use pivot_core::prelude::*;
use pivot_core::{relationship_schema, relationship_types, Asset, RelationshipDraft};

use super::{
    confidence_text, parse_confidence, FormControls, FormDraftState, FormRow, RowKind,
};
use crate::config::FormSettings;

const SOURCE_SLOT: usize = 0;
const TARGET_SLOT: usize = 1;
const TYPE_SLOT: usize = 2;
const CONFIDENCE_SLOT: usize = 3;
const HEADER_SLOTS: usize = 4;

/// An asset offered in the source/target pickers
#[derive(Debug, Clone, PartialEq)]
pub struct AssetChoice {
    pub id: String,
    pub label: String,
}

impl AssetChoice {
    pub fn from_asset(asset: &Asset) -> Self {
        Self {
            id: asset.id.clone(),
            label: format!("{} ({})", asset.name, asset.asset_type),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RelationshipFormState {
    choices: Vec<AssetChoice>,
    source: Option<usize>,
    target: Option<usize>,
    relationship_type: String,
    pub confidence: String,
    pub properties: FormDraftState,
    /// Free-form JSON object; fills keys the schema controls left blank
    pub extra_json: String,
    focus: usize,
    default_confidence: f64,
    pub error: Option<String>,
    pub submitting: bool,
}

impl RelationshipFormState {
    /// Open the form over `assets`, pre-selecting `source_id` when given
    pub fn new(assets: &[Asset], source_id: Option<&str>, settings: &FormSettings) -> Self {
        let choices: Vec<AssetChoice> = assets.iter().map(AssetChoice::from_asset).collect();
        let source = source_id.and_then(|id| choices.iter().position(|c| c.id == id));
        let relationship_type = relationship_types()
            .iter()
            .find(|t| **t == "can_pivot_to")
            .copied()
            .unwrap_or_default()
            .to_string();

        Self {
            choices,
            source,
            target: None,
            properties: FormDraftState::from_schema(relationship_schema(&relationship_type), None),
            relationship_type,
            confidence: confidence_text(settings.default_confidence),
            extra_json: String::new(),
            focus: if source.is_some() { TARGET_SLOT } else { SOURCE_SLOT },
            default_confidence: settings.default_confidence,
            error: None,
            submitting: false,
        }
    }

    pub fn choices(&self) -> &[AssetChoice] {
        &self.choices
    }

    pub fn source(&self) -> Option<&AssetChoice> {
        self.source.and_then(|i| self.choices.get(i))
    }

    pub fn target(&self) -> Option<&AssetChoice> {
        self.target.and_then(|i| self.choices.get(i))
    }

    pub fn relationship_type(&self) -> &str {
        &self.relationship_type
    }

    fn extra_slot(&self) -> usize {
        HEADER_SLOTS + self.properties.slot_count()
    }

    fn cycle_choice(&self, current: Option<usize>, forward: bool) -> Option<usize> {
        let len = self.choices.len();
        if len == 0 {
            return None;
        }
        Some(match current {
            Some(i) if forward => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
            None if forward => 0,
            None => len - 1,
        })
    }

    fn cycle_type(&mut self, forward: bool) {
        let types = relationship_types();
        let next = match types.iter().position(|t| *t == self.relationship_type) {
            Some(pos) if forward => (pos + 1) % types.len(),
            Some(pos) => (pos + types.len() - 1) % types.len(),
            None => 0,
        };
        self.relationship_type = types[next].to_string();
        self.properties = FormDraftState::from_schema(relationship_schema(types[next]), None);
    }

    /// Validate and build the request body.
    ///
    /// Runs the same checks the API client does, so a self-relationship is
    /// reported inline without any request being made.
    pub fn to_draft(&self) -> Result<RelationshipDraft> {
        let confidence = parse_confidence(&self.confidence, self.default_confidence)
            .ok_or_else(|| Error::validation("Confidence must be a number between 0 and 1"))?;
        if let Some(label) = self.properties.missing_required().first() {
            return Err(Error::validation(format!("{label} is required")));
        }

        let mut properties = self.properties.to_properties();
        if !self.extra_json.trim().is_empty() {
            let extra: Value = serde_json::from_str(&self.extra_json).map_err(|e| {
                Error::validation(format!("Extra properties are not valid JSON: {e}"))
            })?;
            let Value::Object(extra) = extra else {
                return Err(Error::validation("Extra properties must be a JSON object"));
            };
            for (key, value) in extra {
                match properties.get(&key) {
                    Some(current) if !is_blank(current) => {}
                    _ => {
                        properties.insert(key, value);
                    }
                }
            }
        }

        let draft = RelationshipDraft {
            source_asset_id: self.source().map(|c| c.id.clone()).unwrap_or_default(),
            target_asset_id: self.target().map(|c| c.id.clone()).unwrap_or_default(),
            relationship_type: self.relationship_type.clone(),
            properties,
            confidence,
        };
        check_relationship(&draft)?;
        Ok(draft)
    }
}

/// Schema values the extra JSON may fill in
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

impl FormControls for RelationshipFormState {
    fn slot_count(&self) -> usize {
        self.extra_slot() + 1
    }

    fn focus(&self) -> usize {
        self.focus
    }

    fn set_focus(&mut self, focus: usize) {
        self.focus = focus.min(self.slot_count() - 1);
    }

    fn input_char(&mut self, c: char) {
        match self.focus {
            CONFIDENCE_SLOT => self.confidence.push(c),
            slot if slot == self.extra_slot() => self.extra_json.push(c),
            slot if slot >= HEADER_SLOTS => self.properties.input_char(slot - HEADER_SLOTS, c),
            _ => {}
        }
    }

    fn backspace(&mut self) {
        match self.focus {
            CONFIDENCE_SLOT => {
                self.confidence.pop();
            }
            slot if slot == self.extra_slot() => {
                self.extra_json.pop();
            }
            slot if slot >= HEADER_SLOTS => self.properties.backspace(slot - HEADER_SLOTS),
            _ => {}
        }
    }

    fn clear(&mut self) {
        match self.focus {
            SOURCE_SLOT => self.source = None,
            TARGET_SLOT => self.target = None,
            CONFIDENCE_SLOT => self.confidence.clear(),
            slot if slot == self.extra_slot() => self.extra_json.clear(),
            slot if slot >= HEADER_SLOTS => self.properties.clear(slot - HEADER_SLOTS),
            _ => {}
        }
    }

    fn toggle(&mut self, forward: bool) {
        match self.focus {
            SOURCE_SLOT => self.source = self.cycle_choice(self.source, forward),
            TARGET_SLOT => self.target = self.cycle_choice(self.target, forward),
            TYPE_SLOT => self.cycle_type(forward),
            CONFIDENCE_SLOT => {}
            slot if slot == self.extra_slot() => {}
            slot => self.properties.toggle(slot - HEADER_SLOTS, forward),
        }
    }

    fn activate(&mut self) -> bool {
        let slot = self.focus;
        slot >= HEADER_SLOTS
            && slot < self.extra_slot()
            && self.properties.activate(slot - HEADER_SLOTS)
    }

    fn remove_item(&mut self) -> bool {
        let slot = self.focus;
        if slot < HEADER_SLOTS
            || slot >= self.extra_slot()
            || !self.properties.remove_item_at(slot - HEADER_SLOTS)
        {
            return false;
        }
        self.set_focus(slot);
        true
    }

    fn title(&self) -> String {
        "New Relationship".to_string()
    }

    fn rows(&self) -> Vec<FormRow> {
        let label = |choice: Option<&AssetChoice>| {
            choice.map(|c| c.label.clone()).unwrap_or_default()
        };

        let mut rows = vec![
            FormRow::choice(SOURCE_SLOT, "Source", &label(self.source())).required(),
            FormRow::choice(TARGET_SLOT, "Target", &label(self.target())).required(),
            FormRow::choice(TYPE_SLOT, "Relationship", &self.relationship_type).required(),
            FormRow::text(CONFIDENCE_SLOT, "Confidence", &self.confidence),
        ];
        if !self.properties.is_empty() {
            rows.push(FormRow::heading("Properties", 0));
            rows.extend(self.properties.rows(HEADER_SLOTS));
        }
        rows.push(FormRow {
            slot: Some(self.extra_slot()),
            depth: 0,
            label: "Extra properties (JSON)".to_string(),
            kind: RowKind::Text {
                value: self.extra_json.clone(),
                placeholder: Some("{\"port\": 445}"),
                masked: false,
                multiline: true,
            },
            required: false,
        });
        rows
    }

    fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    fn is_submitting(&self) -> bool {
        self.submitting
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pivot_api::test_utils::test_asset;
    use serde_json::json;

    fn assets() -> Vec<Asset> {
        vec![
            test_asset("a1", "host", "web-01"),
            test_asset("a2", "host", "db-01"),
        ]
    }

    fn form() -> RelationshipFormState {
        RelationshipFormState::new(&assets(), Some("a1"), &FormSettings::default())
    }

    #[test]
    fn test_preselects_source_and_focuses_target() {
        let form = form();
        assert_eq!(form.source().unwrap().id, "a1");
        assert_eq!(form.focus(), TARGET_SLOT);
        assert_eq!(form.relationship_type(), "can_pivot_to");
    }

    #[test]
    fn test_self_relationship_rejected_inline() {
        let mut form = form();
        form.toggle(true);
        assert_eq!(form.target().unwrap().id, "a1");

        let err = form.to_draft().unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
        assert!(err.to_string().contains("different"));
    }

    #[test]
    fn test_missing_target_rejected() {
        assert!(form().to_draft().is_err());
    }

    #[test]
    fn test_extra_json_fills_only_blank_schema_fields() {
        let mut form = form();
        form.toggle(true);
        form.toggle(true);

        // First property slot is the "method" select
        form.set_focus(HEADER_SLOTS);
        form.toggle(true);
        form.extra_json = r#"{"port": 445, "method": "override", "hops": 2}"#.to_string();

        let draft = form.to_draft().unwrap();
        assert_eq!(draft.target_asset_id, "a2");
        assert_eq!(draft.properties["method"], json!("ssh"));
        assert_eq!(draft.properties["port"], json!(445));
        assert_eq!(draft.properties["hops"], json!(2));
    }

    #[test]
    fn test_malformed_extra_json_rejected() {
        let mut form = form();
        form.toggle(true);
        form.toggle(true);

        form.extra_json = "{port: 445".to_string();
        assert!(form.to_draft().unwrap_err().to_string().contains("JSON"));

        form.extra_json = "[1, 2]".to_string();
        assert!(form.to_draft().unwrap_err().to_string().contains("object"));
    }

    #[test]
    fn test_cycling_type_rebuilds_properties() {
        let mut form = form();
        form.set_focus(TYPE_SLOT);
        let before = form.relationship_type().to_string();
        form.toggle(true);
        assert_ne!(form.relationship_type(), before);
        assert_eq!(form.slot_count(), HEADER_SLOTS + form.properties.slot_count() + 1);
    }
}
