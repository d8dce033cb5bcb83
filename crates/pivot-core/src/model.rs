//! Wire types for the methodology engine REST API
//!
//! Every struct tolerates missing optional fields and ignores unknown ones so
//! that a newer engine build never breaks the console.

use std::collections::BTreeMap;

use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Free-form property bag attached to assets and relationships
pub type Properties = Map<String, Value>;

// ─────────────────────────────────────────────────────────────────
// Assets & Relationships
// ─────────────────────────────────────────────────────────────────

/// A discovered entity tracked by the engine (host, service, credential...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    #[serde(rename = "type")]
    pub asset_type: String,
    pub name: String,
    #[serde(default)]
    pub properties: Properties,
    #[serde(default = "default_confidence")]
    pub confidence: f64,
    #[serde(default)]
    pub discovered_at: String,
}

impl Asset {
    /// Parse `discovered_at`, which the engine sends as a naive ISO timestamp.
    pub fn discovered_at_local(&self) -> Option<DateTime<Local>> {
        parse_timestamp(&self.discovered_at)
    }
}

/// A directed, typed link between two assets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    pub id: String,
    pub source_asset_id: String,
    pub target_asset_id: String,
    pub relationship_type: String,
    #[serde(default)]
    pub properties: Properties,
    #[serde(default = "default_confidence")]
    pub confidence: f64,
}

/// Request body for `POST /api/assets` and `PUT /api/assets/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetDraft {
    #[serde(rename = "type")]
    pub asset_type: String,
    pub name: String,
    pub properties: Properties,
    pub confidence: f64,
}

/// Request body for `POST /api/relationships`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipDraft {
    pub source_asset_id: String,
    pub target_asset_id: String,
    pub relationship_type: String,
    pub properties: Properties,
    pub confidence: f64,
}

/// Response of asset mutations
///
/// `POST` returns the full envelope; `PUT` returns the bare asset, which
/// decodes into an envelope with zero counts.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AssetMutation {
    #[serde(default)]
    pub asset: Option<Asset>,
    #[serde(default)]
    pub triggered_matches: u32,
    #[serde(default)]
    pub generated_commands: u32,
}

// ─────────────────────────────────────────────────────────────────
// Methodologies
// ─────────────────────────────────────────────────────────────────

/// Entry of `GET /api/methodologies`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodologySummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub risk_level: Option<String>,
    #[serde(default)]
    pub trigger_count: u32,
    #[serde(default)]
    pub step_count: u32,
    #[serde(default)]
    pub batch_compatible: bool,
}

impl MethodologySummary {
    pub fn category_or_default(&self) -> &str {
        self.category
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or("uncategorized")
    }
}

/// `GET /api/methodologies/{id}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MethodologyDetail {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub risk_level: Option<String>,
    #[serde(default)]
    pub batch_compatible: bool,
    #[serde(default)]
    pub triggers: Vec<TriggerSpec>,
    #[serde(default)]
    pub steps: Vec<MethodologyStep>,
    #[serde(default)]
    pub metadata: MethodologyMetadata,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TriggerSpec {
    pub id: String,
    #[serde(rename = "type", default)]
    pub trigger_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: i64,
    #[serde(default)]
    pub asset_type: Option<String>,
    #[serde(default)]
    pub required_properties: Properties,
    #[serde(default = "default_required_count")]
    pub required_count: u32,
    #[serde(default)]
    pub deduplication: Deduplication,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Deduplication {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub strategy: Option<String>,
    #[serde(default)]
    pub signature_fields: Vec<String>,
    #[serde(default)]
    pub cooldown_seconds: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MethodologyStep {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub command: String,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
    #[serde(default)]
    pub requires_confirmation: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MethodologyMetadata {
    #[serde(default)]
    pub tools: Vec<String>,
    #[serde(default)]
    pub risk_warning: String,
    #[serde(default)]
    pub batch_strategy: String,
    #[serde(default)]
    pub expected_outcomes: Vec<String>,
    #[serde(default)]
    pub common_issues: Vec<String>,
    /// Issue -> remedy
    #[serde(default)]
    pub troubleshooting: BTreeMap<String, Value>,
}

// ─────────────────────────────────────────────────────────────────
// Engine Output
// ─────────────────────────────────────────────────────────────────

/// A record that an asset satisfied a methodology trigger
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TriggerMatch {
    pub trigger_id: String,
    pub methodology_id: String,
    #[serde(default)]
    pub methodology_name: String,
    #[serde(default)]
    pub priority: i64,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub matched_assets: Vec<Asset>,
    #[serde(default)]
    pub matched_at: String,
    #[serde(default)]
    pub executed: bool,
}

/// A generated command, possibly combining several targets
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BatchCommand {
    pub id: String,
    pub methodology_id: String,
    #[serde(default)]
    pub methodology_name: String,
    pub command: String,
    #[serde(default)]
    pub target_count: u32,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub batched: bool,
}

/// `GET /api/stats`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Stats {
    #[serde(default)]
    pub total_assets: u32,
    #[serde(default)]
    pub total_methodologies: u32,
    #[serde(default)]
    pub total_trigger_matches: u32,
    #[serde(default)]
    pub total_batch_commands: u32,
    #[serde(default)]
    pub pending_commands: u32,
    #[serde(default)]
    pub assets_by_type: BTreeMap<String, u32>,
}

/// Canned demo scenarios exposed by `POST /api/demo/scenario/{name}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    NetworkDiscovery,
    NacBypass,
    WebEnumeration,
}

impl Scenario {
    pub const ALL: [Scenario; 3] = [
        Scenario::NetworkDiscovery,
        Scenario::NacBypass,
        Scenario::WebEnumeration,
    ];

    /// Path segment used by the engine
    pub fn slug(&self) -> &'static str {
        match self {
            Scenario::NetworkDiscovery => "network_discovery",
            Scenario::NacBypass => "nac_bypass",
            Scenario::WebEnumeration => "web_enumeration",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Scenario::NetworkDiscovery => "Network Discovery",
            Scenario::NacBypass => "NAC Bypass",
            Scenario::WebEnumeration => "Web Enumeration",
        }
    }
}

fn default_confidence() -> f64 {
    1.0
}

fn default_required_count() -> u32 {
    1
}

/// Parse an engine timestamp.
///
/// The engine emits Python `isoformat()` strings without an offset; those are
/// treated as local time. RFC 3339 strings with an offset are also accepted.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Local>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .and_then(|naive| naive.and_local_timezone(Local).earliest())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use serde_json::json;

    #[test]
    fn test_asset_decodes_engine_shape() {
        let asset: Asset = serde_json::from_value(json!({
            "id": "a1",
            "type": "host",
            "name": "web-01",
            "properties": {"ip": "10.0.0.5", "open_ports": [22, 80]},
            "confidence": 0.8,
            "discovered_at": "2024-03-01T12:30:45.123456",
            "future_field": true
        }))
        .unwrap();

        assert_eq!(asset.asset_type, "host");
        assert_eq!(asset.properties["ip"], "10.0.0.5");
        assert_eq!(asset.confidence, 0.8);
        let ts = asset.discovered_at_local().unwrap();
        assert_eq!(ts.minute(), 30);
    }

    #[test]
    fn test_asset_defaults_missing_fields() {
        let asset: Asset =
            serde_json::from_value(json!({"id": "a1", "type": "host", "name": "x"})).unwrap();
        assert!(asset.properties.is_empty());
        assert_eq!(asset.confidence, 1.0);
        assert!(asset.discovered_at_local().is_none());
    }

    #[test]
    fn test_asset_draft_serializes_type_key() {
        let draft = AssetDraft {
            asset_type: "service".into(),
            name: "ssh".into(),
            properties: Properties::new(),
            confidence: 1.0,
        };
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["type"], "service");
        assert!(value.get("asset_type").is_none());
    }

    #[test]
    fn test_asset_mutation_accepts_post_and_put_shapes() {
        let post: AssetMutation = serde_json::from_value(json!({
            "asset": {"id": "a1", "type": "host", "name": "x"},
            "triggered_matches": 2,
            "generated_commands": 1,
            "matches": []
        }))
        .unwrap();
        assert_eq!(post.triggered_matches, 2);
        assert!(post.asset.is_some());

        let put: AssetMutation =
            serde_json::from_value(json!({"id": "a1", "type": "host", "name": "x"})).unwrap();
        assert_eq!(put.triggered_matches, 0);
    }

    #[test]
    fn test_methodology_detail_decodes_nested_sections() {
        let detail: MethodologyDetail = serde_json::from_value(json!({
            "id": "nmap_scan",
            "name": "Nmap Scan",
            "category": "recon",
            "risk_level": "low",
            "batch_compatible": true,
            "triggers": [{
                "id": "t1",
                "type": "asset_discovered",
                "priority": 5,
                "deduplication": {"enabled": true, "strategy": "signature", "signature_fields": ["cidr"]}
            }],
            "steps": [{"id": "s1", "name": "scan", "command": "nmap {cidr}", "order": 1}],
            "metadata": {"tools": ["nmap"], "troubleshooting": {"slow": "use -T4"}}
        }))
        .unwrap();

        assert_eq!(detail.triggers[0].required_count, 1);
        assert!(detail.triggers[0].deduplication.enabled);
        assert_eq!(detail.steps[0].command, "nmap {cidr}");
        assert_eq!(detail.metadata.tools, vec!["nmap".to_string()]);
        assert_eq!(detail.metadata.troubleshooting["slow"], "use -T4");
    }

    #[test]
    fn test_category_defaults_to_uncategorized() {
        let summary: MethodologySummary =
            serde_json::from_value(json!({"id": "m", "name": "M", "category": ""})).unwrap();
        assert_eq!(summary.category_or_default(), "uncategorized");
    }

    #[test]
    fn test_scenario_slugs() {
        let slugs: Vec<_> = Scenario::ALL.iter().map(Scenario::slug).collect();
        assert_eq!(slugs, ["network_discovery", "nac_bypass", "web_enumeration"]);
    }

    #[test]
    fn test_parse_timestamp_accepts_offset() {
        assert!(parse_timestamp("2024-03-01T12:30:45+00:00").is_some());
        assert!(parse_timestamp("2024-03-01T12:30:45").is_some());
        assert!(parse_timestamp("yesterday").is_none());
    }
}
