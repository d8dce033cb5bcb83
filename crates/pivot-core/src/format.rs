//! Display helpers shared by the terminal views and headless output

use serde_json::Value;

use crate::model::Asset;

/// Maximum properties shown on an asset row
pub const MAIN_PROPERTY_LIMIT: usize = 5;

/// `network_segment` -> `Network Segment`
pub fn format_key(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render a property value for humans.
///
/// Booleans become check marks, arrays are joined with `", "` (`None` when
/// empty), objects are shown as compact JSON and null or empty strings as
/// `N/A`.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Bool(true) => "✓ Yes".to_string(),
        Value::Bool(false) => "✗ No".to_string(),
        Value::Array(items) if items.is_empty() => "None".to_string(),
        Value::Array(items) => items.iter().map(plain).collect::<Vec<_>>().join(", "),
        Value::Object(_) => value.to_string(),
        Value::Null => "N/A".to_string(),
        Value::String(s) if s.is_empty() => "N/A".to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
    }
}

/// Scalar to text without JSON quoting
fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// `0.85` -> `85%`
pub fn confidence_percent(confidence: f64) -> String {
    format!("{}%", (confidence.clamp(0.0, 1.0) * 100.0).round() as u32)
}

/// Per-type keys shown first on an asset row
fn priority_keys(asset_type: &str) -> &'static [&'static str] {
    match asset_type {
        "network_segment" => &["cidr", "vlan", "nac_enabled", "access_level"],
        "host" => &["ip", "hostname", "os", "status"],
        "service" => &["host", "port", "protocol", "url"],
        "credential" => &["username", "type", "domain", "valid"],
        "web_application" => &["url", "technology", "version"],
        "database" => &["host", "port", "engine"],
        "user_account" => &["username", "domain", "privileged"],
        "vulnerability" => &["cve", "severity", "cvss_score"],
        _ => &[],
    }
}

/// Up to [`MAIN_PROPERTY_LIMIT`] properties, type-priority keys first.
pub fn main_properties(asset: &Asset) -> Vec<(&str, &Value)> {
    let priorities = priority_keys(&asset.asset_type);
    let (mut first, rest): (Vec<_>, Vec<_>) = asset
        .properties
        .iter()
        .map(|(k, v)| (k.as_str(), v))
        .partition(|(k, _)| priorities.contains(k));
    first.extend(rest);
    first.truncate(MAIN_PROPERTY_LIMIT);
    first
}

/// Icon for a methodology category
pub fn category_icon(category: &str) -> &'static str {
    match category {
        "recon" | "reconnaissance" => "⌕",
        "enumeration" => "☰",
        "exploitation" => "✸",
        "post_exploitation" => "◉",
        "lateral_movement" => "↔",
        _ => "▤",
    }
}

/// Truncate to `max` characters, ending with `…` when shortened.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
