//! Network topology styling
//!
//! Classifies assets into security zones and visual node styles, and
//! relationships into edge styles. Every lookup is total: unknown types land
//! on a fallback arm, so every asset and edge renders with some style.

use serde_json::Value;

use crate::format::{format_key, format_value, truncate};
use crate::model::Asset;

/// Properties listed in a tooltip before the `+N more` line
pub const TOOLTIP_MAX_PROPERTIES: usize = 5;

/// Characters kept per tooltip value
pub const TOOLTIP_MAX_VALUE_CHARS: usize = 30;

// ─────────────────────────────────────────────────────────────────
// Colors
// ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (leading `#` optional)
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        Some(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Shift every channel by `amount`, saturating at 0 and 255.
///
/// Positive amounts lighten, negative amounts darken.
pub fn adjust_color(color: Rgb, amount: i16) -> Rgb {
    let shift = |channel: u8| (i32::from(channel) + i32::from(amount)).clamp(0, 255) as u8;
    Rgb::new(shift(color.r), shift(color.g), shift(color.b))
}

const GRAY: Rgb = Rgb::new(0x6b, 0x72, 0x80);
const RED: Rgb = Rgb::new(0xef, 0x44, 0x44);
const AMBER: Rgb = Rgb::new(0xf5, 0x9e, 0x0b);
const BLUE: Rgb = Rgb::new(0x3b, 0x82, 0xf6);
const GREEN: Rgb = Rgb::new(0x10, 0xb9, 0x81);
const PURPLE: Rgb = Rgb::new(0x8b, 0x5c, 0xf6);
const CYAN: Rgb = Rgb::new(0x06, 0xb6, 0xd4);

// ─────────────────────────────────────────────────────────────────
// Zones
// ─────────────────────────────────────────────────────────────────

/// Coarse security-topology grouping used for diagram columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Zone {
    Internet,
    Dmz,
    Internal,
    Management,
    Identity,
}

impl Zone {
    /// Diagram column order
    pub const ALL: [Zone; 5] = [
        Zone::Internet,
        Zone::Dmz,
        Zone::Internal,
        Zone::Management,
        Zone::Identity,
    ];

    /// Case-insensitive parse of an explicit `zone` property
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "internet" | "external" => Some(Zone::Internet),
            "dmz" | "perimeter" => Some(Zone::Dmz),
            "internal" => Some(Zone::Internal),
            "management" | "mgmt" => Some(Zone::Management),
            "identity" => Some(Zone::Identity),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Zone::Internet => "internet",
            Zone::Dmz => "dmz",
            Zone::Internal => "internal",
            Zone::Management => "management",
            Zone::Identity => "identity",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Zone::Internet => "Internet",
            Zone::Dmz => "DMZ",
            Zone::Internal => "Internal",
            Zone::Management => "Management",
            Zone::Identity => "Identity",
        }
    }

    /// Column tint
    pub fn color(&self) -> Rgb {
        match self {
            Zone::Internet => RED,
            Zone::Dmz => AMBER,
            Zone::Internal => BLUE,
            Zone::Management => PURPLE,
            Zone::Identity => GREEN,
        }
    }
}

/// Place an asset in a zone. First match wins:
///
/// 1. explicit `properties.zone` naming a known zone
/// 2. type or name mentions internet, cloud or external
/// 3. name mentions dmz or perimeter, or `properties.public_facing` is truthy
/// 4. name mentions mgmt, management or admin
/// 5. type mentions user, credential or identity
/// 6. internal
pub fn classify_zone(asset: &Asset) -> Zone {
    if let Some(zone) = asset
        .properties
        .get("zone")
        .and_then(Value::as_str)
        .and_then(Zone::parse)
    {
        return zone;
    }

    let ty = asset.asset_type.to_lowercase();
    let name = asset.name.to_lowercase();
    let mentions = |haystack: &str, needles: &[&str]| needles.iter().any(|n| haystack.contains(n));

    if mentions(&ty, &["internet", "cloud", "external"])
        || mentions(&name, &["internet", "cloud", "external"])
    {
        Zone::Internet
    } else if mentions(&name, &["dmz", "perimeter"])
        || asset.properties.get("public_facing").is_some_and(is_truthy)
    {
        Zone::Dmz
    } else if mentions(&name, &["mgmt", "management", "admin"]) {
        Zone::Management
    } else if mentions(&ty, &["user", "credential", "identity"]) {
        Zone::Identity
    } else {
        Zone::Internal
    }
}

/// Loose truthiness for flags that arrive as bools, numbers or strings
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => {
            let s = s.trim().to_lowercase();
            !s.is_empty() && !matches!(s.as_str(), "false" | "0" | "no" | "off")
        }
        Value::Array(items) => !items.is_empty(),
        Value::Object(_) => true,
    }
}

// ─────────────────────────────────────────────────────────────────
// Node Styles
// ─────────────────────────────────────────────────────────────────

/// Asset type vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    NetworkSegment,
    NetworkInterface,
    Firewall,
    Router,
    Host,
    Service,
    WebApplication,
    Database,
    DomainController,
    Application,
    FileShare,
    File,
    Credential,
    Certificate,
    Secret,
    UserAccount,
    Group,
    Vulnerability,
    Finding,
    Domain,
    Other,
    Unknown,
}

impl AssetKind {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "network_segment" => AssetKind::NetworkSegment,
            "network_interface" => AssetKind::NetworkInterface,
            "firewall" => AssetKind::Firewall,
            "router" => AssetKind::Router,
            "host" => AssetKind::Host,
            "service" => AssetKind::Service,
            "web_application" => AssetKind::WebApplication,
            "database" => AssetKind::Database,
            "domain_controller" => AssetKind::DomainController,
            "application" => AssetKind::Application,
            "file_share" => AssetKind::FileShare,
            "file" => AssetKind::File,
            "credential" => AssetKind::Credential,
            "certificate" => AssetKind::Certificate,
            "secret" => AssetKind::Secret,
            "user_account" => AssetKind::UserAccount,
            "group" => AssetKind::Group,
            "vulnerability" => AssetKind::Vulnerability,
            "finding" => AssetKind::Finding,
            "domain" => AssetKind::Domain,
            "other" => AssetKind::Other,
            _ => AssetKind::Unknown,
        }
    }
}

/// Outline drawn around a diagram node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeShape {
    Rectangle,
    Rounded,
    Diamond,
    Hexagon,
    Cylinder,
    Ellipse,
}

impl NodeShape {
    /// Opening and closing characters wrapped around the node label
    pub fn brackets(&self) -> (char, char) {
        match self {
            NodeShape::Rectangle => ('[', ']'),
            NodeShape::Rounded => ('(', ')'),
            NodeShape::Diamond => ('<', '>'),
            NodeShape::Hexagon => ('{', '}'),
            NodeShape::Cylinder => ('|', '|'),
            NodeShape::Ellipse => ('«', '»'),
        }
    }
}

/// Visual style derived from an asset type alone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeStyle {
    pub color: Rgb,
    pub shape: NodeShape,
    pub icon: &'static str,
}

/// Full node style for one asset, recomputed every render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeStyle {
    pub color: Rgb,
    pub shape: NodeShape,
    pub icon: &'static str,
    pub zone: Zone,
}

/// Style for an asset type string. Unknown strings get the neutral fallback.
pub fn style_for_type(asset_type: &str) -> TypeStyle {
    use NodeShape::*;

    let (hex, shape, icon) = match AssetKind::parse(asset_type) {
        AssetKind::NetworkSegment => ("#3b82f6", Ellipse, "◎"),
        AssetKind::NetworkInterface => ("#60a5fa", Rounded, "⌁"),
        AssetKind::Firewall => ("#ef4444", Hexagon, "▥"),
        AssetKind::Router => ("#f97316", Diamond, "⇄"),
        AssetKind::Host => ("#10b981", Rectangle, "▣"),
        AssetKind::Service => ("#8b5cf6", Rounded, "⚙"),
        AssetKind::WebApplication => ("#06b6d4", Rounded, "◍"),
        AssetKind::Database => ("#ec4899", Cylinder, "≣"),
        AssetKind::DomainController => ("#eab308", Hexagon, "♜"),
        AssetKind::Application => ("#6366f1", Rectangle, "▤"),
        AssetKind::FileShare => ("#14b8a6", Cylinder, "⊟"),
        AssetKind::File => ("#94a3b8", Rectangle, "▯"),
        AssetKind::Credential => ("#f59e0b", Diamond, "⚿"),
        AssetKind::Certificate => ("#a3e635", Diamond, "⊛"),
        AssetKind::Secret => ("#f43f5e", Diamond, "✱"),
        AssetKind::UserAccount => ("#84cc16", Ellipse, "☺"),
        AssetKind::Group => ("#22c55e", Ellipse, "☷"),
        AssetKind::Vulnerability => ("#dc2626", Diamond, "⚠"),
        AssetKind::Finding => ("#fb7185", Diamond, "✦"),
        AssetKind::Domain => ("#0ea5e9", Hexagon, "⌂"),
        AssetKind::Other | AssetKind::Unknown => ("#6b7280", Rectangle, "•"),
    };

    TypeStyle {
        color: Rgb::from_hex(hex).unwrap_or(GRAY),
        shape,
        icon,
    }
}

/// Complete style for one asset: type style plus its zone
pub fn node_style(asset: &Asset) -> NodeStyle {
    let base = style_for_type(&asset.asset_type);
    NodeStyle {
        color: base.color,
        shape: base.shape,
        icon: base.icon,
        zone: classify_zone(asset),
    }
}

// ─────────────────────────────────────────────────────────────────
// Edge Styles
// ─────────────────────────────────────────────────────────────────

/// Relationship type vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationshipKind {
    Contains,
    MemberOf,
    InstalledOn,
    RunsOn,
    HostedOn,
    ConnectedTo,
    CanPivotTo,
    RoutesTo,
    AccessibleFrom,
    BlockedBy,
    AllowedBy,
    AllowsAccessTo,
    Requires,
    WorksOn,
    GrantsAccessTo,
    HasPermissionOn,
    Exposes,
    Exploits,
    Enables,
    Trusts,
    DomainMember,
    Owns,
    Manages,
    CommunicatesWith,
    DependsOn,
    ReplicatesTo,
    Unknown,
}

impl RelationshipKind {
    pub fn parse(raw: &str) -> Self {
        use RelationshipKind::*;

        match raw.trim().to_lowercase().as_str() {
            "contains" => Contains,
            "member_of" => MemberOf,
            "installed_on" => InstalledOn,
            "runs_on" => RunsOn,
            "hosted_on" => HostedOn,
            "connected_to" => ConnectedTo,
            "can_pivot_to" => CanPivotTo,
            "routes_to" => RoutesTo,
            "accessible_from" => AccessibleFrom,
            "blocked_by" => BlockedBy,
            "allowed_by" => AllowedBy,
            "allows_access_to" => AllowsAccessTo,
            "requires" => Requires,
            "works_on" => WorksOn,
            "grants_access_to" => GrantsAccessTo,
            "has_permission_on" => HasPermissionOn,
            "exposes" => Exposes,
            "exploits" => Exploits,
            "enables" => Enables,
            "trusts" => Trusts,
            "domain_member" => DomainMember,
            "owns" => Owns,
            "manages" => Manages,
            "communicates_with" => CommunicatesWith,
            "depends_on" => DependsOn,
            "replicates_to" => ReplicatesTo,
            _ => Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineStyle {
    Solid,
    Dashed,
    Dotted,
    Bold,
}

impl LineStyle {
    /// Glyph repeated to draw the edge shaft
    pub fn glyph(&self) -> &'static str {
        match self {
            LineStyle::Solid => "─",
            LineStyle::Dashed => "╌",
            LineStyle::Dotted => "┈",
            LineStyle::Bold => "━",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeStyle {
    pub color: Rgb,
    pub line: LineStyle,
    /// Edges that represent an attack path are emphasized
    pub emphasized: bool,
}

/// Style for a relationship type string. Unknown strings get a plain gray line.
pub fn style_for_relationship(relationship_type: &str) -> EdgeStyle {
    use RelationshipKind::*;

    let (color, line, emphasized) = match RelationshipKind::parse(relationship_type) {
        CanPivotTo | Exploits | Enables => (RED, LineStyle::Bold, true),
        BlockedBy => (RED, LineStyle::Dashed, false),
        ConnectedTo | RoutesTo | CommunicatesWith | AccessibleFrom => {
            (BLUE, LineStyle::Solid, false)
        }
        GrantsAccessTo | HasPermissionOn | AllowsAccessTo | AllowedBy | WorksOn | Trusts
        | Manages => (AMBER, LineStyle::Dashed, false),
        Contains | MemberOf | DomainMember | InstalledOn | RunsOn | HostedOn | Owns => {
            (GRAY, LineStyle::Dotted, false)
        }
        Requires | DependsOn | ReplicatesTo => (PURPLE, LineStyle::Solid, false),
        Exposes => (CYAN, LineStyle::Dashed, false),
        Unknown => (GRAY, LineStyle::Solid, false),
    };

    EdgeStyle {
        color,
        line,
        emphasized,
    }
}

// ─────────────────────────────────────────────────────────────────
// Tooltips
// ─────────────────────────────────────────────────────────────────

/// Short multi-line description of an asset for the diagram side panel.
///
/// Shows at most [`TOOLTIP_MAX_PROPERTIES`] properties with values cut to
/// [`TOOLTIP_MAX_VALUE_CHARS`], followed by `+N more` when some were left out.
pub fn tooltip(asset: &Asset) -> String {
    let mut lines = vec![format!("{} ({})", asset.name, format_key(&asset.asset_type))];

    for (key, value) in asset.properties.iter().take(TOOLTIP_MAX_PROPERTIES) {
        lines.push(format!(
            "{}: {}",
            format_key(key),
            truncate(&format_value(value), TOOLTIP_MAX_VALUE_CHARS)
        ));
    }

    let omitted = asset
        .properties
        .len()
        .saturating_sub(TOOLTIP_MAX_PROPERTIES);
    if omitted > 0 {
        lines.push(format!("+{omitted} more"));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn asset(asset_type: &str, name: &str, properties: Value) -> Asset {
        Asset {
            id: "a1".into(),
            asset_type: asset_type.into(),
            name: name.into(),
            properties: properties.as_object().cloned().unwrap_or_default(),
            confidence: 1.0,
            discovered_at: String::new(),
        }
    }

    #[test]
    fn test_explicit_zone_wins() {
        let a = asset("credential", "internet-gw", json!({"zone": "MGMT"}));
        assert_eq!(classify_zone(&a), Zone::Management);
    }

    #[test]
    fn test_unrecognized_explicit_zone_falls_through() {
        let a = asset("host", "dmz-web", json!({"zone": "basement"}));
        assert_eq!(classify_zone(&a), Zone::Dmz);
    }

    #[test]
    fn test_internet_beats_dmz() {
        let a = asset("host", "external-dmz-proxy", json!({}));
        assert_eq!(classify_zone(&a), Zone::Internet);

        let a = asset("cloud_bucket", "files", json!({}));
        assert_eq!(classify_zone(&a), Zone::Internet);
    }

    #[test]
    fn test_public_facing_is_dmz() {
        let a = asset("host", "web-01", json!({"public_facing": true}));
        assert_eq!(classify_zone(&a), Zone::Dmz);

        let a = asset("host", "web-01", json!({"public_facing": "false"}));
        assert_eq!(classify_zone(&a), Zone::Internal);
    }

    #[test]
    fn test_management_and_identity() {
        assert_eq!(
            classify_zone(&asset("host", "Admin-Jump", json!({}))),
            Zone::Management
        );
        assert_eq!(
            classify_zone(&asset("user_account", "jdoe", json!({}))),
            Zone::Identity
        );
        assert_eq!(
            classify_zone(&asset("credential", "svc", json!({}))),
            Zone::Identity
        );
    }

    #[test]
    fn test_classify_zone_defaults_to_internal() {
        for ty in ["", "host", "???", "☃"] {
            assert_eq!(classify_zone(&asset(ty, "box", json!({}))), Zone::Internal);
        }
    }

    #[test]
    fn test_style_for_type_is_total() {
        let fallback = style_for_type("definitely_not_a_type");
        assert_eq!(fallback.icon, "•");
        assert_eq!(style_for_type(""), fallback);
        assert_ne!(style_for_type("host"), fallback);
        assert_eq!(style_for_type("HOST"), style_for_type("host"));
    }

    #[test]
    fn test_style_for_relationship_is_total() {
        let unknown = style_for_relationship("befriends");
        assert_eq!(unknown.line, LineStyle::Solid);
        assert!(!unknown.emphasized);
        assert!(style_for_relationship("can_pivot_to").emphasized);
        assert_eq!(style_for_relationship("").color, unknown.color);
    }

    #[test]
    fn test_node_style_carries_zone() {
        let style = node_style(&asset("firewall", "perimeter-fw", json!({})));
        assert_eq!(style.zone, Zone::Dmz);
        assert_eq!(style.shape, NodeShape::Hexagon);
    }

    #[test]
    fn test_adjust_color_saturates() {
        let c = Rgb::new(250, 5, 128);
        assert_eq!(adjust_color(c, 20), Rgb::new(255, 25, 148));
        assert_eq!(adjust_color(c, -20), Rgb::new(230, 0, 108));
        assert_eq!(adjust_color(c, i16::MAX), Rgb::new(255, 255, 255));
        assert_eq!(adjust_color(c, i16::MIN), Rgb::new(0, 0, 0));
    }

    #[test]
    fn test_adjust_color_zero_is_identity() {
        for c in [Rgb::new(0, 0, 0), Rgb::new(255, 255, 255), Rgb::new(12, 200, 99)] {
            assert_eq!(adjust_color(c, 0), c);
        }
    }

    #[test]
    fn test_hex_round_trip() {
        let c = Rgb::from_hex("#3b82f6").unwrap();
        assert_eq!(c, Rgb::new(0x3b, 0x82, 0xf6));
        assert_eq!(c.to_hex(), "#3b82f6");
        assert!(Rgb::from_hex("#xyzxyz").is_none());
        assert!(Rgb::from_hex("#fff").is_none());
    }

    #[test]
    fn test_tooltip_caps_properties() {
        let a = asset(
            "host",
            "web-01",
            json!({
                "a": 1, "b": 2, "c": 3, "d": 4, "e": 5, "f": 6, "g": 7
            }),
        );
        let text = tooltip(&a);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "web-01 (Host)");
        assert_eq!(lines.len(), 1 + 5 + 1);
        assert_eq!(lines.last(), Some(&"+2 more"));
    }

    #[test]
    fn test_tooltip_truncates_values() {
        let long = "x".repeat(80);
        let a = asset("host", "h", json!({ "banner": long }));
        let text = tooltip(&a);
        let value = text.lines().nth(1).unwrap().trim_start_matches("Banner: ");
        assert_eq!(value.chars().count(), TOOLTIP_MAX_VALUE_CHARS);
        assert!(value.ends_with('…'));
        assert!(!text.contains("more"));
    }
}
