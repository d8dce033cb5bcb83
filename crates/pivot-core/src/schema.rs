//! Property schemas for asset and relationship types.
//!
//! Each known type maps to an ordered list of [`FieldDescriptor`]s that the
//! form engine turns into editable controls. The registry is static and built
//! on first access.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::error::{Error, Result};

/// Kind of editable control a field renders as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Text,
    Number,
    Boolean,
    Select,
    Textarea,
    Password,
    Email,
    /// Repeated group of `subfields`
    Array,
}

impl FieldKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
            FieldKind::Select => "select",
            FieldKind::Textarea => "textarea",
            FieldKind::Password => "password",
            FieldKind::Email => "email",
            FieldKind::Array => "array",
        }
    }

    /// Kinds edited as free text
    pub fn is_textual(&self) -> bool {
        matches!(
            self,
            FieldKind::Text
                | FieldKind::Number
                | FieldKind::Textarea
                | FieldKind::Password
                | FieldKind::Email
        )
    }
}

/// One typed property slot in a schema
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub placeholder: Option<&'static str>,
    pub required: bool,
    /// Choices for [`FieldKind::Select`]
    pub options: Vec<&'static str>,
    /// Item shape for [`FieldKind::Array`]
    pub subfields: Vec<FieldDescriptor>,
    /// Text field whose value is a comma separated list of strings
    pub comma_list: bool,
}

impl FieldDescriptor {
    pub fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            placeholder: None,
            required: false,
            options: Vec::new(),
            subfields: Vec::new(),
            comma_list: false,
        }
    }

    pub fn text(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    pub fn number(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Number)
    }

    pub fn boolean(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Boolean)
    }

    pub fn textarea(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Textarea)
    }

    pub fn password(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Password)
    }

    pub fn email(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Email)
    }

    pub fn select(name: &'static str, label: &'static str, options: &[&'static str]) -> Self {
        let mut field = Self::new(name, label, FieldKind::Select);
        field.options = options.to_vec();
        field
    }

    pub fn array(name: &'static str, label: &'static str, subfields: Vec<FieldDescriptor>) -> Self {
        let mut field = Self::new(name, label, FieldKind::Array);
        field.subfields = subfields;
        field
    }

    pub fn placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Mark a text field as a comma separated list
    pub fn comma_list(mut self) -> Self {
        self.comma_list = true;
        self
    }

    /// Check the descriptor invariants, recursing into subfields.
    pub fn validate(&self) -> Result<()> {
        match self.kind {
            FieldKind::Select if self.options.is_empty() => Err(Error::config(format!(
                "select field '{}' has no options",
                self.name
            ))),
            FieldKind::Array if self.subfields.is_empty() => Err(Error::config(format!(
                "array field '{}' has no subfields",
                self.name
            ))),
            FieldKind::Array => {
                if let Some(nested) = self.subfields.iter().find(|f| f.kind == FieldKind::Array) {
                    return Err(Error::config(format!(
                        "array field '{}' nests array '{}'",
                        self.name, nested.name
                    )));
                }
                self.subfields.iter().try_for_each(FieldDescriptor::validate)
            }
            _ => Ok(()),
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Registry
// ─────────────────────────────────────────────────────────────────

/// Asset types with curated schemas, in the order the type picker shows them
const ASSET_TYPES: &[&str] = &[
    "network_segment",
    "host",
    "service",
    "web_application",
    "application",
    "credential",
    "firewall",
    "database",
    "user_account",
    "vulnerability",
];

/// Relationship vocabulary understood by the engine
const RELATIONSHIP_TYPES: &[&str] = &[
    "contains",
    "member_of",
    "installed_on",
    "runs_on",
    "hosted_on",
    "connected_to",
    "can_pivot_to",
    "routes_to",
    "accessible_from",
    "blocked_by",
    "allowed_by",
    "allows_access_to",
    "requires",
    "works_on",
    "grants_access_to",
    "has_permission_on",
    "exposes",
    "exploits",
    "enables",
    "trusts",
    "domain_member",
    "owns",
    "manages",
    "communicates_with",
    "depends_on",
    "replicates_to",
];

type Registry = HashMap<&'static str, Vec<FieldDescriptor>>;

static ASSET_SCHEMAS: LazyLock<Registry> = LazyLock::new(build_asset_schemas);
static RELATIONSHIP_SCHEMAS: LazyLock<Registry> = LazyLock::new(build_relationship_schemas);

/// Schema for an asset type. Unknown types yield an empty slice.
pub fn schema_for(asset_type: &str) -> &'static [FieldDescriptor] {
    ASSET_SCHEMAS
        .get(asset_type)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Schema for a relationship type. Unknown types yield an empty slice.
pub fn relationship_schema(relationship_type: &str) -> &'static [FieldDescriptor] {
    RELATIONSHIP_SCHEMAS
        .get(relationship_type)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

pub fn asset_types() -> &'static [&'static str] {
    ASSET_TYPES
}

pub fn relationship_types() -> &'static [&'static str] {
    RELATIONSHIP_TYPES
}

fn build_asset_schemas() -> Registry {
    use FieldDescriptor as F;

    let mut schemas = Registry::new();

    schemas.insert(
        "network_segment",
        vec![
            F::text("cidr", "CIDR").placeholder("10.0.0.0/24").required(),
            F::text("vlan", "VLAN").placeholder("100"),
            F::boolean("nac_enabled", "NAC Enabled"),
            F::text("nac_type", "NAC Type").placeholder("802.1x, web_auth, mac_auth"),
            F::select(
                "access_level",
                "Access Level",
                &["blocked", "limited", "partial", "full"],
            ),
            F::boolean("physical_access", "Physical Access"),
            F::textarea("description", "Description"),
        ],
    );

    schemas.insert(
        "host",
        vec![
            F::text("ip", "IP Address").placeholder("192.168.1.10").required(),
            F::text("hostname", "Hostname").placeholder("server-01"),
            F::text("mac_address", "MAC Address").placeholder("00:11:22:33:44:55"),
            F::text("os", "Operating System").placeholder("Ubuntu 20.04"),
            F::text("os_version", "OS Version"),
            F::text("open_ports", "Open Ports")
                .placeholder("22,80,443")
                .comma_list(),
            F::select("status", "Status", &["online", "offline", "unknown"]),
            F::array(
                "network_interfaces",
                "Network Interfaces",
                vec![
                    F::text("name", "Name").placeholder("eth0"),
                    F::text("ip", "IP").placeholder("10.0.0.5"),
                    F::text("mac", "MAC"),
                    F::text("network", "Network").placeholder("10.0.0.0/24"),
                    F::select("status", "Status", &["up", "down", "unknown"]),
                ],
            ),
        ],
    );

    schemas.insert(
        "service",
        vec![
            F::text("host", "Host").placeholder("192.168.1.10"),
            F::number("port", "Port").placeholder("80").required(),
            F::select("protocol", "Protocol", &["tcp", "udp"]),
            F::text("service_name", "Service Name").placeholder("http"),
            F::text("version", "Version"),
            F::text("url", "URL").placeholder("http://example.com"),
            F::boolean("requires_auth", "Requires Authentication"),
        ],
    );

    schemas.insert(
        "web_application",
        vec![
            F::text("url", "URL").placeholder("https://example.com").required(),
            F::text("technology", "Technology").placeholder("WordPress, Django"),
            F::text("version", "Version"),
            F::select(
                "authentication",
                "Authentication",
                &["none", "basic", "form", "oauth", "saml"],
            ),
            F::boolean("cms_detected", "CMS Detected"),
            F::boolean("admin_panel_found", "Admin Panel Found"),
        ],
    );

    schemas.insert(
        "application",
        vec![
            F::text("vendor", "Vendor"),
            F::text("version", "Version"),
            F::text("install_path", "Install Path").placeholder("C:\\Program Files\\App"),
            F::text("running_as", "Running As").placeholder("SYSTEM"),
            F::text("listening_ports", "Listening Ports")
                .placeholder("8080,8443")
                .comma_list(),
            F::boolean("auto_start", "Starts Automatically"),
        ],
    );

    schemas.insert(
        "credential",
        vec![
            F::text("username", "Username").placeholder("admin").required(),
            F::password("password", "Password").placeholder("password123"),
            F::text("hash", "Hash"),
            F::select("type", "Type", &["local", "domain", "database", "service"]),
            F::text("domain", "Domain"),
            F::text("source", "Source").placeholder("credential_dump, social_engineering"),
            F::boolean("tested", "Tested"),
            F::boolean("valid", "Valid"),
        ],
    );

    schemas.insert(
        "firewall",
        vec![
            F::text("ip", "Management IP").placeholder("10.0.0.1"),
            F::text("vendor", "Vendor").placeholder("pfSense, Palo Alto"),
            F::text("model", "Model"),
            F::text("management_url", "Management URL"),
            F::select("default_policy", "Default Policy", &["allow", "deny"]),
            F::number("rule_count", "Rule Count"),
            F::boolean("public_facing", "Public Facing"),
        ],
    );

    schemas.insert(
        "database",
        vec![
            F::text("host", "Host").placeholder("10.0.0.20"),
            F::number("port", "Port").placeholder("5432"),
            F::select(
                "engine",
                "Engine",
                &["mysql", "postgresql", "mssql", "oracle", "mongodb", "redis", "other"],
            ),
            F::text("version", "Version"),
            F::text("databases", "Databases")
                .placeholder("users, billing")
                .comma_list(),
            F::boolean("requires_auth", "Requires Authentication"),
        ],
    );

    schemas.insert(
        "user_account",
        vec![
            F::text("username", "Username").placeholder("jdoe").required(),
            F::text("domain", "Domain").placeholder("CORP"),
            F::email("email", "Email").placeholder("jdoe@example.com"),
            F::text("groups", "Groups")
                .placeholder("Domain Users, IT Admins")
                .comma_list(),
            F::boolean("privileged", "Privileged"),
            F::boolean("enabled", "Enabled"),
            F::text("last_logon", "Last Logon"),
        ],
    );

    schemas.insert(
        "vulnerability",
        vec![
            F::text("cve", "CVE").placeholder("CVE-2021-44228"),
            F::select(
                "severity",
                "Severity",
                &["critical", "high", "medium", "low", "info"],
            ),
            F::number("cvss_score", "CVSS Score").placeholder("9.8"),
            F::text("affected_component", "Affected Component"),
            F::boolean("exploitable", "Exploitable"),
            F::text("tools", "Tools").placeholder("metasploit, nuclei").comma_list(),
            F::textarea("description", "Description"),
        ],
    );

    schemas
}

fn build_relationship_schemas() -> Registry {
    use FieldDescriptor as F;

    let mut schemas = Registry::new();

    schemas.insert(
        "can_pivot_to",
        vec![
            F::select(
                "method",
                "Method",
                &["ssh", "rdp", "smb", "winrm", "psexec", "tunnel", "other"],
            ),
            F::text("credential_used", "Credential Used"),
            F::number("port", "Port"),
            F::boolean("verified", "Verified"),
            F::textarea("notes", "Notes"),
        ],
    );

    schemas.insert(
        "connected_to",
        vec![
            F::text("interface", "Interface").placeholder("eth0"),
            F::select("protocol", "Protocol", &["tcp", "udp", "icmp", "any"]),
            F::text("ports", "Ports").placeholder("22,443").comma_list(),
        ],
    );

    schemas.insert(
        "hosted_on",
        vec![
            F::number("port", "Port"),
            F::select("protocol", "Protocol", &["tcp", "udp"]),
        ],
    );

    schemas.insert(
        "routes_to",
        vec![
            F::text("via", "Via").placeholder("10.0.0.1"),
            F::number("metric", "Metric"),
        ],
    );

    schemas.insert(
        "has_permission_on",
        vec![
            F::select(
                "access_type",
                "Access Type",
                &["read", "write", "execute", "admin"],
            ),
            F::text("permissions", "Permissions")
                .placeholder("SeDebugPrivilege, GenericAll")
                .comma_list(),
        ],
    );

    schemas.insert(
        "member_of",
        vec![
            F::text("role", "Role"),
            F::boolean("inherited", "Inherited"),
        ],
    );

    schemas.insert(
        "exploits",
        vec![
            F::text("cve", "CVE"),
            F::text("exploit_name", "Exploit"),
            F::boolean("successful", "Successful"),
        ],
    );

    schemas.insert(
        "grants_access_to",
        vec![
            F::select(
                "access_level",
                "Access Level",
                &["limited", "partial", "full"],
            ),
            F::boolean("verified", "Verified"),
        ],
    );

    schemas.insert(
        "blocked_by",
        vec![
            F::text("rule", "Rule"),
            F::text("ports", "Ports").comma_list(),
        ],
    );

    schemas.insert(
        "trusts",
        vec![
            F::select(
                "direction",
                "Direction",
                &["one_way", "two_way"],
            ),
            F::boolean("transitive", "Transitive"),
        ],
    );

    schemas
}
