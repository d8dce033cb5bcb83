//! # pivot-core - Core Domain Types
//!
//! Foundation crate for the Pivot console. Provides the engine wire models,
//! error handling, logging setup, the property schema registry and the
//! topology styling engine.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, chrono, thiserror, tracing).
//!
//! ## Public API
//!
//! ### Wire Models (`model`)
//! - [`Asset`], [`Relationship`] - Entities tracked by the engine
//! - [`AssetDraft`], [`RelationshipDraft`] - Request bodies for mutations
//! - [`MethodologySummary`], [`MethodologyDetail`] - Playbook library entries
//! - [`TriggerMatch`], [`BatchCommand`], [`Stats`] - Engine output
//!
//! ### Schema Registry (`schema`)
//! - [`schema_for()`] - Ordered field descriptors for an asset type
//! - [`relationship_schema()`] - Field descriptors for a relationship type
//! - [`FieldDescriptor`], [`FieldKind`] - One typed property slot
//!
//! ### Topology (`topology`)
//! - [`classify_zone()`] - Security zone of an asset
//! - [`style_for_type()`], [`style_for_relationship()`] - Total style lookups
//! - [`tooltip()`], [`adjust_color()`]
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use pivot_core::prelude::*;
//! ```

pub mod error;
pub mod format;
pub mod logging;
pub mod model;
pub mod schema;
pub mod topology;

/// Prelude for common imports used throughout all Pivot crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

pub use error::{Error, Result, ResultExt};
pub use format::{
    category_icon, confidence_percent, format_key, format_value, main_properties, truncate,
};
pub use model::{
    parse_timestamp, Asset, AssetDraft, AssetMutation, BatchCommand, Deduplication,
    MethodologyDetail, MethodologyMetadata, MethodologyStep, MethodologySummary, Properties,
    Relationship, RelationshipDraft, Scenario, Stats, TriggerMatch, TriggerSpec,
};
pub use schema::{
    asset_types, relationship_schema, relationship_types, schema_for, FieldDescriptor, FieldKind,
};
pub use topology::{
    adjust_color, classify_zone, node_style, style_for_relationship, style_for_type, tooltip,
    AssetKind, EdgeStyle, LineStyle, NodeShape, NodeStyle, RelationshipKind, Rgb, TypeStyle, Zone,
};
