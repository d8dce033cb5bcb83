//! Engine API operations
//!
//! This module provides the [`EngineApi`] trait, the single seam between the
//! application layer and the remote methodology engine. The polling
//! synchronizer and every user-triggered mutation go through it.

use pivot_core::prelude::*;
use pivot_core::{
    Asset, AssetDraft, AssetMutation, BatchCommand, MethodologyDetail, MethodologySummary,
    Relationship, RelationshipDraft, Scenario, Stats, TriggerMatch,
};

/// Remote methodology engine operations
///
/// Implementations must reject a relationship whose source and target are
/// the same asset without sending anything; see [`check_relationship`].
#[trait_variant::make(EngineApi: Send)]
pub trait LocalEngineApi {
    /// `GET /api/stats`
    async fn stats(&self) -> Result<Stats>;

    /// `GET /api/assets`
    async fn assets(&self) -> Result<Vec<Asset>>;

    /// `GET /api/methodologies`
    async fn methodologies(&self) -> Result<Vec<MethodologySummary>>;

    /// `GET /api/methodologies/{id}`
    async fn methodology(&self, id: &str) -> Result<MethodologyDetail>;

    /// `GET /api/trigger-matches`
    async fn trigger_matches(&self) -> Result<Vec<TriggerMatch>>;

    /// `GET /api/batch-commands`
    async fn batch_commands(&self) -> Result<Vec<BatchCommand>>;

    /// `GET /api/relationships`
    async fn relationships(&self) -> Result<Vec<Relationship>>;

    /// `POST /api/assets`
    async fn create_asset(&self, draft: &AssetDraft) -> Result<AssetMutation>;

    /// `PUT /api/assets/{id}`
    async fn update_asset(&self, id: &str, draft: &AssetDraft) -> Result<AssetMutation>;

    /// `DELETE /api/assets/{id}`
    async fn delete_asset(&self, id: &str) -> Result<()>;

    /// `POST /api/relationships`
    async fn create_relationship(&self, draft: &RelationshipDraft) -> Result<Relationship>;

    /// `POST /api/demo/scenario/{name}`
    async fn run_scenario(&self, scenario: Scenario) -> Result<()>;

    /// `POST /api/reset`
    async fn reset(&self) -> Result<()>;
}

/// Client-side checks that must pass before a relationship is posted
pub fn check_relationship(draft: &RelationshipDraft) -> Result<()> {
    if draft.source_asset_id.is_empty() || draft.target_asset_id.is_empty() {
        return Err(Error::validation("Select both a source and a target asset"));
    }
    if draft.source_asset_id == draft.target_asset_id {
        return Err(Error::validation(
            "Source and target must be different assets",
        ));
    }
    if draft.relationship_type.trim().is_empty() {
        return Err(Error::validation("Select a relationship type"));
    }
    if !(0.0..=1.0).contains(&draft.confidence) {
        return Err(Error::validation("Confidence must be between 0 and 1"));
    }
    Ok(())
}

/// Client-side checks that must pass before an asset is posted
pub fn check_asset(draft: &AssetDraft) -> Result<()> {
    if draft.asset_type.trim().is_empty() {
        return Err(Error::validation("Select an asset type"));
    }
    if draft.name.trim().is_empty() {
        return Err(Error::validation("Asset name is required"));
    }
    if !(0.0..=1.0).contains(&draft.confidence) {
        return Err(Error::validation("Confidence must be between 0 and 1"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pivot_core::Properties;

    fn relationship(source: &str, target: &str) -> RelationshipDraft {
        RelationshipDraft {
            source_asset_id: source.into(),
            target_asset_id: target.into(),
            relationship_type: "can_pivot_to".into(),
            properties: Properties::new(),
            confidence: 1.0,
        }
    }

    #[test]
    fn test_self_relationship_rejected() {
        let err = check_relationship(&relationship("a1", "a1")).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
        assert!(err.to_string().contains("different"));
    }

    #[test]
    fn test_valid_relationship_accepted() {
        assert!(check_relationship(&relationship("a1", "a2")).is_ok());
    }

    #[test]
    fn test_missing_endpoint_rejected() {
        assert!(check_relationship(&relationship("", "a2")).is_err());
    }

    #[test]
    fn test_asset_requires_name_and_type() {
        let mut draft = AssetDraft {
            asset_type: "host".into(),
            name: "  ".into(),
            properties: Properties::new(),
            confidence: 1.0,
        };
        assert!(check_asset(&draft).is_err());

        draft.name = "web-01".into();
        assert!(check_asset(&draft).is_ok());

        draft.confidence = 1.5;
        assert!(check_asset(&draft).is_err());
    }
}
