//! Display ordering shared by the handler and the renderers
//!
//! Cursors index into these orderings, so both sides must agree on them.

use std::collections::BTreeMap;

use pivot_core::{classify_zone, Asset, BatchCommand, MethodologySummary, Zone};

use crate::state::AppState;

/// Assets passing the filter, grouped by type (types sorted, engine order
/// inside a group)
pub fn visible_assets(state: &AppState) -> Vec<&Asset> {
    asset_groups(&state.data.assets, |a| state.filter.matches(a))
        .into_iter()
        .flat_map(|(_, assets)| assets)
        .collect()
}

/// `(type, assets)` groups in display order
pub fn asset_groups<'a>(
    assets: &'a [Asset],
    keep: impl Fn(&Asset) -> bool,
) -> Vec<(&'a str, Vec<&'a Asset>)> {
    let mut groups: BTreeMap<&str, Vec<&Asset>> = BTreeMap::new();
    for asset in assets.iter().filter(|a| keep(a)) {
        groups.entry(asset.asset_type.as_str()).or_default().push(asset);
    }
    groups.into_iter().collect()
}

/// Distinct asset types present, sorted
pub fn present_types(assets: &[Asset]) -> Vec<&str> {
    asset_groups(assets, |_| true)
        .into_iter()
        .map(|(t, _)| t)
        .collect()
}

/// Batch commands grouped by methodology name
pub fn command_groups(commands: &[BatchCommand]) -> Vec<(&str, Vec<&BatchCommand>)> {
    let mut groups: BTreeMap<&str, Vec<&BatchCommand>> = BTreeMap::new();
    for command in commands {
        let key = if command.methodology_name.is_empty() {
            command.methodology_id.as_str()
        } else {
            command.methodology_name.as_str()
        };
        groups.entry(key).or_default().push(command);
    }
    groups.into_iter().collect()
}

pub fn queue_order(commands: &[BatchCommand]) -> Vec<&BatchCommand> {
    command_groups(commands)
        .into_iter()
        .flat_map(|(_, commands)| commands)
        .collect()
}

/// Methodologies grouped by category (`uncategorized` when missing)
pub fn library_groups(
    methodologies: &[MethodologySummary],
) -> Vec<(&str, Vec<&MethodologySummary>)> {
    let mut groups: BTreeMap<&str, Vec<&MethodologySummary>> = BTreeMap::new();
    for methodology in methodologies {
        groups
            .entry(methodology.category_or_default())
            .or_default()
            .push(methodology);
    }
    groups.into_iter().collect()
}

pub fn library_order(methodologies: &[MethodologySummary]) -> Vec<&MethodologySummary> {
    library_groups(methodologies)
        .into_iter()
        .flat_map(|(_, items)| items)
        .collect()
}

/// One column per zone, in [`Zone::ALL`] order, nodes sorted by name
pub fn topology_columns(assets: &[Asset]) -> Vec<(Zone, Vec<&Asset>)> {
    Zone::ALL
        .iter()
        .map(|zone| {
            let mut nodes: Vec<&Asset> =
                assets.iter().filter(|a| classify_zone(a) == *zone).collect();
            nodes.sort_by(|a, b| a.name.cmp(&b.name));
            (*zone, nodes)
        })
        .collect()
}

pub fn topology_order(assets: &[Asset]) -> Vec<&Asset> {
    topology_columns(assets)
        .into_iter()
        .flat_map(|(_, nodes)| nodes)
        .collect()
}
