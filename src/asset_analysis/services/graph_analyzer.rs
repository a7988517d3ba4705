use super::CycleDetector;
use crate::asset_analysis::domain::{
    AssetIdentity, CyclePair, DependencyGraph, ReferenceCount, ReferenceLookup,
};
use std::collections::BTreeSet;

/// GraphAnalyzer service for read-only queries over a built DependencyGraph
///
/// This service contains pure business logic. It has no I/O dependencies,
/// never mutates the graph, and returns identical output for identical input.
pub struct GraphAnalyzer;

impl GraphAnalyzer {
    /// Returns the assets referenced by more than one analyzed asset
    ///
    /// # Arguments
    /// * `graph` - A completed dependency graph
    /// * `limit` - Maximum number of entries to return
    ///
    /// # Returns
    /// Entries ordered by descending reference count, ties broken by
    /// ascending identity
    pub fn most_referenced(graph: &DependencyGraph, limit: usize) -> Vec<ReferenceCount> {
        let mut ranked: Vec<ReferenceCount> = graph
            .reverse()
            .iter()
            .filter(|(_, referrers)| referrers.len() > 1)
            .map(|(id, referrers)| ReferenceCount {
                id: id.clone(),
                count: referrers.len(),
            })
            .collect();

        ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.id.cmp(&b.id)));
        ranked.truncate(limit);
        ranked
    }

    /// Returns analyzed assets that nothing in the analyzed set references
    ///
    /// # Arguments
    /// * `graph` - A completed dependency graph
    /// * `exclude` - Caller-supplied predicate; matching assets are never reported
    /// * `limit` - Maximum number of entries to return
    ///
    /// # Returns
    /// Orphans in the order the analyzed set was processed
    pub fn orphaned<F>(graph: &DependencyGraph, exclude: F, limit: usize) -> Vec<AssetIdentity>
    where
        F: Fn(&AssetIdentity) -> bool,
    {
        graph
            .analyzed()
            .iter()
            .filter(|id| {
                graph
                    .referrers_of(id)
                    .map_or(true, |referrers| referrers.is_empty())
            })
            .filter(|id| !exclude(id))
            .take(limit)
            .cloned()
            .collect()
    }

    /// Returns every pair of assets that reference each other directly
    ///
    /// Only length-2 cycles are reported here; longer chains are found by
    /// [`GraphAnalyzer::cycle_chains`]. Each unordered pair appears once.
    pub fn cycles(graph: &DependencyGraph) -> Vec<CyclePair> {
        let forward = graph.forward();
        let mut pairs = BTreeSet::new();

        for (owner, deps) in forward {
            for dep in deps {
                if owner == dep {
                    continue;
                }
                let mutual = forward
                    .get(dep)
                    .is_some_and(|back_edges| back_edges.contains(owner));
                if mutual {
                    pairs.insert(CyclePair::new(owner.clone(), dep.clone()));
                }
            }
        }

        pairs.into_iter().collect()
    }

    /// Returns every strongly connected group of two or more assets
    pub fn cycle_chains(graph: &DependencyGraph) -> Vec<Vec<AssetIdentity>> {
        CycleDetector::strongly_connected_chains(graph.forward())
    }

    /// Looks up who references each selected asset
    ///
    /// An asset that was analyzed but is referenced by nothing yields an
    /// empty list; an asset the build never saw yields `None`.
    pub fn find_references(
        graph: &DependencyGraph,
        selection: &[AssetIdentity],
    ) -> Vec<ReferenceLookup> {
        selection
            .iter()
            .map(|target| {
                let referrers = match graph.referrers_of(target) {
                    Some(referrers) => Some(referrers.iter().cloned().collect()),
                    None if graph.dependencies_of(target).is_some() => Some(Vec::new()),
                    None => None,
                };
                ReferenceLookup {
                    target: target.clone(),
                    referrers,
                }
            })
            .collect()
    }

    /// Lists the referrers of every asset the build saw referenced
    ///
    /// Used when no selection is given. Targets come in reverse-map key
    /// order; targets without referrers are skipped.
    pub fn all_references(graph: &DependencyGraph) -> Vec<ReferenceLookup> {
        graph
            .reverse()
            .iter()
            .filter(|(_, referrers)| !referrers.is_empty())
            .map(|(target, referrers)| ReferenceLookup {
                target: target.clone(),
                referrers: Some(referrers.iter().cloned().collect()),
            })
            .collect()
    }
}
