use crate::asset_analysis::domain::{AssetIdentity, ForwardMap};
use std::collections::HashMap;

/// CycleDetector finds strongly connected components of the forward map
///
/// Uses Tarjan's algorithm driven by an explicit stack of frames, so deep
/// dependency chains cannot exhaust the call stack.
pub struct CycleDetector;

impl CycleDetector {
    /// Returns every strongly connected component with at least two members
    ///
    /// Members of each chain are sorted, and chains are sorted by their
    /// first member. Targets that were never analyzed have no outgoing
    /// edges and therefore never take part in a chain.
    pub fn strongly_connected_chains(forward: &ForwardMap) -> Vec<Vec<AssetIdentity>> {
        let nodes: Vec<&AssetIdentity> = forward.keys().collect();
        let index_of: HashMap<&AssetIdentity, usize> =
            nodes.iter().enumerate().map(|(i, id)| (*id, i)).collect();
        let adjacency: Vec<Vec<usize>> = forward
            .values()
            .map(|deps| deps.iter().filter_map(|dep| index_of.get(dep).copied()).collect())
            .collect();

        let node_count = nodes.len();
        let mut index: Vec<Option<usize>> = vec![None; node_count];
        let mut lowlink = vec![0usize; node_count];
        let mut on_stack = vec![false; node_count];
        let mut component_stack: Vec<usize> = Vec::new();
        // (node, position of the next neighbor to visit)
        let mut frames: Vec<(usize, usize)> = Vec::new();
        let mut next_index = 0;
        let mut chains = Vec::new();

        for root in 0..node_count {
            if index[root].is_some() {
                continue;
            }

            index[root] = Some(next_index);
            lowlink[root] = next_index;
            next_index += 1;
            component_stack.push(root);
            on_stack[root] = true;
            frames.push((root, 0));

            while let Some(frame) = frames.last_mut() {
                let node = frame.0;

                if frame.1 < adjacency[node].len() {
                    let next = adjacency[node][frame.1];
                    frame.1 += 1;

                    match index[next] {
                        None => {
                            index[next] = Some(next_index);
                            lowlink[next] = next_index;
                            next_index += 1;
                            component_stack.push(next);
                            on_stack[next] = true;
                            frames.push((next, 0));
                        }
                        Some(next_idx) if on_stack[next] => {
                            lowlink[node] = lowlink[node].min(next_idx);
                        }
                        Some(_) => {}
                    }
                    continue;
                }

                frames.pop();
                if let Some(&(parent, _)) = frames.last() {
                    lowlink[parent] = lowlink[parent].min(lowlink[node]);
                }

                if index[node] == Some(lowlink[node]) {
                    let mut component = Vec::new();
                    while let Some(member) = component_stack.pop() {
                        on_stack[member] = false;
                        component.push(nodes[member].clone());
                        if member == node {
                            break;
                        }
                    }
                    if component.len() > 1 {
                        component.sort();
                        chains.push(component);
                    }
                }
            }
        }

        chains.sort();
        chains
    }
}
