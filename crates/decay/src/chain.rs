//! Decay chain graphs

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use std::collections::VecDeque;

use crate::dataset::{Dataset, NuclideRecord};
use crate::Result;

/// A nuclide in a decay chain
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChainNode {
    pub name: &'static str,
    /// Longest decay path from the root (root = 0)
    pub generation: usize,
}

/// One decay path between two nodes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChainEdge {
    pub parent: &'static str,
    pub progeny: &'static str,
    pub mode: &'static str,
    pub branching: f64,
}

/// Every nuclide reachable from a root through decays with non-zero branching
#[derive(Debug, Clone)]
pub struct DecayChain {
    root: &'static str,
    nodes: Vec<ChainNode>,
    edges: Vec<ChainEdge>,
}

impl DecayChain {
    pub fn from_root(dataset: &Dataset, isotope: &str) -> Result<Self> {
        let root = dataset.nuclide(isotope)?;
        let order = topological_order(dataset, &[root]);

        let mut generations: IndexMap<&'static str, usize> =
            order.iter().map(|r| (r.name, 0)).collect();
        let mut edges = Vec::new();

        for record in &order {
            let generation = generations.get(record.name).copied().unwrap_or(0);
            for decay in record.decays.iter().filter(|d| d.branching > 0.0) {
                if let Some(g) = generations.get_mut(decay.progeny) {
                    *g = (*g).max(generation + 1);
                }
                edges.push(ChainEdge {
                    parent: record.name,
                    progeny: decay.progeny,
                    mode: decay.mode,
                    branching: decay.branching,
                });
            }
        }

        let nodes = generations
            .into_iter()
            .map(|(name, generation)| ChainNode { name, generation })
            .collect();

        Ok(Self {
            root: root.name,
            nodes,
            edges,
        })
    }

    pub fn root(&self) -> &'static str {
        self.root
    }

    /// Nodes in decay order (parents before progeny)
    pub fn nodes(&self) -> &[ChainNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[ChainEdge] {
        &self.edges
    }

    pub fn depth(&self) -> usize {
        self.nodes.iter().map(|n| n.generation).max().unwrap_or(0)
    }

    pub fn node(&self, name: &str) -> Option<&ChainNode> {
        self.nodes.iter().find(|n| n.name == name)
    }
}

/// Order every nuclide reachable from `roots` so that parents precede progeny
///
/// Kahn's algorithm over the reachable subgraph; ties resolve in discovery
/// order so the result is deterministic. Progeny missing from the dataset are
/// skipped.
pub fn topological_order(
    dataset: &Dataset,
    roots: &[&'static NuclideRecord],
) -> Vec<&'static NuclideRecord> {
    let mut reachable: IndexSet<&'static str> = IndexSet::new();
    let mut queue: VecDeque<&'static NuclideRecord> = roots.iter().copied().collect();
    while let Some(record) = queue.pop_front() {
        if !reachable.insert(record.name) {
            continue;
        }
        for decay in record.decays.iter().filter(|d| d.branching > 0.0) {
            if let Some(progeny) = dataset.get(decay.progeny) {
                queue.push_back(progeny);
            }
        }
    }

    let mut in_degree: IndexMap<&'static str, usize> =
        reachable.iter().map(|name| (*name, 0)).collect();
    for name in &reachable {
        if let Some(record) = dataset.get(name) {
            for decay in record.decays.iter().filter(|d| d.branching > 0.0) {
                if let Some(d) = in_degree.get_mut(decay.progeny) {
                    *d += 1;
                }
            }
        }
    }

    let mut ready: VecDeque<&'static str> = in_degree
        .iter()
        .filter(|(_, d)| **d == 0)
        .map(|(name, _)| *name)
        .collect();
    let mut order = Vec::with_capacity(reachable.len());
    while let Some(name) = ready.pop_front() {
        let Some(record) = dataset.get(name) else {
            continue;
        };
        order.push(record);
        for decay in record.decays.iter().filter(|d| d.branching > 0.0) {
            if let Some(d) = in_degree.get_mut(decay.progeny) {
                *d -= 1;
                if *d == 0 {
                    ready.push_back(decay.progeny);
                }
            }
        }
    }
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cs137_chain() {
        let chain = DecayChain::from_root(Dataset::embedded(), "Cs-137").unwrap();
        let names: Vec<_> = chain.nodes().iter().map(|n| n.name).collect();
        assert_eq!(names, vec!["Cs-137", "Ba-137m", "Ba-137"]);
        assert_eq!(chain.edges().len(), 3);
        assert_eq!(chain.node("Ba-137").unwrap().generation, 2);
        assert_eq!(chain.depth(), 2);
    }

    #[test]
    fn test_stable_root_has_single_node() {
        let chain = DecayChain::from_root(Dataset::embedded(), "Pb-206").unwrap();
        assert_eq!(chain.nodes().len(), 1);
        assert!(chain.edges().is_empty());
        assert_eq!(chain.depth(), 0);
    }

    #[test]
    fn test_u238_chain_ends_in_lead() {
        let chain = DecayChain::from_root(Dataset::embedded(), "238U").unwrap();
        assert_eq!(chain.root(), "U-238");
        assert_eq!(chain.nodes().first().unwrap().name, "U-238");
        assert_eq!(chain.nodes().last().unwrap().name, "Pb-206");
        assert_eq!(chain.nodes().len(), 19);
        // U-238 Th-234 Pa-234m Pa-234 U-234 Th-230 Ra-226 Rn-222 Po-218
        // At-218 Rn-218 Po-214 Pb-210 Bi-210 Po-210 Pb-206
        assert_eq!(chain.depth(), 15);
    }

    #[test]
    fn test_parents_precede_progeny() {
        let chain = DecayChain::from_root(Dataset::embedded(), "Th-232").unwrap();
        let position = |name: &str| chain.nodes().iter().position(|n| n.name == name).unwrap();
        for edge in chain.edges() {
            assert!(position(edge.parent) < position(edge.progeny));
        }
    }

    #[test]
    fn test_unknown_root_fails() {
        assert!(DecayChain::from_root(Dataset::embedded(), "Zz-1").is_err());
        assert!(DecayChain::from_root(Dataset::embedded(), "Og-294").is_err());
    }
}
