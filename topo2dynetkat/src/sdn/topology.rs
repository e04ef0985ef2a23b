// Topo2DyNetKAT: Encoding SDN Topologies as DyNetKAT Terms
// Copyright (C) 2021  The Topo2DyNetKAT Authors
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! # Topology
//!
//! Weighted, undirected graph of switches. Each undirected link is stored as two directed edges in
//! the underlying graph, both carrying the same weight. Additionally, the topology remembers the
//! order in which the links were added, which defines the iteration order of [`Topology::edges`].

use crate::sdn::{LinkWeight, NodeId, TopoEdge, TopologyError, TopologyGraph};

use petgraph::algo::{bellman_ford, kosaraju_scc};
use std::collections::HashMap;

/// Weighted undirected topology graph
#[derive(Debug, Clone, Default)]
pub struct Topology {
    graph: TopologyGraph,
    links: Vec<(NodeId, NodeId)>,
}

impl Topology {
    /// Create an empty topology
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new node with the given name, and return its id.
    pub fn add_node(&mut self, name: impl Into<String>) -> NodeId {
        self.graph.add_node(name.into())
    }

    /// Add an undirected link between `a` and `b`. The orientation `a -> b` is remembered as the
    /// orientation of the resulting [`TopoEdge`].
    pub fn add_link(
        &mut self,
        a: NodeId,
        b: NodeId,
        weight: LinkWeight,
    ) -> Result<(), TopologyError> {
        for n in [a, b].iter() {
            if !self.graph.contains_node(*n) {
                return Err(TopologyError::NodeNotInGraph(*n));
            }
        }
        if a == b {
            return Err(TopologyError::SelfLoop(a));
        }
        if self.graph.find_edge(a, b).is_some() {
            return Err(TopologyError::DuplicateLink(a, b));
        }
        check_weight(weight)?;
        self.graph.add_edge(a, b, weight);
        self.graph.add_edge(b, a, weight);
        self.links.push((a, b));
        Ok(())
    }

    /// Returns a reference to the underlying graph
    pub fn graph(&self) -> &TopologyGraph {
        &self.graph
    }

    /// Returns all node ids, ordered by their index.
    pub fn nodes(&self) -> Vec<NodeId> {
        self.graph.node_indices().collect()
    }

    /// Returns the number of nodes
    pub fn num_nodes(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of undirected links
    pub fn num_edges(&self) -> usize {
        self.links.len()
    }

    /// Returns the name of a node
    pub fn node_name(&self, node: NodeId) -> Option<&str> {
        self.graph.node_weight(node).map(|s| s.as_str())
    }

    /// Returns the id of the first node with the given name.
    pub fn get_node_id(&self, name: &str) -> Option<NodeId> {
        self.graph.node_indices().find(|n| self.graph[*n] == name)
    }

    /// Returns the weight of the link between `a` and `b` (in any direction).
    pub fn weight(&self, a: NodeId, b: NodeId) -> Option<LinkWeight> {
        self.graph.find_edge(a, b).and_then(|e| self.graph.edge_weight(e)).copied()
    }

    /// Returns the link between `a` and `b`, oriented the way it was added.
    pub fn edge(&self, a: NodeId, b: NodeId) -> Option<TopoEdge> {
        let (from, to) =
            self.links.iter().find(|(x, y)| (*x == a && *y == b) || (*x == b && *y == a))?;
        let weight = self.weight(*from, *to)?;
        Some(TopoEdge { from: *from, to: *to, weight })
    }

    /// Returns all links in the order in which they were added.
    pub fn edges(&self) -> Vec<TopoEdge> {
        self.links
            .iter()
            .filter_map(|(a, b)| {
                self.weight(*a, *b).map(|weight| TopoEdge { from: *a, to: *b, weight })
            })
            .collect()
    }

    /// Returns all links incident to `node`, in the order in which they were added.
    pub fn incident_edges(&self, node: NodeId) -> Result<Vec<TopoEdge>, TopologyError> {
        if !self.graph.contains_node(node) {
            return Err(TopologyError::NodeNotInGraph(node));
        }
        Ok(self.edges().into_iter().filter(|e| e.is_incident_to(node)).collect())
    }

    /// Change the weight of the link between `a` and `b` (in both directions).
    pub fn set_link_weight(
        &mut self,
        a: NodeId,
        b: NodeId,
        weight: LinkWeight,
    ) -> Result<(), TopologyError> {
        check_weight(weight)?;
        let ab = self.graph.find_edge(a, b).ok_or(TopologyError::NoSuchLink(a, b))?;
        let ba = self.graph.find_edge(b, a).ok_or(TopologyError::NoSuchLink(b, a))?;
        self.graph[ab] = weight;
        self.graph[ba] = weight;
        Ok(())
    }

    /// Change the weights of all links. `weights` must contain exactly one weight per link, in the
    /// order of [`Topology::edges`]. Nothing is changed if any weight is invalid.
    pub fn set_link_weights(&mut self, weights: &[LinkWeight]) -> Result<(), TopologyError> {
        if weights.len() != self.links.len() {
            return Err(TopologyError::LinkWeightsMismatch {
                expected: self.links.len(),
                got: weights.len(),
            });
        }
        for w in weights {
            check_weight(*w)?;
        }
        for ((a, b), w) in self.links.clone().into_iter().zip(weights.iter()) {
            self.set_link_weight(a, b, *w)?;
        }
        Ok(())
    }

    /// Compute the shortest paths from `src` to all other reachable nodes. Each path starts with
    /// `src` and ends with the target. The path from `src` to itself is `[src]`. Unreachable nodes
    /// are not part of the result.
    pub fn shortest_paths_from(
        &self,
        src: NodeId,
    ) -> Result<HashMap<NodeId, Vec<NodeId>>, TopologyError> {
        if !self.graph.contains_node(src) {
            return Err(TopologyError::NodeNotInGraph(src));
        }
        let (path_weights, predecessors) =
            bellman_ford(&self.graph, src).map_err(|_| TopologyError::NegativeLinkWeight)?;

        let mut paths = HashMap::new();
        for target in self.graph.node_indices() {
            if path_weights[target.index()].is_infinite() {
                continue;
            }
            let mut path = vec![target];
            let mut current = target;
            while let Some(p) = predecessors[current.index()] {
                path.push(p);
                current = p;
            }
            path.reverse();
            paths.insert(target, path);
        }
        Ok(paths)
    }

    /// Check that the topology is not empty, and that it is connected.
    pub fn validate(&self) -> Result<(), TopologyError> {
        if self.graph.node_count() == 0 {
            return Err(TopologyError::EmptyGraph);
        }
        let components = kosaraju_scc(&self.graph).len();
        if components > 1 {
            return Err(TopologyError::DisconnectedGraph(components));
        }
        Ok(())
    }
}

/// Link weights must be finite and non-negative.
fn check_weight(weight: LinkWeight) -> Result<(), TopologyError> {
    if !weight.is_finite() {
        Err(TopologyError::NonFiniteLinkWeight)
    } else if weight < 0.0 {
        Err(TopologyError::NegativeLinkWeight)
    } else {
        Ok(())
    }
}
