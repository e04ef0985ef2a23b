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

//! Module containing all type definitions

use petgraph::prelude::*;
use petgraph::stable_graph::StableGraph;
use thiserror::Error;

type IndexType = u32;
/// Switch Identification (and index into the topology graph)
pub type NodeId = NodeIndex<IndexType>;
/// Port number on a switch. Port numbers are unique in the entire network.
pub type PortNr = u32;
/// Link Weight (or cost) of the topology graph
pub type LinkWeight = f32;
/// Topology graph. Every undirected link is stored as two directed edges with the same weight.
pub type TopologyGraph = StableGraph<String, LinkWeight, Directed, IndexType>;

/// Weight assigned to every link that is created without an explicit cost.
pub const DEFAULT_LINK_WEIGHT: LinkWeight = 1.0;

/// Host Identification (used as the destination field of packets)
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub struct HostId(pub u32);

/// Controller Identification (index into the controllers of the network)
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy)]
pub struct ControllerId(pub usize);

impl std::fmt::Display for HostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for ControllerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// # Undirected, weighted edge of the topology
///
/// The orientation (`from`, `to`) is the one in which the link was added to the topology. It
/// determines which port of a [`Link`](crate::sdn::Link) is the `from_port`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TopoEdge {
    /// Node at which the edge was created
    pub from: NodeId,
    /// Other end of the edge
    pub to: NodeId,
    /// Cost of traversing the edge (in both directions)
    pub weight: LinkWeight,
}

impl TopoEdge {
    /// Returns true if `node` is one of the two endpoints.
    pub fn is_incident_to(&self, node: NodeId) -> bool {
        self.from == node || self.to == node
    }

    /// Returns the endpoint opposite to `node`, or `None` if the edge is not incident to `node`.
    pub fn other_end(&self, node: NodeId) -> Option<NodeId> {
        if self.from == node {
            Some(self.to)
        } else if self.to == node {
            Some(self.from)
        } else {
            None
        }
    }
}

/// Errors raised by a single device (switch or controller)
#[derive(Error, Debug, PartialEq)]
pub enum DeviceError {
    /// A link passed to the switch is not connected to it
    #[error("Switch {0:?} must receive only links that are connected to it!")]
    NonIncidentLink(NodeId),
    /// The switch has no link towards the given neighbor
    #[error("Could not find link between switches {0:?} and {1:?}!")]
    NoLinkBetweenSwitches(NodeId, NodeId),
    /// The controller does not own the switch
    #[error("No switch matches the node id {0:?}")]
    NoSwitchWithNodeId(NodeId),
}

/// Topology Errors
#[derive(Error, Debug, PartialEq)]
pub enum TopologyError {
    /// The topology has no nodes
    #[error("Empty graph!")]
    EmptyGraph,
    /// The topology is not connected
    #[error("Disconnected graph with {0} components!")]
    DisconnectedGraph(usize),
    /// The node is not part of the topology
    #[error("Node {0:?} is not part of the graph!")]
    NodeNotInGraph(NodeId),
    /// Links cannot connect a node to itself
    #[error("Node {0:?} cannot be connected to itself!")]
    SelfLoop(NodeId),
    /// There already is a link between the two nodes
    #[error("Duplicate link between {0:?} and {1:?}")]
    DuplicateLink(NodeId, NodeId),
    /// The link does not exist
    #[error("Link does not exist: {0:?} -- {1:?}")]
    NoSuchLink(NodeId, NodeId),
    /// The number of link weights does not match the number of links
    #[error("Expected {expected} link weights, got {got}")]
    LinkWeightsMismatch {
        /// Number of links in the topology
        expected: usize,
        /// Number of weights received
        got: usize,
    },
    /// Link weights must not be negative
    #[error("Negative link weights are not allowed!")]
    NegativeLinkWeight,
    /// Link weights must be finite numbers
    #[error("Link weights must be finite!")]
    NonFiniteLinkWeight,
}

/// Network Errors
#[derive(Error, Debug, PartialEq)]
pub enum NetworkError {
    /// Device Error which cannot be handled
    #[error("Device Error: {0}")]
    DeviceError(#[from] DeviceError),
    /// Topology Error
    #[error("Topology Error: {0}")]
    TopologyError(#[from] TopologyError),
    /// No switch is placed at the given node
    #[error("No switch matches the node id {0:?}")]
    SwitchNotFound(NodeId),
    /// No controller with the given id
    #[error("No controller matches the id {0}")]
    ControllerNotFound(ControllerId),
    /// The switch is not managed by any controller
    #[error("Switch {0:?} has no controller!")]
    SwitchHasNoController(NodeId),
    /// The topology edge has no link assigned
    #[error("Edge {0:?} -- {1:?} is not mapped to a link!")]
    EdgeNotMappedToLink(NodeId, NodeId),
    /// The network has no switches
    #[error("Network has no switches!")]
    NetworkHasNoSwitches,
    /// No shortest path between the two switches
    #[error("Could not find path between switches {0:?} and {1:?}!")]
    NoPathBetweenSwitches(NodeId, NodeId),
    /// Too few hosts requested
    #[error("Number of hosts must be at least 2!")]
    TooFewHosts,
    /// Zero controllers requested
    #[error("Number of controllers to be added must be at least 1!")]
    TooFewControllers,
    /// More controllers than switches requested
    #[error("Cannot add more controllers than switches to the network!")]
    MoreControllersThanSwitches,
    /// More random picks than unique elements requested
    #[error("No. of random picks is greater than the no. of unique elements in the array.")]
    MorePicksThanUniqueElements,
    /// The lower bound of a random range is larger than its upper bound
    #[error("Range [{0}, {1}] is empty!")]
    EmptyRange(u32, u32),
}
