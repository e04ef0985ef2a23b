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

//! Module defining a physical link between two switches

use crate::sdn::{NodeId, PortNr, TopoEdge};

/// Link between two switches: A topology edge, together with the port numbers assigned to both of
/// its ends. `from_port` is located at `topo_edge.from`, and `to_port` at `topo_edge.to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    /// Underlying edge of the topology
    pub topo_edge: TopoEdge,
    /// Port at the `from` end of the edge
    pub from_port: PortNr,
    /// Port at the `to` end of the edge
    pub to_port: PortNr,
}

impl Link {
    /// Create a new link
    pub fn new(topo_edge: TopoEdge, from_port: PortNr, to_port: PortNr) -> Self {
        Self { topo_edge, from_port, to_port }
    }

    /// Returns true if the link is connected to `node`.
    pub fn is_incident_to_node(&self, node: NodeId) -> bool {
        self.topo_edge.is_incident_to(node)
    }

    /// Returns the pair of ports `(local, remote)` seen from `node`, or `None` if the link is not
    /// incident to `node`.
    pub fn ports_from(&self, node: NodeId) -> Option<(PortNr, PortNr)> {
        if self.topo_edge.from == node {
            Some((self.from_port, self.to_port))
        } else if self.topo_edge.to == node {
            Some((self.to_port, self.from_port))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn incident() {
        let (a, b, c) = (NodeId::new(0), NodeId::new(1), NodeId::new(2));
        let link = Link::new(TopoEdge { from: a, to: b, weight: 1.0 }, 4, 5);
        assert!(link.is_incident_to_node(a));
        assert!(link.is_incident_to_node(b));
        assert!(!link.is_incident_to_node(c));
        assert_eq!(link.ports_from(a), Some((4, 5)));
        assert_eq!(link.ports_from(b), Some((5, 4)));
        assert_eq!(link.ports_from(c), None);
    }
}
