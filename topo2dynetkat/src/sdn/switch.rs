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

//! Module defining an SDN switch

use crate::sdn::{ControllerId, DeviceError, FlowTable, Link, NodeId, PortNr};

/// # SDN Switch
///
/// A switch is placed at a node of the topology. It owns its live [`FlowTable`] and all links
/// connected to it. The controller managing the switch is stored as an id, which is set by the
/// [`Network`](crate::sdn::Network) when controllers are assigned.
#[derive(Debug, Clone)]
pub struct Switch {
    node_id: NodeId,
    controller: Option<ControllerId>,
    flow_table: FlowTable,
    links: Vec<Link>,
}

impl Switch {
    /// Create a new switch at `node_id` with the given links. Fails if any link is not incident to
    /// `node_id`.
    pub fn new(node_id: NodeId, links: Vec<Link>) -> Result<Self, DeviceError> {
        if links.iter().any(|l| !l.is_incident_to_node(node_id)) {
            return Err(DeviceError::NonIncidentLink(node_id));
        }
        Ok(Self { node_id, controller: None, flow_table: FlowTable::new(), links })
    }

    /// Returns the node id of the switch
    pub fn node_id(&self) -> NodeId {
        self.node_id
    }

    /// Returns the controller of the switch, if it has one
    pub fn controller(&self) -> Option<ControllerId> {
        self.controller
    }

    pub(crate) fn set_controller(&mut self, controller: ControllerId) {
        self.controller = Some(controller);
    }

    /// Returns a reference to the live flow table
    pub fn flow_table(&self) -> &FlowTable {
        &self.flow_table
    }

    pub(crate) fn flow_table_mut(&mut self) -> &mut FlowTable {
        &mut self.flow_table
    }

    /// Returns all links connected to the switch
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub(crate) fn links_mut(&mut self) -> &mut [Link] {
        &mut self.links
    }

    /// Returns the ports `(local, remote)` of the link towards the neighbor `other`. The first
    /// port is located on this switch, the second one on the neighbor.
    pub fn get_link_ports(&self, other: NodeId) -> Result<(PortNr, PortNr), DeviceError> {
        self.links
            .iter()
            .find(|l| l.topo_edge.other_end(self.node_id) == Some(other))
            .and_then(|l| l.ports_from(self.node_id))
            .ok_or(DeviceError::NoLinkBetweenSwitches(self.node_id, other))
    }
}
