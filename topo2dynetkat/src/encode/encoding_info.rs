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

//! Module containing the information extracted from a network before encoding it.

use super::EncodingError;
use crate::sdn::{FlowTable, Network, NodeId};

use indexmap::IndexMap;

/// Information needed to encode a network.
///
/// A switch is *used* if its live flow table is not empty, or if its controller has staged a new
/// flow table for it. Used switches are numbered densely, in the order of the switches in the
/// network. A controller is *used* if it has staged at least one flow table.
#[derive(Debug, Clone)]
pub struct EncodingInfo<'a> {
    node_to_index: IndexMap<NodeId, usize>,
    used_switches: IndexMap<NodeId, &'a FlowTable>,
    used_controllers: Vec<&'a IndexMap<NodeId, FlowTable>>,
}

impl<'a> EncodingInfo<'a> {
    /// Collect the encoding information of the network. Fails if no switch or no controller is
    /// used.
    pub fn new(net: &'a Network) -> Result<Self, EncodingError> {
        let used_switches: IndexMap<NodeId, &'a FlowTable> = net
            .switches()
            .filter(|sw| {
                let will_receive_update = net
                    .get_switch_controller(sw.node_id())
                    .map(|c| c.new_flow_table(sw.node_id()).is_some())
                    .unwrap_or(false);
                !sw.flow_table().is_empty() || will_receive_update
            })
            .map(|sw| (sw.node_id(), sw.flow_table()))
            .collect();

        let used_controllers: Vec<&'a IndexMap<NodeId, FlowTable>> = net
            .controllers()
            .iter()
            .map(|c| c.new_flow_tables())
            .filter(|tables| !tables.is_empty())
            .collect();

        if used_switches.is_empty() || used_controllers.is_empty() {
            return Err(EncodingError::NoSwitchesOrControllersUsed);
        }

        let node_to_index = used_switches.keys().enumerate().map(|(i, n)| (*n, i)).collect();

        Ok(Self { node_to_index, used_switches, used_controllers })
    }

    /// Returns the dense index of a used switch.
    pub fn index(&self, node: NodeId) -> Option<usize> {
        self.node_to_index.get(&node).copied()
    }

    /// Returns the live flow tables of all used switches, in order of their index.
    pub fn used_switches(&self) -> &IndexMap<NodeId, &'a FlowTable> {
        &self.used_switches
    }

    /// Returns the staged flow tables of all used controllers.
    pub fn used_controllers(&self) -> &[&'a IndexMap<NodeId, FlowTable>] {
        &self.used_controllers
    }

    /// Returns the staged flow table of a switch, if any controller has one.
    pub fn find_new_flow_table(&self, node: NodeId) -> Option<&'a FlowTable> {
        self.used_controllers.iter().copied().find_map(|tables| tables.get(&node))
    }
}
