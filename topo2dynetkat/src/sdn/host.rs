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

//! Module defining a host attached to a switch

use crate::sdn::{HostId, NodeId, PortNr};

/// Host, connected to a single switch on a single port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Host {
    /// Id of the host, used as the destination of packets
    pub id: HostId,
    /// Port on the switch to which the host is connected
    pub switch_port: PortNr,
    /// Switch to which the host is connected
    pub switch: NodeId,
}

impl Host {
    /// Create a new host
    pub fn new(id: HostId, switch_port: PortNr, switch: NodeId) -> Self {
        Self { id, switch_port, switch }
    }
}
