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

//! Module containing the behavior of hosts joining the network from outside.

use super::{Behavior, CONTROLLERS_NR, HOSTS_NR, OUTSIDE_HOSTS_NR};
use crate::sdn::{FlowTableUpdate, Network};
use crate::Error;

use log::*;
use rand::Rng;

/// # Outside Host Connections
///
/// First, `hosts` hosts are placed and connected to each other, and `controllers` controllers are
/// assigned. Then, `outside_hosts` new hosts are placed in the network. The flow rules between
/// every new host and every existing host (in both directions) are staged at the controllers. The
/// new hosts are not connected to each other.
#[derive(Debug, Clone, PartialEq)]
pub struct OutsideHostConn {
    /// Number of hosts connected before the new hosts join
    pub hosts: usize,
    /// Number of controllers
    pub controllers: usize,
    /// Number of new hosts
    pub outside_hosts: usize,
    /// How the staged flow tables are created
    pub mode: FlowTableUpdate,
}

impl Default for OutsideHostConn {
    fn default() -> Self {
        Self {
            hosts: HOSTS_NR,
            controllers: CONTROLLERS_NR,
            outside_hosts: OUTSIDE_HOSTS_NR,
            mode: FlowTableUpdate::Patch,
        }
    }
}

impl Behavior for OutsideHostConn {
    fn modify_network<R: Rng>(&self, net: &mut Network, rng: &mut R) -> Result<(), Error> {
        net.add_and_connect_hosts(self.hosts, rng)?;
        net.add_controllers(self.controllers, rng)?;

        let existing = net.hosts().to_vec();
        let outside = net.create_hosts(self.outside_hosts, rng)?;
        for new_host in outside.iter() {
            info!("Host {} joins the network at switch {:?}", new_host.id, new_host.switch);
            for host in existing.iter() {
                net.stage_host_connection(new_host, host, self.mode)?;
                net.stage_host_connection(host, new_host, self.mode)?;
            }
        }
        net.add_hosts(outside);

        Ok(())
    }
}
