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

//! # Network Behaviors
//!
//! A behavior mutates a freshly built [`Network`]: it places hosts and controllers, and lets the
//! controllers stage new flow tables, which describe a reconfiguration of the network. Staged
//! tables never modify the live flow tables of the switches.
//!
//! - **[`OutsideHostConn`]**: A base population of hosts is connected. Then, new hosts join the
//!   network, and the controllers announce the paths between every new host and every existing
//!   host. The new hosts do not talk to each other.
//!
//! - **[`LinkCostChanging`]**: After connecting the hosts, the link costs are changed at random,
//!   and the controllers announce the new paths between all hosts. Link costs are drawn again
//!   until at least one switch changes its forwarding decision.
//!
//! All behaviors use a single random number generator, passed explicitly. The order in which hosts,
//! controllers and link costs are drawn is fixed, such that a seed always yields the same network.

use crate::sdn::{Network, Topology};
use crate::Error;

use rand::Rng;

mod link_cost_changing;
mod outside_host_conn;

pub use link_cost_changing::{
    LinkCostChanging, CHANGING_COSTS_ATTEMPTS, MAX_LINK_COST, MIN_LINK_COST,
};
pub use outside_host_conn::OutsideHostConn;

/// Number of hosts placed in the network by default
pub const HOSTS_NR: usize = 5;
/// Number of controllers placed in the network by default
pub const CONTROLLERS_NR: usize = 2;
/// Number of hosts joining the network from outside by default
pub const OUTSIDE_HOSTS_NR: usize = 1;

/// Trait of a network behavior
pub trait Behavior {
    /// Apply the behavior on the network.
    fn modify_network<R: Rng>(&self, net: &mut Network, rng: &mut R) -> Result<(), Error>;
}

/// Build a new network from the topology, and apply the behavior on it.
pub fn network_with_behavior<B, R>(
    topology: Topology,
    behavior: &B,
    rng: &mut R,
) -> Result<Network, Error>
where
    B: Behavior,
    R: Rng,
{
    let mut net = Network::new(topology)?;
    behavior.modify_network(&mut net, rng)?;
    Ok(net)
}
