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

//! Module containing the behavior of changing link costs.

use super::{Behavior, CONTROLLERS_NR, HOSTS_NR};
use crate::sdn::{FlowTableUpdate, LinkWeight, Network, NetworkError, DEFAULT_LINK_WEIGHT};
use crate::utils::random_ints;
use crate::Error;

use itertools::Itertools;
use log::*;
use rand::Rng;

/// Number of random link costs to try before giving up
pub const CHANGING_COSTS_ATTEMPTS: usize = 10;
/// Largest link cost drawn at random
pub const MAX_LINK_COST: u32 = 20;
/// Smallest link cost drawn at random
pub const MIN_LINK_COST: u32 = DEFAULT_LINK_WEIGHT as u32;

/// # Link Cost Changing
///
/// First, `hosts` hosts are placed and connected to each other, and `controllers` controllers are
/// assigned. Then, the cost of every link is drawn at random from `[min_cost, max_cost]`, the
/// shortest paths are recomputed, and the flow rules between all pairs of hosts are staged at the
/// controllers. Staged tables which are equal to the live table of their switch are discarded.
///
/// If no staged table remains, the new link costs did not change any forwarding decision, and the
/// costs are drawn again, up to `attempts` times. After that, the behavior fails with
/// [`Error::MaxCostChangingAttemptsReached`]. If `min_cost > max_cost`, the behavior fails with
/// [`NetworkError::EmptyRange`] before the network is modified.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkCostChanging {
    /// Number of hosts
    pub hosts: usize,
    /// Number of controllers
    pub controllers: usize,
    /// Maximum number of times new link costs are drawn
    pub attempts: usize,
    /// Smallest link cost
    pub min_cost: u32,
    /// Largest link cost
    pub max_cost: u32,
    /// How the staged flow tables are created
    pub mode: FlowTableUpdate,
}

impl Default for LinkCostChanging {
    fn default() -> Self {
        Self {
            hosts: HOSTS_NR,
            controllers: CONTROLLERS_NR,
            attempts: CHANGING_COSTS_ATTEMPTS,
            min_cost: MIN_LINK_COST,
            max_cost: MAX_LINK_COST,
            mode: FlowTableUpdate::Patch,
        }
    }
}

impl Behavior for LinkCostChanging {
    fn modify_network<R: Rng>(&self, net: &mut Network, rng: &mut R) -> Result<(), Error> {
        if self.min_cost > self.max_cost {
            return Err(NetworkError::EmptyRange(self.min_cost, self.max_cost).into());
        }
        net.add_and_connect_hosts(self.hosts, rng)?;
        net.add_controllers(self.controllers, rng)?;
        self.try_populate_new_flow_tables(net, rng)
    }
}

impl LinkCostChanging {
    /// Draw random link costs until the controllers have at least one staged flow table that
    /// differs from the live one. Fails after `self.attempts` unsuccessful attempts.
    pub fn try_populate_new_flow_tables<R: Rng>(
        &self,
        net: &mut Network,
        rng: &mut R,
    ) -> Result<(), Error> {
        for i in 0..self.attempts {
            let n = net.topology().num_edges();
            let costs: Vec<LinkWeight> = random_ints(n, self.min_cost, self.max_cost, rng)?
                .into_iter()
                .map(|c| c as LinkWeight)
                .collect();
            if self.populate_new_flow_tables(net, &costs)? {
                return Ok(());
            }
            warn!(
                "Failed to generate new host communication paths. Retrying... [{}/{}]",
                i + 1,
                self.attempts
            );
        }
        Err(Error::MaxCostChangingAttemptsReached(self.attempts))
    }

    /// Apply `costs` to the links, stage the flow rules between all pairs of hosts, and discard
    /// all staged tables that did not change. Returns `true` if any staged table remains.
    pub fn populate_new_flow_tables(
        &self,
        net: &mut Network,
        costs: &[LinkWeight],
    ) -> Result<bool, Error> {
        net.modify_link_costs(costs)?;

        let hosts = net.hosts().to_vec();
        for (h1, h2) in hosts.iter().cartesian_product(hosts.iter()).filter(|(a, b)| a.id != b.id) {
            net.stage_host_connection(h1, h2, self.mode)?;
        }

        let discarded = net.remove_duplicate_flow_tables();
        debug!("Discarded {} unchanged flow tables", discarded);
        Ok(net.has_staged_updates())
    }
}
