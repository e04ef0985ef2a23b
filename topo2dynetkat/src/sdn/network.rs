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

//! # Top-level Network module
//!
//! This module represents the SDN network built from a topology: switches and the links between
//! them, hosts attached to switches, and controllers managing subsets of the switches.

use crate::sdn::printer;
use crate::sdn::{
    Controller, ControllerId, FlowRule, FlowTableUpdate, Host, HostId, Link, LinkWeight,
    NetworkError, NodeId, PortNr, Switch, Topology,
};
use crate::utils::{random_from_array, random_from_array_with_replacement, split_array};

use indexmap::IndexMap;
use itertools::Itertools;
use log::*;
use rand::prelude::*;
use std::collections::HashMap;
use std::fmt;

/// # Network struct
///
/// The network is built once from a [`Topology`]. During construction, every topology edge is
/// assigned two fresh port numbers (one for each end), and the shortest paths between all pairs of
/// switches are computed. The shortest paths are only recomputed when the link costs are changed
/// through [`Network::modify_link_costs`].
///
/// Switches and controllers refer to each other by id. Switches are stored by their node id, and
/// controllers by their [`ControllerId`], which is the index into the list of controllers.
///
/// Every call to [`Network::add_controllers`] distributes *all* switches among the new
/// controllers. Controllers added by an earlier call keep their id, but manage no switch anymore,
/// and their staged tables are dropped. Only the controllers of the latest call are guaranteed to
/// manage at least one switch. Controllers without staged tables are ignored by the encoders.
#[derive(Debug, Clone)]
pub struct Network {
    topology: Topology,
    shortest_paths: HashMap<(NodeId, NodeId), Vec<NodeId>>,
    switches: IndexMap<NodeId, Switch>,
    controllers: Vec<Controller>,
    hosts: Vec<Host>,
    port_nr: PortNr,
    next_host_id: u32,
}

impl Network {
    /// Build a new network from the topology. Every topology edge gets two consecutive port
    /// numbers, in the order of [`Topology::edges`].
    pub fn new(topology: Topology) -> Result<Self, NetworkError> {
        let mut port_nr: PortNr = 0;
        let mut edge_to_link: HashMap<(NodeId, NodeId), Link> = HashMap::new();
        for edge in topology.edges() {
            edge_to_link.insert((edge.from, edge.to), Link::new(edge, port_nr, port_nr + 1));
            port_nr += 2;
        }

        let mut switches = IndexMap::with_capacity(topology.num_nodes());
        for node in topology.nodes() {
            let links = topology
                .incident_edges(node)?
                .into_iter()
                .map(|e| {
                    edge_to_link
                        .get(&(e.from, e.to))
                        .copied()
                        .ok_or(NetworkError::EdgeNotMappedToLink(e.from, e.to))
                })
                .collect::<Result<Vec<Link>, NetworkError>>()?;
            switches.insert(node, Switch::new(node, links)?);
        }

        let mut net = Self {
            topology,
            shortest_paths: HashMap::new(),
            switches,
            controllers: Vec::new(),
            hosts: Vec::new(),
            port_nr,
            next_host_id: 0,
        };
        net.compute_shortest_paths()?;
        Ok(net)
    }

    /// Compute the shortest path between every ordered pair of switches. The topology is traversed
    /// once per source switch.
    fn compute_shortest_paths(&mut self) -> Result<(), NetworkError> {
        let mut shortest_paths = HashMap::new();
        for src in self.switches.keys() {
            for (dst, path) in self.topology.shortest_paths_from(*src)? {
                if self.switches.contains_key(&dst) {
                    shortest_paths.insert((*src, dst), path);
                }
            }
        }
        self.shortest_paths = shortest_paths;
        Ok(())
    }

    /// Returns a reference to the topology
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Returns the next free port number
    pub fn port_nr(&self) -> PortNr {
        self.port_nr
    }

    /// Returns an iterator over all switches, ordered by node id.
    pub fn switches(&self) -> impl Iterator<Item = &Switch> {
        self.switches.values()
    }

    /// Returns the number of switches
    pub fn num_switches(&self) -> usize {
        self.switches.len()
    }

    /// Returns the switch at the given node
    pub fn get_switch(&self, node: NodeId) -> Result<&Switch, NetworkError> {
        self.switches.get(&node).ok_or(NetworkError::SwitchNotFound(node))
    }

    /// Returns all controllers
    pub fn controllers(&self) -> &[Controller] {
        &self.controllers
    }

    /// Returns the controller with the given id
    pub fn get_controller(&self, id: ControllerId) -> Result<&Controller, NetworkError> {
        self.controllers.get(id.0).ok_or(NetworkError::ControllerNotFound(id))
    }

    /// Returns the controller of the switch at the given node.
    pub fn get_switch_controller(&self, node: NodeId) -> Result<&Controller, NetworkError> {
        let id = self
            .get_switch(node)?
            .controller()
            .ok_or(NetworkError::SwitchHasNoController(node))?;
        self.get_controller(id)
    }

    /// Returns all hosts of the network
    pub fn hosts(&self) -> &[Host] {
        &self.hosts
    }

    /// Returns the host with the given id
    pub fn get_host(&self, id: HostId) -> Option<&Host> {
        self.hosts.iter().find(|h| h.id == id)
    }

    /// Returns the precomputed shortest path between two switches. The path includes both `src`
    /// and `dst`, and the path from a switch to itself contains just that switch.
    pub fn shortest_path(&self, src: NodeId, dst: NodeId) -> Option<&[NodeId]> {
        self.shortest_paths.get(&(src, dst)).map(|p| p.as_slice())
    }

    /// Allocate `n` new hosts. Each host is placed on a switch chosen uniformly at random (with
    /// replacement) from the set of switch ids, and gets a fresh port number. The hosts are neither
    /// registered in the network, nor connected to any other host.
    pub fn create_hosts<R: Rng>(
        &mut self,
        n: usize,
        rng: &mut R,
    ) -> Result<Vec<Host>, NetworkError> {
        if self.switches.is_empty() {
            return Err(NetworkError::NetworkHasNoSwitches);
        }
        let ids: Vec<NodeId> = self.switches.keys().copied().collect();
        let hosts = random_from_array_with_replacement(&ids, n, rng)
            .into_iter()
            .map(|sw| {
                let host = Host::new(HostId(self.next_host_id), self.port_nr, sw);
                self.next_host_id += 1;
                self.port_nr += 1;
                host
            })
            .collect();
        Ok(hosts)
    }

    /// Register hosts created by [`Network::create_hosts`], without connecting them.
    pub fn add_hosts(&mut self, hosts: impl IntoIterator<Item = Host>) {
        self.hosts.extend(hosts);
    }

    /// Create `n` hosts, and make them the host set of the network. Then, for every ordered pair
    /// of distinct hosts, install the flow rules along the shortest path into the live flow tables
    /// of the switches.
    pub fn add_and_connect_hosts<R: Rng>(
        &mut self,
        n: usize,
        rng: &mut R,
    ) -> Result<(), NetworkError> {
        if n < 2 {
            return Err(NetworkError::TooFewHosts);
        }
        let hosts = self.create_hosts(n, rng)?;
        info!(
            "Placed {} hosts on switches {:?}",
            n,
            hosts.iter().map(|h| h.switch.index()).collect::<Vec<_>>()
        );
        self.hosts = hosts;
        self.connect_all_hosts()
    }

    /// For every ordered pair of distinct hosts of the network, install the flow rules along the
    /// shortest path into the live flow tables.
    pub fn connect_all_hosts(&mut self) -> Result<(), NetworkError> {
        let hosts = self.hosts.clone();
        for (h1, h2) in hosts.iter().cartesian_product(hosts.iter()).filter(|(a, b)| a.id != b.id) {
            self.connect_hosts(h1, h2)?;
        }
        Ok(())
    }

    /// Install the flow rules for the traffic from `from` to `to` into the live flow tables.
    fn connect_hosts(&mut self, from: &Host, to: &Host) -> Result<(), NetworkError> {
        let entries = self.get_flow_rules_for_switch_path(
            from.switch,
            to.switch,
            from.switch_port,
            to.switch_port,
        )?;
        for (node, rules) in entries {
            let sw = self.switches.get_mut(&node).ok_or(NetworkError::SwitchNotFound(node))?;
            sw.flow_table_mut().add_entries(to.id, rules.iter());
        }
        Ok(())
    }

    /// Derive the flow rules for the traffic entering the switch `src` at port `in_port`, and
    /// leaving the switch `dst` at port `out_port`, along the shortest path between both switches.
    ///
    /// For every hop from a switch to the next one on the path, the current switch receives two
    /// rules: An inner rule from the receiving port to its port of the link, and a link rule from
    /// its port of the link to the port of the next switch. The last switch receives a single inner
    /// rule from the receiving port to `out_port`.
    pub fn get_flow_rules_for_switch_path(
        &self,
        src: NodeId,
        dst: NodeId,
        in_port: PortNr,
        out_port: PortNr,
    ) -> Result<IndexMap<NodeId, Vec<FlowRule>>, NetworkError> {
        self.get_switch(src)?;
        self.get_switch(dst)?;
        let path = self
            .shortest_path(src, dst)
            .ok_or(NetworkError::NoPathBetweenSwitches(src, dst))?;

        let mut rules: IndexMap<NodeId, Vec<FlowRule>> = IndexMap::new();
        let mut receiving_port = in_port;
        for hop in path.windows(2) {
            let (current, next) = (hop[0], hop[1]);
            let (from_port, to_port) = self.get_switch(current)?.get_link_ports(next)?;
            let entry = rules.entry(current).or_insert_with(Vec::new);
            entry.push(FlowRule::new(receiving_port, from_port, false));
            entry.push(FlowRule::new(from_port, to_port, true));
            receiving_port = to_port;
        }
        rules
            .entry(dst)
            .or_insert_with(Vec::new)
            .push(FlowRule::new(receiving_port, out_port, false));

        Ok(rules)
    }

    /// Add `k` new controllers. The switches are shuffled and split into `k` parts of nearly equal
    /// size, and every part is managed by one new controller. A switch which was managed by an
    /// older controller is moved to its new one, and its staged table at the older controller is
    /// dropped. Since all switches are reassigned, the older controllers are left without any
    /// switch. Fails if `k` is zero, or if the total number of controllers would exceed the number
    /// of switches.
    pub fn add_controllers<R: Rng>(&mut self, k: usize, rng: &mut R) -> Result<(), NetworkError> {
        if k == 0 {
            return Err(NetworkError::TooFewControllers);
        }
        if self.controllers.len() + k > self.switches.len() {
            return Err(NetworkError::MoreControllersThanSwitches);
        }

        let ids: Vec<NodeId> = self.switches.keys().copied().collect();
        let permutation = random_from_array(&ids, ids.len(), rng)?;

        for part in split_array(&permutation, k) {
            let id = ControllerId(self.controllers.len());
            for node in part.iter() {
                let sw = self.switches.get_mut(node).ok_or(NetworkError::SwitchNotFound(*node))?;
                if let Some(old) = sw.controller() {
                    if let Some(c) = self.controllers.get_mut(old.0) {
                        c.remove_switch(*node);
                    }
                }
                sw.set_controller(id);
            }
            info!(
                "Controller {} manages switches {:?}",
                id,
                part.iter().map(|n| n.index()).collect::<Vec<_>>()
            );
            self.controllers.push(Controller::new(id, part));
        }
        Ok(())
    }

    /// Stage `rules` for destination `dest` on the switch at `node`, at the controller which
    /// manages this switch. The live flow table is not modified. Returns `true` if the staged
    /// table was changed.
    pub fn stage_flow_rules(
        &mut self,
        node: NodeId,
        dest: HostId,
        rules: &[FlowRule],
        mode: FlowTableUpdate,
    ) -> Result<bool, NetworkError> {
        let sw = self.switches.get(&node).ok_or(NetworkError::SwitchNotFound(node))?;
        let id = sw.controller().ok_or(NetworkError::SwitchHasNoController(node))?;
        let controller =
            self.controllers.get_mut(id.0).ok_or(NetworkError::ControllerNotFound(id))?;
        Ok(controller.add_new_flow_rules(sw, dest, rules, mode)?)
    }

    /// Derive the flow rules for the traffic from `from` to `to` along the current shortest path,
    /// and stage them at the controllers. Returns `true` if any staged table was changed.
    pub fn stage_host_connection(
        &mut self,
        from: &Host,
        to: &Host,
        mode: FlowTableUpdate,
    ) -> Result<bool, NetworkError> {
        let entries = self.get_flow_rules_for_switch_path(
            from.switch,
            to.switch,
            from.switch_port,
            to.switch_port,
        )?;
        let mut changed = false;
        for (node, rules) in entries {
            changed |= self.stage_flow_rules(node, to.id, &rules, mode)?;
        }
        Ok(changed)
    }

    /// Discard all staged flow tables that are equal to the live flow table of their switch.
    /// Returns the number of discarded tables.
    pub fn remove_duplicate_flow_tables(&mut self) -> usize {
        let switches = &self.switches;
        self.controllers
            .iter_mut()
            .map(|c| c.remove_duplicate_flow_tables(|n| switches.get(&n).map(|s| s.flow_table())))
            .sum()
    }

    /// Returns true if any controller has a staged flow table.
    pub fn has_staged_updates(&self) -> bool {
        self.controllers.iter().any(|c| !c.new_flow_tables().is_empty())
    }

    /// Set the cost of every link (in the order of [`Topology::edges`]), and recompute all shortest
    /// paths.
    pub fn modify_link_costs(&mut self, costs: &[LinkWeight]) -> Result<(), NetworkError> {
        self.topology.set_link_weights(costs)?;
        let topology = &self.topology;
        for sw in self.switches.values_mut() {
            for link in sw.links_mut() {
                let edge = &mut link.topo_edge;
                edge.weight = topology
                    .weight(edge.from, edge.to)
                    .ok_or(NetworkError::EdgeNotMappedToLink(edge.from, edge.to))?;
            }
        }
        debug!("Changed link costs to {:?}", costs);
        self.compute_shortest_paths()
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", printer::network(self))
    }
}
