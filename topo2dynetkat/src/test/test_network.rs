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

use super::fixtures::*;
use crate::sdn::*;

use assert_approx_eq::assert_approx_eq;
use indexmap::IndexMap;
use lazy_static::lazy_static;
use maplit::hashmap;
use rand::prelude::*;
use std::collections::HashMap;

lazy_static! {
    static ref H0: HostId = HostId(0);
    static ref H1: HostId = HostId(1);
}

fn link_rules(net: &Network) -> usize {
    net.switches()
        .map(|s| s.flow_table().entries().values().flatten().filter(|r| r.is_link).count())
        .sum()
}

fn rules(table: &FlowTable, dest: HostId) -> Vec<(PortNr, PortNr, bool)> {
    table.get(dest).unwrap_or(&[]).iter().map(|r| (r.in_port, r.out_port, r.is_link)).collect()
}

#[test]
fn flow_rules_along_path() {
    // links are added out of order, such that the ports are not monotone along the path
    let t = topology(4, &[(2, 3, 1.0), (0, 1, 1.0), (1, 2, 1.0)]);
    let net = Network::new(t).unwrap();
    assert_eq!(net.port_nr(), 6);
    assert_eq!(net.shortest_path(*A, *C), Some(&[*A, *B, *C][..]));

    let entries: HashMap<NodeId, Vec<FlowRule>> =
        net.get_flow_rules_for_switch_path(*A, *C, 0, 7).unwrap().into_iter().collect();
    assert_eq!(
        entries,
        hashmap! {
            *A => vec![FlowRule::new(0, 2, false), FlowRule::new(2, 3, true)],
            *B => vec![FlowRule::new(3, 4, false), FlowRule::new(4, 5, true)],
            *C => vec![FlowRule::new(5, 7, false)],
        }
    );

    // path from a switch to itself
    let entries = net.get_flow_rules_for_switch_path(*D, *D, 10, 11).unwrap();
    let expected: IndexMap<NodeId, Vec<FlowRule>> =
        vec![(*D, vec![FlowRule::new(10, 11, false)])].into_iter().collect();
    assert_eq!(entries, expected);

    assert_eq!(
        net.get_flow_rules_for_switch_path(*A, 9.into(), 0, 7),
        Err(NetworkError::SwitchNotFound(9.into()))
    );
}

#[test]
fn two_hosts_on_different_switches() {
    let mut net = Network::new(line(2)).unwrap();
    net.add_hosts(vec![Host::new(*H0, 2, *A), Host::new(*H1, 3, *B)]);
    net.connect_all_hosts().unwrap();

    let a = net.get_switch(*A).unwrap().flow_table();
    assert_eq!(rules(a, *H1), vec![(2, 0, false), (0, 1, true)]);
    assert_eq!(rules(a, *H0), vec![(0, 2, false)]);

    let b = net.get_switch(*B).unwrap().flow_table();
    assert_eq!(rules(b, *H1), vec![(1, 3, false)]);
    assert_eq!(rules(b, *H0), vec![(3, 1, false), (1, 0, true)]);

    assert_eq!(link_rules(&net), 2);
}

#[test]
fn two_hosts_on_the_same_switch() {
    let mut net = Network::new(line(2)).unwrap();
    net.add_hosts(vec![Host::new(*H0, 2, *A), Host::new(*H1, 3, *A)]);
    net.connect_all_hosts().unwrap();

    let a = net.get_switch(*A).unwrap().flow_table();
    assert_eq!(rules(a, *H1), vec![(2, 3, false)]);
    assert_eq!(rules(a, *H0), vec![(3, 2, false)]);
    assert!(net.get_switch(*B).unwrap().flow_table().is_empty());
    assert_eq!(link_rules(&net), 0);
}

#[test]
fn two_random_hosts() {
    let mut net = Network::new(line(2)).unwrap();
    net.add_and_connect_hosts(2, &mut StdRng::seed_from_u64(crate::utils::SEED)).unwrap();

    assert_eq!(net.hosts().len(), 2);
    assert_eq!(net.hosts().iter().map(|h| h.switch_port).collect::<Vec<_>>(), vec![2, 3]);
    let same_switch = net.hosts()[0].switch == net.hosts()[1].switch;
    assert_eq!(link_rules(&net), if same_switch { 0 } else { 2 });
    // every host is the destination of exactly one inner rule which leaves through its port
    for h in net.hosts() {
        let exits = net
            .switches()
            .filter_map(|s| s.flow_table().get(h.id))
            .flatten()
            .filter(|r| r.out_port == h.switch_port)
            .count();
        assert_eq!(exits, 1);
    }
}

#[test]
fn connecting_twice_adds_no_rules() {
    let mut net = square_net();
    let before: usize = net.switches().map(|s| s.flow_table().num_rules()).sum();
    assert_eq!(before, 10);
    net.connect_all_hosts().unwrap();
    let after: usize = net.switches().map(|s| s.flow_table().num_rules()).sum();
    assert_eq!(before, after);
    assert!(net.get_switch(*D).unwrap().flow_table().is_empty());
}

#[test]
fn change_link_costs() {
    let mut net = square_net();
    assert_eq!(net.shortest_path(*A, *C), Some(&[*A, *B, *C][..]));

    net.modify_link_costs(&[5.0, 5.0, 1.0, 1.0]).unwrap();
    assert_eq!(net.shortest_path(*A, *C), Some(&[*A, *D, *C][..]));
    assert_eq!(net.topology().weight(*D, *A), Some(1.0));
    let link =
        net.get_switch(*A).unwrap().links().iter().find(|l| l.is_incident_to_node(*D)).unwrap();
    assert_approx_eq!(link.topo_edge.weight, 1.0);

    // live flow tables are not touched
    assert!(net.get_switch(*D).unwrap().flow_table().is_empty());

    assert_eq!(
        net.modify_link_costs(&[1.0, 1.0]),
        Err(NetworkError::TopologyError(TopologyError::LinkWeightsMismatch { expected: 4, got: 2 }))
    );
}

#[test]
fn controller_ownership() {
    let mut net = Network::new(complete(5)).unwrap();
    let mut rng = StdRng::seed_from_u64(crate::utils::SEED);
    net.add_controllers(2, &mut rng).unwrap();

    let sizes: Vec<usize> = net.controllers().iter().map(|c| c.switches().len()).collect();
    assert_eq!(sizes.iter().sum::<usize>(), 5);
    assert!(sizes.iter().all(|s| *s == 2 || *s == 3));
    for sw in net.switches() {
        let c = net.get_switch_controller(sw.node_id()).unwrap();
        assert!(c.owns(sw.node_id()));
        assert_eq!(net.controllers().iter().filter(|c| c.owns(sw.node_id())).count(), 1);
    }

    assert_eq!(net.add_controllers(4, &mut rng), Err(NetworkError::MoreControllersThanSwitches));
    assert_eq!(net.add_controllers(0, &mut rng), Err(NetworkError::TooFewControllers));
}

#[test]
fn staging_does_not_touch_live_tables() {
    let mut net = square_net();
    let live: Vec<FlowTable> = net.switches().map(|s| s.flow_table().clone()).collect();

    let rule = [FlowRule::new(8, 7, false)];
    assert_eq!(net.stage_flow_rules(*A, *Y, &rule, FlowTableUpdate::Patch), Ok(true));
    assert!(net.has_staged_updates());
    assert_eq!(net.stage_flow_rules(*A, *Y, &rule, FlowTableUpdate::Patch), Ok(false));

    let after: Vec<FlowTable> = net.switches().map(|s| s.flow_table().clone()).collect();
    assert_eq!(live, after);

    let staged = net.get_switch_controller(*A).unwrap().new_flow_table(*A).unwrap();
    assert_eq!(staged.num_rules(), 4);
    assert!(staged.contains(*Y, &rule[0]));
}
