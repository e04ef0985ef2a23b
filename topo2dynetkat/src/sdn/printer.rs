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

//! # Helper (printer) functions for the Network
//! Module containing helper functions to get formatted strings of flow tables and networks.

use crate::sdn::{FlowTable, Network};

const INDENT: &str = "       ";

/// Returns one line per rule of the flow table, each formatted as a NetKAT policy.
pub fn flow_table(table: &FlowTable) -> Vec<String> {
    table.to_netkat_policies().iter().map(|p| format!("{}{} +", INDENT, p)).collect()
}

/// Returns a formatted string of the entire network: First all hosts, then the live flow table of
/// every switch, and finally the staged flow tables of every controller.
pub fn network(net: &Network) -> String {
    let mut lines: Vec<String> = net
        .hosts()
        .iter()
        .map(|h| format!("H{:3}: Sw: {:3}, Port: {:3}", h.id.0, h.switch.index(), h.switch_port))
        .collect();
    lines.push(String::new());

    for sw in net.switches() {
        lines.push(format!("SW{:3}:", sw.node_id().index()));
        lines.extend(flow_table(sw.flow_table()));
    }

    for c in net.controllers() {
        if c.new_flow_tables().is_empty() {
            continue;
        }
        lines.push(String::new());
        lines.push(format!("C{:3}:", c.id().0));
        for (node, table) in c.new_flow_tables() {
            lines.push(format!("  SW{:3}':", node.index()));
            lines.extend(flow_table(table));
        }
    }

    lines.join("\n")
}
